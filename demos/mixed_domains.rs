//! A formula mixing several symbols over heterogeneous domains.
//!
//! Builds four symbols (two binary, one unary, one constant) over integer
//! and string domains, quantifies over two nested universals and one
//! filtered existential, and prints the expansion as DIMACS.

use itertools::iproduct;
use mantra::prelude::*;

fn main() -> Result<()> {
    let a = 0..4i64;
    let v = 1..5i64;
    let u = [1i64, 3, 5];
    let c = ["also", "valid", "function", "input"];

    let mut registry = Registry::new();
    registry.build("s", 2, iproduct!(a.clone(), c))?;
    registry.build("r", 1, to_tuple_iter(v.clone()))?;
    registry.build("w", 2, iproduct!(u, c))?;
    registry.add_constant("t")?;

    let tree = Quantifier::forall(["x"], to_tuple_iter(a))
        .chain(Quantifier::forall(["u", "v"], iproduct!(v, u)))?
        .chain(Quantifier::exists_where(
            ["y"],
            to_tuple_iter(c),
            exclude_value("x", OnMissing::Warn),
        ))?
        .chain(Quantifier::atoms(
            &registry,
            ["s(x,y)", "r(u)", "w(v, y)", "t"],
        )?)?;

    let cnf = tree.evaluate(&registry)?;
    print!("{}", cnf.to_dimacs());
    Ok(())
}
