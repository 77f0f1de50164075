//! Mantra grounds finitely-quantified boolean constraints into CNF for SAT
//! solvers.
//!
//! A formula is assembled in three steps: register function symbols over
//! finite domains (every (symbol, tuple) pair receives a propositional
//! variable id from a contiguous block), build a quantifier tree whose leaf
//! names atoms over those symbols, then evaluate the tree into a
//! [`cnf::Cnf`] and render it as DIMACS.
//!
//! ```
//! use mantra::prelude::*;
//!
//! # fn main() -> mantra::Result<()> {
//! let mut registry = Registry::new();
//! registry.add_constant("n")?;
//! registry.build("f", 1, [("hi",), ("bye",)])?;
//!
//! let tree = Quantifier::forall(["x"], to_tuple_iter(["hi", "bye"]))
//!     .chain(Quantifier::atoms(&registry, ["-n", "f(x)"])?)?;
//!
//! let cnf = tree.evaluate(&registry)?;
//! assert_eq!(cnf.to_dimacs(), "p cnf 3 2\n-1 2 0\n-1 3 0\n");
//! # Ok(())
//! # }
//! ```

pub mod cnf;
pub mod context;
pub mod errors;
pub mod exclude;
pub mod parser;
pub mod quantifier;
pub mod registry;
pub mod value;

pub use errors::{MantraError, Result};

pub mod prelude {
    pub use crate::cnf::{Clause, Cnf, Lit, Var};
    pub use crate::context::Context;
    pub use crate::errors::{MantraError, Result};
    pub use crate::exclude::{
        exclude_tuple, exclude_value, require_vars, ExcludePredicate, OnMissing,
    };
    pub use crate::parser::parse_atom;
    pub use crate::quantifier::{Atom, Quantifier};
    pub use crate::registry::{Registry, Symbol, SymbolId};
    pub use crate::value::{to_tuple_iter, Tuple, Value};
}
