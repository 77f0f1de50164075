//! End-to-end expansions: whole trees against whole registries.

use itertools::iproduct;
use mantra::prelude::*;

#[test]
fn forall_exists_over_a_square_domain() {
    let mut registry = Registry::new();
    registry
        .build("f", 2, iproduct!(1..=3, 1..=3))
        .unwrap();
    let tree = Quantifier::forall(["x"], to_tuple_iter(1..=3))
        .chain(Quantifier::exists(["y"], to_tuple_iter(1..=3)))
        .unwrap()
        .chain(Quantifier::atoms(&registry, ["f(x, y)"]).unwrap())
        .unwrap();
    let cnf = tree.evaluate(&registry).unwrap();
    assert_eq!(
        cnf.clauses(),
        &[vec![1, 2, 3], vec![4, 5, 6], vec![7, 8, 9]]
    );
}

#[test]
fn constant_and_unary_symbol_under_both_quantifiers() {
    let mut registry = Registry::new();
    registry.add_constant("n").unwrap();
    registry
        .build("f", 1, to_tuple_iter(["hi", "bye"]))
        .unwrap();

    let tree = Quantifier::forall(["x"], to_tuple_iter(["hi", "bye"]))
        .chain(Quantifier::atoms(&registry, ["-n", "f(x)"]).unwrap())
        .unwrap();
    let cnf = tree.evaluate(&registry).unwrap();
    assert_eq!(cnf.clauses(), &[vec![-1, 2], vec![-1, 3]]);

    let tree = Quantifier::exists(["y"], to_tuple_iter(["hi", "bye"]))
        .chain(Quantifier::atoms(&registry, ["n", "-f(y)"]).unwrap())
        .unwrap();
    let cnf = tree.evaluate(&registry).unwrap();
    assert_eq!(cnf.clauses(), &[vec![1, -2, 1, -3]]);
}

#[test]
fn zip_bound_variables_with_nested_universal() {
    let mut registry = Registry::new();
    let ff = registry
        .build("ff", 2, iproduct!(1..=3, ["aa", "bb", "cc"]))
        .unwrap();
    let gg = registry.build("gg", 1, to_tuple_iter(1..=3)).unwrap();
    assert_eq!(registry.symbol(ff).base(), 1);
    assert_eq!(registry.symbol(gg).base(), 10);

    let pairs: Vec<Tuple> = [1, 2, 3]
        .into_iter()
        .zip(["aa", "bb", "cc"])
        .map(Tuple::from)
        .collect();
    let tree = Quantifier::forall(["x", "y"], pairs)
        .chain(Quantifier::forall(["z"], to_tuple_iter(1..=3)))
        .unwrap()
        .chain(Quantifier::atoms(&registry, ["-ff(z,y)", "gg(x)"]).unwrap())
        .unwrap();
    let cnf = tree.evaluate(&registry).unwrap();
    assert_eq!(
        cnf.clauses(),
        &[
            vec![-1, 10],
            vec![-4, 10],
            vec![-7, 10],
            vec![-2, 11],
            vec![-5, 11],
            vec![-8, 11],
            vec![-3, 12],
            vec![-6, 12],
            vec![-9, 12],
        ]
    );
}

#[test]
fn one_symbol_on_both_sides_of_the_sign() {
    let mut registry = Registry::new();
    registry
        .build("ff", 2, iproduct!(1..=3, ["aa", "bb", "cc"]))
        .unwrap();
    let pairs: Vec<Tuple> = [1, 2, 3]
        .into_iter()
        .zip(["aa", "bb", "cc"])
        .map(Tuple::from)
        .collect();
    let tree = Quantifier::forall(["x", "y"], pairs)
        .chain(Quantifier::forall(["z"], to_tuple_iter(1..=3)))
        .unwrap()
        .chain(Quantifier::atoms(&registry, ["-ff(z,y)", "ff(x,y)"]).unwrap())
        .unwrap();
    let cnf = tree.evaluate(&registry).unwrap();
    assert_eq!(
        cnf.clauses(),
        &[
            vec![-1, 1],
            vec![-4, 1],
            vec![-7, 1],
            vec![-2, 5],
            vec![-5, 5],
            vec![-8, 5],
            vec![-3, 9],
            vec![-6, 9],
            vec![-9, 9],
        ]
    );
}

#[test]
fn off_diagonal_exclusion() {
    let mut registry = Registry::new();
    registry.add_constant("n").unwrap();
    registry
        .build("f", 2, iproduct!(1..=3, 1..=3))
        .unwrap();
    let distinct = require_vars(["x", "y"], OnMissing::Error, |ctx: &Context, _: &Tuple| {
        ctx.lookup("x") != ctx.lookup("y")
    });
    let tree = Quantifier::forall_where(["x", "y"], iproduct!(1..=3, 1..=3), distinct)
        .chain(Quantifier::atoms(&registry, ["n", "f(x,y)"]).unwrap())
        .unwrap();
    let cnf = tree.evaluate(&registry).unwrap();
    assert_eq!(
        cnf.clauses(),
        &[
            vec![1, 3],
            vec![1, 4],
            vec![1, 5],
            vec![1, 7],
            vec![1, 8],
            vec![1, 9],
        ]
    );
}

mod perfect_matching {
    use super::*;

    fn touches_vertex(ctx: &Context, edge: &Tuple) -> bool {
        match ctx.lookup("v") {
            Some(v) => edge.contains(v),
            None => true,
        }
    }

    fn other_incident_edge(ctx: &Context, edge: &Tuple) -> bool {
        let (v, u, w) = match (ctx.lookup("v"), ctx.lookup("u"), ctx.lookup("w")) {
            (Some(v), Some(u), Some(w)) => (v, u, w),
            _ => return true,
        };
        edge.contains(v) && !(edge.contains(u) && edge.contains(w))
    }

    #[test]
    fn matching_encoding_on_the_complete_graph() {
        let vertices = [1i64, 2, 3, 4];
        let edges = [(1i64, 2i64), (1, 3), (1, 4), (2, 3), (2, 4), (3, 4)];
        let mut registry = Registry::new();
        registry.build("p", 2, edges).unwrap();

        let covered = Quantifier::forall(["v"], to_tuple_iter(vertices))
            .chain(Quantifier::exists_where(
                ["u", "w"],
                edges,
                require_vars(["v"], OnMissing::Error, touches_vertex),
            ))
            .unwrap()
            .chain(Quantifier::atoms(&registry, ["p(u, w)"]).unwrap())
            .unwrap();
        let cover_cnf = covered.evaluate(&registry).unwrap();
        assert_eq!(
            cover_cnf.clauses(),
            &[vec![1, 2, 3], vec![1, 4, 5], vec![2, 4, 6], vec![3, 5, 6]]
        );

        let exclusive = Quantifier::forall(["v"], to_tuple_iter(vertices))
            .chain(Quantifier::forall_where(
                ["u", "w"],
                edges,
                require_vars(["v"], OnMissing::Error, touches_vertex),
            ))
            .unwrap()
            .chain(Quantifier::forall_where(
                ["r", "s"],
                edges,
                require_vars(["v", "u", "w"], OnMissing::Error, other_incident_edge),
            ))
            .unwrap()
            .chain(Quantifier::atoms(&registry, ["-p(u,w)", "-p(r,s)"]).unwrap())
            .unwrap();
        let exclusive_cnf = exclusive.evaluate(&registry).unwrap();
        // Per vertex: three incident edges, each paired with the two others.
        assert_eq!(exclusive_cnf.len(), 4 * 3 * 2);
        assert_eq!(exclusive_cnf.clauses()[0], vec![-1, -2]);
        assert_eq!(exclusive_cnf.clauses()[1], vec![-1, -3]);

        let cnf = cover_cnf.join(exclusive_cnf);
        assert_eq!(cnf.len(), 28);
        assert_eq!(cnf.max_var(), 6);
        let dimacs = cnf.to_dimacs();
        assert!(dimacs.starts_with("p cnf 6 28\n1 2 3 0\n"));
        assert_eq!(dimacs.lines().count(), 29);
    }
}

#[test]
fn heterogeneous_domains_end_to_end() {
    let a = 0..4i64;
    let v = 1..5i64;
    let u = [1i64, 3, 5];
    let c = ["also", "valid", "function", "input"];

    let mut registry = Registry::new();
    registry.build("s", 2, iproduct!(a.clone(), c)).unwrap();
    registry.build("r", 1, to_tuple_iter(v.clone())).unwrap();
    registry.build("w", 2, iproduct!(u, c)).unwrap();
    registry.add_constant("t").unwrap();

    let tree = Quantifier::forall(["x"], to_tuple_iter(a))
        .chain(Quantifier::forall(["u", "v"], iproduct!(v, u)))
        .unwrap()
        .chain(Quantifier::exists_where(
            ["y"],
            to_tuple_iter(c),
            exclude_value("x", OnMissing::Warn),
        ))
        .unwrap()
        .chain(Quantifier::atoms(&registry, ["s(x,y)", "r(u)", "w(v, y)", "t"]).unwrap())
        .unwrap();
    let cnf = tree.evaluate(&registry).unwrap();

    // 4 values of x times 12 (u, v) pairs; the existential flattens its four
    // bindings of four atoms each into a 16-literal clause.
    assert_eq!(cnf.len(), 48);
    assert!(cnf.clauses().iter().all(|clause| clause.len() == 16));
    assert_eq!(cnf.max_var(), 33);
    // s occupies 1..=16, r 17..=20, w 21..=32, t 33.
    let first = &cnf.clauses()[0];
    assert_eq!(&first[..4], &[1, 17, 21, 33]);
}
