//! Atom-expression parsing against a registry.

use mantra::prelude::*;

fn sample_registry() -> Registry {
    let mut registry = Registry::new();
    registry.build("func1", 1, [(1,), (2,)]).unwrap();
    registry
        .build("func2", 2, [(1, 1), (1, 2), (2, 1), (2, 2)])
        .unwrap();
    registry
        .build("func3", 3, [(1, 1, 1), (1, 2, 3)])
        .unwrap();
    registry.add_constant("f").unwrap();
    registry
}

#[test]
fn parses_positive_applications() {
    let registry = sample_registry();
    let atom = parse_atom(&registry, "func1(a)").unwrap();
    assert_eq!(atom.symbol, registry.find("func1").unwrap());
    assert_eq!(atom.args, vec!["a"]);
    assert!(!atom.negated);

    let atom = parse_atom(&registry, "func3(d,e,f)").unwrap();
    assert_eq!(atom.args, vec!["d", "e", "f"]);
}

#[test]
fn whitespace_is_stripped_everywhere() {
    let registry = sample_registry();
    let atom = parse_atom(&registry, "  func1(  a)").unwrap();
    assert_eq!(atom.args, vec!["a"]);
    let atom = parse_atom(&registry, "func2   (b,c)").unwrap();
    assert_eq!(atom.args, vec!["b", "c"]);
    let atom = parse_atom(&registry, " func3(d,e,    f  )  ").unwrap();
    assert_eq!(atom.args, vec!["d", "e", "f"]);
    let atom = parse_atom(&registry, " -  f ").unwrap();
    assert!(atom.negated);
    assert!(atom.args.is_empty());
}

#[test]
fn repeated_argument_names_are_allowed() {
    let registry = sample_registry();
    let atom = parse_atom(&registry, "func2(b,b)").unwrap();
    assert_eq!(atom.args, vec!["b", "b"]);
}

#[test]
fn negation_flips_the_sign_only() {
    let registry = sample_registry();
    let plain = parse_atom(&registry, "func1(a)").unwrap();
    let negated = parse_atom(&registry, "-func1(a)").unwrap();
    assert_eq!(plain.symbol, negated.symbol);
    assert_eq!(plain.args, negated.args);
    assert!(!plain.negated);
    assert!(negated.negated);
}

#[test]
fn constants_parse_without_parentheses() {
    let registry = sample_registry();
    let atom = parse_atom(&registry, "f").unwrap();
    assert_eq!(atom.symbol, registry.find("f").unwrap());
    assert!(atom.args.is_empty());
    assert!(!atom.negated);

    let atom = parse_atom(&registry, "-f").unwrap();
    assert!(atom.negated);
}

#[test]
fn malformed_expressions_are_rejected() {
    let registry = sample_registry();
    for expression in [
        "func1(a",
        "func2 b,c)",
        "func1(a)a",
        "func3(d,e),f)",
        "func1(a()",
        "func1)a(",
        "-",
        "",
        "func1(a))",
    ] {
        let err = parse_atom(&registry, expression).unwrap_err();
        assert!(
            matches!(err, MantraError::MalformedAtom { .. }),
            "expected MalformedAtom for '{}', got {:?}",
            expression,
            err
        );
    }
}

#[test]
fn unknown_symbols_are_rejected() {
    let registry = sample_registry();
    let err = parse_atom(&registry, "func9(a)").unwrap_err();
    assert!(matches!(err, MantraError::UnknownSymbol { .. }));
    let err = parse_atom(&registry, "func(a,a)").unwrap_err();
    assert!(matches!(err, MantraError::UnknownSymbol { .. }));
}

#[test]
fn argument_count_must_match_arity() {
    let registry = sample_registry();
    let err = parse_atom(&registry, "func1(a,b)").unwrap_err();
    assert!(matches!(
        err,
        MantraError::ArityMismatch {
            expected: 1,
            found: 2,
            ..
        }
    ));
    let err = parse_atom(&registry, "func2(a)").unwrap_err();
    assert!(matches!(err, MantraError::ArityMismatch { .. }));
    let err = parse_atom(&registry, "f(a)").unwrap_err();
    assert!(matches!(err, MantraError::ArityMismatch { .. }));
    // An empty parenthesis group means zero arguments.
    let atom = parse_atom(&registry, "f()").unwrap();
    assert!(atom.args.is_empty());
}

#[test]
fn atoms_leaf_parses_at_construction_time() {
    let registry = sample_registry();
    let err = Quantifier::atoms(&registry, ["func1(a)", "func9(b)"]).unwrap_err();
    assert!(matches!(err, MantraError::UnknownSymbol { .. }));
}
