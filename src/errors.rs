//! The unified error type for the whole engine.
//!
//! Every fallible operation returns [`MantraError`] through the crate-wide
//! [`Result`] alias. Errors surface to the caller of the operation where they
//! originate; there is no recovery inside the engine and no partial CNF is
//! emitted on failure. Non-fatal conditions (duplicate domain values,
//! relation edits on constants, lenient missing-variable policies) are not
//! errors; they go through the `log` facade instead.

use miette::Diagnostic;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, MantraError>;

#[derive(Debug, Error, Diagnostic)]
pub enum MantraError {
    /// A symbol name was registered twice.
    #[error("symbol '{name}' is already defined")]
    #[diagnostic(code(mantra::registry::duplicate_symbol))]
    DuplicateSymbol { name: String },

    /// A tuple has the wrong length for its target: a domain element, an
    /// evaluated argument list, or a quantifier binding.
    #[error("{what} expects {expected} element(s), found {found}")]
    #[diagnostic(code(mantra::arity_mismatch))]
    ArityMismatch {
        what: String,
        expected: usize,
        found: usize,
    },

    /// A symbol was applied to a tuple outside its domain.
    #[error("the tuple {tuple} is not in the domain of symbol '{symbol}'")]
    #[diagnostic(code(mantra::registry::outside_domain))]
    OutsideDomain { symbol: String, tuple: String },

    /// A relation edit was attempted after the symbol had been evaluated.
    #[error("symbol '{symbol}' has been evaluated and its relation is frozen")]
    #[diagnostic(
        code(mantra::registry::frozen_symbol),
        help("apply set_commutative/set_equivalent before evaluating any tree that references the symbol")
    )]
    FrozenSymbol { symbol: String },

    /// An atom expression does not follow the `f(x,y)` / `-f(x,y)` / `c` /
    /// `-c` shape.
    #[error("cannot parse atom expression '{expression}'")]
    #[diagnostic(
        code(mantra::parser::malformed_atom),
        help("atom expressions follow the form 'f(x,y)', '-f(x,y)', 'c' or '-c'")
    )]
    MalformedAtom { expression: String },

    /// An atom expression names a symbol the registry does not know.
    #[error("unknown symbol '{name}' in atom expression '{expression}'")]
    #[diagnostic(code(mantra::parser::unknown_symbol))]
    UnknownSymbol { name: String, expression: String },

    /// The quantifier tree violates CNF well-formedness: a universal below an
    /// existential, a chain onto an atoms leaf, a quantifier without a
    /// subtree, or an existential over a multi-clause subtree.
    #[error("invalid formula structure: {message}")]
    #[diagnostic(code(mantra::quantifier::invalid_structure))]
    InvalidStructure { message: String },

    /// A context extension tried to rebind names that are already bound.
    #[error("context extension shadows existing binding(s): {names}")]
    #[diagnostic(code(mantra::context::shadowed_binding))]
    ShadowedBinding { names: String },

    /// A variable was read from a context that does not bind it.
    #[error("variable '{name}' is not bound in the current context")]
    #[diagnostic(code(mantra::context::missing_binding))]
    MissingBinding { name: String },
}
