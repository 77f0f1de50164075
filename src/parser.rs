//! The atom-expression parser.
//!
//! Turns strings like `f(x,y)`, `-f(x,y)`, `c` or `-c` into typed [`Atom`]s
//! referencing the registry. Parsing happens when the atoms leaf of a
//! quantifier tree is built, not during evaluation: the expensive and
//! error-prone work runs once, and every user mistake (malformed syntax,
//! unknown symbol, wrong argument count) surfaces at construction time.

use pest::Parser;
use pest_derive::Parser;

use crate::errors::{MantraError, Result};
use crate::quantifier::Atom;
use crate::registry::Registry;

#[derive(Parser)]
#[grammar = "grammar/atom.pest"]
struct AtomParser;

/// Parses one atom expression against the symbols registered so far.
///
/// All whitespace is stripped before parsing, so `" - f ( x , y ) "` and
/// `"-f(x,y)"` are the same expression.
pub fn parse_atom(registry: &Registry, expression: &str) -> Result<Atom> {
    let stripped: String = expression.chars().filter(|c| !c.is_whitespace()).collect();
    let mut pairs =
        AtomParser::parse(Rule::atom, &stripped).map_err(|_| MantraError::MalformedAtom {
            expression: expression.to_string(),
        })?;
    let atom = pairs.next().unwrap(); // pest guarantees the atom rule on success

    let mut negated = false;
    let mut name = String::new();
    let mut args: Vec<String> = Vec::new();
    for pair in atom.into_inner() {
        match pair.as_rule() {
            Rule::negation => negated = true,
            Rule::name => name = pair.as_str().to_string(),
            Rule::arguments => {
                if let Some(list) = pair.into_inner().next() {
                    args = list.into_inner().map(|p| p.as_str().to_string()).collect();
                }
            }
            _ => {}
        }
    }

    let id = registry.find(&name).ok_or_else(|| MantraError::UnknownSymbol {
        name: name.clone(),
        expression: expression.to_string(),
    })?;
    let symbol = registry.symbol(id);
    if symbol.arity() != args.len() {
        return Err(MantraError::ArityMismatch {
            what: format!("atom expression '{}'", expression.trim()),
            expected: symbol.arity(),
            found: args.len(),
        });
    }

    Ok(Atom {
        symbol: id,
        args,
        negated,
    })
}
