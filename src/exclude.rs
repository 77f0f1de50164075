//! Exclusion predicates: user filters on candidate bindings.
//!
//! During expansion a quantifier offers every value of its range to its
//! predicate, together with the context already extended by that value;
//! returning `Ok(false)` skips the binding. The [`require_vars`] wrapper is
//! the capability contract for predicates: it names the context variables a
//! predicate depends on and fixes what happens when one is missing.

use log::warn;

use crate::context::Context;
use crate::errors::{MantraError, Result};
use crate::value::Tuple;

/// Filter applied to each candidate binding. `Ok(true)` keeps the binding.
pub type ExcludePredicate = Box<dyn Fn(&Context, &Tuple) -> Result<bool>>;

/// Policy for a predicate variable that is absent from the context.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OnMissing {
    /// Fail the evaluation.
    Error,
    /// Emit a diagnostic and keep the binding.
    #[default]
    Warn,
    /// Silently keep the binding.
    Ignore,
}

/// Wraps `predicate` so it only runs when every name in `names` is bound in
/// the context; otherwise `on_missing` decides between failing and treating
/// the predicate as vacuously true.
pub fn require_vars<N, P>(names: N, on_missing: OnMissing, predicate: P) -> ExcludePredicate
where
    N: IntoIterator,
    N::Item: Into<String>,
    P: Fn(&Context, &Tuple) -> bool + 'static,
{
    let names: Vec<String> = names.into_iter().map(Into::into).collect();
    Box::new(move |ctx, value| {
        if handle_missing(ctx, &names, on_missing)? {
            return Ok(true);
        }
        Ok(predicate(ctx, value))
    })
}

fn handle_missing(ctx: &Context, names: &[String], on_missing: OnMissing) -> Result<bool> {
    let missing: Vec<&str> = names
        .iter()
        .filter(|name| !ctx.contains(name))
        .map(String::as_str)
        .collect();
    if missing.is_empty() {
        return Ok(false);
    }
    match on_missing {
        OnMissing::Error => Err(MantraError::MissingBinding {
            name: missing.join(", "),
        }),
        OnMissing::Warn => {
            warn!(
                "predicate variable(s) [{}] are not bound in the current context; keeping the binding",
                missing.join(", ")
            );
            Ok(true)
        }
        OnMissing::Ignore => Ok(true),
    }
}

/// Keeps every value except the length-one tuple of `var`'s current binding.
///
/// Used for ranges like `forall x in V, exists y in V \ {x}`.
pub fn exclude_value(var: &str, on_missing: OnMissing) -> ExcludePredicate {
    let var = var.to_string();
    require_vars([var.clone()], on_missing, move |ctx, value| {
        match ctx.lookup(&var) {
            Some(bound) => value.len() != 1 || value[0] != *bound,
            None => true,
        }
    })
}

/// Keeps every value except the tuple of the named bindings, in order.
///
/// Used for ranges like `forall x in V, forall y in U,
/// exists z in V x U \ {(x, y)}`.
pub fn exclude_tuple<N>(vars: N, on_missing: OnMissing) -> ExcludePredicate
where
    N: IntoIterator,
    N::Item: Into<String>,
{
    let vars: Vec<String> = vars.into_iter().map(Into::into).collect();
    require_vars(vars.clone(), on_missing, move |ctx, value| {
        let bound: Option<Tuple> = vars.iter().map(|v| ctx.lookup(v).cloned()).collect();
        match bound {
            Some(bound) => *value != bound,
            None => true,
        }
    })
}
