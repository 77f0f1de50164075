//! The immutable variable-binding context threaded through evaluation.
//!
//! Each quantifier level extends the context it received with its own
//! bindings and hands the extension to its subtree; the parent context is
//! never mutated, so sibling branches are independent. Extension is a
//! disjoint union: the engine never shadows an outer quantifier variable.

use im::HashMap;

use crate::errors::{MantraError, Result};
use crate::value::Value;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Context {
    vars: HashMap<String, Value>,
}

impl Context {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns a new context holding `self`'s bindings plus `bindings`.
    /// Rebinding an existing name fails; the overlapping names are listed in
    /// the error.
    pub fn extend<I, K>(&self, bindings: I) -> Result<Context>
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        let mut vars = self.vars.clone();
        let mut shadowed: Vec<String> = Vec::new();
        for (name, value) in bindings {
            let name = name.into();
            if vars.contains_key(&name) {
                shadowed.push(name);
            } else {
                vars.insert(name, value);
            }
        }
        if !shadowed.is_empty() {
            return Err(MantraError::ShadowedBinding {
                names: shadowed.join(", "),
            });
        }
        Ok(Context { vars })
    }

    pub fn get(&self, name: &str) -> Result<&Value> {
        self.vars.get(name).ok_or_else(|| MantraError::MissingBinding {
            name: name.to_string(),
        })
    }

    pub fn lookup(&self, name: &str) -> Option<&Value> {
        self.vars.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.vars.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}
