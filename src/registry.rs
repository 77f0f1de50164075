//! Function symbols and the contiguous propositional-variable allocator.
//!
//! Every registered symbol claims the id block `[base, base + width)`; its
//! relation maps each domain tuple onto that block in domain iteration order.
//! The block is the mapping to propositional variables and the evidence for
//! `in_range` queries at the same time. Once a symbol has been resolved
//! against a tuple it is frozen: relation edits after that point would
//! invalidate literals already emitted, so they fail.

use std::cell::Cell;

use indexmap::IndexMap;
use itertools::Itertools;
use log::warn;

use crate::cnf::Var;
use crate::errors::{MantraError, Result};
use crate::value::Tuple;

/// Handle to a symbol owned by a [`Registry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SymbolId(usize);

/// An uninterpreted function symbol over a finite domain of argument tuples.
#[derive(Debug)]
pub struct Symbol {
    name: String,
    arity: usize,
    base: Var,
    relation: IndexMap<Tuple, Var>,
    constant: bool,
    evaluated: Cell<bool>,
}

impl Symbol {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn arity(&self) -> usize {
        self.arity
    }

    /// First id of the symbol's contiguous block.
    pub fn base(&self) -> Var {
        self.base
    }

    /// Width of the id block; after `set_commutative`/`set_equivalent` some
    /// of these ids may no longer be reachable through the relation.
    pub fn width(&self) -> usize {
        self.relation.len()
    }

    pub fn is_constant(&self) -> bool {
        self.constant
    }

    pub fn was_evaluated(&self) -> bool {
        self.evaluated.get()
    }

    /// Domain tuples in id-assignment order.
    pub fn domain(&self) -> impl Iterator<Item = &Tuple> {
        self.relation.keys()
    }

    /// The id mapped to `tuple`, without freezing the symbol.
    pub fn var(&self, tuple: &Tuple) -> Option<Var> {
        self.relation.get(tuple).copied()
    }

    /// Whether `var` falls into this symbol's id block.
    pub fn in_range(&self, var: Var) -> bool {
        self.base <= var && var < self.base + self.relation.len() as Var
    }

    /// Resolves `tuple` to its propositional variable and freezes the
    /// relation against further edits.
    pub fn resolve(&self, tuple: &Tuple) -> Result<Var> {
        if tuple.len() != self.arity {
            return Err(MantraError::ArityMismatch {
                what: format!("symbol '{}'", self.name),
                expected: self.arity,
                found: tuple.len(),
            });
        }
        let var = self
            .relation
            .get(tuple)
            .copied()
            .ok_or_else(|| MantraError::OutsideDomain {
                symbol: self.name.clone(),
                tuple: tuple.to_string(),
            })?;
        self.evaluated.set(true);
        Ok(var)
    }

    fn assert_mutable(&self) -> Result<()> {
        if self.evaluated.get() {
            return Err(MantraError::FrozenSymbol {
                symbol: self.name.clone(),
            });
        }
        Ok(())
    }
}

/// Owns all symbols of one formula and allocates their id blocks.
///
/// A registry is a plain value owned by the caller; independent registries
/// can build independent formulas side by side.
#[derive(Debug)]
pub struct Registry {
    symbols: Vec<Symbol>,
    next_var: Var,
}

impl Registry {
    pub fn new() -> Self {
        Registry {
            symbols: Vec::new(),
            next_var: 1,
        }
    }

    /// Registers a symbol of the given arity over `domain`.
    ///
    /// The domain is materialized in iteration order; duplicate tuples are
    /// warned about and dropped, keeping the first occurrence. Ids
    /// `[next_var, next_var + size)` are assigned in that order.
    pub fn build<I, T>(&mut self, name: &str, arity: usize, domain: I) -> Result<SymbolId>
    where
        I: IntoIterator<Item = T>,
        T: Into<Tuple>,
    {
        self.assert_unique_name(name)?;
        let mut relation: IndexMap<Tuple, Var> = IndexMap::new();
        let mut duplicates: Vec<Tuple> = Vec::new();
        let mut var = self.next_var;
        for tuple in domain {
            let tuple = tuple.into();
            if tuple.len() != arity {
                return Err(MantraError::ArityMismatch {
                    what: format!("domain element {} of symbol '{}'", tuple, name),
                    expected: arity,
                    found: tuple.len(),
                });
            }
            if relation.contains_key(&tuple) {
                duplicates.push(tuple);
                continue;
            }
            relation.insert(tuple, var);
            var += 1;
        }
        if !duplicates.is_empty() {
            warn!(
                "the domain of symbol '{}' contains duplicate values: {}",
                name,
                duplicates.iter().format(", ")
            );
        }
        let symbol = Symbol {
            name: name.to_string(),
            arity,
            base: self.next_var,
            relation,
            constant: false,
            evaluated: Cell::new(false),
        };
        self.next_var = var;
        self.symbols.push(symbol);
        Ok(SymbolId(self.symbols.len() - 1))
    }

    /// Registers a zero-arity symbol; consumes a single id.
    pub fn add_constant(&mut self, name: &str) -> Result<SymbolId> {
        self.assert_unique_name(name)?;
        let mut relation: IndexMap<Tuple, Var> = IndexMap::new();
        relation.insert(Tuple::empty(), self.next_var);
        let symbol = Symbol {
            name: name.to_string(),
            arity: 0,
            base: self.next_var,
            relation,
            constant: true,
            evaluated: Cell::new(false),
        };
        self.next_var += 1;
        self.symbols.push(symbol);
        Ok(SymbolId(self.symbols.len() - 1))
    }

    /// Collapses ids across argument tuples that are permutations of each
    /// other, so that e.g. `f(x, y)` and `f(y, x)` share a variable.
    ///
    /// Walks the domain in order; every later tuple with the same multiset of
    /// elements as an earlier one is rewritten onto the earlier tuple's id.
    /// Idempotent. Warns and does nothing on constants.
    pub fn set_commutative(&mut self, id: SymbolId) -> Result<()> {
        let symbol = &mut self.symbols[id.0];
        if symbol.constant {
            warn!(
                "calling set_commutative on the constant '{}' has no effect",
                symbol.name
            );
            return Ok(());
        }
        symbol.assert_mutable()?;
        let keys: Vec<Tuple> = symbol.relation.keys().cloned().collect();
        let mut rewritten = vec![false; keys.len()];
        for i in 0..keys.len() {
            if rewritten[i] {
                continue;
            }
            let var = symbol.relation[&keys[i]];
            for j in (i + 1)..keys.len() {
                if !rewritten[j] && same_multiset(&keys[i], &keys[j]) {
                    symbol.relation.insert(keys[j].clone(), var);
                    rewritten[j] = true;
                }
            }
        }
        Ok(())
    }

    /// Makes `alias` map to the same id as `keep`. The rewrite happens only
    /// when both tuples are present in the domain; presence of the keys
    /// decides, not the ids they map to. Warns and does nothing on constants.
    pub fn set_equivalent(&mut self, id: SymbolId, keep: &Tuple, alias: &Tuple) -> Result<()> {
        let symbol = &mut self.symbols[id.0];
        if symbol.constant {
            warn!(
                "calling set_equivalent on the constant '{}' has no effect",
                symbol.name
            );
            return Ok(());
        }
        symbol.assert_mutable()?;
        if symbol.relation.contains_key(keep) && symbol.relation.contains_key(alias) {
            let var = symbol.relation[keep];
            symbol.relation.insert(alias.clone(), var);
        }
        Ok(())
    }

    pub fn symbol(&self, id: SymbolId) -> &Symbol {
        &self.symbols[id.0]
    }

    pub fn find(&self, name: &str) -> Option<SymbolId> {
        self.symbols
            .iter()
            .position(|s| s.name == name)
            .map(SymbolId)
    }

    pub fn iter(&self) -> impl Iterator<Item = (SymbolId, &Symbol)> {
        self.symbols.iter().enumerate().map(|(i, s)| (SymbolId(i), s))
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// The next id that will be issued; one past the largest issued so far.
    pub fn next_var(&self) -> Var {
        self.next_var
    }

    fn assert_unique_name(&self, name: &str) -> Result<()> {
        if self.symbols.iter().any(|s| s.name == name) {
            return Err(MantraError::DuplicateSymbol {
                name: name.to_string(),
            });
        }
        Ok(())
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

fn same_multiset(a: &Tuple, b: &Tuple) -> bool {
    a.len() == b.len() && a.iter().sorted().eq(b.iter().sorted())
}
