//! The quantifier tree and its evaluator.
//!
//! A formula is a chain of universal and existential nodes ending in an
//! atoms leaf. The structural invariant that makes the expansion a valid
//! CNF: on any root-to-leaf path no universal may appear below an
//! existential. [`Quantifier::chain`] enforces it while the tree is built,
//! and the evaluator re-checks the consequences (an existential may only
//! flatten a single-clause subtree) for trees assembled by hand.
//!
//! Evaluation walks the tree with an immutable [`Context`]: a universal
//! concatenates the clause lists of its bindings, an existential flattens
//! its bindings' clauses into one disjunction, an atoms leaf resolves its
//! literals in textual order.

use crate::cnf::{Clause, Cnf, Lit};
use crate::context::Context;
use crate::errors::{MantraError, Result};
use crate::exclude::ExcludePredicate;
use crate::parser::parse_atom;
use crate::registry::{Registry, SymbolId};
use crate::value::Tuple;

/// One parsed signed function-application atom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Atom {
    pub symbol: SymbolId,
    pub args: Vec<String>,
    pub negated: bool,
}

impl Atom {
    /// Resolves the atom to a signed literal under the given context.
    ///
    /// The argument tuple is reassembled by looking every argument name up
    /// in the context, in positional order.
    pub fn literal(&self, registry: &Registry, ctx: &Context) -> Result<Lit> {
        let mut elements = Vec::with_capacity(self.args.len());
        for arg in &self.args {
            elements.push(ctx.get(arg)?.clone());
        }
        let var = registry.symbol(self.symbol).resolve(&Tuple(elements))?;
        Ok(if self.negated { -var } else { var })
    }
}

/// A node of the formula tree.
///
/// The variants are public so trees can also be assembled by hand; the
/// evaluator re-checks the structural rules that [`Quantifier::chain`]
/// enforces during composition.
pub enum Quantifier {
    /// "For all bindings of `vars` over `values`": one clause list per kept
    /// binding, concatenated.
    Forall {
        vars: Vec<String>,
        values: Vec<Tuple>,
        exclude: Option<ExcludePredicate>,
        sub: Option<Box<Quantifier>>,
    },
    /// "There is a binding of `vars` over `values`": the kept bindings'
    /// clauses flattened into one disjunction.
    Exists {
        vars: Vec<String>,
        values: Vec<Tuple>,
        exclude: Option<ExcludePredicate>,
        sub: Option<Box<Quantifier>>,
    },
    /// The leaf: a single clause of signed atoms.
    Atoms { items: Vec<Atom> },
}

impl std::fmt::Debug for Quantifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Quantifier::Forall {
                vars,
                values,
                exclude,
                sub,
            } => f
                .debug_struct("Forall")
                .field("vars", vars)
                .field("values", values)
                .field("exclude", &exclude.is_some())
                .field("sub", sub)
                .finish(),
            Quantifier::Exists {
                vars,
                values,
                exclude,
                sub,
            } => f
                .debug_struct("Exists")
                .field("vars", vars)
                .field("values", values)
                .field("exclude", &exclude.is_some())
                .field("sub", sub)
                .finish(),
            Quantifier::Atoms { items } => {
                f.debug_struct("Atoms").field("items", items).finish()
            }
        }
    }
}

impl Quantifier {
    pub fn forall<V, I, T>(vars: V, values: I) -> Self
    where
        V: IntoIterator,
        V::Item: Into<String>,
        I: IntoIterator<Item = T>,
        T: Into<Tuple>,
    {
        Quantifier::Forall {
            vars: vars.into_iter().map(Into::into).collect(),
            values: values.into_iter().map(Into::into).collect(),
            exclude: None,
            sub: None,
        }
    }

    pub fn forall_where<V, I, T>(vars: V, values: I, exclude: ExcludePredicate) -> Self
    where
        V: IntoIterator,
        V::Item: Into<String>,
        I: IntoIterator<Item = T>,
        T: Into<Tuple>,
    {
        Quantifier::Forall {
            vars: vars.into_iter().map(Into::into).collect(),
            values: values.into_iter().map(Into::into).collect(),
            exclude: Some(exclude),
            sub: None,
        }
    }

    pub fn exists<V, I, T>(vars: V, values: I) -> Self
    where
        V: IntoIterator,
        V::Item: Into<String>,
        I: IntoIterator<Item = T>,
        T: Into<Tuple>,
    {
        Quantifier::Exists {
            vars: vars.into_iter().map(Into::into).collect(),
            values: values.into_iter().map(Into::into).collect(),
            exclude: None,
            sub: None,
        }
    }

    pub fn exists_where<V, I, T>(vars: V, values: I, exclude: ExcludePredicate) -> Self
    where
        V: IntoIterator,
        V::Item: Into<String>,
        I: IntoIterator<Item = T>,
        T: Into<Tuple>,
    {
        Quantifier::Exists {
            vars: vars.into_iter().map(Into::into).collect(),
            values: values.into_iter().map(Into::into).collect(),
            exclude: Some(exclude),
            sub: None,
        }
    }

    /// Builds the atoms leaf by parsing each expression against the
    /// registry. All parse errors surface here, at construction time.
    pub fn atoms<I>(registry: &Registry, expressions: I) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let items = expressions
            .into_iter()
            .map(|expr| parse_atom(registry, expr.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Ok(Quantifier::Atoms { items })
    }

    /// Attaches `child` below the deepest open node of this tree.
    ///
    /// Fails when the deepest node is an atoms leaf, and when the attachment
    /// would put a universal below an existential.
    pub fn chain(self, child: Quantifier) -> Result<Self> {
        match self {
            Quantifier::Atoms { .. } => Err(MantraError::InvalidStructure {
                message: "cannot chain a node below an atoms leaf".to_string(),
            }),
            Quantifier::Forall {
                vars,
                values,
                exclude,
                sub,
            } => {
                let sub = Some(Box::new(Self::attach(sub, child, false)?));
                Ok(Quantifier::Forall {
                    vars,
                    values,
                    exclude,
                    sub,
                })
            }
            Quantifier::Exists {
                vars,
                values,
                exclude,
                sub,
            } => {
                let sub = Some(Box::new(Self::attach(sub, child, true)?));
                Ok(Quantifier::Exists {
                    vars,
                    values,
                    exclude,
                    sub,
                })
            }
        }
    }

    fn attach(sub: Option<Box<Quantifier>>, child: Quantifier, under_exists: bool) -> Result<Quantifier> {
        match sub {
            None => {
                if under_exists && matches!(child, Quantifier::Forall { .. }) {
                    return Err(MantraError::InvalidStructure {
                        message: "a universal quantifier below an existential one is not a valid CNF"
                            .to_string(),
                    });
                }
                Ok(child)
            }
            Some(existing) => (*existing).chain(child),
        }
    }

    /// Expands the tree into a CNF, starting from the empty context.
    pub fn evaluate(&self, registry: &Registry) -> Result<Cnf> {
        self.evaluate_in(registry, &Context::empty())
    }

    /// Expands the tree under an existing context.
    pub fn evaluate_in(&self, registry: &Registry, ctx: &Context) -> Result<Cnf> {
        match self {
            Quantifier::Atoms { items } => {
                let mut clause: Clause = Vec::with_capacity(items.len());
                for atom in items {
                    clause.push(atom.literal(registry, ctx)?);
                }
                Ok(Cnf::from(vec![clause]))
            }
            Quantifier::Forall {
                vars,
                values,
                exclude,
                sub,
            } => {
                let sub = Self::subtree(sub, "universal")?;
                let mut cnf = Cnf::new();
                for value in values {
                    let inner = match Self::bind(ctx, vars, value, exclude)? {
                        Some(inner) => inner,
                        None => continue,
                    };
                    cnf = cnf.join(sub.evaluate_in(registry, &inner)?);
                }
                Ok(cnf)
            }
            Quantifier::Exists {
                vars,
                values,
                exclude,
                sub,
            } => {
                let sub = Self::subtree(sub, "existential")?;
                let mut clause: Clause = Vec::new();
                for value in values {
                    let inner = match Self::bind(ctx, vars, value, exclude)? {
                        Some(inner) => inner,
                        None => continue,
                    };
                    let sub_cnf = sub.evaluate_in(registry, &inner)?;
                    if sub_cnf.len() != 1 {
                        return Err(MantraError::InvalidStructure {
                            message: format!(
                                "an existential can only flatten a single-clause subtree, got {} clauses",
                                sub_cnf.len()
                            ),
                        });
                    }
                    clause.extend_from_slice(&sub_cnf.clauses()[0]);
                }
                Ok(Cnf::from(vec![clause]))
            }
        }
    }

    fn subtree<'a>(sub: &'a Option<Box<Quantifier>>, kind: &str) -> Result<&'a Quantifier> {
        sub.as_deref().ok_or_else(|| MantraError::InvalidStructure {
            message: format!("{} quantifier has no subtree to expand", kind),
        })
    }

    /// Extends the context with one binding and runs the exclusion filter.
    /// `Ok(None)` means the binding is skipped. The filter runs after the
    /// extension so predicates can see the binding they are judging.
    fn bind(
        ctx: &Context,
        vars: &[String],
        value: &Tuple,
        exclude: &Option<ExcludePredicate>,
    ) -> Result<Option<Context>> {
        if value.len() != vars.len() {
            return Err(MantraError::ArityMismatch {
                what: format!("binding for variables ({})", vars.join(", ")),
                expected: vars.len(),
                found: value.len(),
            });
        }
        let inner = ctx.extend(vars.iter().cloned().zip(value.iter().cloned()))?;
        if let Some(predicate) = exclude {
            if !predicate(&inner, value)? {
                return Ok(None);
            }
        }
        Ok(Some(inner))
    }
}
