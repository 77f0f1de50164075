//! Domain values and argument tuples.
//!
//! A symbol is defined over a finite set of argument tuples. Tuples of every
//! arity share one representation; arity-1 domains still use tuples of length
//! one, which [`to_tuple_iter`] produces from a plain iterable.

use std::fmt;
use std::ops::Deref;

use itertools::Itertools;

/// A single domain element.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Value {
    Int(i64),
    Str(String),
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "Int",
            Value::Str(_) => "Str",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{}", n),
            Value::Str(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(n as i64)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

/// An argument tuple: the unit a symbol's domain is made of.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Tuple(pub Vec<Value>);

impl Tuple {
    /// The zero-length tuple constants are applied to.
    pub fn empty() -> Self {
        Tuple(Vec::new())
    }

    /// A length-one tuple, the form arity-1 domains are made of.
    pub fn unit(value: impl Into<Value>) -> Self {
        Tuple(vec![value.into()])
    }
}

impl Deref for Tuple {
    type Target = [Value];

    fn deref(&self) -> &[Value] {
        &self.0
    }
}

impl fmt::Display for Tuple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({})", self.0.iter().format(", "))
    }
}

impl From<Vec<Value>> for Tuple {
    fn from(values: Vec<Value>) -> Self {
        Tuple(values)
    }
}

impl FromIterator<Value> for Tuple {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Tuple(iter.into_iter().collect())
    }
}

impl<A: Into<Value>> From<(A,)> for Tuple {
    fn from((a,): (A,)) -> Self {
        Tuple(vec![a.into()])
    }
}

impl<A: Into<Value>, B: Into<Value>> From<(A, B)> for Tuple {
    fn from((a, b): (A, B)) -> Self {
        Tuple(vec![a.into(), b.into()])
    }
}

impl<A: Into<Value>, B: Into<Value>, C: Into<Value>> From<(A, B, C)> for Tuple {
    fn from((a, b, c): (A, B, C)) -> Self {
        Tuple(vec![a.into(), b.into(), c.into()])
    }
}

/// Lifts a plain iterable into the length-one tuple form domains require.
pub fn to_tuple_iter<I>(iter: I) -> impl Iterator<Item = Tuple>
where
    I: IntoIterator,
    I::Item: Into<Value>,
{
    iter.into_iter().map(Tuple::unit)
}
