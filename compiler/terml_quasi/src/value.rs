//! Values that can be substituted into, or matched against, a template.

use std::fmt;

use terml_ir::{BytesLiteral, Term, TextLiteral};

/// A matchable or substitutable value.
///
/// A closed set: each variant has one coercion rule into term shape (see
/// [`crate::coerce`]).
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Term(Term),
    Text(TextLiteral),
    Bytes(BytesLiteral),
    /// A raw string. As a functor it names a tag; as a term it is a
    /// `.String.` literal.
    Str(String),
    Bool(bool),
    Int(i64),
    Float(f64),
    Char(char),
    Null,
    /// A sequence of values. Becomes a `.tuple.` term, and is indexed by
    /// the repetition path when used as an auxiliary argument.
    Tuple(Vec<Value>),
}

impl Value {
    pub fn str(s: impl Into<String>) -> Self {
        Value::Str(s.into())
    }

    pub fn tuple<I, V>(items: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Value::Tuple(items.into_iter().map(Into::into).collect())
    }

    pub fn as_term(&self) -> Option<&Term> {
        match self {
            Value::Term(t) => Some(t),
            _ => None,
        }
    }

    /// Short type name for diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Term(_) => "term",
            Value::Text(_) => "text literal",
            Value::Bytes(_) => "bytes literal",
            Value::Str(_) => "string",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Char(_) => "char",
            Value::Null => "null",
            Value::Tuple(_) => "tuple",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Term(t) => write!(f, "{t}"),
            Value::Text(t) => write!(f, "{:?}", t.value),
            Value::Bytes(b) => write!(f, "b{:?}", b.to_text()),
            Value::Str(s) => write!(f, "{s:?}"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(x) => write!(f, "{x:?}"),
            Value::Char(c) => write!(f, "{c:?}"),
            Value::Null => f.write_str("null"),
            Value::Tuple(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
        }
    }
}

impl From<Term> for Value {
    fn from(t: Term) -> Self {
        Value::Term(t)
    }
}

impl From<TextLiteral> for Value {
    fn from(t: TextLiteral) -> Self {
        Value::Text(t)
    }
}

impl From<BytesLiteral> for Value {
    fn from(b: BytesLiteral) -> Self {
        Value::Bytes(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(i64::from(n))
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<char> for Value {
    fn from(c: char) -> Self {
        Value::Char(c)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Tuple(items)
    }
}
