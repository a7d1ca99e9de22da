//! Terms: immutable tagged trees.

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::{Span, Tag};

/// Literal payload carried by a term.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Data {
    Int(i64),
    /// Stored as bits for `Eq`/`Hash`; see [`Data::float`].
    Float(u64),
    Char(char),
    Text(String),
    Bytes(Vec<u8>),
}

impl Data {
    #[inline]
    pub fn float(value: f64) -> Self {
        Data::Float(value.to_bits())
    }
}

impl fmt::Display for Data {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Data::Int(n) => write!(f, "{n}"),
            Data::Float(bits) => write!(f, "{:?}", f64::from_bits(*bits)),
            Data::Char(c) => write!(f, "{c:?}"),
            Data::Text(s) => write!(f, "{s:?}"),
            Data::Bytes(b) => write!(f, "b{:?}", String::from_utf8_lossy(b)),
        }
    }
}

/// An immutable tagged tree node.
///
/// Equality and hashing are structural over tag, data and children.
#[derive(Clone)]
pub struct Term {
    tag: Tag,
    data: Option<Data>,
    args: Vec<Term>,
    span: Option<Span>,
}

impl Term {
    /// Tag used for integer literals.
    pub const INT: &'static str = ".int.";
    /// Tag used for float literals.
    pub const FLOAT: &'static str = ".float64.";
    /// Tag used for character literals.
    pub const CHAR: &'static str = ".char.";
    /// Tag used for text literals.
    pub const STRING: &'static str = ".String.";
    /// Tag used for byte-string literals.
    pub const BYTES: &'static str = ".bytes.";
    /// Tag used for anonymous sequences.
    pub const TUPLE: &'static str = ".tuple.";

    pub fn new(tag: impl Into<Tag>, data: Option<Data>, args: Vec<Term>, span: Option<Span>) -> Self {
        Term {
            tag: tag.into(),
            data,
            args,
            span,
        }
    }

    /// A childless term with no data.
    pub fn leaf(tag: impl Into<Tag>) -> Self {
        Term::new(tag, None, Vec::new(), None)
    }

    /// A term with children and no data.
    pub fn node(tag: impl Into<Tag>, args: Vec<Term>) -> Self {
        Term::new(tag, None, args, None)
    }

    pub fn int(n: i64) -> Self {
        Term::new(Self::INT, Some(Data::Int(n)), Vec::new(), None)
    }

    pub fn float(value: f64) -> Self {
        Term::new(Self::FLOAT, Some(Data::float(value)), Vec::new(), None)
    }

    pub fn char(c: char) -> Self {
        Term::new(Self::CHAR, Some(Data::Char(c)), Vec::new(), None)
    }

    pub fn string(s: impl Into<String>) -> Self {
        Term::new(Self::STRING, Some(Data::Text(s.into())), Vec::new(), None)
    }

    pub fn bytes(b: impl Into<Vec<u8>>) -> Self {
        Term::new(Self::BYTES, Some(Data::Bytes(b.into())), Vec::new(), None)
    }

    pub fn tuple(args: Vec<Term>) -> Self {
        Term::node(Self::TUPLE, args)
    }

    #[inline]
    pub fn tag(&self) -> &Tag {
        &self.tag
    }

    #[inline]
    pub fn data(&self) -> Option<&Data> {
        self.data.as_ref()
    }

    #[inline]
    pub fn args(&self) -> &[Term] {
        &self.args
    }

    #[inline]
    pub fn span(&self) -> Option<Span> {
        self.span
    }

    #[inline]
    pub fn arity(&self) -> usize {
        self.args.len()
    }

    /// Head-only view: same tag, data and span, no children.
    #[must_use]
    pub fn without_args(&self) -> Term {
        Term {
            tag: self.tag.clone(),
            data: self.data.clone(),
            args: Vec::new(),
            span: self.span,
        }
    }

    #[must_use]
    pub fn with_span(mut self, span: Option<Span>) -> Term {
        self.span = span;
        self
    }

    /// Whether the tag is one of the dotted literal tags (`.int.` and friends).
    fn is_literal_tag(&self) -> bool {
        matches!(
            self.tag.name(),
            Self::INT | Self::FLOAT | Self::CHAR | Self::STRING | Self::BYTES
        )
    }
}

impl PartialEq for Term {
    fn eq(&self, other: &Self) -> bool {
        self.tag == other.tag && self.data == other.data && self.args == other.args
    }
}

impl Eq for Term {}

impl Hash for Term {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.tag.hash(state);
        self.data.hash(state);
        self.args.hash(state);
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.data {
            Some(data) if self.is_literal_tag() => write!(f, "{data}")?,
            Some(data) => write!(f, "{}:{data}", self.tag)?,
            None if self.tag.name() == Self::TUPLE => {}
            None => write!(f, "{}", self.tag)?,
        }
        if self.tag.name() == Self::TUPLE {
            f.write_str("[")?;
        } else if !self.args.is_empty() {
            f.write_str("(")?;
        }
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{arg}")?;
        }
        if self.tag.name() == Self::TUPLE {
            f.write_str("]")?;
        } else if !self.args.is_empty() {
            f.write_str(")")?;
        }
        Ok(())
    }
}

impl fmt::Debug for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "term`{self}`")
    }
}
