//! Literal wrappers: text and bytes carrying the span they came from.

use crate::Span;

/// A text literal.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TextLiteral {
    pub value: String,
    pub span: Option<Span>,
}

impl TextLiteral {
    pub fn new(value: impl Into<String>) -> Self {
        TextLiteral {
            value: value.into(),
            span: None,
        }
    }

    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    /// Textual form, used as the tag when the literal stands for a functor.
    pub fn as_text(&self) -> &str {
        &self.value
    }
}

/// A byte-string literal.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct BytesLiteral {
    pub value: Vec<u8>,
    pub span: Option<Span>,
}

impl BytesLiteral {
    pub fn new(value: impl Into<Vec<u8>>) -> Self {
        BytesLiteral {
            value: value.into(),
            span: None,
        }
    }

    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    /// Textual form of the bytes. Invalid UTF-8 is replaced.
    pub fn to_text(&self) -> String {
        String::from_utf8_lossy(&self.value).into_owned()
    }
}
