//! Coercion bridge: turns a [`Value`] into a term the engine can compare.
//!
//! Two modes:
//! - **Term**: the value stands for a whole subtree. Scalars become the
//!   dotted literal terms (`.int.`, `.String.`, ...), tuples become
//!   `.tuple.` nodes.
//! - **Functor**: the value stands for a node's head. Strings, booleans and
//!   literal wrappers become childless terms tagged by their text; a term
//!   is accepted only if it has no children.
//!
//! In both modes a required tag that disagrees with the result rejects the
//! value. Rejection is `None`; the caller decides whether that is a
//! non-match or an error.

use terml_ir::{BytesLiteral, Data, Tag, Term, TextLiteral};

use crate::Value;

/// How a value is read.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CoerceMode {
    Term,
    Functor,
}

impl CoerceMode {
    #[inline]
    pub fn for_hole(is_functor_hole: bool) -> Self {
        if is_functor_hole {
            CoerceMode::Functor
        } else {
            CoerceMode::Term
        }
    }
}

/// Coerce `value`, then check it against `required`.
pub fn coerce(value: &Value, mode: CoerceMode, required: Option<&Tag>) -> Option<Term> {
    let term = match mode {
        CoerceMode::Functor => functor_shape(value)?,
        CoerceMode::Term => term_shape(value)?,
    };
    has_tag(&term, required).then_some(term)
}

/// Whether an already-built term passes coercion unchanged.
///
/// Terms never change shape under coercion, so specimen children are
/// checked in place instead of being cloned through [`coerce`].
pub fn admits(term: &Term, mode: CoerceMode, required: Option<&Tag>) -> bool {
    if mode == CoerceMode::Functor && term.arity() != 0 {
        return false;
    }
    has_tag(term, required)
}

fn has_tag(term: &Term, required: Option<&Tag>) -> bool {
    required.map_or(true, |tag| term.tag() == tag)
}

fn functor_shape(value: &Value) -> Option<Term> {
    match value {
        Value::Term(t) => (t.arity() == 0).then(|| t.clone()),
        Value::Text(text) => Some(text_functor(text)),
        Value::Bytes(bytes) => Some(bytes_functor(bytes)),
        Value::Str(s) => Some(Term::leaf(s.as_str())),
        Value::Bool(b) => Some(bool_term(*b)),
        Value::Null => Some(Term::leaf("null")),
        Value::Int(_) | Value::Float(_) | Value::Char(_) | Value::Tuple(_) => None,
    }
}

fn term_shape(value: &Value) -> Option<Term> {
    let term = match value {
        Value::Term(t) => t.clone(),
        Value::Text(text) => Term::string(text.value.clone()).with_span(text.span),
        Value::Bytes(bytes) => Term::bytes(bytes.value.clone()).with_span(bytes.span),
        Value::Str(s) => Term::string(s.clone()),
        Value::Bool(b) => bool_term(*b),
        Value::Int(n) => Term::int(*n),
        Value::Float(x) => Term::float(*x),
        Value::Char(c) => Term::char(*c),
        Value::Null => Term::leaf("null"),
        Value::Tuple(items) => Term::tuple(
            items
                .iter()
                .map(term_shape)
                .collect::<Option<Vec<_>>>()?,
        ),
    };
    Some(term)
}

fn text_functor(text: &TextLiteral) -> Term {
    Term::new(
        text.as_text(),
        Some(Data::Text(text.value.clone())),
        Vec::new(),
        text.span,
    )
}

fn bytes_functor(bytes: &BytesLiteral) -> Term {
    Term::new(
        bytes.to_text(),
        Some(Data::Bytes(bytes.value.clone())),
        Vec::new(),
        bytes.span,
    )
}

fn bool_term(b: bool) -> Term {
    Term::leaf(if b { "true" } else { "false" })
}
