//! terml IR - term tree types.
//!
//! This crate contains the data structures the quasi-term engine works over:
//! - Spans for source locations
//! - Tags naming a node's kind
//! - Literal data payloads
//! - Terms: immutable tagged trees
//! - Literal wrappers (text and bytes with an optional span)
//!
//! # Equality
//!
//! Terms compare structurally: tag, data and children. Spans are provenance
//! only and never take part in equality or hashing.
//!
//! Floats are stored as `u64` bits so every type here can be `Eq + Hash`.

mod literal;
mod span;
mod tag;
mod term;

pub use literal::{BytesLiteral, TextLiteral};
pub use span::Span;
pub use tag::Tag;
pub use term::{Data, Term};
