//! terml quasi - substitution into and matching against quasi-term
//! templates.
//!
//! A template ([`QTerm`]) is a term tree with holes in it:
//! - `${name}` value holes are filled from [`Bindings`] by
//!   [`QTerm::substitute`]
//! - `@{name}` pattern holes capture into [`Bindings`] when
//!   [`QTerm::match_value`] compares the template against a specimen
//! - `t*` / `t+` repeat a sub-template across sibling positions
//!
//! # Matching
//!
//! Matching checks the head, then hands the children to a greedy
//! allocator that decides in one forward pass how many children each
//! argument template consumes (see the `allocate` module for the
//! no-backtracking contract). A hole that appears more than once must
//! capture equal terms everywhere.
//!
//! Inside the engine a non-match is `Ok(None)`. Only the top-level call
//! reports it, as [`QuasiError::NoMatch`] (or `Ok(None)` from
//! `try_match`). Every other [`QuasiError`] is fatal.
//!
//! # Concurrency
//!
//! Templates are immutable and `Send + Sync`. Each call builds its own
//! binding store, so one template can be used from many threads at once.

mod allocate;
mod bindings;
pub mod coerce;
mod errors;
mod hole;
mod matcher;
mod quantifier;
mod stack;
mod template;
mod value;

use std::sync::Once;

pub use bindings::{Binding, Bindings};
pub use errors::{QuasiError, QuasiResult};
pub use hole::{Hole, HoleKind};
pub use quantifier::{QSome, Quantifier};
pub use template::{QFunctor, QHead, QTerm, Quasi};
pub use value::Value;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Safe to call multiple times. Does nothing unless `RUST_LOG` is set,
/// e.g. `RUST_LOG=terml_quasi=trace` to see allocator decisions.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}
