//! The matching protocol shared by every template node, and the top-level
//! driver that turns it into a [`Bindings`] result.

use std::fmt;

use terml_ir::Term;

use crate::coerce::{coerce, CoerceMode};
use crate::errors::{no_match, QuasiResult};
use crate::{Bindings, Value};

/// Per-call matching state. Built fresh by [`match_top`] and never shared.
pub(crate) struct MatchCx<'a> {
    /// Positional values that value holes in a pattern compare against.
    pub aux: &'a [Value],
    pub bindings: Bindings,
}

/// A template node that can be matched against a run of sibling specimens.
pub(crate) trait Matcher: fmt::Display {
    /// Minimum number of specimens this node needs.
    fn reserve(&self) -> usize;

    /// Match against a prefix of `specimens`, taking at most `max` of them.
    ///
    /// `Ok(Some(n))` means the first `n` specimens matched; `Ok(None)` is an
    /// ordinary non-match. `Err` is fatal for the whole call.
    fn match_at(
        &self,
        cx: &mut MatchCx<'_>,
        specimens: &[Term],
        path: &[usize],
        max: usize,
    ) -> QuasiResult<Option<usize>>;

    /// How a non-term top-level specimen is coerced before matching.
    fn specimen_mode(&self) -> CoerceMode {
        CoerceMode::Term
    }
}

/// Match `template` against a single specimen, requiring it to be consumed.
#[tracing::instrument(level = "trace", skip_all, fields(template = %template))]
pub(crate) fn match_top<M: Matcher + ?Sized>(
    template: &M,
    specimen: &Value,
    aux: &[Value],
) -> QuasiResult<Option<Bindings>> {
    let term = match specimen {
        Value::Term(t) => t.clone(),
        other => match coerce(other, template.specimen_mode(), None) {
            Some(t) => t,
            None => {
                tracing::debug!(specimen = %other, "specimen cannot be coerced to a term");
                return Ok(None);
            }
        },
    };

    let mut cx = MatchCx {
        aux,
        bindings: Bindings::new(),
    };
    match template.match_at(&mut cx, std::slice::from_ref(&term), &[], 1)? {
        Some(1) => {
            cx.bindings.commit();
            Ok(Some(cx.bindings))
        }
        _ => {
            tracing::debug!(specimen = %term, "no match");
            Ok(None)
        }
    }
}

/// [`match_top`] with a non-match reported as [`crate::QuasiError::NoMatch`].
pub(crate) fn match_or_fail<M: Matcher + ?Sized>(
    template: &M,
    specimen: &Value,
    aux: &[Value],
) -> QuasiResult<Bindings> {
    match_top(template, specimen, aux)?.ok_or_else(|| no_match(template, specimen))
}
