//! Greedy argument allocation.
//!
//! Decides, left to right and in one pass, how many specimen children each
//! argument template consumes. Position `i` may take at most `max` minus
//! the reserves of every later position, so later mandatory positions are
//! never starved; within that bound each position takes as much as it can.
//!
//! There is no backtracking. Two adjacent positions that could split the
//! same specimens several ways (`@{a}*, @{b}*`) are resolved in favour of
//! the first, and a partition that only a search would find is missed.

use terml_ir::Term;

use crate::errors::QuasiResult;
use crate::matcher::{MatchCx, Matcher};
use crate::Quasi;

/// Match `args` against `specimens`, consuming at most `max`.
///
/// Returns the number of specimens consumed, or `None` if any position
/// fails. Whether everything was consumed is for the caller to check.
pub(crate) fn match_args(
    args: &[Quasi],
    specimens: &[Term],
    cx: &mut MatchCx<'_>,
    path: &[usize],
    max: usize,
) -> QuasiResult<Option<usize>> {
    let reserves: Vec<usize> = args.iter().map(Matcher::reserve).collect();
    let mut reserved_after: usize = reserves.iter().sum();
    let mut max = max;
    let mut consumed = 0usize;

    for (position, (arg, reserve)) in args.iter().zip(&reserves).enumerate() {
        reserved_after = reserved_after.saturating_sub(*reserve);
        let bound = max.saturating_sub(reserved_after);
        let rest = specimens.get(consumed..).unwrap_or_default();

        let Some(taken) = arg.match_at(cx, rest, path, bound)? else {
            tracing::trace!(position, %arg, bound, "argument failed");
            return Ok(None);
        };
        tracing::trace!(position, %arg, bound, taken, "argument matched");
        consumed += taken;
        max = max.saturating_sub(taken);
    }
    Ok(Some(consumed))
}
