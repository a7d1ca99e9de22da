//! Quantified sub-templates: `t*` (zero or more) and `t+` (one or more).

use std::fmt;

use terml_ir::Term;

use crate::errors::{repetition_mismatch, unbound_hole, QuasiResult};
use crate::hole::HoleKind;
use crate::matcher::{MatchCx, Matcher};
use crate::{Binding, Bindings, Quasi};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Quantifier {
    /// `+`: at least one repetition.
    Plus,
    /// `*`: any number of repetitions.
    Star,
}

impl Quantifier {
    #[inline]
    pub fn minimum(self) -> usize {
        match self {
            Quantifier::Plus => 1,
            Quantifier::Star => 0,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Quantifier::Plus => '+',
            Quantifier::Star => '*',
        }
    }
}

/// A sub-template repeated across sibling positions.
#[derive(Clone, Debug, PartialEq)]
pub struct QSome {
    pub value: Box<Quasi>,
    pub quant: Quantifier,
}

impl QSome {
    pub fn new(value: impl Into<Quasi>, quant: Quantifier) -> Self {
        QSome {
            value: Box::new(value.into()),
            quant,
        }
    }

    /// Expand once per element of the sequences bound to the contained
    /// value holes, appending the results to `out`.
    pub(crate) fn substitute_into(
        &self,
        bindings: &Bindings,
        path: &[usize],
        out: &mut Vec<Term>,
    ) -> QuasiResult<()> {
        let count = match self.repetitions(bindings, path)? {
            Some(count) => count,
            // Only scalars (or nothing) to repeat: the minimum expansion.
            None => self.quant.minimum(),
        };
        if count < self.quant.minimum() {
            return Err(repetition_mismatch(format!(
                "{self} needs at least {} repetition, bindings give {count}",
                self.quant.minimum()
            )));
        }

        let mut iter_path = path.to_vec();
        iter_path.push(0);
        for i in 0..count {
            if let Some(last) = iter_path.last_mut() {
                *last = i;
            }
            self.value.substitute_into(bindings, &iter_path, out)?;
        }
        Ok(())
    }

    /// Common length of the sequences bound to this quantifier's value
    /// holes at `path`, or `None` when none of them is a sequence.
    fn repetitions(&self, bindings: &Bindings, path: &[usize]) -> QuasiResult<Option<usize>> {
        let mut names = Vec::new();
        self.value.collect_hole_names(HoleKind::Value, &mut names);

        let mut count: Option<(usize, &str)> = None;
        for name in names {
            match bindings.lookup(name, path) {
                None => return Err(unbound_hole(format!("${{{name}}}"))),
                Some(Binding::One(_)) => {}
                Some(Binding::Seq(items)) => match count {
                    None => count = Some((items.len(), name)),
                    Some((len, first)) if len != items.len() => {
                        return Err(repetition_mismatch(format!(
                            "{first} has {len} elements but {name} has {}",
                            items.len()
                        )));
                    }
                    Some(_) => {}
                },
            }
        }
        Ok(count.map(|(len, _)| len))
    }

    /// Bind every pattern hole under this quantifier to a sequence at
    /// `path`, so zero repetitions still leave an (empty) binding.
    fn seal_sequences(&self, cx: &mut MatchCx<'_>, path: &[usize]) -> bool {
        let mut names = Vec::new();
        self.value.collect_hole_names(HoleKind::Pattern, &mut names);
        names
            .into_iter()
            .all(|name| cx.bindings.ensure_seq(name, path))
    }
}

impl Matcher for QSome {
    fn reserve(&self) -> usize {
        self.quant.minimum()
    }

    fn match_at(
        &self,
        cx: &mut MatchCx<'_>,
        specimens: &[Term],
        path: &[usize],
        max: usize,
    ) -> QuasiResult<Option<usize>> {
        let minimum = self.quant.minimum();
        let mut consumed = 0usize;
        let mut iterations = 0usize;
        let mut iter_path = path.to_vec();
        iter_path.push(0);

        loop {
            if let Some(last) = iter_path.last_mut() {
                *last = iterations;
            }
            // A failed iteration must not leave partial captures behind.
            let checkpoint = cx.bindings.checkpoint();
            let rest = specimens.get(consumed..).unwrap_or_default();
            match self
                .value
                .match_at(cx, rest, &iter_path, max.saturating_sub(consumed))?
            {
                Some(0) => {
                    // Zero-width repetition: count it only while it is
                    // needed to reach the minimum, then stop.
                    if iterations < minimum {
                        iterations += 1;
                    } else {
                        cx.bindings.rewind(checkpoint);
                    }
                    break;
                }
                Some(n) => {
                    consumed += n;
                    iterations += 1;
                }
                None => {
                    cx.bindings.rewind(checkpoint);
                    break;
                }
            }
        }

        tracing::trace!(quantifier = %self, iterations, consumed, "repetition done");
        if iterations < minimum || !self.seal_sequences(cx, path) {
            return Ok(None);
        }
        Ok(Some(consumed))
    }
}

impl fmt::Display for QSome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.value, self.quant.as_char())
    }
}

#[cfg(test)]
mod tests;
