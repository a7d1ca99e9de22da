//! Holes: named placeholders in a template.
//!
//! A value hole (`${name}`) is filled from bindings during substitution. A
//! pattern hole (`@{name}`) captures into bindings during matching. Either
//! may carry a tag constraint, and either may stand for a node's head (a
//! *functor hole*) instead of a whole subtree.

use std::fmt;

use terml_ir::{Tag, Term};

use crate::coerce::{admits, coerce, CoerceMode};
use crate::errors::{incoercible_value, misplaced_hole, unbound_hole, QuasiResult};
use crate::matcher::{MatchCx, Matcher};
use crate::{Binding, Bindings, Value};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum HoleKind {
    /// Filled during substitution; compared against auxiliary arguments
    /// during matching.
    Value,
    /// Captures during matching.
    Pattern,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Hole {
    pub kind: HoleKind,
    /// Tag the hole's value must carry, if any.
    pub tag: Option<Tag>,
    pub name: String,
    pub is_functor_hole: bool,
}

impl Hole {
    pub fn value(name: impl Into<String>) -> Self {
        Hole {
            kind: HoleKind::Value,
            tag: None,
            name: name.into(),
            is_functor_hole: false,
        }
    }

    pub fn pattern(name: impl Into<String>) -> Self {
        Hole {
            kind: HoleKind::Pattern,
            tag: None,
            name: name.into(),
            is_functor_hole: false,
        }
    }

    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<Tag>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// The same hole standing for a node's head.
    #[must_use]
    pub fn as_functor(&self) -> Hole {
        Hole {
            is_functor_hole: true,
            ..self.clone()
        }
    }

    #[inline]
    fn mode(&self) -> CoerceMode {
        CoerceMode::for_hole(self.is_functor_hole)
    }

    /// Fill this hole from `bindings` at `path`.
    pub(crate) fn substitute_at(&self, bindings: &Bindings, path: &[usize]) -> QuasiResult<Term> {
        if self.kind == HoleKind::Pattern {
            return Err(misplaced_hole(self, "substitution"));
        }
        match bindings.lookup(&self.name, path) {
            None => Err(unbound_hole(self)),
            Some(seq @ Binding::Seq(_)) => Err(incoercible_value(self, "sequence", seq)),
            Some(Binding::One(value)) => self.coerce_supplied(value),
        }
    }

    fn coerce_supplied(&self, value: &Value) -> QuasiResult<Term> {
        coerce(value, self.mode(), self.tag.as_ref())
            .ok_or_else(|| incoercible_value(self, value.type_name(), value))
    }

    /// The auxiliary argument a value hole compares against when it appears
    /// in a pattern. Its name is the argument position; tuples are indexed
    /// by `path`, scalars repeat.
    fn auxiliary<'a>(&self, aux: &'a [Value], path: &[usize]) -> QuasiResult<&'a Value> {
        let mut current = self
            .name
            .parse::<usize>()
            .ok()
            .and_then(|position| aux.get(position))
            .ok_or_else(|| unbound_hole(self))?;
        for &i in path {
            match current {
                Value::Tuple(items) => {
                    current = items.get(i).ok_or_else(|| unbound_hole(self))?;
                }
                _ => break,
            }
        }
        Ok(current)
    }
}

impl Matcher for Hole {
    fn reserve(&self) -> usize {
        1
    }

    fn match_at(
        &self,
        cx: &mut MatchCx<'_>,
        specimens: &[Term],
        path: &[usize],
        max: usize,
    ) -> QuasiResult<Option<usize>> {
        let Some(specimen) = specimens.first() else {
            return Ok(None);
        };
        if max < 1 {
            return Ok(None);
        }
        match self.kind {
            HoleKind::Pattern => {
                if !admits(specimen, self.mode(), self.tag.as_ref()) {
                    return Ok(None);
                }
                if !cx.bindings.record(&self.name, path, specimen.clone()) {
                    tracing::trace!(hole = %self, %specimen, "conflicts with earlier capture");
                    return Ok(None);
                }
                Ok(Some(1))
            }
            HoleKind::Value => {
                let expected = self.coerce_supplied(self.auxiliary(cx.aux, path)?)?;
                Ok((expected == *specimen).then_some(1))
            }
        }
    }

    fn specimen_mode(&self) -> CoerceMode {
        self.mode()
    }
}

impl fmt::Display for Hole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(tag) = &self.tag {
            write!(f, "{tag}")?;
        }
        let sigil = match self.kind {
            HoleKind::Value => '$',
            HoleKind::Pattern => '@',
        };
        write!(f, "{sigil}{{{}}}", self.name)
    }
}
