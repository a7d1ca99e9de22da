//! Error types for quasi-term substitution and matching.
//!
//! A non-match is not an error inside the engine: every internal matching
//! call returns `Ok(None)` for it. Only the outermost `match_value` turns it
//! into [`QuasiError::NoMatch`]. Everything else here is fatal for the call
//! that raised it and propagates with `?`.
//!
//! Variants carry rendered text rather than the template or term itself so
//! the error stays small and `'static`.

use thiserror::Error;

/// Result of a substitution or a top-level match.
pub type QuasiResult<T> = Result<T, QuasiError>;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum QuasiError {
    /// The template did not match the specimen.
    #[error("{template} doesn't match {specimen}")]
    NoMatch { template: String, specimen: String },

    /// A hole name had no binding (or no auxiliary argument) to read.
    #[error("no value bound for hole {hole}")]
    UnboundHole { hole: String },

    /// A supplied value could not be turned into a term for a hole, or its
    /// tag disagreed with the hole's tag constraint.
    #[error("{kind} {value} cannot fill hole {hole}")]
    IncoercibleValue {
        hole: String,
        kind: &'static str,
        value: String,
    },

    /// A functor claimed more than one specimen. The template is malformed.
    #[error("functor {template} consumed {consumed} specimens; a functor consumes exactly one")]
    InvariantViolation { template: String, consumed: usize },

    /// A template with arguments was used in functor position.
    #[error("{template} has arguments and cannot be used as a functor")]
    NotAFunctor { template: String },

    /// A hole was used by the wrong operation, e.g. a pattern hole in a
    /// substitution.
    #[error("hole {hole} cannot be used for {operation}")]
    MisplacedHole {
        hole: String,
        operation: &'static str,
    },

    /// Sequence bindings for a quantified substitution were inconsistent.
    #[error("cannot expand repetition: {detail}")]
    RepetitionMismatch { detail: String },
}

impl QuasiError {
    /// Whether this is the recoverable non-match outcome.
    #[inline]
    pub fn is_no_match(&self) -> bool {
        matches!(self, QuasiError::NoMatch { .. })
    }
}

pub(crate) fn no_match(template: impl ToString, specimen: impl ToString) -> QuasiError {
    QuasiError::NoMatch {
        template: template.to_string(),
        specimen: specimen.to_string(),
    }
}

pub(crate) fn unbound_hole(hole: impl ToString) -> QuasiError {
    QuasiError::UnboundHole {
        hole: hole.to_string(),
    }
}

pub(crate) fn incoercible_value(
    hole: impl ToString,
    kind: &'static str,
    value: impl ToString,
) -> QuasiError {
    QuasiError::IncoercibleValue {
        hole: hole.to_string(),
        kind,
        value: value.to_string(),
    }
}

pub(crate) fn invariant_violation(template: impl ToString, consumed: usize) -> QuasiError {
    QuasiError::InvariantViolation {
        template: template.to_string(),
        consumed,
    }
}

pub(crate) fn not_a_functor(template: impl ToString) -> QuasiError {
    QuasiError::NotAFunctor {
        template: template.to_string(),
    }
}

pub(crate) fn misplaced_hole(hole: impl ToString, operation: &'static str) -> QuasiError {
    QuasiError::MisplacedHole {
        hole: hole.to_string(),
        operation,
    }
}

pub(crate) fn repetition_mismatch(detail: impl Into<String>) -> QuasiError {
    QuasiError::RepetitionMismatch {
        detail: detail.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_match_is_recoverable() {
        assert!(no_match("point", "circle").is_no_match());
        assert!(!unbound_hole("${x}").is_no_match());
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            no_match("point(@{x})", "circle(1)").to_string(),
            "point(@{x}) doesn't match circle(1)"
        );
        assert_eq!(
            unbound_hole("${x}").to_string(),
            "no value bound for hole ${x}"
        );
        assert_eq!(
            incoercible_value("point${x}", "term", "circle").to_string(),
            "term circle cannot fill hole point${x}"
        );
        assert_eq!(
            misplaced_hole("@{x}", "substitution").to_string(),
            "hole @{x} cannot be used for substitution"
        );
    }
}
