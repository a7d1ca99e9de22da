//! Template nodes: [`QTerm`] (head plus argument templates), its head
//! [`QHead`], and [`Quasi`], the element type of an argument list.
//!
//! Templates are built once (normally by the quasi-literal parser) and are
//! immutable afterwards; every operation here takes `&self`.

use std::fmt;

use terml_ir::{Data, Span, Tag, Term};

use crate::allocate::match_args;
use crate::coerce::{admits, CoerceMode};
use crate::errors::{
    invariant_violation, not_a_functor, repetition_mismatch, QuasiResult,
};
use crate::hole::{Hole, HoleKind};
use crate::matcher::{match_or_fail, match_top, MatchCx, Matcher};
use crate::quantifier::{QSome, Quantifier};
use crate::stack::ensure_sufficient_stack;
use crate::{Bindings, Value};

/// Template for a node's head: a tag, plus literal data if required.
#[derive(Clone, Debug)]
pub struct QFunctor {
    pub tag: Tag,
    pub data: Option<Data>,
    pub span: Option<Span>,
}

impl QFunctor {
    pub fn new(tag: impl Into<Tag>) -> Self {
        QFunctor {
            tag: tag.into(),
            data: None,
            span: None,
        }
    }

    #[must_use]
    pub fn with_data(mut self, data: Data) -> Self {
        self.data = Some(data);
        self
    }

    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    /// Head-only term; the enclosing template attaches children.
    pub fn substitute(&self) -> Term {
        Term::new(self.tag.clone(), self.data.clone(), Vec::new(), self.span)
    }
}

impl PartialEq for QFunctor {
    fn eq(&self, other: &Self) -> bool {
        self.tag == other.tag && self.data == other.data
    }
}

impl Matcher for QFunctor {
    fn reserve(&self) -> usize {
        1
    }

    fn match_at(
        &self,
        _cx: &mut MatchCx<'_>,
        specimens: &[Term],
        _path: &[usize],
        max: usize,
    ) -> QuasiResult<Option<usize>> {
        let Some(specimen) = specimens.first() else {
            return Ok(None);
        };
        if !admits(specimen, CoerceMode::Term, Some(&self.tag)) {
            return Ok(None);
        }
        if self.data.is_some() && self.data.as_ref() != specimen.data() {
            return Ok(None);
        }
        Ok((max >= 1).then_some(1))
    }
}

impl fmt::Display for QFunctor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.substitute())
    }
}

/// The head of a [`QTerm`]: a fixed functor or a functor hole.
#[derive(Clone, Debug, PartialEq)]
pub enum QHead {
    Functor(QFunctor),
    Hole(Hole),
}

impl QHead {
    fn substitute_at(&self, bindings: &Bindings, path: &[usize]) -> QuasiResult<Term> {
        match self {
            QHead::Functor(functor) => Ok(functor.substitute()),
            QHead::Hole(hole) => hole.substitute_at(bindings, path),
        }
    }

    fn collect_hole_names<'a>(&'a self, kind: HoleKind, out: &mut Vec<&'a str>) {
        if let QHead::Hole(hole) = self {
            push_name(hole, kind, out);
        }
    }
}

impl Matcher for QHead {
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
        match self {
            QHead::Functor(functor) => functor.match_at(cx, specimens, path, max),
            QHead::Hole(hole) => hole.match_at(cx, specimens, path, max),
        }
    }

    fn specimen_mode(&self) -> CoerceMode {
        match self {
            QHead::Functor(_) => CoerceMode::Term,
            QHead::Hole(_) => CoerceMode::Functor,
        }
    }
}

impl fmt::Display for QHead {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QHead::Functor(functor) => write!(f, "{functor}"),
            QHead::Hole(hole) => write!(f, "{hole}"),
        }
    }
}

impl From<QFunctor> for QHead {
    fn from(functor: QFunctor) -> Self {
        QHead::Functor(functor)
    }
}

/// A hole in head position always stands for a functor.
impl From<Hole> for QHead {
    fn from(hole: Hole) -> Self {
        QHead::Hole(hole.as_functor())
    }
}

impl From<&str> for QHead {
    fn from(tag: &str) -> Self {
        QHead::Functor(QFunctor::new(tag))
    }
}

/// A quasi-term: a head template and argument templates.
#[derive(Clone, Debug)]
pub struct QTerm {
    pub head: QHead,
    pub args: Vec<Quasi>,
    /// Span given to substitution output. Never taken from a specimen.
    pub span: Option<Span>,
}

impl QTerm {
    pub fn new(head: impl Into<QHead>, args: Vec<Quasi>) -> Self {
        QTerm {
            head: head.into(),
            args,
            span: None,
        }
    }

    /// A template for a childless node.
    pub fn leaf(head: impl Into<QHead>) -> Self {
        QTerm::new(head, Vec::new())
    }

    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    /// Build the concrete term this template describes.
    #[tracing::instrument(level = "trace", skip_all, fields(template = %self))]
    pub fn substitute(&self, bindings: &Bindings) -> QuasiResult<Term> {
        self.substitute_at(bindings, &[])
    }

    /// Match against `specimen`, consulting `aux` for value holes.
    pub fn match_value(&self, specimen: &Value, aux: &[Value]) -> QuasiResult<Bindings> {
        match_or_fail(self, specimen, aux)
    }

    /// Match against a term with no auxiliary arguments.
    pub fn match_term(&self, specimen: &Term) -> QuasiResult<Bindings> {
        self.match_value(&Value::Term(specimen.clone()), &[])
    }

    /// Like [`QTerm::match_value`], with a non-match as `Ok(None)`.
    pub fn try_match(&self, specimen: &Value, aux: &[Value]) -> QuasiResult<Option<Bindings>> {
        match_top(self, specimen, aux)
    }

    /// Demote a childless template to its head.
    pub fn as_functor(&self) -> QuasiResult<QHead> {
        if self.args.is_empty() {
            Ok(self.head.clone())
        } else {
            Err(not_a_functor(self))
        }
    }

    fn substitute_at(&self, bindings: &Bindings, path: &[usize]) -> QuasiResult<Term> {
        ensure_sufficient_stack(|| {
            let head = self.head.substitute_at(bindings, path)?;
            let mut args = Vec::with_capacity(self.args.len());
            for arg in &self.args {
                arg.substitute_into(bindings, path, &mut args)?;
            }
            Ok(Term::new(
                head.tag().clone(),
                head.data().cloned(),
                args,
                self.span,
            ))
        })
    }

    fn collect_hole_names<'a>(&'a self, kind: HoleKind, out: &mut Vec<&'a str>) {
        self.head.collect_hole_names(kind, out);
        for arg in &self.args {
            arg.collect_hole_names(kind, out);
        }
    }
}

impl PartialEq for QTerm {
    fn eq(&self, other: &Self) -> bool {
        self.head == other.head && self.args == other.args
    }
}

impl Matcher for QTerm {
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
        ensure_sufficient_stack(|| {
            let head = specimen.without_args();
            match self
                .head
                .match_at(cx, std::slice::from_ref(&head), path, 1)?
            {
                None | Some(0) => return Ok(None),
                Some(1) => {}
                Some(n) => return Err(invariant_violation(&self.head, n)),
            }

            let children = specimen.args();
            let consumed = match_args(&self.args, children, cx, path, children.len())?;
            if consumed == Some(children.len()) && max >= 1 {
                Ok(Some(1))
            } else {
                tracing::trace!(
                    template = %self,
                    %specimen,
                    ?consumed,
                    "arguments not consumed exactly"
                );
                Ok(None)
            }
        })
    }

    fn specimen_mode(&self) -> CoerceMode {
        self.head.specimen_mode()
    }
}

impl fmt::Display for QTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.head)?;
        if !self.args.is_empty() {
            f.write_str("(")?;
            for (i, arg) in self.args.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{arg}")?;
            }
            f.write_str(")")?;
        }
        Ok(())
    }
}

/// One element of an argument list.
#[derive(Clone, Debug, PartialEq)]
pub enum Quasi {
    Term(QTerm),
    Hole(Hole),
    Some(QSome),
}

impl Quasi {
    /// `self*`
    #[must_use]
    pub fn star(self) -> Quasi {
        Quasi::Some(QSome::new(self, Quantifier::Star))
    }

    /// `self+`
    #[must_use]
    pub fn plus(self) -> Quasi {
        Quasi::Some(QSome::new(self, Quantifier::Plus))
    }

    /// Build the single term this template describes.
    ///
    /// A quantifier at the top level must expand to exactly one term.
    #[tracing::instrument(level = "trace", skip_all, fields(template = %self))]
    pub fn substitute(&self, bindings: &Bindings) -> QuasiResult<Term> {
        let mut out = Vec::with_capacity(1);
        self.substitute_into(bindings, &[], &mut out)?;
        match <[Term; 1]>::try_from(out) {
            Ok([term]) => Ok(term),
            Err(out) => Err(repetition_mismatch(format!(
                "{self} expanded to {} terms where one was expected",
                out.len()
            ))),
        }
    }

    /// Match against `specimen`, consulting `aux` for value holes.
    pub fn match_value(&self, specimen: &Value, aux: &[Value]) -> QuasiResult<Bindings> {
        match_or_fail(self, specimen, aux)
    }

    /// Match against a term with no auxiliary arguments.
    pub fn match_term(&self, specimen: &Term) -> QuasiResult<Bindings> {
        self.match_value(&Value::Term(specimen.clone()), &[])
    }

    /// Like [`Quasi::match_value`], with a non-match as `Ok(None)`.
    pub fn try_match(&self, specimen: &Value, aux: &[Value]) -> QuasiResult<Option<Bindings>> {
        match_top(self, specimen, aux)
    }

    /// The functor view of this template, for use in head position.
    pub fn as_functor(&self) -> QuasiResult<QHead> {
        match self {
            Quasi::Term(term) => term.as_functor(),
            Quasi::Hole(hole) => Ok(QHead::Hole(hole.as_functor())),
            Quasi::Some(_) => Err(not_a_functor(self)),
        }
    }

    /// Substitute, appending the result to `out`. Quantifiers append zero
    /// or more terms; everything else appends one.
    pub(crate) fn substitute_into(
        &self,
        bindings: &Bindings,
        path: &[usize],
        out: &mut Vec<Term>,
    ) -> QuasiResult<()> {
        match self {
            Quasi::Term(term) => out.push(term.substitute_at(bindings, path)?),
            Quasi::Hole(hole) => out.push(hole.substitute_at(bindings, path)?),
            Quasi::Some(some) => some.substitute_into(bindings, path, out)?,
        }
        Ok(())
    }

    /// Names of the holes of `kind` in this template, deduplicated, in
    /// order of first appearance.
    pub(crate) fn collect_hole_names<'a>(&'a self, kind: HoleKind, out: &mut Vec<&'a str>) {
        match self {
            Quasi::Term(term) => term.collect_hole_names(kind, out),
            Quasi::Hole(hole) => push_name(hole, kind, out),
            Quasi::Some(some) => some.value.collect_hole_names(kind, out),
        }
    }
}

fn push_name<'a>(hole: &'a Hole, kind: HoleKind, out: &mut Vec<&'a str>) {
    if hole.kind == kind && !out.contains(&hole.name.as_str()) {
        out.push(&hole.name);
    }
}

impl Matcher for Quasi {
    fn reserve(&self) -> usize {
        match self {
            Quasi::Term(term) => term.reserve(),
            Quasi::Hole(hole) => hole.reserve(),
            Quasi::Some(some) => some.reserve(),
        }
    }

    fn match_at(
        &self,
        cx: &mut MatchCx<'_>,
        specimens: &[Term],
        path: &[usize],
        max: usize,
    ) -> QuasiResult<Option<usize>> {
        match self {
            Quasi::Term(term) => term.match_at(cx, specimens, path, max),
            Quasi::Hole(hole) => hole.match_at(cx, specimens, path, max),
            Quasi::Some(some) => some.match_at(cx, specimens, path, max),
        }
    }

    fn specimen_mode(&self) -> CoerceMode {
        match self {
            Quasi::Term(term) => term.specimen_mode(),
            Quasi::Hole(hole) => hole.specimen_mode(),
            Quasi::Some(_) => CoerceMode::Term,
        }
    }
}

impl fmt::Display for Quasi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Quasi::Term(term) => write!(f, "{term}"),
            Quasi::Hole(hole) => write!(f, "{hole}"),
            Quasi::Some(some) => write!(f, "{some}"),
        }
    }
}

impl From<QTerm> for Quasi {
    fn from(term: QTerm) -> Self {
        Quasi::Term(term)
    }
}

impl From<Hole> for Quasi {
    fn from(hole: Hole) -> Self {
        Quasi::Hole(hole)
    }
}

impl From<QSome> for Quasi {
    fn from(some: QSome) -> Self {
        Quasi::Some(some)
    }
}
