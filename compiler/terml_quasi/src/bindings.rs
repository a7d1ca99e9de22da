//! Binding store: hole names mapped to captured (or supplied) values.
//!
//! A hole outside any quantifier binds a single value. Each quantifier a
//! hole sits under adds one level of [`Binding::Seq`], indexed by the
//! iteration number. An *index path* is the list of iteration numbers from
//! the outermost quantifier inwards.

use std::collections::hash_map::Entry;
use std::fmt;

use rustc_hash::FxHashMap;
use terml_ir::Term;

use crate::Value;

/// A bound value: one value, or one entry per quantifier iteration.
#[derive(Clone, Debug, PartialEq)]
pub enum Binding {
    One(Value),
    Seq(Vec<Binding>),
}

impl Binding {
    pub fn one(value: impl Into<Value>) -> Self {
        Binding::One(value.into())
    }

    pub fn seq<I, B>(items: I) -> Self
    where
        I: IntoIterator<Item = B>,
        B: Into<Binding>,
    {
        Binding::Seq(items.into_iter().map(Into::into).collect())
    }

    pub fn as_one(&self) -> Option<&Value> {
        match self {
            Binding::One(v) => Some(v),
            Binding::Seq(_) => None,
        }
    }

    /// The captured term, for a single binding holding a term.
    pub fn as_term(&self) -> Option<&Term> {
        self.as_one().and_then(Value::as_term)
    }

    pub fn as_seq(&self) -> Option<&[Binding]> {
        match self {
            Binding::Seq(items) => Some(items),
            Binding::One(_) => None,
        }
    }
}

impl fmt::Display for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Binding::One(v) => write!(f, "{v}"),
            Binding::Seq(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
        }
    }
}

impl From<Value> for Binding {
    fn from(v: Value) -> Self {
        Binding::One(v)
    }
}

impl From<Term> for Binding {
    fn from(t: Term) -> Self {
        Binding::One(Value::Term(t))
    }
}

impl From<i64> for Binding {
    fn from(n: i64) -> Self {
        Binding::One(Value::Int(n))
    }
}

impl From<i32> for Binding {
    fn from(n: i32) -> Self {
        Binding::One(Value::from(n))
    }
}

impl From<&str> for Binding {
    fn from(s: &str) -> Self {
        Binding::One(Value::from(s))
    }
}

impl From<bool> for Binding {
    fn from(b: bool) -> Self {
        Binding::One(Value::Bool(b))
    }
}

impl From<Vec<Binding>> for Binding {
    fn from(items: Vec<Binding>) -> Self {
        Binding::Seq(items)
    }
}

/// One store mutation made while matching, undone by [`Bindings::rewind`].
#[derive(Clone, Debug)]
enum Undo {
    /// `name` was not bound before.
    Inserted(String),
    /// An item was pushed onto the sequence `name` holds at `path`.
    Pushed { name: String, path: Vec<usize> },
}

/// Hole name to [`Binding`].
///
/// Matching creates one of these per top-level call; substitution reads one
/// supplied by the caller.
#[derive(Clone, Debug, Default)]
pub struct Bindings {
    map: FxHashMap<String, Binding>,
    /// Mutations made by `record`/`ensure_seq` since the last `commit`.
    trail: Vec<Undo>,
}

impl PartialEq for Bindings {
    fn eq(&self, other: &Self) -> bool {
        self.map == other.map
    }
}

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, binding: impl Into<Binding>) -> Self {
        self.insert(name, binding);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, binding: impl Into<Binding>) {
        self.map.insert(name.into(), binding.into());
    }

    pub fn get(&self, name: &str) -> Option<&Binding> {
        self.map.get(name)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Bound names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.map.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Read `name` at `path`.
    ///
    /// Descends one `Seq` level per path entry. A single value met before
    /// the path is used up is returned as is, so a scalar supplied for a
    /// hole under a quantifier repeats for every iteration.
    pub fn lookup(&self, name: &str, path: &[usize]) -> Option<&Binding> {
        let mut current = self.map.get(name)?;
        for &i in path {
            match current {
                Binding::One(_) => return Some(current),
                Binding::Seq(items) => current = items.get(i)?,
            }
        }
        Some(current)
    }

    /// Record a captured term for `name` at `path`.
    ///
    /// Returns `false` when a different value (or a differently shaped
    /// binding) is already there.
    pub(crate) fn record(&mut self, name: &str, path: &[usize], term: Term) -> bool {
        let Some((&last, prefix)) = path.split_last() else {
            return match self.map.entry(name.to_owned()) {
                Entry::Occupied(e) => matches!(e.get(), Binding::One(Value::Term(t)) if *t == term),
                Entry::Vacant(e) => {
                    e.insert(Binding::One(Value::Term(term)));
                    self.trail.push(Undo::Inserted(name.to_owned()));
                    true
                }
            };
        };
        let Some(items) = self.seq_at(name, prefix) else {
            return false;
        };
        match items.get(last) {
            Some(Binding::One(Value::Term(t))) => *t == term,
            Some(_) => false,
            None if last == items.len() => {
                items.push(Binding::One(Value::Term(term)));
                self.trail.push(Undo::Pushed {
                    name: name.to_owned(),
                    path: prefix.to_vec(),
                });
                true
            }
            None => false,
        }
    }

    /// Make sure `name` holds a sequence at `path`, creating an empty one if
    /// nothing is there yet. Returns `false` on a shape conflict.
    pub(crate) fn ensure_seq(&mut self, name: &str, path: &[usize]) -> bool {
        let Some((&last, prefix)) = path.split_last() else {
            return match self.map.entry(name.to_owned()) {
                Entry::Occupied(e) => matches!(e.get(), Binding::Seq(_)),
                Entry::Vacant(e) => {
                    e.insert(Binding::Seq(Vec::new()));
                    self.trail.push(Undo::Inserted(name.to_owned()));
                    true
                }
            };
        };
        let Some(items) = self.seq_at(name, prefix) else {
            return false;
        };
        match items.get(last) {
            Some(existing) => matches!(existing, Binding::Seq(_)),
            None if last == items.len() => {
                items.push(Binding::Seq(Vec::new()));
                self.trail.push(Undo::Pushed {
                    name: name.to_owned(),
                    path: prefix.to_vec(),
                });
                true
            }
            None => false,
        }
    }

    /// The sequence that `name` holds at `prefix`, creating empty levels on
    /// the way. Iterations are visited in order, so a new level is only
    /// ever appended at the end.
    fn seq_at(&mut self, name: &str, prefix: &[usize]) -> Option<&mut Vec<Binding>> {
        let mut current = match self.map.entry(name.to_owned()) {
            Entry::Occupied(e) => e.into_mut(),
            Entry::Vacant(e) => {
                self.trail.push(Undo::Inserted(name.to_owned()));
                e.insert(Binding::Seq(Vec::new()))
            }
        };
        let mut walked = Vec::with_capacity(prefix.len());
        for &i in prefix {
            let Binding::Seq(items) = current else {
                return None;
            };
            if i == items.len() {
                items.push(Binding::Seq(Vec::new()));
                self.trail.push(Undo::Pushed {
                    name: name.to_owned(),
                    path: walked.clone(),
                });
            }
            walked.push(i);
            current = items.get_mut(i)?;
        }
        match current {
            Binding::Seq(items) => Some(items),
            Binding::One(_) => None,
        }
    }

    /// The sequence `name` already holds at `path`, without creating levels.
    fn existing_seq(&mut self, name: &str, path: &[usize]) -> Option<&mut Vec<Binding>> {
        let mut current = self.map.get_mut(name)?;
        for &i in path {
            let Binding::Seq(items) = current else {
                return None;
            };
            current = items.get_mut(i)?;
        }
        match current {
            Binding::Seq(items) => Some(items),
            Binding::One(_) => None,
        }
    }

    /// A point to [`rewind`](Self::rewind) back to.
    pub(crate) fn checkpoint(&self) -> usize {
        self.trail.len()
    }

    /// Undo every `record`/`ensure_seq` mutation made since `checkpoint`.
    ///
    /// Mutations only ever append, so undoing them newest first restores
    /// the store exactly, in time proportional to what was undone.
    pub(crate) fn rewind(&mut self, checkpoint: usize) {
        if checkpoint >= self.trail.len() {
            return;
        }
        let undone = self.trail.split_off(checkpoint);
        for undo in undone.into_iter().rev() {
            match undo {
                Undo::Inserted(name) => {
                    self.map.remove(&name);
                }
                Undo::Pushed { name, path } => {
                    if let Some(items) = self.existing_seq(&name, &path) {
                        items.pop();
                    }
                }
            }
        }
    }

    /// Drop the undo trail once matching is over.
    pub(crate) fn commit(&mut self) {
        self.trail = Vec::new();
    }
}

impl fmt::Display for Bindings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, name) in self.names().into_iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            if let Some(binding) = self.map.get(name) {
                write!(f, "{name}: {binding}")?;
            }
        }
        f.write_str("}")
    }
}

#[cfg(test)]
mod tests;
