use super::*;
use crate::{Hole, QTerm, QuasiError};
use pretty_assertions::assert_eq;

fn ints(ns: &[i64]) -> Vec<Term> {
    ns.iter().copied().map(Term::int).collect()
}

fn cx() -> MatchCx<'static> {
    MatchCx {
        aux: &[],
        bindings: Bindings::new(),
    }
}

#[test]
fn test_reserve() {
    assert_eq!(QSome::new(Hole::pattern("x"), Quantifier::Plus).reserve(), 1);
    assert_eq!(QSome::new(Hole::pattern("x"), Quantifier::Star).reserve(), 0);
}

#[test]
fn test_star_takes_everything_allowed() {
    let some = QSome::new(Hole::pattern("x"), Quantifier::Star);
    let mut cx = cx();
    assert_eq!(some.match_at(&mut cx, &ints(&[1, 2, 3]), &[], 2), Ok(Some(2)));
    assert_eq!(cx.bindings.to_string(), "{x: [1, 2]}");
}

#[test]
fn test_star_empty_binds_empty_sequence() {
    let some = QSome::new(Hole::pattern("x"), Quantifier::Star);
    let mut cx = cx();
    assert_eq!(some.match_at(&mut cx, &[], &[], 0), Ok(Some(0)));
    assert_eq!(cx.bindings.get("x"), Some(&Binding::Seq(Vec::new())));
}

#[test]
fn test_plus_needs_one() {
    let some = QSome::new(Hole::pattern("x"), Quantifier::Plus);
    let mut cx = cx();
    assert_eq!(some.match_at(&mut cx, &[], &[], 0), Ok(None));
    assert_eq!(some.match_at(&mut cx, &ints(&[1]), &[], 0), Ok(None));
}

#[test]
fn test_failed_iteration_leaves_no_captures() {
    // pair(@{a}, 1)* against [pair(5, 1), pair(6, 2)]
    let pair = QTerm::new(
        "pair",
        vec![
            Hole::pattern("a").into(),
            QTerm::leaf(crate::QFunctor::new(Term::INT).with_data(terml_ir::Data::Int(1))).into(),
        ],
    );
    let some = QSome::new(pair, Quantifier::Star);
    let specimens = vec![
        Term::node("pair", ints(&[5, 1])),
        Term::node("pair", ints(&[6, 2])),
    ];
    let mut cx = cx();
    assert_eq!(some.match_at(&mut cx, &specimens, &[], 2), Ok(Some(1)));
    assert_eq!(cx.bindings.to_string(), "{a: [5]}");
}

#[test]
fn test_nested_quantifier_paths() {
    // row(@{x}*)*
    let row = QTerm::new("row", vec![Quasi::from(Hole::pattern("x")).star()]);
    let some = QSome::new(row, Quantifier::Star);
    let specimens = vec![
        Term::node("row", ints(&[1, 2])),
        Term::node("row", Vec::new()),
        Term::node("row", ints(&[3])),
    ];
    let mut cx = cx();
    assert_eq!(some.match_at(&mut cx, &specimens, &[], 3), Ok(Some(3)));
    assert_eq!(cx.bindings.to_string(), "{x: [[1, 2], [], [3]]}");
}

#[test]
fn test_substitute_expands_sequences() {
    let some = QSome::new(Hole::value("x"), Quantifier::Star);
    let bindings = Bindings::new().with("x", Binding::seq([1, 2, 3]));
    let mut out = Vec::new();
    assert_eq!(some.substitute_into(&bindings, &[], &mut out), Ok(()));
    assert_eq!(out, ints(&[1, 2, 3]));
}

#[test]
fn test_substitute_repeats_scalars_alongside_sequences() {
    let pair = QTerm::new("kv", vec![Hole::value("k").into(), Hole::value("v").into()]);
    let some = QSome::new(pair, Quantifier::Star);
    let bindings = Bindings::new()
        .with("k", 0)
        .with("v", Binding::seq([1, 2]));
    let mut out = Vec::new();
    assert_eq!(some.substitute_into(&bindings, &[], &mut out), Ok(()));
    assert_eq!(
        out,
        vec![
            Term::node("kv", ints(&[0, 1])),
            Term::node("kv", ints(&[0, 2])),
        ]
    );
}

#[test]
fn test_substitute_without_holes() {
    let star = QSome::new(QTerm::leaf("x"), Quantifier::Star);
    let plus = QSome::new(QTerm::leaf("x"), Quantifier::Plus);
    let mut out = Vec::new();
    assert_eq!(star.substitute_into(&Bindings::new(), &[], &mut out), Ok(()));
    assert!(out.is_empty());
    assert_eq!(plus.substitute_into(&Bindings::new(), &[], &mut out), Ok(()));
    assert_eq!(out, vec![Term::leaf("x")]);
}

#[test]
fn test_substitute_ragged_sequences() {
    let pair = QTerm::new("kv", vec![Hole::value("k").into(), Hole::value("v").into()]);
    let some = QSome::new(pair, Quantifier::Star);
    let bindings = Bindings::new()
        .with("k", Binding::seq([1]))
        .with("v", Binding::seq([1, 2]));
    let err = some.substitute_into(&bindings, &[], &mut Vec::new());
    assert!(matches!(err, Err(QuasiError::RepetitionMismatch { .. })));
}

#[test]
fn test_substitute_plus_with_empty_sequence() {
    let some = QSome::new(Hole::value("x"), Quantifier::Plus);
    let bindings = Bindings::new().with("x", Binding::Seq(Vec::new()));
    let err = some.substitute_into(&bindings, &[], &mut Vec::new());
    assert!(matches!(err, Err(QuasiError::RepetitionMismatch { .. })));
}

#[test]
fn test_display() {
    assert_eq!(
        QSome::new(Hole::pattern("x"), Quantifier::Plus).to_string(),
        "@{x}+"
    );
}

#[test]
fn test_star_over_many_children() {
    let n = 100_000;
    let specimens: Vec<Term> = (0..n).map(Term::int).collect();
    let some = QSome::new(Hole::pattern("x"), Quantifier::Star);
    let mut cx = cx();
    let count = specimens.len();
    assert_eq!(some.match_at(&mut cx, &specimens, &[], count), Ok(Some(count)));
    let Some(Binding::Seq(items)) = cx.bindings.get("x") else {
        panic!("x should be a sequence");
    };
    assert_eq!(items.len(), count);
    assert_eq!(items.last(), Some(&Binding::from(Term::int(n - 1))));
}

#[test]
fn test_failed_inner_iteration_rolls_back_nested_captures() {
    // row(@{x}*, end)* against [row(1, end), row(2, 3)]: the second row
    // opens x[1] and records 2 there before failing on `end`.
    let row = QTerm::new(
        "row",
        vec![Quasi::from(Hole::pattern("x")).star(), QTerm::leaf("end").into()],
    );
    let some = QSome::new(row, Quantifier::Star);
    let specimens = vec![
        Term::node("row", vec![Term::int(1), Term::leaf("end")]),
        Term::node("row", ints(&[2, 3])),
    ];
    let mut cx = cx();
    assert_eq!(some.match_at(&mut cx, &specimens, &[], 2), Ok(Some(1)));
    assert_eq!(cx.bindings.to_string(), "{x: [[1]]}");
}
