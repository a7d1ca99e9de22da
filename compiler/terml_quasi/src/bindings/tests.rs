use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_record_top_level() {
    let mut b = Bindings::new();
    assert!(b.record("x", &[], Term::int(1)));
    assert!(b.record("x", &[], Term::int(1)));
    assert!(!b.record("x", &[], Term::int(2)));
    assert_eq!(b.get("x"), Some(&Binding::from(Term::int(1))));
}

#[test]
fn test_record_sequence() {
    let mut b = Bindings::new();
    assert!(b.record("xs", &[0], Term::int(1)));
    assert!(b.record("xs", &[1], Term::int(2)));
    assert_eq!(
        b.get("xs"),
        Some(&Binding::seq([Term::int(1), Term::int(2)]))
    );
    // Same path, same value.
    assert!(b.record("xs", &[1], Term::int(2)));
    assert!(!b.record("xs", &[1], Term::int(3)));
    // Gaps are never filled.
    assert!(!b.record("xs", &[5], Term::int(3)));
}

#[test]
fn test_record_nested() {
    let mut b = Bindings::new();
    assert!(b.record("x", &[0, 0], Term::int(1)));
    assert!(b.record("x", &[0, 1], Term::int(2)));
    assert!(b.record("x", &[1, 0], Term::int(3)));
    assert_eq!(b.to_string(), "{x: [[1, 2], [3]]}");
}

#[test]
fn test_shape_conflict() {
    let mut b = Bindings::new();
    assert!(b.record("x", &[], Term::int(1)));
    assert!(!b.record("x", &[0], Term::int(1)));
    assert!(!b.ensure_seq("x", &[]));
}

#[test]
fn test_ensure_seq() {
    let mut b = Bindings::new();
    assert!(b.ensure_seq("xs", &[]));
    assert_eq!(b.get("xs"), Some(&Binding::Seq(Vec::new())));
    assert!(b.ensure_seq("ys", &[0]));
    assert!(b.ensure_seq("ys", &[1]));
    assert_eq!(b.to_string(), "{xs: [], ys: [[], []]}");
}

#[test]
fn test_lookup_broadcasts_scalars() {
    let b = Bindings::new()
        .with("sep", 0)
        .with("xs", Binding::seq([1, 2, 3]));
    assert_eq!(b.lookup("sep", &[2]), Some(&Binding::one(0)));
    assert_eq!(b.lookup("xs", &[2]), Some(&Binding::one(3)));
    assert_eq!(b.lookup("xs", &[3]), None);
    assert_eq!(b.lookup("missing", &[]), None);
}

#[test]
fn test_names_sorted() {
    let b = Bindings::new().with("y", 2).with("x", 1);
    assert_eq!(b.names(), vec!["x", "y"]);
    assert_eq!(b.to_string(), "{x: 1, y: 2}");
}

#[test]
fn test_rewind_restores_store() {
    let mut b = Bindings::new();
    assert!(b.record("x", &[0, 0], Term::int(1)));
    assert!(b.record("top", &[], Term::int(0)));
    let before = b.clone();
    let mark = b.checkpoint();

    assert!(b.record("x", &[0, 1], Term::int(2)));
    assert!(b.record("x", &[1, 0], Term::int(3)));
    assert!(b.record("y", &[0], Term::int(4)));
    assert!(b.ensure_seq("z", &[]));
    assert_eq!(b.to_string(), "{top: 0, x: [[1, 2], [3]], y: [4], z: []}");

    b.rewind(mark);
    assert_eq!(b, before);
    assert_eq!(b.to_string(), "{top: 0, x: [[1]]}");
}

#[test]
fn test_rewind_is_nested() {
    let mut b = Bindings::new();
    let outer = b.checkpoint();
    assert!(b.record("x", &[0], Term::int(1)));
    let inner = b.checkpoint();
    assert!(b.record("x", &[1], Term::int(2)));
    b.rewind(inner);
    assert_eq!(b.to_string(), "{x: [1]}");
    // Rewinding to a checkpoint already passed changes nothing.
    b.rewind(inner);
    assert_eq!(b.to_string(), "{x: [1]}");
    b.rewind(outer);
    assert!(b.is_empty());
}

#[test]
fn test_equality_ignores_trail() {
    let mut recorded = Bindings::new();
    assert!(recorded.record("x", &[], Term::int(1)));
    assert_eq!(recorded, Bindings::new().with("x", Term::int(1)));
    recorded.commit();
    assert_eq!(recorded.checkpoint(), 0);
}
