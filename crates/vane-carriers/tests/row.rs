use super::*;
use indexmap::IndexMap;
use vane_common::Atom;
use vane_types::Type;

fn row(labels: &[(&str, Option<Type>)], tail: Option<Type>) -> Type {
    let mut cases = IndexMap::new();
    for (label, payload) in labels {
        cases.insert(Atom::from(*label), payload.clone());
    }
    Type::row(cases, tail)
}

#[test]
fn union_merges_disjoint_labels() {
    let a = row(&[("DivByZero", None)], None);
    let b = row(&[("Timeout", None)], None);
    let merged = union_rows(a, b);
    let (cases, _) = merged.as_row().expect("row");
    assert!(cases.contains_key("DivByZero"));
    assert!(cases.contains_key("Timeout"));
}

#[test]
fn union_prefers_existing_non_null_payload_on_collision() {
    let a = row(&[("DivByZero", Some(Type::Int))], None);
    let b = row(&[("DivByZero", Some(Type::Bool))], None);
    let merged = union_rows(a, b);
    let (cases, _) = merged.as_row().expect("row");
    assert_eq!(cases.get("DivByZero"), Some(&Some(Type::Int)));
}

#[test]
fn union_fills_in_payload_when_left_is_null() {
    let a = row(&[("DivByZero", None)], None);
    let b = row(&[("DivByZero", Some(Type::Int))], None);
    let merged = union_rows(a, b);
    let (cases, _) = merged.as_row().expect("row");
    assert_eq!(cases.get("DivByZero"), Some(&Some(Type::Int)));
}

#[test]
fn union_keeps_concrete_tail_over_variable_tail() {
    let a = row(&[], Some(Type::Variable(0)));
    let b = row(&[], Some(Type::Int));
    let merged = union_rows(a, b);
    let (_, tail) = merged.as_row().expect("row");
    assert_eq!(tail, Some(&Type::Int));
}

#[test]
fn union_keeps_left_tail_when_both_concrete() {
    let a = row(&[], Some(Type::Int));
    let b = row(&[], Some(Type::Bool));
    let merged = union_rows(a, b);
    let (_, tail) = merged.as_row().expect("row");
    assert_eq!(tail, Some(&Type::Int));
}

#[test]
fn union_is_idempotent_on_a_flat_row() {
    let r = row(&[("DivByZero", None), ("Timeout", Some(Type::String))], Some(Type::Variable(3)));
    assert!(is_idempotent(&r));
}

#[test]
fn union_flattens_nested_row_tail() {
    let inner = row(&[("Timeout", None)], Some(Type::Variable(1)));
    let outer = row(&[("DivByZero", None)], Some(inner));
    let merged = union_rows(outer, row(&[], None));
    let (cases, tail) = merged.as_row().expect("row");
    assert!(cases.contains_key("DivByZero"));
    assert!(cases.contains_key("Timeout"));
    assert_eq!(tail, Some(&Type::Variable(1)));
}
