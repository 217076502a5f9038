use super::*;
use vane_ir::{CoreExpr, CoreLiteral, CoreNode};
use vane_types::Type;

fn leaf(expr: CoreExpr, ty: Type) -> vane_ir::CoreExprNode {
    CoreNode::new(expr, ty)
}

#[test]
fn free_vars_excludes_own_parameters() {
    let body = leaf(CoreExpr::Var(Atom::from("x")), Type::Int);
    let found = free_vars(&[Atom::from("x")], &body);
    assert!(found.is_empty());
}

#[test]
fn free_vars_finds_captured_outer_binding() {
    let body = leaf(CoreExpr::Var(Atom::from("captured")), Type::Int);
    let found = free_vars(&[Atom::from("x")], &body);
    assert_eq!(found, vec![Atom::from("captured")]);
}

#[test]
fn free_vars_ignores_let_bound_names() {
    let value = leaf(CoreExpr::Literal(CoreLiteral::Int(1)), Type::Int);
    let body = leaf(CoreExpr::Var(Atom::from("y")), Type::Int);
    let binding = vane_ir::CoreBinding { name: Atom::from("y"), value: value.boxed() };
    let let_expr = leaf(CoreExpr::Let { binding, body: body.boxed() }, Type::Int);
    let found = free_vars(&[], &let_expr);
    assert!(found.is_empty());
}

#[test]
fn free_vars_are_sorted_and_deduplicated() {
    let call = leaf(
        CoreExpr::Tuple(vec![
            leaf(CoreExpr::Var(Atom::from("b")), Type::Int),
            leaf(CoreExpr::Var(Atom::from("a")), Type::Int),
            leaf(CoreExpr::Var(Atom::from("a")), Type::Int),
        ]),
        Type::Int,
    );
    let found = free_vars(&[], &call);
    assert_eq!(found, vec![Atom::from("a"), Atom::from("b")]);
}
