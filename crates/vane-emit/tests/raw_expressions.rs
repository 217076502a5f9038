use super::*;
use vane_ir::{CoreBinding, CoreExpr, CoreLiteral, CoreNode};
use vane_types::Type;

fn leaf(expr: CoreExpr, ty: Type) -> vane_ir::CoreExprNode {
    CoreNode::new(expr, ty)
}

fn ctx<'a>(names: &'a mut NameState, hoisted: &'a mut Vec<HoistedLambda>) -> RawExprCtx<'a> {
    RawExprCtx { module: "m", names, hoisted }
}

#[test]
fn literal_int_emits_bare_number() {
    let mut names = NameState::new(std::iter::empty());
    let mut hoisted = Vec::new();
    let node = leaf(CoreExpr::Literal(CoreLiteral::Int(7)), Type::Int);
    assert_eq!(emit_expr(&node, &mut ctx(&mut names, &mut hoisted)).unwrap(), "7");
}

#[test]
fn int_div_uses_div_trunc() {
    let mut names = NameState::new(std::iter::empty());
    let mut hoisted = Vec::new();
    let left = leaf(CoreExpr::Literal(CoreLiteral::Int(7)), Type::Int);
    let right = leaf(CoreExpr::Literal(CoreLiteral::Int(2)), Type::Int);
    let node = leaf(CoreExpr::Prim { op: Atom::from("int_div"), args: vec![left, right] }, Type::Int);
    let out = emit_expr(&node, &mut ctx(&mut names, &mut hoisted)).unwrap();
    assert_eq!(out, "@divTrunc(7, 2)");
}

#[test]
fn addr_of_emits_ampersand() {
    let mut names = NameState::new(std::iter::empty());
    let mut hoisted = Vec::new();
    let operand = leaf(CoreExpr::Var(Atom::from("x")), Type::Int);
    let node = leaf(CoreExpr::Prim { op: Atom::from("addr_of"), args: vec![operand] }, Type::Int);
    let out = emit_expr(&node, &mut ctx(&mut names, &mut hoisted)).unwrap();
    assert_eq!(out, "&x");
}

#[test]
fn reserved_identifier_is_escaped() {
    let mut names = NameState::new(std::iter::empty());
    let mut hoisted = Vec::new();
    let node = leaf(CoreExpr::Var(Atom::from("const")), Type::Int);
    let out = emit_expr(&node, &mut ctx(&mut names, &mut hoisted)).unwrap();
    assert_eq!(out, "@\"const\"");
}

#[test]
fn lambda_with_no_captures_is_referenced_by_name() {
    let mut names = NameState::new(std::iter::empty());
    let mut hoisted = Vec::new();
    let body = leaf(CoreExpr::Var(Atom::from("p")), Type::Int);
    let node = leaf(CoreExpr::Lambda { params: vec![Atom::from("p")], body: body.boxed() }, Type::Int);
    let out = emit_expr(&node, &mut ctx(&mut names, &mut hoisted)).unwrap();
    assert_eq!(hoisted.len(), 1);
    assert!(hoisted[0].captures.is_empty());
    assert_eq!(out, hoisted[0].name.as_str());
}

#[test]
fn lambda_with_captures_emits_closure_struct() {
    let mut names = NameState::new(std::iter::empty());
    let mut hoisted = Vec::new();
    let body = leaf(CoreExpr::Var(Atom::from("outer")), Type::Int);
    let node = leaf(CoreExpr::Lambda { params: vec![], body: body.boxed() }, Type::Int);
    let out = emit_expr(&node, &mut ctx(&mut names, &mut hoisted)).unwrap();
    assert_eq!(hoisted[0].captures, vec![Atom::from("outer")]);
    assert!(out.contains("closure_fn"));
    assert!(out.contains(".outer = outer"));
}

#[test]
fn let_rec_member_must_be_a_lambda() {
    let mut names = NameState::new(std::iter::empty());
    let mut hoisted = Vec::new();
    let value = leaf(CoreExpr::Literal(CoreLiteral::Int(1)), Type::Int);
    let binding = CoreBinding { name: Atom::from("f"), value: value.boxed() };
    let body = leaf(CoreExpr::Var(Atom::from("f")), Type::Int);
    let node = leaf(CoreExpr::LetRec { bindings: vec![binding], body: body.boxed() }, Type::Int);
    assert!(emit_expr(&node, &mut ctx(&mut names, &mut hoisted)).is_err());
}
