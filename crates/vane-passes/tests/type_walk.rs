use super::*;
use vane_ir::{CoreExpr, CoreExprNode, CoreLiteral};
use vane_types::Type;

fn bump_int_vars(ty: &Type) -> Type {
    match ty {
        Type::Variable(id) => Type::Variable(id + 100),
        other => other.clone(),
    }
}

#[test]
fn map_expr_types_rewrites_every_reachable_type() {
    let lambda = CoreExprNode::new(
        CoreExpr::Lambda {
            params: vec!["x".into()],
            body: Box::new(CoreExprNode::new(CoreExpr::Var("x".into()), Type::Variable(1))),
        },
        Type::function(Type::Variable(1), Type::Variable(1)),
    );
    let mapped = map_expr_types(&lambda, &bump_int_vars);
    assert_eq!(mapped.ty, Type::function(Type::Variable(101), Type::Variable(101)));
    let CoreExpr::Lambda { body, .. } = &mapped.node else { panic!("expected lambda") };
    assert_eq!(body.ty, Type::Variable(101));
}

#[test]
fn map_expr_types_recurses_into_tuple_and_record() {
    let tuple = CoreExprNode::new(
        CoreExpr::Tuple(vec![
            CoreExprNode::new(CoreExpr::Literal(CoreLiteral::Int(1)), Type::Variable(2)),
            CoreExprNode::new(CoreExpr::Literal(CoreLiteral::Int(2)), Type::Variable(3)),
        ]),
        Type::Tuple(vec![Type::Variable(2), Type::Variable(3)]),
    );
    let mapped = map_expr_types(&tuple, &bump_int_vars);
    let CoreExpr::Tuple(elems) = &mapped.node else { panic!("expected tuple") };
    assert_eq!(elems[0].ty, Type::Variable(102));
    assert_eq!(elems[1].ty, Type::Variable(103));
}

#[test]
fn map_pattern_types_recurses_into_constructor_fields() {
    let pattern = vane_ir::CorePatternNode::new(
        vane_ir::CorePattern::Constructor {
            type_name: "Option".into(),
            ctor: "Some".into(),
            fields: vec![vane_ir::CorePatternNode::new(
                vane_ir::CorePattern::Binding("x".into()),
                Type::Variable(5),
            )],
        },
        Type::constructor("Option", vec![Type::Variable(5)]),
    );
    let mapped = map_pattern_types(&pattern, &bump_int_vars);
    let vane_ir::CorePattern::Constructor { fields, .. } = &mapped.node else { panic!("expected ctor") };
    assert_eq!(fields[0].ty, Type::Variable(105));
}
