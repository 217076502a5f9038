use super::*;
use vane_common::NodeId;

fn node(id: u32, expr: MarkedExpr) -> MarkedExprNode {
    MarkedExprNode::new(NodeId::new(id), expr)
}

#[test]
fn mark_not_function_preserves_callee_subexpression() {
    let callee = node(1, MarkedExpr::Var(vane_common::Atom::from("x")));
    let mark = Mark::NotFunction { callee: callee.clone().boxed() };
    if let Mark::NotFunction { callee: preserved } = mark {
        assert_eq!(*preserved, callee);
    } else {
        panic!("expected NotFunction");
    }
}

#[test]
fn block_with_no_statements_and_no_result_is_representable() {
    let block = MarkedExpr::Block(Vec::new(), None);
    assert_eq!(block, MarkedExpr::Block(Vec::new(), None));
}

#[test]
fn match_bundle_literal_carries_arms_without_named_scrutinee() {
    let arm = MarkedMatchArm {
        pattern: MarkedPatternNode::new(NodeId::new(2), crate::pattern::MarkedPattern::Wildcard),
        guard: None,
        body: node(3, MarkedExpr::Literal(Literal::Unit)),
    };
    let bundle = MarkedExpr::MatchBundleLiteral { arms: vec![arm] };
    match bundle {
        MarkedExpr::MatchBundleLiteral { arms } => assert_eq!(arms.len(), 1),
        _ => panic!("expected bundle"),
    }
}
