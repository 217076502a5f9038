use super::*;
use vane_common::NodeId;

#[test]
fn all_errors_pattern_carries_result_type_name() {
    let pattern = MarkedPattern::AllErrors { result_type_name: vane_common::Atom::from("Result") };
    match pattern {
        MarkedPattern::AllErrors { result_type_name } => {
            assert_eq!(result_type_name.as_str(), "Result");
        }
        _ => panic!("expected AllErrors"),
    }
}

#[test]
fn pattern_node_with_span_sets_span() {
    let node = MarkedPatternNode::new(NodeId::new(1), MarkedPattern::Wildcard)
        .with_span(vane_common::Span::new(0, 3));
    assert!(node.span.is_some());
}
