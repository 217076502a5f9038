use super::*;
use vane_common::NodeId;

#[test]
fn missing_resolved_type_message_names_the_node() {
    let err = LoweringError::MissingResolvedType(NodeId::new(7));
    assert!(err.to_string().contains("7"));
}
