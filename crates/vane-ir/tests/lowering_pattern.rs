use super::*;
use vane_infer::{Literal, MarkedPattern, MarkedPatternNode};
use vane_types::{ConstructorInfo, TypeInfo, TypeScheme};

fn resolved(id: u32, ty: Type) -> ResolvedNodeTypes {
    let mut map = ResolvedNodeTypes::default();
    map.insert(NodeId::new(id), ty);
    map
}

#[test]
fn wildcard_and_binding_pass_through() {
    let program = MarkedProgram::default();
    let resolved = resolved(0, Type::Int);
    let defaults = RecordDefaultExprs::default();
    let ctx = LoweringContext::new(&program, &resolved, &defaults);

    let node = MarkedPatternNode::new(NodeId::new(0), MarkedPattern::Wildcard);
    assert_eq!(lower_pattern(&ctx, &node).unwrap().node, CorePattern::Wildcard);

    let node = MarkedPatternNode::new(NodeId::new(0), MarkedPattern::Binding(Atom::from("x")));
    assert_eq!(
        lower_pattern(&ctx, &node).unwrap().node,
        CorePattern::Binding(Atom::from("x"))
    );
}

#[test]
fn mark_pattern_becomes_wildcard() {
    let program = MarkedProgram::default();
    let resolved = resolved(0, Type::Int);
    let defaults = RecordDefaultExprs::default();
    let ctx = LoweringContext::new(&program, &resolved, &defaults);

    let node = MarkedPatternNode::new(
        NodeId::new(0),
        MarkedPattern::Mark(vane_common::ConstraintReason::NonExhaustiveMatch),
    );
    assert_eq!(lower_pattern(&ctx, &node).unwrap().node, CorePattern::Wildcard);
}

#[test]
fn literal_pattern_lowers_its_literal() {
    let program = MarkedProgram::default();
    let resolved = resolved(0, Type::Int);
    let defaults = RecordDefaultExprs::default();
    let ctx = LoweringContext::new(&program, &resolved, &defaults);

    let node = MarkedPatternNode::new(NodeId::new(0), MarkedPattern::Literal(Literal::Int(3)));
    assert_eq!(lower_pattern(&ctx, &node).unwrap().node, CorePattern::Literal(CoreLiteral::Int(3)));
}

#[test]
fn tuple_pattern_lowers_each_element() {
    let mut resolved = ResolvedNodeTypes::default();
    resolved.insert(NodeId::new(0), Type::Tuple(vec![Type::Int, Type::Bool]));
    resolved.insert(NodeId::new(1), Type::Int);
    resolved.insert(NodeId::new(2), Type::Bool);
    let program = MarkedProgram::default();
    let defaults = RecordDefaultExprs::default();
    let ctx = LoweringContext::new(&program, &resolved, &defaults);

    let node = MarkedPatternNode::new(
        NodeId::new(0),
        MarkedPattern::Tuple(vec![
            MarkedPatternNode::new(NodeId::new(1), MarkedPattern::Binding(Atom::from("a"))),
            MarkedPatternNode::new(NodeId::new(2), MarkedPattern::Binding(Atom::from("b"))),
        ]),
    );
    match lower_pattern(&ctx, &node).unwrap().node {
        CorePattern::Tuple(fields) => assert_eq!(fields.len(), 2),
        other => panic!("expected tuple pattern, got {other:?}"),
    }
}

#[test]
fn unknown_constructor_on_known_type_is_an_error() {
    let mut program = MarkedProgram::default();
    let mut info = TypeInfo::new(vec![]);
    info.constructors.push(ConstructorInfo {
        name: Atom::from("Some"),
        arity: 1,
        scheme: TypeScheme::monomorphic(Type::Int),
    });
    program.type_declarations.push(vane_infer::MarkedTypeDecl {
        name: Atom::from("Option"),
        info,
        infectious: None,
    });
    let resolved = resolved(0, Type::Bool);
    let defaults = RecordDefaultExprs::default();
    let ctx = LoweringContext::new(&program, &resolved, &defaults);

    let node = MarkedPatternNode::new(
        NodeId::new(0),
        MarkedPattern::Constructor {
            type_name: Atom::from("Option"),
            ctor: Atom::from("NotARealCtor"),
            fields: vec![],
        },
    );
    assert!(matches!(
        lower_pattern(&ctx, &node),
        Err(LoweringError::UnresolvableConstructorPattern { .. })
    ));
}

#[test]
fn known_constructor_lowers_fields() {
    let mut program = MarkedProgram::default();
    let mut info = TypeInfo::new(vec![]);
    info.constructors.push(ConstructorInfo {
        name: Atom::from("Some"),
        arity: 1,
        scheme: TypeScheme::monomorphic(Type::Int),
    });
    program.type_declarations.push(vane_infer::MarkedTypeDecl {
        name: Atom::from("Option"),
        info,
        infectious: None,
    });
    let mut resolved = ResolvedNodeTypes::default();
    resolved.insert(NodeId::new(0), Type::constructor("Option", vec![Type::Int]));
    resolved.insert(NodeId::new(1), Type::Int);
    let defaults = RecordDefaultExprs::default();
    let ctx = LoweringContext::new(&program, &resolved, &defaults);

    let node = MarkedPatternNode::new(
        NodeId::new(0),
        MarkedPattern::Constructor {
            type_name: Atom::from("Option"),
            ctor: Atom::from("Some"),
            fields: vec![MarkedPatternNode::new(NodeId::new(1), MarkedPattern::Binding(Atom::from("x")))],
        },
    );
    match lower_pattern(&ctx, &node).unwrap().node {
        CorePattern::Constructor { ctor, fields, .. } => {
            assert_eq!(ctor.as_str(), "Some");
            assert_eq!(fields.len(), 1);
        }
        other => panic!("expected constructor pattern, got {other:?}"),
    }
}

#[test]
fn all_errors_pattern_carries_result_type_name() {
    let program = MarkedProgram::default();
    let resolved = resolved(0, Type::constructor("Result", vec![Type::Int, Type::empty_row()]));
    let defaults = RecordDefaultExprs::default();
    let ctx = LoweringContext::new(&program, &resolved, &defaults);

    let node = MarkedPatternNode::new(
        NodeId::new(0),
        MarkedPattern::AllErrors { result_type_name: Atom::from("Result") },
    );
    assert_eq!(
        lower_pattern(&ctx, &node).unwrap().node,
        CorePattern::AllErrors { result_type_name: Atom::from("Result") }
    );
}
