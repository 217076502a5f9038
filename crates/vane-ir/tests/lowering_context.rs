use super::*;
use vane_infer::{InfectiousMetadata, MarkedTypeDecl};
use vane_types::TypeInfo;

#[test]
fn fresh_stmt_name_increments() {
    let program = MarkedProgram::default();
    let resolved = ResolvedNodeTypes::default();
    let defaults = RecordDefaultExprs::default();
    let mut ctx = LoweringContext::new(&program, &resolved, &defaults);
    assert_eq!(ctx.fresh_stmt_name().as_str(), "__stmt_0");
    assert_eq!(ctx.fresh_stmt_name().as_str(), "__stmt_1");
}

#[test]
fn carrier_type_names_collected_from_infectious_declarations() {
    let mut program = MarkedProgram::default();
    program.type_declarations.push(MarkedTypeDecl {
        name: Atom::from("Result"),
        info: TypeInfo::new(vec![0, 1]),
        infectious: Some(InfectiousMetadata::default()),
    });
    let resolved = ResolvedNodeTypes::default();
    let defaults = RecordDefaultExprs::default();
    let ctx = LoweringContext::new(&program, &resolved, &defaults);
    assert!(ctx.is_carrier_type_name("Result"));
    assert!(!ctx.is_carrier_type_name("Pair"));
}
