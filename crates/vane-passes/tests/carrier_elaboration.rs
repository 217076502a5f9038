use super::*;
use std::sync::Arc;
use vane_carriers::CarrierOps;
use vane_ir::{CoreExpr, CoreLiteral, CoreModule, CoreValueBinding};
use vane_types::Type;

struct ResultOps;

impl CarrierOps for ResultOps {
    fn is(&self, ty: &Type) -> bool {
        matches!(ty, Type::Constructor { name, .. } if name.as_str() == "Result")
    }
    fn split(&self, ty: &Type) -> Option<(Type, Type)> {
        match ty {
            Type::Constructor { args, .. } => Some((args[0].clone(), args.get(1).cloned()?)),
            _ => None,
        }
    }
    fn join(&self, value: Type, state: Type) -> Type {
        Type::constructor("Result", vec![value, state])
    }
    fn collapse(&self, ty: &Type) -> Type {
        ty.clone()
    }
    fn union_states(&self, a: Type, _b: Type) -> Type {
        a
    }
}

fn result_of(value: Type) -> Type {
    let row = Type::row(
        [(vane_common::Atom::from("DivByZero"), None)].into_iter().collect(),
        None,
    );
    Type::constructor("Result", vec![value, row])
}

/// spec.md §8 scenario S2: `divide(x, 2) + 1` with
/// `divide : (Int, Int) -> Result<Int, <DivByZero>>` elaborates to a single
/// `carrier_match` wrapping the `int_add`, with the call as scrutinee.
#[test]
fn infectious_call_result_is_wrapped_in_carrier_match() {
    register_carrier("result_ce_s2", Arc::new(ResultOps));

    let divide_ty = Type::function(Type::Int, Type::function(Type::Int, result_of(Type::Int)));
    let call = vane_ir::CoreExprNode::new(
        CoreExpr::Call {
            callee: Box::new(vane_ir::CoreExprNode::new(CoreExpr::Var("divide".into()), divide_ty)),
            args: vec![
                vane_ir::CoreExprNode::new(CoreExpr::Var("x".into()), Type::Int),
                vane_ir::CoreExprNode::new(CoreExpr::Literal(CoreLiteral::Int(2)), Type::Int),
            ],
        },
        result_of(Type::Int),
    );
    let add = vane_ir::CoreExprNode::new(
        CoreExpr::Prim {
            op: "int_add".into(),
            args: vec![call, vane_ir::CoreExprNode::new(CoreExpr::Literal(CoreLiteral::Int(1)), Type::Int)],
        },
        result_of(Type::Int),
    );
    let lambda = vane_ir::CoreExprNode::new(
        CoreExpr::Lambda { params: vec!["x".into()], body: Box::new(add) },
        Type::function(Type::Int, result_of(Type::Int)),
    );

    let mut module = CoreModule::new("test/mod");
    module.values.push(CoreValueBinding {
        name: "top".into(),
        value: lambda,
        exported: false,
        origin: None,
    });

    let elaborated = elaborate_module(&module);
    let top = elaborated.find_value("top").expect("top binding");
    let CoreExpr::Lambda { body, .. } = &top.value.node else { panic!("expected lambda") };
    let CoreExpr::CarrierMatch { carrier_type, scrutinee, cases, fallback } = &body.node else {
        panic!("expected carrier_match, got {:?}", body.node)
    };
    assert_eq!(carrier_type.as_str(), "result_ce_s2");
    assert!(fallback.is_none());
    assert_eq!(cases.len(), 1);
    assert!(matches!(scrutinee.node, CoreExpr::Call { .. }));
    assert_eq!(body.ty, result_of(Type::Int));
    let CoreExpr::Prim { args, .. } = &cases[0].body.node else { panic!("expected prim body") };
    assert!(matches!(args[0].node, CoreExpr::Var(_)));
    assert_eq!(args[0].ty, Type::Int);
}

#[test]
fn clean_operands_pass_through_untouched() {
    register_carrier("result_ce_clean", Arc::new(ResultOps));
    let add = vane_ir::CoreExprNode::new(
        CoreExpr::Prim {
            op: "int_add".into(),
            args: vec![
                vane_ir::CoreExprNode::new(CoreExpr::Var("x".into()), Type::Int),
                vane_ir::CoreExprNode::new(CoreExpr::Literal(CoreLiteral::Int(1)), Type::Int),
            ],
        },
        Type::Int,
    );
    let mut module = CoreModule::new("test/mod");
    module.values.push(CoreValueBinding { name: "top".into(), value: add, exported: false, origin: None });
    let elaborated = elaborate_module(&module);
    let top = elaborated.find_value("top").expect("top binding");
    assert!(matches!(top.value.node, CoreExpr::Prim { .. }));
}

#[test]
fn carrier_match_discharging_its_own_scrutinee_is_exempt() {
    register_carrier("result_ce_discharge", Arc::new(ResultOps));
    let scrutinee =
        vane_ir::CoreExprNode::new(CoreExpr::Var("r".into()), result_of(Type::Int));
    let case = vane_ir::CoreMatchCase {
        pattern: vane_ir::CorePatternNode::new(vane_ir::CorePattern::Binding("v".into()), Type::Int),
        body: vane_ir::CoreExprNode::new(CoreExpr::Var("v".into()), Type::Int),
    };
    let matched = vane_ir::CoreExprNode::new(
        CoreExpr::Match {
            scrutinee: Box::new(scrutinee),
            cases: vec![case],
            fallback: None,
            coverage: Some(vane_ir::CoreMatchCoverage {
                discharges_carrier: Some("result_ce_discharge".into()),
                ..Default::default()
            }),
        },
        Type::Int,
    );
    let mut module = CoreModule::new("test/mod");
    module.values.push(CoreValueBinding {
        name: "top".into(),
        value: matched,
        exported: false,
        origin: None,
    });
    let elaborated = elaborate_module(&module);
    let top = elaborated.find_value("top").expect("top binding");
    let CoreExpr::Match { scrutinee, .. } = &top.value.node else { panic!("expected match") };
    assert!(matches!(scrutinee.node, CoreExpr::Var(_)));
}
