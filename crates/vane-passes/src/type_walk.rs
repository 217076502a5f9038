//! Generic "apply `f` to every `Type` reachable from a Core expression"
//! walker, shared by raw-type lowering (spec.md §4.7) and reused by
//! monomorphization for the parts of its rewrite that are a pure type
//! substitution.

use vane_ir::{CoreBinding, CoreExpr, CoreExprNode, CoreMatchCase, CorePattern, CorePatternNode};
use vane_types::Type;

pub fn map_expr_types(node: &CoreExprNode, f: &impl Fn(&Type) -> Type) -> CoreExprNode {
    let ty = f(&node.ty);
    let mapped = match &node.node {
        CoreExpr::Literal(_) | CoreExpr::Var(_) | CoreExpr::EnumLiteral { .. } => node.node.clone(),
        CoreExpr::Tuple(elems) => {
            CoreExpr::Tuple(elems.iter().map(|e| map_expr_types(e, f)).collect())
        }
        CoreExpr::Record(fields) => CoreExpr::Record(
            fields.iter().map(|(k, v)| (k.clone(), map_expr_types(v, f))).collect(),
        ),
        CoreExpr::TupleGet { target, index } => {
            CoreExpr::TupleGet { target: Box::new(map_expr_types(target, f)), index: *index }
        }
        CoreExpr::Data { type_name, ctor, fields } => CoreExpr::Data {
            type_name: type_name.clone(),
            ctor: ctor.clone(),
            fields: fields.iter().map(|e| map_expr_types(e, f)).collect(),
        },
        CoreExpr::Lambda { params, body } => {
            CoreExpr::Lambda { params: params.clone(), body: Box::new(map_expr_types(body, f)) }
        }
        CoreExpr::Call { callee, args } => CoreExpr::Call {
            callee: Box::new(map_expr_types(callee, f)),
            args: args.iter().map(|a| map_expr_types(a, f)).collect(),
        },
        CoreExpr::Let { binding, body } => CoreExpr::Let {
            binding: map_binding_types(binding, f),
            body: Box::new(map_expr_types(body, f)),
        },
        CoreExpr::LetRec { bindings, body } => CoreExpr::LetRec {
            bindings: bindings.iter().map(|b| map_binding_types(b, f)).collect(),
            body: Box::new(map_expr_types(body, f)),
        },
        CoreExpr::If { cond, then_branch, else_branch } => CoreExpr::If {
            cond: Box::new(map_expr_types(cond, f)),
            then_branch: Box::new(map_expr_types(then_branch, f)),
            else_branch: Box::new(map_expr_types(else_branch, f)),
        },
        CoreExpr::Prim { op, args } => {
            CoreExpr::Prim { op: op.clone(), args: args.iter().map(|a| map_expr_types(a, f)).collect() }
        }
        CoreExpr::Match { scrutinee, cases, fallback, coverage } => CoreExpr::Match {
            scrutinee: Box::new(map_expr_types(scrutinee, f)),
            cases: cases.iter().map(|c| map_case_types(c, f)).collect(),
            fallback: fallback.as_ref().map(|e| Box::new(map_expr_types(e, f))),
            coverage: coverage.clone(),
        },
        CoreExpr::CarrierWrap { domain, value } => {
            CoreExpr::CarrierWrap { domain: domain.clone(), value: Box::new(map_expr_types(value, f)) }
        }
        CoreExpr::CarrierUnwrap { domain, value } => CoreExpr::CarrierUnwrap {
            domain: domain.clone(),
            value: Box::new(map_expr_types(value, f)),
        },
        CoreExpr::CarrierMatch { carrier_type, scrutinee, cases, fallback } => CoreExpr::CarrierMatch {
            carrier_type: carrier_type.clone(),
            scrutinee: Box::new(map_expr_types(scrutinee, f)),
            cases: cases.iter().map(|c| map_case_types(c, f)).collect(),
            fallback: fallback.as_ref().map(|e| Box::new(map_expr_types(e, f))),
        },
        CoreExpr::Coerce { from_type, to_type, expr } => CoreExpr::Coerce {
            from_type: f(from_type),
            to_type: f(to_type),
            expr: Box::new(map_expr_types(expr, f)),
        },
    };
    CoreExprNode { node: mapped, ty, origin: node.origin, span: node.span }
}

fn map_binding_types(binding: &CoreBinding, f: &impl Fn(&Type) -> Type) -> CoreBinding {
    CoreBinding { name: binding.name.clone(), value: Box::new(map_expr_types(&binding.value, f)) }
}

fn map_case_types(case: &CoreMatchCase, f: &impl Fn(&Type) -> Type) -> CoreMatchCase {
    CoreMatchCase { pattern: map_pattern_types(&case.pattern, f), body: map_expr_types(&case.body, f) }
}

pub fn map_pattern_types(node: &CorePatternNode, f: &impl Fn(&Type) -> Type) -> CorePatternNode {
    let ty = f(&node.ty);
    let mapped = match &node.node {
        CorePattern::Wildcard
        | CorePattern::Binding(_)
        | CorePattern::Literal(_)
        | CorePattern::AllErrors { .. }
        | CorePattern::Pinned(_) => node.node.clone(),
        CorePattern::Tuple(elems) => {
            CorePattern::Tuple(elems.iter().map(|p| map_pattern_types(p, f)).collect())
        }
        CorePattern::Constructor { type_name, ctor, fields } => CorePattern::Constructor {
            type_name: type_name.clone(),
            ctor: ctor.clone(),
            fields: fields.iter().map(|p| map_pattern_types(p, f)).collect(),
        },
    };
    CorePatternNode { node: mapped, ty, origin: node.origin, span: node.span }
}

#[cfg(test)]
#[path = "../tests/type_walk.rs"]
mod tests;
