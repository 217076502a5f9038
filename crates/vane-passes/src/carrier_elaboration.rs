//! Carrier-op elaboration (C3b, spec.md §4.5): rewrites every operand
//! position that receives a carrier value where a clean value is expected
//! into a `carrier_match` that unwraps it locally.

use crate::binder_scan::FreshNames;
use vane_common::{Atom, NodeId, Span};
use vane_ir::{CoreBinding, CoreExpr, CoreExprNode, CoreMatchCase, CoreModule, CorePattern, CorePatternNode};
use vane_types::Type;

/// Elaborates every top-level value in `module`. Pure: passes are pure
/// functions over immutable graphs except for process-wide state the
/// carrier registry already owns (spec.md §5).
#[must_use]
#[tracing::instrument(level = "debug", skip_all, fields(module = %module.path))]
pub fn elaborate_module(module: &CoreModule) -> CoreModule {
    let mut fresh = FreshNames::collect(module);
    let mut out = module.clone();
    for binding in &mut out.values {
        binding.value = elaborate_expr(&binding.value, &mut fresh);
    }
    out
}

/// A single operand rewritten into a `carrier_match`: the fresh name bound
/// to the clean value, that value's type, the domain, and the (already
/// elaborated) carrier-typed scrutinee.
struct PendingWrap {
    name: Atom,
    clean_ty: Type,
    domain: Atom,
    scrutinee: CoreExprNode,
}

/// Checks one already-elaborated operand against its expected domain
/// (`None` meaning "must be clean here") and stages a wrap if needed.
fn stage_operand(
    operand: CoreExprNode,
    expected_domain: Option<&Atom>,
    wraps: &mut Vec<PendingWrap>,
    fresh: &mut FreshNames,
) -> CoreExprNode {
    let Some(domain) = vane_carriers::find_carrier_domain(&operand.ty) else {
        return operand;
    };
    if expected_domain == Some(&domain) {
        return operand;
    }
    let clean_ty = vane_carriers::split_carrier(&operand.ty)
        .map(|(value, _)| value)
        .unwrap_or_else(|| operand.ty.clone());
    let name = fresh.fresh("__carrier");
    let replacement = CoreExprNode::new(CoreExpr::Var(name.clone()), clean_ty.clone());
    wraps.push(PendingWrap { name, clean_ty, domain, scrutinee: operand });
    replacement
}

/// Wraps `body` in nested `carrier_match`es for every staged operand, the
/// first-staged (first-evaluated) operand ending up outermost.
fn apply_wraps(
    body: CoreExprNode,
    wraps: Vec<PendingWrap>,
    origin: Option<NodeId>,
    span: Option<Span>,
) -> CoreExprNode {
    let base_ty = body.ty.clone();
    let mut result = body;
    for wrap in wraps.into_iter().rev() {
        result = CoreExprNode {
            node: CoreExpr::CarrierMatch {
                carrier_type: wrap.domain,
                scrutinee: Box::new(wrap.scrutinee),
                cases: vec![CoreMatchCase {
                    pattern: CorePatternNode::new(CorePattern::Binding(wrap.name), wrap.clean_ty),
                    body: result,
                }],
                fallback: None,
            },
            ty: base_ty.clone(),
            origin,
            span,
        };
    }
    result
}

fn elaborate_expr(node: &CoreExprNode, fresh: &mut FreshNames) -> CoreExprNode {
    let ty = node.ty.clone();
    let origin = node.origin;
    let span = node.span;
    match &node.node {
        CoreExpr::Literal(_) | CoreExpr::Var(_) | CoreExpr::EnumLiteral { .. } => node.clone(),
        CoreExpr::Tuple(elems) => {
            let elems = elems.iter().map(|e| elaborate_expr(e, fresh)).collect();
            CoreExprNode { node: CoreExpr::Tuple(elems), ty, origin, span }
        }
        CoreExpr::Record(fields) => {
            let fields =
                fields.iter().map(|(k, v)| (k.clone(), elaborate_expr(v, fresh))).collect();
            CoreExprNode { node: CoreExpr::Record(fields), ty, origin, span }
        }
        CoreExpr::TupleGet { target, index } => {
            let target_e = elaborate_expr(target, fresh);
            let mut wraps = Vec::new();
            let target_r = stage_operand(target_e, None, &mut wraps, fresh);
            let base = CoreExprNode {
                node: CoreExpr::TupleGet { target: Box::new(target_r), index: *index },
                ty,
                origin,
                span,
            };
            apply_wraps(base, wraps, origin, span)
        }
        CoreExpr::Data { type_name, ctor, fields } => {
            let fields = fields.iter().map(|e| elaborate_expr(e, fresh)).collect();
            CoreExprNode {
                node: CoreExpr::Data { type_name: type_name.clone(), ctor: ctor.clone(), fields },
                ty,
                origin,
                span,
            }
        }
        CoreExpr::Lambda { params, body } => {
            let body = Box::new(elaborate_expr(body, fresh));
            CoreExprNode { node: CoreExpr::Lambda { params: params.clone(), body }, ty, origin, span }
        }
        CoreExpr::Call { callee, args } => {
            let callee_e = elaborate_expr(callee, fresh);
            let expected = param_domains(&callee_e.ty, args.len());
            let mut wraps = Vec::new();
            let args_r: Vec<CoreExprNode> = args
                .iter()
                .zip(expected.iter())
                .map(|(a, dom)| {
                    let a_e = elaborate_expr(a, fresh);
                    stage_operand(a_e, dom.as_ref(), &mut wraps, fresh)
                })
                .collect();
            let base = CoreExprNode {
                node: CoreExpr::Call { callee: Box::new(callee_e), args: args_r },
                ty,
                origin,
                span,
            };
            apply_wraps(base, wraps, origin, span)
        }
        CoreExpr::Let { binding, body } => {
            let value = Box::new(elaborate_expr(&binding.value, fresh));
            let body = Box::new(elaborate_expr(body, fresh));
            CoreExprNode {
                node: CoreExpr::Let { binding: CoreBinding { name: binding.name.clone(), value }, body },
                ty,
                origin,
                span,
            }
        }
        CoreExpr::LetRec { bindings, body } => {
            let bindings = bindings
                .iter()
                .map(|b| CoreBinding {
                    name: b.name.clone(),
                    value: Box::new(elaborate_expr(&b.value, fresh)),
                })
                .collect();
            let body = Box::new(elaborate_expr(body, fresh));
            CoreExprNode { node: CoreExpr::LetRec { bindings, body }, ty, origin, span }
        }
        CoreExpr::If { cond, then_branch, else_branch } => {
            let cond_e = elaborate_expr(cond, fresh);
            let mut wraps = Vec::new();
            let cond_r = stage_operand(cond_e, None, &mut wraps, fresh);
            let then_e = Box::new(elaborate_expr(then_branch, fresh));
            let else_e = Box::new(elaborate_expr(else_branch, fresh));
            let base = CoreExprNode {
                node: CoreExpr::If { cond: Box::new(cond_r), then_branch: then_e, else_branch: else_e },
                ty,
                origin,
                span,
            };
            apply_wraps(base, wraps, origin, span)
        }
        CoreExpr::Prim { op, args } => {
            let mut wraps = Vec::new();
            let args_r: Vec<CoreExprNode> = args
                .iter()
                .map(|a| {
                    let a_e = elaborate_expr(a, fresh);
                    stage_operand(a_e, None, &mut wraps, fresh)
                })
                .collect();
            let base =
                CoreExprNode { node: CoreExpr::Prim { op: op.clone(), args: args_r }, ty, origin, span };
            apply_wraps(base, wraps, origin, span)
        }
        CoreExpr::Match { scrutinee, cases, fallback, coverage } => {
            let scrutinee_e = elaborate_expr(scrutinee, fresh);
            let cases_e = cases
                .iter()
                .map(|c| CoreMatchCase { pattern: c.pattern.clone(), body: elaborate_expr(&c.body, fresh) })
                .collect();
            let fallback_e = fallback.as_ref().map(|f| Box::new(elaborate_expr(f, fresh)));
            let exempt = coverage.as_ref().is_some_and(|c| c.discharges_carrier.is_some());
            let mut wraps = Vec::new();
            let scrutinee_r = if exempt {
                scrutinee_e
            } else {
                stage_operand(scrutinee_e, None, &mut wraps, fresh)
            };
            let base = CoreExprNode {
                node: CoreExpr::Match {
                    scrutinee: Box::new(scrutinee_r),
                    cases: cases_e,
                    fallback: fallback_e,
                    coverage: coverage.clone(),
                },
                ty,
                origin,
                span,
            };
            apply_wraps(base, wraps, origin, span)
        }
        CoreExpr::CarrierWrap { domain, value } => {
            let value = Box::new(elaborate_expr(value, fresh));
            CoreExprNode { node: CoreExpr::CarrierWrap { domain: domain.clone(), value }, ty, origin, span }
        }
        CoreExpr::CarrierUnwrap { domain, value } => {
            let value = Box::new(elaborate_expr(value, fresh));
            CoreExprNode {
                node: CoreExpr::CarrierUnwrap { domain: domain.clone(), value },
                ty,
                origin,
                span,
            }
        }
        CoreExpr::CarrierMatch { carrier_type, scrutinee, cases, fallback } => {
            let scrutinee = Box::new(elaborate_expr(scrutinee, fresh));
            let cases = cases
                .iter()
                .map(|c| CoreMatchCase { pattern: c.pattern.clone(), body: elaborate_expr(&c.body, fresh) })
                .collect();
            let fallback = fallback.as_ref().map(|f| Box::new(elaborate_expr(f, fresh)));
            CoreExprNode {
                node: CoreExpr::CarrierMatch { carrier_type: carrier_type.clone(), scrutinee, cases, fallback },
                ty,
                origin,
                span,
            }
        }
        CoreExpr::Coerce { from_type, to_type, expr } => {
            let expr = Box::new(elaborate_expr(expr, fresh));
            CoreExprNode {
                node: CoreExpr::Coerce { from_type: from_type.clone(), to_type: to_type.clone(), expr },
                ty,
                origin,
                span,
            }
        }
    }
}

/// Chases `n` layers of a (possibly curried) function type to find each
/// argument position's expected carrier domain, `None` where the callee
/// isn't known to be a function at that depth (no constraint).
fn param_domains(callee_ty: &Type, n: usize) -> Vec<Option<Atom>> {
    let mut result = Vec::with_capacity(n);
    let mut cur = callee_ty;
    for _ in 0..n {
        match cur {
            Type::Function { from, to } => {
                result.push(vane_carriers::find_carrier_domain(from));
                cur = to;
            }
            _ => result.push(None),
        }
    }
    result
}

#[cfg(test)]
#[path = "../tests/carrier_elaboration.rs"]
mod tests;
