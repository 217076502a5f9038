//! Marked expression -> `CoreExpr` lowering (spec.md §4.4).

use crate::core_expr::{
    CoreBinding, CoreExpr, CoreExprNode, CoreLiteral, CoreMatchCase, CoreMatchCoverage, CoreNode,
};
use crate::lowering::binary_ops::{
    binary_call_name, classify_binary_prim, classify_prefix_prim, prefix_call_name,
};
use crate::lowering::context::LoweringContext;
use crate::lowering::error::LoweringError;
use crate::lowering::pattern::{lower_literal, lower_pattern};
use indexmap::IndexMap;
use rustc_hash::FxHashSet;
use vane_common::Atom;
use vane_infer::{BlockStmt, Mark, MarkedExpr, MarkedExprNode, MarkedMatchArm};
use vane_types::Type;

/// Lowers one marked expression node to Core IR.
pub fn lower_expr(
    ctx: &mut LoweringContext,
    node: &MarkedExprNode,
) -> Result<CoreExprNode, LoweringError> {
    match &node.expr {
        MarkedExpr::Literal(lit) => {
            let ty = ctx.resolved_type(node.id)?;
            Ok(CoreNode::finish(node.id, node.span, ty, CoreExpr::Literal(lower_literal(lit))))
        }
        MarkedExpr::Var(name) => {
            let ty = ctx.resolved_type(node.id)?;
            Ok(CoreNode::finish(node.id, node.span, ty, CoreExpr::Var(name.clone())))
        }
        MarkedExpr::Tuple(elems) => {
            let ty = ctx.resolved_type(node.id)?;
            let lowered = elems.iter().map(|e| lower_expr(ctx, e)).collect::<Result<Vec<_>, _>>()?;
            Ok(CoreNode::finish(node.id, node.span, ty, CoreExpr::Tuple(lowered)))
        }
        MarkedExpr::RecordLiteral { explicit, spreads } => lower_record_literal(ctx, node, explicit, spreads),
        MarkedExpr::Block(stmts, result) => lower_block(ctx, stmts, result.as_deref()),
        MarkedExpr::Lambda { params, body } => {
            let ty = ctx.resolved_type(node.id)?;
            let lowered_body = lower_expr(ctx, body)?;
            Ok(CoreNode::finish(
                node.id,
                node.span,
                ty,
                CoreExpr::Lambda { params: params.clone(), body: Box::new(lowered_body) },
            ))
        }
        MarkedExpr::Call { callee, args } => {
            let ty = ctx.resolved_type(node.id)?;
            let callee_lowered = lower_expr(ctx, callee)?;
            let args_lowered = args.iter().map(|a| lower_expr(ctx, a)).collect::<Result<Vec<_>, _>>()?;
            Ok(CoreNode::finish(
                node.id,
                node.span,
                ty,
                CoreExpr::Call { callee: Box::new(callee_lowered), args: args_lowered },
            ))
        }
        MarkedExpr::BinaryOp { op, left, right } => lower_binary_op(ctx, node, op, left, right),
        MarkedExpr::PrefixOp { op, operand } => lower_prefix_op(ctx, node, op, operand),
        MarkedExpr::If { cond, then_branch, else_branch } => {
            let ty = ctx.resolved_type(node.id)?;
            let cond_l = lower_expr(ctx, cond)?;
            let then_l = lower_expr(ctx, then_branch)?;
            let else_l = lower_expr(ctx, else_branch)?;
            Ok(CoreNode::finish(
                node.id,
                node.span,
                ty,
                CoreExpr::If {
                    cond: Box::new(cond_l),
                    then_branch: Box::new(then_l),
                    else_branch: Box::new(else_l),
                },
            ))
        }
        MarkedExpr::Match { scrutinee, arms, carrier_match, discharged_carrier } => {
            lower_match(ctx, node, scrutinee, arms, carrier_match, discharged_carrier)
        }
        MarkedExpr::MatchBundleLiteral { arms } => lower_match_bundle(ctx, node, arms),
        MarkedExpr::ConstructorApp { type_name, ctor, args } => {
            let ty = ctx.resolved_type(node.id)?;
            let fields = args.iter().map(|a| lower_expr(ctx, a)).collect::<Result<Vec<_>, _>>()?;
            // Every constructor application lowers to `data`, carrier or not
            // (spec.md §4.4); carrier-ness only matters to the downstream
            // carrier-elaboration pass, not to this shape.
            Ok(CoreNode::finish(
                node.id,
                node.span,
                ty,
                CoreExpr::Data { type_name: type_name.clone(), ctor: ctor.clone(), fields },
            ))
        }
        MarkedExpr::Mark(mark) => lower_mark(ctx, node, mark),
    }
}

fn lower_mark(
    ctx: &mut LoweringContext,
    node: &MarkedExprNode,
    mark: &Mark,
) -> Result<CoreExprNode, LoweringError> {
    let ty = ctx.resolved_type(node.id)?;
    match mark {
        Mark::FreeVar { name } => {
            Ok(CoreNode::finish(node.id, node.span, ty, CoreExpr::Var(name.clone())))
        }
        Mark::NotFunction { callee } => {
            let callee_lowered = lower_expr(ctx, callee)?;
            Ok(CoreNode::finish(
                node.id,
                node.span,
                ty,
                CoreExpr::Call { callee: Box::new(callee_lowered), args: Vec::new() },
            ))
        }
        Mark::Inconsistent { subject } | Mark::OccursCheck { subject } => lower_expr(ctx, subject),
        Mark::Pattern { .. } | Mark::Hole => {
            Ok(CoreNode::finish(node.id, node.span, ty, CoreExpr::Literal(CoreLiteral::Unit)))
        }
    }
}

fn lower_binary_op(
    ctx: &mut LoweringContext,
    node: &MarkedExprNode,
    op: &Atom,
    left: &MarkedExprNode,
    right: &MarkedExprNode,
) -> Result<CoreExprNode, LoweringError> {
    let ty = ctx.resolved_type(node.id)?;
    let left_l = lower_expr(ctx, left)?;
    let right_l = lower_expr(ctx, right)?;
    let expr = if let Some(prim) = classify_binary_prim(op.as_str(), &left_l.ty, &right_l.ty) {
        CoreExpr::Prim { op: Atom::from(prim), args: vec![left_l, right_l] }
    } else {
        let callee_ty =
            Type::function(left_l.ty.clone(), Type::function(right_l.ty.clone(), ty.clone()));
        let callee =
            CoreExprNode::new(CoreExpr::Var(Atom::from(binary_call_name(op.as_str()))), callee_ty);
        CoreExpr::Call { callee: Box::new(callee), args: vec![left_l, right_l] }
    };
    Ok(CoreNode::finish(node.id, node.span, ty, expr))
}

fn lower_prefix_op(
    ctx: &mut LoweringContext,
    node: &MarkedExprNode,
    op: &Atom,
    operand: &MarkedExprNode,
) -> Result<CoreExprNode, LoweringError> {
    let ty = ctx.resolved_type(node.id)?;
    let operand_l = lower_expr(ctx, operand)?;
    let expr = if let Some(prim) = classify_prefix_prim(op.as_str(), &operand_l.ty) {
        CoreExpr::Prim { op: Atom::from(prim), args: vec![operand_l] }
    } else {
        let callee_ty = Type::function(operand_l.ty.clone(), ty.clone());
        let callee = CoreExprNode::new(
            CoreExpr::Var(Atom::from(prefix_call_name(op.as_str()))),
            callee_ty,
        );
        CoreExpr::Call { callee: Box::new(callee), args: vec![operand_l] }
    };
    Ok(CoreNode::finish(node.id, node.span, ty, expr))
}

/// A block lowers right-to-left: the result expression (or `unit` if
/// absent) is wrapped by `let`s for each statement (spec.md §4.4).
fn lower_block(
    ctx: &mut LoweringContext,
    stmts: &[BlockStmt],
    result: Option<&MarkedExprNode>,
) -> Result<CoreExprNode, LoweringError> {
    let mut body = match result {
        Some(r) => lower_expr(ctx, r)?,
        None => CoreExprNode::new(CoreExpr::Literal(CoreLiteral::Unit), Type::Unit),
    };

    for stmt in stmts.iter().rev() {
        body = match stmt {
            BlockStmt::Expr(expr_node) => {
                let value = lower_expr(ctx, expr_node)?;
                let name = ctx.fresh_stmt_name();
                let ty = body.ty.clone();
                CoreExprNode::new(
                    CoreExpr::Let { binding: CoreBinding { name, value: Box::new(value) }, body: Box::new(body) },
                    ty,
                )
            }
            BlockStmt::PatternLet { pattern, value } => {
                let value_lowered = lower_expr(ctx, value)?;
                let tmp = ctx.fresh_stmt_name();
                let scrutinee_ty = value_lowered.ty.clone();
                let pattern_lowered = lower_pattern(ctx, pattern)?;
                let body_ty = body.ty.clone();
                let match_node = CoreExprNode::new(
                    CoreExpr::Match {
                        scrutinee: Box::new(CoreExprNode::new(CoreExpr::Var(tmp.clone()), scrutinee_ty)),
                        cases: vec![CoreMatchCase { pattern: pattern_lowered, body }],
                        fallback: None,
                        coverage: None,
                    },
                    body_ty.clone(),
                );
                CoreExprNode::new(
                    CoreExpr::Let {
                        binding: CoreBinding { name: tmp, value: Box::new(value_lowered) },
                        body: Box::new(match_node),
                    },
                    body_ty,
                )
            }
        };
    }

    Ok(body)
}

/// Record literal: explicit fields, then spread fields (as `record_get`
/// projections of the spread expression), then remaining declaration
/// defaults evaluated in an ambient scope binding each already-provided
/// field (spec.md §4.4).
fn lower_record_literal(
    ctx: &mut LoweringContext,
    node: &MarkedExprNode,
    explicit: &[(Atom, MarkedExprNode)],
    spreads: &[MarkedExprNode],
) -> Result<CoreExprNode, LoweringError> {
    let ty = ctx.resolved_type(node.id)?;
    let mut bindings: Vec<CoreBinding> = Vec::new();
    let mut fields: IndexMap<Atom, CoreExprNode> = IndexMap::new();
    let mut provided: FxHashSet<Atom> = FxHashSet::default();

    for (name, value_node) in explicit {
        let value = lower_expr(ctx, value_node)?;
        let field_ty = value.ty.clone();
        bindings.push(CoreBinding { name: name.clone(), value: Box::new(value) });
        fields.insert(name.clone(), CoreExprNode::new(CoreExpr::Var(name.clone()), field_ty));
        provided.insert(name.clone());
    }

    for spread_node in spreads {
        let spread_value = lower_expr(ctx, spread_node)?;
        let spread_ty = spread_value.ty.clone();
        let spread_tmp = ctx.fresh_stmt_name();
        bindings.push(CoreBinding { name: spread_tmp.clone(), value: Box::new(spread_value) });
        for field_name in ctx.record_field_names(&spread_ty) {
            if provided.contains(&field_name) {
                continue;
            }
            let field_ty =
                ctx.record_field_type(&spread_ty, &field_name).unwrap_or(spread_ty.clone());
            let target = CoreExprNode::new(CoreExpr::Var(spread_tmp.clone()), spread_ty.clone());
            let projection = CoreExpr::record_get(target, &field_name);
            bindings.push(CoreBinding {
                name: field_name.clone(),
                value: Box::new(CoreExprNode::new(projection, field_ty.clone())),
            });
            fields.insert(field_name.clone(), CoreExprNode::new(CoreExpr::Var(field_name.clone()), field_ty));
            provided.insert(field_name);
        }
    }

    if let Some((type_name, _)) = ty.as_constructor()
        && let Some(defaults) = ctx.record_defaults.get(type_name).cloned()
    {
        for (field_name, default_expr) in defaults {
            if provided.contains(&field_name) {
                continue;
            }
            let lowered_default = lower_expr(ctx, &default_expr)?;
            let field_ty = lowered_default.ty.clone();
            bindings.push(CoreBinding { name: field_name.clone(), value: Box::new(lowered_default) });
            fields.insert(field_name.clone(), CoreExprNode::new(CoreExpr::Var(field_name.clone()), field_ty));
            provided.insert(field_name);
        }
    }

    let mut body = CoreNode::finish(node.id, node.span, ty.clone(), CoreExpr::Record(fields));
    for binding in bindings.into_iter().rev() {
        let let_ty = body.ty.clone();
        body = CoreExprNode::new(CoreExpr::Let { binding, body: Box::new(body) }, let_ty);
    }
    Ok(body)
}

fn lower_match(
    ctx: &mut LoweringContext,
    node: &MarkedExprNode,
    scrutinee: &MarkedExprNode,
    arms: &[MarkedMatchArm],
    carrier_match: &Option<Atom>,
    discharged_carrier: &Option<Atom>,
) -> Result<CoreExprNode, LoweringError> {
    let ty = ctx.resolved_type(node.id)?;
    let scrutinee_lowered = lower_expr(ctx, scrutinee)?;
    let scrutinee_ty = scrutinee_lowered.ty.clone();
    let tmp = ctx.fresh_stmt_name();
    let scrutinee_var = CoreExprNode::new(CoreExpr::Var(tmp.clone()), scrutinee_ty.clone());

    let cases = build_cases(ctx, &scrutinee_var, arms)?;
    let coverage = build_coverage(&scrutinee_ty, arms, carrier_match, discharged_carrier);
    let match_node = CoreExprNode::new(
        CoreExpr::Match { scrutinee: Box::new(scrutinee_var), cases, fallback: None, coverage },
        ty.clone(),
    );
    Ok(CoreNode::finish(
        node.id,
        node.span,
        ty,
        CoreExpr::Let {
            binding: CoreBinding { name: tmp, value: Box::new(scrutinee_lowered) },
            body: Box::new(match_node),
        },
    ))
}

/// Expands an anonymous bundle literal (spec.md §4.4): `match tmp { ... }`
/// wrapped in a fresh lambda.
fn lower_match_bundle(
    ctx: &mut LoweringContext,
    node: &MarkedExprNode,
    arms: &[MarkedMatchArm],
) -> Result<CoreExprNode, LoweringError> {
    let ty = ctx.resolved_type(node.id)?;
    let (param_ty, body_ty) = match &ty {
        Type::Function { from, to } => ((**from).clone(), (**to).clone()),
        other => (other.clone(), other.clone()),
    };
    let tmp = ctx.fresh_stmt_name();
    let scrutinee_var = CoreExprNode::new(CoreExpr::Var(tmp.clone()), param_ty);
    let cases = build_cases(ctx, &scrutinee_var, arms)?;
    let match_node = CoreExprNode::new(
        CoreExpr::Match { scrutinee: Box::new(scrutinee_var), cases, fallback: None, coverage: None },
        body_ty,
    );
    Ok(CoreNode::finish(
        node.id,
        node.span,
        ty,
        CoreExpr::Lambda { params: vec![tmp], body: Box::new(match_node) },
    ))
}

/// Lowers match arms against an already-bound scrutinee variable. A guarded
/// arm becomes `if guard { body } else { <match over the remaining arms> }`
/// so evaluation order matches the surface's first-match-wins semantics.
fn build_cases(
    ctx: &mut LoweringContext,
    scrutinee_var: &CoreExprNode,
    arms: &[MarkedMatchArm],
) -> Result<Vec<CoreMatchCase>, LoweringError> {
    let mut cases = Vec::with_capacity(arms.len());
    for (i, arm) in arms.iter().enumerate() {
        let pattern = lower_pattern(ctx, &arm.pattern)?;
        let mut body = lower_expr(ctx, &arm.body)?;
        if let Some(guard) = &arm.guard {
            let guard_lowered = lower_expr(ctx, guard)?;
            let rest = &arms[i + 1..];
            let body_ty = body.ty.clone();
            let else_branch = if rest.is_empty() {
                CoreExprNode::new(CoreExpr::Literal(CoreLiteral::Unit), body_ty.clone())
            } else {
                let rest_cases = build_cases(ctx, scrutinee_var, rest)?;
                CoreExprNode::new(
                    CoreExpr::Match {
                        scrutinee: Box::new(scrutinee_var.clone()),
                        cases: rest_cases,
                        fallback: None,
                        coverage: None,
                    },
                    body_ty.clone(),
                )
            };
            body = CoreExprNode::new(
                CoreExpr::If {
                    cond: Box::new(guard_lowered),
                    then_branch: Box::new(body),
                    else_branch: Box::new(else_branch),
                },
                body_ty,
            );
        }
        cases.push(CoreMatchCase { pattern, body });
    }
    Ok(cases)
}

/// Attaches `CoreMatchCoverage` only when the scrutinee is a registered
/// carrier whose state is a row; otherwise a match has nothing to report
/// (spec.md §3.4, §4.4).
fn build_coverage(
    scrutinee_ty: &Type,
    arms: &[MarkedMatchArm],
    carrier_match: &Option<Atom>,
    discharged_carrier: &Option<Atom>,
) -> Option<CoreMatchCoverage> {
    let (_, state_ty) = vane_carriers::split_carrier(scrutinee_ty)?;
    let (cases, tail) = state_ty.as_row()?;

    let covered: Vec<Atom> = arms
        .iter()
        .filter_map(|arm| match &arm.pattern.pattern {
            vane_infer::MarkedPattern::Constructor { ctor, .. } => Some(ctor.clone()),
            _ => None,
        })
        .collect();
    let tail_covered = tail.is_none()
        || arms.iter().any(|arm| {
            matches!(
                arm.pattern.pattern,
                vane_infer::MarkedPattern::Wildcard
                    | vane_infer::MarkedPattern::Binding(_)
                    | vane_infer::MarkedPattern::AllErrors { .. }
            )
        });
    let missing: Vec<Atom> =
        cases.keys().filter(|label| !covered.contains(label)).cloned().collect();

    Some(CoreMatchCoverage {
        effect_row: Some(state_ty.clone()),
        covered_constructors: covered,
        tail_covered,
        missing_constructors: missing,
        discharges_carrier: discharged_carrier.clone().or_else(|| carrier_match.clone()),
    })
}

#[cfg(test)]
#[path = "../../tests/lowering_expr.rs"]
mod tests;
