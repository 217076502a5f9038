//! Lambda lifting for the raw backend (spec.md §4.10 "closures are
//! lambda-lifted with captures threaded through as extra parameters" — the
//! raw target has no closure environments, only function pointers and
//! plain structs).

use rustc_hash::FxHashSet;
use vane_common::Atom;
use vane_ir::{CoreExpr, CoreExprNode, CorePattern};

/// A lambda hoisted to a module-level function: its generated name, its
/// captured free variables (in a stable order, becoming its first
/// parameters), its own declared parameters, and its body.
pub struct HoistedLambda {
    pub name: Atom,
    pub captures: Vec<Atom>,
    pub params: Vec<Atom>,
    pub body: CoreExprNode,
}

fn free_vars_expr(node: &CoreExprNode, bound: &mut Vec<Atom>, out: &mut FxHashSet<Atom>) {
    match &node.node {
        CoreExpr::Var(name) => {
            if !bound.contains(name) {
                out.insert(name.clone());
            }
        }
        CoreExpr::Literal(_) | CoreExpr::EnumLiteral { .. } => {}
        CoreExpr::Tuple(elems) => {
            for e in elems {
                free_vars_expr(e, bound, out);
            }
        }
        CoreExpr::Call { callee, args } => {
            free_vars_expr(callee, bound, out);
            for a in args {
                free_vars_expr(a, bound, out);
            }
        }
        CoreExpr::Record(fields) => {
            for v in fields.values() {
                free_vars_expr(v, bound, out);
            }
        }
        CoreExpr::TupleGet { target, .. } => free_vars_expr(target, bound, out),
        CoreExpr::Data { fields, .. } => {
            for f in fields {
                free_vars_expr(f, bound, out);
            }
        }
        CoreExpr::Lambda { params, body } => {
            let added = params.len();
            bound.extend(params.iter().cloned());
            free_vars_expr(body, bound, out);
            bound.truncate(bound.len() - added);
        }
        CoreExpr::Let { binding, body } => {
            free_vars_expr(&binding.value, bound, out);
            bound.push(binding.name.clone());
            free_vars_expr(body, bound, out);
            bound.pop();
        }
        CoreExpr::LetRec { bindings, body } => {
            let added = bindings.len();
            bound.extend(bindings.iter().map(|b| b.name.clone()));
            for b in bindings {
                free_vars_expr(&b.value, bound, out);
            }
            free_vars_expr(body, bound, out);
            bound.truncate(bound.len() - added);
        }
        CoreExpr::If { cond, then_branch, else_branch } => {
            free_vars_expr(cond, bound, out);
            free_vars_expr(then_branch, bound, out);
            free_vars_expr(else_branch, bound, out);
        }
        CoreExpr::Prim { args, .. } => {
            for a in args {
                free_vars_expr(a, bound, out);
            }
        }
        CoreExpr::Match { scrutinee, cases, fallback, .. } => {
            free_vars_expr(scrutinee, bound, out);
            for case in cases {
                let added = bind_pattern(&case.pattern, bound);
                free_vars_expr(&case.body, bound, out);
                bound.truncate(bound.len() - added);
            }
            if let Some(f) = fallback {
                free_vars_expr(f, bound, out);
            }
        }
        CoreExpr::CarrierWrap { value, .. } | CoreExpr::CarrierUnwrap { value, .. } => {
            free_vars_expr(value, bound, out);
        }
        CoreExpr::CarrierMatch { scrutinee, cases, fallback, .. } => {
            free_vars_expr(scrutinee, bound, out);
            for case in cases {
                let added = bind_pattern(&case.pattern, bound);
                free_vars_expr(&case.body, bound, out);
                bound.truncate(bound.len() - added);
            }
            if let Some(f) = fallback {
                free_vars_expr(f, bound, out);
            }
        }
        CoreExpr::Coerce { expr, .. } => free_vars_expr(expr, bound, out),
    }
}

fn bind_pattern(pattern: &vane_ir::CorePatternNode, bound: &mut Vec<Atom>) -> usize {
    match &pattern.node {
        CorePattern::Wildcard | CorePattern::Literal(_) | CorePattern::AllErrors { .. } | CorePattern::Pinned(_) => 0,
        CorePattern::Binding(name) => {
            bound.push(name.clone());
            1
        }
        CorePattern::Tuple(elems) => elems.iter().map(|e| bind_pattern(e, bound)).sum(),
        CorePattern::Constructor { fields, .. } => fields.iter().map(|f| bind_pattern(f, bound)).sum(),
    }
}

/// Free variables of `body` that aren't among `params` (the lambda's own
/// parameters), in first-use order.
#[must_use]
pub fn free_vars(params: &[Atom], body: &CoreExprNode) -> Vec<Atom> {
    let mut bound: Vec<Atom> = params.to_vec();
    let mut set = FxHashSet::default();
    free_vars_expr(body, &mut bound, &mut set);
    let mut ordered: Vec<Atom> = set.into_iter().collect();
    ordered.sort_by(|a, b| a.as_str().cmp(b.as_str()));
    ordered
}

#[cfg(test)]
#[path = "../../tests/raw_closures.rs"]
mod tests;
