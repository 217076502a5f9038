//! Collects every binder name in a module up front, so carrier-op
//! elaboration's fresh names never collide with a lambda parameter or a
//! `let`/`let_rec`/pattern binding anywhere in the module (spec.md §4.5
//! "Fresh names never collide with any binder in the module").

use rustc_hash::FxHashSet;
use vane_common::Atom;
use vane_ir::{CoreExpr, CoreExprNode, CoreModule, CorePattern, CorePatternNode};

pub struct FreshNames {
    used: FxHashSet<Atom>,
    counter: u32,
}

impl FreshNames {
    #[must_use]
    pub fn collect(module: &CoreModule) -> Self {
        let mut used = FxHashSet::default();
        for binding in &module.values {
            used.insert(binding.name.clone());
            collect_expr_binders(&binding.value, &mut used);
        }
        Self { used, counter: 0 }
    }

    /// A name of the form `<prefix>_N` guaranteed not to collide with any
    /// binder collected at construction time, nor with any name this
    /// generator has already handed out.
    pub fn fresh(&mut self, prefix: &str) -> Atom {
        loop {
            let candidate = Atom::from(format!("{prefix}_{}", self.counter));
            self.counter += 1;
            if !self.used.contains(&candidate) {
                self.used.insert(candidate.clone());
                return candidate;
            }
        }
    }
}

fn collect_expr_binders(node: &CoreExprNode, used: &mut FxHashSet<Atom>) {
    match &node.node {
        CoreExpr::Literal(_) | CoreExpr::Var(_) | CoreExpr::EnumLiteral { .. } => {}
        CoreExpr::Tuple(elems) | CoreExpr::Data { fields: elems, .. } => {
            for e in elems {
                collect_expr_binders(e, used);
            }
        }
        CoreExpr::Record(fields) => {
            for v in fields.values() {
                collect_expr_binders(v, used);
            }
        }
        CoreExpr::TupleGet { target, .. } => collect_expr_binders(target, used),
        CoreExpr::Lambda { params, body } => {
            used.extend(params.iter().cloned());
            collect_expr_binders(body, used);
        }
        CoreExpr::Call { callee, args } => {
            collect_expr_binders(callee, used);
            for a in args {
                collect_expr_binders(a, used);
            }
        }
        CoreExpr::Let { binding, body } => {
            used.insert(binding.name.clone());
            collect_expr_binders(&binding.value, used);
            collect_expr_binders(body, used);
        }
        CoreExpr::LetRec { bindings, body } => {
            for b in bindings {
                used.insert(b.name.clone());
                collect_expr_binders(&b.value, used);
            }
            collect_expr_binders(body, used);
        }
        CoreExpr::If { cond, then_branch, else_branch } => {
            collect_expr_binders(cond, used);
            collect_expr_binders(then_branch, used);
            collect_expr_binders(else_branch, used);
        }
        CoreExpr::Prim { args, .. } => {
            for a in args {
                collect_expr_binders(a, used);
            }
        }
        CoreExpr::Match { scrutinee, cases, fallback, .. }
        | CoreExpr::CarrierMatch { scrutinee, cases, fallback, .. } => {
            collect_expr_binders(scrutinee, used);
            for case in cases {
                collect_pattern_binders(&case.pattern, used);
                collect_expr_binders(&case.body, used);
            }
            if let Some(f) = fallback {
                collect_expr_binders(f, used);
            }
        }
        CoreExpr::CarrierWrap { value, .. } | CoreExpr::CarrierUnwrap { value, .. } => {
            collect_expr_binders(value, used);
        }
        CoreExpr::Coerce { expr, .. } => collect_expr_binders(expr, used),
    }
}

fn collect_pattern_binders(node: &CorePatternNode, used: &mut FxHashSet<Atom>) {
    match &node.node {
        CorePattern::Wildcard | CorePattern::Literal(_) | CorePattern::AllErrors { .. } => {}
        CorePattern::Binding(name) | CorePattern::Pinned(name) => {
            used.insert(name.clone());
        }
        CorePattern::Tuple(elems) => {
            for p in elems {
                collect_pattern_binders(p, used);
            }
        }
        CorePattern::Constructor { fields, .. } => {
            for p in fields {
                collect_pattern_binders(p, used);
            }
        }
    }
}

#[cfg(test)]
#[path = "../tests/binder_scan.rs"]
mod tests;
