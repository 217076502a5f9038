//! `lowerProgramToValues`: the top-level entry point (spec.md §4.4).

use crate::core_expr::CoreExpr;
use crate::core_module::CoreValueBinding;
use crate::lowering::context::LoweringContext;
use crate::lowering::error::LoweringError;
use crate::lowering::expr::lower_expr;
use vane_infer::{MarkedLet, MarkedProgram, RecordDefaultExprs, ResolvedNodeTypes};

/// `lowerProgramToValues(markedProgram, resolvedTypes, recordDefaultExprs) ->
/// list<CoreValueBinding>` (spec.md §4.4).
#[tracing::instrument(level = "debug", skip_all, fields(lets = program.lets.len()))]
pub fn lower_program_to_values(
    program: &MarkedProgram,
    resolved_types: &ResolvedNodeTypes,
    record_defaults: &RecordDefaultExprs,
) -> Result<Vec<CoreValueBinding>, LoweringError> {
    let mut ctx = LoweringContext::new(program, resolved_types, record_defaults);
    program.lets.iter().map(|binding| lower_let(&mut ctx, binding)).collect()
}

/// A non-recursive let with parameters (or arrow syntax) becomes a lambda;
/// otherwise it lowers its block directly. A recursive binding (or member
/// of a mutually recursive group) must lower to a lambda (spec.md §4.4).
fn lower_let(
    ctx: &mut LoweringContext,
    binding: &MarkedLet,
) -> Result<CoreValueBinding, LoweringError> {
    let value = if binding.params.is_empty() {
        lower_expr(ctx, &binding.value)?
    } else {
        let ty = ctx.resolved_type(binding.value.id)?;
        let body = lower_expr(ctx, &binding.value)?;
        crate::core_expr::CoreNode::new(
            CoreExpr::Lambda { params: binding.params.clone(), body: Box::new(body) },
            ty,
        )
    };

    if binding.recursive_group.is_some() && !matches!(value.node, CoreExpr::Lambda { .. }) {
        return Err(LoweringError::RecursiveBindingNotLambda(binding.value.id));
    }

    Ok(CoreValueBinding {
        name: binding.name.clone(),
        value,
        exported: binding.exported,
        origin: Some(binding.value.id),
    })
}

#[cfg(test)]
#[path = "../../tests/lowering_program.rs"]
mod tests;
