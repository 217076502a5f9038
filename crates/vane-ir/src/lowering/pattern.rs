//! Marked pattern -> `CorePattern` lowering (spec.md §4.4).

use crate::core_expr::{CoreLiteral, CoreNode, CorePattern, CorePatternNode};
use crate::lowering::context::LoweringContext;
use crate::lowering::error::LoweringError;
use vane_infer::{Literal, MarkedPattern, MarkedPatternNode};

#[must_use]
pub fn lower_literal(lit: &Literal) -> CoreLiteral {
    match lit {
        Literal::Int(v) => CoreLiteral::Int(*v),
        Literal::Bool(v) => CoreLiteral::Bool(*v),
        Literal::Char(v) => CoreLiteral::Char(*v),
        Literal::Str(v) => CoreLiteral::Str(v.clone()),
        Literal::Unit => CoreLiteral::Unit,
    }
}

/// Lowers one pattern node. `mark_pattern` becomes a wildcard (spec.md
/// §4.4); a constructor pattern whose constructor isn't declared on its
/// named type is a fatal [`LoweringError::UnresolvableConstructorPattern`].
pub fn lower_pattern(
    ctx: &LoweringContext,
    node: &MarkedPatternNode,
) -> Result<CorePatternNode, LoweringError> {
    let ty = ctx.resolved_type(node.id)?;
    let pattern = match &node.pattern {
        MarkedPattern::Wildcard => CorePattern::Wildcard,
        MarkedPattern::Binding(name) => CorePattern::Binding(name.clone()),
        MarkedPattern::Literal(lit) => CorePattern::Literal(lower_literal(lit)),
        MarkedPattern::Tuple(elems) => {
            let fields =
                elems.iter().map(|e| lower_pattern(ctx, e)).collect::<Result<Vec<_>, _>>()?;
            CorePattern::Tuple(fields)
        }
        MarkedPattern::Constructor { type_name, ctor, fields } => {
            if let Some(info) = ctx.type_infos.get(type_name)
                && info.find_constructor(ctor.as_str()).is_none()
            {
                return Err(LoweringError::UnresolvableConstructorPattern {
                    node: node.id,
                    type_name: type_name.to_string(),
                    ctor: ctor.to_string(),
                });
            }
            let lowered_fields =
                fields.iter().map(|f| lower_pattern(ctx, f)).collect::<Result<Vec<_>, _>>()?;
            CorePattern::Constructor {
                type_name: type_name.clone(),
                ctor: ctor.clone(),
                fields: lowered_fields,
            }
        }
        MarkedPattern::AllErrors { result_type_name } => {
            CorePattern::AllErrors { result_type_name: result_type_name.clone() }
        }
        MarkedPattern::Mark(_reason) => CorePattern::Wildcard,
    };
    Ok(CoreNode::finish(node.id, node.span, ty, pattern))
}

#[cfg(test)]
#[path = "../../tests/lowering_pattern.rs"]
mod tests;
