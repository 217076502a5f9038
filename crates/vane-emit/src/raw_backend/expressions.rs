//! Expression emission for the raw systems backend (spec.md §4.10): a
//! Zig-like target built from labeled blocks (`blk: { ... break :blk v; }`),
//! `switch` for `match`/`carrier_match`, and lambda lifting for closures
//! (`closures.rs`). Hoisted lambdas are collected into `hoisted` as they're
//! encountered so the declaration emitter can append them at module scope.

use vane_common::Atom;
use vane_ir::{CoreExpr, CoreExprNode, CoreLiteral, CoreMatchCase, CorePattern, CorePatternNode};

use super::closures::{free_vars, HoistedLambda};
use crate::error::{EmitError, EmitResult};
use crate::name_state::{escape_identifier, NameState};

fn zig_string_literal(s: &str) -> String {
    let mut out = String::from("\"");
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}

fn literal(lit: &CoreLiteral) -> String {
    match lit {
        CoreLiteral::Int(n) => n.to_string(),
        CoreLiteral::Bool(b) => b.to_string(),
        CoreLiteral::Char(c) => format!("'{c}'"),
        CoreLiteral::Str(s) => zig_string_literal(s),
        CoreLiteral::Unit => "{}".to_string(),
    }
}

fn native_operator(op: &str) -> Option<&'static str> {
    match op {
        "int_add" => Some("+"),
        "int_sub" => Some("-"),
        "int_mul" => Some("*"),
        "int_lt" => Some("<"),
        "int_le" => Some("<="),
        "int_gt" => Some(">"),
        "int_ge" => Some(">="),
        "int_eq" | "char_eq" => Some("=="),
        "int_ne" => Some("!="),
        "bool_and" => Some("and"),
        "bool_or" => Some("or"),
        _ => None,
    }
}

pub struct RawExprCtx<'a> {
    pub module: &'a str,
    pub names: &'a mut NameState,
    pub hoisted: &'a mut Vec<HoistedLambda>,
}

pub fn emit_expr(node: &CoreExprNode, ctx: &mut RawExprCtx<'_>) -> EmitResult<String> {
    match &node.node {
        CoreExpr::Literal(lit) => Ok(literal(lit)),
        CoreExpr::Var(name) => Ok(escape_identifier(name.as_str())),
        CoreExpr::EnumLiteral { variant, .. } => Ok(format!(".{{ .tag = .{} }}", variant.as_str())),
        CoreExpr::Tuple(elems) => {
            let parts: Vec<String> = elems
                .iter()
                .enumerate()
                .map(|(i, e)| Ok(format!("._{i} = {}", emit_expr(e, ctx)?)))
                .collect::<EmitResult<_>>()?;
            Ok(format!(".{{ {} }}", parts.join(", ")))
        }
        CoreExpr::Record(fields) => {
            let parts: Vec<String> = fields
                .iter()
                .map(|(k, v)| Ok(format!(".{} = {}", k.as_str(), emit_expr(v, ctx)?)))
                .collect::<EmitResult<_>>()?;
            Ok(format!(".{{ {} }}", parts.join(", ")))
        }
        CoreExpr::TupleGet { target, index } => Ok(format!("{}._{index}", emit_expr(target, ctx)?)),
        CoreExpr::Data { ctor, fields, .. } => {
            let mut parts = vec![format!(".tag = .{}", ctor.as_str())];
            for (i, f) in fields.iter().enumerate() {
                parts.push(format!("._{i} = {}", emit_expr(f, ctx)?));
            }
            Ok(format!(".{{ {} }}", parts.join(", ")))
        }
        CoreExpr::Lambda { params, body } => emit_lambda(params, body, ctx),
        CoreExpr::Call { callee, args } => {
            let callee_s = emit_expr(callee, ctx)?;
            let mut parts = Vec::new();
            for a in args {
                parts.push(emit_expr(a, ctx)?);
            }
            Ok(format!("{callee_s}({})", parts.join(", ")))
        }
        CoreExpr::Let { binding, body } => {
            let label = ctx.names.fresh_label();
            let value = emit_expr(&binding.value, ctx)?;
            let result = emit_expr(body, ctx)?;
            Ok(format!(
                "{label}: {{ const {} = {value}; break :{label} {result}; }}",
                escape_identifier(binding.name.as_str())
            ))
        }
        CoreExpr::LetRec { bindings, body } => {
            let label = ctx.names.fresh_label();
            let mut decls = String::new();
            for b in bindings {
                let (params, lambda_body) = match &b.value.node {
                    CoreExpr::Lambda { params, body } => (params.clone(), body.as_ref()),
                    _ => {
                        return Err(EmitError::UnsupportedExpr {
                            module: ctx.module.to_string(),
                            detail: "let_rec member is not a lambda".to_string(),
                            origin: node.origin,
                        })
                    }
                };
                let params_str =
                    params.iter().map(|p| format!("{}: anytype", escape_identifier(p.as_str()))).collect::<Vec<_>>().join(", ");
                let fn_body = emit_expr(lambda_body, ctx)?;
                decls.push_str(&format!(
                    "const {} = struct {{ fn call({params_str}) callconv(.Inline) @TypeOf({fn_body}) {{ return {fn_body}; }} }}.call; ",
                    escape_identifier(b.name.as_str())
                ));
            }
            let result = emit_expr(body, ctx)?;
            Ok(format!("{label}: {{ {decls}break :{label} {result}; }}"))
        }
        CoreExpr::If { cond, then_branch, else_branch } => {
            Ok(format!("(if ({}) {} else {})", emit_expr(cond, ctx)?, emit_expr(then_branch, ctx)?, emit_expr(else_branch, ctx)?))
        }
        CoreExpr::Prim { op, args } => emit_prim(op, args, ctx, node),
        CoreExpr::Match { scrutinee, cases, fallback, .. } => emit_switch(scrutinee, cases, fallback.as_deref(), ctx, "unreachable"),
        CoreExpr::CarrierWrap { value, .. } | CoreExpr::CarrierUnwrap { value, .. } => emit_expr(value, ctx),
        CoreExpr::CarrierMatch { scrutinee, cases, fallback, .. } => {
            let default = "__carrier";
            let scrutinee_s = emit_expr(scrutinee, ctx)?;
            let label = ctx.names.fresh_label();
            let mut body = format!("{label}: {{ const __carrier = {scrutinee_s}; break :{label} switch (__carrier) {{ ");
            for case in cases {
                body.push_str(&emit_switch_case(case, ctx)?);
            }
            match fallback {
                Some(f) => body.push_str(&format!("else => {}, ", emit_expr(f, ctx)?)),
                None => body.push_str(&format!("else => {default}, ")),
            }
            body.push_str("}; }");
            Ok(body)
        }
        CoreExpr::Coerce { expr, .. } => emit_expr(expr, ctx),
    }
}

fn emit_lambda(params: &[Atom], body: &CoreExprNode, ctx: &mut RawExprCtx<'_>) -> EmitResult<String> {
    let captures = free_vars(params, body);
    let name = ctx.names.fresh_lambda_name();
    ctx.hoisted.push(HoistedLambda {
        name: name.clone(),
        captures: captures.clone(),
        params: params.to_vec(),
        body: body.clone(),
    });
    if captures.is_empty() {
        return Ok(name.as_str().to_string());
    }
    let bound: Vec<String> =
        captures.iter().map(|c| format!(".{} = {}", c.as_str(), escape_identifier(c.as_str()))).collect();
    Ok(format!(".{{ .closure_fn = {}, .captures = .{{ {} }} }}", name.as_str(), bound.join(", ")))
}

fn emit_prim(op: &Atom, args: &[CoreExprNode], ctx: &mut RawExprCtx<'_>, node: &CoreExprNode) -> EmitResult<String> {
    if let Some(field) = CoreExpr::record_get_field(op) {
        let target = args.first().ok_or_else(|| EmitError::UnsupportedExpr {
            module: ctx.module.to_string(),
            detail: "record_get with no target".to_string(),
            origin: node.origin,
        })?;
        return Ok(format!("{}.{}", emit_expr(target, ctx)?, field.as_str()));
    }
    match op.as_str() {
        "int_div" if args.len() == 2 => {
            Ok(format!("@divTrunc({}, {})", emit_expr(&args[0], ctx)?, emit_expr(&args[1], ctx)?))
        }
        "int_mod" if args.len() == 2 => {
            Ok(format!("@mod({}, {})", emit_expr(&args[0], ctx)?, emit_expr(&args[1], ctx)?))
        }
        "bool_not" if args.len() == 1 => Ok(format!("(!{})", emit_expr(&args[0], ctx)?)),
        "addr_of" if args.len() == 1 => Ok(format!("&{}", emit_expr(&args[0], ctx)?)),
        other => {
            if let Some(zig_op) = native_operator(other) {
                if args.len() == 2 {
                    return Ok(format!("({} {zig_op} {})", emit_expr(&args[0], ctx)?, emit_expr(&args[1], ctx)?));
                }
            }
            Err(EmitError::UnsupportedExpr {
                module: ctx.module.to_string(),
                detail: format!("unknown prim op `{other}`"),
                origin: node.origin,
            })
        }
    }
}

fn pattern_case_label(pattern: &CorePatternNode) -> Option<String> {
    match &pattern.node {
        CorePattern::Constructor { ctor, .. } => Some(format!(".{}", ctor.as_str())),
        CorePattern::Literal(lit) => Some(literal(lit)),
        _ => None,
    }
}

fn bind_fields(scrutinee_var: &str, pattern: &CorePatternNode) -> Vec<String> {
    match &pattern.node {
        CorePattern::Binding(name) => vec![format!("const {} = {scrutinee_var};", escape_identifier(name.as_str()))],
        CorePattern::Tuple(elems) => elems
            .iter()
            .enumerate()
            .flat_map(|(i, e)| bind_fields(&format!("{scrutinee_var}._{i}"), e))
            .collect(),
        CorePattern::Constructor { fields, .. } => fields
            .iter()
            .enumerate()
            .flat_map(|(i, f)| bind_fields(&format!("{scrutinee_var}._{i}"), f))
            .collect(),
        _ => Vec::new(),
    }
}

fn emit_switch_case(case: &CoreMatchCase, ctx: &mut RawExprCtx<'_>) -> EmitResult<String> {
    let label = pattern_case_label(&case.pattern).unwrap_or_else(|| "else".to_string());
    let binds = bind_fields("__scrutinee", &case.pattern).join(" ");
    let body = emit_expr(&case.body, ctx)?;
    if binds.is_empty() {
        Ok(format!("{label} => {body}, "))
    } else {
        Ok(format!("{label} => blk_case: {{ {binds} break :blk_case {body}; }}, "))
    }
}

fn emit_switch(
    scrutinee: &CoreExprNode,
    cases: &[CoreMatchCase],
    fallback: Option<&CoreExprNode>,
    ctx: &mut RawExprCtx<'_>,
    default_expr: &str,
) -> EmitResult<String> {
    let scrutinee_s = emit_expr(scrutinee, ctx)?;
    let label = ctx.names.fresh_label();
    let mut body = format!("{label}: {{ const __scrutinee = {scrutinee_s}; break :{label} switch (__scrutinee) {{ ");
    for case in cases {
        body.push_str(&emit_switch_case(case, ctx)?);
    }
    match fallback {
        Some(f) => body.push_str(&format!("else => {}, ", emit_expr(f, ctx)?)),
        None => body.push_str(&format!("else => {default_expr}, ")),
    }
    body.push_str("}; }");
    Ok(body)
}

#[cfg(test)]
#[path = "../../tests/raw_expressions.rs"]
mod tests;
