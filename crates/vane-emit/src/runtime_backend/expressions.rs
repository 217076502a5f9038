//! Expression emission for the runtime-assisted backend (C4b, spec.md
//! §4.9). Every `CoreExpr` compiles to a single target expression string;
//! `Let`/`LetRec`/`Match`/`CarrierMatch` use an arrow-IIFE so the whole
//! module stays expression-oriented, matching how the Core IR itself has
//! no statement forms (spec.md §3.4).

use vane_common::Atom;
use vane_ir::{CoreExpr, CoreExprNode, CoreLiteral, CoreMatchCase, CorePattern, CorePatternNode};

use crate::error::{EmitError, EmitResult};

fn js_string_literal(s: &str) -> String {
    serde_json::to_string(s).unwrap_or_else(|_| format!("{s:?}"))
}

fn literal(lit: &CoreLiteral) -> String {
    match lit {
        CoreLiteral::Int(n) => n.to_string(),
        CoreLiteral::Bool(b) => b.to_string(),
        CoreLiteral::Char(c) => js_string_literal(&c.to_string()),
        CoreLiteral::Str(s) => js_string_literal(s),
        CoreLiteral::Unit => "undefined".to_string(),
    }
}

/// Prim ops that map directly to a native binary/unary JS operator
/// (spec.md §4.4's closed set of binary/prefix prims).
fn native_binary_operator(op: &str) -> Option<&'static str> {
    match op {
        "int_add" => Some("+"),
        "int_sub" => Some("-"),
        "int_mul" => Some("*"),
        "int_div" => Some("/"),
        "int_mod" => Some("%"),
        "int_lt" => Some("<"),
        "int_le" => Some("<="),
        "int_gt" => Some(">"),
        "int_ge" => Some(">="),
        "int_eq" | "char_eq" => Some("==="),
        "int_ne" => Some("!=="),
        "bool_and" => Some("&&"),
        "bool_or" => Some("||"),
        _ => None,
    }
}

pub fn emit_expr(node: &CoreExprNode, module: &str) -> EmitResult<String> {
    match &node.node {
        CoreExpr::Literal(lit) => Ok(literal(lit)),
        CoreExpr::Var(name) => Ok(name.as_str().to_string()),
        CoreExpr::EnumLiteral { type_name, variant } => {
            Ok(format!("{{ tag: {}, type: {} }}", js_string_literal(variant.as_str()), js_string_literal(type_name.as_str())))
        }
        CoreExpr::Tuple(elems) => {
            let parts: Vec<String> =
                elems.iter().map(|e| emit_expr(e, module)).collect::<EmitResult<_>>()?;
            Ok(format!("[{}]", parts.join(", ")))
        }
        CoreExpr::Record(fields) => {
            let parts: Vec<String> = fields
                .iter()
                .map(|(k, v)| Ok(format!("{}: {}", js_string_literal(k.as_str()), emit_expr(v, module)?)))
                .collect::<EmitResult<_>>()?;
            Ok(format!("{{ {} }}", parts.join(", ")))
        }
        CoreExpr::TupleGet { target, index } => Ok(format!("{}[{}]", emit_expr(target, module)?, index)),
        CoreExpr::Data { type_name, ctor, fields } => {
            let mut parts =
                vec![format!("tag: {}", js_string_literal(ctor.as_str())), format!("type: {}", js_string_literal(type_name.as_str()))];
            for (i, f) in fields.iter().enumerate() {
                parts.push(format!("_{i}: {}", emit_expr(f, module)?));
            }
            Ok(format!("{{ {} }}", parts.join(", ")))
        }
        CoreExpr::Lambda { params, body } => {
            let params_str = params.iter().map(Atom::as_str).collect::<Vec<_>>().join(", ");
            Ok(format!("(({params_str}) => ({}))", emit_expr(body, module)?))
        }
        CoreExpr::Call { callee, args } => {
            // Every call goes through the runtime's `callInfectious`
            // (spec.md §4.9 "Calls go through callInfectious(callee,
            // ...args)"), which unwraps/re-wraps as needed and is a no-op
            // pass-through for fully clean calls.
            let callee_s = emit_expr(callee, module)?;
            let mut parts = vec![callee_s];
            for a in args {
                parts.push(emit_expr(a, module)?);
            }
            Ok(format!("callInfectious({})", parts.join(", ")))
        }
        CoreExpr::Let { binding, body } => Ok(format!(
            "(() => {{ const {} = {}; return {}; }})()",
            binding.name.as_str(),
            emit_expr(&binding.value, module)?,
            emit_expr(body, module)?
        )),
        CoreExpr::LetRec { bindings, body } => {
            let mut decls = String::new();
            for b in bindings {
                let (params, lambda_body) = match &b.value.node {
                    CoreExpr::Lambda { params, body } => (params.clone(), body.as_ref()),
                    _ => {
                        return Err(EmitError::UnsupportedExpr {
                            module: module.to_string(),
                            detail: "let_rec member is not a lambda".to_string(),
                            origin: node.origin,
                        })
                    }
                };
                let params_str = params.iter().map(Atom::as_str).collect::<Vec<_>>().join(", ");
                decls.push_str(&format!(
                    "function {}({params_str}) {{ return {}; }} ",
                    b.name.as_str(),
                    emit_expr(lambda_body, module)?
                ));
            }
            Ok(format!("(() => {{ {decls}return {}; }})()", emit_expr(body, module)?))
        }
        CoreExpr::If { cond, then_branch, else_branch } => Ok(format!(
            "({} ? {} : {})",
            emit_expr(cond, module)?,
            emit_expr(then_branch, module)?,
            emit_expr(else_branch, module)?
        )),
        CoreExpr::Prim { op, args } => emit_prim(op, args, module, node),
        CoreExpr::Match { scrutinee, cases, fallback, .. } => {
            emit_match(scrutinee, cases, fallback.as_deref(), module, node)
        }
        CoreExpr::CarrierWrap { value, .. } => emit_expr(value, module),
        CoreExpr::CarrierUnwrap { value, .. } => emit_expr(value, module),
        CoreExpr::CarrierMatch { scrutinee, cases, fallback, .. } => {
            emit_carrier_match(scrutinee, cases, fallback.as_deref(), module, node)
        }
        CoreExpr::Coerce { expr, .. } => emit_expr(expr, module),
    }
}

fn emit_prim(op: &Atom, args: &[CoreExprNode], module: &str, node: &CoreExprNode) -> EmitResult<String> {
    if let Some(field) = CoreExpr::record_get_field(op) {
        let target = args.first().ok_or_else(|| EmitError::UnsupportedExpr {
            module: module.to_string(),
            detail: "record_get with no target".to_string(),
            origin: node.origin,
        })?;
        // Always routed through the runtime so a carrier-valued target
        // short-circuits instead of throwing (spec.md §4.9).
        return Ok(format!(
            "recordGetInfectious({}, {})",
            emit_expr(target, module)?,
            js_string_literal(field.as_str())
        ));
    }
    if let Some(js_op) = native_binary_operator(op.as_str()) {
        if args.len() == 2 {
            return Ok(format!("({} {js_op} {})", emit_expr(&args[0], module)?, emit_expr(&args[1], module)?));
        }
    }
    match op.as_str() {
        "bool_not" if args.len() == 1 => Ok(format!("(!{})", emit_expr(&args[0], module)?)),
        "addr_of" if args.len() == 1 => emit_expr(&args[0], module),
        other => Err(EmitError::UnsupportedExpr {
            module: module.to_string(),
            detail: format!("unknown prim op `{other}`"),
            origin: node.origin,
        }),
    }
}

/// Pattern-match used by both plain `match` and the tag-switch half of
/// `carrier_match`: produces a condition (or `None` for an irrefutable
/// binding/wildcard) plus the statements binding this case's names.
fn pattern_condition(scrutinee_var: &str, pattern: &CorePatternNode) -> (Option<String>, Vec<String>) {
    match &pattern.node {
        CorePattern::Wildcard => (None, Vec::new()),
        CorePattern::Binding(name) => (None, vec![format!("const {} = {scrutinee_var};", name.as_str())]),
        CorePattern::Pinned(name) => (Some(format!("{scrutinee_var} === {}", name.as_str())), Vec::new()),
        CorePattern::Literal(lit) => (Some(format!("{scrutinee_var} === {}", literal(lit))), Vec::new()),
        CorePattern::Tuple(elems) => {
            let mut binds = Vec::new();
            for (i, elem) in elems.iter().enumerate() {
                let (_, sub_binds) = pattern_condition(&format!("{scrutinee_var}[{i}]"), elem);
                binds.extend(sub_binds);
            }
            (None, binds)
        }
        CorePattern::Constructor { ctor, fields, .. } => {
            let cond = format!("{scrutinee_var}.tag === {}", js_string_literal(ctor.as_str()));
            let mut binds = Vec::new();
            for (i, field) in fields.iter().enumerate() {
                let (_, sub_binds) = pattern_condition(&format!("{scrutinee_var}._{i}"), field);
                binds.extend(sub_binds);
            }
            (Some(cond), binds)
        }
        CorePattern::AllErrors { .. } => (None, Vec::new()),
    }
}

/// A short, human-readable description of a pattern for the
/// `nonExhaustiveMatch` error's `patterns` list (spec.md §4.9/§6
/// `{nodeId, span, patterns, valueDescription}`).
fn describe_pattern(pattern: &CorePattern) -> String {
    match pattern {
        CorePattern::Wildcard => "_".to_string(),
        CorePattern::Binding(name) => name.as_str().to_string(),
        CorePattern::Pinned(name) => format!("^{}", name.as_str()),
        CorePattern::Literal(lit) => literal(lit),
        CorePattern::Tuple(elems) => {
            format!("({})", elems.iter().map(|e| describe_pattern(&e.node)).collect::<Vec<_>>().join(", "))
        }
        CorePattern::Constructor { ctor, fields, .. } => {
            if fields.is_empty() {
                ctor.as_str().to_string()
            } else {
                format!(
                    "{}({})",
                    ctor.as_str(),
                    fields.iter().map(|f| describe_pattern(&f.node)).collect::<Vec<_>>().join(", ")
                )
            }
        }
        CorePattern::AllErrors { result_type_name } => format!("AllErrors<{}>", result_type_name.as_str()),
    }
}

/// Builds the `nonExhaustiveMatch(__scrutinee, { nodeId, span, patterns })`
/// call for a match with no fallback, carrying the original node's id and
/// span plus every covered pattern so the thrown runtime error can point
/// back to the original surface expression (spec.md §8 scenario S5).
fn non_exhaustive_call(node: &CoreExprNode, cases: &[CoreMatchCase]) -> String {
    let node_id = node.origin.map_or("null".to_string(), |id| id.get().to_string());
    let span = node
        .span
        .map_or("null".to_string(), |s| format!("{{ start: {}, end: {} }}", s.start, s.end));
    let patterns = cases
        .iter()
        .map(|c| js_string_literal(&describe_pattern(&c.pattern.node)))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "return nonExhaustiveMatch(__scrutinee, {{ nodeId: {node_id}, span: {span}, patterns: [{patterns}] }}); "
    )
}

fn emit_match(
    scrutinee: &CoreExprNode,
    cases: &[CoreMatchCase],
    fallback: Option<&CoreExprNode>,
    module: &str,
    node: &CoreExprNode,
) -> EmitResult<String> {
    let scrutinee_s = emit_expr(scrutinee, module)?;
    let mut body = format!("(() => {{ const __scrutinee = {scrutinee_s}; ");
    for case in cases {
        let (cond, binds) = pattern_condition("__scrutinee", &case.pattern);
        let binds_s = binds.join(" ");
        let arm_body = emit_expr(&case.body, module)?;
        match cond {
            Some(c) => body.push_str(&format!("if ({c}) {{ {binds_s} return {arm_body}; }} ")),
            None => {
                body.push_str(&format!("{{ {binds_s} return {arm_body}; }}"));
                return finish_match(body, node, module);
            }
        }
    }
    match fallback {
        Some(f) => body.push_str(&format!("return {}; ", emit_expr(f, module)?)),
        None => body.push_str(&non_exhaustive_call(node, cases)),
    }
    finish_match(body, node, module)
}

fn finish_match(mut body: String, _node: &CoreExprNode, _module: &str) -> EmitResult<String> {
    body.push_str("})()");
    Ok(body)
}

/// `carrier_match` compiles to a direct tag switch on the carrier's own
/// constructor; a value that doesn't match any covered case (an effect
/// constructor the match doesn't name) is returned as-is, implicitly
/// routing the short-circuit upward (spec.md §4.9).
fn emit_carrier_match(
    scrutinee: &CoreExprNode,
    cases: &[CoreMatchCase],
    fallback: Option<&CoreExprNode>,
    module: &str,
    node: &CoreExprNode,
) -> EmitResult<String> {
    let scrutinee_s = emit_expr(scrutinee, module)?;
    let mut body = format!("(() => {{ const __carrier = {scrutinee_s}; ");
    for case in cases {
        let (cond, binds) = pattern_condition("__carrier", &case.pattern);
        let binds_s = binds.join(" ");
        let arm_body = emit_expr(&case.body, module)?;
        match cond {
            Some(c) => body.push_str(&format!("if ({c}) {{ {binds_s} return {arm_body}; }} ")),
            None => {
                body.push_str(&format!("{{ {binds_s} return {arm_body}; }}"));
                return finish_match(body, node, module);
            }
        }
    }
    match fallback {
        Some(f) => body.push_str(&format!("return {}; ", emit_expr(f, module)?)),
        None => body.push_str("return __carrier; "),
    }
    finish_match(body, node, module)
}

#[cfg(test)]
#[path = "../../tests/runtime_expressions.rs"]
mod tests;
