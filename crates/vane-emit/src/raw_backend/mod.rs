//! The raw systems backend (C4c, spec.md §4.10): emits a Zig-like target
//! per `CoreModule` — tagged unions/structs for declarations, a plain
//! function per value binding, lambdas lifted to module scope.

pub mod closures;
pub mod declarations;
pub mod expressions;
pub mod types;

use vane_common::Atom;
use vane_ir::CoreModule;

use crate::context::ModuleEmitContext;
use crate::error::EmitResult;
use crate::name_state::{escape_identifier, NameState};
use crate::printer::CodePrinter;
use closures::HoistedLambda;
use declarations::emit_type_decl;
use expressions::{emit_expr, RawExprCtx};

fn emit_import_line(import: &crate::context::ResolvedImport, out: &mut CodePrinter) {
    let alias = import.specifier.rsplit('/').next().unwrap_or(&import.specifier);
    let safe_alias = alias.replace(['-', '.'], "_");
    out.write_line(&format!("const {safe_alias} = @import({:?});", import.specifier));
    for binding in &import.bindings {
        out.write_line(&format!(
            "const {} = {safe_alias}.{};",
            escape_identifier(binding.as_str()),
            binding.as_str()
        ));
    }
}

fn emit_hoisted(lambda: &HoistedLambda, out: &mut CodePrinter) -> EmitResult<()> {
    let mut names = NameState::new(std::iter::empty());
    let mut nested = Vec::new();
    let mut ctx = RawExprCtx { module: "<lifted>", names: &mut names, hoisted: &mut nested };
    let body = emit_expr(&lambda.body, &mut ctx)?;

    let mut params: Vec<String> =
        lambda.captures.iter().map(|c| format!("{}: anytype", escape_identifier(c.as_str()))).collect();
    params.extend(lambda.params.iter().map(|p| format!("{}: anytype", escape_identifier(p.as_str()))));

    out.write_line(&format!(
        "fn {}({}) @TypeOf({body}) {{ return {body}; }}",
        lambda.name.as_str(),
        params.join(", ")
    ));
    for extra in &nested {
        emit_hoisted(extra, out)?;
    }
    Ok(())
}

/// Emits a full module (spec.md §4.10): imports, type declarations, then
/// one `fn` per value binding, with lambdas encountered along the way
/// hoisted to module scope afterward.
pub fn emit_module(module: &CoreModule, ctx: &ModuleEmitContext) -> EmitResult<String> {
    let mut out = CodePrinter::new();

    for import in &ctx.imports {
        emit_import_line(import, &mut out);
    }
    if let Some(prelude) = &ctx.prelude_specifier {
        out.write_line(&format!("const __prelude = @import({prelude:?});"));
    }
    if !ctx.imports.is_empty() || ctx.prelude_specifier.is_some() {
        out.blank_line();
    }

    for decl in &module.type_declarations {
        out.write_line(&emit_type_decl(decl));
    }
    if !module.type_declarations.is_empty() {
        out.blank_line();
    }

    let mut preexisting: Vec<Atom> = module.values.iter().map(|v| v.name.clone()).collect();
    preexisting.extend(module.type_declarations.iter().map(|d| d.name.clone()));
    for import in &ctx.imports {
        preexisting.extend(import.bindings.iter().cloned());
    }
    let mut names = NameState::new(preexisting);

    let mut hoisted = Vec::new();
    let mut bodies = Vec::new();
    for value in &module.values {
        let mut expr_ctx = RawExprCtx { module: &module.path, names: &mut names, hoisted: &mut hoisted };
        let body = emit_expr(&value.value, &mut expr_ctx)?;
        let exported = ctx.is_exported(&value.name, value.exported);
        let visibility = if exported { "pub " } else { "" };
        bodies.push(format!("{visibility}const {} = {body};", escape_identifier(value.name.as_str())));
    }
    for line in &bodies {
        out.write_line(line);
    }

    if !hoisted.is_empty() {
        out.blank_line();
        for lambda in &hoisted {
            emit_hoisted(lambda, &mut out)?;
        }
    }

    if ctx.forced_exports.contains(&Atom::from("main")) && module.find_value("main").is_some() {
        out.blank_line();
        out.write_line("pub fn run() void { _ = main; }");
    }

    Ok(out.finish())
}

#[cfg(test)]
#[path = "../../tests/raw_mod.rs"]
mod tests;
