//! The runtime-assisted backend (C4b, spec.md §4.9): emits a small
//! JS-like module per `CoreModule`, backed by calls into the runtime file
//! (`callInfectious`, `recordGetInfectious`, `registerInfectiousType`,
//! `nonExhaustiveMatch`).

pub mod expressions;

use vane_ir::CoreModule;

use crate::context::ModuleEmitContext;
use crate::error::EmitResult;
use crate::printer::CodePrinter;
use expressions::emit_expr;

fn emit_import_line(import: &crate::context::ResolvedImport, out: &mut CodePrinter) {
    if import.bindings.is_empty() {
        out.write_line(&format!("import {:?};", import.specifier));
        return;
    }
    let names: Vec<&str> = import.bindings.iter().map(vane_common::Atom::as_str).collect();
    out.write_line(&format!("import {{ {} }} from {:?};", names.join(", "), import.specifier));
}

/// Emits `registerInfectiousType(name, { valueConstructor, effectConstructors })`
/// for every carrier type declaration so the runtime knows how to
/// split/join/collapse it (spec.md §4.9).
fn emit_type_registration(decl: &vane_infer::MarkedTypeDecl, out: &mut CodePrinter) {
    let Some(meta) = &decl.infectious else { return };
    let value_ctor = meta
        .value_constructor
        .as_ref()
        .map_or("null".to_string(), |a| format!("{:?}", a.as_str()));
    let effect_ctors: Vec<String> =
        meta.effect_constructors.iter().map(|a| format!("{:?}", a.as_str())).collect();
    out.write_line(&format!(
        "registerInfectiousType({:?}, {{ valueConstructor: {value_ctor}, effectConstructors: [{}] }});",
        decl.name.as_str(),
        effect_ctors.join(", ")
    ));
}

/// Emits a full module (spec.md §4.9): the prelude/runtime imports first,
/// then rewritten user imports, then type registrations, then one
/// `const`/`export const` per value binding.
pub fn emit_module(module: &CoreModule, ctx: &ModuleEmitContext) -> EmitResult<String> {
    let mut out = CodePrinter::new();

    if let Some(runtime) = &ctx.runtime_specifier {
        out.write_line(&format!(
            "import {{ callInfectious, recordGetInfectious, registerInfectiousType, nonExhaustiveMatch }} from {runtime:?};"
        ));
    }
    if let Some(prelude) = &ctx.prelude_specifier {
        out.write_line(&format!("import * as __prelude from {prelude:?};"));
    }
    for import in &ctx.imports {
        emit_import_line(import, &mut out);
    }
    if !ctx.imports.is_empty() || ctx.prelude_specifier.is_some() || ctx.runtime_specifier.is_some() {
        out.blank_line();
    }

    for decl in &module.type_declarations {
        emit_type_registration(decl, &mut out);
    }
    if module.type_declarations.iter().any(|d| d.infectious.is_some()) {
        out.blank_line();
    }

    for value in &module.values {
        let body = emit_expr(&value.value, &module.path)?;
        let exported = ctx.is_exported(&value.name, value.exported);
        let keyword = if exported { "export const" } else { "const" };
        out.write_line(&format!("{keyword} {} = {body};", value.name.as_str()));
    }

    if ctx.forced_exports.contains(&vane_common::Atom::from("main")) && module.find_value("main").is_some() {
        out.blank_line();
        out.write_line("main();");
    }

    Ok(out.finish())
}

#[cfg(test)]
#[path = "../../tests/runtime_mod.rs"]
mod tests;
