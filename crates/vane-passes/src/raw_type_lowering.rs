//! Raw-type lowering (C3d, spec.md §4.7): a small normalizing pass applied
//! only to `raw`-mode modules. Every `Ptr<T, S>` / `ManyPtr<T, S>` gets its
//! state argument `S` normalized to an effect row — replaced by the empty
//! row if it isn't one already. Every other type shape passes through with
//! its components recursively lowered.

use crate::type_walk::map_expr_types;
use indexmap::IndexMap;
use vane_common::Backend;
use vane_ir::{CoreModule, CoreModuleGraph};
use vane_types::{ConstructorInfo, Type, TypeInfo, TypeScheme};

const POINTER_LIKE: [&str; 2] = ["Ptr", "ManyPtr"];

fn lower_type(ty: &Type) -> Type {
    match ty {
        Type::Constructor { name, args }
            if POINTER_LIKE.contains(&name.as_str()) && args.len() == 2 =>
        {
            let elem = lower_type(&args[0]);
            let state = lower_type(&args[1]);
            let state = if matches!(state, Type::EffectRow { .. }) { state } else { Type::empty_row() };
            Type::Constructor { name: name.clone(), args: vec![elem, state] }
        }
        Type::Constructor { name, args } => {
            Type::Constructor { name: name.clone(), args: args.iter().map(lower_type).collect() }
        }
        Type::Function { from, to } => Type::function(lower_type(from), lower_type(to)),
        Type::Tuple(elems) => Type::Tuple(elems.iter().map(lower_type).collect()),
        Type::Array(elem) => Type::array(lower_type(elem)),
        Type::Record(fields) => {
            let mut out = IndexMap::with_capacity(fields.len());
            for (name, field_ty) in fields {
                out.insert(name.clone(), lower_type(field_ty));
            }
            Type::Record(out)
        }
        Type::EffectRow { cases, tail } => {
            let mut out = IndexMap::with_capacity(cases.len());
            for (label, payload) in cases {
                out.insert(label.clone(), payload.as_ref().map(lower_type));
            }
            Type::EffectRow { cases: out, tail: tail.as_ref().map(|t| Box::new(lower_type(t))) }
        }
        Type::Variable(_) | Type::Int | Type::Bool | Type::Char | Type::String | Type::Unit => {
            ty.clone()
        }
    }
}

fn lower_type_info(info: &TypeInfo) -> TypeInfo {
    TypeInfo {
        parameters: info.parameters.clone(),
        constructors: info
            .constructors
            .iter()
            .map(|c| ConstructorInfo {
                name: c.name.clone(),
                arity: c.arity,
                scheme: TypeScheme { quantifiers: c.scheme.quantifiers.clone(), ty: lower_type(&c.scheme.ty) },
            })
            .collect(),
        alias: info.alias.as_ref().map(lower_type),
        record_fields: info.record_fields.clone(),
        record_defaults: info.record_defaults.clone(),
    }
}

/// Applies C3d to one raw-mode module; non-raw modules pass through
/// unchanged (spec.md §4.11 "Passes that do not own a stage pass the module
/// through unchanged").
#[must_use]
pub fn lower_raw_types_module(module: &CoreModule) -> CoreModule {
    if !matches!(module.mode, Some(Backend::Raw)) {
        return module.clone();
    }
    let mut out = module.clone();
    for binding in &mut out.values {
        binding.value = map_expr_types(&binding.value, &lower_type);
    }
    for decl in &mut out.type_declarations {
        decl.info = lower_type_info(&decl.info);
    }
    out
}

/// Applies C3d across every module of a graph.
#[must_use]
#[tracing::instrument(level = "debug", skip_all, fields(modules = graph.modules.len()))]
pub fn lower_raw_types_graph(graph: &CoreModuleGraph) -> CoreModuleGraph {
    let mut out = graph.clone();
    for (path, module) in out.modules.iter_mut() {
        let original = &graph.modules[path];
        *module = lower_raw_types_module(original);
    }
    out
}

#[cfg(test)]
#[path = "../tests/raw_type_lowering.rs"]
mod tests;
