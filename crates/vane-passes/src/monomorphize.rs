//! Monomorphization (C3c, spec.md §4.6): specializes every concrete use of
//! a polymorphic ADT (e.g. `List<Int>`) into a zero-parameter declaration
//! (`List__Int`) so the raw backend can emit plain tagged unions/structs.

use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use vane_common::Atom;
use vane_ir::{
    CoreBinding, CoreExpr, CoreExprNode, CoreImport, CoreMatchCase, CoreModule, CoreModuleGraph,
    CorePattern, CorePatternNode,
};
use vane_infer::MarkedTypeDecl;
use vane_types::{ConstructorInfo, Type, TypeInfo, TypeScheme};

/// One concrete instantiation of a polymorphic declaration discovered
/// anywhere in the graph (spec.md §4.6 "Instantiation record").
#[derive(Clone, Debug, PartialEq)]
pub struct Instantiation {
    pub type_name: Atom,
    pub args: Vec<Type>,
    pub decl_module_path: String,
    pub emit_module_path: String,
    pub new_name: Atom,
    pub used_in: Vec<String>,
}

struct DeclEntry {
    module_path: String,
    info: TypeInfo,
}

/// Pointer/array-like names recurse into their arguments but are never
/// themselves instantiated (spec.md §4.6).
fn skips_instantiation(name: &str) -> bool {
    matches!(name, "Ptr" | "ManyPtr" | "Array")
}

fn sanitize(raw: &str) -> String {
    raw.chars().map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' }).collect()
}

fn mangle_one(ty: &Type) -> String {
    let raw = match ty {
        Type::Int => "Int".to_string(),
        Type::Bool => "Bool".to_string(),
        Type::Char => "Char".to_string(),
        Type::String => "String".to_string(),
        Type::Unit => "Unit".to_string(),
        Type::Variable(v) => format!("V{v}"),
        Type::Tuple(elems) => {
            format!("Tuple{}", elems.iter().map(mangle_one).collect::<Vec<_>>().join("_"))
        }
        Type::Array(elem) => format!("Array_{}", mangle_one(elem)),
        Type::Record(_) => "Record".to_string(),
        Type::EffectRow { .. } => "Row".to_string(),
        Type::Function { .. } => "Fn".to_string(),
        Type::Constructor { name, args } if args.is_empty() => name.as_str().to_string(),
        Type::Constructor { name, args } => {
            format!("{}_{}", name.as_str(), args.iter().map(mangle_one).collect::<Vec<_>>().join("_"))
        }
    };
    sanitize(&raw)
}

fn mangle_args(args: &[Type]) -> String {
    args.iter().map(mangle_one).collect::<Vec<_>>().join("_")
}

/// A small FNV-1a hash of a type argument list's `Debug` form, used only to
/// disambiguate two distinct instantiations that squeeze to the same
/// mangled string (spec.md §9 open question: "prefer a stable hash plus
/// readable prefix").
fn stable_hash(args: &[Type]) -> u64 {
    let mut hash: u64 = 0xcbf29ce484222325;
    for byte in format!("{args:?}").bytes() {
        hash ^= u64::from(byte);
        hash = hash.wrapping_mul(0x100000001b3);
    }
    hash
}

fn is_concrete(ty: &Type) -> bool {
    match ty {
        Type::Variable(_) => false,
        Type::Function { from, to } => is_concrete(from) && is_concrete(to),
        Type::Constructor { args, .. } => args.iter().all(is_concrete),
        Type::Tuple(elems) => elems.iter().all(is_concrete),
        Type::Array(elem) => is_concrete(elem),
        Type::Record(fields) => fields.values().all(is_concrete),
        Type::EffectRow { cases, tail } => {
            cases.values().all(|v| v.as_ref().is_none_or(is_concrete))
                && tail.as_deref().is_none_or(is_concrete)
        }
        Type::Int | Type::Bool | Type::Char | Type::String | Type::Unit => true,
    }
}

fn build_decl_index(graph: &CoreModuleGraph) -> FxHashMap<Atom, DeclEntry> {
    let mut index = FxHashMap::default();
    for (path, module) in &graph.modules {
        for decl in &module.type_declarations {
            index.insert(decl.name.clone(), DeclEntry { module_path: path.clone(), info: decl.info.clone() });
        }
    }
    index
}

type InstKey = (Atom, String);

fn collect_from_type(
    ty: &Type,
    decl_index: &FxHashMap<Atom, DeclEntry>,
    module_path: &str,
    found: &mut IndexMap<InstKey, Instantiation>,
    zero_arity_uses: &mut rustc_hash::FxHashSet<Atom>,
) {
    match ty {
        Type::Constructor { name, args } => {
            if args.is_empty() && decl_index.contains_key(name) {
                zero_arity_uses.insert(name.clone());
            }
            if !args.is_empty() && !skips_instantiation(name.as_str()) && decl_index.contains_key(name)
                && args.iter().all(is_concrete)
            {
                let mangled = mangle_args(args);
                // Two distinct argument lists can squeeze to the same
                // mangled string (spec.md §9). If the mangled key is
                // already taken by a different argument list, disambiguate
                // with a stable hash suffix rather than silently merging
                // the two instantiations.
                let key = match found.get(&(name.clone(), mangled.clone())) {
                    Some(existing) if existing.args != *args => {
                        (name.clone(), format!("{mangled}_{:x}", stable_hash(args)))
                    }
                    _ => (name.clone(), mangled.clone()),
                };
                let new_name_suffix = &key.1;
                let decl_module = decl_index[name].module_path.clone();
                let entry = found.entry(key.clone()).or_insert_with(|| Instantiation {
                    type_name: name.clone(),
                    args: args.clone(),
                    decl_module_path: decl_module.clone(),
                    emit_module_path: decl_module,
                    new_name: Atom::from(format!("{name}__{new_name_suffix}")),
                    used_in: Vec::new(),
                });
                if !entry.used_in.iter().any(|p| p == module_path) {
                    entry.used_in.push(module_path.to_string());
                }
            }
            for a in args {
                collect_from_type(a, decl_index, module_path, found, zero_arity_uses);
            }
        }
        Type::Function { from, to } => {
            collect_from_type(from, decl_index, module_path, found, zero_arity_uses);
            collect_from_type(to, decl_index, module_path, found, zero_arity_uses);
        }
        Type::Tuple(elems) => {
            for e in elems {
                collect_from_type(e, decl_index, module_path, found, zero_arity_uses);
            }
        }
        Type::Array(elem) => collect_from_type(elem, decl_index, module_path, found, zero_arity_uses),
        Type::Record(fields) => {
            for v in fields.values() {
                collect_from_type(v, decl_index, module_path, found, zero_arity_uses);
            }
        }
        Type::EffectRow { cases, tail } => {
            for payload in cases.values().flatten() {
                collect_from_type(payload, decl_index, module_path, found, zero_arity_uses);
            }
            if let Some(t) = tail.as_deref() {
                collect_from_type(t, decl_index, module_path, found, zero_arity_uses);
            }
        }
        Type::Variable(_) | Type::Int | Type::Bool | Type::Char | Type::String | Type::Unit => {}
    }
}

fn collect_expr_types(
    node: &CoreExprNode,
    decl_index: &FxHashMap<Atom, DeclEntry>,
    module_path: &str,
    found: &mut IndexMap<InstKey, Instantiation>,
    zero_arity_uses: &mut rustc_hash::FxHashSet<Atom>,
) {
    collect_from_type(&node.ty, decl_index, module_path, found, zero_arity_uses);
    match &node.node {
        CoreExpr::Literal(_) | CoreExpr::Var(_) | CoreExpr::EnumLiteral { .. } => {}
        CoreExpr::Tuple(elems) | CoreExpr::Data { fields: elems, .. } => {
            for e in elems {
                collect_expr_types(e, decl_index, module_path, found, zero_arity_uses);
            }
        }
        CoreExpr::Record(fields) => {
            for v in fields.values() {
                collect_expr_types(v, decl_index, module_path, found, zero_arity_uses);
            }
        }
        CoreExpr::TupleGet { target, .. }
        | CoreExpr::CarrierWrap { value: target, .. }
        | CoreExpr::CarrierUnwrap { value: target, .. }
        | CoreExpr::Coerce { expr: target, .. } => {
            collect_expr_types(target, decl_index, module_path, found, zero_arity_uses)
        }
        CoreExpr::Lambda { body, .. } => {
            collect_expr_types(body, decl_index, module_path, found, zero_arity_uses)
        }
        CoreExpr::Call { callee, args } => {
            collect_expr_types(callee, decl_index, module_path, found, zero_arity_uses);
            for a in args {
                collect_expr_types(a, decl_index, module_path, found, zero_arity_uses);
            }
        }
        CoreExpr::Let { binding, body } => {
            collect_expr_types(&binding.value, decl_index, module_path, found, zero_arity_uses);
            collect_expr_types(body, decl_index, module_path, found, zero_arity_uses);
        }
        CoreExpr::LetRec { bindings, body } => {
            for b in bindings {
                collect_expr_types(&b.value, decl_index, module_path, found, zero_arity_uses);
            }
            collect_expr_types(body, decl_index, module_path, found, zero_arity_uses);
        }
        CoreExpr::If { cond, then_branch, else_branch } => {
            collect_expr_types(cond, decl_index, module_path, found, zero_arity_uses);
            collect_expr_types(then_branch, decl_index, module_path, found, zero_arity_uses);
            collect_expr_types(else_branch, decl_index, module_path, found, zero_arity_uses);
        }
        CoreExpr::Prim { args, .. } => {
            for a in args {
                collect_expr_types(a, decl_index, module_path, found, zero_arity_uses);
            }
        }
        CoreExpr::Match { scrutinee, cases, fallback, .. }
        | CoreExpr::CarrierMatch { scrutinee, cases, fallback, .. } => {
            collect_expr_types(scrutinee, decl_index, module_path, found, zero_arity_uses);
            for case in cases {
                collect_pattern_types(&case.pattern, decl_index, module_path, found, zero_arity_uses);
                collect_expr_types(&case.body, decl_index, module_path, found, zero_arity_uses);
            }
            if let Some(f) = fallback {
                collect_expr_types(f, decl_index, module_path, found, zero_arity_uses);
            }
        }
    }
}

fn collect_pattern_types(
    node: &CorePatternNode,
    decl_index: &FxHashMap<Atom, DeclEntry>,
    module_path: &str,
    found: &mut IndexMap<InstKey, Instantiation>,
    zero_arity_uses: &mut rustc_hash::FxHashSet<Atom>,
) {
    collect_from_type(&node.ty, decl_index, module_path, found, zero_arity_uses);
    match &node.node {
        CorePattern::Wildcard
        | CorePattern::Binding(_)
        | CorePattern::Literal(_)
        | CorePattern::AllErrors { .. }
        | CorePattern::Pinned(_) => {}
        CorePattern::Tuple(elems) => {
            for p in elems {
                collect_pattern_types(p, decl_index, module_path, found, zero_arity_uses);
            }
        }
        CorePattern::Constructor { fields, .. } => {
            for p in fields {
                collect_pattern_types(p, decl_index, module_path, found, zero_arity_uses);
            }
        }
    }
}

fn module_can_name(module: &CoreModule, name: &Atom) -> bool {
    module.type_declarations.iter().any(|d| &d.name == name)
        || module.imports.iter().any(|i| i.bindings.contains(name))
}

/// Adds `specifier`'s `binding` to `module_path`'s imports, merging into an
/// existing import of the same specifier rather than duplicating it.
fn add_import(graph: &mut CoreModuleGraph, module_path: &str, specifier: &str, binding: &Atom) {
    let Some(module) = graph.modules.get_mut(module_path) else { return };
    if module_path == specifier {
        return;
    }
    match module.imports.iter_mut().find(|i| i.specifier == specifier) {
        Some(existing) if !existing.bindings.contains(binding) => existing.bindings.push(binding.clone()),
        Some(_) => {}
        None => module
            .imports
            .push(CoreImport { specifier: specifier.to_string(), bindings: vec![binding.clone()] }),
    }
}

/// Import plumbing (spec.md §4.6 "For every instantiation used in a module
/// but emitted elsewhere, an import is added from the emit module. For
/// localized instantiations, imports required for argument types are
/// propagated into the declaration module."):
///
/// - every module that uses a specialization but doesn't emit it gets an
///   import of the specialized name from `emit_module_path`;
/// - whichever module actually emits the specialization (the declaring
///   module by default, the localized use site when localization fired)
///   gets an import of every argument type it doesn't already declare or
///   import, since the specialized declaration's fields reference those
///   argument types directly (`specialize_decl`'s substitution).
fn plumb_imports(graph: &mut CoreModuleGraph, instantiations: &[Instantiation], decl_index: &FxHashMap<Atom, DeclEntry>) {
    for inst in instantiations {
        for using_path in &inst.used_in {
            if using_path != &inst.emit_module_path {
                add_import(graph, using_path, &inst.emit_module_path, &inst.new_name);
            }
        }

        for arg in &inst.args {
            let Some((name, _)) = arg.as_constructor() else { continue };
            let Some(arg_decl) = decl_index.get(name) else { continue };
            if arg_decl.module_path != inst.emit_module_path {
                add_import(graph, &inst.emit_module_path, &arg_decl.module_path, name);
            }
        }
    }
}

/// Localizes an instantiation into a using module when that module can
/// name an argument the declaring module cannot (spec.md §4.6
/// "Localization rule").
fn localize(inst: &mut Instantiation, graph: &CoreModuleGraph, decl_index: &FxHashMap<Atom, DeclEntry>) {
    let Some(decl_module) = graph.modules.get(&inst.decl_module_path) else { return };
    for using_path in &inst.used_in {
        let Some(using_module) = graph.modules.get(using_path) else { continue };
        for arg in &inst.args {
            let Some((name, _)) = arg.as_constructor() else { continue };
            let unknown = !decl_index.contains_key(name);
            let using_can_name = module_can_name(using_module, name);
            let decl_can_name = module_can_name(decl_module, name);
            if unknown || (using_can_name && !decl_can_name) {
                inst.emit_module_path = using_path.clone();
                return;
            }
        }
    }
}

/// Inside a constructor field, a reference back to the declaration's own
/// (now-concrete) type becomes `Ptr<Self, ∅>` unless it already sits
/// beneath a pointer (spec.md §4.6 "self-recursion rewriting").
fn rewrite_self_refs(ty: &Type, type_name: &Atom, args: &[Type], beneath_pointer: bool) -> Type {
    match ty {
        Type::Constructor { name, args: cargs } if name == type_name && cargs == args => {
            if beneath_pointer {
                ty.clone()
            } else {
                Type::constructor("Ptr", vec![ty.clone(), Type::empty_row()])
            }
        }
        Type::Constructor { name, args: cargs } => {
            let nested_under_ptr = beneath_pointer || matches!(name.as_str(), "Ptr" | "ManyPtr");
            Type::Constructor {
                name: name.clone(),
                args: cargs.iter().map(|a| rewrite_self_refs(a, type_name, args, nested_under_ptr)).collect(),
            }
        }
        Type::Function { from, to } => Type::Function {
            from: Box::new(rewrite_self_refs(from, type_name, args, beneath_pointer)),
            to: Box::new(rewrite_self_refs(to, type_name, args, beneath_pointer)),
        },
        Type::Tuple(elems) => {
            Type::Tuple(elems.iter().map(|e| rewrite_self_refs(e, type_name, args, beneath_pointer)).collect())
        }
        Type::Array(elem) => Type::Array(Box::new(rewrite_self_refs(elem, type_name, args, beneath_pointer))),
        Type::Record(fields) => Type::Record(
            fields
                .iter()
                .map(|(k, v)| (k.clone(), rewrite_self_refs(v, type_name, args, beneath_pointer)))
                .collect(),
        ),
        Type::EffectRow { cases, tail } => Type::EffectRow {
            cases: cases
                .iter()
                .map(|(k, v)| (k.clone(), v.as_ref().map(|t| rewrite_self_refs(t, type_name, args, beneath_pointer))))
                .collect(),
            tail: tail.as_deref().map(|t| Box::new(rewrite_self_refs(t, type_name, args, beneath_pointer))),
        },
        other => other.clone(),
    }
}

fn constructor_fields(ty: &Type) -> (Vec<Type>, Type) {
    let mut fields = Vec::new();
    let mut cur = ty;
    while let Type::Function { from, to } = cur {
        fields.push((**from).clone());
        cur = to;
    }
    (fields, cur.clone())
}

fn substitute(ty: &Type, subst: &FxHashMap<u32, Type>) -> Type {
    match ty {
        Type::Variable(v) => subst.get(v).cloned().unwrap_or_else(|| ty.clone()),
        Type::Function { from, to } => {
            Type::function(substitute(from, subst), substitute(to, subst))
        }
        Type::Constructor { name, args } => {
            Type::constructor(name.clone(), args.iter().map(|a| substitute(a, subst)).collect())
        }
        Type::Tuple(elems) => Type::Tuple(elems.iter().map(|e| substitute(e, subst)).collect()),
        Type::Array(elem) => Type::array(substitute(elem, subst)),
        Type::Record(fields) => {
            Type::Record(fields.iter().map(|(k, v)| (k.clone(), substitute(v, subst))).collect())
        }
        Type::EffectRow { cases, tail } => Type::EffectRow {
            cases: cases.iter().map(|(k, v)| (k.clone(), v.as_ref().map(|t| substitute(t, subst)))).collect(),
            tail: tail.as_deref().map(|t| Box::new(substitute(t, subst))),
        },
        other => other.clone(),
    }
}

/// Specializes `decl`'s constructors for one concrete instantiation.
fn specialize_decl(decl: &MarkedTypeDecl, inst: &Instantiation) -> MarkedTypeDecl {
    let subst: FxHashMap<u32, Type> =
        decl.info.parameters.iter().copied().zip(inst.args.iter().cloned()).collect();
    let new_self_ty = Type::constructor(inst.new_name.clone(), vec![]);

    let constructors = decl
        .info
        .constructors
        .iter()
        .map(|ctor| {
            let substituted = substitute(&ctor.scheme.ty, &subst);
            let (fields, _result) = constructor_fields(&substituted);
            let rewritten_fields: Vec<Type> = fields
                .into_iter()
                .map(|f| rewrite_self_refs(&f, &inst.type_name, &inst.args, false))
                .collect();
            let ty = rewritten_fields.into_iter().rev().fold(new_self_ty.clone(), Type::function);
            ConstructorInfo {
                name: ctor.name.clone(),
                arity: ctor.arity,
                scheme: TypeScheme::monomorphic(ty),
            }
        })
        .collect();

    MarkedTypeDecl {
        name: inst.new_name.clone(),
        info: TypeInfo {
            parameters: vec![],
            constructors,
            alias: None,
            record_fields: decl.info.record_fields.clone(),
            record_defaults: decl.info.record_defaults.clone(),
        },
        infectious: decl.infectious.clone(),
    }
}

/// Looks up the instantiation matching `ty` by its exact `(name, args)`
/// rather than recomputing the (possibly hash-disambiguated) map key, so a
/// mangled-name collision never causes a lookup to return the *other*
/// colliding instantiation's specialization.
fn find_instantiation<'a>(
    ty: &Type,
    instantiations: &'a IndexMap<InstKey, Instantiation>,
) -> Option<&'a Instantiation> {
    let (name, args) = ty.as_constructor()?;
    instantiations.values().find(|inst| &inst.type_name == name && inst.args == args)
}

fn rewrite_type(ty: &Type, instantiations: &IndexMap<InstKey, Instantiation>) -> Type {
    if let Some(inst) = find_instantiation(ty, instantiations) {
        return Type::constructor(inst.new_name.clone(), vec![]);
    }
    match ty {
        Type::Function { from, to } => {
            Type::function(rewrite_type(from, instantiations), rewrite_type(to, instantiations))
        }
        Type::Constructor { name, args } => {
            Type::constructor(name.clone(), args.iter().map(|a| rewrite_type(a, instantiations)).collect())
        }
        Type::Tuple(elems) => Type::Tuple(elems.iter().map(|e| rewrite_type(e, instantiations)).collect()),
        Type::Array(elem) => Type::array(rewrite_type(elem, instantiations)),
        Type::Record(fields) => {
            Type::Record(fields.iter().map(|(k, v)| (k.clone(), rewrite_type(v, instantiations))).collect())
        }
        Type::EffectRow { cases, tail } => Type::EffectRow {
            cases: cases
                .iter()
                .map(|(k, v)| (k.clone(), v.as_ref().map(|t| rewrite_type(t, instantiations))))
                .collect(),
            tail: tail.as_deref().map(|t| Box::new(rewrite_type(t, instantiations))),
        },
        other => other.clone(),
    }
}

fn rewrite_expr(node: &CoreExprNode, instantiations: &IndexMap<InstKey, Instantiation>) -> CoreExprNode {
    let renamed_type_name = find_instantiation(&node.ty, instantiations).map(|i| i.new_name.clone());
    let ty = rewrite_type(&node.ty, instantiations);
    let mapped = match &node.node {
        CoreExpr::Literal(_) | CoreExpr::Var(_) | CoreExpr::EnumLiteral { .. } => node.node.clone(),
        CoreExpr::Tuple(elems) => {
            CoreExpr::Tuple(elems.iter().map(|e| rewrite_expr(e, instantiations)).collect())
        }
        CoreExpr::Record(fields) => CoreExpr::Record(
            fields.iter().map(|(k, v)| (k.clone(), rewrite_expr(v, instantiations))).collect(),
        ),
        CoreExpr::TupleGet { target, index } => {
            CoreExpr::TupleGet { target: Box::new(rewrite_expr(target, instantiations)), index: *index }
        }
        CoreExpr::Data { type_name, ctor, fields } => CoreExpr::Data {
            type_name: renamed_type_name.unwrap_or_else(|| type_name.clone()),
            ctor: ctor.clone(),
            fields: fields.iter().map(|e| rewrite_expr(e, instantiations)).collect(),
        },
        CoreExpr::Lambda { params, body } => {
            CoreExpr::Lambda { params: params.clone(), body: Box::new(rewrite_expr(body, instantiations)) }
        }
        CoreExpr::Call { callee, args } => CoreExpr::Call {
            callee: Box::new(rewrite_expr(callee, instantiations)),
            args: args.iter().map(|a| rewrite_expr(a, instantiations)).collect(),
        },
        CoreExpr::Let { binding, body } => CoreExpr::Let {
            binding: CoreBinding {
                name: binding.name.clone(),
                value: Box::new(rewrite_expr(&binding.value, instantiations)),
            },
            body: Box::new(rewrite_expr(body, instantiations)),
        },
        CoreExpr::LetRec { bindings, body } => CoreExpr::LetRec {
            bindings: bindings
                .iter()
                .map(|b| CoreBinding {
                    name: b.name.clone(),
                    value: Box::new(rewrite_expr(&b.value, instantiations)),
                })
                .collect(),
            body: Box::new(rewrite_expr(body, instantiations)),
        },
        CoreExpr::If { cond, then_branch, else_branch } => CoreExpr::If {
            cond: Box::new(rewrite_expr(cond, instantiations)),
            then_branch: Box::new(rewrite_expr(then_branch, instantiations)),
            else_branch: Box::new(rewrite_expr(else_branch, instantiations)),
        },
        CoreExpr::Prim { op, args } => {
            CoreExpr::Prim { op: op.clone(), args: args.iter().map(|a| rewrite_expr(a, instantiations)).collect() }
        }
        CoreExpr::Match { scrutinee, cases, fallback, coverage } => CoreExpr::Match {
            scrutinee: Box::new(rewrite_expr(scrutinee, instantiations)),
            cases: cases.iter().map(|c| rewrite_case(c, instantiations)).collect(),
            fallback: fallback.as_ref().map(|f| Box::new(rewrite_expr(f, instantiations))),
            coverage: coverage.clone(),
        },
        CoreExpr::CarrierWrap { domain, value } => {
            CoreExpr::CarrierWrap { domain: domain.clone(), value: Box::new(rewrite_expr(value, instantiations)) }
        }
        CoreExpr::CarrierUnwrap { domain, value } => CoreExpr::CarrierUnwrap {
            domain: domain.clone(),
            value: Box::new(rewrite_expr(value, instantiations)),
        },
        CoreExpr::CarrierMatch { carrier_type, scrutinee, cases, fallback } => CoreExpr::CarrierMatch {
            carrier_type: carrier_type.clone(),
            scrutinee: Box::new(rewrite_expr(scrutinee, instantiations)),
            cases: cases.iter().map(|c| rewrite_case(c, instantiations)).collect(),
            fallback: fallback.as_ref().map(|f| Box::new(rewrite_expr(f, instantiations))),
        },
        CoreExpr::Coerce { from_type, to_type, expr } => CoreExpr::Coerce {
            from_type: rewrite_type(from_type, instantiations),
            to_type: rewrite_type(to_type, instantiations),
            expr: Box::new(rewrite_expr(expr, instantiations)),
        },
    };
    CoreExprNode { node: mapped, ty, origin: node.origin, span: node.span }
}

fn rewrite_case(case: &CoreMatchCase, instantiations: &IndexMap<InstKey, Instantiation>) -> CoreMatchCase {
    CoreMatchCase { pattern: rewrite_pattern(&case.pattern, instantiations), body: rewrite_expr(&case.body, instantiations) }
}

fn rewrite_pattern(node: &CorePatternNode, instantiations: &IndexMap<InstKey, Instantiation>) -> CorePatternNode {
    let renamed_type_name = find_instantiation(&node.ty, instantiations).map(|i| i.new_name.clone());
    let ty = rewrite_type(&node.ty, instantiations);
    let mapped = match &node.node {
        CorePattern::Wildcard
        | CorePattern::Binding(_)
        | CorePattern::Literal(_)
        | CorePattern::AllErrors { .. }
        | CorePattern::Pinned(_) => node.node.clone(),
        CorePattern::Tuple(elems) => {
            CorePattern::Tuple(elems.iter().map(|p| rewrite_pattern(p, instantiations)).collect())
        }
        CorePattern::Constructor { type_name, ctor, fields } => CorePattern::Constructor {
            type_name: renamed_type_name.unwrap_or_else(|| type_name.clone()),
            ctor: ctor.clone(),
            fields: fields.iter().map(|p| rewrite_pattern(p, instantiations)).collect(),
        },
    };
    CorePatternNode { node: mapped, ty, origin: node.origin, span: node.span }
}

/// The result of monomorphizing a graph: the rewritten graph plus the
/// ledger of instantiations created (the emitter force-exports and
/// imports these; spec.md §4.6 "Import plumbing").
pub struct MonomorphizationResult {
    pub graph: CoreModuleGraph,
    pub instantiations: Vec<Instantiation>,
}

/// Applies C3c to every `raw`-mode module in `graph` (spec.md §4.6
/// "Applies only to modules in raw mode").
#[must_use]
#[tracing::instrument(level = "debug", skip_all, fields(modules = graph.modules.len()))]
pub fn monomorphize_graph(graph: &CoreModuleGraph) -> MonomorphizationResult {
    let decl_index = build_decl_index(graph);
    let mut found: IndexMap<InstKey, Instantiation> = IndexMap::new();
    let mut zero_arity_uses = rustc_hash::FxHashSet::default();

    for (path, module) in &graph.modules {
        if !matches!(module.mode, Some(vane_common::Backend::Raw)) {
            continue;
        }
        for decl in &module.type_declarations {
            for ctor in &decl.info.constructors {
                collect_from_type(&ctor.scheme.ty, &decl_index, path, &mut found, &mut zero_arity_uses);
            }
        }
        for value in &module.values {
            collect_expr_types(&value.value, &decl_index, path, &mut found, &mut zero_arity_uses);
        }
    }

    // A declaration with no type parameters of its own (e.g. a
    // self-recursive `Node = Cons(Int, Node)`) is not "polymorphic" in the
    // sense §4.6 means, but it still needs the self-recursion rewrite
    // (`Node` -> `Ptr<Node__, ∅>`) so the raw backend can size it. It is
    // monomorphized the same way as a concrete instantiation, with an empty
    // argument list (spec.md §8 S4: "`Node__` (no type args)").
    for name in &zero_arity_uses {
        let entry = &decl_index[name];
        if !entry.info.parameters.is_empty() {
            continue;
        }
        found.entry((name.clone(), String::new())).or_insert_with(|| Instantiation {
            type_name: name.clone(),
            args: Vec::new(),
            decl_module_path: entry.module_path.clone(),
            emit_module_path: entry.module_path.clone(),
            new_name: Atom::from(format!("{name}__")),
            used_in: Vec::new(),
        });
    }

    for inst in found.values_mut() {
        localize(inst, graph, &decl_index);
    }

    let specialized_names: rustc_hash::FxHashSet<Atom> =
        found.values().map(|i| i.type_name.clone()).collect();

    let mut out = graph.clone();
    for (path, module) in out.modules.iter_mut() {
        if !matches!(module.mode, Some(vane_common::Backend::Raw)) {
            continue;
        }
        let original = &graph.modules[path];
        module.values = original
            .values
            .iter()
            .map(|v| vane_ir::CoreValueBinding {
                name: v.name.clone(),
                value: rewrite_expr(&v.value, &found),
                exported: v.exported,
                origin: v.origin,
            })
            .collect();

        let kept_generic: Vec<MarkedTypeDecl> = original
            .type_declarations
            .iter()
            .filter(|d| {
                (d.info.parameters.is_empty() || zero_arity_uses.contains(&d.name))
                    && !specialized_names.contains(&d.name)
            })
            .cloned()
            .collect();
        let mut new_decls = kept_generic;
        for inst in found.values() {
            if &inst.emit_module_path == path {
                let decl = &decl_index[&inst.type_name];
                let original_decl = graph.modules[&decl.module_path]
                    .type_declarations
                    .iter()
                    .find(|d| d.name == inst.type_name)
                    .expect("instantiation's declaring type exists in its declaring module");
                new_decls.push(specialize_decl(original_decl, inst));
            }
        }
        module.type_declarations = new_decls;
    }

    let instantiations: Vec<Instantiation> = found.into_values().collect();
    plumb_imports(&mut out, &instantiations, &decl_index);

    MonomorphizationResult { graph: out, instantiations }
}

#[cfg(test)]
#[path = "../tests/monomorphize.rs"]
mod tests;
