//! Type rendering for the raw systems backend (spec.md §4.10): `Ptr<T,S>`
//! becomes `*T`, `ManyPtr<T,S>` becomes `[*]T`, monomorphized ADT names are
//! used verbatim (monomorphization already mangled them), and the state
//! argument `S` carried by pointer-like constructors is a monomorphization
//! artifact with no render of its own.

use vane_types::Type;

#[must_use]
pub fn render_type(ty: &Type) -> String {
    match ty {
        Type::Int => "i64".to_string(),
        Type::Bool => "bool".to_string(),
        Type::Char => "u8".to_string(),
        Type::String => "[]const u8".to_string(),
        Type::Unit => "void".to_string(),
        Type::Variable(v) => format!("@compileError(\"unresolved type variable {v}\")"),
        Type::Function { from, to } => format!("*const fn ({}) {}", render_type(from), render_type(to)),
        Type::Tuple(elems) => {
            let parts: Vec<String> = elems.iter().map(render_type).collect();
            format!("struct {{ {} }}", parts.join(", "))
        }
        Type::Array(elem) => format!("[]{}", render_type(elem)),
        Type::Record(fields) => {
            let parts: Vec<String> =
                fields.iter().map(|(name, ty)| format!("{}: {}", name.as_str(), render_type(ty))).collect();
            format!("struct {{ {} }}", parts.join(", "))
        }
        Type::EffectRow { .. } => "void".to_string(),
        Type::Constructor { name, args } => render_constructor(name.as_str(), args),
    }
}

fn render_constructor(name: &str, args: &[Type]) -> String {
    match name {
        "Ptr" => format!("*{}", args.first().map_or("void".to_string(), render_type)),
        "ManyPtr" => format!("[*]{}", args.first().map_or("void".to_string(), render_type)),
        _ => name.to_string(),
    }
}

#[cfg(test)]
#[path = "../../tests/raw_types.rs"]
mod tests;
