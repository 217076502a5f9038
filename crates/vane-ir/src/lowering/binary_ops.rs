//! Binary/prefix operator classification (spec.md §4.4): "Binary operators
//! map to prim ops when both operand types match a primitive pattern (int
//! arith/cmp, bool and/or, char eq, bool not, address-of). Otherwise they
//! lower to a call of `__op_<operator>` / `__prefix_<operator>`."

use vane_types::Type;

#[must_use]
pub fn classify_binary_prim(op: &str, left: &Type, right: &Type) -> Option<&'static str> {
    match (op, left, right) {
        ("+", Type::Int, Type::Int) => Some("int_add"),
        ("-", Type::Int, Type::Int) => Some("int_sub"),
        ("*", Type::Int, Type::Int) => Some("int_mul"),
        ("/", Type::Int, Type::Int) => Some("int_div"),
        ("%", Type::Int, Type::Int) => Some("int_mod"),
        ("<", Type::Int, Type::Int) => Some("int_lt"),
        ("<=", Type::Int, Type::Int) => Some("int_le"),
        (">", Type::Int, Type::Int) => Some("int_gt"),
        (">=", Type::Int, Type::Int) => Some("int_ge"),
        ("==", Type::Int, Type::Int) => Some("int_eq"),
        ("!=", Type::Int, Type::Int) => Some("int_ne"),
        ("&&", Type::Bool, Type::Bool) => Some("bool_and"),
        ("||", Type::Bool, Type::Bool) => Some("bool_or"),
        ("==", Type::Char, Type::Char) => Some("char_eq"),
        _ => None,
    }
}

#[must_use]
pub fn classify_prefix_prim(op: &str, operand: &Type) -> Option<&'static str> {
    match (op, operand) {
        ("!", Type::Bool) => Some("bool_not"),
        ("&", _) => Some("addr_of"),
        _ => None,
    }
}

#[must_use]
pub fn binary_call_name(op: &str) -> String {
    format!("__op_{op}")
}

#[must_use]
pub fn prefix_call_name(op: &str) -> String {
    format!("__prefix_{op}")
}

#[cfg(test)]
#[path = "../../tests/lowering_binary_ops.rs"]
mod tests;
