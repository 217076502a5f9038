use super::*;
use vane_types::Type;

#[test]
fn int_arithmetic_and_comparison_classify_as_prims() {
    assert_eq!(classify_binary_prim("+", &Type::Int, &Type::Int), Some("int_add"));
    assert_eq!(classify_binary_prim("-", &Type::Int, &Type::Int), Some("int_sub"));
    assert_eq!(classify_binary_prim("*", &Type::Int, &Type::Int), Some("int_mul"));
    assert_eq!(classify_binary_prim("/", &Type::Int, &Type::Int), Some("int_div"));
    assert_eq!(classify_binary_prim("%", &Type::Int, &Type::Int), Some("int_mod"));
    assert_eq!(classify_binary_prim("<", &Type::Int, &Type::Int), Some("int_lt"));
    assert_eq!(classify_binary_prim("==", &Type::Int, &Type::Int), Some("int_eq"));
}

#[test]
fn bool_and_char_ops_classify_as_prims() {
    assert_eq!(classify_binary_prim("&&", &Type::Bool, &Type::Bool), Some("bool_and"));
    assert_eq!(classify_binary_prim("||", &Type::Bool, &Type::Bool), Some("bool_or"));
    assert_eq!(classify_binary_prim("==", &Type::Char, &Type::Char), Some("char_eq"));
}

#[test]
fn mismatched_operand_types_do_not_classify() {
    assert_eq!(classify_binary_prim("+", &Type::Int, &Type::Bool), None);
    assert_eq!(classify_binary_prim("==", &Type::String, &Type::String), None);
}

#[test]
fn prefix_not_and_addr_of_classify() {
    assert_eq!(classify_prefix_prim("!", &Type::Bool), Some("bool_not"));
    assert_eq!(classify_prefix_prim("&", &Type::Int), Some("addr_of"));
    assert_eq!(classify_prefix_prim("!", &Type::Int), None);
}

#[test]
fn unclassified_ops_lower_to_calls_of_mangled_names() {
    assert_eq!(binary_call_name("<>"), "__op_<>");
    assert_eq!(prefix_call_name("~"), "__prefix_~");
}
