use super::*;
use vane_types::Type;

#[test]
fn ptr_renders_as_pointer() {
    let ty = Type::constructor("Ptr", vec![Type::Int, Type::empty_row()]);
    assert_eq!(render_type(&ty), "*i64");
}

#[test]
fn many_ptr_renders_as_slice_pointer() {
    let ty = Type::constructor("ManyPtr", vec![Type::Bool, Type::empty_row()]);
    assert_eq!(render_type(&ty), "[*]bool");
}

#[test]
fn ordinary_constructor_renders_as_its_name() {
    let ty = Type::constructor("Node__Int", vec![]);
    assert_eq!(render_type(&ty), "Node__Int");
}

#[test]
fn record_renders_as_anonymous_struct() {
    let mut fields = indexmap::IndexMap::new();
    fields.insert(vane_common::Atom::from("x"), Type::Int);
    let ty = Type::Record(fields);
    assert_eq!(render_type(&ty), "struct { x: i64 }");
}

#[test]
fn primitive_types_render_to_zig_builtins() {
    assert_eq!(render_type(&Type::Int), "i64");
    assert_eq!(render_type(&Type::Bool), "bool");
    assert_eq!(render_type(&Type::String), "[]const u8");
    assert_eq!(render_type(&Type::Unit), "void");
}
