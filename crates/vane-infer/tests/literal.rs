use super::*;

#[test]
fn literals_compare_by_value() {
    assert_eq!(Literal::Int(1), Literal::Int(1));
    assert_ne!(Literal::Int(1), Literal::Int(2));
    assert_eq!(Literal::Unit, Literal::Unit);
}
