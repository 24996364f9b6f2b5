//! Unit tests for the AST and type model.

use std::rc::Rc;

use crate::{config::Target, Position};

use super::{
    expressions::{BinaryOp, Expr, ExprKind},
    types::{DataType, TypeKind},
};

fn position() -> Position {
    Position(1, Rc::new("test.c".to_string()))
}

fn number(value: i64) -> Expr {
    Expr::new(ExprKind::Number(value), position())
}

#[test]
fn test_structural_equality() {
    let a = DataType::pointer(DataType::pointer(DataType::char()));
    let b = DataType::pointer(DataType::pointer(DataType::char()));
    let c = DataType::pointer(DataType::pointer(DataType::char()));

    // reflexive, symmetric, transitive
    assert!(a == a);
    assert!(a == b && b == a);
    assert!(a == b && b == c && a == c);

    assert!(a != DataType::pointer(DataType::char()));
}

#[test]
fn test_pointer_and_array_never_equal() {
    let pointer = DataType::pointer(DataType::int());
    let array = DataType::array(DataType::int(), 4);

    assert!(pointer != array);
    assert!(array != pointer);
}

#[test]
fn test_array_length_participates_in_equality() {
    assert!(DataType::array(DataType::int(), 4) == DataType::array(DataType::int(), 4));
    assert!(DataType::array(DataType::int(), 4) != DataType::array(DataType::int(), 5));
    assert!(DataType::array(DataType::int(), 4) != DataType::array(DataType::char(), 4));
}

#[test]
fn test_equality_across_families() {
    let families = vec![
        DataType::int(),
        DataType::float(),
        DataType::char(),
        DataType::bool(),
        DataType::void(),
    ];

    for (i, a) in families.iter().enumerate() {
        for (j, b) in families.iter().enumerate() {
            assert_eq!(a == b, i == j, "{} vs {}", a, b);
        }
    }
}

#[test]
fn test_unknown_is_unequal_to_everything() {
    let unknown = DataType::unknown();

    assert!(unknown != DataType::int());
    assert!(DataType::int() != unknown);
    assert!(unknown != DataType::unknown());
    assert!(DataType::pointer(DataType::unknown()) != DataType::pointer(DataType::unknown()));
}

#[test]
fn test_name_rendering() {
    assert_eq!(DataType::int().name(), "int");
    assert_eq!(DataType::pointer(DataType::char()).name(), "char*");
    assert_eq!(
        DataType::pointer(DataType::pointer(DataType::char())).name(),
        "char**"
    );
    assert_eq!(DataType::array(DataType::float(), 3).name(), "float[3]");
    assert_eq!(DataType::unknown().to_string(), "<unknown>");
}

#[test]
fn test_name_is_memoized() {
    let data_type = DataType::pointer(DataType::array(DataType::int(), 2));

    let first = data_type.name();
    let second = data_type.name();

    assert_eq!(first, second);
    assert!(std::ptr::eq(first.as_ptr(), second.as_ptr()));
}

#[test]
fn test_size_of() {
    let x86 = Target::x86();
    let x86_64 = Target::x86_64();

    assert_eq!(DataType::int().size_of(&x86), 4);
    assert_eq!(DataType::int().size_of(&x86_64), 8);
    assert_eq!(DataType::char().size_of(&x86_64), 1);
    assert_eq!(DataType::bool().size_of(&x86_64), 1);
    assert_eq!(DataType::void().size_of(&x86_64), 0);
    assert_eq!(DataType::pointer(DataType::char()).size_of(&x86), 4);
    assert_eq!(DataType::array(DataType::int(), 10).size_of(&x86), 40);
    assert_eq!(
        DataType::array(DataType::array(DataType::char(), 3), 2).size_of(&x86),
        6
    );
}

#[test]
fn test_size_of_saturates() {
    let huge = DataType::array(DataType::array(DataType::int(), usize::MAX / 2), 4);

    assert_eq!(huge.size_of(&Target::x86_64()), usize::MAX);
    assert_eq!(
        DataType::array(DataType::void(), usize::MAX).size_of(&Target::x86_64()),
        0
    );
}

#[test]
fn test_nested_and_length() {
    let array = DataType::array(DataType::char(), 8);

    assert_eq!(array.length(), 8);
    assert!(matches!(array.nested().map(|n| n.kind()), Some(TypeKind::Char)));
    assert!(DataType::int().nested().is_none());
    assert_eq!(DataType::int().length(), 0);
}

#[test]
fn test_clone_is_independent() {
    let original = DataType::pointer(DataType::int());
    let copy = original.clone();

    assert!(original == copy);
    assert_eq!(copy.name(), "int*");
}

#[test]
fn test_flatten_comma_chain() {
    // 1, (2, 3) as built by the parser for call arguments
    let chain = Expr::binary(
        BinaryOp::Comma,
        number(1),
        Expr::binary(BinaryOp::Comma, number(2), number(3), position()),
        position(),
    );

    let items: Vec<String> = chain.flatten_comma().iter().map(|e| e.to_string()).collect();
    assert_eq!(items, vec!["1", "2", "3"]);

    let single = number(7);
    assert_eq!(single.flatten_comma().len(), 1);
}

#[test]
fn test_resolved_type_first_write_wins() {
    let expr = number(1);
    assert!(expr.resolved_type().is_none());

    assert_eq!(expr.resolve_type(DataType::int()).name(), "int");
    assert_eq!(expr.resolve_type(DataType::char()).name(), "int");
    assert!(expr.resolved_type() == Some(&DataType::int()));
}
