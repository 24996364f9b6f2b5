//! Unit tests for error handling.
//!
//! This module contains tests for error types, their rendering and the
//! diagnostics sink.

use crate::errors::errors::{Diagnostics, Error, ErrorImpl, ErrorKind, ErrorTip};
use crate::Position;
use std::rc::Rc;

fn position(line: u32) -> Position {
    Position(line, Rc::new("test.c".to_string()))
}

#[test]
fn test_error_creation() {
    let error = Error::new(
        ErrorImpl::UnrecognisedToken {
            token: "@".to_string(),
        },
        position(10),
    );

    assert_eq!(error.get_error_name(), "UnrecognisedToken");
    assert_eq!(error.kind(), ErrorKind::Lexical);
}

#[test]
fn test_error_position() {
    let error = Error::new(
        ErrorImpl::SymbolNotDeclared {
            symbol: "x".to_string(),
        },
        position(42),
    );

    assert_eq!(error.get_position().0, 42);
    assert_eq!(error.get_position().1.as_str(), "test.c");
}

#[test]
fn test_syntax_error_display() {
    let error = Error::new(
        ErrorImpl::UnexpectedToken {
            expected: "';'".to_string(),
            found: "'}'".to_string(),
        },
        position(3),
    );

    assert_eq!(error.kind(), ErrorKind::Syntax);
    assert_eq!(
        error.to_string(),
        "test.c:3: parsing error: expected ';', but found '}'"
    );
}

#[test]
fn test_semantic_error_display() {
    let error = Error::new(
        ErrorImpl::FunctionNotFound {
            function: "foo".to_string(),
        },
        position(7),
    );

    assert_eq!(
        error.to_string(),
        "test.c:7: error: called function 'foo' not found"
    );
}

#[test]
fn test_missing_arguments_message() {
    let error = Error::new(
        ErrorImpl::MissingArguments {
            function: "sum".to_string(),
            expected: 2,
            received: 1,
        },
        position(1),
    );

    assert_eq!(error.get_error_name(), "MissingArguments");
    assert!(error
        .to_string()
        .ends_with("requires 2 arguments, but only 1 was/were given"));
}

#[test]
fn test_expected_operand_message() {
    let error = Error::new(
        ErrorImpl::ExpectedOperand {
            found: "';'".to_string(),
        },
        position(1),
    );

    assert!(error
        .to_string()
        .contains("expected '(', unary operator, or terminal"));
}

#[test]
fn test_error_tip_semicolon() {
    let error = Error::new(
        ErrorImpl::UnexpectedToken {
            expected: "';'".to_string(),
            found: "EOF".to_string(),
        },
        position(1),
    );

    match error.get_tip() {
        ErrorTip::Suggestion(tip) => assert!(tip.contains("semicolon")),
        _ => panic!("Expected suggestion tip"),
    }
}

#[test]
fn test_character_out_of_range() {
    let error = Error::new(
        ErrorImpl::CharacterOutOfRange {
            token: "\u{e9}".to_string(),
        },
        position(2),
    );

    assert_eq!(error.kind(), ErrorKind::Syntax);
    assert_eq!(error.get_error_name(), "CharacterOutOfRange");
    assert!(matches!(error.get_tip(), ErrorTip::Suggestion(_)));
}

#[test]
fn test_error_tip_none() {
    let error = Error::new(
        ErrorImpl::UnrecognisedToken {
            token: "@".to_string(),
        },
        position(0),
    );

    assert!(matches!(error.get_tip(), ErrorTip::None));
}

#[test]
fn test_error_tip_display() {
    let tip = ErrorTip::Suggestion("Try this instead".to_string());
    assert_eq!(tip.to_string(), "Try this instead");

    let tip = ErrorTip::None;
    assert_eq!(tip.to_string(), "");
}

#[test]
fn test_diagnostics_counts() {
    let mut diagnostics = Diagnostics::default();
    assert!(!diagnostics.has_errors());

    diagnostics.report(Error::new(
        ErrorImpl::UnrecognisedToken {
            token: "$".to_string(),
        },
        position(1),
    ));
    diagnostics.report(Error::new(
        ErrorImpl::SymbolNotDeclared {
            symbol: "y".to_string(),
        },
        position(2),
    ));

    assert!(diagnostics.has_errors());
    assert_eq!(diagnostics.error_count(), 2);
    assert_eq!(diagnostics.count_kind(ErrorKind::Lexical), 1);
    assert_eq!(diagnostics.count_kind(ErrorKind::Semantic), 1);
    assert_eq!(diagnostics.count_kind(ErrorKind::Syntax), 0);
}
