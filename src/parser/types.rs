//! Type specifier parsing.
//!
//! A type is a base keyword followed by any number of `*`. Array extents are
//! written after the declared name (`int a[4][2]`) and are applied by
//! [`parse_array_suffix`] once the name has been read.

use crate::{
    ast::types::DataType,
    config::Target,
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
};

use super::{expr::integer_value, parser::Parser};

pub fn parse_type_specifier(parser: &mut Parser) -> Option<DataType> {
    let token = parser.peek().clone();

    let mut data_type = match token.kind {
        TokenKind::Int => DataType::int(),
        TokenKind::Float => DataType::float(),
        TokenKind::Char => DataType::char(),
        TokenKind::Bool => DataType::bool(),
        TokenKind::Void => DataType::void(),
        _ => {
            parser.error(Error::new(
                ErrorImpl::ExpectedTypeSpecifier {
                    found: token.describe(),
                },
                token.position,
            ));
            return None;
        }
    };
    parser.advance();

    while parser.accept(TokenKind::Star) {
        data_type = DataType::pointer(data_type);
    }

    Some(data_type)
}

/// Applies `[N]` suffixes to `element`. The first suffix is the outermost
/// dimension.
///
/// Lengths use the same literal forms as integer expressions. A length is
/// rejected when the whole array would not fit in `i64::MAX` bytes on the
/// default target.
pub fn parse_array_suffix(parser: &mut Parser, element: DataType) -> DataType {
    let mut lengths = vec![];
    let mut total = element.size_of(&Target::default());

    while parser.accept(TokenKind::OpenBracket) {
        let Some(token) = parser.expect(TokenKind::Number) else {
            break;
        };

        let length = integer_value(&token.value)
            .ok()
            .and_then(|value| usize::try_from(value).ok());
        let size = length
            .and_then(|length| total.checked_mul(length))
            .filter(|size| i64::try_from(*size).is_ok());

        match (length, size) {
            (Some(length), Some(size)) => {
                lengths.push(length);
                total = size;
            }
            _ => parser.error(Error::new(
                ErrorImpl::NumberParseError { token: token.value },
                token.position,
            )),
        }

        if parser.expect(TokenKind::CloseBracket).is_none() {
            break;
        }
    }

    lengths
        .into_iter()
        .rev()
        .fold(element, DataType::array)
}
