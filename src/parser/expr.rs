//! Expression parsing.
//!
//! Operands (terminals, parenthesized groups, casts, prefix and postfix
//! forms) are parsed by recursive descent. Binary operators and `?:` are
//! combined with an operator-precedence (shunting-yard) algorithm over the
//! parser's operand and operator stacks. Each sub-expression pushes its own
//! sentinel so it never reduces operators that belong to an enclosing
//! expression.

use std::num::ParseIntError;

use crate::{
    ast::expressions::{BinaryOp, Expr, ExprKind, UnaryOp},
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind},
};

use super::{
    lookups::{precedence, Precedence, StackOp, BINARY_LOOKUP, PREFIX_LOOKUP},
    parser::Parser,
    types::parse_type_specifier,
};

/// Parses a full expression, comma operator included.
///
/// Returns `None` when no operand could be parsed at all. After a syntax
/// error in a later operand the stacks are unwound and the last complete
/// operand is returned instead.
pub fn parse_expr(parser: &mut Parser) -> Option<Expr> {
    let operand_base = parser.operands.len();
    parser.operators.push(StackOp::Sentinel);

    loop {
        match parse_operand(parser) {
            Some(operand) => parser.operands.push(operand),
            None => return abandon(parser, operand_base),
        }

        let kind = parser.peek().kind;

        if kind == TokenKind::Question {
            let position = parser.advance().position;
            drain(parser, Precedence::Conditional);

            let then_expr = match parse_expr(parser) {
                Some(expr) => expr,
                None => return abandon(parser, operand_base),
            };
            parser.expect(TokenKind::Colon);
            parser
                .operators
                .push(StackOp::Conditional(then_expr, position));
            continue;
        }

        match BINARY_LOOKUP.get(&kind) {
            Some(op) => {
                let op = *op;
                let position = parser.advance().position;
                drain(parser, precedence(op));
                parser.operators.push(StackOp::Binary(op, position));
            }
            None => break,
        }
    }

    while !matches!(parser.operators.last(), Some(StackOp::Sentinel) | None) {
        reduce(parser);
    }
    parser.operators.pop();

    let result = parser.operands.pop();
    parser.operands.truncate(operand_base);
    result
}

/// Reduces every stacked operator that binds at least as tightly as the
/// incoming one. Operators of equal precedence are only reduced when the
/// level is left-associative.
fn drain(parser: &mut Parser, incoming: Precedence) {
    while let Some(top) = parser.operators.last() {
        let top = top.precedence();
        if top == Precedence::Sentinel {
            break;
        }
        if top > incoming || (top == incoming && !incoming.is_right_associative()) {
            reduce(parser);
        } else {
            break;
        }
    }
}

/// Pops one operator and combines the operands it applies to.
fn reduce(parser: &mut Parser) {
    let Some(op) = parser.operators.pop() else {
        return;
    };

    match op {
        StackOp::Binary(op, position) => {
            let (Some(right), Some(left)) = (parser.operands.pop(), parser.operands.pop()) else {
                return;
            };
            parser
                .operands
                .push(Expr::binary(op, left, right, position));
        }
        StackOp::Conditional(then_expr, position) => {
            let (Some(else_expr), Some(condition)) =
                (parser.operands.pop(), parser.operands.pop())
            else {
                return;
            };
            parser.operands.push(Expr::new(
                ExprKind::Conditional {
                    condition: Box::new(condition),
                    then_expr: Box::new(then_expr),
                    else_expr: Box::new(else_expr),
                },
                position,
            ));
        }
        StackOp::Sentinel => parser.operators.push(StackOp::Sentinel),
    }
}

/// Discards the stacks of a failed expression down to its sentinel and
/// returns the most recent operand, if any.
fn abandon(parser: &mut Parser, operand_base: usize) -> Option<Expr> {
    while let Some(op) = parser.operators.pop() {
        if matches!(op, StackOp::Sentinel) {
            break;
        }
    }

    let partial = if parser.operands.len() > operand_base {
        parser.operands.pop()
    } else {
        None
    };
    parser.operands.truncate(operand_base);
    partial
}

/// Parses one operand: a prefix form, a cast or a primary expression
/// followed by any postfix operators.
fn parse_operand(parser: &mut Parser) -> Option<Expr> {
    let kind = parser.peek().kind;

    if let Some(op) = PREFIX_LOOKUP.get(&kind) {
        let op = *op;
        let position = parser.advance().position;
        let operand = parse_operand(parser)?;
        return Some(Expr::unary(op, operand, position));
    }

    match kind {
        TokenKind::Sizeof => parse_sizeof(parser),
        TokenKind::OpenParen if parser.peek_at(1).kind.is_type_keyword() => parse_cast(parser),
        _ => {
            let primary = parse_primary(parser)?;
            parse_postfix(parser, primary)
        }
    }
}

fn parse_primary(parser: &mut Parser) -> Option<Expr> {
    let token = parser.peek().clone();

    let kind = match token.kind {
        TokenKind::Number => ExprKind::Number(parse_integer(parser, &token)),
        TokenKind::FloatNumber => match token.value.parse::<f64>() {
            Ok(value) => ExprKind::Float(value),
            Err(_) => {
                parser.error(Error::new(
                    ErrorImpl::NumberParseError {
                        token: token.value.clone(),
                    },
                    token.position.clone(),
                ));
                ExprKind::Float(0.0)
            }
        },
        TokenKind::Character => match token.value.as_bytes() {
            [byte] => ExprKind::Char(*byte),
            _ => {
                parser.error(Error::new(
                    ErrorImpl::CharacterOutOfRange {
                        token: token.value.clone(),
                    },
                    token.position.clone(),
                ));
                ExprKind::Char(0)
            }
        },
        TokenKind::String => ExprKind::Str(token.value.clone()),
        TokenKind::True => ExprKind::Bool(true),
        TokenKind::False => ExprKind::Bool(false),
        TokenKind::Identifier => ExprKind::Symbol(token.value.clone()),
        TokenKind::OpenParen => {
            parser.advance();
            let inner = parse_expr(parser)?;
            parser.expect(TokenKind::CloseParen);
            return Some(inner);
        }
        _ => {
            parser.error(Error::new(
                ErrorImpl::ExpectedOperand {
                    found: token.describe(),
                },
                token.position.clone(),
            ));
            return None;
        }
    };

    parser.advance();
    Some(Expr::new(kind, token.position))
}

/// Value of a decimal, octal (`0` prefix) or hexadecimal (`0x` prefix)
/// literal.
pub(crate) fn integer_value(text: &str) -> Result<i64, ParseIntError> {
    if let Some(hex) = text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
    {
        i64::from_str_radix(hex, 16)
    } else if text.len() > 1 && text.starts_with('0') {
        i64::from_str_radix(&text[1..], 8)
    } else {
        text.parse::<i64>()
    }
}

/// Out-of-range literals are reported and read as zero.
fn parse_integer(parser: &mut Parser, token: &Token) -> i64 {
    match integer_value(&token.value) {
        Ok(value) => value,
        Err(_) => {
            parser.error(Error::new(
                ErrorImpl::NumberParseError {
                    token: token.value.clone(),
                },
                token.position.clone(),
            ));
            0
        }
    }
}

/// `sizeof(type)` or `sizeof operand`.
fn parse_sizeof(parser: &mut Parser) -> Option<Expr> {
    let position = parser.advance().position;

    if parser.is_next(TokenKind::OpenParen) && parser.peek_at(1).kind.is_type_keyword() {
        parser.advance();
        let data_type = parse_type_specifier(parser)?;
        parser.expect(TokenKind::CloseParen);
        return Some(Expr::new(ExprKind::SizeofType(data_type), position));
    }

    let operand = parse_operand(parser)?;
    Some(Expr::unary(UnaryOp::Sizeof, operand, position))
}

/// `(type) operand`
fn parse_cast(parser: &mut Parser) -> Option<Expr> {
    let position = parser.advance().position;
    let target = parse_type_specifier(parser)?;
    parser.expect(TokenKind::CloseParen)?;
    let operand = parse_operand(parser)?;

    Some(Expr::new(
        ExprKind::Cast {
            target,
            operand: Box::new(operand),
        },
        position,
    ))
}

/// Calls, subscripts, member access and postfix `++`/`--`.
fn parse_postfix(parser: &mut Parser, mut expr: Expr) -> Option<Expr> {
    loop {
        let kind = parser.peek().kind;

        expr = match kind {
            TokenKind::OpenParen => {
                let position = parser.advance().position;
                let args = if parser.accept(TokenKind::CloseParen) {
                    None
                } else {
                    let args = parse_expr(parser)?;
                    parser.expect(TokenKind::CloseParen);
                    Some(Box::new(args))
                };
                Expr::new(
                    ExprKind::Call {
                        callee: Box::new(expr),
                        args,
                    },
                    position,
                )
            }
            TokenKind::OpenBracket => {
                let position = parser.advance().position;
                let index = parse_expr(parser)?;
                parser.expect(TokenKind::CloseBracket);
                Expr::binary(BinaryOp::Subscript, expr, index, position)
            }
            TokenKind::Dot | TokenKind::Arrow => {
                let op = if kind == TokenKind::Dot {
                    BinaryOp::Member
                } else {
                    BinaryOp::PointerMember
                };
                let position = parser.advance().position;
                let member = parser.expect(TokenKind::Identifier)?;
                let member = Expr::new(ExprKind::Symbol(member.value), member.position);
                Expr::binary(op, expr, member, position)
            }
            TokenKind::PlusPlus => {
                let position = parser.advance().position;
                Expr::unary(UnaryOp::PostIncrement, expr, position)
            }
            TokenKind::MinusMinus => {
                let position = parser.advance().position;
                Expr::unary(UnaryOp::PostDecrement, expr, position)
            }
            _ => return Some(expr),
        };
    }
}
