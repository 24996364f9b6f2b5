use std::collections::HashMap;

use lazy_static::lazy_static;

use crate::{
    ast::{
        expressions::{BinaryOp, Expr, UnaryOp},
        statements::Stmt,
    },
    lexer::tokens::TokenKind,
    Position,
};

use super::{parser::Parser, stmt::*};

/// Operator precedence, lowest first.
#[derive(PartialEq, PartialOrd, Clone, Copy, Debug)]
pub enum Precedence {
    Sentinel,
    Comma,
    Assignment,
    Conditional,
    LogicalOr,
    LogicalAnd,
    BitwiseXor,
    BitwiseOr,
    BitwiseAnd,
    Equality,
    Relational,
    Shift,
    Additive,
    Multiplicative,
    Unary,
    Postfix,
}

impl Precedence {
    /// Right-associative levels are not drained by an incoming operator of
    /// the same level.
    pub fn is_right_associative(&self) -> bool {
        matches!(
            self,
            Precedence::Comma | Precedence::Assignment | Precedence::Conditional
        )
    }
}

pub fn precedence(op: BinaryOp) -> Precedence {
    match op {
        BinaryOp::Subscript | BinaryOp::Member | BinaryOp::PointerMember => Precedence::Postfix,
        BinaryOp::Multiply | BinaryOp::Divide | BinaryOp::Modulo => Precedence::Multiplicative,
        BinaryOp::Add | BinaryOp::Subtract => Precedence::Additive,
        BinaryOp::ShiftLeft | BinaryOp::ShiftRight => Precedence::Shift,
        BinaryOp::Less | BinaryOp::LessEquals | BinaryOp::Greater | BinaryOp::GreaterEquals => {
            Precedence::Relational
        }
        BinaryOp::Equals | BinaryOp::NotEquals => Precedence::Equality,
        BinaryOp::BitwiseAnd => Precedence::BitwiseAnd,
        BinaryOp::BitwiseOr => Precedence::BitwiseOr,
        BinaryOp::BitwiseXor => Precedence::BitwiseXor,
        BinaryOp::LogicalAnd => Precedence::LogicalAnd,
        BinaryOp::LogicalOr => Precedence::LogicalOr,
        BinaryOp::Comma => Precedence::Comma,
        _ => Precedence::Assignment,
    }
}

/// An entry on the expression parser's operator stack.
#[derive(Debug)]
pub enum StackOp {
    /// Bottom marker of one (sub-)expression
    Sentinel,
    Binary(BinaryOp, Position),
    /// `?` with its already parsed middle operand
    Conditional(Expr, Position),
}

impl StackOp {
    pub fn precedence(&self) -> Precedence {
        match self {
            StackOp::Sentinel => Precedence::Sentinel,
            StackOp::Binary(op, _) => precedence(*op),
            StackOp::Conditional(..) => Precedence::Conditional,
        }
    }
}

pub type StmtHandler = fn(&mut Parser) -> Option<Stmt>;

lazy_static! {
    /// Infix operators that may follow an operand.
    pub static ref BINARY_LOOKUP: HashMap<TokenKind, BinaryOp> = {
        let mut map = HashMap::new();
        map.insert(TokenKind::Star, BinaryOp::Multiply);
        map.insert(TokenKind::Slash, BinaryOp::Divide);
        map.insert(TokenKind::Percent, BinaryOp::Modulo);
        map.insert(TokenKind::Plus, BinaryOp::Add);
        map.insert(TokenKind::Dash, BinaryOp::Subtract);
        map.insert(TokenKind::ShiftLeft, BinaryOp::ShiftLeft);
        map.insert(TokenKind::ShiftRight, BinaryOp::ShiftRight);
        map.insert(TokenKind::Less, BinaryOp::Less);
        map.insert(TokenKind::LessEquals, BinaryOp::LessEquals);
        map.insert(TokenKind::Greater, BinaryOp::Greater);
        map.insert(TokenKind::GreaterEquals, BinaryOp::GreaterEquals);
        map.insert(TokenKind::Equals, BinaryOp::Equals);
        map.insert(TokenKind::NotEquals, BinaryOp::NotEquals);
        map.insert(TokenKind::Ampersand, BinaryOp::BitwiseAnd);
        map.insert(TokenKind::Pipe, BinaryOp::BitwiseOr);
        map.insert(TokenKind::Caret, BinaryOp::BitwiseXor);
        map.insert(TokenKind::And, BinaryOp::LogicalAnd);
        map.insert(TokenKind::Or, BinaryOp::LogicalOr);
        map.insert(TokenKind::Assignment, BinaryOp::Assign);
        map.insert(TokenKind::PlusEquals, BinaryOp::AddAssign);
        map.insert(TokenKind::MinusEquals, BinaryOp::SubtractAssign);
        map.insert(TokenKind::StarEquals, BinaryOp::MultiplyAssign);
        map.insert(TokenKind::SlashEquals, BinaryOp::DivideAssign);
        map.insert(TokenKind::PercentEquals, BinaryOp::ModuloAssign);
        map.insert(TokenKind::AmpersandEquals, BinaryOp::AndAssign);
        map.insert(TokenKind::PipeEquals, BinaryOp::OrAssign);
        map.insert(TokenKind::CaretEquals, BinaryOp::XorAssign);
        map.insert(TokenKind::ShiftLeftEquals, BinaryOp::ShiftLeftAssign);
        map.insert(TokenKind::ShiftRightEquals, BinaryOp::ShiftRightAssign);
        map.insert(TokenKind::Comma, BinaryOp::Comma);
        map
    };

    /// Prefix operators that may start an operand.
    pub static ref PREFIX_LOOKUP: HashMap<TokenKind, UnaryOp> = {
        let mut map = HashMap::new();
        map.insert(TokenKind::Dash, UnaryOp::Negate);
        map.insert(TokenKind::Plus, UnaryOp::Plus);
        map.insert(TokenKind::Not, UnaryOp::LogicalNot);
        map.insert(TokenKind::Tilde, UnaryOp::BitwiseNot);
        map.insert(TokenKind::PlusPlus, UnaryOp::PreIncrement);
        map.insert(TokenKind::MinusMinus, UnaryOp::PreDecrement);
        map.insert(TokenKind::Ampersand, UnaryOp::AddressOf);
        map.insert(TokenKind::Star, UnaryOp::Dereference);
        map
    };

    /// Statement parsers keyed by their leading token. Anything else is an
    /// expression statement.
    pub static ref STMT_LOOKUP: HashMap<TokenKind, StmtHandler> = {
        let mut map: HashMap<TokenKind, StmtHandler> = HashMap::new();
        map.insert(TokenKind::Int, parse_var_decl_stmt);
        map.insert(TokenKind::Float, parse_var_decl_stmt);
        map.insert(TokenKind::Char, parse_var_decl_stmt);
        map.insert(TokenKind::Bool, parse_var_decl_stmt);
        map.insert(TokenKind::Void, parse_var_decl_stmt);
        map.insert(TokenKind::OpenCurly, parse_block_stmt);
        map.insert(TokenKind::If, parse_if_stmt);
        map.insert(TokenKind::While, parse_while_stmt);
        map.insert(TokenKind::Return, parse_return_stmt);
        map.insert(TokenKind::Continue, parse_jump_stmt);
        map.insert(TokenKind::Break, parse_jump_stmt);
        map.insert(TokenKind::Semicolon, parse_empty_stmt);
        map
    };
}
