use crate::{
    ast::{
        ast::{Function, Module, Parameter},
        expressions::Expr,
        statements::{Stmt, StmtKind, VarDecl},
        types::DataType,
    },
    lexer::tokens::{Token, TokenKind},
    Position,
};

use super::{
    expr::parse_expr,
    lookups::STMT_LOOKUP,
    parser::Parser,
    types::{parse_array_suffix, parse_type_specifier},
};

/// Parses one top-level declaration (a global variable, a function
/// prototype or a function definition) and adds it to `module`.
pub fn parse_declaration(parser: &mut Parser, module: &mut Module) {
    let position = parser.get_position();

    let Some(data_type) = parse_type_specifier(parser) else {
        return;
    };
    let Some(name) = parser.expect(TokenKind::Identifier) else {
        return;
    };

    if parser.accept(TokenKind::OpenParen) {
        if let Some(function) = parse_function(parser, data_type, name, position) {
            module.functions.push(function);
        }
    } else {
        module
            .globals
            .push(parse_var_decl(parser, data_type, name, position));
    }
}

/// Everything after `type name (`.
fn parse_function(
    parser: &mut Parser,
    return_type: DataType,
    name: Token,
    position: Position,
) -> Option<Function> {
    let parameters = parse_parameters(parser)?;

    let body = if parser.accept(TokenKind::Semicolon) {
        None
    } else {
        parser.expect(TokenKind::OpenCurly)?;
        Some(parse_block(parser))
    };

    Some(Function {
        name: name.value,
        return_type,
        parameters,
        body,
        position,
    })
}

/// Parameter list up to and including the closing `)`. `(void)` and `()`
/// both declare no parameters.
fn parse_parameters(parser: &mut Parser) -> Option<Vec<Parameter>> {
    let mut parameters = vec![];

    if parser.is_next(TokenKind::Void) && parser.is_next_at(1, TokenKind::CloseParen) {
        parser.advance();
    }
    if parser.accept(TokenKind::CloseParen) {
        return Some(parameters);
    }

    loop {
        let position = parser.get_position();
        let data_type = parse_type_specifier(parser)?;
        let name = parser.expect(TokenKind::Identifier)?;
        let data_type = parse_array_suffix(parser, data_type);

        parameters.push(Parameter {
            name: name.value,
            data_type,
            position,
        });

        if !parser.accept(TokenKind::Comma) {
            break;
        }
    }

    parser.expect(TokenKind::CloseParen)?;
    Some(parameters)
}

/// Everything after `type name` in a variable declaration.
fn parse_var_decl(
    parser: &mut Parser,
    data_type: DataType,
    name: Token,
    position: Position,
) -> VarDecl {
    let data_type = parse_array_suffix(parser, data_type);

    let initializer = if parser.accept(TokenKind::Assignment) {
        parse_expr(parser)
    } else {
        None
    };
    parser.expect(TokenKind::Semicolon);

    VarDecl {
        name: name.value,
        data_type,
        initializer,
        position,
    }
}

/// Parses statements up to the closing `}`. The opening `{` must already
/// have been consumed.
pub fn parse_block(parser: &mut Parser) -> Vec<Stmt> {
    let mut body = vec![];

    while !parser.is_next(TokenKind::CloseCurly) && !parser.is_next(TokenKind::EOF) {
        let start = parser.pos();

        if let Some(stmt) = parse_stmt(parser) {
            body.push(stmt);
        }

        // always make progress
        if parser.pos() == start {
            parser.advance();
        }
    }

    parser.expect(TokenKind::CloseCurly);
    body
}

pub fn parse_stmt(parser: &mut Parser) -> Option<Stmt> {
    if let Some(handler) = STMT_LOOKUP.get(&parser.peek().kind) {
        return handler(parser);
    }

    let position = parser.get_position();
    let expr = parse_expr(parser)?;
    parser.expect(TokenKind::Semicolon);

    Some(Stmt::new(StmtKind::Expression(expr), position))
}

/// A braced block, or a single statement, as the body of `if`/`while`.
fn parse_body(parser: &mut Parser) -> Vec<Stmt> {
    if parser.accept(TokenKind::OpenCurly) {
        parse_block(parser)
    } else {
        parse_stmt(parser).into_iter().collect()
    }
}

/// `( expr )` after `if` or `while`.
fn parse_condition(parser: &mut Parser) -> Option<Expr> {
    parser.expect(TokenKind::OpenParen)?;
    let condition = parse_expr(parser);
    parser.expect(TokenKind::CloseParen);
    condition
}

pub fn parse_var_decl_stmt(parser: &mut Parser) -> Option<Stmt> {
    let position = parser.get_position();
    let data_type = parse_type_specifier(parser)?;
    let name = parser.expect(TokenKind::Identifier)?;
    let decl = parse_var_decl(parser, data_type, name, position.clone());

    Some(Stmt::new(StmtKind::VarDecl(decl), position))
}

pub fn parse_block_stmt(parser: &mut Parser) -> Option<Stmt> {
    let position = parser.advance().position;
    let body = parse_block(parser);

    Some(Stmt::new(StmtKind::Block(body), position))
}

pub fn parse_if_stmt(parser: &mut Parser) -> Option<Stmt> {
    let position = parser.advance().position;
    let condition = parse_condition(parser);
    let body = parse_body(parser);
    let else_body = if parser.accept(TokenKind::Else) {
        Some(parse_body(parser))
    } else {
        None
    };

    Some(Stmt::new(
        StmtKind::If {
            condition: condition?,
            body,
            else_body,
        },
        position,
    ))
}

pub fn parse_while_stmt(parser: &mut Parser) -> Option<Stmt> {
    let position = parser.advance().position;
    let condition = parse_condition(parser);
    let body = parse_body(parser);

    Some(Stmt::new(
        StmtKind::While {
            condition: condition?,
            body,
        },
        position,
    ))
}

pub fn parse_return_stmt(parser: &mut Parser) -> Option<Stmt> {
    let position = parser.advance().position;
    let value = if parser.is_next(TokenKind::Semicolon) {
        None
    } else {
        Some(parse_expr(parser)?)
    };
    parser.expect(TokenKind::Semicolon);

    Some(Stmt::new(StmtKind::Return(value), position))
}

/// `break;` and `continue;`
pub fn parse_jump_stmt(parser: &mut Parser) -> Option<Stmt> {
    let token = parser.advance();
    parser.expect(TokenKind::Semicolon);

    let kind = if token.kind == TokenKind::Break {
        StmtKind::Break
    } else {
        StmtKind::Continue
    };
    Some(Stmt::new(kind, token.position))
}

/// A lone `;` produces no statement.
pub fn parse_empty_stmt(parser: &mut Parser) -> Option<Stmt> {
    parser.advance();
    None
}
