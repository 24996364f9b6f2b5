//! Parser state and the token cursor.
//!
//! One `Parser` is created per compilation unit. It owns every piece of
//! mutable parsing state: the cursor position, the operand/operator stacks of
//! the expression parser and a handle to the diagnostics sink. Nothing is
//! shared between two parsers, so independent files can be parsed side by
//! side.

use crate::{
    ast::{ast::Module, expressions::Expr},
    config::CompileOptions,
    errors::errors::{Diagnostics, Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind},
    Position,
};

use super::{lookups::StackOp, stmt::parse_declaration};

/// The main parser structure that maintains parsing state.
pub struct Parser<'a> {
    /// The list of tokens to parse
    tokens: &'a [Token],
    /// Current position in the token stream
    pos: usize,
    /// Returned by lookahead past the last token
    eof: Token,
    diagnostics: &'a mut Diagnostics,
    /// Set once this parser has recorded a diagnostic
    errored: bool,
    trace: bool,
    /// Operand stack of the expression parser
    pub(crate) operands: Vec<Expr>,
    /// Operator stack of the expression parser
    pub(crate) operators: Vec<StackOp>,
}

impl<'a> Parser<'a> {
    /// Creates a new Parser instance.
    ///
    /// # Arguments
    ///
    /// * `tokens` - Tokens to parse, normally terminated by an EOF token
    /// * `diagnostics` - Sink receiving every syntax error
    /// * `trace` - Print each token as it is consumed
    pub fn new(tokens: &'a [Token], diagnostics: &'a mut Diagnostics, trace: bool) -> Self {
        let position = tokens
            .last()
            .map(|t| t.position.clone())
            .unwrap_or_else(Position::null);

        Parser {
            tokens,
            pos: 0,
            eof: Token {
                kind: TokenKind::EOF,
                value: String::from("EOF"),
                position,
            },
            diagnostics,
            errored: false,
            trace,
            operands: vec![],
            operators: vec![],
        }
    }

    /// Returns the current token without advancing.
    pub fn peek(&self) -> &Token {
        self.peek_at(0)
    }

    /// Returns the token `k` positions ahead; EOF once past the end.
    pub fn peek_at(&self, k: usize) -> &Token {
        self.tokens.get(self.pos + k).unwrap_or(&self.eof)
    }

    pub fn is_next(&self, kind: TokenKind) -> bool {
        self.peek().kind == kind
    }

    pub fn is_next_at(&self, k: usize, kind: TokenKind) -> bool {
        self.peek_at(k).kind == kind
    }

    /// Consumes the current token and returns it. The cursor never moves
    /// past the end of the stream.
    pub fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if self.trace {
            token.debug();
        }
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
        token
    }

    /// Consumes the current token only if it has the given kind.
    pub fn accept(&mut self, kind: TokenKind) -> bool {
        if self.is_next(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consumes a token of the given kind, or records a syntax error and
    /// leaves the cursor where it is.
    pub fn expect(&mut self, kind: TokenKind) -> Option<Token> {
        if self.is_next(kind) {
            return Some(self.advance());
        }

        let token = self.peek();
        let error = Error::new(
            ErrorImpl::UnexpectedToken {
                expected: kind.describe(),
                found: token.describe(),
            },
            token.position.clone(),
        );
        self.error(error);
        None
    }

    /// Records a syntax error.
    pub fn error(&mut self, error: Error) {
        self.errored = true;
        self.diagnostics.report(error);
    }

    /// Whether this parser has recorded any diagnostic.
    pub fn has_errors(&self) -> bool {
        self.errored
    }

    /// Index of the current token.
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Returns the source position of the current token.
    pub fn get_position(&self) -> Position {
        self.peek().position.clone()
    }
}

/// Parses a stream of tokens into a [`Module`].
///
/// Top-level declarations are parsed until EOF or until the first syntax
/// error; declarations after an error are never admitted. Statements inside
/// a function body keep going after an error, so one malformed construct can
/// produce several diagnostics.
pub fn parse(tokens: &[Token], diagnostics: &mut Diagnostics, options: &CompileOptions) -> Module {
    let mut parser = Parser::new(tokens, diagnostics, options.trace_tokens);
    let mut module = Module::default();

    while !parser.is_next(TokenKind::EOF) && !parser.has_errors() {
        parse_declaration(&mut parser, &mut module);
    }

    module
}
