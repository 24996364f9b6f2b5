//! Parser module for building an Abstract Syntax Tree (AST).
//!
//! This module turns the token stream into a [`Module`](crate::ast::ast::Module):
//!
//! - Declarations: globals, function prototypes and definitions
//! - Statements: blocks, locals, `if`/`else`, `while`, `return`, jumps
//! - Expressions: operator precedence over explicit operand/operator stacks
//! - Type specifiers: base keyword, pointer stars and array extents
//!
//! Syntax errors are reported to the diagnostics sink. Inside a block the
//! parser keeps going after an error; at the top level it stops at the first
//! one.

pub mod expr;
pub mod lookups;
pub mod parser;
pub mod stmt;
pub mod types;

#[cfg(test)]
mod tests;
