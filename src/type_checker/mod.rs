//! Type checking and semantic analysis module.
//!
//! This module performs semantic analysis on the parsed AST:
//!
//! - Resolving every name against a chain of module, function and block scopes
//! - Deriving the type of every expression and recording it on the node
//! - Checking operator operand types, call arguments, initializers and returns
//! - Rejecting `break`/`continue` outside loops
//!
//! Diagnostics are collected, never thrown; a type that cannot be derived is
//! reported once and then treated as `unknown` so the walk can continue.

pub mod scope;
pub mod type_checker;
