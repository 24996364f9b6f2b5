//! Error types and diagnostic collection for the front end.
//!
//! This module defines:
//!
//! - Error structures with source position information
//! - One error variant per diagnostic the lexer, parser and analyzer can emit
//! - The `Diagnostics` sink shared by every phase of a compilation

pub mod errors;

#[cfg(test)]
mod tests;
