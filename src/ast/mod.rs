/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the AST structure
///
/// Submodules:
/// - ast: Module, function and parameter definitions
/// - expressions: Expression nodes and operators
/// - statements: Statement nodes and variable declarations
/// - types: The `DataType` model
pub mod ast;
pub mod expressions;
pub mod statements;
pub mod types;

#[cfg(test)]
mod tests;
