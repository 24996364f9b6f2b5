#![allow(clippy::module_inception)]

use std::{rc::Rc, time::Duration, time::Instant};

use crate::{
    ast::ast::Module,
    config::{CompileOptions, Target},
    errors::errors::{Diagnostics, Error, ErrorTip},
    lexer::{
        lexer::{check_unknown_tokens, tokenize},
        tokens::Token,
    },
    parser::parser::parse,
    type_checker::type_checker::type_check,
};

pub mod ast;
pub mod config;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;
pub mod type_checker;

extern crate regex;

/// A source location: 1-based line number and the file it belongs to.
#[derive(Debug, Clone)]
pub struct Position(pub u32, pub Rc<String>);

impl Position {
    pub fn null() -> Self {
        Position(0, Rc::new(String::from("<null>")))
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.1, self.0)
    }
}

/// Everything produced by compiling one source buffer. Tokens and the AST
/// live exactly as long as the unit.
#[derive(Debug)]
pub struct CompilationUnit {
    pub file: Rc<String>,
    pub tokens: Vec<Token>,
    pub module: Module,
    pub diagnostics: Diagnostics,
    /// Number of source lines
    pub lines: u32,
    pub target: Target,
    /// Wall-clock time of every phase that ran, in order
    pub timings: Vec<(&'static str, Duration)>,
}

impl CompilationUnit {
    pub fn succeeded(&self) -> bool {
        !self.diagnostics.has_errors()
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics.error_count()
    }

    /// Bytes occupied by all global variables on the unit's target.
    /// Saturates at `usize::MAX`.
    pub fn global_data_size(&self) -> usize {
        self.module
            .globals
            .iter()
            .map(|global| global.data_type.size_of(&self.target))
            .fold(0, usize::saturating_add)
    }
}

/// Runs the front end over `source`: lexing, the unknown-character sweep,
/// parsing and semantic analysis. A phase only runs when no diagnostic was
/// recorded by the phases before it.
pub fn compile(source: &str, file: &str, options: &CompileOptions) -> CompilationUnit {
    let mut diagnostics = Diagnostics::new(options.echo_diagnostics);
    let mut timings = vec![];

    let start = Instant::now();
    let (tokens, lines) = tokenize(source, Some(file.to_string()));
    let clean = check_unknown_tokens(&tokens, &mut diagnostics);
    timings.push(("Tokenized", start.elapsed()));

    let mut module = Module::default();
    if clean {
        let start = Instant::now();
        module = parse(&tokens, &mut diagnostics, options);
        timings.push(("Parsed", start.elapsed()));

        if !diagnostics.has_errors() {
            let start = Instant::now();
            type_check(&module, &mut diagnostics);
            timings.push(("Type checked", start.elapsed()));
        }
    }

    CompilationUnit {
        file: Rc::new(file.to_string()),
        tokens,
        module,
        diagnostics,
        lines,
        target: options.target,
        timings,
    }
}

/// Returns line `line` (1-based) of `source` without its line terminator.
pub fn get_line_at_position(source: &str, line: u32) -> Option<&str> {
    if line == 0 {
        return None;
    }
    source
        .split('\n')
        .nth(line as usize - 1)
        .map(|text| text.trim_end_matches('\r'))
}

/// Renders a diagnostic with the offending source line:
///
/// ```text
/// test.c:2: error: called function 'foo' not found
///   |
/// 2 | foo(1, 2);
///   |
///   = FunctionNotFound: add a prototype for `foo` at module scope
/// ```
pub fn display_error(error: &Error, source: &str) -> String {
    let position = error.get_position();
    let line_string = position.0.to_string();
    let padding = line_string.len() + 2;

    let mut output = format!("{}\n", error);

    if let Some(line_text) = get_line_at_position(source, position.0) {
        output.push_str(&format!("{:>padding$}\n", "|"));
        output.push_str(&format!("{} | {}\n", line_string, line_text.trim()));
        output.push_str(&format!("{:>padding$}\n", "|"));
    }

    match error.get_tip() {
        ErrorTip::None => output.push_str(&format!(
            "{:>padding$} {}\n",
            "=",
            error.get_error_name()
        )),
        tip => output.push_str(&format!(
            "{:>padding$} {}: {}\n",
            "=",
            error.get_error_name(),
            tip
        )),
    }

    output
}

#[cfg(test)]
mod tests {
    use crate::{compile, config::CompileOptions, display_error, get_line_at_position};

    #[test]
    fn test_get_line_at_position() {
        let source = "int a;\r\nint b;\n\nint c;";

        assert_eq!(get_line_at_position(source, 1), Some("int a;"));
        assert_eq!(get_line_at_position(source, 2), Some("int b;"));
        assert_eq!(get_line_at_position(source, 3), Some(""));
        assert_eq!(get_line_at_position(source, 4), Some("int c;"));
        assert_eq!(get_line_at_position(source, 5), None);
        assert_eq!(get_line_at_position(source, 0), None);
    }

    #[test]
    fn test_display_error() {
        let source = "int main() {\n    foo(1, 2);\n    return 0;\n}";
        let unit = compile(source, "test.c", &CompileOptions::default());

        let rendered = display_error(&unit.diagnostics.errors()[0], source);
        assert_eq!(
            rendered,
            "test.c:2: error: called function 'foo' not found\n  |\n2 | foo(1, 2);\n  |\n  = FunctionNotFound: add a prototype for `foo` at module scope\n"
        );
    }
}
