use std::fmt::Display;

use thiserror::Error;

use crate::Position;

/// The compilation phase a diagnostic belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Lexical,
    Syntax,
    Semantic,
}

#[derive(Debug, Clone)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_internal_error(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn kind(&self) -> ErrorKind {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => ErrorKind::Lexical,
            ErrorImpl::UnexpectedToken { .. }
            | ErrorImpl::ExpectedOperand { .. }
            | ErrorImpl::ExpectedTypeSpecifier { .. }
            | ErrorImpl::NumberParseError { .. }
            | ErrorImpl::CharacterOutOfRange { .. } => ErrorKind::Syntax,
            _ => ErrorKind::Semantic,
        }
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => "UnrecognisedToken",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::ExpectedOperand { .. } => "ExpectedOperand",
            ErrorImpl::ExpectedTypeSpecifier { .. } => "ExpectedTypeSpecifier",
            ErrorImpl::NumberParseError { .. } => "NumberParseError",
            ErrorImpl::CharacterOutOfRange { .. } => "CharacterOutOfRange",
            ErrorImpl::SymbolNotDeclared { .. } => "SymbolNotDeclared",
            ErrorImpl::SymbolAlreadyDeclared { .. } => "SymbolAlreadyDeclared",
            ErrorImpl::ConflictingDeclaration { .. } => "ConflictingDeclaration",
            ErrorImpl::FunctionNotFound { .. } => "FunctionNotFound",
            ErrorImpl::NotAFunction { .. } => "NotAFunction",
            ErrorImpl::MissingArguments { .. } => "MissingArguments",
            ErrorImpl::ArgumentTypeMatchError { .. } => "ArgumentTypeMatchError",
            ErrorImpl::OperandTypeError { .. } => "OperandTypeError",
            ErrorImpl::TypeMatchError { .. } => "TypeMatchError",
            ErrorImpl::InitializerTypeMatchError { .. } => "InitializerTypeMatchError",
            ErrorImpl::ReturnTypeMatchError { .. } => "ReturnTypeMatchError",
            ErrorImpl::NoNestedType { .. } => "NoNestedType",
            ErrorImpl::MemberAccessUnsupported { .. } => "MemberAccessUnsupported",
            ErrorImpl::JumpOutsideLoop { .. } => "JumpOutsideLoop",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnexpectedToken { expected, .. } if expected == "';'" => {
                ErrorTip::Suggestion(String::from("did you miss a semicolon?"))
            }
            ErrorImpl::NumberParseError { token } => ErrorTip::Suggestion(format!(
                "Invalid number: `{}`, is it above the integer limit?",
                token
            )),
            ErrorImpl::CharacterOutOfRange { .. } => {
                ErrorTip::Suggestion(String::from("use a string literal instead"))
            }
            ErrorImpl::SymbolNotDeclared { symbol } => ErrorTip::Suggestion(format!(
                "declare `{}` before its first use",
                symbol
            )),
            ErrorImpl::FunctionNotFound { function } => ErrorTip::Suggestion(format!(
                "add a prototype for `{}` at module scope",
                function
            )),
            ErrorImpl::MemberAccessUnsupported { .. } => {
                ErrorTip::Suggestion(String::from("structs are not supported"))
            }
            _ => ErrorTip::None,
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self.kind() {
            ErrorKind::Syntax => "parsing error",
            ErrorKind::Lexical | ErrorKind::Semantic => "error",
        };
        write!(f, "{}: {}: {}", self.position, label, self.internal_error)
    }
}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    // Lexical
    #[error("unrecognised character '{token}'")]
    UnrecognisedToken { token: String },

    // Syntax
    #[error("expected {expected}, but found {found}")]
    UnexpectedToken { expected: String, found: String },
    #[error("expected '(', unary operator, or terminal, but found {found}")]
    ExpectedOperand { found: String },
    #[error("expected type specifier, but found {found}")]
    ExpectedTypeSpecifier { found: String },
    #[error("invalid numeric literal '{token}'")]
    NumberParseError { token: String },
    #[error("character literal '{token}' does not fit in a char")]
    CharacterOutOfRange { token: String },

    // Semantic
    #[error("symbol '{symbol}' not declared")]
    SymbolNotDeclared { symbol: String },
    #[error("redefinition of '{symbol}'")]
    SymbolAlreadyDeclared { symbol: String },
    #[error("conflicting declaration of '{symbol}': previously '{previous}', now '{current}'")]
    ConflictingDeclaration {
        symbol: String,
        previous: String,
        current: String,
    },
    #[error("called function '{function}' not found")]
    FunctionNotFound { function: String },
    #[error("called object '{symbol}' is not a function")]
    NotAFunction { symbol: String },
    #[error("function '{function}' requires {expected} arguments, but only {received} was/were given")]
    MissingArguments {
        function: String,
        expected: usize,
        received: usize,
    },
    #[error("argument {index} of '{function}' is declared as '{expected}', but '{received}' was given")]
    ArgumentTypeMatchError {
        function: String,
        index: usize,
        expected: String,
        received: String,
    },
    #[error("operator '{operator}' requires {requirement} operand, but '{received}' was given")]
    OperandTypeError {
        operator: String,
        requirement: String,
        received: String,
    },
    #[error("operands of '{operator}' have different types '{left}' and '{right}'")]
    TypeMatchError {
        operator: String,
        left: String,
        right: String,
    },
    #[error("cannot initialize '{variable}' of type '{expected}' with a value of type '{received}'")]
    InitializerTypeMatchError {
        variable: String,
        expected: String,
        received: String,
    },
    #[error("function '{function}' returns '{expected}', but the returned value has type '{received}'")]
    ReturnTypeMatchError {
        function: String,
        expected: String,
        received: String,
    },
    #[error("'{operator}' needs a pointer or array operand, but '{type_}' was given")]
    NoNestedType { operator: String, type_: String },
    #[error("member access '{operator}' is not supported on type '{type_}'")]
    MemberAccessUnsupported { operator: String, type_: String },
    #[error("'{statement}' statement not in loop")]
    JumpOutsideLoop { statement: String },
}

/// Collects every diagnostic recorded during one compilation.
///
/// All phases report through this sink; the number of recorded errors is the
/// only success signal handed back to the driver.
#[derive(Debug, Default)]
pub struct Diagnostics {
    errors: Vec<Error>,
    echo: bool,
}

impl Diagnostics {
    pub fn new(echo: bool) -> Self {
        Diagnostics {
            errors: vec![],
            echo,
        }
    }

    pub fn report(&mut self, error: Error) {
        if self.echo {
            eprintln!("{}", error);
        }
        self.errors.push(error);
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn errors(&self) -> &[Error] {
        &self.errors
    }

    pub fn count_kind(&self, kind: ErrorKind) -> usize {
        self.errors.iter().filter(|e| e.kind() == kind).count()
    }
}
