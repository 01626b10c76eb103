use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

/// Tag identifying why an evaluation failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Incomplete,
    InvalidNumber,
    DivisionByZero,
    IntegerModuloOnly,
    AmbiguousModulo,
    UnmatchedParenthesis,
    UnexpectedToken,
    TooDeep,
    TooLong,
}

/// Errors produced while evaluating an expression.
///
/// The `Display` text is the short message a calculator shows. Spans are
/// byte ranges into the evaluated input.
#[derive(Diagnostic, Debug, Error, Clone, PartialEq)]
pub enum EvalError {
    #[error("Incomplete")]
    #[diagnostic(code(calc::incomplete), help("an operand is missing at the end of the input"))]
    Incomplete {
        #[label("operand expected here")]
        at: SourceSpan,
    },

    #[error("Invalid Number")]
    #[diagnostic(code(calc::invalid_number))]
    InvalidNumber {
        literal: String,
        #[label("this numeric literal")]
        at: SourceSpan,
    },

    #[error("Div by Zero")]
    #[diagnostic(code(calc::division_by_zero))]
    DivisionByZero {
        #[label("divisor is zero")]
        at: SourceSpan,
    },

    #[error("Int Mod Only")]
    #[diagnostic(code(calc::integer_modulo), help("both operands of % must be whole numbers"))]
    IntegerModuloOnly {
        #[label("non-integer operand")]
        at: SourceSpan,
    },

    #[error("Ambiguous")]
    #[diagnostic(code(calc::ambiguous_modulo), help("use parentheses to group chained % operations"))]
    AmbiguousModulo {
        #[label("second % at the same level")]
        at: SourceSpan,
    },

    #[error("Missing ')'")]
    #[diagnostic(code(calc::unmatched_paren))]
    UnmatchedParenthesis {
        #[label("this '(' is never closed")]
        open: SourceSpan,
    },

    #[error("Unexpected: {found}")]
    #[diagnostic(code(calc::unexpected_token))]
    UnexpectedToken {
        found: char,
        #[label("this input character")]
        at: SourceSpan,
    },

    #[error("Too Deep")]
    #[diagnostic(code(calc::too_deep), help("nesting is limited to {limit} levels"))]
    TooDeep {
        limit: usize,
        #[label("limit reached here")]
        at: SourceSpan,
    },

    #[error("Too Long")]
    #[diagnostic(code(calc::too_long), help("input has {len} characters, the limit is {limit}"))]
    TooLong { limit: usize, len: usize },
}

impl EvalError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            EvalError::Incomplete { .. } => ErrorKind::Incomplete,
            EvalError::InvalidNumber { .. } => ErrorKind::InvalidNumber,
            EvalError::DivisionByZero { .. } => ErrorKind::DivisionByZero,
            EvalError::IntegerModuloOnly { .. } => ErrorKind::IntegerModuloOnly,
            EvalError::AmbiguousModulo { .. } => ErrorKind::AmbiguousModulo,
            EvalError::UnmatchedParenthesis { .. } => ErrorKind::UnmatchedParenthesis,
            EvalError::UnexpectedToken { .. } => ErrorKind::UnexpectedToken,
            EvalError::TooDeep { .. } => ErrorKind::TooDeep,
            EvalError::TooLong { .. } => ErrorKind::TooLong,
        }
    }

    /// Byte range the error points at, if any.
    pub fn span(&self) -> Option<SourceSpan> {
        match self {
            EvalError::Incomplete { at }
            | EvalError::InvalidNumber { at, .. }
            | EvalError::DivisionByZero { at }
            | EvalError::IntegerModuloOnly { at }
            | EvalError::AmbiguousModulo { at }
            | EvalError::UnexpectedToken { at, .. }
            | EvalError::TooDeep { at, .. } => Some(*at),
            EvalError::UnmatchedParenthesis { open } => Some(*open),
            EvalError::TooLong { .. } => None,
        }
    }

    /// Wraps the error in a report that renders `source` under its label.
    pub fn with_source(self, source: &str) -> miette::Report {
        miette::Report::new(self).with_source_code(source.to_string())
    }
}
