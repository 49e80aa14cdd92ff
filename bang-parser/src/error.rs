// Bang Parser Error Handling
// Lexical and syntax errors with miette integration

use crate::token::{Token, TokenKind};
use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

/// Main parse error type. Any error aborts the whole parse.
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("Error on line {line} ({lexeme})")]
    #[diagnostic(
        code(bang::parse::lexical),
        help("Only letters, digits, string literals and + - * / ! = ( ) ; are allowed; strings must close on the line they open")
    )]
    Lexical {
        line: usize,
        lexeme: String,
        #[label("malformed token")]
        span: SourceSpan,
    },

    #[error("Error on line {line} ({found}): expected {expected}")]
    #[diagnostic(code(bang::parse::unexpected_token), help("Expected {expected}"))]
    UnexpectedToken {
        line: usize,
        expected: String,
        found: String,
        #[label("found this")]
        span: SourceSpan,
    },

    #[error("Error on line {line} (end of input): expected {expected}")]
    #[diagnostic(
        code(bang::parse::unexpected_end),
        help("The program ended early; check for a missing `end` or operand")
    )]
    UnexpectedEnd {
        line: usize,
        expected: String,
        #[label("input ends here")]
        span: SourceSpan,
    },
}

impl ParseError {
    /// Create a lexical error from an `Error` token
    pub fn lexical(token: &Token) -> Self {
        ParseError::Lexical {
            line: token.line,
            lexeme: token.lexeme.clone(),
            span: token.span.into(),
        }
    }

    /// Create the error for `token` appearing where `expected` was required
    pub fn unexpected(token: &Token, expected: impl Into<String>) -> Self {
        let expected = expected.into();
        match token.kind {
            TokenKind::Error => Self::lexical(token),
            TokenKind::EndOfInput => ParseError::UnexpectedEnd {
                line: token.line,
                expected,
                span: token.span.into(),
            },
            _ => ParseError::UnexpectedToken {
                line: token.line,
                expected,
                found: token.lexeme.clone(),
                span: token.span.into(),
            },
        }
    }

    pub fn line(&self) -> usize {
        match self {
            ParseError::Lexical { line, .. }
            | ParseError::UnexpectedToken { line, .. }
            | ParseError::UnexpectedEnd { line, .. } => *line,
        }
    }
}

/// Result type for parsing operations
pub type ParseResult<T> = Result<T, ParseError>;
