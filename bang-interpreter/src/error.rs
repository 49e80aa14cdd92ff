//! Runtime error types for the Bang interpreter.
//!
//! Error *values* are ordinary data (see [`crate::Value::Error`]). A
//! [`RuntimeFault`] is what an error value becomes once a node that treats
//! errors as fatal consumes it: it unwinds the whole evaluation.

use bang_parser::Node;
use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum RuntimeFault {
    #[error("RUNTIME ERROR at {line}: {message}")]
    #[diagnostic(code(bang::runtime::fatal))]
    Fatal {
        line: usize,
        message: String,
        #[label("{message}")]
        span: SourceSpan,
    },

    /// Unwind caused by an error value with no message; never shown to the user
    #[error("evaluation stopped at line {line}")]
    #[diagnostic(code(bang::runtime::silent))]
    Silent { line: usize },

    #[error("Failed to write program output: {source}")]
    #[diagnostic(code(bang::runtime::output))]
    Output {
        #[from]
        source: std::io::Error,
    },
}

impl RuntimeFault {
    /// Fault raised at `node` with `message`; an empty message gives the silent unwind
    pub fn at(node: &Node, message: impl Into<String>) -> Self {
        let message = message.into();
        if message.is_empty() {
            Self::Silent { line: node.line }
        } else {
            Self::Fatal {
                line: node.line,
                message,
                span: node.span.into(),
            }
        }
    }

    pub fn is_silent(&self) -> bool {
        matches!(self, Self::Silent { .. })
    }

    pub fn line(&self) -> Option<usize> {
        match self {
            Self::Fatal { line, .. } | Self::Silent { line } => Some(*line),
            Self::Output { .. } => None,
        }
    }

    /// The message of a fatal fault
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Fatal { message, .. } => Some(message),
            _ => None,
        }
    }
}

/// Type alias for evaluation results
pub type Result<T> = std::result::Result<T, RuntimeFault>;
