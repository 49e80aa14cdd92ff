//! Diagnostics reported by the static checker.

use bang_parser::Node;
use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum CheckDiagnostic {
    #[error("UNDECLARED VARIABLE {name}")]
    #[diagnostic(
        code(bang::check::undeclared_variable),
        severity(Warning),
        help("Bind `{name}` with `let` before this use")
    )]
    UndeclaredVariable {
        name: String,
        line: usize,
        #[label("used before any `let`")]
        span: SourceSpan,
    },
}

impl CheckDiagnostic {
    /// Create an undeclared variable diagnostic for an identifier node
    pub fn undeclared_variable(name: &str, node: &Node) -> Self {
        Self::UndeclaredVariable {
            name: name.to_string(),
            line: node.line,
            span: node.span.into(),
        }
    }

    pub fn line(&self) -> usize {
        match self {
            Self::UndeclaredVariable { line, .. } => *line,
        }
    }
}
