//! Bang Interpreter
//!
//! Tree-walking evaluation of parsed Bang programs over a tagged
//! [`Value`] type and a flat [`SymbolTable`]. [`Session`] wires the parser,
//! the static checker and the evaluator together; [`evaluate`] is the
//! one-shot entry point.

pub mod config;
pub mod error;
pub mod evaluator;
pub mod session;
pub mod symbols;
pub mod value;

// Include tests directory with all test modules
#[cfg(test)]
#[path = "tests/mod.rs"]
pub mod tests;

// Re-export public API
pub use config::RunConfig;
pub use error::RuntimeFault;
pub use evaluator::Evaluator;
pub use session::{RunOutcome, RunReport, RunStatus, Session};
pub use symbols::SymbolTable;
pub use value::Value;

/// Parse, check and evaluate `source` with the default [`RunConfig`]
pub fn evaluate(source: &str) -> Result<RunOutcome, bang_parser::ParseError> {
    Session::new(RunConfig::default()).run(source)
}
