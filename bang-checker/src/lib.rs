//! Static checks over a parsed Bang program
//!
//! The checker runs between parsing and evaluation. It never stops evaluation
//! by itself: it reports findings and leaves the abort policy to the caller.

pub mod checker;
pub mod error;
pub mod stats;
pub mod visitor;

pub use checker::{check_let_before_use, CheckReport, LetBeforeUseChecker};
pub use error::CheckDiagnostic;
pub use stats::{bang_count, max_depth, TreeStats};
pub use visitor::{walk_node, Visitor};
