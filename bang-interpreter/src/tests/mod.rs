//! Acceptance tests for the Bang interpreter
//!
//! These run whole programs through the parser → checker → evaluator
//! pipeline and assert on printed output and run status.

pub mod test_acceptance_faults;

use crate::{RunConfig, RunOutcome, RunStatus, Session};

/// Run `source` with the default configuration, panicking on parse errors
pub fn run(source: &str) -> RunOutcome {
    run_with(RunConfig::default(), source)
}

pub fn run_with(config: RunConfig, source: &str) -> RunOutcome {
    Session::new(config)
        .run(source)
        .unwrap_or_else(|error| panic!("Failed to parse {source:?}: {error}"))
}

/// Assert `source` completes and prints exactly `expected`
pub fn assert_prints(source: &str, expected: &str) {
    let outcome = run(source);
    assert!(
        outcome.status().is_success(),
        "Expected {source:?} to complete, got {:?}",
        outcome.status()
    );
    assert_eq!(outcome.output, expected, "output of {source:?}");
}

/// Assert `source` stops with `RUNTIME ERROR at <line>: <message>` after printing `output`
pub fn assert_fault(source: &str, line: usize, message: &str, output: &str) {
    let outcome = run(source);
    match outcome.status() {
        RunStatus::Faulted(fault) => {
            assert_eq!(
                fault.to_string(),
                format!("RUNTIME ERROR at {line}: {message}"),
                "fault of {source:?}"
            );
        }
        other => panic!("Expected {source:?} to fault, got {other:?}"),
    }
    assert_eq!(outcome.output, output, "output of {source:?}");
}
