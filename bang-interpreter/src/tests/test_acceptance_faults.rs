//! Acceptance tests for fatal runtime errors

use super::{assert_fault, run};
use crate::{RunStatus, Session, Value};

#[test]
fn test_divide_by_zero_aborts_without_output() {
    assert_fault("print 1 / 0;", 1, "Divide by zero error", "");
}

#[test]
fn test_fault_reports_operator_line() {
    assert_fault("print 1;\nprint 2 +\n  3 / 0;", 3, "Divide by zero error", "1");
}

#[test]
fn test_fault_stops_remaining_statements() {
    assert_fault(
        "print \"a\"; print 1 / 0; print \"b\";",
        1,
        "Divide by zero error",
        "a",
    );
}

#[test]
fn test_overflow_faults() {
    assert_fault(
        "print 9223372036854775807 + 1;",
        1,
        "Integer overflow on operands of +",
        "",
    );
}

#[test]
fn test_bindings_survive_a_fault() {
    let mut session = Session::default();
    let outcome = session.run("let a = 7;\nprint a / 0;").unwrap();
    assert!(matches!(outcome.status(), RunStatus::Faulted(_)));
    assert_eq!(session.symbols().lookup("a"), Some(&Value::Integer(7)));
}

#[test]
fn test_uninitialized_identifier_in_permissive_run() {
    let outcome = super::run_with(crate::RunConfig::permissive(), "print 1;\nprint x;");
    assert_eq!(outcome.output, "1");
    let fault = outcome.status().fault().expect("Expected a fault");
    assert_eq!(fault.to_string(), "RUNTIME ERROR at 2: Uninitialized identifier");
    assert_eq!(fault.line(), Some(2));
}

#[test]
fn test_fault_message_accessor() {
    let outcome = run("print !(1 / 0);");
    let fault = outcome.status().fault().expect("Expected a fault");
    assert_eq!(fault.message(), Some("Divide by zero error"));
    assert!(!fault.is_silent());
}
