//! Use-before-declaration check
//!
//! Every identifier use must be preceded, in traversal order, by a `let`
//! of the same name. The `let` target is declared only after its
//! initializer has been visited, so `let x = x` reports `x`.

use crate::error::CheckDiagnostic;
use crate::visitor::Visitor;
use bang_parser::Node;
use indexmap::IndexMap;
use tracing::debug;

/// Findings of one check run, in traversal order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CheckReport {
    pub diagnostics: Vec<CheckDiagnostic>,
}

impl CheckReport {
    /// Number of offending use-sites
    pub fn count(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

#[derive(Debug, Default)]
pub struct LetBeforeUseChecker {
    /// Declared name -> line of its first `let`
    declared: IndexMap<String, usize>,
    diagnostics: Vec<CheckDiagnostic>,
}

impl LetBeforeUseChecker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with names bound by earlier runs (REPL sessions)
    pub fn with_declared<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            declared: names.into_iter().map(|name| (name.to_string(), 0)).collect(),
            diagnostics: Vec::new(),
        }
    }

    pub fn check(mut self, program: &Node) -> CheckReport {
        self.visit_node(program);
        CheckReport {
            diagnostics: self.diagnostics,
        }
    }

    /// Names declared so far with the line of their first `let` (0 when predeclared)
    pub fn declared(&self) -> &IndexMap<String, usize> {
        &self.declared
    }
}

impl Visitor for LetBeforeUseChecker {
    fn visit_let(&mut self, identifier: &str, node: &Node) {
        self.declared
            .entry(identifier.to_string())
            .or_insert(node.line);
    }

    fn visit_identifier(&mut self, name: &str, node: &Node) {
        if !self.declared.contains_key(name) {
            debug!(name, line = node.line, "undeclared variable");
            self.diagnostics
                .push(CheckDiagnostic::undeclared_variable(name, node));
        }
    }
}

/// Check a program with an empty declaration set
pub fn check_let_before_use(program: &Node) -> CheckReport {
    LetBeforeUseChecker::new().check(program)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bang_parser::parse_program;
    use pretty_assertions::assert_eq;

    fn undeclared(input: &str) -> Vec<String> {
        let program = parse_program(input).unwrap();
        check_let_before_use(&program)
            .diagnostics
            .iter()
            .map(ToString::to_string)
            .collect()
    }

    #[test]
    fn test_declared_before_use_is_clean() {
        assert!(undeclared("let x = 5; print x;").is_empty());
    }

    #[test]
    fn test_use_before_let() {
        assert_eq!(
            undeclared("print x; let x = 1; print x;"),
            vec!["UNDECLARED VARIABLE x"]
        );
    }

    #[test]
    fn test_one_diagnostic_per_use_site() {
        assert_eq!(
            undeclared("print a + a * b;"),
            vec![
                "UNDECLARED VARIABLE a",
                "UNDECLARED VARIABLE a",
                "UNDECLARED VARIABLE b",
            ]
        );
    }

    #[test]
    fn test_let_target_not_visible_to_own_initializer() {
        assert_eq!(undeclared("let x = x + 1;"), vec!["UNDECLARED VARIABLE x"]);
    }

    #[test]
    fn test_declarations_inside_blocks_count() {
        assert!(undeclared("if 1 begin let y = 2; end; print y;").is_empty());
    }

    #[test]
    fn test_loop_condition_visited_before_body() {
        // The condition is the left child, so it is checked before the body's `let`
        assert_eq!(
            undeclared("loop n begin let n = 0; end;"),
            vec!["UNDECLARED VARIABLE n"]
        );
    }

    #[test]
    fn test_diagnostic_lines() {
        let program = parse_program("let a = 1;\nprint a;\nprint b;").unwrap();
        let report = check_let_before_use(&program);
        assert_eq!(report.count(), 1);
        assert_eq!(report.diagnostics[0].line(), 3);
    }

    #[test]
    fn test_predeclared_names() {
        let program = parse_program("print x + y;").unwrap();
        let report = LetBeforeUseChecker::with_declared(["x"]).check(&program);
        assert_eq!(
            report.diagnostics.iter().map(ToString::to_string).collect::<Vec<_>>(),
            vec!["UNDECLARED VARIABLE y"]
        );
    }

    #[test]
    fn test_first_let_line_is_kept() {
        let program = parse_program("let a = 1;\nlet b = 2;\nlet a = 3;").unwrap();
        let mut checker = LetBeforeUseChecker::new();
        checker.visit_node(&program);
        let declared: Vec<(&str, usize)> = checker
            .declared()
            .iter()
            .map(|(name, line)| (name.as_str(), *line))
            .collect();
        assert_eq!(declared, vec![("a", 1), ("b", 2)]);
    }
}
