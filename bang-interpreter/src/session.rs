//! Interpreter session: parse, check, then evaluate
//!
//! A session owns the symbol table, so consecutive runs (REPL lines) see
//! earlier bindings. The static check honours [`RunConfig::abort_on_undeclared`]:
//! when set, any undeclared use stops the run before evaluation.

use crate::config::RunConfig;
use crate::error::RuntimeFault;
use crate::evaluator::Evaluator;
use crate::symbols::SymbolTable;
use bang_checker::{CheckDiagnostic, LetBeforeUseChecker, TreeStats};
use bang_parser::{ParseError, parse_program};
use std::io::Write;
use std::time::Instant;
use tracing::{debug, info};

/// How a run ended
#[derive(Debug)]
pub enum RunStatus {
    /// Evaluation ran to completion
    Completed,
    /// The checker found this many undeclared uses and evaluation was skipped
    UndeclaredVariables(usize),
    /// Evaluation stopped at a fatal runtime error
    Faulted(RuntimeFault),
}

impl RunStatus {
    pub fn is_success(&self) -> bool {
        matches!(self, RunStatus::Completed)
    }

    pub fn fault(&self) -> Option<&RuntimeFault> {
        match self {
            RunStatus::Faulted(fault) => Some(fault),
            _ => None,
        }
    }
}

/// Everything a run reports besides printed output
#[derive(Debug)]
pub struct RunReport {
    /// Checker findings in traversal order (also present when evaluation went ahead)
    pub diagnostics: Vec<CheckDiagnostic>,
    pub status: RunStatus,
    /// Present when [`RunConfig::report_stats`] is set
    pub stats: Option<TreeStats>,
}

/// A run with its printed output captured
#[derive(Debug)]
pub struct RunOutcome {
    pub output: String,
    pub report: RunReport,
}

impl RunOutcome {
    pub fn status(&self) -> &RunStatus {
        &self.report.status
    }

    /// Checker findings as their printed lines
    pub fn diagnostic_lines(&self) -> Vec<String> {
        self.report
            .diagnostics
            .iter()
            .map(ToString::to_string)
            .collect()
    }
}

#[derive(Debug, Default)]
pub struct Session {
    config: RunConfig,
    symbols: SymbolTable,
}

impl Session {
    pub fn new(config: RunConfig) -> Self {
        Self {
            config,
            symbols: SymbolTable::new(),
        }
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    /// Forget all bindings
    pub fn reset(&mut self) {
        self.symbols.clear();
    }

    /// Run `source`, capturing printed output
    pub fn run(&mut self, source: &str) -> Result<RunOutcome, ParseError> {
        let mut output = Vec::new();
        let report = self.run_with_output(source, &mut output)?;
        Ok(RunOutcome {
            output: String::from_utf8_lossy(&output).into_owned(),
            report,
        })
    }

    /// Run `source`, writing printed output to `output` as it is produced.
    /// Lexical and syntax errors abort before anything is checked or evaluated.
    pub fn run_with_output<W: Write>(
        &mut self,
        source: &str,
        output: W,
    ) -> Result<RunReport, ParseError> {
        let started = Instant::now();
        let program = parse_program(source)?;
        debug!(elapsed = ?started.elapsed(), "parse finished");

        let stats = self
            .config
            .report_stats
            .then(|| TreeStats::collect(&program));

        let check = LetBeforeUseChecker::with_declared(self.symbols.names()).check(&program);
        debug!(undeclared = check.count(), "check finished");

        if !check.is_clean() && self.config.abort_on_undeclared {
            info!(
                undeclared = check.count(),
                "skipping evaluation after failed check"
            );
            return Ok(RunReport {
                status: RunStatus::UndeclaredVariables(check.count()),
                diagnostics: check.diagnostics,
                stats,
            });
        }

        let mut evaluator = Evaluator::new(output);
        let result = evaluator
            .evaluate(&program, &mut self.symbols)
            .and_then(|_| evaluator.flush());
        let status = match result {
            Ok(()) => RunStatus::Completed,
            Err(fault) => RunStatus::Faulted(fault),
        };
        debug!(elapsed = ?started.elapsed(), success = status.is_success(), "run finished");

        Ok(RunReport {
            diagnostics: check.diagnostics,
            status,
            stats,
        })
    }
}
