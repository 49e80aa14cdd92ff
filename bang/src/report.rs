//! Diagnostics, runtime faults and statistics on stderr

use crate::source::SourceFile;
use bang_checker::TreeStats;
use bang_interpreter::{RunReport, RunStatus};
use miette::{Diagnostic, Report};
use std::process::ExitCode;

/// Process exit status of a CLI command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    Success = 0,
    /// Lexical or syntax error, or the program could not be read
    ParseError = 1,
    UndeclaredVariables = 2,
    RuntimeFault = 3,
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        ExitCode::from(status as u8)
    }
}

impl From<&RunStatus> for ExitStatus {
    fn from(status: &RunStatus) -> Self {
        match status {
            RunStatus::Completed => ExitStatus::Success,
            RunStatus::UndeclaredVariables(_) => ExitStatus::UndeclaredVariables,
            RunStatus::Faulted(_) => ExitStatus::RuntimeFault,
        }
    }
}

/// Writes user-facing errors either as miette reports or, in plain mode,
/// as their one-line messages
#[derive(Debug, Clone, Copy, Default)]
pub struct Reporter {
    plain: bool,
}

impl Reporter {
    pub fn new(plain: bool) -> Self {
        Self { plain }
    }

    pub fn emit<D>(&self, diagnostic: D, source: Option<&SourceFile>)
    where
        D: Diagnostic + Send + Sync + 'static,
    {
        if self.plain {
            eprintln!("{diagnostic}");
            return;
        }

        let report = Report::new(diagnostic);
        let report = match source {
            Some(source) => report.with_source_code(source.named_source()),
            None => report,
        };
        eprintln!("{report:?}");
    }

    pub fn stats(&self, stats: &TreeStats) {
        eprintln!("BANG COUNT: {}", stats.bang_count);
        eprintln!("MAX DEPTH: {}", stats.max_depth);
    }

    /// Report everything a run produced besides its output
    pub fn run_report(&self, report: RunReport, source: &SourceFile) -> ExitStatus {
        let status = ExitStatus::from(&report.status);

        for diagnostic in report.diagnostics {
            self.emit(diagnostic, Some(source));
        }
        if let Some(stats) = &report.stats {
            self.stats(stats);
        }
        match report.status {
            RunStatus::Completed => {}
            RunStatus::UndeclaredVariables(count) => {
                eprintln!("Not running {}: {count} undeclared variable use(s)", source.name);
            }
            RunStatus::Faulted(fault) if fault.is_silent() => {}
            RunStatus::Faulted(fault) => self.emit(fault, Some(source)),
        }
        status
    }
}
