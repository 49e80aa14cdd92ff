//! REPL (Read-Eval-Print Loop) for Bang
//!
//! Every entry goes through the same parse → check → evaluate pipeline as a
//! file run, against one [`Session`] whose bindings persist between entries.
//! Features:
//! - Multi-line entries while `begin`/`end` are unbalanced
//! - `/help`, `/vars`, `/clear`, `/stats` and `/quit` commands
//! - Line editing and history with rustyline

use crate::report::Reporter;
use crate::source::SourceFile;
use bang_interpreter::{RunConfig, RunReport, Session, Value};
use bang_parser::{Lexer, ParseError, TokenKind};
use miette::Diagnostic;
use rustyline::{DefaultEditor, error::ReadlineError};
use thiserror::Error;
use tracing::debug;

const SOURCE_NAME: &str = "<repl>";

/// Errors that can occur in the REPL
#[derive(Debug, Error, Diagnostic)]
pub enum ReplError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Parse {
        #[from]
        source: ParseError,
    },

    #[error("Readline error: {source}")]
    #[diagnostic(code(bang::repl::readline))]
    Readline {
        #[from]
        source: ReadlineError,
    },

    #[error("Unknown command: {command}. Type /help for available commands.")]
    #[diagnostic(code(bang::repl::command))]
    Command { command: String },
}

/// REPL configuration options
#[derive(Debug, Clone)]
pub struct ReplConfig {
    pub prompt: String,
    pub persist_history: bool,
    pub history_file: Option<String>,
    pub run: RunConfig,
}

impl Default for ReplConfig {
    fn default() -> Self {
        Self {
            prompt: "bang> ".to_string(),
            persist_history: true,
            history_file: Some(".bang_history".to_string()),
            run: RunConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ReplStats {
    pub entries_evaluated: usize,
    pub errors_encountered: usize,
    pub commands_executed: usize,
}

/// Result of evaluating one entry
#[derive(Debug)]
pub enum ReplResult {
    /// The entry ran; `output` is everything it printed
    Ran { output: String, report: RunReport },
    Command { message: String },
    /// Blank line or comment
    Empty,
    Exit,
}

/// Evaluation state of a REPL, independent of the terminal
pub struct ReplState {
    session: Session,
    stats: ReplStats,
}

impl ReplState {
    pub fn new(config: RunConfig) -> Self {
        Self {
            session: Session::new(config),
            stats: ReplStats::default(),
        }
    }

    pub fn stats(&self) -> &ReplStats {
        &self.stats
    }

    /// Evaluate one (possibly multi-line) entry
    pub fn evaluate_line(&mut self, line: &str) -> Result<ReplResult, ReplError> {
        let trimmed = line.trim();

        if trimmed.starts_with('/') && !trimmed.starts_with("//") {
            return self.execute_command(trimmed);
        }

        if Lexer::new(trimmed).next_token().is(TokenKind::EndOfInput) {
            return Ok(ReplResult::Empty);
        }

        let outcome = self.session.run(line)?;
        self.stats.entries_evaluated += 1;
        debug!(
            bindings = self.session.symbols().len(),
            success = outcome.status().is_success(),
            "evaluated entry"
        );
        Ok(ReplResult::Ran {
            output: outcome.output,
            report: outcome.report,
        })
    }

    fn execute_command(&mut self, command: &str) -> Result<ReplResult, ReplError> {
        self.stats.commands_executed += 1;

        let name = command.split_whitespace().next().unwrap_or(command);
        match name {
            "/help" | "/h" => Ok(ReplResult::Command {
                message: help_message(),
            }),

            "/vars" | "/variables" => Ok(ReplResult::Command {
                message: self.format_variables(),
            }),

            "/clear" => {
                self.session.reset();
                Ok(ReplResult::Command {
                    message: "Variables cleared".to_string(),
                })
            }

            "/stats" => Ok(ReplResult::Command {
                message: self.format_stats(),
            }),

            "/quit" | "/q" | "/exit" => Ok(ReplResult::Exit),

            unknown => Err(ReplError::Command {
                command: unknown.to_string(),
            }),
        }
    }

    fn format_variables(&self) -> String {
        let symbols = self.session.symbols();
        if symbols.is_empty() {
            return "No variables defined".to_string();
        }

        let mut lines = vec!["Variables:".to_string()];
        for (name, value) in symbols.sorted() {
            lines.push(format!("  {name} = {}", describe(value)));
        }
        lines.join("\n")
    }

    fn format_stats(&self) -> String {
        let stats = self.stats();
        format!(
            "Session Statistics:\n  Entries evaluated: {}\n  Errors encountered: {}\n  Commands executed: {}",
            stats.entries_evaluated, stats.errors_encountered, stats.commands_executed
        )
    }
}

/// Interactive session: a line editor around a [`ReplState`]
pub struct ReplSession {
    editor: DefaultEditor,
    state: ReplState,
    config: ReplConfig,
    reporter: Reporter,
}

impl ReplSession {
    pub fn with_config(config: ReplConfig, reporter: Reporter) -> Result<Self, ReplError> {
        let mut editor = DefaultEditor::new()?;

        if config.persist_history {
            if let Some(history_file) = &config.history_file {
                // Missing on first use
                let _ = editor.load_history(history_file);
            }
        }

        Ok(Self {
            editor,
            state: ReplState::new(config.run),
            config,
            reporter,
        })
    }

    /// Start the REPL main loop
    pub fn run(&mut self) -> Result<(), ReplError> {
        println!("Bang REPL v{}", env!("CARGO_PKG_VERSION"));
        println!("Type /help for commands, /quit to exit");
        println!();

        while let Some(entry) = self.read_entry()? {
            match self.state.evaluate_line(&entry) {
                Ok(ReplResult::Exit) => break,
                Ok(result) => self.display_result(result, &entry),
                Err(error) => {
                    self.state.stats.errors_encountered += 1;
                    self.display_error(error, &entry);
                }
            }
        }

        println!("Goodbye!");
        self.save_history()
    }

    /// Read one entry, continuing over several lines while it is incomplete
    fn read_entry(&mut self) -> Result<Option<String>, ReplError> {
        let mut entry = String::new();

        loop {
            let prompt = if entry.is_empty() {
                self.config.prompt.as_str()
            } else {
                "...   "
            };

            match self.editor.readline(prompt) {
                Ok(line) => {
                    if entry.is_empty() && line.trim().is_empty() {
                        return Ok(Some(String::new()));
                    }
                    if !entry.is_empty() {
                        entry.push('\n');
                    }
                    entry.push_str(&line);

                    if is_input_complete(&entry) {
                        self.editor.add_history_entry(entry.as_str())?;
                        return Ok(Some(entry));
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    // Abandon the current entry
                    println!("^C");
                    return Ok(Some(String::new()));
                }
                Err(ReadlineError::Eof) => return Ok(None),
                Err(source) => return Err(ReplError::Readline { source }),
            }
        }
    }

    fn display_result(&mut self, result: ReplResult, entry: &str) {
        match result {
            ReplResult::Ran { output, report } => {
                if output.ends_with('\n') {
                    print!("{output}");
                } else if !output.is_empty() {
                    println!("{output}");
                }
                if !report.status.is_success() {
                    self.state.stats.errors_encountered += 1;
                }
                self.reporter
                    .run_report(report, &SourceFile::new(SOURCE_NAME, entry));
            }
            ReplResult::Command { message } => println!("{message}"),
            ReplResult::Empty | ReplResult::Exit => {}
        }
    }

    fn display_error(&self, error: ReplError, entry: &str) {
        match error {
            ReplError::Parse { source } => self
                .reporter
                .emit(source, Some(&SourceFile::new(SOURCE_NAME, entry))),
            error => eprintln!("{error}"),
        }
    }

    fn save_history(&mut self) -> Result<(), ReplError> {
        if self.config.persist_history {
            if let Some(history_file) = &self.config.history_file {
                self.editor.save_history(history_file)?;
            }
        }
        Ok(())
    }
}

/// An entry is complete once every `begin` has its `end`. Lexical errors
/// count as complete so the parser can report them.
pub fn is_input_complete(input: &str) -> bool {
    let mut depth: i64 = 0;
    for token in Lexer::new(input) {
        match token.kind {
            TokenKind::Begin => depth += 1,
            TokenKind::End => depth -= 1,
            TokenKind::Error => return true,
            _ => {}
        }
    }
    depth <= 0
}

fn describe(value: &Value) -> String {
    match value {
        Value::Integer(n) => n.to_string(),
        Value::String(s) => format!("{s:?}"),
        Value::Error(message) if message.is_empty() => "<error>".to_string(),
        Value::Error(message) => format!("<error: {message}>"),
    }
}

fn help_message() -> String {
    r#"Bang REPL Commands:
  /help, /h           Show this help message
  /vars, /variables   List all variables with their values
  /clear              Forget all variables
  /stats              Show session statistics
  /quit, /q, /exit    Exit the REPL

Examples:
  let x = 42          Bind a variable
  print x * 2         Print a value
  print !"olleh"      Reverse a string

Multi-line input:
  loop x begin        A continuation prompt appears
    print x;          until every `begin` has its `end`
    let x = x - 1
  end

Use Ctrl+C to abandon an entry, Ctrl+D to exit."#
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use bang_interpreter::RunStatus;
    use pretty_assertions::assert_eq;

    fn create_test_repl() -> ReplState {
        ReplState::new(RunConfig::default())
    }

    fn output_of(result: ReplResult) -> String {
        match result {
            ReplResult::Ran { output, .. } => output,
            other => panic!("Expected a run, got {other:?}"),
        }
    }

    fn message_of(result: ReplResult) -> String {
        match result {
            ReplResult::Command { message } => message,
            other => panic!("Expected command result, got {other:?}"),
        }
    }

    #[test]
    fn test_print_evaluation() {
        let mut repl = create_test_repl();
        let result = repl.evaluate_line("print 6 * 7").unwrap();
        assert_eq!(output_of(result), "42");
        assert_eq!(repl.stats().entries_evaluated, 1);
    }

    #[test]
    fn test_bindings_persist_between_entries() {
        let mut repl = create_test_repl();
        repl.evaluate_line("let greeting = \"hi\"").unwrap();
        let result = repl.evaluate_line("print greeting + \"!\"").unwrap();
        assert_eq!(output_of(result), "hi!");
    }

    #[test]
    fn test_empty_line_handling() {
        let mut repl = create_test_repl();
        for line in ["", "   ", "// comment", "  // indented comment\n"] {
            assert!(matches!(
                repl.evaluate_line(line).unwrap(),
                ReplResult::Empty
            ));
        }
        assert_eq!(repl.stats().entries_evaluated, 0);
    }

    #[test]
    fn test_help_command() {
        let mut repl = create_test_repl();
        let message = message_of(repl.evaluate_line("/help").unwrap());
        assert!(message.contains("Bang REPL Commands"));
        assert!(message.contains("/vars"));
        assert!(message.contains("/quit"));
        assert_eq!(repl.stats().commands_executed, 1);
    }

    #[test]
    fn test_vars_command() {
        let mut repl = create_test_repl();
        assert_eq!(
            message_of(repl.evaluate_line("/vars").unwrap()),
            "No variables defined"
        );

        repl.evaluate_line("let b = \"two\"; let a = 1").unwrap();
        assert_eq!(
            message_of(repl.evaluate_line("/vars").unwrap()),
            "Variables:\n  a = 1\n  b = \"two\""
        );
    }

    #[test]
    fn test_clear_command() {
        let mut repl = create_test_repl();
        repl.evaluate_line("let x = 1").unwrap();
        message_of(repl.evaluate_line("/clear").unwrap());

        match repl.evaluate_line("print x").unwrap() {
            ReplResult::Ran { report, .. } => {
                assert!(matches!(report.status, RunStatus::UndeclaredVariables(1)));
            }
            other => panic!("Expected a run, got {other:?}"),
        }
    }

    #[test]
    fn test_quit_command() {
        let mut repl = create_test_repl();
        assert!(matches!(
            repl.evaluate_line("/quit").unwrap(),
            ReplResult::Exit
        ));
        assert!(matches!(repl.evaluate_line("/q").unwrap(), ReplResult::Exit));
    }

    #[test]
    fn test_unknown_command() {
        let mut repl = create_test_repl();
        let error = repl.evaluate_line("/frobnicate now").unwrap_err();
        assert_eq!(
            error.to_string(),
            "Unknown command: /frobnicate. Type /help for available commands."
        );
    }

    #[test]
    fn test_parse_errors_are_returned() {
        let mut repl = create_test_repl();
        let error = repl.evaluate_line("print (1 + 2").unwrap_err();
        assert!(matches!(error, ReplError::Parse { .. }));
        assert_eq!(
            error.to_string(),
            "Error on line 1 (end of input): expected `)`"
        );
    }

    #[test]
    fn test_fault_keeps_partial_output() {
        let mut repl = create_test_repl();
        match repl.evaluate_line("print 1; print 1 / 0").unwrap() {
            ReplResult::Ran { output, report } => {
                assert_eq!(output, "1");
                assert!(report.status.fault().is_some());
            }
            other => panic!("Expected a run, got {other:?}"),
        }
    }

    #[test]
    fn test_input_completeness() {
        assert!(is_input_complete("print 1"));
        assert!(!is_input_complete("loop x begin"));
        assert!(!is_input_complete("if 1 begin\n  if 2 begin print 2 end"));
        assert!(is_input_complete("if 1 begin\n  if 2 begin print 2 end\nend"));
        assert!(is_input_complete("if 1 begin print \"oops"));
        // `begin` inside a string or comment does not count
        assert!(is_input_complete("print \"begin\" // begin"));
    }

    #[test]
    fn test_describe_values() {
        assert_eq!(describe(&Value::Integer(-3)), "-3");
        assert_eq!(describe(&Value::from("a\nb")), "\"a\\nb\"");
        assert_eq!(describe(&Value::silent()), "<error>");
        assert_eq!(
            describe(&Value::error("Uninitialized identifier")),
            "<error: Uninitialized identifier>"
        );
    }
}
