use bang_checker::{TreeStats, check_let_before_use};
use bang_interpreter::{RunConfig, Session};
use bang_parser::parse_program;
use clap::{Args, Parser, Subcommand};
use miette::MietteHandlerOpts;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

mod repl;
mod report;
mod sexpr;
mod source;

use repl::{ReplConfig, ReplSession};
use report::{ExitStatus, Reporter};
use source::SourceFile;

/// Environment variable holding the tracing filter
const LOG_ENV: &str = "BANG_LOG";

#[derive(Parser)]
#[command(
    name = "bang",
    version,
    about = "The Bang programming language interpreter",
    long_about = "Bang is a tiny imperative language of integers, strings and the `!` reversal operator.\n\nRunning `bang FILE` is the same as `bang run FILE`.",
    args_conflicts_with_subcommands = true
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    run: RunArgs,

    /// Log interpreter internals to stderr (BANG_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Print errors as single lines, without colour or source snippets
    #[arg(long, global = true)]
    plain: bool,
}

#[derive(Args, Debug, Clone)]
struct RunArgs {
    /// Bang source file (omit or use '-' to read from stdin)
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Report undeclared variables but run the program anyway
    #[arg(long)]
    warn_undeclared: bool,

    /// Print the bang count and maximum tree depth after the run
    #[arg(long)]
    stats: bool,
}

impl RunArgs {
    fn config(&self) -> RunConfig {
        RunConfig {
            abort_on_undeclared: !self.warn_undeclared,
            report_stats: self.stats,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Parse, check and evaluate a program
    Run(RunArgs),

    /// Parse and check a program without running it
    Check {
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,
    },

    /// Print the parsed program as an s-expression (debug only)
    Parse {
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,
    },

    /// Start an interactive session
    Repl {
        /// Report undeclared variables but evaluate the entry anyway
        #[arg(long)]
        warn_undeclared: bool,

        /// Do not read or write the history file
        #[arg(long)]
        no_history: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    setup_miette_handler(cli.plain);
    init_tracing(cli.verbose);

    let reporter = Reporter::new(cli.plain);
    let status = match cli.command {
        Some(Commands::Run(args)) => handle_run_command(&args, reporter),
        Some(Commands::Check { file }) => handle_check_command(file, reporter),
        Some(Commands::Parse { file }) => handle_parse_command(file, reporter),
        Some(Commands::Repl {
            warn_undeclared,
            no_history,
        }) => handle_repl_command(warn_undeclared, no_history, reporter),
        None => handle_run_command(&cli.run, reporter),
    };
    status.into()
}

/// Configure miette report rendering
fn setup_miette_handler(plain: bool) {
    miette::set_hook(Box::new(move |_| {
        Box::new(
            MietteHandlerOpts::new()
                .terminal_links(!plain)
                .unicode(!plain)
                .color(!plain)
                .tab_width(4)
                .with_cause_chain()
                .build(),
        )
    }))
    .ok();
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn load(file: Option<PathBuf>, reporter: Reporter) -> Result<SourceFile, ExitStatus> {
    SourceFile::load(file.as_deref()).map_err(|error| {
        reporter.emit(error, None);
        ExitStatus::ParseError
    })
}

fn handle_run_command(args: &RunArgs, reporter: Reporter) -> ExitStatus {
    let source = match load(args.file.clone(), reporter) {
        Ok(source) => source,
        Err(status) => return status,
    };

    let mut session = Session::new(args.config());
    let result = session.run_with_output(&source.text, io::stdout().lock());
    // Program output comes before any report on stderr
    let flushed = flush_output(io::stdout());

    match result {
        Ok(report) => {
            let status = match reporter.run_report(report, &source) {
                ExitStatus::Success if !flushed => ExitStatus::RuntimeFault,
                status => status,
            };
            debug!(file = %source.name, ?status, "run finished");
            status
        }
        Err(error) => {
            reporter.emit(error, Some(&source));
            ExitStatus::ParseError
        }
    }
}

/// Flush program output, logging a failure instead of dropping it
fn flush_output<W: Write>(mut output: W) -> bool {
    match output.flush() {
        Ok(()) => true,
        Err(error) => {
            warn!(%error, "failed to flush program output");
            false
        }
    }
}

fn handle_check_command(file: Option<PathBuf>, reporter: Reporter) -> ExitStatus {
    let source = match load(file, reporter) {
        Ok(source) => source,
        Err(status) => return status,
    };

    let program = match parse_program(&source.text) {
        Ok(program) => program,
        Err(error) => {
            reporter.emit(error, Some(&source));
            return ExitStatus::ParseError;
        }
    };

    let report = check_let_before_use(&program);
    let clean = report.is_clean();
    for diagnostic in report.diagnostics {
        reporter.emit(diagnostic, Some(&source));
    }
    reporter.stats(&TreeStats::collect(&program));

    if clean {
        println!("{}: no undeclared variables", source.name);
        ExitStatus::Success
    } else {
        ExitStatus::UndeclaredVariables
    }
}

fn handle_parse_command(file: Option<PathBuf>, reporter: Reporter) -> ExitStatus {
    let source = match load(file, reporter) {
        Ok(source) => source,
        Err(status) => return status,
    };

    match parse_program(&source.text) {
        Ok(program) => {
            println!("{}", sexpr::format_program_as_sexpr(&program));
            ExitStatus::Success
        }
        Err(error) => {
            reporter.emit(error, Some(&source));
            ExitStatus::ParseError
        }
    }
}

fn handle_repl_command(warn_undeclared: bool, no_history: bool, reporter: Reporter) -> ExitStatus {
    let defaults = ReplConfig::default();
    let config = ReplConfig {
        persist_history: !no_history,
        run: RunConfig {
            abort_on_undeclared: !warn_undeclared,
            ..defaults.run
        },
        ..defaults
    };

    let result = ReplSession::with_config(config, reporter).and_then(|mut repl| repl.run());
    match result {
        Ok(()) => ExitStatus::Success,
        Err(error) => {
            eprintln!("Error: {error}");
            ExitStatus::ParseError
        }
    }
}
