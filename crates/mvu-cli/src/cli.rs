//! CLI argument definitions for the counter host.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use mvu_cli::script::Step;

#[derive(Parser)]
#[command(
    name = "mvu-counter",
    version,
    about = "Drive the MVU counter application without a browser",
    long_about = "Run the counter application against an in-memory document.\n\n\
                  Replays clicks and row input, previews the rendered tree and\n\
                  checks the reference scenario end to end."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (defaults to the settings file, then pretty).
    #[arg(long = "log-format", value_enum, global = true)]
    pub log_format: Option<LogFormatArg>,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Settings file (default: platform config directory).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Replay interactions against a freshly started application.
    Run(RunArgs),

    /// Print the tree the view produces for a given state.
    Render(RenderArgs),

    /// Run the reference scenario and check its outcome.
    Scenario,
}

#[derive(Parser)]
pub struct RunArgs {
    /// Steps to replay: increment, decrement, row:<text>, scroll.
    #[arg(value_name = "STEP")]
    pub steps: Vec<Step>,

    /// Read steps from a script file, one per line ("-" for stdin).
    ///
    /// Script steps run after any given on the command line.
    #[arg(long = "script", value_name = "FILE")]
    pub script: Option<PathBuf>,

    /// Print the session report as JSON.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Parser)]
pub struct RenderArgs {
    /// Counter value to render.
    #[arg(long = "value", default_value_t = 0, allow_negative_numbers = true)]
    pub value: i64,

    /// Row input value to render.
    #[arg(long = "row", default_value_t = 0, allow_negative_numbers = true)]
    pub row: i64,

    /// Table rows to show (defaults to the settings file).
    #[arg(long = "rows", value_name = "N")]
    pub rows: Option<usize>,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
