//! Headless host for the MVU counter application.

use std::io::{self, IsTerminal};

use clap::{ColorChoice, Parser};
use mvu_cli::logging::{LogConfig, LogFormat, init_logging};
use mvu_cli::settings::Settings;
use tracing::level_filters::LevelFilter;

mod cli;
mod commands;
mod summary;
mod types;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use crate::commands::{run_render, run_scenario, run_steps};
use crate::summary::{print_scenario, print_session};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let settings_path = cli.config.clone().unwrap_or_else(Settings::config_path);
    let settings = Settings::load_or_default(&settings_path);
    let log_config = log_config_from_cli(&cli, &settings);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match cli.command {
        Command::Run(args) => match run_steps(&args) {
            Ok(report) => {
                if args.json || settings.output.json {
                    print_json(&report)
                } else {
                    print_session(&report);
                    0
                }
            }
            Err(error) => {
                eprintln!("error: {error:#}");
                1
            }
        },
        Command::Render(args) => {
            print!("{}", run_render(&args, settings.output.preview_rows));
            0
        }
        Command::Scenario => match run_scenario() {
            Ok(result) => {
                print_scenario(&result);
                if result.passed() { 0 } else { 1 }
            }
            Err(error) => {
                eprintln!("error: {error:#}");
                1
            }
        },
    };
    std::process::exit(exit_code);
}

fn print_json<T: serde::Serialize>(value: &T) -> i32 {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            println!("{json}");
            0
        }
        Err(error) => {
            eprintln!("error: failed to serialize report: {error}");
            1
        }
    }
}

/// Build logging configuration. Flags win over the settings file.
fn log_config_from_cli(cli: &Cli, settings: &Settings) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        Some(LogFormatArg::Pretty) => LogFormat::Pretty,
        Some(LogFormatArg::Compact) => LogFormat::Compact,
        Some(LogFormatArg::Json) => LogFormat::Json,
        None => settings.logging.format,
    };
    config.with_timestamps = settings.logging.timestamps;
    config.with_target = settings.logging.target;
    config.log_file = cli.log_file.clone();
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
