mod commands;
mod error;
mod util;

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;

use crate::commands::{completions, extract, health, manual, Context};
use crate::error::{exit_code_for, report_error};
use dialsheet_config as config;

#[derive(Debug, Parser)]
#[command(name = "dialsheet", version, about = "dialsheet CLI")]
struct Cli {
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[arg(long, global = true)]
    json: bool,
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Extract contacts from a .csv, .xlsx, .xls, .txt or .vcf file
    Extract(extract::ExtractArgs),
    /// Parse contacts typed or pasted as text
    Parse(manual::ParseArgs),
    /// Check a single phone number
    Validate(manual::ValidateArgs),
    /// Print a WhatsApp send link for every extracted contact
    Links(extract::LinksArgs),
    /// Write extracted contacts as json, csv or vcf
    Export(extract::ExportArgs),
    Health,
    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let verbose = cli.verbose;
    init_logging(verbose);
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report_error(&err, verbose);
            exit_code_for(&err)
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let Cli {
        config: config_path,
        json,
        verbose,
        command,
    } = cli;

    match command {
        Command::Completions(args) => completions::emit(args),
        command => {
            let app_config = config::load(config_path.clone()).with_context(|| "load config")?;
            if verbose {
                match config::resolve_config_path(config_path) {
                    Ok(path) => {
                        if path.exists() {
                            debug!(path = %path.display(), "config resolved");
                        } else {
                            debug!(path = %path.display(), "config missing, using defaults");
                        }
                    }
                    Err(err) => {
                        debug!(error = %err, "config unavailable");
                    }
                }
            }

            let ctx = Context {
                json,
                config: &app_config,
            };

            match command {
                Command::Extract(args) => extract::extract(&ctx, args),
                Command::Parse(args) => manual::parse(&ctx, args),
                Command::Validate(args) => manual::validate(&ctx, args),
                Command::Links(args) => extract::links(&ctx, args),
                Command::Export(args) => extract::export(&ctx, args),
                Command::Health => health::health(&ctx),
                Command::Completions(_) => {
                    unreachable!("completions command handled before config loading")
                }
            }
        }
    }
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}
