//! CLI command definitions and handlers

mod init;
mod records;
mod report;

use crate::config::{self, ProjectConfig};
use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

/// Parse and validate a forced minimum CC value
fn parse_threshold(s: &str) -> Result<f64, String> {
    let t: f64 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;
    if !t.is_finite() {
        Err("threshold must be a finite number".to_string())
    } else if t < 0.0 {
        Err("threshold cannot be negative".to_string())
    } else {
        Ok(t)
    }
}

/// cc-optimize - flag complex functions in radon reports
#[derive(Parser, Debug)]
#[command(name = "cc-optimize")]
#[command(
    version,
    about = "Flag functions and methods with high cyclomatic complexity in radon JSON reports",
    long_about = "Reads a `radon cc --json` report and flags functions and methods whose \
complexity exceeds their file's mean (or the module mean for files holding a single \
signature). Pass --threshold to compare everything against a fixed value instead. \
Classes are never flagged.\n\n\
Run without a subcommand to report on cc.json in the current directory:\n  \
cc-optimize",
    after_help = "\
Examples:
  radon cc -j src > cc.json
  cc-optimize                                 Report on ./cc.json
  cc-optimize report cc.json --threshold 10   Flag everything above CC 10
  cc-optimize report cc.json -f markdown -o cc.md
  cc-optimize report cc.json --fail-on-flags  Exit code 1 if anything is flagged
  cc-optimize records cc.json                 Dump loaded records as JSON"
)]
pub struct Cli {
    /// Path to the radon JSON report
    #[arg(global = true, value_name = "REPORT", default_value = "cc.json")]
    pub path: PathBuf,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "warn", value_parser = ["error", "warn", "info", "debug", "trace"])]
    pub log_level: String,

    /// Config file (default: ./cc-optimize.toml if present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Flag high-complexity signatures (default command)
    Report(ReportArgs),

    /// Print the loaded signature records as JSON
    Records,

    /// Write a cc-optimize.toml with example settings
    Init,
}

#[derive(Args, Debug, Default, Clone)]
pub struct ReportArgs {
    /// Forced minimum CC value; overrides file and module means
    #[arg(long, short = 't', value_parser = parse_threshold)]
    pub threshold: Option<f64>,

    /// Output format: text, json, markdown (or md)
    #[arg(long, short = 'f', value_parser = ["text", "txt", "json", "markdown", "md"])]
    pub format: Option<String>,

    /// Output file path (default: stdout)
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Exit with code 1 if any signature is flagged
    #[arg(long)]
    pub fail_on_flags: bool,
}

/// Report settings after merging CLI flags over config defaults
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ReportSettings {
    pub threshold: Option<f64>,
    pub format: String,
    pub output: Option<PathBuf>,
    pub fail_on_flags: bool,
}

impl ReportSettings {
    fn resolve(args: ReportArgs, project_config: &ProjectConfig) -> Self {
        let defaults = &project_config.defaults;
        Self {
            threshold: args.threshold.or(defaults.threshold),
            format: args
                .format
                .or_else(|| defaults.format.clone())
                .unwrap_or_else(|| "text".to_string()),
            output: args.output.or_else(|| defaults.output.clone()),
            fail_on_flags: args.fail_on_flags || defaults.fail_on_flags.unwrap_or(false),
        }
    }
}

fn load_config(explicit: Option<&Path>) -> Result<ProjectConfig> {
    match explicit {
        Some(path) => config::load_config_file(path),
        None => Ok(config::load_project_config(Path::new("."))),
    }
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Some(Commands::Init) => init::run(Path::new(".")),

        Some(Commands::Records) => records::run(&cli.path),

        Some(Commands::Report(args)) => {
            let project_config = load_config(cli.config.as_deref())?;
            report::run(&cli.path, ReportSettings::resolve(args, &project_config))
        }

        None => {
            let project_config = load_config(cli.config.as_deref())?;
            report::run(
                &cli.path,
                ReportSettings::resolve(ReportArgs::default(), &project_config),
            )
        }
    }
}
