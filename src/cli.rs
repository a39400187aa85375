//! CLI definitions and entry point

use std::path::PathBuf;

use clap::Parser;

use crate::commands;
use licheck::core::models::Policy;
use licheck::core::services::{EXIT_OK, EXIT_USAGE};
use licheck::output::{OutputMode, Verbosity};

/// licheck - Check the license declarations of ROS packages
#[derive(Parser, Debug)]
#[command(
    name = "licheck",
    version,
    about = "Check the license declarations of ROS packages",
    long_about = "Check that the licenses declared in package.xml match the licenses found in the code.\n\n\
                  PATH is a package or a directory containing packages.\n\
                  Exit codes: 0 pass, 1 warning, 2 error, 64 input error."
)]
pub struct Cli {
    /// Package or workspace to check
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Write a copyright file into each package
    #[arg(short = 'c', long = "generate_copyright_file")]
    pub generate_copyright_file: bool,

    /// Enable verbose output
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only print failing checks
    #[arg(short, long)]
    pub quiet: bool,

    /// Exit with success when checks fail with errors (warnings keep their exit code)
    #[arg(short = 'e', long = "continue_on_error")]
    pub continue_on_error: bool,

    /// Treat warnings as errors
    #[arg(short = 'w', long = "warnings_as_error")]
    pub warnings_as_error: bool,

    /// Output in JSON format (machine-readable)
    #[arg(long)]
    pub json: bool,

    /// Config file (default: ~/.licheck/config.toml)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Policy flags given on the command line
    #[must_use]
    pub const fn policy(&self) -> Policy {
        Policy {
            continue_on_error: self.continue_on_error,
            warnings_as_error: self.warnings_as_error,
        }
    }

    /// Requested verbosity
    #[must_use]
    pub const fn verbosity(&self) -> Verbosity {
        if self.quiet {
            Verbosity::Quiet
        } else if self.verbose {
            Verbosity::Verbose
        } else {
            Verbosity::Normal
        }
    }
}

/// Run the CLI, returning the process exit code
pub fn run() -> anyhow::Result<i32> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version also arrive here
            let code = if e.use_stderr() { EXIT_USAGE } else { EXIT_OK };
            e.print()?;
            return Ok(code);
        },
    };

    let default_filter = match cli.verbosity() {
        Verbosity::Quiet => "warn",
        Verbosity::Normal => "info",
        Verbosity::Verbose => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter)).init();

    let output_mode = if cli.json {
        OutputMode::Json
    } else {
        OutputMode::Human
    };

    commands::check(&cli, output_mode)
}
