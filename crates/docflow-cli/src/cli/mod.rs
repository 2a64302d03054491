//! CLI command definitions for the `docflow` binary.

pub mod check;
pub mod steps;
pub mod summary;
pub mod templates;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

use docflow_types::wizard::WizardMode;

/// Author and check document workflow definitions.
#[derive(Parser)]
#[command(name = "docflow", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Log errors only. Command output is still printed.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Export tracing spans to stdout via OpenTelemetry.
    #[arg(long, global = true)]
    pub otel: bool,

    /// Data directory (defaults to ~/.docflow).
    #[arg(long, global = true, env = "DOCFLOW_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the wizard steps for a mode.
    Steps {
        /// Wizard mode (simple or advanced). Defaults to the configured mode.
        #[arg(long)]
        mode: Option<WizardMode>,
    },

    /// List trigger and action types.
    Kinds,

    /// Validate a draft file step by step.
    Check {
        /// Draft file (.json, .yaml or .yml).
        file: PathBuf,

        /// Wizard mode (simple or advanced). Defaults to the configured mode.
        #[arg(long)]
        mode: Option<WizardMode>,

        /// Directory of existing workflow records used for conflict checks.
        #[arg(long)]
        workflows_dir: Option<PathBuf>,
    },

    /// Print the natural and technical summaries of a draft file.
    Summary {
        /// Draft file (.json, .yaml or .yml).
        file: PathBuf,
    },

    /// List built-in and user templates, or print one as YAML.
    Templates {
        /// Template key to print.
        key: Option<String>,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}
