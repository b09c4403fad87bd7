//! # Gradus CLI Module
//!
//! This module implements the CLI interface for Gradus.
//!
//! ## Available Commands
//!
//! - `status` - Show roster summary
//! - `check` - Decide whether one stage is unlocked for one learner
//! - `report` - Show every stage of a program for one learner
//! - `validate` - Parse and validate the roster manifest

mod commands;

use clap::{Parser, Subcommand};
use gradus_core::GradusError;
use std::path::PathBuf;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// Gradus - Stage Unlock Engine
///
/// Decides learner access to program stages from stored facts:
/// policy toggle, configured delay, effective start date, and today.
#[derive(Parser, Debug)]
#[command(name = "gradus")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress banner output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to the roster manifest
    #[arg(short = 'f', long, global = true, default_value = "roster.toml")]
    pub manifest: PathBuf,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show roster summary
    Status,

    /// Decide whether a stage is unlocked for a learner
    Check {
        /// Stage ID to evaluate
        #[arg(short, long)]
        stage: u64,

        /// Learner ID to evaluate
        #[arg(short, long)]
        learner: u64,

        /// Evaluation date (YYYY-MM-DD); defaults to the local date
        #[arg(short, long)]
        today: Option<String>,
    },

    /// Show access to every stage of a program for a learner
    Report {
        /// Program ID to report on
        #[arg(short, long)]
        program: u64,

        /// Learner ID to evaluate
        #[arg(short, long)]
        learner: u64,

        /// Evaluation date (YYYY-MM-DD); defaults to the local date
        #[arg(short, long)]
        today: Option<String>,
    },

    /// Parse and validate the roster manifest
    Validate,
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
pub fn execute(cli: Cli) -> Result<(), GradusError> {
    let json_mode = cli.json_mode;

    match cli.command {
        Some(Commands::Check {
            stage,
            learner,
            today,
        }) => cmd_check(&cli.manifest, json_mode, stage, learner, today.as_deref()),
        Some(Commands::Report {
            program,
            learner,
            today,
        }) => cmd_report(
            &cli.manifest,
            json_mode,
            program,
            learner,
            today.as_deref(),
        ),
        Some(Commands::Validate) => cmd_validate(&cli.manifest, json_mode),
        // No subcommand - show status by default
        Some(Commands::Status) | None => cmd_status(&cli.manifest, json_mode),
    }
}
