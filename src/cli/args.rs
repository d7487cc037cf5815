// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! CLI argument definitions using clap.

use clap::{ArgGroup, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::OutputFormat;

/// cklint - Git commit message linter
///
/// Validates commit messages and signatures against configurable rules.
#[derive(Parser, Debug)]
#[command(name = "cklint")]
#[command(author = "Eshan Roy")]
#[command(version)]
#[command(about = "Git commit message linter", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// The command to run (defaults to validate if not specified)
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Output format (overrides the configuration)
    #[arg(long, global = true, value_enum)]
    pub format: Option<OutputFormat>,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "CKLINT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

/// Available commands.
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Validate commits or a commit message file (default command)
    Validate(ValidateArgs),

    /// List rules and whether they are active
    Rules,

    /// Manage the commit-msg hook
    Hooks(HooksArgs),

    /// Write an example configuration file
    Init(InitArgs),

    /// Print version information
    Version,
}

/// Arguments for the validate command.
#[derive(Parser, Debug, Default, Clone)]
#[command(group(
    ArgGroup::new("source")
        .args(["reference", "range", "base_branch", "message_file"])
        .multiple(false)
))]
pub struct ValidateArgs {
    /// Commit to validate (default: HEAD)
    #[arg(long = "ref", value_name = "REV")]
    pub reference: Option<String>,

    /// Range of commits to validate, e.g. main..HEAD
    #[arg(long, value_name = "A..B")]
    pub range: Option<String>,

    /// Validate the commits on HEAD that are not on this branch
    #[arg(long, value_name = "BRANCH")]
    pub base_branch: Option<String>,

    /// Validate a commit message file (as passed to the commit-msg hook)
    #[arg(long, value_name = "PATH")]
    pub message_file: Option<PathBuf>,

    /// Number of commits to validate, walking back from the reference
    #[arg(short = 'n', long, value_name = "COUNT")]
    pub count: Option<usize>,

    /// Enable a rule (repeatable, comma separated)
    #[arg(long, value_name = "RULE", value_delimiter = ',')]
    pub enable: Vec<String>,

    /// Disable a rule (repeatable, comma separated)
    #[arg(long, value_name = "RULE", value_delimiter = ',')]
    pub disable: Vec<String>,

    /// Validate merge commits too
    #[arg(long)]
    pub include_merges: bool,

    /// Show passing rules and rule details
    #[arg(short, long)]
    pub verbose: bool,
}

/// Arguments for the hooks command.
#[derive(Parser, Debug, Clone)]
pub struct HooksArgs {
    /// Hook action to perform
    #[command(subcommand)]
    pub action: HooksAction,
}

/// Hook actions.
#[derive(Subcommand, Debug, Clone)]
pub enum HooksAction {
    /// Install the commit-msg hook
    Install {
        /// Back up and replace a hook installed by another tool
        #[arg(short, long)]
        force: bool,
    },

    /// Uninstall the commit-msg hook, restoring any backup
    Uninstall,

    /// Show hook status
    Status,
}

/// Arguments for the init command.
#[derive(Parser, Debug, Clone)]
pub struct InitArgs {
    /// Overwrite existing configuration
    #[arg(short, long)]
    pub force: bool,
}

impl Cli {
    /// Get the effective command, defaulting to Validate if none specified.
    pub fn effective_command(&self) -> Commands {
        self.command
            .clone()
            .unwrap_or(Commands::Validate(ValidateArgs::default()))
    }
}
