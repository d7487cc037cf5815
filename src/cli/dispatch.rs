// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Command dispatch and execution.

use console::style;
use std::path::Path;
use tracing::{debug, warn};

use crate::commit::Commit;
use crate::config::{CklintConfig, OutputFormat};
use crate::error::{CklintError, ConfigError, Result, ResultExt};
use crate::git::{GitSignatureVerifier, Repository};
use crate::report::{render, ReportOptions};
use crate::rules::{active_rules, is_active, RuleName, ValidationEngine};

use super::args::{Cli, Commands, HooksAction, HooksArgs, InitArgs, ValidateArgs};

/// File written by `cklint init`.
const INIT_CONFIG_FILE: &str = "cklint.toml";

/// Run the CLI with the given arguments.
pub fn run(cli: Cli) -> Result<()> {
    if cli.no_color {
        console::set_colors_enabled(false);
    }

    // Load configuration
    let config = if let Some(config_path) = &cli.config {
        CklintConfig::load_from(config_path)?
    } else {
        CklintConfig::load()?
    };

    // Dispatch to the appropriate command handler
    match cli.effective_command() {
        Commands::Validate(args) => run_validate(&cli, config, args),
        Commands::Rules => run_rules(&cli, &config),
        Commands::Hooks(args) => run_hooks(args),
        Commands::Init(args) => run_init(args),
        Commands::Version => run_version(),
    }
}

fn warn_unknown_rules(names: &[String]) {
    for name in names {
        if RuleName::from_config_name(name).is_none() {
            warn!("Unknown rule '{}' ignored", name);
        }
    }
}

/// Run the validate command.
fn run_validate(cli: &Cli, mut config: CklintConfig, args: ValidateArgs) -> Result<()> {
    debug!("Running validate command with args: {:?}", args);

    warn_unknown_rules(&args.enable);
    warn_unknown_rules(&args.disable);
    config.rules.enabled.extend(args.enable.iter().cloned());
    config.rules.disabled.extend(args.disable.iter().cloned());

    let options = ReportOptions {
        format: cli.format.unwrap_or(config.output.format),
        verbose: args.verbose || config.output.verbose,
        color: !cli.no_color && config.output.color,
    };

    let (commits, engine) = match &args.message_file {
        Some(path) => load_message_file(path, &config)?,
        None => load_from_repository(&args, &config)?,
    };

    let commits: Vec<Commit> = if config.repository.skip_merge_commits && !args.include_merges {
        let before = commits.len();
        let kept: Vec<Commit> = commits
            .into_iter()
            .filter(|c| !c.is_merge_commit())
            .collect();
        if kept.len() < before {
            debug!("Skipped {} merge commits", before - kept.len());
        }
        kept
    } else {
        commits
    };

    let summary = engine.validate_commits(commits);
    print!("{}", render(&summary, &options)?);

    if summary.all_passed() {
        Ok(())
    } else {
        Err(CklintError::ValidationFailed {
            failed: summary.failed,
            total: summary.total,
        })
    }
}

/// A message file describes a commit that does not exist yet, so the
/// signature rules have nothing to inspect and are left out.
fn load_message_file(path: &Path, config: &CklintConfig) -> Result<(Vec<Commit>, ValidationEngine)> {
    let contents = std::fs::read_to_string(path)
        .context(format!("Failed to read message file {}", path.display()))?;
    let commit = Commit::from_message_file(&contents);

    let rules = active_rules(config)
        .into_iter()
        .filter(|rule| !matches!(rule.name(), RuleName::Signature | RuleName::SignedIdentity))
        .collect();
    let engine =
        ValidationEngine::from_rules(rules).with_cancellation(config.repository.cancellation());

    let engine = match Repository::open_current() {
        Ok(repo) => engine.with_repository(repo),
        Err(e) => {
            debug!("No repository for message file validation: {}", e);
            engine
        }
    };
    Ok((vec![commit], engine))
}

fn load_from_repository(
    args: &ValidateArgs,
    config: &CklintConfig,
) -> Result<(Vec<Commit>, ValidationEngine)> {
    let repo = Repository::open_current()?;

    let mut commits = if let Some(range) = &args.range {
        repo.commits_in_range(range)?
    } else if let Some(base) = &args.base_branch {
        repo.commits_since(base)?
    } else {
        let reference = args.reference.as_deref().unwrap_or("HEAD");
        match args.count {
            Some(count) => repo.recent_commits(reference, count)?,
            None => vec![repo.commit(reference)?],
        }
    };
    if let Some(count) = args.count {
        commits.truncate(count);
    }

    let verifier = GitSignatureVerifier::new(repo.workdir());
    let engine = ValidationEngine::new(config)
        .with_cancellation(config.repository.cancellation())
        .with_verifier(verifier)
        .with_repository(repo);
    Ok((commits, engine))
}

/// Run the rules command.
fn run_rules(cli: &Cli, config: &CklintConfig) -> Result<()> {
    let rows: Vec<(RuleName, bool)> = RuleName::ALL
        .into_iter()
        .map(|rule| {
            let active = is_active(rule.as_str(), &config.rules.enabled, &config.rules.disabled);
            (rule, active)
        })
        .collect();

    if cli.format.unwrap_or(config.output.format) == OutputFormat::Json {
        let json: Vec<_> = rows
            .iter()
            .map(|(rule, active)| {
                serde_json::json!({
                    "name": rule,
                    "active": active,
                    "description": rule.description(),
                })
            })
            .collect();
        let text = serde_json::to_string_pretty(&json).context("Failed to serialize rules")?;
        println!("{}", text);
        return Ok(());
    }

    for (rule, active) in rows {
        let icon = if active {
            style("✓").green()
        } else {
            style("✗").dim()
        };
        println!("{} {:<20} {}", icon, rule.as_str(), style(rule.description()).dim());
    }
    Ok(())
}

/// Run the hooks command.
fn run_hooks(args: HooksArgs) -> Result<()> {
    use crate::hooks::{HookManager, COMMIT_MSG_HOOK};

    debug!("Running hooks command");

    let manager = HookManager::new()?;

    match args.action {
        HooksAction::Install { force } => {
            let path = manager.install(force)?;
            println!("✓ Installed {} hook at {}", COMMIT_MSG_HOOK, path.display());
        }
        HooksAction::Uninstall => {
            if manager.uninstall()? {
                println!("✓ Uninstalled {} hook", COMMIT_MSG_HOOK);
            } else {
                println!("No cklint {} hook installed", COMMIT_MSG_HOOK);
            }
        }
        HooksAction::Status => {
            let status = manager.status()?;
            println!("{}: {}", COMMIT_MSG_HOOK, status.description());
        }
    }

    Ok(())
}

/// Run the version command.
fn run_version() -> Result<()> {
    println!("cklint {}", crate::version::version_string());

    if let Some(sha) = crate::version::GIT_SHA {
        println!("git commit: {}", sha);
    }
    if let Some(date) = crate::version::GIT_COMMIT_DATE {
        println!("commit date: {}", date);
    }

    Ok(())
}

/// Run the init command.
fn run_init(args: InitArgs) -> Result<()> {
    use crate::config::default::example_config;
    use dialoguer::Confirm;

    debug!("Running init command with args: {:?}", args);

    let config_path = Path::new(INIT_CONFIG_FILE);

    if config_path.exists() && !args.force {
        let overwrite = console::Term::stdout().is_term()
            && Confirm::new()
                .with_prompt(format!("{} already exists. Overwrite?", INIT_CONFIG_FILE))
                .default(false)
                .interact()?;
        if !overwrite {
            return Err(CklintError::Config(ConfigError::AlreadyExists {
                path: config_path.to_path_buf(),
            }));
        }
    }

    std::fs::write(config_path, example_config()).context("Failed to write configuration")?;

    println!("✓ Created {}", INIT_CONFIG_FILE);

    Ok(())
}
