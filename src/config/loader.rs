// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Configuration loading and merging.

use crate::error::{CklintError, ConfigError, Result};
use crate::rules::RuleName;
use std::path::{Path, PathBuf};

use super::schema::CklintConfig;

/// Configuration file names to search for, in order of priority.
const CONFIG_FILES: &[&str] = &["cklint.toml", ".cklint.toml", ".config/cklint.toml"];

/// Find the project configuration file in the current directory or its parents.
pub fn find_config_file() -> Option<PathBuf> {
    let current_dir = std::env::current_dir().ok()?;
    find_config_file_from(&current_dir)
}

/// Find the project configuration file starting from a specific directory.
pub fn find_config_file_from(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        for config_name in CONFIG_FILES {
            let config_path = current.join(config_name);
            if config_path.exists() {
                return Some(config_path);
            }
        }

        // Try parent directory
        if !current.pop() {
            break;
        }
    }

    None
}

/// Location of the per-user configuration file.
pub fn user_config_file() -> Option<PathBuf> {
    let path = dirs::config_dir()?.join("cklint").join("config.toml");
    path.exists().then_some(path)
}

/// Load configuration from the default locations.
///
/// The user file is layered underneath the project file.
pub fn load_config() -> Result<CklintConfig> {
    let mut layers = Vec::new();

    if let Some(path) = user_config_file() {
        tracing::debug!("Loading user configuration from: {:?}", path);
        layers.push(read_layer(&path)?);
    }
    if let Some(path) = find_config_file() {
        tracing::debug!("Loading project configuration from: {:?}", path);
        layers.push(read_layer(&path)?);
    }

    if layers.is_empty() {
        tracing::debug!("No configuration file found, using defaults");
        return Ok(CklintConfig::default());
    }

    let merged = layers
        .into_iter()
        .fold(toml::Value::Table(toml::map::Map::new()), merge_values);
    from_value(merged)
}

/// Load configuration from a specific path.
pub fn load_config_from(path: &Path) -> Result<CklintConfig> {
    tracing::debug!("Loading configuration from: {:?}", path);
    from_value(read_layer(path)?)
}

/// Parse configuration from a TOML string.
pub fn parse_config(content: &str) -> Result<CklintConfig> {
    let config: CklintConfig = toml::from_str(content).map_err(|e| {
        CklintError::Config(ConfigError::ParseError {
            message: format!("Failed to parse TOML: {}", e),
        })
    })?;
    validate_config(&config)?;
    Ok(config)
}

/// Merge two configurations, with the overlay taking precedence key by key.
pub fn merge_configs(base: &CklintConfig, overlay: &str) -> Result<CklintConfig> {
    let base = toml::Value::try_from(base).map_err(|e| {
        CklintError::Config(ConfigError::ParseError {
            message: format!("Failed to serialize configuration: {}", e),
        })
    })?;
    let overlay: toml::Value = toml::from_str(overlay).map_err(|e| {
        CklintError::Config(ConfigError::ParseError {
            message: format!("Failed to parse TOML: {}", e),
        })
    })?;
    from_value(merge_values(base, overlay))
}

fn read_layer(path: &Path) -> Result<toml::Value> {
    if !path.exists() {
        return Err(CklintError::Config(ConfigError::NotFound {
            path: path.to_path_buf(),
        }));
    }

    let content = std::fs::read_to_string(path).map_err(|e| {
        CklintError::Config(ConfigError::ParseError {
            message: format!("Failed to read config file {}: {}", path.display(), e),
        })
    })?;

    toml::from_str(&content).map_err(|e| {
        CklintError::Config(ConfigError::ParseError {
            message: format!("Failed to parse TOML in {}: {}", path.display(), e),
        })
    })
}

fn from_value(value: toml::Value) -> Result<CklintConfig> {
    let config: CklintConfig = value.try_into().map_err(|e: toml::de::Error| {
        CklintError::Config(ConfigError::ParseError {
            message: e.to_string(),
        })
    })?;
    validate_config(&config)?;
    Ok(config)
}

/// Deep-merge TOML tables. Non-table values in `overlay` replace those in `base`.
fn merge_values(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base), toml::Value::Table(overlay)) => {
            for (key, value) in overlay {
                let merged = match base.remove(&key) {
                    Some(existing) => merge_values(existing, value),
                    None => value,
                };
                base.insert(key, merged);
            }
            toml::Value::Table(base)
        }
        (_, overlay) => overlay,
    }
}

/// Reject values no rule can work with and warn about unknown rule names.
fn validate_config(config: &CklintConfig) -> Result<()> {
    if config.subject.max_length == 0 {
        return Err(CklintError::Config(ConfigError::InvalidValue {
            key: "subject.max_length".to_string(),
            message: "must be greater than zero".to_string(),
        }));
    }
    if config.conventional.max_description_length == 0 {
        return Err(CklintError::Config(ConfigError::InvalidValue {
            key: "conventional.max_description_length".to_string(),
            message: "must be greater than zero".to_string(),
        }));
    }
    for kind in &config.signature.allowed_types {
        if !matches!(kind.to_lowercase().as_str(), "gpg" | "ssh") {
            return Err(CklintError::Config(ConfigError::InvalidValue {
                key: "signature.allowed_types".to_string(),
                message: format!("unknown signature type '{}'", kind),
            }));
        }
    }

    for name in config.rules.enabled.iter().chain(&config.rules.disabled) {
        if RuleName::from_config_name(name).is_none() {
            tracing::warn!("Unknown rule name in configuration: {:?}", name);
        }
    }

    Ok(())
}
