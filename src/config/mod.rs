//! Configuration system for hornlog
//!
//! Provides a small configuration layer supporting:
//! - TOML configuration files
//! - Environment variable overrides
//!
//! # Configuration File Locations
//!
//! Configuration files are searched in order (first found wins):
//! 1. `./hornlog.toml` - Project-local configuration
//! 2. `~/.config/hornlog/config.toml` - User configuration (XDG)
//! 3. `~/.hornlog/config.toml` - User configuration (legacy)
//!
//! # Environment Variables
//!
//! - `HORNLOG_LOG_LEVEL` - Logging verbosity (quiet, normal, verbose)
//! - `HORNLOG_COLOR` - Colored output (true/false)
//! - `HORNLOG_PROMPT` - REPL prompt string
//! - `HORNLOG_OCCURS_CHECK` - Enable the unification occurs check (true/false)
//! - `HORNLOG_MAX_SOLUTIONS` - Solutions printed per query (0 = unlimited)
//!
//! # Example Configuration
//!
//! ```toml
//! # hornlog.toml
//!
//! [general]
//! log_level = "normal"
//! color = true
//!
//! [resolver]
//! occurs_check = false
//!
//! [repl]
//! prompt = "hornlog> "
//! max_solutions = 0
//! ```

use std::env;
use std::fs;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ErrorCode, HornError, HornResult};
use crate::resolve::ResolveOptions;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    /// General settings
    pub general: GeneralConfig,
    /// Resolver settings
    pub resolver: ResolverConfig,
    /// REPL settings
    pub repl: ReplConfig,
}

/// General configuration options
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GeneralConfig {
    /// Logging level
    pub log_level: LogLevel,
    /// Enable colored output
    pub color: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: LogLevel::Normal,
            color: true,
        }
    }
}

/// Resolver configuration options
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct ResolverConfig {
    /// Enable the unification occurs check
    pub occurs_check: bool,
}

/// REPL configuration options
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ReplConfig {
    /// Prompt string
    pub prompt: String,
    /// Solutions printed per query; 0 means unlimited
    pub max_solutions: usize,
}

impl Default for ReplConfig {
    fn default() -> Self {
        Self {
            prompt: "hornlog> ".to_string(),
            max_solutions: 0,
        }
    }
}

/// Logging verbosity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Suppress informational messages
    Quiet,
    /// Standard output
    #[default]
    Normal,
    /// Diagnostic detail
    Verbose,
}

impl FromStr for LogLevel {
    type Err = HornError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "quiet" => Ok(LogLevel::Quiet),
            "normal" => Ok(LogLevel::Normal),
            "verbose" => Ok(LogLevel::Verbose),
            other => Err(HornError::new(
                ErrorCode::InvalidConfigValue,
                format!("unknown log level: {}", other),
            )
            .with_hint("valid levels: quiet, normal, verbose")),
        }
    }
}

impl Config {
    /// Load configuration: first file found in the search path, then
    /// environment overrides. No file at all is not an error.
    pub fn load() -> HornResult<Config> {
        let mut config = Config::default();
        for path in Config::search_paths() {
            if path.is_file() {
                config = Config::load_from(&path)?;
                break;
            }
        }
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Load configuration from an explicit file
    pub fn load_from(path: &PathBuf) -> HornResult<Config> {
        let content = fs::read_to_string(path)
            .map_err(|e| HornError::from(e).with_context("path", path.display().to_string()))?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Configuration file locations, most specific first
    pub fn search_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        // Project-local
        paths.push(PathBuf::from("hornlog.toml"));

        // XDG config directory
        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("hornlog").join("config.toml"));
        }

        // Legacy home directory
        if let Some(home_dir) = dirs::home_dir() {
            paths.push(home_dir.join(".hornlog").join("config.toml"));
        }

        paths
    }

    /// Apply `HORNLOG_*` environment variable overrides
    pub fn apply_env_overrides(&mut self) -> HornResult<()> {
        if let Ok(level) = env::var("HORNLOG_LOG_LEVEL") {
            self.general.log_level = level.parse()?;
        }
        if let Ok(color) = env::var("HORNLOG_COLOR") {
            self.general.color = parse_bool("HORNLOG_COLOR", &color)?;
        }
        if let Ok(prompt) = env::var("HORNLOG_PROMPT") {
            self.repl.prompt = prompt;
        }
        if let Ok(occurs) = env::var("HORNLOG_OCCURS_CHECK") {
            self.resolver.occurs_check = parse_bool("HORNLOG_OCCURS_CHECK", &occurs)?;
        }
        if let Ok(max) = env::var("HORNLOG_MAX_SOLUTIONS") {
            self.repl.max_solutions = max.parse().map_err(|_| {
                HornError::new(
                    ErrorCode::InvalidConfigValue,
                    format!("HORNLOG_MAX_SOLUTIONS must be a number, got `{}`", max),
                )
            })?;
        }
        Ok(())
    }

    /// The resolve options this configuration selects
    pub fn resolve_options(&self) -> ResolveOptions {
        ResolveOptions {
            occurs_check: self.resolver.occurs_check,
        }
    }
}

fn parse_bool(name: &str, value: &str) -> HornResult<bool> {
    match value.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        other => Err(HornError::new(
            ErrorCode::InvalidConfigValue,
            format!("{} must be a boolean, got `{}`", name, other),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.general.log_level, LogLevel::Normal);
        assert!(config.general.color);
        assert!(!config.resolver.occurs_check);
        assert_eq!(config.repl.prompt, "hornlog> ");
        assert_eq!(config.repl.max_solutions, 0);
    }

    #[test]
    fn test_parse_toml() {
        let config: Config = toml::from_str(
            r#"
            [general]
            log_level = "verbose"
            color = false

            [resolver]
            occurs_check = true

            [repl]
            prompt = "?> "
            max_solutions = 10
            "#,
        )
        .unwrap();

        assert_eq!(config.general.log_level, LogLevel::Verbose);
        assert!(!config.general.color);
        assert!(config.resolver.occurs_check);
        assert_eq!(config.repl.prompt, "?> ");
        assert_eq!(config.repl.max_solutions, 10);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: Config = toml::from_str(
            r#"
            [resolver]
            occurs_check = true
            "#,
        )
        .unwrap();

        assert!(config.resolver.occurs_check);
        assert_eq!(config.general.log_level, LogLevel::Normal);
        assert_eq!(config.repl.max_solutions, 0);
    }

    #[test]
    fn test_resolve_options() {
        let mut config = Config::default();
        assert!(!config.resolve_options().occurs_check);
        config.resolver.occurs_check = true;
        assert!(config.resolve_options().occurs_check);
    }

    #[test]
    fn test_log_level_from_str() {
        assert_eq!("verbose".parse::<LogLevel>().unwrap(), LogLevel::Verbose);
        assert_eq!("QUIET".parse::<LogLevel>().unwrap(), LogLevel::Quiet);
        assert!("loud".parse::<LogLevel>().is_err());
    }

    #[test]
    fn test_parse_bool_values() {
        assert!(parse_bool("X", "true").unwrap());
        assert!(parse_bool("X", "1").unwrap());
        assert!(!parse_bool("X", "off").unwrap());
        assert!(parse_bool("X", "maybe").is_err());
    }

    #[test]
    fn test_search_paths_start_project_local() {
        let paths = Config::search_paths();
        assert_eq!(paths[0], PathBuf::from("hornlog.toml"));
    }

    #[test]
    fn test_env_overrides() {
        env::set_var("HORNLOG_MAX_SOLUTIONS", "25");
        env::set_var("HORNLOG_OCCURS_CHECK", "true");

        let mut config = Config::default();
        config.apply_env_overrides().unwrap();
        assert_eq!(config.repl.max_solutions, 25);
        assert!(config.resolver.occurs_check);

        env::remove_var("HORNLOG_MAX_SOLUTIONS");
        env::remove_var("HORNLOG_OCCURS_CHECK");
    }
}
