//! TOML configuration file parsing

use super::cli::Cli;
use super::RunConfig;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Parse TOML configuration file
pub fn parse_toml_file(path: &Path) -> Result<RunConfig> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    parse_toml_string(&contents)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Parse TOML configuration from string
pub fn parse_toml_string(contents: &str) -> Result<RunConfig> {
    let config: RunConfig = ::toml::from_str(contents)
        .context("Failed to parse TOML configuration")?;

    Ok(config)
}

/// Build the run configuration from the CLI, layering it over `--config` if given
pub fn load_config(cli: &Cli) -> Result<RunConfig> {
    match cli.config {
        Some(ref path) => {
            let mut config = parse_toml_file(path)?;
            cli.apply_overrides(&mut config);
            Ok(config)
        }
        None => Ok(cli.to_run_config()?),
    }
}
