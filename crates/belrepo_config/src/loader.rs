//! Configuration file loading and validation.

use crate::error::ConfigError;
use crate::types::RepositoryConfig;
use std::collections::HashSet;
use std::path::Path;

/// Name of the configuration file looked up at a repository root.
pub const CONFIG_FILE_NAME: &str = "bel-repository.toml";

/// Loads and validates the configuration of a repository.
///
/// Reads `<root>/bel-repository.toml`. A missing file yields the defaults.
pub fn load_config(root: &Path) -> Result<RepositoryConfig, ConfigError> {
    let config_path = root.join(CONFIG_FILE_NAME);
    if !config_path.is_file() {
        return Ok(RepositoryConfig::default());
    }
    load_config_file(&config_path)
}

/// Loads and validates a configuration from an explicit path.
///
/// Unlike [`load_config`], a missing file is an error.
pub fn load_config_file(path: &Path) -> Result<RepositoryConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::IoError {
        path: path.to_path_buf(),
        source,
    })?;
    load_config_from_str(&content)
}

/// Parses and validates a configuration from a string.
///
/// Useful for testing without filesystem dependencies.
pub fn load_config_from_str(content: &str) -> Result<RepositoryConfig, ConfigError> {
    let config: RepositoryConfig =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    validate_config(&config)?;
    Ok(config)
}

/// Validates required fields and value ranges.
///
/// Format identifiers are checked for emptiness and duplicates only; whether
/// they name a known format is decided by whoever builds the format registry.
fn validate_config(config: &RepositoryConfig) -> Result<(), ConfigError> {
    if config.repository.cache_name.trim().is_empty() {
        return Err(ConfigError::MissingField("repository.cache_name".to_string()));
    }
    if config.repository.formats.is_empty() {
        return Err(ConfigError::MissingField("repository.formats".to_string()));
    }
    let mut seen = HashSet::new();
    for id in &config.repository.formats {
        if !seen.insert(id.as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "format '{id}' listed more than once"
            )));
        }
    }
    if config.output.compression > 9 {
        return Err(ConfigError::ValidationError(format!(
            "output.compression must be between 0 and 9, got {}",
            config.output.compression
        )));
    }
    Ok(())
}
