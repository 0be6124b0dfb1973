//! Config loading, validation, and discovery.

use super::model::GateConfig;
use crate::error::{GateError, Result};
use std::path::{Path, PathBuf};

/// File name looked up in the current directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "execgate.yaml";

impl GateConfig {
    /// Load config from a YAML file.
    ///
    /// Unknown fields in the YAML are silently ignored for forward compatibility.
    ///
    /// # Returns
    ///
    /// * `Ok(GateConfig)` - Successfully loaded and validated config
    /// * `Err(GateError::ConfigError)` - Read error, parse error or validation failure
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            GateError::ConfigError(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Resolve the effective config: an explicit path wins, then
    /// `execgate.yaml` in `dir`, then built-in defaults.
    pub fn discover(explicit: Option<&Path>, dir: &Path) -> Result<(Self, Option<PathBuf>)> {
        if let Some(path) = explicit {
            return Ok((Self::load(path)?, Some(path.to_path_buf())));
        }

        let candidate = dir.join(DEFAULT_CONFIG_FILE);
        if candidate.is_file() {
            return Ok((Self::load(&candidate)?, Some(candidate)));
        }

        Ok((Self::default(), None))
    }

    /// Parse config from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        // An empty file means all defaults.
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: GateConfig = serde_yaml::from_str(yaml)
            .map_err(|e| GateError::ConfigError(format!("failed to parse config YAML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Serialize config to YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| {
            GateError::ConfigError(format!("failed to serialize config to YAML: {}", e))
        })
    }

    /// Validate config values.
    ///
    /// Validation rules:
    /// - `max_timeout` and `max_output_size` must be positive
    /// - `blocked_patterns` and `allowed_commands` entries must be non-empty
    /// - `allowed_commands` entries are basenames, not paths
    /// - `scratch_directories` entries must be absolute
    pub fn validate(&self) -> Result<()> {
        if self.max_timeout == 0 {
            return Err(GateError::ConfigError(
                "max_timeout must be greater than 0".to_string(),
            ));
        }

        if self.max_output_size == 0 {
            return Err(GateError::ConfigError(
                "max_output_size must be greater than 0".to_string(),
            ));
        }

        if self.blocked_patterns.iter().any(|p| p.is_empty()) {
            return Err(GateError::ConfigError(
                "blocked_patterns entries must be non-empty (an empty pattern blocks everything)"
                    .to_string(),
            ));
        }

        for command in &self.allowed_commands {
            if command.is_empty() {
                return Err(GateError::ConfigError(
                    "allowed_commands entries must be non-empty".to_string(),
                ));
            }
            if command.contains('/') || command.contains('\\') {
                return Err(GateError::ConfigError(format!(
                    "allowed_commands entries must be basenames (found '{}'). Use '{}' instead.",
                    command,
                    Path::new(command)
                        .file_name()
                        .map(|n| n.to_string_lossy().into_owned())
                        .unwrap_or_default()
                )));
            }
        }

        for dir in &self.scratch_directories {
            if !dir.is_absolute() {
                return Err(GateError::ConfigError(format!(
                    "scratch_directories entries must be absolute (found '{}')",
                    dir.display()
                )));
            }
        }

        Ok(())
    }
}
