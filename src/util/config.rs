//! Configuration file support for nestbuild.
//!
//! nestbuild reads two configuration file locations:
//! - Global: `~/.nestbuild/config.toml` - User-wide defaults
//! - Project: `.nestbuild/config.toml` next to Solution.toml - Project-specific overrides
//!
//! Project config takes precedence over global config.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::resolver::SupportedConfigurations;

/// nestbuild configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Which build configurations are recognized
    pub configurations: ConfigurationsConfig,

    /// Output settings
    pub output: OutputConfig,
}

/// Build configuration filtering.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigurationsConfig {
    /// Recognized configuration names (empty = all)
    pub supported: Vec<String>,
}

/// Output format for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Output-related configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format
    pub format: Option<OutputFormat>,
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Load configuration with fallback to defaults if file doesn't exist.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {:#}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: Config) {
        if !other.configurations.supported.is_empty() {
            self.configurations.supported = other.configurations.supported;
        }
        if other.output.format.is_some() {
            self.output.format = other.output.format;
        }
    }

    /// The configuration policy this config describes.
    pub fn policy(&self) -> SupportedConfigurations {
        SupportedConfigurations::new(self.configurations.supported.iter().cloned())
    }

    /// Effective output format.
    pub fn output_format(&self) -> OutputFormat {
        self.output.format.unwrap_or_default()
    }
}

/// Get the global nestbuild config directory (~/.nestbuild).
pub fn global_config_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(".nestbuild"))
}

/// Get the global config path (~/.nestbuild/config.toml).
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("config.toml"))
}

/// Get the project config path (.nestbuild/config.toml).
pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(".nestbuild").join("config.toml")
}

/// Load merged configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (.nestbuild/config.toml)
/// 2. Global config (~/.nestbuild/config.toml)
/// 3. Defaults
pub fn load_config(global_path: Option<&Path>, project_path: &Path) -> Config {
    let mut config = Config::default();

    if let Some(global_path) = global_path {
        config.merge(Config::load_or_default(global_path));
    }

    config.merge(Config::load_or_default(project_path));

    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::ConfigurationPolicy;
    use tempfile::TempDir;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.configurations.supported.is_empty());
        assert_eq!(config.output_format(), OutputFormat::Text);
        assert!(config.policy().is_supported("Anything"));
    }

    #[test]
    fn test_config_load() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.toml");

        std::fs::write(
            &config_path,
            r#"
[configurations]
supported = ["Debug", "Release"]

[output]
format = "json"
"#,
        )
        .unwrap();

        let config = Config::load(&config_path).unwrap();
        assert_eq!(config.configurations.supported, vec!["Debug", "Release"]);
        assert_eq!(config.output_format(), OutputFormat::Json);

        let policy = config.policy();
        assert!(policy.is_supported("Release"));
        assert!(!policy.is_supported("Profile"));
    }

    #[test]
    fn test_config_merge() {
        let mut base = Config::default();
        base.configurations.supported = vec!["Debug".to_string()];
        base.output.format = Some(OutputFormat::Json);

        let mut override_cfg = Config::default();
        override_cfg.configurations.supported = vec!["Release".to_string()];

        base.merge(override_cfg);

        assert_eq!(base.configurations.supported, vec!["Release"]);
        assert_eq!(base.output_format(), OutputFormat::Json); // Not overridden
    }

    #[test]
    fn test_project_overrides_global() {
        let tmp = TempDir::new().unwrap();
        let global = tmp.path().join("global.toml");
        let project = project_config_path(tmp.path());
        std::fs::create_dir_all(project.parent().unwrap()).unwrap();

        std::fs::write(&global, "[configurations]\nsupported = [\"Debug\"]\n").unwrap();
        std::fs::write(&project, "[configurations]\nsupported = [\"Release\"]\n").unwrap();

        let config = load_config(Some(&global), &project);
        assert_eq!(config.configurations.supported, vec!["Release"]);
    }

    #[test]
    fn test_broken_config_falls_back_to_default() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(&path, "configurations = 7").unwrap();

        let config = Config::load_or_default(&path);
        assert!(config.configurations.supported.is_empty());
    }
}
