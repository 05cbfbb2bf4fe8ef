//! Configuration schema for cachetree
//!
//! Configuration is stored at `~/.config/cachetree/config.toml`

use serde::{Deserialize, Serialize};

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General settings
    pub general: GeneralConfig,

    /// Builder settings
    pub builder: BuilderConfig,

    /// Table display settings
    pub display: DisplayConfig,
}

/// General application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log format: "text" or "json"
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_format: "text".to_string(),
        }
    }
}

impl GeneralConfig {
    pub fn json_logs(&self) -> bool {
        self.log_format.eq_ignore_ascii_case("json")
    }
}

/// Which builder to talk to
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BuilderConfig {
    /// Docker CLI binary providing `buildx`
    pub binary: String,

    /// Builder name (current builder when unset)
    pub name: Option<String>,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            binary: "docker".to_string(),
            name: None,
        }
    }
}

/// Table display settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Description column width (0 = unlimited)
    pub description_width: usize,

    /// Color multi-parent and multi-child groups
    pub colors: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            description_width: 60,
            colors: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_serializes() {
        let config = Config::default();
        let toml = toml::to_string_pretty(&config).unwrap();
        assert!(toml.contains("[general]"));
        assert!(toml.contains("[builder]"));
        assert!(toml.contains("[display]"));
    }

    #[test]
    fn config_deserializes_empty() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.builder.binary, "docker");
        assert_eq!(config.display.description_width, 60);
        assert!(!config.general.json_logs());
    }

    #[test]
    fn config_deserializes_partial() {
        let toml = r#"
            [builder]
            name = "ci-builder"

            [general]
            log_format = "JSON"
        "#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.builder.name.as_deref(), Some("ci-builder"));
        assert_eq!(config.builder.binary, "docker"); // default preserved
        assert!(config.display.colors);
        assert!(config.general.json_logs());
    }
}
