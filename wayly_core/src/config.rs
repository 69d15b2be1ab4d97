//! Configuration file support for Wayly.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/wayly/config.toml`.

use crate::types::{Speed, UserProfile};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub profile: ProfileConfig,

    #[serde(default)]
    pub advisory: AdvisoryConfig,
}

/// Initial movement-profile defaults applied at session start
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProfileConfig {
    #[serde(default = "default_max_walking_distance_m")]
    pub max_walking_distance_m: f64,

    #[serde(default = "default_speed")]
    pub speed: Speed,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            max_walking_distance_m: default_max_walking_distance_m(),
            speed: default_speed(),
        }
    }
}

/// Advisory trigger configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AdvisoryConfig {
    /// Quiescence window before a fetch is dispatched
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

impl Default for AdvisoryConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
        }
    }
}

impl AdvisoryConfig {
    pub fn window(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

// Default value functions
fn default_max_walking_distance_m() -> f64 {
    1000.0
}

fn default_speed() -> Speed {
    Speed::Comfortable
}

fn default_debounce_ms() -> u64 {
    300
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::info!(
                "No config file found at {:?}, using defaults",
                config_path
            );
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        let base = dirs::config_dir().unwrap_or_else(|| {
            let home = std::env::var("HOME")
                .expect("HOME environment variable not set");
            PathBuf::from(home).join(".config")
        });
        base.join("wayly").join("config.toml")
    }

    /// Save the current configuration to the default path
    pub fn save(&self) -> Result<()> {
        let config_path = Self::default_config_path();
        self.save_to(&config_path)
    }

    /// Save the current configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }

    /// The session-start profile derived from configured defaults
    pub fn initial_profile(&self) -> UserProfile {
        let mut profile = UserProfile::default();
        profile.movement.max_walking_distance = Some(self.profile.max_walking_distance_m);
        profile.speed = self.profile.speed;
        profile.normalized()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.profile.max_walking_distance_m, 1000.0);
        assert_eq!(config.profile.speed, Speed::Comfortable);
        assert_eq!(config.advisory.debounce_ms, 300);
    }

    #[test]
    fn test_config_roundtrip() {
        let config = Config::default();
        let toml_str = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();

        assert_eq!(config.advisory.debounce_ms, parsed.advisory.debounce_ms);
        assert_eq!(config.profile.speed, parsed.profile.speed);
    }

    #[test]
    fn test_partial_config() {
        let toml_str = r#"
[advisory]
debounce_ms = 150
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.advisory.debounce_ms, 150);
        assert_eq!(config.profile.max_walking_distance_m, 1000.0); // default
    }

    #[test]
    fn test_initial_profile_from_config() {
        let toml_str = r#"
[profile]
max_walking_distance_m = 500.0
speed = "slow"
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        let profile = config.initial_profile();
        assert_eq!(profile.movement.max_walking_distance, Some(500.0));
        assert_eq!(profile.speed, Speed::Slow);
    }

    #[test]
    fn test_malformed_profile_config_is_normalized() {
        let toml_str = r#"
[profile]
max_walking_distance_m = -200.0
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.initial_profile().movement.max_walking_distance, None);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[advisory]\ndebounce_ms = 50\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.advisory.window(), Duration::from_millis(50));
    }
}
