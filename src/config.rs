use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_sound")]
    pub sound: bool,
    #[serde(default = "default_target_wpm")]
    pub target_wpm: u32,
}

fn default_sound() -> bool {
    false
}
fn default_target_wpm() -> u32 {
    40
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sound: default_sound(),
            target_wpm: default_target_wpm(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if path.exists() {
            let content = fs::read_to_string(&path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    #[allow(dead_code)]
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("typedrill")
            .join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_serde_defaults_from_empty() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.sound, false);
        assert_eq!(config.target_wpm, 40);
    }

    #[test]
    fn test_config_serde_partial_file() {
        let config: Config = toml::from_str("target_wpm = 75").unwrap();
        assert_eq!(config.target_wpm, 75);
        assert_eq!(config.sound, false);
    }

    #[test]
    fn test_config_serde_roundtrip() {
        let config = Config {
            sound: true,
            target_wpm: 55,
        };
        let serialized = toml::to_string_pretty(&config).unwrap();
        let deserialized: Config = toml::from_str(&serialized).unwrap();
        assert_eq!(deserialized.sound, true);
        assert_eq!(deserialized.target_wpm, 55);
    }
}
