use serde::{Deserialize, Serialize};

/// Default path checked when `PIKAVOLLEY_CONFIG` is unset.
const DEFAULT_CONFIG_PATH: &str = "config/pikavolley.toml";

/// Match-level settings, loadable from TOML.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// First side to reach this score wins the match.
    pub winning_score: u32,
    /// Seed for the engine's random source (boldness, AI coin flips, tie-breaks).
    pub seed: u64,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            winning_score: 15,
            seed: 0,
        }
    }
}

impl MatchConfig {
    /// Parse a config from TOML text. Missing keys take their defaults.
    pub fn from_toml_str(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Load config from `PIKAVOLLEY_CONFIG` or `config/pikavolley.toml`,
    /// falling back to defaults if the file is missing or unparseable.
    pub fn load() -> Self {
        let path = std::env::var("PIKAVOLLEY_CONFIG")
            .unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        match std::fs::read_to_string(&path) {
            Ok(content) => match Self::from_toml_str(&content) {
                Ok(cfg) => cfg,
                Err(e) => {
                    tracing::warn!("Failed to parse {path}: {e}, using defaults");
                    Self::default()
                },
            },
            Err(_) => Self::default(),
        }
    }
}
