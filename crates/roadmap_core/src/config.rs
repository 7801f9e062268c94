//! Store and generator configuration.
//!
//! # Responsibility
//! - Name the persisted keys and defaults the store relies on.
//! - Hold the mock generation delay.
//!
//! # Invariants
//! - Storage keys carry a version suffix; an incompatible schema change gets a
//!   new key instead of migrating the old blob.

use crate::model::preference::Theme;
use serde::Deserialize;
use std::time::Duration;

/// Key holding the JSON array of saved roadmaps.
pub const ROADMAPS_KEY: &str = "ai_roadmaps_v1";
/// Key holding the plain theme string.
pub const THEME_KEY: &str = "ai_theme_v1";
/// Delay simulating a remote generation call.
pub const DEFAULT_MOCK_DELAY_MS: u64 = 2_000;
/// Environment override for `GeneratorConfig::mock_delay_ms`.
pub const MOCK_DELAY_ENV: &str = "ROADMAP_MOCK_DELAY_MS";

/// Key layout and defaults for `RoadmapStore`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub roadmaps_key: String,
    pub theme_key: String,
    pub default_theme: Theme,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            roadmaps_key: ROADMAPS_KEY.to_string(),
            theme_key: THEME_KEY.to_string(),
            default_theme: Theme::Light,
        }
    }
}

/// Settings for `TemplateGenerator`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub mock_delay_ms: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            mock_delay_ms: DEFAULT_MOCK_DELAY_MS,
        }
    }
}

impl GeneratorConfig {
    /// Generator without simulated latency.
    pub fn immediate() -> Self {
        Self { mock_delay_ms: 0 }
    }

    /// Reads `ROADMAP_MOCK_DELAY_MS`, falling back to the default when the
    /// variable is unset or not a non-negative integer.
    pub fn from_env() -> Self {
        std::env::var(MOCK_DELAY_ENV)
            .ok()
            .and_then(|raw| raw.trim().parse::<u64>().ok())
            .map_or_else(Self::default, |mock_delay_ms| Self { mock_delay_ms })
    }

    pub fn mock_delay(&self) -> Duration {
        Duration::from_millis(self.mock_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::{GeneratorConfig, StoreConfig, ROADMAPS_KEY};
    use crate::model::preference::Theme;

    #[test]
    fn partial_store_config_keeps_defaults() {
        let config: StoreConfig =
            serde_json::from_str(r#"{"default_theme":"dark"}"#).expect("config should parse");
        assert_eq!(config.roadmaps_key, ROADMAPS_KEY);
        assert_eq!(config.default_theme, Theme::Dark);
    }

    #[test]
    fn immediate_generator_has_zero_delay() {
        assert!(GeneratorConfig::immediate().mock_delay().is_zero());
        assert_eq!(GeneratorConfig::default().mock_delay().as_millis(), 2_000);
    }
}
