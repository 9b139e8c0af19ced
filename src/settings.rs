//! Game configuration
//!
//! Tunables are persisted as JSON in LocalStorage on the web; rule constants
//! live in `crate::consts`.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Error loading or validating a configuration
#[derive(Debug)]
pub enum ConfigError {
    /// JSON could not be parsed
    Parse(serde_json::Error),
    /// A field is out of range
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(e) => write!(f, "config parse error: {e}"),
            Self::Invalid { field, reason } => write!(f, "invalid config field `{field}`: {reason}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(e) => Some(e),
            Self::Invalid { .. } => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e)
    }
}

/// Gameplay tunables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Wall-clock period of the enemy spawn timer
    pub spawn_interval_ms: u32,
    /// Projectiles fired per click
    pub spray_count: u32,
    /// Half-width of the firing fan (radians)
    pub spray_spread: f32,
    /// Random angle jitter added to each projectile (radians, ±)
    pub spray_jitter: f32,
    /// Projectile speed, pixels per tick
    pub projectile_speed: f32,
    pub projectile_radius: f32,
    pub player_radius: f32,
    /// Click-to-move glide duration (0 disables gliding)
    pub player_glide_ms: f32,
    /// Enemy shrink animation duration (0 = instantaneous)
    pub enemy_shrink_ms: f32,
    /// Opacity of the background fill that leaves motion trails
    pub trail_alpha: f32,
    /// Particle cap (0 = unbounded); oldest particles are evicted first
    pub max_particles: usize,
    /// Fixed RNG seed (None = seeded from the clock)
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            spawn_interval_ms: 200,
            spray_count: 10,
            spray_spread: std::f32::consts::PI / 12.0,
            spray_jitter: 0.02,
            projectile_speed: 5.0,
            projectile_radius: 5.0,
            player_radius: 10.0,
            player_glide_ms: 0.0,
            enemy_shrink_ms: 200.0,
            trail_alpha: 0.1,
            max_particles: 0,
            seed: None,
        }
    }
}

impl GameConfig {
    /// The single-shot, slow-spawn variant
    pub fn classic() -> Self {
        Self {
            spawn_interval_ms: 1000,
            spray_count: 1,
            spray_spread: 0.0,
            spray_jitter: 0.0,
            enemy_shrink_ms: 0.0,
            ..Self::default()
        }
    }

    /// Parse and validate a JSON config; missing fields take defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |field, reason| Err(ConfigError::Invalid { field, reason });
        if self.spawn_interval_ms == 0 {
            return invalid("spawn_interval_ms", "must be positive");
        }
        if self.spray_count == 0 {
            return invalid("spray_count", "must be positive");
        }
        if !(self.projectile_speed > 0.0) {
            return invalid("projectile_speed", "must be positive");
        }
        if !(self.projectile_radius > 0.0) {
            return invalid("projectile_radius", "must be positive");
        }
        if !(self.player_radius > 0.0) {
            return invalid("player_radius", "must be positive");
        }
        if !(self.spray_spread >= 0.0) || !(self.spray_jitter >= 0.0) {
            return invalid("spray_spread", "angles must be non-negative");
        }
        if !(self.player_glide_ms >= 0.0) || !(self.enemy_shrink_ms >= 0.0) {
            return invalid("enemy_shrink_ms", "durations must be non-negative");
        }
        if !(0.0..=1.0).contains(&self.trail_alpha) {
            return invalid("trail_alpha", "must be within [0, 1]");
        }
        Ok(())
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "spray_shooter_config";

    /// Load config from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(config) => {
                        log::info!("Loaded config from LocalStorage");
                        return config;
                    }
                    Err(e) => log::warn!("Ignoring stored config: {}", e),
                }
            }
        }

        log::info!("Using default config");
        Self::default()
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(GameConfig::default().validate().is_ok());
        assert!(GameConfig::classic().validate().is_ok());
    }

    #[test]
    fn test_partial_json_takes_defaults() {
        let config = GameConfig::from_json(r#"{"spray_count": 3, "seed": 7}"#).unwrap();
        assert_eq!(config.spray_count, 3);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.spawn_interval_ms, 200);
    }

    #[test]
    fn test_rejects_zero_interval() {
        let err = GameConfig::from_json(r#"{"spawn_interval_ms": 0}"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "spawn_interval_ms",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = GameConfig::from_json("{not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().starts_with("config parse error"));
    }

    #[test]
    fn test_json_round_trip() {
        let config = GameConfig {
            max_particles: 300,
            ..GameConfig::classic()
        };
        let json = config.to_json().unwrap();
        assert_eq!(GameConfig::from_json(&json).unwrap(), config);
    }
}
