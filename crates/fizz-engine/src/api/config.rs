use serde::{Deserialize, Serialize};

use crate::api::error::ConfigError;

/// When collision adjustments computed during a tick are applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionMode {
    /// Each pair is resolved the moment it is evaluated, so later pairs
    /// in the same tick see already-corrected positions.
    Immediate,
    /// Adjustments are recorded and applied together once every pair has
    /// been evaluated.
    #[default]
    Deferred,
}

/// Configuration for a world, provided by the host.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Gravity in world units/s². Negative pulls toward y = 0.
    pub gravity: f32,
    /// World width, used for anchored placement.
    pub world_width: f32,
    /// World height, used for anchored placement.
    pub world_height: f32,
    /// Collision application strategy.
    pub resolution: ResolutionMode,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            gravity: -100.0,
            world_width: 800.0,
            world_height: 600.0,
            resolution: ResolutionMode::Deferred,
        }
    }
}

impl WorldConfig {
    /// Parse and validate a config from a JSON string. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_gravity(mut self, gravity: f32) -> Self {
        self.gravity = gravity;
        self
    }

    pub fn with_extents(mut self, width: f32, height: f32) -> Self {
        self.world_width = width;
        self.world_height = height;
        self
    }

    pub fn with_resolution(mut self, resolution: ResolutionMode) -> Self {
        self.resolution = resolution;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.gravity.is_finite() {
            return Err(ConfigError::NonFinite("gravity"));
        }
        if !self.world_width.is_finite() || !self.world_height.is_finite() {
            return Err(ConfigError::InvalidWorld("world extents must be finite"));
        }
        if self.world_width < 0.0 || self.world_height < 0.0 {
            return Err(ConfigError::InvalidWorld("world extents must be non-negative"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = WorldConfig::default();
        assert_eq!(config.gravity, -100.0);
        assert_eq!(config.resolution, ResolutionMode::Deferred);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn parse_partial_json() {
        let config = WorldConfig::from_json(r#"{ "gravity": -50, "resolution": "immediate" }"#)
            .unwrap();
        assert_eq!(config.gravity, -50.0);
        assert_eq!(config.resolution, ResolutionMode::Immediate);
        assert_eq!(config.world_width, 800.0);
    }

    #[test]
    fn rejects_negative_extents() {
        let err = WorldConfig::from_json(r#"{ "world_width": -1 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidWorld(_)));
    }

    #[test]
    fn rejects_non_finite_values() {
        let err = WorldConfig::default().with_gravity(f32::NAN).validate().unwrap_err();
        assert!(matches!(err, ConfigError::NonFinite("gravity")));
        let err = WorldConfig::default()
            .with_extents(f32::INFINITY, 1.0)
            .validate()
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidWorld(_)));
    }

    #[test]
    fn rejects_malformed_json() {
        let err = WorldConfig::from_json("{ gravity: }").unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }
}
