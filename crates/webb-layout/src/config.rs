//! Tunable constants of a layout build.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Largest fixed-point scale whose radii still fit in `i16`.
///
/// The farthest point sits on a corner of the normalized square, at
/// `scale * sqrt(2)`, which must stay below `i16::MAX`.
pub const MAX_SCALE: u16 = 16384;

/// Configuration for a layout build.
///
/// Missing fields in a config file take the defaults, which reproduce the
/// webb panel table exactly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Height of one hexagon, flat side to flat side, in millimetres.
    pub hex_height: f64,
    /// LEDs placed along a hex side when a token carries no explicit count.
    pub leds_per_segment: usize,
    /// Neighbor search radius as a multiple of the nominal LED spacing.
    pub proximity_factor: f64,
    /// Fixed-point units for the largest coordinate and for one full turn.
    pub scale: u16,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            hex_height: 178.3,
            leds_per_segment: 13,
            proximity_factor: 1.5,
            scale: MAX_SCALE,
        }
    }
}

impl LayoutConfig {
    /// Load a config from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would make the geometry or the table meaningless.
    pub fn validate(&self) -> Result<()> {
        if !(self.hex_height.is_finite() && self.hex_height > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "hex_height must be positive, got {}",
                self.hex_height
            )));
        }
        if self.leds_per_segment == 0 {
            return Err(Error::InvalidConfig(
                "leds_per_segment must be at least 1".to_string(),
            ));
        }
        if !(self.proximity_factor.is_finite() && self.proximity_factor > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "proximity_factor must be positive, got {}",
                self.proximity_factor
            )));
        }
        if self.scale == 0 || self.scale > MAX_SCALE {
            return Err(Error::ScaleOverflow {
                value: f64::from(self.scale),
                scale: self.scale,
            });
        }
        Ok(())
    }

    /// Length of one hex side, derived from the height.
    pub fn hex_side(&self) -> f64 {
        self.hex_height * 30f64.to_radians().tan()
    }

    /// Distance between consecutive LEDs on a default-count side.
    pub fn nominal_spacing(&self) -> f64 {
        self.hex_side() / self.leds_per_segment as f64
    }

    /// Neighbor search radius used by adjacency resolution.
    pub fn proximity_threshold(&self) -> f64 {
        self.proximity_factor * self.nominal_spacing()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        LayoutConfig::default().validate().unwrap();
    }

    #[test]
    fn hex_side_matches_height() {
        let config = LayoutConfig::default();
        // side = height / sqrt(3)
        assert!((config.hex_side() - 178.3 / 3f64.sqrt()).abs() < 1e-9);
    }

    #[test]
    fn rejects_zero_leds() {
        let config = LayoutConfig {
            leds_per_segment: 0,
            ..LayoutConfig::default()
        };
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn rejects_oversized_scale() {
        let config = LayoutConfig {
            scale: MAX_SCALE + 1,
            ..LayoutConfig::default()
        };
        assert!(matches!(config.validate(), Err(Error::ScaleOverflow { .. })));
    }

    #[test]
    fn partial_json_takes_defaults() {
        let config: LayoutConfig = serde_json::from_str(r#"{ "proximity_factor": 1.2 }"#).unwrap();
        assert_eq!(config.proximity_factor, 1.2);
        assert_eq!(config.leds_per_segment, 13);
        assert_eq!(config.scale, MAX_SCALE);
    }

    #[test]
    fn loads_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("layout.json");
        std::fs::write(&path, r#"{ "hex_height": 100.0, "leds_per_segment": 8 }"#).unwrap();

        let config = LayoutConfig::from_file(&path).unwrap();
        assert_eq!(config.hex_height, 100.0);
        assert_eq!(config.leds_per_segment, 8);
    }
}
