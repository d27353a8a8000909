//! Tunable parameters for the region pipelines and the end-to-end analysis.
//!
//! Every type here derives serde so a full [`AnalysisConfig`] can be stored as
//! JSON and passed to the CLI with `--config`. The defaults are the presets the
//! analysis was tuned with.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Closed `[min, max]` intervals on the 8-bit HSV channels.
///
/// Hue is measured in half-degrees (0..=179), saturation and value in 0..=255.
/// `min <= max` is not checked.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdRange {
    pub hue: [f64; 2],
    pub saturation: [f64; 2],
    pub value: [f64; 2],
}

impl ThresholdRange {
    pub fn contains(&self, h: u8, s: u8, v: u8) -> bool {
        within(h as f64, self.hue) && within(s as f64, self.saturation) && within(v as f64, self.value)
    }
}

/// Geometric bounds a contour must satisfy to survive filtering. All inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub min_area: f64,
    pub min_perimeter: f64,
    pub min_width: f64,
    pub max_width: f64,
    pub min_height: f64,
    pub max_height: f64,
    /// Solidity bounds in percent.
    pub solidity: [f64; 2],
    pub min_vertices: usize,
    pub max_vertices: usize,
    pub min_ratio: f64,
    pub max_ratio: f64,
}

/// Configuration of one region pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub threshold: ThresholdRange,
    /// Only report outermost borders when true.
    pub external_only: bool,
    pub filter: FilterCriteria,
}

impl PipelineConfig {
    /// Reference card: bright, nearly unsaturated pixels.
    pub fn background() -> Self {
        Self {
            threshold: ThresholdRange {
                hue: [0.0, 255.0],
                saturation: [0.0, 60.0],
                value: [100.0, 255.0],
            },
            external_only: true,
            filter: FilterCriteria {
                min_area: 1000.0,
                min_perimeter: 100.0,
                min_width: 0.0,
                max_width: 100_000.0,
                min_height: 0.0,
                max_height: 100_000.0,
                solidity: [0.0, 100.0],
                min_vertices: 0,
                max_vertices: 1_000_000,
                min_ratio: 0.0,
                max_ratio: 1000.0,
            },
        }
    }

    /// Reactive test area: saturated and reasonably bright.
    pub fn center() -> Self {
        Self {
            threshold: ThresholdRange {
                hue: [0.0, 255.0],
                saturation: [95.0, 255.0],
                value: [130.0, 255.0],
            },
            external_only: false,
            filter: FilterCriteria {
                min_area: 100.0,
                min_perimeter: 100.0,
                min_width: 0.0,
                max_width: 1000.0,
                min_height: 0.0,
                max_height: 1000.0,
                solidity: [0.0, 100.0],
                min_vertices: 0,
                max_vertices: 1_000_000,
                min_ratio: 0.0,
                max_ratio: 1000.0,
            },
        }
    }
}

/// Where the remap black reference comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlackPoint {
    /// Pure black.
    #[default]
    Zero,
    /// Per-channel minimum of the levelled image.
    Darkest,
}

/// Which background measurement becomes the remap white reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WhitePoint {
    /// Background measured on the input image, before levelling.
    #[default]
    Initial,
    /// Background re-measured on the levelled image.
    Leveled,
}

/// Complete configuration for [`crate::PhPipeline`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    pub background: PipelineConfig,
    pub center: PipelineConfig,
    #[serde(default)]
    pub white_point: WhitePoint,
    #[serde(default)]
    pub black_point: BlackPoint,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            background: PipelineConfig::background(),
            center: PipelineConfig::center(),
            white_point: WhitePoint::Initial,
            black_point: BlackPoint::Zero,
        }
    }
}

impl AnalysisConfig {
    /// Load configuration from JSON file
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Save configuration to JSON file
    pub fn to_json_file(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

pub(crate) fn within(value: f64, bounds: [f64; 2]) -> bool {
    value >= bounds[0] && value <= bounds[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_bounds_are_inclusive() {
        let range = ThresholdRange {
            hue: [10.0, 20.0],
            saturation: [95.0, 255.0],
            value: [130.0, 200.0],
        };
        assert!(range.contains(10, 95, 130));
        assert!(range.contains(20, 255, 200));
        assert!(!range.contains(9, 95, 130));
        assert!(!range.contains(21, 95, 130));
        assert!(!range.contains(15, 94, 150));
        assert!(!range.contains(15, 100, 201));
    }

    #[test]
    fn test_center_preset_values() {
        let config = PipelineConfig::center();
        assert_eq!(config.threshold.saturation, [95.0, 255.0]);
        assert_eq!(config.threshold.value, [130.0, 255.0]);
        assert!(!config.external_only);
        assert_eq!(config.filter.min_area, 100.0);
        assert_eq!(config.filter.min_perimeter, 100.0);
        assert_eq!(config.filter.max_vertices, 1_000_000);
    }

    #[test]
    fn test_json_file_roundtrip() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.json");

        let mut config = AnalysisConfig::default();
        config.white_point = WhitePoint::Leveled;
        config.black_point = BlackPoint::Darkest;
        config.to_json_file(&path).unwrap();

        let loaded = AnalysisConfig::from_json_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_reference_points_default_when_missing() {
        let mut config = AnalysisConfig::default();
        config.white_point = WhitePoint::Leveled;
        config.black_point = BlackPoint::Darkest;

        let mut value = serde_json::to_value(&config).unwrap();
        let object = value.as_object_mut().unwrap();
        assert_eq!(object["white_point"], serde_json::json!("leveled"));
        object.remove("white_point");
        object.remove("black_point");

        let config: AnalysisConfig = serde_json::from_value(value).unwrap();
        assert_eq!(config.white_point, WhitePoint::Initial);
        assert_eq!(config.black_point, BlackPoint::Zero);
    }
}
