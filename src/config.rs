//! Chart configuration
//! View box geometry, animation timing and CSV column names, loadable from JSON.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Space reserved around the plotting rectangle, in view box units.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct Margins {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            top: 10.0,
            right: 10.0,
            bottom: 350.0,
            left: 60.0,
        }
    }
}

/// CSV header names for the two fields the chart reads.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ColumnNames {
    pub disaster_type: String,
    pub year: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            disaster_type: "Disaster.Type".to_string(),
            year: "Start.Year".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// View box width; the chart is scaled to fit the panel.
    pub width: f32,
    pub height: f32,
    pub margins: Margins,
    /// Band padding as a fraction of the step, applied inside and outside.
    pub band_padding: f32,
    pub transition_ms: u64,
    pub tick_font_size: f32,
    /// Rotation of the category labels, in degrees (negative = counter-clockwise).
    pub label_rotation_deg: f32,
    pub columns: ColumnNames,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: 1500.0,
            height: 950.0,
            margins: Margins::default(),
            band_padding: 0.2,
            transition_ms: 1000,
            tick_font_size: 15.0,
            label_rotation_deg: -65.0,
            columns: ColumnNames::default(),
        }
    }
}

impl ChartConfig {
    /// Load a config file. Missing fields fall back to the defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let plot_w = self.width - self.margins.left - self.margins.right;
        let plot_h = self.height - self.margins.top - self.margins.bottom;
        if plot_w <= 0.0 || plot_h <= 0.0 {
            return Err(ConfigError::Invalid(
                "margins leave no room for the plot".to_string(),
            ));
        }
        if !(0.0..1.0).contains(&self.band_padding) {
            return Err(ConfigError::Invalid(format!(
                "band_padding must be in [0, 1), got {}",
                self.band_padding
            )));
        }
        Ok(())
    }

    pub fn transition_secs(&self) -> f64 {
        self.transition_ms as f64 / 1000.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn partial_json_keeps_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "transition_ms": 250, "margins": {{ "bottom": 200 }}, "columns": {{ "year": "Year" }} }}"#
        )
        .unwrap();

        let config = ChartConfig::from_file(file.path()).unwrap();
        assert_eq!(config.transition_ms, 250);
        assert_eq!(config.margins.bottom, 200.0);
        assert_eq!(config.margins.left, 60.0);
        assert_eq!(config.columns.year, "Year");
        assert_eq!(config.columns.disaster_type, "Disaster.Type");
        assert_eq!(config.width, 1500.0);
    }

    #[test]
    fn bad_padding_is_rejected() {
        let config = ChartConfig {
            band_padding: 1.5,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn oversized_margins_are_rejected() {
        let config = ChartConfig {
            margins: Margins {
                bottom: 1000.0,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();
        assert!(matches!(
            ChartConfig::from_file(file.path()),
            Err(ConfigError::Parse { .. })
        ));
    }
}
