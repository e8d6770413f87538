use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::labeling::domain::temporal_smoother::NoConsensusPolicy;
use crate::shared::constants::{
    DEFAULT_BUFFER_SIZE, DEFAULT_CELL_SIZE, DEFAULT_GENDER_CONSENSUS, DEFAULT_MIN_CONFIDENCE,
    DEFAULT_MIN_FACE_CONFIDENCE, DEFAULT_PAD_HEIGHT_RATIO, DEFAULT_PAD_WIDTH_RATIO,
    DEFAULT_PREDICTION_INTERVAL,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Tunables for one labeling run. Missing JSON fields take their defaults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelingConfig {
    /// Identity grid cell edge in pixels.
    pub cell_size: i32,
    /// Samples kept per identity.
    pub buffer_size: usize,
    /// Classifier confidence that must be exceeded once an identity is labeled.
    pub min_confidence: f64,
    /// Detector score below which faces are ignored.
    pub min_face_confidence: f64,
    /// Classify every Nth frame.
    pub prediction_interval: usize,
    pub gender_consensus: f64,
    pub no_consensus: NoConsensusPolicy,
    pub pad_width_ratio: f64,
    pub pad_height_ratio: f64,
}

impl Default for LabelingConfig {
    fn default() -> Self {
        Self {
            cell_size: DEFAULT_CELL_SIZE,
            buffer_size: DEFAULT_BUFFER_SIZE,
            min_confidence: DEFAULT_MIN_CONFIDENCE,
            min_face_confidence: DEFAULT_MIN_FACE_CONFIDENCE,
            prediction_interval: DEFAULT_PREDICTION_INTERVAL,
            gender_consensus: DEFAULT_GENDER_CONSENSUS,
            no_consensus: NoConsensusPolicy::default(),
            pad_width_ratio: DEFAULT_PAD_WIDTH_RATIO,
            pad_height_ratio: DEFAULT_PAD_HEIGHT_RATIO,
        }
    }
}

impl LabelingConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cell_size < 1 {
            return Err(invalid("cell_size", format!("must be >= 1, got {}", self.cell_size)));
        }
        if self.buffer_size < 1 {
            return Err(invalid("buffer_size", "must be >= 1".to_string()));
        }
        if self.prediction_interval < 1 {
            return Err(invalid("prediction_interval", "must be >= 1".to_string()));
        }
        for (field, value) in [
            ("min_confidence", self.min_confidence),
            ("min_face_confidence", self.min_face_confidence),
            ("gender_consensus", self.gender_consensus),
            ("pad_width_ratio", self.pad_width_ratio),
            ("pad_height_ratio", self.pad_height_ratio),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(invalid(field, format!("must be between 0.0 and 1.0, got {value}")));
            }
        }
        Ok(())
    }
}

fn invalid(field: &'static str, reason: String) -> ConfigError {
    ConfigError::Invalid { field, reason }
}
