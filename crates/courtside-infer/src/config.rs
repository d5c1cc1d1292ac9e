use crate::InferError;
use crate::pose::NUM_CANDIDATES;
use serde::Deserialize;
use std::path::Path;

/// Tunables for the pose estimation pipeline.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct EstimatorConfig {
    side: usize,
    conf_threshold: f32,
    iou_threshold: f32,
    num_candidates: usize,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            side: 640,
            conf_threshold: 0.5,
            iou_threshold: 0.45,
            num_candidates: NUM_CANDIDATES,
        }
    }
}

impl EstimatorConfig {
    /// Read a JSON config file. Missing fields keep their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, InferError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| InferError::Config(format!("failed to read {}: {}", path.display(), e)))?;
        Self::from_json(&json)
    }

    pub fn from_json(json: &str) -> Result<Self, InferError> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| InferError::Config(format!("failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every field is usable by the pipeline.
    pub fn validate(&self) -> Result<(), InferError> {
        if self.side == 0 {
            return Err(InferError::Config("side must be positive".to_string()));
        }
        if self.num_candidates == 0 {
            return Err(InferError::Config("num_candidates must be positive".to_string()));
        }
        for (name, value) in [
            ("conf_threshold", self.conf_threshold),
            ("iou_threshold", self.iou_threshold),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(InferError::Config(format!(
                    "{name} must be within [0, 1], got {value}"
                )));
            }
        }
        Ok(())
    }

    /// Set the square model input resolution.
    pub fn with_side(mut self, side: usize) -> Self {
        self.side = side;
        self
    }

    /// Set the minimum candidate confidence kept by the decoder.
    pub fn with_conf_threshold(mut self, threshold: f32) -> Self {
        self.conf_threshold = threshold;
        self
    }

    /// Set the IoU above which a lower-confidence candidate is suppressed.
    pub fn with_iou_threshold(mut self, threshold: f32) -> Self {
        self.iou_threshold = threshold;
        self
    }

    /// Set the number of grid candidates the model emits.
    pub fn with_num_candidates(mut self, num_candidates: usize) -> Self {
        self.num_candidates = num_candidates;
        self
    }

    // Getters
    pub fn side(&self) -> usize {
        self.side
    }

    pub fn conf_threshold(&self) -> f32 {
        self.conf_threshold
    }

    pub fn iou_threshold(&self) -> f32 {
        self.iou_threshold
    }

    pub fn num_candidates(&self) -> usize {
        self.num_candidates
    }
}
