use crate::{Backend, EstimatorConfig, FrameSource, InferError, ModelSource, PixelBuffer, PoseSession};
use courtside_base::Tensor;

use super::decode::decode_tensor;
use super::letterbox::Letterbox;
use super::nms::suppress;
use super::preprocess::preprocess;
use super::types::PoseResult;
use super::unmap::unmap;

/// Full pose pipeline: letterbox, inference, decode, suppression, unmapping.
///
/// The model is loaded lazily on first use and kept in the shared
/// [`PoseSession`], so clones of the session across estimators reuse it.
pub struct PoseEstimator {
    session: PoseSession,
    model: ModelSource,
    config: EstimatorConfig,
}

impl PoseEstimator {
    /// Create an estimator with default thresholds (conf 0.5, IoU 0.45).
    pub fn new(model: impl Into<ModelSource>, backend: impl Backend + 'static) -> Self {
        Self::with_session(model, PoseSession::new(backend))
    }

    /// Create an estimator over an existing session handle.
    pub fn with_session(model: impl Into<ModelSource>, session: PoseSession) -> Self {
        Self {
            session,
            model: model.into(),
            config: EstimatorConfig::default(),
        }
    }

    pub fn with_config(mut self, config: EstimatorConfig) -> Self {
        self.config = config;
        self
    }

    /// Set confidence threshold (builder pattern)
    pub fn with_conf_threshold(mut self, threshold: f32) -> Self {
        self.config = self.config.with_conf_threshold(threshold);
        self
    }

    /// Set NMS IoU threshold (builder pattern)
    pub fn with_iou_threshold(mut self, threshold: f32) -> Self {
        self.config = self.config.with_iou_threshold(threshold);
        self
    }

    pub fn config(&self) -> &EstimatorConfig {
        &self.config
    }

    pub fn model(&self) -> &ModelSource {
        &self.model
    }

    pub fn session(&self) -> &PoseSession {
        &self.session
    }

    /// Load the model now instead of on the first `estimate`.
    pub async fn load(&self) -> Result<(), InferError> {
        self.session.load_model(&self.model).await
    }

    /// Detect every person in a frame, in source-frame pixels.
    ///
    /// Returns `InferError::Busy` if another estimate on the same session is
    /// still running.
    pub async fn estimate(&self, frame: &PixelBuffer) -> Result<PoseResult, InferError> {
        self.config.validate()?;
        self.load().await?;

        let side = self.config.side();
        let input = preprocess(frame, side)?;
        let output = self.session.run_inference(input.tensor, side).await?;
        postprocess(&output, &input.letterbox, &self.config)
    }

    /// Capture the current frame from `source` and estimate on it.
    pub async fn estimate_from(
        &self,
        source: &mut dyn FrameSource,
    ) -> Result<PoseResult, InferError> {
        let frame = source.capture()?;
        self.estimate(&frame).await
    }
}

/// Turn a raw `[1, 56, N]` model output into persons in source pixels.
pub fn postprocess(
    output: &Tensor<f32>,
    letterbox: &Letterbox,
    config: &EstimatorConfig,
) -> Result<PoseResult, InferError> {
    let candidates = decode_tensor(output, config.num_candidates(), config.conf_threshold())?;
    let decoded = candidates.len();
    let survivors = suppress(candidates, config.iou_threshold());
    log::debug!(
        "{} candidates above {:.2}, {} after suppression",
        decoded,
        config.conf_threshold(),
        survivors.len()
    );
    Ok(unmap(survivors, letterbox))
}
