use crate::InferError;
use courtside_base::{Tensor, Vec2};

use super::types::{Keypoint, RawDetection, COCO_KEYPOINT_COUNT};

/// Grid candidates emitted by a 640x640 pose model.
pub const NUM_CANDIDATES: usize = 8400;

const BOX_FIELDS: usize = 5;
const KEYPOINT_FIELDS: usize = 3;

/// Fields per candidate: box (cx, cy, w, h, conf) then 17 x (x, y, conf).
pub const CANDIDATE_FIELDS: usize = BOX_FIELDS + COCO_KEYPOINT_COUNT * KEYPOINT_FIELDS;

/// Decode a flat field-major `[1, 56, n]` output into candidates.
///
/// Field `f` of candidate `i` lives at `output[f * n + i]`. Candidates whose
/// confidence is below `conf_threshold` are dropped; one exactly at the
/// threshold is kept. Surviving candidates stay in grid order.
pub fn decode(
    output: &[f32],
    n: usize,
    conf_threshold: f32,
) -> Result<Vec<RawDetection>, InferError> {
    let expected = CANDIDATE_FIELDS * n;
    if output.len() != expected {
        return Err(InferError::ShapeMismatch {
            expected: format!("{CANDIDATE_FIELDS} x {n} = {expected} values"),
            got: format!("{} values", output.len()),
        });
    }

    let field = |f: usize, i: usize| output[f * n + i];
    let mut detections = Vec::new();
    for i in 0..n {
        let confidence = field(4, i);
        if confidence < conf_threshold {
            continue;
        }

        let keypoints = std::array::from_fn(|k| {
            let base = BOX_FIELDS + k * KEYPOINT_FIELDS;
            Keypoint {
                position: Vec2::new(field(base, i), field(base + 1, i)),
                confidence: field(base + 2, i),
            }
        });

        detections.push(RawDetection {
            center: Vec2::new(field(0, i), field(1, i)),
            size: Vec2::new(field(2, i), field(3, i)),
            confidence,
            keypoints,
        });
    }

    Ok(detections)
}

/// Like [`decode`], but checks the tensor shape is `[1, 56, n]` first.
pub fn decode_tensor(
    output: &Tensor<f32>,
    n: usize,
    conf_threshold: f32,
) -> Result<Vec<RawDetection>, InferError> {
    if output.shape != [1, CANDIDATE_FIELDS, n] {
        return Err(InferError::ShapeMismatch {
            expected: format!("[1, {CANDIDATE_FIELDS}, {n}]"),
            got: format!("{:?}", output.shape),
        });
    }
    decode(&output.data, n, conf_threshold)
}
