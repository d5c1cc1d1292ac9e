use courtside_base::Rect;

use super::letterbox::Letterbox;
use super::types::{BoundingBox, Keypoint, PersonPose, PoseResult, RawDetection};

/// Map one model-space candidate back to source-frame pixels.
pub fn unmap_detection(detection: &RawDetection, letterbox: &Letterbox) -> PersonPose {
    let model_box = Rect::from_center(detection.center, detection.size);
    let origin = letterbox.to_source(model_box.origin);
    let size = letterbox.length_to_source(model_box.size);

    let keypoints = detection.keypoints.map(|kp| Keypoint {
        position: letterbox.to_source(kp.position),
        confidence: kp.confidence,
    });

    PersonPose {
        bbox: BoundingBox {
            x: origin.x,
            y: origin.y,
            width: size.x,
            height: size.y,
            confidence: detection.confidence,
        },
        keypoints,
    }
}

/// Map every survivor back to source pixels, preserving order.
pub fn unmap(detections: Vec<RawDetection>, letterbox: &Letterbox) -> PoseResult {
    detections
        .iter()
        .map(|detection| unmap_detection(detection, letterbox))
        .collect()
}
