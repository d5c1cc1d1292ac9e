mod decode;
mod estimator;
mod letterbox;
mod nms;
mod preprocess;
mod types;
mod unmap;

pub use decode::{decode, decode_tensor, CANDIDATE_FIELDS, NUM_CANDIDATES};
pub use estimator::{postprocess, PoseEstimator};
pub use letterbox::{Letterbox, PAD_COLOR};
pub use nms::{iou, suppress};
pub use preprocess::{letterbox_canvas, preprocess, Preprocessed};
pub use types::{
    BoundingBox, Keypoint, KeypointIndex, PersonPose, PoseResult, RawDetection,
    COCO_KEYPOINT_COUNT, COCO_KEYPOINT_NAMES, SKELETON,
};
pub use unmap::{unmap, unmap_detection};
