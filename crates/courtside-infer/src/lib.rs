pub mod backend;
pub mod backends;
pub mod config;
pub mod device;
pub mod error;
pub mod frame;
pub mod invoker;
pub mod modelsource;
pub mod pose;
pub mod session;

pub use backend::Backend;
pub use config::EstimatorConfig;
pub use device::Device;
pub use error::InferError;
pub use frame::{FrameSource, ImageFileSource, PixelBuffer, StillFrame};
pub use invoker::{PoseSession, INPUT_NAME, OUTPUT_NAME};
pub use modelsource::ModelSource;
pub use session::Session;

#[cfg(feature = "onnx")]
pub use backends::OnnxBackend;

pub use pose::{
    decode, iou, postprocess, preprocess, suppress, unmap, BoundingBox, Keypoint, KeypointIndex,
    Letterbox, PersonPose, PoseEstimator, PoseResult, Preprocessed, RawDetection,
    COCO_KEYPOINT_COUNT, NUM_CANDIDATES,
};
