use crate::Device;
use courtside_base::TensorError;
use std::fmt;

#[derive(Debug)]
pub enum InferError {
    /// The model asset is missing or corrupt. Safe to retry.
    ModelLoad(String),
    /// Inference was attempted before any model was loaded.
    ModelNotLoaded,
    /// The engine faulted while running a loaded session.
    Session(String),
    /// Another inference is already running on this session handle.
    Busy,
    ShapeMismatch { expected: String, got: String },
    InvalidFrame { width: u32, height: u32 },
    Frame(String),
    Tensor(TensorError),
    UnsupportedDevice(Device),
    Config(String),
    Runtime(String),
}

impl InferError {
    /// True for engine faults that warrant recreating the session.
    pub fn is_session_failure(&self) -> bool {
        matches!(self, InferError::Session(_))
    }
}

impl fmt::Display for InferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InferError::ModelLoad(msg) => write!(f, "model load failed: {msg}"),
            InferError::ModelNotLoaded => write!(f, "model not loaded"),
            InferError::Session(msg) => write!(f, "session failure: {msg}"),
            InferError::Busy => write!(f, "an inference is already in progress"),
            InferError::ShapeMismatch { expected, got } => {
                write!(f, "shape mismatch: expected {expected}, got {got}")
            }
            InferError::InvalidFrame { width, height } => {
                write!(f, "invalid frame dimensions {width}x{height}")
            }
            InferError::Frame(msg) => write!(f, "frame error: {msg}"),
            InferError::Tensor(err) => write!(f, "tensor error: {err}"),
            InferError::UnsupportedDevice(device) => write!(f, "unsupported device: {device}"),
            InferError::Config(msg) => write!(f, "config error: {msg}"),
            InferError::Runtime(msg) => write!(f, "runtime error: {msg}"),
        }
    }
}

impl std::error::Error for InferError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            InferError::Tensor(err) => Some(err),
            _ => None,
        }
    }
}

impl From<TensorError> for InferError {
    fn from(err: TensorError) -> Self {
        InferError::Tensor(err)
    }
}

impl From<image::ImageError> for InferError {
    fn from(err: image::ImageError) -> Self {
        InferError::Frame(err.to_string())
    }
}

impl From<tokio::task::JoinError> for InferError {
    fn from(err: tokio::task::JoinError) -> Self {
        InferError::Runtime(format!("task join error: {err}"))
    }
}
