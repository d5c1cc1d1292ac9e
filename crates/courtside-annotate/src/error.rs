use std::fmt;

#[derive(Debug)]
pub enum AnnotateError {
    Io(std::io::Error),
    Serde(serde_json::Error),
    /// A clip that would end before it starts, or an import that is not a clip list.
    InvalidClip(String),
    UnknownLabel(String),
}

impl fmt::Display for AnnotateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnnotateError::Io(err) => write!(f, "I/O error: {err}"),
            AnnotateError::Serde(err) => write!(f, "JSON error: {err}"),
            AnnotateError::InvalidClip(msg) => write!(f, "invalid clip: {msg}"),
            AnnotateError::UnknownLabel(label) => write!(f, "unknown action label: {label:?}"),
        }
    }
}

impl std::error::Error for AnnotateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AnnotateError::Io(err) => Some(err),
            AnnotateError::Serde(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for AnnotateError {
    fn from(err: std::io::Error) -> Self {
        AnnotateError::Io(err)
    }
}

impl From<serde_json::Error> for AnnotateError {
    fn from(err: serde_json::Error) -> Self {
        AnnotateError::Serde(err)
    }
}
