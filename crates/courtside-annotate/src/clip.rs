use crate::AnnotateError;
use serde::{Deserialize, Serialize};

/// A marked span of the video, in seconds. `end_time` is `None` while open.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Clip {
    pub start_time: f64,
    pub end_time: Option<f64>,
}

impl Clip {
    pub fn open(start_time: f64) -> Self {
        Self {
            start_time,
            end_time: None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.end_time.is_none()
    }

    pub fn duration(&self) -> Option<f64> {
        self.end_time.map(|end| end - self.start_time)
    }

    /// Completed clips must not end before they start.
    pub fn validate(&self) -> Result<(), AnnotateError> {
        match self.end_time {
            Some(end) if end < self.start_time => Err(AnnotateError::InvalidClip(format!(
                "ends at {end} before it starts at {}",
                self.start_time
            ))),
            _ => Ok(()),
        }
    }
}

/// Completed clips plus at most one open clip.
#[derive(Debug, Clone, Default)]
pub struct ClipRecorder {
    clips: Vec<Clip>,
    open: Option<Clip>,
}

impl ClipRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clips(&self) -> &[Clip] {
        &self.clips
    }

    pub fn open_clip(&self) -> Option<Clip> {
        self.open
    }

    /// Open a clip at `time`, replacing any clip that is already open.
    pub fn mark_in(&mut self, time: f64) {
        if let Some(previous) = self.open.replace(Clip::open(time)) {
            log::debug!("replacing open clip at {:.3}s", previous.start_time);
        }
    }

    /// Close the open clip at `time` and append it.
    ///
    /// Returns `Ok(None)` when no clip is open. A `time` before the clip start
    /// is rejected and the clip stays open.
    pub fn mark_out(&mut self, time: f64) -> Result<Option<Clip>, AnnotateError> {
        let Some(open) = self.open else {
            return Ok(None);
        };
        let clip = Clip {
            end_time: Some(time),
            ..open
        };
        clip.validate()?;

        self.open = None;
        self.clips.push(clip);
        Ok(Some(clip))
    }

    pub fn discard_open(&mut self) -> Option<Clip> {
        self.open.take()
    }

    pub fn delete(&mut self, index: usize) -> Option<Clip> {
        (index < self.clips.len()).then(|| self.clips.remove(index))
    }

    pub fn clear(&mut self) {
        self.clips.clear();
    }

    /// Swap in a stored or imported clip list. The open clip is dropped.
    pub fn replace(&mut self, clips: Vec<Clip>) {
        self.clips = clips;
        self.open = None;
    }
}
