use courtside_base::{Rect, Vec2};
use courtside_infer::BoundingBox;
use serde::{Deserialize, Serialize};

use crate::ActionLabel;

/// Annotation box in source-frame pixels, top-left origin.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AnnotationBox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl AnnotationBox {
    pub fn rect(&self) -> Rect<f32> {
        Rect::new(
            Vec2::new(self.x, self.y),
            Vec2::new(self.width, self.height),
        )
    }

    pub fn center(&self) -> Vec2<f32> {
        self.rect().center()
    }
}

impl From<Rect<f32>> for AnnotationBox {
    fn from(rect: Rect<f32>) -> Self {
        Self {
            x: rect.origin.x,
            y: rect.origin.y,
            width: rect.size.x,
            height: rect.size.y,
        }
    }
}

impl From<BoundingBox> for AnnotationBox {
    fn from(bbox: BoundingBox) -> Self {
        Self {
            x: bbox.x,
            y: bbox.y,
            width: bbox.width,
            height: bbox.height,
        }
    }
}

/// A labelled box at a playback time in seconds.
///
/// The label is kept as text so stored or imported data with labels outside
/// [`ActionLabel`] still round-trips; such entries are skipped on YOLO export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionAnnotation {
    pub time: f64,
    pub label: String,
    pub bbox: AnnotationBox,
}

impl ActionAnnotation {
    pub fn new(time: f64, label: ActionLabel, bbox: impl Into<AnnotationBox>) -> Self {
        Self {
            time,
            label: label.name().to_string(),
            bbox: bbox.into(),
        }
    }

    pub fn action(&self) -> Option<ActionLabel> {
        ActionLabel::from_name(&self.label)
    }
}
