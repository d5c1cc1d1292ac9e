//! Click and drag handling that turns a pending label into an annotation.
//!
//! ```text
//!  Idle --select_label--> PendingLabel --pointer_down in a box------> Idle (+annotation)
//!                              |   ^
//!                              |   +--select_label (replace)
//!                              +--pointer_down elsewhere--> Drawing --up/leave--> Idle
//! ```
//!
//! `cancel` returns to `Idle` from any state. All points are in source-frame
//! pixels; convert pointer positions with [`CanvasScale`] first.

use courtside_base::{Rect, Vec2};
use courtside_infer::PersonPose;

use crate::{ActionAnnotation, ActionLabel};

/// A drawn box must be strictly larger than this on both axes.
pub const MIN_DRAG_SIZE: f32 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ResolverState {
    #[default]
    Idle,
    PendingLabel(ActionLabel),
    Drawing {
        label: ActionLabel,
        start: Vec2<f32>,
        current: Vec2<f32>,
    },
}

/// Index of the first person whose box contains `point`, edges included.
pub fn hit_test(poses: &[PersonPose], point: Vec2<f32>) -> Option<usize> {
    poses.iter().position(|pose| pose.bbox.contains(point))
}

#[derive(Debug, Clone, Default)]
pub struct AnnotationResolver {
    state: ResolverState,
}

impl AnnotationResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ResolverState {
        self.state
    }

    /// The label waiting for a box, including during a drag.
    pub fn pending_label(&self) -> Option<ActionLabel> {
        match self.state {
            ResolverState::Idle => None,
            ResolverState::PendingLabel(label) | ResolverState::Drawing { label, .. } => {
                Some(label)
            }
        }
    }

    pub fn is_drawing(&self) -> bool {
        matches!(self.state, ResolverState::Drawing { .. })
    }

    /// Make `label` pending. Ignored while a drag is in progress.
    pub fn select_label(&mut self, label: ActionLabel) -> bool {
        if self.is_drawing() {
            return false;
        }
        self.state = ResolverState::PendingLabel(label);
        true
    }

    /// Drop the pending label and any drag. Returns whether anything changed.
    pub fn cancel(&mut self) -> bool {
        let changed = self.state != ResolverState::Idle;
        self.state = ResolverState::Idle;
        changed
    }

    /// A press inside a detected person resolves immediately; anywhere else
    /// starts a drag.
    pub fn pointer_down(
        &mut self,
        point: Vec2<f32>,
        poses: &[PersonPose],
        time: f64,
    ) -> Option<ActionAnnotation> {
        let ResolverState::PendingLabel(label) = self.state else {
            return None;
        };

        match hit_test(poses, point) {
            Some(index) => {
                self.state = ResolverState::Idle;
                log::debug!("{} assigned to person {} at {:.3}s", label, index, time);
                Some(ActionAnnotation::new(time, label, poses[index].bbox))
            }
            None => {
                self.state = ResolverState::Drawing {
                    label,
                    start: point,
                    current: point,
                };
                None
            }
        }
    }

    /// Track the drag. Returns whether the live rectangle changed.
    pub fn pointer_move(&mut self, point: Vec2<f32>) -> bool {
        match &mut self.state {
            ResolverState::Drawing { current, .. } if *current != point => {
                *current = point;
                true
            }
            _ => false,
        }
    }

    pub fn pointer_up(&mut self, point: Vec2<f32>, time: f64) -> Option<ActionAnnotation> {
        self.pointer_move(point);
        self.finish_drag(time)
    }

    /// The pointer left the canvas; the drag ends where it was last seen.
    pub fn pointer_leave(&mut self, time: f64) -> Option<ActionAnnotation> {
        self.finish_drag(time)
    }

    /// Rectangle of the drag in progress, for rendering.
    pub fn live_rect(&self) -> Option<Rect<f32>> {
        match self.state {
            ResolverState::Drawing { start, current, .. } => Some(Rect::from_corners(start, current)),
            _ => None,
        }
    }

    fn finish_drag(&mut self, time: f64) -> Option<ActionAnnotation> {
        let ResolverState::Drawing {
            label,
            start,
            current,
        } = self.state
        else {
            return None;
        };

        // the label is consumed even when the box is too small
        self.state = ResolverState::Idle;
        let rect = Rect::from_corners(start, current);
        if rect.size.x > MIN_DRAG_SIZE && rect.size.y > MIN_DRAG_SIZE {
            Some(ActionAnnotation::new(time, label, rect))
        } else {
            log::debug!(
                "ignoring {:.1}x{:.1} box for {}",
                rect.size.x,
                rect.size.y,
                label
            );
            None
        }
    }
}

/// Maps pointer positions on the displayed canvas to backing-buffer pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasScale {
    factor: Vec2<f32>,
}

impl Default for CanvasScale {
    fn default() -> Self {
        Self {
            factor: Vec2::new(1.0, 1.0),
        }
    }
}

impl CanvasScale {
    /// `backing` is the canvas buffer size (the video frame size), `display`
    /// the size it is shown at. A non-positive display size maps 1:1.
    pub fn new(backing: Vec2<f32>, display: Vec2<f32>) -> Self {
        let axis = |b: f32, d: f32| if d > 0.0 { b / d } else { 1.0 };
        Self {
            factor: Vec2::new(axis(backing.x, display.x), axis(backing.y, display.y)),
        }
    }

    pub fn factor(&self) -> Vec2<f32> {
        self.factor
    }

    pub fn to_canvas(&self, point: Vec2<f32>) -> Vec2<f32> {
        point * self.factor
    }
}
