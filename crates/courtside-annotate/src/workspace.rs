use courtside_base::Vec2;
use courtside_infer::{FrameSource, InferError, PoseEstimator, PoseResult};

use crate::{
    ActionAnnotation, ActionLabel, AnnotateError, AnnotationResolver, CanvasScale, Clip,
    ClipRecorder, ExportDocument, VideoData, VideoStore, video_key,
};

/// Proof that an analysis was started, tagged with the video it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisTicket {
    generation: u64,
}

impl AnalysisTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisOutcome {
    /// This many people are now shown.
    Detected(usize),
    NoDetections,
    /// The pipeline failed; clips and annotations are untouched.
    Failed(String),
    /// The video changed while the analysis ran; the result was dropped.
    Stale,
    /// Another analysis was still running, or no video is open.
    Skipped,
}

/// Annotation session for one video at a time.
///
/// Owns everything the user builds up (clips, annotations) and the
/// transient interaction state (detections, pending label, drag). Every
/// change to clips or annotations is saved to the store under the video key.
pub struct AnnotationWorkspace<S: VideoStore> {
    store: S,
    key: Option<String>,
    generation: u64,
    frame_size: (u32, u32),
    recorder: ClipRecorder,
    annotations: Vec<ActionAnnotation>,
    resolver: AnnotationResolver,
    poses: PoseResult,
    scale: CanvasScale,
    display_size: Option<Vec2<f32>>,
    analyzing: bool,
    continuous: bool,
}

impl<S: VideoStore> AnnotationWorkspace<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            key: None,
            generation: 0,
            frame_size: (1, 1),
            recorder: ClipRecorder::new(),
            annotations: Vec::new(),
            resolver: AnnotationResolver::new(),
            poses: PoseResult::new(),
            scale: CanvasScale::default(),
            display_size: None,
            analyzing: false,
            continuous: false,
        }
    }

    /// Switch to a new video and restore whatever was saved for it.
    ///
    /// Any analysis still running for the previous video will come back
    /// [`AnalysisOutcome::Stale`]. If the saved data cannot be read the
    /// workspace stays on the previous video.
    pub fn open_video(&mut self, file_name: &str, width: u32, height: u32) -> Result<(), AnnotateError> {
        let key = video_key(file_name).to_string();
        let saved = self.store.load(&key)?;

        self.generation += 1;
        self.frame_size = (width, height);
        self.update_scale();
        self.poses.clear();
        self.resolver.cancel();

        let VideoData { clips, annotations } = saved.unwrap_or_default();
        log::info!(
            "opened {} ({} clips, {} annotations restored)",
            key,
            clips.len(),
            annotations.len()
        );
        self.recorder.replace(clips);
        self.annotations = annotations;
        self.key = Some(key);
        Ok(())
    }

    pub fn video_key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn frame_size(&self) -> (u32, u32) {
        self.frame_size
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn clips(&self) -> &[Clip] {
        self.recorder.clips()
    }

    pub fn open_clip(&self) -> Option<Clip> {
        self.recorder.open_clip()
    }

    pub fn annotations(&self) -> &[ActionAnnotation] {
        &self.annotations
    }

    pub fn poses(&self) -> &PoseResult {
        &self.poses
    }

    pub fn resolver(&self) -> &AnnotationResolver {
        &self.resolver
    }

    pub fn pending_label(&self) -> Option<ActionLabel> {
        self.resolver.pending_label()
    }

    pub fn is_analyzing(&self) -> bool {
        self.analyzing
    }

    pub fn is_continuous(&self) -> bool {
        self.continuous
    }

    /// Set the size the canvas is displayed at, in the same units as pointer
    /// positions. The backing size is the frame size.
    pub fn set_display_size(&mut self, width: f32, height: f32) {
        self.display_size = Some(Vec2::new(width, height));
        self.update_scale();
    }

    pub fn canvas_scale(&self) -> CanvasScale {
        self.scale
    }

    fn update_scale(&mut self) {
        let (fw, fh) = self.frame_size;
        self.scale = match self.display_size {
            Some(display) => CanvasScale::new(Vec2::new(fw as f32, fh as f32), display),
            None => CanvasScale::default(),
        };
    }

    // Analysis

    /// Claim the analysis slot. `None` if one is already running or no
    /// video is open.
    pub fn begin_analysis(&mut self) -> Option<AnalysisTicket> {
        if self.analyzing || self.key.is_none() {
            return None;
        }
        self.analyzing = true;
        Some(AnalysisTicket {
            generation: self.generation,
        })
    }

    /// Release the analysis slot and apply the result if it is still current.
    pub fn finish_analysis(
        &mut self,
        ticket: AnalysisTicket,
        result: Result<PoseResult, InferError>,
    ) -> AnalysisOutcome {
        self.analyzing = false;
        if ticket.generation != self.generation {
            log::debug!("dropping analysis result for an earlier video");
            return AnalysisOutcome::Stale;
        }

        match result {
            Ok(poses) if poses.is_empty() => {
                self.poses.clear();
                AnalysisOutcome::NoDetections
            }
            Ok(poses) => {
                let count = poses.len();
                self.poses = poses;
                AnalysisOutcome::Detected(count)
            }
            Err(err) => {
                log::error!("pose analysis failed: {err}");
                AnalysisOutcome::Failed(err.to_string())
            }
        }
    }

    /// Capture the current frame and run the estimator on it.
    pub async fn analyze(
        &mut self,
        estimator: &PoseEstimator,
        source: &mut dyn FrameSource,
    ) -> AnalysisOutcome {
        let Some(ticket) = self.begin_analysis() else {
            return AnalysisOutcome::Skipped;
        };
        let result = estimator.estimate_from(source).await;
        self.finish_analysis(ticket, result)
    }

    /// Turn continuous analysis on or off. Turning it off clears the overlay
    /// and the pending label.
    pub fn set_continuous(&mut self, enabled: bool) {
        if self.continuous && !enabled {
            self.clear_overlay();
        }
        self.continuous = enabled;
    }

    pub fn toggle_continuous(&mut self) -> bool {
        self.set_continuous(!self.continuous);
        self.continuous
    }

    /// Playback time changed. Returns whether a new analysis should start.
    pub fn on_time_changed(&self) -> bool {
        self.continuous && !self.analyzing && self.key.is_some()
    }

    pub fn clear_overlay(&mut self) {
        self.poses.clear();
        self.resolver.cancel();
    }

    // Labels and pointer input

    /// Make `label` pending. Returns whether an analysis should be started
    /// because nothing is detected yet.
    pub fn select_label(&mut self, label: ActionLabel) -> bool {
        self.resolver.select_label(label);
        self.poses.is_empty() && !self.analyzing && self.key.is_some()
    }

    pub fn cancel_label(&mut self) -> bool {
        self.resolver.cancel()
    }

    /// Pointer positions are in display units; see [`Self::set_display_size`].
    pub fn pointer_down(
        &mut self,
        point: Vec2<f32>,
        time: f64,
    ) -> Result<Option<ActionAnnotation>, AnnotateError> {
        let point = self.scale.to_canvas(point);
        let annotation = self.resolver.pointer_down(point, &self.poses, time);
        self.record(annotation)
    }

    pub fn pointer_move(&mut self, point: Vec2<f32>) -> bool {
        let point = self.scale.to_canvas(point);
        self.resolver.pointer_move(point)
    }

    pub fn pointer_up(
        &mut self,
        point: Vec2<f32>,
        time: f64,
    ) -> Result<Option<ActionAnnotation>, AnnotateError> {
        let point = self.scale.to_canvas(point);
        let annotation = self.resolver.pointer_up(point, time);
        self.record(annotation)
    }

    pub fn pointer_leave(&mut self, time: f64) -> Result<Option<ActionAnnotation>, AnnotateError> {
        let annotation = self.resolver.pointer_leave(time);
        self.record(annotation)
    }

    fn record(
        &mut self,
        annotation: Option<ActionAnnotation>,
    ) -> Result<Option<ActionAnnotation>, AnnotateError> {
        if let Some(annotation) = &annotation {
            log::info!(
                "annotated {} at {:.3}s ({:.0}x{:.0})",
                annotation.label,
                annotation.time,
                annotation.bbox.width,
                annotation.bbox.height
            );
            self.annotations.push(annotation.clone());
            self.save()?;
        }
        Ok(annotation)
    }

    // Clips

    pub fn mark_in(&mut self, time: f64) {
        self.recorder.mark_in(time);
    }

    pub fn mark_out(&mut self, time: f64) -> Result<Option<Clip>, AnnotateError> {
        let clip = self.recorder.mark_out(time)?;
        if clip.is_some() {
            self.save()?;
        }
        Ok(clip)
    }

    pub fn discard_open_clip(&mut self) -> Option<Clip> {
        self.recorder.discard_open()
    }

    pub fn delete_clip(&mut self, index: usize) -> Result<Option<Clip>, AnnotateError> {
        let clip = self.recorder.delete(index);
        if clip.is_some() {
            self.save()?;
        }
        Ok(clip)
    }

    pub fn clear_clips(&mut self) -> Result<(), AnnotateError> {
        self.recorder.clear();
        self.save()
    }

    /// Replace the clip list from an exported clip array.
    pub fn import_clips(&mut self, json: &str) -> Result<usize, AnnotateError> {
        let clips = crate::import_clips(json)?;
        let count = clips.len();
        self.recorder.replace(clips);
        self.save()?;
        Ok(count)
    }

    // Output

    pub fn export(&self) -> ExportDocument {
        let (width, height) = self.frame_size;
        ExportDocument::new(self.recorder.clips(), &self.annotations, width, height)
    }

    fn save(&mut self) -> Result<(), AnnotateError> {
        let Some(key) = &self.key else {
            return Ok(());
        };
        let data = VideoData {
            clips: self.recorder.clips().to_vec(),
            annotations: self.annotations.clone(),
        };
        self.store.save(key, &data)
    }
}
