use crate::{ActionAnnotation, AnnotateError, Clip};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// One YOLO detection line: `<class> <xc> <yc> <w> <h>`, normalized to the
/// frame size with six decimals. `None` for labels outside [`crate::ActionLabel`].
pub fn to_yolo_line(annotation: &ActionAnnotation, frame_width: u32, frame_height: u32) -> Option<String> {
    let label = annotation.action()?;
    let (fw, fh) = (frame_width.max(1) as f64, frame_height.max(1) as f64);
    let bbox = &annotation.bbox;
    let (x, y) = (bbox.x as f64, bbox.y as f64);
    let (w, h) = (bbox.width as f64, bbox.height as f64);

    Some(format!(
        "{} {:.6} {:.6} {:.6} {:.6}",
        label.index(),
        (x + w / 2.0) / fw,
        (y + h / 2.0) / fh,
        w / fw,
        h / fh
    ))
}

/// YOLO lines for every exportable annotation, newline separated.
pub fn to_yolo_lines(annotations: &[ActionAnnotation], frame_width: u32, frame_height: u32) -> String {
    annotations
        .iter()
        .filter_map(|annotation| to_yolo_line(annotation, frame_width, frame_height))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Everything recorded for one video, as written to the export file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportDocument {
    pub clips: Vec<Clip>,
    #[serde(rename = "annotationsYOLO")]
    pub annotations_yolo: String,
    pub annotations: Vec<ActionAnnotation>,
}

impl ExportDocument {
    pub fn new(
        clips: &[Clip],
        annotations: &[ActionAnnotation],
        frame_width: u32,
        frame_height: u32,
    ) -> Self {
        Self {
            clips: clips.to_vec(),
            annotations_yolo: to_yolo_lines(annotations, frame_width, frame_height),
            annotations: annotations.to_vec(),
        }
    }

    pub fn to_json(&self) -> Result<String, AnnotateError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write `<key>.json` into `dir` and return its path.
    pub fn write_to(&self, dir: impl AsRef<Path>, key: &str) -> Result<PathBuf, AnnotateError> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir)?;
        let path = dir.join(export_file_name(key));
        std::fs::write(&path, self.to_json()?)?;
        log::info!(
            "exported {} clips and {} annotations to {}",
            self.clips.len(),
            self.annotations.len(),
            path.display()
        );
        Ok(path)
    }
}

pub fn export_file_name(key: &str) -> String {
    format!("{key}.json")
}

/// Parse a clip list file. Only a top-level JSON array is accepted.
pub fn import_clips(json: &str) -> Result<Vec<Clip>, AnnotateError> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    if !value.is_array() {
        return Err(AnnotateError::InvalidClip(
            "clip import must be a JSON array".to_string(),
        ));
    }

    let clips: Vec<Clip> = serde_json::from_value(value)?;
    for clip in &clips {
        clip.validate()?;
    }
    Ok(clips)
}
