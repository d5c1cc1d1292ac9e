pub mod annotation;
pub mod clip;
pub mod error;
pub mod export;
pub mod labels;
pub mod overlay;
pub mod resolver;
pub mod store;
pub mod workspace;

pub use annotation::{ActionAnnotation, AnnotationBox};
pub use clip::{Clip, ClipRecorder};
pub use error::AnnotateError;
pub use export::{export_file_name, import_clips, to_yolo_line, to_yolo_lines, ExportDocument};
pub use labels::ActionLabel;
pub use overlay::{color_for_person, Overlay, PALETTE};
pub use resolver::{hit_test, AnnotationResolver, CanvasScale, ResolverState, MIN_DRAG_SIZE};
pub use store::{video_key, JsonFileStore, MemoryStore, StoreConfig, VideoData, VideoStore};
pub use workspace::{AnalysisOutcome, AnalysisTicket, AnnotationWorkspace};
