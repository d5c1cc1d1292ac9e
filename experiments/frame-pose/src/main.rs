use courtside_annotate::{AnnotationResolver, Overlay};
use courtside_base::{init_file_logger, init_stdout_logger, log};
use courtside_infer::{
    Device, EstimatorConfig, FrameSource, ImageFileSource, KeypointIndex, OnnxBackend,
    PoseEstimator,
};
use std::env;
use std::path::PathBuf;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // COURTSIDE_LOG_DIR sends the log to daily files instead of stdout
    match env::var("COURTSIDE_LOG_DIR") {
        Ok(dir) => init_file_logger(dir)?,
        Err(_) => init_stdout_logger(),
    }

    let mut args = env::args().skip(1);
    let Some(input) = args.next() else {
        eprintln!("usage: frame-pose <image> [annotated.png]");
        std::process::exit(2);
    };
    let output = args.next().map(PathBuf::from);

    // Get model path from environment or use default
    let model_path: PathBuf = env::var("COURTSIDE_MODEL_PATH")
        .unwrap_or_else(|_| "models/yolov8n-pose.onnx".to_string())
        .into();
    let config = match env::var("COURTSIDE_CONFIG") {
        Ok(path) => EstimatorConfig::from_json_file(path)?,
        Err(_) => EstimatorConfig::default(),
    };

    let device = if cfg!(feature = "cuda") {
        Device::Cuda { device_id: 0 }
    } else {
        Device::Cpu
    };
    log::info!("model {} on {}", model_path.display(), device);

    let estimator = PoseEstimator::new(model_path, OnnxBackend::new(device)).with_config(config);
    estimator.load().await?;

    let mut source = ImageFileSource::new(&input);
    let mut frame = source.capture()?;
    let poses = estimator.estimate(&frame).await?;

    println!("{}: {}x{}, {} people", input, frame.width(), frame.height(), poses.len());
    for (i, pose) in poses.iter().enumerate() {
        let b = pose.bbox;
        let nose = pose.keypoint(KeypointIndex::Nose);
        println!(
            "  person {}: {:.1}% at ({:.1}, {:.1}) {:.1}x{:.1}, nose ({:.1}, {:.1}) {:.2}",
            i + 1,
            b.confidence * 100.0,
            b.x,
            b.y,
            b.width,
            b.height,
            nose.position.x,
            nose.position.y,
            nose.confidence
        );
    }

    if let Some(path) = output {
        Overlay::new().render(&mut frame, &poses, &AnnotationResolver::new());
        frame.to_image()?.save(&path)?;
        println!("wrote {}", path.display());
    }

    Ok(())
}
