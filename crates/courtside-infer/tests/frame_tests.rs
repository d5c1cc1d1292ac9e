use courtside_infer::{FrameSource, ImageFileSource, InferError, PixelBuffer, StillFrame};

#[test]
fn test_rejects_zero_dimensions() {
    assert!(matches!(
        PixelBuffer::new(0, 10, Vec::new()),
        Err(InferError::InvalidFrame { width: 0, height: 10 })
    ));
}

#[test]
fn test_rejects_wrong_length() {
    assert!(matches!(
        PixelBuffer::new(2, 2, vec![0; 15]),
        Err(InferError::ShapeMismatch { .. })
    ));
}

#[test]
fn test_from_rgb() {
    let frame = PixelBuffer::from_rgb(1, 2, &[1, 2, 3, 4, 5, 6]).unwrap();
    assert_eq!(frame.pixel(0, 1), Some([4, 5, 6, 255]));
    assert_eq!(frame.pixel(1, 0), None);
}

#[test]
fn test_set_pixel_clips() {
    let mut frame = PixelBuffer::filled(2, 2, [0, 0, 0, 255]).unwrap();
    frame.set_pixel(-1, 0, [255, 0, 0, 255]);
    frame.set_pixel(2, 1, [255, 0, 0, 255]);
    frame.set_pixel(1, 1, [255, 0, 0, 255]);
    assert_eq!(frame.pixel(1, 1), Some([255, 0, 0, 255]));
    assert_eq!(frame.pixel(0, 0), Some([0, 0, 0, 255]));
}

#[test]
fn test_image_round_trip() {
    let frame = PixelBuffer::filled(3, 2, [7, 8, 9, 255]).unwrap();
    let back = PixelBuffer::from_image(frame.to_image().unwrap()).unwrap();
    assert_eq!(back, frame);
}

#[test]
fn test_still_frame() {
    let frame = PixelBuffer::filled(3, 2, [1, 1, 1, 255]).unwrap();
    let mut source = StillFrame(frame.clone());
    assert_eq!(source.capture().unwrap(), frame);
}

#[test]
fn test_png_file_source() {
    let frame = PixelBuffer::filled(4, 3, [200, 100, 50, 255]).unwrap();
    let path = std::env::temp_dir().join(format!("courtside-frame-{}.png", std::process::id()));
    frame.to_image().unwrap().save(&path).unwrap();

    let mut source = ImageFileSource::new(&path);
    let loaded = source.capture().unwrap();
    std::fs::remove_file(&path).ok();
    assert_eq!(loaded, frame);
}

#[test]
fn test_missing_file_source() {
    let mut source = ImageFileSource::new("/nonexistent/frame.png");
    assert!(matches!(source.capture(), Err(InferError::Frame(_))));
}

#[test]
fn test_decode_garbage() {
    assert!(PixelBuffer::decode(&[0, 1, 2, 3]).is_err());
}
