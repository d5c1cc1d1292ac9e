use courtside_base::Vec2;
use courtside_infer::{InferError, Letterbox};

#[test]
fn test_landscape_hd_frame() {
    let lb = Letterbox::new(1920, 1080, 640).unwrap();
    assert!((lb.scale - 1.0 / 3.0).abs() < 1e-6);
    assert!(lb.x_offset.abs() < 1e-3);
    assert!((lb.y_offset - 140.0).abs() < 1e-3);
    let scaled = lb.scaled_size();
    assert!((scaled.x - 640.0).abs() < 1e-3);
    assert!((scaled.y - 360.0).abs() < 1e-3);
}

#[test]
fn test_vga_frame() {
    let lb = Letterbox::new(640, 480, 640).unwrap();
    assert_eq!(lb.scale, 1.0);
    assert_eq!(lb.x_offset, 0.0);
    assert_eq!(lb.y_offset, 80.0);
}

#[test]
fn test_portrait_frame_pads_horizontally() {
    let lb = Letterbox::new(1080, 1920, 640).unwrap();
    assert!(lb.y_offset.abs() < 1e-3);
    assert!((lb.x_offset - 140.0).abs() < 1e-3);
}

#[test]
fn test_point_round_trip() {
    let sizes = [
        (1920, 1080),
        (1080, 1920),
        (640, 640),
        (1, 1),
        (641, 479),
        (333, 777),
        (1, 10000),
        (10000, 1),
    ];
    for (width, height) in sizes {
        for side in [1, 32, 320, 640, 1280] {
            let lb = Letterbox::new(width, height, side).unwrap();
            let (w, h) = (width as f32, height as f32);
            let points = [
                Vec2::new(0.0, 0.0),
                Vec2::new(w, 0.0),
                Vec2::new(0.0, h),
                Vec2::new(w, h),
                Vec2::new(w / 2.0, h / 2.0),
                Vec2::new(-0.25 * w, 1.5 * h),
                Vec2::new(2.0 * w, -h),
            ];
            for point in points {
                let back = lb.to_source(lb.to_model(point));
                let tolerance = 1e-4 * (w.max(h) + point.x.abs().max(point.y.abs()));
                assert!(
                    (back.x - point.x).abs() <= tolerance && (back.y - point.y).abs() <= tolerance,
                    "{width}x{height} side {side}: {point:?} came back as {back:?}"
                );
            }
        }
    }
}

#[test]
fn test_scaled_frame_fits_and_is_centered() {
    for (width, height) in [(1, 10000), (10000, 1), (641, 479), (1, 1)] {
        for side in [1, 320, 640] {
            let lb = Letterbox::new(width, height, side).unwrap();
            let scaled = lb.scaled_size();
            let side = side as f32;
            assert!(scaled.x <= side * (1.0 + 1e-6) && scaled.y <= side * (1.0 + 1e-6));
            assert!((scaled.x - side).abs() < 1e-3 * side || (scaled.y - side).abs() < 1e-3 * side);
            assert!((2.0 * lb.x_offset + scaled.x - side).abs() < 1e-3 * side);
            assert!((2.0 * lb.y_offset + scaled.y - side).abs() < 1e-3 * side);
        }
    }
}

#[test]
fn test_zero_sized_frame_is_rejected() {
    assert!(matches!(
        Letterbox::new(1920, 0, 640),
        Err(InferError::InvalidFrame { .. })
    ));
}
