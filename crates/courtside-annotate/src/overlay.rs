use courtside_base::{Rect, Vec2};
use courtside_infer::pose::SKELETON;
use courtside_infer::{PersonPose, PixelBuffer};

use crate::AnnotationResolver;

/// Per-person colors, cycled by detection index.
pub const PALETTE: [[u8; 3]; 6] = [
    [0, 255, 0],
    [255, 0, 0],
    [0, 0, 255],
    [255, 255, 0],
    [255, 0, 255],
    [0, 255, 255],
];

const DRAG_COLOR: [u8; 3] = [255, 255, 255];

pub fn color_for_person(index: usize) -> [u8; 3] {
    PALETTE[index % PALETTE.len()]
}

/// Draws detections and the live drag rectangle onto a frame.
#[derive(Debug, Clone)]
pub struct Overlay {
    show_boxes: bool,
    show_skeletons: bool,
    keypoint_threshold: f32,
    keypoint_radius: i32,
    box_thickness: i32,
}

impl Default for Overlay {
    fn default() -> Self {
        Self {
            show_boxes: true,
            show_skeletons: true,
            keypoint_threshold: 0.5,
            keypoint_radius: 4,
            box_thickness: 3,
        }
    }
}

impl Overlay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_boxes(mut self, show: bool) -> Self {
        self.show_boxes = show;
        self
    }

    pub fn with_skeletons(mut self, show: bool) -> Self {
        self.show_skeletons = show;
        self
    }

    /// Keypoints and limbs are drawn only above this confidence.
    pub fn with_keypoint_threshold(mut self, threshold: f32) -> Self {
        self.keypoint_threshold = threshold;
        self
    }

    pub fn keypoint_threshold(&self) -> f32 {
        self.keypoint_threshold
    }

    pub fn render(&self, frame: &mut PixelBuffer, poses: &[PersonPose], resolver: &AnnotationResolver) {
        for (index, pose) in poses.iter().enumerate() {
            let color = color_for_person(index);
            if self.show_boxes {
                draw_rect(frame, &pose.bbox.rect(), self.box_thickness, color);
            }
            if self.show_skeletons {
                self.draw_skeleton(frame, pose, color);
            }
        }

        if let Some(rect) = resolver.live_rect() {
            draw_rect(frame, &rect, 1, DRAG_COLOR);
        }
    }

    fn draw_skeleton(&self, frame: &mut PixelBuffer, pose: &PersonPose, color: [u8; 3]) {
        let visible = |confidence: f32| confidence > self.keypoint_threshold;

        for (a, b) in SKELETON {
            let (a, b) = (pose.keypoint(a), pose.keypoint(b));
            if visible(a.confidence) && visible(b.confidence) {
                draw_line(frame, a.position, b.position, color);
            }
        }

        for kp in pose.keypoints.iter().filter(|kp| visible(kp.confidence)) {
            draw_filled_circle(
                frame,
                kp.position.x.round() as i32,
                kp.position.y.round() as i32,
                self.keypoint_radius,
                color,
            );
        }
    }
}

fn rgba([r, g, b]: [u8; 3]) -> [u8; 4] {
    [r, g, b, 255]
}

/// Rectangle outline, growing inward and outward from the edge.
pub fn draw_rect(frame: &mut PixelBuffer, rect: &Rect<f32>, thickness: i32, color: [u8; 3]) {
    let min = rect.min();
    let max = rect.max();
    let spread = (thickness.max(1) - 1) / 2;

    for d in -spread..=(thickness.max(1) - 1 - spread) {
        let d = d as f32;
        let (x0, y0) = (min.x - d, min.y - d);
        let (x1, y1) = (max.x + d, max.y + d);
        draw_line(frame, Vec2::new(x0, y0), Vec2::new(x1, y0), color);
        draw_line(frame, Vec2::new(x1, y0), Vec2::new(x1, y1), color);
        draw_line(frame, Vec2::new(x1, y1), Vec2::new(x0, y1), color);
        draw_line(frame, Vec2::new(x0, y1), Vec2::new(x0, y0), color);
    }
}

/// Bresenham line, clipped to the frame.
pub fn draw_line(frame: &mut PixelBuffer, from: Vec2<f32>, to: Vec2<f32>, color: [u8; 3]) {
    let (width, height) = (frame.width() as i32, frame.height() as i32);
    let Some((mut x0, mut y0, x1, y1)) = clip_line(
        from.x.round() as i32,
        from.y.round() as i32,
        to.x.round() as i32,
        to.y.round() as i32,
        width,
        height,
    ) else {
        return;
    };

    let dx = (x1 - x0).abs();
    let dy = (y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx - dy;
    let color = rgba(color);

    loop {
        frame.set_pixel(x0, y0, color);
        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 > -dy {
            err -= dy;
            x0 += sx;
        }
        if e2 < dx {
            err += dx;
            y0 += sy;
        }
    }
}

/// Circles lying entirely outside the frame draw nothing.
pub fn draw_filled_circle(frame: &mut PixelBuffer, cx: i32, cy: i32, radius: i32, color: [u8; 3]) {
    let radius = radius.max(0);
    let (width, height) = (frame.width() as i32, frame.height() as i32);
    if cx.saturating_add(radius) < 0
        || cy.saturating_add(radius) < 0
        || cx.saturating_sub(radius) >= width
        || cy.saturating_sub(radius) >= height
    {
        return;
    }

    let r2 = i64::from(radius) * i64::from(radius);
    let color = rgba(color);
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            if i64::from(dx) * i64::from(dx) + i64::from(dy) * i64::from(dy) <= r2 {
                frame.set_pixel(cx.saturating_add(dx), cy.saturating_add(dy), color);
            }
        }
    }
}

// Cohen-Sutherland outcodes
const LEFT: u8 = 1;
const RIGHT: u8 = 2;
const BOTTOM: u8 = 4;
const TOP: u8 = 8;

fn outcode(x: i32, y: i32, width: i32, height: i32) -> u8 {
    let mut code = 0;
    if x < 0 {
        code |= LEFT;
    } else if x >= width {
        code |= RIGHT;
    }
    if y < 0 {
        code |= TOP;
    } else if y >= height {
        code |= BOTTOM;
    }
    code
}

fn clip_line(
    mut x0: i32,
    mut y0: i32,
    mut x1: i32,
    mut y1: i32,
    width: i32,
    height: i32,
) -> Option<(i32, i32, i32, i32)> {
    loop {
        let code0 = outcode(x0, y0, width, height);
        let code1 = outcode(x1, y1, width, height);
        if (code0 | code1) == 0 {
            return Some((x0, y0, x1, y1));
        }
        if (code0 & code1) != 0 {
            return None;
        }

        let code = if code0 != 0 { code0 } else { code1 };
        // i128 so the products stay exact for any i32 endpoints
        let (dx, dy) = (i128::from(x1) - i128::from(x0), i128::from(y1) - i128::from(y0));
        let (x, y) = if code & TOP != 0 {
            (i128::from(x0) + dx * (0 - i128::from(y0)) / dy, 0)
        } else if code & BOTTOM != 0 {
            let edge = i128::from(height - 1);
            (i128::from(x0) + dx * (edge - i128::from(y0)) / dy, edge)
        } else if code & LEFT != 0 {
            (0, i128::from(y0) + dy * (0 - i128::from(x0)) / dx)
        } else {
            let edge = i128::from(width - 1);
            (edge, i128::from(y0) + dy * (edge - i128::from(x0)) / dx)
        };

        if code == code0 {
            (x0, y0) = (x as i32, y as i32);
        } else {
            (x1, y1) = (x as i32, y as i32);
        }
    }
}
