use crate::InferError;
use courtside_base::Vec2;

/// Neutral gray (#727272) used for the letterbox bars.
pub const PAD_COLOR: [u8; 3] = [114, 114, 114];

/// Aspect-preserving fit of a source frame into a square model input.
///
/// `scale = min(side / w, side / h)`; the scaled frame is centered, leaving
/// `x_offset` / `y_offset` pixels of padding on each side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Letterbox {
    pub source_width: u32,
    pub source_height: u32,
    pub side: usize,
    pub scale: f32,
    pub x_offset: f32,
    pub y_offset: f32,
}

impl Letterbox {
    /// Fails for empty frames or a zero side, so `scale` is always positive.
    pub fn new(source_width: u32, source_height: u32, side: usize) -> Result<Self, InferError> {
        if source_width == 0 || source_height == 0 {
            return Err(InferError::InvalidFrame {
                width: source_width,
                height: source_height,
            });
        }
        if side == 0 {
            return Err(InferError::Config("model side must be positive".to_string()));
        }

        let side_f = side as f32;
        let scale = (side_f / source_width as f32).min(side_f / source_height as f32);
        let scaled_width = source_width as f32 * scale;
        let scaled_height = source_height as f32 * scale;

        Ok(Self {
            source_width,
            source_height,
            side,
            scale,
            x_offset: (side_f - scaled_width) / 2.0,
            y_offset: (side_f - scaled_height) / 2.0,
        })
    }

    /// Size of the source frame once scaled into model space.
    pub fn scaled_size(&self) -> Vec2<f32> {
        Vec2::new(
            self.source_width as f32 * self.scale,
            self.source_height as f32 * self.scale,
        )
    }

    pub fn offset(&self) -> Vec2<f32> {
        Vec2::new(self.x_offset, self.y_offset)
    }

    /// Source pixel -> model input pixel.
    pub fn to_model(&self, point: Vec2<f32>) -> Vec2<f32> {
        point * self.scale + self.offset()
    }

    /// Model input pixel -> source pixel.
    pub fn to_source(&self, point: Vec2<f32>) -> Vec2<f32> {
        (point - self.offset()) / self.scale
    }

    /// Scale a model-space length (no offset) back to source pixels.
    pub fn length_to_source(&self, size: Vec2<f32>) -> Vec2<f32> {
        size / self.scale
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_empty_source() {
        assert!(matches!(
            Letterbox::new(0, 480, 640),
            Err(InferError::InvalidFrame { width: 0, height: 480 })
        ));
        assert!(Letterbox::new(640, 480, 0).is_err());
    }

    #[test]
    fn test_square_source_has_no_padding() {
        let lb = Letterbox::new(1280, 1280, 640).unwrap();
        assert_eq!(lb.scale, 0.5);
        assert_eq!(lb.offset(), Vec2::new(0.0, 0.0));
    }
}
