use crate::{InferError, PixelBuffer};
use courtside_base::Tensor;
use image::{imageops, Rgba, RgbaImage};

use super::letterbox::{Letterbox, PAD_COLOR};

/// A model-ready input plus what is needed to map results back.
#[derive(Debug, Clone)]
pub struct Preprocessed {
    /// Planar RGB in [0, 1], shape `[1, 3, side, side]`.
    pub tensor: Tensor<f32>,
    pub original_width: u32,
    pub original_height: u32,
    pub letterbox: Letterbox,
}

/// Draw the frame onto a `side x side` gray canvas, scaled and centered.
///
/// The resize uses bilinear (triangle) filtering. Scaled size and placement are
/// rounded to whole pixels; the letterbox itself keeps the exact values.
pub fn letterbox_canvas(frame: &PixelBuffer, letterbox: &Letterbox) -> Result<RgbaImage, InferError> {
    let side = u32::try_from(letterbox.side)
        .map_err(|_| InferError::Config(format!("model side {} too large", letterbox.side)))?;
    let [r, g, b] = PAD_COLOR;
    let mut canvas = RgbaImage::from_pixel(side, side, Rgba([r, g, b, 255]));

    let source = frame.to_image()?;
    let scaled = letterbox.scaled_size();
    let scaled_width = (scaled.x.round() as u32).clamp(1, side);
    let scaled_height = (scaled.y.round() as u32).clamp(1, side);

    let resized = if (scaled_width, scaled_height) == source.dimensions() {
        source
    } else {
        imageops::resize(
            &source,
            scaled_width,
            scaled_height,
            imageops::FilterType::Triangle,
        )
    };

    imageops::overlay(
        &mut canvas,
        &resized,
        letterbox.x_offset.round() as i64,
        letterbox.y_offset.round() as i64,
    );
    Ok(canvas)
}

/// Letterbox a frame and convert it to the model input tensor.
///
/// Output layout is channel-planar: all R values, then all G, then all B,
/// each row-major over the square canvas. Alpha is dropped.
pub fn preprocess(frame: &PixelBuffer, side: usize) -> Result<Preprocessed, InferError> {
    let letterbox = Letterbox::new(frame.width(), frame.height(), side)?;
    let canvas = letterbox_canvas(frame, &letterbox)?;

    let plane = side * side;
    let mut data = vec![0.0f32; 3 * plane];
    for (i, pixel) in canvas.pixels().enumerate() {
        data[i] = pixel[0] as f32 / 255.0;
        data[plane + i] = pixel[1] as f32 / 255.0;
        data[2 * plane + i] = pixel[2] as f32 / 255.0;
    }

    let tensor = Tensor::new(vec![1, 3, side, side], data)?;
    log::trace!(
        "preprocessed {}x{} frame: scale {:.4}, offset ({:.1}, {:.1})",
        frame.width(),
        frame.height(),
        letterbox.scale,
        letterbox.x_offset,
        letterbox.y_offset
    );

    Ok(Preprocessed {
        tensor,
        original_width: frame.width(),
        original_height: frame.height(),
        letterbox,
    })
}
