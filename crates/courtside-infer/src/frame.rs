//! Frame capture.
//!
//! A frame is an interleaved RGBA8 pixel buffer. Anything that can produce one
//! on demand (a decoded video frame, an image file, a test fixture) implements
//! [`FrameSource`], so the pipeline never touches a real rendering surface.

use crate::InferError;
use image::RgbaImage;
use std::path::PathBuf;

/// Interleaved RGBA8 pixels, row-major.
#[derive(Clone, PartialEq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl std::fmt::Debug for PixelBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PixelBuffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}

impl PixelBuffer {
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Result<Self, InferError> {
        if width == 0 || height == 0 {
            return Err(InferError::InvalidFrame { width, height });
        }
        let expected = width as usize * height as usize * 4;
        if data.len() != expected {
            return Err(InferError::ShapeMismatch {
                expected: format!("{width}x{height} RGBA ({expected} bytes)"),
                got: format!("{} bytes", data.len()),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// A frame where every pixel has the same color.
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Result<Self, InferError> {
        let count = width as usize * height as usize;
        Self::new(width, height, rgba.repeat(count))
    }

    /// Expand packed RGB8 pixels to opaque RGBA8.
    pub fn from_rgb(width: u32, height: u32, rgb: &[u8]) -> Result<Self, InferError> {
        let data = rgb
            .chunks_exact(3)
            .flat_map(|px| [px[0], px[1], px[2], 255])
            .collect();
        Self::new(width, height, data)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        Some([self.data[i], self.data[i + 1], self.data[i + 2], self.data[i + 3]])
    }

    /// Write one pixel; coordinates outside the frame are ignored.
    pub fn set_pixel(&mut self, x: i32, y: i32, rgba: [u8; 4]) {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        self.data[i..i + 4].copy_from_slice(&rgba);
    }

    pub fn to_image(&self) -> Result<RgbaImage, InferError> {
        RgbaImage::from_raw(self.width, self.height, self.data.clone())
            .ok_or_else(|| InferError::Frame("pixel buffer does not fit image dimensions".into()))
    }

    pub fn from_image(image: RgbaImage) -> Result<Self, InferError> {
        let (width, height) = image.dimensions();
        Self::new(width, height, image.into_raw())
    }

    /// Decode an encoded image (JPEG or PNG) from memory.
    pub fn decode(bytes: &[u8]) -> Result<Self, InferError> {
        Self::from_image(image::load_from_memory(bytes)?.to_rgba8())
    }
}

/// Produces the frame currently on screen.
pub trait FrameSource {
    fn capture(&mut self) -> Result<PixelBuffer, InferError>;
}

/// A fixed frame, captured as-is every time.
#[derive(Debug, Clone)]
pub struct StillFrame(pub PixelBuffer);

impl FrameSource for StillFrame {
    fn capture(&mut self) -> Result<PixelBuffer, InferError> {
        Ok(self.0.clone())
    }
}

/// Reads and decodes an image file on every capture.
#[derive(Debug, Clone)]
pub struct ImageFileSource {
    path: PathBuf,
}

impl ImageFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl FrameSource for ImageFileSource {
    fn capture(&mut self) -> Result<PixelBuffer, InferError> {
        let image = image::open(&self.path).map_err(|e| {
            InferError::Frame(format!("failed to open {}: {}", self.path.display(), e))
        })?;
        PixelBuffer::from_image(image.to_rgba8())
    }
}
