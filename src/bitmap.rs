//! Source bitmaps and the encoder seam.
//!
//! The choreography consumes a rectangular RGBA buffer and never produces
//! one itself: glyph generation (QR rendering, text rasterization, ...) is an
//! external collaborator behind the [`BitmapEncoder`] trait. This module
//! provides the buffer type, file decoding through the `image` crate, and a
//! procedural test pattern for demos and tests.
//!
//! # Quick Start
//!
//! ```ignore
//! // From an encoder collaborator
//! let bitmap = encoder.encode("HELLO")?;
//!
//! // From a file
//! let bitmap = Bitmap::open("assets/glyph.png")?;
//!
//! // From raw pixels
//! let bitmap = Bitmap::from_rgba(pixels, 64, 64);
//! ```

use std::path::Path;

use crate::error::BitmapError;

/// External bitmap producer.
///
/// Implementations rasterize arbitrary text or data into an RGBA bitmap.
/// Production may be slow or asynchronous on the collaborator's side; the
/// choreography only ever sees the finished buffer (or the error).
pub trait BitmapEncoder {
    /// Produce a bitmap for the given source text.
    fn encode(&self, text: &str) -> Result<Bitmap, BitmapError>;
}

/// A rectangular RGBA pixel buffer, 4 bytes per pixel, rows top-down.
#[derive(Debug, Clone)]
pub struct Bitmap {
    /// Raw RGBA pixel data (width * height * 4 bytes).
    pub data: Vec<u8>,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Bitmap {
    /// Create a bitmap from raw RGBA data.
    ///
    /// # Panics
    ///
    /// Panics if `data.len() != width * height * 4`.
    pub fn from_rgba(data: Vec<u8>, width: u32, height: u32) -> Self {
        assert_eq!(
            data.len(),
            (width * height * 4) as usize,
            "RGBA data size mismatch"
        );
        Self {
            data,
            width,
            height,
        }
    }

    /// Load a bitmap from an image file (PNG or JPEG).
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, BitmapError> {
        let img = image::open(path)?.to_rgba8();
        let (width, height) = img.dimensions();
        Ok(Self {
            data: img.into_raw(),
            width,
            height,
        })
    }

    /// Procedural glyph-like checker pattern: alternating white/black cells of
    /// `cell` pixels with a one-cell black quiet border.
    ///
    /// Handy stand-in for a real encoder in demos and tests.
    pub fn test_pattern(width: u32, height: u32, cell: u32) -> Self {
        let cell = cell.max(1);
        let mut data = Vec::with_capacity((width * height * 4) as usize);
        for y in 0..height {
            for x in 0..width {
                let border = x < cell
                    || y < cell
                    || x >= width.saturating_sub(cell)
                    || y >= height.saturating_sub(cell);
                let on = !border && ((x / cell) + (y / cell)) % 2 == 0;
                let value = if on { 255 } else { 0 };
                data.extend_from_slice(&[value, value, value, 255]);
            }
        }
        Self {
            data,
            width,
            height,
        }
    }

    /// Mean of the R, G, B channels at (x, y), in [0, 255].
    #[inline]
    pub fn brightness(&self, x: u32, y: u32) -> f32 {
        let i = ((y * self.width + x) * 4) as usize;
        (self.data[i] as f32 + self.data[i + 1] as f32 + self.data[i + 2] as f32) / 3.0
    }
}
