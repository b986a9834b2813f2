// The committed raster. Every stroke, fill and paint ends up here.
// Row-major, straight-alpha RGBA; starts (and resets to) opaque white.

use crate::error::{CanvasError, Result};
use crate::types::Rgba;
use image::{Rgb, RgbImage};

/// Largest width or height accepted unless a canvas is built with its own cap.
/// Flood fill is O(width * height), so this also bounds fill latency.
pub const DEFAULT_MAX_DIMENSION: u32 = 8192;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    pixels: Vec<Rgba>, // length = width * height
}

impl PixelBuffer {
    /// Allocate an all-white buffer. Extents must lie in `1..=DEFAULT_MAX_DIMENSION`.
    pub fn new(width: i64, height: i64) -> Result<Self> {
        Self::with_limit(width, height, DEFAULT_MAX_DIMENSION)
    }

    /// Like `new` with a caller-chosen cap. The pixel count must also fit in
    /// a u32, whatever the cap.
    pub fn with_limit(width: i64, height: i64, max_dimension: u32) -> Result<Self> {
        let max = max_dimension as i64;
        if width <= 0 || height <= 0 || width > max || height > max {
            return Err(CanvasError::InvalidDimensions { width, height });
        }
        // fill patches store pixel indices as u32
        if width as u64 * height as u64 > u32::MAX as u64 {
            return Err(CanvasError::InvalidDimensions { width, height });
        }
        let (w, h) = (width as usize, height as usize);
        Ok(Self { width: w, height: h, pixels: vec![Rgba::WHITE; w * h] })
    }

    /// Reallocate at a new size, all white. On error the old contents stay.
    pub fn resize(&mut self, width: i64, height: i64, max_dimension: u32) -> Result<()> {
        *self = Self::with_limit(width, height, max_dimension)?;
        Ok(())
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Row-major index of (x, y), or None when off the buffer.
    #[inline]
    pub fn index_of(&self, x: i64, y: i64) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return None;
        }
        Some(y as usize * self.width + x as usize)
    }

    pub fn get(&self, x: i64, y: i64) -> Result<Rgba> {
        self.index_of(x, y)
            .map(|i| self.pixels[i])
            .ok_or(CanvasError::OutOfBounds { x, y })
    }

    pub fn set(&mut self, x: i64, y: i64, pixel: Rgba) -> Result<()> {
        let i = self.index_of(x, y).ok_or(CanvasError::OutOfBounds { x, y })?;
        self.pixels[i] = pixel;
        Ok(())
    }

    /// Overwrite every pixel.
    pub fn fill_all(&mut self, pixel: Rgba) {
        self.pixels.fill(pixel);
    }

    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }

    pub(crate) fn pixels_mut(&mut self) -> &mut [Rgba] {
        &mut self.pixels
    }

    /// Composite onto opaque white. The returned image is a copy with no alpha;
    /// it is the only form that ever leaves the canvas for saving or display.
    pub fn flatten(&self) -> RgbImage {
        // width * height fits in u32, so each side does too
        let mut out = RgbImage::new(self.width as u32, self.height as u32);
        for (dst, src) in out.pixels_mut().zip(self.pixels.iter()) {
            *dst = Rgb(src.over_white());
        }
        out
    }
}
