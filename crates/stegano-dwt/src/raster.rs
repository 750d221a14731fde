//! In-memory 8-bit grayscale raster.

use crate::error::{Result, StegoError};

/// A row-major grid of 8-bit gray samples with an explicit maximum gray value.
///
/// A raster is never mutated through the public API; embedding hands back a
/// new one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    width: u32,
    height: u32,
    max_gray: u8,
    samples: Vec<u8>,
}

impl Raster {
    /// Create a raster from its parts.
    ///
    /// # Errors
    /// [`StegoError::InvalidRaster`] for zero dimensions, a zero `max_gray`,
    /// or a sample buffer whose length is not `width * height`.
    pub fn new(width: u32, height: u32, max_gray: u8, samples: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(StegoError::InvalidRaster {
                reason: format!("dimensions must be positive, got {width}x{height}"),
            });
        }
        if max_gray == 0 {
            return Err(StegoError::InvalidRaster {
                reason: "max gray must be at least 1".to_string(),
            });
        }
        let expected = width as usize * height as usize;
        if samples.len() != expected {
            return Err(StegoError::InvalidRaster {
                reason: format!(
                    "expected {expected} samples for {width}x{height}, got {}",
                    samples.len()
                ),
            });
        }

        Ok(Raster {
            width,
            height,
            max_gray,
            samples,
        })
    }

    /// A raster with every sample set to zero.
    pub(crate) fn blank(width: u32, height: u32, max_gray: u8) -> Result<Self> {
        Self::new(width, height, max_gray, vec![0; width as usize * height as usize])
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn max_gray(&self) -> u8 {
        self.max_gray
    }

    #[inline]
    pub fn samples(&self) -> &[u8] {
        &self.samples
    }

    #[inline]
    pub(crate) fn samples_mut(&mut self) -> &mut [u8] {
        &mut self.samples
    }

    /// Number of samples, `width * height`.
    #[inline]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Sample at column `x`, row `y`.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> u8 {
        self.samples[y as usize * self.width as usize + x as usize]
    }

    /// Consume the raster and return its sample buffer.
    pub fn into_samples(self) -> Vec<u8> {
        self.samples
    }

    pub(crate) fn same_dimensions(&self, other: &Raster) -> bool {
        self.width == other.width && self.height == other.height
    }
}
