//! Per-call working buffers for moving one block between a raster and the
//! transform domain.

use crate::error::Result;
use crate::layout::Slot;
use crate::raster::Raster;
use crate::scheduler::BlockGrid;
use crate::transform::BlockTransform;

/// Upper bound on verify-and-correct rounds for one block.
pub const MAX_SETTLE_PASSES: usize = 32;

/// Round half up and clip into `0..=255`.
#[inline]
pub fn clip_to_byte(value: f64) -> u8 {
    (value + 0.5).floor().clamp(0.0, 255.0) as u8
}

/// Values a written block must read back after clip-and-round.
pub(crate) trait Targets {
    /// Check every target slot against the quantized `pixels` and shift the
    /// 2×2 group of each slot that misses.
    /// Returns `true` when every slot already reads back correctly.
    fn correct(&self, pixels: &mut [u8], size: usize) -> bool;
}

/// Row-major indices of the 2×2 pixel group behind a finest diagonal
/// detail slot, ordered `p00, p01, p10, p11`.
#[inline]
fn group(slot: Slot, size: usize) -> [usize; 4] {
    let h = size / 2;
    debug_assert!(slot.row >= h && slot.col >= h);
    let top = 2 * (slot.row - h) * size + 2 * (slot.col - h);
    [top, top + 1, top + size, top + size + 1]
}

/// Twice the finest diagonal detail coefficient at `slot`, computed exactly
/// from its 2×2 group: `p00 − p01 − p10 + p11`.
#[inline]
pub(crate) fn doubled_detail(pixels: &[u8], size: usize, slot: Slot) -> i32 {
    let [p00, p01, p10, p11] = group(slot, size).map(|i| pixels[i] as i32);
    p00 - p01 - p10 + p11
}

/// Move [`doubled_detail`] at `slot` by `delta`, one unit of one pixel at a
/// time, rotating over the group so the change is spread evenly.
/// Returns `false` if the group saturated before the full shift.
pub(crate) fn shift_detail(pixels: &mut [u8], size: usize, slot: Slot, delta: i32) -> bool {
    // p00 and p11 count positively, p01 and p10 negatively
    let [p00, p01, p10, p11] = group(slot, size);
    let raise = if delta > 0 { [p00, p11] } else { [p01, p10] };
    let lower = if delta > 0 { [p01, p10] } else { [p00, p11] };

    let mut remaining = delta.unsigned_abs();
    while remaining > 0 {
        let mut moved = false;
        let rotation = [
            (raise[0], true),
            (lower[0], false),
            (raise[1], true),
            (lower[1], false),
        ];
        for (idx, up) in rotation {
            if remaining == 0 {
                break;
            }
            let pixel = &mut pixels[idx];
            match up {
                true if *pixel < u8::MAX => *pixel += 1,
                false if *pixel > 0 => *pixel -= 1,
                _ => continue,
            }
            remaining -= 1;
            moved = true;
        }
        if !moved {
            return false;
        }
    }
    true
}

/// Scratch space for one block size: coefficients and the block's pixels.
///
/// After [`load`](Self::load) the pixels are the block as stored in the
/// raster; after [`settle`](Self::settle) they are what
/// [`store`](Self::store) writes back.
pub(crate) struct BlockWorkspace {
    transform: BlockTransform,
    coefficients: Vec<f64>,
    pixels: Vec<u8>,
}

impl BlockWorkspace {
    pub fn new(size: usize) -> Result<Self> {
        let area = size * size;
        Ok(BlockWorkspace {
            transform: BlockTransform::new(size)?,
            coefficients: vec![0.0; area],
            pixels: vec![0; area],
        })
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.transform.size()
    }

    /// Copy block `index` out of `raster` and forward-transform it.
    pub fn load(&mut self, raster: &Raster, grid: &BlockGrid, index: usize) {
        let n = self.size();
        let (x0, y0) = grid.origin(index);
        let stride = raster.width() as usize;
        let samples = raster.samples();

        for (row, line) in self.pixels.chunks_exact_mut(n).enumerate() {
            let start = (y0 + row) * stride + x0;
            line.copy_from_slice(&samples[start..start + n]);
        }
        for (value, &pixel) in self.coefficients.iter_mut().zip(&self.pixels) {
            *value = pixel as f64;
        }
        self.transform.forward(&mut self.coefficients);
    }

    #[cfg(test)]
    pub fn coefficient(&self, slot: Slot) -> f64 {
        self.coefficients[slot.index(self.size())]
    }

    #[inline]
    pub fn coefficient_mut(&mut self, slot: Slot) -> &mut f64 {
        let size = self.size();
        &mut self.coefficients[slot.index(size)]
    }

    /// [`doubled_detail`] of the current pixels at `slot`, the value
    /// extraction reads.
    #[inline]
    pub fn detail(&self, slot: Slot) -> i32 {
        doubled_detail(&self.pixels, self.size(), slot)
    }

    /// Inverse-transform the coefficients into clipped pixels.
    fn quantize(&mut self) {
        let mut values = self.coefficients.clone();
        self.transform.inverse(&mut values);
        for (pixel, &value) in self.pixels.iter_mut().zip(&values) {
            *pixel = clip_to_byte(value);
        }
    }

    /// Quantize, then correct the pixels until `targets` read back, at most
    /// [`MAX_SETTLE_PASSES`] times. Returns `false` if they never did.
    pub fn settle(&mut self, targets: &impl Targets) -> bool {
        let size = self.size();
        self.quantize();
        (0..MAX_SETTLE_PASSES).any(|_| targets.correct(&mut self.pixels, size))
    }

    /// Write the pixels of the last [`settle`](Self::settle) back into block
    /// `index` of `raster`.
    pub fn store(&self, raster: &mut Raster, grid: &BlockGrid, index: usize) {
        let n = self.size();
        let (x0, y0) = grid.origin(index);
        let stride = raster.width() as usize;
        let samples = raster.samples_mut();

        for (row, line) in self.pixels.chunks_exact(n).enumerate() {
            let start = (y0 + row) * stride + x0;
            samples[start..start + n].copy_from_slice(line);
        }
    }
}
