//! Orthonormal 2-D Haar wavelet transform over square power-of-two blocks.
//!
//! The 1-D step maps each adjacent pair `(a, b)` to `(a+b)/√2` in the first
//! half of the working span and `(a−b)/√2` in the second half, then halves
//! the span and repeats down to a single sample. The 2-D forward transform
//! runs that over every row and then every column; the inverse runs the
//! mirrored reconstruction over columns first, then rows.
//!
//! After a forward pass, coefficient `(r, c)` with both `r` and `c` at least
//! `size/2` is the finest diagonal detail of the 2×2 pixel group at rows
//! `2(r − size/2)..` and columns `2(c − size/2)..`, that is
//! `(p00 − p01 − p10 + p11) / 2`. Changing such a coefficient only touches
//! those four pixels, which the payload codec relies on.

use std::f64::consts::SQRT_2;

use crate::error::{Result, StegoError};

/// Reusable transform for one block size.
///
/// Owns its row/column scratch buffers so a whole codec pass allocates once.
#[derive(Debug, Clone)]
pub struct BlockTransform {
    size: usize,
    line: Vec<f64>,
    scratch: Vec<f64>,
}

impl BlockTransform {
    /// Create a transform for `size × size` blocks.
    ///
    /// # Errors
    /// [`StegoError::InvalidParameter`] unless `size` is a power of two ≥ 2.
    pub fn new(size: usize) -> Result<Self> {
        if size < 2 || !size.is_power_of_two() {
            return Err(StegoError::InvalidParameter {
                param: "size",
                value: size.to_string(),
                reason: "block size must be a power of two of at least 2".to_string(),
            });
        }
        Ok(BlockTransform {
            size,
            line: vec![0.0; size],
            scratch: vec![0.0; size],
        })
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Forward transform of a row-major `size × size` block, in place.
    pub fn forward(&mut self, block: &mut [f64]) {
        debug_assert_eq!(block.len(), self.size * self.size);
        let n = self.size;

        for row in block.chunks_exact_mut(n) {
            analyze(row, &mut self.scratch);
        }
        for col in 0..n {
            gather_column(block, n, col, &mut self.line);
            analyze(&mut self.line, &mut self.scratch);
            scatter_column(block, n, col, &self.line);
        }
    }

    /// Inverse transform of a row-major `size × size` block, in place.
    pub fn inverse(&mut self, block: &mut [f64]) {
        debug_assert_eq!(block.len(), self.size * self.size);
        let n = self.size;

        for col in 0..n {
            gather_column(block, n, col, &mut self.line);
            synthesize(&mut self.line, &mut self.scratch);
            scatter_column(block, n, col, &self.line);
        }
        for row in block.chunks_exact_mut(n) {
            synthesize(row, &mut self.scratch);
        }
    }
}

/// Forward transform of `block` (`size × size`, row-major) in place.
///
/// # Errors
/// [`StegoError::InvalidParameter`] for a size that is not a power of two ≥ 2
/// or a block of the wrong length.
pub fn forward(block: &mut [f64], size: usize) -> Result<()> {
    checked_transform(block, size)?.forward(block);
    Ok(())
}

/// Inverse transform of `block` (`size × size`, row-major) in place.
///
/// # Errors
/// Same as [`forward`].
pub fn inverse(block: &mut [f64], size: usize) -> Result<()> {
    checked_transform(block, size)?.inverse(block);
    Ok(())
}

fn checked_transform(block: &[f64], size: usize) -> Result<BlockTransform> {
    let transform = BlockTransform::new(size)?;
    if block.len() != size * size {
        return Err(StegoError::InvalidParameter {
            param: "block",
            value: block.len().to_string(),
            reason: format!("expected {} samples for a {size}x{size} block", size * size),
        });
    }
    Ok(transform)
}

/// 1-D analysis: full dyadic decomposition of `line`.
fn analyze(line: &mut [f64], scratch: &mut [f64]) {
    let mut span = line.len();
    while span > 1 {
        let half = span / 2;
        for i in 0..half {
            let a = line[2 * i];
            let b = line[2 * i + 1];
            scratch[i] = (a + b) / SQRT_2;
            scratch[half + i] = (a - b) / SQRT_2;
        }
        line[..span].copy_from_slice(&scratch[..span]);
        span = half;
    }
}

/// 1-D synthesis: exact inverse of [`analyze`].
fn synthesize(line: &mut [f64], scratch: &mut [f64]) {
    let n = line.len();
    let mut span = 2;
    while span <= n {
        let half = span / 2;
        for i in 0..half {
            let s = line[i];
            let d = line[half + i];
            scratch[2 * i] = (s + d) / SQRT_2;
            scratch[2 * i + 1] = (s - d) / SQRT_2;
        }
        line[..span].copy_from_slice(&scratch[..span]);
        span *= 2;
    }
}

#[inline]
fn gather_column(block: &[f64], n: usize, col: usize, line: &mut [f64]) {
    for (row, value) in line.iter_mut().enumerate() {
        *value = block[row * n + col];
    }
}

#[inline]
fn scatter_column(block: &mut [f64], n: usize, col: usize, line: &[f64]) {
    for (row, value) in line.iter().enumerate() {
        block[row * n + col] = *value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn random_block(size: usize, seed: u64) -> Vec<f64> {
        let mut rng = fastrand::Rng::with_seed(seed);
        (0..size * size).map(|_| rng.u8(..) as f64).collect()
    }

    #[test]
    fn test_roundtrip_restores_block() {
        for &size in &[2usize, 4, 8, 16, 32] {
            let original = random_block(size, size as u64);
            let mut block = original.clone();
            forward(&mut block, size).unwrap();
            inverse(&mut block, size).unwrap();
            for (a, b) in original.iter().zip(block.iter()) {
                assert!((a - b).abs() < 1e-9, "size {size}: {a} vs {b}");
            }
        }
    }

    #[test]
    fn test_energy_is_preserved() {
        let original = random_block(16, 7);
        let mut block = original.clone();
        forward(&mut block, 16).unwrap();
        let before: f64 = original.iter().map(|v| v * v).sum();
        let after: f64 = block.iter().map(|v| v * v).sum();
        assert!((before - after).abs() / before < 1e-12);
    }

    #[test]
    fn test_constant_block_has_only_dc() {
        let mut block = vec![10.0; 64];
        forward(&mut block, 8).unwrap();
        assert!((block[0] - 80.0).abs() < 1e-9);
        assert!(block[1..].iter().all(|c| c.abs() < 1e-9));
    }

    #[test]
    fn test_finest_diagonal_detail_is_local() {
        let mut block = vec![0.0; 64];
        // 2x2 group at rows 2..4, cols 4..6
        block[2 * 8 + 4] = 9.0;
        block[2 * 8 + 5] = 1.0;
        block[3 * 8 + 4] = 3.0;
        block[3 * 8 + 5] = 7.0;
        forward(&mut block, 8).unwrap();
        // coefficient (5, 6)
        let coefficient = block[5 * 8 + 6];
        assert!((coefficient - (9.0 - 1.0 - 3.0 + 7.0) / 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_reused_transform_matches_free_functions() {
        let mut transform = BlockTransform::new(8).unwrap();
        let mut a = random_block(8, 1);
        let mut b = a.clone();
        transform.forward(&mut a);
        forward(&mut b, 8).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_rejects_invalid_sizes() {
        assert!(BlockTransform::new(0).is_err());
        assert!(BlockTransform::new(1).is_err());
        assert!(BlockTransform::new(6).is_err());
        let mut block = vec![0.0; 10];
        assert!(matches!(
            forward(&mut block, 4),
            Err(StegoError::InvalidParameter { param: "block", .. })
        ));
    }
}
