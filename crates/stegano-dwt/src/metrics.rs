//! Image fidelity metrics between a cover and its stego raster.
//!
//! MSE and PSNR are exact. SSIM is estimated from [`SSIM_TRIALS`] randomly
//! placed [`SSIM_WINDOW`]×[`SSIM_WINDOW`] windows, so two calls on the same
//! pair may differ slightly unless the generator is fixed through
//! [`ssim_with_rng`].

use std::fmt;

use fastrand::Rng;

use crate::error::{Result, StegoError};
use crate::raster::Raster;

/// PSNR reported for identical rasters.
pub const PSNR_IDENTICAL: f64 = 100.0;

/// Edge length of an SSIM window.
pub const SSIM_WINDOW: u32 = 8;

/// Number of windows averaged by SSIM.
pub const SSIM_TRIALS: usize = 100;

/// `(0.01 * 255)^2`
const C1: f64 = 6.5025;
/// `(0.03 * 255)^2`
const C2: f64 = 58.5225;

/// The three fidelity scores of a raster pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quality {
    pub mse: f64,
    pub psnr: f64,
    pub ssim: f64,
}

impl Quality {
    /// Verbal band of the PSNR: above 40 dB excellent, above 30 dB good.
    pub fn psnr_band(&self) -> Option<&'static str> {
        match self.psnr {
            p if p > 40.0 => Some("excellent quality"),
            p if p > 30.0 => Some("good quality"),
            _ => None,
        }
    }

    /// Verbal band of the SSIM: above 0.98 nearly identical, above 0.95 high
    /// structural similarity.
    pub fn ssim_band(&self) -> Option<&'static str> {
        match self.ssim {
            s if s > 0.98 => Some("nearly identical"),
            s if s > 0.95 => Some("high structural similarity"),
            _ => None,
        }
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "MSE {:.4}, PSNR {:.2} dB, SSIM {:.4}",
            self.mse, self.psnr, self.ssim
        )
    }
}

fn check_dimensions(a: &Raster, b: &Raster) -> Result<()> {
    if a.same_dimensions(b) {
        return Ok(());
    }
    Err(StegoError::DimensionMismatch {
        left_width: a.width(),
        left_height: a.height(),
        right_width: b.width(),
        right_height: b.height(),
    })
}

/// Mean squared difference of the samples.
///
/// # Errors
/// [`StegoError::DimensionMismatch`] if `a` and `b` differ in size.
pub fn mse(a: &Raster, b: &Raster) -> Result<f64> {
    check_dimensions(a, b)?;
    let sum: f64 = a
        .samples()
        .iter()
        .zip(b.samples())
        .map(|(&x, &y)| {
            let diff = f64::from(x) - f64::from(y);
            diff * diff
        })
        .sum();
    Ok(sum / a.len() as f64)
}

/// Peak signal-to-noise ratio in dB, using the max gray of `a` as the peak.
///
/// Returns [`PSNR_IDENTICAL`] when the MSE is zero.
pub fn psnr(a: &Raster, b: &Raster) -> Result<f64> {
    let mse = mse(a, b)?;
    if mse <= 0.0 {
        return Ok(PSNR_IDENTICAL);
    }
    let peak = f64::from(a.max_gray());
    Ok(10.0 * (peak * peak / mse).log10())
}

/// Structural similarity estimate, sampled with an entropy-seeded generator.
pub fn ssim(a: &Raster, b: &Raster) -> Result<f64> {
    ssim_with_rng(a, b, &mut Rng::new())
}

/// Structural similarity estimate, drawing window positions from `rng`.
///
/// # Errors
/// * [`StegoError::DimensionMismatch`] if `a` and `b` differ in size
/// * [`StegoError::InvalidRaster`] if the rasters are smaller than one window
pub fn ssim_with_rng(a: &Raster, b: &Raster, rng: &mut Rng) -> Result<f64> {
    check_dimensions(a, b)?;
    if a.width() < SSIM_WINDOW || a.height() < SSIM_WINDOW {
        return Err(StegoError::InvalidRaster {
            reason: format!(
                "{}x{} is smaller than the {SSIM_WINDOW}x{SSIM_WINDOW} SSIM window",
                a.width(),
                a.height()
            ),
        });
    }

    let max_x = a.width() - SSIM_WINDOW;
    let max_y = a.height() - SSIM_WINDOW;
    let total: f64 = (0..SSIM_TRIALS)
        .map(|_| {
            let x = rng.u32(0..=max_x);
            let y = rng.u32(0..=max_y);
            window_ssim(a, b, x, y)
        })
        .sum();
    Ok(total / SSIM_TRIALS as f64)
}

fn window(raster: &Raster, x0: u32, y0: u32) -> impl Iterator<Item = f64> + '_ {
    (y0..y0 + SSIM_WINDOW)
        .flat_map(move |y| (x0..x0 + SSIM_WINDOW).map(move |x| f64::from(raster.get(x, y))))
}

fn window_ssim(a: &Raster, b: &Raster, x: u32, y: u32) -> f64 {
    let count = f64::from(SSIM_WINDOW * SSIM_WINDOW);
    let mean_a = window(a, x, y).sum::<f64>() / count;
    let mean_b = window(b, x, y).sum::<f64>() / count;

    let (mut var_a, mut var_b, mut covar) = (0.0, 0.0, 0.0);
    for (pa, pb) in window(a, x, y).zip(window(b, x, y)) {
        let da = pa - mean_a;
        let db = pb - mean_b;
        var_a += da * da;
        var_b += db * db;
        covar += da * db;
    }
    var_a /= count;
    var_b /= count;
    covar /= count;

    let numerator = (2.0 * mean_a * mean_b + C1) * (2.0 * covar + C2);
    let denominator = (mean_a * mean_a + mean_b * mean_b + C1) * (var_a + var_b + C2);
    numerator / denominator
}

/// MSE, PSNR and SSIM of `b` against `a`.
pub fn assess(a: &Raster, b: &Raster) -> Result<Quality> {
    Ok(Quality {
        mse: mse(a, b)?,
        psnr: psnr(a, b)?,
        ssim: ssim(a, b)?,
    })
}
