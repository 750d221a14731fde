//! Wavelet Block Steganography for Grayscale Rasters
//!
//! This crate hides one 8-bit grayscale raster (the secret) inside another
//! (the cover). The cover is cut into square blocks; each block is taken
//! through an orthonormal 2-D Haar transform and one secret byte is written
//! into eight of its finest diagonal-detail coefficients, one bit per
//! coefficient sign.
//!
//! # Layer Responsibilities
//!
//! This crate handles **engine-level** concerns only:
//! - The block transform and the block grid
//! - Block 0 metadata (secret dimensions, block size, strength, random-block
//!   flag), so extraction needs nothing but the stego raster
//! - Optional seeded permutation of the payload blocks
//! - MSE, PSNR and SSIM between two rasters
//!
//! Reading and writing image files is handled by outer layers (e.g.,
//! `stegano-core`).
//!
//! # Example
//!
//! ```ignore
//! use stegano_dwt::{assess, DwtDecoder, DwtEncoder, Raster, StegoConfig};
//!
//! let cover = Raster::new(128, 128, 255, cover_samples)?;
//! let secret = Raster::new(8, 8, 255, secret_samples)?;
//!
//! let config = StegoConfig::default().with_strength(5);
//! let stego = DwtEncoder::new(config.clone()).embed(&cover, &secret)?;
//! println!("{}", assess(&cover, &stego)?);
//!
//! let recovered = DwtDecoder::new(config).extract(&stego, None)?;
//! assert_eq!(recovered.samples(), secret.samples());
//! ```

mod block;
mod config;
mod decoder;
mod encoder;
mod error;
pub mod layout;
mod metadata;
pub mod metrics;
mod payload;
mod raster;
mod scheduler;
pub mod transform;

pub use block::{clip_to_byte, MAX_SETTLE_PASSES};
pub use config::{
    effective_block_size, CapacityPolicy, StegoConfig, DEFAULT_BLOCK_SIZE, DEFAULT_STRENGTH,
    MAX_BLOCK_SIZE, MAX_STRENGTH, MIN_BLOCK_SIZE, MIN_STRENGTH,
};
pub use decoder::DwtDecoder;
pub use encoder::DwtEncoder;
pub use error::{Result, StegoError};
pub use metadata::{decode_metadata, Metadata, MAX_FIELD_VALUE};
pub use metrics::{assess, mse, psnr, ssim, ssim_with_rng, Quality};
pub use raster::Raster;
pub use scheduler::{BlockGrid, VisitOrder, METADATA_BLOCK};
pub use transform::BlockTransform;
