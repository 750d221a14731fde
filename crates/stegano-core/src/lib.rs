//! # Stegano Core API
//!
//! File-level front of the wavelet block steganography engine in
//! [`stegano_dwt`]. Cover, secret and stego images are 8-bit grayscale PGM
//! files; there are 3 builder APIs:
//! - [`api::hide`] for hiding a secret image inside a cover image
//! - [`api::unveil`] for recovering the secret image from a stego image
//! - [`api::assess`] for scoring a stego image against its cover
//!
//! # Usage Examples
//!
//! ## Hide an image inside an image
//!
//! ```rust,no_run
//! use stegano_dwt::StegoConfig;
//!
//! let quality = stegano_core::api::hide::prepare()
//!     .with_config(StegoConfig::default().with_strength(5))
//!     .with_cover("tests/images/cover.pgm")
//!     .with_secret("tests/images/secret.pgm")
//!     .with_output("stego.pgm")
//!     .execute()
//!     .expect("Failed to hide image in image");
//! println!("{quality}");
//! ```
//!
//! ## Unveil an image from an image
//!
//! ```rust,no_run
//! stegano_core::api::unveil::prepare()
//!     .from_stego_file("stego.pgm")
//!     .into_output_file("secret.pgm")
//!     .execute()
//!     .expect("Failed to unveil image from image");
//! ```

#![warn(clippy::redundant_else)]

pub mod api;
pub mod commands;
pub mod error;
pub mod media;
pub mod result;

pub use crate::error::SteganoError;
pub use crate::media::Persist;
pub use crate::result::Result;
pub use stegano_dwt::{CapacityPolicy, Quality, Raster, StegoConfig};
