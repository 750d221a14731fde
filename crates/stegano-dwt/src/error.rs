//! Error types for wavelet block steganography.

use std::fmt;
use thiserror::Error;

/// Result type alias for embedding, extraction and metric operations.
pub type Result<T> = std::result::Result<T, StegoError>;

/// Errors that can occur while embedding, extracting or assessing rasters.
#[derive(Error)]
pub enum StegoError {
    /// The raster is malformed (zero dimensions, wrong buffer length, too small).
    #[error("invalid raster: {reason}")]
    InvalidRaster { reason: String },

    /// A parameter is outside the range the engine can work with.
    #[error("invalid parameter {param}={value}: {reason}")]
    InvalidParameter {
        param: &'static str,
        value: String,
        reason: String,
    },

    /// Two rasters that must share dimensions do not.
    #[error("dimension mismatch: {left_width}x{left_height} vs {right_width}x{right_height}")]
    DimensionMismatch {
        left_width: u32,
        left_height: u32,
        right_width: u32,
        right_height: u32,
    },

    /// The secret raster is wider or taller than the cover raster.
    #[error("capacity exceeded: secret {secret_width}x{secret_height} does not fit into cover {cover_width}x{cover_height}")]
    CapacityExceeded {
        secret_width: u32,
        secret_height: u32,
        cover_width: u32,
        cover_height: u32,
    },

    /// The secret has more pixels than there are payload blocks.
    #[error("capacity exceeded: secret requires {required} payload blocks but only {available} available")]
    BlockBudgetExceeded { required: usize, available: usize },

    /// The metadata block could not be made to carry a value.
    #[error("metadata field {field} cannot carry value {value} in this cover")]
    MetadataUnsettled { field: &'static str, value: i64 },

    /// A payload block could not be made to read back its byte.
    #[error("payload block {block} does not read back its byte")]
    PayloadUnsettled { block: usize },

    /// The stego raster does not carry usable metadata.
    #[error("decode failure: {reason}")]
    DecodeFailure { reason: String },
}

impl fmt::Debug for StegoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Use Display for Debug so unwrap() shows user-friendly messages
        write!(f, "{self}")
    }
}
