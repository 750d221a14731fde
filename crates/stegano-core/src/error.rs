use thiserror::Error;

pub use image::ImageError;
pub use stegano_dwt::StegoError;

#[derive(Error, Debug)]
pub enum SteganoError {
    /// Represents an unsupported carrier media. For example, a PNG file or a color PPM
    #[error("Media format is not supported, only 8-bit grayscale PGM images are")]
    UnsupportedMedia,

    /// Represents a graymap whose maxval is not 255
    #[error("Only graymaps with a maxval of 255 are supported, found {0}")]
    UnsupportedMaxGray(u32),

    /// Represents a failure of the image codec while reading or writing a graymap
    #[error("Image media is invalid: {0}")]
    InvalidImageMedia(#[from] ImageError),

    /// Represents a failure of the embedding engine
    #[error(transparent)]
    Stego(#[from] StegoError),

    /// Represents a failure to read from input.
    #[error("Read error")]
    ReadError { source: std::io::Error },

    /// Represents a failure to write target file.
    #[error("Write error")]
    WriteError { source: std::io::Error },

    #[error("No carrier media set")]
    CarrierNotSet,

    #[error("No target file set")]
    TargetNotSet,

    #[error("No secret media set")]
    SecretNotSet,

    #[error("No media to compare against set")]
    ComparisonNotSet,
}
