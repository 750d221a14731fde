use std::path::{Path, PathBuf};

use log::info;
use stegano_dwt::{DwtDecoder, Raster, StegoConfig};

use crate::media::{raster_from_file, Persist};
use crate::SteganoError;

pub fn prepare() -> UnveilApi {
    UnveilApi::default()
}

#[derive(Default, Debug)]
pub struct UnveilApi {
    stego: Option<PathBuf>,
    output: Option<PathBuf>,
    dimensions: Option<(u32, u32)>,
    config: StegoConfig,
}

impl UnveilApi {
    /// Block size used to locate the metadata, and the seed for random-block
    /// mode. Everything else is read from the stego image, unless the secret
    /// dimensions are known.
    pub fn with_config(mut self, config: StegoConfig) -> Self {
        self.config = config;
        self
    }

    /// This is the stego image that contains the secret to be unveiled
    pub fn from_stego_file(mut self, stego: impl AsRef<Path>) -> Self {
        self.stego = Some(stego.as_ref().to_path_buf());
        self
    }

    /// This is the file the secret image will be saved to
    pub fn into_output_file(mut self, output: impl AsRef<Path>) -> Self {
        self.output = Some(output.as_ref().to_path_buf());
        self
    }

    /// Known secret dimensions. The metadata is then not read and the
    /// configuration is used as given.
    pub fn with_dimensions(mut self, width: u32, height: u32) -> Self {
        self.dimensions = Some((width, height));
        self
    }

    /// Same as [`with_dimensions`](Self::with_dimensions), `None` reads them
    /// from the stego image.
    pub fn use_dimensions(mut self, dimensions: Option<(u32, u32)>) -> Self {
        self.dimensions = dimensions;
        self
    }

    /// Execute the unveil process, save and return the secret image
    pub fn execute(self) -> Result<Raster, SteganoError> {
        let Some(stego) = self.stego else {
            return Err(SteganoError::CarrierNotSet);
        };
        let Some(output) = self.output else {
            return Err(SteganoError::TargetNotSet);
        };

        let stego = raster_from_file(&stego)?;
        let secret = DwtDecoder::new(self.config).extract(&stego, self.dimensions)?;
        secret.save_as(&output)?;
        info!(
            "unveiled {}x{} secret image to {output:?}",
            secret.width(),
            secret.height()
        );

        Ok(secret)
    }
}
