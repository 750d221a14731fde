use std::path::{Path, PathBuf};

use log::info;
use stegano_dwt::{assess, DwtEncoder, Quality, StegoConfig};

use crate::media::{raster_from_file, Persist};
use crate::SteganoError;

pub fn prepare() -> HideApi {
    HideApi::default()
}

#[derive(Default, Debug)]
pub struct HideApi {
    cover: Option<PathBuf>,
    secret: Option<PathBuf>,
    output: Option<PathBuf>,
    config: StegoConfig,
}

impl HideApi {
    pub fn with_config(mut self, config: StegoConfig) -> Self {
        self.config = config;
        self
    }

    /// The graymap that carries the secret, used readonly
    pub fn with_cover<A: AsRef<Path>>(mut self, cover: A) -> Self {
        self.cover = Some(cover.as_ref().to_path_buf());
        self
    }

    /// The graymap to hide
    pub fn with_secret<A: AsRef<Path>>(mut self, secret: A) -> Self {
        self.secret = Some(secret.as_ref().to_path_buf());
        self
    }

    pub fn with_output<A: AsRef<Path>>(mut self, output: A) -> Self {
        self.output = Some(output.as_ref().to_path_buf());
        self
    }

    /// Hide the secret, save the stego image and return its quality
    /// against the cover
    pub fn execute(self) -> Result<Quality, SteganoError> {
        let Some(cover) = self.cover else {
            return Err(SteganoError::CarrierNotSet);
        };
        let Some(secret) = self.secret else {
            return Err(SteganoError::SecretNotSet);
        };
        let Some(output) = self.output else {
            return Err(SteganoError::TargetNotSet);
        };

        let cover = raster_from_file(&cover)?;
        let secret = raster_from_file(&secret)?;

        let stego = DwtEncoder::new(self.config).embed(&cover, &secret)?;
        stego.save_as(&output)?;

        let quality = assess(&cover, &stego)?;
        info!("stego image quality: {quality}");

        Ok(quality)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stegano_dwt::Raster;
    use tempfile::tempdir;

    #[test]
    fn should_require_all_inputs() {
        assert!(matches!(
            prepare().with_secret("s.pgm").with_output("o.pgm").execute(),
            Err(SteganoError::CarrierNotSet)
        ));
        assert!(matches!(
            prepare().with_cover("c.pgm").with_output("o.pgm").execute(),
            Err(SteganoError::SecretNotSet)
        ));
        assert!(matches!(
            prepare().with_cover("c.pgm").with_secret("s.pgm").execute(),
            Err(SteganoError::TargetNotSet)
        ));
    }

    #[test]
    fn illustrate_api_usage() {
        let temp_dir = tempdir().expect("Failed to create temporary directory");
        let cover = temp_dir.path().join("cover.pgm");
        let secret = temp_dir.path().join("secret.pgm");
        Raster::new(64, 64, 255, vec![120; 64 * 64])
            .unwrap()
            .save_as(&cover)
            .unwrap();
        Raster::new(4, 4, 255, (0..16).map(|i| i * 16).collect())
            .unwrap()
            .save_as(&secret)
            .unwrap();

        let quality = crate::api::hide::prepare()
            .with_cover(&cover)
            .with_secret(&secret)
            .with_output(temp_dir.path().join("stego.pgm"))
            .execute()
            .expect("Failed to hide image in image");

        assert!(quality.psnr > 30.0);
        assert!(temp_dir.path().join("stego.pgm").exists());
    }
}
