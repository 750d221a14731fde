use std::path::{Path, PathBuf};

use stegano_dwt::Quality;

use crate::media::raster_from_file;
use crate::SteganoError;

pub fn prepare() -> AssessApi {
    AssessApi::default()
}

#[derive(Default, Debug)]
pub struct AssessApi {
    reference: Option<PathBuf>,
    candidate: Option<PathBuf>,
}

impl AssessApi {
    /// The original image, its max gray is the PSNR peak
    pub fn with_reference(mut self, reference: impl AsRef<Path>) -> Self {
        self.reference = Some(reference.as_ref().to_path_buf());
        self
    }

    /// The image compared against the reference
    pub fn with_candidate(mut self, candidate: impl AsRef<Path>) -> Self {
        self.candidate = Some(candidate.as_ref().to_path_buf());
        self
    }

    pub fn execute(self) -> Result<Quality, SteganoError> {
        let Some(reference) = self.reference else {
            return Err(SteganoError::CarrierNotSet);
        };
        let Some(candidate) = self.candidate else {
            return Err(SteganoError::ComparisonNotSet);
        };

        let reference = raster_from_file(&reference)?;
        let candidate = raster_from_file(&candidate)?;

        Ok(stegano_dwt::assess(&reference, &candidate)?)
    }
}
