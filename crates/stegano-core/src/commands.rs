use std::path::Path;

use stegano_dwt::{Quality, Raster, StegoConfig};

use crate::SteganoError;

pub fn hide(
    cover: &Path,
    secret: &Path,
    write_to_file: &Path,
    config: StegoConfig,
) -> Result<Quality, SteganoError> {
    crate::api::hide::prepare()
        .with_config(config)
        .with_cover(cover)
        .with_secret(secret)
        .with_output(write_to_file)
        .execute()
}

pub fn unveil(
    stego: &Path,
    write_to_file: &Path,
    dimensions: Option<(u32, u32)>,
    config: StegoConfig,
) -> Result<Raster, SteganoError> {
    crate::api::unveil::prepare()
        .with_config(config)
        .from_stego_file(stego)
        .into_output_file(write_to_file)
        .use_dimensions(dimensions)
        .execute()
}

pub fn assess(reference: &Path, candidate: &Path) -> Result<Quality, SteganoError> {
    crate::api::assess::prepare()
        .with_reference(reference)
        .with_candidate(candidate)
        .execute()
}
