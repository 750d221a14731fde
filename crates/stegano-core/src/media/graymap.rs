use std::fs::File;
use std::io::{BufWriter, Cursor, Write};
use std::path::Path;

use image::codecs::pnm::{PnmDecoder, PnmEncoder, PnmSubtype, SampleEncoding};
use image::io::Reader;
use image::{ColorType, DynamicImage, ImageEncoder, ImageFormat};
use log::{debug, error};
use stegano_dwt::Raster;

use crate::error::SteganoError;
use crate::result::Result;

use super::Persist;

/// File extensions accepted as graymap media.
const GRAYMAP_EXTENSIONS: [&str; 2] = ["pgm", "pnm"];

/// Load an 8-bit grayscale PGM file as a [`Raster`].
///
/// Graymaps with a maxval other than 255 are rejected rather than rescaled,
/// so the returned raster always has a max gray of 255.
pub fn raster_from_file(f: &Path) -> Result<Raster> {
    let Some(ext) = f.extension().and_then(|ext| ext.to_str()) else {
        return Err(SteganoError::UnsupportedMedia);
    };
    if !GRAYMAP_EXTENSIONS.contains(&ext.to_lowercase().as_str()) {
        return Err(SteganoError::UnsupportedMedia);
    }

    let bytes = std::fs::read(f).map_err(|source| {
        error!("Error reading file {f:?}: {source}");
        SteganoError::ReadError { source }
    })?;
    let (_, header) = PnmDecoder::new(bytes.as_slice())?.into_inner();
    if let Some(graymap) = header.as_graymap() {
        if graymap.maxwhite != u8::MAX as u32 {
            error!("Unsupported maxval {} in {f:?}", graymap.maxwhite);
            return Err(SteganoError::UnsupportedMaxGray(graymap.maxwhite));
        }
    }
    let image = Reader::with_format(Cursor::new(&bytes), ImageFormat::Pnm).decode()?;
    let raster = raster_from_image(image)?;
    debug!(
        "loaded {f:?}: {}x{} graymap",
        raster.width(),
        raster.height()
    );

    Ok(raster)
}

/// Convert a decoded image into a [`Raster`]; anything but 8-bit luma is
/// rejected.
pub fn raster_from_image(image: DynamicImage) -> Result<Raster> {
    let gray = match image {
        DynamicImage::ImageLuma8(gray) => gray,
        other => {
            error!("Unsupported color type {:?}", other.color());
            return Err(SteganoError::UnsupportedMedia);
        }
    };
    let (width, height) = gray.dimensions();

    Ok(Raster::new(width, height, u8::MAX, gray.into_raw())?)
}

/// Write `raster` as a binary (P5) graymap.
pub fn save_raster_to_writer<W: Write>(raster: &Raster, writer: W) -> Result<()> {
    PnmEncoder::new(writer)
        .with_subtype(PnmSubtype::Graymap(SampleEncoding::Binary))
        .write_image(
            raster.samples(),
            raster.width(),
            raster.height(),
            ColorType::L8,
        )
        .map_err(|e| {
            error!("Error saving image: {e}");
            SteganoError::InvalidImageMedia(e)
        })
}

impl Persist for Raster {
    fn save_as(&self, file: &Path) -> Result<()> {
        let f = File::create(file).map_err(|e| {
            error!("Error creating file {file:?}: {e}");
            SteganoError::WriteError { source: e }
        })?;
        let mut writer = BufWriter::new(f);
        save_raster_to_writer(self, &mut writer)?;
        writer
            .flush()
            .map_err(|source| SteganoError::WriteError { source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};
    use std::io::Cursor;
    use tempfile::tempdir;

    fn ramp() -> Raster {
        Raster::new(4, 3, 255, (0..12).map(|i| i * 20).collect()).unwrap()
    }

    #[test]
    fn should_write_binary_graymap_header() {
        let mut buf = Cursor::new(Vec::new());
        save_raster_to_writer(&ramp(), &mut buf).expect("Cannot encode graymap");
        let bytes = buf.into_inner();

        assert!(bytes.starts_with(b"P5"));
        assert!(bytes.ends_with(ramp().samples()));
    }

    #[test]
    fn should_save_and_load_a_graymap() {
        let dir = tempdir().expect("Failed to create temporary directory");
        let file = dir.path().join("ramp.pgm");

        ramp().save_as(&file).expect("Cannot save graymap");
        let loaded = raster_from_file(&file).expect("Cannot load graymap");

        assert_eq!(loaded, ramp());
    }

    #[test]
    fn should_reject_unknown_extension() {
        assert!(matches!(
            raster_from_file(Path::new("carrier-image.png")),
            Err(SteganoError::UnsupportedMedia)
        ));
        assert!(matches!(
            raster_from_file(Path::new("no-extension")),
            Err(SteganoError::UnsupportedMedia)
        ));
    }

    #[test]
    fn should_report_missing_file_as_read_error() {
        let dir = tempdir().expect("Failed to create temporary directory");
        assert!(matches!(
            raster_from_file(&dir.path().join("missing.pgm")),
            Err(SteganoError::ReadError { .. })
        ));
    }

    #[test]
    fn should_reject_graymaps_not_using_full_range() {
        let dir = tempdir().expect("Failed to create temporary directory");
        let file = dir.path().join("sixteen-levels.pgm");
        let mut bytes = b"P5\n2 2\n15\n".to_vec();
        bytes.extend_from_slice(&[0, 5, 10, 15]);
        std::fs::write(&file, bytes).expect("Cannot write graymap");

        assert!(matches!(
            raster_from_file(&file),
            Err(SteganoError::UnsupportedMaxGray(15))
        ));
    }

    #[test]
    fn should_reject_color_images() {
        let color = DynamicImage::ImageRgb8(RgbImage::from_pixel(2, 2, Rgb([1, 2, 3])));
        assert!(matches!(
            raster_from_image(color),
            Err(SteganoError::UnsupportedMedia)
        ));
    }
}
