//! Extraction: reads the metadata block, rebuilds the visitation order and
//! reads one secret byte per payload block.

use log::{debug, info, warn};

use crate::block::BlockWorkspace;
use crate::config::StegoConfig;
use crate::error::{Result, StegoError};
use crate::metadata::{decode_metadata, Metadata};
use crate::payload::extract_byte;
use crate::raster::Raster;
use crate::scheduler::{BlockGrid, VisitOrder};

/// Recovers a secret raster from a stego raster.
///
/// Without known dimensions the configured block size is only used to
/// locate the metadata block; block size, strength and the random-blocks
/// flag are then taken from the metadata. With known dimensions the metadata
/// is not read and the configuration is used as given. The seed is never
/// stored, so random-block extraction needs the seed used for embedding.
///
/// The capacity policy only governs embedding. A stego raster that holds
/// fewer payload blocks than the secret has pixels was embedded with
/// [`CapacityPolicy::Truncate`](crate::CapacityPolicy::Truncate), so the
/// trailing bytes are always left at 0.
#[derive(Debug, Clone, Default)]
pub struct DwtDecoder {
    config: StegoConfig,
}

impl DwtDecoder {
    pub fn new(config: StegoConfig) -> Self {
        DwtDecoder { config }
    }

    pub fn config(&self) -> &StegoConfig {
        &self.config
    }

    /// Read the metadata block of `stego`.
    pub fn read_metadata(&self, stego: &Raster) -> Result<Metadata> {
        decode_metadata(stego, self.config.validate()?)
    }

    /// Extract the secret from `stego`.
    ///
    /// # Returns
    /// * `Ok(secret)` with the max gray of `stego`
    /// * `Err(StegoError::InvalidParameter)` if `dimensions` has a zero side
    /// * `Err(StegoError::CapacityExceeded)` if `dimensions` exceeds `stego`
    /// * `Err(StegoError::DecodeFailure)` if `dimensions` is `None` and the
    ///   metadata is unusable or does not record the dimensions
    pub fn extract(&self, stego: &Raster, dimensions: Option<(u32, u32)>) -> Result<Raster> {
        let (config, width, height) = match dimensions {
            Some((width, height)) => {
                check_dimensions(stego, width, height)?;
                (self.config.clone(), width, height)
            }
            None => {
                let metadata = self.read_metadata(stego)?;
                let config = metadata.apply_to(&self.config);
                config.validate().map_err(|_| StegoError::DecodeFailure {
                    reason: format!("unusable block size {}", metadata.block_size),
                })?;
                (config, metadata.secret_width, metadata.secret_height)
            }
        };
        let size = config.validate()?;
        info!(
            "extracting {width}x{height} secret: block size {size}, strength {}, random blocks {}",
            config.strength(),
            config.use_random_blocks
        );

        let mut secret = Raster::blank(width, height, stego.max_gray())?;
        let grid = BlockGrid::new(stego.width(), stego.height(), size);
        let required = secret.len();
        let available = grid.payload_blocks();
        let extracted = if required > available {
            warn!(
                "secret needs {required} payload blocks but only {available} available, \
                 the last {} bytes stay 0",
                required - available
            );
            available
        } else {
            required
        };

        let order = VisitOrder::for_config(&grid, &config);
        let mut workspace = BlockWorkspace::new(size)?;
        for (position, byte) in secret.samples_mut()[..extracted].iter_mut().enumerate() {
            workspace.load(stego, &grid, order.block(position));
            *byte = extract_byte(&workspace);
        }

        debug!("extracted {extracted} bytes");
        Ok(secret)
    }
}

fn check_dimensions(stego: &Raster, width: u32, height: u32) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(StegoError::InvalidParameter {
            param: "dimensions",
            value: format!("{width}x{height}"),
            reason: "secret dimensions must be positive".to_string(),
        });
    }
    if width > stego.width() || height > stego.height() {
        return Err(StegoError::CapacityExceeded {
            secret_width: width,
            secret_height: height,
            cover_width: stego.width(),
            cover_height: stego.height(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CapacityPolicy;
    use crate::encoder::DwtEncoder;

    fn flat(width: u32, height: u32, value: u8) -> Raster {
        Raster::new(width, height, 255, vec![value; (width * height) as usize]).unwrap()
    }

    fn stego_with(secret: &Raster) -> Raster {
        DwtEncoder::new(StegoConfig::default().with_seed(1))
            .embed(&flat(64, 64, 128), secret)
            .unwrap()
    }

    #[test]
    fn test_read_metadata() {
        let secret = flat(5, 3, 9);
        let metadata = DwtDecoder::default()
            .read_metadata(&stego_with(&secret))
            .unwrap();
        assert_eq!(metadata.secret_width, 5);
        assert_eq!(metadata.secret_height, 3);
        assert_eq!(metadata.block_size, 8);
        assert_eq!(metadata.strength, 5);
        assert!(!metadata.random_blocks);
    }

    #[test]
    fn test_extract_roundtrip() {
        let samples: Vec<u8> = (0..30).map(|i| (i * 37 % 256) as u8).collect();
        let secret = Raster::new(6, 5, 255, samples).unwrap();
        let extracted = DwtDecoder::default()
            .extract(&stego_with(&secret), None)
            .unwrap();
        assert_eq!(extracted, secret);
    }

    #[test]
    fn test_explicit_dimensions_limit_extraction() {
        let secret = Raster::new(4, 1, 255, vec![10, 20, 30, 40]).unwrap();
        let extracted = DwtDecoder::default()
            .extract(&stego_with(&secret), Some((2, 1)))
            .unwrap();
        assert_eq!(extracted.samples(), &[10, 20]);
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        let stego = stego_with(&flat(2, 2, 1));
        assert!(matches!(
            DwtDecoder::default().extract(&stego, Some((0, 3))),
            Err(StegoError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_oversized_dimensions_rejected() {
        let stego = stego_with(&flat(2, 2, 1));
        assert!(matches!(
            DwtDecoder::default().extract(&stego, Some((65, 1))),
            Err(StegoError::CapacityExceeded { .. })
        ));
    }

    #[test]
    fn test_plain_cover_fails_to_decode() {
        assert!(matches!(
            DwtDecoder::default().extract(&flat(64, 64, 50), None),
            Err(StegoError::DecodeFailure { .. })
        ));
    }

    #[test]
    fn test_truncated_stego_extracts_under_default_policy() {
        let secret = Raster::new(4, 4, 255, (0..16).map(|i| i * 15).collect()).unwrap();
        let config = StegoConfig::default().with_capacity_policy(CapacityPolicy::Truncate);
        let stego = DwtEncoder::new(config)
            .embed(&flat(32, 32, 128), &secret)
            .unwrap();

        let extracted = DwtDecoder::default().extract(&stego, None).unwrap();
        assert_eq!(extracted.samples()[..15], secret.samples()[..15]);
        assert_eq!(extracted.samples()[15], 0);
    }

    #[test]
    fn test_secret_keeps_stego_max_gray() {
        let cover = Raster::new(64, 64, 15, vec![7; 64 * 64]).unwrap();
        let secret = Raster::new(3, 2, 15, vec![1, 5, 9, 13, 15, 0]).unwrap();
        let stego = DwtEncoder::default().embed(&cover, &secret).unwrap();
        assert_eq!(stego.max_gray(), 15);

        let extracted = DwtDecoder::default().extract(&stego, None).unwrap();
        assert_eq!(extracted.max_gray(), 15);
        assert_eq!(extracted, secret);
    }

    #[test]
    fn test_known_dimensions_use_given_configuration() {
        let secret = Raster::new(3, 3, 255, (0..9).map(|i| i * 28).collect()).unwrap();
        let config = StegoConfig::default()
            .with_block_size(16)
            .with_random_blocks(true)
            .with_seed(5);
        let stego = DwtEncoder::new(config.clone())
            .embed(&flat(64, 64, 128), &secret)
            .unwrap();

        let extracted = DwtDecoder::new(config).extract(&stego, Some((3, 3))).unwrap();
        assert_eq!(extracted, secret);
    }
}
