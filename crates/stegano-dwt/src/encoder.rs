//! Embedding: writes the metadata block, then one secret byte per payload
//! block in visitation order.

use log::{debug, warn};

use crate::block::BlockWorkspace;
use crate::config::{CapacityPolicy, StegoConfig};
use crate::error::{Result, StegoError};
use crate::metadata::{encode_metadata, Metadata};
use crate::payload::embed_byte;
use crate::raster::Raster;
use crate::scheduler::{BlockGrid, VisitOrder};

/// Hides a secret raster inside a cover raster.
#[derive(Debug, Clone, Default)]
pub struct DwtEncoder {
    config: StegoConfig,
}

impl DwtEncoder {
    pub fn new(config: StegoConfig) -> Self {
        DwtEncoder { config }
    }

    pub fn config(&self) -> &StegoConfig {
        &self.config
    }

    /// Number of secret bytes (pixels) `cover` can carry with this
    /// configuration.
    pub fn capacity(&self, cover: &Raster) -> Result<usize> {
        let size = self.config.validate()?;
        Ok(BlockGrid::new(cover.width(), cover.height(), size).payload_blocks())
    }

    /// Embed `secret` into a copy of `cover` and return the stego raster.
    ///
    /// # Returns
    /// * `Ok(stego)` with the dimensions and max gray of `cover`
    /// * `Err(StegoError::CapacityExceeded)` if the secret is wider or taller
    ///   than the cover
    /// * `Err(StegoError::BlockBudgetExceeded)` if the secret has more pixels
    ///   than payload blocks and the policy is [`CapacityPolicy::Strict`]
    /// * `Err(StegoError::MetadataUnsettled)` if block 0 cannot be made to
    ///   read back the metadata
    ///
    /// A secret wider or taller than
    /// [`MAX_FIELD_VALUE`](crate::MAX_FIELD_VALUE) is embedded
    /// without recording its dimensions; extraction then needs them.
    pub fn embed(&self, cover: &Raster, secret: &Raster) -> Result<Raster> {
        let size = self.config.validate()?;

        if secret.width() > cover.width() || secret.height() > cover.height() {
            return Err(StegoError::CapacityExceeded {
                secret_width: secret.width(),
                secret_height: secret.height(),
                cover_width: cover.width(),
                cover_height: cover.height(),
            });
        }

        let grid = BlockGrid::new(cover.width(), cover.height(), size);
        if grid.block_count() == 0 {
            return Err(StegoError::InvalidRaster {
                reason: format!(
                    "cover {}x{} holds no {size}x{size} block",
                    cover.width(),
                    cover.height()
                ),
            });
        }

        let required = secret.len();
        let available = grid.payload_blocks();
        let embedded = if required > available {
            match self.config.capacity_policy {
                CapacityPolicy::Strict => {
                    return Err(StegoError::BlockBudgetExceeded {
                        required,
                        available,
                    });
                }
                CapacityPolicy::Truncate => {
                    warn!(
                        "secret needs {required} payload blocks but only {available} available, \
                         dropping the last {} bytes",
                        required - available
                    );
                    available
                }
            }
        } else {
            required
        };

        debug!(
            "embedding {}x{} secret into {}x{} cover: block size {size}, {}x{} blocks, strength {}",
            secret.width(),
            secret.height(),
            cover.width(),
            cover.height(),
            grid.blocks_x(),
            grid.blocks_y(),
            self.config.strength()
        );

        let mut stego = cover.clone();
        let mut workspace = BlockWorkspace::new(size)?;
        let metadata = Metadata::describe(secret, &self.config);
        if !metadata.records_dimensions() {
            warn!(
                "secret dimensions {}x{} do not fit the metadata block, \
                 extraction will need them",
                secret.width(),
                secret.height()
            );
        }
        encode_metadata(&mut stego, &grid, &metadata, &mut workspace)?;

        let order = VisitOrder::for_config(&grid, &self.config);
        let factor = self.config.embedding_factor();
        for (position, &byte) in secret.samples()[..embedded].iter().enumerate() {
            let block = order.block(position);
            workspace.load(&stego, &grid, block);
            if !embed_byte(&mut workspace, byte, factor) {
                return Err(StegoError::PayloadUnsettled { block });
            }
            workspace.store(&mut stego, &grid, block);
        }

        debug!("embedded {embedded} bytes");
        Ok(stego)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat(width: u32, height: u32, value: u8) -> Raster {
        Raster::new(width, height, 255, vec![value; (width * height) as usize]).unwrap()
    }

    #[test]
    fn test_stego_keeps_cover_shape() {
        let cover = flat(64, 64, 100);
        let secret = flat(4, 4, 200);
        let stego = DwtEncoder::default().embed(&cover, &secret).unwrap();
        assert_eq!(stego.width(), 64);
        assert_eq!(stego.height(), 64);
        assert_eq!(stego.max_gray(), cover.max_gray());
        assert_ne!(stego, cover);
    }

    #[test]
    fn test_unused_blocks_untouched() {
        let cover = flat(64, 64, 100);
        let secret = flat(2, 2, 7);
        let stego = DwtEncoder::default().embed(&cover, &secret).unwrap();
        // blocks 0..=4 are written, the rest of the first block row is not
        for y in 0..8 {
            for x in 40..64 {
                assert_eq!(stego.get(x, y), 100);
            }
        }
        for y in 8..64 {
            for x in 0..64 {
                assert_eq!(stego.get(x, y), 100);
            }
        }
    }

    #[test]
    fn test_secret_larger_than_cover() {
        let cover = flat(16, 16, 0);
        let secret = flat(17, 4, 0);
        assert!(matches!(
            DwtEncoder::default().embed(&cover, &secret),
            Err(StegoError::CapacityExceeded { .. })
        ));
    }

    #[test]
    fn test_block_budget_strict() {
        let cover = flat(32, 32, 128);
        let secret = flat(4, 4, 1);
        assert!(matches!(
            DwtEncoder::default().embed(&cover, &secret),
            Err(StegoError::BlockBudgetExceeded {
                required: 16,
                available: 15
            })
        ));
    }

    #[test]
    fn test_block_budget_truncate() {
        let cover = flat(32, 32, 128);
        let secret = flat(4, 4, 1);
        let config = StegoConfig::default().with_capacity_policy(CapacityPolicy::Truncate);
        assert!(DwtEncoder::new(config).embed(&cover, &secret).is_ok());
    }

    #[test]
    fn test_cover_without_blocks() {
        let cover = flat(7, 7, 0);
        let secret = flat(1, 1, 0);
        assert!(matches!(
            DwtEncoder::default().embed(&cover, &secret),
            Err(StegoError::InvalidRaster { .. })
        ));
    }

    #[test]
    fn test_capacity() {
        let cover = flat(128, 128, 0);
        assert_eq!(DwtEncoder::default().capacity(&cover).unwrap(), 255);
        let config = StegoConfig::default().with_block_size(16);
        assert_eq!(DwtEncoder::new(config).capacity(&cover).unwrap(), 63);
    }

    #[test]
    fn test_wide_secret_is_embedded_without_dimensions() {
        let cover = flat(2064, 16, 128);
        let secret = Raster::new(300, 1, 255, (0..300).map(|i| (i % 256) as u8).collect())
            .unwrap();
        let stego = DwtEncoder::default().embed(&cover, &secret).unwrap();
        let metadata = crate::metadata::decode_metadata(&stego, 8);
        assert!(matches!(metadata, Err(StegoError::DecodeFailure { .. })));
    }
}
