//! Metadata channel: block 0 carries the secret's dimensions and the
//! embedding configuration, so extraction needs no side information.
//!
//! Each value is written as the raw value of one coefficient (see
//! [`layout::metadata_slot`](crate::layout::metadata_slot)) and read back
//! by truncating toward zero. A coefficient of the finest diagonal band is
//! half the signed sum of an 8-bit 2×2 group, so a field holds at most
//! [`MAX_FIELD_VALUE`]. Extraction is two steps: [`decode_metadata`] with a
//! provisional block size, then [`Metadata::effective_block_size`] for the
//! payload.

use log::debug;

use crate::block::{doubled_detail, shift_detail, BlockWorkspace, Targets};
use crate::config::{
    clamp_strength, effective_block_size, validate_block_size, StegoConfig, MAX_BLOCK_SIZE,
};
use crate::error::{Result, StegoError};
use crate::layout::{metadata_slot, MetadataField};
use crate::raster::Raster;
use crate::scheduler::{BlockGrid, METADATA_BLOCK};

/// Largest value a metadata field can carry.
pub const MAX_FIELD_VALUE: u32 = 255;

/// Values carried by the metadata block.
///
/// Secret dimensions of `0 × 0` mean the dimensions were too large to be
/// recorded and have to be supplied at extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Metadata {
    pub secret_width: u32,
    pub secret_height: u32,
    /// Block size used for the payload blocks.
    pub block_size: usize,
    pub strength: u8,
    pub random_blocks: bool,
}

impl Metadata {
    /// Metadata describing `secret` embedded under `config`.
    ///
    /// A secret wider or taller than [`MAX_FIELD_VALUE`] is described with
    /// unrecorded (`0 × 0`) dimensions.
    pub fn describe(secret: &Raster, config: &StegoConfig) -> Self {
        let recordable =
            secret.width() <= MAX_FIELD_VALUE && secret.height() <= MAX_FIELD_VALUE;
        let (secret_width, secret_height) = if recordable {
            (secret.width(), secret.height())
        } else {
            (0, 0)
        };
        Metadata {
            secret_width,
            secret_height,
            block_size: config.effective_block_size(),
            strength: config.strength(),
            random_blocks: config.use_random_blocks,
        }
    }

    /// Whether the secret dimensions are stored in the metadata block.
    pub fn records_dimensions(&self) -> bool {
        self.secret_width > 0 && self.secret_height > 0
    }

    /// Payload block size re-derived from the decoded configuration.
    pub fn effective_block_size(&self) -> usize {
        effective_block_size(self.block_size)
    }

    /// `base` with block size, strength and the random-blocks flag replaced
    /// by the decoded values. Seed and capacity policy stay the caller's.
    pub fn apply_to(&self, base: &StegoConfig) -> StegoConfig {
        StegoConfig {
            block_size: self.effective_block_size(),
            embedding_strength: self.strength,
            use_random_blocks: self.random_blocks,
            ..base.clone()
        }
    }

    fn value(&self, field: MetadataField) -> i64 {
        match field {
            MetadataField::SecretWidth => self.secret_width as i64,
            MetadataField::SecretHeight => self.secret_height as i64,
            MetadataField::BlockSize => self.block_size as i64,
            MetadataField::Strength => self.strength as i64,
            MetadataField::RandomBlocks => self.random_blocks as i64,
        }
    }
}

/// Field value carried by the 2×2 group behind `slot`: the coefficient
/// truncated toward zero.
#[inline]
fn read_field(doubled: i32) -> i64 {
    (doubled / 2) as i64
}

struct FieldTargets {
    values: [(MetadataField, i64); 5],
}

impl FieldTargets {
    fn new(metadata: &Metadata) -> Self {
        FieldTargets {
            values: MetadataField::ALL.map(|field| (field, metadata.value(field))),
        }
    }
}

impl Targets for FieldTargets {
    fn correct(&self, pixels: &mut [u8], size: usize) -> bool {
        let mut settled = true;
        for &(field, value) in &self.values {
            let slot = metadata_slot(field, size);
            let doubled = doubled_detail(pixels, size, slot);
            if read_field(doubled) == value {
                continue;
            }
            settled = false;
            // nearest of 2v and 2v + 1, both truncate to v
            let target = if (doubled as i64) < 2 * value {
                2 * value
            } else {
                2 * value + 1
            };
            let delta = (target - doubled as i64).clamp(-1020, 1020) as i32;
            shift_detail(pixels, size, slot, delta);
        }
        settled
    }
}

/// Write `metadata` into block 0 of `stego`.
///
/// # Errors
/// [`StegoError::MetadataUnsettled`] when the block cannot be made to read
/// back every value, e.g. a value above [`MAX_FIELD_VALUE`].
pub(crate) fn encode_metadata(
    stego: &mut Raster,
    grid: &BlockGrid,
    metadata: &Metadata,
    workspace: &mut BlockWorkspace,
) -> Result<()> {
    let size = workspace.size();
    workspace.load(stego, grid, METADATA_BLOCK);
    for field in MetadataField::ALL {
        *workspace.coefficient_mut(metadata_slot(field, size)) = metadata.value(field) as f64;
    }

    let targets = FieldTargets::new(metadata);
    if !workspace.settle(&targets) {
        let (field, value) = unsettled_field(workspace, &targets);
        return Err(StegoError::MetadataUnsettled {
            field: field.name(),
            value,
        });
    }
    workspace.store(stego, grid, METADATA_BLOCK);
    debug!("metadata written: {metadata:?}");
    Ok(())
}

fn unsettled_field(workspace: &BlockWorkspace, targets: &FieldTargets) -> (MetadataField, i64) {
    let size = workspace.size();
    targets
        .values
        .iter()
        .copied()
        .max_by_key(|&(field, value)| {
            let read = read_field(workspace.detail(metadata_slot(field, size)));
            (read - value).abs()
        })
        .unwrap_or((MetadataField::SecretWidth, 0))
}

/// Read the metadata of `stego` assuming block 0 is `provisional_block_size`
/// wide.
///
/// # Errors
/// * [`StegoError::InvalidParameter`] when `provisional_block_size` is out of
///   range
/// * [`StegoError::DecodeFailure`] when the stego raster has no whole block
///   or the decoded values are not usable: non-positive dimensions,
///   dimensions larger than the stego raster, or a block size out of range.
pub fn decode_metadata(stego: &Raster, provisional_block_size: usize) -> Result<Metadata> {
    let size = validate_block_size(provisional_block_size)?;
    let grid = BlockGrid::new(stego.width(), stego.height(), size);
    if grid.block_count() == 0 {
        return Err(StegoError::DecodeFailure {
            reason: format!(
                "{}x{} raster holds no {size}x{size} metadata block",
                stego.width(),
                stego.height()
            ),
        });
    }

    let mut workspace = BlockWorkspace::new(size)?;
    workspace.load(stego, &grid, METADATA_BLOCK);
    let read = |field| read_field(workspace.detail(metadata_slot(field, size)));

    let width = read(MetadataField::SecretWidth);
    let height = read(MetadataField::SecretHeight);
    let block_size = read(MetadataField::BlockSize);
    let strength = read(MetadataField::Strength);
    let random_blocks = read(MetadataField::RandomBlocks);
    debug!(
        "raw metadata: {width}x{height}, block size {block_size}, strength {strength}, random blocks {random_blocks}"
    );

    if width == 0 && height == 0 {
        return Err(StegoError::DecodeFailure {
            reason: "secret dimensions are not recorded, they must be supplied".to_string(),
        });
    }
    if width <= 0 || height <= 0 || width > stego.width() as i64 || height > stego.height() as i64 {
        return Err(StegoError::DecodeFailure {
            reason: format!(
                "invalid secret dimensions {width}x{height} for a {}x{} stego image",
                stego.width(),
                stego.height()
            ),
        });
    }
    if block_size <= 0 || block_size > MAX_BLOCK_SIZE as i64 {
        return Err(StegoError::DecodeFailure {
            reason: format!("invalid block size {block_size}"),
        });
    }

    Ok(Metadata {
        secret_width: width as u32,
        secret_height: height as u32,
        block_size: block_size as usize,
        strength: clamp_strength(strength),
        random_blocks: random_blocks != 0,
    })
}
