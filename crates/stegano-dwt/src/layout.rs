//! Coefficient layout: which transform coefficient carries which value.
//!
//! Both the metadata fields and the payload bits live in the finest diagonal
//! detail band (`row, col >= size/2`), where every coefficient maps onto its
//! own 2×2 pixel group. Embedding and extraction both go through this
//! module, so the positions exist in exactly one place.

/// Position of one coefficient in a row-major block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Slot {
    pub row: usize,
    pub col: usize,
}

impl Slot {
    /// Row-major index into a `size × size` block.
    #[inline]
    pub fn index(&self, size: usize) -> usize {
        self.row * size + self.col
    }
}

/// Values carried by the metadata block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetadataField {
    SecretWidth,
    SecretHeight,
    BlockSize,
    Strength,
    RandomBlocks,
}

impl MetadataField {
    pub const ALL: [MetadataField; 5] = [
        MetadataField::SecretWidth,
        MetadataField::SecretHeight,
        MetadataField::BlockSize,
        MetadataField::Strength,
        MetadataField::RandomBlocks,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            MetadataField::SecretWidth => "secret_width",
            MetadataField::SecretHeight => "secret_height",
            MetadataField::BlockSize => "block_size",
            MetadataField::Strength => "strength",
            MetadataField::RandomBlocks => "random_blocks",
        }
    }
}

/// Coefficient carrying `field` in a block of edge `size` (`size >= 8`).
///
/// Width sits at `(h, h+1)`, the others stack down column `h` from `h+1`,
/// where `h = size/2`. In an 8×8 block row `h+4` does not exist, so the
/// random-blocks flag moves to `(h, h+2)`.
pub fn metadata_slot(field: MetadataField, size: usize) -> Slot {
    let h = size / 2;
    match field {
        MetadataField::SecretWidth => Slot { row: h, col: h + 1 },
        MetadataField::SecretHeight => Slot { row: h + 1, col: h },
        MetadataField::BlockSize => Slot { row: h + 2, col: h },
        MetadataField::Strength => Slot { row: h + 3, col: h },
        MetadataField::RandomBlocks if h + 4 < size => Slot { row: h + 4, col: h },
        MetadataField::RandomBlocks => Slot { row: h, col: h + 2 },
    }
}

/// Number of payload bits per block: one secret byte.
pub const PAYLOAD_BITS: usize = 8;

/// Coefficient carrying payload bit `bit` (0 = least significant).
pub fn payload_slot(bit: usize, size: usize) -> Slot {
    debug_assert!(bit < PAYLOAD_BITS);
    let h = size / 2;
    Slot {
        row: h + bit % 4,
        col: h + bit / 4,
    }
}
