//! Embedding configuration.

use crate::error::{Result, StegoError};

/// Default edge length of a transform block.
pub const DEFAULT_BLOCK_SIZE: usize = 8;

/// Smallest block size whose payload and metadata slots fit inside the block.
pub const MIN_BLOCK_SIZE: usize = 8;

/// Largest block size the metadata block can record; a metadata field
/// holds at most 255.
pub const MAX_BLOCK_SIZE: usize = 128;

/// Default embedding strength (1-10).
pub const DEFAULT_STRENGTH: u8 = 5;

pub const MIN_STRENGTH: u8 = 1;
pub const MAX_STRENGTH: u8 = 10;

/// What to do when the secret has more pixels than there are payload blocks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CapacityPolicy {
    /// Refuse to embed.
    #[default]
    Strict,
    /// Embed as many leading bytes as fit, drop the rest.
    Truncate,
}

/// Configuration shared by embedding and extraction.
///
/// Block size, strength and the random-blocks flag travel inside the stego
/// image. The seed does not; extraction in random-block mode needs the same
/// seed the embedding used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StegoConfig {
    /// Edge length of the square blocks. Rounded up to a power of two.
    pub block_size: usize,
    /// Perturbation strength, 1-10. Coefficients move by `strength / 10`.
    pub embedding_strength: u8,
    /// Visit payload blocks in a seeded pseudo-random order.
    pub use_random_blocks: bool,
    /// Seed for the block permutation.
    pub random_seed: u64,
    /// Behaviour when the secret outgrows the payload blocks.
    pub capacity_policy: CapacityPolicy,
}

impl Default for StegoConfig {
    fn default() -> Self {
        Self {
            block_size: DEFAULT_BLOCK_SIZE,
            embedding_strength: DEFAULT_STRENGTH,
            use_random_blocks: false,
            random_seed: fastrand::u64(..),
            capacity_policy: CapacityPolicy::default(),
        }
    }
}

impl StegoConfig {
    pub fn with_block_size(mut self, block_size: usize) -> Self {
        self.block_size = block_size;
        self
    }

    /// Set the strength, clamped into 1-10.
    pub fn with_strength(mut self, strength: u8) -> Self {
        self.embedding_strength = clamp_strength(strength as i64);
        self
    }

    pub fn with_random_blocks(mut self, use_random_blocks: bool) -> Self {
        self.use_random_blocks = use_random_blocks;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.random_seed = seed;
        self
    }

    pub fn with_capacity_policy(mut self, policy: CapacityPolicy) -> Self {
        self.capacity_policy = policy;
        self
    }

    /// Block size actually used by the transform: the configured size rounded
    /// up to the next power of two.
    pub fn effective_block_size(&self) -> usize {
        effective_block_size(self.block_size)
    }

    /// Strength clamped into 1-10.
    pub fn strength(&self) -> u8 {
        clamp_strength(self.embedding_strength as i64)
    }

    /// Coefficient perturbation applied per payload bit.
    pub fn embedding_factor(&self) -> f64 {
        self.strength() as f64 / 10.0
    }

    /// Check the configuration and return the effective block size.
    pub(crate) fn validate(&self) -> Result<usize> {
        validate_block_size(self.block_size)
    }
}

/// Effective size of `block_size`, if it lies within
/// [`MIN_BLOCK_SIZE`]..=[`MAX_BLOCK_SIZE`].
pub(crate) fn validate_block_size(block_size: usize) -> Result<usize> {
    let size = effective_block_size(block_size);
    if !(MIN_BLOCK_SIZE..=MAX_BLOCK_SIZE).contains(&size) {
        return Err(StegoError::InvalidParameter {
            param: "block_size",
            value: block_size.to_string(),
            reason: format!("effective block size must be within {MIN_BLOCK_SIZE}..={MAX_BLOCK_SIZE}"),
        });
    }
    Ok(size)
}

/// Round up to the next power of two; zero maps to one.
///
/// Sizes whose next power of two does not fit a `usize` map to `usize::MAX`,
/// which validation rejects.
pub fn effective_block_size(block_size: usize) -> usize {
    block_size
        .max(1)
        .checked_next_power_of_two()
        .unwrap_or(usize::MAX)
}

pub(crate) fn clamp_strength(strength: i64) -> u8 {
    strength.clamp(MIN_STRENGTH as i64, MAX_STRENGTH as i64) as u8
}
