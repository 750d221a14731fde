//! Block grid geometry and block visitation order.
//!
//! Block 0 (top-left) carries the metadata, so payload blocks are visited
//! from index 1 on, either in raster order or in a seeded pseudo-random
//! order. Embedding and extraction must rebuild the identical order, so the
//! order is a pure function of the grid and the seed: every call owns its
//! generator and nothing is shared between calls.

use fastrand::Rng;

use crate::config::StegoConfig;

/// Index of the block that carries the metadata.
pub const METADATA_BLOCK: usize = 0;

/// Grid of whole blocks covering a raster; partial blocks at the right and
/// bottom edges are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockGrid {
    block_size: usize,
    blocks_x: usize,
    blocks_y: usize,
}

impl BlockGrid {
    pub fn new(width: u32, height: u32, block_size: usize) -> Self {
        debug_assert!(block_size > 0);
        BlockGrid {
            block_size,
            blocks_x: width as usize / block_size,
            blocks_y: height as usize / block_size,
        }
    }

    #[inline]
    pub fn block_size(&self) -> usize {
        self.block_size
    }

    #[inline]
    pub fn blocks_x(&self) -> usize {
        self.blocks_x
    }

    #[inline]
    pub fn blocks_y(&self) -> usize {
        self.blocks_y
    }

    /// Total number of whole blocks.
    #[inline]
    pub fn block_count(&self) -> usize {
        self.blocks_x * self.blocks_y
    }

    /// Number of blocks available for payload (all but the metadata block).
    #[inline]
    pub fn payload_blocks(&self) -> usize {
        self.block_count().saturating_sub(1)
    }

    /// Pixel coordinates `(x, y)` of the top-left corner of block `index`.
    #[inline]
    pub fn origin(&self, index: usize) -> (usize, usize) {
        let bx = index % self.blocks_x;
        let by = index / self.blocks_x;
        (bx * self.block_size, by * self.block_size)
    }
}

/// Order in which payload blocks are visited.
///
/// `block(position)` maps a visitation position (0 = first secret byte) to a
/// block index in `1..block_count`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisitOrder {
    blocks: Vec<usize>,
}

impl VisitOrder {
    /// Raster order: position `i` visits block `i + 1`.
    pub fn identity(payload_blocks: usize) -> Self {
        VisitOrder {
            blocks: (1..=payload_blocks).collect(),
        }
    }

    /// Seeded permutation of the payload blocks.
    ///
    /// Fisher-Yates from the last position down to 1, swapping position `i`
    /// with a position drawn from `0..=i`. Draws are made as `u32` so 32-bit
    /// and 64-bit targets produce the same order.
    pub fn from_seed(seed: u64, payload_blocks: usize) -> Self {
        let mut rng = Rng::with_seed(seed);
        let mut blocks: Vec<usize> = (1..=payload_blocks).collect();

        for i in (1..blocks.len()).rev() {
            let j = rng.u32(0..=(i as u32)) as usize;
            blocks.swap(i, j);
        }

        VisitOrder { blocks }
    }

    /// Order selected by `config` for the given grid.
    pub fn for_config(grid: &BlockGrid, config: &StegoConfig) -> Self {
        if config.use_random_blocks {
            Self::from_seed(config.random_seed, grid.payload_blocks())
        } else {
            Self::identity(grid.payload_blocks())
        }
    }

    /// Block index visited at `position`.
    #[inline]
    pub fn block(&self, position: usize) -> usize {
        self.blocks[position]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.blocks
    }
}
