//! One secret byte per block, one bit per diagonal-detail coefficient.
//!
//! A 1 bit pushes its coefficient up by the embedding factor, a 0 bit pushes
//! it down; extraction only reads the sign (`>= 0` is 1). Clip-and-round can
//! swallow a small push, so every written block is settled: bits that do not
//! read back are driven to `±(1 + factor)` in their 2×2 group.

use crate::block::{doubled_detail, shift_detail, BlockWorkspace, Targets};
use crate::layout::{payload_slot, PAYLOAD_BITS};

#[inline]
fn bit_of(byte: u8, bit: usize) -> bool {
    (byte >> bit) & 1 == 1
}

/// Sign rule on twice the coefficient, which has the same sign.
#[inline]
fn reads_as(doubled: i32) -> bool {
    doubled >= 0
}

struct ByteTargets {
    byte: u8,
    /// `1 + factor` on the doubled scale, rounded up.
    margin: i32,
}

impl Targets for ByteTargets {
    fn correct(&self, pixels: &mut [u8], size: usize) -> bool {
        let mut settled = true;
        for bit in 0..PAYLOAD_BITS {
            let slot = payload_slot(bit, size);
            let doubled = doubled_detail(pixels, size, slot);
            let wanted = bit_of(self.byte, bit);
            if reads_as(doubled) == wanted {
                continue;
            }
            settled = false;
            let target = if wanted { self.margin } else { -self.margin };
            shift_detail(pixels, size, slot, target - doubled);
        }
        settled
    }
}

/// Embed `byte` into the block currently loaded in `workspace`.
///
/// Returns `false` if the block could not be made to read back `byte`.
pub(crate) fn embed_byte(workspace: &mut BlockWorkspace, byte: u8, factor: f64) -> bool {
    let size = workspace.size();
    for bit in 0..PAYLOAD_BITS {
        let coefficient = workspace.coefficient_mut(payload_slot(bit, size));
        if bit_of(byte, bit) {
            *coefficient += factor;
        } else {
            *coefficient -= factor;
        }
    }

    workspace.settle(&ByteTargets {
        byte,
        margin: (2.0 * (1.0 + factor)).ceil() as i32,
    })
}

/// Read the byte carried by the block currently loaded in `workspace`.
pub(crate) fn extract_byte(workspace: &BlockWorkspace) -> u8 {
    let size = workspace.size();
    (0..PAYLOAD_BITS).fold(0u8, |byte, bit| {
        if reads_as(workspace.detail(payload_slot(bit, size))) {
            byte | (1 << bit)
        } else {
            byte
        }
    })
}
