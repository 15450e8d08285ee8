//! Load/Store Unit (LSU).
//!
//! This module provides the pieces of the Memory and Writeback stages that deal with
//! bytes rather than instructions:
//! - byte-enable generation from `{width, addr[1:0]}`,
//! - lane placement for stores and lane extraction plus sign/zero extension for loads,
//! - access planning against the address map under the configured alignment policy.
//!
//! [`unaligned`] holds the split-access helpers used by the `Split` policy.

/// Unaligned memory access handling (funnel-shift merge, split byte enables).
pub mod unaligned;

use crate::config::AlignmentPolicy;
use crate::core::pipeline::signals::MemWidth;
use crate::soc::map::{AddressMap, Region};

/// Mask of the byte-offset bits within a word.
const OFFSET_MASK: u32 = 0b11;

/// Splits an address into its word-aligned base and byte offset.
#[inline(always)]
pub const fn word_align(addr: u32) -> (u32, u32) {
    (addr & !OFFSET_MASK, addr & OFFSET_MASK)
}

/// Checks whether an access of `width` at `addr` is naturally aligned.
///
/// Bytes are legal anywhere; halfwords need bit 0 clear; words need bits 1:0 clear.
pub const fn is_aligned(addr: u32, width: MemWidth) -> bool {
    match width {
        MemWidth::Nop | MemWidth::Byte => true,
        MemWidth::Half => addr & 0b1 == 0,
        MemWidth::Word => addr & OFFSET_MASK == 0,
    }
}

/// Byte-enable mask (bit `i` enables byte lane `i`) for an aligned access.
///
/// # Examples
///
/// ```
/// use rvpipe_core::core::pipeline::signals::MemWidth;
/// use rvpipe_core::core::units::lsu::byte_enable;
///
/// assert_eq!(byte_enable(MemWidth::Byte, 3), 0b1000);
/// assert_eq!(byte_enable(MemWidth::Half, 2), 0b1100);
/// assert_eq!(byte_enable(MemWidth::Word, 0), 0b1111);
/// ```
pub const fn byte_enable(width: MemWidth, offset: u32) -> u8 {
    let lanes: u8 = match width {
        MemWidth::Nop => 0,
        MemWidth::Byte => 0b0001,
        MemWidth::Half => 0b0011,
        MemWidth::Word => 0b1111,
    };
    lanes << (offset & OFFSET_MASK)
}

/// Moves store data into the byte lanes selected by `offset`.
#[inline(always)]
pub const fn store_lanes(data: u32, offset: u32) -> u32 {
    data << ((offset & OFFSET_MASK) * 8)
}

/// Expands a byte-enable mask to a bit mask over the word.
pub const fn lane_mask(enable: u8) -> u32 {
    let mut mask = 0u32;
    let mut lane = 0;
    while lane < 4 {
        if enable & (1 << lane) != 0 {
            mask |= 0xFF << (lane * 8);
        }
        lane += 1;
    }
    mask
}

/// Extracts a load result from a raw memory word.
///
/// Selects the lanes at `offset`, then sign- or zero-extends by `width`.
///
/// # Examples
///
/// ```
/// use rvpipe_core::core::pipeline::signals::MemWidth;
/// use rvpipe_core::core::units::lsu::extract_load;
///
/// let word = 0x80FF_7F01;
/// assert_eq!(extract_load(word, 1, MemWidth::Byte, false), 0x7F);
/// assert_eq!(extract_load(word, 2, MemWidth::Byte, true), 0xFFFF_FFFF);
/// assert_eq!(extract_load(word, 2, MemWidth::Half, false), 0x80FF);
/// assert_eq!(extract_load(word, 2, MemWidth::Half, true), 0xFFFF_80FF);
/// ```
pub const fn extract_load(word: u32, offset: u32, width: MemWidth, signed: bool) -> u32 {
    let shifted = word >> ((offset & OFFSET_MASK) * 8);
    match (width, signed) {
        (MemWidth::Byte, true) => shifted as u8 as i8 as i32 as u32,
        (MemWidth::Byte, false) => shifted as u8 as u32,
        (MemWidth::Half, true) => shifted as u16 as i16 as i32 as u32,
        (MemWidth::Half, false) => shifted as u16 as u32,
        (MemWidth::Word | MemWidth::Nop, _) => shifted,
    }
}

/// Why an access was refused.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccessFault {
    /// No region decodes the address (or a split access runs off the end of RAM).
    Unmapped,
    /// The access is misaligned and the policy (or the target region) forbids splitting.
    Misaligned,
}

/// How the Memory stage will service an access.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccessPlan {
    /// One word access at `base` touching the lanes at `offset`. Under the split policy
    /// this also covers misaligned accesses that stay inside one word.
    Aligned {
        /// Region the word lives in.
        region: Region,
        /// Word-aligned address.
        base: u32,
        /// Byte offset of the access within the word.
        offset: u32,
    },
    /// Two aligned RAM word accesses merged by a funnel shift; takes an extra cycle.
    /// Only used when the access crosses a word boundary.
    Split {
        /// Lower word address.
        lo: u32,
        /// Upper word address (`lo + 4`).
        hi: u32,
        /// Byte offset of the access within the lower word.
        offset: u32,
    },
    /// The access must not happen.
    Fault(AccessFault),
}

/// Decides how an access of `width` at `addr` is serviced.
pub fn plan(map: &AddressMap, policy: AlignmentPolicy, addr: u32, width: MemWidth) -> AccessPlan {
    let (base, offset) = word_align(addr);
    let region = map.decode(addr);
    if region == Region::Unmapped {
        return AccessPlan::Fault(AccessFault::Unmapped);
    }
    if is_aligned(addr, width) {
        return AccessPlan::Aligned {
            region,
            base,
            offset,
        };
    }

    match (policy, region) {
        (AlignmentPolicy::Split, Region::Ram) if offset + width.bytes() <= 4 => {
            AccessPlan::Aligned {
                region,
                base,
                offset,
            }
        }
        (AlignmentPolicy::Split, Region::Ram) => {
            let hi = base.wrapping_add(4);
            if map.decode(hi) == Region::Ram {
                AccessPlan::Split {
                    lo: base,
                    hi,
                    offset,
                }
            } else {
                AccessPlan::Fault(AccessFault::Unmapped)
            }
        }
        _ => AccessPlan::Fault(AccessFault::Misaligned),
    }
}
