//! Unaligned memory access handling.
//!
//! Under the `Split` alignment policy a misaligned halfword or word in RAM is serviced
//! as two aligned word accesses. Loads are reassembled with a funnel shift across the
//! two words; stores are split into two byte-enabled word writes.

use crate::core::pipeline::signals::MemWidth;

/// Merges two consecutive aligned words and shifts the access down to lane 0.
///
/// # Arguments
///
/// * `lo` - Word at the lower aligned address.
/// * `hi` - Word at the next aligned address.
/// * `offset` - Byte offset of the access within `lo`.
///
/// # Examples
///
/// ```
/// use rvpipe_core::core::units::lsu::unaligned::funnel_merge;
///
/// // Bytes in memory: 00 11 22 33 | 44 55 66 77, word load at offset 3.
/// assert_eq!(funnel_merge(0x3322_1100, 0x7766_5544, 3), 0x6655_4433);
/// ```
pub const fn funnel_merge(lo: u32, hi: u32, offset: u32) -> u32 {
    let wide = ((hi as u64) << 32) | lo as u64;
    (wide >> ((offset & 0b11) * 8)) as u32
}

/// One half of a split store.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SplitWrite {
    /// Data already shifted into its lanes.
    pub data: u32,
    /// Byte-enable mask (may be zero for the upper word).
    pub enable: u8,
}

/// Splits a store of `width` at byte `offset` into lower- and upper-word writes.
///
/// # Examples
///
/// ```
/// use rvpipe_core::core::pipeline::signals::MemWidth;
/// use rvpipe_core::core::units::lsu::unaligned::split_store;
///
/// let [lo, hi] = split_store(0xAABB_CCDD, MemWidth::Word, 2);
/// assert_eq!((lo.data, lo.enable), (0xCCDD_0000, 0b1100));
/// assert_eq!((hi.data, hi.enable), (0x0000_AABB, 0b0011));
/// ```
pub const fn split_store(data: u32, width: MemWidth, offset: u32) -> [SplitWrite; 2] {
    let size = width.bytes();
    let lanes: u64 = (1u64 << size) - 1;
    let shift = offset & 0b11;
    let enables = lanes << shift;
    let wide = (data as u64) << (shift * 8);
    [
        SplitWrite {
            data: wide as u32,
            enable: (enables & 0xF) as u8,
        },
        SplitWrite {
            data: (wide >> 32) as u32,
            enable: ((enables >> 4) & 0xF) as u8,
        },
    ]
}
