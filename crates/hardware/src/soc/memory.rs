//! Main memory.
//!
//! Flat little-endian RAM shared by instruction fetch and data accesses. Instruction
//! reads are combinational (zero latency); data writes are byte-enabled word writes.

use crate::common::error::{Result, SimError};
use crate::core::units::lsu::lane_mask;

/// System RAM.
#[derive(Clone)]
pub struct Ram {
    base: u32,
    data: Vec<u8>,
}

impl std::fmt::Debug for Ram {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ram")
            .field("base", &format_args!("{:#010x}", self.base))
            .field("size", &self.data.len())
            .finish()
    }
}

impl Ram {
    /// Creates zero-filled RAM of `size` bytes at `base`.
    pub fn new(base: u32, size: u32) -> Self {
        Self {
            base,
            data: vec![0; size as usize],
        }
    }

    fn offset_of(&self, addr: u32, len: usize) -> Option<usize> {
        let off = addr.checked_sub(self.base)? as usize;
        (off.checked_add(len)? <= self.data.len()).then_some(off)
    }

    /// Reads the aligned word containing `addr`. `None` outside RAM.
    pub fn read_word(&self, addr: u32) -> Option<u32> {
        let off = self.offset_of(addr & !0b11, 4)?;
        let bytes = self.data.get(off..off + 4)?;
        Some(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Writes the lanes of `val` enabled by `enable` into the aligned word at `addr`.
    ///
    /// Returns `false` (and writes nothing) outside RAM.
    pub fn write_word(&mut self, addr: u32, val: u32, enable: u8) -> bool {
        let Some(off) = self.offset_of(addr & !0b11, 4) else {
            return false;
        };
        let Some(old) = self.read_word(addr) else {
            return false;
        };
        let mask = lane_mask(enable);
        let merged = (old & !mask) | (val & mask);
        if let Some(dst) = self.data.get_mut(off..off + 4) {
            dst.copy_from_slice(&merged.to_le_bytes());
        }
        true
    }

    /// Copies an image into RAM at `addr`.
    pub fn load(&mut self, addr: u32, bytes: &[u8]) -> Result<()> {
        let off = self
            .offset_of(addr, bytes.len())
            .ok_or(SimError::ImageOutOfRange {
                addr,
                len: bytes.len(),
            })?;
        self.data[off..off + bytes.len()].copy_from_slice(bytes);
        Ok(())
    }

    /// Copies a sequence of words into RAM starting at `addr`.
    pub fn load_words(&mut self, addr: u32, words: &[u32]) -> Result<()> {
        let bytes: Vec<u8> = words.iter().flat_map(|w| w.to_le_bytes()).collect();
        self.load(addr, &bytes)
    }

    /// Base address.
    pub const fn base(&self) -> u32 {
        self.base
    }

    /// Size in bytes.
    pub fn size(&self) -> usize {
        self.data.len()
    }
}
