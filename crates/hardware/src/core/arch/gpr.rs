//! RISC-V General-Purpose Register File.
//!
//! This module implements the General-Purpose Register (GPR) file for RV32I.
//! It performs the following:
//! 1. **Storage:** Maintains 32 integer registers (`x0`-`x31`) of 32 bits.
//! 2. **Invariant Enforcement:** Ensures that register `x0` is hardwired to zero.
//! 3. **Write-before-read:** Lets Decode observe the value Writeback commits in the same cycle.
//! 4. **Debugging:** Provides utilities for dumping the complete register state.

use crate::common::constants::NUM_REGS;
use crate::isa::abi::reg_name;

/// A single register-file write produced by Writeback.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RegWrite {
    /// Destination register index (never 0).
    pub rd: usize,
    /// Value written.
    pub value: u32,
}

/// General-Purpose Register file.
///
/// Contains 32 general-purpose registers used for integer operations. Register `x0`
/// is hardwired to zero and cannot be modified.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Gpr {
    regs: [u32; NUM_REGS],
}

impl Gpr {
    /// Creates a new general-purpose register file with all registers initialized to zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a general-purpose register value.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register index (0-31).
    ///
    /// # Returns
    ///
    /// The 32-bit value stored in the specified register. Register `x0` and
    /// out-of-range indices always return 0.
    pub fn read(&self, idx: usize) -> u32 {
        if idx == 0 {
            0
        } else {
            self.regs.get(idx).copied().unwrap_or(0)
        }
    }

    /// Reads a register as seen by Decode while `pending` commits in the same cycle.
    ///
    /// Models a register file that writes in the first half of the clock and reads in
    /// the second, so a producer in Writeback is visible to a consumer in Decode.
    pub fn read_through(&self, idx: usize, pending: Option<RegWrite>) -> u32 {
        match pending {
            Some(w) if idx != 0 && w.rd == idx => w.value,
            _ => self.read(idx),
        }
    }

    /// Writes a value to a general-purpose register.
    ///
    /// Writes to `x0` are dropped regardless of what the caller decoded.
    pub fn write(&mut self, idx: usize, val: u32) {
        if idx == 0 {
            return;
        }
        if let Some(slot) = self.regs.get_mut(idx) {
            *slot = val;
        }
    }

    /// Applies a [`RegWrite`] produced by Writeback.
    pub fn commit(&mut self, w: RegWrite) {
        self.write(w.rd, w.value);
    }

    /// Returns a copy of all 32 registers, `x0` included.
    pub const fn snapshot(&self) -> [u32; NUM_REGS] {
        self.regs
    }

    /// Dumps the contents of all general-purpose registers to stdout.
    ///
    /// Displays registers in pairs with hexadecimal formatting for debugging purposes.
    pub fn dump(&self) {
        for i in (0..NUM_REGS).step_by(2) {
            println!(
                "x{:<2} {:<4} = {:#010x}   x{:<2} {:<4} = {:#010x}",
                i,
                reg_name(i),
                self.read(i),
                i + 1,
                reg_name(i + 1),
                self.read(i + 1)
            );
        }
    }
}
