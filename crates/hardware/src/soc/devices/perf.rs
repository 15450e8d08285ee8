//! Hardware performance counters.
//!
//! A block of read-only 32-bit counters updated once per committed cycle. A store of
//! any value to the control register clears all of them; the clear takes effect after
//! the current cycle has been counted.
//!
//! | Offset | Register    |
//! |--------|-------------|
//! | `0x00` | cycles      |
//! | `0x04` | retired     |
//! | `0x08` | stalls      |
//! | `0x0C` | mispredicts |
//! | `0x10` | branches    |
//! | `0x1C` | control     |

use crate::soc::traits::Device;

/// Size of the counter block in bytes.
pub const PERF_WINDOW: u32 = 0x20;

/// Cycle counter offset.
pub const CYCLES: u32 = 0x00;
/// Retired-instruction counter offset.
pub const RETIRED: u32 = 0x04;
/// Stall-cycle counter offset.
pub const STALLS: u32 = 0x08;
/// Misprediction counter offset.
pub const MISPREDICTS: u32 = 0x0C;
/// Committed branch/jump counter offset.
pub const BRANCHES: u32 = 0x10;
/// Control register offset; writes clear every counter.
pub const CONTROL: u32 = 0x1C;

/// What happened in one cycle, as seen by the counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PerfEvents {
    /// An instruction committed.
    pub retired: bool,
    /// The front end was held this cycle.
    pub stalled: bool,
    /// A mispredicted branch committed.
    pub mispredict: bool,
    /// A branch or jump committed.
    pub branch: bool,
}

/// The counter block.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PerfCounters {
    base: u32,
    cycles: u32,
    retired: u32,
    stalls: u32,
    mispredicts: u32,
    branches: u32,
    clear_pending: bool,
}

impl PerfCounters {
    /// Creates a zeroed counter block at `base`.
    pub fn new(base: u32) -> Self {
        Self {
            base,
            ..Self::default()
        }
    }

    /// Counts one cycle, then applies any pending clear.
    pub fn record(&mut self, events: PerfEvents) {
        self.cycles = self.cycles.wrapping_add(1);
        self.retired = self.retired.wrapping_add(u32::from(events.retired));
        self.stalls = self.stalls.wrapping_add(u32::from(events.stalled));
        self.mispredicts = self.mispredicts.wrapping_add(u32::from(events.mispredict));
        self.branches = self.branches.wrapping_add(u32::from(events.branch));
        if self.clear_pending {
            self.clear();
        }
    }

    /// Zeroes every counter.
    pub fn clear(&mut self) {
        *self = Self::new(self.base);
    }

    /// Cycle count.
    pub const fn cycles(&self) -> u32 {
        self.cycles
    }

    /// Retired-instruction count.
    pub const fn retired(&self) -> u32 {
        self.retired
    }

    /// Stall-cycle count.
    pub const fn stalls(&self) -> u32 {
        self.stalls
    }

    /// Misprediction count.
    pub const fn mispredicts(&self) -> u32 {
        self.mispredicts
    }

    /// Committed branch/jump count.
    pub const fn branches(&self) -> u32 {
        self.branches
    }
}

impl Device for PerfCounters {
    fn name(&self) -> &str {
        "PERF"
    }

    fn address_range(&self) -> (u32, u32) {
        (self.base, PERF_WINDOW)
    }

    fn read_u32(&self, offset: u32) -> u32 {
        match offset & !0b11 {
            CYCLES => self.cycles,
            RETIRED => self.retired,
            STALLS => self.stalls,
            MISPREDICTS => self.mispredicts,
            BRANCHES => self.branches,
            _ => 0,
        }
    }

    fn write_u32(&mut self, offset: u32, _val: u32, enable: u8) {
        if offset & !0b11 == CONTROL && enable != 0 {
            self.clear_pending = true;
        }
    }
}
