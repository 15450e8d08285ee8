//! Address-space decode.
//!
//! Partitions the 32-bit address space into RAM, memory-mapped IO registers, the
//! performance counter block, the halt sentinel, and everything else (unmapped).

use crate::config::MemoryConfig;
use crate::soc::devices::perf::PERF_WINDOW;

/// Region an address decodes to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Region {
    /// Main memory. The only executable region.
    Ram,
    /// A memory-mapped device register on the IO bus.
    Io,
    /// The performance counter block.
    PerfCounters,
    /// The halt sentinel word.
    Halt,
    /// Nothing lives here.
    Unmapped,
}

/// Static memory map built from [`MemoryConfig`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AddressMap {
    ram_base: u64,
    ram_end: u64,
    io_registers: Vec<u32>,
    perf_base: u64,
    halt_addr: u32,
}

impl AddressMap {
    /// Builds the map from configuration.
    pub fn new(config: &MemoryConfig) -> Self {
        Self {
            ram_base: u64::from(config.ram_base),
            ram_end: u64::from(config.ram_base) + u64::from(config.ram_size),
            io_registers: vec![
                config.led_addr,
                config.seven_seg_addr,
                config.switch_addr,
            ],
            perf_base: u64::from(config.perf_base),
            halt_addr: config.halt_addr,
        }
    }

    /// Decodes `addr`. Sub-word addresses decode to the region of their containing word,
    /// except for the halt sentinel, which only matches exactly.
    ///
    /// # Examples
    ///
    /// ```
    /// use rvpipe_core::config::MemoryConfig;
    /// use rvpipe_core::soc::map::{AddressMap, Region};
    ///
    /// let map = AddressMap::new(&MemoryConfig::default());
    /// assert_eq!(map.decode(0x0000_0100), Region::Ram);
    /// assert_eq!(map.decode(0xFFFF_0002), Region::Io);
    /// assert_eq!(map.decode(0xFFFF_FFF0), Region::Halt);
    /// assert_eq!(map.decode(0xFFFF_FFF1), Region::Unmapped);
    /// assert_eq!(map.decode(0x4000_0000), Region::Unmapped);
    /// ```
    pub fn decode(&self, addr: u32) -> Region {
        let a = u64::from(addr);
        let word = addr & !0b11;
        if a >= self.ram_base && a < self.ram_end {
            Region::Ram
        } else if addr == self.halt_addr {
            Region::Halt
        } else if a >= self.perf_base && a < self.perf_base + u64::from(PERF_WINDOW) {
            Region::PerfCounters
        } else if self.io_registers.contains(&word) {
            Region::Io
        } else {
            Region::Unmapped
        }
    }

    /// Whether instructions may be fetched from `pc`: word aligned and inside RAM.
    pub fn is_executable(&self, pc: u32) -> bool {
        pc & 0b11 == 0 && self.decode(pc) == Region::Ram
    }

    /// The halt sentinel address.
    pub const fn halt_addr(&self) -> u32 {
        self.halt_addr
    }

    /// First address past the end of RAM.
    pub const fn ram_end(&self) -> u64 {
        self.ram_end
    }
}
