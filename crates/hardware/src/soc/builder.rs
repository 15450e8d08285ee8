//! System-on-Chip construction and top-level `System` type.
//!
//! This module builds the memory side of the machine from configuration. It performs:
//! 1. **Address map:** Decodes the configured RAM, IO, counter and halt windows.
//! 2. **Device registration:** Puts the LED, seven-segment and switch ports on the IO bus.
//! 3. **Access service:** Instruction fetch, data reads, and byte-enabled data writes by region.

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use crate::common::error::{Result, SimError};
use crate::config::Config;
use crate::soc::devices::{GpioPort, PerfCounters, PerfEvents, PortDirection};
use crate::soc::interconnect::{Bus, IoWrite};
use crate::soc::map::{AddressMap, Region};
use crate::soc::memory::Ram;
use crate::soc::traits::Device;

/// Everything the core talks to: RAM, the IO bus and the counter block.
#[derive(Debug)]
pub struct System {
    map: AddressMap,
    ram: Ram,
    bus: Bus,
    perf: PerfCounters,
    leds: Arc<AtomicU32>,
    seven_seg: Arc<AtomicU32>,
    switches: Arc<AtomicU32>,
}

impl System {
    /// Builds the system described by `config`.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidConfig`](crate::common::SimError::InvalidConfig) if the
    /// memory map is inconsistent.
    pub fn new(config: &Config) -> Result<Self> {
        config.validate()?;
        let mem = &config.memory;

        let leds = GpioPort::new("LEDS", mem.led_addr, PortDirection::Output);
        let seven_seg = GpioPort::new("SEVEN_SEG", mem.seven_seg_addr, PortDirection::Output);
        let switches = GpioPort::new("SWITCHES", mem.switch_addr, PortDirection::Input);

        let (led_handle, seg_handle, sw_handle) =
            (leds.handle(), seven_seg.handle(), switches.handle());

        let mut bus = Bus::new();
        bus.add_device(Box::new(leds));
        bus.add_device(Box::new(seven_seg));
        bus.add_device(Box::new(switches));

        Ok(Self {
            map: AddressMap::new(mem),
            ram: Ram::new(mem.ram_base, mem.ram_size),
            bus,
            perf: PerfCounters::new(mem.perf_base),
            leds: led_handle,
            seven_seg: seg_handle,
            switches: sw_handle,
        })
    }

    /// The address map.
    pub const fn map(&self) -> &AddressMap {
        &self.map
    }

    /// Combinational instruction read. `None` for a misaligned PC or one outside RAM.
    pub fn fetch(&self, pc: u32) -> Option<u32> {
        if self.map.is_executable(pc) {
            self.ram.read_word(pc)
        } else {
            None
        }
    }

    /// Reads the aligned word at `base` in `region`. Regions without storage read zero.
    pub fn read(&self, region: Region, base: u32) -> u32 {
        match region {
            Region::Ram => self.ram.read_word(base).unwrap_or(0),
            Region::Io => self.bus.read_u32(base),
            Region::PerfCounters => self
                .perf
                .read_u32(base.wrapping_sub(self.perf.address_range().0)),
            Region::Halt | Region::Unmapped => 0,
        }
    }

    /// Writes the enabled lanes of `data` to the aligned word at `base` in `region`.
    ///
    /// Returns the IO write record for stores outside RAM, or
    /// [`SimError::StoreRejected`] when RAM or the IO bus refuses the word.
    pub fn write(
        &mut self,
        region: Region,
        base: u32,
        data: u32,
        enable: u8,
    ) -> Result<Option<IoWrite>> {
        let record = IoWrite {
            addr: base,
            data,
            enable,
        };
        match region {
            Region::Ram => {
                if !self.ram.write_word(base, data, enable) {
                    return Err(SimError::StoreRejected(base));
                }
                Ok(None)
            }
            Region::Io => {
                if !self.bus.write_u32(base, data, enable) {
                    return Err(SimError::StoreRejected(base));
                }
                Ok(Some(record))
            }
            Region::PerfCounters => {
                let offset = base.wrapping_sub(self.perf.address_range().0);
                self.perf.write_u32(offset, data, enable);
                Ok(Some(record))
            }
            Region::Halt => Ok(Some(record)),
            Region::Unmapped => Ok(None),
        }
    }

    /// Ends a cycle: ticks the IO devices and counts the cycle.
    pub fn tick(&mut self, events: PerfEvents) {
        self.bus.tick();
        self.perf.record(events);
    }

    /// Main memory.
    pub const fn ram(&self) -> &Ram {
        &self.ram
    }

    /// Mutable main memory, for loaders and tests.
    pub const fn ram_mut(&mut self) -> &mut Ram {
        &mut self.ram
    }

    /// The IO bus.
    pub const fn bus(&self) -> &Bus {
        &self.bus
    }

    /// The performance counters.
    pub const fn perf(&self) -> &PerfCounters {
        &self.perf
    }

    /// Drives the switch inputs.
    pub fn set_switches(&self, value: u32) {
        self.switches.store(value, Ordering::Relaxed);
    }

    /// Current LED bank value.
    pub fn leds(&self) -> u32 {
        self.leds.load(Ordering::Relaxed)
    }

    /// Current seven-segment display register value.
    pub fn seven_seg(&self) -> u32 {
        self.seven_seg.load(Ordering::Relaxed)
    }
}
