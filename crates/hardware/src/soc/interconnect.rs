//! IO bus.
//!
//! Routes word accesses inside the IO window to the device that claims them. It provides:
//! 1. **Device registration:** Devices are added by address range and kept sorted for lookup.
//! 2. **Access routing:** Read/write by absolute address; unclaimed addresses read zero.
//! 3. **Tick:** Each device is ticked once per simulated cycle.
//!
//! RAM and the performance counters are not on this bus; the [`System`](super::System)
//! services them directly.

use super::traits::Device;

/// One committed IO store, reported for trace comparison.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IoWrite {
    /// Word-aligned target address.
    pub addr: u32,
    /// Data already placed in its byte lanes.
    pub data: u32,
    /// Byte-enable mask.
    pub enable: u8,
}

/// IO bus connecting the core's Memory stage to the memory-mapped peripherals.
#[derive(Default)]
pub struct Bus {
    devices: Vec<Box<dyn Device>>,
}

impl std::fmt::Debug for Bus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.devices.iter().map(|d| d.name()))
            .finish()
    }
}

impl Bus {
    /// Creates an empty bus.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a device; devices are sorted by base address for lookup.
    pub fn add_device(&mut self, dev: Box<dyn Device>) {
        self.devices.push(dev);
        self.devices.sort_by_key(|d| d.address_range().0);
    }

    /// Number of registered devices.
    pub fn len(&self) -> usize {
        self.devices.len()
    }

    /// Whether no device is registered.
    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    fn find(&self, addr: u32) -> Option<(usize, u32)> {
        let a = u64::from(addr);
        self.devices.iter().enumerate().find_map(|(idx, dev)| {
            let (start, size) = dev.address_range();
            let claimed = a >= u64::from(start) && a < u64::from(start) + u64::from(size);
            claimed.then_some((idx, addr.wrapping_sub(start)))
        })
    }

    /// Name of the device claiming `addr`, if any.
    pub fn device_name(&self, addr: u32) -> Option<&str> {
        self.find(addr).map(|(idx, _)| self.devices[idx].name())
    }

    /// Reads the word at `addr`; returns 0 if no device claims the address.
    pub fn read_u32(&self, addr: u32) -> u32 {
        match self.find(addr) {
            Some((idx, offset)) => self.devices[idx].read_u32(offset),
            None => 0,
        }
    }

    /// Writes the enabled lanes of `val` at `addr`; returns `false` if no device claims it.
    pub fn write_u32(&mut self, addr: u32, val: u32, enable: u8) -> bool {
        match self.find(addr) {
            Some((idx, offset)) => {
                self.devices[idx].write_u32(offset, val, enable);
                true
            }
            None => false,
        }
    }

    /// Advances all devices by one cycle.
    pub fn tick(&mut self) {
        for dev in &mut self.devices {
            dev.tick();
        }
    }
}
