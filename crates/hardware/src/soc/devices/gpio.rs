//! General-purpose IO ports.
//!
//! Each port is one 32-bit register. The register contents live in an `Arc<AtomicU32>`
//! so the host can observe outputs (LEDs, seven-segment display) and drive inputs
//! (switches) while the port itself sits boxed on the bus.

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use crate::core::units::lsu::lane_mask;
use crate::soc::traits::Device;

/// Which side drives the port.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PortDirection {
    /// Driven by the core; stores update the register.
    Output,
    /// Driven by the host; stores are ignored.
    Input,
}

/// A single-register IO port.
#[derive(Debug)]
pub struct GpioPort {
    name: &'static str,
    base: u32,
    direction: PortDirection,
    latch: Arc<AtomicU32>,
}

impl GpioPort {
    /// Creates a port at `base` backed by a fresh zeroed register.
    pub fn new(name: &'static str, base: u32, direction: PortDirection) -> Self {
        Self::with_latch(name, base, direction, Arc::new(AtomicU32::new(0)))
    }

    /// Creates a port backed by an existing shared register.
    pub const fn with_latch(
        name: &'static str,
        base: u32,
        direction: PortDirection,
        latch: Arc<AtomicU32>,
    ) -> Self {
        Self {
            name,
            base,
            direction,
            latch,
        }
    }

    /// Returns a handle to the shared register.
    pub fn handle(&self) -> Arc<AtomicU32> {
        Arc::clone(&self.latch)
    }

    /// Port direction.
    pub const fn direction(&self) -> PortDirection {
        self.direction
    }
}

impl Device for GpioPort {
    fn name(&self) -> &str {
        self.name
    }

    fn address_range(&self) -> (u32, u32) {
        (self.base, 4)
    }

    fn read_u32(&self, offset: u32) -> u32 {
        if offset < 4 {
            self.latch.load(Ordering::Relaxed)
        } else {
            0
        }
    }

    fn write_u32(&mut self, offset: u32, val: u32, enable: u8) {
        if self.direction == PortDirection::Input || offset >= 4 {
            return;
        }
        let mask = lane_mask(enable);
        let old = self.latch.load(Ordering::Relaxed);
        self.latch
            .store((old & !mask) | (val & mask), Ordering::Relaxed);
    }
}
