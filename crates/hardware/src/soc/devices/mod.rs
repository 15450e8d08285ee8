//! Memory-Mapped IO Devices.
//!
//! The board peripherals visible to programs: general-purpose ports for the LED bank,
//! the seven-segment display and the switches, plus the performance counter block.

/// Single-word general-purpose IO ports.
pub mod gpio;

/// Hardware performance counters.
pub mod perf;

pub use gpio::{GpioPort, PortDirection};
pub use perf::{PerfCounters, PerfEvents};

pub use crate::soc::traits::Device;
