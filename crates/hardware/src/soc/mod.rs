//! System-on-Chip (SoC) Components.
//!
//! This module organizes everything outside the core: RAM, the IO bus with its
//! memory-mapped devices, the performance counters, and the address map that decides
//! which of them an address belongs to.

/// System assembly from configuration.
pub mod builder;

/// Memory-mapped I/O device implementations.
pub mod devices;

/// IO bus routing.
pub mod interconnect;

/// Address-space decode.
pub mod map;

/// Main memory.
pub mod memory;

/// Device trait definitions for MMIO access.
pub mod traits;

pub use builder::System;
pub use traits::Device;
