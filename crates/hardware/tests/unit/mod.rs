//! # Unit Components
//!
//! This module serves as the central hub for the unit tests. It mirrors the crate
//! layout: the processor core, the ISA helpers, the memory system, the simulator
//! driver, configuration and statistics.





/// Unit tests for the System-on-Chip components.
///
/// This module organizes tests for the address map, IO bus, ports and counters.
pub mod soc;

/// Unit tests for simulation statistics.
pub mod stats;
