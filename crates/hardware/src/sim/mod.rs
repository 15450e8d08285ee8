//! Simulation driver and program loading.
//!
//! Provides the [`Simulator`] that owns the core and its memory system, and utilities
//! for loading program images into RAM before the first tick.

/// Program image loaders (raw, hex, ELF32).
pub mod loader;

/// Simulator driver.
pub mod simulator;

pub use simulator::{RunOutcome, Simulator};
