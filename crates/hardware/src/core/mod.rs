//! Core processor implementation.
//!
//! This module contains the main CPU implementation including the instruction
//! pipeline, execution units, the architectural register file, and the
//! two-phase clock that coordinates all components.

/// Architectural state (register file).
pub mod arch;

/// CPU core implementation and execution orchestration.
pub mod cpu;

/// Instruction pipeline implementation (stages, latches, hazards, forwarding).
pub mod pipeline;

/// Execution units (ALU, LSU, branch predictors).
pub mod units;

pub use self::cpu::{Cpu, TickReport};
