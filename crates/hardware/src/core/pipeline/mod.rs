//! Instruction pipeline implementation.
//!
//! This module contains the implementation of the five-stage instruction pipeline.
//! It includes the following components:
//! 1. **Hazards:** Detection of data hazards that hold Decode.
//! 2. **Forwarding:** Bypass selection for Execute and for Decode's comparator.
//! 3. **Latches:** Inter-stage bundles and the generic pipeline register that holds them.
//! 4. **Signals:** Control signals generated during instruction decoding.
//! 5. **Stages:** Implementation of Fetch, Decode, Execute, Memory, and Writeback stages.
//! 6. **Microarchitecture:** Per-variant strategies resolved once at construction.

/// Operand forwarding unit.
pub mod forwarding;

/// Pipeline hazard detection.
pub mod hazards;

/// Inter-stage pipeline latches (IF/ID, ID/EX, EX/MEM, MEM/WB).
pub mod latches;

/// Forwarding mode and predictor selection per variant.
pub mod microarch;

/// Generic pipeline register with flush/stall/advance control.
pub mod register;

/// Control signals generated during instruction decode.
pub mod signals;

/// Pipeline stage implementations (fetch, decode, execute, memory, writeback).
pub mod stages;

/// Traits for pipeline latch bundles.
pub mod traits;
