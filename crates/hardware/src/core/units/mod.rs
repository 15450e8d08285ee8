//! Execution units and functional components.
//!
//! This module contains the ALU used by Execute, the load/store unit used by Memory and
//! Writeback, and the branch prediction unit queried by Fetch and trained by Decode.

/// Arithmetic Logic Unit for integer operations.
pub mod alu;

/// Branch prediction unit: predictor strategies and the BTB.
pub mod bru;

/// Load/Store Unit: address decode, byte lanes, and alignment policy.
pub mod lsu;
