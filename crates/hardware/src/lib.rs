//! RV32I five-stage pipeline simulator library.
//!
//! This crate models a classic IF/ID/EX/MEM/WB in-order pipeline cycle by cycle. It provides:
//! 1. **Core:** Pipeline registers, hazard detection, forwarding, branch resolution in Decode, and commit.
//! 2. **Microarchitectures:** Five variants selected once at construction (no-forward, forward, and forward
//!    paired with a BTB, a 2-bit counter table, or gshare).
//! 3. **ISA:** RV32I decoding, immediate generation, the branch comparator, and a disassembler.
//! 4. **SoC:** RAM, memory-mapped IO devices, performance counters, and the halt sentinel.
//! 5. **Simulation:** Two-phase tick evaluation, program loading, configuration, and statistics.

/// Common types and constants (errors, access kinds, instruction field layout).
pub mod common;
/// Simulator configuration (defaults, variant selection, memory map).
pub mod config;
/// CPU core (architectural state, pipeline, functional units).
pub mod core;
/// Instruction set (RV32I encodings, decode, immediates, disassembly).
pub mod isa;
/// Simulator driver and program loaders.
pub mod sim;
/// System-on-chip (RAM, IO bus, devices, address map).
pub mod soc;
/// Simulation statistics collection and reporting.
pub mod stats;

/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// Architectural and microarchitectural state of the core.
pub use crate::core::Cpu;
/// Top-level simulator; construct with `Simulator::new` and drive with `tick`.
pub use crate::sim::Simulator;
/// Memory system (RAM, IO bus, counters); construct with `System::new`.
pub use crate::soc::System;
