//! Common utilities and types used throughout the pipeline simulator.
//!
//! This module provides the building blocks shared by every component. It includes:
//! 1. **Constants:** Instruction field layout and fixed encodings.
//! 2. **Memory Access:** Classification of accesses (Fetch/Read/Write) for fault reporting.
//! 3. **Error Handling:** The construction-time error type and `Result` alias.

/// Common constants used throughout the simulator.
pub mod constants;

/// Memory access type definitions.
pub mod data;

/// Error types for construction, configuration, and loading.
pub mod error;

pub use constants::{INSTRUCTION_SIZE, NOP};
pub use data::AccessType;
pub use error::{Result, SimError};
