//! RISC-V architectural state.
//!
//! RV32I without CSRs or privilege modes leaves a single architectural structure:
//! the General-Purpose Register file.

/// General-Purpose Register file implementation.
pub mod gpr;

pub use gpr::{Gpr, RegWrite};
