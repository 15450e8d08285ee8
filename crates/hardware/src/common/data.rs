//! Memory Access Types.
//!
//! This module defines the classification of memory accesses used throughout the simulator.
//! These types are used for the following:
//! 1. **Fault Reporting:** Naming the kind of access that hit an unmapped or misaligned address.
//! 2. **Address Decode:** Rejecting instruction fetches from IO windows.

use std::fmt;

/// Type of memory access operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccessType {
    /// Instruction fetch performed by the Fetch stage.
    Fetch,

    /// Data read performed by a load in the Memory stage.
    Read,

    /// Data write performed by a store in the Memory stage.
    Write,
}

impl fmt::Display for AccessType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Fetch => "fetch",
            Self::Read => "load",
            Self::Write => "store",
        };
        f.write_str(name)
    }
}
