//! Simulator error definitions.
//!
//! Runtime faults inside the pipeline (illegal instructions, bad fetch addresses, unmapped or
//! misaligned data accesses) are recovered locally and never surface here. This module covers
//! the failures that happen before the first tick:
//! 1. **Microarchitecture selection:** An unsupported variant identifier.
//! 2. **Configuration:** Malformed JSON or an inconsistent memory map.
//! 3. **Loading:** Unreadable or oversized program images.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while constructing or loading a simulation.
#[derive(Debug, Error)]
pub enum SimError {
    /// The numeric microarchitecture identifier is outside `0..=4`.
    #[error("unsupported microarchitecture variant id {0} (expected 0-4)")]
    UnsupportedVariant(u8),

    /// The textual microarchitecture name does not match any variant.
    #[error("unknown microarchitecture variant '{0}'")]
    UnknownVariantName(String),

    /// The configuration parsed but describes an impossible machine.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The configuration JSON could not be parsed.
    #[error("failed to parse configuration: {0}")]
    Config(#[from] serde_json::Error),

    /// A file could not be read.
    #[error("could not read '{path}': {source}")]
    Io {
        /// Path that failed.
        path: PathBuf,
        /// Underlying OS error.
        #[source]
        source: std::io::Error,
    },

    /// The ELF image is malformed or not a 32-bit RISC-V executable.
    #[error("invalid ELF image: {0}")]
    Elf(String),

    /// A hex image line is not a valid hexadecimal word or address directive.
    #[error("invalid hex image at line {line}: {reason}")]
    Hex {
        /// One-based line number.
        line: usize,
        /// What was wrong with it.
        reason: String,
    },

    /// Part of an image falls outside RAM.
    #[error("image segment at {addr:#010x} ({len} bytes) does not fit in RAM")]
    ImageOutOfRange {
        /// Load address of the segment.
        addr: u32,
        /// Length of the segment in bytes.
        len: usize,
    },

    /// A store decoded to RAM or IO but no target accepted it.
    #[error("store to {0:#010x} was not accepted by its target")]
    StoreRejected(u32),
}

/// Convenience alias for results carrying a [`SimError`].
pub type Result<T> = std::result::Result<T, SimError>;
