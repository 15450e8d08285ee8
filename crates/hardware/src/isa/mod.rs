//! Instruction Set Architecture (ISA) Definitions.
//!
//! Contains opcodes, function codes, field extraction, immediate generation, the branch
//! comparator, and a disassembler for the RV32I base integer instruction set.

/// Application Binary Interface (ABI) register name mappings.
pub mod abi;

/// Branch condition evaluation (the Decode-stage comparator).
pub mod branch;

/// Instruction decoding logic for all RV32I instruction formats.
pub mod decode;

/// Instruction disassembler for debug tracing and diagnostics.
pub mod disasm;

/// Instruction encoding structures and bit extraction utilities.
pub mod instruction;

/// Base integer instruction set (32-bit RISC-V core instructions).
pub mod rv32i;
