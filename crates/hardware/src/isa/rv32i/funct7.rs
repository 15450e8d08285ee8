//! RISC-V Base Integer (I) Function Codes (funct7).

/// Default funct7 (ADD, SRL, and every other non-alternate R-type operation).
pub const DEFAULT: u32 = 0b000_0000;
/// Subtract.
pub const SUB: u32 = 0b010_0000;
/// Shift Right Arithmetic (also bits 31-25 of SRAI).
pub const SRA: u32 = 0b010_0000;
