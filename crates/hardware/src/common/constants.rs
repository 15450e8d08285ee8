//! Global System Constants.
//!
//! This module defines the fixed constants of the RV32I encoding used across the simulator:
//! 1. **Instruction Constants:** Opcode mask and field shifts for instruction decoding.
//! 2. **Canonical Encodings:** The NOP instruction word.

/// Size of an RV32I instruction in bytes.
pub const INSTRUCTION_SIZE: u32 = 4;

/// Canonical NOP (`addi x0, x0, 0`).
pub const NOP: u32 = 0x0000_0013;

/// Number of architectural integer registers.
pub const NUM_REGS: usize = 32;

/// Bit mask for extracting the opcode field from a RISC-V instruction.
pub const OPCODE_MASK: u32 = 0x7F;

/// Bit mask for extracting the destination register (rd) field.
pub const RD_MASK: u32 = 0x1F;

/// Bit position shift for the destination register (rd) field.
pub const RD_SHIFT: u32 = 7;

/// Bit mask for extracting the first source register (rs1) field.
pub const RS1_MASK: u32 = 0x1F;

/// Bit position shift for the first source register (rs1) field.
pub const RS1_SHIFT: u32 = 15;

/// Bit mask for extracting the second source register (rs2) field.
pub const RS2_MASK: u32 = 0x1F;

/// Bit position shift for the second source register (rs2) field.
pub const RS2_SHIFT: u32 = 20;

/// Bit mask for extracting the funct3 field.
pub const FUNCT3_MASK: u32 = 0x7;

/// Bit position shift for the funct3 field.
pub const FUNCT3_SHIFT: u32 = 12;

/// Bit mask for extracting the funct7 field.
pub const FUNCT7_MASK: u32 = 0x7F;

/// Bit position shift for the funct7 field.
pub const FUNCT7_SHIFT: u32 = 25;

/// Shift amounts are the low five bits of operand B.
pub const SHAMT_MASK: u32 = 0x1F;
