//! Pipeline control signals and operation types.
//!
//! This module defines the signals that travel with an instruction down the pipe. It performs:
//! 1. **Slot State:** Whether a bundle holds a live instruction, a bubble, or a killed instruction.
//! 2. **Operation Classification:** The ten RV32I ALU operations.
//! 3. **Operand Selection:** Sources for ALU inputs (registers, PC, zero, or immediates).
//! 4. **Memory Control:** Access widths and sign-extension requirements.

/// Occupancy of a pipeline slot.
///
/// Exactly one of valid / bubble / kill holds for any bundle, so the three flags are
/// a single enum. Reset state is [`Occupancy::Bubble`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Occupancy {
    /// No instruction. Carries no side effects.
    #[default]
    Bubble,
    /// A live instruction.
    Valid,
    /// An instruction found to be illegal. Degrades to a bubble at the next register
    /// boundary and never produces side effects.
    Killed,
}

impl Occupancy {
    /// The slot holds a live instruction.
    #[inline(always)]
    pub const fn is_valid(self) -> bool {
        matches!(self, Self::Valid)
    }

    /// The slot is empty.
    #[inline(always)]
    pub const fn is_bubble(self) -> bool {
        matches!(self, Self::Bubble)
    }

    /// The slot holds a killed instruction.
    #[inline(always)]
    pub const fn is_killed(self) -> bool {
        matches!(self, Self::Killed)
    }
}

/// ALU operation types.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AluOp {
    /// Addition; also used for effective addresses and LUI/AUIPC.
    #[default]
    Add,
    /// Subtraction (two's complement: `a + !b + 1`).
    Sub,
    /// Shift left logical.
    Sll,
    /// Set less than (signed).
    Slt,
    /// Set less than unsigned.
    Sltu,
    /// Bitwise XOR.
    Xor,
    /// Shift right logical.
    Srl,
    /// Shift right arithmetic.
    Sra,
    /// Bitwise OR.
    Or,
    /// Bitwise AND.
    And,
}

/// Memory access width for loads and stores.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MemWidth {
    /// No memory access.
    #[default]
    Nop,
    /// 8-bit access.
    Byte,
    /// 16-bit access.
    Half,
    /// 32-bit access.
    Word,
}

impl MemWidth {
    /// Size of the access in bytes (0 for [`MemWidth::Nop`]).
    pub const fn bytes(self) -> u32 {
        match self {
            Self::Nop => 0,
            Self::Byte => 1,
            Self::Half => 2,
            Self::Word => 4,
        }
    }
}

/// Source for ALU operand A.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OpASrc {
    /// Forwarded value of `rs1`.
    #[default]
    Reg1,
    /// The instruction's PC (AUIPC).
    Pc,
    /// Constant zero (LUI).
    Zero,
}

/// Source for ALU operand B.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OpBSrc {
    /// Forwarded value of `rs2`.
    #[default]
    Reg2,
    /// The decoded immediate.
    Imm,
}

/// Control signals generated by Decode.
///
/// Every side-effecting field defaults to its neutral value, so a bundle built with
/// `..Default::default()` does nothing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ControlSignals {
    /// Enable write to the destination register.
    pub reg_write: bool,
    /// Enable memory read operation (load).
    pub mem_read: bool,
    /// Enable memory write operation (store).
    pub mem_write: bool,
    /// Instruction is a conditional branch.
    pub branch: bool,
    /// Instruction is an unconditional jump (`JAL`/`JALR`).
    pub jump: bool,
    /// Width of memory access.
    pub width: MemWidth,
    /// Load should be sign-extended.
    pub signed_load: bool,
    /// ALU operation to perform.
    pub alu: AluOp,
    /// Source selection for ALU operand A.
    pub a_src: OpASrc,
    /// Source selection for ALU operand B.
    pub b_src: OpBSrc,
    /// The branch was mispredicted by Fetch; counted when it commits.
    pub mispredicted: bool,
}

impl ControlSignals {
    /// Instruction is a branch or jump.
    #[inline(always)]
    pub const fn is_control_flow(&self) -> bool {
        self.branch || self.jump
    }
}
