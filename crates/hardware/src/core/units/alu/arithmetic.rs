//! ALU arithmetic operations.
//!
//! Subtraction goes through the same adder as addition: the second operand is inverted
//! and the carry-in is 1.

use crate::core::pipeline::signals::AluOp;

/// Ripple-style adder: `a + b + carry_in`, wrapping at 32 bits.
#[inline(always)]
pub const fn adder(a: u32, b: u32, carry_in: bool) -> u32 {
    a.wrapping_add(b).wrapping_add(carry_in as u32)
}

/// Executes an arithmetic operation. Returns `0` for non-arithmetic opcodes.
pub const fn execute(op: AluOp, a: u32, b: u32) -> u32 {
    match op {
        AluOp::Add => adder(a, b, false),
        AluOp::Sub => adder(a, !b, true),
        _ => 0,
    }
}
