//! Branch comparator.
//!
//! Decode resolves every conditional branch with this comparator. The outcome is
//! authoritative and never consults the branch predictor.

use crate::isa::rv32i::funct3;

/// Evaluates the condition of a conditional branch.
///
/// Returns `None` for the two funct3 encodings (`0b010`, `0b011`) that are reserved
/// under `OP_BRANCH`.
///
/// # Examples
///
/// ```
/// use rvpipe_core::isa::branch::compare;
/// use rvpipe_core::isa::rv32i::funct3;
///
/// assert_eq!(compare(funct3::BLT, u32::MAX, 0), Some(true));   // -1 < 0
/// assert_eq!(compare(funct3::BLTU, u32::MAX, 0), Some(false));
/// ```
pub const fn compare(f3: u32, a: u32, b: u32) -> Option<bool> {
    let taken = match f3 {
        funct3::BEQ => a == b,
        funct3::BNE => a != b,
        funct3::BLT => (a as i32) < (b as i32),
        funct3::BGE => (a as i32) >= (b as i32),
        funct3::BLTU => a < b,
        funct3::BGEU => a >= b,
        _ => return None,
    };
    Some(taken)
}
