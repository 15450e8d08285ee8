//! ALU operations.

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rstest::rstest;

use rvpipe_core::core::pipeline::signals::AluOp;
use rvpipe_core::core::units::alu::Alu;

proptest! {
    #[test]
    fn add_and_sub_wrap(a: u32, b: u32) {
        prop_assert_eq!(Alu::execute(AluOp::Add, a, b), a.wrapping_add(b));
        prop_assert_eq!(Alu::execute(AluOp::Sub, a, b), a.wrapping_sub(b));
    }

    #[test]
    fn bitwise_ops(a: u32, b: u32) {
        prop_assert_eq!(Alu::execute(AluOp::And, a, b), a & b);
        prop_assert_eq!(Alu::execute(AluOp::Or, a, b), a | b);
        prop_assert_eq!(Alu::execute(AluOp::Xor, a, b), a ^ b);
    }

    #[test]
    fn shifts_use_low_five_bits(a: u32, b: u32) {
        let sh = b & 0x1F;
        prop_assert_eq!(Alu::execute(AluOp::Sll, a, b), a << sh);
        prop_assert_eq!(Alu::execute(AluOp::Srl, a, b), a >> sh);
        prop_assert_eq!(Alu::execute(AluOp::Sra, a, b), ((a as i32) >> sh) as u32);
    }

    #[test]
    fn set_less_than(a: u32, b: u32) {
        prop_assert_eq!(Alu::execute(AluOp::Slt, a, b), u32::from((a as i32) < (b as i32)));
        prop_assert_eq!(Alu::execute(AluOp::Sltu, a, b), u32::from(a < b));
    }
}

#[rstest]
#[case(AluOp::Sra, 0x8000_0000, 31, 0xFFFF_FFFF)]
#[case(AluOp::Srl, 0x8000_0000, 31, 1)]
#[case(AluOp::Sll, 1, 32, 1)]
#[case(AluOp::Slt, 0xFFFF_FFFF, 1, 1)]
#[case(AluOp::Sltu, 0xFFFF_FFFF, 1, 0)]
#[case(AluOp::Add, 0xFFFF_FFFF, 1, 0)]
#[case(AluOp::Sub, 0, 1, 0xFFFF_FFFF)]
fn edge_values(#[case] op: AluOp, #[case] a: u32, #[case] b: u32, #[case] expected: u32) {
    assert_eq!(Alu::execute(op, a, b), expected);
}
