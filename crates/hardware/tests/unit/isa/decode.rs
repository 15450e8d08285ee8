//! Field extraction, immediate generation and the branch comparator.

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rstest::rstest;

use crate::common::builder::instruction::asm;
use rvpipe_core::isa::branch::compare;
use rvpipe_core::isa::decode::{decode, format_of, immediate, sign_extend};
use rvpipe_core::isa::instruction::{ImmFormat, InstructionBits};
use rvpipe_core::isa::rv32i::{funct3, opcodes};

#[test]
fn register_fields() {
    let inst = asm().sub(7, 12, 31).build();
    assert_eq!(inst.opcode(), opcodes::OP_REG);
    assert_eq!(inst.rd(), 7);
    assert_eq!(inst.rs1(), 12);
    assert_eq!(inst.rs2(), 31);
    assert_eq!(inst.funct3(), funct3::ADD_SUB);
    assert_eq!(inst.funct7(), 0b010_0000);
}

#[rstest]
#[case(opcodes::OP_IMM, ImmFormat::I)]
#[case(opcodes::OP_LOAD, ImmFormat::I)]
#[case(opcodes::OP_JALR, ImmFormat::I)]
#[case(opcodes::OP_STORE, ImmFormat::S)]
#[case(opcodes::OP_BRANCH, ImmFormat::B)]
#[case(opcodes::OP_LUI, ImmFormat::U)]
#[case(opcodes::OP_AUIPC, ImmFormat::U)]
#[case(opcodes::OP_JAL, ImmFormat::J)]
#[case(opcodes::OP_REG, ImmFormat::None)]
#[case(opcodes::OP_SYSTEM, ImmFormat::None)]
fn immediate_format_by_opcode(#[case] opcode: u32, #[case] format: ImmFormat) {
    assert_eq!(format_of(opcode), format);
}

#[test]
fn known_encodings() {
    // addi a0, zero, 10
    assert_eq!(decode(0x00A0_0513).imm, 10);
    // sw x0, -16(x0)
    assert_eq!(decode(0xFE00_2823).imm, -16);
    // lui x1, 0xFFFF0
    assert_eq!(decode(asm().lui(1, 0xFFFF0).build()).imm as u32, 0xFFFF_0000);
    // jal x0, -8
    assert_eq!(decode(asm().jal(0, -8).build()).imm, -8);
}

#[test]
fn sign_extension_widths() {
    assert_eq!(sign_extend(0x800, 12), -2048);
    assert_eq!(sign_extend(0x7FF, 12), 2047);
    assert_eq!(sign_extend(0x1000, 13), -4096);
    assert_eq!(sign_extend(0x10_0000, 21), -1_048_576);
}

proptest! {
    #[test]
    fn i_immediate_round_trips(imm in -2048i32..2048) {
        let inst = asm().addi(1, 2, imm).build();
        prop_assert_eq!(immediate(inst, ImmFormat::I), imm);
    }

    #[test]
    fn s_immediate_round_trips(imm in -2048i32..2048) {
        let inst = asm().sw(3, 4, imm).build();
        prop_assert_eq!(immediate(inst, ImmFormat::S), imm);
    }

    #[test]
    fn b_immediate_round_trips(half in -2048i32..2048) {
        let imm = half * 2;
        let inst = asm().bne(5, 6, imm).build();
        prop_assert_eq!(immediate(inst, ImmFormat::B), imm);
    }

    #[test]
    fn j_immediate_round_trips(half in -(1i32 << 19)..(1i32 << 19)) {
        let imm = half * 2;
        let inst = asm().jal(1, imm).build();
        prop_assert_eq!(immediate(inst, ImmFormat::J), imm);
    }

    #[test]
    fn u_immediate_keeps_upper_bits(upper in 0u32..(1 << 20)) {
        let inst = asm().lui(9, upper).build();
        prop_assert_eq!(immediate(inst, ImmFormat::U) as u32, upper << 12);
    }
}

#[rstest]
#[case(funct3::BEQ, 5, 5, true)]
#[case(funct3::BEQ, 5, 6, false)]
#[case(funct3::BNE, 5, 6, true)]
#[case(funct3::BLT, 0xFFFF_FFFF, 0, true)]
#[case(funct3::BLTU, 0xFFFF_FFFF, 0, false)]
#[case(funct3::BGE, 0, 0xFFFF_FFFF, true)]
#[case(funct3::BGE, 3, 3, true)]
#[case(funct3::BGEU, 0, 0xFFFF_FFFF, false)]
fn comparator(#[case] f3: u32, #[case] a: u32, #[case] b: u32, #[case] taken: bool) {
    assert_eq!(compare(f3, a, b), Some(taken));
}

#[rstest]
fn reserved_branch_funct3_is_rejected(#[values(0b010, 0b011)] f3: u32) {
    assert_eq!(compare(f3, 0, 0), None);
}
