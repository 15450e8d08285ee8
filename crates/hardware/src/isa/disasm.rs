//! Instruction Disassembler for RV32I.
//!
//! Converts a 32-bit instruction encoding into a human-readable mnemonic
//! string for trace events, the CLI, and test diagnostics.
//!
//! # Usage
//!
//! ```
//! use rvpipe_core::isa::disasm::disassemble;
//! let text = disassemble(0x00A0_0513); // ADDI x10, x0, 10
//! assert_eq!(text, "addi a0, zero, 10");
//! ```

use crate::common::constants::NOP;
use crate::isa::abi::reg_name as xreg;
use crate::isa::decode::decode;
use crate::isa::rv32i::{funct3 as f3, funct7 as f7, opcodes as op};

/// Disassembles a 32-bit RISC-V instruction into a human-readable string.
///
/// Returns a mnemonic like `"add a0, a1, a2"` or `"unknown (0x...)"` for
/// encodings outside RV32I.
pub fn disassemble(inst: u32) -> String {
    if inst == NOP {
        return "nop".to_string();
    }

    let d = decode(inst);
    let (rd, rs1, rs2, imm) = (xreg(d.rd), xreg(d.rs1), xreg(d.rs2), d.imm);

    match d.opcode {
        op::OP_REG => {
            let mn = match (d.funct3, d.funct7) {
                (f3::ADD_SUB, f7::DEFAULT) => "add",
                (f3::ADD_SUB, f7::SUB) => "sub",
                (f3::SLL, f7::DEFAULT) => "sll",
                (f3::SLT, f7::DEFAULT) => "slt",
                (f3::SLTU, f7::DEFAULT) => "sltu",
                (f3::XOR, f7::DEFAULT) => "xor",
                (f3::SRL_SRA, f7::DEFAULT) => "srl",
                (f3::SRL_SRA, f7::SRA) => "sra",
                (f3::OR, f7::DEFAULT) => "or",
                (f3::AND, f7::DEFAULT) => "and",
                _ => return unknown(inst),
            };
            format!("{mn} {rd}, {rs1}, {rs2}")
        }

        op::OP_IMM => {
            let shamt = d.rs2;
            match d.funct3 {
                f3::ADD_SUB => format!("addi {rd}, {rs1}, {imm}"),
                f3::SLT => format!("slti {rd}, {rs1}, {imm}"),
                f3::SLTU => format!("sltiu {rd}, {rs1}, {imm}"),
                f3::XOR => format!("xori {rd}, {rs1}, {imm}"),
                f3::OR => format!("ori {rd}, {rs1}, {imm}"),
                f3::AND => format!("andi {rd}, {rs1}, {imm}"),
                f3::SLL => format!("slli {rd}, {rs1}, {shamt}"),
                f3::SRL_SRA if d.funct7 == f7::SRA => format!("srai {rd}, {rs1}, {shamt}"),
                f3::SRL_SRA => format!("srli {rd}, {rs1}, {shamt}"),
                _ => unknown(inst),
            }
        }

        op::OP_LOAD => {
            let mn = match d.funct3 {
                f3::LB => "lb",
                f3::LH => "lh",
                f3::LW => "lw",
                f3::LBU => "lbu",
                f3::LHU => "lhu",
                _ => return unknown(inst),
            };
            format!("{mn} {rd}, {imm}({rs1})")
        }

        op::OP_STORE => {
            let mn = match d.funct3 {
                f3::SB => "sb",
                f3::SH => "sh",
                f3::SW => "sw",
                _ => return unknown(inst),
            };
            format!("{mn} {rs2}, {imm}({rs1})")
        }

        op::OP_BRANCH => {
            let mn = match d.funct3 {
                f3::BEQ => "beq",
                f3::BNE => "bne",
                f3::BLT => "blt",
                f3::BGE => "bge",
                f3::BLTU => "bltu",
                f3::BGEU => "bgeu",
                _ => return unknown(inst),
            };
            format!("{mn} {rs1}, {rs2}, {imm}")
        }

        op::OP_LUI => format!("lui {rd}, {:#x}", (imm as u32) >> 12),
        op::OP_AUIPC => format!("auipc {rd}, {:#x}", (imm as u32) >> 12),
        op::OP_JAL => format!("jal {rd}, {imm}"),
        op::OP_JALR => format!("jalr {rd}, {imm}({rs1})"),
        op::OP_MISC_MEM => "fence".to_string(),

        _ => unknown(inst),
    }
}

fn unknown(inst: u32) -> String {
    format!("unknown ({inst:#010x})")
}
