//! Instruction Decode (ID) Stage.
//!
//! This module implements the second stage of the instruction pipeline. It performs:
//! 1. **Control Generation:** Maps opcode/funct fields to [`ControlSignals`]; unknown
//!    encodings kill the instruction.
//! 2. **Operand Read:** Reads `rs1`/`rs2` from the register file, seeing a write that
//!    Writeback commits in the same cycle.
//! 3. **Branch Resolution:** Evaluates conditional branches and computes jump targets
//!    with bypassed operands, compares against Fetch's prediction, and requests a redirect
//!    and a predictor update. Nothing is resolved while the instruction is stalled.

use crate::common::INSTRUCTION_SIZE;
use crate::core::arch::{Gpr, RegWrite};
use crate::core::pipeline::forwarding::ForwardingUnit;
use crate::core::pipeline::hazards::SourceUse;
use crate::core::pipeline::latches::{ExMemEntry, IdExEntry, IfIdEntry, MemWbEntry};
use crate::core::pipeline::signals::{AluOp, ControlSignals, MemWidth, Occupancy, OpASrc, OpBSrc};
use crate::core::pipeline::traits::PipelineLatch;
use crate::isa::branch;
use crate::isa::decode::decode;
use crate::isa::instruction::Decoded;
use crate::isa::rv32i::{funct3, funct7, opcodes};

/// Training request for the branch predictor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PredictorUpdate {
    /// PC of the resolved branch or jump.
    pub pc: u32,
    /// Resolved direction (always `true` for jumps).
    pub taken: bool,
    /// Resolved taken-path target.
    pub target: u32,
    /// Predictor history recorded by Fetch for this instruction.
    pub history: u32,
}

/// Output of the decode stage for one cycle.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DecodeResult {
    /// Bundle to latch into ID/EX.
    pub entry: IdExEntry,
    /// Fetch must restart here; IF/ID is flushed.
    pub redirect: Option<u32>,
    /// Predictor training for a resolved branch or jump.
    pub update: Option<PredictorUpdate>,
    /// The instruction in Decode is a conditional branch that was mispredicted.
    pub mispredicted: bool,
    /// A fetched instruction could not be decoded.
    pub illegal: bool,
}

/// Bypass inputs visible to Decode's comparator.
#[derive(Clone, Copy, Debug)]
pub struct DecodeBypass<'a> {
    /// Forwarding capability of the active microarchitecture.
    pub forwarding: ForwardingUnit,
    /// Committed EX/MEM bundle.
    pub ex_mem: &'a ExMemEntry,
    /// Committed MEM/WB bundle.
    pub mem_wb: &'a MemWbEntry,
}

/// Generates control signals for a decoded instruction.
///
/// Returns `None` for encodings outside RV32I, for `SYSTEM` instructions, and for the
/// all-zero word. `FENCE` decodes to a no-op.
pub fn control_signals(d: &Decoded) -> Option<ControlSignals> {
    let none = ControlSignals::default();
    let ctrl = match d.opcode {
        opcodes::OP_LUI => ControlSignals {
            reg_write: true,
            a_src: OpASrc::Zero,
            b_src: OpBSrc::Imm,
            ..none
        },
        opcodes::OP_AUIPC => ControlSignals {
            reg_write: true,
            a_src: OpASrc::Pc,
            b_src: OpBSrc::Imm,
            ..none
        },
        opcodes::OP_JAL => ControlSignals {
            reg_write: true,
            jump: true,
            ..none
        },
        opcodes::OP_JALR if d.funct3 == funct3::JALR => ControlSignals {
            reg_write: true,
            jump: true,
            ..none
        },
        opcodes::OP_BRANCH if branch::compare(d.funct3, 0, 0).is_some() => ControlSignals {
            branch: true,
            ..none
        },
        opcodes::OP_LOAD => {
            let (width, signed_load) = match d.funct3 {
                funct3::LB => (MemWidth::Byte, true),
                funct3::LH => (MemWidth::Half, true),
                funct3::LW => (MemWidth::Word, true),
                funct3::LBU => (MemWidth::Byte, false),
                funct3::LHU => (MemWidth::Half, false),
                _ => return None,
            };
            ControlSignals {
                reg_write: true,
                mem_read: true,
                width,
                signed_load,
                b_src: OpBSrc::Imm,
                ..none
            }
        }
        opcodes::OP_STORE => {
            let width = match d.funct3 {
                funct3::SB => MemWidth::Byte,
                funct3::SH => MemWidth::Half,
                funct3::SW => MemWidth::Word,
                _ => return None,
            };
            ControlSignals {
                mem_write: true,
                width,
                b_src: OpBSrc::Imm,
                ..none
            }
        }
        opcodes::OP_IMM => ControlSignals {
            reg_write: true,
            alu: alu_op(d.funct3, d.funct7, false)?,
            b_src: OpBSrc::Imm,
            ..none
        },
        opcodes::OP_REG => ControlSignals {
            reg_write: true,
            alu: alu_op(d.funct3, d.funct7, true)?,
            ..none
        },
        opcodes::OP_MISC_MEM if d.funct3 == funct3::FENCE => none,
        _ => return None,
    };
    Some(ctrl)
}

/// Selects the ALU operation for `OP`/`OP-IMM` instructions.
///
/// Immediate forms only constrain funct7 for shifts, where it selects SRAI.
fn alu_op(f3: u32, f7: u32, register_form: bool) -> Option<AluOp> {
    let op = match f3 {
        funct3::ADD_SUB => match (register_form, f7) {
            (false, _) | (true, funct7::DEFAULT) => AluOp::Add,
            (true, funct7::SUB) => AluOp::Sub,
            _ => return None,
        },
        funct3::SLL if f7 == funct7::DEFAULT => AluOp::Sll,
        funct3::SRL_SRA if f7 == funct7::DEFAULT => AluOp::Srl,
        funct3::SRL_SRA if f7 == funct7::SRA => AluOp::Sra,
        funct3::SLL | funct3::SRL_SRA => return None,
        _ if register_form && f7 != funct7::DEFAULT => return None,
        funct3::SLT => AluOp::Slt,
        funct3::SLTU => AluOp::Sltu,
        funct3::XOR => AluOp::Xor,
        funct3::OR => AluOp::Or,
        funct3::AND => AluOp::And,
        _ => return None,
    };
    Some(op)
}

/// Executes the instruction decode stage.
///
/// # Arguments
///
/// * `if_id` - Committed IF/ID bundle.
/// * `regs` - Architectural register file.
/// * `pending` - Register write Writeback commits this cycle.
/// * `uses` - Source registers of the instruction (see [`SourceUse::of`]).
/// * `bypass` - Forwarding inputs for the branch comparator.
/// * `stalled` - The instruction stays in Decode this cycle; resolution is suppressed.
/// * `trace` - Emit per-stage trace events.
pub fn decode_stage(
    if_id: &IfIdEntry,
    regs: &Gpr,
    pending: Option<RegWrite>,
    uses: &SourceUse,
    bypass: DecodeBypass<'_>,
    stalled: bool,
    trace: bool,
) -> DecodeResult {
    let pc = if_id.pc;
    match if_id.slot {
        Occupancy::Bubble | Occupancy::Killed => {
            return DecodeResult {
                entry: IdExEntry::bubble_at(pc),
                ..DecodeResult::default()
            };
        }
        Occupancy::Valid => {}
    }

    let d = decode(if_id.inst);
    let Some(ctrl) = control_signals(&d) else {
        tracing::debug!(
            pc = format_args!("{pc:#010x}"),
            inst = format_args!("{:#010x}", if_id.inst),
            "ID  illegal instruction"
        );
        return DecodeResult {
            entry: IdExEntry {
                pc,
                inst: if_id.inst,
                slot: Occupancy::Killed,
                ..IdExEntry::default()
            },
            illegal: !stalled,
            ..DecodeResult::default()
        };
    };

    let rs1 = uses.rs1.unwrap_or(0);
    let rs2 = uses.rs2.unwrap_or(0);
    let rv1 = regs.read_through(rs1, pending);
    let rv2 = regs.read_through(rs2, pending);

    let entry = IdExEntry {
        pc,
        inst: if_id.inst,
        rs1,
        rs2,
        rd: if ctrl.reg_write { d.rd } else { 0 },
        imm: d.imm,
        rv1,
        rv2,
        ctrl,
        slot: Occupancy::Valid,
    };

    if trace {
        tracing::trace!(
            pc = format_args!("{pc:#010x}"),
            inst = %crate::isa::disasm::disassemble(if_id.inst),
            rd = entry.rd,
            rs1,
            rs2,
            stalled,
            "ID"
        );
    }

    if stalled {
        return DecodeResult {
            entry,
            ..DecodeResult::default()
        };
    }

    let fall_through = pc.wrapping_add(INSTRUCTION_SIZE);
    if !ctrl.is_control_flow() {
        // Only a predictor alias can send a non-branch down a taken path.
        let redirect = if_id.pred_taken.then_some(fall_through);
        return DecodeResult {
            entry,
            redirect,
            ..DecodeResult::default()
        };
    }

    let a = bypass
        .forwarding
        .operand(rs1, rv1, bypass.ex_mem, bypass.mem_wb);
    let b = bypass
        .forwarding
        .operand(rs2, rv2, bypass.ex_mem, bypass.mem_wb);

    let (taken, target) = match d.opcode {
        opcodes::OP_JALR => (true, a.wrapping_add(d.imm as u32) & !1),
        opcodes::OP_JAL => (true, pc.wrapping_add(d.imm as u32)),
        _ => (
            branch::compare(d.funct3, a, b).unwrap_or(false),
            pc.wrapping_add(d.imm as u32),
        ),
    };

    let prediction_wrong =
        taken != if_id.pred_taken || (taken && target != if_id.pred_target);
    let mispredicted = ctrl.branch && prediction_wrong;
    let redirect = if ctrl.jump {
        Some(target)
    } else if mispredicted {
        Some(if taken { target } else { fall_through })
    } else {
        None
    };

    if let Some(new_pc) = redirect {
        tracing::debug!(
            pc = format_args!("{pc:#010x}"),
            target = format_args!("{new_pc:#010x}"),
            taken,
            mispredicted,
            "ID  redirect"
        );
    }

    DecodeResult {
        entry: IdExEntry {
            ctrl: ControlSignals {
                mispredicted,
                ..ctrl
            },
            ..entry
        },
        redirect,
        update: Some(PredictorUpdate {
            pc,
            taken,
            target,
            history: if_id.pred_history,
        }),
        mispredicted,
        illegal: false,
    }
}
