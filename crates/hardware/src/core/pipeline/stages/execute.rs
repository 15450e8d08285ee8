//! Execute (EX) Stage.
//!
//! Selects each ALU operand from the bypass network (EX/MEM, then MEM/WB, then the value
//! read in Decode), applies the operand-source muxes, and runs the ALU. Branches were
//! already resolved in Decode; jumps only produce their link value here.

use crate::common::INSTRUCTION_SIZE;
use crate::core::pipeline::forwarding::{ForwardSelect, ForwardingUnit};
use crate::core::pipeline::latches::{ExMemEntry, IdExEntry, MemWbEntry};
use crate::core::pipeline::signals::{OpASrc, OpBSrc};
use crate::core::pipeline::traits::PipelineLatch;
use crate::core::units::alu::Alu;

/// Output of the execute stage for one cycle.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExecuteResult {
    /// Bundle to latch into EX/MEM.
    pub entry: ExMemEntry,
    /// Forwarded value of `rs1`.
    pub rv1: u32,
    /// Forwarded value of `rs2`.
    pub rv2: u32,
    /// Selector pair that produced `rv1`/`rv2`.
    pub select: ForwardSelect,
}

/// Executes the execute stage.
///
/// A killed ID/EX bundle leaves as a bubble.
pub fn execute_stage(
    id_ex: &IdExEntry,
    forwarding: ForwardingUnit,
    ex_mem: &ExMemEntry,
    mem_wb: &MemWbEntry,
    trace: bool,
) -> ExecuteResult {
    if !id_ex.slot.is_valid() {
        return ExecuteResult {
            entry: ExMemEntry::bubble_at(id_ex.pc),
            ..ExecuteResult::default()
        };
    }

    let select = forwarding.execute_select(id_ex, ex_mem, mem_wb);
    let rv1 = forwarding.operand(id_ex.rs1, id_ex.rv1, ex_mem, mem_wb);
    let rv2 = forwarding.operand(id_ex.rs2, id_ex.rv2, ex_mem, mem_wb);

    let ctrl = id_ex.ctrl;
    let op_a = match ctrl.a_src {
        OpASrc::Reg1 => rv1,
        OpASrc::Pc => id_ex.pc,
        OpASrc::Zero => 0,
    };
    let op_b = match ctrl.b_src {
        OpBSrc::Reg2 => rv2,
        OpBSrc::Imm => id_ex.imm as u32,
    };

    let alu = if ctrl.jump {
        id_ex.pc.wrapping_add(INSTRUCTION_SIZE)
    } else {
        Alu::execute(ctrl.alu, op_a, op_b)
    };

    if trace {
        tracing::trace!(
            pc = format_args!("{:#010x}", id_ex.pc),
            alu_op = ?ctrl.alu,
            fwd_a = ?select.a,
            fwd_b = ?select.b,
            result = format_args!("{alu:#010x}"),
            "EX"
        );
    }

    ExecuteResult {
        entry: ExMemEntry {
            pc: id_ex.pc,
            inst: id_ex.inst,
            rd: id_ex.rd,
            alu,
            store_data: if ctrl.mem_write { rv2 } else { 0 },
            ctrl,
            slot: id_ex.slot,
        },
        rv1,
        rv2,
        select,
    }
}
