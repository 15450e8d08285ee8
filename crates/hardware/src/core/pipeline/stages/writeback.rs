//! Writeback (WB) Stage.
//!
//! Selects the result to commit, raises the per-instruction commit signals, and detects
//! the halt sentinel. Only valid bundles commit; bubbles and killed bundles pass through
//! without a trace.

use crate::core::arch::RegWrite;
use crate::core::pipeline::latches::MemWbEntry;

/// Output of the writeback stage for one cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WritebackResult {
    /// Register write to apply at commit.
    pub reg_write: Option<RegWrite>,
    /// An instruction commits this cycle.
    pub retired: bool,
    /// The committing instruction is a branch or jump.
    pub branch: bool,
    /// The committing instruction is a mispredicted branch.
    pub mispredict: bool,
    /// The committing instruction is a store to the halt sentinel.
    pub halt: bool,
}

/// Executes the writeback stage.
///
/// # Arguments
///
/// * `mem_wb` - Committed MEM/WB bundle.
/// * `halt_addr` - Halt sentinel address.
/// * `trace` - Emit per-stage trace events.
pub fn wb_stage(mem_wb: &MemWbEntry, halt_addr: u32, trace: bool) -> WritebackResult {
    if !mem_wb.slot.is_valid() {
        return WritebackResult::default();
    }

    let ctrl = mem_wb.ctrl;
    let value = mem_wb.wb_value();
    let reg_write = (ctrl.reg_write && mem_wb.rd != 0).then_some(RegWrite {
        rd: mem_wb.rd,
        value,
    });
    let halt = ctrl.mem_write && mem_wb.alu == halt_addr;

    if trace {
        tracing::trace!(
            pc = format_args!("{:#010x}", mem_wb.pc),
            rd = mem_wb.rd,
            value = format_args!("{value:#010x}"),
            write = reg_write.is_some(),
            "WB"
        );
    }

    WritebackResult {
        reg_write,
        retired: true,
        branch: ctrl.is_control_flow(),
        mispredict: ctrl.branch && ctrl.mispredicted,
        halt,
    }
}
