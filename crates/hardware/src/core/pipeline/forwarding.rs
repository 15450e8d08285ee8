//! Operand Forwarding Unit.
//!
//! Routes results that have not yet been committed straight to the stages that need them.
//! Execute's ALU operands and Decode's branch comparator (and JALR base) resolve through
//! the same selection. For each source register the priority is:
//!
//! 1. EX/MEM, when it holds a valid register-writing instruction with a matching `rd != 0`.
//! 2. MEM/WB, under the same conditions, using the writeback-selected value.
//! 3. The register-file value read in Decode.
//!
//! Loads sitting in EX/MEM never need to be forwarded from there: the hazard unit stalls
//! every consumer that could observe one.

use crate::core::pipeline::latches::{ExMemEntry, IdExEntry, MemWbEntry};

/// Where an operand value comes from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ForwardSource {
    /// The value read from the register file.
    #[default]
    RegFile,
    /// The ALU result held in EX/MEM.
    ExMem,
    /// The writeback value held in MEM/WB.
    MemWb,
}

/// Selector pair for two source operands.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ForwardSelect {
    /// Source chosen for `rs1`.
    pub a: ForwardSource,
    /// Source chosen for `rs2`.
    pub b: ForwardSource,
}

/// Forwarding capability of the selected microarchitecture.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ForwardingUnit {
    /// No bypass paths; every operand comes from the register file.
    Disabled,
    /// EX/MEM and MEM/WB bypass paths into Execute and Decode.
    #[default]
    Enabled,
}

impl ForwardingUnit {
    /// Whether bypass paths exist.
    #[inline(always)]
    pub const fn is_enabled(self) -> bool {
        matches!(self, Self::Enabled)
    }

    /// Chooses the source for register `rs`.
    pub fn select(self, rs: usize, ex_mem: &ExMemEntry, mem_wb: &MemWbEntry) -> ForwardSource {
        if !self.is_enabled() || rs == 0 {
            return ForwardSource::RegFile;
        }
        if ex_mem.slot.is_valid() && ex_mem.ctrl.reg_write && ex_mem.rd == rs {
            ForwardSource::ExMem
        } else if mem_wb.slot.is_valid() && mem_wb.ctrl.reg_write && mem_wb.rd == rs {
            ForwardSource::MemWb
        } else {
            ForwardSource::RegFile
        }
    }

    /// Resolves the value of register `rs`, falling back to `reg_value`.
    pub fn operand(
        self,
        rs: usize,
        reg_value: u32,
        ex_mem: &ExMemEntry,
        mem_wb: &MemWbEntry,
    ) -> u32 {
        match self.select(rs, ex_mem, mem_wb) {
            ForwardSource::RegFile => reg_value,
            ForwardSource::ExMem => ex_mem.alu,
            ForwardSource::MemWb => mem_wb.wb_value(),
        }
    }

    /// Selectors for the Execute stage's two ALU operands.
    pub fn execute_select(
        self,
        id_ex: &IdExEntry,
        ex_mem: &ExMemEntry,
        mem_wb: &MemWbEntry,
    ) -> ForwardSelect {
        ForwardSelect {
            a: self.select(id_ex.rs1, ex_mem, mem_wb),
            b: self.select(id_ex.rs2, ex_mem, mem_wb),
        }
    }
}
