//! Data Hazard Detection.
//!
//! This module decides when Decode must wait. It provides:
//! 1. **Source Usage:** Which registers an instruction in Decode actually reads.
//! 2. **Hazard Classes:** Load-use, branch-load, and branch-ALU hazards when forwarding
//!    exists; a full RAW interlock when it does not.
//!
//! On any hazard the pipeline stalls the PC and IF/ID and flushes ID/EX. The producer keeps
//! moving toward Memory so that its result becomes forwardable on the next cycle; stalling
//! ID/EX as well would hold the producer in place forever.

use crate::core::pipeline::forwarding::ForwardingUnit;
use crate::core::pipeline::latches::{ExMemEntry, IdExEntry, IfIdEntry};
use crate::isa::instruction::InstructionBits;
use crate::isa::rv32i::opcodes;

/// Registers read by the instruction in Decode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SourceUse {
    /// `rs1`, if read and non-zero.
    pub rs1: Option<usize>,
    /// `rs2`, if read and non-zero.
    pub rs2: Option<usize>,
    /// The instruction resolves in Decode (conditional branch or JALR).
    pub resolves_in_decode: bool,
}

impl SourceUse {
    /// Derives source usage from an IF/ID bundle. Bubbles and killed bundles read nothing.
    pub fn of(if_id: &IfIdEntry) -> Self {
        if !if_id.slot.is_valid() {
            return Self::default();
        }
        let inst = if_id.inst;
        let nz = |r: usize| (r != 0).then_some(r);
        let (rs1, rs2, resolves_in_decode) = match inst.opcode() {
            opcodes::OP_REG | opcodes::OP_STORE => (nz(inst.rs1()), nz(inst.rs2()), false),
            opcodes::OP_BRANCH => (nz(inst.rs1()), nz(inst.rs2()), true),
            opcodes::OP_JALR => (nz(inst.rs1()), None, true),
            opcodes::OP_IMM | opcodes::OP_LOAD => (nz(inst.rs1()), None, false),
            _ => (None, None, false),
        };
        Self {
            rs1,
            rs2,
            resolves_in_decode,
        }
    }

    /// Whether `rd` is one of the registers read.
    #[inline(always)]
    pub fn reads(&self, rd: usize) -> bool {
        rd != 0 && (self.rs1 == Some(rd) || self.rs2 == Some(rd))
    }
}

/// Classification of a detected hazard.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HazardKind {
    /// A load in ID/EX produces a register Decode reads.
    LoadUse,
    /// A load in EX/MEM produces a register a branch or JALR in Decode reads.
    BranchLoad,
    /// A non-load in ID/EX produces a register a branch or JALR in Decode reads.
    BranchAlu,
    /// Without forwarding: any in-flight producer in ID/EX or EX/MEM.
    Interlock,
}

/// Detects whether Decode must stall this cycle.
///
/// # Arguments
///
/// * `forwarding` - Forwarding capability of the active microarchitecture.
/// * `uses` - Registers read by the instruction in Decode.
/// * `id_ex` - The instruction currently in Execute.
/// * `ex_mem` - The instruction currently in Memory.
///
/// # Returns
///
/// The first hazard class that applies, or `None`.
///
/// # Examples
///
/// ```
/// use rvpipe_core::core::pipeline::forwarding::ForwardingUnit;
/// use rvpipe_core::core::pipeline::hazards::{detect, HazardKind, SourceUse};
/// use rvpipe_core::core::pipeline::latches::{ExMemEntry, IdExEntry};
/// use rvpipe_core::core::pipeline::signals::{ControlSignals, Occupancy};
///
/// // ID/EX: lw x1, 0(x2)    Decode: add x3, x1, x1
/// let load = IdExEntry {
///     rd: 1,
///     ctrl: ControlSignals { mem_read: true, reg_write: true, ..Default::default() },
///     slot: Occupancy::Valid,
///     ..Default::default()
/// };
/// let uses = SourceUse { rs1: Some(1), rs2: Some(1), resolves_in_decode: false };
/// let hz = detect(ForwardingUnit::Enabled, &uses, &load, &ExMemEntry::default());
/// assert_eq!(hz, Some(HazardKind::LoadUse));
/// ```
pub fn detect(
    forwarding: ForwardingUnit,
    uses: &SourceUse,
    id_ex: &IdExEntry,
    ex_mem: &ExMemEntry,
) -> Option<HazardKind> {
    let ex_writes = id_ex.slot.is_valid() && id_ex.ctrl.reg_write && uses.reads(id_ex.rd);
    let mem_writes = ex_mem.slot.is_valid() && ex_mem.ctrl.reg_write && uses.reads(ex_mem.rd);

    match forwarding {
        ForwardingUnit::Disabled => (ex_writes || mem_writes).then_some(HazardKind::Interlock),
        ForwardingUnit::Enabled => {
            if ex_writes && id_ex.ctrl.mem_read {
                Some(HazardKind::LoadUse)
            } else if uses.resolves_in_decode && mem_writes && ex_mem.ctrl.mem_read {
                Some(HazardKind::BranchLoad)
            } else if uses.resolves_in_decode && ex_writes {
                Some(HazardKind::BranchAlu)
            } else {
                None
            }
        }
    }
}
