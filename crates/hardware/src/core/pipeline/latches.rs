//! Pipeline latch structures for inter-stage communication.
//!
//! This module defines the bundles carried between the five stages:
//! Fetch → Decode → Execute → Memory → Writeback.
//!
//! 1. **Instruction Flow:** Each bundle carries the PC, the raw encoding, and the data the
//!    next stage consumes.
//! 2. **Control:** Decode's [`ControlSignals`] ride along from ID/EX onward.
//! 3. **Slot State:** Every bundle carries an [`Occupancy`]; bubbles and killed bundles are
//!    sanitized so they cannot cause side effects.

use crate::core::pipeline::signals::{ControlSignals, Occupancy};
use crate::core::pipeline::traits::PipelineLatch;
use crate::core::units::lsu;

/// Entry in the IF/ID pipeline latch (Fetch to Decode stage).
///
/// Contains the fetched encoding and the prediction Fetch made for it.
#[derive(Clone, Default, Debug, PartialEq, Eq)]
pub struct IfIdEntry {
    /// Program counter of the instruction.
    pub pc: u32,
    /// 32-bit instruction encoding.
    pub inst: u32,
    /// Whether the branch predictor predicted this instruction as taken.
    pub pred_taken: bool,
    /// Predicted target address (meaningful only when `pred_taken`).
    pub pred_target: u32,
    /// Predictor history when the instruction was fetched.
    pub pred_history: u32,
    /// Slot state.
    pub slot: Occupancy,
}

/// Entry in the ID/EX pipeline latch (Decode to Execute stage).
#[derive(Clone, Default, Debug, PartialEq, Eq)]
pub struct IdExEntry {
    /// Program counter of the instruction.
    pub pc: u32,
    /// 32-bit instruction encoding.
    pub inst: u32,
    /// First source register index.
    pub rs1: usize,
    /// Second source register index.
    pub rs2: usize,
    /// Destination register index.
    pub rd: usize,
    /// Sign-extended immediate value.
    pub imm: i32,
    /// Value of `rs1` read from the register file in Decode.
    pub rv1: u32,
    /// Value of `rs2` read from the register file in Decode.
    pub rv2: u32,
    /// Control signals for subsequent stages.
    pub ctrl: ControlSignals,
    /// Slot state.
    pub slot: Occupancy,
}

/// Entry in the EX/MEM pipeline latch (Execute to Memory stage).
#[derive(Clone, Default, Debug, PartialEq, Eq)]
pub struct ExMemEntry {
    /// Program counter of the instruction.
    pub pc: u32,
    /// 32-bit instruction encoding.
    pub inst: u32,
    /// Destination register index.
    pub rd: usize,
    /// ALU result: the effective address for memory operations, the link address for jumps.
    pub alu: u32,
    /// Forwarded `rs2` value to store.
    pub store_data: u32,
    /// Control signals.
    pub ctrl: ControlSignals,
    /// Slot state.
    pub slot: Occupancy,
}

/// Entry in the MEM/WB pipeline latch (Memory to Writeback stage).
#[derive(Clone, Default, Debug, PartialEq, Eq)]
pub struct MemWbEntry {
    /// Program counter of the instruction.
    pub pc: u32,
    /// 32-bit instruction encoding.
    pub inst: u32,
    /// Destination register index.
    pub rd: usize,
    /// ALU result (effective address for memory operations).
    pub alu: u32,
    /// Raw word returned by the memory system, lanes still in place.
    pub load_word: u32,
    /// Byte offset of the loaded value within `load_word`.
    pub load_offset: u32,
    /// Control signals.
    pub ctrl: ControlSignals,
    /// Slot state.
    pub slot: Occupancy,
}

impl MemWbEntry {
    /// The value Writeback will commit: extended load data for loads, the ALU result
    /// (which is already PC+4 for jumps) otherwise.
    ///
    /// Forwarding from MEM/WB uses the same selection.
    pub const fn wb_value(&self) -> u32 {
        if self.ctrl.mem_read {
            lsu::extract_load(
                self.load_word,
                self.load_offset,
                self.ctrl.width,
                self.ctrl.signed_load,
            )
        } else if self.ctrl.jump {
            self.pc.wrapping_add(crate::common::INSTRUCTION_SIZE)
        } else {
            self.alu
        }
    }
}

impl PipelineLatch for IfIdEntry {
    fn occupancy(&self) -> Occupancy {
        self.slot
    }

    fn pc(&self) -> u32 {
        self.pc
    }

    fn bubble_at(pc: u32) -> Self {
        Self {
            pc,
            ..Self::default()
        }
    }

    fn sanitized(self) -> Self {
        match self.slot {
            Occupancy::Valid => self,
            Occupancy::Bubble => Self::bubble_at(self.pc),
            Occupancy::Killed => Self {
                pred_taken: false,
                pred_target: 0,
                pred_history: 0,
                ..self
            },
        }
    }
}

impl PipelineLatch for IdExEntry {
    fn occupancy(&self) -> Occupancy {
        self.slot
    }

    fn pc(&self) -> u32 {
        self.pc
    }

    fn bubble_at(pc: u32) -> Self {
        Self {
            pc,
            ..Self::default()
        }
    }

    fn sanitized(self) -> Self {
        match self.slot {
            Occupancy::Valid => self,
            Occupancy::Bubble => Self::bubble_at(self.pc),
            Occupancy::Killed => Self {
                ctrl: ControlSignals::default(),
                ..self
            },
        }
    }
}

impl PipelineLatch for ExMemEntry {
    fn occupancy(&self) -> Occupancy {
        self.slot
    }

    fn pc(&self) -> u32 {
        self.pc
    }

    fn bubble_at(pc: u32) -> Self {
        Self {
            pc,
            ..Self::default()
        }
    }

    fn sanitized(self) -> Self {
        match self.slot {
            Occupancy::Valid => self,
            Occupancy::Bubble => Self::bubble_at(self.pc),
            Occupancy::Killed => Self {
                ctrl: ControlSignals::default(),
                store_data: 0,
                ..self
            },
        }
    }
}

impl PipelineLatch for MemWbEntry {
    fn occupancy(&self) -> Occupancy {
        self.slot
    }

    fn pc(&self) -> u32 {
        self.pc
    }

    fn bubble_at(pc: u32) -> Self {
        Self {
            pc,
            ..Self::default()
        }
    }

    fn sanitized(self) -> Self {
        match self.slot {
            Occupancy::Valid => self,
            Occupancy::Bubble => Self::bubble_at(self.pc),
            Occupancy::Killed => Self {
                ctrl: ControlSignals::default(),
                load_word: 0,
                ..self
            },
        }
    }
}
