//! CPU Core Definition and Initialization.
//!
//! This module defines the central `Cpu` structure, which serves as the container for the
//! entire processor state. It coordinates the following:
//! 1. **State Management:** Maintains the register file and the program counter.
//! 2. **Pipeline Control:** Owns the four pipeline registers and the split-access sequencer.
//! 3. **Microarchitecture:** Holds the forwarding mode and branch predictor chosen at construction.
//! 4. **System Integration:** Owns the memory system (RAM, IO bus, counters).

/// Two-phase tick: evaluate every stage, then commit.
pub mod execution;

pub use execution::{NextState, TickReport};

use crate::config::{AlignmentPolicy, Config};
use crate::core::arch::Gpr;
use crate::core::pipeline::latches::{ExMemEntry, IdExEntry, IfIdEntry, MemWbEntry};
use crate::core::pipeline::microarch::Microarch;
use crate::core::pipeline::register::PipelineRegister;
use crate::soc::System;
use crate::stats::SimStats;

/// Main CPU structure containing all processor state and components.
#[derive(Debug)]
pub struct Cpu {
    /// General Purpose Registers.
    pub regs: Gpr,
    /// Program Counter of the next fetch.
    pub pc: u32,

    /// Memory system.
    pub bus: System,

    /// IF/ID pipeline register.
    pub if_id: PipelineRegister<IfIdEntry>,
    /// ID/EX pipeline register.
    pub id_ex: PipelineRegister<IdExEntry>,
    /// EX/MEM pipeline register.
    pub ex_mem: PipelineRegister<ExMemEntry>,
    /// MEM/WB pipeline register.
    pub mem_wb: PipelineRegister<MemWbEntry>,

    /// Forwarding mode and branch predictor.
    pub microarch: Microarch,
    /// How misaligned data accesses are handled.
    pub alignment: AlignmentPolicy,
    /// The first half of a split access completed last cycle.
    pub split_busy: bool,

    /// Enable per-stage trace events.
    pub trace: bool,
    /// Performance statistics.
    pub stats: SimStats,
    /// A store to the halt sentinel has committed.
    pub halted: bool,
    /// PC of the most recently committed instruction.
    pub last_committed_pc: u32,
}

impl Cpu {
    /// Creates a new CPU instance with the specified system and configuration.
    ///
    /// # Arguments
    ///
    /// * `system` - The memory system, with the program already loaded or to be loaded later.
    /// * `config` - The simulator configuration parameters.
    pub fn new(system: System, config: &Config) -> Self {
        Self {
            regs: Gpr::new(),
            pc: config.general.start_pc,
            bus: system,
            if_id: PipelineRegister::new(),
            id_ex: PipelineRegister::new(),
            ex_mem: PipelineRegister::new(),
            mem_wb: PipelineRegister::new(),
            microarch: Microarch::new(&config.pipeline),
            alignment: config.pipeline.alignment,
            split_busy: false,
            trace: config.general.trace_instructions || cfg!(feature = "always-trace"),
            stats: SimStats::default(),
            halted: false,
            last_committed_pc: 0,
        }
    }

    /// Numeric id of the active variant.
    pub const fn variant_id(&self) -> u8 {
        self.microarch.variant.id()
    }

    /// Dumps the current CPU state (PC and registers) to stdout.
    pub fn dump_state(&self) {
        println!("PC = {:#010x}", self.pc);
        self.regs.dump();
    }
}
