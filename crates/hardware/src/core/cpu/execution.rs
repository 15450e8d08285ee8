//! Main Execution Loop.
//!
//! This module implements the core clock cycle. Each tick runs in two phases:
//! 1. **Evaluate:** Every stage, the hazard unit and branch resolution compute their
//!    outputs from the committed state into a [`NextState`]; nothing is mutated.
//! 2. **Commit:** The register write, stores, predictor training, pipeline registers and
//!    PC are all applied together.
//!
//! A committing halt store freezes everything after the register write of that tick.

use super::Cpu;
use crate::core::arch::RegWrite;
use crate::core::pipeline::hazards::{self, HazardKind, SourceUse};
use crate::core::pipeline::latches::IdExEntry;
use crate::core::pipeline::register::LatchControl;
use crate::core::pipeline::signals::Occupancy;
use crate::core::pipeline::stages::decode::DecodeBypass;
use crate::core::pipeline::stages::{
    DecodeResult, ExecuteResult, FetchResult, MemoryResult, WritebackResult, decode_stage,
    execute_stage, fetch_stage, mem_stage, wb_stage,
};
use crate::core::pipeline::traits::PipelineLatch;
use crate::core::units::bru::BranchPredictor;
use crate::isa::disasm::disassemble;
use crate::soc::devices::PerfEvents;
use crate::soc::interconnect::IoWrite;

/// Everything the evaluate phase computed for one tick.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NextState {
    /// Writeback outputs.
    pub wb: WritebackResult,
    /// Memory stage outputs.
    pub mem: MemoryResult,
    /// Execute stage outputs.
    pub ex: ExecuteResult,
    /// Data hazard holding Decode, if any.
    pub hazard: Option<HazardKind>,
    /// Decode stage outputs.
    pub decode: DecodeResult,
    /// Fetch stage outputs.
    pub fetch: FetchResult,
}

/// Observable outputs of one tick, for tracing and trace comparison.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Cycle number of this tick (1-based).
    pub cycle: u64,
    /// PC presented to instruction memory this tick.
    pub fetch_pc: u32,
    /// PC of the most recently committed instruction.
    pub last_committed_pc: u32,
    /// An instruction committed this tick.
    pub retired: bool,
    /// The committing instruction is a branch or jump.
    pub branch_commit: bool,
    /// The committing instruction is a mispredicted branch.
    pub mispredict_commit: bool,
    /// The core is halted.
    pub halted: bool,
    /// Numeric id of the active variant.
    pub variant: u8,
    /// Register write committed this tick.
    pub reg_write: Option<RegWrite>,
    /// IO store performed this tick.
    pub io_write: Option<IoWrite>,
    /// The front end was held this tick.
    pub stalled: bool,
    /// IF/ID was flushed by a redirect this tick.
    pub flushed: bool,
}

impl Cpu {
    /// Advances the core by one clock cycle.
    ///
    /// Once halted, every further tick returns immediately with no commits and the PC
    /// frozen.
    pub fn tick(&mut self) -> TickReport {
        if self.halted {
            return TickReport {
                cycle: self.stats.cycles,
                fetch_pc: self.pc,
                last_committed_pc: self.last_committed_pc,
                halted: true,
                variant: self.variant_id(),
                ..TickReport::default()
            };
        }
        let next = self.evaluate();
        self.commit(next)
    }

    /// Phase 1: computes every stage's output from the committed state.
    pub fn evaluate(&self) -> NextState {
        let trace = self.trace;
        let forwarding = self.microarch.forwarding;
        let (if_id, id_ex, ex_mem, mem_wb) = (
            self.if_id.get(),
            self.id_ex.get(),
            self.ex_mem.get(),
            self.mem_wb.get(),
        );

        let wb = wb_stage(mem_wb, self.bus.map().halt_addr(), trace);
        let mem = mem_stage(ex_mem, &self.bus, self.alignment, self.split_busy, trace);
        let ex = execute_stage(id_ex, forwarding, ex_mem, mem_wb, trace);

        let uses = SourceUse::of(if_id);
        let hazard = hazards::detect(forwarding, &uses, id_ex, ex_mem);
        let decode = decode_stage(
            if_id,
            &self.regs,
            wb.reg_write,
            &uses,
            DecodeBypass {
                forwarding,
                ex_mem,
                mem_wb,
            },
            hazard.is_some() || mem.stall,
            trace,
        );

        let fetch = fetch_stage(self.pc, &self.bus, &self.microarch.predictor, trace);

        NextState {
            wb,
            mem,
            ex,
            hazard,
            decode,
            fetch,
        }
    }

    /// Phase 2: applies `next` to the architectural and pipeline state.
    fn commit(&mut self, next: NextState) -> TickReport {
        let fetch_pc = self.pc;
        self.stats.cycles += 1;

        if let Some(w) = next.wb.reg_write {
            self.regs.commit(w);
        }
        if next.wb.retired {
            let committed = self.mem_wb.get();
            self.last_committed_pc = committed.pc;
            self.stats.record_commit(&committed.ctrl);
            #[cfg(feature = "commit-log")]
            tracing::info!(
                pc = format_args!("{:#010x}", committed.pc),
                inst = %disassemble(committed.inst),
                "commit"
            );
        }

        let mut report = TickReport {
            cycle: self.stats.cycles,
            fetch_pc,
            last_committed_pc: self.last_committed_pc,
            retired: next.wb.retired,
            branch_commit: next.wb.branch,
            mispredict_commit: next.wb.mispredict,
            halted: next.wb.halt,
            variant: self.variant_id(),
            reg_write: next.wb.reg_write,
            ..TickReport::default()
        };

        if next.wb.halt {
            self.halted = true;
            tracing::info!(
                pc = format_args!("{:#010x}", self.last_committed_pc),
                cycles = self.stats.cycles,
                retired = self.stats.instructions_retired,
                "halt"
            );
            self.bus.tick(PerfEvents {
                retired: true,
                stalled: false,
                mispredict: next.wb.mispredict,
                branch: next.wb.branch,
            });
            return report;
        }

        for store in next.mem.stores.into_iter().flatten() {
            match self
                .bus
                .write(store.region, store.base, store.data, store.enable)
            {
                Ok(Some(w)) => report.io_write = Some(w),
                Ok(None) => {}
                Err(e) => tracing::warn!(error = %e, "store dropped"),
            }
        }

        if let Some(u) = next.decode.update {
            self.microarch
                .predictor
                .update_with_history(u.pc, u.taken, u.target, u.history);
        }

        let mem_stall = next.mem.stall;
        let hazard = if mem_stall { None } else { next.hazard };
        let front_stall = mem_stall || hazard.is_some();
        let redirect = if front_stall {
            None
        } else {
            next.decode.redirect
        };

        self.split_busy = next.mem.split_busy;
        self.mem_wb.clock(LatchControl::Advance, next.mem.entry);
        self.ex_mem
            .clock(LatchControl::resolve(false, mem_stall), next.ex.entry);

        if mem_stall {
            // The held bundle keeps the operands it would have used this cycle: MEM/WB
            // drains now and cannot forward next cycle.
            let held = self.id_ex.get();
            if held.slot.is_valid() {
                let refreshed = IdExEntry {
                    rv1: next.ex.rv1,
                    rv2: next.ex.rv2,
                    ..held.clone()
                };
                self.id_ex.set(refreshed);
            }
        } else {
            self.id_ex.clock(
                LatchControl::resolve(hazard.is_some(), false),
                next.decode.entry,
            );
        }

        let fetched_killed = next.fetch.entry.slot == Occupancy::Killed;
        self.if_id.clock(
            LatchControl::resolve(redirect.is_some(), front_stall),
            next.fetch.entry,
        );

        if let Some(kind) = hazard {
            self.stats.stalls_data += 1;
            tracing::debug!(
                pc = format_args!("{:#010x}", self.if_id.get().pc()),
                ?kind,
                "ID  stall"
            );
        }
        if mem_stall {
            self.stats.stalls_mem += 1;
        }

        self.pc = match redirect {
            Some(target) => {
                self.stats.flushes_control += 1;
                tracing::debug!(
                    from = format_args!("{fetch_pc:#010x}"),
                    to = format_args!("{target:#010x}"),
                    "IF/ID flush"
                );
                target
            }
            None if front_stall => self.pc,
            None => {
                if fetched_killed {
                    self.stats.illegal_fetches += 1;
                }
                next.fetch.next_pc
            }
        };

        if next.decode.illegal {
            self.stats.illegal_instructions += 1;
        }
        if next.mem.fault.is_some() {
            self.stats.illegal_accesses += 1;
        }

        self.bus.tick(PerfEvents {
            retired: next.wb.retired,
            stalled: front_stall,
            mispredict: next.wb.mispredict,
            branch: next.wb.branch,
        });

        report.stalled = front_stall;
        report.flushed = redirect.is_some();
        report
    }

    /// Prints a diagram of the current pipeline state.
    pub fn print_pipeline_diagram(&self) {
        fn slot(occupancy: Occupancy, pc: u32, inst: u32) -> String {
            match occupancy {
                Occupancy::Valid => format!("{pc:#010x}  {}", disassemble(inst)),
                Occupancy::Bubble => "-".to_string(),
                Occupancy::Killed => format!("{pc:#010x}  <killed>"),
            }
        }
        let (if_id, id_ex, ex_mem, mem_wb) = (
            self.if_id.get(),
            self.id_ex.get(),
            self.ex_mem.get(),
            self.mem_wb.get(),
        );
        eprintln!("[Pipeline] cycle {} pc={:#010x}", self.stats.cycles, self.pc);
        eprintln!("  ID  {}", slot(if_id.slot, if_id.pc, if_id.inst));
        eprintln!("  EX  {}", slot(id_ex.slot, id_ex.pc, id_ex.inst));
        eprintln!("  MEM {}", slot(ex_mem.slot, ex_mem.pc, ex_mem.inst));
        eprintln!("  WB  {}", slot(mem_wb.slot, mem_wb.pc, mem_wb.inst));
    }
}
