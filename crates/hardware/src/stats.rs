//! Simulation statistics collection and reporting.
//!
//! This module tracks performance metrics for the pipeline. It provides:
//! 1. **Cycle and IPC:** Total cycles, retired instructions, and derived metrics (CPI, IPC).
//! 2. **Instruction mix:** Counts by category (ALU, load, store, branch, jump).
//! 3. **Branch prediction:** Correct predictions, mispredictions, and accuracy.
//! 4. **Stalls:** Data-hazard and memory stall cycles, control flushes.
//! 5. **Faults:** Illegal instructions, illegal fetches, and refused data accesses.

use std::time::Instant;

use crate::core::pipeline::signals::ControlSignals;

/// Simulation statistics structure tracking all performance metrics.
#[derive(Clone, Debug)]
pub struct SimStats {
    start_time: Instant,
    /// Total simulated cycles elapsed.
    pub cycles: u64,
    /// Number of instructions committed (retired).
    pub instructions_retired: u64,

    /// Count of load instructions retired.
    pub inst_load: u64,
    /// Count of store instructions retired.
    pub inst_store: u64,
    /// Count of conditional branch instructions retired.
    pub inst_branch: u64,
    /// Count of jump instructions retired.
    pub inst_jump: u64,
    /// Count of everything else retired (ALU, LUI/AUIPC, FENCE).
    pub inst_alu: u64,

    /// Conditional branches whose prediction was correct.
    pub branch_predictions: u64,
    /// Conditional branches whose prediction was wrong.
    pub branch_mispredictions: u64,

    /// Cycles Decode was held by a data hazard.
    pub stalls_data: u64,
    /// Cycles the pipeline was held by a split memory access.
    pub stalls_mem: u64,
    /// IF/ID flushes caused by Decode redirects.
    pub flushes_control: u64,

    /// Instructions that failed to decode.
    pub illegal_instructions: u64,
    /// Fetches from a misaligned or non-executable PC.
    pub illegal_fetches: u64,
    /// Loads and stores refused by the LSU.
    pub illegal_accesses: u64,
}

impl Default for SimStats {
    /// Returns the default value.
    fn default() -> Self {
        Self {
            start_time: Instant::now(),
            cycles: 0,
            instructions_retired: 0,
            inst_load: 0,
            inst_store: 0,
            inst_branch: 0,
            inst_jump: 0,
            inst_alu: 0,
            branch_predictions: 0,
            branch_mispredictions: 0,
            stalls_data: 0,
            stalls_mem: 0,
            flushes_control: 0,
            illegal_instructions: 0,
            illegal_fetches: 0,
            illegal_accesses: 0,
        }
    }
}

/// Section names for selective stats output.
///
/// Valid section identifiers: `"summary"`, `"pipeline"`, `"instruction_mix"`, `"branch"`, `"faults"`.
/// Pass an empty slice to `print_sections` to print all sections.
pub const STATS_SECTIONS: &[&str] = &["summary", "pipeline", "instruction_mix", "branch", "faults"];

impl SimStats {
    /// Counts one committed instruction by category.
    pub fn record_commit(&mut self, ctrl: &ControlSignals) {
        self.instructions_retired += 1;
        if ctrl.mem_read {
            self.inst_load += 1;
        } else if ctrl.mem_write {
            self.inst_store += 1;
        } else if ctrl.branch {
            self.inst_branch += 1;
            if ctrl.mispredicted {
                self.branch_mispredictions += 1;
            } else {
                self.branch_predictions += 1;
            }
        } else if ctrl.jump {
            self.inst_jump += 1;
        } else {
            self.inst_alu += 1;
        }
    }

    /// Instructions per cycle.
    pub fn ipc(&self) -> f64 {
        if self.cycles == 0 {
            0.0
        } else {
            self.instructions_retired as f64 / self.cycles as f64
        }
    }

    /// Cycles per instruction.
    pub fn cpi(&self) -> f64 {
        if self.instructions_retired == 0 {
            0.0
        } else {
            self.cycles as f64 / self.instructions_retired as f64
        }
    }

    /// Fraction of conditional branches predicted correctly, in percent.
    pub fn prediction_accuracy(&self) -> f64 {
        let total = self.branch_predictions + self.branch_mispredictions;
        if total == 0 {
            0.0
        } else {
            100.0 * (self.branch_predictions as f64 / total as f64)
        }
    }

    /// Prints only the requested statistics sections to stdout.
    ///
    /// Each element of `sections` should be one of [`STATS_SECTIONS`]. Pass an empty slice
    /// to print all sections (same as `print()`).
    pub fn print_sections(&self, sections: &[String]) {
        let want = |s: &str| sections.is_empty() || sections.iter().any(|x| x == s);
        let seconds = self.start_time.elapsed().as_secs_f64();
        let cyc = self.cycles.max(1) as f64;
        let instr = self.instructions_retired.max(1) as f64;

        if want("summary") {
            let khz = if seconds > 0.0 {
                (self.cycles as f64 / seconds) / 1000.0
            } else {
                0.0
            };
            println!("\n==========================================================");
            println!("RV32I PIPELINE SIMULATION STATISTICS");
            println!("==========================================================");
            println!("host_seconds             {:.4} s", seconds);
            println!("sim_cycles               {}", self.cycles);
            println!("sim_freq                 {:.2} kHz", khz);
            println!("sim_insts                {}", self.instructions_retired);
            println!("sim_ipc                  {:.4}", self.ipc());
            println!("sim_cpi                  {:.4}", self.cpi());
            println!("----------------------------------------------------------");
        }
        if want("pipeline") {
            println!("PIPELINE");
            println!(
                "  stalls.data            {} ({:.2}%)",
                self.stalls_data,
                (self.stalls_data as f64 / cyc) * 100.0
            );
            println!(
                "  stalls.memory          {} ({:.2}%)",
                self.stalls_mem,
                (self.stalls_mem as f64 / cyc) * 100.0
            );
            println!("  flushes.control        {}", self.flushes_control);
            println!("----------------------------------------------------------");
        }
        if want("instruction_mix") {
            println!("INSTRUCTION MIX");
            for (name, count) in [
                ("op.alu", self.inst_alu),
                ("op.load", self.inst_load),
                ("op.store", self.inst_store),
                ("op.branch", self.inst_branch),
                ("op.jump", self.inst_jump),
            ] {
                println!(
                    "  {:<22} {} ({:.2}%)",
                    name,
                    count,
                    (count as f64 / instr) * 100.0
                );
            }
            println!("----------------------------------------------------------");
        }
        if want("branch") {
            println!("BRANCH PREDICTION");
            println!(
                "  bp.lookups             {}",
                self.branch_predictions + self.branch_mispredictions
            );
            println!("  bp.mispredicts         {}", self.branch_mispredictions);
            println!("  bp.accuracy            {:.2}%", self.prediction_accuracy());
            println!("----------------------------------------------------------");
        }
        if want("faults") {
            println!("FAULTS");
            println!("  illegal.instructions   {}", self.illegal_instructions);
            println!("  illegal.fetches        {}", self.illegal_fetches);
            println!("  illegal.accesses       {}", self.illegal_accesses);
        }
        println!("==========================================================");
    }

    /// Prints all statistics sections to stdout.
    ///
    /// Equivalent to `print_sections(&[])`.
    pub fn print(&self) {
        self.print_sections(&[]);
    }
}
