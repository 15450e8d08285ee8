//! Instruction Fetch (IF) Stage.
//!
//! Reads one instruction per cycle from RAM at the current PC and chooses the next PC.
//! Next-PC priority is decided in two places: a Decode redirect wins and is applied by
//! the commit phase; otherwise the predictor's target is used when it is valid, and PC+4
//! when it is not.

use crate::common::{AccessType, INSTRUCTION_SIZE};
use crate::core::pipeline::latches::IfIdEntry;
use crate::core::pipeline::signals::Occupancy;
use crate::core::units::bru::BranchPredictor;
use crate::soc::System;

/// Output of the fetch stage for one cycle.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FetchResult {
    /// Bundle to latch into IF/ID.
    pub entry: IfIdEntry,
    /// PC to fetch next cycle absent a redirect or stall.
    pub next_pc: u32,
}

/// Executes the instruction fetch stage.
///
/// A misaligned PC, or one outside RAM, produces a killed bundle; the PC still advances
/// by the normal rule so a later redirect can recover.
///
/// # Arguments
///
/// * `pc` - Current program counter.
/// * `bus` - Memory system used for the combinational instruction read.
/// * `predictor` - Branch predictor of the active microarchitecture.
/// * `trace` - Emit per-stage trace events.
pub fn fetch_stage(
    pc: u32,
    bus: &System,
    predictor: &impl BranchPredictor,
    trace: bool,
) -> FetchResult {
    let prediction = predictor.predict(pc);
    let next_pc = if prediction.valid {
        prediction.target
    } else {
        pc.wrapping_add(INSTRUCTION_SIZE)
    };

    let Some(inst) = bus.fetch(pc) else {
        tracing::debug!(
            pc = format_args!("{pc:#010x}"),
            access = %AccessType::Fetch,
            "IF  illegal fetch address"
        );
        return FetchResult {
            entry: IfIdEntry {
                pc,
                slot: Occupancy::Killed,
                ..IfIdEntry::default()
            },
            next_pc,
        };
    };

    if trace {
        tracing::trace!(
            pc = format_args!("{pc:#010x}"),
            inst = format_args!("{inst:#010x}"),
            pred_taken = prediction.valid,
            next_pc = format_args!("{next_pc:#010x}"),
            "IF"
        );
    }

    FetchResult {
        entry: IfIdEntry {
            pc,
            inst,
            pred_taken: prediction.valid,
            pred_target: if prediction.valid { prediction.target } else { 0 },
            pred_history: predictor.history(),
            slot: Occupancy::Valid,
        },
        next_pc,
    }
}
