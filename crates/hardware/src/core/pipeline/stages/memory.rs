//! Memory Access (MEM) Stage.
//!
//! This module implements the fourth stage of the instruction pipeline. It performs:
//! 1. **Access Planning:** Decodes the effective address and applies the alignment policy.
//! 2. **Loads:** Reads the containing word (or both words of a split access) from the bus.
//! 3. **Stores:** Computes byte-enabled writes; the commit phase applies them.
//! 4. **Fault Handling:** Illegal accesses are dropped and the instruction is killed.
//!
//! A split access occupies the stage for two cycles. The first inserts a bubble into
//! MEM/WB and stalls everything behind it; the second completes the access.

use crate::common::AccessType;
use crate::config::AlignmentPolicy;
use crate::core::pipeline::latches::{ExMemEntry, MemWbEntry};
use crate::core::pipeline::signals::Occupancy;
use crate::core::pipeline::traits::PipelineLatch;
use crate::core::units::lsu::unaligned::{funnel_merge, split_store};
use crate::core::units::lsu::{self, AccessFault, AccessPlan};
use crate::soc::System;
use crate::soc::map::Region;

/// A byte-enabled word write to apply at commit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StoreOp {
    /// Region the word belongs to.
    pub region: Region,
    /// Word-aligned address.
    pub base: u32,
    /// Data already placed in its byte lanes.
    pub data: u32,
    /// Byte-enable mask.
    pub enable: u8,
}

/// Output of the memory stage for one cycle.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemoryResult {
    /// Bundle to latch into MEM/WB.
    pub entry: MemWbEntry,
    /// Writes to apply at commit (two for a split store).
    pub stores: [Option<StoreOp>; 2],
    /// The stage needs another cycle; everything behind it must hold.
    pub stall: bool,
    /// Next value of the split-access sequencer.
    pub split_busy: bool,
    /// The access was refused.
    pub fault: Option<AccessFault>,
}

/// Executes the memory stage.
///
/// # Arguments
///
/// * `ex_mem` - Committed EX/MEM bundle.
/// * `bus` - Memory system; only read here.
/// * `policy` - Alignment policy.
/// * `split_busy` - The first half of a split access happened last cycle.
/// * `trace` - Emit per-stage trace events.
pub fn mem_stage(
    ex_mem: &ExMemEntry,
    bus: &System,
    policy: AlignmentPolicy,
    split_busy: bool,
    trace: bool,
) -> MemoryResult {
    if !ex_mem.slot.is_valid() {
        return MemoryResult {
            entry: MemWbEntry::bubble_at(ex_mem.pc),
            ..MemoryResult::default()
        };
    }

    let ctrl = ex_mem.ctrl;
    let mut entry = MemWbEntry {
        pc: ex_mem.pc,
        inst: ex_mem.inst,
        rd: ex_mem.rd,
        alu: ex_mem.alu,
        load_word: 0,
        load_offset: 0,
        ctrl,
        slot: Occupancy::Valid,
    };

    if !ctrl.mem_read && !ctrl.mem_write {
        return MemoryResult {
            entry,
            ..MemoryResult::default()
        };
    }

    let addr = ex_mem.alu;
    let mut stores = [None, None];
    match lsu::plan(bus.map(), policy, addr, ctrl.width) {
        AccessPlan::Fault(fault) => {
            let access = if ctrl.mem_write {
                AccessType::Write
            } else {
                AccessType::Read
            };
            tracing::debug!(
                pc = format_args!("{:#010x}", ex_mem.pc),
                addr = format_args!("{addr:#010x}"),
                ?fault,
                %access,
                "MEM illegal access"
            );
            entry.slot = Occupancy::Killed;
            return MemoryResult {
                entry,
                fault: Some(fault),
                ..MemoryResult::default()
            };
        }
        AccessPlan::Aligned {
            region,
            base,
            offset,
        } => {
            if ctrl.mem_read {
                entry.load_word = bus.read(region, base);
                entry.load_offset = offset;
            } else {
                stores[0] = Some(StoreOp {
                    region,
                    base,
                    data: lsu::store_lanes(ex_mem.store_data, offset),
                    enable: lsu::byte_enable(ctrl.width, offset),
                });
            }
        }
        AccessPlan::Split { lo, hi, offset } => {
            if !split_busy {
                tracing::debug!(
                    pc = format_args!("{:#010x}", ex_mem.pc),
                    addr = format_args!("{addr:#010x}"),
                    "MEM split access, stalling"
                );
                return MemoryResult {
                    entry: MemWbEntry::bubble_at(ex_mem.pc),
                    stall: true,
                    split_busy: true,
                    ..MemoryResult::default()
                };
            }
            if ctrl.mem_read {
                entry.load_word =
                    funnel_merge(bus.read(Region::Ram, lo), bus.read(Region::Ram, hi), offset);
                entry.load_offset = 0;
            } else {
                let halves = split_store(ex_mem.store_data, ctrl.width, offset);
                for (slot, (base, half)) in stores.iter_mut().zip([lo, hi].into_iter().zip(halves)) {
                    if half.enable != 0 {
                        *slot = Some(StoreOp {
                            region: Region::Ram,
                            base,
                            data: half.data,
                            enable: half.enable,
                        });
                    }
                }
            }
        }
    }

    if trace {
        tracing::trace!(
            pc = format_args!("{:#010x}", ex_mem.pc),
            addr = format_args!("{addr:#010x}"),
            load = ctrl.mem_read,
            data = format_args!("{:#010x}", if ctrl.mem_read { entry.wb_value() } else { ex_mem.store_data }),
            "MEM"
        );
    }

    MemoryResult {
        entry,
        stores,
        ..MemoryResult::default()
    }
}
