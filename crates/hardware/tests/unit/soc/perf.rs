//! Performance counter block.

use pretty_assertions::assert_eq;

use crate::common::builder::instruction::asm;
use crate::common::harness::TestContext;
use rvpipe_core::config::Variant;
use rvpipe_core::soc::devices::perf::{BRANCHES, CONTROL, CYCLES, RETIRED};
use rvpipe_core::soc::devices::{PerfCounters, PerfEvents};
use rvpipe_core::soc::Device;

const NOP: u32 = 0x0000_0013;

fn with_padding(body: &[u32]) -> Vec<u32> {
    let mut program = body.to_vec();
    program.extend([NOP; 4]);
    program
}

#[test]
fn program_reads_cycle_and_retired_counters() {
    // The first load reads in cycle 5 and sees the 4 cycles already counted. The second
    // sees the lui that retired in cycle 5.
    let program = with_padding(&[
        asm().lui(1, 0xFFFF0).build(),
        asm().lw(5, 1, 0x100).build(),
        asm().lw(6, 1, 0x104).build(),
        asm().halt().build(),
    ]);
    let mut ctx = TestContext::new(Variant::Forward).load_program(&program);
    let _ = ctx.run_until_halt();

    assert_eq!(ctx.get_reg(5), 4);
    assert_eq!(ctx.get_reg(6), 1);
}

#[test]
fn program_clears_counters() {
    let program = with_padding(&[
        asm().lui(1, 0xFFFF0).build(),
        asm().sw(1, 0, 0x11C).build(),
        asm().nop().build(),
        asm().lw(5, 1, 0x100).build(),
        asm().halt().build(),
    ]);
    let mut ctx = TestContext::new(Variant::Forward).load_program(&program);
    let _ = ctx.run_until_halt();

    assert_eq!(ctx.get_reg(5), 1);
}

#[test]
fn record_counts_each_event() {
    let mut perf = PerfCounters::new(0xFFFF_0100);
    perf.record(PerfEvents {
        retired: true,
        branch: true,
        ..PerfEvents::default()
    });
    perf.record(PerfEvents {
        stalled: true,
        ..PerfEvents::default()
    });
    perf.record(PerfEvents {
        retired: true,
        branch: true,
        mispredict: true,
        ..PerfEvents::default()
    });

    assert_eq!(perf.cycles(), 3);
    assert_eq!(perf.retired(), 2);
    assert_eq!(perf.stalls(), 1);
    assert_eq!(perf.branches(), 2);
    assert_eq!(perf.mispredicts(), 1);
    assert_eq!(perf.read_u32(CYCLES), 3);
    assert_eq!(perf.read_u32(BRANCHES), 2);
}

#[test]
fn disabled_byte_lanes_do_not_clear() {
    let mut perf = PerfCounters::new(0);
    perf.record(PerfEvents::default());
    perf.write_u32(CONTROL, 1, 0);
    perf.record(PerfEvents::default());
    assert_eq!(perf.cycles(), 2);
}

#[test]
fn explicit_clear_resets_everything() {
    let mut perf = PerfCounters::new(0);
    perf.record(PerfEvents {
        retired: true,
        ..PerfEvents::default()
    });
    perf.clear();
    assert_eq!(perf.read_u32(RETIRED), 0);
    assert_eq!(perf.address_range(), (0, 0x20));
}
