//! Bypass network selection.

use pretty_assertions::assert_eq;

use crate::common::builder::pipeline_state::{ExMemBuilder, IdExBuilder, MemWbBuilder};
use rvpipe_core::core::pipeline::forwarding::{ForwardSelect, ForwardSource, ForwardingUnit};
use rvpipe_core::core::pipeline::latches::{ExMemEntry, MemWbEntry};
use rvpipe_core::core::pipeline::signals::{ControlSignals, MemWidth, Occupancy};

#[test]
fn newest_producer_wins() {
    let ex_mem = ExMemBuilder::new().writes(5, 111).build();
    let mem_wb = MemWbBuilder::new().writes(5, 222).build();
    let fwd = ForwardingUnit::Enabled;

    assert_eq!(fwd.select(5, &ex_mem, &mem_wb), ForwardSource::ExMem);
    assert_eq!(fwd.operand(5, 0, &ex_mem, &mem_wb), 111);
}

#[test]
fn memory_writeback_forwards_the_selected_value() {
    let mem_wb = MemWbBuilder::new()
        .loaded(6, 0x0000_80FF, 0, MemWidth::Half, true)
        .build();
    let fwd = ForwardingUnit::Enabled;

    assert_eq!(
        fwd.select(6, &ExMemEntry::default(), &mem_wb),
        ForwardSource::MemWb
    );
    assert_eq!(
        fwd.operand(6, 0, &ExMemEntry::default(), &mem_wb),
        0xFFFF_80FF
    );
}

#[test]
fn jump_forwards_its_link_value() {
    let mem_wb = MemWbBuilder::new()
        .pc(0x40)
        .control(ControlSignals {
            reg_write: true,
            jump: true,
            ..ControlSignals::default()
        })
        .alu(0xDEAD)
        .build();
    let mem_wb = MemWbEntry { rd: 1, ..mem_wb };
    assert_eq!(
        ForwardingUnit::Enabled.operand(1, 0, &ExMemEntry::default(), &mem_wb),
        0x44
    );
}

#[test]
fn x0_is_never_forwarded() {
    let ex_mem = ExMemBuilder::new().writes(0, 5).build();
    let mem_wb = MemWbBuilder::new().writes(0, 6).build();
    assert_eq!(
        ForwardingUnit::Enabled.operand(0, 0, &ex_mem, &mem_wb),
        0
    );
}

#[test]
fn non_writing_or_invalid_bundles_do_not_forward() {
    let store = ExMemBuilder::new().store(0x100, 7, MemWidth::Word).build();
    let killed = MemWbBuilder::new()
        .writes(2, 9)
        .slot(Occupancy::Killed)
        .build();
    assert_eq!(
        ForwardingUnit::Enabled.operand(2, 3, &store, &killed),
        3
    );
}

#[test]
fn disabled_unit_always_reads_the_register_file() {
    let ex_mem = ExMemBuilder::new().writes(5, 111).build();
    let mem_wb = MemWbBuilder::new().writes(5, 222).build();
    assert_eq!(
        ForwardingUnit::Disabled.select(5, &ex_mem, &mem_wb),
        ForwardSource::RegFile
    );
    assert_eq!(ForwardingUnit::Disabled.operand(5, 42, &ex_mem, &mem_wb), 42);
}

#[test]
fn execute_select_per_operand() {
    let id_ex = IdExBuilder::new().rs1(1, 0).rs2(2, 0).build();
    let ex_mem = ExMemBuilder::new().writes(2, 1).build();
    let mem_wb = MemWbBuilder::new().writes(1, 1).build();
    assert_eq!(
        ForwardingUnit::Enabled.execute_select(&id_ex, &ex_mem, &mem_wb),
        ForwardSelect {
            a: ForwardSource::MemWb,
            b: ForwardSource::ExMem
        }
    );
}
