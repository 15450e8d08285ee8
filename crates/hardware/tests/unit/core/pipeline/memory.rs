//! Memory and Writeback stages.

use rstest::rstest;

use crate::common::builder::pipeline_state::{ExMemBuilder, MemWbBuilder};
use rvpipe_core::config::{AlignmentPolicy, Config};
use rvpipe_core::core::arch::RegWrite;
use rvpipe_core::core::pipeline::latches::{ExMemEntry, MemWbEntry};
use rvpipe_core::core::pipeline::signals::{ControlSignals, MemWidth, Occupancy};
use rvpipe_core::core::pipeline::stages::memory::{StoreOp, mem_stage};
use rvpipe_core::core::pipeline::stages::writeback::wb_stage;
use rvpipe_core::core::pipeline::traits::PipelineLatch;
use rvpipe_core::core::units::lsu::AccessFault;
use rvpipe_core::soc::System;
use rvpipe_core::soc::map::Region;

const HALT: u32 = 0xFFFF_FFF0;

fn system_with(addr: u32, words: &[u32]) -> System {
    let mut system = System::new(&Config::default()).expect("default config is valid");
    system
        .ram_mut()
        .load_words(addr, words)
        .expect("data fits in RAM");
    system
}

mod mem {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn byte_store_is_placed_in_its_lane() {
        let system = system_with(0, &[]);
        let ex_mem = ExMemBuilder::new().store(0x101, 0xAB, MemWidth::Byte).build();
        let r = mem_stage(&ex_mem, &system, AlignmentPolicy::Strict, false, false);

        assert_eq!(
            r.stores,
            [
                Some(StoreOp {
                    region: Region::Ram,
                    base: 0x100,
                    data: 0xAB00,
                    enable: 0b0010
                }),
                None
            ]
        );
        assert!(!r.stall);
    }

    #[test]
    fn load_keeps_word_and_offset() {
        let system = system_with(0x200, &[0x1234_5678]);
        let ex_mem = ExMemBuilder::new()
            .load(5, 0x202, MemWidth::Half, false)
            .build();
        let r = mem_stage(&ex_mem, &system, AlignmentPolicy::Strict, false, false);

        assert_eq!(r.entry.load_word, 0x1234_5678);
        assert_eq!(r.entry.load_offset, 2);
        assert_eq!(r.entry.wb_value(), 0x1234);
        assert_eq!(r.stores, [None, None]);
    }

    #[rstest]
    #[case(0x4000_0000, MemWidth::Word, AccessFault::Unmapped)]
    #[case(0x0000_0102, MemWidth::Word, AccessFault::Misaligned)]
    fn faulting_access_kills_the_instruction(
        #[case] addr: u32,
        #[case] width: MemWidth,
        #[case] fault: AccessFault,
    ) {
        let system = system_with(0, &[]);
        let ex_mem = ExMemBuilder::new().store(addr, 1, width).build();
        let r = mem_stage(&ex_mem, &system, AlignmentPolicy::Strict, false, false);

        assert_eq!(r.fault, Some(fault));
        assert_eq!(r.entry.slot, Occupancy::Killed);
        assert_eq!(r.stores, [None, None]);
    }

    #[test]
    fn split_load_takes_two_cycles() {
        let system = system_with(0x100, &[0x4433_2211, 0x8877_6655]);
        let ex_mem = ExMemBuilder::new()
            .load(5, 0x101, MemWidth::Word, true)
            .build();

        let first = mem_stage(&ex_mem, &system, AlignmentPolicy::Split, false, false);
        assert!(first.stall && first.split_busy);
        assert_eq!(first.entry.slot, Occupancy::Bubble);

        let second = mem_stage(&ex_mem, &system, AlignmentPolicy::Split, true, false);
        assert!(!second.stall && !second.split_busy);
        assert_eq!(second.entry.wb_value(), 0x5544_3322);
    }

    #[test]
    fn split_store_writes_both_words() {
        let system = system_with(0, &[]);
        let ex_mem = ExMemBuilder::new()
            .store(0x103, 0xBEEF, MemWidth::Half)
            .build();
        let r = mem_stage(&ex_mem, &system, AlignmentPolicy::Split, true, false);

        assert_eq!(
            r.stores,
            [
                Some(StoreOp {
                    region: Region::Ram,
                    base: 0x100,
                    data: 0xEF00_0000,
                    enable: 0b1000
                }),
                Some(StoreOp {
                    region: Region::Ram,
                    base: 0x104,
                    data: 0xBE,
                    enable: 0b0001
                }),
            ]
        );
    }

    #[test]
    fn halt_store_is_an_io_write() {
        let system = system_with(0, &[]);
        let ex_mem = ExMemBuilder::new().store(HALT, 0, MemWidth::Word).build();
        let r = mem_stage(&ex_mem, &system, AlignmentPolicy::Strict, false, false);
        assert_eq!(r.stores[0].map(|s| s.region), Some(Region::Halt));
    }

    #[rstest]
    #[case(HALT + 1, MemWidth::Byte)]
    #[case(HALT + 2, MemWidth::Half)]
    fn stores_beside_the_sentinel_are_refused(#[case] addr: u32, #[case] width: MemWidth) {
        let system = system_with(0, &[]);
        let ex_mem = ExMemBuilder::new().store(addr, 0, width).build();
        let r = mem_stage(&ex_mem, &system, AlignmentPolicy::Strict, false, false);

        assert_eq!(r.fault, Some(AccessFault::Unmapped));
        assert_eq!(r.entry.slot, Occupancy::Killed);
        assert_eq!(r.stores, [None, None]);
    }

    #[test]
    fn alu_results_pass_through() {
        let system = system_with(0, &[]);
        let ex_mem = ExMemBuilder::new().pc(0x40).writes(3, 99).build();
        let r = mem_stage(&ex_mem, &system, AlignmentPolicy::Strict, false, false);
        assert_eq!(r.entry.alu, 99);
        assert_eq!(r.entry.rd, 3);
        assert_eq!(r.entry.slot, Occupancy::Valid);
    }

    #[test]
    fn bubbles_stay_bubbles() {
        let system = system_with(0, &[]);
        let r = mem_stage(
            &ExMemEntry::bubble_at(0x40),
            &system,
            AlignmentPolicy::Strict,
            false,
            false,
        );
        assert_eq!(r.entry, MemWbEntry::bubble_at(0x40));
    }
}

mod writeback {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn writes_the_selected_value() {
        let mem_wb = MemWbBuilder::new()
            .loaded(4, 0xFF00_0000, 3, MemWidth::Byte, true)
            .build();
        let r = wb_stage(&mem_wb, HALT, false);
        assert_eq!(
            r.reg_write,
            Some(RegWrite {
                rd: 4,
                value: 0xFFFF_FFFF
            })
        );
        assert!(r.retired);
    }

    #[test]
    fn x0_destination_retires_without_a_write() {
        let mem_wb = MemWbBuilder::new().writes(0, 5).build();
        let r = wb_stage(&mem_wb, HALT, false);
        assert_eq!(r.reg_write, None);
        assert!(r.retired);
    }

    #[rstest]
    #[case(HALT, true)]
    #[case(HALT + 1, false)]
    #[case(HALT + 2, false)]
    #[case(HALT - 4, false)]
    #[case(0x100, false)]
    fn halt_sentinel_detection(#[case] addr: u32, #[case] halt: bool) {
        let mem_wb = MemWbBuilder::new()
            .control(ControlSignals {
                mem_write: true,
                width: MemWidth::Word,
                ..ControlSignals::default()
            })
            .alu(addr)
            .build();
        assert_eq!(wb_stage(&mem_wb, HALT, false).halt, halt);
    }

    #[test]
    fn load_from_halt_address_does_not_halt() {
        let mem_wb = MemWbBuilder::new()
            .loaded(1, 0, 0, MemWidth::Word, true)
            .alu(HALT)
            .build();
        assert!(!wb_stage(&mem_wb, HALT, false).halt);
    }

    #[test]
    fn branch_outcome_flags() {
        let mem_wb = MemWbBuilder::new()
            .control(ControlSignals {
                branch: true,
                mispredicted: true,
                ..ControlSignals::default()
            })
            .build();
        let r = wb_stage(&mem_wb, HALT, false);
        assert!(r.branch && r.mispredict);
    }

    #[rstest]
    fn empty_slots_commit_nothing(#[values(Occupancy::Bubble, Occupancy::Killed)] slot: Occupancy) {
        let mem_wb = MemWbBuilder::new().writes(5, 1).slot(slot).build();
        let r = wb_stage(&mem_wb, HALT, false);
        assert!(!r.retired);
        assert_eq!(r.reg_write, None);
    }
}
