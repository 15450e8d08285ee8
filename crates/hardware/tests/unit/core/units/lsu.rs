//! Byte lanes, load extension and access planning.

use pretty_assertions::assert_eq;
use rstest::rstest;

use rvpipe_core::config::{AlignmentPolicy, MemoryConfig};
use rvpipe_core::core::pipeline::signals::MemWidth;
use rvpipe_core::core::units::lsu::unaligned::{SplitWrite, funnel_merge, split_store};
use rvpipe_core::core::units::lsu::{
    AccessFault, AccessPlan, byte_enable, extract_load, is_aligned, lane_mask, plan, store_lanes,
    word_align,
};
use rvpipe_core::soc::map::{AddressMap, Region};

fn map() -> AddressMap {
    AddressMap::new(&MemoryConfig::default())
}

#[rstest]
#[case(MemWidth::Byte, 0, 0b0001)]
#[case(MemWidth::Byte, 3, 0b1000)]
#[case(MemWidth::Half, 0, 0b0011)]
#[case(MemWidth::Half, 2, 0b1100)]
#[case(MemWidth::Word, 0, 0b1111)]
#[case(MemWidth::Nop, 1, 0b0000)]
fn byte_enables(#[case] width: MemWidth, #[case] offset: u32, #[case] enable: u8) {
    assert_eq!(byte_enable(width, offset), enable);
}

#[test]
fn lanes_and_masks() {
    assert_eq!(store_lanes(0xAB, 2), 0x00AB_0000);
    assert_eq!(lane_mask(0b0110), 0x00FF_FF00);
    assert_eq!(word_align(0x1007), (0x1004, 3));
    assert!(is_aligned(0x1002, MemWidth::Half));
    assert!(!is_aligned(0x1002, MemWidth::Word));
    assert!(is_aligned(0x1003, MemWidth::Byte));
}

#[rstest]
#[case(0x8081_8283, 0, MemWidth::Byte, true, 0xFFFF_FF83)]
#[case(0x8081_8283, 0, MemWidth::Byte, false, 0x83)]
#[case(0x8081_8283, 2, MemWidth::Half, true, 0xFFFF_8081)]
#[case(0x8081_8283, 2, MemWidth::Half, false, 0x8081)]
#[case(0x1234_5678, 1, MemWidth::Byte, true, 0x56)]
#[case(0x1234_5678, 0, MemWidth::Word, true, 0x1234_5678)]
fn load_extension(
    #[case] word: u32,
    #[case] offset: u32,
    #[case] width: MemWidth,
    #[case] signed: bool,
    #[case] value: u32,
) {
    assert_eq!(extract_load(word, offset, width, signed), value);
}

#[test]
fn aligned_plans_carry_region_and_offset() {
    assert_eq!(
        plan(&map(), AlignmentPolicy::Strict, 0x103, MemWidth::Byte),
        AccessPlan::Aligned {
            region: Region::Ram,
            base: 0x100,
            offset: 3
        }
    );
    assert_eq!(
        plan(&map(), AlignmentPolicy::Strict, 0xFFFF_0004, MemWidth::Word),
        AccessPlan::Aligned {
            region: Region::Io,
            base: 0xFFFF_0004,
            offset: 0
        }
    );
}

#[rstest]
#[case(AlignmentPolicy::Strict, 0x101, MemWidth::Word, AccessPlan::Fault(AccessFault::Misaligned))]
#[case(AlignmentPolicy::Strict, 0x103, MemWidth::Half, AccessPlan::Fault(AccessFault::Misaligned))]
#[case(AlignmentPolicy::Split, 0x102, MemWidth::Word, AccessPlan::Split { lo: 0x100, hi: 0x104, offset: 2 })]
#[case(AlignmentPolicy::Split, 0x103, MemWidth::Half, AccessPlan::Split { lo: 0x100, hi: 0x104, offset: 3 })]
#[case(AlignmentPolicy::Split, 0xFFFF_0001, MemWidth::Word, AccessPlan::Fault(AccessFault::Misaligned))]
#[case(AlignmentPolicy::Split, 0xFFFE, MemWidth::Word, AccessPlan::Fault(AccessFault::Unmapped))]
#[case(AlignmentPolicy::Split, 0x101, MemWidth::Half, AccessPlan::Aligned { region: Region::Ram, base: 0x100, offset: 1 })]
#[case(AlignmentPolicy::Split, 0xFFFD, MemWidth::Half, AccessPlan::Aligned { region: Region::Ram, base: 0xFFFC, offset: 1 })]
#[case(AlignmentPolicy::Split, 0xFFFF, MemWidth::Half, AccessPlan::Fault(AccessFault::Unmapped))]
#[case(AlignmentPolicy::Strict, 0xFFFD, MemWidth::Half, AccessPlan::Fault(AccessFault::Misaligned))]
#[case(AlignmentPolicy::Strict, 0x4000_0000, MemWidth::Byte, AccessPlan::Fault(AccessFault::Unmapped))]
fn misaligned_and_unmapped_plans(
    #[case] policy: AlignmentPolicy,
    #[case] addr: u32,
    #[case] width: MemWidth,
    #[case] expected: AccessPlan,
) {
    assert_eq!(plan(&map(), policy, addr, width), expected);
}

#[test]
fn funnel_merge_spans_two_words() {
    assert_eq!(funnel_merge(0x4433_2211, 0x8877_6655, 0), 0x4433_2211);
    assert_eq!(funnel_merge(0x4433_2211, 0x8877_6655, 1), 0x5544_3322);
    assert_eq!(funnel_merge(0x4433_2211, 0x8877_6655, 3), 0x7766_5544);
}

#[test]
fn split_store_partitions_lanes() {
    assert_eq!(
        split_store(0xAABB_CCDD, MemWidth::Word, 1),
        [
            SplitWrite {
                data: 0xBBCC_DD00,
                enable: 0b1110
            },
            SplitWrite {
                data: 0x0000_00AA,
                enable: 0b0001
            },
        ]
    );
    assert_eq!(
        split_store(0x1234, MemWidth::Half, 3),
        [
            SplitWrite {
                data: 0x3400_0000,
                enable: 0b1000
            },
            SplitWrite {
                data: 0x0000_0012,
                enable: 0b0001
            },
        ]
    );
}
