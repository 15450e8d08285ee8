//! Branch predictors: BTB, 2-bit counters, gshare.

use pretty_assertions::assert_eq;
use rstest::rstest;

use rvpipe_core::config::PipelineConfig;
use rvpipe_core::core::units::bru::btb::{Btb, BtbPredictor};
use rvpipe_core::core::units::bru::counter::{CounterPredictor, SaturatingCounter};
use rvpipe_core::core::units::bru::disabled::DisabledPredictor;
use rvpipe_core::core::units::bru::gshare::GSharePredictor;
use rvpipe_core::core::units::bru::{
    BranchPredictor, BranchPredictorWrapper, Prediction, PredictorKind,
};

mod btb {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn miss_predicts_not_taken() {
        let bp = BtbPredictor::new(16);
        assert_eq!(bp.predict(0x40), Prediction::NONE);
    }

    #[test]
    fn taken_update_allocates_and_hits() {
        let mut bp = BtbPredictor::new(16);
        bp.update(0x40, true, 0x100);
        assert_eq!(bp.predict(0x40), Prediction::taken(0x100));
    }

    #[test]
    fn not_taken_update_does_not_allocate() {
        let mut bp = BtbPredictor::new(16);
        bp.update(0x40, false, 0x44);
        assert_eq!(bp.predict(0x40), Prediction::NONE);
    }

    #[test]
    fn aliasing_pc_fails_the_tag_check() {
        // 16 entries indexed by pc[5:2]: 0x40 and 0x80 share slot 0.
        let mut btb = Btb::new(16);
        btb.update(0x40, 0x100);
        assert_eq!(btb.lookup(0x80), None);

        btb.update(0x80, 0x200);
        assert_eq!(btb.lookup(0x80), Some(0x200));
        assert_eq!(btb.lookup(0x40), None, "replaced by the aliasing branch");
    }

    #[test]
    fn not_taken_keeps_existing_entry() {
        let mut bp = BtbPredictor::new(4);
        bp.update(0x8, true, 0x0);
        bp.update(0x8, false, 0xC);
        assert_eq!(bp.btb().lookup(0x8), Some(0x0));
        assert_eq!(bp.btb().len(), 4);
    }
}

mod counter {
    use super::*;
    use pretty_assertions::assert_eq;

    #[rstest]
    #[case(SaturatingCounter::STRONG_NOT_TAKEN, true, SaturatingCounter::WEAK_NOT_TAKEN)]
    #[case(SaturatingCounter::WEAK_NOT_TAKEN, true, SaturatingCounter::WEAK_TAKEN)]
    #[case(SaturatingCounter::WEAK_TAKEN, true, SaturatingCounter::STRONG_TAKEN)]
    #[case(SaturatingCounter::STRONG_TAKEN, true, SaturatingCounter::STRONG_TAKEN)]
    #[case(SaturatingCounter::STRONG_TAKEN, false, SaturatingCounter::WEAK_TAKEN)]
    #[case(SaturatingCounter::WEAK_TAKEN, false, SaturatingCounter::WEAK_NOT_TAKEN)]
    #[case(SaturatingCounter::WEAK_NOT_TAKEN, false, SaturatingCounter::STRONG_NOT_TAKEN)]
    #[case(SaturatingCounter::STRONG_NOT_TAKEN, false, SaturatingCounter::STRONG_NOT_TAKEN)]
    fn saturating_steps(
        #[case] from: SaturatingCounter,
        #[case] taken: bool,
        #[case] to: SaturatingCounter,
    ) {
        assert_eq!(from.step(taken), to);
    }

    #[test]
    fn repeated_taken_outcomes_saturate_from_reset() {
        let mut bp = CounterPredictor::new(4, 16);
        let seen: Vec<u8> = (0..4)
            .map(|_| {
                bp.update(0x20, true, 0x0);
                bp.counter(0x20).bits()
            })
            .collect();

        assert_eq!(seen, vec![0b10, 0b11, 0b11, 0b11]);
    }

    #[test]
    fn high_bit_is_the_prediction() {
        assert!(!SaturatingCounter::STRONG_NOT_TAKEN.predicts_taken());
        assert!(!SaturatingCounter::WEAK_NOT_TAKEN.predicts_taken());
        assert!(SaturatingCounter::WEAK_TAKEN.predicts_taken());
        assert!(SaturatingCounter::STRONG_TAKEN.predicts_taken());
        assert_eq!(SaturatingCounter::default().bits(), 0b01);
    }

    #[test]
    fn one_taken_outcome_flips_a_fresh_entry() {
        let mut bp = CounterPredictor::new(8, 16);
        assert_eq!(bp.predict(0x20), Prediction::NONE);

        bp.update(0x20, true, 0x10);
        assert_eq!(bp.counter(0x20), SaturatingCounter::WEAK_TAKEN);
        assert_eq!(bp.predict(0x20), Prediction::taken(0x10));

        bp.update(0x20, false, 0x24);
        assert_eq!(bp.predict(0x20), Prediction::NONE);
    }

    #[test]
    fn taken_counter_without_target_predicts_not_taken() {
        // Two entries share pht slot 0 but use different BTB slots.
        let mut bp = CounterPredictor::new(2, 16);
        bp.update(0x00, true, 0x80);
        assert!(bp.counter(0x10).predicts_taken());
        assert_eq!(bp.predict(0x10), Prediction::NONE);
    }
}

mod gshare {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn history_shifts_in_outcomes() {
        let mut bp = GSharePredictor::new(4, 16);
        bp.update(0x0, true, 0x40);
        bp.update(0x0, false, 0x4);
        bp.update(0x0, true, 0x40);
        assert_eq!(bp.history(), 0b101);
    }

    #[test]
    fn history_is_masked_to_table_width() {
        let mut bp = GSharePredictor::new(2, 16);
        for _ in 0..5 {
            bp.update(0x0, true, 0x40);
        }
        assert_eq!(bp.history(), 0b11);
    }

    #[test]
    fn index_mixes_pc_and_history() {
        let mut bp = GSharePredictor::new(4, 16);
        // ghr = 0: pc 0x8 trains slot 2.
        bp.update(0x8, true, 0x40);
        // ghr = 1: slot for 0x8 is now 3, still weakly not taken.
        assert_eq!(bp.history(), 1);
        assert_eq!(bp.counter(0x8), SaturatingCounter::WEAK_NOT_TAKEN);
        // pc 0xC with ghr = 1 maps to slot 2.
        assert_eq!(bp.counter(0xC), SaturatingCounter::WEAK_TAKEN);
    }

    #[test]
    fn training_uses_the_history_seen_at_fetch() {
        let mut bp = GSharePredictor::new(2, 16);
        let fetched = bp.history();
        assert_eq!(bp.counter(0x0), SaturatingCounter::WEAK_NOT_TAKEN);

        // An older branch (slot 2) resolves first and moves the history on.
        bp.update(0x48, true, 0x80);
        assert_eq!(bp.history(), 0b01);

        bp.update_with_history(0x0, true, 0x20, fetched);
        assert_eq!(bp.counter_with(0x0, fetched), SaturatingCounter::WEAK_TAKEN);
        assert_eq!(
            bp.counter_with(0x0, 0b01),
            SaturatingCounter::WEAK_NOT_TAKEN,
            "the slot for the later history stays untouched"
        );
        assert_eq!(bp.history(), 0b11);
    }

    #[test]
    fn wrapper_reports_history_only_for_gshare() {
        let config = PipelineConfig::default();
        let mut gshare = BranchPredictorWrapper::new(PredictorKind::GShare, &config);
        let mut counter = BranchPredictorWrapper::new(PredictorKind::Counter, &config);
        gshare.update(0x8, true, 0x40);
        counter.update(0x8, true, 0x40);

        assert_eq!(gshare.history(), 1);
        assert_eq!(counter.history(), 0);
    }

    #[test]
    fn prediction_needs_a_btb_target() {
        let mut bp = GSharePredictor::new(4, 16);
        bp.update(0x8, true, 0x40);
        // ghr = 1 now; pc 0xC hits the trained counter but has no BTB entry.
        assert_eq!(bp.predict(0xC), Prediction::NONE);
    }
}

#[test]
fn disabled_never_predicts() {
    let mut bp = DisabledPredictor;
    bp.update(0x10, true, 0x0);
    assert_eq!(bp.predict(0x10), Prediction::NONE);
}

#[rstest]
#[case(PredictorKind::Disabled)]
#[case(PredictorKind::Btb)]
#[case(PredictorKind::Counter)]
#[case(PredictorKind::GShare)]
fn wrapper_builds_requested_kind(#[case] kind: PredictorKind) {
    let bp = BranchPredictorWrapper::new(kind, &PipelineConfig::default());
    assert_eq!(bp.kind(), kind);
    assert_eq!(bp.predict(0x0), Prediction::NONE);
}
