//! Variant selection and fail-fast construction.

use pretty_assertions::assert_eq;
use rstest::rstest;

use crate::common::builder::instruction::asm;
use crate::common::harness::TestContext;
use rvpipe_core::common::SimError;
use rvpipe_core::config::{Config, Variant};
use rvpipe_core::core::pipeline::forwarding::ForwardingUnit;
use rvpipe_core::core::pipeline::microarch::Microarch;
use rvpipe_core::core::units::bru::PredictorKind;
use rvpipe_core::sim::Simulator;

#[rstest]
#[case(Variant::NoForward, ForwardingUnit::Disabled, PredictorKind::Disabled)]
#[case(Variant::Forward, ForwardingUnit::Enabled, PredictorKind::Disabled)]
#[case(Variant::ForwardBtb, ForwardingUnit::Enabled, PredictorKind::Btb)]
#[case(Variant::ForwardCounter, ForwardingUnit::Enabled, PredictorKind::Counter)]
#[case(Variant::ForwardGshare, ForwardingUnit::Enabled, PredictorKind::GShare)]
fn variant_selects_strategies(
    #[case] variant: Variant,
    #[case] forwarding: ForwardingUnit,
    #[case] predictor: PredictorKind,
) {
    assert_eq!(Microarch::forwarding_for(variant), forwarding);
    assert_eq!(Microarch::predictor_for(variant), predictor);

    let ctx = TestContext::new(variant);
    assert_eq!(ctx.sim.cpu.microarch.forwarding, forwarding);
    assert_eq!(ctx.sim.cpu.microarch.predictor.kind(), predictor);
}

#[rstest]
fn every_tick_reports_the_variant_id(#[values(0, 1, 2, 3, 4)] id: u8) {
    let mut sim = Simulator::with_variant_id(&Config::default(), id).expect("supported id");
    sim.load_program(0, &[asm().nop().build(); 8])
        .expect("program fits in RAM");

    assert_eq!(sim.variant().id(), id);
    for _ in 0..5 {
        assert_eq!(sim.tick().variant, id);
    }
}

#[rstest]
fn unsupported_id_fails_before_simulation(#[values(5, 9, 255)] id: u8) {
    let err = Simulator::with_variant_id(&Config::default(), id).unwrap_err();
    assert!(matches!(err, SimError::UnsupportedVariant(got) if got == id));
}

#[test]
fn ids_and_names_are_stable() {
    let listed: Vec<(u8, &str)> = Variant::ALL.iter().map(|v| (v.id(), v.name())).collect();
    assert_eq!(
        listed,
        vec![
            (0, "no-forward"),
            (1, "forward"),
            (2, "forward-btb"),
            (3, "forward-counter"),
            (4, "forward-gshare"),
        ]
    );
}

#[test]
fn halted_core_keeps_reporting_its_variant() {
    let mut program = vec![asm().halt().build()];
    program.extend([asm().nop().build(); 4]);
    let mut ctx = TestContext::new(Variant::ForwardCounter).load_program(&program);
    let _ = ctx.run_until_halt();

    let after = ctx.step(2);
    assert!(after.iter().all(|r| r.halted && r.variant == 3));
}
