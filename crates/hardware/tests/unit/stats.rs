//! Statistics counters and derived ratios.

use pretty_assertions::assert_eq;

use rvpipe_core::core::pipeline::signals::ControlSignals;
use rvpipe_core::stats::SimStats;

fn commit(stats: &mut SimStats, ctrl: ControlSignals) {
    stats.record_commit(&ctrl);
}

#[test]
fn commits_are_categorized() {
    let mut stats = SimStats::default();
    let none = ControlSignals::default();

    commit(&mut stats, ControlSignals { mem_read: true, reg_write: true, ..none });
    commit(&mut stats, ControlSignals { mem_write: true, ..none });
    commit(&mut stats, ControlSignals { branch: true, ..none });
    commit(&mut stats, ControlSignals { branch: true, mispredicted: true, ..none });
    commit(&mut stats, ControlSignals { jump: true, reg_write: true, ..none });
    commit(&mut stats, ControlSignals { reg_write: true, ..none });
    commit(&mut stats, none);

    assert_eq!(stats.instructions_retired, 7);
    assert_eq!(stats.inst_load, 1);
    assert_eq!(stats.inst_store, 1);
    assert_eq!(stats.inst_branch, 2);
    assert_eq!(stats.inst_jump, 1);
    assert_eq!(stats.inst_alu, 2);
    assert_eq!(stats.branch_predictions, 1);
    assert_eq!(stats.branch_mispredictions, 1);
}

#[test]
fn derived_ratios() {
    let mut stats = SimStats::default();
    stats.cycles = 200;
    stats.instructions_retired = 100;
    stats.branch_predictions = 3;
    stats.branch_mispredictions = 1;

    assert!((stats.ipc() - 0.5).abs() < f64::EPSILON);
    assert!((stats.cpi() - 2.0).abs() < f64::EPSILON);
    assert!((stats.prediction_accuracy() - 75.0).abs() < f64::EPSILON);
}

#[test]
fn empty_run_ratios_are_zero() {
    let stats = SimStats::default();
    assert_eq!(stats.ipc(), 0.0);
    assert_eq!(stats.cpi(), 0.0);
    assert_eq!(stats.prediction_accuracy(), 0.0);
}

#[test]
fn printing_selected_sections_does_not_panic() {
    let mut stats = SimStats::default();
    stats.cycles = 10;
    stats.instructions_retired = 4;
    stats.print_sections(&["branch".to_string(), "faults".to_string()]);
    stats.print();
}
