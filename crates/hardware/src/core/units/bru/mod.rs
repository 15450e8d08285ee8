//! Branch prediction unit (BRU) implementations.
//!
//! This module contains the four prediction strategies a variant can select:
//! disabled, BTB taken-on-hit, per-branch 2-bit counters, and gshare.

pub use self::branch_predictor::{BranchPredictor, Prediction};

/// Branch predictor trait and the prediction type.
pub mod branch_predictor;

/// Branch Target Buffer and the taken-on-hit predictor built on it.
pub mod btb;

/// 2-bit saturating counters and the per-branch counter predictor.
pub mod counter;

/// Always-fall-through predictor.
pub mod disabled;

/// Global history branch predictor (gshare algorithm).
pub mod gshare;

use self::{
    btb::BtbPredictor, counter::CounterPredictor, disabled::DisabledPredictor,
    gshare::GSharePredictor,
};
use crate::config::PipelineConfig;

/// Prediction strategy, derived from the microarchitecture variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PredictorKind {
    /// No prediction.
    Disabled,
    /// BTB taken-on-hit.
    Btb,
    /// Per-branch 2-bit counters.
    Counter,
    /// Counters indexed by PC XOR global history.
    GShare,
}

/// Enum wrapper for static dispatch of Branch Predictors.
/// This avoids vtable lookups in the critical fetch loop.
#[derive(Debug, Clone)]
pub enum BranchPredictorWrapper {
    /// Never predicts.
    Disabled(DisabledPredictor),
    /// BTB taken-on-hit.
    Btb(BtbPredictor),
    /// Per-branch 2-bit counters.
    Counter(CounterPredictor),
    /// gshare.
    GShare(GSharePredictor),
}

impl BranchPredictorWrapper {
    /// Creates the predictor for `kind`, sized from the pipeline configuration.
    pub fn new(kind: PredictorKind, config: &PipelineConfig) -> Self {
        let btb_size = config.btb_size;
        let pht_bits = config.pht_bits;

        match kind {
            PredictorKind::Disabled => Self::Disabled(DisabledPredictor),
            PredictorKind::Btb => Self::Btb(BtbPredictor::new(btb_size)),
            PredictorKind::Counter => Self::Counter(CounterPredictor::new(pht_bits, btb_size)),
            PredictorKind::GShare => Self::GShare(GSharePredictor::new(pht_bits, btb_size)),
        }
    }

    /// The strategy this wrapper dispatches to.
    pub const fn kind(&self) -> PredictorKind {
        match self {
            Self::Disabled(_) => PredictorKind::Disabled,
            Self::Btb(_) => PredictorKind::Btb,
            Self::Counter(_) => PredictorKind::Counter,
            Self::GShare(_) => PredictorKind::GShare,
        }
    }
}

impl BranchPredictor for BranchPredictorWrapper {
    #[inline(always)]
    fn predict(&self, pc: u32) -> Prediction {
        match self {
            Self::Disabled(bp) => bp.predict(pc),
            Self::Btb(bp) => bp.predict(pc),
            Self::Counter(bp) => bp.predict(pc),
            Self::GShare(bp) => bp.predict(pc),
        }
    }

    #[inline(always)]
    fn update(&mut self, pc: u32, taken: bool, target: u32) {
        match self {
            Self::Disabled(bp) => bp.update(pc, taken, target),
            Self::Btb(bp) => bp.update(pc, taken, target),
            Self::Counter(bp) => bp.update(pc, taken, target),
            Self::GShare(bp) => bp.update(pc, taken, target),
        }
    }

    #[inline(always)]
    fn history(&self) -> u32 {
        match self {
            Self::GShare(bp) => bp.history(),
            Self::Disabled(_) | Self::Btb(_) | Self::Counter(_) => 0,
        }
    }

    #[inline(always)]
    fn update_with_history(&mut self, pc: u32, taken: bool, target: u32, history: u32) {
        match self {
            Self::GShare(bp) => bp.update_with_history(pc, taken, target, history),
            _ => self.update(pc, taken, target),
        }
    }
}
