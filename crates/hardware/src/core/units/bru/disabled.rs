//! Disabled predictor: Fetch always falls through to PC+4.

use super::{BranchPredictor, Prediction};

/// Predictor used by the no-forward and forward variants.
#[derive(Clone, Copy, Debug, Default)]
pub struct DisabledPredictor;

impl BranchPredictor for DisabledPredictor {
    fn predict(&self, _pc: u32) -> Prediction {
        Prediction::NONE
    }

    fn update(&mut self, _pc: u32, _taken: bool, _target: u32) {}
}
