//! Branch Predictor Interface.
//!
//! Fetch queries [`BranchPredictor::predict`] every cycle; Decode calls
//! [`BranchPredictor::update`] once for every branch or jump it resolves. Updates are
//! never rolled back, even if the trained instruction is later flushed.

/// A prediction made by Fetch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Prediction {
    /// Predicted next PC (meaningful only when `valid`).
    pub target: u32,
    /// The predictor has a taken prediction with a known target.
    pub valid: bool,
}

impl Prediction {
    /// No prediction: Fetch falls through to PC+4.
    pub const NONE: Self = Self {
        target: 0,
        valid: false,
    };

    /// A taken prediction to `target`.
    pub const fn taken(target: u32) -> Self {
        Self {
            target,
            valid: true,
        }
    }
}

/// Trait for branch prediction strategies.
pub trait BranchPredictor {
    /// Predicts the next PC for the instruction fetched at `pc`.
    fn predict(&self, pc: u32) -> Prediction;

    /// Trains the predictor with a resolved outcome.
    ///
    /// # Arguments
    ///
    /// * `pc` - Address of the branch or jump.
    /// * `taken` - Whether control transferred (always `true` for jumps).
    /// * `target` - The computed target address.
    fn update(&mut self, pc: u32, taken: bool, target: u32);

    /// Global history at prediction time. Fetch stores it with the fetched instruction so
    /// training reaches the entry the prediction read. History-free predictors return 0.
    fn history(&self) -> u32 {
        0
    }

    /// Trains the predictor using the `history` captured when the branch was fetched.
    fn update_with_history(&mut self, pc: u32, taken: bool, target: u32, _history: u32) {
        self.update(pc, taken, target);
    }
}
