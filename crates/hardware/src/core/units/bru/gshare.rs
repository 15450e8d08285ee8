//! GShare Branch Predictor.
//!
//! GShare correlates global branch history with the program counter using an XOR
//! hash. This allows the predictor to distinguish the same branch instruction
//! in different execution contexts.
//!
//! # Performance
//!
//! - **Time Complexity:** `predict()` and `update()` are O(1).
//! - **Space Complexity:** O(2^N) 2-bit counters for an N-bit history.
//! - **Best Case:** Correlated branches where outcome depends on recent history.
//! - **Worst Case:** Uncorrelated branches or history length too short for the pattern.

use super::{BranchPredictor, Prediction, btb::Btb, counter::SaturatingCounter};

/// GShare Predictor structure.
#[derive(Clone, Debug)]
pub struct GSharePredictor {
    /// Global History Register storing recent branch outcomes (newest in bit 0).
    ghr: u32,
    /// Pattern History Table containing 2-bit saturating counters.
    pht: Vec<SaturatingCounter>,
    /// Index and history mask.
    mask: u32,
    /// Target store for taken predictions.
    btb: Btb,
}

impl GSharePredictor {
    /// Creates a new GShare Predictor with `2^pht_bits` counters and a `pht_bits`-bit history.
    pub fn new(pht_bits: u32, btb_size: usize) -> Self {
        let size = 1usize << pht_bits;
        Self {
            ghr: 0,
            pht: vec![SaturatingCounter::default(); size],
            mask: (size - 1) as u32,
            btb: Btb::new(btb_size),
        }
    }

    /// Calculates the index into the Pattern History Table.
    ///
    /// Computes the XOR of the PC (shifted) and the Global History Register.
    const fn index(&self, pc: u32, history: u32) -> usize {
        (((pc >> 2) ^ history) & self.mask) as usize
    }

    /// Current global history.
    pub const fn history(&self) -> u32 {
        self.ghr
    }

    /// Counter the next prediction for `pc` would consult.
    pub fn counter(&self, pc: u32) -> SaturatingCounter {
        self.counter_with(pc, self.ghr)
    }

    /// Counter a prediction for `pc` made under `history` consults.
    pub fn counter_with(&self, pc: u32, history: u32) -> SaturatingCounter {
        self.pht
            .get(self.index(pc, history))
            .copied()
            .unwrap_or_default()
    }
}

impl BranchPredictor for GSharePredictor {
    fn predict(&self, pc: u32) -> Prediction {
        if !self.counter(pc).predicts_taken() {
            return Prediction::NONE;
        }
        self.btb
            .lookup(pc)
            .map_or(Prediction::NONE, Prediction::taken)
    }

    /// Trains against the current history. Use
    /// [`update_with_history`](BranchPredictor::update_with_history) when other branches
    /// may have resolved since the prediction was made.
    fn update(&mut self, pc: u32, taken: bool, target: u32) {
        self.update_with_history(pc, taken, target, self.ghr);
    }

    fn history(&self) -> u32 {
        self.ghr
    }

    /// Updates the counter the prediction read (selected by `history`), then shifts the
    /// outcome into the Global History Register.
    fn update_with_history(&mut self, pc: u32, taken: bool, target: u32, history: u32) {
        let idx = self.index(pc, history);
        if let Some(c) = self.pht.get_mut(idx) {
            *c = c.step(taken);
        }

        self.ghr = ((self.ghr << 1) | u32::from(taken)) & self.mask;

        if taken {
            self.btb.update(pc, target);
        }
    }
}
