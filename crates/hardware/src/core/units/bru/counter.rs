//! Per-branch 2-bit saturating counter predictor.
//!
//! Each entry walks Strong-NT(00) → Weak-NT(01) → Weak-T(10) → Strong-T(11); a taken
//! outcome moves one step up, a not-taken outcome one step down, both saturating. The
//! high bit is the prediction. Tables reset to Weak-NT.
//!
//! Counters only predict direction, so a BTB supplies the target. A prediction is valid
//! when the counter says taken and the target is known.

use super::{BranchPredictor, Prediction, btb::Btb};

/// A 2-bit saturating counter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SaturatingCounter(u8);

impl SaturatingCounter {
    /// Strongly not-taken (`00`).
    pub const STRONG_NOT_TAKEN: Self = Self(0b00);
    /// Weakly not-taken (`01`), the reset state.
    pub const WEAK_NOT_TAKEN: Self = Self(0b01);
    /// Weakly taken (`10`).
    pub const WEAK_TAKEN: Self = Self(0b10);
    /// Strongly taken (`11`).
    pub const STRONG_TAKEN: Self = Self(0b11);

    /// Raw two-bit state.
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Prediction: the high bit.
    pub const fn predicts_taken(self) -> bool {
        self.0 & 0b10 != 0
    }

    /// Moves one step toward `11` on taken, toward `00` on not-taken.
    #[must_use]
    pub const fn step(self, taken: bool) -> Self {
        match (taken, self.0) {
            (true, 0b11) => self,
            (true, v) => Self(v + 1),
            (false, 0b00) => self,
            (false, v) => Self(v - 1),
        }
    }
}

impl Default for SaturatingCounter {
    fn default() -> Self {
        Self::WEAK_NOT_TAKEN
    }
}

/// Table of counters indexed by low PC bits.
#[derive(Clone, Debug)]
pub struct CounterPredictor {
    pht: Vec<SaturatingCounter>,
    mask: usize,
    btb: Btb,
}

impl CounterPredictor {
    /// Creates a predictor with `2^pht_bits` counters and a `btb_size`-entry target BTB.
    pub fn new(pht_bits: u32, btb_size: usize) -> Self {
        let size = 1usize << pht_bits;
        Self {
            pht: vec![SaturatingCounter::default(); size],
            mask: size - 1,
            btb: Btb::new(btb_size),
        }
    }

    const fn index(&self, pc: u32) -> usize {
        (pc >> 2) as usize & self.mask
    }

    /// Current counter state for the branch at `pc`.
    pub fn counter(&self, pc: u32) -> SaturatingCounter {
        self.pht.get(self.index(pc)).copied().unwrap_or_default()
    }
}

impl BranchPredictor for CounterPredictor {
    fn predict(&self, pc: u32) -> Prediction {
        if !self.counter(pc).predicts_taken() {
            return Prediction::NONE;
        }
        self.btb
            .lookup(pc)
            .map_or(Prediction::NONE, Prediction::taken)
    }

    fn update(&mut self, pc: u32, taken: bool, target: u32) {
        let idx = self.index(pc);
        if let Some(c) = self.pht.get_mut(idx) {
            *c = c.step(taken);
        }
        if taken {
            self.btb.update(pc, target);
        }
    }
}
