//! Branch Target Buffer (BTB).
//!
//! The BTB is a direct-mapped table that stores target addresses for control flow
//! instructions. On its own it is a complete predictor: a hit predicts taken to the
//! stored target, a miss predicts not-taken. The counter-based predictors reuse the same
//! table purely as a target store.

use super::{BranchPredictor, Prediction};

/// An entry in the Branch Target Buffer.
#[derive(Clone, Copy, Debug, Default)]
struct BtbEntry {
    /// Full PC of the branch that owns this entry.
    tag: u32,
    /// The predicted target address.
    target: u32,
    /// Indicates if this entry contains valid data.
    valid: bool,
}

/// Branch Target Buffer structure.
#[derive(Clone, Debug)]
pub struct Btb {
    /// The table of BTB entries.
    table: Vec<BtbEntry>,
    /// Index mask (`size - 1`).
    mask: usize,
}

impl Btb {
    /// Creates a new Branch Target Buffer with the specified size.
    ///
    /// # Arguments
    ///
    /// * `size` - The number of entries in the BTB. Must be a power of 2
    ///   (enforced by `Config::validate`).
    pub fn new(size: usize) -> Self {
        let size = size.max(1);
        Self {
            table: vec![BtbEntry::default(); size],
            mask: size - 1,
        }
    }

    /// Shifts the PC right by 2 bits (instructions are word aligned) and masks it
    /// against the table size.
    const fn index(&self, pc: u32) -> usize {
        (pc >> 2) as usize & self.mask
    }

    /// Looks up a target address for the given program counter.
    ///
    /// # Returns
    ///
    /// The stored target if a valid entry exists and the tag matches, otherwise `None`.
    pub fn lookup(&self, pc: u32) -> Option<u32> {
        self.table
            .get(self.index(pc))
            .filter(|e| e.valid && e.tag == pc)
            .map(|e| e.target)
    }

    /// Inserts or replaces the entry for `pc`.
    pub fn update(&mut self, pc: u32, target: u32) {
        let idx = self.index(pc);
        if let Some(slot) = self.table.get_mut(idx) {
            *slot = BtbEntry {
                tag: pc,
                target,
                valid: true,
            };
        }
    }

    /// Number of entries in the table.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Always `false`; a BTB has at least one entry.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

/// Taken-on-hit predictor built on a [`Btb`].
#[derive(Clone, Debug)]
pub struct BtbPredictor {
    btb: Btb,
}

impl BtbPredictor {
    /// Creates a predictor with a `size`-entry BTB.
    pub fn new(size: usize) -> Self {
        Self { btb: Btb::new(size) }
    }

    /// Read access to the underlying table.
    pub const fn btb(&self) -> &Btb {
        &self.btb
    }
}

impl BranchPredictor for BtbPredictor {
    fn predict(&self, pc: u32) -> Prediction {
        self.btb
            .lookup(pc)
            .map_or(Prediction::NONE, Prediction::taken)
    }

    /// Only taken outcomes allocate. A not-taken resolution leaves any existing entry in
    /// place.
    fn update(&mut self, pc: u32, taken: bool, target: u32) {
        if taken {
            self.btb.update(pc, target);
        }
    }
}
