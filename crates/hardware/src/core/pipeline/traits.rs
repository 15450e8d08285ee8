//! Pipeline Latch Interface.
//!
//! Every bundle carried by a pipeline register implements [`PipelineLatch`], which is
//! what lets [`PipelineRegister`](super::register::PipelineRegister) apply the
//! flush / stall / advance contract without knowing the bundle's fields.

use crate::core::pipeline::signals::Occupancy;

/// A bundle held by a pipeline register.
pub trait PipelineLatch: Clone + Default {
    /// Slot state of the bundle.
    fn occupancy(&self) -> Occupancy;

    /// Program counter of the instruction (kept in bubbles for debugging).
    fn pc(&self) -> u32;

    /// Returns a bubble that remembers `pc` and nothing else.
    fn bubble_at(pc: u32) -> Self;

    /// Forces every side-effecting field of a bubble or killed bundle to its neutral value.
    ///
    /// Valid bundles are returned unchanged. Bubbles lose their operand values too.
    #[must_use]
    fn sanitized(self) -> Self;

    /// Checks if the latch holds no live instruction.
    fn is_empty(&self) -> bool {
        !self.occupancy().is_valid()
    }
}
