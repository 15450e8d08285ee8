//! Generic pipeline register.
//!
//! One implementation backs all four inter-stage registers. Each clock edge applies
//! exactly one transition, with priority **Flush > Stall > Advance**:
//!
//! | Transition | Result |
//! |------------|--------|
//! | Reset      | bubble, all fields zero |
//! | Flush      | bubble, side effects zeroed, PC kept for debugging |
//! | Stall      | bundle retained unchanged |
//! | Advance    | freshly computed bundle latched, sanitized if not valid |

use crate::core::pipeline::traits::PipelineLatch;

/// Transition applied to a pipeline register on a clock edge.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LatchControl {
    /// Latch the producing stage's output.
    #[default]
    Advance,
    /// Hold the current bundle.
    Stall,
    /// Replace the current bundle with a bubble.
    Flush,
}

impl LatchControl {
    /// Resolves raw flush and stall requests into one transition.
    ///
    /// # Examples
    ///
    /// ```
    /// use rvpipe_core::core::pipeline::register::LatchControl;
    ///
    /// assert_eq!(LatchControl::resolve(true, true), LatchControl::Flush);
    /// assert_eq!(LatchControl::resolve(false, true), LatchControl::Stall);
    /// assert_eq!(LatchControl::resolve(false, false), LatchControl::Advance);
    /// ```
    pub const fn resolve(flush: bool, stall: bool) -> Self {
        if flush {
            Self::Flush
        } else if stall {
            Self::Stall
        } else {
            Self::Advance
        }
    }
}

/// A pipeline register holding one bundle of type `T`.
#[derive(Clone, Debug, Default)]
pub struct PipelineRegister<T> {
    current: T,
}

impl<T: PipelineLatch> PipelineRegister<T> {
    /// Creates a register in its reset (bubble) state.
    pub fn new() -> Self {
        Self {
            current: T::default(),
        }
    }

    /// The bundle currently visible to the consuming stage.
    #[inline(always)]
    pub const fn get(&self) -> &T {
        &self.current
    }

    /// Applies one clock edge.
    ///
    /// `incoming` is the producing stage's output for this cycle; it is ignored unless
    /// `control` is [`LatchControl::Advance`].
    pub fn clock(&mut self, control: LatchControl, incoming: T) {
        match control {
            LatchControl::Flush => self.flush(),
            LatchControl::Stall => {}
            LatchControl::Advance => self.current = incoming.sanitized(),
        }
    }

    /// Replaces the bundle with a bubble, keeping only its PC.
    pub fn flush(&mut self) {
        self.current = T::bubble_at(self.current.pc());
    }

    /// Returns the register to its power-on state.
    pub fn reset(&mut self) {
        self.current = T::default();
    }

    /// Overwrites the bundle directly. Used by tests and state injection.
    pub fn set(&mut self, bundle: T) {
        self.current = bundle;
    }
}
