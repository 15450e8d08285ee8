//! Microarchitecture selection.
//!
//! A [`Variant`] is resolved exactly once, at construction, into the two strategies that
//! differ between variants: whether bypass paths exist and which branch predictor Fetch
//! consults. Nothing in the per-cycle path looks at the variant id again.

use crate::config::{PipelineConfig, Variant};
use crate::core::pipeline::forwarding::ForwardingUnit;
use crate::core::units::bru::{BranchPredictorWrapper, PredictorKind};

/// The resolved per-variant strategies.
#[derive(Clone, Debug)]
pub struct Microarch {
    /// Variant this was built from, exposed on the debug outputs.
    pub variant: Variant,
    /// Bypass capability used by hazard detection and operand selection.
    pub forwarding: ForwardingUnit,
    /// Predictor consulted by Fetch and trained by Decode.
    pub predictor: BranchPredictorWrapper,
}

impl Microarch {
    /// Forwarding mode for `variant`.
    pub const fn forwarding_for(variant: Variant) -> ForwardingUnit {
        match variant {
            Variant::NoForward => ForwardingUnit::Disabled,
            _ => ForwardingUnit::Enabled,
        }
    }

    /// Predictor strategy for `variant`.
    pub const fn predictor_for(variant: Variant) -> PredictorKind {
        match variant {
            Variant::NoForward | Variant::Forward => PredictorKind::Disabled,
            Variant::ForwardBtb => PredictorKind::Btb,
            Variant::ForwardCounter => PredictorKind::Counter,
            Variant::ForwardGshare => PredictorKind::GShare,
        }
    }

    /// Builds the strategies for the configured variant.
    pub fn new(config: &PipelineConfig) -> Self {
        let variant = config.variant;
        Self {
            variant,
            forwarding: Self::forwarding_for(variant),
            predictor: BranchPredictorWrapper::new(Self::predictor_for(variant), config),
        }
    }
}
