//! Donor signal derivation: turns a raw evaluation record into the small set of stable,
//! donor-legible signals shown alongside a charity.
//!
//! Every classifier takes its thresholds as an argument; nothing here reads ambient state.

mod aggregate;
pub mod bundle;
pub mod cue;
pub mod domain;
mod inputs;
pub mod stage;
pub mod states;
pub mod thresholds;

#[cfg(test)]
mod tests;

use std::borrow::Cow;

pub use aggregate::{
    derive_signals, derive_signals_from_charity, derive_signals_from_summary, DerivationContext,
};
pub use bundle::{
    AssessmentLabel, EvidenceStage, RecommendationCue, SignalAxis, SignalBundle, SignalState,
    SignalStates, MISSING_UI_SIGNALS_V1, SIGNAL_SCHEMA_VERSION,
};
pub use cue::RiskSeverity;
pub use domain::{
    Archetype, CharityId, CharitySummary, ConfidenceTier, DimensionBreakdown, EvaluationRecord,
    EvaluationTrack, FitLevel, ScoreComponent, SignalHints,
};
pub use inputs::{AxisInputs, SignalSource};
pub use thresholds::{ThresholdConfig, ThresholdConfigError, ThresholdGroups};

/// Owns a threshold table and reference year so callers can derive repeatedly without
/// threading both through every call.
#[derive(Debug, Clone)]
pub struct SignalEngine {
    config: ThresholdConfig,
    as_of_year: i32,
}

impl SignalEngine {
    pub fn new(config: ThresholdConfig, as_of_year: i32) -> Self {
        Self { config, as_of_year }
    }

    pub fn config(&self) -> &ThresholdConfig {
        &self.config
    }

    pub fn as_of_year(&self) -> i32 {
        self.as_of_year
    }

    pub fn context(&self) -> DerivationContext<'_> {
        DerivationContext::new(&self.config, self.as_of_year)
    }

    pub fn derive<'s, S>(&self, source: &'s S) -> Cow<'s, SignalBundle>
    where
        S: SignalSource + ?Sized,
    {
        derive_signals(source, &self.context())
    }
}
