use std::borrow::Cow;

use chrono::{Datelike, Local};
use tracing::debug;

use super::bundle::{SignalBundle, MISSING_UI_SIGNALS_V1, SIGNAL_SCHEMA_VERSION};
use super::cue::{assessment_label, classify_recommendation_cue, CueInputs, RiskSeverity};
use super::domain::{CharitySummary, EvaluationRecord};
use super::inputs::SignalSource;
use super::stage::{classify_evidence_stage, StageInputs};
use super::states::classify_signal_states;
use super::thresholds::ThresholdConfig;

/// Explicit inputs shared by every derivation: the threshold table and the reference year
/// used for years-operating. Holding the year here keeps derivation reproducible.
#[derive(Debug, Clone, Copy)]
pub struct DerivationContext<'c> {
    pub config: &'c ThresholdConfig,
    pub as_of_year: i32,
}

impl<'c> DerivationContext<'c> {
    pub fn new(config: &'c ThresholdConfig, as_of_year: i32) -> Self {
        Self { config, as_of_year }
    }

    /// Context pinned to the current local calendar year.
    pub fn current(config: &'c ThresholdConfig) -> Self {
        Self::new(config, Local::now().year())
    }

    /// `None` when the founding year is unknown, later than the reference year, or so far
    /// back that the age does not fit in an `i32`.
    pub fn years_operating(&self, founded_year: Option<i32>) -> Option<i32> {
        founded_year
            .and_then(|founded| self.as_of_year.checked_sub(founded))
            .filter(|years| *years >= 0)
    }
}

/// Returns the record's precomputed bundle untouched when present, otherwise derives one
/// locally and marks it as a fallback.
pub fn derive_signals<'s, S>(source: &'s S, ctx: &DerivationContext<'_>) -> Cow<'s, SignalBundle>
where
    S: SignalSource + ?Sized,
{
    match source.precomputed_signals() {
        Some(bundle) => Cow::Borrowed(bundle),
        None => {
            let bundle = compute_fallback_bundle(source, ctx);
            debug!(
                charity_id = %source.charity_id(),
                config_version = %bundle.config_version,
                reasons = ?bundle.fallback_reasons,
                "derived fallback donor signals"
            );
            Cow::Owned(bundle)
        }
    }
}

pub fn derive_signals_from_charity<'s>(
    record: &'s EvaluationRecord,
    ctx: &DerivationContext<'_>,
) -> Cow<'s, SignalBundle> {
    derive_signals(record, ctx)
}

pub fn derive_signals_from_summary<'s>(
    summary: &'s CharitySummary,
    ctx: &DerivationContext<'_>,
) -> Cow<'s, SignalBundle> {
    derive_signals(summary, ctx)
}

fn compute_fallback_bundle<S>(source: &S, ctx: &DerivationContext<'_>) -> SignalBundle
where
    S: SignalSource + ?Sized,
{
    let thresholds = ctx.config.thresholds();
    let confidence = source.confidence_or_low();

    let signal_states = classify_signal_states(&source.axis_inputs(), thresholds);

    let evidence_stage = classify_evidence_stage(
        &StageInputs {
            confidence,
            years_operating: ctx.years_operating(source.founded_year()),
            evaluation_track: source.evaluation_track(),
            third_party_verified: source.third_party_verified(),
            evidence: signal_states.evidence,
        },
        &thresholds.evidence_stage,
    );

    let recommendation_cue = classify_recommendation_cue(
        &CueInputs {
            overall_score: source.score_or_zero(),
            confidence,
            risk: RiskSeverity::from(signal_states.risk),
        },
        &thresholds.recommendation,
    );

    let archetype = source.archetype();

    SignalBundle {
        schema_version: SIGNAL_SCHEMA_VERSION,
        config_version: ctx.config.version().to_string(),
        config_hash: ctx.config.hash().to_string(),
        signal_states,
        evidence_stage,
        recommendation_cue,
        recommendation_rationale: recommendation_cue.rationale().to_string(),
        assessment_label: assessment_label(recommendation_cue, evidence_stage),
        archetype_code: archetype.map(|archetype| archetype.code.clone()),
        archetype_label: archetype.map(|archetype| archetype.label.clone()),
        used_fallback: true,
        fallback_reasons: vec![MISSING_UI_SIGNALS_V1.to_string()],
    }
}
