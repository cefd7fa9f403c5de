use serde::{Deserialize, Serialize};

use super::bundle::{AssessmentLabel, EvidenceStage, RecommendationCue, SignalState};
use super::domain::ConfidenceTier;
use super::thresholds::RecommendationThresholds;

/// Risk severity as seen by the cue rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskSeverity {
    Low,
    Moderate,
    High,
}

impl From<SignalState> for RiskSeverity {
    fn from(risk: SignalState) -> Self {
        match risk {
            SignalState::Strong => Self::Low,
            SignalState::Moderate => Self::Moderate,
            SignalState::Limited => Self::High,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CueInputs {
    pub overall_score: f64,
    pub confidence: ConfidenceTier,
    pub risk: RiskSeverity,
}

pub struct CueRule {
    pub name: &'static str,
    pub applies: fn(&CueInputs, &RecommendationThresholds) -> bool,
    pub cue: RecommendationCue,
}

/// Evaluated top to bottom. `Limited Match` is checked before anything else, so an input
/// that would also read as mixed resolves to `Limited Match`.
pub const CUE_RULES: &[CueRule] = &[
    CueRule {
        name: "below_limited_ceiling_or_low_confidence_high_risk",
        applies: |inputs, thresholds| {
            inputs.overall_score < thresholds.limited_match_ceiling
                || (inputs.confidence == ConfidenceTier::Low && inputs.risk == RiskSeverity::High)
        },
        cue: RecommendationCue::LimitedMatch,
    },
    CueRule {
        name: "strong_floor_high_confidence_low_risk",
        applies: |inputs, thresholds| {
            inputs.overall_score >= thresholds.strong_match_floor
                && inputs.confidence == ConfidenceTier::High
                && inputs.risk == RiskSeverity::Low
        },
        cue: RecommendationCue::StrongMatch,
    },
    CueRule {
        name: "good_floor_adequate_confidence_contained_risk",
        applies: |inputs, thresholds| {
            inputs.overall_score >= thresholds.good_match_floor
                && matches!(inputs.confidence, ConfidenceTier::High | ConfidenceTier::Medium)
                && matches!(inputs.risk, RiskSeverity::Low | RiskSeverity::Moderate)
        },
        cue: RecommendationCue::GoodMatch,
    },
    CueRule {
        name: "mixed",
        applies: |_, _| true,
        cue: RecommendationCue::MixedSignals,
    },
];

pub fn matching_cue_rule(
    inputs: &CueInputs,
    thresholds: &RecommendationThresholds,
) -> &'static CueRule {
    CUE_RULES
        .iter()
        .find(|rule| (rule.applies)(inputs, thresholds))
        .unwrap_or(&CUE_RULES[CUE_RULES.len() - 1])
}

pub fn classify_recommendation_cue(
    inputs: &CueInputs,
    thresholds: &RecommendationThresholds,
) -> RecommendationCue {
    matching_cue_rule(inputs, thresholds).cue
}

pub fn assessment_label(cue: RecommendationCue, stage: EvidenceStage) -> AssessmentLabel {
    match cue {
        // Good data, low outcome.
        RecommendationCue::LimitedMatch if stage.is_documented() => {
            AssessmentLabel::WellDocumentedLowScore
        }
        RecommendationCue::StrongMatch if stage.is_documented() => {
            AssessmentLabel::HighConviction
        }
        RecommendationCue::GoodMatch if stage != EvidenceStage::Early => {
            AssessmentLabel::Promising
        }
        RecommendationCue::MixedSignals => AssessmentLabel::ContextDependent,
        _ => AssessmentLabel::LimitedBasis,
    }
}
