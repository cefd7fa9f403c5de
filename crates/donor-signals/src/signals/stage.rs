use super::bundle::{EvidenceStage, SignalState};
use super::domain::{ConfidenceTier, EvaluationTrack};
use super::thresholds::EvidenceStageThresholds;

/// Everything the evidence stage rules look at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StageInputs {
    pub confidence: ConfidenceTier,
    pub years_operating: Option<i32>,
    /// Read by no rule. A new-organization track reaches `Early` only through the final
    /// rule, so confidence still decides for young organizations with strong data.
    pub evaluation_track: EvaluationTrack,
    pub third_party_verified: bool,
    pub evidence: SignalState,
}

/// One entry of the ordered decision list.
pub struct StageRule {
    pub name: &'static str,
    pub applies: fn(&StageInputs, &EvidenceStageThresholds) -> bool,
    pub stage: EvidenceStage,
}

/// Evaluated top to bottom; the first rule that applies decides. Rules overlap, so the
/// order is load-bearing. The last rule always applies.
pub const STAGE_RULES: &[StageRule] = &[
    StageRule {
        name: "high_confidence_mature_verified",
        applies: |inputs, thresholds| {
            inputs.confidence == ConfidenceTier::High
                && inputs
                    .years_operating
                    .is_some_and(|years| years >= thresholds.verified_min_years)
                && inputs.third_party_verified
        },
        stage: EvidenceStage::Verified,
    },
    StageRule {
        name: "high_confidence_or_medium_with_strong_evidence",
        applies: |inputs, _| {
            inputs.confidence == ConfidenceTier::High
                || (inputs.confidence == ConfidenceTier::Medium
                    && inputs.evidence == SignalState::Strong)
        },
        stage: EvidenceStage::Established,
    },
    StageRule {
        name: "medium_confidence",
        applies: |inputs, _| inputs.confidence == ConfidenceTier::Medium,
        stage: EvidenceStage::Building,
    },
    // Low confidence, new-organization tracks, and anything unmatched above.
    StageRule {
        name: "early",
        applies: |_, _| true,
        stage: EvidenceStage::Early,
    },
];

/// Name of the rule that decided `inputs`.
pub fn matching_stage_rule(
    inputs: &StageInputs,
    thresholds: &EvidenceStageThresholds,
) -> &'static StageRule {
    STAGE_RULES
        .iter()
        .find(|rule| (rule.applies)(inputs, thresholds))
        .unwrap_or(&STAGE_RULES[STAGE_RULES.len() - 1])
}

pub fn classify_evidence_stage(
    inputs: &StageInputs,
    thresholds: &EvidenceStageThresholds,
) -> EvidenceStage {
    matching_stage_rule(inputs, thresholds).stage
}
