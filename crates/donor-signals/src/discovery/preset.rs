use std::fmt;

use serde::{Deserialize, Serialize};

use super::Candidate;
use crate::signals::domain::normalize_key;
use crate::signals::{
    ConfidenceTier, EvaluationTrack, EvidenceStage, RecommendationCue, SignalAxis, SignalSource,
    SignalState,
};

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PresetId(pub String);

impl PresetId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }
}

impl fmt::Display for PresetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// UI grouping for presets; has no effect on matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PresetGroup {
    Cause,
    Evidence,
    Fit,
}

impl PresetGroup {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Cause => "Cause",
            Self::Evidence => "Evidence",
            Self::Fit => "Fit",
        }
    }
}

/// Boolean facts about a charity that presets can require.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CharityFlag {
    ThirdPartyVerified,
    NewOrganization,
    TaxDeductible,
}

fn default_expected() -> bool {
    true
}

/// A single condition inside a preset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PresetPredicate {
    /// Non-empty intersection between the charity's tags and `tags`.
    AnyTag { tags: Vec<String> },
    MinScore { min: f64 },
    Flag {
        flag: CharityFlag,
        #[serde(default = "default_expected")]
        expected: bool,
    },
    ConfidenceIn { tiers: Vec<ConfidenceTier> },
    SignalAtLeast { axis: SignalAxis, min: SignalState },
    EvidenceStageIn { stages: Vec<EvidenceStage> },
    CueIn { cues: Vec<RecommendationCue> },
    ArchetypeIn { codes: Vec<String> },
}

impl PresetPredicate {
    pub fn holds<S>(&self, candidate: &Candidate<'_, S>) -> bool
    where
        S: SignalSource + ?Sized,
    {
        let source = candidate.source;
        let signals = &candidate.signals;
        match self {
            Self::AnyTag { tags } => source.tags().iter().any(|have| {
                let have = normalize_key(have);
                tags.iter().any(|want| normalize_key(want) == have)
            }),
            Self::MinScore { min } => source
                .overall_score()
                .is_some_and(|score| score.is_finite() && score >= *min),
            Self::Flag { flag, expected } => {
                let actual = match flag {
                    CharityFlag::ThirdPartyVerified => source.third_party_verified(),
                    CharityFlag::NewOrganization => {
                        source.evaluation_track() == EvaluationTrack::NewOrganization
                    }
                    CharityFlag::TaxDeductible => source.tax_deductible(),
                };
                actual == *expected
            }
            Self::ConfidenceIn { tiers } => tiers.contains(&source.confidence_or_low()),
            Self::SignalAtLeast { axis, min } => signals.signal_states.get(*axis) >= *min,
            Self::EvidenceStageIn { stages } => stages.contains(&signals.evidence_stage),
            Self::CueIn { cues } => cues.contains(&signals.recommendation_cue),
            Self::ArchetypeIn { codes } => signals.archetype_code.as_deref().is_some_and(|code| {
                codes.iter().any(|want| want.eq_ignore_ascii_case(code))
            }),
        }
    }
}

/// Named filter a donor can toggle. Matches when every predicate holds; a preset with no
/// predicates matches everything.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preset {
    pub id: PresetId,
    pub label: String,
    pub group: PresetGroup,
    #[serde(default)]
    pub predicates: Vec<PresetPredicate>,
}

impl Preset {
    pub fn matches<S>(&self, candidate: &Candidate<'_, S>) -> bool
    where
        S: SignalSource + ?Sized,
    {
        self.predicates
            .iter()
            .all(|predicate| predicate.holds(candidate))
    }
}
