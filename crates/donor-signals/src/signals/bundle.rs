use serde::{Deserialize, Serialize};

/// Schema revision stamped on every bundle this crate produces.
pub const SIGNAL_SCHEMA_VERSION: u32 = 1;

/// Fallback reason recorded when a record carried no precomputed bundle.
pub const MISSING_UI_SIGNALS_V1: &str = "missing_ui_signals_v1";

/// Ordinal state for a single evidence axis. Ordering is `Limited < Moderate < Strong`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SignalState {
    Limited,
    Moderate,
    Strong,
}

impl SignalState {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Strong => "Strong",
            Self::Moderate => "Moderate",
            Self::Limited => "Limited",
        }
    }
}

/// The four evaluation axes carried in [`SignalStates`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalAxis {
    Evidence,
    FinancialHealth,
    DonorFit,
    Risk,
}

/// Exactly one state per axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SignalStates {
    pub evidence: SignalState,
    pub financial_health: SignalState,
    pub donor_fit: SignalState,
    pub risk: SignalState,
}

impl SignalStates {
    pub const fn get(&self, axis: SignalAxis) -> SignalState {
        match axis {
            SignalAxis::Evidence => self.evidence,
            SignalAxis::FinancialHealth => self.financial_health,
            SignalAxis::DonorFit => self.donor_fit,
            SignalAxis::Risk => self.risk,
        }
    }
}

/// Lifecycle stage of an organization's verifiable track record.
/// Ordering is `Early < Building < Established < Verified`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EvidenceStage {
    Early,
    Building,
    Established,
    Verified,
}

impl EvidenceStage {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Verified => "Verified",
            Self::Established => "Established",
            Self::Building => "Building",
            Self::Early => "Early",
        }
    }

    /// Verified or Established: enough track record to trust the score either way.
    pub const fn is_documented(self) -> bool {
        matches!(self, Self::Verified | Self::Established)
    }
}

/// Top-level qualitative verdict.
///
/// `Mixed Signals` and `Limited Match` are not ordered against each other, so this type has
/// no `Ord`. Ranking weighs cues through the relevance weights instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecommendationCue {
    #[serde(rename = "Strong Match")]
    StrongMatch,
    #[serde(rename = "Good Match")]
    GoodMatch,
    #[serde(rename = "Mixed Signals")]
    MixedSignals,
    #[serde(rename = "Limited Match")]
    LimitedMatch,
}

impl RecommendationCue {
    pub const fn label(self) -> &'static str {
        match self {
            Self::StrongMatch => "Strong Match",
            Self::GoodMatch => "Good Match",
            Self::MixedSignals => "Mixed Signals",
            Self::LimitedMatch => "Limited Match",
        }
    }

    /// Fixed rationale sentence; depends on the cue alone.
    pub const fn rationale(self) -> &'static str {
        match self {
            Self::StrongMatch => {
                "Strong results backed by high-confidence evidence and low risk."
            }
            Self::GoodMatch => {
                "Solid results with adequate evidence and manageable risk."
            }
            Self::MixedSignals => {
                "Some strengths, but evidence or risk factors warrant a closer look."
            }
            Self::LimitedMatch => {
                "Lower overall results or limited evidence relative to peers."
            }
        }
    }
}

/// Human-readable assessment derived from the cue and evidence stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssessmentLabel {
    #[serde(rename = "High Conviction")]
    HighConviction,
    #[serde(rename = "Promising")]
    Promising,
    #[serde(rename = "Context Dependent")]
    ContextDependent,
    #[serde(rename = "Well Documented Low Score")]
    WellDocumentedLowScore,
    #[serde(rename = "Limited Basis")]
    LimitedBasis,
}

impl AssessmentLabel {
    pub const fn label(self) -> &'static str {
        match self {
            Self::HighConviction => "High Conviction",
            Self::Promising => "Promising",
            Self::ContextDependent => "Context Dependent",
            Self::WellDocumentedLowScore => "Well Documented Low Score",
            Self::LimitedBasis => "Limited Basis",
        }
    }
}

/// Immutable donor-facing signal bundle for one charity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalBundle {
    pub schema_version: u32,
    pub config_version: String,
    pub config_hash: String,
    pub signal_states: SignalStates,
    pub evidence_stage: EvidenceStage,
    pub recommendation_cue: RecommendationCue,
    pub recommendation_rationale: String,
    pub assessment_label: AssessmentLabel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub archetype_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub archetype_label: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub used_fallback: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fallback_reasons: Vec<String>,
}
