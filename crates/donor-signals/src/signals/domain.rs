use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use super::bundle::SignalBundle;

/// Identifier wrapper for evaluated charities (typically the EIN).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CharityId(pub String);

impl fmt::Display for CharityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// How much corroborating data exists for an evaluation.
///
/// Deserialization is lenient: case and common spelling variants are accepted and any
/// unrecognized value collapses to `Low`, the most conservative tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConfidenceTier {
    Low,
    Medium,
    High,
}

impl ConfidenceTier {
    pub fn parse_lenient(value: &str) -> Option<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            "HIGH" => Some(Self::High),
            "MEDIUM" | "MED" | "MODERATE" => Some(Self::Medium),
            "LOW" => Some(Self::Low),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::High => "HIGH",
            Self::Medium => "MEDIUM",
            Self::Low => "LOW",
        }
    }
}

impl<'de> Deserialize<'de> for ConfidenceTier {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw
            .as_deref()
            .and_then(Self::parse_lenient)
            .unwrap_or(Self::Low))
    }
}

/// Qualitative donor-fit level reported by the alignment rubric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FitLevel {
    #[default]
    Low,
    Moderate,
    High,
}

impl FitLevel {
    pub fn parse_lenient(value: &str) -> Option<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            "HIGH" => Some(Self::High),
            "MODERATE" | "MEDIUM" | "MED" => Some(Self::Moderate),
            "LOW" => Some(Self::Low),
            _ => None,
        }
    }
}

impl<'de> Deserialize<'de> for FitLevel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw
            .as_deref()
            .and_then(Self::parse_lenient)
            .unwrap_or_default())
    }
}

/// Evaluation track the rubric was applied under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum EvaluationTrack {
    #[default]
    Standard,
    NewOrganization,
}

impl EvaluationTrack {
    pub fn parse_lenient(value: &str) -> Self {
        match normalize_key(value).as_str() {
            "new_organization" | "new_org" | "new" | "emerging" => Self::NewOrganization,
            _ => Self::Standard,
        }
    }
}

impl<'de> Deserialize<'de> for EvaluationTrack {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw
            .as_deref()
            .map(Self::parse_lenient)
            .unwrap_or_default())
    }
}

/// Single rubric line item inside a dimension breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreComponent {
    pub name: String,
    #[serde(default)]
    pub points: f64,
    #[serde(default)]
    pub possible_points: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evidence: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub improvement_value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub improvement_suggestion: Option<String>,
}

impl ScoreComponent {
    /// Share of possible points earned, clamped to `0..=1`. Degenerate components yield 0.
    pub fn ratio(&self) -> f64 {
        if !self.possible_points.is_finite() || self.possible_points <= 0.0 {
            return 0.0;
        }
        finite_or_zero(self.points / self.possible_points).clamp(0.0, 1.0)
    }
}

/// Component breakdown for one of the two 50-point dimensions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct DimensionBreakdown {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    #[serde(default)]
    pub components: Vec<ScoreComponent>,
}

impl DimensionBreakdown {
    /// First component whose normalized name matches one of `aliases`.
    pub fn component(&self, aliases: &[&str]) -> Option<&ScoreComponent> {
        self.components.iter().find(|component| {
            let key = normalize_key(&component.name);
            aliases.iter().any(|alias| *alias == key)
        })
    }

    /// Explicit dimension score, or the sum of component points when absent.
    pub fn total(&self) -> f64 {
        match self.score {
            Some(score) => finite_or_zero(score),
            None => self
                .components
                .iter()
                .map(|component| finite_or_zero(component.points))
                .sum(),
        }
    }
}

/// Organization-type classification carried through to the bundle untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Archetype {
    pub code: String,
    pub label: String,
}

/// Full evaluation record as supplied by the data-loading layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationRecord {
    pub id: CharityId,
    pub name: String,
    #[serde(default)]
    pub overall_score: Option<f64>,
    #[serde(default)]
    pub confidence: Option<ConfidenceTier>,
    #[serde(default)]
    pub impact: Option<DimensionBreakdown>,
    #[serde(default)]
    pub alignment: Option<DimensionBreakdown>,
    #[serde(default)]
    pub risk_deduction: Option<f64>,
    #[serde(default)]
    pub founded_year: Option<i32>,
    #[serde(default)]
    pub evaluation_track: EvaluationTrack,
    #[serde(default)]
    pub third_party_verified: bool,
    #[serde(default)]
    pub tax_deductible: bool,
    #[serde(default)]
    pub program_expense_ratio: Option<f64>,
    #[serde(default)]
    pub donor_fit_level: Option<FitLevel>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub archetype: Option<Archetype>,
    #[serde(
        default,
        rename = "ui_signals_v1",
        skip_serializing_if = "Option::is_none"
    )]
    pub precomputed_signals: Option<SignalBundle>,
}

/// Raw axis quantities a listing summary may carry in place of a full breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SignalHints {
    #[serde(default)]
    pub evidence_ratio: Option<f64>,
    #[serde(default)]
    pub financial_ratio: Option<f64>,
    #[serde(default)]
    pub program_ratio: Option<f64>,
    #[serde(default)]
    pub governance_ratio: Option<f64>,
    #[serde(default)]
    pub alignment_score: Option<f64>,
    #[serde(default)]
    pub donor_fit_level: Option<FitLevel>,
}

/// Lighter listing shape used by browse views.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharitySummary {
    pub id: CharityId,
    pub name: String,
    #[serde(default)]
    pub overall_score: Option<f64>,
    #[serde(default)]
    pub confidence: Option<ConfidenceTier>,
    #[serde(default)]
    pub risk_deduction: Option<f64>,
    #[serde(default)]
    pub founded_year: Option<i32>,
    #[serde(default)]
    pub evaluation_track: EvaluationTrack,
    #[serde(default)]
    pub third_party_verified: bool,
    #[serde(default)]
    pub tax_deductible: bool,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub archetype: Option<Archetype>,
    #[serde(default)]
    pub hints: SignalHints,
    #[serde(
        default,
        rename = "ui_signals_v1",
        skip_serializing_if = "Option::is_none"
    )]
    pub precomputed_signals: Option<SignalBundle>,
}

/// Lowercases and collapses runs of non-alphanumerics into `_` so labels like
/// "Evidence & Outcomes" and "evidence_and_outcomes" compare equal.
pub(crate) fn normalize_key(value: &str) -> String {
    let mut key = String::with_capacity(value.len());
    let mut pending_separator = false;
    for ch in value.trim().chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_separator && !key.is_empty() {
                key.push('_');
            }
            pending_separator = false;
            key.push(ch.to_ascii_lowercase());
        } else {
            pending_separator = true;
        }
    }
    key
}

pub(crate) fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}
