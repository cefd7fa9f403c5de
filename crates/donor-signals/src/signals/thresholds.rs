//! Versioned threshold table shared by every classifier.
//!
//! Each table carries a `config_version` and a SHA-256 `config_hash` over a canonical
//! `group.field=value` encoding of its thresholds, so every derived bundle can be traced
//! back to the exact cutoffs that produced it.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;

/// Version label of the built-in table.
pub const DEFAULT_CONFIG_VERSION: &str = "v1";

#[derive(Debug, Error)]
pub enum ThresholdConfigError {
    #[error("threshold artifact is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("failed to read threshold artifact {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("config hash mismatch for {version}: artifact declares {declared}, thresholds hash to {computed}")]
    HashMismatch {
        version: String,
        declared: String,
        computed: String,
    },
    #[error("invalid threshold `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Cutoffs on the evidence component's score ratio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvidenceThresholds {
    pub strong_ratio: f64,
    pub moderate_ratio_min: f64,
}

impl Default for EvidenceThresholds {
    fn default() -> Self {
        Self {
            strong_ratio: 0.75,
            moderate_ratio_min: 0.5,
        }
    }
}

/// Cutoffs applied to both the financial-health ratio and the program ratio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialHealthThresholds {
    pub strong_min: f64,
    pub moderate_min: f64,
}

impl Default for FinancialHealthThresholds {
    fn default() -> Self {
        Self {
            strong_min: 0.7,
            moderate_min: 0.4,
        }
    }
}

/// Alignment-score cutoffs (points out of 50).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DonorFitThresholds {
    pub strong_alignment_min: f64,
    pub moderate_alignment_min: f64,
}

impl Default for DonorFitThresholds {
    fn default() -> Self {
        Self {
            strong_alignment_min: 38.0,
            moderate_alignment_min: 30.0,
        }
    }
}

/// Governance ratio cutoffs plus the deduction size at which risk turns `Limited`.
/// Deductions are magnitudes: a deduction of `deduction_limited_min` points or more is limiting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskThresholds {
    pub governance_strong_min: f64,
    pub governance_moderate_min: f64,
    pub deduction_limited_min: f64,
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self {
            governance_strong_min: 0.8,
            governance_moderate_min: 0.5,
            deduction_limited_min: 3.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvidenceStageThresholds {
    pub verified_min_years: i32,
}

impl Default for EvidenceStageThresholds {
    fn default() -> Self {
        Self {
            verified_min_years: 10,
        }
    }
}

/// Overall-score cutoffs (0-100) for the recommendation cue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationThresholds {
    pub limited_match_ceiling: f64,
    pub good_match_floor: f64,
    pub strong_match_floor: f64,
}

impl Default for RecommendationThresholds {
    fn default() -> Self {
        Self {
            limited_match_ceiling: 40.0,
            good_match_floor: 60.0,
            strong_match_floor: 75.0,
        }
    }
}

/// Additive relevance contributions used by purpose-match sorting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelevanceWeights {
    pub intent_max: f64,
    pub filter_match_per_preset: f64,
    pub filter_match_cap: f64,
    pub confidence_high: f64,
    pub confidence_medium: f64,
    pub cue_strong_match: f64,
    pub cue_good_match: f64,
    pub cue_mixed_signals: f64,
}

impl Default for RelevanceWeights {
    fn default() -> Self {
        Self {
            intent_max: 40.0,
            filter_match_per_preset: 5.0,
            filter_match_cap: 15.0,
            confidence_high: 10.0,
            confidence_medium: 5.0,
            cue_strong_match: 3.0,
            cue_good_match: 2.0,
            cue_mixed_signals: 1.0,
        }
    }
}

/// Named threshold groups. Groups omitted from an artifact take the built-in defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ThresholdGroups {
    #[serde(default)]
    pub evidence: EvidenceThresholds,
    #[serde(default)]
    pub financial_health: FinancialHealthThresholds,
    #[serde(default)]
    pub donor_fit: DonorFitThresholds,
    #[serde(default)]
    pub risk: RiskThresholds,
    #[serde(default)]
    pub evidence_stage: EvidenceStageThresholds,
    #[serde(default)]
    pub recommendation: RecommendationThresholds,
    #[serde(default)]
    pub relevance: RelevanceWeights,
}

impl ThresholdGroups {
    /// Stable `(field, value)` listing used for hashing and validation.
    fn canonical_fields(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("evidence.strong_ratio", self.evidence.strong_ratio),
            ("evidence.moderate_ratio_min", self.evidence.moderate_ratio_min),
            ("financial_health.strong_min", self.financial_health.strong_min),
            ("financial_health.moderate_min", self.financial_health.moderate_min),
            ("donor_fit.strong_alignment_min", self.donor_fit.strong_alignment_min),
            ("donor_fit.moderate_alignment_min", self.donor_fit.moderate_alignment_min),
            ("risk.governance_strong_min", self.risk.governance_strong_min),
            ("risk.governance_moderate_min", self.risk.governance_moderate_min),
            ("risk.deduction_limited_min", self.risk.deduction_limited_min),
            (
                "evidence_stage.verified_min_years",
                f64::from(self.evidence_stage.verified_min_years),
            ),
            (
                "recommendation.limited_match_ceiling",
                self.recommendation.limited_match_ceiling,
            ),
            ("recommendation.good_match_floor", self.recommendation.good_match_floor),
            ("recommendation.strong_match_floor", self.recommendation.strong_match_floor),
            ("relevance.intent_max", self.relevance.intent_max),
            ("relevance.filter_match_per_preset", self.relevance.filter_match_per_preset),
            ("relevance.filter_match_cap", self.relevance.filter_match_cap),
            ("relevance.confidence_high", self.relevance.confidence_high),
            ("relevance.confidence_medium", self.relevance.confidence_medium),
            ("relevance.cue_strong_match", self.relevance.cue_strong_match),
            ("relevance.cue_good_match", self.relevance.cue_good_match),
            ("relevance.cue_mixed_signals", self.relevance.cue_mixed_signals),
        ]
    }

    pub fn compute_hash(&self) -> String {
        let mut hasher = Sha256::new();
        for (field, value) in self.canonical_fields() {
            hasher.update(field.as_bytes());
            hasher.update(b"=");
            hasher.update(format!("{value:?}").as_bytes());
            hasher.update(b"\n");
        }
        format!("{:x}", hasher.finalize())
    }

    pub fn validate(&self) -> Result<(), ThresholdConfigError> {
        for (field, value) in self.canonical_fields() {
            if !value.is_finite() {
                return Err(invalid(field, "must be a finite number"));
            }
            if value < 0.0 {
                return Err(invalid(field, "must not be negative"));
            }
        }

        for (field, value) in [
            ("evidence.strong_ratio", self.evidence.strong_ratio),
            ("financial_health.strong_min", self.financial_health.strong_min),
            ("risk.governance_strong_min", self.risk.governance_strong_min),
        ] {
            if value > 1.0 {
                return Err(invalid(field, "ratios must lie within 0..=1"));
            }
        }

        ordered(
            "evidence.moderate_ratio_min",
            self.evidence.moderate_ratio_min,
            self.evidence.strong_ratio,
        )?;
        ordered(
            "financial_health.moderate_min",
            self.financial_health.moderate_min,
            self.financial_health.strong_min,
        )?;
        ordered(
            "donor_fit.moderate_alignment_min",
            self.donor_fit.moderate_alignment_min,
            self.donor_fit.strong_alignment_min,
        )?;
        ordered(
            "risk.governance_moderate_min",
            self.risk.governance_moderate_min,
            self.risk.governance_strong_min,
        )?;
        ordered(
            "recommendation.limited_match_ceiling",
            self.recommendation.limited_match_ceiling,
            self.recommendation.good_match_floor,
        )?;
        ordered(
            "recommendation.good_match_floor",
            self.recommendation.good_match_floor,
            self.recommendation.strong_match_floor,
        )?;

        if self.recommendation.strong_match_floor > 100.0 {
            return Err(invalid(
                "recommendation.strong_match_floor",
                "scores are on a 0-100 scale",
            ));
        }

        Ok(())
    }
}

fn invalid(field: &'static str, reason: &str) -> ThresholdConfigError {
    ThresholdConfigError::Invalid {
        field,
        reason: reason.to_string(),
    }
}

fn ordered(field: &'static str, lower: f64, upper: f64) -> Result<(), ThresholdConfigError> {
    if lower > upper {
        return Err(ThresholdConfigError::Invalid {
            field,
            reason: format!("{lower} exceeds the stronger cutoff {upper}"),
        });
    }
    Ok(())
}

fn read_artifact(path: &Path) -> Result<String, ThresholdConfigError> {
    fs::read_to_string(path).map_err(|source| ThresholdConfigError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// On-disk shape of a threshold artifact.
#[derive(Debug, Clone, Deserialize)]
pub struct ThresholdArtifact {
    pub config_version: String,
    #[serde(default)]
    pub config_hash: Option<String>,
    #[serde(flatten)]
    pub groups: ThresholdGroups,
}

/// Validated, hashed threshold table. Read-only once constructed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ThresholdArtifact")]
pub struct ThresholdConfig {
    config_version: String,
    config_hash: String,
    #[serde(flatten)]
    groups: ThresholdGroups,
}

impl ThresholdConfig {
    pub fn new(
        config_version: impl Into<String>,
        groups: ThresholdGroups,
    ) -> Result<Self, ThresholdConfigError> {
        groups.validate()?;
        let config_hash = groups.compute_hash();
        Ok(Self {
            config_version: config_version.into(),
            config_hash,
            groups,
        })
    }

    pub fn from_json(raw: &str) -> Result<Self, ThresholdConfigError> {
        let artifact: ThresholdArtifact = serde_json::from_str(raw)?;
        Self::try_from(artifact)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ThresholdConfigError> {
        Self::from_json(&read_artifact(path.as_ref())?)
    }

    /// Like [`ThresholdConfig::from_json`], but the artifact must declare the hash it was
    /// published with.
    pub fn from_json_pinned(raw: &str) -> Result<Self, ThresholdConfigError> {
        let artifact: ThresholdArtifact = serde_json::from_str(raw)?;
        if artifact.config_hash.is_none() {
            return Err(ThresholdConfigError::Invalid {
                field: "config_hash",
                reason: format!(
                    "artifact {} must declare its config hash",
                    artifact.config_version
                ),
            });
        }
        Self::try_from(artifact)
    }

    pub fn from_path_pinned(path: impl AsRef<Path>) -> Result<Self, ThresholdConfigError> {
        Self::from_json_pinned(&read_artifact(path.as_ref())?)
    }

    pub fn version(&self) -> &str {
        &self.config_version
    }

    pub fn hash(&self) -> &str {
        &self.config_hash
    }

    pub fn thresholds(&self) -> &ThresholdGroups {
        &self.groups
    }
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        let groups = ThresholdGroups::default();
        Self {
            config_version: DEFAULT_CONFIG_VERSION.to_string(),
            config_hash: groups.compute_hash(),
            groups,
        }
    }
}

impl TryFrom<ThresholdArtifact> for ThresholdConfig {
    type Error = ThresholdConfigError;

    fn try_from(artifact: ThresholdArtifact) -> Result<Self, Self::Error> {
        let config = Self::new(artifact.config_version, artifact.groups)?;
        if let Some(declared) = artifact.config_hash {
            if !declared.eq_ignore_ascii_case(&config.config_hash) {
                return Err(ThresholdConfigError::HashMismatch {
                    version: config.config_version,
                    declared,
                    computed: config.config_hash,
                });
            }
        }
        Ok(config)
    }
}
