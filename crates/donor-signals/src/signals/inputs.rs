use super::bundle::SignalBundle;
use super::domain::{
    finite_or_zero, Archetype, CharityId, CharitySummary, ConfidenceTier, DimensionBreakdown,
    EvaluationRecord, EvaluationTrack, FitLevel,
};

const EVIDENCE_ALIASES: &[&str] = &[
    "evidence",
    "evidence_quality",
    "evidence_outcomes",
    "evidence_and_outcomes",
];
const FINANCIAL_HEALTH_ALIASES: &[&str] = &["financial_health", "financial_stability"];
const PROGRAM_ALIASES: &[&str] = &["program_efficiency", "program_expense_ratio"];
const GOVERNANCE_ALIASES: &[&str] = &[
    "governance",
    "governance_transparency",
    "governance_and_transparency",
];

/// Raw per-axis quantities consumed by the signal state classifier.
///
/// Missing data is already folded to ratio 0 / level `Low` by the time a value of this type
/// exists, so the classifiers never see gaps.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AxisInputs {
    pub evidence_ratio: f64,
    pub financial_ratio: f64,
    pub program_ratio: f64,
    pub donor_fit_level: FitLevel,
    pub alignment_score: f64,
    pub risk_deduction: f64,
    pub governance_ratio: f64,
}

/// Read-only view over anything the engine can derive signals for.
pub trait SignalSource {
    fn charity_id(&self) -> &CharityId;
    fn charity_name(&self) -> &str;
    fn overall_score(&self) -> Option<f64>;
    fn confidence(&self) -> Option<ConfidenceTier>;
    fn founded_year(&self) -> Option<i32>;
    fn evaluation_track(&self) -> EvaluationTrack;
    fn third_party_verified(&self) -> bool;
    fn tax_deductible(&self) -> bool;
    fn tags(&self) -> &[String];
    fn archetype(&self) -> Option<&Archetype>;
    fn precomputed_signals(&self) -> Option<&SignalBundle>;
    fn axis_inputs(&self) -> AxisInputs;

    /// Confidence with the missing case resolved to the most conservative tier.
    fn confidence_or_low(&self) -> ConfidenceTier {
        self.confidence().unwrap_or(ConfidenceTier::Low)
    }

    /// Overall score with missing or non-finite values treated as 0.
    fn score_or_zero(&self) -> f64 {
        self.overall_score().map(finite_or_zero).unwrap_or(0.0)
    }
}

fn component_ratio(dimension: Option<&DimensionBreakdown>, aliases: &[&str]) -> Option<f64> {
    dimension
        .and_then(|breakdown| breakdown.component(aliases))
        .map(|component| component.ratio())
}

fn first_ratio(
    impact: Option<&DimensionBreakdown>,
    alignment: Option<&DimensionBreakdown>,
    aliases: &[&str],
) -> f64 {
    component_ratio(impact, aliases)
        .or_else(|| component_ratio(alignment, aliases))
        .unwrap_or(0.0)
}

fn unit_ratio(value: Option<f64>) -> f64 {
    value.map(finite_or_zero).unwrap_or(0.0).clamp(0.0, 1.0)
}

fn deduction_magnitude(value: Option<f64>) -> f64 {
    value.map(finite_or_zero).unwrap_or(0.0).abs()
}

impl SignalSource for EvaluationRecord {
    fn charity_id(&self) -> &CharityId {
        &self.id
    }

    fn charity_name(&self) -> &str {
        &self.name
    }

    fn overall_score(&self) -> Option<f64> {
        self.overall_score
    }

    fn confidence(&self) -> Option<ConfidenceTier> {
        self.confidence
    }

    fn founded_year(&self) -> Option<i32> {
        self.founded_year
    }

    fn evaluation_track(&self) -> EvaluationTrack {
        self.evaluation_track
    }

    fn third_party_verified(&self) -> bool {
        self.third_party_verified
    }

    fn tax_deductible(&self) -> bool {
        self.tax_deductible
    }

    fn tags(&self) -> &[String] {
        &self.tags
    }

    fn archetype(&self) -> Option<&Archetype> {
        self.archetype.as_ref()
    }

    fn precomputed_signals(&self) -> Option<&SignalBundle> {
        self.precomputed_signals.as_ref()
    }

    fn axis_inputs(&self) -> AxisInputs {
        let impact = self.impact.as_ref();
        let alignment = self.alignment.as_ref();

        let program_ratio = match self.program_expense_ratio {
            Some(ratio) => unit_ratio(Some(ratio)),
            None => first_ratio(impact, alignment, PROGRAM_ALIASES),
        };

        AxisInputs {
            evidence_ratio: first_ratio(impact, alignment, EVIDENCE_ALIASES),
            financial_ratio: first_ratio(impact, alignment, FINANCIAL_HEALTH_ALIASES),
            program_ratio,
            donor_fit_level: self.donor_fit_level.unwrap_or_default(),
            alignment_score: alignment.map(DimensionBreakdown::total).unwrap_or(0.0),
            risk_deduction: deduction_magnitude(self.risk_deduction),
            governance_ratio: first_ratio(impact, alignment, GOVERNANCE_ALIASES),
        }
    }
}

impl SignalSource for CharitySummary {
    fn charity_id(&self) -> &CharityId {
        &self.id
    }

    fn charity_name(&self) -> &str {
        &self.name
    }

    fn overall_score(&self) -> Option<f64> {
        self.overall_score
    }

    fn confidence(&self) -> Option<ConfidenceTier> {
        self.confidence
    }

    fn founded_year(&self) -> Option<i32> {
        self.founded_year
    }

    fn evaluation_track(&self) -> EvaluationTrack {
        self.evaluation_track
    }

    fn third_party_verified(&self) -> bool {
        self.third_party_verified
    }

    fn tax_deductible(&self) -> bool {
        self.tax_deductible
    }

    fn tags(&self) -> &[String] {
        &self.tags
    }

    fn archetype(&self) -> Option<&Archetype> {
        self.archetype.as_ref()
    }

    fn precomputed_signals(&self) -> Option<&SignalBundle> {
        self.precomputed_signals.as_ref()
    }

    fn axis_inputs(&self) -> AxisInputs {
        let hints = &self.hints;
        AxisInputs {
            evidence_ratio: unit_ratio(hints.evidence_ratio),
            financial_ratio: unit_ratio(hints.financial_ratio),
            program_ratio: unit_ratio(hints.program_ratio),
            donor_fit_level: hints.donor_fit_level.unwrap_or_default(),
            alignment_score: hints.alignment_score.map(finite_or_zero).unwrap_or(0.0),
            risk_deduction: deduction_magnitude(self.risk_deduction),
            governance_ratio: unit_ratio(hints.governance_ratio),
        }
    }
}
