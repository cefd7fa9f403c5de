use std::collections::BTreeSet;

use crate::discovery::{resolve_candidates, Candidate, PresetId};
use crate::signals::domain::{
    Archetype, CharityId, ConfidenceTier, DimensionBreakdown, EvaluationRecord, EvaluationTrack,
    FitLevel, ScoreComponent,
};
use crate::signals::{DerivationContext, ThresholdConfig};

pub(super) const AS_OF_YEAR: i32 = 2025;

fn component(name: &str, points: f64, possible_points: f64) -> ScoreComponent {
    ScoreComponent {
        name: name.to_string(),
        points,
        possible_points,
        evidence: None,
        improvement_value: None,
        improvement_suggestion: None,
    }
}

fn record(id: &str, name: &str, score: f64, confidence: ConfidenceTier) -> EvaluationRecord {
    EvaluationRecord {
        id: CharityId(id.to_string()),
        name: name.to_string(),
        overall_score: Some(score),
        confidence: Some(confidence),
        impact: Some(DimensionBreakdown {
            score: None,
            components: vec![
                component("evidence", 16.0, 20.0),
                component("financial_health", 8.0, 10.0),
                component("program_efficiency", 8.0, 10.0),
            ],
        }),
        alignment: Some(DimensionBreakdown {
            score: Some(40.0),
            components: vec![component("governance", 9.0, 10.0)],
        }),
        risk_deduction: Some(0.0),
        founded_year: Some(2005),
        evaluation_track: EvaluationTrack::Standard,
        third_party_verified: true,
        tax_deductible: true,
        program_expense_ratio: None,
        donor_fit_level: Some(FitLevel::High),
        tags: Vec::new(),
        archetype: None,
        precomputed_signals: None,
    }
}

/// Five charities spanning causes, confidence tiers and tracks.
pub(super) fn records() -> Vec<EvaluationRecord> {
    let mut water = record("10-0000001", "Clean Water Alliance", 82.0, ConfidenceTier::High);
    water.tags = vec!["Water Sanitation".to_string(), "health".to_string()];
    water.archetype = Some(Archetype {
        code: "DIRECT_SERVICE".to_string(),
        label: "Direct Service".to_string(),
    });

    let mut relief = record("10-0000002", "Harbor Relief Fund", 64.0, ConfidenceTier::Medium);
    relief.tags = vec!["humanitarian".to_string(), "refugees".to_string()];
    relief.third_party_verified = false;
    relief.risk_deduction = Some(1.0);

    let mut literacy = record("10-0000003", "Seedling Literacy", 35.0, ConfidenceTier::Low);
    literacy.tags = vec!["education".to_string()];
    literacy.founded_year = Some(AS_OF_YEAR);
    literacy.evaluation_track = EvaluationTrack::NewOrganization;
    literacy.third_party_verified = false;
    literacy.impact = None;

    let mut clinic = record("10-0000004", "Northside Clinic", 64.0, ConfidenceTier::Medium);
    clinic.tags = vec!["medical".to_string(), "poverty".to_string()];
    clinic.risk_deduction = Some(1.0);
    clinic.tax_deductible = false;

    let mut food = record("10-0000005", "Community Food Bank", 77.0, ConfidenceTier::High);
    food.tags = vec!["food_security".to_string(), "poverty".to_string()];

    vec![water, relief, literacy, clinic, food]
}

pub(super) fn config() -> ThresholdConfig {
    ThresholdConfig::default()
}

pub(super) fn candidates<'a>(
    records: &'a [EvaluationRecord],
    config: &ThresholdConfig,
) -> Vec<Candidate<'a, EvaluationRecord>> {
    resolve_candidates(records, &DerivationContext::new(config, AS_OF_YEAR))
}

pub(super) fn ids(values: &[&str]) -> BTreeSet<PresetId> {
    values.iter().map(|value| PresetId::new(*value)).collect()
}
