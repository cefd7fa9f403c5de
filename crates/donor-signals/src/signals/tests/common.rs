use crate::signals::domain::{
    Archetype, CharityId, ConfidenceTier, DimensionBreakdown, EvaluationRecord, EvaluationTrack,
    FitLevel, ScoreComponent,
};
use crate::signals::{DerivationContext, ThresholdConfig};

pub(super) const AS_OF_YEAR: i32 = 2025;

pub(super) fn config() -> ThresholdConfig {
    ThresholdConfig::default()
}

pub(super) fn context(config: &ThresholdConfig) -> DerivationContext<'_> {
    DerivationContext::new(config, AS_OF_YEAR)
}

pub(super) fn component(name: &str, points: f64, possible_points: f64) -> ScoreComponent {
    ScoreComponent {
        name: name.to_string(),
        points,
        possible_points,
        evidence: None,
        improvement_value: None,
        improvement_suggestion: None,
    }
}

pub(super) fn strong_record() -> EvaluationRecord {
    EvaluationRecord {
        id: CharityId("12-3456789".to_string()),
        name: "Clean Water Alliance".to_string(),
        overall_score: Some(82.0),
        confidence: Some(ConfidenceTier::High),
        impact: Some(DimensionBreakdown {
            score: Some(40.0),
            components: vec![
                component("Evidence & Outcomes", 18.0, 20.0),
                component("Financial Health", 9.0, 10.0),
                component("Program Efficiency", 8.0, 10.0),
            ],
        }),
        alignment: Some(DimensionBreakdown {
            score: Some(42.0),
            components: vec![
                component("Governance", 9.0, 10.0),
                component("Donor Fit", 33.0, 40.0),
            ],
        }),
        risk_deduction: Some(0.0),
        founded_year: Some(2010),
        evaluation_track: EvaluationTrack::Standard,
        third_party_verified: true,
        tax_deductible: true,
        program_expense_ratio: None,
        donor_fit_level: Some(FitLevel::High),
        tags: vec!["water_sanitation".to_string(), "health".to_string()],
        archetype: Some(Archetype {
            code: "DIRECT_SERVICE".to_string(),
            label: "Direct Service".to_string(),
        }),
        precomputed_signals: None,
    }
}

pub(super) fn new_org_record() -> EvaluationRecord {
    EvaluationRecord {
        id: CharityId("98-7654321".to_string()),
        name: "Seedling Literacy Project".to_string(),
        overall_score: Some(35.0),
        confidence: Some(ConfidenceTier::Low),
        impact: None,
        alignment: None,
        risk_deduction: None,
        founded_year: Some(AS_OF_YEAR),
        evaluation_track: EvaluationTrack::NewOrganization,
        third_party_verified: false,
        tax_deductible: true,
        program_expense_ratio: None,
        donor_fit_level: None,
        tags: vec!["education".to_string()],
        archetype: None,
        precomputed_signals: None,
    }
}

pub(super) fn documented_low_score_record() -> EvaluationRecord {
    EvaluationRecord {
        id: CharityId("55-0000012".to_string()),
        name: "Harbor Relief Fund".to_string(),
        overall_score: Some(32.0),
        founded_year: Some(AS_OF_YEAR - 12),
        ..strong_record()
    }
}

pub(super) fn empty_record() -> EvaluationRecord {
    EvaluationRecord {
        id: CharityId("00-0000000".to_string()),
        name: "Unknown".to_string(),
        overall_score: None,
        confidence: None,
        impact: None,
        alignment: None,
        risk_deduction: None,
        founded_year: None,
        evaluation_track: EvaluationTrack::Standard,
        third_party_verified: false,
        tax_deductible: false,
        program_expense_ratio: None,
        donor_fit_level: None,
        tags: Vec::new(),
        archetype: None,
        precomputed_signals: None,
    }
}
