//! End-to-end scenarios for signal derivation and discovery ranking, driven through the
//! public API with records shaped like the upstream JSON feed.

use std::collections::BTreeSet;

use donor_signals::discovery::{
    default_intents, default_presets, filter_candidates, matches_all, rank_candidates,
    resolve_active, resolve_candidates, toggle_counts, PresetId, RelevanceQuery, SortMode,
};
use donor_signals::signals::states::{classify_evidence, classify_risk};
use donor_signals::signals::{
    derive_signals_from_charity, AssessmentLabel, ConfidenceTier, DerivationContext,
    DimensionBreakdown, EvaluationRecord, EvidenceStage, RecommendationCue, ScoreComponent,
    SignalSource, ThresholdConfig,
};
use proptest::prelude::*;

const AS_OF_YEAR: i32 = 2025;

fn parse_records(raw: &str) -> Vec<EvaluationRecord> {
    serde_json::from_str(raw).expect("fixture records parse")
}

fn feed() -> Vec<EvaluationRecord> {
    parse_records(
        r#"[
        {
            "id": "20-1000001",
            "name": "Lakeshore Water Trust",
            "overall_score": 82,
            "confidence": "high",
            "risk_deduction": 0,
            "founded_year": 2010,
            "third_party_verified": true,
            "tax_deductible": true,
            "donor_fit_level": "HIGH",
            "tags": ["water_sanitation", "health"],
            "archetype": { "code": "DIRECT_SERVICE", "label": "Direct Service" },
            "impact": {
                "score": 41,
                "components": [
                    { "name": "Evidence Quality", "points": 17, "possible_points": 20, "evidence": "RCT published 2021" },
                    { "name": "Financial Health", "points": 9, "possible_points": 10 },
                    { "name": "Program Efficiency", "points": 8, "possible_points": 10, "improvement_value": 2, "improvement_suggestion": "Publish cost per beneficiary" }
                ]
            },
            "alignment": {
                "score": 41,
                "components": [ { "name": "Governance & Transparency", "points": 9, "possible_points": 10 } ]
            }
        },
        {
            "id": "20-1000002",
            "name": "First Light Tutoring",
            "overall_score": 31,
            "confidence": "LOW",
            "founded_year": 2025,
            "evaluation_track": "new_organization",
            "third_party_verified": false,
            "tax_deductible": true,
            "tags": ["education", "literacy"]
        },
        {
            "id": "20-1000003",
            "name": "Old Harbor Mission",
            "overall_score": 34,
            "confidence": "High",
            "risk_deduction": 0,
            "founded_year": 2013,
            "third_party_verified": true,
            "tax_deductible": true,
            "tags": ["poverty", "food_security"],
            "impact": {
                "components": [
                    { "name": "evidence", "points": 12, "possible_points": 20 },
                    { "name": "financial_health", "points": 5, "possible_points": 10 }
                ]
            },
            "alignment": {
                "components": [ { "name": "governance", "points": 9, "possible_points": 10 } ]
            }
        },
        {
            "id": "20-1000004",
            "name": "Brightpath Clinics",
            "overall_score": 66,
            "confidence": "MODERATE",
            "risk_deduction": 1,
            "founded_year": 1998,
            "third_party_verified": true,
            "program_expense_ratio": 0.82,
            "donor_fit_level": "moderate",
            "tags": ["health", "poverty"],
            "impact": {
                "components": [
                    { "name": "Evidence & Outcomes", "points": 16, "possible_points": 20 },
                    { "name": "Financial Stability", "points": 8, "possible_points": 10 }
                ]
            },
            "alignment": {
                "score": 33,
                "components": [ { "name": "Governance", "points": 7, "possible_points": 10 } ]
            }
        }
    ]"#,
    )
}

#[test]
fn strong_charity_scenario() {
    let config = ThresholdConfig::default();
    let ctx = DerivationContext::new(&config, AS_OF_YEAR);
    let records = feed();

    let bundle = derive_signals_from_charity(&records[0], &ctx);

    assert_eq!(bundle.evidence_stage, EvidenceStage::Verified);
    assert_eq!(bundle.recommendation_cue, RecommendationCue::StrongMatch);
    assert_eq!(bundle.assessment_label, AssessmentLabel::HighConviction);
}

#[test]
fn new_unverified_org_scenario() {
    let config = ThresholdConfig::default();
    let ctx = DerivationContext::new(&config, AS_OF_YEAR);
    let records = feed();

    let bundle = derive_signals_from_charity(&records[1], &ctx);

    assert_eq!(bundle.evidence_stage, EvidenceStage::Early);
    assert!(
        records[1].score_or_zero() < config.thresholds().recommendation.limited_match_ceiling
    );
    assert_eq!(bundle.recommendation_cue, RecommendationCue::LimitedMatch);
}

#[test]
fn well_documented_low_score_scenario() {
    let config = ThresholdConfig::default();
    let ctx = DerivationContext::new(&config, AS_OF_YEAR);
    let records = feed();

    let bundle = derive_signals_from_charity(&records[2], &ctx);

    assert!(matches!(
        bundle.evidence_stage,
        EvidenceStage::Verified | EvidenceStage::Established
    ));
    assert_eq!(bundle.recommendation_cue, RecommendationCue::LimitedMatch);
    assert_eq!(bundle.assessment_label, AssessmentLabel::WellDocumentedLowScore);
}

#[test]
fn bundle_serializes_with_stable_field_names() {
    let config = ThresholdConfig::default();
    let ctx = DerivationContext::new(&config, AS_OF_YEAR);
    let records = feed();

    let value = serde_json::to_value(derive_signals_from_charity(&records[3], &ctx))
        .expect("bundle serializes");

    assert_eq!(value["schema_version"], 1);
    assert_eq!(value["config_version"], "v1");
    assert_eq!(value["config_hash"], config.hash());
    assert_eq!(value["signal_states"]["evidence"], "Strong");
    assert_eq!(value["signal_states"]["financial_health"], "Strong");
    assert_eq!(value["signal_states"]["donor_fit"], "Moderate");
    assert_eq!(value["signal_states"]["risk"], "Moderate");
    assert_eq!(value["evidence_stage"], "Established");
    assert_eq!(value["recommendation_cue"], "Good Match");
    assert_eq!(value["assessment_label"], "Promising");
    assert_eq!(value["used_fallback"], true);
    assert_eq!(value["fallback_reasons"][0], "missing_ui_signals_v1");
    assert!(value.get("archetype_code").is_none());
}

#[test]
fn embedded_bundle_is_returned_verbatim() {
    let config = ThresholdConfig::default();
    let ctx = DerivationContext::new(&config, AS_OF_YEAR);
    let records = parse_records(
        r#"[{
            "id": "20-2000001",
            "name": "Precomputed Partners",
            "overall_score": 12,
            "confidence": "LOW",
            "ui_signals_v1": {
                "schema_version": 1,
                "config_version": "v0",
                "config_hash": "legacy",
                "signal_states": { "evidence": "Strong", "financial_health": "Strong", "donor_fit": "Strong", "risk": "Strong" },
                "evidence_stage": "Verified",
                "recommendation_cue": "Strong Match",
                "recommendation_rationale": "Curated upstream.",
                "assessment_label": "High Conviction"
            }
        }]"#,
    );

    let bundle = derive_signals_from_charity(&records[0], &ctx);

    assert_eq!(Some(&*bundle), records[0].precomputed_signals.as_ref());
    assert!(!bundle.used_fallback);
    assert!(bundle.fallback_reasons.is_empty());
    assert_eq!(bundle.recommendation_rationale, "Curated upstream.");
}

#[test]
fn browse_flow_filters_counts_and_ranks() {
    let config = ThresholdConfig::default();
    let ctx = DerivationContext::new(&config, AS_OF_YEAR);
    let records = feed();
    let candidates = resolve_candidates(&records, &ctx);
    let catalog = default_presets();
    let active_ids: BTreeSet<PresetId> = [PresetId::new("cause_health")].into_iter().collect();
    let active = resolve_active(&catalog, &active_ids);

    let visible = filter_candidates(&candidates, &active);
    assert_eq!(visible.len(), 2);

    let counts = toggle_counts(&candidates, &catalog, &active_ids);
    let health = counts
        .iter()
        .find(|count| count.preset_id == PresetId::new("cause_health"))
        .expect("health preset counted");
    assert!(health.active);
    assert_eq!(health.count_if_toggled, records.len());

    let intent = default_intents()
        .into_iter()
        .find(|intent| intent.id == "give_safely")
        .expect("built-in intent");
    let query = RelevanceQuery {
        catalog: &catalog,
        active,
        intent: Some(&intent),
    };
    let ranked = rank_candidates(
        visible,
        &query,
        &config.thresholds().relevance,
        SortMode::PurposeMatch,
    );

    let order: Vec<&str> = ranked
        .iter()
        .map(|ranked| ranked.candidate.source.charity_name())
        .collect();
    assert_eq!(order, vec!["Lakeshore Water Trust", "Brightpath Clinics"]);
    assert!(ranked[0].relevance.expect("purpose match scores").total
        > ranked[1].relevance.expect("purpose match scores").total);
}

fn confidence_strategy() -> impl Strategy<Value = Option<ConfidenceTier>> {
    prop_oneof![
        Just(None),
        Just(Some(ConfidenceTier::Low)),
        Just(Some(ConfidenceTier::Medium)),
        Just(Some(ConfidenceTier::High)),
    ]
}

prop_compose! {
    fn arb_record()(
        score in proptest::option::of(0.0f64..100.0),
        confidence in confidence_strategy(),
        evidence in 0.0f64..20.0,
        financial in 0.0f64..10.0,
        governance in 0.0f64..10.0,
        alignment in 0.0f64..50.0,
        deduction in proptest::option::of(0.0f64..10.0),
        founded in proptest::option::of(1950i32..2030),
        verified in any::<bool>(),
        tag_pick in 0usize..4,
    ) -> EvaluationRecord {
        let tags = ["health", "education", "poverty", "humanitarian"];
        EvaluationRecord {
            id: donor_signals::signals::CharityId(format!("prop-{tag_pick}")),
            name: "Generated".to_string(),
            overall_score: score,
            confidence,
            impact: Some(DimensionBreakdown {
                score: None,
                components: vec![
                    component("evidence", evidence, 20.0),
                    component("financial_health", financial, 10.0),
                ],
            }),
            alignment: Some(DimensionBreakdown {
                score: Some(alignment),
                components: vec![component("governance", governance, 10.0)],
            }),
            risk_deduction: deduction,
            founded_year: founded,
            evaluation_track: Default::default(),
            third_party_verified: verified,
            tax_deductible: verified,
            program_expense_ratio: Some(0.75),
            donor_fit_level: None,
            tags: vec![tags[tag_pick].to_string()],
            archetype: None,
            precomputed_signals: None,
        }
    }
}

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

proptest! {
    #[test]
    fn derivation_is_byte_identical(record in arb_record()) {
        let config = ThresholdConfig::default();
        let ctx = DerivationContext::new(&config, AS_OF_YEAR);

        let first = serde_json::to_vec(&derive_signals_from_charity(&record, &ctx)).expect("serializes");
        let second = serde_json::to_vec(&derive_signals_from_charity(&record, &ctx)).expect("serializes");

        prop_assert_eq!(first, second);
    }

    #[test]
    fn evidence_state_is_monotonic(low in 0.0f64..=1.0, high in 0.0f64..=1.0) {
        let (low, high) = if low <= high { (low, high) } else { (high, low) };
        let thresholds = ThresholdConfig::default().thresholds().evidence.clone();

        prop_assert!(classify_evidence(low, &thresholds) <= classify_evidence(high, &thresholds));
    }

    #[test]
    fn larger_deductions_never_improve_risk(
        small in 0.0f64..10.0,
        large in 0.0f64..10.0,
        governance in 0.0f64..=1.0,
    ) {
        let (small, large) = if small <= large { (small, large) } else { (large, small) };
        let thresholds = ThresholdConfig::default().thresholds().risk.clone();

        prop_assert!(classify_risk(large, governance, &thresholds) <= classify_risk(small, governance, &thresholds));
    }

    #[test]
    fn preset_pairs_combine_with_and(records in proptest::collection::vec(arb_record(), 1..8)) {
        let config = ThresholdConfig::default();
        let ctx = DerivationContext::new(&config, AS_OF_YEAR);
        let candidates = resolve_candidates(&records, &ctx);
        let catalog = default_presets();

        for first in &catalog {
            for second in &catalog {
                for candidate in &candidates {
                    prop_assert_eq!(
                        matches_all(candidate, &[first, second]),
                        first.matches(candidate) && second.matches(candidate)
                    );
                }
            }
        }
    }

    #[test]
    fn toggle_on_from_empty_matches_single_filter(records in proptest::collection::vec(arb_record(), 0..8)) {
        let config = ThresholdConfig::default();
        let ctx = DerivationContext::new(&config, AS_OF_YEAR);
        let candidates = resolve_candidates(&records, &ctx);
        let catalog = default_presets();

        let counts = toggle_counts(&candidates, &catalog, &BTreeSet::new());
        for (preset, count) in catalog.iter().zip(counts) {
            prop_assert_eq!(count.count_if_toggled, filter_candidates(&candidates, &[preset]).len());
        }
    }
}
