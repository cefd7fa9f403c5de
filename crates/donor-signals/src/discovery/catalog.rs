use super::preset::{CharityFlag, Preset, PresetGroup, PresetId, PresetPredicate};
use super::relevance::DonorIntent;
use crate::signals::{ConfidenceTier, EvidenceStage, RecommendationCue, SignalAxis, SignalState};

fn preset(id: &str, label: &str, group: PresetGroup, predicates: Vec<PresetPredicate>) -> Preset {
    Preset {
        id: PresetId::new(id),
        label: label.to_string(),
        group,
        predicates,
    }
}

fn any_tag(tags: &[&str]) -> PresetPredicate {
    PresetPredicate::AnyTag {
        tags: tags.iter().map(|tag| tag.to_string()).collect(),
    }
}

fn flag(flag: CharityFlag) -> PresetPredicate {
    PresetPredicate::Flag {
        flag,
        expected: true,
    }
}

/// Built-in presets offered by browse views.
pub fn default_presets() -> Vec<Preset> {
    vec![
        preset(
            "cause_humanitarian",
            "Humanitarian relief",
            PresetGroup::Cause,
            vec![any_tag(&["humanitarian", "disaster_relief", "refugees"])],
        ),
        preset(
            "cause_education",
            "Education",
            PresetGroup::Cause,
            vec![any_tag(&["education", "literacy"])],
        ),
        preset(
            "cause_health",
            "Health",
            PresetGroup::Cause,
            vec![any_tag(&["health", "medical", "water_sanitation"])],
        ),
        preset(
            "cause_poverty",
            "Poverty alleviation",
            PresetGroup::Cause,
            vec![any_tag(&["poverty", "food_security", "economic_development"])],
        ),
        preset(
            "proven_impact",
            "Proven impact",
            PresetGroup::Evidence,
            vec![
                PresetPredicate::EvidenceStageIn {
                    stages: vec![EvidenceStage::Verified, EvidenceStage::Established],
                },
                PresetPredicate::SignalAtLeast {
                    axis: SignalAxis::Evidence,
                    min: SignalState::Moderate,
                },
            ],
        ),
        preset(
            "independently_verified",
            "Independently verified",
            PresetGroup::Evidence,
            vec![flag(CharityFlag::ThirdPartyVerified)],
        ),
        preset(
            "high_confidence",
            "High-confidence data",
            PresetGroup::Evidence,
            vec![PresetPredicate::ConfidenceIn {
                tiers: vec![ConfidenceTier::High],
            }],
        ),
        preset(
            "top_rated",
            "Top rated",
            PresetGroup::Evidence,
            vec![PresetPredicate::MinScore { min: 75.0 }],
        ),
        preset(
            "strong_fit",
            "Strong or good match",
            PresetGroup::Fit,
            vec![PresetPredicate::CueIn {
                cues: vec![RecommendationCue::StrongMatch, RecommendationCue::GoodMatch],
            }],
        ),
        preset(
            "financially_sound",
            "Financially sound",
            PresetGroup::Fit,
            vec![PresetPredicate::SignalAtLeast {
                axis: SignalAxis::FinancialHealth,
                min: SignalState::Strong,
            }],
        ),
        preset(
            "low_risk",
            "Low risk",
            PresetGroup::Fit,
            vec![PresetPredicate::SignalAtLeast {
                axis: SignalAxis::Risk,
                min: SignalState::Strong,
            }],
        ),
        preset(
            "emerging_orgs",
            "Emerging organizations",
            PresetGroup::Fit,
            vec![flag(CharityFlag::NewOrganization)],
        ),
        preset(
            "tax_deductible",
            "Tax deductible",
            PresetGroup::Fit,
            vec![flag(CharityFlag::TaxDeductible)],
        ),
        preset(
            "direct_service",
            "Direct service",
            PresetGroup::Fit,
            vec![PresetPredicate::ArchetypeIn {
                codes: vec!["DIRECT_SERVICE".to_string()],
            }],
        ),
    ]
}

fn intent(id: &str, label: &str, preset_ids: &[&str]) -> DonorIntent {
    DonorIntent {
        id: id.to_string(),
        label: label.to_string(),
        preset_ids: preset_ids.iter().map(|id| PresetId::new(*id)).collect(),
    }
}

/// Built-in guided paths, each keyed to presets in [`default_presets`].
pub fn default_intents() -> Vec<DonorIntent> {
    vec![
        intent(
            "maximize_impact",
            "Maximize measurable impact",
            &["proven_impact", "top_rated", "high_confidence"],
        ),
        intent(
            "support_emerging",
            "Back emerging organizations",
            &["emerging_orgs", "strong_fit"],
        ),
        intent(
            "give_safely",
            "Give with low risk",
            &["independently_verified", "financially_sound", "low_risk"],
        ),
    ]
}
