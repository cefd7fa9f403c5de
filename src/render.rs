use donor_signals::discovery::Preset;
use donor_signals::signals::{ConfidenceTier, SignalBundle};

use crate::{RankResponse, SignalsEntry};

pub(crate) fn render_signals(entries: &[SignalsEntry<'_>]) {
    println!("Donor signals ({} charities)", entries.len());
    for entry in entries {
        println!("\n{} ({})", entry.name, entry.id);
        render_bundle(entry.confidence, entry.signals);
    }
}

pub(crate) fn render_rank(response: &RankResponse<'_>, catalog: &[Preset]) {
    println!(
        "Ranked charities (config {} / {})",
        response.config_version, response.config_hash
    );
    if let Some(intent) = response.intent {
        println!("Donor intent: {intent}");
    }
    if response.active_presets.is_empty() {
        println!("Active presets: none");
    } else {
        let active: Vec<String> = response
            .active_presets
            .iter()
            .map(|id| id.to_string())
            .collect();
        println!("Active presets: {}", active.join(", "));
    }

    if response.results.is_empty() {
        println!("\nNo charities match the active presets");
    } else {
        println!("\nResults ({})", response.total);
        for (position, entry) in response.results.iter().enumerate() {
            let score = entry
                .overall_score
                .map_or_else(|| "n/a".to_string(), |score| format!("{score:.0}"));
            match entry.relevance {
                Some(relevance) => println!(
                    "{}. {} ({}), score {score}, relevance {:.1}",
                    position + 1,
                    entry.name,
                    entry.id,
                    relevance.total
                ),
                None => println!(
                    "{}. {} ({}), score {score}",
                    position + 1,
                    entry.name,
                    entry.id
                ),
            }
            render_bundle(entry.confidence, entry.signals);
        }
    }

    println!("\nPresets");
    for count in &response.toggle_counts {
        let Some(preset) = catalog.iter().find(|preset| preset.id == count.preset_id) else {
            continue;
        };
        println!(
            "- [{}] {} ({}): {}, {} if toggled",
            preset.group.label(),
            preset.label,
            preset.id,
            if count.active { "on" } else { "off" },
            count.count_if_toggled
        );
    }
}

fn render_bundle(confidence: ConfidenceTier, bundle: &SignalBundle) {
    println!(
        "  {} | {} | evidence stage {} | confidence {}",
        bundle.recommendation_cue.label(),
        bundle.assessment_label.label(),
        bundle.evidence_stage.label(),
        confidence.label()
    );
    println!("  {}", bundle.recommendation_rationale);
    let states = &bundle.signal_states;
    println!(
        "  Evidence {} | Financial health {} | Donor fit {} | Risk {}",
        states.evidence.label(),
        states.financial_health.label(),
        states.donor_fit.label(),
        states.risk.label()
    );
    if bundle.used_fallback {
        println!(
            "  Derived locally ({})",
            bundle.fallback_reasons.join(", ")
        );
    }
}
