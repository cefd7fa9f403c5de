use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::preset::{Preset, PresetId};
use super::Candidate;
use crate::signals::thresholds::RelevanceWeights;
use crate::signals::{ConfidenceTier, RecommendationCue, SignalSource};

/// A guided path: a named bundle of presets describing what the donor is after.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DonorIntent {
    pub id: String,
    pub label: String,
    pub preset_ids: Vec<PresetId>,
}

impl DonorIntent {
    /// Ids this intent names that the catalog does not define. They count toward neither
    /// side of the intent ratio.
    pub fn unknown_preset_ids<'i>(&'i self, catalog: &[Preset]) -> Vec<&'i PresetId> {
        self.preset_ids
            .iter()
            .filter(|id| !catalog.iter().any(|preset| &preset.id == *id))
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SortMode {
    #[default]
    PurposeMatch,
    Score,
    Name,
}

#[derive(Debug, Clone)]
pub struct RelevanceQuery<'p> {
    pub catalog: &'p [Preset],
    pub active: Vec<&'p Preset>,
    pub intent: Option<&'p DonorIntent>,
}

/// Independent, individually capped contributions to a candidate's relevance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Default)]
pub struct RelevanceBreakdown {
    pub intent: f64,
    pub filter_match: f64,
    pub confidence: f64,
    pub cue: f64,
    pub total: f64,
}

pub fn relevance_score<S>(
    candidate: &Candidate<'_, S>,
    query: &RelevanceQuery<'_>,
    weights: &RelevanceWeights,
) -> RelevanceBreakdown
where
    S: SignalSource + ?Sized,
{
    let intent = query
        .intent
        .map(|intent| intent_component(candidate, intent, query.catalog, weights))
        .unwrap_or(0.0);

    let matched_active = query
        .active
        .iter()
        .filter(|preset| preset.matches(candidate))
        .count();
    let filter_match =
        (matched_active as f64 * weights.filter_match_per_preset).min(weights.filter_match_cap);

    let confidence = match candidate.source.confidence_or_low() {
        ConfidenceTier::High => weights.confidence_high,
        ConfidenceTier::Medium => weights.confidence_medium,
        ConfidenceTier::Low => 0.0,
    };

    let cue = match candidate.signals.recommendation_cue {
        RecommendationCue::StrongMatch => weights.cue_strong_match,
        RecommendationCue::GoodMatch => weights.cue_good_match,
        RecommendationCue::MixedSignals => weights.cue_mixed_signals,
        RecommendationCue::LimitedMatch => 0.0,
    };

    RelevanceBreakdown {
        intent,
        filter_match,
        confidence,
        cue,
        total: intent + filter_match + confidence + cue,
    }
}

/// Share of the intent's presets the candidate satisfies, scaled into `0..=intent_max`.
fn intent_component<S>(
    candidate: &Candidate<'_, S>,
    intent: &DonorIntent,
    catalog: &[Preset],
    weights: &RelevanceWeights,
) -> f64
where
    S: SignalSource + ?Sized,
{
    let presets: Vec<&Preset> = catalog
        .iter()
        .filter(|preset| intent.preset_ids.contains(&preset.id))
        .collect();
    if presets.is_empty() {
        return 0.0;
    }

    let matched = presets
        .iter()
        .filter(|preset| preset.matches(candidate))
        .count();
    (matched as f64 / presets.len() as f64 * weights.intent_max).min(weights.intent_max)
}

#[derive(Debug, Clone)]
pub struct RankedCandidate<'c, 'a, S: ?Sized> {
    pub candidate: &'c Candidate<'a, S>,
    /// Present only under [`SortMode::PurposeMatch`].
    pub relevance: Option<RelevanceBreakdown>,
}

/// Sorts candidates by `mode`. Every mode finishes with the same tie-break chain (score
/// descending, name ascending, id ascending), so the input order never leaks through.
pub fn rank_candidates<'c, 'a, S>(
    candidates: Vec<&'c Candidate<'a, S>>,
    query: &RelevanceQuery<'_>,
    weights: &RelevanceWeights,
    mode: SortMode,
) -> Vec<RankedCandidate<'c, 'a, S>>
where
    S: SignalSource + ?Sized,
{
    if let (SortMode::PurposeMatch, Some(intent)) = (mode, query.intent) {
        for id in intent.unknown_preset_ids(query.catalog) {
            warn!(
                intent = %intent.id,
                preset_id = %id,
                "ignoring intent preset missing from the catalog"
            );
        }
    }

    let mut ranked: Vec<RankedCandidate<'c, 'a, S>> = candidates
        .into_iter()
        .map(|candidate| RankedCandidate {
            relevance: (mode == SortMode::PurposeMatch)
                .then(|| relevance_score(candidate, query, weights)),
            candidate,
        })
        .collect();

    ranked.sort_by(|left, right| {
        let primary = match mode {
            SortMode::PurposeMatch => {
                let left_total = left.relevance.map(|r| r.total).unwrap_or(0.0);
                let right_total = right.relevance.map(|r| r.total).unwrap_or(0.0);
                right_total.total_cmp(&left_total)
            }
            SortMode::Score => Ordering::Equal,
            SortMode::Name => left
                .candidate
                .source
                .charity_name()
                .cmp(right.candidate.source.charity_name()),
        };
        primary.then_with(|| tie_break(left.candidate.source, right.candidate.source))
    });

    ranked
}

fn tie_break<S>(left: &S, right: &S) -> Ordering
where
    S: SignalSource + ?Sized,
{
    right
        .score_or_zero()
        .total_cmp(&left.score_or_zero())
        .then_with(|| left.charity_name().cmp(right.charity_name()))
        .then_with(|| left.charity_id().cmp(right.charity_id()))
}
