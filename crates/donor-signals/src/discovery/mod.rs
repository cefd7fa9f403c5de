//! Preset matching, contextual toggle counts, and relevance ranking over derived signals.

mod catalog;
mod filter;
mod preset;
mod relevance;

#[cfg(test)]
mod tests;

use std::borrow::Cow;

pub use catalog::{default_intents, default_presets};
pub use filter::{filter_candidates, matches_all, resolve_active, toggle_counts, PresetToggleCount};
pub use preset::{CharityFlag, Preset, PresetGroup, PresetId, PresetPredicate};
pub use relevance::{
    rank_candidates, relevance_score, DonorIntent, RankedCandidate, RelevanceBreakdown,
    RelevanceQuery, SortMode,
};

use crate::signals::{derive_signals, DerivationContext, SignalBundle, SignalSource};

/// A charity paired with its resolved signal bundle, so signals are derived once per
/// ranking pass rather than once per predicate.
#[derive(Debug, Clone)]
pub struct Candidate<'a, S: ?Sized> {
    pub source: &'a S,
    pub signals: Cow<'a, SignalBundle>,
}

impl<'a, S> Candidate<'a, S>
where
    S: SignalSource + ?Sized,
{
    pub fn resolve(source: &'a S, ctx: &DerivationContext<'_>) -> Self {
        Self {
            source,
            signals: derive_signals(source, ctx),
        }
    }
}

pub fn resolve_candidates<'a, S>(sources: &'a [S], ctx: &DerivationContext<'_>) -> Vec<Candidate<'a, S>>
where
    S: SignalSource,
{
    sources
        .iter()
        .map(|source| Candidate::resolve(source, ctx))
        .collect()
}
