use std::collections::BTreeSet;

use serde::Serialize;
use tracing::{trace, warn};

use super::preset::{Preset, PresetId};
use super::Candidate;
use crate::signals::SignalSource;

/// Count of results that would remain if one preset's active state were flipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PresetToggleCount {
    pub preset_id: PresetId,
    pub active: bool,
    pub count_if_toggled: usize,
}

/// Looks up active ids in the catalog, preserving catalog order. Unknown ids are skipped.
pub fn resolve_active<'p>(catalog: &'p [Preset], active: &BTreeSet<PresetId>) -> Vec<&'p Preset> {
    for id in active {
        if !catalog.iter().any(|preset| &preset.id == id) {
            warn!(preset_id = %id, "ignoring unknown active preset");
        }
    }

    presets_in(catalog, active)
}

fn presets_in<'p>(catalog: &'p [Preset], ids: &BTreeSet<PresetId>) -> Vec<&'p Preset> {
    catalog
        .iter()
        .filter(|preset| ids.contains(&preset.id))
        .collect()
}

/// AND across presets; an empty active set matches everything.
pub fn matches_all<S>(candidate: &Candidate<'_, S>, active: &[&Preset]) -> bool
where
    S: SignalSource + ?Sized,
{
    active.iter().all(|preset| {
        let matched = preset.matches(candidate);
        trace!(
            charity_id = %candidate.source.charity_id(),
            preset_id = %preset.id,
            matched,
            "evaluated preset"
        );
        matched
    })
}

pub fn filter_candidates<'c, 'a, S>(
    candidates: &'c [Candidate<'a, S>],
    active: &[&Preset],
) -> Vec<&'c Candidate<'a, S>>
where
    S: SignalSource + ?Sized,
{
    candidates
        .iter()
        .filter(|candidate| matches_all(*candidate, active))
        .collect()
}

/// For every catalog preset, re-applies the whole active set with exactly that preset
/// flipped and counts the survivors.
pub fn toggle_counts<S>(
    candidates: &[Candidate<'_, S>],
    catalog: &[Preset],
    active: &BTreeSet<PresetId>,
) -> Vec<PresetToggleCount>
where
    S: SignalSource + ?Sized,
{
    catalog
        .iter()
        .map(|preset| {
            let is_active = active.contains(&preset.id);
            let mut flipped = active.clone();
            if is_active {
                flipped.remove(&preset.id);
            } else {
                flipped.insert(preset.id.clone());
            }

            let flipped_presets = presets_in(catalog, &flipped);
            let count_if_toggled = candidates
                .iter()
                .filter(|candidate| matches_all(*candidate, &flipped_presets))
                .count();

            PresetToggleCount {
                preset_id: preset.id.clone(),
                active: is_active,
                count_if_toggled,
            }
        })
        .collect()
}
