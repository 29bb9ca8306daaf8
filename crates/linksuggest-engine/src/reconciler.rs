//! Reconciliation: make entities and suggestions unique, then rank.
//!
//! Runs over every candidate of one cycle. The entity pass runs first so
//! that rankings reflect where each entity finally lands.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use linksuggest_core::{ScoredEntity, Suggestion, SuggestConfig, SuggestionId};

/// Entity pass followed by the suggestion pass.
#[must_use]
pub fn reconcile(mut suggestions: Vec<Suggestion>, config: &SuggestConfig) -> Vec<Suggestion> {
    make_entities_unique(&mut suggestions, config.containment_cutoff);
    make_suggestions_unique(suggestions, config.max_entities)
}

/// Give every entity identifier a single owner.
///
/// 1. A fuzzy match (similarity below `containment_cutoff`) is dropped when
///    its suggestion's text contains the entity's name verbatim
///    (case-sensitive).
/// 2. An identifier listed under several suggestions stays only with the
///    highest-scoring one; on a tie the first occurrence wins.
/// 3. Survivors are handed back to their owners in their original order.
pub fn make_entities_unique(suggestions: &mut [Suggestion], containment_cutoff: f64) {
    let owners: HashMap<SuggestionId, usize> = suggestions
        .iter()
        .enumerate()
        .map(|(i, s)| (s.id, i))
        .collect();

    let mut flat: Vec<(usize, ScoredEntity)> = Vec::new();
    for (i, suggestion) in suggestions.iter_mut().enumerate() {
        for entity in suggestion.entities.drain(..) {
            let owner = entity.owner.and_then(|id| owners.get(&id).copied()).unwrap_or(i);
            flat.push((owner, entity));
        }
    }

    flat.retain(|(owner, entity)| {
        let dominated = entity.similarity < containment_cutoff
            && suggestions[*owner].matched_text.contains(entity.display_name());
        if dominated {
            tracing::debug!(
                text = %suggestions[*owner].matched_text,
                entity = %entity.identifier(),
                "dropping fuzzy match contained in its text"
            );
        }
        !dominated
    });

    let mut survivors: Vec<Option<(usize, ScoredEntity)>> = Vec::with_capacity(flat.len());
    let mut best: HashMap<String, usize> = HashMap::new();
    for (owner, entity) in flat {
        let existing = best.get(entity.identifier()).copied();
        match existing {
            Some(slot) => {
                let current = survivors[slot]
                    .as_ref()
                    .map_or(f64::NEG_INFINITY, |(_, e)| e.similarity);
                if entity.similarity > current {
                    survivors[slot] = None;
                    best.insert(entity.identifier().to_string(), survivors.len());
                    survivors.push(Some((owner, entity)));
                }
            }
            None => {
                best.insert(entity.identifier().to_string(), survivors.len());
                survivors.push(Some((owner, entity)));
            }
        }
    }

    for (owner, mut entity) in survivors.into_iter().flatten() {
        entity.owner = Some(suggestions[owner].id);
        suggestions[owner].entities.push(entity);
    }
}

/// Drop repeated spans (first wins), rank suggestions by mean entity
/// similarity, rank and cap each suggestion's entities, and drop
/// suggestions left without entities.
#[must_use]
pub fn make_suggestions_unique(suggestions: Vec<Suggestion>, max_entities: usize) -> Vec<Suggestion> {
    let mut seen = HashSet::new();
    let mut unique: Vec<Suggestion> = suggestions
        .into_iter()
        .filter(|s| seen.insert(s.span()))
        .collect();

    unique.sort_by(|a, b| by_mean_desc(a.mean_similarity(), b.mean_similarity()));

    for suggestion in &mut unique {
        suggestion
            .entities
            .sort_by(|a, b| b.similarity.total_cmp(&a.similarity));
        suggestion.entities.truncate(max_entities);
    }

    unique.retain(|s| !s.entities.is_empty());
    unique
}

/// Descending, with suggestions that have no mean ranked last.
fn by_mean_desc(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.total_cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
