use std::collections::HashMap;

use crate::models::{Candidate, ItemId, Source};

/// Blend weight of collaborative scores
pub const COLLABORATIVE_WEIGHT: f64 = 0.6;

/// Blend weight of content scores
pub const CONTENT_WEIGHT: f64 = 0.4;

/// Combines both warm-start signals per item
///
/// A source with no candidate for an item contributes nothing to its score. Output
/// keeps first-seen order: collaborative candidates, then content-only ones.
pub fn merge_candidates(collaborative: Vec<Candidate>, content: Vec<Candidate>) -> Vec<Candidate> {
    let mut merged: Vec<Candidate> = Vec::with_capacity(collaborative.len() + content.len());
    let mut positions: HashMap<ItemId, usize> = HashMap::new();

    let weighted = collaborative
        .into_iter()
        .map(|c| (c, COLLABORATIVE_WEIGHT, Source::Collaborative))
        .chain(content.into_iter().map(|c| (c, CONTENT_WEIGHT, Source::Content)));

    for (candidate, weight, source) in weighted {
        let contribution = candidate.score * weight;
        match positions.get(&candidate.item_id) {
            Some(&i) => {
                merged[i].score += contribution;
                merged[i].sources.insert(source);
            }
            None => {
                positions.insert(candidate.item_id, merged.len());
                merged.push(Candidate::new(candidate.item_id, contribution, source));
            }
        }
    }

    merged
}
