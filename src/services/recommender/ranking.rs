use std::collections::HashMap;

use crate::models::{Candidate, Item, ItemId, RankedRecommendation};

/// Stable-sorts candidates by score, best first, and keeps the top `n`
pub fn rank(mut candidates: Vec<Candidate>, n: usize) -> Vec<Candidate> {
    candidates.sort_by(|a, b| b.score.total_cmp(&a.score));
    candidates.truncate(n);
    candidates
}

/// Attaches item details; candidates whose item no longer exists are dropped
pub fn enrich(candidates: Vec<Candidate>, items: &[Item]) -> Vec<RankedRecommendation> {
    let by_id: HashMap<ItemId, &Item> = items.iter().map(|item| (item.id, item)).collect();

    candidates
        .into_iter()
        .filter_map(|candidate| {
            let item = by_id.get(&candidate.item_id)?;
            Some(RankedRecommendation {
                item_id: candidate.item_id,
                score: candidate.score,
                source: candidate.source_label(),
                item: (*item).clone(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Source;

    #[test]
    fn test_rank_sorts_descending_and_truncates() {
        let ranked = rank(
            vec![
                Candidate::new(1, 0.2, Source::Content),
                Candidate::new(2, 0.9, Source::Content),
                Candidate::new(3, 0.5, Source::Serendipity),
                Candidate::new(4, 0.5, Source::Content),
            ],
            3,
        );
        let ids: Vec<ItemId> = ranked.iter().map(|c| c.item_id).collect();
        assert_eq!(ids, vec![2, 3, 4]);
    }

    #[test]
    fn test_enrich_drops_missing_items() {
        let items = vec![Item::new(1, "Laptop Stand Aluminum", "Electronics", 49.99)];
        let enriched = enrich(
            vec![
                Candidate::new(1, 0.9, Source::Popularity),
                Candidate::new(2, 0.8, Source::Popularity),
            ],
            &items,
        );

        assert_eq!(enriched.len(), 1);
        assert_eq!(enriched[0].item.name, "Laptop Stand Aluminum");
        assert_eq!(enriched[0].source, "popularity");
    }
}
