use std::collections::HashMap;

use crate::models::{Candidate, Interaction, ItemId, Source};

/// Catalog-wide popularity ranking used for users without enough history
///
/// Score is `interaction count × mean interaction weight` per item. Items the user
/// already saw are not excluded. Returns at most `limit` candidates, best first.
pub fn popularity_candidates(interactions: &[Interaction], limit: usize) -> Vec<Candidate> {
    let mut stats: HashMap<ItemId, (usize, f64)> = HashMap::new();
    for interaction in interactions {
        let entry = stats.entry(interaction.item_id).or_insert((0, 0.0));
        entry.0 += 1;
        entry.1 += interaction.weight();
    }

    let mut ranked: Vec<(ItemId, usize, f64)> = stats
        .into_iter()
        .map(|(item_id, (count, total_weight))| {
            let mean_weight = total_weight / count as f64;
            (item_id, count, count as f64 * mean_weight)
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.2.total_cmp(&a.2)
            .then(b.1.cmp(&a.1))
            .then(a.0.cmp(&b.0))
    });

    ranked
        .into_iter()
        .take(limit)
        .map(|(item_id, _, score)| Candidate::new(item_id, score, Source::Popularity))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::InteractionKind;
    use chrono::Utc;

    fn interaction(user_id: i64, item_id: ItemId, kind: InteractionKind) -> Interaction {
        Interaction::new(0, user_id, item_id, kind, Utc::now())
    }

    #[test]
    fn test_scores_by_count_times_mean_weight() {
        let interactions = vec![
            interaction(1, 10, InteractionKind::View),
            interaction(2, 10, InteractionKind::View),
            interaction(3, 10, InteractionKind::View),
            interaction(1, 11, InteractionKind::Purchase),
            interaction(2, 12, InteractionKind::Cart),
        ];

        let candidates = popularity_candidates(&interactions, 10);
        let ranked: Vec<(ItemId, f64)> = candidates.iter().map(|c| (c.item_id, c.score)).collect();
        assert_eq!(ranked, vec![(11, 5.0), (10, 3.0), (12, 2.0)]);
        assert!(candidates.iter().all(|c| c.source_label() == "popularity"));
    }

    #[test]
    fn test_ties_prefer_more_interactions_then_lower_id() {
        let interactions = vec![
            interaction(1, 20, InteractionKind::Cart),
            interaction(1, 21, InteractionKind::View),
            interaction(2, 21, InteractionKind::View),
            interaction(1, 19, InteractionKind::Cart),
        ];

        let ids: Vec<ItemId> = popularity_candidates(&interactions, 10)
            .iter()
            .map(|c| c.item_id)
            .collect();
        assert_eq!(ids, vec![21, 19, 20]);
    }

    #[test]
    fn test_weight_follows_kind_not_stored_value() {
        let json = r#"[
            {"id":1,"user_id":1,"item_id":10,"kind":"purchase","weight":1.0,"timestamp":"2024-01-01T00:00:00Z"},
            {"id":2,"user_id":2,"item_id":10,"kind":"purchase","weight":1.0,"timestamp":"2024-01-01T00:00:00Z"}
        ]"#;
        let interactions: Vec<Interaction> = serde_json::from_str(json).unwrap();

        let candidates = popularity_candidates(&interactions, 10);
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].score, 10.0);
    }

    #[test]
    fn test_limit_is_respected() {
        let interactions: Vec<Interaction> = (0..20)
            .map(|i| interaction(1, i, InteractionKind::View))
            .collect();
        assert_eq!(popularity_candidates(&interactions, 5).len(), 5);
        assert!(popularity_candidates(&[], 5).is_empty());
    }
}
