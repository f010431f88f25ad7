use std::collections::BTreeMap;

use crate::models::{Candidate, Interaction, ItemId, Source, UserId};

use super::matrix::UserItemMatrix;
use super::similarity::sparse_cosine;

/// Neighbours whose votes are counted
pub const NEIGHBOR_COUNT: usize = 10;

/// User-based collaborative filtering
///
/// Scores every item the target has not touched by the weighted votes of the
/// `NEIGHBOR_COUNT` users most similar to them. Candidates come out in item id order.
pub fn collaborative_candidates(user_id: UserId, interactions: &[Interaction]) -> Vec<Candidate> {
    let matrix = UserItemMatrix::build(interactions);

    let Some(target) = matrix.row(user_id) else {
        return Vec::new();
    };

    let mut neighbors: Vec<(UserId, f64)> = matrix
        .rows()
        .filter(|(other_id, _)| *other_id != user_id)
        .map(|(other_id, other)| (other_id, sparse_cosine(target, other)))
        .filter(|(_, similarity)| *similarity > 0.0)
        .collect();

    neighbors.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
    neighbors.truncate(NEIGHBOR_COUNT);

    let mut scores: BTreeMap<ItemId, f64> = BTreeMap::new();
    for (neighbor_id, similarity) in &neighbors {
        let Some(neighbor) = matrix.row(*neighbor_id) else {
            continue;
        };
        for (item_id, weight) in neighbor.iter() {
            if !target.contains(item_id) {
                *scores.entry(item_id).or_insert(0.0) += weight * similarity;
            }
        }
    }

    tracing::debug!(
        user_id,
        users = matrix.user_count(),
        neighbors = neighbors.len(),
        candidates = scores.len(),
        "Collaborative filtering completed"
    );

    scores
        .into_iter()
        .map(|(item_id, score)| Candidate::new(item_id, score, Source::Collaborative))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::InteractionKind;
    use chrono::Utc;

    fn interaction(user_id: UserId, item_id: ItemId, kind: InteractionKind) -> Interaction {
        Interaction::new(0, user_id, item_id, kind, Utc::now())
    }

    #[test]
    fn test_identical_neighbor_recommends_extra_purchase() {
        let mut interactions = Vec::new();
        for user_id in [1, 2] {
            for item_id in [1, 2, 3] {
                interactions.push(interaction(user_id, item_id, InteractionKind::View));
            }
        }
        // B buys item 4 on top of the shared history; A/B similarity is then
        // 3 / (sqrt(3) * sqrt(28)) rather than 1.0 because B's magnitude grows.
        interactions.push(interaction(2, 4, InteractionKind::Purchase));

        let candidates = collaborative_candidates(1, &interactions);
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].item_id, 4);
        let expected = 5.0 * 3.0 / (3f64.sqrt() * 28f64.sqrt());
        assert!((candidates[0].score - expected).abs() < 1e-9);
        assert_eq!(candidates[0].source_label(), "collaborative");
    }

    #[test]
    fn test_identical_vectors_vote_with_full_weight() {
        // A and B share {1,2,3} with identical weights
        let mut interactions = Vec::new();
        for user_id in [1, 2] {
            for item_id in [1, 2, 3] {
                interactions.push(interaction(user_id, item_id, InteractionKind::Cart));
            }
        }
        let matrix = UserItemMatrix::build(&interactions);
        let similarity = sparse_cosine(matrix.row(1).unwrap(), matrix.row(2).unwrap());
        assert!((similarity - 1.0).abs() < 1e-9);

        // Nothing left to recommend when both histories are identical
        assert!(collaborative_candidates(1, &interactions).is_empty());
    }

    #[test]
    fn test_unknown_user_gets_nothing() {
        let interactions = vec![interaction(1, 1, InteractionKind::View)];
        assert!(collaborative_candidates(99, &interactions).is_empty());
    }

    #[test]
    fn test_no_overlap_means_no_neighbors() {
        let interactions = vec![
            interaction(1, 1, InteractionKind::View),
            interaction(2, 2, InteractionKind::View),
        ];
        assert!(collaborative_candidates(1, &interactions).is_empty());
    }

    #[test]
    fn test_only_top_neighbors_vote() {
        let mut interactions = vec![
            interaction(1, 1, InteractionKind::Purchase),
            interaction(1, 2, InteractionKind::View),
        ];
        // Users 100..=110 overlap on item 1; user 100 is the weakest match because of
        // the heavy extra item, and its extra item should not be voted for.
        for other in 101..=110 {
            interactions.push(interaction(other, 1, InteractionKind::Purchase));
            interactions.push(interaction(other, 50, InteractionKind::View));
        }
        interactions.push(interaction(100, 1, InteractionKind::View));
        interactions.push(interaction(100, 60, InteractionKind::Purchase));
        interactions.push(interaction(100, 60, InteractionKind::Purchase));

        let candidates = collaborative_candidates(1, &interactions);
        let ids: Vec<ItemId> = candidates.iter().map(|c| c.item_id).collect();
        assert_eq!(ids, vec![50]);
    }
}
