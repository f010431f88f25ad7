use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;

use crate::models::{Candidate, Interaction, Item, ItemId, Source};

/// Lowest catalog rating an out-of-profile pick may have
pub const MIN_SERENDIPITY_RATING: f64 = 4.0;

/// Fixed score given to every injected pick
pub const SERENDIPITY_SCORE: f64 = 0.5;

/// Appends well-rated items from categories the user never touched
///
/// Picks `max(1, floor(len × factor))` items uniformly at random from the eligible
/// pool, or the whole pool when it is smaller. Returns how many were added.
pub fn inject_serendipity<R: Rng + ?Sized>(
    candidates: &mut Vec<Candidate>,
    history: &[Interaction],
    catalog: &[Item],
    factor: f64,
    rng: &mut R,
) -> usize {
    let desired = ((candidates.len() as f64 * factor).floor() as usize).max(1);

    let seen: HashSet<ItemId> = history.iter().map(|i| i.item_id).collect();
    let user_categories: HashSet<&str> = catalog
        .iter()
        .filter(|item| seen.contains(&item.id))
        .map(|item| item.category.as_str())
        .collect();
    let already_candidates: HashSet<ItemId> = candidates.iter().map(|c| c.item_id).collect();

    let pool: Vec<&Item> = catalog
        .iter()
        .filter(|item| !user_categories.contains(item.category.as_str()))
        .filter(|item| !seen.contains(&item.id) && !already_candidates.contains(&item.id))
        .filter(|item| item.rating >= MIN_SERENDIPITY_RATING)
        .collect();

    if pool.is_empty() {
        tracing::debug!("No eligible serendipity items");
        return 0;
    }

    let picks: Vec<ItemId> = pool
        .choose_multiple(rng, desired.min(pool.len()))
        .map(|item| item.id)
        .collect();

    tracing::debug!(
        desired,
        pool = pool.len(),
        picked = picks.len(),
        "Serendipity items injected"
    );

    let added = picks.len();
    candidates.extend(
        picks
            .into_iter()
            .map(|item_id| Candidate::new(item_id, SERENDIPITY_SCORE, Source::Serendipity)),
    );
    added
}
