use std::collections::HashSet;

use crate::models::{Candidate, Interaction, Item, ItemId, Source};

use super::similarity::dense_cosine;
use super::text::TfidfMatrix;
use super::ScoringError;

/// Upper bound on the catalog-wide text vocabulary
pub const VOCABULARY_CAP: usize = 100;

/// Content-based filtering over item text profiles
///
/// The user's taste vector is the mean TF-IDF profile of the catalog items they
/// interacted with. Every other item is scored by its cosine similarity to that vector.
pub fn content_candidates(
    history: &[Interaction],
    catalog: &[Item],
) -> Result<Vec<Candidate>, ScoringError> {
    let interacted: HashSet<ItemId> = history.iter().map(|i| i.item_id).collect();

    let liked: Vec<usize> = catalog
        .iter()
        .enumerate()
        .filter(|(_, item)| interacted.contains(&item.id))
        .map(|(i, _)| i)
        .collect();

    if liked.is_empty() {
        tracing::debug!(
            history = history.len(),
            "No interacted items found in catalog, skipping content filtering"
        );
        return Ok(Vec::new());
    }

    let profiles: Vec<String> = catalog.iter().map(Item::profile_text).collect();
    let tfidf = TfidfMatrix::fit_transform(&profiles, VOCABULARY_CAP)?;

    let Some(taste) = tfidf.mean_of(&liked) else {
        return Ok(Vec::new());
    };

    let candidates: Vec<Candidate> = catalog
        .iter()
        .zip(tfidf.rows())
        .filter(|(item, _)| !interacted.contains(&item.id))
        .map(|(item, profile)| (item.id, dense_cosine(&taste, profile)))
        .filter(|(_, similarity)| *similarity > 0.0)
        .map(|(item_id, similarity)| Candidate::new(item_id, similarity, Source::Content))
        .collect();

    tracing::debug!(
        vocabulary = tfidf.vocabulary().len(),
        liked = liked.len(),
        candidates = candidates.len(),
        "Content filtering completed"
    );

    Ok(candidates)
}
