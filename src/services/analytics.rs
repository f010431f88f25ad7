use std::collections::{BTreeMap, HashMap};

use crate::{
    db::InteractionStore,
    error::AppResult,
    models::{InteractionKind, Item, ItemId, UserAnalytics, UserId},
};

/// Summarises a user's engagement by category along with their purchase totals
pub async fn user_analytics(
    store: &dyn InteractionStore,
    user_id: UserId,
) -> AppResult<UserAnalytics> {
    let interactions = store.interactions_for_user(user_id).await?;

    if interactions.is_empty() {
        return Ok(UserAnalytics {
            user_id,
            total_interactions: 0,
            categories_explored: BTreeMap::new(),
            total_purchases: 0,
            total_spent: 0.0,
            favorite_category: None,
            message: Some("No interaction data yet".to_string()),
        });
    }

    let ids: Vec<ItemId> = interactions.iter().map(|i| i.item_id).collect();
    let items = store.items_by_ids(&ids).await?;
    let by_id: HashMap<ItemId, &Item> = items.iter().map(|item| (item.id, item)).collect();

    let mut categories: BTreeMap<String, usize> = BTreeMap::new();
    let mut first_seen: Vec<&str> = Vec::new();
    let mut total_purchases = 0;
    let mut total_spent = 0.0;

    for interaction in &interactions {
        let Some(item) = by_id.get(&interaction.item_id) else {
            continue;
        };
        if !categories.contains_key(&item.category) {
            first_seen.push(&item.category);
        }
        *categories.entry(item.category.clone()).or_insert(0) += 1;

        if interaction.kind == InteractionKind::Purchase {
            total_purchases += 1;
            total_spent += item.price;
        }
    }

    // Ties go to the category the user reached first
    let favorite_category = first_seen
        .iter()
        .fold(None::<(&str, usize)>, |best, &category| {
            let count = categories[category];
            match best {
                Some((_, best_count)) if best_count >= count => best,
                _ => Some((category, count)),
            }
        })
        .map(|(category, _)| category.to_string());

    Ok(UserAnalytics {
        user_id,
        total_interactions: interactions.len(),
        categories_explored: categories,
        total_purchases,
        total_spent: (total_spent * 100.0).round() / 100.0,
        favorite_category,
        message: None,
    })
}
