use std::collections::{BTreeMap, HashMap};

use crate::models::{Interaction, ItemId, UserId};

/// Sparse weighted vector keyed by item id
///
/// Only strictly positive weights are stored; every other key reads as zero.
/// Entries are kept in item id order so floating point sums are reproducible.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    entries: BTreeMap<ItemId, f64>,
}

impl SparseVector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `weight` to the entry for `item_id`. Non-positive weights are ignored.
    pub fn accumulate(&mut self, item_id: ItemId, weight: f64) {
        if weight > 0.0 {
            *self.entries.entry(item_id).or_insert(0.0) += weight;
        }
    }

    /// Weight for `item_id`, zero when absent
    pub fn get(&self, item_id: ItemId) -> f64 {
        self.entries.get(&item_id).copied().unwrap_or(0.0)
    }

    pub fn contains(&self, item_id: ItemId) -> bool {
        self.entries.contains_key(&item_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ItemId, f64)> + '_ {
        self.entries.iter().map(|(&id, &weight)| (id, weight))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Euclidean norm over every stored entry
    pub fn magnitude(&self) -> f64 {
        self.entries.values().map(|w| w * w).sum::<f64>().sqrt()
    }
}

impl FromIterator<(ItemId, f64)> for SparseVector {
    fn from_iter<T: IntoIterator<Item = (ItemId, f64)>>(iter: T) -> Self {
        let mut vector = SparseVector::new();
        for (item_id, weight) in iter {
            vector.accumulate(item_id, weight);
        }
        vector
    }
}

/// User → item weight matrix aggregated from every recorded interaction
#[derive(Debug, Clone, Default)]
pub struct UserItemMatrix {
    rows: HashMap<UserId, SparseVector>,
}

impl UserItemMatrix {
    /// Sums kind weights per (user, item). Age of the interaction plays no part.
    pub fn build(interactions: &[Interaction]) -> Self {
        let mut rows: HashMap<UserId, SparseVector> = HashMap::new();

        for interaction in interactions {
            rows.entry(interaction.user_id)
                .or_default()
                .accumulate(interaction.item_id, interaction.kind.weight());
        }

        Self { rows }
    }

    pub fn row(&self, user_id: UserId) -> Option<&SparseVector> {
        self.rows.get(&user_id)
    }

    pub fn rows(&self) -> impl Iterator<Item = (UserId, &SparseVector)> + '_ {
        self.rows.iter().map(|(&id, row)| (id, row))
    }

    pub fn user_count(&self) -> usize {
        self.rows.len()
    }
}
