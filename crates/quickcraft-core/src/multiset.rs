//! Ingredient counts.

use quickcraft_common::IngredientResult;
use std::collections::HashMap;

use crate::ingredient::Ingredient;
use crate::item::ItemLike;
use crate::naming::ItemNamer;

/// A mapping from ingredient to required count.
///
/// Keys are unique by ingredient identity; counts are always positive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngredientMultiset {
    counts: HashMap<Ingredient, u32>,
}

impl IngredientMultiset {
    /// Creates an empty multiset.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Collapses a slot sequence into ingredient counts.
    ///
    /// Absent, void, and zero-quantity entries are skipped. Every other
    /// entry adds its quantity to its ingredient's count, so the result does
    /// not depend on the order of `items`.
    pub fn from_items<I: ItemLike>(
        items: &[Option<I>],
        namer: &dyn ItemNamer,
    ) -> IngredientResult<Self> {
        let mut result = Self::new();
        for item in items.iter().flatten() {
            if item.is_void() || item.quantity() == 0 {
                continue;
            }
            let ingredient = Ingredient::from_item(item, namer)?;
            result.add(ingredient, item.quantity());
        }
        Ok(result)
    }

    /// Adds `amount` to an ingredient's count.
    pub fn add(&mut self, ingredient: Ingredient, amount: u32) {
        if amount == 0 {
            return;
        }
        let count = self.counts.entry(ingredient).or_insert(0);
        *count = count.saturating_add(amount);
    }

    /// Count for an ingredient, 0 if absent.
    #[must_use]
    pub fn get(&self, ingredient: &Ingredient) -> u32 {
        self.counts.get(ingredient).copied().unwrap_or(0)
    }

    /// Number of distinct ingredients.
    #[must_use]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Checks if there are no ingredients.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts.
    #[must_use]
    pub fn total_count(&self) -> u64 {
        self.counts.values().map(|&c| u64::from(c)).sum()
    }

    /// Iterates over ingredients and counts in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&Ingredient, u32)> + '_ {
        self.counts.iter().map(|(ingredient, &count)| (ingredient, count))
    }

    /// Ingredients and counts in the order they are drained from inventories.
    #[must_use]
    pub fn in_consumption_order(&self) -> Vec<(&Ingredient, u32)> {
        let mut entries: Vec<_> = self.iter().collect();
        entries.sort_by(|(a, _), (b, _)| a.consumption_order(b));
        entries
    }
}

impl FromIterator<(Ingredient, u32)> for IngredientMultiset {
    fn from_iter<T: IntoIterator<Item = (Ingredient, u32)>>(iter: T) -> Self {
        let mut result = Self::new();
        for (ingredient, amount) in iter {
            result.add(ingredient, amount);
        }
        result
    }
}
