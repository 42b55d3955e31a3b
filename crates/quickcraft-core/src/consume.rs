//! Matching and deducting ingredients from an inventory.
//!
//! Inventories are scanned from the highest slot index down to 0. Each
//! matching slot is drained until the requirement reaches zero: a slot that
//! holds no more than what is still needed is cleared, otherwise it is
//! decremented by the remainder.
//!
//! The raw pass ([`InventoryConsumer::commit`]) mutates slots as it goes, so
//! a request it cannot fully satisfy still clears every matching slot it
//! visited. [`ConsumeMode::Atomic`] avoids that by tallying first and only
//! committing when the tally covers the request.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::ingredient::Ingredient;
use crate::item::ItemLike;
use crate::multiset::IngredientMultiset;

/// How [`InventoryConsumer::remove`] behaves when the inventory is short.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsumeMode {
    /// Check availability first; a short inventory is left untouched.
    #[default]
    Atomic,
    /// Drain as much as possible, even when the request ultimately fails.
    Legacy,
}

impl ConsumeMode {
    /// Checks if this mode may leave a partially drained inventory.
    #[must_use]
    pub const fn is_legacy(self) -> bool {
        matches!(self, Self::Legacy)
    }
}

/// Deducts ingredients from inventory slots.
#[derive(Debug, Clone, Copy, Default)]
pub struct InventoryConsumer {
    mode: ConsumeMode,
}

impl InventoryConsumer {
    /// Creates a consumer with the given mode.
    #[must_use]
    pub const fn new(mode: ConsumeMode) -> Self {
        Self { mode }
    }

    /// Creates a consumer that reproduces partial consumption on failure.
    #[must_use]
    pub const fn legacy() -> Self {
        Self::new(ConsumeMode::Legacy)
    }

    /// The configured mode.
    #[must_use]
    pub const fn mode(&self) -> ConsumeMode {
        self.mode
    }

    /// Total quantity of items matching `ingredient`. Never mutates.
    pub fn available<I: ItemLike>(&self, slots: &[Option<I>], ingredient: &Ingredient) -> u64 {
        slots
            .iter()
            .flatten()
            .filter(|item| ingredient.matches(Some(*item)))
            .map(|item| u64::from(item.quantity()))
            .sum()
    }

    /// Checks if `amount` of `ingredient` could be removed.
    pub fn can_satisfy<I: ItemLike>(
        &self,
        slots: &[Option<I>],
        ingredient: &Ingredient,
        amount: u32,
    ) -> bool {
        self.available(slots, ingredient) >= u64::from(amount)
    }

    /// Removes `amount` of `ingredient`, honouring the consume mode.
    ///
    /// Returns true if the full amount was removed. In atomic mode a false
    /// result means the slots are unchanged; in legacy mode they may have
    /// been partially drained.
    pub fn remove<I: ItemLike>(
        &self,
        slots: &mut [Option<I>],
        ingredient: &Ingredient,
        amount: u32,
    ) -> bool {
        if self.mode == ConsumeMode::Atomic && !self.can_satisfy(slots, ingredient, amount) {
            debug!(
                "Not enough '{}': need {}, have {}",
                ingredient.name(),
                amount,
                self.available(slots, ingredient)
            );
            return false;
        }
        self.commit(slots, ingredient, amount)
    }

    /// Runs the raw reverse-order pass regardless of mode.
    ///
    /// Slots are cleared or decremented as they are visited, including when
    /// the result is false.
    pub fn commit<I: ItemLike>(
        &self,
        slots: &mut [Option<I>],
        ingredient: &Ingredient,
        amount: u32,
    ) -> bool {
        let remaining = drain(slots, ingredient, amount);
        if remaining > 0 {
            debug!(
                "Consumed {} of {} '{}', {} short",
                amount - remaining,
                amount,
                ingredient.name(),
                remaining
            );
        }
        remaining == 0
    }

    /// Removes every ingredient of a recipe.
    ///
    /// Atomic mode works on a scratch copy and writes it back only if every
    /// ingredient was satisfied. Legacy mode drains the real slots ingredient
    /// by ingredient and stops at the first shortfall.
    pub fn remove_all<I: ItemLike + Clone>(
        &self,
        slots: &mut [Option<I>],
        ingredients: &IngredientMultiset,
    ) -> bool {
        match self.mode {
            ConsumeMode::Atomic => {
                let mut scratch = slots.to_vec();
                let satisfied = ingredients
                    .in_consumption_order()
                    .into_iter()
                    .all(|(ingredient, amount)| drain(&mut scratch, ingredient, amount) == 0);
                if satisfied {
                    slots.clone_from_slice(&scratch);
                }
                satisfied
            }
            ConsumeMode::Legacy => ingredients
                .in_consumption_order()
                .into_iter()
                .all(|(ingredient, amount)| self.commit(slots, ingredient, amount)),
        }
    }

    /// Shortfall per ingredient, in consumption order. Never mutates.
    ///
    /// Items claimed by an earlier ingredient are not counted again for a
    /// later one, so overlapping requirements report what is really missing.
    pub fn missing<I: ItemLike + Clone>(
        &self,
        slots: &[Option<I>],
        ingredients: &IngredientMultiset,
    ) -> Vec<(Ingredient, u32)> {
        let mut scratch = slots.to_vec();
        ingredients
            .in_consumption_order()
            .into_iter()
            .filter_map(|(ingredient, amount)| {
                let short = drain(&mut scratch, ingredient, amount);
                (short > 0).then(|| (ingredient.clone(), short))
            })
            .collect()
    }
}

/// Reverse-order drain. Returns the amount that could not be removed.
fn drain<I: ItemLike>(slots: &mut [Option<I>], ingredient: &Ingredient, amount: u32) -> u32 {
    let mut remaining = amount;
    for (index, slot) in slots.iter_mut().enumerate().rev() {
        if remaining == 0 {
            break;
        }
        if !ingredient.matches(slot.as_ref()) {
            continue;
        }
        let Some(item) = slot.as_mut() else {
            continue;
        };
        let held = item.quantity();
        if held <= remaining {
            remaining -= held;
            *slot = None;
            trace!("Cleared slot {} ({} items)", index, held);
        } else {
            item.set_quantity(held - remaining);
            trace!("Took {} from slot {}, {} left", remaining, index, held - remaining);
            remaining = 0;
        }
    }
    remaining
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingredient::SubVariant;
    use crate::item::{ItemMetadata, ItemValue};
    use quickcraft_common::ItemTypeId;

    const A: ItemTypeId = ItemTypeId::new(1);
    const B: ItemTypeId = ItemTypeId::new(2);

    fn any_a() -> Ingredient {
        Ingredient::new(A, SubVariant::WILDCARD, None, "A")
    }

    fn a_variant(data: i32) -> Ingredient {
        Ingredient::new(A, SubVariant::new(data).expect("valid"), None, "A")
    }

    fn quantities(slots: &[Option<ItemValue>]) -> Vec<u32> {
        slots
            .iter()
            .map(|slot| slot.as_ref().map_or(0, |item| item.quantity))
            .collect()
    }

    #[test]
    fn test_end_to_end_wildcard() {
        let mut slots = vec![
            Some(ItemValue::with_variant(A, 1, 3)),
            Some(ItemValue::with_variant(A, 2, 5)),
        ];
        let consumer = InventoryConsumer::default();

        assert!(consumer.remove(&mut slots, &any_a(), 6));
        assert!(slots[1].is_none());
        assert_eq!(slots[0].as_ref().map(|i| i.quantity), Some(2));
    }

    #[test]
    fn test_reverse_order_tie_break() {
        let mut slots = vec![
            Some(ItemValue::new(A, 4)),
            None,
            Some(ItemValue::new(A, 4)),
        ];
        let consumer = InventoryConsumer::default();

        assert!(consumer.remove(&mut slots, &a_variant(0), 3));
        assert_eq!(quantities(&slots), vec![4, 0, 1]);

        assert!(consumer.remove(&mut slots, &a_variant(0), 1));
        assert_eq!(quantities(&slots), vec![4, 0, 0]);
        assert!(slots[2].is_none());
    }

    #[test]
    fn test_exact_amount_clears_slot() {
        let mut slots = vec![Some(ItemValue::new(A, 5))];
        assert!(InventoryConsumer::default().remove(&mut slots, &a_variant(0), 5));
        assert!(slots[0].is_none());
    }

    #[test]
    fn test_non_matching_slots_untouched() {
        let mut slots = vec![
            Some(ItemValue::new(A, 2)),
            Some(ItemValue::new(B, 9)),
            Some(ItemValue::with_variant(A, 3, 9)),
            Some(ItemValue::new(A, 2).with_metadata(ItemMetadata::named("Shiny"))),
        ];
        let before = slots.clone();

        assert!(InventoryConsumer::default().remove(&mut slots, &a_variant(0), 2));
        assert!(slots[0].is_none());
        assert_eq!(slots[1..], before[1..]);
    }

    #[test]
    fn test_zero_amount_succeeds_without_change() {
        let mut slots = vec![Some(ItemValue::new(A, 2))];
        assert!(InventoryConsumer::default().remove(&mut slots, &a_variant(0), 0));
        assert_eq!(quantities(&slots), vec![2]);
    }

    #[test]
    fn test_atomic_failure_leaves_inventory_unchanged() {
        let mut slots = vec![
            Some(ItemValue::with_variant(A, 1, 2)),
            Some(ItemValue::with_variant(A, 2, 2)),
        ];
        let before = slots.clone();

        assert!(!InventoryConsumer::default().remove(&mut slots, &any_a(), 5));
        assert_eq!(slots, before);
    }

    #[test]
    fn test_legacy_failure_drains_matching_slots() {
        let mut slots = vec![
            Some(ItemValue::with_variant(A, 1, 2)),
            Some(ItemValue::new(B, 7)),
            Some(ItemValue::with_variant(A, 2, 2)),
        ];

        assert!(!InventoryConsumer::legacy().remove(&mut slots, &any_a(), 5));
        assert!(slots[0].is_none());
        assert!(slots[2].is_none());
        assert_eq!(slots[1].as_ref().map(|i| i.quantity), Some(7));
    }

    #[test]
    fn test_commit_ignores_mode() {
        let mut slots = vec![Some(ItemValue::new(A, 1))];
        assert!(!InventoryConsumer::default().commit(&mut slots, &a_variant(0), 3));
        assert!(slots[0].is_none());
    }

    #[test]
    fn test_available_and_can_satisfy() {
        let slots = vec![
            Some(ItemValue::with_variant(A, 1, 3)),
            None,
            Some(ItemValue::with_variant(A, 2, 5)),
            Some(ItemValue::new(B, 100)),
        ];
        let consumer = InventoryConsumer::default();

        assert_eq!(consumer.available(&slots, &any_a()), 8);
        assert_eq!(consumer.available(&slots, &a_variant(2)), 5);
        assert!(consumer.can_satisfy(&slots, &any_a(), 8));
        assert!(!consumer.can_satisfy(&slots, &any_a(), 9));
    }

    #[test]
    fn test_remove_all_prefers_concrete_before_wildcard() {
        let mut slots = vec![
            Some(ItemValue::with_variant(A, 1, 2)),
            Some(ItemValue::with_variant(A, 2, 2)),
        ];
        let recipe: IngredientMultiset = vec![(any_a(), 2), (a_variant(2), 2)].into_iter().collect();

        assert!(InventoryConsumer::default().remove_all(&mut slots, &recipe));
        assert!(slots.iter().all(Option::is_none));
    }

    #[test]
    fn test_remove_all_atomic_is_all_or_nothing() {
        let mut slots = vec![Some(ItemValue::new(A, 3)), Some(ItemValue::new(B, 1))];
        let before = slots.clone();
        let b = Ingredient::new(B, SubVariant::new(0).expect("valid"), None, "B");
        let recipe: IngredientMultiset = vec![(a_variant(0), 2), (b, 2)].into_iter().collect();

        assert!(!InventoryConsumer::default().remove_all(&mut slots, &recipe));
        assert_eq!(slots, before);
    }

    #[test]
    fn test_remove_all_legacy_stops_at_first_shortfall() {
        let mut slots = vec![Some(ItemValue::with_variant(A, 1, 1)), Some(ItemValue::new(A, 3))];
        let recipe: IngredientMultiset = vec![(a_variant(0), 2), (a_variant(1), 4)].into_iter().collect();

        assert!(!InventoryConsumer::legacy().remove_all(&mut slots, &recipe));
        assert_eq!(quantities(&slots), vec![0, 1]);
    }

    #[test]
    fn test_metadata_variants_consume_in_fixed_order() {
        let with_meta = |name: &str| {
            Ingredient::new(A, SubVariant::WILDCARD, Some(ItemMetadata::named(name)), "A")
        };
        let item = |name: &str| ItemValue::new(A, 2).with_metadata(ItemMetadata::named(name));

        // Fresh maps each round so hash iteration order varies.
        for _ in 0..50 {
            let recipe: IngredientMultiset =
                vec![(with_meta("Two"), 5), (with_meta("One"), 5)].into_iter().collect();
            let mut slots = vec![Some(item("One")), Some(item("Two"))];

            let missing = InventoryConsumer::default().missing(&slots, &recipe);
            let names: Vec<_> = missing
                .iter()
                .map(|(ing, short)| (ing.metadata().and_then(|m| m.display_name.clone()), *short))
                .collect();
            assert_eq!(
                names,
                vec![(Some(String::from("One")), 3), (Some(String::from("Two")), 3)]
            );

            assert!(!InventoryConsumer::legacy().remove_all(&mut slots, &recipe));
            assert_eq!(quantities(&slots), vec![0, 2]);
        }
    }

    #[test]
    fn test_missing_reports_shortfall() {
        let slots = vec![
            Some(ItemValue::with_variant(A, 2, 3)),
            Some(ItemValue::with_variant(A, 5, 1)),
        ];
        let recipe: IngredientMultiset = vec![(a_variant(2), 3), (any_a(), 3)].into_iter().collect();

        let missing = InventoryConsumer::default().missing(&slots, &recipe);
        assert_eq!(missing.len(), 1);
        assert!(missing[0].0.any_data());
        assert_eq!(missing[0].1, 2);
    }

    #[test]
    fn test_consume_mode_serde() {
        let mode: ConsumeMode = serde_json::from_str("\"legacy\"").expect("deserialize");
        assert!(mode.is_legacy());
        assert_eq!(
            serde_json::to_string(&ConsumeMode::Atomic).expect("serialize"),
            "\"atomic\""
        );
    }
}
