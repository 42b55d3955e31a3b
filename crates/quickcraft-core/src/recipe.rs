//! Recipe definitions and the recipe book.

use quickcraft_common::{IngredientResult, RecipeId, RequesterId};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use tracing::debug;

use crate::catalog::{CatalogRecipe, RecipeResolver};
use crate::consume::InventoryConsumer;
use crate::ingredient::Ingredient;
use crate::item::{ItemLike, ItemValue};
use crate::multiset::IngredientMultiset;
use crate::naming::ItemNamer;

/// Categories shown as separate recipe layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RecipeCategory {
    /// General items.
    #[default]
    Items,
    /// Wearable armor.
    Armor,
    /// Fireworks and firework stars.
    Fireworks,
}

impl RecipeCategory {
    /// Get display name for this category.
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Items => "Items",
            Self::Armor => "Armor",
            Self::Fireworks => "Fireworks",
        }
    }

    /// Get all categories.
    #[must_use]
    pub fn all() -> &'static [RecipeCategory] {
        &[Self::Items, Self::Armor, Self::Fireworks]
    }
}

/// A crafting recipe.
///
/// Recipes are ordered by name, then by id.
#[derive(Debug, Clone)]
pub struct Recipe {
    /// Recipe identifier
    pub id: RecipeId,
    /// Recipe name
    pub name: String,
    /// Layout category
    pub category: RecipeCategory,
    /// Required ingredients
    pub ingredients: IngredientMultiset,
    /// Items produced
    pub results: Vec<ItemValue>,
    /// Whether every requester may use this recipe
    pub unlocked_by_default: bool,
}

impl Recipe {
    /// Creates a new recipe builder.
    #[must_use]
    pub fn builder(id: RecipeId, name: impl Into<String>) -> RecipeBuilder {
        RecipeBuilder::new(id, name)
    }

    /// Checks if the slots hold every ingredient.
    pub fn can_craft<I: ItemLike + Clone>(
        &self,
        slots: &[Option<I>],
        consumer: &InventoryConsumer,
    ) -> bool {
        consumer.missing(slots, &self.ingredients).is_empty()
    }

    /// Ingredients the slots are short of.
    pub fn missing<I: ItemLike + Clone>(
        &self,
        slots: &[Option<I>],
        consumer: &InventoryConsumer,
    ) -> Vec<(Ingredient, u32)> {
        consumer.missing(slots, &self.ingredients)
    }

    /// Consumes the ingredients and returns the results.
    ///
    /// Returns `None` when the ingredients could not all be removed. Whether
    /// the slots were touched in that case depends on the consumer's mode.
    pub fn craft<I: ItemLike + Clone>(
        &self,
        slots: &mut [Option<I>],
        consumer: &InventoryConsumer,
    ) -> Option<Vec<ItemValue>> {
        if !consumer.remove_all(slots, &self.ingredients) {
            debug!("Cannot craft '{}': missing ingredients", self.name);
            return None;
        }
        debug!("Crafted '{}'", self.name);
        Some(self.results.clone())
    }
}

impl PartialEq for Recipe {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Recipe {}

impl PartialOrd for Recipe {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Recipe {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name.cmp(&other.name).then(self.id.cmp(&other.id))
    }
}

impl CatalogRecipe for Recipe {
    fn id(&self) -> RecipeId {
        self.id
    }

    fn category(&self) -> RecipeCategory {
        self.category
    }
}

/// Builder for creating recipes.
#[derive(Debug)]
pub struct RecipeBuilder {
    id: RecipeId,
    name: String,
    category: RecipeCategory,
    ingredients: Vec<Option<ItemValue>>,
    results: Vec<ItemValue>,
    unlocked_by_default: bool,
}

impl RecipeBuilder {
    /// Creates a new recipe builder.
    fn new(id: RecipeId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            category: RecipeCategory::default(),
            ingredients: Vec::new(),
            results: Vec::new(),
            unlocked_by_default: true,
        }
    }

    /// Sets the layout category.
    #[must_use]
    pub const fn category(mut self, category: RecipeCategory) -> Self {
        self.category = category;
        self
    }

    /// Adds an ingredient. Its quantity is the amount required.
    #[must_use]
    pub fn ingredient(mut self, item: ItemValue) -> Self {
        self.ingredients.push(Some(item));
        self
    }

    /// Adds a result item.
    #[must_use]
    pub fn result(mut self, item: ItemValue) -> Self {
        self.results.push(item);
        self
    }

    /// Sets whether the recipe is available without an unlock.
    #[must_use]
    pub const fn unlocked_by_default(mut self, unlocked: bool) -> Self {
        self.unlocked_by_default = unlocked;
        self
    }

    /// Builds the recipe, naming its ingredients with `namer`.
    pub fn build(self, namer: &dyn ItemNamer) -> IngredientResult<Recipe> {
        Ok(Recipe {
            id: self.id,
            name: self.name,
            category: self.category,
            ingredients: IngredientMultiset::from_items(&self.ingredients, namer)?,
            results: self.results,
            unlocked_by_default: self.unlocked_by_default,
        })
    }
}

/// Registered recipes and per-requester unlocks.
#[derive(Debug, Default)]
pub struct RecipeBook {
    /// All recipes by ID.
    recipes: HashMap<RecipeId, Recipe>,
    /// Recipes unlocked for specific requesters.
    unlocked: HashMap<RequesterId, HashSet<RecipeId>>,
}

impl RecipeBook {
    /// Creates an empty recipe book.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a recipe, replacing any recipe with the same id.
    pub fn register(&mut self, recipe: Recipe) {
        self.recipes.insert(recipe.id, recipe);
    }

    /// Gets a recipe by ID.
    #[must_use]
    pub fn get(&self, id: RecipeId) -> Option<&Recipe> {
        self.recipes.get(&id)
    }

    /// Returns the number of registered recipes.
    #[must_use]
    pub fn recipe_count(&self) -> usize {
        self.recipes.len()
    }

    /// Unlocks a recipe for a requester.
    pub fn unlock(&mut self, requester: RequesterId, id: RecipeId) {
        self.unlocked.entry(requester).or_default().insert(id);
    }

    /// Revokes an unlock. Default-unlocked recipes stay available.
    pub fn lock(&mut self, requester: RequesterId, id: RecipeId) {
        if let Some(ids) = self.unlocked.get_mut(&requester) {
            ids.remove(&id);
        }
    }

    /// Checks if a requester may use a recipe.
    #[must_use]
    pub fn is_eligible(&self, requester: RequesterId, recipe: &Recipe) -> bool {
        recipe.unlocked_by_default
            || self
                .unlocked
                .get(&requester)
                .is_some_and(|ids| ids.contains(&recipe.id))
    }
}

impl RecipeResolver<Recipe> for RecipeBook {
    fn eligible_recipes(&self, requester: RequesterId) -> Vec<Recipe> {
        self.recipes
            .values()
            .filter(|recipe| self.is_eligible(requester, recipe))
            .cloned()
            .collect()
    }
}
