//! Recipe listing and paging.
//!
//! A layout gathers the recipes a requester may use, sorts them by their
//! natural order, and publishes the full list to a sink each time
//! [`RecipeLayout::update_recipes`] is called. Slicing into pages is the
//! sink's job; layouts keep no page state.

use quickcraft_common::{RecipeId, RequesterId};
use tracing::debug;

use crate::recipe::RecipeCategory;

/// A recipe as seen by layouts.
pub trait CatalogRecipe: Ord + Clone {
    /// Recipe identifier.
    fn id(&self) -> RecipeId;

    /// Layout category.
    fn category(&self) -> RecipeCategory;
}

/// Resolves the recipes a requester may currently use.
pub trait RecipeResolver<R> {
    /// Recipes available to `requester`, in any order.
    fn eligible_recipes(&self, requester: RequesterId) -> Vec<R>;
}

/// Receives a freshly computed recipe list.
pub trait RecipeSink<R> {
    /// Replaces whatever was shown with `recipes`.
    fn publish(&mut self, recipes: Vec<R>);
}

/// A strategy for choosing which recipes to show.
pub trait RecipeLayout {
    /// The recipe type this layout lists.
    type Recipe;

    /// Recomputes the list and publishes all of it to `sink`.
    fn update_recipes(&mut self, sink: &mut dyn RecipeSink<Self::Recipe>);
}

/// Every eligible recipe for one requester, in sorted order.
pub struct RecipeCatalog<'r, R> {
    requester: RequesterId,
    resolver: &'r dyn RecipeResolver<R>,
    recipes: Vec<R>,
}

impl<'r, R: CatalogRecipe> RecipeCatalog<'r, R> {
    /// Collects and sorts the requester's eligible recipes.
    pub fn new(requester: RequesterId, resolver: &'r dyn RecipeResolver<R>) -> Self {
        let mut catalog = Self {
            requester,
            resolver,
            recipes: Vec::new(),
        };
        catalog.refresh();
        catalog
    }

    /// The requester this catalog lists recipes for.
    #[must_use]
    pub const fn requester(&self) -> RequesterId {
        self.requester
    }

    /// The sorted recipes from the last refresh.
    #[must_use]
    pub fn recipes(&self) -> &[R] {
        &self.recipes
    }

    /// Re-resolves eligibility and re-sorts.
    pub fn refresh(&mut self) {
        let mut recipes = self.resolver.eligible_recipes(self.requester);
        recipes.sort();
        self.recipes = recipes;
    }

    /// Refreshes and publishes the full sorted list.
    pub fn update_recipes(&mut self, sink: &mut dyn RecipeSink<R>) {
        self.refresh();
        debug!(
            "Publishing {} recipes for requester {}",
            self.recipes.len(),
            self.requester.raw()
        );
        sink.publish(self.recipes.clone());
    }
}

/// The layout listing every eligible recipe.
pub type AllRecipesLayout<'r, R> = RecipeCatalog<'r, R>;

impl<R: CatalogRecipe> RecipeLayout for RecipeCatalog<'_, R> {
    type Recipe = R;

    fn update_recipes(&mut self, sink: &mut dyn RecipeSink<R>) {
        RecipeCatalog::update_recipes(self, sink);
    }
}

/// Eligible recipes of a single category.
pub struct CategoryLayout<'r, R> {
    catalog: RecipeCatalog<'r, R>,
    category: RecipeCategory,
}

impl<'r, R: CatalogRecipe> CategoryLayout<'r, R> {
    /// Creates a layout showing only `category`.
    pub fn new(
        requester: RequesterId,
        resolver: &'r dyn RecipeResolver<R>,
        category: RecipeCategory,
    ) -> Self {
        Self {
            catalog: RecipeCatalog::new(requester, resolver),
            category,
        }
    }

    /// The category shown.
    #[must_use]
    pub const fn category(&self) -> RecipeCategory {
        self.category
    }
}

impl<R: CatalogRecipe> RecipeLayout for CategoryLayout<'_, R> {
    type Recipe = R;

    fn update_recipes(&mut self, sink: &mut dyn RecipeSink<R>) {
        self.catalog.refresh();
        let recipes: Vec<R> = self
            .catalog
            .recipes()
            .iter()
            .filter(|recipe| recipe.category() == self.category)
            .cloned()
            .collect();
        debug!(
            "Publishing {} {} recipes",
            recipes.len(),
            self.category.display_name()
        );
        sink.publish(recipes);
    }
}

/// A sink that slices the published list into fixed-size pages.
#[derive(Debug, Clone)]
pub struct RecipePages<R> {
    recipes: Vec<R>,
    page_size: usize,
}

impl<R> RecipePages<R> {
    /// Creates an empty pager. A page size of 0 is treated as 1.
    #[must_use]
    pub fn new(page_size: usize) -> Self {
        Self {
            recipes: Vec::new(),
            page_size: page_size.max(1),
        }
    }

    /// Recipes per page.
    #[must_use]
    pub const fn page_size(&self) -> usize {
        self.page_size
    }

    /// Number of recipes last published.
    #[must_use]
    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    /// Checks if nothing is shown.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    /// Number of pages. An empty list still has one page.
    #[must_use]
    pub fn page_count(&self) -> usize {
        self.recipes.len().div_ceil(self.page_size).max(1)
    }

    /// Recipes on page `page` (0-based), clamped to the last page.
    #[must_use]
    pub fn page(&self, page: usize) -> &[R] {
        let page = page.min(self.page_count() - 1);
        let start = page * self.page_size;
        let end = (start + self.page_size).min(self.recipes.len());
        self.recipes.get(start..end).unwrap_or_default()
    }

    /// All recipes last published.
    #[must_use]
    pub fn all(&self) -> &[R] {
        &self.recipes
    }
}

impl<R: CatalogRecipe> RecipePages<R> {
    /// Page (0-based) holding the recipe with `id`, if it was published.
    #[must_use]
    pub fn page_of(&self, id: RecipeId) -> Option<usize> {
        self.recipes
            .iter()
            .position(|recipe| recipe.id() == id)
            .map(|index| index / self.page_size)
    }
}

impl<R> RecipeSink<R> for RecipePages<R> {
    fn publish(&mut self, recipes: Vec<R>) {
        self.recipes = recipes;
    }
}
