//! Ingredient identity and matching.
//!
//! An [`Ingredient`] is the immutable key derived from an item: its type,
//! sub-variant, and metadata. Two comparisons exist and they deliberately
//! disagree on wildcards:
//!
//! - [`Ingredient::matches`] asks whether a concrete item can fill this
//!   requirement. A wildcard sub-variant accepts any candidate sub-variant.
//! - [`Ingredient::identity_eq`] (also `==` and `Hash`) asks whether two
//!   requirement records are the same key. Sub-variants are compared
//!   literally, so a wildcard ingredient never equals a concrete one.
//!
//! Metadata is compared strictly in both: absent equals absent, absent never
//! equals present, and present blocks must be structurally equal.

use quickcraft_common::{IngredientError, IngredientResult, ItemTypeId};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use crate::item::{ItemLike, ItemMetadata, ItemValue, ANY_DATA, MAX_SUB_VARIANT};
use crate::naming::ItemNamer;

/// A validated sub-variant: `0..=255` or the wildcard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct SubVariant(i16);

impl SubVariant {
    /// Matches any sub-variant.
    pub const WILDCARD: Self = Self(-1);

    /// Validates a raw sub-variant.
    pub fn new(value: i32) -> IngredientResult<Self> {
        let valid = value == ANY_DATA || (0..=MAX_SUB_VARIANT).contains(&value);
        match i16::try_from(value) {
            Ok(raw) if valid => Ok(Self(raw)),
            _ => Err(IngredientError::InvalidSubVariant { value }),
        }
    }

    /// Raw value.
    #[must_use]
    pub const fn raw(self) -> i32 {
        self.0 as i32
    }

    /// Checks if this is the wildcard.
    #[must_use]
    pub const fn is_wildcard(self) -> bool {
        self.0 == -1
    }
}

impl TryFrom<i32> for SubVariant {
    type Error = IngredientError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SubVariant> for i32 {
    fn from(value: SubVariant) -> Self {
        value.raw()
    }
}

/// An ingredient of a recipe.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ingredient {
    item_type: ItemTypeId,
    sub_variant: SubVariant,
    metadata: Option<ItemMetadata>,
    name: String,
}

impl Ingredient {
    /// Creates an ingredient from an item.
    ///
    /// The name comes from `namer` and has no effect on identity.
    pub fn from_item<I: ItemLike>(item: &I, namer: &dyn ItemNamer) -> IngredientResult<Self> {
        let sub_variant = SubVariant::new(item.sub_variant())?;
        Ok(Self {
            item_type: item.item_type(),
            sub_variant,
            metadata: item.metadata().cloned(),
            name: namer.item_name(item),
        })
    }

    /// Creates an ingredient from its parts.
    #[must_use]
    pub fn new(
        item_type: ItemTypeId,
        sub_variant: SubVariant,
        metadata: Option<ItemMetadata>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            item_type,
            sub_variant,
            metadata,
            name: name.into(),
        }
    }

    /// See if any data can be used for this ingredient.
    #[must_use]
    pub const fn any_data(&self) -> bool {
        self.sub_variant.is_wildcard()
    }

    /// Item type of this ingredient.
    #[must_use]
    pub const fn item_type(&self) -> ItemTypeId {
        self.item_type
    }

    /// Sub-variant of this ingredient.
    #[must_use]
    pub const fn sub_variant(&self) -> SubVariant {
        self.sub_variant
    }

    /// Metadata of this ingredient.
    #[must_use]
    pub const fn metadata(&self) -> Option<&ItemMetadata> {
        self.metadata.as_ref()
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Creates a concrete item carrying this ingredient's identity.
    ///
    /// A wildcard ingredient produces sub-variant 0.
    #[must_use]
    pub fn to_item_value(&self, amount: u32) -> ItemValue {
        ItemValue {
            item_type: self.item_type,
            sub_variant: self.sub_variant.raw().max(0),
            metadata: self.metadata.clone(),
            quantity: amount,
        }
    }

    /// See if an item can be used as this ingredient.
    pub fn matches<I: ItemLike>(&self, candidate: Option<&I>) -> bool {
        let Some(item) = candidate else {
            return false;
        };
        if item.item_type() != self.item_type {
            return false;
        }
        if !self.any_data() && item.sub_variant() != self.sub_variant.raw() {
            return false;
        }
        self.metadata.as_ref() == item.metadata()
    }

    /// Checks if a present item can fill this requirement.
    pub fn satisfied_by<I: ItemLike>(&self, item: &I) -> bool {
        self.matches(Some(item))
    }

    /// Checks if two ingredients are the same requirement key.
    #[must_use]
    pub fn identity_eq(&self, other: &Self) -> bool {
        self.item_type == other.item_type
            && self.sub_variant == other.sub_variant
            && self.metadata == other.metadata
    }

    /// Order in which requirements are drained from an inventory.
    ///
    /// Concrete sub-variants come before wildcards so a wildcard never eats
    /// items that a concrete requirement of the same type needs.
    pub(crate) fn consumption_order(&self, other: &Self) -> Ordering {
        self.any_data()
            .cmp(&other.any_data())
            .then(self.item_type.cmp(&other.item_type))
            .then(self.sub_variant.cmp(&other.sub_variant))
            .then_with(|| self.metadata.cmp(&other.metadata))
            .then_with(|| self.name.cmp(&other.name))
    }
}

impl PartialEq for Ingredient {
    fn eq(&self, other: &Self) -> bool {
        self.identity_eq(other)
    }
}

impl Eq for Ingredient {}

impl Hash for Ingredient {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.item_type.hash(state);
        self.sub_variant.hash(state);
        self.metadata.hash(state);
    }
}
