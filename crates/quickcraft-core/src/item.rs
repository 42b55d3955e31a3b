//! Item values and the host item abstraction.
//!
//! The core never owns the host's item representation. Everything it needs
//! goes through [`ItemLike`]: type, sub-variant, metadata, and quantity.
//! [`ItemValue`] is a plain implementation used for recipe definitions,
//! result previews, and tests.
//!
//! An inventory is an ordered slice of `Option<I>` slots, where `None` is
//! the absent marker.

use quickcraft_common::ItemTypeId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Sub-variant value meaning "any data".
pub const ANY_DATA: i32 = -1;

/// Largest valid concrete sub-variant.
pub const MAX_SUB_VARIANT: i32 = 255;

/// A single property value attached to item metadata.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MetadataValue {
    /// Integer property (enchantment level, charge, ...).
    Int(i64),
    /// Text property.
    Text(String),
    /// Boolean flag.
    Flag(bool),
}

/// Optional rich metadata attached to an item.
///
/// Compared by full structural equality: two blocks are equal only if the
/// display name, lore, and every property match.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ItemMetadata {
    /// Custom display name.
    pub display_name: Option<String>,
    /// Lore lines.
    pub lore: Vec<String>,
    /// Named properties. Ordered so hashing is deterministic.
    pub properties: BTreeMap<String, MetadataValue>,
}

impl ItemMetadata {
    /// Create empty metadata.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create metadata carrying only a display name.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            display_name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Set a property value.
    #[must_use]
    pub fn with_property(mut self, key: impl Into<String>, value: MetadataValue) -> Self {
        self.properties.insert(key.into(), value);
        self
    }

    /// Append a lore line.
    #[must_use]
    pub fn with_lore(mut self, line: impl Into<String>) -> Self {
        self.lore.push(line.into());
        self
    }

    /// Get a property value.
    #[must_use]
    pub fn property(&self, key: &str) -> Option<&MetadataValue> {
        self.properties.get(key)
    }
}

/// The host's item representation, as seen by the core.
pub trait ItemLike {
    /// Item type.
    fn item_type(&self) -> ItemTypeId;

    /// Raw sub-variant ("data value"). `-1` means any data.
    fn sub_variant(&self) -> i32;

    /// Attached metadata, if any.
    fn metadata(&self) -> Option<&ItemMetadata>;

    /// Number of items held.
    fn quantity(&self) -> u32;

    /// Overwrite the number of items held.
    fn set_quantity(&mut self, quantity: u32);

    /// Checks if this is a void (air) item.
    fn is_void(&self) -> bool {
        self.item_type().is_void()
    }
}

/// A concrete attributed item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemValue {
    /// Item type.
    pub item_type: ItemTypeId,
    /// Sub-variant, `-1` for any.
    pub sub_variant: i32,
    /// Optional metadata.
    pub metadata: Option<ItemMetadata>,
    /// Stack quantity.
    pub quantity: u32,
}

impl ItemValue {
    /// Create an item with sub-variant 0 and no metadata.
    #[must_use]
    pub const fn new(item_type: ItemTypeId, quantity: u32) -> Self {
        Self {
            item_type,
            sub_variant: 0,
            metadata: None,
            quantity,
        }
    }

    /// Create an item with a sub-variant.
    #[must_use]
    pub const fn with_variant(item_type: ItemTypeId, sub_variant: i32, quantity: u32) -> Self {
        Self {
            item_type,
            sub_variant,
            metadata: None,
            quantity,
        }
    }

    /// Create an item that accepts any sub-variant.
    #[must_use]
    pub const fn any_data(item_type: ItemTypeId, quantity: u32) -> Self {
        Self::with_variant(item_type, ANY_DATA, quantity)
    }

    /// Attach metadata.
    #[must_use]
    pub fn with_metadata(mut self, metadata: ItemMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }
}

impl ItemLike for ItemValue {
    fn item_type(&self) -> ItemTypeId {
        self.item_type
    }

    fn sub_variant(&self) -> i32 {
        self.sub_variant
    }

    fn metadata(&self) -> Option<&ItemMetadata> {
        self.metadata.as_ref()
    }

    fn quantity(&self) -> u32 {
        self.quantity
    }

    fn set_quantity(&mut self, quantity: u32) {
        self.quantity = quantity;
    }
}

/// Sum of the quantities held in a slot sequence.
#[must_use]
pub fn total_quantity<I: ItemLike>(slots: &[Option<I>]) -> u64 {
    slots
        .iter()
        .flatten()
        .map(|item| u64::from(item.quantity()))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_value_creation() {
        let item = ItemValue::new(ItemTypeId::new(4), 12);
        assert_eq!(item.item_type(), ItemTypeId::new(4));
        assert_eq!(item.sub_variant(), 0);
        assert_eq!(item.quantity(), 12);
        assert!(item.metadata().is_none());
        assert!(!item.is_void());
    }

    #[test]
    fn test_void_item() {
        let air = ItemValue::new(ItemTypeId::VOID, 1);
        assert!(air.is_void());
    }

    #[test]
    fn test_any_data_item() {
        let item = ItemValue::any_data(ItemTypeId::new(35), 1);
        assert_eq!(item.sub_variant(), ANY_DATA);
    }

    #[test]
    fn test_metadata_equality() {
        let a = ItemMetadata::named("Excalibur")
            .with_property("sharpness", MetadataValue::Int(5))
            .with_lore("Pulled from a stone");
        let b = ItemMetadata::named("Excalibur")
            .with_lore("Pulled from a stone")
            .with_property("sharpness", MetadataValue::Int(5));
        assert_eq!(a, b);

        let c = a.clone().with_property("unbreakable", MetadataValue::Flag(true));
        assert_ne!(a, c);
        assert_eq!(c.property("unbreakable"), Some(&MetadataValue::Flag(true)));
    }

    #[test]
    fn test_set_quantity() {
        let mut item = ItemValue::new(ItemTypeId::new(1), 5);
        item.set_quantity(2);
        assert_eq!(item.quantity, 2);
    }

    #[test]
    fn test_total_quantity() {
        let slots = vec![
            Some(ItemValue::new(ItemTypeId::new(1), 3)),
            None,
            Some(ItemValue::new(ItemTypeId::new(2), 4)),
        ];
        assert_eq!(total_quantity(&slots), 7);
    }
}
