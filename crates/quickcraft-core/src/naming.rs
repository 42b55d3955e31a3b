//! Human-readable item names.
//!
//! Names are informational only. They label ingredients for display and
//! never take part in identity or matching.

use quickcraft_common::{ConfigError, ConfigResult, ItemTypeId};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, warn};

use crate::ingredient::SubVariant;
use crate::item::ItemLike;

/// Key used for the default name of an item type in name tables.
pub const DEFAULT_NAME_KEY: &str = "d";

/// Derives a display name for an item.
pub trait ItemNamer {
    /// Returns the name shown for `item`.
    fn item_name(&self, item: &dyn ItemLike) -> String;
}

impl<F> ItemNamer for F
where
    F: Fn(&dyn ItemLike) -> String,
{
    fn item_name(&self, item: &dyn ItemLike) -> String {
        self(item)
    }
}

/// Names for one item type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemNames {
    /// Name used when no sub-variant name applies.
    pub default_name: Option<String>,
    /// Names for specific sub-variants.
    pub variants: BTreeMap<i32, String>,
}

impl ItemNames {
    /// Names with only a default.
    #[must_use]
    pub fn single(name: impl Into<String>) -> Self {
        Self {
            default_name: Some(name.into()),
            variants: BTreeMap::new(),
        }
    }

    /// Name for a sub-variant, falling back to the default.
    #[must_use]
    pub fn get(&self, sub_variant: i32) -> Option<&str> {
        self.variants
            .get(&sub_variant)
            .or(self.default_name.as_ref())
            .map(String::as_str)
    }
}

/// Table-backed namer.
///
/// Lookup order: metadata display name, sub-variant name, type default,
/// then `type:<raw id>`.
#[derive(Debug, Clone, Default)]
pub struct NameTable {
    names: HashMap<ItemTypeId, ItemNames>,
}

impl NameTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the names for an item type.
    pub fn insert(&mut self, item_type: ItemTypeId, names: ItemNames) {
        self.names.insert(item_type, names);
    }

    /// Gets the names for an item type.
    #[must_use]
    pub fn get(&self, item_type: ItemTypeId) -> Option<&ItemNames> {
        self.names.get(&item_type)
    }

    /// Number of item types with names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Checks if the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Parses a name table from TOML.
    ///
    /// Entries live under `[items]`. A string value is a plain default name;
    /// a table maps `d` to the default and numeric keys to sub-variant names.
    /// Keys that `resolve` cannot map to a type are logged and skipped, as are
    /// sub-variant keys that are neither `d` nor a number.
    pub fn from_toml_str(
        text: &str,
        resolve: impl Fn(&str) -> Option<ItemTypeId>,
    ) -> ConfigResult<Self> {
        let root: toml::Table = text
            .parse()
            .map_err(|e: toml::de::Error| ConfigError::Parse(e.to_string()))?;

        let mut table = Self::new();
        let Some(items) = root.get("items").and_then(toml::Value::as_table) else {
            debug!("Name table has no [items] section");
            return Ok(table);
        };

        for (key, value) in items {
            let Some(item_type) = resolve(key) else {
                warn!("{}", ConfigError::UnknownItemType(key.clone()));
                continue;
            };

            let names = match value {
                toml::Value::String(name) => ItemNames::single(name.clone()),
                toml::Value::Table(section) => Self::parse_variants(key, section),
                other => {
                    warn!("Ignoring item '{}': unexpected {} value", key, other.type_str());
                    continue;
                }
            };

            if names.default_name.is_none() {
                warn!("Missing default (d) name for item: '{}'", key);
            }
            table.insert(item_type, names);
        }

        debug!("Loaded names for {} item types", table.len());
        Ok(table)
    }

    fn parse_variants(key: &str, section: &toml::Table) -> ItemNames {
        let mut names = ItemNames::default();
        for (data, value) in section {
            let Some(name) = value.as_str() else {
                warn!("Ignoring non-string name for item '{}' data '{}'", key, data);
                continue;
            };
            if data == DEFAULT_NAME_KEY {
                names.default_name = Some(name.to_string());
            } else if let Ok(num) = data.parse::<i32>() {
                match SubVariant::new(num) {
                    Ok(sub_variant) => {
                        names.variants.insert(sub_variant.raw(), name.to_string());
                    }
                    Err(e) => warn!("Ignoring name for item '{}': {}", key, e),
                }
            } else {
                warn!("{}", ConfigError::InvalidDataKey(data.clone()));
            }
        }
        names
    }
}

impl ItemNamer for NameTable {
    fn item_name(&self, item: &dyn ItemLike) -> String {
        if let Some(name) = item.metadata().and_then(|m| m.display_name.as_ref()) {
            return name.clone();
        }
        self.names
            .get(&item.item_type())
            .and_then(|names| names.get(item.sub_variant()))
            .map_or_else(
                || format!("type:{}", item.item_type().raw()),
                ToString::to_string,
            )
    }
}
