//! Crafting configuration.
//!
//! Loaded from TOML. Missing fields fall back to their defaults.

use quickcraft_common::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, error, warn};

use crate::catalog::RecipePages;
use crate::consume::{ConsumeMode, InventoryConsumer};

/// Slots per row in the recipe grid.
pub const ROW_WIDTH: usize = 9;

/// Default recipes per page (five rows).
pub const DEFAULT_PAGE_SIZE: usize = ROW_WIDTH * 5;

/// Settings for the crafting core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CraftConfig {
    /// Language code used to pick the item name table.
    pub language: String,
    /// Recipes shown per page.
    pub page_size: usize,
    /// Consumption behaviour when an inventory is short.
    pub consume_mode: ConsumeMode,
}

impl Default for CraftConfig {
    fn default() -> Self {
        Self {
            language: String::from("EN"),
            page_size: DEFAULT_PAGE_SIZE,
            consume_mode: ConsumeMode::Atomic,
        }
    }
}

impl CraftConfig {
    /// Parses a config from TOML text.
    pub fn from_toml_str(text: &str) -> ConfigResult<Self> {
        toml::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Serializes the config to TOML text.
    pub fn to_toml_string(&self) -> ConfigResult<String> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Loads from a TOML file and logs any validation findings.
    pub fn load_from_file(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;

        let validation = config.validate();
        for warning in &validation.warnings {
            warn!("{}: {}", path.display(), warning);
        }
        for message in &validation.errors {
            error!("{}: {}", path.display(), message);
        }
        debug!("Loaded craft config from {}", path.display());
        Ok(config)
    }

    /// Saves to a TOML file.
    pub fn save_to_file(&self, path: &Path) -> ConfigResult<()> {
        std::fs::write(path, self.to_toml_string()?)?;
        Ok(())
    }

    /// Validate settings.
    #[must_use]
    pub fn validate(&self) -> ConfigValidation {
        let mut validation = ConfigValidation::new();

        if self.language.trim().is_empty() {
            validation.add_error("Language must not be empty");
        }
        if self.page_size == 0 {
            validation.add_error("Page size must be at least 1");
        } else if self.page_size % ROW_WIDTH != 0 {
            validation.add_warning("Page size is not a whole number of rows");
        }
        if self.consume_mode.is_legacy() {
            validation.add_warning("Legacy consume mode can partially drain inventories");
        }

        validation
    }

    /// A consumer using the configured mode.
    #[must_use]
    pub const fn consumer(&self) -> InventoryConsumer {
        InventoryConsumer::new(self.consume_mode)
    }

    /// An empty pager using the configured page size.
    #[must_use]
    pub fn pages<R>(&self) -> RecipePages<R> {
        RecipePages::new(self.page_size)
    }
}

/// Validation result for configuration.
#[derive(Debug, Clone, Default)]
pub struct ConfigValidation {
    /// Error messages.
    pub errors: Vec<String>,
    /// Warning messages.
    pub warnings: Vec<String>,
}

impl ConfigValidation {
    /// Create empty validation result.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an error.
    pub fn add_error(&mut self, message: &str) {
        self.errors.push(message.to_string());
    }

    /// Add a warning.
    pub fn add_warning(&mut self, message: &str) {
        self.warnings.push(message.to_string());
    }

    /// Check if validation passed (no errors).
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Check if there are any warnings.
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}
