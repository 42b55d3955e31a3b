//! Error types for quickcraft.

use thiserror::Error;

/// Top-level error type for quickcraft operations.
#[derive(Debug, Error)]
pub enum QuickcraftError {
    /// Ingredient construction errors
    #[error("Ingredient error: {0}")]
    Ingredient(#[from] IngredientError),

    /// Configuration errors
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// Ingredient construction errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IngredientError {
    /// Sub-variant outside the representable range
    #[error("Invalid sub-variant {value}: expected -1 or 0..=255")]
    InvalidSubVariant {
        /// The rejected raw value
        value: i32,
    },
}

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed configuration text
    #[error("Parse error: {0}")]
    Parse(String),

    /// An item key that the host cannot resolve to a type
    #[error("Unknown item type: '{0}'")]
    UnknownItemType(String),

    /// A sub-variant key that is neither `d` nor a number
    #[error("Item data is not 'd' or a number: {0}")]
    InvalidDataKey(String),
}

/// Result type alias for quickcraft operations.
pub type QuickcraftResult<T> = Result<T, QuickcraftError>;

/// Result type for ingredient construction.
pub type IngredientResult<T> = Result<T, IngredientError>;

/// Result type for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;
