//! # Quickcraft Common
//!
//! Common types shared by the quickcraft crates.
//!
//! This crate provides:
//! - ID types (ItemTypeId, RecipeId, RequesterId)
//! - Common error types
//! - Prelude for convenient imports

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod error;
pub mod ids;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::*;
    pub use crate::ids::*;
}

pub use prelude::*;
