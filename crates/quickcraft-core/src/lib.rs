//! # Quickcraft Core
//!
//! Ingredient matching and recipe listing.
//!
//! This crate provides:
//! - Item values and the host item abstraction
//! - Ingredient identity and wildcard-aware matching
//! - Ingredient counts built from item sequences
//! - Reverse-order inventory consumption, atomic or legacy
//! - Recipes and a per-requester recipe book
//! - Sorted recipe layouts published to paging sinks
//! - Item naming and configuration

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod catalog;
pub mod config;
pub mod consume;
pub mod ingredient;
pub mod item;
pub mod multiset;
pub mod naming;
pub mod recipe;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::catalog::*;
    pub use crate::config::*;
    pub use crate::consume::*;
    pub use crate::ingredient::*;
    pub use crate::item::*;
    pub use crate::multiset::*;
    pub use crate::naming::*;
    pub use crate::recipe::*;
}

pub use prelude::*;
