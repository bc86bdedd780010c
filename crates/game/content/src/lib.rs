//! Data-driven content definitions and loaders.
//!
//! This crate houses the creature/tool/spell catalog and provides loaders for
//! RON/TOML data files:
//! - Catalog entries (data-driven via RON)
//! - Battle rules (`GameConfig`, data-driven via TOML)
//!
//! Content is turned into battle entities through [`Catalog`], which runs the
//! stat deriver; catalog data itself never appears in battle state.

pub mod catalog;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use catalog::{Catalog, CatalogError, CreatureEntry, CreaturePick, Selection, SpellEntry, ToolEntry};

#[cfg(feature = "loaders")]
pub use loaders::{CatalogLoader, ConfigLoader, ContentFactory, LoadResult};
