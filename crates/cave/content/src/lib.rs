//! Game data for the dungeon world state.
//!
//! Provides loaders for the data files a level is built from:
//! - Terrain table (data-driven via RON)
//! - Level tunables (data-driven via TOML)
//!
//! The bundled terrain table under `data/` names every terrain the engine
//! refers to directly, so [`cave_core::resolve_well_known_ids`] succeeds on it.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, FeatureLoader, LoadResult, TerrainCatalog, TerrainRecord};
