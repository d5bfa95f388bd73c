//! Terrain features and the name → id resolution step.
//!
//! The terrain table is loaded once from game data (see `cave-content`).
//! Everything else in the crate refers to terrain by [`FeatureId`] and asks
//! the [`FeatureTable`] for flags when it needs to classify a square.
mod error;
mod flags;
mod table;
mod well_known;

pub use error::FeatureError;
pub use flags::TerrainFlags;
pub use table::{Feature, FeatureId, FeatureTable};
pub use well_known::{WellKnown, WellKnownFeatures, resolve_well_known_ids, well_known};
