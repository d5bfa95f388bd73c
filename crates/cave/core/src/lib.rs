//! World-state core of a turn-based dungeon crawler.
//!
//! `cave-core` holds one dungeon level (a [`Chunk`]): its grid of squares,
//! the terrain registry those squares refer to, and the indexed lists of
//! objects and monsters on it. The player's partial knowledge of the level is
//! a second chunk kept in step with the live one through [`WorldContext`].
pub mod config;
pub mod env;
pub mod error;
pub mod feature;
pub mod state;

#[cfg(test)]
mod testing;

pub use config::CaveConfig;
pub use env::{LineOfSight, PcgRng, ProjectablePath, RngOracle, level_seed};
pub use error::{CaveError, ErrorSeverity};
pub use feature::{
    Feature, FeatureError, FeatureId, FeatureTable, TerrainFlags, WellKnown, WellKnownFeatures,
    resolve_well_known_ids, well_known,
};
pub use state::{
    Chunk, ChunkId, FeatCount, IntegrityError, Monster, Object, ObjectHandle, ObjectKind,
    ObjectStore, Player, Position, RaceId, SlotIndex, SquareFlags, Tick, Trap, TrapFlags,
    WorldContext, assert_object_integrity, check_object_integrity, count_feats,
};
