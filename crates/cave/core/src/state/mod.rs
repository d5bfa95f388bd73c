//! Authoritative state of the current dungeon level.
//!
//! This module owns the grid ([`Chunk`]), the object arena
//! ([`ObjectStore`]) and the [`WorldContext`] tying the live level to the
//! player's memory of it. Object tables and the monster array are exposed as
//! operations on [`Chunk`].
mod chunk;
mod error;
mod monsters;
mod objects;
mod placement;
mod predicates;
pub mod types;
mod world;

pub use chunk::{Chunk, ChunkId};
pub use error::IntegrityError;
pub use objects::{assert_object_integrity, check_object_integrity};
pub use placement::{FeatCount, count_feats};
pub use types::{
    KEYPAD_OFFSETS, KEYPAD_ORIGIN, Monster, Object, ObjectHandle, ObjectKind, ObjectStore, Offset,
    Position, RaceId, SlotIndex, Square, SquareFlags, Tick, Trap, TrapFlags,
};
pub use world::{Player, WorldContext};
