//! Collaborators the world-state core consumes but does not own.
//!
//! Placement searches need a random stream and a line-of-sight predicate.
//! Both are traits so callers can supply the game's real implementations;
//! [`PcgRng`] and [`ProjectablePath`] are the default ones.
mod rng;
mod sight;

pub use rng::{PcgRng, RngOracle, level_seed};
pub use sight::{LineOfSight, ProjectablePath};
