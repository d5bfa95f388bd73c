//! Line-of-sight between two squares of a chunk.

use crate::feature::{FeatureTable, TerrainFlags};
use crate::state::{Chunk, Position};

/// Visibility predicate used by placement searches.
pub trait LineOfSight {
    fn los(&self, chunk: &Chunk, from: Position, to: Position) -> bool;
}

impl<F> LineOfSight for F
where
    F: Fn(&Chunk, Position, Position) -> bool,
{
    fn los(&self, chunk: &Chunk, from: Position, to: Position) -> bool {
        self(chunk, from, to)
    }
}

/// Sight along a straight (Bresenham) line: every square strictly between
/// the endpoints must let projections through.
#[derive(Clone, Copy, Debug)]
pub struct ProjectablePath<'a> {
    features: &'a FeatureTable,
}

impl<'a> ProjectablePath<'a> {
    pub fn new(features: &'a FeatureTable) -> Self {
        Self { features }
    }
}

impl LineOfSight for ProjectablePath<'_> {
    fn los(&self, chunk: &Chunk, from: Position, to: Position) -> bool {
        if !chunk.in_bounds(from) || !chunk.in_bounds(to) {
            return false;
        }

        let dy = (to.y - from.y).abs();
        let dx = (to.x - from.x).abs();
        if dy <= 1 && dx <= 1 {
            return true;
        }

        let sy = (to.y - from.y).signum();
        let sx = (to.x - from.x).signum();
        let mut err = dx - dy;
        let mut cursor = from;

        loop {
            let doubled = 2 * err;
            if doubled > -dy {
                err -= dy;
                cursor.x += sx;
            }
            if doubled < dx {
                err += dx;
                cursor.y += sy;
            }
            if cursor == to {
                return true;
            }

            let open = chunk
                .feat(cursor)
                .is_some_and(|feat| self.features.flags(feat).contains(TerrainFlags::PROJECT));
            if !open {
                return false;
            }
        }
    }
}
