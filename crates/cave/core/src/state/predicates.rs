//! Terrain questions asked of a single square.
//!
//! These are the building blocks handed to neighbourhood scans such as
//! [`count_feats`](super::count_feats).

use super::{Chunk, Position};
use crate::feature::{FeatureTable, TerrainFlags};

impl Chunk {
    /// True when the terrain at `pos` carries every flag in `flags`.
    pub fn has_terrain(&self, features: &FeatureTable, pos: Position, flags: TerrainFlags) -> bool {
        self.feat(pos)
            .is_some_and(|feat| features.flags(feat).contains(flags))
    }

    pub fn is_floor(&self, features: &FeatureTable, pos: Position) -> bool {
        self.has_terrain(features, pos, TerrainFlags::FLOOR)
    }

    pub fn is_passable(&self, features: &FeatureTable, pos: Position) -> bool {
        self.has_terrain(features, pos, TerrainFlags::PASSABLE)
    }

    pub fn is_projectable(&self, features: &FeatureTable, pos: Position) -> bool {
        self.has_terrain(features, pos, TerrainFlags::PROJECT)
    }

    /// Any door, including secret ones.
    pub fn is_door(&self, features: &FeatureTable, pos: Position) -> bool {
        self.has_terrain(features, pos, TerrainFlags::DOOR_ANY)
    }

    pub fn is_closed_door(&self, features: &FeatureTable, pos: Position) -> bool {
        self.has_terrain(features, pos, TerrainFlags::DOOR_CLOSED)
    }

    pub fn is_stairs(&self, features: &FeatureTable, pos: Position) -> bool {
        self.has_terrain(features, pos, TerrainFlags::STAIR)
    }

    pub fn is_rock(&self, features: &FeatureTable, pos: Position) -> bool {
        self.has_terrain(features, pos, TerrainFlags::ROCK)
    }

    pub fn is_permanent(&self, features: &FeatureTable, pos: Position) -> bool {
        self.has_terrain(features, pos, TerrainFlags::PERMANENT)
    }

    /// A trap the player could notice.
    pub fn is_visible_trap(&self, pos: Position) -> bool {
        self.trap(pos).is_some_and(|trap| trap.is_visible())
    }

    /// Floor square with nothing lying on it.
    pub fn is_empty_floor(&self, features: &FeatureTable, pos: Position) -> bool {
        self.is_floor(features, pos) && self.pile(pos).is_empty()
    }
}

#[cfg(test)]
mod tests {
    use crate::feature::WellKnown;
    use crate::state::{Position, Trap, TrapFlags};
    use crate::testing::{open_room, standard_features};

    #[test]
    fn doors_are_classified_by_flags() {
        let features = standard_features();
        let mut c = open_room(&features, 6, 6);
        let closed = features.lookup(WellKnown::ClosedDoor.name()).unwrap();
        let open = features.lookup(WellKnown::OpenDoor.name()).unwrap();
        let secret = features.lookup(WellKnown::SecretDoor.name()).unwrap();
        c.set_feat(Position::new(1, 1), closed);
        c.set_feat(Position::new(1, 2), open);
        c.set_feat(Position::new(1, 3), secret);

        assert!(c.is_closed_door(&features, Position::new(1, 1)));
        assert!(!c.is_closed_door(&features, Position::new(1, 2)));
        assert!(c.is_door(&features, Position::new(1, 2)));
        assert!(c.is_door(&features, Position::new(1, 3)));
        assert!(c.is_rock(&features, Position::new(1, 3)));
        assert!(!c.is_door(&features, Position::new(2, 2)));
    }

    #[test]
    fn off_grid_squares_match_nothing() {
        let features = standard_features();
        let c = open_room(&features, 4, 4);
        assert!(!c.is_floor(&features, Position::new(-1, -1)));
        assert!(!c.is_rock(&features, Position::new(4, 0)));
    }

    #[test]
    fn only_visible_traps_are_reported() {
        let features = standard_features();
        let mut c = open_room(&features, 5, 5);
        c.place_trap(Position::new(1, 1), Trap::new(1, TrapFlags::VISIBLE));
        c.place_trap(Position::new(1, 2), Trap::new(1, TrapFlags::empty()));
        c.place_trap(
            Position::new(1, 3),
            Trap::new(1, TrapFlags::VISIBLE | TrapFlags::INVISIBLE),
        );

        assert!(c.is_visible_trap(Position::new(1, 1)));
        assert!(!c.is_visible_trap(Position::new(1, 2)));
        assert!(!c.is_visible_trap(Position::new(1, 3)));
        assert!(!c.is_visible_trap(Position::new(2, 2)));
    }
}
