//! The live level, the player's memory of it, and the objects of both.
//!
//! [`WorldContext`] replaces process-wide "current level" and "current
//! player" globals. Every operation that has to keep the live object table
//! and the known table in step goes through it, so the mirror is always the
//! player's known chunk and never an unrelated level.

use super::{
    Chunk, FeatCount, IntegrityError, ObjectHandle, ObjectStore, Position, SlotIndex,
    check_object_integrity, count_feats,
};
use crate::env::{LineOfSight, RngOracle};
use crate::feature::WellKnownFeatures;

/// The active player: where they stand and what they remember of the level.
#[derive(Clone, Debug)]
pub struct Player {
    pub grid: Position,
    cave: Chunk,
}

impl Player {
    pub fn new(grid: Position, known: Chunk) -> Self {
        Self { grid, cave: known }
    }

    /// The player's known copy of the current level.
    pub fn cave(&self) -> &Chunk {
        &self.cave
    }
}

/// Explicit context for operations on the live level.
#[derive(Debug)]
pub struct WorldContext {
    cave: Chunk,
    player: Player,
    objects: ObjectStore,
    well_known: WellKnownFeatures,
}

impl WorldContext {
    /// Builds a context around `cave`, with a fresh, fully unknown memory of it.
    pub fn enter_level(
        cave: Chunk,
        player_grid: Position,
        objects: ObjectStore,
        well_known: WellKnownFeatures,
    ) -> Self {
        let mut known = cave.blank_copy();
        known.fill(well_known.unknown());
        Self {
            cave,
            player: Player::new(player_grid, known),
            objects,
            well_known,
        }
    }

    /// Builds a context from an existing level and player memory.
    pub fn new(
        cave: Chunk,
        player: Player,
        objects: ObjectStore,
        well_known: WellKnownFeatures,
    ) -> Self {
        Self {
            cave,
            player,
            objects,
            well_known,
        }
    }

    /// Tears both chunks down and hands the object store back.
    pub fn leave_level(self) -> ObjectStore {
        let Self {
            cave,
            player,
            mut objects,
            ..
        } = self;
        player.cave.destroy(&mut objects);
        cave.destroy(&mut objects);
        objects
    }

    pub fn cave(&self) -> &Chunk {
        &self.cave
    }

    /// Mutable access to the live level for terrain, traps and monsters.
    ///
    /// Object lists must still be changed through the context's object
    /// operations so the known mirror stays in step.
    pub fn cave_mut(&mut self) -> &mut Chunk {
        &mut self.cave
    }

    pub fn known(&self) -> &Chunk {
        &self.player.cave
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    pub fn objects(&self) -> &ObjectStore {
        &self.objects
    }

    pub fn objects_mut(&mut self) -> &mut ObjectStore {
        &mut self.objects
    }

    pub fn well_known(&self) -> &WellKnownFeatures {
        &self.well_known
    }

    /// True when `chunk` is the live level of this context.
    pub fn is_live(&self, chunk: &Chunk) -> bool {
        chunk.id() == self.cave.id()
    }

    /// Lists an object in the live level, mirroring growth into the known level.
    pub fn insert_object(&mut self, handle: ObjectHandle) -> Option<SlotIndex> {
        self.cave
            .insert_object(&mut self.objects, Some(&mut self.player.cave), handle)
    }

    /// Lists an object in a chunk that is not the live level.
    ///
    /// The chunk grows on its own; a clone of the live level is a separate
    /// chunk and never touches the known level.
    pub fn insert_object_into(&mut self, chunk: &mut Chunk, handle: ObjectHandle) -> Option<SlotIndex> {
        debug_assert!(!self.is_live(chunk));
        chunk.insert_object(&mut self.objects, None, handle)
    }

    /// Delists an object from the live level unless the player still remembers it.
    pub fn remove_object(&mut self, handle: ObjectHandle) -> bool {
        self.cave
            .remove_object(&mut self.objects, Some(&self.player.cave), handle)
    }

    pub fn check_integrity(&self) -> Result<(), IntegrityError> {
        check_object_integrity(&self.cave, &self.player.cave, &self.objects)
    }

    /// Puts an object on the live floor at `pos` and lists it.
    ///
    /// Returns `None` when `pos` is off the grid or the object is unknown.
    pub fn place_object(&mut self, handle: ObjectHandle, pos: Position) -> Option<SlotIndex> {
        if !self.cave.in_bounds(pos) || !self.objects.contains(handle) {
            return None;
        }
        if let Some(old) = self.objects.get(handle).and_then(|object| object.grid) {
            self.cave.pile_excise(old, handle);
        }

        self.cave.pile_insert(pos, handle);
        if let Some(object) = self.objects.get_mut(handle) {
            object.grid = Some(pos);
        }
        self.insert_object(handle)
    }

    /// Takes an object off the live floor and delists it.
    ///
    /// Returns true when the object also left the object table.
    pub fn lift_object(&mut self, handle: ObjectHandle) -> bool {
        let Some(grid) = self.objects.get_mut(handle).and_then(|object| object.grid.take()) else {
            return false;
        };
        self.cave.pile_excise(grid, handle);
        self.remove_object(handle)
    }

    /// Records what the player now knows about a listed live object.
    ///
    /// The remembered copy is created on first sight and refreshed afterwards;
    /// it sits in the known table at the live object's slot and, when the
    /// object lies on the floor, in the matching known pile.
    pub fn learn_object(&mut self, handle: ObjectHandle) -> Option<ObjectHandle> {
        let object = self.objects.get(handle)?;
        let slot = object.oidx;
        if !slot.is_listed() {
            return None;
        }
        let seen = object.remembered();
        let existing = object.known.filter(|&known| self.objects.contains(known));

        let known_handle = match existing {
            Some(known_handle) => {
                let previous = self.objects.get(known_handle).and_then(|known| known.grid);
                if let Some(grid) = previous {
                    self.player.cave.pile_excise(grid, known_handle);
                }
                if let Some(known) = self.objects.get_mut(known_handle) {
                    known.kind = seen.kind;
                    known.number = seen.number;
                    known.grid = seen.grid;
                }
                known_handle
            }
            None => {
                let known_handle = self.objects.create(seen);
                if let Some(object) = self.objects.get_mut(handle) {
                    object.known = Some(known_handle);
                }
                known_handle
            }
        };

        let grid = self.objects.get_mut(known_handle).and_then(|known| {
            known.oidx = slot;
            known.grid
        });
        self.player.cave.objects.set(slot, Some(known_handle));
        if let Some(grid) = grid {
            self.player.cave.pile_insert(grid, known_handle);
        }
        Some(known_handle)
    }

    /// Drops the player's memory of a live object.
    ///
    /// If the live object was removed while still remembered, the deferred
    /// removal completes now. Returns true when a memory was dropped.
    pub fn forget_object(&mut self, handle: ObjectHandle) -> bool {
        let Some(known_handle) = self.objects.get_mut(handle).and_then(|object| object.known.take())
        else {
            return false;
        };

        if let Some(known) = self.objects.release(known_handle) {
            if let Some(grid) = known.grid {
                self.player.cave.pile_excise(grid, known_handle);
            }
            if self.player.cave.objects.get(known.oidx) == Some(known_handle) {
                self.player.cave.objects.set(known.oidx, None);
            }
        }

        let deferred = self
            .objects
            .get(handle)
            .is_some_and(|object| object.delist_deferred);
        if deferred {
            self.remove_object(handle);
        }
        true
    }

    /// Copies the live terrain at `pos` into the player's memory.
    pub fn learn_square(&mut self, pos: Position) {
        if let Some(feat) = self.cave.feat(pos) {
            self.player.cave.set_feat(pos, feat);
        }
    }

    /// True when the player knows what terrain lies at `pos`.
    pub fn is_known(&self, pos: Position) -> bool {
        self.player
            .cave
            .feat(pos)
            .is_some_and(|feat| feat != self.well_known.unknown())
    }

    /// Counts squares around the player that satisfy `predicate`.
    pub fn count_feats<P>(&self, predicate: P, include_origin: bool) -> FeatCount
    where
        P: FnMut(&Chunk, Position) -> bool,
    {
        count_feats(
            &self.cave,
            &self.player.cave,
            self.well_known.unknown(),
            self.player.grid,
            include_origin,
            predicate,
        )
    }

    /// [`Chunk::scatter`] on the live level.
    pub fn scatter<R, L>(
        &self,
        rng: &mut R,
        sight: &L,
        origin: Position,
        max_distance: i32,
        need_los: bool,
    ) -> Position
    where
        R: RngOracle + ?Sized,
        L: LineOfSight + ?Sized,
    {
        self.cave
            .scatter(rng, sight, origin, max_distance, need_los)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CaveConfig;
    use crate::feature::{FeatureTable, WellKnown};
    use crate::state::{Object, ObjectKind, Tick};
    use crate::testing::{open_room, standard_features};

    fn world(features: &FeatureTable, config: CaveConfig) -> WorldContext {
        let well_known = WellKnownFeatures::resolve(features).unwrap();
        let mut cave = Chunk::new(12, 12, features, &config, Tick::new(40));
        let room = open_room(features, 12, 12);
        for y in 0..12 {
            for x in 0..12 {
                let pos = Position::new(y, x);
                cave.set_feat(pos, room.feat(pos).unwrap());
            }
        }
        WorldContext::enter_level(cave, Position::new(5, 5), ObjectStore::new(), well_known)
    }

    fn spawn(ctx: &mut WorldContext, kind: u16) -> ObjectHandle {
        ctx.objects_mut().create(Object::new(ObjectKind(kind), 1))
    }

    #[test]
    fn entering_a_level_knows_nothing() {
        let features = standard_features();
        let ctx = world(&features, CaveConfig::default());
        assert!(!ctx.is_known(Position::new(5, 5)));
        assert_eq!(ctx.known().object_capacity(), ctx.cave().object_capacity());
        assert!(ctx.is_live(ctx.cave()));
        assert!(!ctx.is_live(ctx.known()));
        assert_eq!(ctx.check_integrity(), Ok(()));
    }

    #[test]
    fn placed_objects_are_listed_and_piled() {
        let features = standard_features();
        let mut ctx = world(&features, CaveConfig::default());
        let a = spawn(&mut ctx, 1);
        let pos = Position::new(3, 4);

        let slot = ctx.place_object(a, pos).unwrap();
        assert_eq!(ctx.cave().object(slot), Some(a));
        assert_eq!(ctx.cave().pile(pos), &[a]);
        assert_eq!(ctx.objects().get(a).unwrap().grid, Some(pos));
        assert_eq!(ctx.check_integrity(), Ok(()));

        assert!(ctx.lift_object(a));
        assert!(ctx.cave().pile(pos).is_empty());
        assert!(!ctx.objects().get(a).unwrap().is_listed());
        assert_eq!(ctx.check_integrity(), Ok(()));
    }

    #[test]
    fn placing_off_the_grid_fails() {
        let features = standard_features();
        let mut ctx = world(&features, CaveConfig::default());
        let a = spawn(&mut ctx, 1);
        assert_eq!(ctx.place_object(a, Position::new(40, 2)), None);
        assert!(!ctx.objects().get(a).unwrap().is_listed());
    }

    #[test]
    fn learned_objects_mirror_their_slot() {
        let features = standard_features();
        let mut ctx = world(&features, CaveConfig::default());
        let a = spawn(&mut ctx, 1);
        let pos = Position::new(2, 2);
        let slot = ctx.place_object(a, pos).unwrap();

        let memory = ctx.learn_object(a).unwrap();
        assert_eq!(ctx.known().object(slot), Some(memory));
        assert_eq!(ctx.known().pile(pos), &[memory]);
        assert_eq!(ctx.objects().get(a).unwrap().known, Some(memory));
        assert_eq!(ctx.check_integrity(), Ok(()));

        assert_eq!(ctx.learn_object(a), Some(memory));
        assert_eq!(ctx.known().pile(pos), &[memory]);
    }

    #[test]
    fn unlisted_objects_cannot_be_learned() {
        let features = standard_features();
        let mut ctx = world(&features, CaveConfig::default());
        let a = spawn(&mut ctx, 1);
        assert_eq!(ctx.learn_object(a), None);
    }

    #[test]
    fn removal_waits_until_the_player_forgets() {
        let features = standard_features();
        let mut ctx = world(&features, CaveConfig::default());
        let a = spawn(&mut ctx, 1);
        let slot = ctx.place_object(a, Position::new(2, 3)).unwrap();
        ctx.learn_object(a);

        assert!(!ctx.lift_object(a));
        assert_eq!(ctx.cave().object(slot), Some(a));
        assert_eq!(ctx.check_integrity(), Ok(()));

        assert!(ctx.forget_object(a));
        assert_eq!(ctx.cave().object(slot), None);
        assert_eq!(ctx.known().object(slot), None);
        assert!(!ctx.objects().get(a).unwrap().is_listed());
        assert_eq!(ctx.check_integrity(), Ok(()));
    }

    #[test]
    fn replacing_a_deferred_object_keeps_it_listed() {
        let features = standard_features();
        let mut ctx = world(&features, CaveConfig::default());
        let a = spawn(&mut ctx, 1);
        let slot = ctx.place_object(a, Position::new(2, 3)).unwrap();
        ctx.learn_object(a);
        assert!(!ctx.lift_object(a));

        let floor = Position::new(4, 4);
        assert_eq!(ctx.place_object(a, floor), Some(slot));
        assert!(ctx.forget_object(a));

        let object = ctx.objects().get(a).unwrap();
        assert_eq!(object.grid, Some(floor));
        assert_eq!(object.slot(), slot);
        assert_eq!(ctx.cave().object(slot), Some(a));
        assert_eq!(ctx.cave().pile(floor), &[a]);
        assert_eq!(ctx.check_integrity(), Ok(()));

        assert!(ctx.lift_object(a));
        assert_eq!(ctx.cave().object(slot), None);
    }

    #[test]
    fn deferred_slots_stay_taken() {
        let features = standard_features();
        let mut ctx = world(&features, CaveConfig::default());
        let a = spawn(&mut ctx, 1);
        ctx.place_object(a, Position::new(2, 3));
        ctx.learn_object(a);
        ctx.lift_object(a);

        let b = spawn(&mut ctx, 2);
        assert_eq!(ctx.insert_object(b), Some(SlotIndex(2)));
        assert_eq!(ctx.check_integrity(), Ok(()));
    }

    #[test]
    fn live_growth_keeps_tables_paired() {
        let features = standard_features();
        let mut ctx = world(&features, CaveConfig::new().with_object_list(3, 2));
        for kind in 0..8 {
            let h = spawn(&mut ctx, kind);
            ctx.insert_object(h);
            ctx.learn_object(h);
        }
        assert_eq!(ctx.cave().object_capacity(), 9);
        assert_eq!(ctx.known().object_capacity(), 9);
        assert_eq!(ctx.check_integrity(), Ok(()));
    }

    #[test]
    fn scratch_chunks_grow_alone() {
        let features = standard_features();
        let mut ctx = world(&features, CaveConfig::new().with_object_list(1, 4));
        let mut scratch = Chunk::new(5, 5, &features, &CaveConfig::new().with_object_list(1, 4), Tick::ZERO);
        for kind in 0..2 {
            let h = spawn(&mut ctx, kind);
            ctx.insert_object_into(&mut scratch, h);
        }
        assert_eq!(scratch.object_capacity(), 5);
        assert_eq!(ctx.cave().object_capacity(), 1);
        assert_eq!(ctx.known().object_capacity(), 1);
    }

    #[test]
    fn copy_of_the_live_level_is_a_scratch_chunk() {
        let features = standard_features();
        let mut ctx = world(&features, CaveConfig::new().with_object_list(1, 4));
        let a = spawn(&mut ctx, 1);
        ctx.place_object(a, Position::new(3, 3)).unwrap();

        let mut copy = ctx.cave().clone();
        assert_ne!(copy.id(), ctx.cave().id());
        assert!(!ctx.is_live(&copy));

        let b = spawn(&mut ctx, 2);
        assert_eq!(ctx.insert_object_into(&mut copy, b), Some(SlotIndex(2)));
        assert_eq!(copy.object_capacity(), 5);
        assert_eq!(ctx.cave().object_capacity(), 1);
        assert_eq!(ctx.known().object_capacity(), 1);
        assert_eq!(ctx.check_integrity(), Ok(()));
    }

    #[test]
    fn counts_known_doors_around_the_player() {
        let features = standard_features();
        let mut ctx = world(&features, CaveConfig::default());
        let closed = ctx.well_known().get(WellKnown::ClosedDoor);
        ctx.cave_mut().set_feat(Position::new(6, 5), closed);
        ctx.cave_mut().set_feat(Position::new(4, 4), closed);

        let doors = |c: &Chunk, pos: Position| c.is_closed_door(&features, pos);
        assert_eq!(ctx.count_feats(doors, true).count, 0);

        for y in 4..=6 {
            for x in 4..=6 {
                ctx.learn_square(Position::new(y, x));
            }
        }
        let found = ctx.count_feats(doors, true);
        assert_eq!(found.count, 2);
        assert_eq!(found.last, Some(Position::new(4, 4)));
    }

    #[test]
    fn leaving_frees_floor_objects_and_memories() {
        let features = standard_features();
        let mut ctx = world(&features, CaveConfig::default());
        for kind in 0..4 {
            let h = spawn(&mut ctx, kind);
            ctx.place_object(h, Position::new(2 + kind as i32, 2));
            ctx.learn_object(h);
        }
        assert_eq!(ctx.objects().len(), 8);

        let store = ctx.leave_level();
        assert!(store.is_empty());
    }
}
