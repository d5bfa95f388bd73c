//! Storage for one dungeon level.
//!
//! A [`Chunk`] exclusively owns its grid of [`Square`]s, the object table and
//! the monster array. Terrain is not populated here: generation code carves
//! the level after allocation through [`Chunk::set_feat`].

use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};

use super::monsters::MonsterTable;
use super::objects::ObjectList;
use super::{ObjectHandle, ObjectStore, Position, Square, SquareFlags, Tick, Trap};
use crate::config::CaveConfig;
use crate::feature::{FeatureId, FeatureTable};

/// Process-unique identity of a chunk.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ChunkId(u32);

impl fmt::Display for ChunkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "chunk#{}", self.0)
    }
}

static NEXT_CHUNK_ID: AtomicU32 = AtomicU32::new(1);

impl ChunkId {
    fn next() -> Self {
        Self(NEXT_CHUNK_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Number of squares in a `height` x `width` grid; negative sides count as 0.
fn cell_count(height: i32, width: i32) -> usize {
    let height = usize::try_from(height).unwrap_or(0);
    let width = usize::try_from(width).unwrap_or(0);
    height * width
}

/// One level's grid plus its indexed object and monster lists.
///
/// Cloning yields a distinct chunk with its own [`ChunkId`], so a copy of the
/// live level is never mistaken for it.
#[derive(Debug)]
pub struct Chunk {
    id: ChunkId,
    name: Option<String>,
    created_at: Tick,
    height: i32,
    width: i32,
    squares: Vec<Square>,
    feat_count: Vec<usize>,
    pub(crate) objects: ObjectList,
    pub(crate) monsters: MonsterTable,
    pub(crate) config: CaveConfig,
}

impl Clone for Chunk {
    fn clone(&self) -> Self {
        Self {
            id: ChunkId::next(),
            name: self.name.clone(),
            created_at: self.created_at,
            height: self.height,
            width: self.width,
            squares: self.squares.clone(),
            feat_count: self.feat_count.clone(),
            objects: self.objects.clone(),
            monsters: self.monsters.clone(),
            config: self.config,
        }
    }
}

impl Chunk {
    /// Allocates an empty level of `height` rows and `width` columns.
    ///
    /// Every square starts as feature 0 with no flags, trap or objects. The
    /// object table gets `config.object_list_size` usable slots behind the
    /// sentinel and the monster array `config.level_monster_max` entries.
    pub fn new(
        height: i32,
        width: i32,
        features: &FeatureTable,
        config: &CaveConfig,
        created_at: Tick,
    ) -> Self {
        let height = height.max(0);
        let width = width.max(0);
        let id = ChunkId::next();
        let cells = cell_count(height, width);

        let mut feat_count = vec![0; features.len() + 1];
        feat_count[0] = cells;

        tracing::debug!(%id, height, width, %created_at, "allocated chunk");

        Self {
            id,
            name: None,
            created_at,
            height,
            width,
            squares: vec![Square::default(); cells],
            feat_count,
            objects: ObjectList::new(config.object_list_size),
            monsters: MonsterTable::new(config.level_monster_max),
            config: *config,
        }
    }

    /// Empty chunk with the same dimensions, tunables and object capacity.
    ///
    /// Used for the player's memory of a level, which must share the live
    /// level's object index space.
    pub fn blank_copy(&self) -> Self {
        let id = ChunkId::next();
        let mut feat_count = vec![0; self.feat_count.len()];
        feat_count[0] = self.squares.len();

        Self {
            id,
            name: self.name.clone(),
            created_at: self.created_at,
            height: self.height,
            width: self.width,
            squares: vec![Square::default(); self.squares.len()],
            feat_count,
            objects: ObjectList::new(self.objects.capacity()),
            monsters: MonsterTable::new(self.monsters.capacity()),
            config: self.config,
        }
    }

    /// Releases the level together with everything its squares own.
    ///
    /// Traps and pile objects are freed square by square, row by row, before
    /// the grid itself; the object table and monster array go last. Pile
    /// objects are released from `store`, so any handle to them goes stale.
    pub fn destroy(mut self, store: &mut ObjectStore) {
        let mut traps = 0usize;
        let mut freed = 0usize;

        for square in self.squares.iter_mut() {
            square.info = SquareFlags::empty();
            if square.trap.take().is_some() {
                traps += 1;
            }
            for handle in square.pile.drain(..) {
                if store.release(handle).is_some() {
                    freed += 1;
                }
            }
        }

        tracing::debug!(
            id = %self.id,
            traps,
            objects = freed,
            "destroyed chunk"
        );
    }

    pub fn id(&self) -> ChunkId {
        self.id
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }

    pub fn created_at(&self) -> Tick {
        self.created_at
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn config(&self) -> &CaveConfig {
        &self.config
    }

    /// True when `pos` lies on the grid.
    #[inline]
    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.y >= 0 && pos.x >= 0 && pos.y < self.height && pos.x < self.width
    }

    /// True when `pos` and all eight of its neighbours lie on the grid.
    #[inline]
    pub fn in_bounds_fully(&self, pos: Position) -> bool {
        pos.y > 0 && pos.x > 0 && pos.y < self.height - 1 && pos.x < self.width - 1
    }

    #[inline]
    fn offset(&self, pos: Position) -> Option<usize> {
        self.in_bounds(pos)
            .then(|| (pos.y * self.width + pos.x) as usize)
    }

    pub fn square(&self, pos: Position) -> Option<&Square> {
        self.offset(pos).map(|offset| &self.squares[offset])
    }

    pub(crate) fn square_mut(&mut self, pos: Position) -> Option<&mut Square> {
        self.offset(pos).map(move |offset| &mut self.squares[offset])
    }

    pub fn feat(&self, pos: Position) -> Option<FeatureId> {
        self.square(pos).map(Square::feat)
    }

    /// Changes the terrain at `pos`, keeping the per-feature counters in step.
    pub fn set_feat(&mut self, pos: Position, feat: FeatureId) {
        let Some(offset) = self.offset(pos) else {
            return;
        };
        if feat.index() >= self.feat_count.len() {
            self.feat_count.resize(feat.index() + 1, 0);
        }

        let old = std::mem::replace(&mut self.squares[offset].feat, feat);
        self.feat_count[old.index()] -= 1;
        self.feat_count[feat.index()] += 1;
    }

    /// Sets every square of the level to `feat`.
    pub fn fill(&mut self, feat: FeatureId) {
        for y in 0..self.height {
            for x in 0..self.width {
                self.set_feat(Position::new(y, x), feat);
            }
        }
    }

    /// Number of squares currently carrying `feat`.
    pub fn feat_count(&self, feat: FeatureId) -> usize {
        self.feat_count.get(feat.index()).copied().unwrap_or(0)
    }

    pub fn info(&self, pos: Position) -> SquareFlags {
        self.square(pos).map(Square::info).unwrap_or_default()
    }

    pub fn set_info(&mut self, pos: Position, flags: SquareFlags) {
        if let Some(square) = self.square_mut(pos) {
            square.info.insert(flags);
        }
    }

    pub fn clear_info(&mut self, pos: Position, flags: SquareFlags) {
        if let Some(square) = self.square_mut(pos) {
            square.info.remove(flags);
        }
    }

    pub fn trap(&self, pos: Position) -> Option<&Trap> {
        self.square(pos).and_then(Square::trap)
    }

    /// Puts `trap` on `pos`, returning the trap it replaced.
    pub fn place_trap(&mut self, pos: Position, trap: Trap) -> Option<Trap> {
        let square = self.square_mut(pos)?;
        square.info.insert(SquareFlags::TRAP);
        square.trap.replace(trap)
    }

    pub fn remove_trap(&mut self, pos: Position) -> Option<Trap> {
        let square = self.square_mut(pos)?;
        square.info.remove(SquareFlags::TRAP);
        square.trap.take()
    }

    /// Objects lying on `pos`, head of the pile first.
    pub fn pile(&self, pos: Position) -> &[ObjectHandle] {
        self.square(pos).map(Square::pile).unwrap_or(&[])
    }

    pub fn pile_contains(&self, pos: Position, handle: ObjectHandle) -> bool {
        self.pile(pos).contains(&handle)
    }

    /// Pushes `handle` onto the head of the pile at `pos`.
    ///
    /// Returns false when `pos` is off the grid or the object is already there.
    pub fn pile_insert(&mut self, pos: Position, handle: ObjectHandle) -> bool {
        match self.square_mut(pos) {
            Some(square) if !square.pile.contains(&handle) => {
                square.pile.insert(0, handle);
                true
            }
            _ => false,
        }
    }

    /// Unlinks `handle` from the pile at `pos`.
    pub fn pile_excise(&mut self, pos: Position, handle: ObjectHandle) -> bool {
        let Some(square) = self.square_mut(pos) else {
            return false;
        };
        match square.pile.iter().position(|&h| h == handle) {
            Some(index) => {
                square.pile.remove(index);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Object, ObjectKind, TrapFlags};
    use crate::testing::{chunk, standard_features};

    #[test]
    fn new_chunk_is_zeroed() {
        let c = chunk(6, 9);
        assert_eq!((c.height(), c.width()), (6, 9));
        assert_eq!(c.feat_count(FeatureId(0)), 54);
        assert_eq!(c.info(Position::new(3, 3)), SquareFlags::empty());
        assert!(c.trap(Position::new(3, 3)).is_none());
        assert!(c.pile(Position::new(3, 3)).is_empty());
        assert_eq!(c.object_capacity(), CaveConfig::DEFAULT_OBJECT_LIST_SIZE);
        assert_eq!(c.monster_capacity(), CaveConfig::DEFAULT_LEVEL_MONSTER_MAX);
        assert!(c.name().is_none());
    }

    #[test]
    fn chunks_get_distinct_ids() {
        assert_ne!(chunk(3, 3).id(), chunk(3, 3).id());
    }

    #[test]
    fn clones_are_new_chunks() {
        let c = chunk(4, 7);
        let copy = c.clone();
        assert_ne!(copy.id(), c.id());
        assert_eq!((copy.height(), copy.width()), (4, 7));
        assert_eq!(copy.feat_count(FeatureId(0)), 28);
    }

    #[test]
    fn cell_count_does_not_wrap() {
        assert_eq!(cell_count(50_000, 50_000), 2_500_000_000);
        assert_eq!(cell_count(-3, 8), 0);
        assert_eq!(cell_count(22, 66), 1452);
    }

    #[test]
    fn fully_in_bounds_excludes_the_edge() {
        let c = chunk(5, 5);
        assert!(c.in_bounds(Position::new(0, 0)));
        assert!(!c.in_bounds_fully(Position::new(0, 0)));
        assert!(c.in_bounds_fully(Position::new(1, 1)));
        assert!(c.in_bounds_fully(Position::new(3, 3)));
        assert!(!c.in_bounds_fully(Position::new(4, 3)));
        assert!(!c.in_bounds(Position::new(5, 0)));
        assert!(!c.in_bounds(Position::new(-1, 2)));
    }

    #[test]
    fn set_feat_tracks_counts() {
        let mut c = chunk(4, 4);
        let floor = FeatureId(1);
        c.set_feat(Position::new(1, 1), floor);
        c.set_feat(Position::new(1, 2), floor);
        c.set_feat(Position::new(1, 2), floor);
        assert_eq!(c.feat_count(floor), 2);
        assert_eq!(c.feat_count(FeatureId(0)), 14);

        c.fill(floor);
        assert_eq!(c.feat_count(floor), 16);
        assert_eq!(c.feat_count(FeatureId(0)), 0);
    }

    #[test]
    fn off_grid_writes_are_ignored() {
        let mut c = chunk(4, 4);
        c.set_feat(Position::new(9, 9), FeatureId(1));
        assert_eq!(c.feat_count(FeatureId(1)), 0);
        assert!(c.place_trap(Position::new(-1, 0), Trap::new(1, TrapFlags::empty())).is_none());
    }

    #[test]
    fn traps_set_and_clear_the_trap_flag() {
        let mut c = chunk(4, 4);
        let pos = Position::new(2, 2);
        assert!(c.place_trap(pos, Trap::new(3, TrapFlags::VISIBLE)).is_none());
        assert!(c.info(pos).contains(SquareFlags::TRAP));
        assert_eq!(c.trap(pos).map(|t| t.kind), Some(3));

        assert_eq!(c.remove_trap(pos).map(|t| t.kind), Some(3));
        assert!(!c.info(pos).contains(SquareFlags::TRAP));
    }

    #[test]
    fn pile_keeps_newest_first() {
        let mut store = ObjectStore::new();
        let mut c = chunk(4, 4);
        let pos = Position::new(1, 1);
        let a = store.create(Object::new(ObjectKind(1), 1));
        let b = store.create(Object::new(ObjectKind(2), 1));

        assert!(c.pile_insert(pos, a));
        assert!(c.pile_insert(pos, b));
        assert!(!c.pile_insert(pos, a));
        assert_eq!(c.pile(pos), &[b, a]);

        assert!(c.pile_excise(pos, b));
        assert!(!c.pile_excise(pos, b));
        assert_eq!(c.pile(pos), &[a]);
    }

    #[test]
    fn destroy_releases_every_pile_object() {
        let mut store = ObjectStore::new();
        let mut c = chunk(8, 8);
        for y in 1..7 {
            let handle = store.create(Object::new(ObjectKind(y as u16), 1));
            c.pile_insert(Position::new(y, y), handle);
            c.place_trap(Position::new(y, 1), Trap::new(1, TrapFlags::VISIBLE));
        }
        let unrelated = store.create(Object::new(ObjectKind(99), 1));
        assert_eq!(store.len(), 7);

        c.destroy(&mut store);
        assert_eq!(store.len(), 1);
        assert!(store.contains(unrelated));
    }

    #[test]
    fn destroying_an_unpopulated_chunk_is_harmless() {
        let mut store = ObjectStore::new();
        for (h, w) in [(1, 1), (3, 7), (66, 198)] {
            let c = Chunk::new(h, w, &standard_features(), &CaveConfig::default(), Tick::ZERO);
            c.destroy(&mut store);
        }
        assert!(store.is_empty());
    }
}
