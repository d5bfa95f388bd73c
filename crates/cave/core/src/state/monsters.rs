//! Fixed-capacity monster array of a chunk.
//!
//! Monsters are addressed by small integer index. Index 0 is reserved, so
//! any index `<= 0` is an invalid handle. The high-water mark only grows:
//! a dead monster's index is never handed out again on the same level.

use super::{Chunk, Monster};

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct MonsterTable {
    monsters: Vec<Monster>,
    /// One past the highest index ever used.
    max: usize,
    count: usize,
    current: Option<usize>,
}

impl MonsterTable {
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            monsters: vec![Monster::default(); capacity.max(1)],
            max: 1,
            count: 0,
            current: None,
        }
    }

    pub(crate) fn capacity(&self) -> usize {
        self.monsters.len()
    }

    fn slot(&self, idx: i32) -> Option<usize> {
        usize::try_from(idx)
            .ok()
            .filter(|&idx| idx > 0 && idx < self.monsters.len())
    }
}

impl Chunk {
    /// Monster stored at `idx`, or `None` for an invalid index.
    ///
    /// Any slot inside the array is returned, including empty ones; check
    /// [`Monster::is_alive`] to tell them apart.
    pub fn monster(&self, idx: i32) -> Option<&Monster> {
        let slot = self.monsters.slot(idx)?;
        Some(&self.monsters.monsters[slot])
    }

    pub fn monster_mut(&mut self, idx: i32) -> Option<&mut Monster> {
        let slot = self.monsters.slot(idx)?;
        Some(&mut self.monsters.monsters[slot])
    }

    /// High-water mark: every index in use is below this value.
    pub fn monster_max(&self) -> i32 {
        self.monsters.max as i32
    }

    /// Number of live monsters on the level.
    pub fn monster_count(&self) -> i32 {
        self.monsters.count as i32
    }

    /// Array size fixed when the chunk was created.
    pub fn monster_capacity(&self) -> usize {
        self.monsters.monsters.len()
    }

    /// Cursor used by turn processing, `None` when no monster is being processed.
    pub fn monster_current(&self) -> Option<i32> {
        self.monsters.current.map(|idx| idx as i32)
    }

    pub fn set_monster_current(&mut self, idx: Option<i32>) {
        self.monsters.current = idx.and_then(|idx| self.monsters.slot(idx));
    }

    /// Stores `monster` at the next unused index.
    ///
    /// Returns `None` when the array is exhausted.
    pub fn push_monster(&mut self, monster: Monster) -> Option<i32> {
        let table = &mut self.monsters;
        if table.max >= table.monsters.len() {
            tracing::warn!(
                capacity = table.monsters.len(),
                "monster array exhausted"
            );
            return None;
        }

        let idx = table.max;
        let alive = monster.is_alive();
        table.monsters[idx] = monster;
        table.max += 1;
        if alive {
            table.count += 1;
        }
        Some(idx as i32)
    }

    /// Clears the slot at `idx`. The high-water mark is left untouched.
    pub fn delete_monster(&mut self, idx: i32) -> Option<Monster> {
        let slot = self.monsters.slot(idx)?;
        let table = &mut self.monsters;
        if !table.monsters[slot].is_alive() {
            return None;
        }

        let removed = std::mem::take(&mut table.monsters[slot]);
        table.count -= 1;
        if table.current == Some(slot) {
            table.current = None;
        }
        Some(removed)
    }

    /// Live monsters with their indices, in index order.
    pub fn monsters(&self) -> impl Iterator<Item = (i32, &Monster)> {
        self.monsters.monsters[..self.monsters.max]
            .iter()
            .enumerate()
            .skip(1)
            .filter(|(_, monster)| monster.is_alive())
            .map(|(idx, monster)| (idx as i32, monster))
    }
}
