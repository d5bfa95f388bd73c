use std::fmt;

use super::Position;

/// Position of an object in its chunk's object table.
///
/// Slot 0 is a permanent sentinel: an object whose slot is
/// [`SlotIndex::UNLISTED`] is not in any table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct SlotIndex(pub usize);

impl SlotIndex {
    pub const UNLISTED: Self = Self(0);

    #[inline]
    pub const fn is_listed(self) -> bool {
        self.0 != 0
    }
}

impl fmt::Display for SlotIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "oidx {}", self.0)
    }
}

/// Object kind from the (external) object data table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct ObjectKind(pub u16);

/// Generational handle into an [`ObjectStore`].
///
/// A handle outlives the object it names only as a dead reference: once the
/// object is freed the generation no longer matches and lookups return `None`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ObjectHandle {
    index: u32,
    generation: u32,
}

impl fmt::Display for ObjectHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "obj#{}v{}", self.index, self.generation)
    }
}

/// A physical or remembered item.
///
/// Live objects may point at the player's remembered copy through `known`;
/// that link never owns the remembered object.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Object {
    pub kind: ObjectKind,
    pub number: u8,
    /// Floor position, if the object lies on the floor.
    pub grid: Option<Position>,
    /// The player's remembered version of this object.
    pub known: Option<ObjectHandle>,
    pub(crate) oidx: SlotIndex,
    pub(crate) delist_deferred: bool,
}

impl Object {
    pub fn new(kind: ObjectKind, number: u8) -> Self {
        Self {
            kind,
            number,
            grid: None,
            known: None,
            oidx: SlotIndex::UNLISTED,
            delist_deferred: false,
        }
    }

    /// Slot this object occupies in its chunk's object table.
    pub fn slot(&self) -> SlotIndex {
        self.oidx
    }

    pub fn is_listed(&self) -> bool {
        self.oidx.is_listed()
    }

    /// Fresh remembered copy carrying only what the player can observe.
    pub(crate) fn remembered(&self) -> Self {
        Self {
            kind: self.kind,
            number: self.number,
            grid: self.grid,
            known: None,
            oidx: SlotIndex::UNLISTED,
            delist_deferred: false,
        }
    }
}

#[derive(Clone, Debug, Default)]
struct StoreEntry {
    generation: u32,
    object: Option<Object>,
}

/// Arena owning every object (live and remembered) of a game session.
///
/// Chunks, piles and the `known` link only ever hold [`ObjectHandle`]s.
#[derive(Clone, Debug, Default)]
pub struct ObjectStore {
    entries: Vec<StoreEntry>,
    free: Vec<u32>,
    live: usize,
}

impl ObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves `object` into the store.
    pub fn create(&mut self, object: Object) -> ObjectHandle {
        self.live += 1;
        if let Some(index) = self.free.pop() {
            let entry = &mut self.entries[index as usize];
            entry.object = Some(object);
            return ObjectHandle {
                index,
                generation: entry.generation,
            };
        }

        let index = self.entries.len() as u32;
        self.entries.push(StoreEntry {
            generation: 0,
            object: Some(object),
        });
        ObjectHandle {
            index,
            generation: 0,
        }
    }

    /// Frees the object, invalidating every outstanding handle to it.
    pub fn release(&mut self, handle: ObjectHandle) -> Option<Object> {
        let entry = self.entries.get_mut(handle.index as usize)?;
        if entry.generation != handle.generation {
            return None;
        }
        let object = entry.object.take()?;
        entry.generation = entry.generation.wrapping_add(1);
        self.free.push(handle.index);
        self.live -= 1;
        Some(object)
    }

    pub fn get(&self, handle: ObjectHandle) -> Option<&Object> {
        self.entries
            .get(handle.index as usize)
            .filter(|entry| entry.generation == handle.generation)
            .and_then(|entry| entry.object.as_ref())
    }

    pub fn get_mut(&mut self, handle: ObjectHandle) -> Option<&mut Object> {
        self.entries
            .get_mut(handle.index as usize)
            .filter(|entry| entry.generation == handle.generation)
            .and_then(|entry| entry.object.as_mut())
    }

    pub fn contains(&self, handle: ObjectHandle) -> bool {
        self.get(handle).is_some()
    }

    /// Number of objects currently alive in the store.
    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn released_handles_go_stale() {
        let mut store = ObjectStore::new();
        let first = store.create(Object::new(ObjectKind(1), 1));
        assert!(store.release(first).is_some());
        assert!(store.get(first).is_none());

        let second = store.create(Object::new(ObjectKind(2), 1));
        assert_ne!(first, second);
        assert!(store.get(first).is_none());
        assert_eq!(store.get(second).unwrap().kind, ObjectKind(2));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn releasing_twice_is_a_no_op() {
        let mut store = ObjectStore::new();
        let handle = store.create(Object::new(ObjectKind(1), 3));
        assert!(store.release(handle).is_some());
        assert!(store.release(handle).is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn new_objects_start_unlisted() {
        let object = Object::new(ObjectKind(7), 1);
        assert_eq!(object.slot(), SlotIndex::UNLISTED);
        assert!(!object.is_listed());
    }
}
