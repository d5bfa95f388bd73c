//! Object table of a chunk: a slot arena with hole reuse.
//!
//! Slot 0 is a sentinel and never holds an object. For every other slot `i`,
//! a filled slot holds an object whose recorded slot is `i`.
//!
//! The live level and the player's known copy of it share one index space.
//! When an operation targets the live level, the known table is passed in as
//! the mirror: slots the mirror still uses are never reused on the live side,
//! and both tables grow together so their capacities stay equal.

use super::{Chunk, IntegrityError, ObjectHandle, ObjectStore, SlotIndex};

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct ObjectList {
    /// `slots[0]` is the sentinel; `slots[1..]` are usable.
    slots: Vec<Option<ObjectHandle>>,
}

impl ObjectList {
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            slots: vec![None; capacity + 1],
        }
    }

    /// Number of usable slots.
    pub(crate) fn capacity(&self) -> usize {
        self.slots.len() - 1
    }

    pub(crate) fn get(&self, slot: SlotIndex) -> Option<ObjectHandle> {
        self.slots.get(slot.0).copied().flatten()
    }

    pub(crate) fn set(&mut self, slot: SlotIndex, handle: Option<ObjectHandle>) {
        if slot.is_listed() && slot.0 < self.slots.len() {
            self.slots[slot.0] = handle;
        }
    }

    /// Extends the table to `capacity` usable slots with empty entries.
    fn grow_to(&mut self, capacity: usize) {
        if capacity > self.capacity() {
            self.slots.resize(capacity + 1, None);
        }
    }

    fn position(&self, handle: ObjectHandle) -> Option<SlotIndex> {
        self.slots
            .iter()
            .skip(1)
            .position(|slot| *slot == Some(handle))
            .map(|index| SlotIndex(index + 1))
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (SlotIndex, ObjectHandle)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .skip(1)
            .filter_map(|(index, slot)| slot.map(|handle| (SlotIndex(index), handle)))
    }
}

impl Chunk {
    /// Usable slots in the object table (the sentinel is not counted).
    pub fn object_capacity(&self) -> usize {
        self.objects.capacity()
    }

    /// Object listed at `slot`, if any.
    pub fn object(&self, slot: SlotIndex) -> Option<ObjectHandle> {
        self.objects.get(slot)
    }

    /// Filled slots in increasing index order.
    pub fn listed_objects(&self) -> impl Iterator<Item = (SlotIndex, ObjectHandle)> + '_ {
        self.objects.iter()
    }

    /// Lists `handle` in this chunk's object table.
    ///
    /// `mirror` is the player's known chunk when this chunk is the live
    /// level, and `None` for any other chunk. Insertion is idempotent: an
    /// object that is already listed keeps its slot, and a removal deferred
    /// for it is cancelled. A handle the store does
    /// not know is ignored. Holes are filled lowest index first, skipping
    /// slots the mirror still uses; when none is free the table grows by the
    /// configured increment (and the mirror with it).
    pub fn insert_object(
        &mut self,
        store: &mut ObjectStore,
        mirror: Option<&mut Chunk>,
        handle: ObjectHandle,
    ) -> Option<SlotIndex> {
        let object = store.get_mut(handle)?;

        if let Some(slot) = self.objects.position(handle) {
            // Listing it again cancels any removal still waiting on the mirror.
            object.delist_deferred = false;
            return Some(slot);
        }

        let mirror_list = mirror.map(|known| &mut known.objects);
        let capacity = self.objects.capacity();

        let hole = (1..=capacity).map(SlotIndex).find(|&slot| {
            let remembered = mirror_list
                .as_deref()
                .is_some_and(|known| known.get(slot).is_some());
            !remembered && self.objects.get(slot).is_none()
        });

        let slot = match hole {
            Some(slot) => slot,
            None => {
                let grown = capacity + self.config.object_list_incr.max(1);
                self.objects.grow_to(grown);
                let mirrored = mirror_list.is_some();
                if let Some(known) = mirror_list {
                    known.grow_to(grown);
                }
                tracing::debug!(
                    id = %self.id(),
                    from = capacity,
                    to = grown,
                    mirrored,
                    "grew object table"
                );
                SlotIndex(capacity + 1)
            }
        };

        self.objects.set(slot, Some(handle));
        object.oidx = slot;
        object.delist_deferred = false;
        Some(slot)
    }

    /// Removes `handle` from this chunk's object table.
    ///
    /// Unlisted objects are ignored. When this chunk is the live level and
    /// the known `mirror` still holds an entry at the object's slot, the
    /// object stays listed until the player forgets it. Returns true when the
    /// slot was actually cleared.
    ///
    /// # Panics
    ///
    /// Panics if the object records a slot that does not hold it.
    pub fn remove_object(
        &mut self,
        store: &mut ObjectStore,
        mirror: Option<&Chunk>,
        handle: ObjectHandle,
    ) -> bool {
        let Some(object) = store.get_mut(handle) else {
            return false;
        };
        let slot = object.oidx;
        if !slot.is_listed() {
            return false;
        }

        assert_eq!(
            self.objects.get(slot),
            Some(handle),
            "{handle} records {slot} in {} but that slot does not hold it",
            self.id()
        );

        if mirror.is_some_and(|known| known.objects.get(slot).is_some()) {
            object.delist_deferred = true;
            tracing::trace!(%handle, %slot, "deferred delisting of remembered object");
            return false;
        }

        self.objects.set(slot, None);
        object.oidx = SlotIndex::UNLISTED;
        object.delist_deferred = false;
        true
    }
}

/// Verifies that a live chunk and its known mirror agree.
///
/// Checks, for every slot: live objects record their own slot and lie in the
/// pile they claim; known objects have a live counterpart at the same slot
/// that links back to them, record their own slot, and lie in the known pile
/// they claim. Returns the first violation found.
pub fn check_object_integrity(
    live: &Chunk,
    known: &Chunk,
    store: &ObjectStore,
) -> Result<(), IntegrityError> {
    if live.object_capacity() != known.object_capacity() {
        return Err(IntegrityError::CapacityMismatch {
            live: live.object_capacity(),
            known: known.object_capacity(),
        });
    }

    for index in 0..=live.object_capacity() {
        let slot = SlotIndex(index);
        let live_handle = live.objects.get(slot);

        if let Some(handle) = live_handle {
            let object = store
                .get(handle)
                .ok_or(IntegrityError::DanglingHandle { slot, handle })?;
            if object.oidx != slot {
                return Err(IntegrityError::SlotIndexMismatch {
                    handle,
                    slot,
                    recorded: object.oidx,
                });
            }
            if let Some(grid) = object.grid {
                if !live.pile_contains(grid, handle) {
                    return Err(IntegrityError::NotInPile { handle, grid });
                }
            }
        }

        if let Some(known_handle) = known.objects.get(slot) {
            let Some(live_handle) = live_handle else {
                return Err(IntegrityError::KnownWithoutLive { slot });
            };
            let known_object = store.get(known_handle).ok_or(IntegrityError::DanglingHandle {
                slot,
                handle: known_handle,
            })?;
            let linked = store
                .get(live_handle)
                .and_then(|object| object.known);
            if linked != Some(known_handle) {
                return Err(IntegrityError::KnownNotLinked {
                    slot,
                    live: live_handle,
                    known: known_handle,
                });
            }
            if let Some(grid) = known_object.grid {
                if !known.pile_contains(grid, known_handle) {
                    return Err(IntegrityError::KnownNotInPile {
                        handle: known_handle,
                        grid,
                    });
                }
            }
            if known_object.oidx != slot {
                return Err(IntegrityError::KnownSlotIndexMismatch {
                    handle: known_handle,
                    slot,
                    recorded: known_object.oidx,
                });
            }
        }
    }

    Ok(())
}

/// Assertion form of [`check_object_integrity`] for debug builds and tests.
///
/// # Panics
///
/// Panics on the first violated invariant.
pub fn assert_object_integrity(live: &Chunk, known: &Chunk, store: &ObjectStore) {
    if let Err(violation) = check_object_integrity(live, known, store) {
        panic!("object list integrity violated: {violation}");
    }
}
