//! Object-list integrity violations.
//!
//! Every variant describes a broken invariant between a live chunk and its
//! known mirror. None of them can be recovered from at runtime.

use crate::error::{CaveError, ErrorSeverity};
use crate::state::{ObjectHandle, Position, SlotIndex};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum IntegrityError {
    /// Live and known object tables have different capacities.
    #[error("object table capacity mismatch (live: {live}, known: {known})")]
    CapacityMismatch { live: usize, known: usize },

    /// A table slot holds a handle the object store no longer knows.
    #[error("slot {slot} holds freed object {handle}")]
    DanglingHandle { slot: SlotIndex, handle: ObjectHandle },

    /// A live object's recorded slot differs from the slot holding it.
    #[error("live object {handle} sits in slot {slot} but records {recorded}")]
    SlotIndexMismatch {
        handle: ObjectHandle,
        slot: SlotIndex,
        recorded: SlotIndex,
    },

    /// A live object claims a floor position whose pile does not contain it.
    #[error("live object {handle} claims {grid} but is missing from that pile")]
    NotInPile { handle: ObjectHandle, grid: Position },

    /// A known slot is filled while the live slot at the same index is empty.
    #[error("known slot {slot} is filled but the live slot is empty")]
    KnownWithoutLive { slot: SlotIndex },

    /// The known object is not the one the live object remembers.
    #[error("known object {known} in slot {slot} is not linked from live object {live}")]
    KnownNotLinked {
        slot: SlotIndex,
        live: ObjectHandle,
        known: ObjectHandle,
    },

    /// A known object's recorded slot differs from the slot holding it.
    #[error("known object {handle} sits in slot {slot} but records {recorded}")]
    KnownSlotIndexMismatch {
        handle: ObjectHandle,
        slot: SlotIndex,
        recorded: SlotIndex,
    },

    /// A known object claims a floor position whose known pile does not contain it.
    #[error("known object {handle} claims {grid} but is missing from that known pile")]
    KnownNotInPile { handle: ObjectHandle, grid: Position },
}

impl CaveError for IntegrityError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Internal
    }

    fn error_code(&self) -> &'static str {
        use IntegrityError::*;
        match self {
            CapacityMismatch { .. } => "INTEGRITY_CAPACITY_MISMATCH",
            DanglingHandle { .. } => "INTEGRITY_DANGLING_HANDLE",
            SlotIndexMismatch { .. } => "INTEGRITY_SLOT_INDEX_MISMATCH",
            NotInPile { .. } => "INTEGRITY_NOT_IN_PILE",
            KnownWithoutLive { .. } => "INTEGRITY_KNOWN_WITHOUT_LIVE",
            KnownNotLinked { .. } => "INTEGRITY_KNOWN_NOT_LINKED",
            KnownSlotIndexMismatch { .. } => "INTEGRITY_KNOWN_SLOT_INDEX_MISMATCH",
            KnownNotInPile { .. } => "INTEGRITY_KNOWN_NOT_IN_PILE",
        }
    }
}
