pub mod common;
pub mod monster;
pub mod object;
pub mod square;

pub use common::{KEYPAD_OFFSETS, KEYPAD_ORIGIN, Offset, Position, Tick};
pub use monster::{Monster, RaceId};
pub use object::{Object, ObjectHandle, ObjectKind, ObjectStore, SlotIndex};
pub use square::{Square, SquareFlags, Trap, TrapFlags};
