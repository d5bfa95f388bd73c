use bitflags::bitflags;

use super::ObjectHandle;
use crate::feature::FeatureId;

bitflags! {
    /// Per-square state that changes during play.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct SquareFlags: u32 {
        /// Memorized by the player.
        const MARK         = 1 << 0;
        /// Self-lit.
        const GLOW         = 1 << 1;
        const VAULT        = 1 << 2;
        const ROOM         = 1 << 3;
        /// Seen this turn.
        const SEEN         = 1 << 4;
        /// In the player's view.
        const VIEW         = 1 << 5;
        const WASSEEN      = 1 << 6;
        /// Level feeling has been gathered here.
        const FEEL         = 1 << 7;
        const TRAP         = 1 << 8;
        const INVIS        = 1 << 9;
        const WALL_INNER   = 1 << 10;
        const WALL_OUTER   = 1 << 11;
        const WALL_SOLID   = 1 << 12;
        const MON_RESTRICT = 1 << 13;
        const NO_TELEPORT  = 1 << 14;
        const NO_MAP       = 1 << 15;
        const NO_ESP       = 1 << 16;
        const PROJECT      = 1 << 17;
        /// Trap detection has covered this square.
        const DTRAP        = 1 << 18;
        const NO_STAIRS    = 1 << 19;
    }
}

bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct TrapFlags: u8 {
        const VISIBLE   = 1 << 0;
        const INVISIBLE = 1 << 1;
    }
}

/// Trap owned by exactly one square.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Trap {
    pub kind: u16,
    pub flags: TrapFlags,
}

impl Trap {
    pub fn new(kind: u16, flags: TrapFlags) -> Self {
        Self { kind, flags }
    }

    pub fn is_visible(&self) -> bool {
        self.flags.contains(TrapFlags::VISIBLE) && !self.flags.contains(TrapFlags::INVISIBLE)
    }
}

/// One grid cell.
///
/// The pile lists handles head first; the objects themselves belong to the
/// [`ObjectStore`](super::ObjectStore) and are indexed by the chunk's object table.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Square {
    pub(crate) feat: FeatureId,
    pub(crate) info: SquareFlags,
    pub(crate) trap: Option<Trap>,
    pub(crate) pile: Vec<ObjectHandle>,
}

impl Square {
    pub fn feat(&self) -> FeatureId {
        self.feat
    }

    pub fn info(&self) -> SquareFlags {
        self.info
    }

    pub fn trap(&self) -> Option<&Trap> {
        self.trap.as_ref()
    }

    pub fn pile(&self) -> &[ObjectHandle] {
        &self.pile
    }
}
