use bitflags::bitflags;

bitflags! {
    /// Static properties of a terrain type.
    ///
    /// Square predicates (`is_closed_door`, `is_projectable`, ...) are answered
    /// from these bits rather than by comparing feature ids.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    #[cfg_attr(feature = "serde", serde(transparent))]
    pub struct TerrainFlags: u32 {
        const LOS         = 1 << 0;
        const PROJECT     = 1 << 1;
        const PASSABLE    = 1 << 2;
        const INTERESTING = 1 << 3;
        const PERMANENT   = 1 << 4;
        const EASY        = 1 << 5;
        const TRAP        = 1 << 6;
        const NO_SCENT    = 1 << 7;
        const NO_FLOW     = 1 << 8;
        const OBJECT      = 1 << 9;
        const TORCH       = 1 << 10;
        const HIDDEN      = 1 << 11;
        const GOLD        = 1 << 12;
        const CLOSABLE    = 1 << 13;
        const FLOOR       = 1 << 14;
        const WALL        = 1 << 15;
        const ROCK        = 1 << 16;
        const GRANITE     = 1 << 17;
        const DOOR_ANY    = 1 << 18;
        const DOOR_CLOSED = 1 << 19;
        const SHOP        = 1 << 20;
        const DOOR_JAMMED = 1 << 21;
        const DOOR_LOCKED = 1 << 22;
        const MAGMA       = 1 << 23;
        const QUARTZ      = 1 << 24;
        const STAIR       = 1 << 25;
        const UPSTAIR     = 1 << 26;
        const DOWNSTAIR   = 1 << 27;
        const SMOOTH      = 1 << 28;
        const BRIGHT      = 1 << 29;
        const FIERY       = 1 << 30;
        const RUBBLE      = 1 << 31;
    }
}
