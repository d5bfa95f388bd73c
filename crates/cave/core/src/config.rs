/// Level-wide tunables shared by every chunk created in a process.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CaveConfig {
    /// Usable object slots a fresh chunk starts with (slot 0 is extra).
    pub object_list_size: usize,
    /// Number of slots added each time an object table runs out of holes.
    pub object_list_incr: usize,
    /// Capacity of the per-level monster array, including reserved slot 0.
    pub level_monster_max: usize,
    /// Attempt cap for `scatter` before it gives up and returns its last candidate.
    pub scatter_max_tries: u32,
}

impl CaveConfig {
    // ===== runtime-tunable defaults =====
    pub const DEFAULT_OBJECT_LIST_SIZE: usize = 128;
    pub const DEFAULT_OBJECT_LIST_INCR: usize = 128;
    pub const DEFAULT_LEVEL_MONSTER_MAX: usize = 1024;
    pub const DEFAULT_SCATTER_MAX_TRIES: u32 = 1_000_000;

    pub fn new() -> Self {
        Self {
            object_list_size: Self::DEFAULT_OBJECT_LIST_SIZE,
            object_list_incr: Self::DEFAULT_OBJECT_LIST_INCR,
            level_monster_max: Self::DEFAULT_LEVEL_MONSTER_MAX,
            scatter_max_tries: Self::DEFAULT_SCATTER_MAX_TRIES,
        }
    }

    pub fn with_object_list(mut self, size: usize, incr: usize) -> Self {
        self.object_list_size = size;
        self.object_list_incr = incr.max(1);
        self
    }

    pub fn with_level_monster_max(mut self, level_monster_max: usize) -> Self {
        self.level_monster_max = level_monster_max;
        self
    }

    pub fn with_scatter_max_tries(mut self, tries: u32) -> Self {
        self.scatter_max_tries = tries;
        self
    }
}

impl Default for CaveConfig {
    fn default() -> Self {
        Self::new()
    }
}
