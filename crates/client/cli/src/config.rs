//! CLI configuration read from the process environment.
use std::env;
use std::path::PathBuf;

/// Everything needed to boot a demonstration level.
#[derive(Clone, Debug)]
pub struct CliConfig {
    /// Terrain table to load instead of the bundled one.
    pub terrain_path: Option<PathBuf>,
    /// Tunables file; built-in defaults when unset.
    pub config_path: Option<PathBuf>,
    pub seed: u64,
    pub height: i32,
    pub width: i32,
    pub objects: usize,
    pub monsters: usize,
}

impl CliConfig {
    pub const DEFAULT_SEED: u64 = 0x5eed;
    pub const DEFAULT_HEIGHT: i32 = 22;
    pub const DEFAULT_WIDTH: i32 = 66;
    pub const DEFAULT_OBJECTS: usize = 24;
    pub const DEFAULT_MONSTERS: usize = 8;

    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `CAVE_TERRAIN_PATH` - Terrain table RON file (default: bundled table)
    /// - `CAVE_CONFIG_PATH` - Tunables TOML file (default: built-in tunables)
    /// - `CAVE_SEED` - Level seed (default: random)
    /// - `CAVE_HEIGHT` / `CAVE_WIDTH` - Level size (default: 22 x 66)
    /// - `CAVE_OBJECTS` - Objects to scatter (default: 24)
    /// - `CAVE_MONSTERS` - Monsters to place (default: 8)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        config.terrain_path = env::var("CAVE_TERRAIN_PATH").ok().map(PathBuf::from);
        config.config_path = env::var("CAVE_CONFIG_PATH").ok().map(PathBuf::from);

        config.seed = read_env::<u64>("CAVE_SEED").unwrap_or_else(rand::random);

        if let Some(height) = read_env::<i32>("CAVE_HEIGHT") {
            config.height = height;
        }
        if let Some(width) = read_env::<i32>("CAVE_WIDTH") {
            config.width = width;
        }
        if let Some(objects) = read_env::<usize>("CAVE_OBJECTS") {
            config.objects = objects;
        }
        if let Some(monsters) = read_env::<usize>("CAVE_MONSTERS") {
            config.monsters = monsters;
        }

        config
    }
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            terrain_path: None,
            config_path: None,
            seed: Self::DEFAULT_SEED,
            height: Self::DEFAULT_HEIGHT,
            width: Self::DEFAULT_WIDTH,
            objects: Self::DEFAULT_OBJECTS,
            monsters: Self::DEFAULT_MONSTERS,
        }
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
