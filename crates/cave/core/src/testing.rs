//! Fixtures shared by unit tests.
use crate::config::CaveConfig;
use crate::feature::{Feature, FeatureTable, TerrainFlags as F};
use crate::state::{Chunk, Position, Tick};

/// Terrain table containing every well-known terrain with its usual flags.
pub(crate) fn standard_features() -> FeatureTable {
    let walkable = F::LOS | F::PROJECT | F::PASSABLE;
    let rock = F::WALL | F::ROCK | F::NO_SCENT | F::NO_FLOW;

    FeatureTable::new([
        Feature::new("unknown grid", F::empty()),
        Feature::new("open floor", walkable | F::FLOOR | F::OBJECT | F::EASY | F::TRAP | F::TORCH)
            .with_glyph('.'),
        Feature::new("closed door", F::DOOR_ANY | F::DOOR_CLOSED | F::INTERESTING).with_glyph('+'),
        Feature::new("open door", walkable | F::DOOR_ANY | F::CLOSABLE | F::INTERESTING)
            .with_glyph('\''),
        Feature::new("broken door", walkable | F::DOOR_ANY | F::INTERESTING).with_glyph('\''),
        Feature::new("up staircase", walkable | F::STAIR | F::UPSTAIR | F::PERMANENT | F::EASY)
            .with_glyph('<'),
        Feature::new("down staircase", walkable | F::STAIR | F::DOWNSTAIR | F::PERMANENT | F::EASY)
            .with_glyph('>'),
        Feature::new("secret door", rock | F::GRANITE | F::DOOR_ANY).with_glyph('#'),
        Feature::new("pile of rubble", F::ROCK | F::RUBBLE | F::NO_SCENT | F::NO_FLOW)
            .with_glyph(':'),
        Feature::new("magma vein", rock | F::MAGMA).with_glyph('%'),
        Feature::new("quartz vein", rock | F::QUARTZ).with_glyph('%'),
        Feature::new("magma vein with treasure", rock | F::MAGMA | F::GOLD | F::INTERESTING)
            .with_glyph('*'),
        Feature::new("quartz vein with treasure", rock | F::QUARTZ | F::GOLD | F::INTERESTING)
            .with_glyph('*'),
        Feature::new("granite wall", rock | F::GRANITE).with_glyph('#'),
        Feature::new("permanent wall", rock | F::PERMANENT).with_glyph('#'),
        Feature::new("lava", walkable | F::FIERY | F::BRIGHT | F::NO_SCENT).with_glyph('#'),
        Feature::new("pile of passable rubble", F::ROCK | F::RUBBLE | F::PASSABLE | F::LOS)
            .with_glyph(':'),
    ])
}

/// Empty chunk with default tunables.
pub(crate) fn chunk(height: i32, width: i32) -> Chunk {
    Chunk::new(height, width, &standard_features(), &CaveConfig::default(), Tick::ZERO)
}

/// Chunk walled with granite on its edge and floored inside.
pub(crate) fn open_room(features: &FeatureTable, height: i32, width: i32) -> Chunk {
    let floor = features.lookup("open floor").unwrap();
    let granite = features.lookup("granite wall").unwrap();
    let mut c = Chunk::new(height, width, features, &CaveConfig::default(), Tick::ZERO);
    for y in 0..height {
        for x in 0..width {
            let edge = y == 0 || x == 0 || y == height - 1 || x == width - 1;
            c.set_feat(Position::new(y, x), if edge { granite } else { floor });
        }
    }
    c
}
