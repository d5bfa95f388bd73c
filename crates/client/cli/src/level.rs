//! Demonstration level: a walled hall split by a partition with doors.
use std::fmt;

use anyhow::{Context, Result};
use cave_core::{
    CaveConfig, Chunk, FeatureTable, Monster, Object, ObjectKind, ObjectStore, PcgRng, Position,
    ProjectablePath, RaceId, Tick, WellKnown, WellKnownFeatures, WorldContext, level_seed,
};

use crate::config::CliConfig;

/// Squares around the player that get learned on arrival.
const SIGHT_RADIUS: i32 = 3;
/// How far from the player objects and monsters are scattered.
const SCATTER_RADIUS: i32 = 8;
/// Smallest level that still has an interior and a partition.
const MIN_SIDE: i32 = 5;

/// Builds the live level, enters it and populates it.
pub fn boot(
    config: &CliConfig,
    features: &FeatureTable,
    tunables: &CaveConfig,
    well_known: WellKnownFeatures,
) -> Result<WorldContext> {
    if config.height < MIN_SIDE || config.width < MIN_SIDE {
        anyhow::bail!(
            "level must be at least {MIN_SIDE}x{MIN_SIDE}, got {}x{}",
            config.height,
            config.width
        );
    }

    let mut cave = Chunk::new(config.height, config.width, features, tunables, Tick::ZERO);
    cave.set_name("demo hall");
    carve_hall(&mut cave, &well_known);

    let player = Position::new(config.height / 2, config.width / 4);
    let mut world = WorldContext::enter_level(cave, player, ObjectStore::new(), well_known);
    let mut rng = PcgRng::new(level_seed(config.seed, 1));
    let sight = ProjectablePath::new(features);

    for dy in -SIGHT_RADIUS..=SIGHT_RADIUS {
        for dx in -SIGHT_RADIUS..=SIGHT_RADIUS {
            world.learn_square(Position::new(player.y + dy, player.x + dx));
        }
    }

    let mut dropped = 0;
    for n in 0..config.objects {
        let pos = world.scatter(&mut rng, &sight, player, SCATTER_RADIUS, true);
        if !world.cave().is_floor(features, pos) {
            tracing::debug!(%pos, "no floor for object");
            continue;
        }
        let handle = world
            .objects_mut()
            .create(Object::new(ObjectKind((n % 16) as u16), 1));
        if world.place_object(handle, pos).is_none() {
            world.objects_mut().release(handle);
            continue;
        }
        if world.is_known(pos) {
            world.learn_object(handle);
        }
        dropped += 1;
    }

    let mut spawned = 0;
    for n in 0..config.monsters {
        let pos = world.scatter(&mut rng, &sight, player, SCATTER_RADIUS, false);
        if !world.cave().is_empty_floor(features, pos) || pos == player {
            continue;
        }
        let monster = Monster::new(RaceId((n % 4) as u16 + 1), pos, 10);
        if world.cave_mut().push_monster(monster).is_none() {
            break;
        }
        spawned += 1;
    }

    world
        .check_integrity()
        .inspect_err(crate::report)
        .context("object lists disagree after populating the level")?;

    tracing::info!(
        id = %world.cave().id(),
        objects = dropped,
        monsters = spawned,
        "populated level"
    );
    Ok(world)
}

/// Permanent outer wall, floor inside, and a granite partition with a closed
/// and an open door.
fn carve_hall(cave: &mut Chunk, well_known: &WellKnownFeatures) {
    let (height, width) = (cave.height(), cave.width());
    cave.fill(well_known.floor());

    for y in 0..height {
        for x in 0..width {
            if y == 0 || x == 0 || y == height - 1 || x == width - 1 {
                cave.set_feat(Position::new(y, x), well_known.permanent());
            }
        }
    }

    let split = width / 2;
    for y in 1..height - 1 {
        cave.set_feat(Position::new(y, split), well_known.granite());
    }
    cave.set_feat(
        Position::new(height / 2, split),
        well_known.get(WellKnown::ClosedDoor),
    );
    cave.set_feat(
        Position::new(1, split),
        well_known.get(WellKnown::OpenDoor),
    );
    cave.set_feat(
        Position::new(height - 2, width - 2),
        well_known.get(WellKnown::DownStaircase),
    );
}

/// Counts taken from a populated level.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Survey {
    pub name: String,
    pub object_capacity: usize,
    pub listed: usize,
    pub remembered: usize,
    pub monsters: i32,
    pub monster_max: i32,
    pub doors_near_player: u32,
    pub floor_squares: usize,
}

pub fn survey(world: &WorldContext, features: &FeatureTable) -> Survey {
    let cave = world.cave();
    let doors = world.count_feats(|c, pos| c.is_door(features, pos), false);

    Survey {
        name: cave.name().unwrap_or("unnamed").to_string(),
        object_capacity: cave.object_capacity(),
        listed: cave.listed_objects().count(),
        remembered: world.known().listed_objects().count(),
        monsters: cave.monster_count(),
        monster_max: cave.monster_max(),
        doors_near_player: doors.count,
        floor_squares: cave.feat_count(world.well_known().floor()),
    }
}

impl fmt::Display for Survey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "level:      {}", self.name)?;
        writeln!(f, "floor:      {} squares", self.floor_squares)?;
        writeln!(
            f,
            "objects:    {} listed, {} remembered, {} slots",
            self.listed, self.remembered, self.object_capacity
        )?;
        writeln!(f, "monsters:   {} alive, high-water {}", self.monsters, self.monster_max)?;
        write!(f, "doors near: {}", self.doors_near_player)
    }
}

/// Draws the live level: `@` player, `&` object piles, `M` monsters.
pub fn render(world: &WorldContext, features: &FeatureTable) -> String {
    let cave = world.cave();
    let mut rows = vec![Vec::new(); cave.height() as usize];

    for (y, row) in rows.iter_mut().enumerate() {
        for x in 0..cave.width() {
            let pos = Position::new(y as i32, x);
            let glyph = cave
                .feat(pos)
                .and_then(|feat| features.get(feat))
                .map_or('?', |feature| feature.glyph());
            row.push(if cave.pile(pos).is_empty() { glyph } else { '&' });
        }
    }
    for (_, monster) in cave.monsters() {
        rows[monster.grid.y as usize][monster.grid.x as usize] = 'M';
    }
    let player = world.player().grid;
    rows[player.y as usize][player.x as usize] = '@';

    rows.into_iter()
        .map(|row| row.into_iter().collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}
