use super::Position;

/// Monster race from the (external) monster data table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RaceId(pub u16);

/// A monster slot. An empty slot has no race.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Monster {
    pub race: Option<RaceId>,
    pub grid: Position,
    pub hp: i32,
    pub maxhp: i32,
}

impl Monster {
    pub fn new(race: RaceId, grid: Position, maxhp: i32) -> Self {
        Self {
            race: Some(race),
            grid,
            hp: maxhp,
            maxhp,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.race.is_some()
    }
}
