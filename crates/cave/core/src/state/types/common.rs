use std::fmt;

/// Discrete grid position, row first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub y: i32,
    pub x: i32,
}

impl Position {
    pub const ORIGIN: Self = Self { y: 0, x: 0 };

    pub const fn new(y: i32, x: i32) -> Self {
        Self { y, x }
    }

    #[inline]
    pub const fn offset(self, offset: Offset) -> Self {
        Self {
            y: self.y + offset.dy,
            x: self.x + offset.dx,
        }
    }

    /// Game distance: the longer axis plus half the shorter one.
    ///
    /// An octagonal approximation of Euclidean distance; adjacent squares
    /// (including diagonals) are at distance 1.
    pub fn distance(self, other: Position) -> i32 {
        let dy = (self.y - other.y).abs();
        let dx = (self.x - other.x).abs();
        if dy > dx { dy + (dx >> 1) } else { dx + (dy >> 1) }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.y, self.x)
    }
}

/// Relative step on the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Offset {
    pub dy: i32,
    pub dx: i32,
}

impl Offset {
    pub const fn new(dy: i32, dx: i32) -> Self {
        Self { dy, dx }
    }
}

/// Keypad scan order: the four orthogonal steps, the four diagonals, then
/// the square itself. Neighbourhood scans rely on the origin being last.
pub const KEYPAD_OFFSETS: [Offset; 9] = [
    Offset::new(1, 0),
    Offset::new(-1, 0),
    Offset::new(0, 1),
    Offset::new(0, -1),
    Offset::new(1, 1),
    Offset::new(1, -1),
    Offset::new(-1, 1),
    Offset::new(-1, -1),
    Offset::new(0, 0),
];

/// Index of the origin entry in [`KEYPAD_OFFSETS`].
pub const KEYPAD_ORIGIN: usize = 8;

/// Game turn counter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Self = Self(0);

    pub fn new(value: u64) -> Self {
        Self(value)
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
