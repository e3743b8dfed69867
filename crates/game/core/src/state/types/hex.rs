use std::fmt;

/// Axial/cube hex coordinate. `s` is stored so the cube invariant
/// `q + r + s == 0` is visible in every serialized state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub q: i32,
    pub r: i32,
    pub s: i32,
}

impl Point {
    pub const ORIGIN: Self = Self { q: 0, r: 0, s: 0 };

    /// Builds a point from axial coordinates, deriving `s`.
    pub const fn new(q: i32, r: i32) -> Self {
        Self { q, r, s: -q - r }
    }

    /// Builds a point from cube coordinates, rejecting triples that break the
    /// cube invariant.
    pub const fn from_cube(q: i32, r: i32, s: i32) -> Option<Self> {
        if q + r + s == 0 {
            Some(Self { q, r, s })
        } else {
            None
        }
    }

    pub const fn is_valid(self) -> bool {
        self.q + self.r + self.s == 0
    }

    pub const fn offset(self, direction: HexDirection, steps: i32) -> Self {
        let (dq, dr) = direction.delta();
        Self::new(self.q + dq * steps, self.r + dr * steps)
    }

    pub const fn neighbor(self, direction: HexDirection) -> Self {
        self.offset(direction, 1)
    }

    pub fn neighbors(self) -> [Self; 6] {
        HexDirection::ALL.map(|direction| self.neighbor(direction))
    }

    pub const fn distance(self, other: Self) -> u32 {
        let dq = (self.q - other.q).unsigned_abs();
        let dr = (self.r - other.r).unsigned_abs();
        let ds = (self.s - other.s).unsigned_abs();
        let max = if dq > dr { dq } else { dr };
        if max > ds { max } else { ds }
    }

    pub const fn is_adjacent(self, other: Self) -> bool {
        self.distance(other) == 1
    }

    /// Returns the direction from `self` to `other` when both lie on one of
    /// the six hex axes.
    pub fn direction_to(self, other: Self) -> Option<HexDirection> {
        let distance = self.distance(other) as i32;
        if distance == 0 {
            return None;
        }
        let dq = other.q - self.q;
        let dr = other.r - self.r;
        if dq % distance != 0 || dr % distance != 0 {
            return None;
        }
        HexDirection::from_delta(dq / distance, dr / distance)
    }

    /// Cells from `self` (exclusive) walking `length` steps in `direction`.
    pub fn ray(self, direction: HexDirection, length: u32) -> impl Iterator<Item = Point> {
        (1..=length as i32).map(move |step| self.offset(direction, step))
    }

    /// Cells on the straight line from `self` (exclusive) to `other`
    /// (inclusive) when they are collinear.
    pub fn line_to(self, other: Self) -> Option<Vec<Point>> {
        let direction = self.direction_to(other)?;
        Some(self.ray(direction, self.distance(other)).collect())
    }
}

impl Default for Point {
    fn default() -> Self {
        Self::ORIGIN
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.q, self.r, self.s)
    }
}

/// The six neighbour directions of a pointy-top axial grid.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, strum::AsRefStr, strum::EnumString,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum HexDirection {
    East,
    NorthEast,
    NorthWest,
    West,
    SouthWest,
    SouthEast,
}

impl HexDirection {
    pub const ALL: [Self; 6] = [
        Self::East,
        Self::NorthEast,
        Self::NorthWest,
        Self::West,
        Self::SouthWest,
        Self::SouthEast,
    ];

    pub const fn delta(self) -> (i32, i32) {
        match self {
            Self::East => (1, 0),
            Self::NorthEast => (1, -1),
            Self::NorthWest => (0, -1),
            Self::West => (-1, 0),
            Self::SouthWest => (-1, 1),
            Self::SouthEast => (0, 1),
        }
    }

    pub const fn from_delta(dq: i32, dr: i32) -> Option<Self> {
        match (dq, dr) {
            (1, 0) => Some(Self::East),
            (1, -1) => Some(Self::NorthEast),
            (0, -1) => Some(Self::NorthWest),
            (-1, 0) => Some(Self::West),
            (-1, 1) => Some(Self::SouthWest),
            (0, 1) => Some(Self::SouthEast),
            _ => None,
        }
    }

    pub const fn opposite(self) -> Self {
        match self {
            Self::East => Self::West,
            Self::NorthEast => Self::SouthWest,
            Self::NorthWest => Self::SouthEast,
            Self::West => Self::East,
            Self::SouthWest => Self::NorthEast,
            Self::SouthEast => Self::NorthWest,
        }
    }
}
