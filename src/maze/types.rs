//! Positions and directions on the maze grid.

use std::fmt;

/// Raw grid coordinates: `x` is the column, `y` is the row, `(0, 0)` is the
/// top-left corner of the layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    /// Creates a new position.
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Returns the position `dist` raw units away in `heading`, or `None` when
    /// that would leave the non-negative quadrant.
    pub fn offset(&self, heading: Heading, dist: usize) -> Option<Position> {
        match heading {
            Heading::East => self.x.checked_add(dist).map(|x| Position::new(x, self.y)),
            Heading::West => self.x.checked_sub(dist).map(|x| Position::new(x, self.y)),
            Heading::South => self.y.checked_add(dist).map(|y| Position::new(self.x, y)),
            Heading::North => self.y.checked_sub(dist).map(|y| Position::new(self.x, y)),
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// One of the four movement directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Heading {
    East,
    West,
    South,
    North,
}

impl Heading {
    /// Returns all headings in index order.
    pub fn all() -> [Heading; 4] {
        [Heading::East, Heading::West, Heading::South, Heading::North]
    }

    /// Returns the index of this heading (0=East, 1=West, 2=South, 3=North).
    pub fn index(&self) -> usize {
        match self {
            Heading::East => 0,
            Heading::West => 1,
            Heading::South => 2,
            Heading::North => 3,
        }
    }

    /// True for East and West.
    pub fn is_horizontal(&self) -> bool {
        matches!(self, Heading::East | Heading::West)
    }
}

impl fmt::Display for Heading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Heading::East => write!(f, "east"),
            Heading::West => write!(f, "west"),
            Heading::South => write!(f, "south"),
            Heading::North => write!(f, "north"),
        }
    }
}

/// Where an evader is looking, or [`Facing::Captured`] once it has been caught.
///
/// A live evader faces the heading of its last successful move. `Captured` is
/// terminal for the rest of the episode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Facing {
    East,
    West,
    South,
    North,
    Captured,
}

impl Facing {
    /// Number of distinct facings, `Captured` included.
    pub const COUNT: usize = 5;

    /// Returns the index of this facing (headings first, `Captured` = 4).
    pub fn index(&self) -> usize {
        match self {
            Facing::East => 0,
            Facing::West => 1,
            Facing::South => 2,
            Facing::North => 3,
            Facing::Captured => 4,
        }
    }

    /// Inverse of [`Facing::index`].
    pub fn from_index(index: usize) -> Option<Facing> {
        match index {
            0 => Some(Facing::East),
            1 => Some(Facing::West),
            2 => Some(Facing::South),
            3 => Some(Facing::North),
            4 => Some(Facing::Captured),
            _ => None,
        }
    }

    /// The heading being looked along, `None` once captured.
    pub fn heading(&self) -> Option<Heading> {
        match self {
            Facing::East => Some(Heading::East),
            Facing::West => Some(Heading::West),
            Facing::South => Some(Heading::South),
            Facing::North => Some(Heading::North),
            Facing::Captured => None,
        }
    }

    pub fn is_captured(&self) -> bool {
        matches!(self, Facing::Captured)
    }
}

impl From<Heading> for Facing {
    fn from(heading: Heading) -> Self {
        match heading {
            Heading::East => Facing::East,
            Heading::West => Facing::West,
            Heading::South => Facing::South,
            Heading::North => Facing::North,
        }
    }
}

impl fmt::Display for Facing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.heading() {
            Some(heading) => heading.fmt(f),
            None => write!(f, "captured"),
        }
    }
}
