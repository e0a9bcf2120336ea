//! Immutable maze grid and passability queries.

use std::fmt;
use std::str::FromStr;

use super::error::MapError;
use super::layout::CLASSIC_LAYOUT;
use super::types::{Heading, Position};

/// Glyph marking an open slot in a layout.
pub const OPEN_GLYPH: char = ' ';

/// Passability of a single raw grid slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Wall,
    Open,
}

/// The maze an episode is played on.
///
/// Built once from text rows and never mutated, so a single map can be shared
/// (behind an `Arc`) by any number of environments.
///
/// # Coordinates
///
/// Agents stand on *cells*: open slots at an odd column and an interior row.
/// The horizontal axis is doubled: a step east or west moves two columns and
/// crosses the wall slot in between. The vertical axis is not: a step north or
/// south moves one row, and the slot probed is the destination row itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridMap {
    width: usize,
    height: usize,
    glyphs: Vec<char>,
    cells: Vec<Cell>,
    open_cells: Vec<Position>,
}

impl GridMap {
    /// Parses a layout, one string per row.
    ///
    /// # Errors
    ///
    /// * [`MapError::Empty`] - no rows, or rows of zero width
    /// * [`MapError::NotRectangular`] - rows of differing length
    /// * [`MapError::NoOpenCells`] - no slot an agent could stand on
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self, MapError> {
        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.as_ref().chars().count());
        if height == 0 || width == 0 {
            return Err(MapError::Empty);
        }

        let mut glyphs = Vec::with_capacity(width * height);
        for (row, text) in rows.iter().enumerate() {
            let before = glyphs.len();
            glyphs.extend(text.as_ref().chars());
            let found = glyphs.len() - before;
            if found != width {
                return Err(MapError::NotRectangular {
                    row,
                    expected: width,
                    found,
                });
            }
        }

        let cells = glyphs
            .iter()
            .map(|&g| if g == OPEN_GLYPH { Cell::Open } else { Cell::Wall })
            .collect();

        let mut map = Self {
            width,
            height,
            glyphs,
            cells,
            open_cells: Vec::new(),
        };
        let open_cells: Vec<Position> = (0..height)
            .flat_map(|y| (0..width).map(move |x| Position::new(x, y)))
            .filter(|p| map.is_agent_cell(*p))
            .collect();
        map.open_cells = open_cells;

        if map.open_cells.is_empty() {
            return Err(MapError::NoOpenCells);
        }
        Ok(map)
    }

    /// Builds the maze shipped with the crate ([`CLASSIC_LAYOUT`]).
    pub fn classic() -> Result<Self, MapError> {
        Self::from_rows(&CLASSIC_LAYOUT)
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.height
    }

    fn offset(&self, pos: Position) -> Option<usize> {
        (pos.x < self.width && pos.y < self.height).then(|| pos.y * self.width + pos.x)
    }

    /// Returns the slot at `pos`, `None` outside the grid.
    pub fn cell(&self, pos: Position) -> Option<Cell> {
        self.offset(pos).map(|i| self.cells[i])
    }

    /// Returns the layout glyph at `pos`, `None` outside the grid.
    pub fn glyph(&self, pos: Position) -> Option<char> {
        self.offset(pos).map(|i| self.glyphs[i])
    }

    pub fn is_open(&self, pos: Position) -> bool {
        self.cell(pos) == Some(Cell::Open)
    }

    /// True when an agent may stand on `pos`: odd column, interior row, open.
    pub fn is_agent_cell(&self, pos: Position) -> bool {
        pos.x % 2 == 1 && pos.y >= 1 && pos.y < self.height - 1 && self.is_open(pos)
    }

    /// All cells an agent may stand on, in row-major order.
    pub fn open_cells(&self) -> &[Position] {
        &self.open_cells
    }

    /// Number of distinct cell columns (`x` values an agent can take).
    pub fn cell_columns(&self) -> usize {
        self.width / 2
    }

    /// Number of distinct cell rows (`y` values an agent can take).
    pub fn cell_rows(&self) -> usize {
        self.height.saturating_sub(2)
    }

    /// Raw distance covered by one step in `heading`.
    pub fn stride(heading: Heading) -> usize {
        if heading.is_horizontal() {
            2
        } else {
            1
        }
    }

    /// The slot probed when stepping from `pos` in `heading`.
    pub fn boundary(&self, pos: Position, heading: Heading) -> Option<Position> {
        pos.offset(heading, 1).filter(|p| self.cell(*p).is_some())
    }

    /// Destination of one step from `pos` in `heading`, clamped to the grid.
    pub fn neighbor(&self, pos: Position, heading: Heading) -> Position {
        let stride = Self::stride(heading);
        match heading {
            Heading::East => Position::new((pos.x + stride).min(self.width - 1), pos.y),
            Heading::West => Position::new(pos.x.saturating_sub(stride), pos.y),
            Heading::South => Position::new(pos.x, (pos.y + stride).min(self.height - 1)),
            Heading::North => Position::new(pos.x, pos.y.saturating_sub(stride)),
        }
    }

    /// True when the boundary slot next to `pos` in `heading` is open.
    pub fn is_passable(&self, pos: Position, heading: Heading) -> bool {
        self.boundary(pos, heading).is_some_and(|b| self.is_open(b))
    }

    /// Iterates over the layout rows as glyph slices.
    pub fn rows(&self) -> impl Iterator<Item = &[char]> {
        self.glyphs.chunks(self.width)
    }
}

impl FromStr for GridMap {
    type Err = MapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows: Vec<&str> = s.lines().collect();
        Self::from_rows(&rows)
    }
}

impl fmt::Display for GridMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            let line: String = row.iter().collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
