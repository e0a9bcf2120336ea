//! Read-only views of a world state: a text grid for people and a character
//! code buffer for array consumers.
//!
//! Symbols: `P` is the seeker; a live evader is the digit of its facing
//! (`0` east, `1` west, `2` south, `3` north), shifted by 5 while the seeker
//! is spotted. Captured evaders are not drawn. Evaders are drawn over the
//! seeker when they share a cell.

use super::types::WorldState;
use super::visibility;
use crate::maze::GridMap;

/// Glyph used for the seeker.
pub const SEEKER_GLYPH: char = 'P';

/// Offset added to an evader's facing digit while the seeker is spotted.
pub const SPOTTED_OFFSET: u32 = 5;

/// Character codes of a rendered grid, row-major.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Frame {
    pub height: usize,
    pub width: usize,
    pub data: Vec<u8>,
}

impl Frame {
    /// `(height, width, channels)`.
    pub fn shape(&self) -> (usize, usize, usize) {
        (self.height, self.width, 1)
    }

    /// Code at row `y`, column `x`.
    pub fn at(&self, x: usize, y: usize) -> Option<u8> {
        if x < self.width && y < self.height {
            self.data.get(y * self.width + x).copied()
        } else {
            None
        }
    }
}

fn paint(map: &GridMap, state: &WorldState) -> Vec<Vec<char>> {
    let mut grid: Vec<Vec<char>> = map.rows().map(|row| row.to_vec()).collect();
    let mut put = |x: usize, y: usize, glyph: char| {
        if let Some(slot) = grid.get_mut(y).and_then(|row| row.get_mut(x)) {
            *slot = glyph;
        }
    };

    put(state.seeker.x, state.seeker.y, SEEKER_GLYPH);

    let shift = if visibility::is_spotted(state) {
        SPOTTED_OFFSET
    } else {
        0
    };
    for (_, evader) in state.active_evaders() {
        let code = evader.facing.index() as u32 + shift;
        if let Some(glyph) = char::from_digit(code, 10) {
            put(evader.position.x, evader.position.y, glyph);
        }
    }

    grid
}

/// Renders the state as text, glyphs separated by spaces, one line per row.
pub fn render_text(map: &GridMap, state: &WorldState) -> String {
    let mut out = String::with_capacity(map.height() * (map.width() * 2 + 1));
    for row in paint(map, state) {
        let line: Vec<String> = row.iter().map(|c| c.to_string()).collect();
        out.push_str(&line.join(" "));
        out.push('\n');
    }
    out
}

/// Renders the state as a buffer of character codes.
///
/// Non-ASCII layout glyphs are written as `?`.
pub fn render_buffer(map: &GridMap, state: &WorldState) -> Frame {
    let data = paint(map, state)
        .into_iter()
        .flatten()
        .map(|c| if c.is_ascii() { c as u8 } else { b'?' })
        .collect();
    Frame {
        height: map.height(),
        width: map.width(),
        data,
    }
}
