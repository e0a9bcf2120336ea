//! Single-step movement shared by the seeker and the evaders.

use rand::Rng;
use tracing::trace;

use super::error::MoveError;
use super::grid::GridMap;
use super::types::{Heading, Position};

/// Outcome of a movement attempt.
///
/// A blocked move is an ordinary outcome (it costs the seeker a penalty),
/// not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Move {
    Moved(Position),
    Blocked,
}

impl Move {
    /// The resulting position, falling back to `from` when blocked.
    pub fn or_stay(self, from: Position) -> Position {
        match self {
            Move::Moved(to) => to,
            Move::Blocked => from,
        }
    }
}

/// A legal random step chosen for an evader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampledMove {
    /// Destination cell.
    pub position: Position,
    /// Heading of the successful step; becomes the evader's facing.
    pub heading: Heading,
    /// Headings drawn before a legal one was found (1..=4).
    pub attempts: usize,
}

/// Attempts one step from `from` in `heading`.
///
/// The step is taken when the boundary slot in `heading` is open and the
/// destination, clamped to the grid, is a cell an agent may stand on.
pub fn try_move(map: &GridMap, from: Position, heading: Heading) -> Move {
    if !map.is_passable(from, heading) {
        return Move::Blocked;
    }

    let to = map.neighbor(from, heading);
    if to != from && map.is_agent_cell(to) {
        Move::Moved(to)
    } else {
        Move::Blocked
    }
}

/// True when `b` is exactly one legal step away from `a`.
pub fn adjacent(map: &GridMap, a: Position, b: Position) -> bool {
    Heading::all()
        .into_iter()
        .any(|h| try_move(map, a, h) == Move::Moved(b))
}

/// Picks a uniformly random legal step from `from`.
///
/// Headings are drawn without replacement: a blocked heading is dropped from
/// the candidate set, so at most four draws are made.
///
/// # Errors
///
/// [`MoveError::DeadEnd`] when every heading is blocked.
pub fn sample_move<R: Rng + ?Sized>(
    map: &GridMap,
    from: Position,
    rng: &mut R,
) -> Result<SampledMove, MoveError> {
    let mut candidates = Heading::all();
    let mut remaining = candidates.len();
    let mut attempts = 0;

    while remaining > 0 {
        let pick = rng.gen_range(0..remaining);
        let heading = candidates[pick];
        attempts += 1;

        if let Move::Moved(position) = try_move(map, from, heading) {
            trace!(%from, %position, %heading, attempts, "evader step");
            return Ok(SampledMove {
                position,
                heading,
                attempts,
            });
        }

        remaining -= 1;
        candidates.swap(pick, remaining);
    }

    Err(MoveError::DeadEnd { position: from })
}
