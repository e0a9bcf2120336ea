//! Line-of-sight rule that lets evaders hide from the seeker.
//!
//! An evader looks along its facing. The seeker is seen when it stands on the
//! evader's row (East/West) or column (South/North), at or beyond the evader
//! in the direction it faces. Walls do not block sight.

use super::types::{EvaderState, WorldState};
use crate::maze::{Facing, Position};

/// True when `evader` currently sees the seeker at `seeker`.
///
/// A captured evader sees nothing.
pub fn sees(seeker: Position, evader: &EvaderState) -> bool {
    let at = evader.position;
    match evader.facing {
        Facing::East => seeker.y == at.y && seeker.x >= at.x,
        Facing::West => seeker.y == at.y && seeker.x <= at.x,
        Facing::South => seeker.x == at.x && seeker.y >= at.y,
        Facing::North => seeker.x == at.x && seeker.y <= at.y,
        Facing::Captured => false,
    }
}

/// True when any active evader sees the seeker.
///
/// This single flag gates every capture in a turn: while any evader has the
/// seeker in sight, no evader can be caught.
pub fn is_spotted(state: &WorldState) -> bool {
    state
        .active_evaders()
        .any(|(_, evader)| sees(state.seeker, evader))
}

/// Indices of the active evaders that see the seeker.
pub fn spotters(state: &WorldState) -> Vec<usize> {
    state
        .active_evaders()
        .filter(|(_, evader)| sees(state.seeker, evader))
        .map(|(i, _)| i)
        .collect()
}
