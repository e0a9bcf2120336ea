//! One simulation turn.
//!
//! Order of a turn:
//! seeker move → catch (all-or-nothing on the spotted flag) → termination
//! check → evader moves.

use std::sync::Arc;

use rand::Rng;
use tracing::debug;

use super::config::RewardConfig;
use super::error::EnvError;
use super::reward::RewardLedger;
use super::types::{SeekerAction, WorldState};
use super::visibility;
use crate::maze::movement::{adjacent, sample_move, try_move};
use crate::maze::{Facing, GridMap, Move};

/// Side information about a turn.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepInfo {
    /// The seeker's move was blocked by a wall.
    pub seeker_blocked: bool,
    /// Some active evader saw the seeker when the catch was attempted.
    /// Always `false` on turns without a catch.
    pub spotted: bool,
    /// Evaders that saw the seeker when the catch was attempted.
    pub spotters: Vec<usize>,
    /// Evaders captured this turn, in evader order.
    pub captured: Vec<usize>,
    /// Evaders still in play after the turn.
    pub remaining: usize,
}

/// Result of applying one seeker action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub state: WorldState,
    pub reward: i64,
    pub terminated: bool,
    pub info: StepInfo,
}

/// Computes turns on a fixed map.
///
/// The engine holds no episode state: it reads the given state and returns
/// the next one, leaving the input untouched.
#[derive(Debug, Clone)]
pub struct TransitionEngine {
    map: Arc<GridMap>,
    rewards: RewardConfig,
}

impl TransitionEngine {
    /// Creates an engine for `map` with the given reward constants.
    pub fn new(map: Arc<GridMap>, rewards: RewardConfig) -> Self {
        Self { map, rewards }
    }

    pub fn map(&self) -> &GridMap {
        &self.map
    }

    /// Applies `action` to `state` and moves the remaining evaders.
    ///
    /// # Errors
    ///
    /// [`EnvError::DeadEnd`] when an evader stands on a cell with no legal
    /// move. Blocked moves and failed catches are not errors; they show up in
    /// the reward.
    #[tracing::instrument(level = "trace", skip(self, state, rng))]
    pub fn step<R: Rng + ?Sized>(
        &self,
        state: &WorldState,
        action: SeekerAction,
        rng: &mut R,
    ) -> Result<Transition, EnvError> {
        let mut next = state.clone();
        let mut ledger = RewardLedger::new(self.rewards);
        let mut info = StepInfo::default();

        // 1. Seeker
        if let Some(heading) = action.heading() {
            match try_move(&self.map, next.seeker, heading) {
                Move::Moved(to) => next.seeker = to,
                Move::Blocked => {
                    debug!(seeker = %next.seeker, %heading, "seeker blocked");
                    ledger.blocked();
                    info.seeker_blocked = true;
                }
            }
        }

        // 2. Catch
        if action == SeekerAction::Catch {
            info.spotters = visibility::spotters(&next);
            info.spotted = !info.spotters.is_empty();
            if !info.spotted {
                let seeker = next.seeker;
                for (i, evader) in next.evaders.iter_mut().enumerate() {
                    if !evader.is_active() {
                        continue;
                    }
                    if evader.position == seeker || adjacent(&self.map, seeker, evader.position) {
                        evader.facing = Facing::Captured;
                        ledger.capture();
                        info.captured.push(i);
                    }
                }
            }
            if ledger.captures() == 0 {
                ledger.failed_catch();
            } else {
                debug!(captured = ?info.captured, "evaders captured");
            }
        }

        // 3. Evaders
        let terminated = next.all_captured();
        if !terminated {
            for evader in next.evaders.iter_mut().filter(|e| e.is_active()) {
                let step = sample_move(&self.map, evader.position, rng)?;
                evader.position = step.position;
                evader.facing = step.heading.into();
            }
        }

        info.remaining = next.n_active();
        Ok(Transition {
            state: next,
            reward: ledger.total(),
            terminated,
            info,
        })
    }
}
