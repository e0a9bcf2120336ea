//! Configuration for the pursuit environment.

use super::error::EnvError;
use super::types::SeekerAction;
use crate::maze::{GridMap, Position};

/// Reward constants for one turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RewardConfig {
    /// Reward of an ordinary turn (stand, successful move).
    pub time_penalty: i32,
    /// Reward when the seeker walks into a wall.
    pub blocked_penalty: i32,
    /// Reward for a catch action that captures nobody.
    pub failed_catch_penalty: i32,
    /// Reward per evader captured; simultaneous captures add up.
    pub capture_reward: i32,
}

impl Default for RewardConfig {
    fn default() -> Self {
        Self {
            time_penalty: -1,
            blocked_penalty: -10,
            failed_catch_penalty: -10,
            capture_reward: 100,
        }
    }
}

/// How states are handed to the consuming agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Encoding {
    /// Dense mixed-radix index, for tabular learners.
    #[default]
    Scalar,
    /// One digit per field, no folding.
    Array,
    /// The rendered character-code frame, for pixel-style learners.
    Frame,
}

/// Configuration for the pursuit environment.
///
/// Controls the number of evaders, the seeker's starting cell, the
/// observation encoding, and reward shaping.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EnvConfig {
    /// Number of evaders N (at least one).
    pub n_evaders: usize,
    /// Cell the seeker starts every episode on.
    pub seeker_start: Position,
    /// Observation encoding returned by `reset` and `step`.
    pub encoding: Encoding,
    /// Reward constants.
    pub rewards: RewardConfig,
}

impl EnvConfig {
    /// Default configuration with `n_evaders` evaders.
    pub fn with_evaders(n_evaders: usize) -> Self {
        Self {
            n_evaders,
            ..Self::default()
        }
    }

    /// Number of discrete seeker actions.
    pub fn action_dim(&self) -> usize {
        SeekerAction::COUNT
    }

    /// Largest reward a single turn can yield: every evader captured at once.
    pub fn max_turn_reward(&self) -> i64 {
        i64::from(self.rewards.capture_reward) * self.n_evaders as i64
    }

    /// Checks the configuration against the map it will be played on.
    ///
    /// # Errors
    ///
    /// [`EnvError::InvalidConfig`] when there are no evaders or the seeker
    /// start is not a cell an agent may stand on.
    pub fn validate(&self, map: &GridMap) -> Result<(), EnvError> {
        if self.n_evaders == 0 {
            return Err(EnvError::InvalidConfig(
                "at least one evader is required".to_string(),
            ));
        }
        if !map.is_agent_cell(self.seeker_start) {
            return Err(EnvError::InvalidConfig(format!(
                "seeker start {} is not an open cell",
                self.seeker_start
            )));
        }
        Ok(())
    }
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            n_evaders: 1,
            seeker_start: Position::new(1, 1),
            encoding: Encoding::Scalar,
            rewards: RewardConfig::default(),
        }
    }
}
