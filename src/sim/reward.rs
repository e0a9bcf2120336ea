//! Turn reward bookkeeping.
//!
//! A turn starts at the time penalty. A blocked move or a failed catch
//! replaces it with the matching penalty; the first capture replaces whatever
//! is there with the capture reward, and each further capture in the same
//! turn adds another.

use super::config::RewardConfig;

/// Accumulates the reward of a single turn.
#[derive(Debug, Clone)]
pub struct RewardLedger {
    rewards: RewardConfig,
    base: i64,
    blocked: bool,
    captures: usize,
}

impl RewardLedger {
    /// Starts a turn at the time penalty.
    pub fn new(rewards: RewardConfig) -> Self {
        Self {
            rewards,
            base: i64::from(rewards.time_penalty),
            blocked: false,
            captures: 0,
        }
    }

    /// The seeker walked into a wall.
    pub fn blocked(&mut self) {
        self.blocked = true;
        self.base = i64::from(self.rewards.blocked_penalty);
    }

    /// One evader was captured.
    pub fn capture(&mut self) {
        self.captures += 1;
    }

    /// A catch was attempted and nobody was captured.
    ///
    /// Does not stack on a blocked-move penalty.
    pub fn failed_catch(&mut self) {
        if !self.blocked {
            self.base = i64::from(self.rewards.failed_catch_penalty);
        }
    }

    /// Number of captures recorded this turn.
    pub fn captures(&self) -> usize {
        self.captures
    }

    /// The reward for the turn.
    pub fn total(&self) -> i64 {
        if self.captures > 0 {
            i64::from(self.rewards.capture_reward) * self.captures as i64
        } else {
            self.base
        }
    }
}
