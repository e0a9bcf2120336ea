//! Episode-owning pursuit environment.
//!
//! Drives the [`TransitionEngine`] one turn at a time and encodes states for
//! the consuming agent.

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use super::codec::StateCodec;
use super::config::{EnvConfig, Encoding};
use super::engine::{StepInfo, TransitionEngine};
use super::error::{CodecError, EnvError};
use super::render::{self, Frame};
use super::types::{EvaderState, Observation, SeekerAction, WorldState};
use crate::maze::{GridMap, Heading};

/// Lifecycle of an episode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Active,
    /// Every evader has been captured. Only [`HideSeekEnv::reset`] leaves
    /// this phase.
    Terminated,
}

/// Result of a single environment step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepResult {
    /// Encoded state after the turn.
    pub observation: Observation,
    /// Reward for the turn.
    pub reward: i64,
    /// Whether the episode ended this turn.
    pub terminated: bool,
    /// Turns played in this episode, this one included.
    pub steps: u32,
    /// Side information about the turn.
    pub info: StepInfo,
}

/// The pursuit environment: one seeker, N evaders, one maze.
///
/// # Lifecycle
///
/// 1. Call [`HideSeekEnv::new`] with a shared map, configuration, and seed.
///    The first episode is started right away.
/// 2. Call [`HideSeekEnv::step`] with seeker actions until `terminated`.
///    Step budgets are left to the caller.
/// 3. Call [`HideSeekEnv::reset`] to start the next episode.
///
/// Each environment owns its state and random source; many environments may
/// share one `Arc<GridMap>`.
#[derive(Debug)]
pub struct HideSeekEnv<R = StdRng> {
    config: EnvConfig,
    engine: TransitionEngine,
    codec: StateCodec,
    state: WorldState,
    phase: Phase,
    steps: u32,
    cumulative_reward: i64,
    rng: R,
}

impl<R: Rng + SeedableRng> HideSeekEnv<R> {
    /// Creates an environment seeded with `seed` and starts an episode.
    ///
    /// # Errors
    ///
    /// * [`EnvError::InvalidConfig`] - the configuration does not fit the map
    /// * [`EnvError::Codec`] - scalar encoding requested for a state space
    ///   too large for a 64-bit index
    pub fn new(map: Arc<GridMap>, config: EnvConfig, seed: u64) -> Result<Self, EnvError> {
        Self::with_rng(map, config, R::seed_from_u64(seed))
    }

    /// Creates an environment that draws from `rng` and starts an episode.
    pub fn with_rng(map: Arc<GridMap>, config: EnvConfig, rng: R) -> Result<Self, EnvError> {
        config.validate(&map)?;
        let codec = StateCodec::new(&map, config.n_evaders);
        if config.encoding == Encoding::Scalar && codec.bound().is_none() {
            return Err(CodecError::ScalarOverflow {
                evaders: config.n_evaders,
            }
            .into());
        }

        let engine = TransitionEngine::new(map, config.rewards);
        let state = WorldState::new(config.seeker_start, Vec::new());
        let mut env = Self {
            config,
            engine,
            codec,
            state,
            phase: Phase::Active,
            steps: 0,
            cumulative_reward: 0,
            rng,
        };
        env.spawn();
        Ok(env)
    }

    /// Starts a new episode and returns its encoded initial state.
    ///
    /// The seeker goes to its configured start; every evader lands on a
    /// uniformly chosen open cell (evaders may share a cell) with a uniformly
    /// chosen facing. `Some(seed)` reseeds the random source first.
    pub fn reset(&mut self, seed: Option<u64>) -> Result<Observation, EnvError> {
        if let Some(seed) = seed {
            self.rng = R::seed_from_u64(seed);
        }
        self.spawn();
        debug!(?seed, n_evaders = self.config.n_evaders, "episode reset");
        self.observation()
    }

    fn spawn(&mut self) {
        let cells = self.engine.map().open_cells();
        let headings = Heading::all();
        let evaders = (0..self.config.n_evaders)
            .map(|_| {
                let position = cells[self.rng.gen_range(0..cells.len())];
                let heading = headings[self.rng.gen_range(0..headings.len())];
                EvaderState::new(position, heading.into())
            })
            .collect();

        self.state = WorldState::new(self.config.seeker_start, evaders);
        self.phase = Phase::Active;
        self.steps = 0;
        self.cumulative_reward = 0;
    }

    /// Plays one turn.
    ///
    /// # Errors
    ///
    /// * [`EnvError::EpisodeFinished`] - the episode has terminated
    /// * [`EnvError::DeadEnd`] - an evader is stuck on a cell with no exit
    ///
    /// On error the environment is left as it was.
    pub fn step(&mut self, action: SeekerAction) -> Result<StepResult, EnvError> {
        if self.phase == Phase::Terminated {
            return Err(EnvError::EpisodeFinished);
        }

        let transition = self.engine.step(&self.state, action, &mut self.rng)?;
        let observation = self.encode(&transition.state)?;

        self.state = transition.state;
        self.steps = self.steps.saturating_add(1);
        self.cumulative_reward += transition.reward;
        if transition.terminated {
            self.phase = Phase::Terminated;
            debug!(
                steps = self.steps,
                cumulative_reward = self.cumulative_reward,
                "episode terminated"
            );
        }

        Ok(StepResult {
            observation,
            reward: transition.reward,
            terminated: transition.terminated,
            steps: self.steps,
            info: transition.info,
        })
    }

    /// Plays one turn from a discrete action index (`0..6`).
    ///
    /// # Errors
    ///
    /// [`EnvError::InvalidAction`] for an index outside the action set, plus
    /// everything [`HideSeekEnv::step`] returns.
    pub fn step_index(&mut self, action: usize) -> Result<StepResult, EnvError> {
        let action = SeekerAction::from_index(action).ok_or(EnvError::InvalidAction(action))?;
        self.step(action)
    }

    /// Replaces the current state, keeping the step counter.
    ///
    /// The phase follows the state: a state with every evader captured is
    /// terminated.
    ///
    /// # Errors
    ///
    /// [`EnvError::InvalidState`] when the evader count differs from the
    /// configuration or any agent is off the open cells.
    pub fn load_state(&mut self, state: WorldState) -> Result<Observation, EnvError> {
        if state.evaders.len() != self.config.n_evaders {
            return Err(EnvError::InvalidState(format!(
                "expected {} evaders, found {}",
                self.config.n_evaders,
                state.evaders.len()
            )));
        }
        let map = self.engine.map();
        let positions =
            std::iter::once(state.seeker).chain(state.evaders.iter().map(|e| e.position));
        for position in positions {
            if !map.is_agent_cell(position) {
                return Err(EnvError::InvalidState(format!(
                    "{} is not an open cell",
                    position
                )));
            }
        }

        let observation = self.encode(&state)?;
        self.phase = if state.all_captured() {
            Phase::Terminated
        } else {
            Phase::Active
        };
        self.state = state;
        Ok(observation)
    }

    /// Encoded form of the current state.
    pub fn observation(&self) -> Result<Observation, EnvError> {
        self.encode(&self.state)
    }

    fn encode(&self, state: &WorldState) -> Result<Observation, EnvError> {
        Ok(match self.config.encoding {
            Encoding::Scalar => Observation::Index(self.codec.encode(state)?),
            Encoding::Array => Observation::Digits(self.codec.to_digits(state)?),
            Encoding::Frame => Observation::Frame(render::render_buffer(self.engine.map(), state)),
        })
    }

    /// Renders the current state as text.
    pub fn render_text(&self) -> String {
        render::render_text(self.engine.map(), &self.state)
    }

    /// Renders the current state as character codes.
    pub fn render_buffer(&self) -> Frame {
        render::render_buffer(self.engine.map(), &self.state)
    }

    pub fn state(&self) -> &WorldState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_terminated(&self) -> bool {
        self.phase == Phase::Terminated
    }

    /// Turns played in the current episode.
    pub fn steps(&self) -> u32 {
        self.steps
    }

    /// Sum of rewards in the current episode.
    pub fn cumulative_reward(&self) -> i64 {
        self.cumulative_reward
    }

    pub fn config(&self) -> &EnvConfig {
        &self.config
    }

    pub fn codec(&self) -> &StateCodec {
        &self.codec
    }

    pub fn map(&self) -> &GridMap {
        self.engine.map()
    }

    /// Number of distinct scalar observations, `None` when it exceeds `u64`.
    pub fn state_space_size(&self) -> Option<u64> {
        self.codec.bound()
    }

    /// Number of discrete seeker actions.
    pub fn action_count(&self) -> usize {
        self.config.action_dim()
    }
}
