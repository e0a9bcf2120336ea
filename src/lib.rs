//! hideseek - a maze pursuit environment for reinforcement learning.
//!
//! One seeker chases N randomly moving evaders through a fixed maze. An
//! evader that has the seeker in its line of sight spoils every capture that
//! turn. The crate exposes a `reset`/`step` interface for an external agent,
//! with states encoded either as a dense mixed-radix index or as a digit
//! array.
//!
//! ```
//! use std::sync::Arc;
//! use hideseek::maze::GridMap;
//! use hideseek::sim::{EnvConfig, HideSeekEnv, SeekerAction};
//!
//! let map = Arc::new(GridMap::classic().unwrap());
//! let mut env: HideSeekEnv = HideSeekEnv::new(map, EnvConfig::with_evaders(2), 7).unwrap();
//!
//! let obs = env.reset(Some(7)).unwrap();
//! assert!(obs.index().unwrap() < env.state_space_size().unwrap());
//!
//! // The start cell is walled in on the east.
//! let result = env.step(SeekerAction::East).unwrap();
//! assert_eq!(result.reward, -10);
//! assert!(!result.terminated);
//! ```

pub mod maze;
pub mod sim;

pub use maze::{Facing, GridMap, Heading, Position};
pub use sim::{EnvConfig, EnvError, HideSeekEnv, Observation, SeekerAction, StepResult, WorldState};
