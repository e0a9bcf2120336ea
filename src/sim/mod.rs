//! Turn-based pursuit simulation: state, encoding, visibility, and the
//! transition engine, wrapped in an episode-owning environment.

pub mod codec;
pub mod config;
pub mod engine;
pub mod environment;
pub mod error;
pub mod render;
pub mod reward;
pub mod types;
pub mod visibility;

#[cfg(test)]
mod tests;

pub use codec::{Field, StateCodec};
pub use config::{Encoding, EnvConfig, RewardConfig};
pub use engine::{StepInfo, Transition, TransitionEngine};
pub use environment::{HideSeekEnv, Phase, StepResult};
pub use error::{CodecError, EnvError};
pub use render::{render_buffer, render_text, Frame};
pub use reward::RewardLedger;
pub use types::{EvaderState, Observation, SeekerAction, WorldState};
