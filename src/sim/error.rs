use thiserror::Error;

use super::codec::Field;
use crate::maze::{MapError, MoveError, Position};

/// Errors raised by [`StateCodec`](super::StateCodec).
///
/// All of these point at a bug upstream of the codec: a reachable state always
/// encodes, and every index below the bound always decodes.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("Field {field} has digit {digit}, outside its radix {radix}")]
    OutOfRange { field: Field, digit: u64, radix: u32 },

    #[error("Field {field} holds raw coordinate {value}, which is not on the cell lattice")]
    Misaligned { field: Field, value: usize },

    #[error("Index {index} is outside the state space [0, {bound})")]
    IndexOutOfRange { index: u64, bound: u64 },

    #[error("Expected {expected} entries, found {found}")]
    LengthMismatch { expected: usize, found: usize },

    #[error("State space for {evaders} evaders does not fit a 64-bit index")]
    ScalarOverflow { evaders: usize },
}

/// Errors raised by the environment's step interface.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EnvError {
    #[error("Action index {0} is outside the action set")]
    InvalidAction(usize),

    #[error("Episode has terminated; call reset before stepping again")]
    EpisodeFinished,

    #[error("Evader at {position} has no legal move")]
    DeadEnd { position: Position },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid world state: {0}")]
    InvalidState(String),

    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error(transparent)]
    Map(#[from] MapError),
}

impl From<MoveError> for EnvError {
    fn from(err: MoveError) -> Self {
        match err {
            MoveError::DeadEnd { position } => EnvError::DeadEnd { position },
        }
    }
}
