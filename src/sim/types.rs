//! World state and action types for the pursuit simulation.

use std::fmt;

use super::render::Frame;
use crate::maze::{Facing, Heading, Position};

/// One evader: where it stands and where it looks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EvaderState {
    pub position: Position,
    pub facing: Facing,
}

impl EvaderState {
    /// Creates a new evader.
    pub fn new(position: Position, facing: Facing) -> Self {
        Self { position, facing }
    }

    /// True until the evader has been captured.
    pub fn is_active(&self) -> bool {
        !self.facing.is_captured()
    }
}

/// Complete state of one episode at a turn boundary.
///
/// The evader order is fixed for the episode: index `i` always refers to the
/// same evader, and the codec relies on that order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorldState {
    pub seeker: Position,
    pub evaders: Vec<EvaderState>,
}

impl WorldState {
    /// Creates a new world state.
    pub fn new(seeker: Position, evaders: Vec<EvaderState>) -> Self {
        Self { seeker, evaders }
    }

    /// Iterates over `(index, evader)` for evaders still in play.
    pub fn active_evaders(&self) -> impl Iterator<Item = (usize, &EvaderState)> {
        self.evaders.iter().enumerate().filter(|(_, e)| e.is_active())
    }

    /// Number of evaders still in play.
    pub fn n_active(&self) -> usize {
        self.evaders.iter().filter(|e| e.is_active()).count()
    }

    /// True once every evader has been captured.
    pub fn all_captured(&self) -> bool {
        self.evaders.iter().all(|e| !e.is_active())
    }
}

/// Seeker action for one turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SeekerAction {
    Stand,
    East,
    West,
    South,
    North,
    Catch,
}

impl SeekerAction {
    /// Number of discrete actions.
    pub const COUNT: usize = 6;

    /// Returns all actions in index order.
    pub fn all() -> [SeekerAction; 6] {
        [
            SeekerAction::Stand,
            SeekerAction::East,
            SeekerAction::West,
            SeekerAction::South,
            SeekerAction::North,
            SeekerAction::Catch,
        ]
    }

    /// Discrete index of this action (0=Stand .. 5=Catch).
    pub fn index(&self) -> usize {
        match self {
            SeekerAction::Stand => 0,
            SeekerAction::East => 1,
            SeekerAction::West => 2,
            SeekerAction::South => 3,
            SeekerAction::North => 4,
            SeekerAction::Catch => 5,
        }
    }

    /// Inverse of [`SeekerAction::index`].
    pub fn from_index(index: usize) -> Option<SeekerAction> {
        Self::all().get(index).copied()
    }

    /// The movement heading, for directional actions only.
    pub fn heading(&self) -> Option<Heading> {
        match self {
            SeekerAction::East => Some(Heading::East),
            SeekerAction::West => Some(Heading::West),
            SeekerAction::South => Some(Heading::South),
            SeekerAction::North => Some(Heading::North),
            SeekerAction::Stand | SeekerAction::Catch => None,
        }
    }
}

impl fmt::Display for SeekerAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeekerAction::Stand => write!(f, "stand"),
            SeekerAction::Catch => write!(f, "catch"),
            other => match other.heading() {
                Some(heading) => write!(f, "move {}", heading),
                None => Ok(()),
            },
        }
    }
}

/// Encoded state handed to the consuming agent.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Observation {
    /// Dense mixed-radix index in `[0, bound)`.
    Index(u64),
    /// One normalized digit per encoded field.
    Digits(Vec<u32>),
    /// Rendered character codes of the board.
    Frame(Frame),
}

impl Observation {
    /// The scalar index, if this is the scalar form.
    pub fn index(&self) -> Option<u64> {
        match self {
            Observation::Index(i) => Some(*i),
            _ => None,
        }
    }

    /// The digit array, if this is the array form.
    pub fn digits(&self) -> Option<&[u32]> {
        match self {
            Observation::Digits(d) => Some(d),
            _ => None,
        }
    }

    /// The rendered frame, if this is the frame form.
    pub fn frame(&self) -> Option<&Frame> {
        match self {
            Observation::Frame(f) => Some(f),
            _ => None,
        }
    }
}
