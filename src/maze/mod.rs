//! Maze geometry: the immutable grid, its shipped layout, and single-step
//! movement shared by the seeker and the evaders.

pub mod error;
pub mod grid;
pub mod layout;
pub mod movement;
pub mod types;

pub use error::{MapError, MoveError};
pub use grid::{Cell, GridMap};
pub use layout::CLASSIC_LAYOUT;
pub use movement::{Move, SampledMove};
pub use types::{Facing, Heading, Position};
