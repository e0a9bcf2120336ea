//! The maze shipped with the environment.

/// The classic 11×19 hide-and-seek maze.
///
/// A space is an open slot; any other glyph is a wall. Agent cells sit on odd
/// columns, so every even column is a wall slot between two horizontal
/// neighbors. Rows are not doubled: each interior row is a row of cells.
pub const CLASSIC_LAYOUT: [&str; 11] = [
    "o-----------------o",
    "| |   |     |     |",
    "|     |-| | |-|-| |",
    "| |       | |     |",
    "|-|           |-| |",
    "|   | |           |",
    "| |           |-| |",
    "| |           |   |",
    "| |-|-|-|     |-| |",
    "|               |-|",
    "o-----------------o",
];
