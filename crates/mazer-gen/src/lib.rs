//! Maze generation for mazer: randomized depth-first carving of perfect
//! mazes into a [`mazer_core::Grid`].

pub mod maze;

pub use maze::{FirstChooser, GenOutcome, MazeGen, MoveChooser, UniformChooser};
