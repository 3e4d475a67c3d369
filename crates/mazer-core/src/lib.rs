//! **mazer-core**: core types for carving and searching cell mazes.
//!
//! This crate provides the foundational types used across the *mazer*
//! workspace: positions and directions, walled cells, the grid arena that
//! owns them, the observer hooks through which runs report progress, a
//! cancellation token, and the wall-based movement rules.

pub mod cell;
pub mod context;
pub mod error;
pub mod geom;
pub mod grid;
pub mod movement;
pub mod observer;

pub use cell::{Borders, Cell, INFINITE_COST};
pub use context::Context;
pub use error::MazeError;
pub use geom::{Dir, Pos, PosIter};
pub use grid::Grid;
pub use movement::{Avatar, can_move};
pub use observer::{NullObserver, Pacer, Recorder, StepEvent, StepObserver, VisualTag};
