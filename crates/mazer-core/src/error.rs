use std::fmt;

use crate::geom::Pos;

/// Errors raised by grid construction and structural mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MazeError {
    /// A grid needs at least one row and one column.
    InvalidDimensions { rows: i32, columns: i32 },
    /// A border can only be opened between orthogonally adjacent cells.
    InvalidAdjacency { a: Pos, b: Pos },
    /// A position outside the grid extents.
    OutOfBounds(Pos),
}

impl fmt::Display for MazeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDimensions { rows, columns } => {
                write!(f, "invalid maze dimensions {rows}x{columns}: both must be at least 1")
            }
            Self::InvalidAdjacency { a, b } => {
                write!(f, "cells {a} and {b} are not orthogonally adjacent")
            }
            Self::OutOfBounds(p) => write!(f, "position {p} is outside the grid"),
        }
    }
}

impl std::error::Error for MazeError {}
