use std::fmt;
use std::str::FromStr;

/// One of the interchangeable search strategies.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Strategy {
    /// Breadth-first search, stops as soon as the goal is dequeued.
    Bfs,
    /// Uniform-cost search over every reachable cell, no early exit.
    Dijkstra,
    /// A* guided by a [`Heuristic`](crate::Heuristic), stops at the goal.
    Astar,
}

impl Strategy {
    pub const ALL: [Strategy; 3] = [Strategy::Dijkstra, Strategy::Astar, Strategy::Bfs];
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Bfs => f.write_str("BFS"),
            Strategy::Dijkstra => f.write_str("Dijkstra"),
            Strategy::Astar => f.write_str("A*"),
        }
    }
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bfs" => Ok(Strategy::Bfs),
            "dijkstra" => Ok(Strategy::Dijkstra),
            "astar" | "a*" => Ok(Strategy::Astar),
            other => Err(format!("unknown search strategy '{other}'")),
        }
    }
}
