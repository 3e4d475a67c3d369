//! Path search over carved mazes.
//!
//! Three interchangeable strategies find the route from a grid's start cell
//! to its goal cell:
//!
//! - **BFS** ([`PathFinder::bfs`]) stops as soon as the goal is dequeued
//! - **Dijkstra** ([`PathFinder::dijkstra`]) settles every reachable cell
//! - **A\*** ([`PathFinder::astar`]) guided by a [`Heuristic`]
//!
//! All of them walk forward links only, with unit edge cost, write their
//! bookkeeping into the grid's cells, and share one reconstruction step
//! that follows origins back from the goal. On a perfect maze there is a
//! single route between any two cells, so all three report the same path.

mod astar;
mod bfs;
mod dijkstra;
mod distance;
mod path;
mod pathfinder;
mod strategy;
#[cfg(test)]
mod testutil;

pub use distance::{Heuristic, manhattan, signed_offset};
pub use path::{SearchOutcome, SearchStatus, path_to_goal};
pub use pathfinder::PathFinder;
pub use strategy::Strategy;
