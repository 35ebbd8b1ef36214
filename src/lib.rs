//! # maze_astar
//!
//! Shortest paths through text mazes using
//! [A*](https://en.wikipedia.org/wiki/A*_search_algorithm) with the
//! [Manhattan distance](https://en.wikipedia.org/wiki/Taxicab_geometry) as heuristic.
//! Movement is restricted to the four cardinal directions and every move costs 1.
//!
//! A [Maze] is read from text where `' '` is open floor, `'S'` the start, `'E'` the end
//! and any other character a wall. Solving it with a [GridSolver] returns the [Path] as an
//! explicit sequence of coordinates and flags every cell strictly between start and end
//! as [Terrain::Path], so that printing the maze shows the route.
//!
//! ```
//! use maze_astar::{AstarSolver, GridSolver, Maze};
//!
//! let mut maze: Maze = "S  \nXX \nE  ".parse().unwrap();
//! let path = AstarSolver::new().get_path(&mut maze).unwrap();
//! assert_eq!(path.cost(), 6);
//! assert_eq!(maze.to_string(), "S##\nXX#\nE##\n");
//! ```
mod frontier;
pub mod maze;
pub mod parse;
pub mod path;
mod search;
pub mod solver;

pub use crate::frontier::TieBreak;
pub use crate::maze::{manhattan_distance, Cell, CellState, Coord, Maze, Scores, Terrain};
pub use crate::parse::MazeError;
pub use crate::path::Path;
pub use crate::solver::astar::AstarSolver;
pub use crate::solver::dijkstra::DijkstraSolver;
pub use crate::solver::{GridSolver, SearchConfig, SearchOutcome, SearchStats};

/// Cost of a path or estimate. Every cardinal move costs 1.
pub type Cost = u32;

/// Glyph marking open floor in maze text.
pub const EMPTY_GLYPH: char = ' ';
/// Glyph marking the start cell in maze text.
pub const START_GLYPH: char = 'S';
/// Glyph marking the end cell in maze text.
pub const END_GLYPH: char = 'E';
/// Glyph used when rendering cells on the found path.
pub const PATH_GLYPH: char = '#';
/// Glyph of walls placed through [Maze::set_blocked].
pub const WALL_GLYPH: char = 'X';

const N_NEIGHBORS: usize = 4;
