use crate::search::astar_grid;
use crate::{Coord, Cost, Maze, Path, TieBreak};

pub mod astar;
pub mod dijkstra;

/// Knobs of a single search.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchConfig {
    /// Order among frontier entries with equal estimated cost.
    pub tie_break: TieBreak,
    /// Stop as soon as the end is finalized instead of draining the frontier. The returned
    /// path is the same either way.
    pub stop_at_goal: bool,
    /// Consult the connected components before searching so that an unreachable end is
    /// reported without exploring the start's component.
    pub component_precheck: bool,
    /// Give up with [SearchOutcome::Aborted] after this many expansions.
    pub max_expansions: Option<usize>,
}

impl Default for SearchConfig {
    fn default() -> SearchConfig {
        SearchConfig {
            tie_break: TieBreak::Insertion,
            stop_at_goal: true,
            component_precheck: true,
            max_expansions: None,
        }
    }
}

/// Result of a search. Not finding a path is a normal outcome, distinct from any path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchOutcome {
    Found(Path),
    /// The end cannot be reached from the start.
    NoPath,
    /// The expansion budget ran out before the end was finalized.
    Aborted { expanded: usize },
}

impl SearchOutcome {
    pub fn is_found(&self) -> bool {
        matches!(self, SearchOutcome::Found(_))
    }
    pub fn path(&self) -> Option<&Path> {
        match self {
            SearchOutcome::Found(path) => Some(path),
            _ => None,
        }
    }
    pub fn into_path(self) -> Option<Path> {
        match self {
            SearchOutcome::Found(path) => Some(path),
            _ => None,
        }
    }
}

/// Counters collected during one search.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Cells finalized and expanded.
    pub expanded: usize,
    /// Entries pushed onto the frontier.
    pub pushed: usize,
    /// Popped entries discarded because their cell was finalized or improved since.
    pub stale: usize,
    /// Largest number of entries held by the frontier at once.
    pub peak_frontier: usize,
}

pub trait GridSolver {
    fn config(&self) -> &SearchConfig;

    /// Estimated remaining cost from `p1` to `p2`. Must never overestimate and must be
    /// consistent for the found paths to be shortest.
    fn heuristic(&self, p1: &Coord, p2: &Coord) -> Cost;

    /// Searches from the maze's start to its end, flags the cells between them as path and
    /// returns the outcome together with search counters.
    fn solve_with_stats(&self, maze: &mut Maze) -> (SearchOutcome, SearchStats) {
        let goal = maze.end();
        astar_grid(maze, self.config(), |point| self.heuristic(point, &goal))
    }

    fn solve(&self, maze: &mut Maze) -> SearchOutcome {
        self.solve_with_stats(maze).0
    }

    /// The shortest path from start to end, if there is one.
    fn get_path(&self, maze: &mut Maze) -> Option<Path> {
        self.solve(maze).into_path()
    }
}
