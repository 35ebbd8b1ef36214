use crate::{manhattan_distance, solver::GridSolver, Coord, Cost, SearchConfig};

#[derive(Clone, Debug, Default)]
pub struct AstarSolver {
    pub config: SearchConfig,
}

impl AstarSolver {
    pub fn new() -> AstarSolver {
        AstarSolver {
            config: SearchConfig::default(),
        }
    }
    pub fn with_config(config: SearchConfig) -> AstarSolver {
        AstarSolver { config }
    }
}

impl GridSolver for AstarSolver {
    fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Manhattan distance, exact on an empty 4-connected maze.
    fn heuristic(&self, p1: &Coord, p2: &Coord) -> Cost {
        manhattan_distance(p1, p2)
    }
}
