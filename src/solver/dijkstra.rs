use crate::{solver::GridSolver, Coord, Cost, SearchConfig};

/// Uniform-cost search: the same engine with a zero heuristic. Explores more cells than
/// [AstarSolver](crate::AstarSolver) but needs no knowledge of the end's position.
#[derive(Clone, Debug, Default)]
pub struct DijkstraSolver {
    pub config: SearchConfig,
}

impl DijkstraSolver {
    pub fn new() -> DijkstraSolver {
        DijkstraSolver::default()
    }
    pub fn with_config(config: SearchConfig) -> DijkstraSolver {
        DijkstraSolver { config }
    }
}

impl GridSolver for DijkstraSolver {
    fn config(&self) -> &SearchConfig {
        &self.config
    }

    fn heuristic(&self, _: &Coord, _: &Coord) -> Cost {
        0
    }
}
