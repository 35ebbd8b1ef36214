use maze_astar::{AstarSolver, Coord, GridSolver, Maze, SearchConfig, TieBreak};

// On an open maze every monotone staircase from S to E is a shortest path. The tie-breaking
// policy decides which one is returned and how many cells are expanded on the way.

fn main() {
    for tie_break in [
        TieBreak::Insertion,
        TieBreak::Lifo,
        TieBreak::LowestCost,
        TieBreak::HighestCost,
    ] {
        let mut maze = Maze::new(6, 4, Coord::new(0, 0), Coord::new(3, 5));
        maze.set_blocked(Coord::new(1, 2), true);
        let solver = AstarSolver::with_config(SearchConfig {
            tie_break,
            ..SearchConfig::default()
        });
        let (outcome, stats) = solver.solve_with_stats(&mut maze);
        println!(
            "{:?}: cost {:?}, {} expanded",
            tie_break,
            outcome.path().map(|p| p.cost()),
            stats.expanded
        );
        println!("{}", maze);
    }
}
