/// Fuzzes the solvers by checking for many random mazes that a path is found exactly when the
/// end is reachable, that its cost matches a breadth-first search, and that the flagged
/// cells describe that path. All tie-breaking policies and both termination modes are used.
use std::collections::VecDeque;

use maze_astar::*;
use rand::prelude::*;

fn random_maze(w: usize, h: usize, rng: &mut StdRng) -> Maze {
    let start = Coord::new(0, 0);
    let end = Coord::new(h as u32 - 1, w as u32 - 1);
    let mut maze = Maze::new(w, h, start, end);
    for row in 0..h as u32 {
        for col in 0..w as u32 {
            let coord = Coord::new(row, col);
            if coord != start && coord != end {
                maze.set_blocked(coord, rng.gen_bool(0.35));
            }
        }
    }
    maze.update();
    maze
}

/// Shortest number of moves from `from` to every cell, by breadth-first search over cells
/// that may be entered.
fn bfs_distances(maze: &Maze, from: Coord) -> Vec<Option<Cost>> {
    let mut dist = vec![None; maze.cells().len()];
    let mut queue = VecDeque::new();
    dist[maze.index(from)] = Some(0);
    queue.push_back(from);
    while let Some(current) = queue.pop_front() {
        let d = dist[maze.index(current)].unwrap();
        for n in maze.neighbors4(current) {
            let ix = maze.index(n);
            if dist[ix].is_none() && maze.cells()[ix].terrain().is_open() {
                dist[ix] = Some(d + 1);
                queue.push_back(n);
            }
        }
    }
    dist
}

fn visualize_maze(maze: &Maze) {
    print!("{}", maze);
}

fn check_path(maze: &Maze, path: &Path) {
    assert_eq!(path.start(), Some(maze.start()));
    assert_eq!(path.end(), Some(maze.end()));
    assert!(path.is_connected());
    for coord in path.interior() {
        assert_eq!(maze.terrain(coord), Some(Terrain::Path));
    }
    assert_eq!(maze.path_cells().len(), path.interior().count());
}

#[test]
fn fuzz() {
    const N: usize = 8;
    const N_MAZES: usize = 2000;
    let mut rng = StdRng::seed_from_u64(0);
    let tie_breaks = [
        TieBreak::Insertion,
        TieBreak::Lifo,
        TieBreak::LowestCost,
        TieBreak::HighestCost,
    ];
    for i in 0..N_MAZES {
        let mut maze = random_maze(N, N, &mut rng);
        let expected = bfs_distances(&maze, maze.start())[maze.index(maze.end())];
        let reachable = maze.reachable(&maze.start(), &maze.end());
        assert_eq!(reachable, expected.is_some());

        let config = SearchConfig {
            tie_break: tie_breaks[i % tie_breaks.len()],
            stop_at_goal: i % 2 == 0,
            component_precheck: i % 3 != 0,
            max_expansions: None,
        };
        let outcome = AstarSolver::with_config(config).solve(&mut maze);
        let cost = outcome.path().map(Path::cost);
        // Show the maze if the outcome is wrong
        if cost != expected {
            visualize_maze(&maze);
        }
        assert_eq!(cost, expected);
        match outcome {
            SearchOutcome::Found(path) => check_path(&maze, &path),
            SearchOutcome::NoPath => assert!(maze.path_cells().is_empty()),
            SearchOutcome::Aborted { .. } => panic!("no budget was set"),
        }
    }
}

#[test]
fn fuzz_astar_matches_dijkstra() {
    const N_MAZES: usize = 1000;
    let mut rng = StdRng::seed_from_u64(1);
    let astar = AstarSolver::new();
    let dijkstra = DijkstraSolver::new();
    for _ in 0..N_MAZES {
        let w = rng.gen_range(2..12);
        let h = rng.gen_range(1..12);
        let mut maze = random_maze(w, h, &mut rng);
        let astar_cost = astar.solve(&mut maze).path().map(Path::cost);
        let dijkstra_cost = dijkstra.solve(&mut maze).path().map(Path::cost);
        assert_eq!(astar_cost, dijkstra_cost);
    }
}

#[test]
fn heuristic_is_admissible() {
    let mut rng = StdRng::seed_from_u64(2);
    let solver = AstarSolver::new();
    for _ in 0..200 {
        let maze = random_maze(10, 10, &mut rng);
        let goal = maze.end();
        // Distances from the goal equal distances to it on an undirected grid.
        let to_goal = bfs_distances(&maze, goal);
        for (cell, dist) in maze.cells().iter().zip(to_goal) {
            if let Some(dist) = dist {
                assert!(solver.heuristic(&cell.coord(), &goal) <= dist);
            }
        }
    }
}

#[test]
fn repeated_solves_are_stable() {
    let mut rng = StdRng::seed_from_u64(3);
    for tie_break in [TieBreak::Insertion, TieBreak::HighestCost] {
        let solver = AstarSolver::with_config(SearchConfig {
            tie_break,
            ..SearchConfig::default()
        });
        for _ in 0..200 {
            let mut maze = random_maze(9, 7, &mut rng);
            let mut copy = maze.clone();
            let first = solver.solve(&mut maze);
            let again = solver.solve(&mut maze);
            let on_copy = solver.solve(&mut copy);
            assert_eq!(first, again);
            assert_eq!(first, on_copy);
            assert_eq!(maze.to_string(), copy.to_string());
        }
    }
}
