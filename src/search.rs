//! The A* loop over the cell arena of a [Maze].
use log::{debug, info, warn};

use crate::frontier::Frontier;
use crate::maze::{CellState, Maze, Scores};
use crate::solver::{SearchConfig, SearchOutcome, SearchStats};
use crate::{Coord, Cost, Path};

/// Runs one search from the maze's start to its end. `heuristic` estimates the remaining
/// cost from a cell to the end and must be consistent for the result to be optimal.
///
/// Cell metadata and path flags of earlier searches are reset first. On success the cells
/// strictly between start and end are flagged as [Terrain::Path](crate::Terrain::Path).
pub(crate) fn astar_grid<FH>(
    maze: &mut Maze,
    config: &SearchConfig,
    mut heuristic: FH,
) -> (SearchOutcome, SearchStats)
where
    FH: FnMut(&Coord) -> Cost,
{
    let mut stats = SearchStats::default();
    maze.reset_search();
    maze.clear_path();
    let start = maze.start();
    let goal = maze.end();

    if config.component_precheck {
        maze.update();
        if maze.unreachable(&start, &goal) {
            info!("{} is not reachable from {}", goal, start);
            return (SearchOutcome::NoPath, stats);
        }
    }

    let start_ix = maze.index(start);
    let goal_ix = maze.index(goal);
    let mut frontier = Frontier::new(config.tie_break);
    let start_f = heuristic(&start);
    {
        let cell = &mut maze.cells[start_ix];
        cell.scores = Some(Scores { g: 0, f: start_f });
        cell.state = CellState::Frontier;
    }
    frontier.push(start_ix, start, 0, start_f);
    stats.pushed += 1;
    stats.peak_frontier = frontier.len();

    let mut found = false;
    while let Some(entry) = frontier.pop() {
        let current = &mut maze.cells[entry.index];
        // Cells may sit in the frontier several times; only the entry carrying the best
        // cost of a not yet finalized cell is expanded.
        if current.state == CellState::Finalized || current.g().map_or(true, |g| entry.cost > g)
        {
            stats.stale += 1;
            continue;
        }
        if let Some(limit) = config.max_expansions {
            if stats.expanded >= limit {
                if found {
                    break;
                }
                warn!(
                    "Giving up after {} expansions with {} frontier entries left",
                    stats.expanded,
                    frontier.len() + 1
                );
                return (
                    SearchOutcome::Aborted {
                        expanded: stats.expanded,
                    },
                    stats,
                );
            }
        }
        current.state = CellState::Finalized;
        stats.expanded += 1;
        let coord = current.coord();

        if entry.index == goal_ix && !found {
            found = true;
            debug!("Goal {} finalized with cost {}", goal, entry.cost);
            if config.stop_at_goal {
                break;
            }
        }

        let tentative = entry.cost + 1;
        for n in maze.neighbors4(coord) {
            let n_ix = maze.index(n);
            let neighbor = &mut maze.cells[n_ix];
            if !neighbor.terrain.is_target() || neighbor.state == CellState::Finalized {
                continue;
            }
            if neighbor.g().map_or(true, |g| tentative < g) {
                let f = tentative + heuristic(&n);
                neighbor.parent = Some(entry.index);
                neighbor.scores = Some(Scores { g: tentative, f });
                neighbor.state = CellState::Frontier;
                frontier.push(n_ix, n, tentative, f);
                stats.pushed += 1;
                stats.peak_frontier = stats.peak_frontier.max(frontier.len());
            }
        }
    }
    debug!("{:?}", stats);

    if !found {
        info!("Frontier exhausted: no path from {} to {}", start, goal);
        return (SearchOutcome::NoPath, stats);
    }
    let path = reconstruct_path(maze, goal_ix);
    for coord in path.interior() {
        maze.mark_path(coord);
    }
    info!("Found path from {} to {} with cost {}", start, goal, path.cost());
    (SearchOutcome::Found(path), stats)
}

/// Follows predecessor links from the goal back to the start and returns the route in
/// start-to-end order.
fn reconstruct_path(maze: &Maze, goal_ix: usize) -> Path {
    let cells = maze.cells();
    // Predecessor links form a tree rooted at the start, so the walk ends within one
    // visit per cell.
    let mut backtrack: Vec<Coord> = std::iter::successors(Some(goal_ix), |&ix| cells[ix].parent)
        .take(cells.len())
        .map(|ix| cells[ix].coord())
        .collect();
    backtrack.reverse();
    debug_assert_eq!(backtrack.first(), Some(&maze.start()));
    backtrack.into_iter().collect()
}
