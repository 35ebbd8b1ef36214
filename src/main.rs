use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use env_logger::Env;
use log::{debug, info};
use maze_astar::{
    AstarSolver, DijkstraSolver, GridSolver, Maze, MazeError, SearchConfig, SearchOutcome,
    TieBreak, PATH_GLYPH,
};

/// Finds the shortest route through a text maze and prints the maze with the route drawn in.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Maze file: ' ' is open floor, 'S' the start, 'E' the end, anything else a wall
    maze: PathBuf,
    /// Which of several equally promising cells to expand first
    #[arg(long, value_enum, default_value_t = TieBreakArg::Insertion)]
    tie_break: TieBreakArg,
    /// Search without heuristic
    #[arg(long)]
    dijkstra: bool,
    /// Keep expanding after the end is reached
    #[arg(long)]
    drain: bool,
    /// Skip the connected component check before searching
    #[arg(long)]
    no_precheck: bool,
    /// Give up after this many expansions
    #[arg(long)]
    max_expansions: Option<usize>,
    /// Character drawn on path cells
    #[arg(long, default_value_t = PATH_GLYPH)]
    path_char: char,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum TieBreakArg {
    Insertion,
    Lifo,
    LowestCost,
    HighestCost,
}

impl From<TieBreakArg> for TieBreak {
    fn from(arg: TieBreakArg) -> TieBreak {
        match arg {
            TieBreakArg::Insertion => TieBreak::Insertion,
            TieBreakArg::Lifo => TieBreak::Lifo,
            TieBreakArg::LowestCost => TieBreak::LowestCost,
            TieBreakArg::HighestCost => TieBreak::HighestCost,
        }
    }
}

fn exit_code(err: &MazeError) -> ExitCode {
    match err {
        MazeError::Io(_) => ExitCode::from(2),
        MazeError::Empty => ExitCode::from(3),
        _ => ExitCode::from(4),
    }
}

/// Usage errors exit with 1 so that 2 keeps meaning an unreadable maze file. Help and
/// version requests are not failures.
fn usage_exit_code(err: &clap::Error) -> u8 {
    if err.use_stderr() {
        1
    } else {
        0
    }
}

fn main() -> ExitCode {
    env_logger::init_from_env(Env::default().default_filter_or("warn"));
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            // Printing only fails if stdout or stderr is closed.
            let _ = err.print();
            return ExitCode::from(usage_exit_code(&err));
        }
    };
    debug!("{:?}", args);

    let mut maze = match Maze::load(&args.maze) {
        Ok(maze) => maze,
        Err(err) => {
            eprintln!("ERROR: {}: {}", args.maze.display(), err);
            return exit_code(&err);
        }
    };

    let config = SearchConfig {
        tie_break: args.tie_break.into(),
        stop_at_goal: !args.drain,
        component_precheck: !args.no_precheck,
        max_expansions: args.max_expansions,
    };
    let (outcome, stats) = if args.dijkstra {
        DijkstraSolver::with_config(config).solve_with_stats(&mut maze)
    } else {
        AstarSolver::with_config(config).solve_with_stats(&mut maze)
    };
    info!(
        "Expanded {} cells, pushed {} entries ({} stale)",
        stats.expanded, stats.pushed, stats.stale
    );

    print!("{}", maze.render(args.path_char));
    match outcome {
        SearchOutcome::Found(path) => {
            info!("Path cost {}: {}", path.cost(), path);
            ExitCode::SUCCESS
        }
        SearchOutcome::NoPath => {
            eprintln!("No path from {} to {}", maze.start(), maze.end());
            ExitCode::SUCCESS
        }
        SearchOutcome::Aborted { expanded } => {
            eprintln!("Search aborted after {} expansions", expanded);
            ExitCode::from(5)
        }
    }
}
