use maze_astar::{AstarSolver, GridSolver, Maze};

// In this example a path is found through a maze with shape
// #######
// #S    #
// # ### #
// #   # #
// ### #E#
// #######
// where
// - # marks a wall
// - S marks the start
// - E marks the end
//
// Moves are restricted to the four cardinal directions.

fn main() {
    let text = "\
#######
#S    #
# ### #
#   # #
### #E#
#######";
    let mut maze: Maze = text.parse().unwrap();
    let solver = AstarSolver::new();
    match solver.get_path(&mut maze) {
        Some(path) => {
            println!("A path of cost {} has been found:", path.cost());
            for p in path.iter() {
                println!("{}", p);
            }
            println!("{}", maze.render('.'));
        }
        None => println!("No path found"),
    }
}
