use core::fmt;

use log::{info, warn};
use petgraph::unionfind::UnionFind;
use smallvec::SmallVec;

use crate::{Cost, EMPTY_GLYPH, END_GLYPH, N_NEIGHBORS, PATH_GLYPH, START_GLYPH, WALL_GLYPH};

/// Position of a cell, counted from the top-left corner of the maze.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    pub row: u32,
    pub col: u32,
}

impl Coord {
    pub const fn new(row: u32, col: u32) -> Coord {
        Coord { row, col }
    }
    pub fn manhattan_distance(&self, other: &Coord) -> Cost {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }
    /// True if `other` is exactly one cardinal move away.
    pub fn is_adjacent(&self, other: &Coord) -> bool {
        self.manhattan_distance(other) == 1
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// The A* heuristic. Admissible and consistent on a 4-connected grid with unit move cost.
pub fn manhattan_distance(a: &Coord, b: &Coord) -> Cost {
    a.manhattan_distance(b)
}

/// What occupies a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Terrain {
    Empty,
    /// A wall, remembering the glyph it was read from.
    Blocked(char),
    Start,
    End,
    /// Open cell flagged as part of the last found path.
    Path,
}

impl Terrain {
    /// Everything but walls. Used for connected components.
    pub fn is_open(&self) -> bool {
        !matches!(self, Terrain::Blocked(_))
    }
    /// Whether a move may end on this cell. The start is only ever left, never entered.
    pub fn is_target(&self) -> bool {
        matches!(self, Terrain::Empty | Terrain::End)
    }
    pub fn glyph(&self, path_glyph: char) -> char {
        match self {
            Terrain::Empty => EMPTY_GLYPH,
            Terrain::Blocked(c) => *c,
            Terrain::Start => START_GLYPH,
            Terrain::End => END_GLYPH,
            Terrain::Path => path_glyph,
        }
    }
}

/// Cost-so-far `g` and estimated total cost `f = g + h` of a reached cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Scores {
    pub g: Cost,
    pub f: Cost,
}

/// Per-search lifecycle of a cell. Only ever moves forward during one search.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CellState {
    #[default]
    Unvisited,
    Frontier,
    Finalized,
}

/// One position of the [Maze] together with its search metadata.
#[derive(Clone, Debug)]
pub struct Cell {
    coord: Coord,
    pub(crate) terrain: Terrain,
    /// [None] until the cell is first reached, which stands for an infinite cost.
    pub(crate) scores: Option<Scores>,
    pub(crate) state: CellState,
    /// Arena index of the predecessor on the best known route.
    pub(crate) parent: Option<usize>,
}

impl Cell {
    pub(crate) fn new(coord: Coord, terrain: Terrain) -> Cell {
        Cell {
            coord,
            terrain,
            scores: None,
            state: CellState::Unvisited,
            parent: None,
        }
    }
    pub fn coord(&self) -> Coord {
        self.coord
    }
    pub fn terrain(&self) -> Terrain {
        self.terrain
    }
    pub fn scores(&self) -> Option<Scores> {
        self.scores
    }
    pub fn g(&self) -> Option<Cost> {
        self.scores.map(|s| s.g)
    }
    pub fn f(&self) -> Option<Cost> {
        self.scores.map(|s| s.f)
    }
    pub fn state(&self) -> CellState {
        self.state
    }
    pub fn parent(&self) -> Option<usize> {
        self.parent
    }
    pub fn is_finalized(&self) -> bool {
        self.state == CellState::Finalized
    }
    fn reset_search(&mut self) {
        self.scores = None;
        self.state = CellState::Unvisited;
        self.parent = None;
    }
}

/// Rectangular maze stored as a row-major arena of [Cell]s with exactly one start and one
/// end. Connected components of open cells are tracked with a [UnionFind] so that an
/// unreachable end can be detected without flood-filling the maze.
#[derive(Clone, Debug)]
pub struct Maze {
    width: usize,
    height: usize,
    pub(crate) cells: Vec<Cell>,
    start: Coord,
    end: Coord,
    pub components: UnionFind<usize>,
    pub components_dirty: bool,
}

impl Maze {
    /// Creates a maze of open floor with the given start and end.
    ///
    /// # Panics
    /// If the maze is empty, an endpoint lies outside it, or start and end coincide.
    pub fn new(width: usize, height: usize, start: Coord, end: Coord) -> Maze {
        assert!(width > 0 && height > 0, "maze must have at least one cell");
        let in_bounds = |c: &Coord| (c.row as usize) < height && (c.col as usize) < width;
        assert!(
            in_bounds(&start) && in_bounds(&end),
            "start {} or end {} outside {}x{} maze",
            start,
            end,
            width,
            height
        );
        assert_ne!(start, end, "start and end must differ");
        let cells = (0..height * width)
            .map(|ix| {
                let coord = Coord::new((ix / width) as u32, (ix % width) as u32);
                let terrain = if coord == start {
                    Terrain::Start
                } else if coord == end {
                    Terrain::End
                } else {
                    Terrain::Empty
                };
                Cell::new(coord, terrain)
            })
            .collect();
        Maze::from_cells(width, height, cells, start, end)
    }

    /// Assembles a maze from already validated row-major cells.
    pub(crate) fn from_cells(
        width: usize,
        height: usize,
        cells: Vec<Cell>,
        start: Coord,
        end: Coord,
    ) -> Maze {
        debug_assert_eq!(cells.len(), width * height);
        let mut maze = Maze {
            width,
            height,
            components: UnionFind::new(cells.len()),
            cells,
            start,
            end,
            components_dirty: false,
        };
        maze.generate_components();
        maze
    }

    pub fn width(&self) -> usize {
        self.width
    }
    pub fn height(&self) -> usize {
        self.height
    }
    pub fn start(&self) -> Coord {
        self.start
    }
    pub fn end(&self) -> Coord {
        self.end
    }
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn in_bounds(&self, coord: Coord) -> bool {
        (coord.row as usize) < self.height && (coord.col as usize) < self.width
    }
    /// Arena index of an in-bounds coordinate.
    ///
    /// # Panics
    ///
    /// Panics if `coord` lies outside the maze. Use [Maze::index_checked] otherwise.
    pub fn index(&self, coord: Coord) -> usize {
        assert!(
            self.in_bounds(coord),
            "{} is outside the {}x{} maze",
            coord,
            self.width,
            self.height
        );
        self.flat_index(coord)
    }
    pub fn index_checked(&self, coord: Coord) -> Option<usize> {
        self.in_bounds(coord).then(|| self.flat_index(coord))
    }
    fn flat_index(&self, coord: Coord) -> usize {
        coord.row as usize * self.width + coord.col as usize
    }
    pub fn coord(&self, index: usize) -> Coord {
        self.cells[index].coord
    }
    pub fn cell(&self, coord: Coord) -> Option<&Cell> {
        self.index_checked(coord).map(|ix| &self.cells[ix])
    }
    pub fn terrain(&self, coord: Coord) -> Option<Terrain> {
        self.cell(coord).map(|c| c.terrain)
    }

    /// The cells directly above, below, left and right of `coord` that lie inside the maze.
    pub fn neighbors4(&self, coord: Coord) -> SmallVec<[Coord; N_NEIGHBORS]> {
        let Coord { row, col } = coord;
        let mut neighbors = SmallVec::new();
        if row > 0 {
            neighbors.push(Coord::new(row - 1, col));
        }
        if (row as usize) + 1 < self.height {
            neighbors.push(Coord::new(row + 1, col));
        }
        if col > 0 {
            neighbors.push(Coord::new(row, col - 1));
        }
        if (col as usize) + 1 < self.width {
            neighbors.push(Coord::new(row, col + 1));
        }
        neighbors
    }

    fn is_open(&self, coord: Coord) -> bool {
        self.cell(coord).is_some_and(|c| c.terrain.is_open())
    }

    /// Places or removes a wall. Opening a cell joins the components of its neighbours;
    /// closing one flags the components as dirty since it may split a component.
    /// The start and end cannot be walled in.
    pub fn set_blocked(&mut self, coord: Coord, blocked: bool) {
        let Some(ix) = self.index_checked(coord) else {
            warn!("Ignoring wall update outside the maze at {}", coord);
            return;
        };
        match self.cells[ix].terrain {
            Terrain::Start | Terrain::End => {
                warn!("Refusing to change the terrain of endpoint {}", coord);
            }
            Terrain::Blocked(_) if !blocked => {
                self.cells[ix].terrain = Terrain::Empty;
                for n in self.neighbors4(coord) {
                    if self.is_open(n) {
                        let n_ix = self.index(n);
                        self.components.union(ix, n_ix);
                    }
                }
            }
            Terrain::Empty | Terrain::Path if blocked => {
                self.cells[ix].terrain = Terrain::Blocked(WALL_GLYPH);
                self.components_dirty = true;
            }
            _ => {}
        }
    }

    /// Retrieves the component id a given [Coord] belongs to, if it lies inside the maze.
    pub fn get_component(&self, coord: Coord) -> Option<usize> {
        self.index_checked(coord).map(|ix| self.components.find(ix))
    }

    /// Checks if both cells are inside the maze and on the same component. Dirty components
    /// can only over-report connectivity, never hide a real connection.
    pub fn reachable(&self, a: &Coord, b: &Coord) -> bool {
        match (self.index_checked(*a), self.index_checked(*b)) {
            (Some(a_ix), Some(b_ix)) => self.components.equiv(a_ix, b_ix),
            _ => false,
        }
    }

    pub fn unreachable(&self, a: &Coord, b: &Coord) -> bool {
        !self.reachable(a, b)
    }

    /// Regenerates the components if they are marked as dirty.
    pub fn update(&mut self) {
        if self.components_dirty {
            info!("Components are dirty: regenerating components");
            self.generate_components();
        }
    }

    /// Generates a new [UnionFind] structure and links up open neighbours to the same
    /// components.
    pub fn generate_components(&mut self) {
        self.components = UnionFind::new(self.cells.len());
        self.components_dirty = false;
        for ix in 0..self.cells.len() {
            if !self.cells[ix].terrain.is_open() {
                continue;
            }
            let Coord { row, col } = self.cells[ix].coord;
            // Links to the cell below and to the right cover every edge once.
            for n in [Coord::new(row + 1, col), Coord::new(row, col + 1)] {
                if self.is_open(n) {
                    let n_ix = self.index(n);
                    self.components.union(ix, n_ix);
                }
            }
        }
    }

    /// Clears costs, states and predecessor links left by a previous search.
    pub fn reset_search(&mut self) {
        self.cells.iter_mut().for_each(Cell::reset_search);
    }

    /// Turns every cell flagged as [Terrain::Path] back into open floor.
    pub fn clear_path(&mut self) {
        for cell in self.cells.iter_mut() {
            if cell.terrain == Terrain::Path {
                cell.terrain = Terrain::Empty;
            }
        }
    }

    /// Coordinates of the cells flagged as [Terrain::Path], in row-major order.
    pub fn path_cells(&self) -> Vec<Coord> {
        self.cells
            .iter()
            .filter(|c| c.terrain == Terrain::Path)
            .map(|c| c.coord)
            .collect()
    }

    pub(crate) fn mark_path(&mut self, coord: Coord) {
        let ix = self.index(coord);
        debug_assert_eq!(self.cells[ix].terrain, Terrain::Empty);
        self.cells[ix].terrain = Terrain::Path;
    }

    /// The maze as text, one line per row, drawing path cells with `path_glyph`.
    pub fn render(&self, path_glyph: char) -> String {
        let mut out = String::with_capacity((self.width + 1) * self.height);
        for row in self.cells.chunks(self.width) {
            out.extend(row.iter().map(|c| c.terrain.glyph(path_glyph)));
            out.push('\n');
        }
        out
    }
}

impl fmt::Display for Maze {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.render(PATH_GLYPH))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Tests whether cells are correctly mapped to different connected components
    #[test]
    fn test_component_generation() {
        // Corresponds to the following 2x3 maze:
        // |SX |
        // | XE|
        let mut maze = Maze::new(3, 2, Coord::new(0, 0), Coord::new(1, 2));
        maze.set_blocked(Coord::new(0, 1), true);
        maze.set_blocked(Coord::new(1, 1), true);
        maze.generate_components();
        let ix = |r, c| maze.index(Coord::new(r, c));
        assert!(maze.components.equiv(ix(0, 0), ix(1, 0)));
        assert!(!maze.components.equiv(ix(0, 0), ix(0, 2)));
        assert!(maze.components.equiv(ix(0, 2), ix(1, 2)));
        assert!(maze.unreachable(&maze.start(), &maze.end()));
    }

    /// Asserts that the two corners are connected around a central wall.
    #[test]
    fn reachable_around_wall() {
        // |S  |
        // | X |
        // |  E|
        let mut maze = Maze::new(3, 3, Coord::new(0, 0), Coord::new(2, 2));
        maze.set_blocked(Coord::new(1, 1), true);
        maze.update();
        assert!(maze.reachable(&maze.start(), &maze.end()));
    }

    #[test]
    fn diagonal_is_not_connected() {
        // |SX|
        // |XE|
        let mut maze = Maze::new(2, 2, Coord::new(0, 0), Coord::new(1, 1));
        maze.set_blocked(Coord::new(0, 1), true);
        maze.set_blocked(Coord::new(1, 0), true);
        assert!(maze.components_dirty);
        maze.update();
        assert!(!maze.components_dirty);
        assert!(maze.unreachable(&maze.start(), &maze.end()));
    }

    #[test]
    fn opening_a_wall_joins_components() {
        let mut maze = Maze::new(3, 1, Coord::new(0, 0), Coord::new(0, 2));
        maze.set_blocked(Coord::new(0, 1), true);
        maze.update();
        assert!(maze.unreachable(&maze.start(), &maze.end()));
        maze.set_blocked(Coord::new(0, 1), false);
        assert!(!maze.components_dirty);
        assert!(maze.reachable(&maze.start(), &maze.end()));
    }

    #[test]
    fn endpoints_cannot_be_blocked() {
        let mut maze = Maze::new(2, 1, Coord::new(0, 0), Coord::new(0, 1));
        maze.set_blocked(Coord::new(0, 0), true);
        maze.set_blocked(Coord::new(0, 1), true);
        maze.set_blocked(Coord::new(5, 5), true);
        assert_eq!(maze.terrain(Coord::new(0, 0)), Some(Terrain::Start));
        assert_eq!(maze.terrain(Coord::new(0, 1)), Some(Terrain::End));
        assert!(!maze.components_dirty);
    }

    #[test]
    fn neighbors_stay_in_bounds() {
        let maze = Maze::new(3, 3, Coord::new(0, 0), Coord::new(2, 2));
        let corner = maze.neighbors4(Coord::new(0, 0));
        assert_eq!(corner.as_slice(), &[Coord::new(1, 0), Coord::new(0, 1)]);
        let edge = maze.neighbors4(Coord::new(2, 1));
        assert_eq!(
            edge.as_slice(),
            &[Coord::new(1, 1), Coord::new(2, 0), Coord::new(2, 2)]
        );
        assert_eq!(maze.neighbors4(Coord::new(1, 1)).len(), 4);
    }

    #[test]
    fn manhattan_heuristic() {
        let a = Coord::new(0, 4);
        let b = Coord::new(3, 1);
        assert_eq!(manhattan_distance(&a, &b), 6);
        assert_eq!(manhattan_distance(&b, &a), 6);
        assert_eq!(manhattan_distance(&a, &a), 0);
        assert!(a.is_adjacent(&Coord::new(1, 4)));
        assert!(!a.is_adjacent(&Coord::new(1, 3)));
    }

    #[test]
    fn index_round_trips_through_coord() {
        let maze = Maze::new(4, 3, Coord::new(0, 0), Coord::new(2, 3));
        let c = Coord::new(2, 1);
        assert_eq!(maze.index(c), 9);
        assert_eq!(maze.coord(9), c);
        assert_eq!(maze.index_checked(Coord::new(3, 0)), None);
        assert!(maze.cell(Coord::new(0, 4)).is_none());
    }

    #[test]
    fn past_the_last_column_is_not_the_next_row() {
        let mut maze = Maze::new(3, 3, Coord::new(0, 0), Coord::new(2, 2));
        maze.set_blocked(Coord::new(0, 1), true);
        maze.set_blocked(Coord::new(1, 1), true);
        maze.set_blocked(Coord::new(2, 1), true);
        maze.update();
        let outside = Coord::new(0, 3);
        assert!(!maze.in_bounds(outside));
        assert_eq!(maze.index_checked(outside), None);
        assert_eq!(maze.get_component(outside), None);
        assert!(maze.get_component(Coord::new(1, 0)).is_some());
        assert_ne!(
            maze.get_component(Coord::new(1, 0)),
            maze.get_component(Coord::new(1, 2))
        );
    }

    #[test]
    #[should_panic(expected = "outside the 3x3 maze")]
    fn index_panics_outside_the_maze() {
        let maze = Maze::new(3, 3, Coord::new(0, 0), Coord::new(2, 2));
        maze.index(Coord::new(0, 3));
    }

    #[test]
    fn renders_terrain() {
        let mut maze = Maze::new(3, 2, Coord::new(0, 0), Coord::new(1, 2));
        maze.set_blocked(Coord::new(1, 0), true);
        maze.mark_path(Coord::new(0, 1));
        assert_eq!(maze.to_string(), "S# \nX E\n");
        assert_eq!(maze.render('.'), "S. \nX E\n");
        assert_eq!(maze.path_cells(), vec![Coord::new(0, 1)]);
        maze.clear_path();
        assert!(maze.path_cells().is_empty());
    }
}
