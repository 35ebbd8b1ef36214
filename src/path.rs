use core::fmt;

use fxhash::FxBuildHasher;
use indexmap::IndexSet;
use itertools::Itertools;

use crate::{Coord, Cost};

type FxIndexSet<K> = IndexSet<K, FxBuildHasher>;

/// A route through the maze, ordered from start to end and including both.
///
/// Backed by an insertion-ordered set so that membership tests are cheap and a coordinate
/// can never appear twice. [Path::from_coords] rejects sequences that revisit a cell;
/// collecting such a sequence panics.
#[derive(Clone, Debug, Default)]
pub struct Path {
    cells: FxIndexSet<Coord>,
}

impl Path {
    /// Builds a path from a coordinate sequence, or `None` if a coordinate repeats.
    pub fn from_coords<I: IntoIterator<Item = Coord>>(coords: I) -> Option<Path> {
        let mut cells = FxIndexSet::default();
        for coord in coords {
            if !cells.insert(coord) {
                return None;
            }
        }
        Some(Path { cells })
    }
    /// Number of cells, endpoints included.
    pub fn len(&self) -> usize {
        self.cells.len()
    }
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
    /// Number of moves needed to follow the path.
    pub fn cost(&self) -> Cost {
        self.len().saturating_sub(1) as Cost
    }
    pub fn start(&self) -> Option<Coord> {
        self.cells.first().copied()
    }
    pub fn end(&self) -> Option<Coord> {
        self.cells.last().copied()
    }
    pub fn contains(&self, coord: &Coord) -> bool {
        self.cells.contains(coord)
    }
    /// Cells from start to end. Reverse it to walk the predecessor chain from the end.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = Coord> + ExactSizeIterator + '_ {
        self.cells.iter().copied()
    }
    /// The cells strictly between start and end.
    pub fn interior(&self) -> impl Iterator<Item = Coord> + '_ {
        let n = self.len();
        self.iter().skip(1).take(n.saturating_sub(2))
    }
    /// True if every step moves to an orthogonally adjacent cell.
    pub fn is_connected(&self) -> bool {
        self.iter().tuple_windows().all(|(a, b)| a.is_adjacent(&b))
    }
    pub fn to_vec(&self) -> Vec<Coord> {
        self.iter().collect()
    }
}

impl PartialEq for Path {
    fn eq(&self, other: &Self) -> bool {
        self.iter().eq(other.iter())
    }
}

impl Eq for Path {}

/// # Panics
///
/// Panics if a coordinate appears twice.
impl FromIterator<Coord> for Path {
    fn from_iter<I: IntoIterator<Item = Coord>>(iter: I) -> Self {
        let mut cells = FxIndexSet::default();
        for coord in iter {
            assert!(cells.insert(coord), "path visits {} twice", coord);
        }
        Path { cells }
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.iter().format(" -> "))
    }
}
