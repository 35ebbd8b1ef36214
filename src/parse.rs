//! Reading mazes from text.
//!
//! Every line is one row and every character one cell: [EMPTY_GLYPH] is open floor,
//! [START_GLYPH] and [END_GLYPH] mark the single start and end, anything else is a wall.
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::str::FromStr;

use log::info;
use thiserror::Error;

use crate::maze::{Cell, Coord, Maze, Terrain};
use crate::{EMPTY_GLYPH, END_GLYPH, START_GLYPH};

#[derive(Debug, Error)]
pub enum MazeError {
    #[error("invalid maze: no cells")]
    Empty,
    #[error("malformed maze: row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("malformed maze: no start")]
    MissingStart,
    #[error("malformed maze: no end")]
    MissingEnd,
    #[error("malformed maze: second start at {second}, first at {first}")]
    DuplicateStart { first: Coord, second: Coord },
    #[error("malformed maze: second end at {second}, first at {first}")]
    DuplicateEnd { first: Coord, second: Coord },
    #[error("could not read maze: {0}")]
    Io(#[from] io::Error),
}

impl FromStr for Maze {
    type Err = MazeError;

    fn from_str(s: &str) -> Result<Maze, MazeError> {
        parse_rows(s.lines())
    }
}

impl Maze {
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Maze, MazeError> {
        let lines = reader.lines().collect::<Result<Vec<String>, _>>()?;
        parse_rows(lines.iter().map(String::as_str))
    }

    pub fn load<P: AsRef<std::path::Path>>(path: P) -> Result<Maze, MazeError> {
        let file = File::open(path.as_ref())?;
        info!("Loading maze from {}", path.as_ref().display());
        Maze::from_reader(BufReader::new(file))
    }
}

fn parse_rows<'a, I>(rows: I) -> Result<Maze, MazeError>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut width = None;
    let mut height = 0;
    let mut cells = Vec::new();
    let mut start: Option<Coord> = None;
    let mut end: Option<Coord> = None;

    for (row, line) in rows.into_iter().enumerate() {
        let found = line.chars().count();
        let expected = *width.get_or_insert(found);
        if expected == 0 {
            return Err(MazeError::Empty);
        }
        if found != expected {
            return Err(MazeError::RaggedRow {
                row,
                expected,
                found,
            });
        }
        for (col, glyph) in line.chars().enumerate() {
            let coord = Coord::new(row as u32, col as u32);
            let terrain = match glyph {
                EMPTY_GLYPH => Terrain::Empty,
                START_GLYPH => {
                    if let Some(first) = start.replace(coord) {
                        return Err(MazeError::DuplicateStart {
                            first,
                            second: coord,
                        });
                    }
                    Terrain::Start
                }
                END_GLYPH => {
                    if let Some(first) = end.replace(coord) {
                        return Err(MazeError::DuplicateEnd {
                            first,
                            second: coord,
                        });
                    }
                    Terrain::End
                }
                wall => Terrain::Blocked(wall),
            };
            cells.push(Cell::new(coord, terrain));
        }
        height += 1;
    }

    let width = width.ok_or(MazeError::Empty)?;
    let start = start.ok_or(MazeError::MissingStart)?;
    let end = end.ok_or(MazeError::MissingEnd)?;
    info!(
        "Parsed {}x{} maze with start {} and end {}",
        width, height, start, end
    );
    Ok(Maze::from_cells(width, height, cells, start, end))
}
