//! The puzzle grid: a fixed-size matrix of [`Cell`]s plus the enumeration of
//! every directional line the scanner walks.
//!
//! Coordinates are `(x, y)` with `x` as the column and `y` as the row, both
//! zero-based from the top-left corner. Dimensions are fixed at construction;
//! every in-range coordinate maps to exactly one cell.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Placeholder character for a cell no word has touched yet.
pub const EMPTY_CELL: char = '.';

/// One of the four axis families a word can lie on. Each family is readable
/// in two opposite directions, giving the eight scan directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// North-south (down a column).
    NS,
    /// East-west (along a row).
    EW,
    /// Northeast-southwest (up-right / down-left diagonal).
    NESW,
    /// Northwest-southeast (down-right / up-left diagonal).
    NWSE,
}

impl Direction {
    /// All four families, in a fixed order used for candidate enumeration.
    pub const ALL: [Direction; 4] = [Direction::NS, Direction::EW, Direction::NESW, Direction::NWSE];

    /// Unit step `(dx, dy)` for reading this family in its forward direction.
    #[must_use]
    pub fn delta(self) -> (isize, isize) {
        match self {
            Direction::NS => (0, 1),
            Direction::EW => (1, 0),
            Direction::NESW => (1, -1),
            Direction::NWSE => (1, 1),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Direction::NS => "NS",
            Direction::EW => "EW",
            Direction::NESW => "NESW",
            Direction::NWSE => "NWSE",
        };
        write!(f, "{s}")
    }
}

/// Fixed-size record of which axis families pass an accepted or answer word
/// through a cell. The direction domain is closed, so this is a plain struct
/// of four booleans rather than a dynamic set.
///
/// Field names are uppercase in the serialized form; this is part of the
/// persisted cell contract.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectionFlags {
    #[serde(rename = "NS")]
    pub ns: bool,
    #[serde(rename = "EW")]
    pub ew: bool,
    #[serde(rename = "NESW")]
    pub nesw: bool,
    #[serde(rename = "NWSE")]
    pub nwse: bool,
}

impl DirectionFlags {
    /// Set the flag for one family.
    pub fn set(&mut self, direction: Direction) {
        match direction {
            Direction::NS => self.ns = true,
            Direction::EW => self.ew = true,
            Direction::NESW => self.nesw = true,
            Direction::NWSE => self.nwse = true,
        }
    }

    /// Whether the flag for `direction` is set.
    #[must_use]
    pub fn contains(&self, direction: Direction) -> bool {
        match direction {
            Direction::NS => self.ns,
            Direction::EW => self.ew,
            Direction::NESW => self.nesw,
            Direction::NWSE => self.nwse,
        }
    }
}

/// A single grid cell.
///
/// Serializes to `{loc_x, loc_y, value, is_answer, is_profane, direction}` —
/// this shape is a persisted contract and must not change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    /// Column of the cell, zero-based from the left.
    pub loc_x: usize,
    /// Row of the cell, zero-based from the top.
    pub loc_y: usize,
    /// The character the cell holds ([`EMPTY_CELL`] until something writes it).
    pub value: char,
    /// Whether the cell is part of an intentionally placed answer word.
    pub is_answer: bool,
    /// Whether the cell participates in a rejected incidental word.
    pub is_profane: bool,
    /// Which axis families pass an accepted or answer word through this cell.
    pub direction: DirectionFlags,
}

impl Cell {
    fn new(loc_x: usize, loc_y: usize) -> Self {
        Cell {
            loc_x,
            loc_y,
            value: EMPTY_CELL,
            is_answer: false,
            is_profane: false,
            direction: DirectionFlags::default(),
        }
    }
}

/// Errors from direct cell access.
///
/// `OutOfBounds` is a programming-error class: correct callers never produce
/// it, and internal code treats it as fatal. `Conflict` is recovered locally
/// by the placer (it just tries the next candidate) and never surfaces.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    #[error("coordinates ({x}, {y}) are outside the {rows}x{columns} grid")]
    OutOfBounds { x: usize, y: usize, rows: usize, columns: usize },

    #[error("cell ({x}, {y}) already holds '{existing}', cannot write '{attempted}'")]
    Conflict { x: usize, y: usize, existing: char, attempted: char },
}

/// One directional line through the grid: an ordered run of coordinates the
/// scanner reads forward and backward.
#[derive(Debug, Clone)]
pub struct Line {
    /// Stable label (`row3`, `col0`, `nwse2-0`, `nesw0-4`, ...) used as the
    /// key in the profanity report.
    pub label: String,
    /// The axis family this line belongs to.
    pub family: Direction,
    /// Coordinates in forward reading order.
    pub coords: Vec<(usize, usize)>,
}

/// The rows x columns character matrix. Row-major: `cells[y][x]`.
#[derive(Debug, Clone)]
pub struct Grid {
    rows: usize,
    columns: usize,
    cells: Vec<Vec<Cell>>,
}

impl Grid {
    /// Create an all-empty grid of the given dimensions.
    #[must_use]
    pub fn new(rows: usize, columns: usize) -> Self {
        let cells = (0..rows)
            .map(|y| (0..columns).map(|x| Cell::new(x, y)).collect())
            .collect();
        Grid { rows, columns, cells }
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub fn columns(&self) -> usize {
        self.columns
    }

    #[must_use]
    pub fn in_bounds(&self, x: usize, y: usize) -> bool {
        x < self.columns && y < self.rows
    }

    /// Current character at `(x, y)`, [`EMPTY_CELL`] if nothing has been
    /// written there yet.
    ///
    /// # Errors
    /// Returns [`GridError::OutOfBounds`] for invalid coordinates.
    pub fn get(&self, x: usize, y: usize) -> Result<char, GridError> {
        self.cell(x, y).map(|c| c.value)
    }

    /// Write `value` at `(x, y)`.
    ///
    /// Writing the same character into an occupied cell is a no-op; writing a
    /// different one fails with [`GridError::Conflict`].
    ///
    /// # Errors
    /// [`GridError::OutOfBounds`] or [`GridError::Conflict`].
    pub fn set(&mut self, x: usize, y: usize, value: char) -> Result<(), GridError> {
        let (rows, columns) = (self.rows, self.columns);
        let cell = self
            .cell_mut(x, y)
            .ok_or(GridError::OutOfBounds { x, y, rows, columns })?;
        if cell.value != EMPTY_CELL && cell.value != value {
            return Err(GridError::Conflict { x, y, existing: cell.value, attempted: value });
        }
        cell.value = value;
        Ok(())
    }

    /// Borrow the cell at `(x, y)`.
    ///
    /// # Errors
    /// Returns [`GridError::OutOfBounds`] for invalid coordinates.
    pub fn cell(&self, x: usize, y: usize) -> Result<&Cell, GridError> {
        if self.in_bounds(x, y) {
            Ok(&self.cells[y][x])
        } else {
            Err(GridError::OutOfBounds { x, y, rows: self.rows, columns: self.columns })
        }
    }

    fn cell_mut(&mut self, x: usize, y: usize) -> Option<&mut Cell> {
        if self.in_bounds(x, y) {
            Some(&mut self.cells[y][x])
        } else {
            None
        }
    }

    /// Write an answer character and record the axis family passing through.
    ///
    /// # Panics
    /// Panics on out-of-range coordinates; callers validate placements first,
    /// so this is a programming error.
    pub(crate) fn set_answer(&mut self, x: usize, y: usize, value: char, direction: Direction) {
        let cell = &mut self.cells[y][x];
        debug_assert!(
            cell.value == EMPTY_CELL || cell.value == value,
            "set_answer must not overwrite '{}' with '{}' at ({x}, {y})",
            cell.value,
            value
        );
        cell.value = value;
        cell.is_answer = true;
        cell.direction.set(direction);
    }

    /// Write a filler character into a non-answer cell.
    pub(crate) fn set_filler(&mut self, x: usize, y: usize, value: char) {
        let cell = &mut self.cells[y][x];
        debug_assert!(!cell.is_answer, "filler must not touch answer cell ({x}, {y})");
        cell.value = value;
    }

    pub(crate) fn mark_profane(&mut self, x: usize, y: usize) {
        self.cells[y][x].is_profane = true;
    }

    pub(crate) fn mark_direction(&mut self, x: usize, y: usize, direction: Direction) {
        self.cells[y][x].direction.set(direction);
    }

    /// Snapshot the cells at `coords`, in order. Paired with [`Grid::restore`]
    /// to undo a placement during backtracking.
    pub(crate) fn snapshot(&self, coords: &[(usize, usize)]) -> Vec<Cell> {
        coords.iter().map(|&(x, y)| self.cells[y][x].clone()).collect()
    }

    /// Restore cells previously captured with [`Grid::snapshot`].
    pub(crate) fn restore(&mut self, saved: Vec<Cell>) {
        for cell in saved {
            let (x, y) = (cell.loc_x, cell.loc_y);
            self.cells[y][x] = cell;
        }
    }

    /// Reset every non-answer cell to empty and clear all profanity flags,
    /// keeping the placed answer words intact. Used between filler retries.
    pub(crate) fn clear_filler(&mut self) {
        for row in &mut self.cells {
            for cell in row {
                if !cell.is_answer {
                    cell.value = EMPTY_CELL;
                }
                cell.is_profane = false;
            }
        }
    }

    /// Number of cells belonging to an answer word.
    #[must_use]
    pub fn answer_cell_count(&self) -> usize {
        self.cells
            .iter()
            .map(|row| row.iter().filter(|c| c.is_answer).count())
            .sum()
    }

    /// Number of cells still holding [`EMPTY_CELL`].
    #[must_use]
    pub fn empty_cell_count(&self) -> usize {
        self.cells
            .iter()
            .map(|row| row.iter().filter(|c| c.value == EMPTY_CELL).count())
            .sum()
    }

    /// The full cell matrix, cloned for promotion into the final artifact.
    #[must_use]
    pub fn to_cells(&self) -> Vec<Vec<Cell>> {
        self.cells.clone()
    }

    /// Enumerate every directional line: all rows, all columns, and both
    /// diagonal families, each as an ordered coordinate run. Order is
    /// deterministic; diagonal labels carry the line's starting coordinate.
    #[must_use]
    pub fn lines(&self) -> Vec<Line> {
        let mut lines = Vec::new();

        for y in 0..self.rows {
            lines.push(Line {
                label: format!("row{y}"),
                family: Direction::EW,
                coords: (0..self.columns).map(|x| (x, y)).collect(),
            });
        }
        for x in 0..self.columns {
            lines.push(Line {
                label: format!("col{x}"),
                family: Direction::NS,
                coords: (0..self.rows).map(|y| (x, y)).collect(),
            });
        }

        // NWSE diagonals start on the top row and the left column.
        let mut nwse_starts: Vec<(usize, usize)> = (0..self.columns).map(|x| (x, 0)).collect();
        nwse_starts.extend((1..self.rows).map(|y| (0, y)));
        for (sx, sy) in nwse_starts {
            lines.push(Line {
                label: format!("nwse{sx}-{sy}"),
                family: Direction::NWSE,
                coords: self.walk(sx, sy, Direction::NWSE),
            });
        }

        // NESW diagonals start on the left column and the bottom row.
        if self.rows > 0 {
            let mut nesw_starts: Vec<(usize, usize)> = (0..self.rows).map(|y| (0, y)).collect();
            nesw_starts.extend((1..self.columns).map(|x| (x, self.rows - 1)));
            for (sx, sy) in nesw_starts {
                lines.push(Line {
                    label: format!("nesw{sx}-{sy}"),
                    family: Direction::NESW,
                    coords: self.walk(sx, sy, Direction::NESW),
                });
            }
        }

        lines
    }

    /// Walk from a start cell along a family delta until the edge.
    fn walk(&self, sx: usize, sy: usize, direction: Direction) -> Vec<(usize, usize)> {
        let (dx, dy) = direction.delta();
        let mut coords = Vec::new();
        let (mut x, mut y) = (sx as isize, sy as isize);
        while x >= 0 && y >= 0 && (x as usize) < self.columns && (y as usize) < self.rows {
            coords.push((x as usize, y as usize));
            x += dx;
            y += dy;
        }
        coords
    }

    /// Plain-text rendering, one row per line.
    #[must_use]
    pub fn render(&self) -> String {
        self.cells
            .iter()
            .map(|row| {
                row.iter()
                    .map(|c| c.value.to_string())
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_grid_is_empty() {
        let grid = Grid::new(3, 4);
        assert_eq!(grid.rows(), 3);
        assert_eq!(grid.columns(), 4);
        assert_eq!(grid.empty_cell_count(), 12);
        assert_eq!(grid.answer_cell_count(), 0);
        assert_eq!(grid.get(3, 2).unwrap(), EMPTY_CELL);
    }

    #[test]
    fn test_get_out_of_bounds() {
        let grid = Grid::new(2, 2);
        assert_eq!(
            grid.get(2, 0),
            Err(GridError::OutOfBounds { x: 2, y: 0, rows: 2, columns: 2 })
        );
        assert_eq!(
            grid.get(0, 5),
            Err(GridError::OutOfBounds { x: 0, y: 5, rows: 2, columns: 2 })
        );
    }

    #[test]
    fn test_set_and_reread() {
        let mut grid = Grid::new(2, 2);
        grid.set(1, 0, 'A').unwrap();
        assert_eq!(grid.get(1, 0).unwrap(), 'A');
    }

    #[test]
    fn test_set_same_char_is_ok() {
        let mut grid = Grid::new(2, 2);
        grid.set(0, 0, 'A').unwrap();
        assert!(grid.set(0, 0, 'A').is_ok());
    }

    #[test]
    fn test_set_conflict() {
        let mut grid = Grid::new(2, 2);
        grid.set(0, 0, 'A').unwrap();
        assert_eq!(
            grid.set(0, 0, 'B'),
            Err(GridError::Conflict { x: 0, y: 0, existing: 'A', attempted: 'B' })
        );
    }

    #[test]
    fn test_snapshot_restore_roundtrip() {
        let mut grid = Grid::new(3, 3);
        grid.set_answer(1, 1, 'X', Direction::EW);
        let saved = grid.snapshot(&[(1, 1)]);
        grid.set_filler(0, 0, 'Q');
        grid.cells[1][1] = Cell::new(1, 1);
        grid.restore(saved);
        let cell = grid.cell(1, 1).unwrap();
        assert_eq!(cell.value, 'X');
        assert!(cell.is_answer);
        assert!(cell.direction.ew);
    }

    #[test]
    fn test_restore_rewrites_every_saved_cell() {
        let mut grid = Grid::new(3, 3);
        grid.set_answer(0, 1, 'D', Direction::NS);
        grid.set_answer(2, 0, 'O', Direction::EW);
        let saved = grid.snapshot(&[(0, 1), (2, 0), (1, 2)]);
        grid.cells[1][0] = Cell::new(0, 1);
        grid.cells[0][2] = Cell::new(2, 0);
        grid.set_filler(1, 2, 'Q');
        grid.restore(saved);
        assert_eq!(grid.get(0, 1).unwrap(), 'D');
        assert!(grid.cell(0, 1).unwrap().direction.ns);
        assert_eq!(grid.get(2, 0).unwrap(), 'O');
        assert_eq!(grid.get(1, 2).unwrap(), EMPTY_CELL);
    }

    #[test]
    fn test_clear_filler_keeps_answers() {
        let mut grid = Grid::new(2, 2);
        grid.set_answer(0, 0, 'C', Direction::NS);
        grid.set_filler(1, 0, 'Q');
        grid.mark_profane(1, 0);
        grid.clear_filler();
        assert_eq!(grid.get(0, 0).unwrap(), 'C');
        assert_eq!(grid.get(1, 0).unwrap(), EMPTY_CELL);
        assert!(!grid.cell(1, 0).unwrap().is_profane);
    }

    #[test]
    fn test_line_count() {
        // rows + columns + (rows + columns - 1) per diagonal family
        let grid = Grid::new(4, 5);
        let lines = grid.lines();
        assert_eq!(lines.len(), 4 + 5 + 8 + 8);
    }

    #[test]
    fn test_row_and_column_lines() {
        let grid = Grid::new(2, 3);
        let lines = grid.lines();
        let row0 = lines.iter().find(|l| l.label == "row0").unwrap();
        assert_eq!(row0.coords, vec![(0, 0), (1, 0), (2, 0)]);
        assert_eq!(row0.family, Direction::EW);
        let col2 = lines.iter().find(|l| l.label == "col2").unwrap();
        assert_eq!(col2.coords, vec![(2, 0), (2, 1)]);
        assert_eq!(col2.family, Direction::NS);
    }

    #[test]
    fn test_diagonal_lines() {
        let grid = Grid::new(3, 3);
        let lines = grid.lines();
        let main = lines.iter().find(|l| l.label == "nwse0-0").unwrap();
        assert_eq!(main.coords, vec![(0, 0), (1, 1), (2, 2)]);
        let anti = lines.iter().find(|l| l.label == "nesw0-2").unwrap();
        assert_eq!(anti.coords, vec![(0, 2), (1, 1), (2, 0)]);
    }

    #[test]
    fn test_every_cell_covered_by_each_family() {
        let grid = Grid::new(4, 6);
        for family in Direction::ALL {
            let covered: usize = grid
                .lines()
                .iter()
                .filter(|l| l.family == family)
                .map(|l| l.coords.len())
                .sum();
            assert_eq!(covered, 24, "family {family} must cover every cell exactly once");
        }
    }

    #[test]
    fn test_cell_serialization_shape() {
        let mut grid = Grid::new(1, 1);
        grid.set_answer(0, 0, 'A', Direction::NWSE);
        let json = serde_json::to_string(grid.cell(0, 0).unwrap()).unwrap();
        assert_eq!(
            json,
            r#"{"loc_x":0,"loc_y":0,"value":"A","is_answer":true,"is_profane":false,"direction":{"NS":false,"EW":false,"NESW":false,"NWSE":true}}"#
        );
    }
}
