//! Grid text parsing
//!
//! Grid files hold rows of whitespace-separated integers. A blank line ends a
//! block; files written by the step-by-step solver contain one block per step.
//!
//! ```text
//! 1 1 2
//! 1 2 2
//!
//! 1 1 2
//! 3 3 2
//! ```

use std::fmt;
use std::num::IntErrorKind;
use std::ops::Index;
use thiserror::Error;

/// Error type for malformed grid text.
///
/// Line numbers are 1-based positions in the source text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedGridError {
    /// A row has a different token count than the first row of its block
    #[error("line {line}: expected {expected} values, found {found}")]
    RaggedRow { line: usize, expected: usize, found: usize },
    /// A token could not be parsed as an integer
    #[error("line {line}: '{token}' is not an integer")]
    InvalidToken { line: usize, token: String },
    /// An integer token does not fit in `i64`
    #[error("line {line}: '{token}' is out of range for a 64-bit cell value")]
    OutOfRange { line: usize, token: String },
    /// A block (or the whole input) contains no rows
    #[error("grid has no rows")]
    Empty,
}

/// A rectangular matrix of integer cell labels.
///
/// Value 0 is background; any other value identifies a cell group.
/// Invariant: `rows >= 1`, `cols >= 1`, `cells.len() == rows * cols`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<i64>,
}

impl Grid {
    /// Build a grid from nested rows, enforcing rectangularity.
    ///
    /// # Examples
    ///
    /// ```
    /// use tetrogrid::grid::Grid;
    ///
    /// let grid = Grid::from_rows(vec![vec![1, 1], vec![2, 2]]).unwrap();
    /// assert_eq!(grid.rows(), 2);
    /// assert_eq!(grid[(1, 0)], 2);
    /// ```
    pub fn from_rows(rows: Vec<Vec<i64>>) -> Result<Self, MalformedGridError> {
        let mut builder = GridBuilder::default();
        for (i, row) in rows.into_iter().enumerate() {
            builder.push_row(row, i + 1)?;
        }
        builder.finish()
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Cell value, or `None` when out of bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<i64> {
        if row < self.rows && col < self.cols {
            Some(self.cells[row * self.cols + col])
        } else {
            None
        }
    }

    /// Iterate rows as slices.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[i64]> {
        self.cells.chunks(self.cols)
    }

    /// Sorted distinct cell values, background included.
    pub fn distinct_values(&self) -> Vec<i64> {
        let mut values = self.cells.clone();
        values.sort_unstable();
        values.dedup();
        values
    }
}

impl Index<(usize, usize)> for Grid {
    type Output = i64;

    /// # Panics
    ///
    /// Panics when `(row, col)` is outside the grid.
    fn index(&self, (row, col): (usize, usize)) -> &i64 {
        assert!(
            row < self.rows && col < self.cols,
            "cell ({}, {}) outside {}x{} grid",
            row,
            col,
            self.rows,
            self.cols
        );
        &self.cells[row * self.cols + col]
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.iter_rows().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for (j, value) in row.iter().enumerate() {
                if j > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{}", value)?;
            }
        }
        Ok(())
    }
}

/// Ordered, non-empty list of grids parsed from one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridSequence {
    grids: Vec<Grid>,
}

impl GridSequence {
    /// Number of grids (steps) in the sequence.
    pub fn len(&self) -> usize {
        self.grids.len()
    }

    /// Always false; a parsed sequence holds at least one grid.
    pub fn is_empty(&self) -> bool {
        self.grids.is_empty()
    }

    /// Grid at a step index.
    pub fn get(&self, step: usize) -> Option<&Grid> {
        self.grids.get(step)
    }

    /// Iterate grids in step order.
    pub fn iter(&self) -> std::slice::Iter<'_, Grid> {
        self.grids.iter()
    }
}

impl From<Grid> for GridSequence {
    fn from(grid: Grid) -> Self {
        Self { grids: vec![grid] }
    }
}

impl<'a> IntoIterator for &'a GridSequence {
    type Item = &'a Grid;
    type IntoIter = std::slice::Iter<'a, Grid>;

    fn into_iter(self) -> Self::IntoIter {
        self.grids.iter()
    }
}

impl fmt::Display for GridSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, grid) in self.grids.iter().enumerate() {
            if i > 0 {
                write!(f, "\n\n")?;
            }
            write!(f, "{}", grid)?;
        }
        Ok(())
    }
}

/// Accumulates rows of one block, checking width against the first row.
#[derive(Default)]
struct GridBuilder {
    cols: Option<usize>,
    rows: usize,
    cells: Vec<i64>,
}

impl GridBuilder {
    fn push_row(&mut self, row: Vec<i64>, line: usize) -> Result<(), MalformedGridError> {
        match self.cols {
            None if row.is_empty() => return Err(MalformedGridError::Empty),
            None => self.cols = Some(row.len()),
            Some(expected) if expected != row.len() => {
                return Err(MalformedGridError::RaggedRow { line, expected, found: row.len() });
            }
            Some(_) => {}
        }
        self.cells.extend(row);
        self.rows += 1;
        Ok(())
    }

    fn is_empty(&self) -> bool {
        self.rows == 0
    }

    fn finish(self) -> Result<Grid, MalformedGridError> {
        match self.cols {
            Some(cols) if self.rows > 0 => Ok(Grid { rows: self.rows, cols, cells: self.cells }),
            _ => Err(MalformedGridError::Empty),
        }
    }
}

/// Tokenize one non-blank line into integers.
fn parse_row(line: &str, line_number: usize) -> Result<Vec<i64>, MalformedGridError> {
    line.split_whitespace()
        .map(|token| {
            token.parse::<i64>().map_err(|e| {
                let token = token.to_string();
                match e.kind() {
                    IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => {
                        MalformedGridError::OutOfRange { line: line_number, token }
                    }
                    _ => MalformedGridError::InvalidToken { line: line_number, token },
                }
            })
        })
        .collect()
}

/// Parse all non-blank lines of `text` as a single grid.
///
/// Blank lines are ignored rather than treated as block separators.
///
/// # Examples
///
/// ```
/// use tetrogrid::grid::parse_grid;
///
/// let grid = parse_grid("1 1\n\n2 2\n").unwrap();
/// assert_eq!((grid.rows(), grid.cols()), (2, 2));
/// ```
pub fn parse_grid(text: &str) -> Result<Grid, MalformedGridError> {
    let mut builder = GridBuilder::default();
    for (i, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        builder.push_row(parse_row(line, i + 1)?, i + 1)?;
    }
    builder.finish()
}

/// Parse blank-line-delimited blocks of `text` as a sequence of grids.
///
/// Each block is parsed independently, so blocks may differ in size.
///
/// # Examples
///
/// ```
/// use tetrogrid::grid::parse_grid_sequence;
///
/// let seq = parse_grid_sequence("1 1\n2 2\n\n3 3\n4 4").unwrap();
/// assert_eq!(seq.len(), 2);
/// ```
pub fn parse_grid_sequence(text: &str) -> Result<GridSequence, MalformedGridError> {
    let mut grids = Vec::new();
    let mut builder = GridBuilder::default();

    for (i, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            if !builder.is_empty() {
                grids.push(std::mem::take(&mut builder).finish()?);
            }
            continue;
        }
        builder.push_row(parse_row(line, i + 1)?, i + 1)?;
    }
    if !builder.is_empty() {
        grids.push(builder.finish()?);
    }

    if grids.is_empty() {
        return Err(MalformedGridError::Empty);
    }
    Ok(GridSequence { grids })
}
