//! Per-cell edge classification
//!
//! A cell edge is *connected* when the neighbor across it holds the same
//! value. Connected edges are interior seams and are never drawn; every other
//! edge, including those on the grid border, is a boundary edge.

use crate::grid::Grid;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the four sides of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Top,
    Bottom,
    Left,
    Right,
}

impl Direction {
    /// All directions in classification order.
    pub const ALL: [Direction; 4] =
        [Direction::Top, Direction::Bottom, Direction::Left, Direction::Right];

    /// Lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            Direction::Top => "top",
            Direction::Bottom => "bottom",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }

    fn bit(self) -> u8 {
        match self {
            Direction::Top => 0b0001,
            Direction::Bottom => 0b0010,
            Direction::Left => 0b0100,
            Direction::Right => 0b1000,
        }
    }

    /// The in-bounds neighbor of `(row, col)` in this direction.
    pub(crate) fn neighbor(
        self,
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    ) -> Option<(usize, usize)> {
        match self {
            Direction::Top => row.checked_sub(1).map(|r| (r, col)),
            Direction::Bottom => (row + 1 < rows).then_some((row + 1, col)),
            Direction::Left => col.checked_sub(1).map(|c| (row, c)),
            Direction::Right => (col + 1 < cols).then_some((row, col + 1)),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A subset of the four cell directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct EdgeSet(u8);

impl EdgeSet {
    const MASK: u8 = 0b1111;

    /// The empty set.
    pub const fn empty() -> Self {
        Self(0)
    }

    /// All four directions.
    pub const fn all() -> Self {
        Self(Self::MASK)
    }

    pub fn insert(&mut self, dir: Direction) {
        self.0 |= dir.bit();
    }

    pub fn contains(self, dir: Direction) -> bool {
        self.0 & dir.bit() != 0
    }

    /// Directions not in this set.
    pub fn complement(self) -> Self {
        Self(!self.0 & Self::MASK)
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Iterate members in `Direction::ALL` order.
    pub fn iter(self) -> impl Iterator<Item = Direction> {
        Direction::ALL.into_iter().filter(move |d| self.contains(*d))
    }
}

impl FromIterator<Direction> for EdgeSet {
    fn from_iter<I: IntoIterator<Item = Direction>>(iter: I) -> Self {
        let mut set = EdgeSet::empty();
        for dir in iter {
            set.insert(dir);
        }
        set
    }
}

impl fmt::Display for EdgeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.iter().map(Direction::name).collect();
        write!(f, "{{{}}}", names.join(","))
    }
}

/// Classify which edges of cell `(row, col)` are connected.
///
/// A direction is connected when the neighbor exists and has exactly the same
/// value. Off-grid directions are never connected. The function does not skip
/// background cells; callers filter value 0 themselves.
///
/// # Panics
///
/// Panics when `(row, col)` is outside the grid.
///
/// # Examples
///
/// ```
/// use tetrogrid::edges::{classify_edges, Direction};
/// use tetrogrid::grid::parse_grid;
///
/// let grid = parse_grid("1 1\n2 2").unwrap();
/// let connected = classify_edges(&grid, 0, 0);
/// assert!(connected.contains(Direction::Right));
/// assert_eq!(connected.len(), 1);
/// ```
pub fn classify_edges(grid: &Grid, row: usize, col: usize) -> EdgeSet {
    let value = grid[(row, col)];
    Direction::ALL
        .into_iter()
        .filter(|dir| {
            dir.neighbor(row, col, grid.rows(), grid.cols())
                .is_some_and(|(r, c)| grid[(r, c)] == value)
        })
        .collect()
}

/// Edge classification of one foreground cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellEdges {
    pub row: usize,
    pub col: usize,
    pub value: i64,
    pub connected: EdgeSet,
}

impl CellEdges {
    /// Edges to draw.
    pub fn boundary(&self) -> EdgeSet {
        self.connected.complement()
    }
}

/// Classify every non-background cell in row-major order.
pub fn foreground_edges(grid: &Grid) -> impl Iterator<Item = CellEdges> + '_ {
    (0..grid.rows()).flat_map(move |row| {
        (0..grid.cols()).filter_map(move |col| {
            let value = grid[(row, col)];
            (value != 0).then(|| CellEdges {
                row,
                col,
                value,
                connected: classify_edges(grid, row, col),
            })
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::parse_grid;

    fn set(dirs: &[Direction]) -> EdgeSet {
        dirs.iter().copied().collect()
    }

    #[test]
    fn test_two_rows_of_pairs() {
        let grid = parse_grid("1 1\n2 2").unwrap();
        assert_eq!(classify_edges(&grid, 0, 0), set(&[Direction::Right]));
        assert_eq!(classify_edges(&grid, 0, 1), set(&[Direction::Left]));
        assert_eq!(classify_edges(&grid, 1, 0), set(&[Direction::Right]));
        assert_eq!(classify_edges(&grid, 1, 1), set(&[Direction::Left]));
    }

    #[test]
    fn test_uniform_grid_only_off_grid_edges_drawn() {
        let grid = parse_grid("5 5\n5 5").unwrap();
        let c00 = classify_edges(&grid, 0, 0);
        assert_eq!(c00, set(&[Direction::Right, Direction::Bottom]));
        assert_eq!(c00.complement(), set(&[Direction::Top, Direction::Left]));
        assert_eq!(classify_edges(&grid, 0, 1), set(&[Direction::Left, Direction::Bottom]));
        assert_eq!(classify_edges(&grid, 1, 0), set(&[Direction::Top, Direction::Right]));
        assert_eq!(classify_edges(&grid, 1, 1), set(&[Direction::Top, Direction::Left]));
    }

    #[test]
    fn test_background_neighbor_not_connected() {
        let grid = parse_grid("0 7\n7 7").unwrap();
        let c01 = classify_edges(&grid, 0, 1);
        assert!(!c01.contains(Direction::Left));
        assert!(c01.contains(Direction::Bottom));
        let c10 = classify_edges(&grid, 1, 0);
        assert!(!c10.contains(Direction::Top));
        assert!(c10.contains(Direction::Right));
    }

    #[test]
    fn test_background_cells_connect_to_background() {
        let grid = parse_grid("0 0\n1 0").unwrap();
        assert_eq!(classify_edges(&grid, 0, 0), set(&[Direction::Right]));
        assert_eq!(classify_edges(&grid, 0, 1), set(&[Direction::Left, Direction::Bottom]));
    }

    #[test]
    fn test_single_cell_has_no_connections() {
        let grid = parse_grid("9").unwrap();
        assert!(classify_edges(&grid, 0, 0).is_empty());
        assert_eq!(classify_edges(&grid, 0, 0).complement(), EdgeSet::all());
    }

    #[test]
    fn test_no_diagonal_adjacency() {
        let grid = parse_grid("1 0\n0 1").unwrap();
        assert!(classify_edges(&grid, 0, 0).is_empty());
        assert!(classify_edges(&grid, 1, 1).is_empty());
    }

    #[test]
    fn test_symmetry_and_border_rules() {
        let grid = parse_grid(
            "1 1 2 2 0\n\
             1 3 3 2 0\n\
             1 3 3 2 4\n\
             0 0 4 4 4",
        )
        .unwrap();
        for r in 0..grid.rows() {
            for c in 0..grid.cols() {
                let here = classify_edges(&grid, r, c);
                if c + 1 < grid.cols() {
                    let right = classify_edges(&grid, r, c + 1);
                    let equal = grid[(r, c)] == grid[(r, c + 1)];
                    assert_eq!(here.contains(Direction::Right), equal);
                    assert_eq!(right.contains(Direction::Left), equal);
                } else {
                    assert!(!here.contains(Direction::Right));
                }
                if r + 1 < grid.rows() {
                    let below = classify_edges(&grid, r + 1, c);
                    let equal = grid[(r, c)] == grid[(r + 1, c)];
                    assert_eq!(here.contains(Direction::Bottom), equal);
                    assert_eq!(below.contains(Direction::Top), equal);
                } else {
                    assert!(!here.contains(Direction::Bottom));
                }
                if r == 0 {
                    assert!(!here.contains(Direction::Top));
                }
                if c == 0 {
                    assert!(!here.contains(Direction::Left));
                }
                assert_eq!(here, classify_edges(&grid, r, c));
            }
        }
    }

    #[test]
    fn test_foreground_edges_skips_background() {
        let grid = parse_grid("0 2\n2 2").unwrap();
        let cells: Vec<CellEdges> = foreground_edges(&grid).collect();
        assert_eq!(cells.len(), 3);
        assert_eq!((cells[0].row, cells[0].col, cells[0].value), (0, 1, 2));
        assert_eq!(cells[0].boundary(), set(&[Direction::Top, Direction::Left, Direction::Right]));
        assert_eq!((cells[2].row, cells[2].col), (1, 1));
    }

    #[test]
    fn test_edge_set_display_and_iter_order() {
        let edges = set(&[Direction::Right, Direction::Top]);
        assert_eq!(edges.to_string(), "{top,right}");
        assert_eq!(edges.iter().collect::<Vec<_>>(), vec![Direction::Top, Direction::Right]);
        assert_eq!(EdgeSet::empty().to_string(), "{}");
        assert_eq!(EdgeSet::all().len(), 4);
    }
}
