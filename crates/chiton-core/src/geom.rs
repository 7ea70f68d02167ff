//! Geometry primitives: [`Cell`] and [`Extent`].
//!
//! Coordinates are `(row, col)` with rows growing down and columns growing
//! right. Cells are never negative, so stepping off the top or left edge is
//! expressed with `Option` rather than a signed coordinate.

use std::fmt;

// ---------------------------------------------------------------------------
// Cell
// ---------------------------------------------------------------------------

/// A `(row, col)` position in a grid.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    /// Top-left corner (0, 0).
    pub const ORIGIN: Self = Self { row: 0, col: 0 };

    /// Create a new cell.
    #[inline]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// The cell one row up, if any.
    #[inline]
    pub fn up(self) -> Option<Self> {
        Some(Self::new(self.row.checked_sub(1)?, self.col))
    }

    /// The cell one column left, if any.
    #[inline]
    pub fn left(self) -> Option<Self> {
        Some(Self::new(self.row, self.col.checked_sub(1)?))
    }

    /// The cell one row down. Bounds are the caller's business.
    #[inline]
    pub const fn down(self) -> Self {
        Self::new(self.row + 1, self.col)
    }

    /// The cell one column right. Bounds are the caller's business.
    #[inline]
    pub const fn right(self) -> Self {
        Self::new(self.row, self.col + 1)
    }

    /// The four orthogonal neighbours in the order up, left, down, right.
    ///
    /// Neighbours above row 0 or left of column 0 are `None`; the lower and
    /// right neighbours are always returned and must be bounds-checked
    /// against an [`Extent`].
    #[inline]
    pub fn neighbors_4(self) -> [Option<Cell>; 4] {
        [self.up(), self.left(), Some(self.down()), Some(self.right())]
    }

    /// Whether `other` is exactly one orthogonal step away.
    #[inline]
    pub fn is_adjacent(self, other: Cell) -> bool {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col) == 1
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

// ---------------------------------------------------------------------------
// Extent
// ---------------------------------------------------------------------------

/// The size of a grid: `rows × cols` cells anchored at [`Cell::ORIGIN`].
///
/// Also converts between cells and row-major flat indices, which is how
/// every per-cell buffer in this workspace is laid out.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Extent {
    pub rows: usize,
    pub cols: usize,
}

impl Extent {
    /// Create a new extent.
    #[inline]
    pub const fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    /// Total number of cells.
    #[inline]
    pub const fn len(self) -> usize {
        self.rows * self.cols
    }

    /// Whether the extent holds no cell at all.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.rows == 0 || self.cols == 0
    }

    /// Whether `c` lies inside the extent.
    #[inline]
    pub const fn contains(self, c: Cell) -> bool {
        c.row < self.rows && c.col < self.cols
    }

    /// The bottom-right cell, or `None` for an empty extent.
    #[inline]
    pub fn last(self) -> Option<Cell> {
        if self.is_empty() {
            return None;
        }
        Some(Cell::new(self.rows - 1, self.cols - 1))
    }

    /// Row-major flat index of `c`. Returns `None` if out of bounds.
    #[inline]
    pub fn index(self, c: Cell) -> Option<usize> {
        if !self.contains(c) {
            return None;
        }
        Some(c.row * self.cols + c.col)
    }

    /// Cell at row-major flat index `idx`.
    ///
    /// `idx` must be below [`len`](Self::len).
    #[inline]
    pub fn cell(self, idx: usize) -> Cell {
        debug_assert!(idx < self.len());
        Cell::new(idx / self.cols, idx % self.cols)
    }

    /// Scale both dimensions by `factor`.
    ///
    /// Returns `None` if either dimension or the cell count overflows.
    #[inline]
    pub fn scale(self, factor: usize) -> Option<Self> {
        let scaled = Self::new(self.rows.checked_mul(factor)?, self.cols.checked_mul(factor)?);
        scaled.rows.checked_mul(scaled.cols)?;
        Some(scaled)
    }

    /// Iterate over every cell in row-major order.
    pub fn cells(self) -> impl Iterator<Item = Cell> {
        (0..self.rows).flat_map(move |row| (0..self.cols).map(move |col| Cell::new(row, col)))
    }
}

impl fmt::Display for Extent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}
