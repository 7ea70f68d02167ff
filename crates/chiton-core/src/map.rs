//! The [`RiskMap`] type: an immutable grid of per-cell entry costs.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::geom::{Cell, Extent};
use crate::risk::Risk;

/// Replication factor used for the full cave.
pub const DEFAULT_TILE_FACTOR: usize = 5;

/// A rectangular grid of [`Risk`] values, stored row-major.
///
/// Built once from digit rows and never mutated afterwards, so a map can be
/// shared by reference between any number of searches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RiskMap {
    extent: Extent,
    risks: Vec<Risk>,
}

impl RiskMap {
    /// Build a map from rows of digits `1..=9`.
    ///
    /// Every row must have as many characters as the first one. Rows are
    /// taken as-is: trailing whitespace is treated as a bad character.
    pub fn from_lines<S: AsRef<str>>(lines: &[S]) -> Result<Self> {
        let Some(first) = lines.first() else {
            return Err(Error::malformed(1, "no rows"));
        };
        let cols = first.as_ref().chars().count();
        if cols == 0 {
            return Err(Error::malformed(1, "empty row"));
        }

        let mut risks = Vec::with_capacity(cols * lines.len());
        for (row, line) in lines.iter().enumerate() {
            let line = line.as_ref();
            let mut width = 0;
            for ch in line.chars() {
                let Some(r) = Risk::from_digit(ch) else {
                    return Err(Error::malformed(
                        row + 1,
                        format!("invalid character \u{201c}{ch}\u{201d} at column {width}"),
                    ));
                };
                risks.push(r);
                width += 1;
            }
            if width != cols {
                return Err(Error::malformed(
                    row + 1,
                    format!("row has {width} cells, expected {cols}"),
                ));
            }
        }

        Ok(Self {
            extent: Extent::new(lines.len(), cols),
            risks,
        })
    }

    /// Parse a block of text, one row per line.
    ///
    /// Leading/trailing whitespace is trimmed from the whole string but not
    /// from individual lines.
    pub fn parse(s: &str) -> Result<Self> {
        let lines: Vec<&str> = s.trim().lines().collect();
        Self::from_lines(&lines)
    }

    /// Size of the map.
    #[inline]
    pub fn extent(&self) -> Extent {
        self.extent
    }

    /// Number of rows.
    #[inline]
    pub fn rows(&self) -> usize {
        self.extent.rows
    }

    /// Number of columns.
    #[inline]
    pub fn cols(&self) -> usize {
        self.extent.cols
    }

    /// The bottom-right cell, where the cave exit is.
    #[inline]
    pub fn bottom_right(&self) -> Cell {
        // Construction rejects empty maps, so `last` is always `Some`.
        self.extent.last().unwrap_or(Cell::ORIGIN)
    }

    /// Risk of entering `c`, or `None` if out of bounds.
    #[inline]
    pub fn at(&self, c: Cell) -> Option<Risk> {
        self.extent.index(c).map(|i| self.risks[i])
    }

    /// In-bounds orthogonal neighbours of `c` with their entry risk.
    ///
    /// Order is fixed: up, left, down, right. Yields nothing when `c` itself
    /// lies outside the map.
    pub fn neighbors(&self, c: Cell) -> impl Iterator<Item = (Risk, Cell)> {
        let inside = self.extent.contains(c);
        c.neighbors_4()
            .into_iter()
            .flatten()
            .filter(move |_| inside)
            .filter_map(|n| self.at(n).map(|r| (r, n)))
    }

    /// Replicate the map `factor` times along each axis.
    ///
    /// The copy at tile offset `(i, j)` has every risk raised by `i + j`,
    /// wrapping from 9 back to 1. `tile(1)` is an identical copy.
    pub fn tile(&self, factor: usize) -> Result<Self> {
        if factor < 1 {
            return Err(Error::InvalidArgument(format!(
                "tile factor must be at least 1, got {factor}"
            )));
        }
        let base = self.extent;
        let Some(extent) = base.scale(factor) else {
            return Err(Error::InvalidArgument(format!(
                "tile factor {factor} overflows a {base} map"
            )));
        };
        let risks = extent
            .cells()
            .map(|c| {
                let src = Cell::new(c.row % base.rows, c.col % base.cols);
                let offset = c.row / base.rows + c.col / base.cols;
                self.risks[src.row * base.cols + src.col].wrapping_add(offset)
            })
            .collect();
        log::debug!("tiled {} map x{} into {}", base, factor, extent);
        Ok(Self { extent, risks })
    }

    /// Sum of risks along the path that runs right along row 0, then down
    /// the last column. Any search result is bounded by this.
    pub fn right_then_down_risk(&self) -> u32 {
        let top = (1..self.cols()).map(|col| Cell::new(0, col));
        let side = (1..self.rows()).map(|row| Cell::new(row, self.cols() - 1));
        top.chain(side)
            .filter_map(|c| self.at(c))
            .map(u32::from)
            .sum()
    }
}

impl FromStr for RiskMap {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for RiskMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.risks.chunks(self.extent.cols).enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for r in row {
                write!(f, "{r}")?;
            }
        }
        Ok(())
    }
}
