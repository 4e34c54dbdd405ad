//! Jittered grid partitioning of the canvas
//!
//! The canvas is split into `columns x rows` equal cells using integer division.
//! Each cell contributes one anchor: its center moved by a bounded uniform offset.
//! Cells are independent of each other. When the grid does not divide the canvas
//! evenly, the leftover strip on the right and bottom edges is never anchored.

use crate::io::configuration::MAX_JITTER_RATIO;
use crate::io::error::{Result, invalid_parameter};
use crate::spatial::Canvas;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Number of grid columns and rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridDimensions {
    /// Cells along the x axis
    pub columns: u32,
    /// Cells along the y axis
    pub rows: u32,
}

impl GridDimensions {
    /// Create grid dimensions
    pub const fn new(columns: u32, rows: u32) -> Self {
        Self { columns, rows }
    }

    /// Total number of cells
    pub const fn cell_count(&self) -> usize {
        self.columns as usize * self.rows as usize
    }

    /// Pixel size of one cell on the given canvas
    ///
    /// # Errors
    ///
    /// Returns an error if the grid has no cells or is finer than the canvas
    pub fn cell_size(&self, canvas: Canvas) -> Result<(u32, u32)> {
        if self.columns == 0 || self.rows == 0 {
            return Err(invalid_parameter(
                "grid",
                self,
                &"grid must have at least one column and one row",
            ));
        }
        let cell_w = canvas.width / self.columns;
        let cell_h = canvas.height / self.rows;
        if cell_w == 0 || cell_h == 0 {
            return Err(invalid_parameter(
                "grid",
                self,
                &format!("grid is finer than the {canvas} canvas"),
            ));
        }
        Ok((cell_w, cell_h))
    }
}

impl std::fmt::Display for GridDimensions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.columns, self.rows)
    }
}

impl std::str::FromStr for GridDimensions {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let (columns, rows) = crate::spatial::canvas::parse_dimensions(s)?;
        Ok(Self { columns, rows })
    }
}

/// One grid cell and its jittered anchor point
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridCell {
    /// Column index
    pub column: u32,
    /// Row index
    pub row: u32,
    /// Unjittered cell center
    pub center: (i64, i64),
    /// Center after applying the random offset
    pub anchor: (i64, i64),
}

/// Check that a jitter ratio keeps anchors within their cells
///
/// # Errors
///
/// Returns an error if the ratio is not finite or lies outside `[0, 0.5]`
pub fn validate_jitter(jitter_ratio: f64) -> Result<()> {
    if jitter_ratio.is_finite() && (0.0..=MAX_JITTER_RATIO).contains(&jitter_ratio) {
        Ok(())
    } else {
        Err(invalid_parameter(
            "jitter_ratio",
            &jitter_ratio,
            &format!("must lie within [0, {MAX_JITTER_RATIO}]"),
        ))
    }
}

/// Generate one jittered anchor per cell
///
/// Cells are produced column by column (all rows of column 0 first), which fixes
/// the order anchors are consumed in for a given random seed. The offset on each
/// axis is a uniform integer in `[-floor(jitter * cell), +floor(jitter * cell)]`.
///
/// # Errors
///
/// Returns an error if the grid or jitter ratio is invalid for the canvas
pub fn jittered_cells<R: Rng + ?Sized>(
    canvas: Canvas,
    grid: GridDimensions,
    jitter_ratio: f64,
    rng: &mut R,
) -> Result<Vec<GridCell>> {
    validate_jitter(jitter_ratio)?;
    let (cell_w, cell_h) = grid.cell_size(canvas)?;

    let dx = (f64::from(cell_w) * jitter_ratio) as i64;
    let dy = (f64::from(cell_h) * jitter_ratio) as i64;

    let mut cells = Vec::with_capacity(grid.cell_count());
    for column in 0..grid.columns {
        for row in 0..grid.rows {
            let center = (
                i64::from(column * cell_w + cell_w / 2),
                i64::from(row * cell_h + cell_h / 2),
            );
            let anchor = (
                center.0 + rng.random_range(-dx..=dx),
                center.1 + rng.random_range(-dy..=dy),
            );
            cells.push(GridCell {
                column,
                row,
                center,
                anchor,
            });
        }
    }

    Ok(cells)
}
