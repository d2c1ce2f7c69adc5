//! Static passability grid loaded from a flat byte buffer.

use gridwalk_core::{CellCoord, MapError, MapLayout};
use tracing::debug;

/// Immutable grid of cell values that answers blocking queries.
///
/// Cells outside the layout's extent are always reported as blocking, so a
/// player can never leave the map even when its border cells are open.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Map {
    layout: MapLayout,
    cells: Box<[u8]>,
}

impl Map {
    /// Builds a map from raw cell bytes laid out row by row.
    ///
    /// Bytes past the last addressed cell are discarded. The buffer is
    /// rejected when the layout is empty or when it holds fewer bytes than
    /// `columns * rows`.
    pub fn new(mut cells: Vec<u8>, layout: MapLayout) -> Result<Self, MapError> {
        if layout.columns == 0 || layout.rows == 0 {
            return Err(MapError::EmptyLayout {
                columns: layout.columns,
                rows: layout.rows,
            });
        }

        let expected = layout.cell_count().ok_or(MapError::TooLarge {
            columns: layout.columns,
            rows: layout.rows,
        })?;

        if cells.len() < expected {
            return Err(MapError::Truncated {
                expected,
                actual: cells.len(),
            });
        }
        cells.truncate(expected);

        debug!(
            columns = layout.columns,
            rows = layout.rows,
            passable_threshold = layout.passable_threshold,
            "constructed map"
        );

        Ok(Self {
            layout,
            cells: cells.into_boxed_slice(),
        })
    }

    /// Builds a map where every cell holds the same value.
    pub fn filled(layout: MapLayout, value: u8) -> Result<Self, MapError> {
        let count = layout.cell_count().ok_or(MapError::TooLarge {
            columns: layout.columns,
            rows: layout.rows,
        })?;
        Self::new(vec![value; count], layout)
    }

    /// Layout the map was constructed with.
    #[must_use]
    pub const fn layout(&self) -> MapLayout {
        self.layout
    }

    /// Number of columns and rows in the grid.
    #[must_use]
    pub const fn dimensions(&self) -> (u32, u32) {
        (self.layout.columns, self.layout.rows)
    }

    /// Raw cell bytes in row-major order.
    #[must_use]
    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    /// Raw value stored in the cell, or `None` outside the grid.
    #[must_use]
    pub fn cell_value(&self, cell: CellCoord) -> Option<u8> {
        self.layout
            .index(cell)
            .and_then(|index| self.cells.get(index).copied())
    }

    /// Reports whether the cell at column `x`, row `y` blocks occupancy.
    #[must_use]
    pub fn is_blocking(&self, x: i64, y: i64) -> bool {
        self.is_cell_blocking(CellCoord::new(x, y))
    }

    /// Reports whether the cell blocks occupancy. Out-of-bounds cells block.
    #[must_use]
    pub fn is_cell_blocking(&self, cell: CellCoord) -> bool {
        self.cell_value(cell)
            .map_or(true, |value| !self.layout.is_passable_value(value))
    }
}
