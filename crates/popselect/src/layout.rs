//! Grid layout for the choice panel.
//!
//! A grid is requested by fixing either the column count or the row count;
//! the other dimension follows from the number of choices. Choices are laid
//! down the columns first (column-major), while the panel itself is filled
//! row by row, so the builder needs the mapping between the two orders:
//!
//! ```text
//! choices A B C D E, columns = 2  ->  rows = 3, one padding cell (_)
//!
//!   natural order:  A B C D E _
//!   visual order:   A D
//!                   B E
//!                   C _
//! ```

use crate::config::{Configuration, GridShape};

/// The computed shape of a grid panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLayout {
    /// Number of columns.
    pub columns: usize,
    /// Number of rows.
    pub rows: usize,
    /// Width of each item's content box.
    pub item_width: f32,
    /// Width of each cell: item width plus horizontal padding.
    pub cell_width: f32,
    /// Number of real (non-padding) items.
    pub choice_count: usize,
}

impl GridLayout {
    /// Compute the grid for `choice_count` choices, or `None` for a flat panel.
    pub fn compute(choice_count: usize, config: &Configuration) -> Option<Self> {
        let shape = config.grid?;
        let item_width = config.item_width?;
        Some(Self::from_shape(
            shape,
            choice_count,
            item_width,
            config.item_horizontal_padding(),
        ))
    }

    /// Compute a grid from an explicit shape request.
    ///
    /// The fixed dimension must be at least 1.
    pub fn from_shape(
        shape: GridShape,
        choice_count: usize,
        item_width: f32,
        horizontal_padding: f32,
    ) -> Self {
        let (columns, rows) = match shape {
            GridShape::Columns(columns) => (columns, choice_count.div_ceil(columns)),
            GridShape::Rows(rows) => (choice_count.div_ceil(rows), rows),
        };
        Self {
            columns,
            rows,
            item_width,
            cell_width: item_width + horizontal_padding,
            choice_count,
        }
    }

    /// Total number of cells.
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.rows * self.columns
    }

    /// Number of padding cells needed to fill the rectangle.
    #[inline]
    pub fn padding_count(&self) -> usize {
        self.cell_count() - self.choice_count
    }

    /// Width of the whole panel.
    #[inline]
    pub fn panel_width(&self) -> f32 {
        self.columns as f32 * self.cell_width
    }

    /// The natural (column-major) index shown at a visual (row-major) position.
    ///
    /// Natural indices at or beyond `choice_count` are padding cells.
    #[inline]
    pub fn natural_index(&self, visual_index: usize) -> usize {
        let row = visual_index / self.columns;
        let column = visual_index % self.columns;
        column * self.rows + row
    }

    /// The visual (row-major) position of a natural (column-major) index.
    #[inline]
    pub fn visual_index(&self, natural_index: usize) -> usize {
        let column = natural_index / self.rows;
        let row = natural_index % self.rows;
        row * self.columns + column
    }

    /// Natural indices in visual order, padding included.
    pub fn visual_order(&self) -> Vec<usize> {
        (0..self.cell_count()).map(|v| self.natural_index(v)).collect()
    }
}
