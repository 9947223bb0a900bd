//! Two-dimensional scalar field produced by a simulation step.
//!
//! A `Field` stores `width * height` f32 samples in row-major layout. Values
//! are nominally in [0, 1] but are stored as given; the colorizer tolerates
//! anything, so no clamping happens here.

use crate::error::VizError;
use crate::grid::Grid;

/// A 2D scalar field with row-major f32 samples.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    grid: Grid,
    data: Vec<f32>,
}

impl Field {
    /// Creates a zero-filled field of the given dimensions.
    ///
    /// Returns `VizError::InvalidDimensions` if either dimension is zero
    /// or if `width * height` overflows `usize`.
    pub fn new(width: usize, height: usize) -> Result<Self, VizError> {
        Self::filled(width, height, 0.0)
    }

    /// Creates a field with every sample set to `value`.
    pub fn filled(width: usize, height: usize, value: f32) -> Result<Self, VizError> {
        let grid = Grid::new(width, height)?;
        Ok(Self {
            grid,
            data: vec![value; grid.len()],
        })
    }

    /// Creates a field from a pre-built data vector, validating that
    /// `data.len() == width * height`.
    pub fn from_data(width: usize, height: usize, data: Vec<f32>) -> Result<Self, VizError> {
        let grid = Grid::new(width, height)?;
        if data.len() != grid.len() {
            return Err(VizError::DimensionMismatch {
                lhs_w: width,
                lhs_h: height,
                rhs_w: data.len(),
                rhs_h: 1,
            });
        }
        Ok(Self { grid, data })
    }

    /// Field width in cells.
    pub fn width(&self) -> usize {
        self.grid.width
    }

    /// Field height in cells.
    pub fn height(&self) -> usize {
        self.grid.height
    }

    /// Grid geometry of this field.
    pub fn grid(&self) -> Grid {
        self.grid
    }

    /// Read-only access to the underlying row-major data.
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Mutable access to the underlying row-major data.
    pub fn data_mut(&mut self) -> &mut [f32] {
        &mut self.data
    }

    /// Sample at `(x, y)`. Panics when out of bounds.
    pub fn get(&self, x: usize, y: usize) -> f32 {
        self.data[self.grid.offset(x, y)]
    }

    /// Sets the sample at `(x, y)`. Panics when out of bounds.
    pub fn set(&mut self, x: usize, y: usize, value: f32) {
        let idx = self.grid.offset(x, y);
        self.data[idx] = value;
    }

    /// Sample at `(x, y)` with coordinates clamped to the nearest edge cell.
    pub fn get_clamped(&self, x: isize, y: isize) -> f32 {
        let xi = x.clamp(0, self.grid.width as isize - 1) as usize;
        let yi = y.clamp(0, self.grid.height as isize - 1) as usize;
        self.get(xi, yi)
    }
}
