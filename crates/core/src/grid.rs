//! Execution grid geometry shared by fields and pixel buffers.

use crate::error::VizError;
use serde::{Deserialize, Serialize};

/// Width x height of a dispatch. `offset = x + y * width` indexes both the
/// field and the pixel buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    pub width: usize,
    pub height: usize,
}

impl Grid {
    /// Validates that both dimensions are non-zero and their product fits `usize`.
    pub fn new(width: usize, height: usize) -> Result<Self, VizError> {
        if width == 0 || height == 0 {
            return Err(VizError::InvalidDimensions);
        }
        width
            .checked_mul(height)
            .ok_or(VizError::InvalidDimensions)?;
        Ok(Self { width, height })
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.width * self.height
    }

    /// Always false for a grid built with [`Grid::new`].
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Linear offset of `(x, y)`.
    pub fn offset(&self, x: usize, y: usize) -> usize {
        x + y * self.width
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_rejects_zero_dimensions() {
        assert!(matches!(Grid::new(0, 4), Err(VizError::InvalidDimensions)));
        assert!(matches!(Grid::new(4, 0), Err(VizError::InvalidDimensions)));
    }

    #[test]
    fn new_rejects_overflowing_area() {
        assert!(Grid::new(usize::MAX, 2).is_err());
    }

    #[test]
    fn offset_is_row_major() {
        let g = Grid::new(8, 4).unwrap();
        assert_eq!(g.offset(0, 0), 0);
        assert_eq!(g.offset(7, 0), 7);
        assert_eq!(g.offset(0, 1), 8);
        assert_eq!(g.offset(3, 2), 19);
        assert_eq!(g.len(), 32);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn offset_stays_inside_grid(w in 1_usize..64, h in 1_usize..64, x in 0_usize..64, y in 0_usize..64) {
                let g = Grid::new(w, h).unwrap();
                let (x, y) = (x % w, y % h);
                let off = g.offset(x, y);
                prop_assert!(off < g.len());
                prop_assert_eq!((off % w, off / w), (x, y));
            }
        }
    }
}
