//! Patch grid over the placement domain.
use glam::DVec2;

use crate::domain::Domain;

/// A cell of the patch grid after clipping to the domain.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CellRect {
    /// Lower-left corner in domain coordinates.
    pub min: DVec2,
    /// Clipped cell size; either component may be zero on the far edges.
    pub size: DVec2,
}

impl CellRect {
    pub fn area(&self) -> f64 {
        self.size.x * self.size.y
    }

    pub fn max(&self) -> DVec2 {
        self.min + self.size
    }
}

/// Row-major grid of `width × height` square cells covering a [`Domain`].
#[derive(Clone, Debug)]
pub struct PatchGrid {
    /// Domain the grid is clipped to.
    pub domain: Domain,
    /// Cell edge length in meters.
    pub cell_size: f64,
    /// Number of cells along X.
    pub width: usize,
    /// Number of cells along Y.
    pub height: usize,
}

impl PatchGrid {
    /// Smallest grid of `cell_size` cells covering `domain`, at least 1×1.
    pub fn for_domain(domain: Domain, cell_size: f64) -> Self {
        debug_assert!(cell_size > 0.0, "cell_size must be > 0");
        let width = (domain.length / cell_size).ceil().max(1.0) as usize;
        let height = (domain.width / cell_size).ceil().max(1.0) as usize;
        Self {
            domain,
            cell_size,
            width,
            height,
        }
    }

    pub fn len(&self) -> usize {
        self.width * self.height
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn index(&self, i: usize, j: usize) -> usize {
        j * self.width + i
    }

    /// Cell `(i, j)` clipped to the domain boundary.
    pub fn cell_rect(&self, i: usize, j: usize) -> CellRect {
        let x0 = i as f64 * self.cell_size;
        let y0 = j as f64 * self.cell_size;
        let x1 = self.domain.length.min((i + 1) as f64 * self.cell_size);
        let y1 = self.domain.width.min((j + 1) as f64 * self.cell_size);
        CellRect {
            min: DVec2::new(x0, y0),
            size: DVec2::new((x1 - x0).max(0.0), (y1 - y0).max(0.0)),
        }
    }

    /// Cell coordinates in row-major order: `j` outer, `i` inner.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.height).flat_map(move |j| (0..self.width).map(move |i| (i, j)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dimensions_round_up_and_clip() {
        let grid = PatchGrid::for_domain(Domain::new(2.5, 1.0), 1.0);
        assert_eq!((grid.width, grid.height), (3, 1));

        let last = grid.cell_rect(2, 0);
        assert_eq!(last.min, DVec2::new(2.0, 0.0));
        assert_eq!(last.size, DVec2::new(0.5, 1.0));
        assert_eq!(last.area(), 0.5);
    }

    #[test]
    fn tiny_domain_still_has_one_cell() {
        let grid = PatchGrid::for_domain(Domain::new(0.001, 0.002), 1.0);
        assert_eq!(grid.len(), 1);
        assert_eq!(grid.cell_rect(0, 0).size, DVec2::new(0.001, 0.002));
    }

    #[test]
    fn cells_iterate_row_major() {
        let grid = PatchGrid::for_domain(Domain::new(2.0, 2.0), 1.0);
        let order: Vec<_> = grid.cells().collect();
        assert_eq!(order, vec![(0, 0), (1, 0), (0, 1), (1, 1)]);
        assert_eq!(grid.index(1, 1), 3);
    }
}
