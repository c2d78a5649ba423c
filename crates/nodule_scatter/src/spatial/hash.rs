//! Uniform spatial hash over disk centers.
//!
//! Each accepted disk is stored under the integer cell containing its center.
//! With a cell size at least as large as the widest hard-core distance, an
//! overlap query only needs the 3×3 block around the candidate's cell.
use std::collections::HashMap;

use glam::DVec2;

use crate::disk::Disk;

/// Integer cell coordinate `(⌊x / cell⌋, ⌊y / cell⌋)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CellKey(
    /// Cell index along the X axis.
    pub i32,
    /// Cell index along the Y axis.
    pub i32,
);

/// Hash grid mapping cells to indices into an external disk list.
#[derive(Clone, Debug)]
pub struct SpatialHash {
    cell_size: f64,
    cells: HashMap<CellKey, Vec<usize>>,
    max_radius: f64,
    len: usize,
}

impl SpatialHash {
    pub fn new(cell_size: f64) -> Self {
        Self::with_capacity(cell_size, 0)
    }

    pub fn with_capacity(cell_size: f64, cells: usize) -> Self {
        debug_assert!(cell_size > 0.0, "cell_size must be > 0");
        Self {
            cell_size,
            cells: HashMap::with_capacity(cells),
            max_radius: 0.0,
            len: 0,
        }
    }

    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    /// Number of indexed disks.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn cell_of(&self, p: DVec2) -> CellKey {
        CellKey(
            (p.x / self.cell_size).floor() as i32,
            (p.y / self.cell_size).floor() as i32,
        )
    }

    /// Index `disk` under `index`, its position in the caller's disk list.
    pub fn insert(&mut self, index: usize, disk: &Disk) {
        let key = self.cell_of(disk.center());
        self.cells.entry(key).or_default().push(index);
        self.max_radius = self.max_radius.max(disk.radius());
        self.len += 1;
    }

    /// Cell reach needed so no disk within the hard-core distance of a disk of
    /// radius `radius` is missed. Returns 1 (a 3×3 block) in the normal case.
    ///
    /// Saturates at `i32::MAX` for hard-core distances beyond the key range.
    pub fn reach_for(&self, radius: f64, gap: f64) -> i32 {
        let hard_core = radius + self.max_radius + gap;
        ((hard_core / self.cell_size).ceil() as i32).max(1)
    }

    /// Indices stored in the `(2·reach + 1)²` block of cells around `p`.
    pub fn neighbors(&self, p: DVec2, reach: i32) -> Vec<usize> {
        let mut out = Vec::new();
        self.visit_block(p, reach, |bucket| {
            out.extend_from_slice(bucket);
            true
        });
        out
    }

    /// True if a disk of `radius` centred at `p` keeps at least
    /// `r + r_existing + gap` from every indexed disk in `disks`.
    pub fn is_clear(&self, p: DVec2, radius: f64, gap: f64, disks: &[Disk]) -> bool {
        if self.is_empty() {
            return true;
        }

        let reach = self.reach_for(radius, gap);
        self.visit_block(p, reach, |bucket| {
            bucket.iter().all(|&idx| {
                let other = &disks[idx];
                let min_dist = radius + other.radius() + gap;
                p.distance_squared(other.center()) >= min_dist * min_dist
            })
        })
    }

    /// Call `visit` on every occupied bucket in the block around `p` until it
    /// returns false. Returns false if any call did.
    fn visit_block(
        &self,
        p: DVec2,
        reach: i32,
        mut visit: impl FnMut(&[usize]) -> bool,
    ) -> bool {
        let c = self.cell_of(p);
        let side = 2 * i64::from(reach) + 1;
        let block = side.saturating_mul(side);

        if block > self.cells.len() as i64 {
            // Block is larger than the occupied set; filter the occupied cells.
            let reach = i64::from(reach);
            let within = |a: i32, b: i32| (i64::from(a) - i64::from(b)).abs() <= reach;
            return self
                .cells
                .iter()
                .filter(|(k, _)| within(k.0, c.0) && within(k.1, c.1))
                .all(|(_, bucket)| visit(bucket.as_slice()));
        }

        for dy in -reach..=reach {
            for dx in -reach..=reach {
                if let Some(bucket) = self.cells.get(&CellKey(c.0 + dx, c.1 + dy)) {
                    if !visit(bucket.as_slice()) {
                        return false;
                    }
                }
            }
        }
        true
    }
}
