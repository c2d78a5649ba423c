//! Placed disks ("nodules") as pure geometric records.
use glam::DVec2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::domain::Domain;

/// A placed disk: center in domain coordinates and diameter, both in meters.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Disk {
    pub x: f64,
    pub y: f64,
    pub diameter: f64,
}

impl Disk {
    pub fn new(x: f64, y: f64, diameter: f64) -> Self {
        Self { x, y, diameter }
    }

    #[inline]
    pub fn radius(&self) -> f64 {
        0.5 * self.diameter
    }

    #[inline]
    pub fn center(&self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }

    /// Area of the disk's projection onto the domain plane.
    pub fn projected_area(&self) -> f64 {
        std::f64::consts::PI * self.radius() * self.radius()
    }

    /// True if the two disks are closer than touching plus `gap`.
    pub fn overlaps(&self, other: &Disk, gap: f64) -> bool {
        let min_dist = self.radius() + other.radius() + gap;
        self.center().distance_squared(other.center()) < min_dist * min_dist
    }

    /// Spawn position for a body built from this disk.
    ///
    /// Simulation worlds are usually centred on the origin, so the domain is
    /// shifted by half its extent and the disk is lifted to height `z`.
    pub fn body_position(&self, domain: &Domain, z: f64) -> mint::Point3<f64> {
        let p = self.center() - domain.center();
        mint::Point3 { x: p.x, y: p.y, z }
    }
}

impl From<Disk> for mint::Point2<f64> {
    fn from(disk: Disk) -> Self {
        mint::Point2 {
            x: disk.x,
            y: disk.y,
        }
    }
}
