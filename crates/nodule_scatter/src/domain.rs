//! The rectangular placement domain.
use glam::DVec2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle `[0, length] × [0, width]` in meters.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Domain {
    /// Extent along X.
    pub length: f64,
    /// Extent along Y.
    pub width: f64,
}

impl Default for Domain {
    fn default() -> Self {
        Self::new(10.0, 10.0)
    }
}

impl Domain {
    pub fn new(length: f64, width: f64) -> Self {
        Self { length, width }
    }

    pub fn extent(&self) -> DVec2 {
        DVec2::new(self.length, self.width)
    }

    pub fn area(&self) -> f64 {
        self.length * self.width
    }

    /// Center of the rectangle in domain coordinates.
    pub fn center(&self) -> DVec2 {
        self.extent() * 0.5
    }

    /// Whether `p` lies inside the closed rectangle.
    pub fn contains(&self, p: DVec2) -> bool {
        p.x >= 0.0 && p.x <= self.length && p.y >= 0.0 && p.y <= self.width
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn area_and_center() {
        let d = Domain::new(4.0, 2.5);
        assert_eq!(d.area(), 10.0);
        assert_eq!(d.center(), DVec2::new(2.0, 1.25));
    }

    #[test]
    fn contains_is_closed() {
        let d = Domain::new(1.0, 1.0);
        assert!(d.contains(DVec2::new(0.0, 1.0)));
        assert!(!d.contains(DVec2::new(-1e-9, 0.5)));
    }
}
