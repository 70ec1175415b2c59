use crate::Point3;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding volume of a mesh, in the mesh's local frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb3 {
    pub min: Point3,
    pub max: Point3,
}

impl Aabb3 {
    pub fn new(min: Point3, max: Point3) -> Self {
        Self { min, max }
    }

    /// Degenerate box at the origin, used for meshes with no positions.
    pub fn zero() -> Self {
        Self::new(Point3::ZERO, Point3::ZERO)
    }

    pub fn from_points<'a, I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Point3>,
    {
        let mut iter = points.into_iter();
        let first = *iter.next()?;
        Some(iter.fold(Self::new(first, first), |b, &p| b.include(p)))
    }

    /// Grow the box to contain `p`.
    pub fn include(self, p: Point3) -> Self {
        Self {
            min: self.min.min(p),
            max: self.max.max(p),
        }
    }
}

impl Default for Aabb3 {
    fn default() -> Self {
        Self::zero()
    }
}
