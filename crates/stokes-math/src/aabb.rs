use crate::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box of sampled geometry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb3 {
    pub min: Point3,
    pub max: Point3,
}

impl Aabb3 {
    pub fn new(min: Point3, max: Point3) -> Self {
        Self { min, max }
    }

    /// Bounds of the finite points in `points`.
    ///
    /// Samples where a component function produced NaN or infinity are
    /// skipped. Returns `None` when no finite point remains.
    pub fn from_points<'a, I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Point3>,
    {
        let mut bounds: Option<Self> = None;
        for &p in points.into_iter().filter(|p| p.is_finite()) {
            bounds = Some(match bounds {
                Some(b) => b.include(p),
                None => Self::new(p, p),
            });
        }
        bounds
    }

    /// Smallest box containing `self` and `p`.
    pub fn include(&self, p: Point3) -> Self {
        Self {
            min: self.min.min(p),
            max: self.max.max(p),
        }
    }

    pub fn center(&self) -> Point3 {
        (self.min + self.max) * 0.5
    }

    pub fn extents(&self) -> Vector3 {
        self.max - self.min
    }

    /// Smallest box containing both boxes.
    pub fn merge(&self, other: &Self) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }
}
