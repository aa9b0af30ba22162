//! Sampled geometry handed to the renderer and the integrals.

use serde::{Deserialize, Serialize};
use stokes_math::{Point3, Vector3};

/// A directed segment from `start` to `end`.
///
/// Used for drawn field vectors (origin, origin + scaled vector) and for
/// surface normals (point, point + half unit normal).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: Point3,
    pub end: Point3,
}

impl Segment {
    pub fn new(start: Point3, end: Point3) -> Self {
        Self { start, end }
    }

    pub fn direction(&self) -> Vector3 {
        self.end - self.start
    }

    pub fn length(&self) -> f64 {
        self.direction().length()
    }
}

/// Row-major grid of surface points, one row per `u` step.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SampleGrid {
    rows: usize,
    cols: usize,
    points: Vec<Point3>,
}

impl SampleGrid {
    /// Build a grid from row-major `points`.
    ///
    /// # Panics
    /// Panics if `points.len() != rows * cols`.
    pub fn from_points(rows: usize, cols: usize, points: Vec<Point3>) -> Self {
        assert_eq!(points.len(), rows * cols, "grid shape does not match point count");
        Self { rows, cols, points }
    }

    /// Number of `u` samples.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of `v` samples per row.
    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn points(&self) -> &[Point3] {
        &self.points
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn get(&self, i: usize, j: usize) -> Option<Point3> {
        if i < self.rows && j < self.cols {
            Some(self.points[i * self.cols + j])
        } else {
            None
        }
    }

    /// Samples of the `i`-th `u` step, or `None` past the last row.
    pub fn row(&self, i: usize) -> Option<&[Point3]> {
        if i < self.rows {
            Some(&self.points[i * self.cols..(i + 1) * self.cols])
        } else {
            None
        }
    }
}

/// Closed loop around the edge of the parameter rectangle.
///
/// Points are stored in traversal order; the closing segment from the last
/// point back to the first is implicit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoundaryCurve {
    pub points: Vec<Point3>,
}

impl BoundaryCurve {
    pub fn new(points: Vec<Point3>) -> Self {
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Consecutive point pairs, including the closing pair `(last, first)`.
    pub fn segments(&self) -> impl Iterator<Item = Segment> + '_ {
        let n = self.points.len();
        (0..n).map(move |i| Segment::new(self.points[i], self.points[(i + 1) % n]))
    }
}

/// Result of the curl-flux surface integral.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurlIntegral {
    /// Riemann-sum estimate of the flux of curl through the surface.
    pub value: f64,
    /// One normal per integration cell, for drawing only.
    pub normals: Vec<Segment>,
}
