//! Pyramid arrow heads for drawn vectors.

use stokes_geometry::Segment;
use stokes_math::{Point3, Vector3};

/// Triangles of one arrow tip, indexing the five vertices of [`arrow_tip`]:
/// two for the square base, four for the sides meeting at the apex.
pub const ARROW_TIP_INDICES: [u32; 18] = [2, 1, 4, 2, 3, 4, 2, 3, 0, 2, 1, 0, 1, 4, 0, 4, 3, 0];

/// Vertices of a square pyramid sitting on the end of `segment`.
///
/// Vertex 0 is the apex, `height` beyond the segment end along its
/// direction; vertices 1..=4 are the base corners, `width / 2` off the end
/// along two axes perpendicular to the direction. A zero-length segment has
/// no direction and yields NaN vertices.
pub fn arrow_tip(segment: &Segment, width: f64, height: f64) -> [Point3; 5] {
    let tip = segment.end;
    let e1 = segment.direction() / segment.length();

    // Perpendicular in the xy-plane, or along x for vertical arrows
    let horizontal = Vector3::new(-e1.y, e1.x, 0.0);
    let e2 = if horizontal.length_squared() > 1e-24 {
        horizontal.normalize()
    } else {
        Vector3::X
    };
    let e3 = e1.cross(e2);

    let half = width / 2.0;
    [
        tip + e1 * height,
        tip + e3 * half - e2 * half,
        tip - e3 * half - e2 * half,
        tip - e3 * half + e2 * half,
        tip + e3 * half + e2 * half,
    ]
}
