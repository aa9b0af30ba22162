//! Triangulation of sampled surface grids.

use stokes_geometry::SampleGrid;
use stokes_math::Point3;

/// Convert a row-major sample grid into a triangle mesh.
///
/// Every cell with corners `a = i*w + j`, `b = a + 1`, `c = a + w`,
/// `d = c + 1` (where `w` is the row length) becomes the two triangles
/// `(a, b, c)` and `(b, d, c)`.
///
/// # Returns
/// A tuple of `(vertices, triangles)` where each triangle is an array of 3 vertex indices.
pub fn tessellate_grid(grid: &SampleGrid) -> (Vec<Point3>, Vec<[u32; 3]>) {
    let h = grid.rows();
    let w = grid.cols();

    let cells = h.saturating_sub(1) * w.saturating_sub(1);
    let mut triangles = Vec::with_capacity(cells * 2);
    for i in 0..h.saturating_sub(1) {
        for j in 0..w.saturating_sub(1) {
            let a = (i * w + j) as u32;
            let b = a + 1;
            let c = a + w as u32;
            let d = c + 1;

            triangles.push([a, b, c]);
            triangles.push([b, d, c]);
        }
    }

    (grid.points().to_vec(), triangles)
}

#[cfg(test)]
mod tests {
    use super::*;
    use stokes_geometry::ParametricSurface;

    fn plane_grid(rate: f64) -> SampleGrid {
        ParametricSurface::new(|u, _v| u, |_u, v| v, |_u, _v| 0.0)
            .sample([[0.0, 1.0], [0.0, 1.0]], rate)
    }

    #[test]
    fn test_tessellate_counts() {
        let (vertices, triangles) = tessellate_grid(&plane_grid(0.25));
        assert_eq!(vertices.len(), 5 * 5);
        assert_eq!(triangles.len(), 4 * 4 * 2);
    }

    #[test]
    fn test_first_cell_winding() {
        let (_, triangles) = tessellate_grid(&plane_grid(0.5));
        // 3x3 grid: first cell a=0, b=1, c=3, d=4
        assert_eq!(triangles[0], [0, 1, 3]);
        assert_eq!(triangles[1], [1, 4, 3]);
    }

    #[test]
    fn test_indices_valid() {
        let (vertices, triangles) = tessellate_grid(&plane_grid(0.1));
        let n = vertices.len() as u32;
        for tri in &triangles {
            for &idx in tri {
                assert!(idx < n, "Triangle index {} out of bounds (n={})", idx, n);
            }
        }
    }

    #[test]
    fn test_single_sample_has_no_triangles() {
        let (vertices, triangles) = tessellate_grid(&plane_grid(5.0));
        assert_eq!(vertices.len(), 1);
        assert!(triangles.is_empty());
    }

    #[test]
    fn test_empty_grid() {
        let (vertices, triangles) = tessellate_grid(&plane_grid(-1.0));
        assert!(vertices.is_empty());
        assert!(triangles.is_empty());
    }
}
