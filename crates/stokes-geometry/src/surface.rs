//! Parametric surfaces.

use stokes_math::diff::partial_derivative;
use stokes_math::{vector, Point3, Vector3};

use crate::field::Field;
use crate::integrate;
use crate::sample::{BoundaryCurve, CurlIntegral, SampleGrid};

/// Scalar component of a surface, `(u, v) -> f64`.
pub type ComponentFn = Box<dyn Fn(f64, f64) -> f64>;

/// Trait for parametric surfaces in 3D space.
pub trait Surface {
    /// Evaluate the surface at parameters `(u, v)`.
    fn point_at(&self, u: f64, v: f64) -> Point3;

    /// Unnormalized surface normal `dR/du x dR/dv` at `(u, v)`.
    ///
    /// The default estimates both partials with forward differences.
    /// Its orientation is the one the boundary traversal of
    /// [`integrate::boundary_curve`] is consistent with.
    fn normal_at(&self, u: f64, v: f64) -> Vector3 {
        let position = |p: [f64; 2]| self.point_at(p[0], p[1]);
        let du: Vector3 = partial_derivative(position, [u, v], 0);
        let dv: Vector3 = partial_derivative(position, [u, v], 1);
        vector::cross(du, dv)
    }
}

/// A surface `R(u, v) = (Rx, Ry, Rz)` built from three scalar functions.
///
/// The components must be pure; non-finite values propagate unchanged.
pub struct ParametricSurface {
    rx: ComponentFn,
    ry: ComponentFn,
    rz: ComponentFn,
}

impl ParametricSurface {
    pub fn new<X, Y, Z>(rx: X, ry: Y, rz: Z) -> Self
    where
        X: Fn(f64, f64) -> f64 + 'static,
        Y: Fn(f64, f64) -> f64 + 'static,
        Z: Fn(f64, f64) -> f64 + 'static,
    {
        Self {
            rx: Box::new(rx),
            ry: Box::new(ry),
            rz: Box::new(rz),
        }
    }

    /// Point grid over the parameter rectangle. See [`integrate::sample_surface`].
    pub fn sample(&self, uv_ranges: [[f64; 2]; 2], rate: f64) -> SampleGrid {
        integrate::sample_surface(self, uv_ranges, rate)
    }

    /// Closed loop around the parameter rectangle. See [`integrate::boundary_curve`].
    pub fn boundary_curve(&self, uv_ranges: [[f64; 2]; 2], rate: f64) -> BoundaryCurve {
        integrate::boundary_curve(self, uv_ranges, rate)
    }

    /// Circulation of `field` along `curve`. See [`integrate::boundary_integral`].
    pub fn boundary_integral(&self, field: &dyn Field, curve: &BoundaryCurve) -> f64 {
        integrate::boundary_integral(field, curve)
    }

    /// Flux of the curl of `field` through the surface. See [`integrate::curl_integral`].
    pub fn curl_integral(
        &self,
        field: &dyn Field,
        uv_ranges: [[f64; 2]; 2],
        rate: f64,
    ) -> CurlIntegral {
        integrate::curl_integral(self, field, uv_ranges, rate)
    }
}

impl Surface for ParametricSurface {
    fn point_at(&self, u: f64, v: f64) -> Point3 {
        Point3::new((self.rx)(u, v), (self.ry)(u, v), (self.rz)(u, v))
    }
}

impl std::fmt::Debug for ParametricSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParametricSurface").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stokes_math::dvec3;

    fn unit_square() -> ParametricSurface {
        ParametricSurface::new(|u, _v| u, |_u, v| v, |_u, _v| 0.0)
    }

    #[test]
    fn test_point_at() {
        let surface = ParametricSurface::new(|u, v| u + v, |u, v| u - v, |u, v| u * v);
        assert_eq!(surface.point_at(2.0, 3.0), dvec3(5.0, -1.0, 6.0));
    }

    #[test]
    fn test_flat_normal_points_up() {
        let n = unit_square().normal_at(0.3, 0.6);
        assert!(n.x.abs() < 1e-12);
        assert!(n.y.abs() < 1e-12);
        assert!((n.z - 1.0).abs() < 1e-2, "normal z: {}", n.z);
    }

    #[test]
    fn test_swapped_parameters_flip_normal() {
        let swapped = ParametricSurface::new(|_u, v| v, |u, _v| u, |_u, _v| 0.0);
        let n = swapped.normal_at(0.3, 0.6);
        assert!((n.z + 1.0).abs() < 1e-2);
    }

    #[test]
    fn test_normal_is_not_normalized() {
        // |dR/du| = |dR/dv| = 3, so the normal carries the area factor 9
        let scaled = ParametricSurface::new(|u, _v| 3.0 * u, |_u, v| 3.0 * v, |_u, _v| 0.0);
        assert!((scaled.normal_at(0.25, 0.25).z - 9.0).abs() < 0.2);
    }

    #[test]
    fn test_sphere_normal_is_radial() {
        let sphere = ParametricSurface::new(
            |u, v| u.sin() * v.cos(),
            |u, v| u.sin() * v.sin(),
            |u, _v| u.cos(),
        );
        let (u, v) = (0.9, 0.4);
        let n = sphere.normal_at(u, v).normalize();
        let p = sphere.point_at(u, v);
        assert!(n.dot(p).abs() > 0.99, "normal not radial: {n:?} at {p:?}");
    }
}
