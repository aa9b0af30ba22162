//! Vector fields in 3D space.

use log::debug;
use stokes_math::diff::partial_derivative;
use stokes_math::{vector, Point3, Vector3};

use crate::lattice;
use crate::sample::Segment;

/// Scalar component of a vector field, `(x, y, z) -> f64`.
pub type ComponentFn = Box<dyn Fn(f64, f64, f64) -> f64>;

/// Trait for vector fields the integrals can consume.
pub trait Field {
    /// Evaluate the field at `p`.
    fn vector_at(&self, p: Point3) -> Vector3;

    /// Evaluate the curl of the field at `p`.
    fn curl_at(&self, p: Point3) -> Vector3;
}

/// A vector field built from three scalar component functions.
///
/// The components must be pure: evaluating the field twice at the same point
/// yields the same vector. Non-finite component values are not filtered and
/// propagate into every quantity derived from them.
pub struct VectorField {
    fx: ComponentFn,
    fy: ComponentFn,
    fz: ComponentFn,
}

impl VectorField {
    pub fn new<X, Y, Z>(fx: X, fy: Y, fz: Z) -> Self
    where
        X: Fn(f64, f64, f64) -> f64 + 'static,
        Y: Fn(f64, f64, f64) -> f64 + 'static,
        Z: Fn(f64, f64, f64) -> f64 + 'static,
    {
        Self {
            fx: Box::new(fx),
            fy: Box::new(fy),
            fz: Box::new(fz),
        }
    }

    /// `[Fx, Fy, Fz] * scale` at `(x, y, z)`.
    pub fn evaluate(&self, x: f64, y: f64, z: f64, scale: f64) -> Vector3 {
        vector::scale(
            Vector3::new((self.fx)(x, y, z), (self.fy)(x, y, z), (self.fz)(x, y, z)),
            scale,
        )
    }

    /// Curl from six forward-difference partials at `(x, y, z)`:
    /// `(dFz/dy - dFy/dz, dFx/dz - dFz/dx, dFy/dx - dFx/dy)`.
    pub fn curl(&self, x: f64, y: f64, z: f64) -> Vector3 {
        let point = [x, y, z];
        let d = |f: &ComponentFn, axis: usize| -> f64 {
            partial_derivative(|p: [f64; 3]| f(p[0], p[1], p[2]), point, axis)
        };
        Vector3::new(
            d(&self.fz, 1) - d(&self.fy, 2),
            d(&self.fx, 2) - d(&self.fz, 0),
            d(&self.fy, 0) - d(&self.fx, 1),
        )
    }

    /// Sum of each component's partial along its own axis, with the other two
    /// coordinates held at zero: `d/dx Fx(x,0,0) + d/dy Fy(0,y,0) + d/dz Fz(0,0,z)`.
    ///
    /// This matches the true divergence only for fields whose components each
    /// depend on their own coordinate alone. The Stokes integrals never use it.
    pub fn divergence(&self, x: f64, y: f64, z: f64) -> f64 {
        let dfx: f64 = partial_derivative(|p: [f64; 1]| (self.fx)(p[0], 0.0, 0.0), [x], 0);
        let dfy: f64 = partial_derivative(|p: [f64; 1]| (self.fy)(0.0, p[0], 0.0), [y], 0);
        let dfz: f64 = partial_derivative(|p: [f64; 1]| (self.fz)(0.0, 0.0, p[0]), [z], 0);
        dfx + dfy + dfz
    }

    /// Sample the cube `[range[0], range[1]]^3` with step `1 / density`,
    /// emitting `(point, point + scale * F(point))` for every lattice point.
    ///
    /// Points are ordered x-major, then y, then z.
    pub fn sample(&self, range: [f64; 2], density: f64, scale: f64) -> Vec<Segment> {
        let vectors: Vec<Segment> = sample_cubic_space(range, 1.0 / density)
            .map(|point| {
                let v = self.evaluate(point.x, point.y, point.z, scale);
                Segment::new(point, vector::add(point, v))
            })
            .collect();
        debug!(
            "sampled {} field vectors over [{}, {}]^3",
            vectors.len(),
            range[0],
            range[1]
        );
        vectors
    }
}

impl Field for VectorField {
    fn vector_at(&self, p: Point3) -> Vector3 {
        self.evaluate(p.x, p.y, p.z, 1.0)
    }

    fn curl_at(&self, p: Point3) -> Vector3 {
        self.curl(p.x, p.y, p.z)
    }
}

impl std::fmt::Debug for VectorField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VectorField").finish_non_exhaustive()
    }
}

/// Lattice points of the cube `[range[0], range[1]]^3` with spacing `step`.
pub fn sample_cubic_space(range: [f64; 2], step: f64) -> impl Iterator<Item = Point3> {
    let axis = lattice::inclusive(range[0], range[1], step);
    let (ys, zs) = (axis.clone(), axis.clone());
    axis.flat_map(move |x| {
        let zs = zs.clone();
        ys.clone()
            .flat_map(move |y| zs.clone().map(move |z| Point3::new(x, y, z)))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use stokes_math::dvec3;

    fn rotation_field() -> VectorField {
        VectorField::new(|_x, y, _z| -y, |x, _y, _z| x, |_x, _y, _z| 0.0)
    }

    #[test]
    fn test_evaluate_and_scale() {
        let field = VectorField::new(|x, _y, _z| x, |_x, y, z| y + z, |_x, _y, z| z);
        assert_eq!(field.evaluate(1.0, 2.0, 3.0, 1.0), dvec3(1.0, 5.0, 3.0));
        assert_eq!(field.evaluate(1.0, 2.0, 3.0, 0.5), dvec3(0.5, 2.5, 1.5));
        assert_eq!(field.vector_at(dvec3(1.0, 2.0, 3.0)), dvec3(1.0, 5.0, 3.0));
    }

    #[test]
    fn test_curl_of_rotation() {
        let curl = rotation_field().curl(0.25, 0.5, 0.0);
        assert_abs_diff_eq!(curl.x, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(curl.y, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(curl.z, 2.0, epsilon = 2e-2);
    }

    #[test]
    fn test_curl_of_shear_field() {
        // (x, y + z, z): only dFy/dz is non-zero
        let field = VectorField::new(|x, _y, _z| x, |_x, y, z| y + z, |_x, _y, z| z);
        let curl = field.curl(0.5, 0.5, 0.5);
        assert_abs_diff_eq!(curl.x, -1.0, epsilon = 2e-2);
        assert_abs_diff_eq!(curl.y, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(curl.z, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_curl_of_constant_field_is_zero() {
        let field = VectorField::new(|_, _, _| 1.0, |_, _, _| -2.0, |_, _, _| 3.0);
        assert_eq!(field.curl(4.0, -3.0, 7.0), Vector3::ZERO);
    }

    #[test]
    fn test_divergence_own_axis() {
        let field = VectorField::new(|x, _y, _z| 2.0 * x, |_x, y, _z| 0.5 * y, |_x, _y, z| -z);
        assert_abs_diff_eq!(field.divergence(0.25, 0.5, 0.75), 1.5, epsilon = 3e-2);
    }

    #[test]
    fn test_divergence_ignores_cross_terms() {
        // Fx = x * y has true divergence y, but with y held at zero the
        // own-axis sum sees only zero.
        let field = VectorField::new(|x, y, _z| x * y, |_, _, _| 0.0, |_, _, _| 0.0);
        assert_eq!(field.divergence(0.5, 0.5, 0.5), 0.0);
    }

    #[test]
    fn test_sample_count_and_order() {
        let field = VectorField::new(|_, _, _| 1.0, |_, _, _| 0.0, |_, _, _| 0.0);
        let vectors = field.sample([-1.0, 1.0], 1.0, 0.5);
        assert_eq!(vectors.len(), 27);
        assert_eq!(vectors[0].start, dvec3(-1.0, -1.0, -1.0));
        assert_eq!(vectors[0].end, dvec3(-0.5, -1.0, -1.0));
        assert_eq!(vectors[1].start, dvec3(-1.0, -1.0, 0.0));
        assert_eq!(vectors[26].start, dvec3(1.0, 1.0, 1.0));
    }

    #[test]
    fn test_sample_default_viewer_lattice() {
        let field = rotation_field();
        // step 1 / 0.2 = 5 over [-20, 20]: 9 points per axis
        assert_eq!(field.sample([-20.0, 20.0], 0.2, 0.04).len(), 9 * 9 * 9);
    }

    #[test]
    fn test_sample_empty_range() {
        let field = rotation_field();
        assert!(field.sample([1.0, -1.0], 1.0, 1.0).is_empty());
    }

    #[test]
    fn test_nan_propagates_through_evaluate() {
        let field = VectorField::new(|x, _, _| 1.0 / x - 1.0 / x, |_, _, _| 0.0, |_, _, _| 0.0);
        assert!(field.evaluate(0.0, 0.0, 0.0, 1.0).x.is_nan());
    }
}
