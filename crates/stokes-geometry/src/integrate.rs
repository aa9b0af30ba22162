//! Surface sampling and the two integrals of Stokes' theorem.
//!
//! Orientation convention: the boundary is walked along `v = v_min` with
//! increasing `u`, then `u = u_max` with increasing `v`, then back along
//! `v = v_max` and `u = u_min`. This loop is counter-clockwise in the
//! `(u, v)` plane, which is the right-hand orientation for the normal
//! `dR/du x dR/dv` used by [`curl_integral`]. Changing either side flips
//! the sign of one integral relative to the other.

use log::debug;
use stokes_math::vector::{self, round_to};

use crate::field::Field;
use crate::lattice;
use crate::sample::{BoundaryCurve, CurlIntegral, SampleGrid, Segment};
use crate::surface::Surface;

/// Decimal places `u` and `v` are rounded to before a grid sample.
pub const SAMPLE_DECIMALS: u32 = 2;

/// Sample `surface` over `uv_ranges` with step `rate`, row-major by `u`.
///
/// Each `u` and `v` is rounded to [`SAMPLE_DECIMALS`] places before
/// evaluation, so repeated calls with the same inputs produce bit-identical
/// grids. The grid has `floor(span / rate) + 1` samples per axis; a rate
/// larger than the span yields one sample, and an empty range or a
/// non-positive rate yields an empty grid.
pub fn sample_surface(surface: &dyn Surface, uv_ranges: [[f64; 2]; 2], rate: f64) -> SampleGrid {
    let [ur, vr] = uv_ranges;
    let rows = lattice::inclusive_count(ur[0], ur[1], rate);
    let cols = lattice::inclusive_count(vr[0], vr[1], rate);

    let mut points = Vec::with_capacity(rows * cols);
    for u in lattice::inclusive(ur[0], ur[1], rate) {
        let u = round_to(u, SAMPLE_DECIMALS);
        for v in lattice::inclusive(vr[0], vr[1], rate) {
            let v = round_to(v, SAMPLE_DECIMALS);
            points.push(surface.point_at(u, v));
        }
    }
    debug!("sampled surface grid {rows}x{cols} at rate {rate}");
    SampleGrid::from_points(rows, cols, points)
}

/// Closed boundary loop of the parameter rectangle, `[s1, s2, s3, s4]`:
///
/// ```text
///            s1
///    ------>---------->---
///   |                     |
///   ^                     v
/// s4|                     |s2
///   ^                     v
///   |                     |
///    -------<-------<-----
///            s3
/// ```
///
/// `s1` advances `u` at `v_min`, `s2` advances `v` at `u_max`, `s3` retreats
/// `u` at `v_max` and `s4` retreats `v` at `u_min`. Corners are shared by two
/// edges and appear twice, giving zero-length segments that contribute
/// nothing to the circulation.
pub fn boundary_curve(surface: &dyn Surface, uv_ranges: [[f64; 2]; 2], rate: f64) -> BoundaryCurve {
    let [ur, vr] = uv_ranges;
    let us = lattice::inclusive(ur[0], ur[1], rate);
    let vs = lattice::inclusive(vr[0], vr[1], rate);

    let mut s1 = Vec::new();
    let mut s2 = Vec::new();
    let mut s3 = Vec::new();
    let mut s4 = Vec::new();
    for u in us {
        s1.push(surface.point_at(u, vr[0]));
        s3.push(surface.point_at(u, vr[1]));
    }
    for v in vs {
        s2.push(surface.point_at(ur[1], v));
        s4.push(surface.point_at(ur[0], v));
    }
    s3.reverse();
    s4.reverse();

    let mut points = Vec::with_capacity(s1.len() + s2.len() + s3.len() + s4.len());
    points.extend(s1);
    points.extend(s2);
    points.extend(s3);
    points.extend(s4);
    debug!("boundary curve with {} points at rate {rate}", points.len());
    BoundaryCurve::new(points)
}

/// Circulation `sum F(p_i) . (p_{i+1} - p_i)` around the closed `curve`.
///
/// Left-endpoint Riemann sum of the line integral; the last segment wraps
/// back to the first point.
pub fn boundary_integral(field: &dyn Field, curve: &BoundaryCurve) -> f64 {
    let mut integral = 0.0;
    for segment in curve.segments() {
        let tangent = vector::sub(segment.end, segment.start);
        integral += vector::dot(field.vector_at(segment.start), tangent);
    }
    debug!("boundary integral over {} points: {integral}", curve.len());
    integral
}

/// Flux of `curl F` through `surface`, as a Riemann sum over square cells of
/// side `rate` covering `[u_min, u_max) x [v_min, v_max)`.
///
/// The curl is evaluated at the image of the cell center
/// `(u + rate/2, v + rate/2)`; the unnormalized normal is taken at the cell
/// corner `(u, v)`. Each cell adds `(curl . normal) * rate^2`.
///
/// The returned normals (cell point to point plus half a unit normal) are for
/// drawing only and do not enter the sum. A degenerate normal yields a NaN
/// segment there.
pub fn curl_integral(
    surface: &dyn Surface,
    field: &dyn Field,
    uv_ranges: [[f64; 2]; 2],
    rate: f64,
) -> CurlIntegral {
    let [ur, vr] = uv_ranges;
    let half = rate / 2.0;
    let cell_area = rate * rate;

    let mut integral = 0.0;
    let mut normals = Vec::new();
    for u in lattice::half_open(ur[0], ur[1], rate) {
        for v in lattice::half_open(vr[0], vr[1], rate) {
            let cartesian = surface.point_at(u + half, v + half);
            let curl = field.curl_at(cartesian);
            let normal = surface.normal_at(u, v);

            let marker = normal / (vector::norm(normal) * 2.0);
            normals.push(Segment::new(cartesian, vector::add(cartesian, marker)));

            let flux = vector::dot(curl, normal);
            integral += flux * cell_area;
        }
    }
    debug!("curl integral over {} cells: {integral}", normals.len());
    CurlIntegral {
        value: integral,
        normals,
    }
}
