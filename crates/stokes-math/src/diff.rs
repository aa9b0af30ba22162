//! Finite-difference derivatives.
//!
//! The default estimate is a one-sided forward difference with the fixed
//! step [`EPS`]. It is first-order accurate and biased in the direction of
//! the step; [`central_partial_derivative`] is the second-order alternative
//! for callers that need it.

use std::ops::{Div, Sub};

/// Forward-difference step: machine epsilon scaled up by 120.
///
/// Small enough to keep truncation error negligible for smooth functions,
/// large enough that `x + EPS != x` for arguments of moderate magnitude.
pub const EPS: f64 = f64::EPSILON * 120.0;

/// Central-difference step, `cbrt(f64::EPSILON)`.
pub const CENTRAL_EPS: f64 = 6.055_454_452_393_343e-6;

/// Output of a differentiable function: a scalar or a vector, with
/// subtraction and division by a step applied component-wise.
pub trait Difference: Copy + Sub<Output = Self> + Div<f64, Output = Self> {}

impl<T> Difference for T where T: Copy + Sub<Output = T> + Div<f64, Output = T> {}

/// Forward-difference derivative of a one-variable function at `x`.
pub fn derivative<T, F>(f: F, x: f64) -> T
where
    T: Difference,
    F: Fn(f64) -> T,
{
    (f(x + EPS) - f(x)) / EPS
}

/// Forward-difference partial derivative of `f` along `axis` at `point`.
///
/// `f` may be scalar-valued (`f64`) or vector-valued (`DVec3`).
///
/// # Panics
/// Panics if `axis >= N`.
pub fn partial_derivative<const N: usize, T, F>(f: F, point: [f64; N], axis: usize) -> T
where
    T: Difference,
    F: Fn([f64; N]) -> T,
{
    let mut shifted = point;
    shifted[axis] += EPS;
    (f(shifted) - f(point)) / EPS
}

/// Central-difference partial derivative of `f` along `axis` at `point`.
///
/// Second-order accurate and unbiased, at the cost of one extra evaluation.
///
/// # Panics
/// Panics if `axis >= N`.
pub fn central_partial_derivative<const N: usize, T, F>(f: F, point: [f64; N], axis: usize) -> T
where
    T: Difference,
    F: Fn([f64; N]) -> T,
{
    let mut ahead = point;
    let mut behind = point;
    ahead[axis] += CENTRAL_EPS;
    behind[axis] -= CENTRAL_EPS;
    (f(ahead) - f(behind)) / (2.0 * CENTRAL_EPS)
}
