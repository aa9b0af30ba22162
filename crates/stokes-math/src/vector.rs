//! Small value-type operations on 3D triples.
//!
//! Every function takes its operands by value and returns a fresh vector;
//! nothing here mutates a shared triple.

use crate::Vector3;

#[inline]
pub fn add(a: Vector3, b: Vector3) -> Vector3 {
    a + b
}

#[inline]
pub fn sub(a: Vector3, b: Vector3) -> Vector3 {
    a - b
}

#[inline]
pub fn scale(v: Vector3, factor: f64) -> Vector3 {
    v * factor
}

#[inline]
pub fn dot(a: Vector3, b: Vector3) -> f64 {
    a.dot(b)
}

/// Right-handed cross product.
#[inline]
pub fn cross(a: Vector3, b: Vector3) -> Vector3 {
    a.cross(b)
}

/// Euclidean length. Callers dividing by it must guard the zero case.
#[inline]
pub fn norm(v: Vector3) -> f64 {
    v.length()
}

/// Round `n` to `decimals` places, halves away from zero.
///
/// The shift goes through the decimal representation rather than a
/// multiplication, so `round_to(1.005, 2)` is `1.01` and not `1.0`.
/// Non-finite input is returned unchanged.
pub fn round_to(n: f64, decimals: u32) -> f64 {
    if !n.is_finite() {
        return n;
    }
    let shifted = format!("{n}e{decimals}")
        .parse::<f64>()
        .unwrap_or_else(|_| n * 10f64.powi(decimals as i32));
    let rounded = shifted.round();
    format!("{rounded}e-{decimals}")
        .parse::<f64>()
        .unwrap_or_else(|_| rounded / 10f64.powi(decimals as i32))
}
