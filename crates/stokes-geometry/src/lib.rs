//! Stokes visualizer geometry: vector fields, parametric surfaces, and the
//! two numerical integrals compared by Stokes' theorem.

pub mod field;
pub mod integrate;
pub mod lattice;
pub mod sample;
pub mod surface;

pub use field::{Field, VectorField};
pub use integrate::{boundary_curve, boundary_integral, curl_integral, sample_surface};
pub use sample::{BoundaryCurve, CurlIntegral, SampleGrid, Segment};
pub use surface::{ParametricSurface, Surface};
