//! User formulas for the surface and the field.
//!
//! Formulas are plain infix expressions in the syntax of `meval`
//! (`3 * sin(v)`, `x^2 + y`, `exp(-z)`), over `u, v` for the surface and
//! `x, y, z` for the field.

use log::debug;
use meval::Expr;
use stokes_core::{Result, StokesError};
use stokes_geometry::{ParametricSurface, VectorField};

const AXES: [&str; 3] = ["x", "y", "z"];

/// Source text of the six component formulas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormulaSet {
    /// `R(u, v)` components.
    pub curve: [String; 3],
    /// `F(x, y, z)` components.
    pub field: [String; 3],
}

impl FormulaSet {
    pub fn new(curve: [&str; 3], field: [&str; 3]) -> Self {
        Self {
            curve: curve.map(str::to_owned),
            field: field.map(str::to_owned),
        }
    }
}

impl Default for FormulaSet {
    /// Torus with tube radius 3 around a circle of radius 8, in the field
    /// `(x, y + z, z)`.
    fn default() -> Self {
        Self::new(
            ["3 * sin(v)", "(8 + 3 * cos(v)) * sin(u)", "(8 + 3 * cos(v)) * cos(u)"],
            ["x", "y + z", "z"],
        )
    }
}

/// Compile all six formulas into a surface and a field.
///
/// A formula that does not parse or uses a variable other than its own
/// parameters is an [`StokesError::Expression`]. Singular formulas such as
/// `1 / x` compile; their NaN and infinite values flow through sampling and
/// both integrals unchanged. Every component is evaluated once at the origin
/// and a non-finite value there is logged.
pub fn compile_formulas(formulas: &FormulaSet) -> Result<(ParametricSurface, VectorField)> {
    let [cx, cy, cz] = &formulas.curve;
    let surface = ParametricSurface::new(
        surface_component(AXES[0], cx)?,
        surface_component(AXES[1], cy)?,
        surface_component(AXES[2], cz)?,
    );

    let [fx, fy, fz] = &formulas.field;
    let field = VectorField::new(
        field_component(AXES[0], fx)?,
        field_component(AXES[1], fy)?,
        field_component(AXES[2], fz)?,
    );

    debug!("compiled formulas {:?} / {:?}", formulas.curve, formulas.field);
    Ok((surface, field))
}

fn parse(kind: &str, axis: &str, source: &str) -> Result<Expr> {
    source
        .parse::<Expr>()
        .map_err(|e| StokesError::Expression(format!("{kind} {axis} `{source}`: {e}")))
}

fn surface_component(axis: &str, source: &str) -> Result<impl Fn(f64, f64) -> f64 + 'static> {
    let f = parse("curve", axis, source)?
        .bind2("u", "v")
        .map_err(|e| StokesError::Expression(format!("curve {axis} `{source}`: {e}")))?;
    log_non_finite("curve", axis, source, f(0.0, 0.0));
    Ok(f)
}

fn field_component(axis: &str, source: &str) -> Result<impl Fn(f64, f64, f64) -> f64 + 'static> {
    let f = parse("field", axis, source)?
        .bind3("x", "y", "z")
        .map_err(|e| StokesError::Expression(format!("field {axis} `{source}`: {e}")))?;
    log_non_finite("field", axis, source, f(0.0, 0.0, 0.0));
    Ok(f)
}

fn log_non_finite(kind: &str, axis: &str, source: &str, value: f64) {
    if !value.is_finite() {
        debug!("{kind} {axis} `{source}` is {value} at the origin");
    }
}
