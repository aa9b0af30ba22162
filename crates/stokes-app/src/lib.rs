//! Stokes' theorem visualizer session: formula input, sampling, both
//! integrals, equation display and drawing.

pub mod cli;
pub mod controller;
pub mod equation;
pub mod inputs;

pub use controller::{StokesController, StokesResult, Visualization};
pub use equation::{EquationDisplay, LatexEquations};
pub use inputs::{compile_formulas, FormulaSet};
