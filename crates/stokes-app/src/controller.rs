//! Orchestration of one visualizer session.
//!
//! The controller holds the active surface and field, recomputes the samples
//! and both integrals when the formulas change, and replays the result into a
//! [`DrawTarget`] every frame.

use log::{debug, info, warn};
use stokes_core::traits::Validate;
use stokes_core::{Result, StokesConfig, Tolerance};
use stokes_geometry::{BoundaryCurve, ParametricSurface, SampleGrid, Segment, VectorField};
use stokes_render::{DragState, DrawTarget, OrbitCamera, Rgba};

use crate::equation::EquationDisplay;
use crate::inputs::{compile_formulas, FormulaSet};

pub const FIELD_VECTOR_COLOR: Rgba = [0.0, 0.0, 0.0, 0.8];
pub const NORMAL_COLOR: Rgba = [0.4, 0.4, 0.7, 0.7];
pub const BOUNDARY_COLOR: Rgba = [1.0, 0.0, 0.0, 1.0];

/// Arrow tip size for field vectors.
pub const DEFAULT_TIP: f64 = 0.25;
/// Arrow tip size for surface normals.
pub const NORMAL_TIP: f64 = 0.15;

/// Zoom used when the requested level is not a positive number.
const FALLBACK_ZOOM: f64 = 1.0;

/// Both sides of Stokes' theorem for the current inputs.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StokesResult {
    /// Flux of the curl through the surface.
    pub surface_integral: f64,
    /// Circulation of the field around the boundary.
    pub boundary_integral: f64,
}

impl StokesResult {
    pub fn difference(&self) -> f64 {
        self.surface_integral - self.boundary_integral
    }

    /// Whether the two integrals match within `tolerance`.
    pub fn agrees(&self, tolerance: Tolerance) -> bool {
        tolerance.approx_eq(self.surface_integral, self.boundary_integral)
    }
}

/// Everything drawn for the current inputs.
#[derive(Debug, Clone, Default)]
pub struct Visualization {
    pub grid: SampleGrid,
    pub vectors: Vec<Segment>,
    pub normals: Vec<Segment>,
    pub boundary: BoundaryCurve,
}

pub struct StokesController {
    config: StokesConfig,
    formulas: FormulaSet,
    surface: ParametricSurface,
    field: VectorField,
    visuals: Visualization,
    result: StokesResult,
    camera: OrbitCamera,
}

impl StokesController {
    /// Controller over the default torus and field.
    pub fn new(config: StokesConfig) -> Result<Self> {
        Self::with_formulas(config, FormulaSet::default())
    }

    pub fn with_formulas(config: StokesConfig, formulas: FormulaSet) -> Result<Self> {
        config.validate()?;
        let (surface, field) = compile_formulas(&formulas)?;
        let camera = OrbitCamera::new(&config.camera, 1.0);
        Ok(Self {
            config,
            formulas,
            surface,
            field,
            visuals: Visualization::default(),
            result: StokesResult::default(),
            camera,
        })
    }

    pub fn config(&self) -> &StokesConfig {
        &self.config
    }

    pub fn formulas(&self) -> &FormulaSet {
        &self.formulas
    }

    pub fn surface(&self) -> &ParametricSurface {
        &self.surface
    }

    pub fn field(&self) -> &VectorField {
        &self.field
    }

    pub fn visuals(&self) -> &Visualization {
        &self.visuals
    }

    pub fn result(&self) -> StokesResult {
        self.result
    }

    pub fn camera(&self) -> &OrbitCamera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut OrbitCamera {
        &mut self.camera
    }

    /// Switch to `formulas` if they compile; otherwise keep the current
    /// surface and field. Returns whether the switch happened.
    pub fn apply_formulas(&mut self, formulas: &FormulaSet) -> bool {
        match compile_formulas(formulas) {
            Ok((surface, field)) => {
                self.surface = surface;
                self.field = field;
                self.formulas = formulas.clone();
                true
            }
            Err(e) => {
                warn!("Error in inputs, using previous values: {e}");
                false
            }
        }
    }

    /// Recompute the surface grid and the field vectors.
    pub fn sample(&mut self) {
        let field = &self.config.field;
        self.visuals.grid = self.surface.sample(self.config.uv_ranges, self.config.surface_rate);
        self.visuals.vectors = self.field.sample(field.range, field.density, field.scale);
    }

    /// Evaluate both integrals and keep the normals and boundary for drawing.
    pub fn calculate_stokes(&mut self) -> StokesResult {
        let uv = self.config.uv_ranges;
        let flux = self.surface.curl_integral(&self.field, uv, self.config.integral_rate);
        let boundary = self.surface.boundary_curve(uv, self.config.boundary_rate);
        let circulation = self.surface.boundary_integral(&self.field, &boundary);

        self.visuals.normals = flux.normals;
        self.visuals.boundary = boundary;
        self.result = StokesResult {
            surface_integral: flux.value,
            boundary_integral: circulation,
        };
        debug!(
            "surface integral {} / boundary integral {}",
            self.result.surface_integral, self.result.boundary_integral
        );
        self.result
    }

    /// Full refresh after an input edit.
    pub fn change_visuals(&mut self, formulas: &FormulaSet, display: &mut dyn EquationDisplay) -> StokesResult {
        info!("input edit: curve {:?}, field {:?}", formulas.curve, formulas.field);
        self.apply_formulas(formulas);
        self.refresh(display)
    }

    /// Resample and recompute with the current formulas.
    pub fn refresh(&mut self, display: &mut dyn EquationDisplay) -> StokesResult {
        self.sample();
        let result = self.calculate_stokes();
        display.update(&self.formulas, &result);
        result
    }

    /// Replay the current visualization as seen from the camera.
    pub fn draw(&self, target: &mut dyn DrawTarget) {
        target.set_camera(&self.camera);
        target.draw_axes();
        target.draw_surface(&self.visuals.grid);
        target.draw_vectors(&self.visuals.vectors, FIELD_VECTOR_COLOR, DEFAULT_TIP, DEFAULT_TIP);
        target.draw_vectors(&self.visuals.normals, NORMAL_COLOR, NORMAL_TIP, NORMAL_TIP);
        target.draw_points(&self.visuals.boundary.points, BOUNDARY_COLOR);
    }

    /// Turn pending mouse movement into camera orbit.
    pub fn handle_drag(&mut self, drag: &mut DragState) {
        let (dx, dy) = drag.take_delta();
        let sensitivity = self.config.camera.drag_sensitivity;
        self.camera.orbit(dx * sensitivity, dy * sensitivity);
    }

    /// Zoom levels that are not positive numbers fall back to 1.
    pub fn set_zoom(&mut self, zoom: f64) {
        let zoom = if zoom.is_nan() || zoom <= 0.0 { FALLBACK_ZOOM } else { zoom };
        self.camera.set_zoom(zoom);
    }
}

impl std::fmt::Debug for StokesController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StokesController")
            .field("formulas", &self.formulas)
            .field("result", &self.result)
            .finish_non_exhaustive()
    }
}
