//! Visualizer configuration.
//!
//! Every field has a default matching the interactive viewer, so a JSON file
//! only needs to name the values it overrides.

use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{Result, StokesError};
use crate::traits::Validate;

/// Parameter rectangle `[[u_min, u_max], [v_min, v_max]]`.
pub type UvRanges = [[f64; 2]; 2];

/// Lattice used to draw the vector field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldSampling {
    /// Cube `[min, max]^3` sampled along each axis.
    pub range: [f64; 2],
    /// Lattice points per unit length; the step is `1 / density`.
    pub density: f64,
    /// Multiplier applied to drawn field vectors.
    pub scale: f64,
}

impl Default for FieldSampling {
    fn default() -> Self {
        Self {
            range: [-20.0, 20.0],
            density: 0.2,
            scale: 0.04,
        }
    }
}

/// Orbit camera settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Orbit radius at zero zoom.
    pub max_radius: f64,
    /// Radians of orbit per pixel of mouse drag.
    pub drag_sensitivity: f64,
    /// Vertical field of view in radians.
    pub fov_y: f64,
    pub near: f64,
    pub far: f64,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            max_radius: 60.0,
            drag_sensitivity: 0.005,
            fov_y: std::f64::consts::FRAC_PI_4,
            near: 0.1,
            far: 200.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StokesConfig {
    pub uv_ranges: UvRanges,
    /// Step of the drawn surface grid.
    pub surface_rate: f64,
    /// Cell size of the curl-flux surface integral.
    pub integral_rate: f64,
    /// Step of the boundary curve used for the circulation.
    pub boundary_rate: f64,
    pub field: FieldSampling,
    pub camera: CameraConfig,
}

impl Default for StokesConfig {
    fn default() -> Self {
        Self {
            uv_ranges: [[-4.0, 4.0], [-4.0, 4.0]],
            surface_rate: 0.1,
            integral_rate: 0.2,
            boundary_rate: 0.02,
            field: FieldSampling::default(),
            camera: CameraConfig::default(),
        }
    }
}

impl StokesConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a JSON config file.
    pub fn load(path: &Path) -> Result<Self> {
        debug!("loading config from {}", path.display());
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn check_positive(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(StokesError::Config(format!(
            "{name} must be a positive finite number, got {value}"
        )))
    }
}

fn check_range(name: &str, range: [f64; 2]) -> Result<()> {
    let [min, max] = range;
    if min.is_finite() && max.is_finite() && min <= max {
        Ok(())
    } else {
        Err(StokesError::Config(format!(
            "{name} must be a finite [min, max] interval, got [{min}, {max}]"
        )))
    }
}

impl Validate for StokesConfig {
    fn validate(&self) -> Result<()> {
        check_range("uv_ranges[0]", self.uv_ranges[0])?;
        check_range("uv_ranges[1]", self.uv_ranges[1])?;
        check_positive("surface_rate", self.surface_rate)?;
        check_positive("integral_rate", self.integral_rate)?;
        check_positive("boundary_rate", self.boundary_rate)?;
        check_range("field.range", self.field.range)?;
        check_positive("field.density", self.field.density)?;
        if !self.field.scale.is_finite() {
            return Err(StokesError::Config(format!(
                "field.scale must be finite, got {}",
                self.field.scale
            )));
        }
        check_positive("camera.max_radius", self.camera.max_radius)?;
        check_positive("camera.fov_y", self.camera.fov_y)?;
        check_positive("camera.near", self.camera.near)?;
        if self.camera.far <= self.camera.near {
            return Err(StokesError::Config(format!(
                "camera.far ({}) must exceed camera.near ({})",
                self.camera.far, self.camera.near
            )));
        }
        Ok(())
    }
}
