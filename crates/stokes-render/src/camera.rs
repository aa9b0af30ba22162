use serde::Serialize;
use stokes_core::CameraConfig;
use stokes_math::{Point3, Vector3};

/// Camera state handed to a frontend along with a frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CameraView {
    pub eye: Point3,
    pub target: Point3,
    pub up: Vector3,
    /// Row-major look-at matrix.
    pub view: [[f64; 4]; 4],
    /// Row-major perspective matrix.
    pub projection: [[f64; 4]; 4],
    pub view_projection: [[f64; 4]; 4],
}

/// Perspective camera orbiting the origin on a sphere.
///
/// The position is driven by two angles: `azimuth` around the vertical axis
/// and `elevation` above the horizontal plane. The radius shrinks as the
/// zoom level grows.
#[derive(Debug, Clone)]
pub struct OrbitCamera {
    pub azimuth: f64,
    pub elevation: f64,
    pub radius: f64,
    pub max_radius: f64,
    pub target: Point3,
    pub up: Vector3,
    pub fov_y: f64,  // vertical FOV in radians
    pub aspect: f64, // width/height
    pub near: f64,
    pub far: f64,
}

impl OrbitCamera {
    /// Camera at zero zoom looking at the origin from `+z`.
    pub fn new(config: &CameraConfig, aspect: f64) -> Self {
        Self {
            azimuth: 0.0,
            elevation: 0.0,
            radius: config.max_radius,
            max_radius: config.max_radius,
            target: Point3::ZERO,
            up: Vector3::Y,
            fov_y: config.fov_y,
            aspect,
            near: config.near,
            far: config.far,
        }
    }

    /// `radius * (sin a cos b, sin b, cos a cos b)` for azimuth `a` and
    /// elevation `b`.
    pub fn eye(&self) -> Point3 {
        let (a, b) = (self.azimuth, self.elevation);
        self.target
            + Vector3::new(
                self.radius * a.sin() * b.cos(),
                self.radius * b.sin(),
                self.radius * a.cos() * b.cos(),
            )
    }

    /// Rotate around the target. Deltas are in radians.
    pub fn orbit(&mut self, delta_azimuth: f64, delta_elevation: f64) {
        self.azimuth += delta_azimuth;
        self.elevation += delta_elevation;
    }

    /// Move closer by `zoom` units from the outermost radius.
    pub fn set_zoom(&mut self, zoom: f64) {
        self.radius = self.max_radius - zoom;
    }

    /// Compute the view matrix (look-at matrix) in row-major format.
    pub fn view_matrix(&self) -> [[f64; 4]; 4] {
        let eye = self.eye();
        let forward = (self.target - eye).normalize();
        let right = forward.cross(self.up).normalize();
        let up = right.cross(forward);

        // Camera looks down -Z in view space
        let f = -forward;

        let mut mat = [[0.0; 4]; 4];
        mat[0] = [right.x, right.y, right.z, -right.dot(eye)];
        mat[1] = [up.x, up.y, up.z, -up.dot(eye)];
        mat[2] = [f.x, f.y, f.z, -f.dot(eye)];
        mat[3] = [0.0, 0.0, 0.0, 1.0];
        mat
    }

    /// Compute the perspective projection matrix in row-major format.
    /// Uses OpenGL-style NDC (-1 to 1 for Z).
    pub fn projection_matrix(&self) -> [[f64; 4]; 4] {
        let f = 1.0 / (self.fov_y / 2.0).tan();

        let mut mat = [[0.0; 4]; 4];
        mat[0][0] = f / self.aspect;
        mat[1][1] = f;
        mat[2][2] = (self.far + self.near) / (self.near - self.far);
        mat[2][3] = (2.0 * self.far * self.near) / (self.near - self.far);
        mat[3][2] = -1.0;
        mat
    }

    pub fn view_projection(&self) -> [[f64; 4]; 4] {
        multiply_matrices(&self.projection_matrix(), &self.view_matrix())
    }

    /// Snapshot of the current viewpoint.
    pub fn view(&self) -> CameraView {
        let view = self.view_matrix();
        let projection = self.projection_matrix();
        CameraView {
            eye: self.eye(),
            target: self.target,
            up: self.up,
            view,
            projection,
            view_projection: multiply_matrices(&projection, &view),
        }
    }
}

/// Multiply two 4x4 matrices (row-major).
fn multiply_matrices(a: &[[f64; 4]; 4], b: &[[f64; 4]; 4]) -> [[f64; 4]; 4] {
    let mut result = [[0.0; 4]; 4];
    for i in 0..4 {
        for j in 0..4 {
            result[i][j] = (0..4).map(|k| a[i][k] * b[k][j]).sum();
        }
    }
    result
}

/// Mouse drag tracking for the orbit camera.
///
/// Accumulates the pointer movement made while a button is held and hands
/// it out once through [`DragState::take_delta`].
#[derive(Debug, Clone, Default)]
pub struct DragState {
    grabbing: bool,
    last: (f64, f64),
    delta: (f64, f64),
}

impl DragState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_grabbing(&self) -> bool {
        self.grabbing
    }

    pub fn press(&mut self, x: f64, y: f64) {
        self.grabbing = true;
        self.last = (x, y);
    }

    /// Record a pointer move. Horizontal motion is inverted so dragging right
    /// turns the scene right.
    pub fn move_to(&mut self, x: f64, y: f64) {
        if self.grabbing {
            self.delta.0 -= x - self.last.0;
            self.delta.1 += y - self.last.1;
        }
        self.last = (x, y);
    }

    pub fn release(&mut self) {
        self.grabbing = false;
        self.delta = (0.0, 0.0);
    }

    /// Movement since the last call, in pixels.
    pub fn take_delta(&mut self) -> (f64, f64) {
        std::mem::take(&mut self.delta)
    }
}
