//! Render-facing side of the Stokes visualizer.
//!
//! Turns sampled geometry into drawable primitives and records them in a
//! [`Scene`]. No GPU work happens here; a frontend consumes the scene.

pub mod arrow;
pub mod camera;
pub mod scene;
pub mod tessellate;

pub use arrow::{arrow_tip, ARROW_TIP_INDICES};
pub use camera::{CameraView, DragState, OrbitCamera};
pub use scene::{DrawTarget, Drawable, Rgba, Scene};
pub use tessellate::tessellate_grid;
