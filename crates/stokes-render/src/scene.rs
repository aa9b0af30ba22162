use std::path::Path;

use log::debug;
use serde::Serialize;
use stokes_core::Result;
use stokes_geometry::{SampleGrid, Segment};
use stokes_math::{Aabb3, Point3};

use crate::arrow::{arrow_tip, ARROW_TIP_INDICES};
use crate::camera::{CameraView, OrbitCamera};
use crate::tessellate::tessellate_grid;

/// Linear RGBA colour, each channel in `[0, 1]`.
pub type Rgba = [f32; 4];

/// Half-length of each drawn coordinate axis.
pub const AXIS_EXTENT: f64 = 50.0;
pub const AXIS_COLOR: Rgba = [0.8, 0.8, 0.8, 1.0];

/// One recorded draw call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Drawable {
    Lines { segments: Vec<Segment>, color: Rgba },
    /// Arrow heads: five vertices and [`ARROW_TIP_INDICES`] per tip, indices
    /// already offset into `vertices`.
    Tips {
        vertices: Vec<Point3>,
        indices: Vec<u32>,
        color: Rgba,
    },
    Mesh {
        vertices: Vec<Point3>,
        triangles: Vec<[u32; 3]>,
    },
    Points { points: Vec<Point3>, color: Rgba },
}

impl Drawable {
    /// Bounds of the finite points of this draw call.
    pub fn bounds(&self) -> Option<Aabb3> {
        match self {
            Drawable::Lines { segments, .. } => {
                Aabb3::from_points(segments.iter().flat_map(|s| [&s.start, &s.end]))
            }
            Drawable::Tips { vertices, .. } | Drawable::Mesh { vertices, .. } => {
                Aabb3::from_points(vertices)
            }
            Drawable::Points { points, .. } => Aabb3::from_points(points),
        }
    }
}

/// Sink for everything the visualizer draws.
pub trait DrawTarget {
    /// Viewpoint the frame is seen from.
    fn set_camera(&mut self, camera: &OrbitCamera);

    /// The three coordinate axes through the origin.
    fn draw_axes(&mut self);

    /// Triangulated surface from a sample grid.
    fn draw_surface(&mut self, grid: &SampleGrid);

    /// Arrows: one line per segment plus a pyramid tip at its end.
    fn draw_vectors(&mut self, vectors: &[Segment], color: Rgba, tip_width: f64, tip_height: f64);

    fn draw_points(&mut self, points: &[Point3], color: Rgba);
}

/// Frontend-agnostic record of a frame.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    pub camera: Option<CameraView>,
    pub drawables: Vec<Drawable>,
}

/// JSON layout of an exported scene.
#[derive(Serialize)]
struct SceneExport<'a> {
    bounds: Option<Aabb3>,
    camera: Option<&'a CameraView>,
    triangles: usize,
    drawables: &'a [Drawable],
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.drawables.clear();
    }

    pub fn len(&self) -> usize {
        self.drawables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drawables.is_empty()
    }

    /// Compute scene bounding box over every finite recorded point.
    pub fn bounds(&self) -> Option<Aabb3> {
        self.drawables
            .iter()
            .filter_map(Drawable::bounds)
            .reduce(|a, b| a.merge(&b))
    }

    /// Total triangle count across meshes and arrow tips
    pub fn total_triangles(&self) -> usize {
        self.drawables
            .iter()
            .map(|d| match d {
                Drawable::Mesh { triangles, .. } => triangles.len(),
                Drawable::Tips { indices, .. } => indices.len() / 3,
                _ => 0,
            })
            .sum()
    }

    /// Camera, bounds and draw calls as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        let export = SceneExport {
            bounds: self.bounds(),
            camera: self.camera.as_ref(),
            triangles: self.total_triangles(),
            drawables: &self.drawables,
        };
        Ok(serde_json::to_string_pretty(&export)?)
    }

    pub fn save_json(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_json()?)?;
        debug!("wrote scene with {} drawables to {}", self.len(), path.display());
        Ok(())
    }
}

impl DrawTarget for Scene {
    fn set_camera(&mut self, camera: &OrbitCamera) {
        self.camera = Some(camera.view());
    }

    fn draw_axes(&mut self) {
        let segments = [Point3::X, Point3::Y, Point3::Z]
            .into_iter()
            .map(|axis| Segment::new(axis * -AXIS_EXTENT, axis * AXIS_EXTENT))
            .collect();
        self.drawables.push(Drawable::Lines {
            segments,
            color: AXIS_COLOR,
        });
    }

    fn draw_surface(&mut self, grid: &SampleGrid) {
        let (vertices, triangles) = tessellate_grid(grid);
        self.drawables.push(Drawable::Mesh { vertices, triangles });
    }

    fn draw_vectors(&mut self, vectors: &[Segment], color: Rgba, tip_width: f64, tip_height: f64) {
        let mut vertices = Vec::with_capacity(vectors.len() * 5);
        let mut indices = Vec::with_capacity(vectors.len() * ARROW_TIP_INDICES.len());
        // Zero-length arrows have no direction to put a tip on
        for segment in vectors.iter().filter(|s| s.length() > 0.0) {
            let base = vertices.len() as u32;
            vertices.extend(arrow_tip(segment, tip_width, tip_height));
            indices.extend(ARROW_TIP_INDICES.iter().map(|i| base + i));
        }

        self.drawables.push(Drawable::Lines {
            segments: vectors.to_vec(),
            color,
        });
        self.drawables.push(Drawable::Tips {
            vertices,
            indices,
            color,
        });
    }

    fn draw_points(&mut self, points: &[Point3], color: Rgba) {
        self.drawables.push(Drawable::Points {
            points: points.to_vec(),
            color,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stokes_geometry::ParametricSurface;
    use stokes_math::dvec3;

    const RED: Rgba = [1.0, 0.0, 0.0, 1.0];

    #[test]
    fn test_axes_bounds() {
        let mut scene = Scene::new();
        scene.draw_axes();
        let bounds = scene.bounds().unwrap();
        assert_eq!(bounds.min, dvec3(-50.0, -50.0, -50.0));
        assert_eq!(bounds.max, dvec3(50.0, 50.0, 50.0));
    }

    #[test]
    fn test_surface_mesh() {
        let grid = ParametricSurface::new(|u, _| u, |_, v| v, |_, _| 0.0).sample([[0.0, 1.0], [0.0, 1.0]], 0.5);
        let mut scene = Scene::new();
        scene.draw_surface(&grid);
        assert_eq!(scene.len(), 1);
        assert_eq!(scene.total_triangles(), 8);
    }

    #[test]
    fn test_vectors_skip_tips_for_zero_length() {
        let vectors = [
            Segment::new(dvec3(0.0, 0.0, 0.0), dvec3(1.0, 0.0, 0.0)),
            Segment::new(dvec3(2.0, 2.0, 2.0), dvec3(2.0, 2.0, 2.0)),
        ];
        let mut scene = Scene::new();
        scene.draw_vectors(&vectors, RED, 0.25, 0.25);
        assert_eq!(scene.len(), 2);
        match &scene.drawables[1] {
            Drawable::Tips { vertices, indices, .. } => {
                assert_eq!(vertices.len(), 5);
                assert_eq!(indices.len(), 18);
                assert!(vertices.iter().all(|v| v.is_finite()));
            }
            other => panic!("expected tips, got {other:?}"),
        }
        match &scene.drawables[0] {
            Drawable::Lines { segments, .. } => assert_eq!(segments.len(), 2),
            other => panic!("expected lines, got {other:?}"),
        }
    }

    #[test]
    fn test_tip_indices_are_offset() {
        let vectors = [
            Segment::new(dvec3(0.0, 0.0, 0.0), dvec3(1.0, 0.0, 0.0)),
            Segment::new(dvec3(0.0, 0.0, 0.0), dvec3(0.0, 1.0, 0.0)),
        ];
        let mut scene = Scene::new();
        scene.draw_vectors(&vectors, RED, 0.25, 0.25);
        if let Drawable::Tips { indices, .. } = &scene.drawables[1] {
            assert_eq!(indices[18], ARROW_TIP_INDICES[0] + 5);
            assert!(indices.iter().all(|&i| i < 10));
        } else {
            panic!("expected tips");
        }
    }

    #[test]
    fn test_empty_scene_has_no_bounds() {
        assert!(Scene::new().bounds().is_none());
    }

    #[test]
    fn test_bounds_merge_drawables_and_skip_nan() {
        let mut scene = Scene::new();
        scene.draw_points(&[dvec3(1.0, 2.0, 3.0), dvec3(f64::NAN, 0.0, 0.0)], RED);
        scene.draw_vectors(&[Segment::new(dvec3(-1.0, 0.0, 0.0), dvec3(0.0, 0.0, -2.0))], RED, 0.0, 0.0);
        let bounds = scene.bounds().unwrap();
        assert_eq!(bounds.min, dvec3(-1.0, 0.0, -2.0));
        assert_eq!(bounds.max, dvec3(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_json_export() {
        let mut scene = Scene::new();
        scene.draw_points(&[dvec3(1.0, 2.0, 3.0)], RED);
        let json = scene.to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["drawables"][0]["kind"], "points");
        assert_eq!(value["drawables"][0]["points"][0][2], 3.0);
        assert_eq!(value["bounds"]["max"][1], 2.0);
        assert!(value["camera"].is_null());
    }

    #[test]
    fn test_json_export_carries_camera() {
        let mut camera = OrbitCamera::new(&stokes_core::CameraConfig::default(), 1.0);
        camera.set_zoom(20.0);
        let mut scene = Scene::new();
        scene.set_camera(&camera);
        let value: serde_json::Value = serde_json::from_str(&scene.to_json().unwrap()).unwrap();
        assert_eq!(value["camera"]["eye"][2], 40.0);
        assert_eq!(value["camera"]["view_projection"].as_array().unwrap().len(), 4);
    }
}
