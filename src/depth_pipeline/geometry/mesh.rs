use std::collections::VecDeque;

use nalgebra::Point3;
use tracing::debug;

use crate::depth_pipeline::analysis::Color;

/// Grid mesh with one quadrilateral face per 2x2 block of adjacent points.
///
/// Faces index into `vertices`/`colors` counter-clockwise. For a grid of
/// `width x height` points there are `(width-1) * (height-1)` faces.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct QuadMesh {
    pub vertices: Vec<Point3<f64>>,
    pub colors: Vec<Color>,
    pub faces: Vec<[u32; 4]>,
}

impl QuadMesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Min/max z over all vertices, `None` for an empty mesh.
    pub fn z_bounds(&self) -> Option<(f64, f64)> {
        if self.vertices.is_empty() {
            return None;
        }
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for v in &self.vertices {
            min = min.min(v.z);
            max = max.max(v.z);
        }
        Some((min, max))
    }

    /// Axis-aligned footprint in the xy plane, `None` for an empty mesh.
    pub fn xy_bounds(&self) -> Option<([f64; 2], [f64; 2])> {
        if self.vertices.is_empty() {
            return None;
        }
        let mut min = [f64::INFINITY; 2];
        let mut max = [f64::NEG_INFINITY; 2];
        for v in &self.vertices {
            min[0] = min[0].min(v.x);
            min[1] = min[1].min(v.y);
            max[0] = max[0].max(v.x);
            max[1] = max[1].max(v.y);
        }
        Some((min, max))
    }
}

/// Builds the per-tick mesh, reusing the previous tick's topology where the
/// grid dimensions are unchanged, and maintains the bounded snapshot
/// history.
///
/// With `keep_frames <= 1` there is a single owned mesh mutated in place;
/// with `keep_frames > 1` independent snapshots go into a bounded deque,
/// newest first. History entries never alias the current mesh.
#[derive(Debug, Default)]
pub struct MeshBuilder {
    current: QuadMesh,
    history: VecDeque<QuadMesh>,
}

impl MeshBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds or updates the mesh from this tick's points and colors and
    /// returns the output list, newest first.
    pub fn build(
        &mut self,
        points: Vec<Point3<f64>>,
        colors: Vec<Color>,
        width: usize,
        height: usize,
        keep_frames: usize,
    ) -> Vec<QuadMesh> {
        let expected_faces = if width >= 2 && height >= 2 {
            (width - 1) * (height - 1)
        } else {
            0
        };

        if self.current.faces.len() != expected_faces
            || self.current.vertices.len() != points.len()
        {
            debug!(width, height, faces = expected_faces, "rebuilding mesh topology");
            self.current.faces = grid_faces(width, height);
        }

        self.current.vertices = points;
        self.current.colors = colors;

        if keep_frames <= 1 {
            self.history.clear();
            return vec![self.current.clone()];
        }

        self.history.push_front(self.current.clone());
        self.history.truncate(keep_frames);
        self.history.iter().cloned().collect()
    }
}

/// Face indices for a `width x height` point grid, row-major, each face
/// wound counter-clockwise starting at its top-left point.
fn grid_faces(width: usize, height: usize) -> Vec<[u32; 4]> {
    if width < 2 || height < 2 {
        return Vec::new();
    }
    let mut faces = Vec::with_capacity((width - 1) * (height - 1));
    for row in 0..height - 1 {
        for col in 0..width - 1 {
            let i = (row * width + col) as u32;
            let w = width as u32;
            faces.push([i, i + 1, i + w + 1, i + w]);
        }
    }
    faces
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_points(width: usize, height: usize, z: f64) -> Vec<Point3<f64>> {
        let mut points = Vec::new();
        for row in 0..height {
            for col in 0..width {
                points.push(Point3::new(col as f64, row as f64, z));
            }
        }
        points
    }

    fn grey(n: usize) -> Vec<Color> {
        vec![Color::NEUTRAL; n]
    }

    #[test]
    fn face_count_matches_grid_dimensions() {
        let mut builder = MeshBuilder::new();
        let meshes = builder.build(grid_points(4, 3, 0.0), grey(12), 4, 3, 1);
        assert_eq!(meshes.len(), 1);
        assert_eq!(meshes[0].face_count(), 6);
        assert_eq!(meshes[0].vertex_count(), 12);
    }

    #[test]
    fn topology_survives_stable_dimensions() {
        let mut builder = MeshBuilder::new();
        let first = builder.build(grid_points(4, 3, 0.0), grey(12), 4, 3, 1);
        let second = builder.build(grid_points(4, 3, 5.0), grey(12), 4, 3, 1);
        assert_eq!(first[0].faces, second[0].faces);
        assert!((second[0].vertices[0].z - 5.0).abs() < 1e-9);
    }

    #[test]
    fn dimension_change_rebuilds_topology() {
        let mut builder = MeshBuilder::new();
        builder.build(grid_points(4, 3, 0.0), grey(12), 4, 3, 1);
        let meshes = builder.build(grid_points(3, 3, 0.0), grey(9), 3, 3, 1);
        assert_eq!(meshes[0].face_count(), 4);
    }

    #[test]
    fn face_indices_are_counter_clockwise_grid_quads() {
        let faces = grid_faces(3, 2);
        assert_eq!(faces, vec![[0, 1, 4, 3], [1, 2, 5, 4]]);
    }

    #[test]
    fn history_is_bounded_and_newest_first() {
        let mut builder = MeshBuilder::new();
        for z in 0..5 {
            let meshes = builder.build(grid_points(2, 2, z as f64), grey(4), 2, 2, 3);
            assert!(meshes.len() <= 3);
            assert!((meshes[0].vertices[0].z - z as f64).abs() < 1e-9);
        }
        let meshes = builder.build(grid_points(2, 2, 9.0), grey(4), 2, 2, 3);
        assert_eq!(meshes.len(), 3);
        assert!((meshes[0].vertices[0].z - 9.0).abs() < 1e-9);
        assert!((meshes[1].vertices[0].z - 4.0).abs() < 1e-9);
    }

    #[test]
    fn keep_frames_one_discards_history() {
        let mut builder = MeshBuilder::new();
        builder.build(grid_points(2, 2, 0.0), grey(4), 2, 2, 3);
        builder.build(grid_points(2, 2, 1.0), grey(4), 2, 2, 3);
        let meshes = builder.build(grid_points(2, 2, 2.0), grey(4), 2, 2, 1);
        assert_eq!(meshes.len(), 1);
    }

    #[test]
    fn bounds_cover_all_vertices() {
        let mut mesh = QuadMesh::new();
        assert!(mesh.z_bounds().is_none());
        mesh.vertices = grid_points(3, 2, 4.0);
        mesh.vertices[0].z = -2.0;
        let (min_z, max_z) = mesh.z_bounds().unwrap();
        assert!((min_z - -2.0).abs() < 1e-9);
        assert!((max_z - 4.0).abs() < 1e-9);
        let (min_xy, max_xy) = mesh.xy_bounds().unwrap();
        assert_eq!(min_xy, [0.0, 0.0]);
        assert_eq!(max_xy, [2.0, 1.0]);
    }
}
