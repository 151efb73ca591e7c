use nalgebra::Point3;
use tracing::debug;

use crate::depth_pipeline::analysis::types::TerrainAnalysis;
use crate::depth_pipeline::geometry::QuadMesh;

/// Auxiliary geometry emitted by the mesh analyses.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisGeometry {
    /// Polyline segments tracing one elevation level across the mesh
    Contour {
        level: f64,
        segments: Vec<[Point3<f64>; 2]>,
    },
    /// Planar water surface spanning the mesh footprint
    WaterSurface {
        level: f64,
        corners: [Point3<f64>; 4],
    },
}

/// Runs every active mesh analysis against the finished mesh, appending
/// results in selection order. An empty selection yields an empty list.
pub fn run_terrain_analyses(
    mesh: &QuadMesh,
    analyses: &[TerrainAnalysis],
) -> Vec<AnalysisGeometry> {
    let mut geometry = Vec::new();
    for analysis in analyses {
        match *analysis {
            TerrainAnalysis::Contours { interval } => {
                geometry.extend(contour_lines(mesh, interval));
            }
            TerrainAnalysis::WaterLevel { level } => {
                geometry.extend(water_surface(mesh, level));
            }
        }
    }
    geometry
}

/// Slices the mesh at every multiple of `interval` inside its z-range.
///
/// Each quad face contributes a segment wherever the level crosses a pair
/// of its edges; four crossings (a saddle) contribute two segments. Levels
/// with no crossings are dropped.
pub fn contour_lines(mesh: &QuadMesh, interval: f64) -> Vec<AnalysisGeometry> {
    if interval <= f64::EPSILON {
        return Vec::new();
    }
    let Some((min_z, max_z)) = mesh.z_bounds() else {
        return Vec::new();
    };

    let first = (min_z / interval).ceil() as i64;
    let last = (max_z / interval).floor() as i64;
    let mut contours = Vec::new();

    for step in first..=last {
        let level = step as f64 * interval;
        let mut segments = Vec::new();

        for face in &mesh.faces {
            let mut crossings: Vec<Point3<f64>> = Vec::with_capacity(4);
            for edge in 0..4 {
                let a = mesh.vertices[face[edge] as usize];
                let b = mesh.vertices[face[(edge + 1) % 4] as usize];
                if (a.z - level) * (b.z - level) < 0.0 {
                    let t = (level - a.z) / (b.z - a.z);
                    crossings.push(Point3::new(
                        a.x + (b.x - a.x) * t,
                        a.y + (b.y - a.y) * t,
                        level,
                    ));
                }
            }
            match crossings.len() {
                2 => segments.push([crossings[0], crossings[1]]),
                4 => {
                    segments.push([crossings[0], crossings[1]]);
                    segments.push([crossings[2], crossings[3]]);
                }
                _ => {}
            }
        }

        if !segments.is_empty() {
            contours.push(AnalysisGeometry::Contour { level, segments });
        }
    }

    debug!(levels = contours.len(), interval, "contour slicing complete");
    contours
}

/// Planar rectangle at the water level, clipped to the mesh footprint.
pub fn water_surface(mesh: &QuadMesh, level: f64) -> Option<AnalysisGeometry> {
    let (min, max) = mesh.xy_bounds()?;
    Some(AnalysisGeometry::WaterSurface {
        level,
        corners: [
            Point3::new(min[0], min[1], level),
            Point3::new(max[0], min[1], level),
            Point3::new(max[0], max[1], level),
            Point3::new(min[0], max[1], level),
        ],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::depth_pipeline::analysis::Color;

    /// 3x3 point grid sloping up along x: z = col * 10 + 5.
    fn sloped_mesh() -> QuadMesh {
        let mut mesh = QuadMesh::new();
        for row in 0..3 {
            for col in 0..3 {
                mesh.vertices
                    .push(Point3::new(col as f64, row as f64, col as f64 * 10.0 + 5.0));
            }
        }
        mesh.colors = vec![Color::NEUTRAL; 9];
        mesh.faces = vec![[0, 1, 4, 3], [1, 2, 5, 4], [3, 4, 7, 6], [4, 5, 8, 7]];
        mesh
    }

    #[test]
    fn contours_slice_at_interval_multiples() {
        let geometry = contour_lines(&sloped_mesh(), 10.0);
        assert_eq!(geometry.len(), 2);

        let AnalysisGeometry::Contour { level, segments } = &geometry[0] else {
            panic!("expected contour");
        };
        assert!((level - 10.0).abs() < 1e-9);
        // One segment per face column crossed, two face rows.
        assert_eq!(segments.len(), 2);
        for segment in segments {
            for point in segment {
                assert!((point.z - 10.0).abs() < 1e-9);
                // z = 10 lies at x = 0.5 on the slope.
                assert!((point.x - 0.5).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn contours_on_flat_mesh_are_empty() {
        let mut mesh = sloped_mesh();
        for v in &mut mesh.vertices {
            v.z = 15.0;
        }
        assert!(contour_lines(&mesh, 10.0).is_empty());
    }

    #[test]
    fn degenerate_interval_yields_nothing() {
        assert!(contour_lines(&sloped_mesh(), 0.0).is_empty());
    }

    #[test]
    fn water_surface_spans_footprint_at_level() {
        let geometry = water_surface(&sloped_mesh(), 12.5).unwrap();
        let AnalysisGeometry::WaterSurface { level, corners } = geometry else {
            panic!("expected water surface");
        };
        assert!((level - 12.5).abs() < 1e-9);
        assert!(corners.iter().all(|c| (c.z - 12.5).abs() < 1e-9));
        assert!((corners[0].x - 0.0).abs() < 1e-9);
        assert!((corners[2].x - 2.0).abs() < 1e-9);
        assert!((corners[2].y - 2.0).abs() < 1e-9);
    }

    #[test]
    fn water_surface_of_empty_mesh_is_none() {
        assert!(water_surface(&QuadMesh::new(), 10.0).is_none());
    }

    #[test]
    fn analyses_compose_in_selection_order() {
        let mesh = sloped_mesh();
        let geometry = run_terrain_analyses(
            &mesh,
            &[
                TerrainAnalysis::WaterLevel { level: 12.0 },
                TerrainAnalysis::Contours { interval: 10.0 },
            ],
        );
        assert_eq!(geometry.len(), 3);
        assert!(matches!(geometry[0], AnalysisGeometry::WaterSurface { .. }));
        assert!(matches!(geometry[1], AnalysisGeometry::Contour { .. }));
    }

    #[test]
    fn empty_selection_yields_no_geometry() {
        assert!(run_terrain_analyses(&sloped_mesh(), &[]).is_empty());
    }
}
