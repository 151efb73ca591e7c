use nalgebra::Point3;

use crate::depth_pipeline::frame::DepthGrid;

/// Focal length X in pixels at the sensor's 640x480 reference resolution
pub const FOCAL_LENGTH_X_PX: f64 = 594.21;
/// Focal length Y in pixels at the sensor's 640x480 reference resolution
pub const FOCAL_LENGTH_Y_PX: f64 = 591.04;

/// Physical footprint of one depth pixel, in millimeters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelSpacing {
    pub x: f64,
    pub y: f64,
}

/// Pixel footprint at a given distance from the sensor, from the pinhole
/// model: spacing = distance / focal length.
pub fn pixel_spacing_at(sensor_elevation_mm: f64) -> PixelSpacing {
    PixelSpacing {
        x: sensor_elevation_mm / FOCAL_LENGTH_X_PX,
        y: sensor_elevation_mm / FOCAL_LENGTH_Y_PX,
    }
}

/// Projects every cell of an averaged grid into a sensor-aligned 3D point.
///
/// The x/y/z negations are the consuming geometry system's handedness
/// convention and must not be "simplified" away.
pub fn project_grid(
    averaged: &DepthGrid<f64>,
    spacing: PixelSpacing,
    sensor_elevation: f64,
    units_multiplier: f64,
) -> Vec<Point3<f64>> {
    let width = averaged.width();
    let depths = averaged.as_slice();
    let mut points = Vec::with_capacity(depths.len());

    for row in 0..averaged.height() {
        for col in 0..width {
            let depth = depths[row * width + col];
            points.push(Point3::new(
                -(col as f64) * units_multiplier * spacing.x,
                -(row as f64) * units_multiplier * spacing.y,
                -(depth - sensor_elevation) * units_multiplier,
            ));
        }
    }

    points
}
