use crate::depth_pipeline::analysis::types::{Color, PixelColoring};
use crate::depth_pipeline::frame::DepthGrid;
use crate::depth_pipeline::geometry::PixelSpacing;

/// Height span mapped across the elevation ramp, centered on the sensor
/// zero plane.
const ELEVATION_SPAN_MM: f64 = 400.0;

/// Gradient magnitude mapped to the top of the slope ramp (1.0 = 45
/// degrees).
const SLOPE_FULL_SCALE: f64 = 1.0;

const RAMP_LOW: Color = Color::new(38, 92, 200); // submerged blue
const RAMP_MID: Color = Color::new(68, 160, 74); // vegetation green
const RAMP_HIGH: Color = Color::new(186, 96, 48); // exposed rock

/// Produces one color per grid cell for the active pixel analysis.
///
/// The output length always equals the pixel count; an inactive selection
/// yields the neutral set rather than an error.
pub fn color_vertices(
    coloring: PixelColoring,
    averaged: &DepthGrid<f64>,
    spacing: PixelSpacing,
    sensor_elevation: f64,
) -> Vec<Color> {
    match coloring {
        PixelColoring::None => vec![Color::NEUTRAL; averaged.len()],
        PixelColoring::Elevation => elevation_colors(averaged, sensor_elevation),
        PixelColoring::Slope => slope_colors(averaged, spacing),
        PixelColoring::Aspect => aspect_colors(averaged, spacing),
    }
}

fn elevation_colors(averaged: &DepthGrid<f64>, sensor_elevation: f64) -> Vec<Color> {
    averaged
        .as_slice()
        .iter()
        .map(|&depth| {
            let height = sensor_elevation - depth;
            let t = height / ELEVATION_SPAN_MM + 0.5;
            terrain_ramp(t)
        })
        .collect()
}

fn slope_colors(averaged: &DepthGrid<f64>, spacing: PixelSpacing) -> Vec<Color> {
    let mut colors = Vec::with_capacity(averaged.len());
    for row in 0..averaged.height() {
        for col in 0..averaged.width() {
            let (gx, gy) = gradient_at(averaged, row, col, spacing);
            let magnitude = (gx * gx + gy * gy).sqrt();
            let t = magnitude / SLOPE_FULL_SCALE;
            colors.push(slope_ramp(t));
        }
    }
    colors
}

fn aspect_colors(averaged: &DepthGrid<f64>, spacing: PixelSpacing) -> Vec<Color> {
    let mut colors = Vec::with_capacity(averaged.len());
    for row in 0..averaged.height() {
        for col in 0..averaged.width() {
            let (gx, gy) = gradient_at(averaged, row, col, spacing);
            if gx.abs() < 1e-9 && gy.abs() < 1e-9 {
                colors.push(Color::NEUTRAL);
                continue;
            }
            let angle = gy.atan2(gx);
            let hue = angle.to_degrees().rem_euclid(360.0);
            colors.push(hue_color(hue));
        }
    }
    colors
}

/// Central-difference depth gradient in mm per mm, one-sided at the grid
/// border.
fn gradient_at(
    averaged: &DepthGrid<f64>,
    row: usize,
    col: usize,
    spacing: PixelSpacing,
) -> (f64, f64) {
    let width = averaged.width();
    let height = averaged.height();
    let data = averaged.as_slice();
    let at = |r: usize, c: usize| data[r * width + c];

    let (left, right) = (col.saturating_sub(1), (col + 1).min(width - 1));
    let (up, down) = (row.saturating_sub(1), (row + 1).min(height - 1));

    let dx = (at(row, right) - at(row, left)) / ((right - left).max(1) as f64 * spacing.x);
    let dy = (at(down, col) - at(up, col)) / ((down - up).max(1) as f64 * spacing.y);
    (dx, dy)
}

fn terrain_ramp(t: f64) -> Color {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        RAMP_LOW.lerp(RAMP_MID, t * 2.0)
    } else {
        RAMP_MID.lerp(RAMP_HIGH, (t - 0.5) * 2.0)
    }
}

fn slope_ramp(t: f64) -> Color {
    let flat = Color::new(64, 168, 70);
    let steep = Color::new(208, 48, 40);
    flat.lerp(steep, t)
}

/// Six-sector hue wheel at full saturation, for aspect direction.
fn hue_color(hue_degrees: f64) -> Color {
    let h = hue_degrees.rem_euclid(360.0) / 60.0;
    let x = (1.0 - (h % 2.0 - 1.0).abs()) * 255.0;
    let x = x.round() as u8;
    match h as usize {
        0 => Color::new(255, x, 0),
        1 => Color::new(x, 255, 0),
        2 => Color::new(0, 255, x),
        3 => Color::new(0, x, 255),
        4 => Color::new(x, 0, 255),
        _ => Color::new(255, 0, x),
    }
}
