use crate::depth_pipeline::analysis::{AnalysisGeometry, PixelColoring, TerrainAnalysis};
use crate::depth_pipeline::frame::FrameTrim;
use crate::depth_pipeline::geometry::QuadMesh;

/// Per-run pipeline configuration.
///
/// Values arrive validated from the host each tick; the pipeline reacts to
/// changes (crop margins, window depth) through the averager's reset logic
/// rather than explicit reconfiguration calls.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    /// Water surface elevation, millimeters above the zero plane
    pub water_level: f64,
    /// Vertical distance between contour slices, millimeters
    pub contour_interval: f64,
    /// Temporal averaging window, frames
    pub average_frames: usize,
    /// Gaussian blur radius in pixels; radii below 2 disable the blur
    pub blur_radius: usize,
    /// Rows/columns cropped from the raw frame edges
    pub trim: FrameTrim,
    /// Distance from sensor to the sandbox zero plane, millimeters
    pub sensor_elevation: f64,
    /// Number of recent meshes kept in the output history
    pub keep_frames: usize,
    /// Millimeters-to-drawing-units scale from the host document
    pub units_multiplier: f64,
    /// Active pixel-coloring strategy
    pub coloring: PixelColoring,
    /// Emit contour polylines
    pub show_contours: bool,
    /// Emit the water surface
    pub show_water_level: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            water_level: 50.0,
            contour_interval: 10.0,
            average_frames: 1,
            blur_radius: 1,
            trim: FrameTrim::NONE,
            sensor_elevation: 1000.0,
            keep_frames: 1,
            units_multiplier: 1.0,
            coloring: PixelColoring::None,
            show_contours: false,
            show_water_level: false,
        }
    }
}

impl PipelineConfig {
    pub fn builder() -> PipelineConfigBuilder {
        PipelineConfigBuilder::default()
    }

    /// Active mesh analyses with their parameters scaled to drawing units.
    pub fn terrain_analyses(&self) -> Vec<TerrainAnalysis> {
        let mut analyses = Vec::new();
        if self.show_contours {
            analyses.push(TerrainAnalysis::Contours {
                interval: self.contour_interval * self.units_multiplier,
            });
        }
        if self.show_water_level {
            analyses.push(TerrainAnalysis::WaterLevel {
                level: self.water_level * self.units_multiplier,
            });
        }
        analyses
    }
}

#[derive(Default)]
pub struct PipelineConfigBuilder {
    water_level: Option<f64>,
    contour_interval: Option<f64>,
    average_frames: Option<usize>,
    blur_radius: Option<usize>,
    trim: Option<FrameTrim>,
    sensor_elevation: Option<f64>,
    keep_frames: Option<usize>,
    units_multiplier: Option<f64>,
    coloring: Option<PixelColoring>,
    show_contours: Option<bool>,
    show_water_level: Option<bool>,
}

impl PipelineConfigBuilder {
    pub fn water_level(mut self, level: f64) -> Self {
        self.water_level = Some(level);
        self
    }

    pub fn contour_interval(mut self, interval: f64) -> Self {
        self.contour_interval = Some(interval);
        self
    }

    pub fn average_frames(mut self, frames: usize) -> Self {
        self.average_frames = Some(frames);
        self
    }

    pub fn blur_radius(mut self, radius: usize) -> Self {
        self.blur_radius = Some(radius);
        self
    }

    pub fn trim(mut self, trim: FrameTrim) -> Self {
        self.trim = Some(trim);
        self
    }

    pub fn sensor_elevation(mut self, elevation: f64) -> Self {
        self.sensor_elevation = Some(elevation);
        self
    }

    pub fn keep_frames(mut self, frames: usize) -> Self {
        self.keep_frames = Some(frames);
        self
    }

    pub fn units_multiplier(mut self, multiplier: f64) -> Self {
        self.units_multiplier = Some(multiplier);
        self
    }

    pub fn coloring(mut self, coloring: PixelColoring) -> Self {
        self.coloring = Some(coloring);
        self
    }

    pub fn show_contours(mut self, show: bool) -> Self {
        self.show_contours = Some(show);
        self
    }

    pub fn show_water_level(mut self, show: bool) -> Self {
        self.show_water_level = Some(show);
        self
    }

    pub fn build(self) -> PipelineConfig {
        let default = PipelineConfig::default();
        PipelineConfig {
            water_level: self.water_level.unwrap_or(default.water_level),
            contour_interval: self.contour_interval.unwrap_or(default.contour_interval),
            average_frames: self.average_frames.unwrap_or(default.average_frames),
            blur_radius: self.blur_radius.unwrap_or(default.blur_radius),
            trim: self.trim.unwrap_or(default.trim),
            sensor_elevation: self.sensor_elevation.unwrap_or(default.sensor_elevation),
            keep_frames: self.keep_frames.unwrap_or(default.keep_frames),
            units_multiplier: self.units_multiplier.unwrap_or(default.units_multiplier),
            coloring: self.coloring.unwrap_or(default.coloring),
            show_contours: self.show_contours.unwrap_or(default.show_contours),
            show_water_level: self.show_water_level.unwrap_or(default.show_water_level),
        }
    }
}

/// Everything one tick hands back to the host.
#[derive(Debug, Clone)]
pub struct TickOutput {
    /// Mesh list, newest first when a history is retained
    pub meshes: Vec<QuadMesh>,
    /// Auxiliary analysis geometry, in selection order
    pub geometry: Vec<AnalysisGeometry>,
    /// Per-stage diagnostic lines for the host log
    pub diagnostics: Vec<String>,
    /// The pipeline polls continuously and always asks to run again
    pub schedule_next: bool,
}
