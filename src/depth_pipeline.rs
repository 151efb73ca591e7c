//! Depth-sensor processing pipeline module
//!
//! This module turns raw depth frames into colored quad meshes and derived
//! terrain geometry, with separate modules for frame acquisition/trimming,
//! temporal and spatial filtering, 3D projection and mesh construction,
//! analysis strategies, and pipeline orchestration.

pub mod analysis;
pub mod common;
pub mod filter;
pub mod frame;
pub mod geometry;
pub mod pipeline;

pub use common::{PipelineError, Result};

pub use frame::{DepthFrameSource, DepthGrid, FrameTrim, RawDepthFrame, trim_frame};

pub use filter::{MAX_VALID_DEPTH_MM, MIN_VALID_DEPTH_MM, TemporalAverager, gaussian_blur};

pub use geometry::{MeshBuilder, PixelSpacing, QuadMesh, pixel_spacing_at, project_grid};

pub use analysis::{
    AnalysisGeometry, Color, PixelColoring, TerrainAnalysis, color_vertices, run_terrain_analyses,
};

pub use pipeline::{
    DepthToMeshPipeline, PipelineConfig, PipelineConfigBuilder, StageMark, TickOutput, TickTimings,
};
