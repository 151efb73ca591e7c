//! Analysis strategies module
//!
//! Two extension points: pixel analyses color the averaged depth grid
//! (exactly one active at a time), mesh analyses derive auxiliary geometry
//! from the finished quad mesh (freely combinable).

mod color;
mod terrain;
pub mod types;

pub use color::color_vertices;
pub use terrain::{AnalysisGeometry, run_terrain_analyses};
pub use types::{Color, PixelColoring, TerrainAnalysis};
