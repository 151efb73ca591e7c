//! Pipeline orchestration module
//!
//! This module wires the per-frame stages together: configuration, the
//! tick driver, and the stage timing that backs the diagnostic output.

mod depth_to_mesh;
mod timing;
mod types;


pub use depth_to_mesh::DepthToMeshPipeline;
pub use timing::{StageMark, TickTimings};
pub use types::{PipelineConfig, PipelineConfigBuilder, TickOutput};
