//! Depth frame acquisition and trimming module
//!
//! This module provides the frame-source seam, the typed depth grid used by
//! every later stage, and edge trimming of raw sensor frames.

mod source;
mod trim;
pub mod types;

pub use source::DepthFrameSource;
pub use trim::{FrameTrim, trim_frame};
pub use types::{DepthGrid, RawDepthFrame};
