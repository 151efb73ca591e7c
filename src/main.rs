use anyhow::Context;
use sandtable_rs::depth_pipeline::{
    DepthFrameSource, DepthToMeshPipeline, PipelineConfig, PixelColoring, RawDepthFrame,
};
use sandtable_rs::logger;

use tracing::info;

/// Procedural stand-in for the sensor: a dune field that drifts over time,
/// with periodic dropout pixels to exercise the repair path.
struct SyntheticDuneSource {
    width: usize,
    height: usize,
    tick: u64,
}

impl SyntheticDuneSource {
    fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            tick: 0,
        }
    }
}

impl DepthFrameSource for SyntheticDuneSource {
    fn sensor_width(&self) -> usize {
        self.width
    }

    fn sensor_height(&self) -> usize {
        self.height
    }

    fn acquire(&mut self) -> Option<RawDepthFrame> {
        self.tick += 1;
        let phase = self.tick as f64 * 0.1;
        let mut data = Vec::with_capacity(self.width * self.height);
        for row in 0..self.height {
            for col in 0..self.width {
                let u = col as f64 / self.width as f64;
                let v = row as f64 / self.height as f64;
                let dune = ((u * 9.0 + phase).sin() + (v * 6.0).cos()) * 60.0;
                let depth = (900.0 - dune) as u16;
                let index = row * self.width + col;
                // Sensors drop pixels in clusters; fake a sparse version.
                data.push(if (index + self.tick as usize) % 97 == 0 {
                    0
                } else {
                    depth
                });
            }
        }
        Some(RawDepthFrame {
            width: self.width,
            height: self.height,
            data,
        })
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logger::init();

    info!("Starting sandtable depth pipeline demo...");

    let config = PipelineConfig::builder()
        .average_frames(4)
        .blur_radius(3)
        .sensor_elevation(1000.0)
        .coloring(PixelColoring::Elevation)
        .show_contours(true)
        .contour_interval(25.0)
        .show_water_level(true)
        .water_level(60.0)
        .build();

    let source = SyntheticDuneSource::new(160, 120);
    let mut pipeline = DepthToMeshPipeline::new(source, config);

    info!("Depth-to-mesh pipeline initialized");
    info!(
        "Averaging window: {} frames, blur radius: {}",
        pipeline.config().average_frames,
        pipeline.config().blur_radius
    );

    for _ in 0..10 {
        let output = pipeline.tick().context("pipeline tick failed")?;
        let mesh = &output.meshes[0];
        info!(
            vertices = mesh.vertex_count(),
            faces = mesh.face_count(),
            geometry = output.geometry.len(),
            "tick produced a mesh"
        );
        for line in &output.diagnostics {
            info!("  {}", line);
        }
        if !output.schedule_next {
            break;
        }
    }

    Ok(())
}
