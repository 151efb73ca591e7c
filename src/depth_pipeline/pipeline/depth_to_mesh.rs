use tracing::{info, instrument};

use crate::depth_pipeline::analysis::{color_vertices, run_terrain_analyses};
use crate::depth_pipeline::common::error::{PipelineError, Result};
use crate::depth_pipeline::filter::{TemporalAverager, gaussian_blur};
use crate::depth_pipeline::frame::{DepthFrameSource, trim_frame};
use crate::depth_pipeline::geometry::{MeshBuilder, pixel_spacing_at, project_grid};
use crate::depth_pipeline::pipeline::timing::TickTimings;
use crate::depth_pipeline::pipeline::types::{PipelineConfig, TickOutput};

/// The per-frame depth-to-mesh pipeline.
///
/// Owns all cross-tick state: the temporal averaging window and the
/// reusable mesh plus its history. One instance serves one sensor and must
/// not be shared across threads; a tick either completes fully or aborts
/// before allocating anything.
pub struct DepthToMeshPipeline<S: DepthFrameSource> {
    source: S,
    config: PipelineConfig,
    averager: TemporalAverager,
    builder: MeshBuilder,
}

impl<S: DepthFrameSource> DepthToMeshPipeline<S> {
    pub fn new(source: S, config: PipelineConfig) -> Self {
        Self {
            source,
            config,
            averager: TemporalAverager::new(),
            builder: MeshBuilder::new(),
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Replaces the configuration between ticks. Crop or window changes
    /// take effect through the averager's reset on the next ingest.
    pub fn set_config(&mut self, config: PipelineConfig) {
        self.config = config;
    }

    /// Runs one full pass over the newest available frame.
    ///
    /// Fails with [`PipelineError::SourceUnavailable`] when the sensor has
    /// nothing yet; the caller simply retries next tick.
    #[instrument(skip(self))]
    pub fn tick(&mut self) -> Result<TickOutput> {
        let mut timings = TickTimings::start();

        let frame = self
            .source
            .acquire()
            .ok_or(PipelineError::SourceUnavailable)?;
        timings.mark("acquire_frame");

        let trimmed = {
            let _span = tracing::info_span!("trim_frame").entered();
            trim_frame(&frame, &self.config.trim)?
        };
        timings.mark("trim_frame");

        let mut averaged = {
            let _span = tracing::info_span!(
                "temporal_average",
                window = self.config.average_frames
            )
            .entered();
            self.averager.ingest(
                trimmed,
                self.config.average_frames,
                self.config.sensor_elevation,
            )
        };
        timings.mark("temporal_average");

        if self.config.blur_radius >= 2 {
            let _span =
                tracing::info_span!("gaussian_blur", radius = self.config.blur_radius).entered();
            gaussian_blur(&mut averaged, self.config.blur_radius);
            timings.mark("gaussian_blur");
        }

        let spacing = pixel_spacing_at(self.config.sensor_elevation);

        let points = {
            let _span = tracing::info_span!("project_points").entered();
            project_grid(
                &averaged,
                spacing,
                self.config.sensor_elevation,
                self.config.units_multiplier,
            )
        };
        timings.mark("project_points");

        let colors = {
            let _span = tracing::info_span!("color_vertices").entered();
            color_vertices(
                self.config.coloring,
                &averaged,
                spacing,
                self.config.sensor_elevation,
            )
        };
        timings.mark("color_vertices");

        let meshes = {
            let _span = tracing::info_span!("build_mesh").entered();
            self.builder.build(
                points,
                colors,
                averaged.width(),
                averaged.height(),
                self.config.keep_frames,
            )
        };
        timings.mark("build_mesh");

        let analyses = self.config.terrain_analyses();
        let geometry = match meshes.first() {
            Some(mesh) if !analyses.is_empty() => {
                let _span = tracing::info_span!("terrain_analysis").entered();
                run_terrain_analyses(mesh, &analyses)
            }
            _ => Vec::new(),
        };
        timings.mark("terrain_analysis");

        info!(
            width = averaged.width(),
            height = averaged.height(),
            meshes = meshes.len(),
            geometry = geometry.len(),
            elapsed_ms = timings.total_elapsed().as_secs_f64() * 1000.0,
            "Tick complete"
        );

        Ok(TickOutput {
            meshes,
            geometry,
            diagnostics: timings.lines(),
            schedule_next: true,
        })
    }
}
