//! The pipeline orchestrator: stage caches and minimal recompute.
//!
//! Each stage output lives in one cache slot owned by the
//! orchestrator; references only flow downstream. A settings change
//! invalidates the smallest stage set whose inputs depend on the
//! changed fields (see [`super::stage`]), so late-pipeline tweaks like
//! lighting never rerun edge detection or tessellation.

use std::sync::Arc;
use std::time::Instant;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::edges::{self, EdgeMap};
use crate::error::PipelineError;
use crate::frame::{self, FrameLayer};
use crate::lighting;
use crate::raster::PixelBuffer;
use crate::sample::{self, ColoredCell};
use crate::seeds;
use crate::settings::Settings;
use crate::svg;
use crate::tessellate::{self, VoronoiCell};

use super::cancel::CancelToken;
use super::stage::{Invalidation, Stage};

/// Stream separator so ray jitter stays deterministic regardless of
/// whether the seed stage was served from cache.
const RAY_STREAM: u64 = 0x9e37_79b9_7f4a_7c15;

/// The finished artwork: the canonical SVG export plus the structured
/// cell list for external renderers.
#[derive(Debug, Clone)]
pub struct Artwork {
    pub svg: String,
    pub cells: Vec<ColoredCell>,
    pub width: u32,
    pub height: u32,
}

/// Result of a pipeline run. Cancellation is an outcome, not an error.
#[derive(Debug, Clone)]
pub enum RunOutcome {
    Complete(Arc<Artwork>),
    Cancelled,
}

/// Stage-cached image-to-artwork pipeline.
pub struct ArtworkPipeline {
    buffer: Option<Arc<PixelBuffer>>,
    /// Settings of the run the caches below belong to.
    cached_settings: Option<Settings>,
    edge_map: Option<Arc<EdgeMap>>,
    frame: Option<FrameLayer>,
    cells: Option<Vec<VoronoiCell>>,
    colored: Option<Vec<ColoredCell>>,
    artwork: Option<Arc<Artwork>>,
}

impl ArtworkPipeline {
    pub fn new() -> Self {
        Self {
            buffer: None,
            cached_settings: None,
            edge_map: None,
            frame: None,
            cells: None,
            colored: None,
            artwork: None,
        }
    }

    /// Load a new image, dropping every cache.
    pub fn set_image(&mut self, buffer: PixelBuffer) {
        tracing::debug!(
            width = buffer.width(),
            height = buffer.height(),
            "image loaded"
        );
        self.buffer = Some(Arc::new(buffer));
        self.clear_caches();
        self.artwork = None;
    }

    pub fn image(&self) -> Option<&PixelBuffer> {
        self.buffer.as_deref()
    }

    /// The most recent completed run's output, if any.
    pub fn latest(&self) -> Option<Arc<Artwork>> {
        self.artwork.clone()
    }

    fn clear_caches(&mut self) {
        self.cached_settings = None;
        self.edge_map = None;
        self.frame = None;
        self.cells = None;
        self.colored = None;
    }

    /// Run the pipeline for `settings`, reusing cached stages whose
    /// inputs are unchanged.
    ///
    /// Cancellation is checked at every stage boundary; a cancelled
    /// run discards its partial caches and reports
    /// [`RunOutcome::Cancelled`]. The previous completed artwork stays
    /// visible through [`Self::latest`].
    pub fn render(
        &mut self,
        settings: &Settings,
        token: &CancelToken,
    ) -> Result<RunOutcome, PipelineError> {
        let buffer = self.buffer.clone().ok_or(PipelineError::NoImage)?;
        let settings = settings.normalized();

        let invalidation = match &self.cached_settings {
            Some(previous) => Invalidation::between(previous, &settings),
            None => Invalidation::all(),
        };
        tracing::debug!(?invalidation, "starting run");

        if invalidation.includes(Stage::Edges) {
            self.edge_map = None;
        }
        if invalidation.includes(Stage::Frame) {
            self.frame = None;
        }
        if invalidation.includes(Stage::Cells) {
            self.cells = None;
        }
        if invalidation.includes(Stage::Colors) {
            self.colored = None;
        }
        // In-progress caches no longer describe cached_settings; only
        // a completed run restores the pairing.
        self.cached_settings = None;

        // Stage B: edge magnitude.
        if self.edge_map.is_none() {
            let started = Instant::now();
            match edges::detect(&buffer, &settings.edge_options(), token) {
                Some(map) => {
                    tracing::debug!(elapsed_ms = started.elapsed().as_millis() as u64, "edges");
                    self.edge_map = Some(Arc::new(map));
                }
                None => return self.cancelled(),
            }
        }
        if token.is_cancelled() {
            return self.cancelled();
        }

        // Stage F: frame geometry and colors; fixes the artwork rect.
        if self.frame.is_none() {
            let started = Instant::now();
            self.frame = Some(frame::build(&buffer, &settings.frame_options()));
            tracing::debug!(elapsed_ms = started.elapsed().as_millis() as u64, "frame");
        }
        if token.is_cancelled() {
            return self.cancelled();
        }
        let frame_layer = self.frame.clone().expect("frame cache was just filled");
        let artwork_rect = frame_layer.inner_rect;

        // Stages C/D: seeds and tessellation.
        if self.cells.is_none() {
            let started = Instant::now();
            let mut rng = ChaCha8Rng::seed_from_u64(settings.seed);
            let mut points = seeds::generate(
                &settings.seed_options(),
                artwork_rect,
                self.edge_map.as_deref(),
                &mut rng,
            );
            let cells = tessellate::tessellate(
                &mut points,
                artwork_rect,
                settings.relaxation_iterations,
            )?;
            tracing::debug!(
                elapsed_ms = started.elapsed().as_millis() as u64,
                cells = cells.len(),
                "tessellation"
            );
            self.cells = Some(cells);
        }
        if token.is_cancelled() {
            return self.cancelled();
        }

        // Stage E: color sampling.
        if self.colored.is_none() {
            let started = Instant::now();
            let cells = self.cells.as_ref().expect("cell cache was just filled");
            self.colored = Some(sample::sample_cells(
                &buffer,
                cells,
                &settings.color_options(),
            ));
            tracing::debug!(elapsed_ms = started.elapsed().as_millis() as u64, "colors");
        }
        if token.is_cancelled() {
            return self.cancelled();
        }

        // Stages G/H: lighting and emission.
        let started = Instant::now();
        let colored = self.colored.as_ref().expect("color cache was just filled");
        let mut ray_rng = ChaCha8Rng::seed_from_u64(settings.seed ^ RAY_STREAM);
        let scene = lighting::apply(
            colored,
            &settings.lighting,
            buffer.width() as f32,
            buffer.height() as f32,
            artwork_rect,
            &mut ray_rng,
        );
        let document = svg::emit(
            buffer.width(),
            buffer.height(),
            &scene,
            &frame_layer,
            &settings.lighting,
            &settings.emit_options(),
        );
        tracing::debug!(
            elapsed_ms = started.elapsed().as_millis() as u64,
            bytes = document.len(),
            "document"
        );

        let artwork = Arc::new(Artwork {
            svg: document,
            cells: scene.cells,
            width: buffer.width(),
            height: buffer.height(),
        });
        self.artwork = Some(artwork.clone());
        self.cached_settings = Some(settings);
        Ok(RunOutcome::Complete(artwork))
    }

    /// Discard partial caches and report cancellation. The last
    /// completed artwork remains visible.
    fn cancelled(&mut self) -> Result<RunOutcome, PipelineError> {
        tracing::debug!("run cancelled");
        self.clear_caches();
        Ok(RunOutcome::Cancelled)
    }
}

impl Default for ArtworkPipeline {
    fn default() -> Self {
        Self::new()
    }
}
