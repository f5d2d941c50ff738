//! vitrail: raster images to stained-glass vector artwork.
//!
//! The pipeline partitions the image plane into irregular cells, fills
//! each with a color sampled from the image, borders them with lead
//! lines, and optionally surrounds the artwork with a decorative frame
//! and overlays simulated light transmission. The output is an SVG
//! document plus the structured cell list.
//!
//! # Pipeline
//!
//! ```text
//! PixelBuffer ──> EdgeMap ──> seeds ──> VoronoiCells ──> ColoredCells ──> LitScene ──> SVG
//!      │                        ^
//!      └──> FrameLayer ─────────┘ (inner artwork rectangle)
//! ```
//!
//! [`ArtworkPipeline`] owns one cache slot per stage and recomputes
//! only the stages whose inputs a settings change touched: tweaking
//! lighting re-emits the document without rerunning edge detection or
//! tessellation.
//!
//! # Quick start
//!
//! ```
//! use vitrail::{ArtworkPipeline, CancelToken, PixelBuffer, Rgb, RunOutcome, Settings};
//!
//! let mut pipeline = ArtworkPipeline::new();
//! pipeline.set_image(PixelBuffer::solid(64, 64, Rgb::new(200, 60, 40)).unwrap());
//!
//! let settings = Settings { cell_count: 50, ..Settings::default() };
//! let outcome = pipeline.render(&settings, &CancelToken::new()).unwrap();
//!
//! let artwork = match outcome {
//!     RunOutcome::Complete(artwork) => artwork,
//!     RunOutcome::Cancelled => unreachable!("nothing cancelled this run"),
//! };
//! assert!(artwork.svg.starts_with("<svg"));
//! assert!(!artwork.cells.is_empty());
//! ```
//!
//! # Interactive hosts
//!
//! [`RenderScheduler`] wraps the pipeline for interactive use: it
//! debounces rapid settings changes, renders off the async runtime via
//! the blocking pool, cancels superseded runs at stage boundaries, and
//! publishes only the newest completed artwork.
//!
//! # Determinism
//!
//! Every random choice (seed placement, ray jitter) draws from a
//! ChaCha stream seeded by [`Settings::seed`]: identical image and
//! settings produce a byte-identical document.

pub mod color;
pub mod edges;
pub mod frame;
pub mod lighting;
pub mod palettes;
pub mod pipeline;
pub mod raster;
pub mod sample;
pub mod seeds;
pub mod svg;
pub mod tessellate;

mod error;
mod settings;


pub use color::{Hsl, ParseColorError, Rgb};
pub use edges::{EdgeMap, EdgeMethod};
pub use error::PipelineError;
pub use frame::FrameStyle;
pub use lighting::{GlowSettings, LightPreset, LightSettings, RaySettings};
pub use pipeline::{Artwork, ArtworkPipeline, CancelToken, RenderScheduler, RunOutcome};
pub use raster::{PixelBuffer, MAX_DIMENSION};
pub use sample::{ColorMode, ColoredCell};
pub use seeds::PointDistribution;
pub use settings::{Settings, DEFAULT_SEED};
pub use tessellate::{ClipRect, VoronoiCell};
