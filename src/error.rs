use thiserror::Error;

/// Run-level errors surfaced by the pipeline.
///
/// Everything else is recovered locally: out-of-range settings are
/// clamped, empty sampling intersections fall back to the center
/// sample, and degenerate Voronoi cells are dropped. Cancellation is
/// not an error either — see [`crate::pipeline::RunOutcome`].
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("input image has zero area: {width}x{height}")]
    EmptyImage { width: u32, height: u32 },

    #[error("pixel buffer size mismatch: expected {expected} bytes for {width}x{height} RGBA, got {actual}")]
    BufferSizeMismatch {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },

    #[error("no image loaded")]
    NoImage,

    #[error("tessellation failed: {0}")]
    Tessellation(#[from] plane_voronoi::VoronoiError),
}
