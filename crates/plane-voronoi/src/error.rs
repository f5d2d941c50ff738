//! Error types for Voronoi computation.

use std::fmt;

/// Errors that can occur during Voronoi computation.
#[derive(Debug, Clone)]
pub enum VoronoiError {
    /// The site list was empty.
    NoSites,

    /// The clip rectangle has zero or negative extent on some axis.
    EmptyClipRect { width: f32, height: f32 },

    /// A site coordinate was NaN or infinite. Carries the site index.
    NonFiniteSite(usize),
}

impl fmt::Display for VoronoiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VoronoiError::NoSites => write!(f, "no sites provided"),
            VoronoiError::EmptyClipRect { width, height } => {
                write!(f, "clip rectangle has empty extent: {}x{}", width, height)
            }
            VoronoiError::NonFiniteSite(index) => {
                write!(f, "site {} has a non-finite coordinate", index)
            }
        }
    }
}

impl std::error::Error for VoronoiError {}
