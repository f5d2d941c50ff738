//! Decoded raster surface.

mod pixel_buffer;

pub use pixel_buffer::{PixelBuffer, MAX_DIMENSION};
