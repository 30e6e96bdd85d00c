//! Core geometry and pixel buffers for color chart localization.
//!
//! This crate is intentionally small and purely computational. It does
//! *not* know how charts are detected or how image files are decoded; it
//! owns the reference layout of the Macbeth 24-patch chart, the perspective
//! mapping between that layout and a photographed chart, and the quads a
//! debug overlay draws.

mod error;
mod image;
mod layout;
mod logger;
mod overlay;
mod quad;
mod transform;

pub use error::GeometryError;
pub use image::{rgba_f32_to_bgr_u8, BgrImage, BgrImageView, RgbaFImageView};
pub use layout::{ChartLayout, MACBETH_CELL_CENTERS, MACBETH_CELL_HALF_SIZE, MACBETH_CORNERS};
pub use overlay::{build_overlay, ChartOverlay};
pub use quad::Quad;
pub use transform::PerspectiveTransform;

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::{init_with_level, parse_verbose_level, UnknownVerboseLevel, VERBOSE_LEVELS};
