//! High-level facade crate for the `colorchart-*` workspace.
//!
//! Locates Macbeth-style 24-patch color charts in the photographs of a
//! structure-from-motion dataset and exports measured patch colors, plus an
//! optional SVG overlay per located chart for eyeballing a detection.
//!
//! Chart detection itself is delegated to an external vision backend via
//! the [`detector::ChartDetector`] trait; this crate owns everything around
//! it: scene reading, pixel transcoding, per-image orchestration and output
//! serialization.
//!
//! ## Quickstart
//!
//! ```no_run
//! use colorchart::core::BgrImageView;
//! use colorchart::detector::{ChartDetector, DetectedChart, DetectorError};
//! use colorchart::process::{run, ProcessOptions};
//!
//! struct MyBackend;
//!
//! impl ChartDetector for MyBackend {
//!     fn detect(
//!         &self,
//!         image: &BgrImageView<'_>,
//!     ) -> Result<Vec<DetectedChart>, DetectorError> {
//!         // call into your vision library here
//!         Ok(Vec::new())
//!     }
//! }
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let options = ProcessOptions {
//!     output_color_data: "colors.txt".into(),
//!     debug: true,
//! };
//! let summary = run(&MyBackend, "dataset/cameras.sfm", &options)?;
//! println!("{} charts in {} images", summary.charts, summary.images);
//! # Ok(())
//! # }
//! ```
//!
//! ## API map
//! - `colorchart::core`: quads, perspective transforms, the Macbeth
//!   reference layout and overlay geometry.
//! - `colorchart::svg`: SVG rendering of chart overlays.
//! - `colorchart::detector`: the backend seam and detection result types.
//! - `colorchart::scene`: minimal scene reading (the views list).
//! - `colorchart::input`: scene vs. image-expression classification.
//! - `colorchart::process` (feature `image`): end-to-end runs.

pub use colorchart_core as core;
pub use colorchart_svg as svg;

pub use colorchart_core::{build_overlay, ChartLayout, ChartOverlay, GeometryError, Quad};

pub mod colors;
pub mod detector;
pub mod input;
pub mod scene;

#[cfg(feature = "image")]
pub mod process;
