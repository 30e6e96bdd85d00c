//! The chart detection seam.
//!
//! Locating a chart in a photograph (detection, fitting and per-patch color
//! measurement) is the job of an external vision backend; this crate only
//! orchestrates around one. Backends implement [`ChartDetector`].

use colorchart_core::BgrImageView;
use nalgebra::Point2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors surfaced by a detection backend.
#[derive(Debug, Error)]
pub enum DetectorError {
    #[error("chart detection backend failed: {0}")]
    Backend(String),
}

/// One chart located in a photograph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectedChart {
    /// The chart's outer box in image pixels, corners ordered like the
    /// reference layout.
    pub outer_box: [Point2<f32>; 4],
    /// Mean RGB per patch on a 0..=255 scale, row-major patch order.
    pub patch_rgb: [[f64; 3]; 24],
}

/// Capability interface over an external chart detection backend.
pub trait ChartDetector {
    /// Locate Macbeth 24-patch charts in `image`.
    ///
    /// Returns the located charts, possibly none. `Err` means the backend
    /// itself failed, not that no chart was present.
    fn detect(&self, image: &BgrImageView<'_>) -> Result<Vec<DetectedChart>, DetectorError>;
}

/// The detection backend compiled into this build, if any.
///
/// This workspace ships the orchestration, geometry and output stages only;
/// a backend is a separate crate implementing [`ChartDetector`] on top of a
/// vision library. None is bundled here.
pub fn compiled_backend() -> Option<Box<dyn ChartDetector>> {
    None
}
