use nalgebra::Point2;
use serde::{Deserialize, Serialize};

use crate::error::GeometryError;
use crate::layout::ChartLayout;
use crate::quad::Quad;
use crate::transform::PerspectiveTransform;

/// Debug-overlay geometry for one detected chart: the outer box plus all 24
/// patch quads mapped into image space.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChartOverlay {
    pub outer: Quad,
    pub cells: [Quad; 24],
}

impl ChartOverlay {
    /// All 25 quads in draw order: the outer box first, then the patches in
    /// row-major reference order.
    pub fn quads(&self) -> impl Iterator<Item = &Quad> {
        std::iter::once(&self.outer).chain(self.cells.iter())
    }
}

/// Build the debug overlay for one detected chart.
///
/// `detected_box` is the chart's outer box in image space, exactly 4
/// corners in the same order as `layout.corners`. The patch quads are
/// rectangles of half extent `layout.cell_half_size` around each reference
/// center, carried into image space by the perspective transform the two
/// corner sets define.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(level = "debug", skip(layout))
)]
pub fn build_overlay(
    detected_box: &[Point2<f32>],
    layout: &ChartLayout,
) -> Result<ChartOverlay, GeometryError> {
    let outer = Quad::from_corners(detected_box)?;
    let t = PerspectiveTransform::from_correspondence(&layout.corners, detected_box)?;

    let mut cells = [outer; 24];
    for (cell, center) in cells.iter_mut().zip(&layout.cell_centers) {
        *cell = Quad::axis_aligned(*center, layout.cell_half_size).transform(&t)?;
    }
    Ok(ChartOverlay { outer, cells })
}
