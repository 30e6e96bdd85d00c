//! Reference-plane geometry of the charts this tool can overlay.

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// Outer-box corners of the Macbeth 24-patch chart in chart-local units,
/// wound to match the corner order detectors report.
pub const MACBETH_CORNERS: [[f32; 2]; 4] =
    [[0.0, 0.0], [16.75, 0.0], [16.75, 11.25], [0.0, 11.25]];

/// Patch centers in chart-local units, row-major from the top-left patch.
pub const MACBETH_CELL_CENTERS: [[f32; 2]; 24] = [
    [1.50, 1.50],
    [4.25, 1.50],
    [7.00, 1.50],
    [9.75, 1.50],
    [12.50, 1.50],
    [15.25, 1.50],
    [1.50, 4.25],
    [4.25, 4.25],
    [7.00, 4.25],
    [9.75, 4.25],
    [12.50, 4.25],
    [15.25, 4.25],
    [1.50, 7.00],
    [4.25, 7.00],
    [7.00, 7.00],
    [9.75, 7.00],
    [12.50, 7.00],
    [15.25, 7.00],
    [1.50, 9.75],
    [4.25, 9.75],
    [7.00, 9.75],
    [9.75, 9.75],
    [12.50, 9.75],
    [15.25, 9.75],
];

/// Half extent of one square patch in chart-local units.
pub const MACBETH_CELL_HALF_SIZE: f32 = 0.625;

/// Reference-plane description of a chart: outer corners, patch centers and
/// the half extent of each square patch, all in chart-local units.
///
/// A [`PerspectiveTransform`](crate::PerspectiveTransform) estimated from
/// the corners carries the tables into image space.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChartLayout {
    pub corners: [Point2<f32>; 4],
    pub cell_centers: [Point2<f32>; 24],
    pub cell_half_size: f32,
}

impl ChartLayout {
    /// The classic Macbeth 24-patch layout.
    pub fn macbeth() -> Self {
        Self {
            corners: MACBETH_CORNERS.map(|[x, y]| Point2::new(x, y)),
            cell_centers: MACBETH_CELL_CENTERS.map(|[x, y]| Point2::new(x, y)),
            cell_half_size: MACBETH_CELL_HALF_SIZE,
        }
    }
}
