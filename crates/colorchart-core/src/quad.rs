use nalgebra::Point2;
use serde::{Deserialize, Serialize};

use crate::error::GeometryError;
use crate::transform::PerspectiveTransform;

/// A closed quadrilateral: 4 corners plus the first corner repeated, so the
/// points trace a closed polyline.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Quad {
    points: [Point2<f32>; 5],
}

impl Quad {
    /// Build a closed quad from exactly 4 corner points, kept in order.
    pub fn from_corners(corners: &[Point2<f32>]) -> Result<Self, GeometryError> {
        if corners.len() != 4 {
            return Err(GeometryError::InvalidGeometry {
                got: corners.len(),
            });
        }
        Ok(Self {
            points: [corners[0], corners[1], corners[2], corners[3], corners[0]],
        })
    }

    /// Axis-aligned square around `center` with the given half extent,
    /// wound from the top-left corner.
    pub fn axis_aligned(center: Point2<f32>, half: f32) -> Self {
        let p0 = Point2::new(center.x - half, center.y - half);
        let p1 = Point2::new(center.x + half, center.y - half);
        let p2 = Point2::new(center.x + half, center.y + half);
        let p3 = Point2::new(center.x - half, center.y + half);
        Self {
            points: [p0, p1, p2, p3, p0],
        }
    }

    /// The 5 points of the closed polyline; the last equals the first.
    pub fn points(&self) -> &[Point2<f32>; 5] {
        &self.points
    }

    /// The 4 distinct corners.
    pub fn corners(&self) -> &[Point2<f32>] {
        &self.points[..4]
    }

    /// Map every point through `t`, returning a new quad and leaving `self`
    /// untouched.
    pub fn transform(&self, t: &PerspectiveTransform) -> Result<Quad, GeometryError> {
        let mut points = self.points;
        for p in &mut points {
            *p = t.apply(*p)?;
        }
        Ok(Quad { points })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Matrix3;

    fn sample_corners() -> [Point2<f32>; 4] {
        [
            Point2::new(10.0, 10.0),
            Point2::new(210.0, 10.0),
            Point2::new(210.0, 150.0),
            Point2::new(10.0, 150.0),
        ]
    }

    #[test]
    fn from_corners_closes_the_polyline() {
        let corners = sample_corners();
        let quad = Quad::from_corners(&corners).unwrap();

        assert_eq!(quad.points().len(), 5);
        assert_eq!(quad.points()[4], quad.points()[0]);
        assert_eq!(quad.corners(), &corners);
    }

    #[test]
    fn rejects_wrong_corner_counts() {
        for n in [0usize, 1, 2, 3, 5] {
            let pts = vec![Point2::new(1.0_f32, 2.0); n];
            assert_eq!(
                Quad::from_corners(&pts),
                Err(GeometryError::InvalidGeometry { got: n }),
                "count {n} must be rejected"
            );
        }
    }

    #[test]
    fn axis_aligned_square_winds_from_top_left() {
        let quad = Quad::axis_aligned(Point2::new(4.25, 1.5), 0.625);

        assert_eq!(quad.points()[0], Point2::new(3.625, 0.875));
        assert_eq!(quad.points()[1], Point2::new(4.875, 0.875));
        assert_eq!(quad.points()[2], Point2::new(4.875, 2.125));
        assert_eq!(quad.points()[3], Point2::new(3.625, 2.125));
        assert_eq!(quad.points()[4], quad.points()[0]);
    }

    #[test]
    fn identity_transform_preserves_points() {
        let quad = Quad::from_corners(&sample_corners()).unwrap();
        let mapped = quad.transform(&PerspectiveTransform::identity()).unwrap();
        assert_eq!(mapped, quad);
    }

    #[test]
    fn transform_leaves_the_input_unchanged() {
        let quad = Quad::from_corners(&sample_corners()).unwrap();
        let t = PerspectiveTransform::new(Matrix3::new(
            2.0, 0.0, 7.0, //
            0.0, 2.0, -3.0, //
            0.0, 0.0, 1.0,
        ));

        let mapped = quad.transform(&t).unwrap();
        assert_eq!(quad.corners(), &sample_corners());
        assert_eq!(mapped.points()[0], Point2::new(27.0, 17.0));
        assert_eq!(mapped.points()[4], mapped.points()[0]);
    }

    #[test]
    fn zero_homogeneous_weight_is_a_division_error() {
        let quad = Quad::from_corners(&sample_corners()).unwrap();
        // Bottom row of zeros sends every point to w = 0.
        let t = PerspectiveTransform::new(Matrix3::new(
            1.0, 0.0, 0.0, //
            0.0, 1.0, 0.0, //
            0.0, 0.0, 0.0,
        ));

        assert_eq!(
            quad.transform(&t),
            Err(GeometryError::DivisionByZero { x: 10.0, y: 10.0 })
        );
    }
}
