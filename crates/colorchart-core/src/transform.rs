//! Perspective mapping between the chart reference plane and image space.

use nalgebra::{Matrix3, Point2, SMatrix, SVector, Vector3};
use serde::{Deserialize, Serialize};

use crate::error::GeometryError;

/// A 3x3 projective transform taking reference-plane points to image points.
///
/// Estimated once per detected chart from the 4 outer-box correspondences
/// and immutable afterwards.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PerspectiveTransform {
    m: Matrix3<f64>,
}

impl PerspectiveTransform {
    pub fn new(m: Matrix3<f64>) -> Self {
        Self { m }
    }

    pub fn identity() -> Self {
        Self::new(Matrix3::identity())
    }

    pub fn matrix(&self) -> &Matrix3<f64> {
        &self.m
    }

    /// Map a single point, normalizing away the homogeneous weight.
    #[inline]
    pub fn apply(&self, p: Point2<f32>) -> Result<Point2<f32>, GeometryError> {
        let v = self.m * Vector3::new(f64::from(p.x), f64::from(p.y), 1.0);
        let w = v[2];
        if w == 0.0 {
            return Err(GeometryError::DivisionByZero { x: p.x, y: p.y });
        }
        Ok(Point2::new((v[0] / w) as f32, (v[1] / w) as f32))
    }

    /// `self` after `other`: applying the result equals applying `other`
    /// first and `self` second.
    pub fn compose(&self, other: &PerspectiveTransform) -> PerspectiveTransform {
        Self::new(self.m * other.m)
    }

    pub fn try_inverse(&self) -> Option<PerspectiveTransform> {
        self.m.try_inverse().map(Self::new)
    }

    /// Estimate the transform such that `detected ~ T * reference` from 4
    /// point correspondences in matching corner order.
    ///
    /// Both sequences must hold exactly 4 points. The reference corners must
    /// be in general position: with any 3 of them collinear the system has
    /// no unique solution.
    pub fn from_correspondence(
        reference: &[Point2<f32>],
        detected: &[Point2<f32>],
    ) -> Result<Self, GeometryError> {
        let src: &[Point2<f32>; 4] = reference
            .try_into()
            .map_err(|_| GeometryError::InvalidGeometry {
                got: reference.len(),
            })?;
        let dst: &[Point2<f32>; 4] = detected
            .try_into()
            .map_err(|_| GeometryError::InvalidGeometry {
                got: detected.len(),
            })?;

        if any_triple_collinear(src) {
            return Err(GeometryError::DegenerateTransform);
        }

        let (src_n, t_src) = condition(src);
        let (dst_n, t_dst) = condition(dst);

        // Unknowns [h11 h12 h13 h21 h22 h23 h31 h32] with h33 = 1.
        // Each correspondence (x,y)->(u,v) contributes:
        //   h11 x + h12 y + h13 - u h31 x - u h32 y = u
        //   h21 x + h22 y + h23 - v h31 x - v h32 y = v
        let mut a = SMatrix::<f64, 8, 8>::zeros();
        let mut b = SVector::<f64, 8>::zeros();
        for k in 0..4 {
            let (x, y) = (src_n[k].x, src_n[k].y);
            let (u, v) = (dst_n[k].x, dst_n[k].y);

            let row = 2 * k;
            a[(row, 0)] = x;
            a[(row, 1)] = y;
            a[(row, 2)] = 1.0;
            a[(row, 6)] = -u * x;
            a[(row, 7)] = -u * y;
            b[row] = u;

            let row = 2 * k + 1;
            a[(row, 3)] = x;
            a[(row, 4)] = y;
            a[(row, 5)] = 1.0;
            a[(row, 6)] = -v * x;
            a[(row, 7)] = -v * y;
            b[row] = v;
        }

        let sol = a.lu().solve(&b).ok_or(GeometryError::DegenerateTransform)?;
        let hn = Matrix3::new(
            sol[0], sol[1], sol[2], //
            sol[3], sol[4], sol[5], //
            sol[6], sol[7], 1.0,
        );

        // Undo the conditioning: T = T_dst^-1 * Hn * T_src, scaled to h33 = 1.
        let t_dst_inv = t_dst
            .try_inverse()
            .ok_or(GeometryError::DegenerateTransform)?;
        let h = t_dst_inv * hn * t_src;
        let h33 = h[(2, 2)];
        if h33.abs() < 1e-12 {
            return Err(GeometryError::DegenerateTransform);
        }
        Ok(Self::new(h / h33))
    }
}

/// Hartley conditioning: translate points to their centroid and scale so
/// the mean distance from it becomes sqrt(2).
fn condition(pts: &[Point2<f32>; 4]) -> ([Point2<f64>; 4], Matrix3<f64>) {
    let mut cx = 0.0_f64;
    let mut cy = 0.0_f64;
    for p in pts {
        cx += f64::from(p.x);
        cy += f64::from(p.y);
    }
    cx *= 0.25;
    cy *= 0.25;

    let mut mean_dist = 0.0_f64;
    for p in pts {
        mean_dist += (f64::from(p.x) - cx).hypot(f64::from(p.y) - cy);
    }
    mean_dist *= 0.25;

    let s = if mean_dist > 1e-12 {
        std::f64::consts::SQRT_2 / mean_dist
    } else {
        1.0
    };
    let t = Matrix3::new(s, 0.0, -s * cx, 0.0, s, -s * cy, 0.0, 0.0, 1.0);

    let mut out = [Point2::origin(); 4];
    for (o, p) in out.iter_mut().zip(pts) {
        let v = t * Vector3::new(f64::from(p.x), f64::from(p.y), 1.0);
        *o = Point2::new(v[0], v[1]);
    }
    (out, t)
}

fn any_triple_collinear(pts: &[Point2<f32>; 4]) -> bool {
    const TRIPLES: [[usize; 3]; 4] = [[0, 1, 2], [0, 1, 3], [0, 2, 3], [1, 2, 3]];
    TRIPLES.iter().any(|&[i, j, k]| {
        let ax = f64::from(pts[j].x - pts[i].x);
        let ay = f64::from(pts[j].y - pts[i].y);
        let bx = f64::from(pts[k].x - pts[i].x);
        let by = f64::from(pts[k].y - pts[i].y);
        let cross = ax * by - ay * bx;
        let scale = ax.hypot(ay) * bx.hypot(by);
        cross.abs() <= 1e-9 * scale.max(1e-12)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn assert_close(a: Point2<f32>, b: Point2<f32>, tol: f32) {
        let dx = (a.x - b.x).abs();
        let dy = (a.y - b.y).abs();
        assert!(
            dx < tol && dy < tol,
            "expected ({:.6},{:.6}) ~ ({:.6},{:.6}) within {}",
            a.x,
            a.y,
            b.x,
            b.y,
            tol
        );
    }

    fn reference_box() -> [Point2<f32>; 4] {
        [
            Point2::new(0.0, 0.0),
            Point2::new(16.75, 0.0),
            Point2::new(16.75, 11.25),
            Point2::new(0.0, 11.25),
        ]
    }

    #[test]
    fn recovers_a_known_projective_mapping() {
        let ground_truth = PerspectiveTransform::new(Matrix3::new(
            0.8, 0.05, 120.0, //
            -0.02, 1.1, 80.0, //
            0.0009, -0.0004, 1.0,
        ));

        let reference = reference_box();
        let detected = reference.map(|p| ground_truth.apply(p).unwrap());

        let recovered =
            PerspectiveTransform::from_correspondence(&reference, &detected).unwrap();

        for p in [
            Point2::new(0.0_f32, 0.0),
            Point2::new(7.0, 4.25),
            Point2::new(15.25, 9.75),
        ] {
            assert_close(
                recovered.apply(p).unwrap(),
                ground_truth.apply(p).unwrap(),
                1e-3,
            );
        }
    }

    #[test]
    fn corner_images_round_trip_within_tolerance() {
        let reference = reference_box();
        let detected = [
            Point2::new(110.0_f32, 90.0),
            Point2::new(420.0_f32, 70.0),
            Point2::new(460.0_f32, 300.0),
            Point2::new(90.0_f32, 280.0),
        ];

        let t = PerspectiveTransform::from_correspondence(&reference, &detected).unwrap();
        for (r, d) in reference.iter().zip(&detected) {
            assert_close(t.apply(*r).unwrap(), *d, 1e-4);
        }
    }

    #[test]
    fn matching_correspondence_gives_identity() {
        let pts = [
            Point2::new(10.0_f32, 10.0),
            Point2::new(210.0_f32, 10.0),
            Point2::new(210.0_f32, 150.0),
            Point2::new(10.0_f32, 150.0),
        ];

        let t = PerspectiveTransform::from_correspondence(&pts, &pts).unwrap();
        for (a, b) in t.matrix().iter().zip(Matrix3::<f64>::identity().iter()) {
            assert_relative_eq!(*a, *b, epsilon = 1e-9);
        }
        for p in pts {
            assert_close(t.apply(p).unwrap(), p, 1e-4);
        }
    }

    #[test]
    fn collinear_reference_corners_are_degenerate() {
        let reference = [
            Point2::new(0.0_f32, 0.0),
            Point2::new(5.0_f32, 0.0),
            Point2::new(10.0_f32, 0.0),
            Point2::new(3.0_f32, 7.0),
        ];
        let detected = [
            Point2::new(10.0_f32, 10.0),
            Point2::new(210.0_f32, 10.0),
            Point2::new(210.0_f32, 150.0),
            Point2::new(10.0_f32, 150.0),
        ];

        assert_eq!(
            PerspectiveTransform::from_correspondence(&reference, &detected),
            Err(GeometryError::DegenerateTransform)
        );
    }

    #[test]
    fn coincident_detected_corners_are_degenerate() {
        let detected = [Point2::new(42.0_f32, 17.0); 4];
        assert_eq!(
            PerspectiveTransform::from_correspondence(&reference_box(), &detected),
            Err(GeometryError::DegenerateTransform)
        );
    }

    #[test]
    fn wrong_point_counts_are_invalid() {
        let three = [Point2::new(0.0_f32, 0.0); 3];
        let five = [Point2::new(0.0_f32, 0.0); 5];
        let four = reference_box();

        assert_eq!(
            PerspectiveTransform::from_correspondence(&three, &four),
            Err(GeometryError::InvalidGeometry { got: 3 })
        );
        assert_eq!(
            PerspectiveTransform::from_correspondence(&four, &five),
            Err(GeometryError::InvalidGeometry { got: 5 })
        );
    }

    #[test]
    fn composition_matches_sequential_application() {
        let t1 = PerspectiveTransform::new(Matrix3::new(
            1.2, 0.1, 5.0, //
            -0.05, 0.9, 3.0, //
            0.001, 0.0005, 1.0,
        ));
        let t2 = PerspectiveTransform::new(Matrix3::new(
            0.7, -0.02, 40.0, //
            0.03, 1.3, -12.0, //
            -0.0004, 0.0008, 1.0,
        ));

        for p in [
            Point2::new(0.0_f32, 0.0),
            Point2::new(60.0, 40.0),
            Point2::new(150.0, 120.0),
        ] {
            let sequential = t1.apply(t2.apply(p).unwrap()).unwrap();
            let composed = t1.compose(&t2).apply(p).unwrap();
            assert_close(composed, sequential, 1e-3);
        }
    }

    #[test]
    fn inverse_round_trips_points() {
        let t = PerspectiveTransform::new(Matrix3::new(
            1.2, 0.1, 5.0, //
            -0.05, 0.9, 3.0, //
            0.001, 0.0005, 1.0,
        ));
        let inv = t.try_inverse().expect("invertible");

        for p in [
            Point2::new(0.0_f32, 0.0),
            Point2::new(50.0_f32, -20.0),
            Point2::new(320.0_f32, 200.0),
        ] {
            let back = inv.apply(t.apply(p).unwrap()).unwrap();
            assert_close(back, p, 1e-3);
        }
    }
}
