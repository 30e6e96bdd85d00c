use thiserror::Error;

/// Failures of the overlay geometry pipeline.
///
/// All variants are hard precondition or degeneracy failures. They are
/// never retried; callers drop the offending chart and keep going with the
/// remaining charts and images.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GeometryError {
    /// A quad or correspondence was given a point sequence whose length is
    /// not exactly 4.
    #[error("expected exactly 4 corner points, got {got}")]
    InvalidGeometry { got: usize },

    /// The 4-point correspondence does not pin down a projective mapping.
    #[error("degenerate perspective transform: reference corners are collinear or the system is singular")]
    DegenerateTransform,

    /// A mapped point came out with a zero homogeneous weight.
    #[error("division by zero while normalizing the image of point ({x}, {y})")]
    DivisionByZero { x: f32, y: f32 },
}
