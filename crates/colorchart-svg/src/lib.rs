//! SVG rendering of chart debug overlays.
//!
//! A small hand-rolled writer: enough to put stroked, unfilled polylines
//! into a well-formed SVG document sized like the photograph they annotate.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use thiserror::Error;

use colorchart_core::{ChartOverlay, Quad};

#[derive(Debug, Error)]
pub enum SvgError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Stroke style for overlay outlines.
#[derive(Clone, Debug, PartialEq)]
pub struct Stroke {
    pub color: String,
    pub width: f32,
}

impl Default for Stroke {
    /// Red with width 2, the usual debug-overlay style.
    fn default() -> Self {
        Self {
            color: "red".to_string(),
            width: 2.0,
        }
    }
}

/// An SVG document under construction, sized in pixels.
#[derive(Clone, Debug)]
pub struct SvgSurface {
    width: u32,
    height: u32,
    body: String,
}

impl SvgSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            body: String::new(),
        }
    }

    /// Append one closed quad as a stroked polyline.
    pub fn draw_quad(&mut self, quad: &Quad, stroke: &Stroke) {
        let mut points = String::new();
        for p in quad.points() {
            if !points.is_empty() {
                points.push(' ');
            }
            let _ = write!(points, "{},{}", p.x, p.y);
        }
        let _ = writeln!(
            self.body,
            r#"  <polyline points="{points}" fill="none" stroke="{color}" stroke-width="{width}"/>"#,
            color = stroke.color,
            width = stroke.width,
        );
    }

    /// Append all 25 quads of an overlay in draw order.
    pub fn draw_overlay(&mut self, overlay: &ChartOverlay, stroke: &Stroke) {
        for quad in overlay.quads() {
            self.draw_quad(quad, stroke);
        }
    }

    /// The complete document.
    pub fn into_string(self) -> String {
        format!(
            concat!(
                "<?xml version=\"1.0\" standalone=\"yes\"?>\n",
                "<svg xmlns=\"http://www.w3.org/2000/svg\" ",
                "width=\"{}\" height=\"{}\" version=\"1.1\">\n",
                "{}</svg>\n"
            ),
            self.width, self.height, self.body
        )
    }

    /// Write the document to `path`; the file handle closes before return.
    pub fn write_to(self, path: &Path) -> Result<(), SvgError> {
        fs::write(path, self.into_string())?;
        Ok(())
    }
}
