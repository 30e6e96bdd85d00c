//! Per-image orchestration: decode, transcode, detect, emit outputs.

use std::path::{Path, PathBuf};

use log::{info, warn};

use colorchart_svg::{Stroke, SvgSurface};

use crate::colors::write_color_data;
use crate::core;
use crate::detector::{ChartDetector, DetectorError};
use crate::input::{classify_input, InputKind};
use crate::scene::{Scene, SceneError, SceneParts, SceneReader, SfmJsonReader};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Errors that abort a run.
///
/// Per-chart geometry failures are not among them: a chart whose overlay
/// cannot be built is logged and skipped, and the run keeps going.
#[derive(thiserror::Error, Debug)]
pub enum ProcessError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Scene(#[from] SceneError),

    #[error(transparent)]
    Detector(#[from] DetectorError),

    #[error("failed to load image '{}'", .path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("image '{}' is empty", .path.display())]
    EmptyImage { path: PathBuf },

    #[error("image and regex input expressions are not implemented; pass an '.sfm' scene file")]
    UnsupportedInput,
}

impl From<colorchart_svg::SvgError> for ProcessError {
    fn from(err: colorchart_svg::SvgError) -> Self {
        match err {
            colorchart_svg::SvgError::Io(io) => ProcessError::Io(io),
        }
    }
}

/// Options shared by a whole run.
#[derive(Debug, Clone)]
pub struct ProcessOptions {
    /// Path of the measured-colors text file. Debug SVGs land in its
    /// parent directory, named after each image's stem.
    pub output_color_data: PathBuf,
    /// Write an SVG overlay for every located chart.
    pub debug: bool,
}

/// What a run did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub images: usize,
    pub charts: usize,
}

/// Outcome of one image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageStatus {
    ChartsFound(usize),
    NoChart,
}

/// Process a whole input expression with the given backend.
///
/// Scene inputs (`.sfm`, `.abc`) are loaded and every view is processed in
/// order. Bare image paths and regex expressions are a reserved input mode
/// and are rejected rather than half-handled.
pub fn run<D>(
    detector: &D,
    input: &str,
    options: &ProcessOptions,
) -> Result<RunSummary, ProcessError>
where
    D: ChartDetector + ?Sized,
{
    match classify_input(input) {
        InputKind::Scene => {
            let scene = SfmJsonReader.load(Path::new(input), SceneParts::VIEWS)?;
            process_scene(detector, &scene, options)
        }
        InputKind::ImageExpression => Err(ProcessError::UnsupportedInput),
    }
}

/// Process every view of a loaded scene in order.
pub fn process_scene<D>(
    detector: &D,
    scene: &Scene,
    options: &ProcessOptions,
) -> Result<RunSummary, ProcessError>
where
    D: ChartDetector + ?Sized,
{
    let total = scene.views.len();
    let mut summary = RunSummary::default();
    for (idx, view) in scene.views.iter().enumerate() {
        info!("{}/{} - processing image '{}'", idx + 1, total, view.path);
        let status = process_image(detector, Path::new(&view.path), options)?;
        summary.images += 1;
        if let ImageStatus::ChartsFound(n) = status {
            summary.charts += n;
        }
    }
    Ok(summary)
}

/// Process a single photograph.
///
/// The image is decoded, transcoded to the BGR bytes detectors consume and
/// handed to the backend. Every located chart gets its colors written to
/// `options.output_color_data` (each chart replaces the file) and, in debug
/// mode, an SVG overlay next to it.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "info", skip_all, fields(path = %image_path.display()))
)]
pub fn process_image<D>(
    detector: &D,
    image_path: &Path,
    options: &ProcessOptions,
) -> Result<ImageStatus, ProcessError>
where
    D: ChartDetector + ?Sized,
{
    let decoded = image::open(image_path).map_err(|source| ProcessError::Image {
        path: image_path.to_path_buf(),
        source,
    })?;
    let rgba = decoded.to_rgba32f();
    let view = core::RgbaFImageView::new(
        rgba.width() as usize,
        rgba.height() as usize,
        rgba.as_raw(),
    )
    .filter(|view| !view.is_empty())
    .ok_or_else(|| ProcessError::EmptyImage {
        path: image_path.to_path_buf(),
    })?;
    let bgr = core::rgba_f32_to_bgr_u8(&view);

    let charts = detector.detect(&bgr.view())?;
    if charts.is_empty() {
        info!("no chart detected in '{}'", image_path.display());
        return Ok(ImageStatus::NoChart);
    }
    info!(
        "found {} chart(s) in '{}'",
        charts.len(),
        image_path.display()
    );

    let layout = core::ChartLayout::macbeth();
    for (chart_idx, chart) in charts.iter().enumerate() {
        if options.debug {
            match core::build_overlay(&chart.outer_box, &layout) {
                Ok(overlay) => {
                    let svg_path = debug_svg_path(&options.output_color_data, image_path);
                    let mut svg = SvgSurface::new(rgba.width(), rgba.height());
                    svg.draw_overlay(&overlay, &Stroke::default());
                    svg.write_to(&svg_path)?;
                    info!("wrote overlay '{}'", svg_path.display());
                }
                Err(err) => {
                    warn!(
                        "skipping overlay for chart {} in '{}': {}",
                        chart_idx,
                        image_path.display(),
                        err
                    );
                }
            }
        }

        let mut scaled = chart.patch_rgb;
        for patch in &mut scaled {
            for component in patch {
                *component /= 255.0;
            }
        }
        write_color_data(&options.output_color_data, &scaled)?;
    }

    Ok(ImageStatus::ChartsFound(charts.len()))
}

/// `<parent of the color data file>/<image stem>.svg`.
fn debug_svg_path(output_color_data: &Path, image_path: &Path) -> PathBuf {
    let stem = image_path.file_stem().unwrap_or(image_path.as_os_str());
    let dir = output_color_data.parent().unwrap_or(Path::new(""));
    // Append rather than set_extension: a dotted stem like `img.v2` must
    // stay intact.
    let mut name = stem.to_os_string();
    name.push(".svg");
    dir.join(name)
}
