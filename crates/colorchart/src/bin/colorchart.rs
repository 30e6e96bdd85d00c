//! Locate Macbeth color charts in the photographs of an SfM dataset and
//! export measured patch colors, with optional SVG debug overlays.

use std::path::PathBuf;

use clap::Parser;
use log::{error, info};

use colorchart::process::{run, ProcessOptions};

type CliError = Box<dyn std::error::Error>;
type CliResult<T> = Result<T, CliError>;

/// Locate color charts in a photo set and export per-patch colors.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// SfMData scene file ('.sfm') or an image filename/regex expression.
    #[arg(short, long)]
    input: String,

    /// Output path for the measured colors text file.
    #[arg(long)]
    output_color_data: PathBuf,

    /// Write an SVG overlay of every located chart next to the color data.
    #[arg(long)]
    debug: bool,

    /// Verbosity level (fatal, error, warning, info, debug, trace).
    #[arg(short, long, default_value = "info")]
    verbose_level: String,
}

#[cfg(feature = "tracing")]
fn init_logging(level: log::LevelFilter) -> CliResult<()> {
    // Route `log` records from the library into the tracing subscriber.
    tracing_log::LogTracer::init()?;
    colorchart::core::init_tracing(level, false);
    Ok(())
}

#[cfg(not(feature = "tracing"))]
fn init_logging(level: log::LevelFilter) -> CliResult<()> {
    colorchart::core::init_with_level(level)?;
    Ok(())
}

fn main() -> CliResult<()> {
    let cli = Cli::parse();

    let level = colorchart::core::parse_verbose_level(&cli.verbose_level)?;
    init_logging(level)?;

    let Some(detector) = colorchart::detector::compiled_backend() else {
        error!("no chart detection backend in this build");
        return Err("no chart detection backend is compiled into this binary; \
             implement `ChartDetector` and drive `colorchart::process::run` instead"
            .into());
    };

    let options = ProcessOptions {
        output_color_data: cli.output_color_data,
        debug: cli.debug,
    };
    let summary = run(detector.as_ref(), &cli.input, &options)?;
    info!(
        "processed {} image(s), found {} chart(s)",
        summary.images, summary.charts
    );
    Ok(())
}
