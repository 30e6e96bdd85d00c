//! Measured-color serialization.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Write one chart's patch colors as plain text: one component per line,
/// patch-major, R then G then B, at full round-trip precision.
///
/// An existing file at `path` is replaced.
pub fn write_color_data(path: &Path, patches: &[[f64; 3]; 24]) -> std::io::Result<()> {
    let file = File::create(path)?;
    let mut out = BufWriter::new(file);
    for patch in patches {
        for component in patch {
            writeln!(out, "{component}")?;
        }
    }
    out.flush()
}
