//! Input expression classification.

use std::path::Path;

/// Scene container extensions this tool recognizes.
pub const SCENE_EXTENSIONS: [&str; 2] = ["sfm", "abc"];

/// How a command-line input expression is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    /// A structure-from-motion scene file listing the views to process.
    Scene,
    /// A single image path or a filename regex; reserved, not implemented.
    ImageExpression,
}

/// Classify an input expression by its extension, ASCII-case-insensitively.
pub fn classify_input(input: &str) -> InputKind {
    match extension_lowercase(Path::new(input)) {
        Some(ext) if SCENE_EXTENSIONS.contains(&ext.as_str()) => InputKind::Scene,
        _ => InputKind::ImageExpression,
    }
}

pub(crate) fn extension_lowercase(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
}
