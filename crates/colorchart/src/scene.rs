//! Minimal structure-from-motion scene reading.
//!
//! Scene-graph semantics (poses, intrinsics, landmarks) stay with the
//! producing application. This reader materializes only the sections a
//! caller asks for, which for chart localization means the `views` list.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::input::extension_lowercase;

#[derive(Debug, Error)]
pub enum SceneError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error("scene container '.{extension}' is recognized but not supported by this reader")]
    UnsupportedContainer { extension: String },
    #[error("unrecognized scene file extension for '{path}'")]
    UnrecognizedExtension { path: String },
}

/// One photograph referenced by a scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct View {
    #[serde(deserialize_with = "numeric_field")]
    pub view_id: u64,
    pub path: String,
    #[serde(default, deserialize_with = "opt_numeric_field")]
    pub width: Option<u64>,
    #[serde(default, deserialize_with = "opt_numeric_field")]
    pub height: Option<u64>,
}

/// The materialized parts of a scene document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    #[serde(default)]
    pub views: Vec<View>,
}

/// Selection of scene sections to materialize on load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneParts {
    pub views: bool,
}

impl SceneParts {
    pub const VIEWS: SceneParts = SceneParts { views: true };
}

/// Capability interface over scene storage.
pub trait SceneReader {
    fn load(&self, path: &Path, parts: SceneParts) -> Result<Scene, SceneError>;
}

/// Reader for `.sfm` scene documents, which are JSON with a `views` array.
///
/// `.abc` (Alembic) containers hold the same data in a binary form this
/// reader does not speak; they are recognized and rejected.
#[derive(Debug, Clone, Copy, Default)]
pub struct SfmJsonReader;

impl SceneReader for SfmJsonReader {
    fn load(&self, path: &Path, parts: SceneParts) -> Result<Scene, SceneError> {
        match extension_lowercase(path).as_deref() {
            Some("sfm") => {
                let raw = fs::read_to_string(path)?;
                let mut scene: Scene = serde_json::from_str(&raw)?;
                if !parts.views {
                    scene.views.clear();
                }
                Ok(scene)
            }
            Some("abc") => Err(SceneError::UnsupportedContainer {
                extension: "abc".to_string(),
            }),
            _ => Err(SceneError::UnrecognizedExtension {
                path: path.display().to_string(),
            }),
        }
    }
}

// Scene documents store numeric fields as JSON strings; accept both forms.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawNumber {
    Number(u64),
    Text(String),
}

impl RawNumber {
    fn value<E: serde::de::Error>(self) -> Result<u64, E> {
        match self {
            RawNumber::Number(n) => Ok(n),
            RawNumber::Text(s) => s.parse().map_err(E::custom),
        }
    }
}

fn numeric_field<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    RawNumber::deserialize(deserializer)?.value()
}

fn opt_numeric_field<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    match Option::<RawNumber>::deserialize(deserializer)? {
        Some(raw) => raw.value().map(Some),
        None => Ok(None),
    }
}
