//! Loading canvas documents from disk.

use std::fs;
use std::path::Path;

use crate::canvas::{Canvas, CanvasError};
use crate::component::Component;

/// Serialization format of a canvas document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
}

impl DocumentFormat {
    /// Pick a format from a file extension. Anything that is not YAML is read as JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => DocumentFormat::Yaml,
            _ => DocumentFormat::Json,
        }
    }
}

/// Errors that can occur when loading a canvas document.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("Invalid JSON canvas: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid YAML canvas: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Canvas(#[from] CanvasError),
}

/// Parse a canvas from a list of components.
pub fn parse_canvas(source: &str, format: DocumentFormat) -> Result<Canvas, LoadError> {
    let components: Vec<Component> = match format {
        DocumentFormat::Json => serde_json::from_str(source)?,
        DocumentFormat::Yaml => serde_yaml::from_str(source)?,
    };
    Ok(Canvas::from_components(components)?)
}

/// Read and parse a canvas document, choosing the format from the file extension.
pub fn load_canvas(path: &Path) -> Result<Canvas, LoadError> {
    let source = fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.display().to_string(),
        source,
    })?;
    parse_canvas(&source, DocumentFormat::from_path(path))
}
