//! Canvas export command.

use std::path::Path;

use anyhow::{Context, Result};
use blockpage_export::Exporter;
use blockpage_model::load_canvas;

use crate::config::load_config;

/// Run the export command.
pub async fn run(
    config_path: &Path,
    canvas_path: &Path,
    output: &Path,
    minify: Option<bool>,
) -> Result<()> {
    tracing::info!("Exporting {}...", canvas_path.display());

    let file_config = load_config(config_path)?;
    let canvas = load_canvas(canvas_path)
        .with_context(|| format!("Failed to load canvas {}", canvas_path.display()))?;

    let exporter = Exporter::new(file_config.export_config(minify))?;
    let archive = exporter.export_canvas(&canvas).await?;
    let path = archive.save_to(output)?;

    if archive.report.images_kept_remote > 0 {
        tracing::warn!(
            "{} remote images could not be downloaded and are still linked by URL",
            archive.report.images_kept_remote
        );
    }

    tracing::info!("Output: {}", path.display());

    Ok(())
}
