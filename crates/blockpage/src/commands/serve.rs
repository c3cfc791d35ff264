//! Export server command.

use std::path::{Path, PathBuf};

use anyhow::Result;
use blockpage_export::Exporter;
use blockpage_server::ExportServer;

use crate::config::load_config;

/// Run the serve command.
pub async fn run(
    config_path: &Path,
    port: Option<u16>,
    ui_dir: Option<PathBuf>,
    open: bool,
) -> Result<()> {
    let file_config = load_config(config_path)?;
    let config = file_config.server_config(port, ui_dir, open);

    if let Some(dir) = &config.ui_dir {
        if !dir.exists() {
            anyhow::bail!("UI directory not found: {}", dir.display());
        }
        tracing::info!("Serving editor UI from {}", dir.display());
    }

    let exporter = Exporter::new(file_config.export_config(None))?;

    ExportServer::new(config, exporter).start().await?;

    Ok(())
}
