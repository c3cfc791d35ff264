//! Write a starter config and sample canvas.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Run the init command.
pub async fn run(config_path: &Path, yes: bool) -> Result<()> {
    tracing::info!("Initializing blockpage...");

    write_if_absent(config_path, DEFAULT_CONFIG, yes)?;

    let canvas_path = config_path
        .parent()
        .unwrap_or(Path::new(""))
        .join("canvas.json");
    write_if_absent(&canvas_path, SAMPLE_CANVAS, yes)?;

    tracing::info!("Initialization complete!");
    tracing::info!(
        "Run 'blockpage export {}' to build landing-page.zip.",
        canvas_path.display()
    );

    Ok(())
}

fn write_if_absent(path: &Path, content: &str, overwrite: bool) -> Result<()> {
    if path.exists() && !overwrite {
        tracing::warn!("{} already exists. Use --yes to overwrite.", path.display());
        return Ok(());
    }
    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::info!("Created {}", path.display());
    Ok(())
}

const DEFAULT_CONFIG: &str = r#"# Blockpage Configuration

[export]
# Title of the exported page
title = "Landing Page"

# File name of the exported archive
archive_name = "landing-page.zip"

# Minify styles.css
minify_css = false

[fetch]
# Seconds to wait for each remote image (unset waits indefinitely)
# timeout_secs = 30

[server]
host = "127.0.0.1"
port = 7878
# Directory holding the editor UI
# ui_dir = "editor/dist"
"#;

const SAMPLE_CANVAS: &str = r##"[
  {
    "id": "heading-1",
    "type": "heading",
    "content": "Build pages in minutes",
    "style": {
      "fontSize": "2.5rem",
      "fontWeight": "bold",
      "color": "#111111",
      "marginBottom": "1rem"
    }
  },
  {
    "id": "paragraph-1",
    "type": "paragraph",
    "content": "Drag blocks onto the canvas, edit them in place and export a static site.",
    "style": {
      "fontSize": "1rem",
      "color": "#666666",
      "lineHeight": "1.6",
      "marginBottom": "1rem"
    }
  },
  {
    "id": "image-1",
    "type": "image",
    "content": "https://docs.commercetools.com/frontend-studio/static/f01928f2c694c4f3372daf8bdb8d3c28/8201f/empty-page-builder-overview-new.png",
    "style": {
      "maxWidth": "100%",
      "height": "auto",
      "display": "block",
      "marginBottom": "1rem"
    }
  },
  {
    "id": "button-1",
    "type": "button",
    "content": "Get started",
    "style": {
      "padding": "0.5rem 1rem",
      "backgroundColor": "#0070f3",
      "color": "#ffffff",
      "borderRadius": "0.25rem",
      "border": "none"
    }
  }
]
"##;
