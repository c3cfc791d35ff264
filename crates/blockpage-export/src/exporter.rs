//! Export orchestration.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;

use blockpage_model::{Canvas, Component};

use crate::archive::{self, ArchiveError, SiteArtifacts, ARCHIVE_NAME, SCRIPT_FILE, STYLESHEET_FILE};
use crate::assets::AssetPipeline;
use crate::bundle::AssetBundle;
use crate::fetch::{FetchConfig, FetchError, HttpFetcher, ImageFetcher};
use crate::markup::render_body;
use crate::resolver::ImageResolver;
use crate::stylesheet::generate_stylesheet;
use crate::templates::{Context, TemplateEngine};

/// Configuration for exporting a canvas.
#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// Title of the exported document
    pub title: String,

    /// File name the archive is delivered under
    pub archive_name: String,

    /// Minify `styles.css`
    pub minify_css: bool,

    /// Remote image download settings
    pub fetch: FetchConfig,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            title: "Landing Page".to_string(),
            archive_name: ARCHIVE_NAME.to_string(),
            minify_css: false,
            fetch: FetchConfig::default(),
        }
    }
}

/// What an export did.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExportReport {
    /// Number of components exported
    pub components: usize,

    /// Images written into the archive
    pub images_embedded: usize,

    /// Remote images left as URLs because the download failed
    pub images_kept_remote: usize,

    /// Inline images replaced by the placeholder because they could not be decoded
    pub images_replaced: usize,

    /// Total export time in milliseconds
    pub duration_ms: u64,
}

/// A finished archive, ready for delivery.
#[derive(Debug, Clone)]
pub struct ExportedArchive {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub report: ExportReport,
}

impl ExportedArchive {
    /// Write the archive into `dir` under its file name.
    ///
    /// The bytes go to a temporary file first and are renamed into place, so a failed
    /// write never leaves a partial archive behind.
    pub fn save_to(&self, dir: &Path) -> Result<PathBuf, ExportError> {
        fs::create_dir_all(dir).map_err(|e| ExportError::WriteError(e.to_string()))?;

        let target = dir.join(&self.file_name);
        let partial = dir.join(format!(".{}.partial", self.file_name));

        if let Err(e) = fs::write(&partial, &self.bytes) {
            let _ = fs::remove_file(&partial);
            return Err(ExportError::WriteError(format!("{}: {}", partial.display(), e)));
        }
        fs::rename(&partial, &target).map_err(|e| {
            let _ = fs::remove_file(&partial);
            ExportError::WriteError(format!("{}: {}", target.display(), e))
        })?;

        Ok(target)
    }
}

/// Errors that abort an export.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("Failed to set up image fetching: {0}")]
    Fetcher(#[from] FetchError),

    #[error("Failed to render template: {0}")]
    TemplateError(String),

    #[error("Failed to build archive: {0}")]
    Archive(#[from] ArchiveError),

    #[error("Failed to write output: {0}")]
    WriteError(String),
}

/// Turns component lists into static site archives.
pub struct Exporter {
    config: ExportConfig,
    resolver: ImageResolver,
    templates: TemplateEngine,
}

impl Exporter {
    /// Create an exporter that downloads remote images over HTTP.
    pub fn new(config: ExportConfig) -> Result<Self, ExportError> {
        let fetcher = HttpFetcher::new(&config.fetch)?;
        Self::with_fetcher(config, Arc::new(fetcher))
    }

    /// Create an exporter with a custom image source.
    pub fn with_fetcher(
        config: ExportConfig,
        fetcher: Arc<dyn ImageFetcher>,
    ) -> Result<Self, ExportError> {
        let templates =
            TemplateEngine::new().map_err(|e| ExportError::TemplateError(e.to_string()))?;

        Ok(Self {
            config,
            resolver: ImageResolver::new(fetcher),
            templates,
        })
    }

    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    /// Export a canvas.
    pub async fn export_canvas(&self, canvas: &Canvas) -> Result<ExportedArchive, ExportError> {
        self.export(canvas.components()).await
    }

    /// Export a component list.
    ///
    /// Waits for every image download before the archive is assembled. Image problems
    /// degrade single components; rendering and archive failures abort the export.
    pub async fn export(&self, components: &[Component]) -> Result<ExportedArchive, ExportError> {
        let start = Instant::now();

        let mut assets = AssetBundle::new();
        let resolved = self.resolver.resolve(components, &mut assets).await;

        let artifacts = self.render(&resolved.components)?;
        let bytes = archive::assemble(&artifacts, &assets)?;

        let report = ExportReport {
            components: components.len(),
            images_embedded: resolved.stats.embedded,
            images_kept_remote: resolved.stats.kept_remote,
            images_replaced: resolved.stats.replaced,
            duration_ms: start.elapsed().as_millis() as u64,
        };

        tracing::info!(
            "Exported {} components ({} images embedded, {} kept remote, {} replaced) in {}ms",
            report.components,
            report.images_embedded,
            report.images_kept_remote,
            report.images_replaced,
            report.duration_ms
        );

        Ok(ExportedArchive {
            file_name: self.config.archive_name.clone(),
            bytes,
            report,
        })
    }

    /// Render the three text files for already-resolved components.
    pub fn render(&self, components: &[Component]) -> Result<SiteArtifacts, ExportError> {
        let context = Context {
            title: self.config.title.clone(),
            body: render_body(components),
            stylesheet: STYLESHEET_FILE.to_string(),
            script: SCRIPT_FILE.to_string(),
        };
        let html = self
            .templates
            .render_document(&context)
            .map_err(|e| ExportError::TemplateError(e.to_string()))?;

        let css = generate_stylesheet(components);
        let css = if self.config.minify_css {
            AssetPipeline::minify_css(&css).unwrap_or_else(|e| {
                tracing::warn!("Keeping unminified stylesheet: {}", e);
                css
            })
        } else {
            css
        };

        Ok(SiteArtifacts {
            html,
            css,
            js: AssetPipeline::generate_js(),
        })
    }
}
