//! Image resolution: turns image references into files inside the export bundle.
//!
//! Inline `data:` images are decoded, remote images are downloaded, and both are written to
//! the [`AssetBundle`] as `images/image-<n>.<ext>`. `n` counts successfully bundled images
//! in list order, starting at 1. Remote downloads run concurrently, but names are handed
//! out in a second pass over the list so they never depend on which download finishes first.

use std::sync::Arc;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::Serialize;
use tokio::task::JoinHandle;

use blockpage_model::{Component, ComponentKind, PLACEHOLDER_IMAGE_URL};

use crate::bundle::AssetBundle;
use crate::fetch::{extension_for_mime, extension_for_url, FetchError, FetchedImage, ImageFetcher};

/// Extension used when neither the response nor the URL reveals the image type.
const FALLBACK_EXTENSION: &str = "bin";

/// Counts of what happened to the images of one export.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ResolveStats {
    /// Images written into the bundle
    pub embedded: usize,
    /// Remote images that could not be downloaded and keep their URL
    pub kept_remote: usize,
    /// Inline images that could not be decoded and now point at the placeholder
    pub replaced: usize,
}

/// Components with image references resolved, in the original order.
#[derive(Debug, Clone)]
pub struct ResolvedComponents {
    pub components: Vec<Component>,
    pub stats: ResolveStats,
}

/// Errors decoding an inline `data:` image.
#[derive(Debug, thiserror::Error)]
pub enum InlineImageError {
    #[error("data URI has no payload")]
    MissingPayload,

    #[error("data URI is not base64 encoded")]
    NotBase64,

    #[error("unsupported image type: {0}")]
    UnsupportedType(String),

    #[error("invalid base64 payload: {0}")]
    Decode(#[from] base64::DecodeError),
}

/// A decoded inline image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    pub extension: String,
    pub bytes: Vec<u8>,
}

/// How an image component's content should be treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ImageRef<'a> {
    Inline(&'a str),
    Remote(&'a str),
    Local,
}

fn classify(content: &str) -> ImageRef<'_> {
    let lower = content.get(..8).unwrap_or(content).to_ascii_lowercase();
    if content.starts_with("data:image") {
        ImageRef::Inline(content)
    } else if lower.starts_with("http://") || lower.starts_with("https://") {
        ImageRef::Remote(content)
    } else {
        ImageRef::Local
    }
}

/// A spawned download that is aborted when dropped.
///
/// Dropping an unfinished `resolve` future drops these, so downloads never outlive the export
/// that started them.
struct Download(JoinHandle<Result<FetchedImage, FetchError>>);

impl Download {
    fn spawn(fetcher: Arc<dyn ImageFetcher>, url: String) -> Self {
        Self(tokio::spawn(async move { fetcher.fetch(&url).await }))
    }

    async fn finish(mut self, url: &str) -> Result<FetchedImage, FetchError> {
        (&mut self.0).await.unwrap_or_else(|e| {
            Err(FetchError::Request {
                url: url.to_string(),
                message: e.to_string(),
            })
        })
    }
}

impl Drop for Download {
    fn drop(&mut self) {
        self.0.abort();
    }
}

/// Work prepared for one list entry before names are assigned.
enum Pending {
    Unchanged,
    Inline(Result<DecodedImage, InlineImageError>),
    Remote {
        url: String,
        download: Download,
    },
}

/// Resolves image components against an [`ImageFetcher`].
#[derive(Clone)]
pub struct ImageResolver {
    fetcher: Arc<dyn ImageFetcher>,
}

impl ImageResolver {
    pub fn new(fetcher: Arc<dyn ImageFetcher>) -> Self {
        Self { fetcher }
    }

    /// Resolve every image component, writing bundled images into `assets`.
    ///
    /// The input list is not modified. Failures are contained to the image they concern:
    /// a failed download keeps the original URL, undecodable inline data is replaced by the
    /// placeholder image. Neither consumes a file name.
    pub async fn resolve(
        &self,
        components: &[Component],
        assets: &mut AssetBundle,
    ) -> ResolvedComponents {
        // Start all downloads up front so they overlap.
        let pending: Vec<Pending> = components
            .iter()
            .map(|component| self.prepare(component))
            .collect();

        let mut stats = ResolveStats::default();
        let mut next_index = 1;
        let mut resolved = Vec::with_capacity(components.len());

        for (component, work) in components.iter().zip(pending) {
            let content = match work {
                Pending::Unchanged => None,
                Pending::Inline(Ok(image)) => {
                    let file_name = format!("image-{}.{}", next_index, image.extension);
                    next_index += 1;
                    stats.embedded += 1;
                    Some(assets.add_image(&file_name, image.bytes))
                }
                Pending::Inline(Err(e)) => {
                    tracing::warn!(
                        "Replacing undecodable inline image in component {}: {}",
                        component.id(),
                        e
                    );
                    stats.replaced += 1;
                    Some(PLACEHOLDER_IMAGE_URL.to_string())
                }
                Pending::Remote { url, download } => {
                    match download.finish(&url).await {
                        Ok(image) => {
                            let extension = image
                                .content_type
                                .as_deref()
                                .and_then(extension_for_mime)
                                .or_else(|| extension_for_url(&url))
                                .unwrap_or_else(|| FALLBACK_EXTENSION.to_string());
                            let file_name = format!("image-{}.{}", next_index, extension);
                            next_index += 1;
                            stats.embedded += 1;
                            Some(assets.add_image(&file_name, image.bytes))
                        }
                        Err(e) => {
                            tracing::warn!("Keeping remote image URL: {}", e);
                            stats.kept_remote += 1;
                            None
                        }
                    }
                }
            };

            resolved.push(match content {
                Some(content) => component.with_content(content),
                None => component.clone(),
            });
        }

        ResolvedComponents {
            components: resolved,
            stats,
        }
    }

    fn prepare(&self, component: &Component) -> Pending {
        if component.kind() != ComponentKind::Image {
            return Pending::Unchanged;
        }

        match classify(component.content()) {
            ImageRef::Inline(uri) => Pending::Inline(decode_data_uri(uri)),
            ImageRef::Remote(url) => {
                let download = Download::spawn(Arc::clone(&self.fetcher), url.to_string());
                Pending::Remote {
                    url: url.to_string(),
                    download,
                }
            }
            ImageRef::Local => Pending::Unchanged,
        }
    }
}

/// Decode a `data:image/<type>;base64,<payload>` URI.
pub fn decode_data_uri(uri: &str) -> Result<DecodedImage, InlineImageError> {
    let rest = uri.strip_prefix("data:").unwrap_or(uri);
    let (header, payload) = rest
        .split_once(',')
        .ok_or(InlineImageError::MissingPayload)?;

    let mut params = header.split(';');
    let mime = params.next().unwrap_or_default();
    if !params.any(|p| p.trim().eq_ignore_ascii_case("base64")) {
        return Err(InlineImageError::NotBase64);
    }

    let extension =
        extension_for_mime(mime).ok_or_else(|| InlineImageError::UnsupportedType(mime.to_string()))?;

    let payload: String = payload.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    if payload.is_empty() {
        return Err(InlineImageError::MissingPayload);
    }
    let bytes = STANDARD.decode(payload)?;

    Ok(DecodedImage { extension, bytes })
}
