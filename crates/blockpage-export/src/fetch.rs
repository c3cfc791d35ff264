//! Fetching remote images.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;

/// Bytes of a downloaded image and the content type the server declared for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedImage {
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
}

/// Errors that can occur when fetching an image.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("Failed to download {url}: {message}")]
    Request { url: String, message: String },

    #[error("Failed to download {url}: HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("HTTP client error: {0}")]
    Client(String),
}

/// Source of remote image bytes.
#[async_trait]
pub trait ImageFetcher: Send + Sync {
    /// Download the image at `url`.
    ///
    /// Any non-success response is an error.
    async fn fetch(&self, url: &str) -> Result<FetchedImage, FetchError>;
}

/// Settings for the HTTP image fetcher.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// User agent sent with every request
    pub user_agent: String,

    /// Per-request timeout; `None` waits indefinitely
    pub timeout: Option<Duration>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: format!("blockpage/{}", env!("CARGO_PKG_VERSION")),
            timeout: None,
        }
    }
}

/// Fetches images over HTTP(S).
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(config: &FetchConfig) -> Result<Self, FetchError> {
        let mut builder = reqwest::Client::builder().user_agent(config.user_agent.as_str());
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl ImageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedImage, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Request {
                url: url.to_string(),
                message: e.to_string(),
            })?;

        if !response.status().is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: response.status().as_u16(),
            });
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let bytes = response.bytes().await.map_err(|e| FetchError::Request {
            url: url.to_string(),
            message: format!("Failed to read image data: {}", e),
        })?;

        Ok(FetchedImage {
            bytes: bytes.to_vec(),
            content_type,
        })
    }
}

/// File extension for a MIME type, taken from its subtype.
///
/// Parameters are ignored (`image/png; charset=binary` gives `png`). Returns `None` when
/// the type has no usable subtype.
pub fn extension_for_mime(mime: &str) -> Option<String> {
    let essence = mime.split(';').next()?.trim().to_ascii_lowercase();
    let (_, subtype) = essence.split_once('/')?;

    let extension: String = match subtype {
        "svg+xml" => "svg".to_string(),
        "x-icon" | "vnd.microsoft.icon" => "ico".to_string(),
        other => other.chars().filter(|c| c.is_ascii_alphanumeric()).collect(),
    };

    if extension.is_empty() {
        None
    } else {
        Some(extension)
    }
}

/// File extension guessed from the path of a URL.
pub fn extension_for_url(url: &str) -> Option<String> {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    mime_guess::from_path(path)
        .first_raw()
        .and_then(extension_for_mime)
}
