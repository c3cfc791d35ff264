//! Static site export for blockpage canvases.
//!
//! Turns an ordered list of components into a self-contained site archive: image references
//! are materialized into files, each component is rendered to markup and CSS, and the result
//! is zipped together with a small behavior script.

pub mod archive;
pub mod assets;
pub mod bundle;
pub mod exporter;
pub mod fetch;
pub mod markup;
pub mod resolver;
pub mod stylesheet;
pub mod templates;

pub use archive::{ArchiveError, SiteArtifacts, ARCHIVE_NAME};
pub use bundle::{Asset, AssetBundle};
pub use exporter::{ExportConfig, ExportError, ExportReport, ExportedArchive, Exporter};
pub use fetch::{FetchConfig, FetchError, FetchedImage, HttpFetcher, ImageFetcher};
pub use resolver::{ImageResolver, ResolveStats, ResolvedComponents};
