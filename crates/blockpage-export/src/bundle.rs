//! Binary assets collected during an export.

/// Directory inside the archive that holds materialized images.
pub const IMAGES_DIR: &str = "images";

/// A named binary entry destined for the archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Asset {
    /// Path relative to the archive root
    pub path: String,
    pub bytes: Vec<u8>,
}

/// The archive-in-progress that image resolution writes into.
///
/// Entries keep the order they were added in.
#[derive(Debug, Clone, Default)]
pub struct AssetBundle {
    entries: Vec<Asset>,
}

impl AssetBundle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store an image under `images/<file_name>` and return that relative path.
    pub fn add_image(&mut self, file_name: &str, bytes: Vec<u8>) -> String {
        let path = format!("{}/{}", IMAGES_DIR, file_name);
        tracing::debug!("Bundled {} ({} bytes)", path, bytes.len());
        self.entries.push(Asset {
            path: path.clone(),
            bytes,
        });
        path
    }

    pub fn entries(&self) -> &[Asset] {
        &self.entries
    }

    pub fn get(&self, path: &str) -> Option<&Asset> {
        self.entries.iter().find(|a| a.path == path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
