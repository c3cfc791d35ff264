//! Archive assembly.

use std::io::{Cursor, Write};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::bundle::{AssetBundle, IMAGES_DIR};

/// File name the archive is delivered under.
pub const ARCHIVE_NAME: &str = "landing-page.zip";
pub const INDEX_FILE: &str = "index.html";
pub const STYLESHEET_FILE: &str = "styles.css";
pub const SCRIPT_FILE: &str = "script.js";

/// The three generated text files of a site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteArtifacts {
    pub html: String,
    pub css: String,
    pub js: String,
}

/// Errors that can occur while building the archive.
#[derive(Debug, thiserror::Error)]
pub enum ArchiveError {
    #[error("Zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Zip the site files and bundled images into an in-memory archive.
///
/// Layout: `index.html`, `styles.css`, `script.js` at the root and an `images/` directory
/// holding every bundled asset. The directory is present even when no image was bundled.
pub fn assemble(artifacts: &SiteArtifacts, assets: &AssetBundle) -> Result<Vec<u8>, ArchiveError> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .unix_permissions(0o644);

    for (name, text) in [
        (INDEX_FILE, &artifacts.html),
        (STYLESHEET_FILE, &artifacts.css),
        (SCRIPT_FILE, &artifacts.js),
    ] {
        zip.start_file(name, options)?;
        zip.write_all(text.as_bytes())?;
    }

    zip.add_directory(format!("{}/", IMAGES_DIR), options.unix_permissions(0o755))?;
    for asset in assets.entries() {
        zip.start_file(asset.path.as_str(), options)?;
        zip.write_all(&asset.bytes)?;
    }

    let cursor = zip.finish()?;
    Ok(cursor.into_inner())
}

#[cfg(test)]
mod tests {
    use std::io::Read;

    use super::*;
    use pretty_assertions::assert_eq;
    use zip::ZipArchive;

    fn artifacts() -> SiteArtifacts {
        SiteArtifacts {
            html: "<!DOCTYPE html>".to_string(),
            css: ".container {}".to_string(),
            js: "// js".to_string(),
        }
    }

    #[test]
    fn archive_has_fixed_layout() {
        let mut assets = AssetBundle::new();
        assets.add_image("image-1.png", vec![7, 7, 7]);

        let bytes = assemble(&artifacts(), &assets).unwrap();
        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();

        let names: Vec<String> = archive.file_names().map(str::to_string).collect();
        for expected in ["index.html", "styles.css", "script.js", "images/", "images/image-1.png"] {
            assert!(names.iter().any(|n| n == expected), "missing {}", expected);
        }

        let mut css = String::new();
        archive
            .by_name("styles.css")
            .unwrap()
            .read_to_string(&mut css)
            .unwrap();
        assert_eq!(css, ".container {}");

        let mut image = Vec::new();
        archive
            .by_name("images/image-1.png")
            .unwrap()
            .read_to_end(&mut image)
            .unwrap();
        assert_eq!(image, vec![7, 7, 7]);
    }

    #[test]
    fn images_dir_exists_without_images() {
        let bytes = assemble(&artifacts(), &AssetBundle::new()).unwrap();
        let archive = ZipArchive::new(Cursor::new(bytes)).unwrap();

        assert_eq!(archive.len(), 4);
        assert!(archive.file_names().any(|n| n == "images/"));
    }
}
