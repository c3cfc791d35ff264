//! Configuration file (blockpage.toml).

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

use blockpage_export::{ExportConfig, FetchConfig, ARCHIVE_NAME};
use blockpage_server::ServerConfig;

#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    #[serde(default)]
    pub export: ExportSettings,
    #[serde(default)]
    pub fetch: FetchSettings,
    #[serde(default)]
    pub server: ServerSettings,
}

#[derive(Debug, Deserialize)]
pub struct ExportSettings {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_archive_name")]
    pub archive_name: String,
    #[serde(default)]
    pub minify_css: bool,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            title: default_title(),
            archive_name: default_archive_name(),
            minify_css: false,
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct FetchSettings {
    pub user_agent: Option<String>,
    /// Per-request timeout; unset waits indefinitely
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub ui_dir: Option<String>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            ui_dir: None,
        }
    }
}

fn default_title() -> String {
    "Landing Page".to_string()
}
fn default_archive_name() -> String {
    ARCHIVE_NAME.to_string()
}
fn default_host() -> String {
    "127.0.0.1".to_string()
}
fn default_port() -> u16 {
    7878
}

impl ConfigFile {
    /// Export settings, with `minify` overriding the file when given.
    pub fn export_config(&self, minify: Option<bool>) -> ExportConfig {
        let mut fetch = FetchConfig::default();
        if let Some(user_agent) = &self.fetch.user_agent {
            fetch.user_agent = user_agent.clone();
        }
        fetch.timeout = self.fetch.timeout_secs.map(Duration::from_secs);

        ExportConfig {
            title: self.export.title.clone(),
            archive_name: self.export.archive_name.clone(),
            minify_css: minify.unwrap_or(self.export.minify_css),
            fetch,
        }
    }

    /// Server settings, with command-line values overriding the file.
    pub fn server_config(
        &self,
        port: Option<u16>,
        ui_dir: Option<PathBuf>,
        open: bool,
    ) -> ServerConfig {
        ServerConfig {
            host: self.server.host.clone(),
            port: port.unwrap_or(self.server.port),
            open,
            ui_dir: ui_dir.or_else(|| self.server.ui_dir.as_ref().map(PathBuf::from)),
        }
    }
}

/// Load configuration from `path` if it exists.
/// Returns an error if the config file exists but is malformed.
pub fn load_config(path: &Path) -> Result<ConfigFile> {
    if path.exists() {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: ConfigFile = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        tracing::info!("Loaded config from {}", path.display());
        return Ok(config);
    }
    Ok(ConfigFile::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_gives_defaults() {
        let config = load_config(Path::new("/nonexistent/blockpage.toml")).unwrap();
        let export = config.export_config(None);

        assert_eq!(export.title, "Landing Page");
        assert_eq!(export.archive_name, "landing-page.zip");
        assert!(!export.minify_css);
        assert!(export.fetch.timeout.is_none());
    }

    #[test]
    fn reads_sections() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("blockpage.toml");
        fs::write(
            &path,
            r#"
[export]
title = "Launch"
minify_css = true

[fetch]
timeout_secs = 10

[server]
port = 9000
ui_dir = "editor/dist"
"#,
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        let export = config.export_config(Some(false));
        let server = config.server_config(None, None, false);

        assert_eq!(export.title, "Launch");
        assert!(!export.minify_css);
        assert_eq!(export.fetch.timeout, Some(Duration::from_secs(10)));
        assert_eq!(server.port, 9000);
        assert_eq!(server.ui_dir, Some(PathBuf::from("editor/dist")));
    }

    #[test]
    fn flags_override_file() {
        let config = ConfigFile::default();
        let server = config.server_config(Some(8080), Some(PathBuf::from("ui")), true);

        assert_eq!(server.port, 8080);
        assert_eq!(server.ui_dir, Some(PathBuf::from("ui")));
        assert!(server.open);
    }

    #[test]
    fn rejects_malformed_file() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("blockpage.toml");
        fs::write(&path, "[export\ntitle = ").unwrap();

        assert!(load_config(&path).is_err());
    }
}
