//! TOML file config store

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;

use crate::application::ports::ConfigStore;
use crate::domain::config::AppConfig;
use crate::domain::error::ConfigError;

const APP_DIR: &str = "wintoast";
const FILE_NAME: &str = "config.toml";

/// Config kept as one TOML file.
///
/// The default location is the platform config directory: `%APPDATA%` on
/// Windows, `$XDG_CONFIG_HOME` (or `~/.config`) on Linux.
#[derive(Debug, Clone)]
pub struct TomlFileStore {
    path: PathBuf,
}

impl TomlFileStore {
    /// Store at `<config dir>/wintoast/config.toml`
    pub fn new() -> Self {
        let base = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        Self::at(base.join(APP_DIR).join(FILE_NAME))
    }

    /// Store at an explicit file path
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn decode(content: &str) -> Result<AppConfig, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    fn encode(config: &AppConfig) -> Result<String, ConfigError> {
        toml::to_string_pretty(config).map_err(|e| ConfigError::WriteError(e.to_string()))
    }
}

impl Default for TomlFileStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ConfigStore for TomlFileStore {
    async fn load(&self) -> Result<AppConfig, ConfigError> {
        match fs::read_to_string(&self.path).await {
            Ok(content) => Self::decode(&content),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(AppConfig::empty()),
            Err(e) => Err(ConfigError::ReadError(e.to_string())),
        }
    }

    async fn save(&self, config: &AppConfig) -> Result<(), ConfigError> {
        let write_error = |e: std::io::Error| ConfigError::WriteError(e.to_string());

        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir).await.map_err(write_error)?;
        }

        // Write beside the target, then swap it in
        let staging = self.path.with_extension("toml.tmp");
        fs::write(&staging, Self::encode(config)?)
            .await
            .map_err(write_error)?;
        fs::rename(&staging, &self.path).await.map_err(write_error)?;

        tracing::debug!(path = %self.path.display(), "Config saved");
        Ok(())
    }

    fn path(&self) -> &Path {
        &self.path
    }

    fn exists(&self) -> bool {
        self.path.is_file()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_location_ends_with_app_file() {
        let store = TomlFileStore::new();
        assert!(store.path().ends_with(Path::new(APP_DIR).join(FILE_NAME)));
    }

    #[test]
    fn decode_reads_known_keys() {
        let config = TomlFileStore::decode(
            r#"
app_id = "Contoso.Mail"
template = "image-text02"
duration = "long"
expiration_ms = 15000
"#,
        )
        .unwrap();

        assert_eq!(config.app_id.as_deref(), Some("Contoso.Mail"));
        assert_eq!(config.template.as_deref(), Some("image-text02"));
        assert_eq!(config.duration.as_deref(), Some("long"));
        assert_eq!(config.expiration_ms, Some(15000));
        assert!(config.audio_mode.is_none());
    }

    #[test]
    fn decode_rejects_wrong_types() {
        let err = TomlFileStore::decode("expiration_ms = \"soon\"").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[tokio::test]
    async fn missing_file_loads_empty_config() {
        let dir = tempfile::tempdir().unwrap();
        let store = TomlFileStore::at(dir.path().join(FILE_NAME));
        assert!(!store.exists());
        assert_eq!(store.load().await.unwrap(), AppConfig::empty());
    }

    #[tokio::test]
    async fn init_writes_defaults_once() {
        let dir = tempfile::tempdir().unwrap();
        let store = TomlFileStore::at(dir.path().join("nested").join(FILE_NAME));

        store.init().await.unwrap();
        assert!(store.exists());
        assert_eq!(store.load().await.unwrap(), AppConfig::defaults());
        assert!(!dir.path().join("nested").join("config.toml.tmp").exists());

        assert!(matches!(store.init().await, Err(ConfigError::AlreadyExists(_))));
    }

    #[tokio::test]
    async fn corrupt_file_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(FILE_NAME);
        std::fs::write(&path, "template = [").unwrap();

        let store = TomlFileStore::at(&path);
        assert!(matches!(store.load().await, Err(ConfigError::ParseError(_))));
    }
}
