//! Configuration port interface

use std::path::Path;

use async_trait::async_trait;

use crate::domain::config::AppConfig;
use crate::domain::error::ConfigError;

/// Persistent storage for [`AppConfig`]
#[async_trait]
pub trait ConfigStore: Send + Sync {
    /// Read the stored config. A store with nothing saved yields an empty config.
    async fn load(&self) -> Result<AppConfig, ConfigError>;

    /// Replace the stored config
    async fn save(&self, config: &AppConfig) -> Result<(), ConfigError>;

    /// Location of the backing file
    fn path(&self) -> &Path;

    fn exists(&self) -> bool;

    /// Write the defaults. Fails with `AlreadyExists` if a config is stored.
    async fn init(&self) -> Result<(), ConfigError> {
        if self.exists() {
            return Err(ConfigError::AlreadyExists(
                self.path().to_string_lossy().into_owned(),
            ));
        }
        self.save(&AppConfig::defaults()).await
    }
}
