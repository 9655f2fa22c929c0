//! Config command handler

use tracing_subscriber::EnvFilter;

use crate::application::ports::ConfigStore;
use crate::domain::config::AppConfig;
use crate::domain::error::ConfigError;
use crate::domain::toast::{AudioOption, TemplateKind, ToastDuration};

use super::args::{is_valid_config_key, ConfigAction, VALID_CONFIG_KEYS};
use super::presenter::{Presenter, NOT_SET};

/// Handle config subcommand
pub async fn handle_config_command<S: ConfigStore>(
    action: ConfigAction,
    store: &S,
    presenter: &Presenter,
) -> Result<(), ConfigError> {
    match action {
        ConfigAction::Init => handle_init(store, presenter).await,
        ConfigAction::Set { key, value } => handle_set(store, presenter, &key, &value).await,
        ConfigAction::Get { key } => handle_get(store, presenter, &key).await,
        ConfigAction::List => handle_list(store, presenter).await,
        ConfigAction::Path => handle_path(store, presenter),
    }
}

async fn handle_init<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    store.init().await?;
    presenter.success(&format!(
        "Config file created at: {}",
        store.path().display()
    ));
    Ok(())
}

async fn handle_set<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
    value: &str,
) -> Result<(), ConfigError> {
    ensure_valid_key(key)?;
    let mut config = store.load().await?;
    apply_config_value(&mut config, key, value)?;
    store.save(&config).await?;
    presenter.success(&format!("{} = {}", key, value));
    Ok(())
}

async fn handle_get<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
) -> Result<(), ConfigError> {
    ensure_valid_key(key)?;
    let config = store.load().await?;
    presenter.output(config_value(&config, key).as_deref().unwrap_or(NOT_SET));
    Ok(())
}

async fn handle_list<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    let config = store.load().await?;
    for key in VALID_CONFIG_KEYS {
        presenter.key_value(key, config_value(&config, key).as_deref().unwrap_or(NOT_SET));
    }
    Ok(())
}

fn handle_path<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    presenter.output(&store.path().to_string_lossy());
    Ok(())
}

fn ensure_valid_key(key: &str) -> Result<(), ConfigError> {
    if is_valid_config_key(key) {
        return Ok(());
    }
    Err(ConfigError::ValidationError {
        key: key.to_string(),
        message: format!("Unknown key. Valid keys: {}", VALID_CONFIG_KEYS.join(", ")),
    })
}

fn invalid(key: &str, message: impl ToString) -> ConfigError {
    ConfigError::ValidationError {
        key: key.to_string(),
        message: message.to_string(),
    }
}

/// Validate `value` for `key` and store it in canonical form
fn apply_config_value(config: &mut AppConfig, key: &str, value: &str) -> Result<(), ConfigError> {
    match key {
        "app_id" => {
            if value.trim().is_empty() {
                return Err(invalid(key, "Value must not be empty"));
            }
            config.app_id = Some(value.to_string());
        }
        "template" => {
            let kind = value.parse::<TemplateKind>().map_err(|e| invalid(key, e))?;
            config.template = Some(kind.to_string());
        }
        "duration" => {
            let duration = value.parse::<ToastDuration>().map_err(|e| invalid(key, e))?;
            config.duration = Some(duration.to_string());
        }
        "audio_mode" => {
            let mode = value.parse::<AudioOption>().map_err(|e| invalid(key, e))?;
            config.audio_mode = Some(mode.to_string());
        }
        "expiration_ms" => {
            let millis = value
                .trim()
                .parse::<i64>()
                .ok()
                .filter(|ms| *ms >= 0)
                .ok_or_else(|| invalid(key, "Value must be a non-negative number of milliseconds"))?;
            config.expiration_ms = Some(millis);
        }
        "log_level" => {
            EnvFilter::try_new(value).map_err(|e| invalid(key, e))?;
            config.log_level = Some(value.to_string());
        }
        _ => return Err(invalid(key, "Unknown key")),
    }
    Ok(())
}

fn config_value(config: &AppConfig, key: &str) -> Option<String> {
    match key {
        "app_id" => config.app_id.clone(),
        "template" => config.template.clone(),
        "duration" => config.duration.clone(),
        "audio_mode" => config.audio_mode.clone(),
        "expiration_ms" => config.expiration_ms.map(|ms| ms.to_string()),
        "log_level" => config.log_level.clone(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::TomlFileStore;

    #[test]
    fn template_is_stored_canonically() {
        let mut config = AppConfig::empty();
        apply_config_value(&mut config, "template", "ToastImageAndText03").unwrap();
        assert_eq!(config.template.as_deref(), Some("image-text03"));
    }

    #[test]
    fn invalid_values_are_rejected() {
        let mut config = AppConfig::empty();
        assert!(apply_config_value(&mut config, "duration", "forever").is_err());
        assert!(apply_config_value(&mut config, "audio_mode", "loud").is_err());
        assert!(apply_config_value(&mut config, "expiration_ms", "-5").is_err());
        assert!(apply_config_value(&mut config, "expiration_ms", "soon").is_err());
        assert!(apply_config_value(&mut config, "app_id", "  ").is_err());
        assert_eq!(config, AppConfig::empty());
    }

    #[test]
    fn expiration_round_trips_through_get() {
        let mut config = AppConfig::empty();
        apply_config_value(&mut config, "expiration_ms", "2500").unwrap();
        assert_eq!(config_value(&config, "expiration_ms").as_deref(), Some("2500"));
    }

    #[test]
    fn unknown_key_is_rejected() {
        let err = ensure_valid_key("api_key").unwrap_err();
        assert!(err.to_string().contains("Valid keys"));
    }

    #[tokio::test]
    async fn set_then_get_persists() {
        let dir = tempfile::tempdir().unwrap();
        let store = TomlFileStore::at(dir.path().join("config.toml"));
        let presenter = Presenter::new();

        handle_config_command(
            ConfigAction::Set {
                key: "audio_mode".to_string(),
                value: "Silent".to_string(),
            },
            &store,
            &presenter,
        )
        .await
        .unwrap();

        let config = store.load().await.unwrap();
        assert_eq!(config.audio_mode.as_deref(), Some("silent"));
    }
}
