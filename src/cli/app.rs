//! Command runners for the toast subcommands

use std::env;
use std::process::ExitCode;
use std::time::Duration;

use serde_json::json;

use crate::application::ports::ConfigStore;
use crate::application::ToastHandler;
use crate::domain::config::AppConfig;
use crate::domain::error::{ConfigError, ToastError};
use crate::domain::toast::{AudioSystemFile, ToastTemplate, ALL_SYSTEM_SOUNDS};
use crate::infrastructure::{create_preview_service, create_service};

use super::args::ToastArgs;
use super::presenter::Presenter;

/// Exit codes
pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;
pub const EXIT_USAGE_ERROR: u8 = 2;

/// Environment variable overriding the configured app id
pub const APP_ID_ENV: &str = "WINTOAST_APP_ID";

/// Build the toast descriptor from arguments and merged config
pub fn build_template(args: &ToastArgs, config: &AppConfig) -> Result<ToastTemplate, String> {
    let kind = config.template_or_default().map_err(|e| e.to_string())?;
    let duration = config.duration_or_default().map_err(|e| e.to_string())?;
    let audio_mode = config.audio_mode_or_default().map_err(|e| e.to_string())?;
    let expiration_ms = config.expiration_ms_or_default();
    if expiration_ms < 0 {
        return Err(format!(
            "Invalid expiration: {} ms. Must be zero or positive",
            expiration_ms
        ));
    }

    let mut template = ToastTemplate::new(kind)
        .with_text_fields(args.text.iter().cloned())
        .with_duration(duration)
        .with_audio_option(audio_mode)
        .with_expiration_ms(expiration_ms);

    for action in &args.actions {
        template = template.with_action(action.clone());
    }
    if let Some(ref image) = args.image {
        template = template.with_image_path(image.clone());
    }
    if let Some(ref audio) = args.audio {
        template = template.with_audio_path(resolve_audio(audio));
    }
    if let Some(ref attribution) = args.attribution {
        template = template.with_attribution_text(attribution.clone());
    }

    Ok(template)
}

/// A system sound name becomes its URI; anything else is used verbatim
pub fn resolve_audio(value: &str) -> String {
    match value.parse::<AudioSystemFile>() {
        Ok(sound) => sound.system_file_path().to_string(),
        Err(_) => value.to_string(),
    }
}

/// Materialize a toast on the in-memory platform and return its XML
pub fn render_preview(template: &ToastTemplate, app_id: &str) -> Result<String, ToastError> {
    let service = create_preview_service(app_id);
    service.initialize()?;
    service.show_toast(template, &ToastHandler::new())?;

    service
        .platform()
        .displayed()
        .last()
        .map(|notification| notification.xml().to_string())
        .ok_or(ToastError::NotDisplayed)
}

/// Print the XML for a toast
pub fn run_preview(args: &ToastArgs, config: &AppConfig) -> ExitCode {
    let presenter = Presenter::new();

    let template = match build_template(args, config) {
        Ok(t) => t,
        Err(e) => {
            presenter.error(&e);
            return ExitCode::from(EXIT_USAGE_ERROR);
        }
    };

    match render_preview(&template, config.app_id_or_default()) {
        Ok(xml) => {
            presenter.output(&xml);
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            report_toast_error(&presenter, e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}

/// Show a toast, then optionally hide it and wait for its first event
pub async fn run_show(
    args: &ToastArgs,
    config: &AppConfig,
    wait: Option<u64>,
    hide_after: Option<u64>,
) -> ExitCode {
    let mut presenter = Presenter::new();

    let template = match build_template(args, config) {
        Ok(t) => t,
        Err(e) => {
            presenter.error(&e);
            return ExitCode::from(EXIT_USAGE_ERROR);
        }
    };

    let service = create_service(config.app_id_or_default());
    if let Err(e) = service.initialize() {
        report_toast_error(&presenter, e);
        return ExitCode::from(EXIT_ERROR);
    }

    let (handler, mut events) = ToastHandler::channel();
    let id = match service.show_toast(&template, &handler) {
        Ok(id) => id,
        Err(e) => {
            report_toast_error(&presenter, e);
            return ExitCode::from(EXIT_ERROR);
        }
    };
    presenter.output(&id.to_string());

    if let Some(ms) = hide_after {
        tokio::time::sleep(Duration::from_millis(ms)).await;
        if let Err(e) = service.hide_toast(id) {
            report_toast_error(&presenter, e);
            return ExitCode::from(EXIT_ERROR);
        }
        presenter.info("Toast hidden");
    }

    let Some(secs) = wait else {
        return ExitCode::from(EXIT_SUCCESS);
    };

    presenter.start_spinner("Waiting for the toast...");
    tokio::select! {
        event = events.recv() => match event {
            Some(event) => {
                presenter.stop_spinner();
                presenter.output(&event.to_string());
            }
            None => {
                presenter.spinner_fail("Toast event channel closed");
                return ExitCode::from(EXIT_ERROR);
            }
        },
        _ = tokio::time::sleep(Duration::from_secs(secs)) => {
            presenter.spinner_fail(&format!("No toast event within {}s", secs));
        }
        _ = tokio::signal::ctrl_c() => {
            presenter.stop_spinner();
            presenter.warn("Interrupted");
        }
    }

    ExitCode::from(EXIT_SUCCESS)
}

/// Report platform capabilities
pub fn run_check(config: &AppConfig) -> ExitCode {
    let presenter = Presenter::new();
    let service = create_service(config.app_id_or_default());

    let compatible = service.is_compatible();
    presenter.key_value("compatible", yes_no(compatible));
    presenter.key_value("modern_features", yes_no(service.supports_modern_features()));
    presenter.key_value("app_id", service.app_user_model_id());

    if compatible {
        ExitCode::from(EXIT_SUCCESS)
    } else {
        ExitCode::from(EXIT_ERROR)
    }
}

/// List the system sounds
pub fn run_sounds(as_json: bool) -> ExitCode {
    let presenter = Presenter::new();

    if as_json {
        let sounds: Vec<_> = ALL_SYSTEM_SOUNDS
            .iter()
            .map(|sound| json!({ "name": sound.as_str(), "uri": sound.system_file_path() }))
            .collect();
        match serde_json::to_string_pretty(&sounds) {
            Ok(text) => presenter.output(&text),
            Err(e) => {
                presenter.error(&format!("Failed to encode sounds: {}", e));
                return ExitCode::from(EXIT_ERROR);
            }
        }
    } else {
        for sound in ALL_SYSTEM_SOUNDS {
            presenter.key_value(sound.as_str(), sound.system_file_path());
        }
    }

    ExitCode::from(EXIT_SUCCESS)
}

/// Load and merge configuration from file, env, and CLI.
///
/// An unreadable file is skipped and its error handed back so it can be
/// reported once logging is up.
pub async fn load_merged_config<S: ConfigStore>(
    store: &S,
    cli_config: AppConfig,
) -> (AppConfig, Option<ConfigError>) {
    let (file_config, load_error) = match store.load().await {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::empty(), Some(e)),
    };

    let env_config = AppConfig {
        app_id: env::var(APP_ID_ENV).ok().filter(|s| !s.trim().is_empty()),
        ..Default::default()
    };

    // Merge: defaults < file < env < cli
    let config = AppConfig::defaults()
        .merge(file_config)
        .merge(env_config)
        .merge(cli_config);
    (config, load_error)
}

fn report_toast_error(presenter: &Presenter, error: ToastError) {
    tracing::debug!(code = error.code(), kind = error.as_str(), "Toast operation failed");
    presenter.error(&format!("{} [{}]", error, error.as_str()));
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::toast::{TemplateKind, ToastDuration};

    fn args(text: &[&str]) -> ToastArgs {
        ToastArgs {
            text: text.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn build_template_uses_merged_config() {
        let config = AppConfig::defaults().merge(AppConfig {
            template: Some("image-text01".to_string()),
            duration: Some("short".to_string()),
            expiration_ms: Some(2000),
            ..Default::default()
        });
        let template = build_template(&args(&["Hello"]), &config).unwrap();
        assert_eq!(template.kind(), TemplateKind::ImageAndText01);
        assert_eq!(template.duration(), ToastDuration::Short);
        assert_eq!(template.expiration_ms(), 2000);
        assert_eq!(template.text_fields(), ["Hello".to_string()]);
    }

    #[test]
    fn build_template_rejects_unknown_template() {
        let config = AppConfig {
            template: Some("banner".to_string()),
            ..Default::default()
        };
        let err = build_template(&args(&[]), &config).unwrap_err();
        assert!(err.contains("banner"));
    }

    #[test]
    fn build_template_rejects_negative_expiration() {
        let config = AppConfig {
            expiration_ms: Some(-1),
            ..Default::default()
        };
        assert!(build_template(&args(&[]), &config).is_err());
    }

    #[test]
    fn resolve_audio_maps_sound_names() {
        assert_eq!(
            resolve_audio("mail"),
            "ms-winsoundevent:Notification.Mail"
        );
        assert_eq!(resolve_audio("C:\\sounds\\ding.wav"), "C:\\sounds\\ding.wav");
    }

    #[test]
    fn preview_renders_text_and_actions() {
        let mut toast = args(&["Title", "Body"]);
        toast.actions = vec!["Open".to_string()];
        let template = build_template(&toast, &AppConfig::defaults()).unwrap();

        let xml = render_preview(&template, "Test.App").unwrap();
        assert!(xml.contains("ToastText02"));
        assert!(xml.contains(">Title</text>"));
        assert!(xml.contains(">Body</text>"));
        assert!(xml.contains("content=\"Open\""));
        assert!(xml.contains("duration=\"long\""));
    }

    #[tokio::test]
    async fn corrupt_config_file_is_skipped_and_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "template = [").unwrap();
        let store = crate::infrastructure::TomlFileStore::at(&path);

        let cli_config = AppConfig {
            duration: Some("long".to_string()),
            ..Default::default()
        };
        let (config, load_error) = load_merged_config(&store, cli_config).await;

        assert!(matches!(load_error, Some(ConfigError::ParseError(_))));
        assert_eq!(config.template, AppConfig::defaults().template);
        assert_eq!(config.duration.as_deref(), Some("long"));
    }

    #[tokio::test]
    async fn missing_config_file_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = crate::infrastructure::TomlFileStore::at(dir.path().join("config.toml"));

        let (_, load_error) = load_merged_config(&store, AppConfig::empty()).await;
        assert!(load_error.is_none());
    }

    #[test]
    fn yes_no_formats_flags() {
        assert_eq!(yes_no(true), "yes");
        assert_eq!(yes_no(false), "no");
    }
}
