//! WinToast CLI entry point

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use wintoast::cli::{
    app::{load_merged_config, run_check, run_preview, run_show, run_sounds, EXIT_ERROR},
    args::{Cli, Commands},
    config_cmd::handle_config_command,
    presenter::Presenter,
};
use wintoast::application::ports::ConfigStore;
use wintoast::domain::config::AppConfig;
use wintoast::infrastructure::TomlFileStore;

fn init_logging(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level_or_default()))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .init();
}

// Toast COM objects live in a single-threaded apartment; keep the runtime on the main thread.
#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let presenter = Presenter::new();

    let toast_config = match &cli.command {
        Commands::Show { toast, .. } | Commands::Preview { toast } => toast.to_config(),
        _ => AppConfig::empty(),
    };
    let cli_config = AppConfig {
        log_level: cli.log_level.clone(),
        ..toast_config
    };

    let store = TomlFileStore::new();
    let (config, load_error) = load_merged_config(&store, cli_config).await;
    init_logging(&config);
    if let Some(e) = load_error {
        tracing::warn!(path = %store.path().display(), error = %e, "Ignoring config file");
    }
    tracing::debug!(app_id = config.app_id_or_default(), "Configuration loaded");

    match cli.command {
        Commands::Show {
            toast,
            wait,
            hide_after,
        } => run_show(&toast, &config, wait, hide_after).await,
        Commands::Preview { toast } => run_preview(&toast, &config),
        Commands::Check => run_check(&config),
        Commands::Sounds { json } => run_sounds(json),
        Commands::Config { action } => {
            if let Err(e) = handle_config_command(action, &store, &presenter).await {
                presenter.error(&e.to_string());
                return ExitCode::from(EXIT_ERROR);
            }
            ExitCode::SUCCESS
        }
    }
}
