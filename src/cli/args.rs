//! CLI argument definitions using Clap

use clap::{Args, Parser, Subcommand};

use crate::domain::config::AppConfig;

/// WinToast - Windows toast notifications from the command line
#[derive(Parser, Debug)]
#[command(name = "wintoast")]
#[command(version)]
#[command(about = "Show Windows toast notifications and preview their XML")]
#[command(long_about = None)]
pub struct Cli {
    /// Log filter directive (e.g. debug, wintoast=trace)
    #[arg(long, global = true, value_name = "FILTER")]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show a toast notification (Windows only)
    Show {
        #[command(flatten)]
        toast: ToastArgs,

        /// Wait up to SECS for the user to click or dismiss the toast
        #[arg(short = 'w', long, value_name = "SECS")]
        wait: Option<u64>,

        /// Hide the toast again after MS milliseconds
        #[arg(long, value_name = "MS")]
        hide_after: Option<u64>,
    },
    /// Print the XML a toast would be shown with
    Preview {
        #[command(flatten)]
        toast: ToastArgs,
    },
    /// Report whether this system supports toasts
    Check,
    /// List the built-in system sounds
    Sounds {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Toast content shared by `show` and `preview`
#[derive(Args, Debug, Clone, Default)]
pub struct ToastArgs {
    /// Template (text01..text04, image-text01..image-text04)
    #[arg(short = 't', long, value_name = "TEMPLATE")]
    pub template: Option<String>,

    /// Text line, repeat for each field in order
    #[arg(short = 'x', long = "text", value_name = "TEXT")]
    pub text: Vec<String>,

    /// Action button label, repeat for more buttons
    #[arg(short = 'a', long = "action", value_name = "LABEL")]
    pub actions: Vec<String>,

    /// Image path for image templates
    #[arg(short = 'i', long, value_name = "PATH")]
    pub image: Option<String>,

    /// System sound name (see `wintoast sounds`) or sound URI
    #[arg(long, value_name = "SOUND")]
    pub audio: Option<String>,

    /// Audio mode (default, silent, loop)
    #[arg(long, value_name = "MODE")]
    pub audio_mode: Option<String>,

    /// Attribution text shown below the body
    #[arg(long, value_name = "TEXT")]
    pub attribution: Option<String>,

    /// Duration (system, short, long)
    #[arg(short = 'd', long, value_name = "DURATION")]
    pub duration: Option<String>,

    /// Expire the toast MS milliseconds after it is shown
    #[arg(short = 'e', long = "expire-ms", value_name = "MS")]
    pub expire_ms: Option<i64>,

    /// Application user model id
    #[arg(long, value_name = "AUMI")]
    pub app_id: Option<String>,
}

impl ToastArgs {
    /// The config layer contributed by these arguments
    pub fn to_config(&self) -> AppConfig {
        AppConfig {
            app_id: self.app_id.clone(),
            template: self.template.clone(),
            duration: self.duration.clone(),
            audio_mode: self.audio_mode.clone(),
            expiration_ms: self.expire_ms,
            log_level: None,
        }
    }
}

/// Config action subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Create config file with defaults
    Init,
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// Config value
        value: String,
    },
    /// Get a config value
    Get {
        /// Config key
        key: String,
    },
    /// List all config values
    List,
    /// Show config file path
    Path,
}

/// Valid config keys
pub const VALID_CONFIG_KEYS: &[&str] = &[
    "app_id",
    "template",
    "duration",
    "audio_mode",
    "expiration_ms",
    "log_level",
];

/// Check if a config key is valid
pub fn is_valid_config_key(key: &str) -> bool {
    VALID_CONFIG_KEYS.contains(&key)
}
