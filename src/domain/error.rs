//! Domain error types

use thiserror::Error;

/// Errors returned by the toast service.
///
/// A closed set: every platform failure is folded into the coarsest
/// applicable variant. Success is represented by `Ok`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum ToastError {
    #[error("The system does not support toast notifications")]
    SystemNotSupported,

    #[error("Failed to initialize the COM runtime")]
    ComInitFailed,

    #[error("Failed to register the application user model id")]
    InvalidAppUserModelId,

    #[error("The toast service has not been initialized")]
    NotInitialized,

    #[error("A call into the notification platform failed")]
    ComError,

    #[error("Failed to register toast event handlers")]
    InvalidHandler,

    #[error("The toast could not be displayed")]
    NotDisplayed,

    #[error("No toast with that id")]
    IdNotFound,

    #[error("The toast could not be hidden")]
    CouldNotHide,
}

impl ToastError {
    /// Numeric status code. `0` is reserved for success.
    pub const fn code(&self) -> u8 {
        match self {
            Self::SystemNotSupported => 1,
            Self::ComInitFailed => 2,
            Self::InvalidAppUserModelId => 3,
            Self::NotInitialized => 4,
            Self::ComError => 5,
            Self::InvalidHandler => 6,
            Self::NotDisplayed => 7,
            Self::IdNotFound => 8,
            Self::CouldNotHide => 9,
        }
    }

    /// Stable identifier, matching the variant name
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::SystemNotSupported => "SystemNotSupported",
            Self::ComInitFailed => "ComInitFailed",
            Self::InvalidAppUserModelId => "InvalidAppUserModelID",
            Self::NotInitialized => "NotInitialized",
            Self::ComError => "ComError",
            Self::InvalidHandler => "InvalidHandler",
            Self::NotDisplayed => "NotDisplayed",
            Self::IdNotFound => "IdNotFound",
            Self::CouldNotHide => "CouldNotHide",
        }
    }
}

/// Error when parsing a template kind, duration or audio name
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid {kind}: \"{input}\". Valid values are: {valid}")]
pub struct ParseValueError {
    pub kind: &'static str,
    pub input: String,
    pub valid: String,
}

/// Error when configuration fails
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(String),

    #[error("Failed to parse config file: {0}")]
    ParseError(String),

    #[error("Failed to write config file: {0}")]
    WriteError(String),

    #[error("Invalid config value for '{key}': {message}")]
    ValidationError { key: String, message: String },

    #[error("Config file already exists at: {0}")]
    AlreadyExists(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_distinct_and_nonzero() {
        let all = [
            ToastError::SystemNotSupported,
            ToastError::ComInitFailed,
            ToastError::InvalidAppUserModelId,
            ToastError::NotInitialized,
            ToastError::ComError,
            ToastError::InvalidHandler,
            ToastError::NotDisplayed,
            ToastError::IdNotFound,
            ToastError::CouldNotHide,
        ];
        let mut codes: Vec<u8> = all.iter().map(ToastError::code).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), all.len());
        assert!(codes.iter().all(|code| *code != 0));
    }

    #[test]
    fn as_str_keeps_platform_spelling() {
        assert_eq!(ToastError::InvalidAppUserModelId.as_str(), "InvalidAppUserModelID");
        assert_eq!(ToastError::IdNotFound.as_str(), "IdNotFound");
    }

    #[test]
    fn parse_error_message_lists_values() {
        let err = ParseValueError {
            kind: "duration",
            input: "forever".to_string(),
            valid: "system, short, long".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("forever"));
        assert!(msg.contains("short"));
    }
}
