//! Well-known system notification sounds

use std::fmt;
use std::str::FromStr;

use crate::domain::error::ParseValueError;

/// All system sounds, in declaration order
pub const ALL_SYSTEM_SOUNDS: &[AudioSystemFile] = &[
    AudioSystemFile::DefaultSound,
    AudioSystemFile::IM,
    AudioSystemFile::Mail,
    AudioSystemFile::Reminder,
    AudioSystemFile::SMS,
    AudioSystemFile::Alarm,
    AudioSystemFile::Alarm2,
    AudioSystemFile::Alarm3,
    AudioSystemFile::Alarm4,
    AudioSystemFile::Alarm5,
    AudioSystemFile::Alarm6,
    AudioSystemFile::Alarm7,
    AudioSystemFile::Alarm8,
    AudioSystemFile::Alarm9,
    AudioSystemFile::Alarm10,
    AudioSystemFile::Call,
    AudioSystemFile::Call1,
    AudioSystemFile::Call2,
    AudioSystemFile::Call3,
    AudioSystemFile::Call4,
    AudioSystemFile::Call5,
    AudioSystemFile::Call6,
    AudioSystemFile::Call7,
    AudioSystemFile::Call8,
    AudioSystemFile::Call9,
    AudioSystemFile::Call10,
];

/// Sounds shipped with the notification platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum AudioSystemFile {
    #[default]
    DefaultSound,
    IM,
    Mail,
    Reminder,
    SMS,
    Alarm,
    Alarm2,
    Alarm3,
    Alarm4,
    Alarm5,
    Alarm6,
    Alarm7,
    Alarm8,
    Alarm9,
    Alarm10,
    Call,
    Call1,
    Call2,
    Call3,
    Call4,
    Call5,
    Call6,
    Call7,
    Call8,
    Call9,
    Call10,
}

impl AudioSystemFile {
    /// Look up a sound by its numeric discriminant
    pub fn from_repr(value: u8) -> Option<Self> {
        ALL_SYSTEM_SOUNDS.get(usize::from(value)).copied()
    }

    /// The `ms-winsoundevent:` URI the platform expects in `<audio src=..>`
    pub const fn system_file_path(&self) -> &'static str {
        match self {
            Self::DefaultSound => "ms-winsoundevent:Notification.Default",
            Self::IM => "ms-winsoundevent:Notification.IM",
            Self::Mail => "ms-winsoundevent:Notification.Mail",
            Self::Reminder => "ms-winsoundevent:Notification.Reminder",
            Self::SMS => "ms-winsoundevent:Notification.SMS",
            Self::Alarm => "ms-winsoundevent:Notification.Looping.Alarm",
            Self::Alarm2 => "ms-winsoundevent:Notification.Looping.Alarm2",
            Self::Alarm3 => "ms-winsoundevent:Notification.Looping.Alarm3",
            Self::Alarm4 => "ms-winsoundevent:Notification.Looping.Alarm4",
            Self::Alarm5 => "ms-winsoundevent:Notification.Looping.Alarm5",
            Self::Alarm6 => "ms-winsoundevent:Notification.Looping.Alarm6",
            Self::Alarm7 => "ms-winsoundevent:Notification.Looping.Alarm7",
            Self::Alarm8 => "ms-winsoundevent:Notification.Looping.Alarm8",
            Self::Alarm9 => "ms-winsoundevent:Notification.Looping.Alarm9",
            Self::Alarm10 => "ms-winsoundevent:Notification.Looping.Alarm10",
            Self::Call => "ms-winsoundevent:Notification.Looping.Call",
            Self::Call1 => "ms-winsoundevent:Notification.Looping.Call1",
            Self::Call2 => "ms-winsoundevent:Notification.Looping.Call2",
            Self::Call3 => "ms-winsoundevent:Notification.Looping.Call3",
            Self::Call4 => "ms-winsoundevent:Notification.Looping.Call4",
            Self::Call5 => "ms-winsoundevent:Notification.Looping.Call5",
            Self::Call6 => "ms-winsoundevent:Notification.Looping.Call6",
            Self::Call7 => "ms-winsoundevent:Notification.Looping.Call7",
            Self::Call8 => "ms-winsoundevent:Notification.Looping.Call8",
            Self::Call9 => "ms-winsoundevent:Notification.Looping.Call9",
            Self::Call10 => "ms-winsoundevent:Notification.Looping.Call10",
        }
    }

    /// Lowercase name used on the command line
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::DefaultSound => "default",
            Self::IM => "im",
            Self::Mail => "mail",
            Self::Reminder => "reminder",
            Self::SMS => "sms",
            Self::Alarm => "alarm",
            Self::Alarm2 => "alarm2",
            Self::Alarm3 => "alarm3",
            Self::Alarm4 => "alarm4",
            Self::Alarm5 => "alarm5",
            Self::Alarm6 => "alarm6",
            Self::Alarm7 => "alarm7",
            Self::Alarm8 => "alarm8",
            Self::Alarm9 => "alarm9",
            Self::Alarm10 => "alarm10",
            Self::Call => "call",
            Self::Call1 => "call1",
            Self::Call2 => "call2",
            Self::Call3 => "call3",
            Self::Call4 => "call4",
            Self::Call5 => "call5",
            Self::Call6 => "call6",
            Self::Call7 => "call7",
            Self::Call8 => "call8",
            Self::Call9 => "call9",
            Self::Call10 => "call10",
        }
    }
}

/// Map a raw sound discriminant to its URI.
///
/// Values outside the enumeration map to an empty string.
pub fn audio_system_file_path(value: u8) -> &'static str {
    AudioSystemFile::from_repr(value)
        .map(|file| file.system_file_path())
        .unwrap_or("")
}

impl FromStr for AudioSystemFile {
    type Err = ParseValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        ALL_SYSTEM_SOUNDS
            .iter()
            .copied()
            .find(|file| file.as_str() == needle)
            .ok_or_else(|| ParseValueError {
                kind: "system sound",
                input: s.to_string(),
                valid: ALL_SYSTEM_SOUNDS
                    .iter()
                    .map(AudioSystemFile::as_str)
                    .collect::<Vec<_>>()
                    .join(", "),
            })
    }
}

impl fmt::Display for AudioSystemFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
