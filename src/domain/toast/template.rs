//! Toast template descriptor value objects

use std::fmt;
use std::str::FromStr;

use crate::domain::error::ParseValueError;

/// All template kinds, in platform id order
pub const ALL_TEMPLATE_KINDS: &[TemplateKind] = &[
    TemplateKind::ImageAndText01,
    TemplateKind::ImageAndText02,
    TemplateKind::ImageAndText03,
    TemplateKind::ImageAndText04,
    TemplateKind::Text01,
    TemplateKind::Text02,
    TemplateKind::Text03,
    TemplateKind::Text04,
];

/// The eight fixed toast layouts.
///
/// Layouts differ in how many text lines they carry and whether they
/// contain an image element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TemplateKind {
    ImageAndText01,
    ImageAndText02,
    ImageAndText03,
    ImageAndText04,
    #[default]
    Text01,
    Text02,
    Text03,
    Text04,
}

impl TemplateKind {
    /// The platform's numeric template id
    pub const fn platform_id(&self) -> i32 {
        match self {
            Self::ImageAndText01 => 0,
            Self::ImageAndText02 => 1,
            Self::ImageAndText03 => 2,
            Self::ImageAndText04 => 3,
            Self::Text01 => 4,
            Self::Text02 => 5,
            Self::Text03 => 6,
            Self::Text04 => 7,
        }
    }

    /// Number of `<text>` elements in the blank template
    pub const fn text_field_count(&self) -> usize {
        match self {
            Self::ImageAndText01 | Self::Text01 => 1,
            Self::ImageAndText02 | Self::ImageAndText03 | Self::Text02 | Self::Text03 => 2,
            Self::ImageAndText04 | Self::Text04 => 3,
        }
    }

    /// Whether the template carries an `<image>` element
    pub const fn has_image(&self) -> bool {
        matches!(
            self,
            Self::ImageAndText01 | Self::ImageAndText02 | Self::ImageAndText03 | Self::ImageAndText04
        )
    }

    /// Template name as it appears in the `<binding template=..>` attribute
    pub const fn binding_name(&self) -> &'static str {
        match self {
            Self::ImageAndText01 => "ToastImageAndText01",
            Self::ImageAndText02 => "ToastImageAndText02",
            Self::ImageAndText03 => "ToastImageAndText03",
            Self::ImageAndText04 => "ToastImageAndText04",
            Self::Text01 => "ToastText01",
            Self::Text02 => "ToastText02",
            Self::Text03 => "ToastText03",
            Self::Text04 => "ToastText04",
        }
    }

    /// Short lowercase name used in config files and on the command line
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ImageAndText01 => "image-text01",
            Self::ImageAndText02 => "image-text02",
            Self::ImageAndText03 => "image-text03",
            Self::ImageAndText04 => "image-text04",
            Self::Text01 => "text01",
            Self::Text02 => "text02",
            Self::Text03 => "text03",
            Self::Text04 => "text04",
        }
    }
}

impl FromStr for TemplateKind {
    type Err = ParseValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        ALL_TEMPLATE_KINDS
            .iter()
            .copied()
            .find(|kind| {
                kind.as_str() == needle || kind.binding_name().to_lowercase() == needle
            })
            .ok_or_else(|| ParseValueError {
                kind: "template",
                input: s.to_string(),
                valid: ALL_TEMPLATE_KINDS
                    .iter()
                    .map(TemplateKind::as_str)
                    .collect::<Vec<_>>()
                    .join(", "),
            })
    }
}

impl fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How long the toast stays on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ToastDuration {
    /// Leave it to the system
    #[default]
    System,
    Short,
    Long,
}

impl ToastDuration {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::System => "system",
            Self::Short => "short",
            Self::Long => "long",
        }
    }
}

impl FromStr for ToastDuration {
    type Err = ParseValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "system" => Ok(Self::System),
            "short" => Ok(Self::Short),
            "long" => Ok(Self::Long),
            _ => Err(ParseValueError {
                kind: "duration",
                input: s.to_string(),
                valid: "system, short, long".to_string(),
            }),
        }
    }
}

impl fmt::Display for ToastDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Audio playback mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AudioOption {
    #[default]
    Default,
    Silent,
    Loop,
}

impl AudioOption {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Silent => "silent",
            Self::Loop => "loop",
        }
    }
}

impl FromStr for AudioOption {
    type Err = ParseValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "default" => Ok(Self::Default),
            "silent" => Ok(Self::Silent),
            "loop" => Ok(Self::Loop),
            _ => Err(ParseValueError {
                kind: "audio mode",
                input: s.to_string(),
                valid: "default, silent, loop".to_string(),
            }),
        }
    }
}

impl fmt::Display for AudioOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Declarative description of a toast.
///
/// Immutable once handed to the service; built with the consuming
/// `with_*` methods.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToastTemplate {
    kind: TemplateKind,
    text_fields: Vec<String>,
    actions: Vec<String>,
    image_path: String,
    audio_path: String,
    audio_option: AudioOption,
    attribution_text: String,
    duration: ToastDuration,
    expiration_ms: i64,
}

impl ToastTemplate {
    /// Create an empty descriptor for the given layout
    pub fn new(kind: TemplateKind) -> Self {
        Self {
            kind,
            ..Default::default()
        }
    }

    /// Append one text line
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text_fields.push(text.into());
        self
    }

    /// Replace all text lines
    pub fn with_text_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.text_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Append one action button. Its index is reported on activation.
    pub fn with_action(mut self, label: impl Into<String>) -> Self {
        self.actions.push(label.into());
        self
    }

    pub fn with_image_path(mut self, path: impl Into<String>) -> Self {
        self.image_path = path.into();
        self
    }

    /// Audio source, either a file path or a `ms-winsoundevent:` URI
    pub fn with_audio_path(mut self, path: impl Into<String>) -> Self {
        self.audio_path = path.into();
        self
    }

    pub fn with_audio_option(mut self, option: AudioOption) -> Self {
        self.audio_option = option;
        self
    }

    pub fn with_attribution_text(mut self, text: impl Into<String>) -> Self {
        self.attribution_text = text.into();
        self
    }

    pub fn with_duration(mut self, duration: ToastDuration) -> Self {
        self.duration = duration;
        self
    }

    /// Expire the toast this many milliseconds after it is shown. `0` disables.
    pub fn with_expiration_ms(mut self, millis: i64) -> Self {
        self.expiration_ms = millis;
        self
    }

    pub fn kind(&self) -> TemplateKind {
        self.kind
    }

    pub fn text_fields(&self) -> &[String] {
        &self.text_fields
    }

    pub fn actions(&self) -> &[String] {
        &self.actions
    }

    pub fn image_path(&self) -> &str {
        &self.image_path
    }

    pub fn audio_path(&self) -> &str {
        &self.audio_path
    }

    pub fn audio_option(&self) -> AudioOption {
        self.audio_option
    }

    pub fn attribution_text(&self) -> &str {
        &self.attribution_text
    }

    pub fn duration(&self) -> ToastDuration {
        self.duration
    }

    pub fn expiration_ms(&self) -> i64 {
        self.expiration_ms
    }

    /// Whether any audio element needs to be written
    pub fn wants_audio(&self) -> bool {
        !self.audio_path.is_empty() || self.audio_option != AudioOption::Default
    }
}
