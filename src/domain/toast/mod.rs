//! Toast domain module

mod audio;
mod event;
mod id;
mod template;
mod time;

pub use audio::{audio_system_file_path, AudioSystemFile, ALL_SYSTEM_SOUNDS};
pub use event::{parse_action_index, reclassify_dismissal, DismissalReason, ToastEvent, NO_ACTION};
pub use id::ToastId;
pub use template::{
    AudioOption, TemplateKind, ToastDuration, ToastTemplate, ALL_TEMPLATE_KINDS,
};
pub use time::{FileTime, TICKS_PER_MILLISECOND, UNIX_EPOCH_TICKS};
