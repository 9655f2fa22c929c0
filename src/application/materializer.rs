//! Template materializer
//!
//! Translates a [`ToastTemplate`] into edits on the platform's blank
//! toast document. Each helper is a single transform; the first failing
//! platform call aborts and is returned unchanged. Nothing is rolled back.

use crate::domain::toast::{AudioOption, ToastDuration, ToastTemplate};

use super::ports::{PlatformError, ToastDocument};

/// Write `text` into the `index`-th `<text>` element
pub fn set_text_field<D: ToastDocument>(
    document: &mut D,
    text: &str,
    index: usize,
) -> Result<(), PlatformError> {
    document.append_text("text", index, text)
}

/// Add an attribution line below the body text
pub fn set_attribution_text<D: ToastDocument>(
    document: &mut D,
    text: &str,
) -> Result<(), PlatformError> {
    document.append_element("binding", 0, "text", &[("placement", "attribution")])?;

    let count = document.element_count("text")?;
    for index in 0..count {
        if document.has_attribute("text", index, "placement")? {
            return set_text_field(document, text, index);
        }
    }

    Err(PlatformError::failed("Attribution text element not found"))
}

/// Append an action button.
///
/// The first action switches the toast to the generic template with a
/// long duration and creates the `<actions>` container.
pub fn add_action<D: ToastDocument>(
    document: &mut D,
    content: &str,
    arguments: &str,
) -> Result<(), PlatformError> {
    if document.element_count("actions")? == 0 {
        document.set_attribute("toast", 0, "template", "ToastGeneric")?;
        document.set_attribute("toast", 0, "duration", "long")?;
        document.append_element("toast", 0, "actions", &[])?;
    }

    document.append_element(
        "actions",
        0,
        "action",
        &[("content", content), ("arguments", arguments)],
    )
}

/// Add an `<audio>` element for a sound source and/or playback mode
pub fn set_audio<D: ToastDocument>(
    document: &mut D,
    path: &str,
    option: AudioOption,
) -> Result<(), PlatformError> {
    let mut attributes: Vec<(&str, &str)> = Vec::with_capacity(2);
    if !path.is_empty() {
        attributes.push(("src", path));
    }
    match option {
        AudioOption::Default => {}
        AudioOption::Silent => attributes.push(("silent", "true")),
        AudioOption::Loop => attributes.push(("loop", "true")),
    }

    document.append_element("toast", 0, "audio", &attributes)
}

/// Set the display duration. `System` leaves the document untouched.
pub fn set_duration<D: ToastDocument>(
    document: &mut D,
    duration: ToastDuration,
) -> Result<(), PlatformError> {
    match duration {
        ToastDuration::System => Ok(()),
        ToastDuration::Short | ToastDuration::Long => {
            document.set_attribute("toast", 0, "duration", duration.as_str())
        }
    }
}

/// Point the template's image element at `path`
pub fn set_image<D: ToastDocument>(document: &mut D, path: &str) -> Result<(), PlatformError> {
    document.set_attribute("image", 0, "src", path)
}

/// Apply every descriptor field to `document`.
///
/// Text fields beyond the layout's capacity are ignored. Attribution,
/// actions, audio and duration are only written when `modern` is set.
pub fn materialize<D: ToastDocument>(
    document: &mut D,
    template: &ToastTemplate,
    modern: bool,
) -> Result<(), PlatformError> {
    let capacity = template.kind().text_field_count();
    for (index, text) in template.text_fields().iter().take(capacity).enumerate() {
        set_text_field(document, text, index)?;
    }

    if modern {
        if !template.attribution_text().is_empty() {
            set_attribution_text(document, template.attribution_text())?;
        }

        for (index, label) in template.actions().iter().enumerate() {
            add_action(document, label, &index.to_string())?;
        }

        if template.wants_audio() {
            set_audio(document, template.audio_path(), template.audio_option())?;
        }

        set_duration(document, template.duration())?;
    }

    if template.kind().has_image() {
        set_image(document, template.image_path())?;
    }

    Ok(())
}
