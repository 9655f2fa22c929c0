//! Toast document port interface

use super::platform::PlatformError;

/// Mutation interface over a toast XML document.
///
/// Elements are addressed by tag name and their position among all
/// elements with that tag, in document order. The toast schema repeats
/// tags (several `<text>` elements per binding), so a tag alone is not
/// enough.
pub trait ToastDocument {
    /// Number of elements named `tag`
    fn element_count(&self, tag: &str) -> Result<usize, PlatformError>;

    /// Append a text node to the `index`-th `tag` element
    fn append_text(&mut self, tag: &str, index: usize, text: &str) -> Result<(), PlatformError>;

    /// Whether the `index`-th `tag` element carries attribute `name`
    fn has_attribute(&self, tag: &str, index: usize, name: &str) -> Result<bool, PlatformError>;

    /// Set (or overwrite) an attribute on the `index`-th `tag` element
    fn set_attribute(
        &mut self,
        tag: &str,
        index: usize,
        name: &str,
        value: &str,
    ) -> Result<(), PlatformError>;

    /// Append a new child element with the given attributes to the
    /// `parent_index`-th `parent_tag` element
    fn append_element(
        &mut self,
        parent_tag: &str,
        parent_index: usize,
        name: &str,
        attributes: &[(&str, &str)],
    ) -> Result<(), PlatformError>;

    /// Serialize the document
    fn to_xml(&self) -> Result<String, PlatformError>;
}
