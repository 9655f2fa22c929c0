//! In-memory toast document

use std::fmt::Write as _;

use crate::application::ports::{PlatformError, ToastDocument};
use crate::domain::toast::TemplateKind;

#[derive(Debug, Clone, PartialEq, Eq)]
enum XmlNode {
    Element(XmlElement),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct XmlElement {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<XmlNode>,
}

impl XmlElement {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    fn with_attribute(mut self, name: &str, value: &str) -> Self {
        self.set_attribute(name, value);
        self
    }

    fn with_child(mut self, child: XmlElement) -> Self {
        self.children.push(XmlNode::Element(child));
        self
    }

    fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    fn set_attribute(&mut self, name: &str, value: &str) {
        match self.attributes.iter_mut().find(|(key, _)| key == name) {
            Some((_, existing)) => *existing = value.to_string(),
            None => self.attributes.push((name.to_string(), value.to_string())),
        }
    }

    fn text(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            match child {
                XmlNode::Text(text) => out.push_str(text),
                XmlNode::Element(element) => out.push_str(&element.text()),
            }
        }
        out
    }

    fn write_xml(&self, out: &mut String) {
        let _ = write!(out, "<{}", self.name);
        for (key, value) in &self.attributes {
            let _ = write!(out, " {}=\"{}\"", key, escape(value));
        }
        if self.children.is_empty() {
            out.push_str("/>");
            return;
        }
        out.push('>');
        for child in &self.children {
            match child {
                XmlNode::Text(text) => out.push_str(&escape(text)),
                XmlNode::Element(element) => element.write_xml(out),
            }
        }
        let _ = write!(out, "</{}>", self.name);
    }
}

fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

/// Toast document held entirely in process.
///
/// Mirrors the blank layouts the platform hands out, so the materializer
/// can be exercised and previewed without the real notification service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryDocument {
    root: XmlElement,
    read_only: bool,
}

impl MemoryDocument {
    /// Blank document for a layout
    pub fn for_template(kind: TemplateKind) -> Self {
        let mut binding = XmlElement::new("binding").with_attribute("template", kind.binding_name());
        if kind.has_image() {
            binding = binding.with_child(
                XmlElement::new("image")
                    .with_attribute("id", "1")
                    .with_attribute("src", ""),
            );
        }
        for id in 1..=kind.text_field_count() {
            binding = binding.with_child(XmlElement::new("text").with_attribute("id", &id.to_string()));
        }

        let root = XmlElement::new("toast").with_child(XmlElement::new("visual").with_child(binding));

        Self {
            root,
            read_only: false,
        }
    }

    /// Same document, but every edit fails
    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    /// Text content of the `index`-th `tag` element
    pub fn text_of(&self, tag: &str, index: usize) -> Option<String> {
        self.find(tag, index).map(XmlElement::text)
    }

    /// Attribute value of the `index`-th `tag` element
    pub fn attribute_of(&self, tag: &str, index: usize, name: &str) -> Option<String> {
        self.find(tag, index)
            .and_then(|element| element.attribute(name))
            .map(str::to_string)
    }

    fn find(&self, tag: &str, index: usize) -> Option<&XmlElement> {
        let path = self.path_of(tag, index)?;
        let mut current = &self.root;
        for step in path {
            current = match current.children.get(step)? {
                XmlNode::Element(element) => element,
                XmlNode::Text(_) => return None,
            };
        }
        Some(current)
    }

    fn find_mut(&mut self, tag: &str, index: usize) -> Result<&mut XmlElement, PlatformError> {
        if self.read_only {
            return Err(PlatformError::failed("Document is read-only"));
        }
        let path = self
            .path_of(tag, index)
            .ok_or_else(|| PlatformError::failed(format!("No <{}> element at index {}", tag, index)))?;

        let mut current = &mut self.root;
        for step in path {
            current = match current.children.get_mut(step) {
                Some(XmlNode::Element(element)) => element,
                _ => return Err(PlatformError::failed("Document changed during lookup")),
            };
        }
        Ok(current)
    }

    /// Child-index path to the `index`-th `tag` element, in document order
    fn path_of(&self, tag: &str, index: usize) -> Option<Vec<usize>> {
        fn walk(
            element: &XmlElement,
            tag: &str,
            remaining: &mut usize,
            path: &mut Vec<usize>,
        ) -> bool {
            if element.name == tag {
                if *remaining == 0 {
                    return true;
                }
                *remaining -= 1;
            }
            for (position, child) in element.children.iter().enumerate() {
                if let XmlNode::Element(child) = child {
                    path.push(position);
                    if walk(child, tag, remaining, path) {
                        return true;
                    }
                    path.pop();
                }
            }
            false
        }

        let mut remaining = index;
        let mut path = Vec::new();
        walk(&self.root, tag, &mut remaining, &mut path).then_some(path)
    }

    fn count(&self, tag: &str) -> usize {
        fn walk(element: &XmlElement, tag: &str) -> usize {
            let own = usize::from(element.name == tag);
            own + element
                .children
                .iter()
                .map(|child| match child {
                    XmlNode::Element(child) => walk(child, tag),
                    XmlNode::Text(_) => 0,
                })
                .sum::<usize>()
        }
        walk(&self.root, tag)
    }
}

impl ToastDocument for MemoryDocument {
    fn element_count(&self, tag: &str) -> Result<usize, PlatformError> {
        Ok(self.count(tag))
    }

    fn append_text(&mut self, tag: &str, index: usize, text: &str) -> Result<(), PlatformError> {
        self.find_mut(tag, index)?
            .children
            .push(XmlNode::Text(text.to_string()));
        Ok(())
    }

    fn has_attribute(&self, tag: &str, index: usize, name: &str) -> Result<bool, PlatformError> {
        self.find(tag, index)
            .map(|element| element.attribute(name).is_some())
            .ok_or_else(|| PlatformError::failed(format!("No <{}> element at index {}", tag, index)))
    }

    fn set_attribute(
        &mut self,
        tag: &str,
        index: usize,
        name: &str,
        value: &str,
    ) -> Result<(), PlatformError> {
        self.find_mut(tag, index)?.set_attribute(name, value);
        Ok(())
    }

    fn append_element(
        &mut self,
        parent_tag: &str,
        parent_index: usize,
        name: &str,
        attributes: &[(&str, &str)],
    ) -> Result<(), PlatformError> {
        let mut element = XmlElement::new(name);
        for (key, value) in attributes {
            element.set_attribute(key, value);
        }
        self.find_mut(parent_tag, parent_index)?
            .children
            .push(XmlNode::Element(element));
        Ok(())
    }

    fn to_xml(&self) -> Result<String, PlatformError> {
        let mut out = String::new();
        self.root.write_xml(&mut out);
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_text_template_layout() {
        let doc = MemoryDocument::for_template(TemplateKind::Text02);
        assert_eq!(
            doc.to_xml().unwrap(),
            "<toast><visual><binding template=\"ToastText02\"><text id=\"1\"/><text id=\"2\"/></binding></visual></toast>"
        );
    }

    #[test]
    fn blank_image_template_has_image_first() {
        let doc = MemoryDocument::for_template(TemplateKind::ImageAndText04);
        assert_eq!(doc.element_count("image").unwrap(), 1);
        assert_eq!(doc.element_count("text").unwrap(), 3);
        assert!(doc
            .to_xml()
            .unwrap()
            .contains("<image id=\"1\" src=\"\"/><text id=\"1\"/>"));
    }

    #[test]
    fn elements_are_addressed_in_document_order() {
        let mut doc = MemoryDocument::for_template(TemplateKind::Text03);
        doc.append_text("text", 1, "second").unwrap();
        assert_eq!(doc.attribute_of("text", 1, "id").as_deref(), Some("2"));
        assert_eq!(doc.text_of("text", 1).as_deref(), Some("second"));
        assert_eq!(doc.text_of("text", 0).as_deref(), Some(""));
    }

    #[test]
    fn appended_elements_become_addressable() {
        let mut doc = MemoryDocument::for_template(TemplateKind::Text01);
        doc.append_element("toast", 0, "actions", &[]).unwrap();
        doc.append_element("actions", 0, "action", &[("content", "Ok")]).unwrap();
        assert_eq!(doc.element_count("action").unwrap(), 1);
        assert!(doc.has_attribute("action", 0, "content").unwrap());
        assert!(!doc.has_attribute("action", 0, "arguments").unwrap());
    }

    #[test]
    fn set_attribute_overwrites() {
        let mut doc = MemoryDocument::for_template(TemplateKind::Text01);
        doc.set_attribute("toast", 0, "duration", "long").unwrap();
        doc.set_attribute("toast", 0, "duration", "short").unwrap();
        assert_eq!(
            doc.to_xml().unwrap(),
            "<toast duration=\"short\"><visual><binding template=\"ToastText01\"><text id=\"1\"/></binding></visual></toast>"
        );
    }

    #[test]
    fn text_and_attributes_are_escaped() {
        let mut doc = MemoryDocument::for_template(TemplateKind::Text01);
        doc.append_text("text", 0, "a < b & \"c\"").unwrap();
        doc.set_attribute("toast", 0, "launch", "x='1'").unwrap();
        let xml = doc.to_xml().unwrap();
        assert!(xml.contains("a &lt; b &amp; &quot;c&quot;"));
        assert!(xml.contains("launch=\"x=&apos;1&apos;\""));
    }

    #[test]
    fn missing_element_is_an_error() {
        let mut doc = MemoryDocument::for_template(TemplateKind::Text01);
        assert!(doc.append_text("text", 1, "x").is_err());
        assert!(doc.has_attribute("image", 0, "src").is_err());
        assert!(doc.append_element("actions", 0, "action", &[]).is_err());
    }

    #[test]
    fn read_only_rejects_edits() {
        let mut doc = MemoryDocument::for_template(TemplateKind::Text01).read_only();
        assert!(doc.append_text("text", 0, "x").is_err());
        assert!(doc.set_attribute("toast", 0, "duration", "long").is_err());
        assert_eq!(doc.element_count("text").unwrap(), 1);
    }
}
