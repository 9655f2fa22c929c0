//! WinRT XML document adapter

use windows::core::{Interface, HSTRING};
use windows::Data::Xml::Dom::{IXmlNode, XmlDocument, XmlElement};

use crate::application::ports::{PlatformError, ToastDocument};

/// Toast template document owned by the platform
pub struct WinRtDocument {
    document: XmlDocument,
}

impl WinRtDocument {
    pub(super) fn new(document: XmlDocument) -> Self {
        Self { document }
    }

    pub(super) fn inner(&self) -> &XmlDocument {
        &self.document
    }

    fn element(&self, tag: &str, index: usize) -> Result<IXmlNode, PlatformError> {
        let list = self.document.GetElementsByTagName(&HSTRING::from(tag))?;
        let index = u32::try_from(index)
            .map_err(|_| PlatformError::failed(format!("Index {} out of range", index)))?;
        if index >= list.Length()? {
            return Err(PlatformError::failed(format!(
                "No <{}> element at index {}",
                tag, index
            )));
        }
        Ok(list.Item(index)?)
    }
}

impl ToastDocument for WinRtDocument {
    fn element_count(&self, tag: &str) -> Result<usize, PlatformError> {
        let list = self.document.GetElementsByTagName(&HSTRING::from(tag))?;
        Ok(list.Length()? as usize)
    }

    fn append_text(&mut self, tag: &str, index: usize, text: &str) -> Result<(), PlatformError> {
        let node = self.element(tag, index)?;
        let text = self.document.CreateTextNode(&HSTRING::from(text))?;
        node.AppendChild(&text.cast::<IXmlNode>()?)?;
        Ok(())
    }

    fn has_attribute(&self, tag: &str, index: usize, name: &str) -> Result<bool, PlatformError> {
        let attributes = self.element(tag, index)?.Attributes()?;
        for i in 0..attributes.Length()? {
            if attributes.Item(i)?.NodeName()?.to_string() == name {
                return Ok(true);
            }
        }
        Ok(false)
    }

    fn set_attribute(
        &mut self,
        tag: &str,
        index: usize,
        name: &str,
        value: &str,
    ) -> Result<(), PlatformError> {
        let element = self.element(tag, index)?.cast::<XmlElement>()?;
        element.SetAttribute(&HSTRING::from(name), &HSTRING::from(value))?;
        Ok(())
    }

    fn append_element(
        &mut self,
        parent_tag: &str,
        parent_index: usize,
        name: &str,
        attributes: &[(&str, &str)],
    ) -> Result<(), PlatformError> {
        let parent = self.element(parent_tag, parent_index)?;
        let element = self.document.CreateElement(&HSTRING::from(name))?;
        for (key, value) in attributes {
            element.SetAttribute(&HSTRING::from(*key), &HSTRING::from(*value))?;
        }
        parent.AppendChild(&element.cast::<IXmlNode>()?)?;
        Ok(())
    }

    fn to_xml(&self) -> Result<String, PlatformError> {
        Ok(self.document.GetXml()?.to_string())
    }
}
