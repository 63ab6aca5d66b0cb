// src/render/xml.rs
//! Small helpers over the quick-xml writer shared by the Atom feed and the
//! sitemap.

use crate::error::AppError;
use quick_xml::{
    events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event},
    Writer,
};
use std::io::Cursor;

pub type XmlWriter = Writer<Cursor<Vec<u8>>>;

/// A writer with the XML declaration already emitted.
pub fn document() -> Result<XmlWriter, AppError> {
    let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    Ok(writer)
}

/// Opens `<tag attr="value" ...>`.
pub fn start(writer: &mut XmlWriter, tag: &str, attrs: &[(&str, &str)]) -> Result<(), AppError> {
    let mut elem = BytesStart::new(tag);
    for (key, value) in attrs {
        elem.push_attribute((*key, *value));
    }
    writer.write_event(Event::Start(elem))?;
    Ok(())
}

pub fn end(writer: &mut XmlWriter, tag: &str) -> Result<(), AppError> {
    writer.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}

/// Writes `<tag>text</tag>`, escaping the text.
pub fn text_element(writer: &mut XmlWriter, tag: &str, text: &str) -> Result<(), AppError> {
    writer.write_event(Event::Start(BytesStart::new(tag)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}

/// Writes `<tag attr="value" ... />`.
pub fn empty_element(
    writer: &mut XmlWriter,
    tag: &str,
    attrs: &[(&str, &str)],
) -> Result<(), AppError> {
    let mut elem = BytesStart::new(tag);
    for (key, value) in attrs {
        elem.push_attribute((*key, *value));
    }
    writer.write_event(Event::Empty(elem))?;
    Ok(())
}

/// The finished document as a string. `path` only names it in errors.
pub fn finish(writer: XmlWriter, path: &str) -> Result<String, AppError> {
    String::from_utf8(writer.into_inner().into_inner()).map_err(|e| {
        AppError::FeedGenerationFailed {
            path: path.to_string(),
            reason: e.to_string(),
        }
    })
}
