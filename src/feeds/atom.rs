//! Atom 1.0 serialization.
//!
//! Entry content is carried as `type="html"` escaped markup; timestamps are
//! RFC 3339 as Atom requires.

use super::common::{into_string, write_text_element};
use super::FeedMeta;
use crate::models::ScrapedItem;
use chrono::SecondsFormat;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::error::Error;

/// Serialize the feed and its entries as an Atom 1.0 document.
pub fn write_atom(meta: &FeedMeta, items: &[ScrapedItem]) -> Result<String, Box<dyn Error>> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;

    let mut feed_start = BytesStart::new("feed");
    feed_start.push_attribute(("xmlns", "http://www.w3.org/2005/Atom"));
    writer.write_event(Event::Start(feed_start))?;

    write_text_element(&mut writer, "id", &meta.link)?;
    write_text_element(&mut writer, "title", &meta.title)?;
    write_text_element(&mut writer, "subtitle", &meta.description)?;

    let mut link = BytesStart::new("link");
    link.push_attribute(("rel", "alternate"));
    link.push_attribute(("href", meta.link.as_str()));
    writer.write_event(Event::Empty(link))?;

    write_text_element(
        &mut writer,
        "updated",
        &meta.updated.to_rfc3339_opts(SecondsFormat::Secs, true),
    )?;
    write_text_element(&mut writer, "generator", &meta.generator)?;

    for item in items {
        writer.write_event(Event::Start(BytesStart::new("entry")))?;
        write_text_element(&mut writer, "id", item.link.as_str())?;
        write_text_element(&mut writer, "title", &item.title)?;

        let mut entry_link = BytesStart::new("link");
        entry_link.push_attribute(("rel", "alternate"));
        entry_link.push_attribute(("href", item.link.as_str()));
        writer.write_event(Event::Empty(entry_link))?;

        write_text_element(
            &mut writer,
            "updated",
            &item.date.to_rfc3339_opts(SecondsFormat::Secs, true),
        )?;

        if !item.content.is_empty() {
            let mut content = BytesStart::new("content");
            content.push_attribute(("type", "html"));
            writer.write_event(Event::Start(content))?;
            writer.write_event(Event::Text(BytesText::new(&item.content)))?;
            writer.write_event(Event::End(BytesEnd::new("content")))?;
        }
        writer.write_event(Event::End(BytesEnd::new("entry")))?;
    }

    writer.write_event(Event::End(BytesEnd::new("feed")))?;
    into_string(writer)
}
