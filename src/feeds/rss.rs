//! RSS 2.0 serialization.
//!
//! One `<channel>` per site; item content travels in `<description>` and
//! dates are formatted as RFC 2822, which is what RSS readers expect in
//! `pubDate` and `lastBuildDate`.

use super::common::{into_string, write_text_element};
use super::FeedMeta;
use crate::models::ScrapedItem;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::error::Error;

/// Serialize the channel and its items as an RSS 2.0 document.
pub fn write_rss(meta: &FeedMeta, items: &[ScrapedItem]) -> Result<String, Box<dyn Error>> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;

    let mut rss_start = BytesStart::new("rss");
    rss_start.push_attribute(("version", "2.0"));
    writer.write_event(Event::Start(rss_start))?;
    writer.write_event(Event::Start(BytesStart::new("channel")))?;

    write_text_element(&mut writer, "title", &meta.title)?;
    write_text_element(&mut writer, "link", &meta.link)?;
    write_text_element(&mut writer, "description", &meta.description)?;
    write_text_element(&mut writer, "language", meta.language)?;
    write_text_element(&mut writer, "lastBuildDate", &meta.updated.to_rfc2822())?;
    write_text_element(&mut writer, "generator", &meta.generator)?;

    for item in items {
        writer.write_event(Event::Start(BytesStart::new("item")))?;
        write_text_element(&mut writer, "title", &item.title)?;
        write_text_element(&mut writer, "link", item.link.as_str())?;

        let mut guid = BytesStart::new("guid");
        guid.push_attribute(("isPermaLink", "true"));
        writer.write_event(Event::Start(guid))?;
        writer.write_event(Event::Text(BytesText::new(item.link.as_str())))?;
        writer.write_event(Event::End(BytesEnd::new("guid")))?;

        write_text_element(&mut writer, "pubDate", &item.date.to_rfc2822())?;
        if !item.content.is_empty() {
            write_text_element(&mut writer, "description", &item.content)?;
        }
        writer.write_event(Event::End(BytesEnd::new("item")))?;
    }

    writer.write_event(Event::End(BytesEnd::new("channel")))?;
    writer.write_event(Event::End(BytesEnd::new("rss")))?;
    into_string(writer)
}
