//! RSS 2.0 document parsing.
//!
//! Only the parts of a feed the aggregator uses are read: the channel's title,
//! link and description, and for every item its title, guid, link, description,
//! publication date and enclosure. Items without an enclosure are not episodes
//! and are dropped.

use chrono::{DateTime, Utc};
use quick_xml::{
    Reader,
    events::{BytesStart, Event},
};

use crate::errors::{LibraryError, Result};

#[derive(Debug, Clone, Default)]
pub struct ParsedFeed {
    pub title: String,
    pub link: String,
    pub description: String,
    pub items: Vec<ParsedItem>,
}

#[derive(Debug, Clone, Default)]
pub struct ParsedItem {
    pub guid: String,
    pub title: String,
    pub description: String,
    pub link: String,
    pub url: String,
    pub mime_type: String,
    pub size: u64,
    pub published: Option<DateTime<Utc>>,
    pub_date: String,
}

pub fn parse_feed(xml: &str) -> Result<ParsedFeed> {
    let mut reader = Reader::from_str(xml.trim());
    reader.trim_text(true);

    let mut feed = ParsedFeed::default();
    let mut path: Vec<String> = Vec::new();
    let mut item: Option<ParsedItem> = None;
    let mut saw_channel = false;

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let name = element_name(&e);
                match name.as_str() {
                    "channel" => saw_channel = true,
                    "item" => item = Some(ParsedItem::default()),
                    "enclosure" => {
                        if let Some(current) = item.as_mut() {
                            read_enclosure(&e, current)?;
                        }
                    }
                    _ => {}
                }
                path.push(name);
            }
            Event::Empty(e) => {
                if element_name(&e) == "enclosure" {
                    if let Some(current) = item.as_mut() {
                        read_enclosure(&e, current)?;
                    }
                }
            }
            Event::End(_) => {
                if path.pop().as_deref() == Some("item") {
                    if let Some(done) = item.take() {
                        if let Some(done) = finish_item(done) {
                            feed.items.push(done);
                        }
                    }
                }
            }
            Event::Text(t) => {
                let text = t.unescape()?;
                assign_text(&mut feed, item.as_mut(), &path, &text);
            }
            Event::CData(c) => {
                let raw = c.into_inner();
                let text = String::from_utf8_lossy(&raw);
                assign_text(&mut feed, item.as_mut(), &path, &text);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !saw_channel {
        return Err(LibraryError::InvalidFeed {
            reason: "no RSS channel element".to_string(),
        });
    }

    Ok(feed)
}

/// Qualified element name. Prefixed extensions such as `itunes:title` keep
/// their prefix so they never stand in for the plain RSS element.
fn element_name(e: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(e.name().as_ref()).into_owned()
}

fn read_enclosure(e: &BytesStart<'_>, item: &mut ParsedItem) -> Result<()> {
    for attr in e.attributes() {
        let attr = attr.map_err(quick_xml::Error::from)?;
        let value = attr.unescape_value()?.trim().to_string();
        match attr.key.as_ref() {
            b"url" => item.url = value,
            b"type" => item.mime_type = value,
            b"length" => item.size = value.parse().unwrap_or(0),
            _ => {}
        }
    }
    Ok(())
}

fn assign_text(feed: &mut ParsedFeed, item: Option<&mut ParsedItem>, path: &[String], text: &str) {
    let [.., parent, element] = path else {
        return;
    };

    let target = match (item, parent.as_str()) {
        (Some(item), "item") => match element.as_str() {
            "title" => &mut item.title,
            "guid" => &mut item.guid,
            "link" => &mut item.link,
            "description" => &mut item.description,
            "pubDate" => &mut item.pub_date,
            _ => return,
        },
        (None, "channel") => match element.as_str() {
            "title" => &mut feed.title,
            "link" => &mut feed.link,
            "description" => &mut feed.description,
            _ => return,
        },
        _ => return,
    };

    target.push_str(text);
}

fn finish_item(mut item: ParsedItem) -> Option<ParsedItem> {
    if item.url.is_empty() {
        return None;
    }

    item.title = item.title.trim().to_string();
    item.guid = item.guid.trim().to_string();
    if item.guid.is_empty() {
        item.guid = item.url.clone();
    }
    if item.title.is_empty() {
        item.title = item.guid.clone();
    }
    item.published = DateTime::parse_from_rfc2822(item.pub_date.trim())
        .ok()
        .map(|d| d.with_timezone(&Utc));

    Some(item)
}
