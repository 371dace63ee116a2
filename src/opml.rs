//! OPML subscription lists.

use chrono::Utc;
use quick_xml::{Reader, escape::escape, events::Event};

use crate::{
    errors::{LibraryError, Result},
    types::{Outline, Podcast},
};

/// Reads every `outline` element that carries a feed URL.
///
/// The title comes from the `title` attribute, falling back to `text`.
/// Outlines used purely for grouping (no `xmlUrl`) are skipped, but their
/// children are still visited.
pub fn parse_outlines(xml: &str) -> Result<Vec<Outline>> {
    let mut reader = Reader::from_str(xml.trim());
    reader.trim_text(true);

    let mut outlines = Vec::new();
    let mut saw_opml = false;

    loop {
        match reader.read_event()? {
            Event::Start(e) | Event::Empty(e) => match e.local_name().as_ref() {
                b"opml" => saw_opml = true,
                b"outline" => {
                    let mut url = None;
                    let mut title = None;
                    let mut text = None;
                    for attr in e.attributes() {
                        let attr = attr.map_err(quick_xml::Error::from)?;
                        let value = attr.unescape_value()?.trim().to_string();
                        if value.is_empty() {
                            continue;
                        }
                        match attr.key.as_ref() {
                            b"xmlUrl" | b"xmlurl" | b"url" => url = Some(value),
                            b"title" => title = Some(value),
                            b"text" => text = Some(value),
                            _ => {}
                        }
                    }

                    if let Some(url) = url {
                        outlines.push(Outline {
                            url,
                            title: title.or(text),
                        });
                    }
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    if !saw_opml {
        return Err(LibraryError::InvalidFeed {
            reason: "no OPML root element".to_string(),
        });
    }

    Ok(outlines)
}

pub fn write_outlines(podcasts: &[Podcast]) -> String {
    let mut doc = String::new();
    doc.push_str("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n");
    doc.push_str("<opml version=\"2.0\">\n");
    doc.push_str("  <head>\n");
    doc.push_str("    <title>podcli subscriptions</title>\n");
    doc.push_str(&format!(
        "    <dateCreated>{}</dateCreated>\n",
        Utc::now().to_rfc2822()
    ));
    doc.push_str("  </head>\n");
    doc.push_str("  <body>\n");

    for podcast in podcasts {
        let title = escape(podcast.title.as_str());
        doc.push_str(&format!(
            "    <outline text=\"{title}\" title=\"{title}\" type=\"rss\" xmlUrl=\"{url}\"/>\n",
            title = title,
            url = escape(podcast.url.as_str())
        ));
    }

    doc.push_str("  </body>\n");
    doc.push_str("</opml>\n");
    doc
}
