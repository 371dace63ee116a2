use chrono::{Datelike, Timelike};
use podcli::{
    errors::LibraryError,
    feed::parse_feed,
    opml::{parse_outlines, write_outlines},
    query::Query,
    types::{Episode, EpisodeState, Podcast},
};

const FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0" xmlns:itunes="http://www.itunes.com/dtds/podcast-1.0.dtd">
  <channel>
    <title>Rust &amp; Friends</title>
    <link>https://friends.example.com/</link>
    <description><![CDATA[Talking <b>Rust</b>.]]></description>
    <image>
      <title>Cover</title>
      <url>https://friends.example.com/cover.png</url>
    </image>
    <item>
      <title>Episode 2</title>
      <guid isPermaLink="false">ep-2</guid>
      <pubDate>Tue, 02 Jan 2024 10:30:00 +0000</pubDate>
      <enclosure url="https://media.example.com/ep2.mp3" length="2048" type="audio/mpeg"/>
    </item>
    <item>
      <title>Blog post without audio</title>
      <guid>post-1</guid>
    </item>
    <item>
      <enclosure url="https://media.example.com/ep1.mp3" type="audio/mpeg"></enclosure>
      <pubDate>not a date</pubDate>
    </item>
  </channel>
</rss>"#;

#[test]
fn test_parse_feed_channel() {
    let feed = parse_feed(FEED).unwrap();

    assert_eq!(feed.title, "Rust & Friends");
    assert_eq!(feed.link, "https://friends.example.com/");
    assert_eq!(feed.description, "Talking <b>Rust</b>.");
}

#[test]
fn test_parse_feed_items() {
    let feed = parse_feed(FEED).unwrap();

    // the item without enclosure is dropped
    assert_eq!(feed.items.len(), 2);

    let first = &feed.items[0];
    assert_eq!(first.title, "Episode 2");
    assert_eq!(first.guid, "ep-2");
    assert_eq!(first.url, "https://media.example.com/ep2.mp3");
    assert_eq!(first.mime_type, "audio/mpeg");
    assert_eq!(first.size, 2048);
    let published = first.published.unwrap();
    assert_eq!((published.year(), published.month(), published.day()), (2024, 1, 2));
    assert_eq!(published.hour(), 10);

    // guid and title fall back to the enclosure url
    let second = &feed.items[1];
    assert_eq!(second.guid, "https://media.example.com/ep1.mp3");
    assert_eq!(second.title, second.guid);
    assert_eq!(second.size, 0);
    assert!(second.published.is_none());
}

#[test]
fn test_parse_feed_ignores_extension_elements() {
    let xml = r#"<rss version="2.0"
    xmlns:itunes="http://www.itunes.com/dtds/podcast-1.0.dtd"
    xmlns:atom="http://www.w3.org/2005/Atom">
  <channel>
    <itunes:title>Show</itunes:title>
    <title>Show</title>
    <atom:link href="https://show.example.com/feed" rel="self"/>
    <link>https://show.example.com/</link>
    <description>About the show</description>
    <itunes:summary>Longer summary</itunes:summary>
    <item>
      <title>Episode 1</title>
      <itunes:title>Episode 1</itunes:title>
      <itunes:episode>1</itunes:episode>
      <guid>ep-1</guid>
      <description>Notes</description>
      <itunes:summary>Other notes</itunes:summary>
      <enclosure url="https://media.example.com/ep1.mp3" length="10" type="audio/mpeg"/>
    </item>
  </channel>
</rss>"#;

    let feed = parse_feed(xml).unwrap();

    assert_eq!(feed.title, "Show");
    assert_eq!(feed.link, "https://show.example.com/");
    assert_eq!(feed.description, "About the show");

    assert_eq!(feed.items.len(), 1);
    assert_eq!(feed.items[0].title, "Episode 1");
    assert_eq!(feed.items[0].guid, "ep-1");
    assert_eq!(feed.items[0].description, "Notes");
}

#[test]
fn test_parse_feed_rejects_non_rss() {
    let result = parse_feed("<html><body><p>Hello</p></body></html>");
    assert!(matches!(result, Err(LibraryError::InvalidFeed { .. })));
}

#[test]
fn test_parse_feed_rejects_broken_xml() {
    let result = parse_feed("<rss><channel><title>x</channel></rss>");
    assert!(result.is_err());
}

#[test]
fn test_parse_outlines() {
    let xml = r#"<?xml version="1.0"?>
<opml version="1.0">
  <head><title>Subscriptions</title></head>
  <body>
    <outline text="Tech">
      <outline type="rss" text="Rust Talk" xmlUrl="http://rust.example.com/feed"/>
      <outline type="rss" title="News" text="ignored" xmlUrl="http://news.example.com/rss"></outline>
    </outline>
    <outline text="No url"/>
    <outline url="http://bare.example.com/feed"/>
  </body>
</opml>"#;

    let outlines = parse_outlines(xml).unwrap();

    assert_eq!(outlines.len(), 3);
    assert_eq!(outlines[0].url, "http://rust.example.com/feed");
    assert_eq!(outlines[0].title.as_deref(), Some("Rust Talk"));
    assert_eq!(outlines[1].title.as_deref(), Some("News"));
    assert_eq!(outlines[2].title, None);
}

#[test]
fn test_parse_outlines_requires_opml_root() {
    let result = parse_outlines("<rss><channel/></rss>");
    assert!(matches!(result, Err(LibraryError::InvalidFeed { .. })));
}

#[test]
fn test_written_outlines_can_be_imported() {
    let mut podcast = Podcast::new("http://example.com/feed?a=1&b=2".to_string());
    podcast.title = "Q & A \"live\"".to_string();

    let xml = write_outlines(&[podcast]);
    assert!(xml.contains("Q &amp; A"));

    let outlines = parse_outlines(&xml).unwrap();
    assert_eq!(outlines.len(), 1);
    assert_eq!(outlines[0].url, "http://example.com/feed?a=1&b=2");
    assert_eq!(outlines[0].title.as_deref(), Some("Q & A \"live\""));
}

fn query_fixture() -> (Podcast, Vec<Episode>) {
    let mut podcast = Podcast::new("http://talk.example.com/feed".to_string());
    podcast.title = "Talk Show".to_string();

    let make = |id: u64, title: &str, is_new: bool, state: EpisodeState| Episode {
        id,
        guid: id.to_string(),
        title: title.to_string(),
        description: String::new(),
        link: String::new(),
        url: format!("http://media.example.com/{}.mp3", id),
        mime_type: String::new(),
        size: 0,
        published: None,
        is_new,
        state,
        download_path: None,
    };

    let episodes = vec![
        make(1, "Rust in Production", true, EpisodeState::Normal),
        make(2, "Async deep dive", false, EpisodeState::Downloaded),
        make(3, "Old news", false, EpisodeState::Deleted),
    ];
    (podcast, episodes)
}

fn matching(expr: &str) -> Vec<u64> {
    let (podcast, episodes) = query_fixture();
    let query = Query::parse(expr).unwrap();
    episodes
        .iter()
        .filter(|e| query.matches(&podcast, e))
        .map(|e| e.id)
        .collect()
}

#[test]
fn test_query_keywords() {
    assert_eq!(matching("new"), vec![1]);
    assert_eq!(matching("old"), vec![2, 3]);
    assert_eq!(matching("downloaded"), vec![2]);
    assert_eq!(matching("DELETED"), vec![3]);
}

#[test]
fn test_query_words_match_episode_and_podcast_titles() {
    assert_eq!(matching("rust"), vec![1]);
    assert_eq!(matching("talk"), vec![1, 2, 3]);
    assert_eq!(matching("\"deep dive\""), vec![2]);
    // quoting a keyword makes it a word
    assert_eq!(matching("\"old\""), vec![3]);
}

#[test]
fn test_query_operators() {
    assert_eq!(matching("not new"), vec![2, 3]);
    assert_eq!(matching("rust or async"), vec![1, 2]);
    assert_eq!(matching("old and not deleted"), vec![2]);
    // adjacent terms are joined with and
    assert_eq!(matching("talk news"), vec![3]);
    assert_eq!(matching("(new or downloaded) and async"), vec![2]);
}

#[test]
fn test_query_precedence() {
    assert_eq!(
        Query::parse("new or old and rust").unwrap(),
        Query::Or(
            Box::new(Query::New),
            Box::new(Query::And(
                Box::new(Query::Old),
                Box::new(Query::Word("rust".to_string()))
            ))
        )
    );
}

#[test]
fn test_query_syntax_errors() {
    for expr in ["", "   ", "(new", "new)", "and", "new or", "not", "\"open"] {
        let result = Query::parse(expr);
        assert!(
            matches!(result, Err(LibraryError::Query { .. })),
            "{:?} should not parse",
            expr
        );
    }
}

#[test]
fn test_query_from_separate_words() {
    let (podcast, episodes) = query_fixture();
    let matching_words = |words: &[&str]| -> Vec<u64> {
        let words: Vec<String> = words.iter().map(|w| w.to_string()).collect();
        let query = Query::from_words(&words).unwrap();
        episodes
            .iter()
            .filter(|e| query.matches(&podcast, e))
            .map(|e| e.id)
            .collect()
    };

    // an argument with spaces is one phrase
    assert_eq!(matching_words(&["deep dive"]), vec![2]);
    assert!(matching_words(&["dive deep"]).is_empty());
    assert_eq!(matching_words(&["dive", "deep"]), vec![2]);

    // single words keep their keyword and operator meaning
    assert_eq!(matching_words(&["not", "new"]), vec![2, 3]);
    assert_eq!(matching_words(&["(new or downloaded)", "and", "async"]), vec![2]);
    assert_eq!(matching_words(&["\"old\""]), vec![3]);
}
