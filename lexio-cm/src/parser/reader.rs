//! Streaming WXR (WordPress eXtended RSS) reader
//!
//! Flattens a WXR document into raw author/category/post records in one
//! pass. Only well-formedness is enforced; WordPress-specific structure is
//! handled with defensive defaults, so an empty channel yields empty
//! collections rather than an error.

use super::types::{WpAuthor, WpCategory, WpPost};
use super::ParseError;
use chrono::NaiveDateTime;
use quick_xml::events::Event;
use quick_xml::Reader;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// WordPress export timestamp format (`2023-01-15 10:30:00`)
const WP_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Flattened WXR document in document order
#[derive(Debug, Default)]
pub(super) struct FlatDocument {
    pub authors: Vec<WpAuthor>,
    pub categories: Vec<WpCategory>,
    pub posts: Vec<WpPost>,
}

/// Read and flatten a WXR file.
///
/// Fatal on an unreadable file or malformed XML; everything else degrades
/// to empty or defaulted fields.
pub(super) fn read_wxr(path: &Path) -> Result<FlatDocument, ParseError> {
    let file = File::open(path).map_err(|source| ParseError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let mut reader = Reader::from_reader(BufReader::with_capacity(64 * 1024, file));

    let mut doc = FlatDocument::default();
    let mut buf = Vec::new();
    // Element name stack; End events pop whatever Start pushed
    let mut stack: Vec<String> = Vec::new();
    // Text accumulated since the innermost Start (leaf elements only)
    let mut text = String::new();

    // In-flight records
    let mut author: Option<WpAuthor> = None;
    let mut category: Option<WpCategory> = None;
    let mut post: Option<WpPost> = None;
    let mut meta_key = String::new();
    let mut meta_value = String::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Err(e) => return Err(ParseError::Xml(e)),
            Ok(Event::Eof) => break,
            Ok(Event::Start(start)) => {
                let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
                match name.as_str() {
                    "wp:author" => author = Some(WpAuthor::default()),
                    "wp:category" => category = Some(WpCategory::default()),
                    "item" => post = Some(WpPost::default()),
                    "wp:postmeta" => {
                        meta_key.clear();
                        meta_value.clear();
                    }
                    _ => {}
                }
                stack.push(name);
                text.clear();
            }
            Ok(Event::Empty(_)) => text.clear(),
            Ok(Event::Text(t)) => text.push_str(&t.unescape()?),
            Ok(Event::CData(c)) => text.push_str(&String::from_utf8_lossy(&c.into_inner())),
            Ok(Event::End(_)) => {
                let name = stack.pop().unwrap_or_default();
                let value = text.trim();

                if let Some(a) = author.as_mut() {
                    match name.as_str() {
                        "wp:author_id" => a.id = value.parse().unwrap_or(0),
                        "wp:author_login" => a.login = value.to_string(),
                        "wp:author_email" => a.email = value.to_string(),
                        "wp:author_display_name" => a.display_name = value.to_string(),
                        "wp:author_first_name" => a.first_name = value.to_string(),
                        "wp:author_last_name" => a.last_name = value.to_string(),
                        "wp:author" => doc.authors.push(author.take().unwrap_or_default()),
                        _ => {}
                    }
                } else if let Some(c) = category.as_mut() {
                    match name.as_str() {
                        "wp:term_id" => c.id = value.parse().unwrap_or(0),
                        "wp:cat_name" => c.name = value.to_string(),
                        "wp:category_nicename" => c.slug = value.to_string(),
                        "wp:category" => doc.categories.push(category.take().unwrap_or_default()),
                        _ => {}
                    }
                } else if let Some(p) = post.as_mut() {
                    match name.as_str() {
                        "title" => p.title = value.to_string(),
                        "dc:creator" => p.author = value.to_string(),
                        "content:encoded" => p.content = text.clone(),
                        "excerpt:encoded" => p.excerpt = text.clone(),
                        "wp:post_id" => p.id = value.parse().unwrap_or(0),
                        "wp:post_name" => p.slug = value.to_string(),
                        "wp:post_type" => p.post_type = value.to_string(),
                        "wp:status" => p.status = value.to_string(),
                        "wp:post_date" => p.created_at = parse_wp_date(value),
                        "wp:post_date_gmt" => p.updated_at = parse_wp_date(value),
                        "category" => {
                            if !value.is_empty() {
                                p.categories.push(value.to_string());
                            }
                        }
                        "wp:meta_key" => meta_key = value.to_string(),
                        "wp:meta_value" => meta_value = text.clone(),
                        // Last value wins on duplicate meta keys
                        "wp:postmeta" => {
                            if !meta_key.is_empty() {
                                p.meta.insert(meta_key.clone(), meta_value.trim().to_string());
                            }
                        }
                        "item" => doc.posts.push(post.take().unwrap_or_default()),
                        _ => {}
                    }
                }
                text.clear();
            }
            Ok(_) => {}
        }
        buf.clear();
    }

    Ok(doc)
}

fn parse_wp_date(value: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, WP_DATE_FORMAT).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_fixture(xml: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(xml.as_bytes()).expect("write fixture");
        file
    }

    #[test]
    fn empty_channel_yields_empty_collections() {
        let file = write_fixture(
            r#"<?xml version="1.0"?><rss><channel><title>Export</title></channel></rss>"#,
        );
        let doc = read_wxr(file.path()).expect("parse");
        assert!(doc.authors.is_empty());
        assert!(doc.posts.is_empty());
    }

    #[test]
    fn unreadable_file_is_fatal() {
        let err = read_wxr(Path::new("/nonexistent/export.xml")).unwrap_err();
        assert!(matches!(err, ParseError::Read { .. }));
    }

    #[test]
    fn malformed_xml_is_fatal() {
        let file = write_fixture("<rss><channel><item></rss>");
        assert!(matches!(read_wxr(file.path()), Err(ParseError::Xml(_))));
    }

    #[test]
    fn flattens_authors_and_items_with_cdata() {
        let file = write_fixture(
            r#"<?xml version="1.0"?>
<rss><channel>
  <wp:author>
    <wp:author_id>3</wp:author_id>
    <wp:author_login>marie</wp:author_login>
    <wp:author_email>marie@example.com</wp:author_email>
    <wp:author_display_name><![CDATA[Marie D.]]></wp:author_display_name>
  </wp:author>
  <item>
    <title>French Stories 2</title>
    <dc:creator>marie</dc:creator>
    <content:encoded><![CDATA[<p>Il était une fois…</p>]]></content:encoded>
    <wp:post_id>101</wp:post_id>
    <wp:post_date>2021-06-01 09:00:00</wp:post_date>
    <wp:post_type>sfwd-courses</wp:post_type>
    <wp:status>publish</wp:status>
    <category><![CDATA[Courses]]></category>
    <wp:postmeta>
      <wp:meta_key>course_id</wp:meta_key>
      <wp:meta_value>7</wp:meta_value>
    </wp:postmeta>
    <wp:postmeta>
      <wp:meta_key>course_id</wp:meta_key>
      <wp:meta_value>9</wp:meta_value>
    </wp:postmeta>
  </item>
</channel></rss>"#,
        );
        let doc = read_wxr(file.path()).expect("parse");

        assert_eq!(doc.authors.len(), 1);
        assert_eq!(doc.authors[0].login, "marie");
        assert_eq!(doc.authors[0].display_name, "Marie D.");

        assert_eq!(doc.posts.len(), 1);
        let post = &doc.posts[0];
        assert_eq!(post.id, 101);
        assert_eq!(post.post_type, "sfwd-courses");
        assert!(post.content.contains("Il était une fois"));
        assert_eq!(post.categories, vec!["Courses".to_string()]);
        assert!(post.created_at.is_some());
        // Last value wins on duplicate meta keys
        assert_eq!(post.meta.get("course_id").map(String::as_str), Some("9"));
    }
}
