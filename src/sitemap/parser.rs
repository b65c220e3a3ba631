//! Namespace-aware `<loc>` extraction for sitemap XML
//!
//! Both document shapes have the same structure: a root element whose direct
//! children are entries (`<sitemap>` or `<url>`), each carrying a `<loc>`
//! child. Only elements bound to the sitemap namespace are considered.

use quick_xml::events::Event;
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::reader::NsReader;
use thiserror::Error;

/// The standard sitemap XML namespace
pub const SITEMAP_NAMESPACE: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// Depth of entry elements (root is depth 1)
const ENTRY_DEPTH: usize = 2;

/// Depth of `<loc>` elements inside an entry
const LOC_DEPTH: usize = 3;

/// Errors that can occur while extracting entries from a sitemap document
#[derive(Debug, Error)]
pub enum SitemapError {
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("<{entry}> entry #{position} has no <loc> child")]
    MissingLoc { entry: &'static str, position: usize },

    #[error("document has no root element")]
    EmptyDocument,

    #[error("document ended with {0} unclosed element(s)")]
    Unclosed(usize),

    #[error("content after the root element")]
    TrailingContent,
}

/// Extracts the `<loc>` of every `<sitemap>` entry in a sitemap index
pub fn parse_sitemap_index(content: &[u8]) -> Result<Vec<String>, SitemapError> {
    extract_locs(content, "sitemap")
}

/// Extracts the `<loc>` of every `<url>` entry in a urlset
pub fn parse_urlset(content: &[u8]) -> Result<Vec<String>, SitemapError> {
    extract_locs(content, "url")
}

fn in_sitemap_namespace(ns: &ResolveResult) -> bool {
    matches!(ns, ResolveResult::Bound(Namespace(uri)) if *uri == SITEMAP_NAMESPACE.as_bytes())
}

/// Walks the document once and collects the first `<loc>` of each entry
///
/// The root element's name is not checked: a document whose root has no
/// matching children simply yields no entries. A matching entry without a
/// `<loc>` fails the whole document, as does any element or non-whitespace
/// text after the root element has closed.
fn extract_locs(content: &[u8], entry: &'static str) -> Result<Vec<String>, SitemapError> {
    let mut reader = NsReader::from_reader(content);
    let mut buf = Vec::new();

    let mut locs = Vec::new();
    let mut depth = 0usize;
    let mut saw_root = false;
    let mut root_closed = false;
    let mut entries_seen = 0usize;

    // Some(..) while inside a matching entry; the inner value is its loc once read
    let mut current: Option<Option<String>> = None;
    // Some(..) while inside the current entry's loc
    let mut loc_text: Option<String> = None;

    loop {
        match reader.read_resolved_event_into(&mut buf)? {
            (_, Event::Start(_) | Event::Empty(_)) if root_closed => {
                return Err(SitemapError::TrailingContent);
            }
            (ns, Event::Start(e)) => {
                depth += 1;
                saw_root = true;
                let in_ns = in_sitemap_namespace(&ns);
                let name = e.local_name();

                if depth == ENTRY_DEPTH && in_ns && name.as_ref() == entry.as_bytes() {
                    entries_seen += 1;
                    current = Some(None);
                } else if depth == LOC_DEPTH
                    && in_ns
                    && name.as_ref() == b"loc"
                    && matches!(current, Some(None))
                {
                    loc_text = Some(String::new());
                }
            }
            (ns, Event::Empty(e)) => {
                root_closed = depth == 0;
                saw_root = true;
                let in_ns = in_sitemap_namespace(&ns);
                let name = e.local_name();

                if depth + 1 == ENTRY_DEPTH && in_ns && name.as_ref() == entry.as_bytes() {
                    entries_seen += 1;
                    return Err(SitemapError::MissingLoc {
                        entry,
                        position: entries_seen,
                    });
                } else if depth + 1 == LOC_DEPTH
                    && in_ns
                    && name.as_ref() == b"loc"
                    && matches!(current, Some(None))
                {
                    current = Some(Some(String::new()));
                }
            }
            (_, Event::Text(e)) => {
                if root_closed && e.iter().any(|b| !b.is_ascii_whitespace()) {
                    return Err(SitemapError::TrailingContent);
                }
                if let Some(text) = loc_text.as_mut() {
                    text.push_str(&e.unescape()?);
                }
            }
            (_, Event::CData(e)) => {
                if root_closed {
                    return Err(SitemapError::TrailingContent);
                }
                if let Some(text) = loc_text.as_mut() {
                    text.push_str(&String::from_utf8_lossy(&e.into_inner()));
                }
            }
            (_, Event::End(_)) => {
                if depth == LOC_DEPTH {
                    if let Some(text) = loc_text.take() {
                        current = Some(Some(text.trim().to_string()));
                    }
                } else if depth == ENTRY_DEPTH {
                    match current.take() {
                        Some(Some(loc)) => locs.push(loc),
                        Some(None) => {
                            return Err(SitemapError::MissingLoc {
                                entry,
                                position: entries_seen,
                            })
                        }
                        None => {}
                    }
                }
                depth = depth.saturating_sub(1);
                root_closed = depth == 0;
            }
            (_, Event::Eof) => break,
            _ => {}
        }
        buf.clear();
    }

    if !saw_root {
        return Err(SitemapError::EmptyDocument);
    }
    if depth != 0 {
        return Err(SitemapError::Unclosed(depth));
    }

    Ok(locs)
}
