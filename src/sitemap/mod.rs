//! Sitemap document classification and entry extraction
//!
//! A fetched document is either a sitemap index (its entries point at further
//! sitemaps) or a leaf sitemap (its entries are page URLs). The decision is a
//! fast substring check on the raw body, made before any parsing.
//!
//! Extraction failures never escape this module through the `extract_*`
//! functions: they are logged and reported as an empty entry list.

mod parser;
mod seed;

pub use parser::{parse_sitemap_index, parse_urlset, SitemapError, SITEMAP_NAMESPACE};
pub use seed::load_seed_references;

/// Literal marker whose presence identifies a sitemap index (case-sensitive)
pub const INDEX_MARKER: &str = "<sitemapindex";

/// A classified sitemap document with its extracted entries
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SitemapDocument {
    /// References to further sitemap documents
    Index(Vec<String>),

    /// Page URLs
    Leaf(Vec<String>),
}

impl SitemapDocument {
    /// Returns true if this document is a sitemap index
    pub fn is_index(&self) -> bool {
        matches!(self, Self::Index(_))
    }

    /// Returns the extracted entries regardless of document kind
    pub fn entries(&self) -> &[String] {
        match self {
            Self::Index(entries) | Self::Leaf(entries) => entries,
        }
    }
}

/// Returns true if the raw body contains the sitemap index marker
pub fn is_sitemap_index(body: &[u8]) -> bool {
    let marker = INDEX_MARKER.as_bytes();
    body.windows(marker.len()).any(|window| window == marker)
}

/// Classifies a fetched body and extracts its entries
///
/// # Example
///
/// ```
/// use sitemap_frontier::sitemap::{classify_document, SitemapDocument};
///
/// let body = br#"<sitemapindex xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
///   <sitemap><loc>https://example.com/pages.xml</loc></sitemap>
/// </sitemapindex>"#;
///
/// assert_eq!(
///     classify_document(body),
///     SitemapDocument::Index(vec!["https://example.com/pages.xml".to_string()])
/// );
/// ```
pub fn classify_document(body: &[u8]) -> SitemapDocument {
    if is_sitemap_index(body) {
        SitemapDocument::Index(extract_sitemaps_from_index(body))
    } else {
        SitemapDocument::Leaf(extract_urls_from_sitemap(body))
    }
}

/// Extracts nested sitemap references, logging and returning nothing on failure
pub fn extract_sitemaps_from_index(content: &[u8]) -> Vec<String> {
    match parse_sitemap_index(content) {
        Ok(references) => references,
        Err(e) => {
            tracing::warn!("Failed to parse sitemap index: {}", e);
            Vec::new()
        }
    }
}

/// Extracts page URLs from a leaf sitemap, logging and returning nothing on failure
pub fn extract_urls_from_sitemap(content: &[u8]) -> Vec<String> {
    match parse_urlset(content) {
        Ok(urls) => urls,
        Err(e) => {
            tracing::warn!("Failed to parse sitemap: {}", e);
            Vec::new()
        }
    }
}
