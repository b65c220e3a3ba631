//! Seed loading
//!
//! The walk starts from a root sitemap index stored on local disk.

use crate::sitemap::extract_sitemaps_from_index;
use crate::FrontierError;
use std::path::Path;

/// Reads the local root sitemap index and returns its sitemap references
///
/// A missing or unreadable file is fatal. A file that reads but does not parse
/// yields no references, so the walk simply finds nothing to do.
pub fn load_seed_references(path: &Path) -> Result<Vec<String>, FrontierError> {
    let content = std::fs::read(path).map_err(|source| FrontierError::SeedRead {
        path: path.to_path_buf(),
        source,
    })?;

    let references = extract_sitemaps_from_index(&content);
    tracing::info!(
        "Extracted {} initial sitemap URLs from {}",
        references.len(),
        path.display()
    );

    Ok(references)
}
