//! Search-suggestion matching over the catalog.

use super::types::{Article, ArticleLocation, Catalog};

/// Maximum number of suggestions returned for a query.
pub const MAX_SUGGESTIONS: usize = 5;

/// A matching article together with where it lives.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchHit<'a> {
    pub location: ArticleLocation,
    pub column_id: u32,
    pub article: &'a Article,
}

/// Case-insensitive substring search over title, category, author and body.
///
/// Returns at most [`MAX_SUGGESTIONS`] hits in catalog order. A query that is
/// blank after trimming matches nothing; otherwise the query is used as typed
/// (surrounding spaces included).
pub fn search<'a>(catalog: &'a Catalog, query: &str) -> Vec<SearchHit<'a>> {
    if query.trim().is_empty() {
        return Vec::new();
    }

    let needle = query.to_lowercase();
    catalog
        .articles()
        .filter(|(_, article)| article.matches_lowercase(&needle))
        .take(MAX_SUGGESTIONS)
        .map(|(location, article)| SearchHit {
            location,
            column_id: catalog.columns[location.column].id,
            article,
        })
        .collect()
}
