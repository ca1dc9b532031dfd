use super::types::{ArticleLocation, Catalog, TrendingItem};

/// Resolve a trending entry to the article with exactly the same title.
///
/// Returns `None` for entries that point at nothing; the caller treats that as
/// a no-op.
pub fn resolve_trending(catalog: &Catalog, item: &TrendingItem) -> Option<ArticleLocation> {
    let found = catalog.find_by_title(&item.title);
    if found.is_none() {
        tracing::debug!(title = %item.title, "Trending entry has no matching article");
    }
    found
}
