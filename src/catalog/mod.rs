//! Static article catalog.
//!
//! - `types` - catalog data model
//! - `loader` - bundled/file loading and validation
//! - `markup` - inline emphasis and body previews
//! - `search` - suggestion matching
//! - `trending` - trending-title resolution

mod loader;
mod markup;
mod search;
mod trending;
mod types;

pub use loader::CatalogError;
pub use markup::{
    body_words, inline_words, is_tall, preview_body, preview_text, preview_words, Emphasis,
};
pub use search::{search, SearchHit, MAX_SUGGESTIONS};
pub use trending::resolve_trending;
pub use types::{
    Article, ArticleLocation, Catalog, CategoryColor, Column, ScrollDirection, TrendingItem,
};
