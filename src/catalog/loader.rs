//! Catalog loading and validation.
//!
//! The bundled catalog is compiled into the binary. A user catalog with the
//! same JSON schema can replace it at startup. Either way the text is
//! stripped of terminal control sequences and checked for the invariants the
//! UI relies on (unique titles, unique column ids).

use super::types::{Article, Catalog};
use crate::util::{strip_control_chars, valid_video_id};
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;

/// Catalog shipped with the binary.
const BUNDLED_CATALOG: &str = include_str!("../../data/catalog.json");

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid catalog JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Catalog file too large: {0}")]
    TooLarge(String),

    #[error("Catalog has no columns")]
    Empty,

    /// Trending entries and search results identify articles by title.
    #[error("Duplicate article title: {0}")]
    DuplicateTitle(String),

    #[error("Duplicate column id: {0}")]
    DuplicateColumnId(u32),
}

impl Catalog {
    /// Maximum catalog file size (4 MB).
    const MAX_FILE_SIZE: u64 = 4 * 1_048_576;

    /// The catalog compiled into the binary.
    pub fn bundled() -> Result<Self, CatalogError> {
        Self::from_json_str(BUNDLED_CATALOG)
    }

    /// Load a catalog from a JSON file.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let meta = std::fs::metadata(path)?;
        if meta.len() > Self::MAX_FILE_SIZE {
            return Err(CatalogError::TooLarge(format!(
                "Catalog file is {} bytes (max {} bytes)",
                meta.len(),
                Self::MAX_FILE_SIZE
            )));
        }

        let content = std::fs::read_to_string(path)?;
        let catalog = Self::from_json_str(&content)?;
        tracing::info!(
            path = %path.display(),
            columns = catalog.columns.len(),
            articles = catalog.article_count(),
            "Loaded catalog"
        );
        Ok(catalog)
    }

    /// Parse, sanitize and validate a catalog from JSON text.
    pub fn from_json_str(s: &str) -> Result<Self, CatalogError> {
        let mut catalog: Catalog = serde_json::from_str(s)?;
        catalog.sanitize();
        catalog.validate()?;
        Ok(catalog)
    }

    fn sanitize(&mut self) {
        for column in &mut self.columns {
            if let Some(label) = column.label.as_mut() {
                clean(label);
            }
            for article in &mut column.articles {
                sanitize_article(article);
            }
        }
        for item in &mut self.trending {
            clean(&mut item.title);
        }
    }

    fn validate(&self) -> Result<(), CatalogError> {
        if self.columns.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut column_ids = HashSet::with_capacity(self.columns.len());
        for column in &self.columns {
            if !column_ids.insert(column.id) {
                return Err(CatalogError::DuplicateColumnId(column.id));
            }
        }

        let mut titles = HashSet::with_capacity(self.article_count());
        for (_, article) in self.articles() {
            if !titles.insert(article.title.as_str()) {
                return Err(CatalogError::DuplicateTitle(article.title.clone()));
            }
        }

        let dangling = self
            .trending
            .iter()
            .filter(|item| !titles.contains(item.title.as_str()))
            .count();
        if dangling > 0 {
            tracing::debug!(dangling, "Trending entries without a matching article");
        }

        Ok(())
    }
}

/// Strip control characters and surrounding whitespace in place.
fn clean(s: &mut String) {
    let cleaned = strip_control_chars(s).trim().to_string();
    if cleaned.len() != s.len() {
        *s = cleaned;
    }
}

fn sanitize_article(article: &mut Article) {
    clean(&mut article.title);
    clean(&mut article.category);
    clean(&mut article.author);
    for paragraph in &mut article.content {
        clean(paragraph);
    }
    article.content.retain(|p| !p.is_empty());

    if let Some(id) = article.video_id.as_mut() {
        clean(id);
    }
    // An unusable video id degrades to "no video" rather than failing the load.
    if let Some(id) = article.video_id.as_deref() {
        if !valid_video_id(id) {
            tracing::warn!(title = %article.title, video_id = %id, "Ignoring invalid video id");
            article.video_id = None;
        }
    }
}
