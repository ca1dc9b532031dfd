use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

// ============================================================================
// Enums
// ============================================================================

/// Direction a column drifts while auto-scrolling.
///
/// `Down` moves the content toward the bottom of the screen (the scroll
/// offset walks backwards through the looped content); `Up` moves it toward
/// the top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollDirection {
    Up,
    Down,
}

/// Badge color tag for an article's category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryColor {
    Primary,
    #[default]
    Secondary,
    Accent,
}

// ============================================================================
// Article
// ============================================================================

/// A single news article.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub category: String,
    #[serde(default, alias = "categoryColor")]
    pub category_color: CategoryColor,
    pub title: String,
    pub author: String,
    /// Body paragraphs, in reading order.
    #[serde(default)]
    pub content: Vec<String>,
    /// Video identifier for the embedded player.
    #[serde(default, alias = "videoId", skip_serializing_if = "Option::is_none")]
    pub video_id: Option<String>,
    /// Display-height hint in pixels. Accepts `500` or `"500px"`.
    #[serde(
        default,
        alias = "minHeight",
        deserialize_with = "deserialize_height_hint",
        skip_serializing_if = "Option::is_none"
    )]
    pub height_hint: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published: Option<NaiveDate>,
}

impl Article {
    /// True if any searchable field contains `needle`.
    ///
    /// `needle` must already be lowercased. Paragraphs are matched as written,
    /// emphasis delimiters included.
    pub(crate) fn matches_lowercase(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
            || self.category.to_lowercase().contains(needle)
            || self.author.to_lowercase().contains(needle)
            || self
                .content
                .iter()
                .any(|p| p.to_lowercase().contains(needle))
    }
}

fn deserialize_height_hint<'de, D>(deserializer: D) -> Result<Option<u16>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(u16),
        Text(String),
    }

    match Option::<Raw>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Raw::Number(n)) => Ok(Some(n)),
        Some(Raw::Text(s)) => {
            let digits = s.trim().trim_end_matches("px").trim();
            digits
                .parse::<u16>()
                .map(Some)
                .map_err(|_| serde::de::Error::custom(format!("invalid height hint '{}'", s)))
        }
    }
}

// ============================================================================
// Column
// ============================================================================

/// A vertically auto-scrolling group of articles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub id: u32,
    pub direction: ScrollDirection,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default)]
    pub articles: Vec<Article>,
}

impl Column {
    /// Label shown in the column border.
    pub fn display_label(&self) -> String {
        match &self.label {
            Some(label) => label.clone(),
            None => self
                .articles
                .first()
                .map(|a| a.category.clone())
                .unwrap_or_else(|| format!("Column {}", self.id)),
        }
    }
}

// ============================================================================
// Trending
// ============================================================================

/// Entry in the trending list: a loose reference to an article by title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrendingItem {
    pub title: String,
}

impl TrendingItem {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }
}

// ============================================================================
// Location
// ============================================================================

/// Position of an article: column index in the catalog plus index within it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ArticleLocation {
    pub column: usize,
    pub index: usize,
}

impl ArticleLocation {
    pub const fn new(column: usize, index: usize) -> Self {
        Self { column, index }
    }
}

impl fmt::Display for ArticleLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.column, self.index)
    }
}

// ============================================================================
// Catalog
// ============================================================================

/// The complete, immutable article catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    pub columns: Vec<Column>,
    #[serde(default)]
    pub trending: Vec<TrendingItem>,
}

impl Catalog {
    /// Bounds-checked article lookup.
    pub fn article(&self, loc: ArticleLocation) -> Option<&Article> {
        self.columns
            .get(loc.column)
            .and_then(|c| c.articles.get(loc.index))
    }

    /// Every article with its location, in catalog order.
    pub fn articles(&self) -> impl Iterator<Item = (ArticleLocation, &Article)> {
        self.columns.iter().enumerate().flat_map(|(ci, column)| {
            column
                .articles
                .iter()
                .enumerate()
                .map(move |(ai, article)| (ArticleLocation::new(ci, ai), article))
        })
    }

    /// Exact-title lookup.
    pub fn find_by_title(&self, title: &str) -> Option<ArticleLocation> {
        self.articles()
            .find(|(_, a)| a.title == title)
            .map(|(loc, _)| loc)
    }

    pub fn article_count(&self) -> usize {
        self.columns.iter().map(|c| c.articles.len()).sum()
    }
}
