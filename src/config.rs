//! Configuration file parser for ~/.config/chronicle/config.toml.
//!
//! The config file is optional: a missing file yields `Config::default()`.
//! Unknown keys are accepted by serde but logged as warnings so typos surface.
use crate::util::DEFAULT_EMBED_BASE;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid TOML in config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Config file too large: {0}")]
    TooLarge(String),
}

// ============================================================================
// Configuration Struct
// ============================================================================

const KNOWN_KEYS: [&str; 10] = [
    "theme",
    "catalog",
    "columns_per_page",
    "scroll_interval_ms",
    "highlight_secs",
    "resume_delay_secs",
    "wheel_debounce_ms",
    "mouse",
    "embed_base_url",
    "keybindings",
];

/// Top-level application configuration.
///
/// All fields use `#[serde(default)]` so any subset of keys can be specified.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Theme variant name ("dark" or "light").
    pub theme: String,

    /// Catalog JSON file to use instead of the bundled one.
    pub catalog: Option<PathBuf>,

    /// Columns shown side by side on one page.
    pub columns_per_page: usize,

    /// Auto-scroll animation period in milliseconds.
    pub scroll_interval_ms: u64,

    /// How long a jumped-to article stays highlighted.
    pub highlight_secs: u64,

    /// Idle delay before a hovered or selected column starts scrolling again.
    pub resume_delay_secs: u64,

    /// Window in which further wheel events over the dot strip are ignored.
    pub wheel_debounce_ms: u64,

    /// Capture mouse events (hover pause, wheel paging, clicks).
    pub mouse: bool,

    /// Base URL the video id is appended to.
    pub embed_base_url: String,

    /// Keybinding overrides. Keys are action names, values are key strings.
    pub keybindings: HashMap<String, String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: "dark".to_string(),
            catalog: None,
            columns_per_page: 2,
            scroll_interval_ms: 200,
            highlight_secs: 5,
            resume_delay_secs: 3,
            wheel_debounce_ms: 800,
            mouse: true,
            embed_base_url: DEFAULT_EMBED_BASE.to_string(),
            keybindings: HashMap::new(),
        }
    }
}

impl Config {
    /// Maximum config file size (1 MB).
    const MAX_FILE_SIZE: u64 = 1_048_576;

    /// Load configuration from a TOML file.
    ///
    /// - Missing file → `Ok(Config::default())`
    /// - Empty file → `Ok(Config::default())`
    /// - Invalid TOML → `Err(ConfigError::Parse)` with line number info
    /// - Unknown keys → accepted, logged as warning
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::metadata(path) {
            Ok(meta) if meta.len() > Self::MAX_FILE_SIZE => {
                return Err(ConfigError::TooLarge(format!(
                    "Config file is {} bytes (max {} bytes)",
                    meta.len(),
                    Self::MAX_FILE_SIZE
                )));
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No config file found, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::Io(e)),
            Ok(_) => {}
        }

        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "Config file disappeared, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::Io(e)),
        };

        let config = Self::from_toml_str(&content)?;
        tracing::info!(path = %path.display(), theme = %config.theme, "Loaded configuration");
        Ok(config)
    }

    /// Parse configuration text, warning about unknown keys.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        if let Ok(raw) = content.parse::<toml::Table>() {
            for key in raw.keys() {
                if !KNOWN_KEYS.contains(&key.as_str()) {
                    tracing::warn!(key = %key, "Unknown key in config file, ignoring");
                }
            }
        }

        let mut config: Config = toml::from_str(content)?;
        config.clamp();
        Ok(config)
    }

    /// Replace values that would stall the UI with their nearest usable value.
    fn clamp(&mut self) {
        if self.columns_per_page == 0 {
            tracing::warn!("columns_per_page must be at least 1, using 1");
            self.columns_per_page = 1;
        }
        if self.scroll_interval_ms < 16 {
            tracing::warn!(
                value = self.scroll_interval_ms,
                "scroll_interval_ms below 16, using 16"
            );
            self.scroll_interval_ms = 16;
        }
    }

    pub fn scroll_interval(&self) -> Duration {
        Duration::from_millis(self.scroll_interval_ms)
    }

    pub fn highlight_duration(&self) -> Duration {
        Duration::from_secs(self.highlight_secs)
    }

    pub fn resume_delay(&self) -> Duration {
        Duration::from_secs(self.resume_delay_secs)
    }

    pub fn wheel_debounce(&self) -> Duration {
        Duration::from_millis(self.wheel_debounce_ms)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn temp_config(name: &str, content: &str) -> (PathBuf, PathBuf) {
        let dir = std::env::temp_dir().join(format!("chronicle_config_test_{}", name));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        std::fs::write(&path, content).unwrap();
        (dir, path)
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.theme, "dark");
        assert_eq!(config.catalog, None);
        assert_eq!(config.columns_per_page, 2);
        assert_eq!(config.scroll_interval(), Duration::from_millis(200));
        assert_eq!(config.highlight_duration(), Duration::from_secs(5));
        assert_eq!(config.resume_delay(), Duration::from_secs(3));
        assert_eq!(config.wheel_debounce(), Duration::from_millis(800));
        assert!(config.mouse);
        assert_eq!(config.embed_base_url, "https://www.youtube.com/embed/");
        assert!(config.keybindings.is_empty());
    }

    #[test]
    fn test_missing_file_returns_default() {
        let path = Path::new("/tmp/chronicle_test_nonexistent_config.toml");
        assert_eq!(Config::load(path).unwrap(), Config::default());
    }

    #[test]
    fn test_empty_and_whitespace_files_return_default() {
        for (name, content) in [("empty", ""), ("whitespace", "   \n  \n  ")] {
            let (dir, path) = temp_config(name, content);
            assert_eq!(Config::load(&path).unwrap(), Config::default());
            std::fs::remove_dir_all(&dir).ok();
        }
    }

    #[test]
    fn test_partial_config_uses_defaults_for_missing() {
        let config = Config::from_toml_str("theme = \"light\"\n").unwrap();
        assert_eq!(config.theme, "light");
        assert_eq!(config.columns_per_page, 2);
        assert!(config.mouse);
    }

    #[test]
    fn test_full_config() {
        let content = r#"
theme = "light"
catalog = "/srv/news/catalog.json"
columns_per_page = 3
scroll_interval_ms = 100
highlight_secs = 8
resume_delay_secs = 1
wheel_debounce_ms = 500
mouse = false
embed_base_url = "https://player.example.com/embed/"

[keybindings]
quit = "Ctrl+q"
next_page = "n"
"#;
        let (dir, path) = temp_config("full", content);

        let config = Config::load(&path).unwrap();
        assert_eq!(config.theme, "light");
        assert_eq!(
            config.catalog.as_deref(),
            Some(Path::new("/srv/news/catalog.json"))
        );
        assert_eq!(config.columns_per_page, 3);
        assert_eq!(config.scroll_interval_ms, 100);
        assert_eq!(config.highlight_secs, 8);
        assert_eq!(config.resume_delay_secs, 1);
        assert_eq!(config.wheel_debounce_ms, 500);
        assert!(!config.mouse);
        assert_eq!(config.embed_base_url, "https://player.example.com/embed/");
        assert_eq!(
            config.keybindings.get("next_page").map(String::as_str),
            Some("n")
        );

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_invalid_toml_returns_error() {
        let err = Config::from_toml_str("this is not [valid toml").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().contains("Invalid TOML"));
    }

    #[test]
    fn test_unknown_keys_accepted() {
        let content = r#"
theme = "dark"
refresh_interval_minutes = 30
"#;
        let config = Config::from_toml_str(content).unwrap();
        assert_eq!(config.theme, "dark");
    }

    #[test]
    fn test_wrong_type_returns_error() {
        assert!(Config::from_toml_str("columns_per_page = \"two\"\n").is_err());
    }

    #[test]
    fn test_zero_columns_per_page_clamped() {
        let config = Config::from_toml_str("columns_per_page = 0\n").unwrap();
        assert_eq!(config.columns_per_page, 1);
    }

    #[test]
    fn test_tiny_scroll_interval_clamped() {
        let config = Config::from_toml_str("scroll_interval_ms = 1\n").unwrap();
        assert_eq!(config.scroll_interval_ms, 16);
    }

    #[test]
    fn test_too_large_file_rejected() {
        let (dir, path) = temp_config("too_large", &"a".repeat(1_048_577));

        let err = Config::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::TooLarge(_)));
        assert!(err.to_string().contains("too large"));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_file_at_size_limit_accepted() {
        let mut content = "theme = \"dark\"\n".to_string();
        while content.len() < 1_048_576 - 20 {
            content.push_str("# padding comment\n");
        }
        content.truncate(1_048_576);
        let (dir, path) = temp_config("at_limit", &content);

        assert!(Config::load(&path).is_ok());

        std::fs::remove_dir_all(&dir).ok();
    }
}
