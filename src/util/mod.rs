//! Utility functions for common operations.
//!
//! - **Text processing**: Unicode-aware width, truncation, control-char
//!   stripping and styled word wrapping
//! - **Media embeds**: video id checks and embed URL building
//!
//! # Examples
//!
//! ```
//! use chronicle::util::{display_width, embed_url, truncate_to_width};
//!
//! let width = display_width("Hello 世界"); // 5 + 1 + 2*2
//! assert_eq!(width, 10);
//!
//! let truncated = truncate_to_width("Long article title", 15);
//! assert_eq!(truncated, "Long article t…");
//!
//! let url = embed_url("https://www.youtube.com/embed/", "dQw4w9WgXcQ").unwrap();
//! assert_eq!(url.path(), "/embed/dQw4w9WgXcQ");
//! ```

mod embed;
mod text;

pub use embed::{embed_url, valid_video_id, validate_embed_base, EmbedError, DEFAULT_EMBED_BASE};
pub use text::{display_width, strip_control_chars, truncate_to_width, wrap_words, StyledWord};

/// Maximum search query length accepted by the search box.
pub const MAX_SEARCH_QUERY_LENGTH: usize = 256;
