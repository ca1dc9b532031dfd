use std::net::IpAddr;
use thiserror::Error;
use url::Url;

/// Default base for the embedded video player.
pub const DEFAULT_EMBED_BASE: &str = "https://www.youtube.com/embed/";

/// Longest video id accepted from a catalog.
const MAX_VIDEO_ID_LEN: usize = 64;

/// Errors building a media embed URL.
#[derive(Error, Debug)]
pub enum EmbedError {
    /// Video id is empty, too long, or has characters outside `[A-Za-z0-9_-]`.
    #[error("Invalid video id: {0:?}")]
    InvalidVideoId(String),

    #[error("Invalid embed base URL: {0}")]
    InvalidBase(#[from] url::ParseError),

    #[error("Unsupported embed scheme: {0} (only http/https allowed)")]
    UnsupportedScheme(String),

    /// The base points at this machine or a private network.
    #[error("Embed host not allowed: {0}")]
    LocalHost(String),
}

/// True if `id` is safe to splice into an embed URL path.
///
/// ```
/// use chronicle::util::valid_video_id;
///
/// assert!(valid_video_id("dQw4w9WgXcQ"));
/// assert!(!valid_video_id("../etc"));
/// assert!(!valid_video_id(""));
/// ```
pub fn valid_video_id(id: &str) -> bool {
    !id.is_empty()
        && id.len() <= MAX_VIDEO_ID_LEN
        && id
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
}

/// Build the player URL for `video_id` under `base`.
///
/// The base is treated as a directory whether or not it ends in `/`.
///
/// ```
/// use chronicle::util::embed_url;
///
/// let url = embed_url("https://www.youtube.com/embed/", "dQw4w9WgXcQ").unwrap();
/// assert_eq!(url.as_str(), "https://www.youtube.com/embed/dQw4w9WgXcQ");
/// ```
pub fn embed_url(base: &str, video_id: &str) -> Result<Url, EmbedError> {
    if !valid_video_id(video_id) {
        return Err(EmbedError::InvalidVideoId(video_id.to_owned()));
    }

    let mut base = validate_embed_base(base)?;
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    Ok(base.join(video_id)?)
}

/// Parse and check an embed base before anything is opened from it.
///
/// Rejects non-HTTP(S) schemes, localhost and private address ranges so a
/// hostile catalog or config cannot make the browser hit local services.
pub fn validate_embed_base(base: &str) -> Result<Url, EmbedError> {
    let url = Url::parse(base)?;

    match url.scheme() {
        "http" | "https" => {}
        scheme => return Err(EmbedError::UnsupportedScheme(scheme.to_owned())),
    }

    let Some(host) = url.host_str() else {
        return Err(EmbedError::InvalidBase(url::ParseError::EmptyHost));
    };
    if host.eq_ignore_ascii_case("localhost") {
        return Err(EmbedError::LocalHost(host.to_owned()));
    }

    let bare = host
        .strip_prefix('[')
        .and_then(|h| h.strip_suffix(']'))
        .unwrap_or(host);
    if let Ok(ip) = bare.parse::<IpAddr>() {
        if is_local_ip(&ip) {
            return Err(EmbedError::LocalHost(ip.to_string()));
        }
    }

    Ok(url)
}

fn is_local_ip(ip: &IpAddr) -> bool {
    match ip {
        IpAddr::V4(v4) => {
            v4.is_private() || v4.is_loopback() || v4.is_link_local() || v4.is_unspecified()
        }
        IpAddr::V6(v6) => {
            let first = v6.segments()[0];
            v6.is_loopback()
                || v6.is_unspecified()
                // fc00::/7 unique local, fe80::/10 link local
                || (first & 0xfe00) == 0xfc00
                || (first & 0xffc0) == 0xfe80
        }
    }
}
