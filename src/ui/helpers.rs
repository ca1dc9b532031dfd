//! Helper functions shared by the input handlers.

use crate::app::App;

/// Error message when there is nothing to play
pub(super) const ERR_NO_MEDIA: &str = "No video in the expanded article";

/// Open the expanded article's video in the system browser.
///
/// The URL is built from a validated base and a checked video id before it
/// reaches `open::that()`.
pub(super) fn open_media(app: &mut App) {
    let (title, url) = match app.media() {
        Some(media) => (media.article.title.clone(), media.url),
        None => {
            app.set_status(ERR_NO_MEDIA);
            return;
        }
    };

    match url {
        Ok(url) => {
            tracing::info!(%url, "Opening video");
            match open::that(url.as_str()) {
                Ok(()) => app.set_status(format!("Opening video: {}", title)),
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to open browser");
                    app.set_status(format!("Failed to open browser: {}", e));
                }
            }
        }
        Err(e) => app.set_status(format!("Cannot play video: {}", e)),
    }
}

/// Page index for a number key (`1` is the first page).
pub(super) fn page_for_digit(c: char) -> Option<usize> {
    match c.to_digit(10) {
        Some(d @ 1..=9) => Some(d as usize - 1),
        _ => None,
    }
}
