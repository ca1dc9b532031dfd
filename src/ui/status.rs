use crate::app::{App, Focus};
use ratatui::{layout::Rect, widgets::Paragraph, Frame};
use std::borrow::Cow;

/// Render the status bar
pub fn render(f: &mut Frame, app: &App, area: Rect) {
    if area.width < 1 || area.height < 1 {
        return;
    }

    let text: Cow<'_, str> = if let Some((msg, _)) = &app.status_message {
        Cow::Borrowed(msg.as_ref())
    } else {
        match app.focus {
            Focus::Search => {
                Cow::Borrowed("Type to search | ↑↓ choose | ENTER jump | ESC close")
            }
            Focus::Trending => Cow::Borrowed(
                "[j/k]move [Enter]go to story [o]pen video [Tab]switch [?]help [q]uit",
            ),
            Focus::Columns => Cow::Borrowed(
                "[/]search [j/k]move [Enter]expand [p]ause [[/]]page [o]pen video [Tab]switch [?]help [q]uit",
            ),
        }
    };

    f.render_widget(Paragraph::new(text).style(app.palette.status_bar), area);
}
