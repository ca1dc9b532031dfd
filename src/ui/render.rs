//! Render functions for the TUI.
//!
//! Lays out masthead, dot strip, columns, sidebar and status bar, then the
//! overlays. Every frame rebuilds the hit map and the column geometry the
//! scroll logic reads.

use crate::app::App;
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    widgets::Paragraph,
    Frame,
};

use super::masthead::MASTHEAD_HEIGHT;
use super::{columns, help, masthead, pages, sidebar, status};

/// Minimum terminal dimensions required for normal operation.
pub(super) const MIN_WIDTH: u16 = 60;
pub(super) const MIN_HEIGHT: u16 = 16;

/// Share of the width given to the article columns.
const COLUMNS_PERCENT: u16 = 72;

/// Main render function.
pub(super) fn render(f: &mut Frame, app: &mut App) {
    let area = f.area();
    app.hits.clear();

    // Guard against zero-width/height to prevent panics
    if area.width < 1 || area.height < 1 {
        return;
    }

    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        let msg = if area.height < 3 || area.width < 20 {
            Paragraph::new("Too small")
        } else {
            Paragraph::new(format!(
                "Terminal too small\n\nMinimum: {}x{}\nCurrent: {}x{}",
                MIN_WIDTH, MIN_HEIGHT, area.width, area.height
            ))
            .alignment(Alignment::Center)
        };
        f.render_widget(msg, area);
        return;
    }

    let [header, dots, main, status_bar] = Layout::vertical([
        Constraint::Length(MASTHEAD_HEIGHT),
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(area);

    let search_box = masthead::render(f, app, header);
    pages::render(f, app, dots);
    render_main(f, app, main);
    status::render(f, app, status_bar);

    masthead::render_suggestions(f, app, search_box, area);

    if app.show_help {
        help::render(f, app);
    }
}

/// Columns of the current page on the left, sidebar on the right.
fn render_main(f: &mut Frame, app: &mut App, area: Rect) {
    let [columns_area, sidebar_area] = Layout::horizontal([
        Constraint::Percentage(COLUMNS_PERCENT),
        Constraint::Percentage(100 - COLUMNS_PERCENT),
    ])
    .areas(area);

    let per_page = app.pager.columns_per_page() as u32;
    let slots = Layout::horizontal((0..per_page).map(|_| Constraint::Ratio(1, per_page)))
        .split(columns_area);

    for (slot, column) in app.pager.visible_columns().enumerate() {
        if let Some(&rect) = slots.get(slot) {
            columns::render(f, app, rect, column);
        }
    }

    sidebar::render(f, app, sidebar_area);
}
