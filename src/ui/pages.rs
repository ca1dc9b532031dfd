//! Dot strip: one dot per page plus "page N of M".

use crate::app::{App, HitTarget};
use crate::util::display_width;
use ratatui::{layout::Rect, text::Span, widgets::Paragraph, Frame};

pub(super) fn render(f: &mut Frame, app: &mut App, area: Rect) {
    if area.width < 1 || area.height < 1 {
        return;
    }

    let total = app.pager.total_pages();
    let current = app.pager.current();
    let label = format!("  page {} of {}", current + 1, total);

    // "● ○ ○" plus the label, centered
    let dots_width = total * 2 - 1;
    let full = dots_width + display_width(&label);
    let mut x = area.x + (area.width as usize).saturating_sub(full) as u16 / 2;

    app.hits.push(area, HitTarget::DotStrip);

    for page in 0..total {
        if x >= area.right() {
            return;
        }
        let (glyph, style) = if page == current {
            ("●", app.palette.dot_active)
        } else {
            ("○", app.palette.dot_inactive)
        };
        let rect = Rect::new(x, area.y, 1, 1);
        f.render_widget(Paragraph::new(Span::styled(glyph, style)), rect);
        app.hits.push(rect, HitTarget::Dot(page));
        x += 2;
    }

    let x = x.saturating_sub(1);
    if x < area.right() {
        let rect = Rect::new(x, area.y, area.right() - x, 1);
        f.render_widget(
            Paragraph::new(Span::styled(label, app.palette.page_label)),
            rect,
        );
    }
}
