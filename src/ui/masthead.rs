//! Masthead, search box and the suggestion popover.

use crate::app::{App, Focus, HitTarget};
use crate::util::{display_width, truncate_to_width};
use chrono::Local;
use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

pub(super) const MASTHEAD_HEIGHT: u16 = 3;

const TITLE: &str = "THE DAILY CHRONICLE";
const PLACEHOLDER: &str = "Search articles…";
const SEARCH_BOX_MAX: u16 = 40;
const POPOVER_MIN_WIDTH: u16 = 56;

/// Render the masthead and return the search box area.
pub(super) fn render(f: &mut Frame, app: &mut App, area: Rect) -> Rect {
    if area.height < MASTHEAD_HEIGHT || area.width < 10 {
        return Rect::default();
    }

    let title_row = Rect::new(area.x, area.y, area.width, 1);
    f.render_widget(
        Paragraph::new(Span::styled(TITLE, app.palette.masthead)).alignment(Alignment::Center),
        title_row,
    );

    let box_width = SEARCH_BOX_MAX.min(area.width / 2);
    let search_area = Rect::new(
        area.x + area.width - box_width,
        area.y + 1,
        box_width,
        1,
    );
    let date_area = Rect::new(area.x, area.y + 1, area.width - box_width, 1);

    let date = Local::now().format("%A, %B %-d, %Y").to_string();
    f.render_widget(
        Paragraph::new(Span::styled(date, app.palette.masthead_date)),
        date_area,
    );

    f.render_widget(search_line(app, box_width as usize), search_area);
    app.hits.push(search_area, HitTarget::SearchBox);

    let rule_row = Rect::new(area.x, area.y + 2, area.width, 1);
    f.render_widget(
        Paragraph::new(Span::styled(
            "═".repeat(area.width as usize),
            app.palette.article_rule,
        )),
        rule_row,
    );

    search_area
}

fn search_line(app: &App, width: usize) -> Paragraph<'static> {
    let focused = app.focus == Focus::Search;
    let prompt = "/ ";
    let room = width.saturating_sub(display_width(prompt) + 1);

    if app.search.input.is_empty() && !focused {
        return Paragraph::new(Line::from(vec![
            Span::styled(prompt, app.palette.search_placeholder),
            Span::styled(
                truncate_to_width(PLACEHOLDER, room).into_owned(),
                app.palette.search_placeholder,
            ),
        ]));
    }

    let mut spans = vec![
        Span::styled(prompt, app.palette.search_input),
        Span::styled(tail_to_width(&app.search.input, room), app.palette.search_input),
    ];
    if focused {
        spans.push(Span::styled("_", app.palette.search_input));
    }
    Paragraph::new(Line::from(spans))
}

/// The end of `s` that fits in `width` cells, so the caret stays visible.
fn tail_to_width(s: &str, width: usize) -> String {
    let mut start = 0;
    for (i, _) in s.char_indices() {
        if display_width(&s[i..]) <= width {
            start = i;
            break;
        }
        start = s.len();
    }
    s[start..].to_string()
}

/// Render the suggestion popover under the search box.
pub(super) fn render_suggestions(f: &mut Frame, app: &mut App, anchor: Rect, bounds: Rect) {
    if !app.search.show_suggestions || anchor.is_empty() {
        return;
    }

    let rows: Vec<(String, String)> = app
        .suggestions()
        .iter()
        .map(|hit| {
            (
                hit.article.title.clone(),
                format!("{} • {}", hit.article.category, hit.article.author),
            )
        })
        .collect();

    let width = anchor.width.max(POPOVER_MIN_WIDTH).min(bounds.width);
    let wanted = if rows.is_empty() {
        3
    } else {
        rows.len() as u16 * 2 + 2
    };
    let y = anchor.y + 1;
    let height = wanted.min(bounds.bottom().saturating_sub(y));
    if height < 3 {
        return;
    }
    let x = anchor.right().saturating_sub(width).max(bounds.x);
    let popover = Rect::new(x, y, width, height);

    f.render_widget(Clear, popover);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(app.palette.panel_border_focused)
        .title(Span::styled(" Suggestions ", app.palette.suggestion_heading));
    let inner = block.inner(popover);
    f.render_widget(block, popover);

    if rows.is_empty() {
        f.render_widget(
            Paragraph::new(Span::styled("No matches found", app.palette.suggestion_empty)),
            inner,
        );
        return;
    }

    let text_width = inner.width as usize;
    for (i, (title, meta)) in rows.iter().enumerate() {
        let top = inner.y + i as u16 * 2;
        if top >= inner.bottom() {
            break;
        }
        let title_style = if i == app.search.selected {
            app.palette.suggestion_selected
        } else {
            app.palette.suggestion_title
        };
        let lines = vec![
            Line::from(Span::styled(
                truncate_to_width(title, text_width).into_owned(),
                title_style,
            )),
            Line::from(Span::styled(
                truncate_to_width(meta, text_width).into_owned(),
                app.palette.suggestion_meta,
            )),
        ];
        let rect = Rect::new(inner.x, top, inner.width, 2.min(inner.bottom() - top));
        f.render_widget(Paragraph::new(lines), rect);
        app.hits.push(rect, HitTarget::Suggestion(i));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tail_keeps_end_of_long_query() {
        assert_eq!(tail_to_width("abcdef", 3), "def");
        assert_eq!(tail_to_width("abc", 10), "abc");
        assert_eq!(tail_to_width("", 5), "");
    }

    #[test]
    fn tail_respects_wide_chars() {
        assert_eq!(tail_to_width("a日本", 4), "日本");
        assert_eq!(tail_to_width("a日本", 3), "本");
    }
}
