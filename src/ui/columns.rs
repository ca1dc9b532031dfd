//! Article columns: card layout and the looping viewport.

use crate::app::{App, ColumnGeometry, Focus, HitTarget};
use crate::catalog::{
    body_words, is_tall, preview_body, Article, ArticleLocation, Emphasis, ScrollDirection,
};
use crate::theme::ColorPalette;
use crate::util::{display_width, truncate_to_width, wrap_words, StyledWord};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use std::sync::Arc;

/// Columns taken by the selection gutter on every card line.
const GUTTER: usize = 2;

/// Per-card display state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(super) struct CardState {
    pub cursor: bool,
    pub highlighted: bool,
    pub expanded: bool,
}

/// One rendered line and the article (by index in the column) it belongs to.
pub(super) struct CardLine {
    pub line: Line<'static>,
    pub article: Option<usize>,
}

/// All lines of a column, as one scroll cycle.
pub(super) struct ColumnLayout {
    pub lines: Vec<CardLine>,
    pub article_starts: Vec<usize>,
}

/// Lay out every card of a column at `width` cells.
pub(super) fn layout_cards(
    articles: &[Article],
    width: usize,
    palette: &ColorPalette,
    state_of: impl Fn(usize) -> CardState,
) -> ColumnLayout {
    let mut lines = Vec::new();
    let mut article_starts = Vec::with_capacity(articles.len());

    for (index, article) in articles.iter().enumerate() {
        article_starts.push(lines.len());
        lines.extend(
            card_lines(article, width, palette, state_of(index))
                .into_iter()
                .map(|line| CardLine {
                    line,
                    article: Some(index),
                }),
        );
    }

    ColumnLayout {
        lines,
        article_starts,
    }
}

fn card_lines(
    article: &Article,
    width: usize,
    palette: &ColorPalette,
    state: CardState,
) -> Vec<Line<'static>> {
    let inner = width.saturating_sub(GUTTER).max(1);
    let mut rows: Vec<Vec<Span<'static>>> = Vec::new();

    // Badge, then the date if it fits
    let badge = format!(" {} ", article.category.to_uppercase());
    let badge = truncate_to_width(&badge, inner).into_owned();
    let mut head = vec![Span::styled(
        badge.clone(),
        palette.badge(article.category_color),
    )];
    if let Some(date) = article.published {
        let date = date.format("%b %-d, %Y").to_string();
        if display_width(&badge) + 1 + display_width(&date) <= inner {
            head.push(Span::raw(" "));
            head.push(Span::styled(date, palette.article_date));
        }
    }
    rows.push(head);

    // Title
    let tall = is_tall(article);
    let mut title_style = palette.article_title;
    if tall {
        title_style = title_style.add_modifier(Modifier::BOLD);
    }
    let title_words: Vec<StyledWord<()>> = article
        .title
        .split_whitespace()
        .map(|w| StyledWord {
            text: if tall { w.to_uppercase() } else { w.to_string() },
            style: (),
        })
        .collect();
    for line in wrap_words(&title_words, inner) {
        let text: String = line.into_iter().map(|w| w.text).collect();
        rows.push(vec![Span::styled(text, title_style)]);
    }

    rows.push(vec![Span::styled(
        truncate_to_width(&format!("By {}", article.author), inner).into_owned(),
        palette.article_byline,
    )]);
    rows.push(Vec::new());

    // Body
    let (mut paragraphs, truncated) = if state.expanded {
        (body_words(article), false)
    } else {
        preview_body(article)
    };
    if truncated {
        if let Some(last) = paragraphs.last_mut().and_then(|p| p.last_mut()) {
            last.text.push('…');
        }
    }
    for (i, paragraph) in paragraphs.iter().enumerate() {
        if i > 0 {
            rows.push(Vec::new());
        }
        for line in wrap_words(paragraph, inner) {
            rows.push(
                line.into_iter()
                    .map(|w| Span::styled(w.text, emphasis_style(palette, w.style)))
                    .collect(),
            );
        }
    }

    // Affordance
    let affordance = if truncated {
        Some("Continue reading →")
    } else if state.expanded && preview_body(article).1 {
        Some("Show less ↑")
    } else {
        None
    };
    if let Some(text) = affordance {
        rows.push(Vec::new());
        rows.push(vec![Span::styled(text, palette.article_affordance)]);
    }

    if article.video_id.is_some() {
        rows.push(vec![Span::styled("▶ Video", palette.media_link)]);
    }

    rows.push(vec![Span::styled("─".repeat(inner), palette.article_rule)]);

    let gutter = if state.highlighted {
        Span::styled("▌ ", palette.article_highlight)
    } else if state.cursor {
        Span::styled("│ ", palette.article_cursor)
    } else {
        Span::raw("  ")
    };

    rows.into_iter()
        .map(|spans| {
            let mut line = Vec::with_capacity(spans.len() + 1);
            line.push(gutter.clone());
            line.extend(spans);
            Line::from(line)
        })
        .collect()
}

fn emphasis_style(palette: &ColorPalette, emphasis: Emphasis) -> Style {
    match (emphasis.italic, emphasis.bold) {
        (false, false) => palette.article_body,
        (true, false) => palette.article_emphasis,
        (false, true) => palette.article_strong,
        (true, true) => palette.article_strong.add_modifier(Modifier::ITALIC),
    }
}

/// Render catalog column `column_index` into `area`, recording its geometry
/// and hit regions on `app`.
pub(super) fn render(f: &mut Frame, app: &mut App, area: Rect, column_index: usize) {
    if area.width < 3 || area.height < 3 {
        return;
    }

    let catalog = Arc::clone(&app.catalog);
    let Some(column) = catalog.columns.get(column_index) else {
        return;
    };
    let Some(ticker) = app.tickers.get(column_index) else {
        return;
    };

    let focused = app.focus == Focus::Columns && app.cursor.column == column_index;
    let border_style = if focused {
        app.palette.panel_border_focused
    } else {
        app.palette.panel_border
    };

    let arrow = match ticker.direction() {
        ScrollDirection::Up => "↑",
        ScrollDirection::Down => "↓",
    };
    let mut title = vec![Span::raw(format!(" {} {} ", column.display_label(), arrow))];
    if ticker.is_paused() {
        title.push(Span::styled("⏸ ", app.palette.column_paused));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(Line::from(title));
    let inner = block.inner(area);
    f.render_widget(block, area);

    if column.articles.is_empty() {
        f.render_widget(
            Paragraph::new("No articles").style(app.palette.article_byline),
            inner,
        );
        return;
    }

    let layout = layout_cards(
        &column.articles,
        inner.width as usize,
        &app.palette,
        |index| {
            let loc = ArticleLocation::new(column_index, index);
            CardState {
                cursor: focused && app.cursor == loc,
                highlighted: app.highlighted == Some(loc),
                expanded: app.expanded == Some(loc),
            }
        },
    );

    let cycle_len = layout.lines.len();
    let viewport = inner.height as usize;
    let window = ticker.window(cycle_len, viewport);

    app.hits.push(inner, HitTarget::ColumnViewport(column_index));
    for (row, index) in window.into_iter().enumerate() {
        let Some(card_line) = layout.lines.get(index) else {
            continue;
        };
        let rect = Rect::new(inner.x, inner.y + row as u16, inner.width, 1);
        f.render_widget(Paragraph::new(card_line.line.clone()), rect);
        if let Some(article) = card_line.article {
            app.hits.push(
                rect,
                HitTarget::Article(ArticleLocation::new(column_index, article)),
            );
        }
    }

    app.geometry.insert(
        column_index,
        ColumnGeometry {
            article_starts: layout.article_starts,
            cycle_len,
            viewport,
        },
    );
}
