//! Sidebar: trending list and media panel.

use crate::app::{App, ColumnGeometry, Focus, HitTarget, SidebarSplit};
use crate::keybindings::{Action, Context};
use crate::util::{display_width, truncate_to_width};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use std::sync::Arc;

/// Render the sidebar, dividing its height by [`App::sidebar_split`].
pub(super) fn render(f: &mut Frame, app: &mut App, area: Rect) {
    let split = app.sidebar_split();
    let (top, bottom) = split.percentages();
    let chunks = Layout::vertical([Constraint::Percentage(top), Constraint::Percentage(bottom)])
        .split(area);

    match split {
        SidebarSplit::MediaFirst => {
            render_media(f, app, chunks[0]);
            render_trending(f, app, chunks[1]);
        }
        SidebarSplit::Even => {
            render_trending(f, app, chunks[0]);
            render_media(f, app, chunks[1]);
        }
        SidebarSplit::TrendingOnly => {
            render_trending(f, app, chunks[0]);
            render_placeholder(f, app, chunks[1]);
        }
    }
}

fn render_trending(f: &mut Frame, app: &mut App, area: Rect) {
    if area.width < 3 || area.height < 3 {
        return;
    }

    let border_style = if app.focus == Focus::Trending {
        app.palette.panel_border_focused
    } else {
        app.palette.panel_border
    };
    let mut title = vec![Span::raw(" Trending ")];
    if app.trending_ticker.is_paused() {
        title.push(Span::styled("⏸ ", app.palette.column_paused));
    }
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(Line::from(title));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let catalog = Arc::clone(&app.catalog);
    let count = catalog.trending.len();
    if count == 0 {
        f.render_widget(
            Paragraph::new("Nothing trending").style(app.palette.media_placeholder),
            inner,
        );
        app.trending_geometry = None;
        return;
    }

    let viewport = inner.height as usize;
    let rank_width = count.to_string().len();
    app.hits.push(inner, HitTarget::TrendingPanel);

    for (row, index) in app
        .trending_ticker
        .window(count, viewport)
        .into_iter()
        .enumerate()
    {
        let item = &catalog.trending[index];
        let rank = format!("{:>width$}. ", index + 1, width = rank_width);
        let room = (inner.width as usize).saturating_sub(display_width(&rank));
        let title_style = if app.focus == Focus::Trending && index == app.trending_selected {
            app.palette.trending_selected
        } else {
            app.palette.trending_title
        };
        let line = Line::from(vec![
            Span::styled(rank, app.palette.trending_rank),
            Span::styled(
                truncate_to_width(&item.title, room).into_owned(),
                title_style,
            ),
        ]);
        let rect = Rect::new(inner.x, inner.y + row as u16, inner.width, 1);
        f.render_widget(Paragraph::new(line), rect);
        app.hits.push(rect, HitTarget::Trending(index));
    }

    app.trending_geometry = Some(ColumnGeometry {
        article_starts: (0..count).collect(),
        cycle_len: count,
        viewport,
    });
}

fn render_media(f: &mut Frame, app: &mut App, area: Rect) {
    if area.width < 3 || area.height < 3 {
        return;
    }

    let open_keys = app
        .keybindings
        .keys_for(Context::Global, Action::OpenMedia)
        .join("/");

    let Some(media) = app.media() else {
        return;
    };
    let palette = &app.palette;
    let mut lines = vec![
        Line::from(Span::styled(media.article.title.clone(), palette.media_title)),
        Line::from(""),
        Line::from("┌───────────┐").alignment(Alignment::Center),
        Line::from("│     ▶     │").alignment(Alignment::Center),
        Line::from("└───────────┘").alignment(Alignment::Center),
        Line::from(""),
    ];
    match &media.url {
        Ok(url) => {
            lines.push(Line::from(Span::styled(url.to_string(), palette.media_link)));
            if !open_keys.is_empty() {
                lines.push(Line::from(vec![
                    Span::styled(format!("[{}]", open_keys), palette.help_key),
                    Span::raw(" open in browser"),
                ]));
            }
        }
        Err(e) => lines.push(Line::from(Span::styled(
            format!("Video unavailable: {}", e),
            palette.media_placeholder,
        ))),
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(palette.panel_border)
        .title(" Now Playing ");
    let inner = block.inner(area);
    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, area);

    app.hits.push(inner, HitTarget::MediaLink);
}

fn render_placeholder(f: &mut Frame, app: &App, area: Rect) {
    if area.width < 3 || area.height < 3 {
        return;
    }
    let paragraph = Paragraph::new("Expand an article with a video to play it here")
        .style(app.palette.media_placeholder)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(app.palette.panel_border)
                .title(" Media "),
        );
    f.render_widget(paragraph, area);
}
