//! Input handling for the TUI.
//!
//! Keys are resolved through the keybinding registry for the focused panel.
//! Mouse events are resolved through the hit map the last frame recorded.

use crate::app::{App, AppEvent, Focus, HitTarget};
use crate::keybindings::{Action as KbAction, Context as KbContext};
use crossterm::event::{KeyCode, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use tokio::sync::mpsc;
use tokio::time::Instant;

use super::helpers::{open_media, page_for_digit};
use super::Action;

/// Lines moved per manual scroll step.
const SCROLL_STEP: isize = 3;

/// Main key dispatch function.
pub(super) fn handle_input(
    app: &mut App,
    code: KeyCode,
    modifiers: KeyModifiers,
    event_tx: &mpsc::Sender<AppEvent>,
) -> Action {
    // Help overlay captures all keys when visible
    if app.show_help {
        handle_help_input(app, code);
        return Action::Continue;
    }

    if app.focus == Focus::Search {
        return handle_search_input(app, code, modifiers, event_tx);
    }

    let now = Instant::now();
    let action = app
        .keybindings
        .action_for_key(code, modifiers, app.focus.context());

    match action {
        Some(KbAction::Quit) => return Action::Quit,
        Some(KbAction::Back) => {
            if let Some(loc) = app.expanded {
                app.toggle_expand(loc);
            } else if app.focus != Focus::Columns {
                app.focus = Focus::Columns;
            }
        }
        Some(KbAction::CycleFocus) => app.cycle_focus(),
        Some(KbAction::EnterSearch) => app.focus_search(),
        Some(KbAction::NextPage) => {
            app.next_page();
        }
        Some(KbAction::PrevPage) => {
            app.prev_page();
        }
        Some(KbAction::OpenMedia) => open_media(app),
        Some(KbAction::CycleTheme) => {
            let name = app.cycle_theme();
            app.set_status(format!("Theme: {}", name));
        }
        Some(KbAction::ShowHelp) => {
            app.show_help = true;
            app.help_scroll_offset = 0;
        }
        Some(action) => match app.focus {
            Focus::Trending => handle_trending_action(app, action, now, event_tx),
            _ => handle_column_action(app, action, now),
        },
        None => {
            if let KeyCode::Char(c) = code {
                if let Some(page) = page_for_digit(c) {
                    app.go_to_page(page);
                }
            }
        }
    }
    Action::Continue
}

/// Handle input while the help overlay is visible.
///
/// Captures all keys: j/k/Up/Down scroll, Esc/q/? dismiss.
fn handle_help_input(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') => {
            app.show_help = false;
            app.help_scroll_offset = 0;
        }
        KeyCode::Char('j') | KeyCode::Down => {
            app.help_scroll_offset = app.help_scroll_offset.saturating_add(1);
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.help_scroll_offset = app.help_scroll_offset.saturating_sub(1);
        }
        _ => {}
    }
    app.needs_redraw = true;
}

fn handle_column_action(app: &mut App, action: KbAction, now: Instant) {
    match action {
        KbAction::NavUp => app.move_cursor_vertical(-1, now),
        KbAction::NavDown => app.move_cursor_vertical(1, now),
        KbAction::NavLeft => app.move_cursor_horizontal(-1, now),
        KbAction::NavRight => app.move_cursor_horizontal(1, now),
        KbAction::Select => app.toggle_expand(app.cursor),
        KbAction::TogglePause => {
            let paused = app.toggle_column_pause();
            app.set_status(if paused {
                "Column paused"
            } else {
                "Column resumed"
            });
        }
        KbAction::ScrollUp => app.scroll_column(app.cursor.column, -SCROLL_STEP, now),
        KbAction::ScrollDown => app.scroll_column(app.cursor.column, SCROLL_STEP, now),
        _ => {}
    }
}

fn handle_trending_action(
    app: &mut App,
    action: KbAction,
    now: Instant,
    event_tx: &mpsc::Sender<AppEvent>,
) {
    match action {
        KbAction::NavUp => app.move_trending(-1, now),
        KbAction::NavDown => app.move_trending(1, now),
        KbAction::Select => {
            app.select_trending(app.trending_selected, event_tx);
        }
        _ => {}
    }
}

/// Handle input while the search box has focus.
///
/// Printable characters always go into the query, so global single-letter
/// bindings do not fire while typing.
fn handle_search_input(
    app: &mut App,
    code: KeyCode,
    modifiers: KeyModifiers,
    event_tx: &mpsc::Sender<AppEvent>,
) -> Action {
    let typing = !modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT);
    match code {
        KeyCode::Char(c) if typing => {
            app.push_search_char(c);
            return Action::Continue;
        }
        KeyCode::Backspace => {
            app.pop_search_char();
            return Action::Continue;
        }
        _ => {}
    }

    match app
        .keybindings
        .action_for_key(code, modifiers, KbContext::Search)
    {
        Some(KbAction::Quit) => return Action::Quit,
        Some(KbAction::ExitSearch) | Some(KbAction::Back) => app.blur_search(),
        Some(KbAction::CommitSearch) => {
            if !app.commit_search(event_tx) && !app.search.input.trim().is_empty() {
                app.set_status("No matches found");
            }
        }
        Some(KbAction::NavUp) => app.move_suggestion(-1),
        Some(KbAction::NavDown) => app.move_suggestion(1),
        Some(KbAction::CycleFocus) => app.cycle_focus(),
        _ => {}
    }
    Action::Continue
}

/// Mouse dispatch: hover holds, clicks select, wheel scrolls or pages.
pub(super) fn handle_mouse(app: &mut App, mouse: MouseEvent, event_tx: &mpsc::Sender<AppEvent>) {
    if app.show_help {
        match mouse.kind {
            MouseEventKind::ScrollDown => {
                app.help_scroll_offset = app.help_scroll_offset.saturating_add(1);
            }
            MouseEventKind::ScrollUp => {
                app.help_scroll_offset = app.help_scroll_offset.saturating_sub(1);
            }
            _ => return,
        }
        app.needs_redraw = true;
        return;
    }

    let now = Instant::now();
    let target = app.hits.at(mouse.column, mouse.row);

    match mouse.kind {
        MouseEventKind::Moved => match target {
            Some(HitTarget::Article(loc)) => app.hover_article(loc, now),
            Some(HitTarget::ColumnViewport(column)) => app.hover_column(column, now),
            Some(HitTarget::Trending(_)) | Some(HitTarget::TrendingPanel) => {
                app.hover_trending(now)
            }
            _ => {}
        },
        MouseEventKind::Down(MouseButton::Left) => handle_click(app, target, now, event_tx),
        MouseEventKind::ScrollDown | MouseEventKind::ScrollUp => {
            let forward = matches!(mouse.kind, MouseEventKind::ScrollDown);
            let delta = if forward { SCROLL_STEP } else { -SCROLL_STEP };
            match target {
                Some(HitTarget::DotStrip) | Some(HitTarget::Dot(_)) => {
                    app.wheel_page(forward, now);
                }
                Some(HitTarget::Article(loc)) => app.scroll_column(loc.column, delta, now),
                Some(HitTarget::ColumnViewport(column)) => app.scroll_column(column, delta, now),
                Some(HitTarget::Suggestion(_)) => app.move_suggestion(delta.signum()),
                _ => {}
            }
        }
        _ => {}
    }
}

fn handle_click(
    app: &mut App,
    target: Option<HitTarget>,
    now: Instant,
    event_tx: &mpsc::Sender<AppEvent>,
) {
    // Clicking anywhere outside the search box and its popover blurs it
    if app.focus == Focus::Search
        && !matches!(
            target,
            Some(HitTarget::SearchBox) | Some(HitTarget::Suggestion(_))
        )
    {
        app.blur_search();
    }

    match target {
        Some(HitTarget::SearchBox) => app.focus_search(),
        Some(HitTarget::Suggestion(index)) => {
            app.select_search_hit(index, event_tx);
        }
        Some(HitTarget::Dot(page)) => {
            app.go_to_page(page);
        }
        Some(HitTarget::Article(loc)) => {
            app.focus = Focus::Columns;
            app.cursor = loc;
            app.hover_article(loc, now);
            app.toggle_expand(loc);
        }
        Some(HitTarget::ColumnViewport(column)) => {
            app.focus = Focus::Columns;
            app.hover_column(column, now);
        }
        Some(HitTarget::Trending(index)) => {
            app.focus = Focus::Trending;
            app.trending_selected = index;
            app.select_trending(index, event_tx);
        }
        Some(HitTarget::TrendingPanel) => app.focus = Focus::Trending,
        Some(HitTarget::MediaLink) => open_media(app),
        Some(HitTarget::DotStrip) | None => {}
    }
    app.needs_redraw = true;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{ArticleLocation, Catalog};
    use crate::config::Config;
    use ratatui::layout::Rect;
    use std::sync::Arc;

    fn app() -> App {
        App::new(Arc::new(Catalog::bundled().unwrap()), &Config::default())
    }

    fn key(app: &mut App, code: KeyCode, tx: &mpsc::Sender<AppEvent>) -> Action {
        handle_input(app, code, KeyModifiers::NONE, tx)
    }

    fn click(column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn typed_q_goes_into_query() {
        let (tx, _rx) = mpsc::channel(8);
        let mut app = app();
        key(&mut app, KeyCode::Char('/'), &tx);
        assert_eq!(app.focus, Focus::Search);
        assert!(matches!(
            key(&mut app, KeyCode::Char('q'), &tx),
            Action::Continue
        ));
        assert_eq!(app.search.input, "q");
        key(&mut app, KeyCode::Backspace, &tx);
        assert!(app.search.input.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn ctrl_c_quits_from_search() {
        let (tx, _rx) = mpsc::channel(8);
        let mut app = app();
        app.focus_search();
        let action = handle_input(&mut app, KeyCode::Char('c'), KeyModifiers::CONTROL, &tx);
        assert!(matches!(action, Action::Quit));
    }

    #[tokio::test(start_paused = true)]
    async fn enter_in_search_jumps() {
        let (tx, _rx) = mpsc::channel(8);
        let mut app = app();
        app.focus_search();
        for c in "quantum".chars() {
            key(&mut app, KeyCode::Char(c), &tx);
        }
        key(&mut app, KeyCode::Enter, &tx);
        assert_eq!(app.focus, Focus::Columns);
        assert_eq!(app.pager.current(), 1);
        assert_eq!(app.jump_generation, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn escape_in_search_keeps_query() {
        let (tx, _rx) = mpsc::channel(8);
        let mut app = app();
        app.focus_search();
        key(&mut app, KeyCode::Char('x'), &tx);
        key(&mut app, KeyCode::Esc, &tx);
        assert_eq!(app.focus, Focus::Columns);
        assert_eq!(app.search.input, "x");
        assert!(!app.search.show_suggestions);
    }

    #[tokio::test(start_paused = true)]
    async fn digit_keys_select_page() {
        let (tx, _rx) = mpsc::channel(8);
        let mut app = app();
        key(&mut app, KeyCode::Char('2'), &tx);
        assert_eq!(app.pager.current(), 1);
        key(&mut app, KeyCode::Char('9'), &tx);
        assert_eq!(app.pager.current(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn enter_toggles_cursor_article() {
        let (tx, _rx) = mpsc::channel(8);
        let mut app = app();
        key(&mut app, KeyCode::Char('j'), &tx);
        key(&mut app, KeyCode::Enter, &tx);
        assert_eq!(app.expanded, Some(ArticleLocation::new(0, 1)));
        key(&mut app, KeyCode::Esc, &tx);
        assert_eq!(app.expanded, None);
    }

    #[tokio::test(start_paused = true)]
    async fn help_overlay_swallows_keys() {
        let (tx, _rx) = mpsc::channel(8);
        let mut app = app();
        key(&mut app, KeyCode::Char('?'), &tx);
        assert!(app.show_help);
        assert!(matches!(
            key(&mut app, KeyCode::Char(']'), &tx),
            Action::Continue
        ));
        assert_eq!(app.pager.current(), 0);
        key(&mut app, KeyCode::Esc, &tx);
        assert!(!app.show_help);
    }

    #[tokio::test(start_paused = true)]
    async fn click_article_expands_and_holds_column() {
        let (tx, _rx) = mpsc::channel(8);
        let mut app = app();
        let loc = ArticleLocation::new(1, 2);
        app.hits.push(Rect::new(0, 5, 20, 1), HitTarget::Article(loc));

        handle_mouse(&mut app, click(4, 5), &tx);
        assert_eq!(app.expanded, Some(loc));
        assert_eq!(app.cursor, loc);
        assert!(app.tickers[1].is_paused());
    }

    #[tokio::test(start_paused = true)]
    async fn click_outside_blurs_search() {
        let (tx, _rx) = mpsc::channel(8);
        let mut app = app();
        app.hits.push(Rect::new(0, 0, 10, 1), HitTarget::SearchBox);
        handle_mouse(&mut app, click(2, 0), &tx);
        assert_eq!(app.focus, Focus::Search);
        app.push_search_char('a');
        assert!(app.search.show_suggestions);

        handle_mouse(&mut app, click(50, 20), &tx);
        assert_eq!(app.focus, Focus::Columns);
        assert!(!app.search.show_suggestions);
    }

    #[tokio::test(start_paused = true)]
    async fn wheel_over_dots_pages_once() {
        let (tx, _rx) = mpsc::channel(8);
        let mut app = app();
        app.hits.push(Rect::new(0, 3, 40, 1), HitTarget::DotStrip);
        let wheel = |kind| MouseEvent {
            kind,
            column: 10,
            row: 3,
            modifiers: KeyModifiers::NONE,
        };

        handle_mouse(&mut app, wheel(MouseEventKind::ScrollDown), &tx);
        assert_eq!(app.pager.current(), 1);
        handle_mouse(&mut app, wheel(MouseEventKind::ScrollUp), &tx);
        assert_eq!(app.pager.current(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn hover_holds_column() {
        let (tx, _rx) = mpsc::channel(8);
        let mut app = app();
        app.hits.push(Rect::new(0, 5, 20, 10), HitTarget::ColumnViewport(0));
        let moved = MouseEvent {
            kind: MouseEventKind::Moved,
            column: 3,
            row: 7,
            modifiers: KeyModifiers::NONE,
        };
        handle_mouse(&mut app, moved, &tx);
        assert!(app.tickers[0].is_paused());
        assert!(app.tickers[0].resume_at().is_some());
    }
}
