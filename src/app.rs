use crate::catalog::{
    resolve_trending, search, Article, ArticleLocation, Catalog, ScrollDirection, SearchHit,
};
use crate::config::Config;
use crate::keybindings::{Context, KeybindingRegistry};
use crate::pager::{Pager, WheelGate};
use crate::theme::{ColorPalette, ThemeVariant};
use crate::ticker::AutoScroll;
use crate::util::{embed_url, EmbedError, MAX_SEARCH_QUERY_LENGTH};
use ratatui::layout::{Position, Rect};
use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use url::Url;

/// Settle delay before scrolling to a jump target on the current page.
pub const SETTLE_SAME_PAGE: Duration = Duration::from_millis(300);

/// Settle delay after a jump switched pages.
pub const SETTLE_PAGE_CHANGE: Duration = Duration::from_millis(600);

/// How long a status-bar message stays visible.
const STATUS_TTL: Duration = Duration::from_secs(3);

// ============================================================================
// Focus and Event Types
// ============================================================================

/// Which panel receives keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Columns,
    Trending,
    Search,
}

impl Focus {
    pub fn context(self) -> Context {
        match self {
            Self::Columns => Context::Columns,
            Self::Trending => Context::Trending,
            Self::Search => Context::Search,
        }
    }
}

/// What started a jump.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpSource {
    Search,
    /// Also expands the article and gives the media panel priority.
    Trending,
}

/// Events from deferred tasks.
///
/// Every event carries the jump generation it was spawned under. A newer
/// jump bumps the generation, so anything still in flight from an older one
/// is dropped on arrival.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    /// The page switch and pause have had time to land; scroll to the target.
    JumpSettled {
        generation: u64,
        target: ArticleLocation,
    },
    /// The jump highlight has run its course.
    HighlightExpired { generation: u64 },
}

// ============================================================================
// Layout Feedback
// ============================================================================

/// Line geometry of a rendered column, recorded during render.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnGeometry {
    /// First line of each article within the cycle.
    pub article_starts: Vec<usize>,
    /// Total lines in one pass over the column.
    pub cycle_len: usize,
    /// Visible lines in the column viewport.
    pub viewport: usize,
}

/// Clickable screen regions, rebuilt every frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    SearchBox,
    Suggestion(usize),
    DotStrip,
    Dot(usize),
    ColumnViewport(usize),
    Article(ArticleLocation),
    Trending(usize),
    TrendingPanel,
    MediaLink,
}

#[derive(Debug, Clone, Default)]
pub struct HitMap {
    regions: Vec<(Rect, HitTarget)>,
}

impl HitMap {
    pub fn clear(&mut self) {
        self.regions.clear();
    }

    pub fn push(&mut self, area: Rect, target: HitTarget) {
        if !area.is_empty() {
            self.regions.push((area, target));
        }
    }

    /// Topmost region under the cursor; later pushes sit on top.
    pub fn at(&self, column: u16, row: u16) -> Option<HitTarget> {
        let pos = Position::new(column, row);
        self.regions
            .iter()
            .rev()
            .find(|(area, _)| area.contains(pos))
            .map(|(_, target)| *target)
    }
}

// ============================================================================
// Sidebar and Media
// ============================================================================

/// How the sidebar divides its height.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SidebarSplit {
    /// Media player on top with the larger share, after a trending jump.
    MediaFirst,
    /// Media and trending share the height evenly.
    Even,
    /// No video: trending plus a placeholder panel.
    TrendingOnly,
}

impl SidebarSplit {
    /// (media or placeholder, trending) height percentages.
    pub fn percentages(self) -> (u16, u16) {
        match self {
            Self::MediaFirst => (65, 35),
            Self::Even | Self::TrendingOnly => (50, 50),
        }
    }
}

/// The embedded player for the expanded article.
#[derive(Debug)]
pub struct Media<'a> {
    pub location: ArticleLocation,
    pub article: &'a Article,
    pub url: Result<Url, EmbedError>,
}

// ============================================================================
// Search State
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchState {
    pub input: String,
    pub show_suggestions: bool,
    /// Highlighted suggestion row.
    pub selected: usize,
}

impl SearchState {
    fn clear(&mut self) {
        self.input.clear();
        self.show_suggestions = false;
        self.selected = 0;
    }
}

// ============================================================================
// Timings
// ============================================================================

/// Durations that drive the choreography, taken from config.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timings {
    pub scroll_interval: Duration,
    pub highlight: Duration,
    pub resume_delay: Duration,
    pub wheel_debounce: Duration,
}

impl From<&Config> for Timings {
    fn from(config: &Config) -> Self {
        Self {
            scroll_interval: config.scroll_interval(),
            highlight: config.highlight_duration(),
            resume_delay: config.resume_delay(),
            wheel_debounce: config.wheel_debounce(),
        }
    }
}

// ============================================================================
// Application State
// ============================================================================

/// Central application state, owned and mutated by the event loop.
pub struct App {
    pub catalog: Arc<Catalog>,
    pub timings: Timings,
    pub embed_base: String,

    // Theme
    pub theme_variant: ThemeVariant,
    pub palette: ColorPalette,

    pub keybindings: KeybindingRegistry,

    // Navigation
    pub pager: Pager,
    pub focus: Focus,
    /// Keyboard-selected article in the columns.
    pub cursor: ArticleLocation,
    /// Keyboard-selected row in the trending list.
    pub trending_selected: usize,
    pub search: SearchState,

    // Scrolling
    /// One ticker per catalog column, by column index.
    pub tickers: Vec<AutoScroll>,
    pub trending_ticker: AutoScroll,

    // Article state
    pub expanded: Option<ArticleLocation>,
    pub highlighted: Option<ArticleLocation>,
    /// Set by a trending jump; the sidebar shows the player first.
    pub media_priority: bool,

    // Jump choreography
    /// Bumped by every jump; deferred events from older jumps are ignored.
    pub jump_generation: u64,
    /// The pending jump switched pages, so its column snaps into place.
    pub jump_snaps: bool,
    pub jump_handle: Option<JoinHandle<()>>,
    pub highlight_handle: Option<JoinHandle<()>>,

    // Render feedback
    pub geometry: HashMap<usize, ColumnGeometry>,
    pub trending_geometry: Option<ColumnGeometry>,
    pub hits: HitMap,

    pub wheel_gate: WheelGate,
    pub mouse_enabled: bool,

    pub status_message: Option<(Cow<'static, str>, Instant)>,
    pub needs_redraw: bool,

    pub show_help: bool,
    pub help_scroll_offset: usize,
}

impl App {
    pub fn new(catalog: Arc<Catalog>, config: &Config) -> Self {
        let theme_variant = ThemeVariant::from_str_name(&config.theme).unwrap_or_else(|| {
            tracing::warn!(theme = %config.theme, "Unknown theme, using dark");
            ThemeVariant::Dark
        });

        let mut keybindings = KeybindingRegistry::new();
        for warning in keybindings.apply_overrides(&config.keybindings) {
            tracing::warn!(%warning, "Keybinding override rejected");
        }

        let tickers = catalog
            .columns
            .iter()
            .map(|c| AutoScroll::new(c.direction))
            .collect();
        let timings = Timings::from(config);

        Self {
            pager: Pager::new(catalog.columns.len(), config.columns_per_page),
            catalog,
            timings,
            embed_base: config.embed_base_url.clone(),
            theme_variant,
            palette: theme_variant.palette(),
            keybindings,
            focus: Focus::Columns,
            cursor: ArticleLocation::new(0, 0),
            trending_selected: 0,
            search: SearchState::default(),
            tickers,
            trending_ticker: AutoScroll::new(ScrollDirection::Down),
            expanded: None,
            highlighted: None,
            media_priority: false,
            jump_generation: 0,
            jump_snaps: false,
            jump_handle: None,
            highlight_handle: None,
            geometry: HashMap::new(),
            trending_geometry: None,
            hits: HitMap::default(),
            wheel_gate: WheelGate::new(timings.wheel_debounce),
            mouse_enabled: config.mouse,
            status_message: None,
            needs_redraw: true,
            show_help: false,
            help_scroll_offset: 0,
        }
    }

    // ------------------------------------------------------------------------
    // Theme and status
    // ------------------------------------------------------------------------

    pub fn set_theme(&mut self, variant: ThemeVariant) {
        self.theme_variant = variant;
        self.palette = variant.palette();
        self.needs_redraw = true;
    }

    /// Cycle to the next theme variant. Returns its name for status display.
    pub fn cycle_theme(&mut self) -> &'static str {
        let next = self.theme_variant.next();
        self.set_theme(next);
        next.name()
    }

    /// Set status message (will auto-expire after 3 seconds)
    pub fn set_status(&mut self, msg: impl Into<Cow<'static, str>>) {
        self.status_message = Some((msg.into(), Instant::now()));
        self.needs_redraw = true;
    }

    /// Clear status message if expired. Returns true if a message was cleared.
    pub fn clear_expired_status(&mut self) -> bool {
        if let Some((_, time)) = &self.status_message {
            if time.elapsed() >= STATUS_TTL {
                self.status_message = None;
                return true;
            }
        }
        false
    }

    // ------------------------------------------------------------------------
    // Search box
    // ------------------------------------------------------------------------

    /// Current suggestions for the query in the search box.
    pub fn suggestions(&self) -> Vec<SearchHit<'_>> {
        search(&self.catalog, &self.search.input)
    }

    pub fn focus_search(&mut self) {
        self.focus = Focus::Search;
        self.search.show_suggestions = !self.search.input.trim().is_empty();
        self.needs_redraw = true;
    }

    /// Leave the search box; the popover hides but the query is kept.
    pub fn blur_search(&mut self) {
        if self.focus == Focus::Search {
            self.focus = Focus::Columns;
        }
        self.search.show_suggestions = false;
        self.needs_redraw = true;
    }

    pub fn push_search_char(&mut self, c: char) {
        if c.is_control() || self.search.input.len() >= MAX_SEARCH_QUERY_LENGTH {
            return;
        }
        self.search.input.push(c);
        self.query_changed();
    }

    pub fn pop_search_char(&mut self) {
        if self.search.input.pop().is_some() {
            self.query_changed();
        }
    }

    fn query_changed(&mut self) {
        self.search.selected = 0;
        self.search.show_suggestions = !self.search.input.trim().is_empty();
        self.needs_redraw = true;
    }

    /// Move the suggestion highlight, clamped to the current hits.
    pub fn move_suggestion(&mut self, delta: isize) {
        let count = self.suggestions().len();
        if count == 0 {
            return;
        }
        self.search.selected = self
            .search
            .selected
            .saturating_add_signed(delta)
            .min(count - 1);
        self.needs_redraw = true;
    }

    /// Jump to suggestion `index`. Returns `false` if there is no such hit.
    pub fn select_search_hit(&mut self, index: usize, tx: &mpsc::Sender<AppEvent>) -> bool {
        let Some(target) = self.suggestions().get(index).map(|hit| hit.location) else {
            return false;
        };
        tracing::debug!(query = %self.search.input, %target, "Search hit selected");
        self.begin_jump(target, JumpSource::Search, tx);
        true
    }

    /// Enter in the search box: jump to the highlighted suggestion.
    pub fn commit_search(&mut self, tx: &mpsc::Sender<AppEvent>) -> bool {
        self.select_search_hit(self.search.selected, tx)
    }

    // ------------------------------------------------------------------------
    // Trending
    // ------------------------------------------------------------------------

    /// Jump to the article behind trending entry `index`.
    ///
    /// An entry without a matching article performs no navigation.
    pub fn select_trending(&mut self, index: usize, tx: &mpsc::Sender<AppEvent>) -> bool {
        let Some(item) = self.catalog.trending.get(index) else {
            return false;
        };
        match resolve_trending(&self.catalog, item) {
            Some(target) => {
                self.trending_selected = index;
                self.begin_jump(target, JumpSource::Trending, tx);
                true
            }
            None => {
                self.set_status("No story for this trending topic yet");
                false
            }
        }
    }

    // ------------------------------------------------------------------------
    // Jump choreography
    // ------------------------------------------------------------------------

    /// Start a jump to `target`.
    ///
    /// Clears the search, makes the target column the only paused column,
    /// switches page if needed and schedules the settle step. Any jump still
    /// in flight is cancelled.
    pub fn begin_jump(
        &mut self,
        target: ArticleLocation,
        source: JumpSource,
        tx: &mpsc::Sender<AppEvent>,
    ) {
        if self.catalog.article(target).is_none() {
            tracing::warn!(%target, "Jump target out of range");
            return;
        }

        self.search.clear();
        if self.focus == Focus::Search {
            self.focus = Focus::Columns;
        }

        for (i, ticker) in self.tickers.iter_mut().enumerate() {
            if i == target.column {
                ticker.pause();
            } else {
                ticker.resume();
            }
        }

        let page_changed = self.pager.go_to(self.pager.page_for_column(target.column));

        if source == JumpSource::Trending {
            self.expanded = Some(target);
            self.media_priority = true;
        }

        self.cancel_jump_tasks();
        self.highlighted = None;
        self.jump_generation += 1;
        self.jump_snaps = page_changed;
        let generation = self.jump_generation;

        let delay = if page_changed {
            SETTLE_PAGE_CHANGE
        } else {
            SETTLE_SAME_PAGE
        };
        tracing::debug!(
            %target,
            ?source,
            generation,
            page_changed,
            delay_ms = delay.as_millis() as u64,
            "Jump started"
        );
        self.jump_handle = Some(spawn_after(
            delay,
            tx.clone(),
            AppEvent::JumpSettled { generation, target },
        ));
        self.needs_redraw = true;
    }

    /// Scroll the target into view and start the highlight.
    ///
    /// A column that just came onto the page snaps to the target; one that
    /// was already visible scrolls there smoothly.
    ///
    /// If the column has not been laid out yet the scroll is skipped and the
    /// column resumes.
    pub fn settle_jump(
        &mut self,
        generation: u64,
        target: ArticleLocation,
        tx: &mpsc::Sender<AppEvent>,
    ) {
        if generation != self.jump_generation {
            tracing::debug!(
                generation,
                current = self.jump_generation,
                "Stale jump settle ignored"
            );
            return;
        }
        self.jump_handle = None;

        let Some(top) = self.article_top(target) else {
            tracing::debug!(%target, "Jump target not laid out, skipping scroll");
            if let Some(ticker) = self.tickers.get_mut(target.column) {
                ticker.resume();
            }
            return;
        };

        if let Some(ticker) = self.tickers.get_mut(target.column) {
            let line = top.saturating_sub(1);
            if self.jump_snaps {
                ticker.jump_to(line);
            } else {
                ticker.scroll_to(line);
            }
        }
        self.highlighted = Some(target);
        self.cursor = target;

        self.highlight_handle = Some(spawn_after(
            self.timings.highlight,
            tx.clone(),
            AppEvent::HighlightExpired { generation },
        ));
        tracing::debug!(%target, generation, line = top, "Jump settled");
        self.needs_redraw = true;
    }

    /// Clear the highlight and let every column scroll again.
    pub fn expire_highlight(&mut self, generation: u64) {
        if generation != self.jump_generation {
            tracing::debug!(
                generation,
                current = self.jump_generation,
                "Stale highlight expiry ignored"
            );
            return;
        }
        self.highlight_handle = None;
        self.highlighted = None;
        for ticker in &mut self.tickers {
            ticker.resume();
        }
        self.needs_redraw = true;
    }

    /// Abort deferred tasks of the current jump.
    pub fn cancel_jump_tasks(&mut self) {
        if let Some(handle) = self.jump_handle.take() {
            handle.abort();
        }
        if let Some(handle) = self.highlight_handle.take() {
            handle.abort();
        }
    }

    // ------------------------------------------------------------------------
    // Articles
    // ------------------------------------------------------------------------

    /// Toggle between the full body and the preview.
    ///
    /// Only one article is expanded at a time. Expanding by hand never gives
    /// the media panel priority.
    pub fn toggle_expand(&mut self, loc: ArticleLocation) {
        if self.catalog.article(loc).is_none() {
            return;
        }
        self.expanded = if self.expanded == Some(loc) {
            None
        } else {
            Some(loc)
        };
        self.media_priority = false;
        tracing::debug!(%loc, expanded = self.expanded.is_some(), "Toggled article");
        self.needs_redraw = true;
    }

    /// Mouse is over an article: hold its column for the resume delay.
    pub fn hover_article(&mut self, loc: ArticleLocation, now: Instant) {
        self.hover_column(loc.column, now);
    }

    pub fn hover_column(&mut self, column: usize, now: Instant) {
        let deadline = now + self.timings.resume_delay;
        if let Some(ticker) = self.tickers.get_mut(column) {
            ticker.pause_until(deadline);
        }
    }

    pub fn hover_trending(&mut self, now: Instant) {
        self.trending_ticker
            .pause_until(now + self.timings.resume_delay);
    }

    /// Move the trending selection, wrapping, and bring it into view.
    pub fn move_trending(&mut self, delta: isize, now: Instant) {
        let len = self.catalog.trending.len();
        if len == 0 {
            return;
        }
        self.trending_selected =
            (self.trending_selected as isize + delta).rem_euclid(len as isize) as usize;
        self.hover_trending(now);
        let visible = self.trending_geometry.as_ref().is_some_and(|g| {
            let window = self.trending_ticker.window(g.cycle_len, g.viewport);
            window.contains(&self.trending_selected)
        });
        if !visible {
            self.trending_ticker.scroll_to(self.trending_selected);
        }
        self.needs_redraw = true;
    }

    /// Keyboard selection: move the cursor, hold the column and bring the
    /// article's top into view (unless it is the highlighted jump target).
    pub fn select_article(&mut self, loc: ArticleLocation, now: Instant) {
        if self.catalog.article(loc).is_none() {
            return;
        }
        self.cursor = loc;
        self.hover_article(loc, now);
        if self.highlighted != Some(loc) {
            if let (Some(top), Some(ticker)) =
                (self.article_top(loc), self.tickers.get_mut(loc.column))
            {
                ticker.scroll_to(top);
            }
        }
        self.needs_redraw = true;
    }

    /// Move the cursor within its column, wrapping at the ends.
    pub fn move_cursor_vertical(&mut self, delta: isize, now: Instant) {
        let Some(column) = self.catalog.columns.get(self.cursor.column) else {
            return;
        };
        let len = column.articles.len();
        if len == 0 {
            return;
        }
        let index = (self.cursor.index as isize + delta).rem_euclid(len as isize) as usize;
        self.select_article(ArticleLocation::new(self.cursor.column, index), now);
    }

    /// Move the cursor to a neighbouring column, paging when it leaves the page.
    pub fn move_cursor_horizontal(&mut self, delta: isize, now: Instant) {
        let columns = self.catalog.columns.len();
        let Some(column) = self.cursor.column.checked_add_signed(delta) else {
            return;
        };
        if column >= columns {
            return;
        }
        let len = self.catalog.columns[column].articles.len();
        if len == 0 {
            return;
        }
        self.pager.go_to(self.pager.page_for_column(column));
        self.select_article(
            ArticleLocation::new(column, self.cursor.index.min(len - 1)),
            now,
        );
    }

    /// Release timed holds whose delay has passed. Returns true if any resumed.
    pub fn resume_due_columns(&mut self, now: Instant) -> bool {
        let mut any = false;
        for (i, ticker) in self.tickers.iter_mut().enumerate() {
            if ticker.resume_if_due(now) {
                tracing::trace!(column = i, "Column resumed");
                any = true;
            }
        }
        any |= self.trending_ticker.resume_if_due(now);
        any
    }

    /// Hold or release the cursor's column indefinitely.
    pub fn toggle_column_pause(&mut self) -> bool {
        match self.tickers.get_mut(self.cursor.column) {
            Some(ticker) => {
                ticker.toggle_pause();
                self.needs_redraw = true;
                ticker.is_paused()
            }
            None => false,
        }
    }

    /// First line of an article within its column's cycle, if laid out.
    pub fn article_top(&self, loc: ArticleLocation) -> Option<usize> {
        self.geometry
            .get(&loc.column)
            .and_then(|g| g.article_starts.get(loc.index))
            .copied()
    }

    /// Advance every visible ticker one frame. Returns true if anything moved.
    pub fn tick_animation(&mut self) -> bool {
        let mut moved = false;
        for column in self.pager.visible_columns() {
            let (Some(geometry), Some(ticker)) =
                (self.geometry.get(&column), self.tickers.get_mut(column))
            else {
                continue;
            };
            moved |= ticker.step(geometry.cycle_len, geometry.viewport);
        }
        if let Some(geometry) = &self.trending_geometry {
            moved |= self
                .trending_ticker
                .step(geometry.cycle_len, geometry.viewport);
        }
        moved
    }

    /// Manual scroll of one column by `delta` lines.
    pub fn scroll_column(&mut self, column: usize, delta: isize, now: Instant) {
        let cycle_len = self.geometry.get(&column).map_or(0, |g| g.cycle_len);
        let deadline = now + self.timings.resume_delay;
        if let Some(ticker) = self.tickers.get_mut(column) {
            ticker.nudge(delta, cycle_len);
            ticker.pause_until(deadline);
            self.needs_redraw = true;
        }
    }

    // ------------------------------------------------------------------------
    // Paging
    // ------------------------------------------------------------------------

    /// Switch page, bringing the cursor onto it.
    pub fn go_to_page(&mut self, page: usize) -> bool {
        let moved = self.pager.go_to(page);
        if moved {
            self.page_changed();
        }
        moved
    }

    fn page_changed(&mut self) {
        let visible = self.pager.visible_columns();
        if !visible.contains(&self.cursor.column) {
            self.cursor = ArticleLocation::new(visible.start, 0);
        }
        self.needs_redraw = true;
    }

    pub fn next_page(&mut self) -> bool {
        let moved = self.pager.next();
        if moved {
            self.page_changed();
        }
        moved
    }

    pub fn prev_page(&mut self) -> bool {
        let moved = self.pager.prev();
        if moved {
            self.page_changed();
        }
        moved
    }

    /// Wheel over the dot strip: at most one page per debounce window.
    pub fn wheel_page(&mut self, forward: bool, now: Instant) -> bool {
        if !self.wheel_gate.admit(now) {
            return false;
        }
        if forward {
            self.next_page()
        } else {
            self.prev_page()
        }
    }

    // ------------------------------------------------------------------------
    // Sidebar
    // ------------------------------------------------------------------------

    /// The player for the expanded article, if it has a video.
    pub fn media(&self) -> Option<Media<'_>> {
        let location = self.expanded?;
        let article = self.catalog.article(location)?;
        let video_id = article.video_id.as_deref()?;
        Some(Media {
            location,
            article,
            url: embed_url(&self.embed_base, video_id),
        })
    }

    pub fn sidebar_split(&self) -> SidebarSplit {
        match (self.media().is_some(), self.media_priority) {
            (true, true) => SidebarSplit::MediaFirst,
            (true, false) => SidebarSplit::Even,
            (false, _) => SidebarSplit::TrendingOnly,
        }
    }

    pub fn cycle_focus(&mut self) {
        match self.focus {
            Focus::Columns => self.focus = Focus::Trending,
            Focus::Trending => self.focus_search(),
            Focus::Search => self.blur_search(),
        }
        self.needs_redraw = true;
    }
}

/// Send `event` after `delay`.
fn spawn_after(delay: Duration, tx: mpsc::Sender<AppEvent>, event: AppEvent) -> JoinHandle<()> {
    tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        if tx.send(event).await.is_err() {
            tracing::debug!(?event, "Event channel closed before deferred step");
        }
    })
}

// ============================================================================
// Tests
// ============================================================================
