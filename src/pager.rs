//! Column pagination and wheel-gesture debouncing.

use std::ops::Range;
use std::time::Duration;
use tokio::time::Instant;

/// Groups catalog columns into fixed-size pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    columns_per_page: usize,
    total_columns: usize,
    current: usize,
}

impl Pager {
    /// `columns_per_page` below 1 is treated as 1.
    pub fn new(total_columns: usize, columns_per_page: usize) -> Self {
        Self {
            columns_per_page: columns_per_page.max(1),
            total_columns,
            current: 0,
        }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn columns_per_page(&self) -> usize {
        self.columns_per_page
    }

    /// Number of pages; an empty catalog still has one (empty) page.
    pub fn total_pages(&self) -> usize {
        self.total_columns.div_ceil(self.columns_per_page).max(1)
    }

    /// Page that holds the column at `column_index`.
    pub fn page_for_column(&self, column_index: usize) -> usize {
        column_index / self.columns_per_page
    }

    /// Catalog indices of the columns on the current page.
    pub fn visible_columns(&self) -> Range<usize> {
        let start = self.current * self.columns_per_page;
        let end = (start + self.columns_per_page).min(self.total_columns);
        start.min(end)..end
    }

    /// Switch to `page`. Returns `true` if the page changed; out-of-range
    /// pages are ignored.
    pub fn go_to(&mut self, page: usize) -> bool {
        if page >= self.total_pages() || page == self.current {
            return false;
        }
        tracing::debug!(from = self.current, to = page, "Page change");
        self.current = page;
        true
    }

    /// Advance one page, stopping at the last.
    pub fn next(&mut self) -> bool {
        self.go_to(self.current + 1)
    }

    /// Go back one page, stopping at the first.
    pub fn prev(&mut self) -> bool {
        match self.current.checked_sub(1) {
            Some(page) => self.go_to(page),
            None => false,
        }
    }
}

/// Admits at most one wheel gesture per window.
///
/// Events that arrive while the window is open are dropped and do not extend
/// it; only an admitted event starts a new window.
#[derive(Debug, Clone)]
pub struct WheelGate {
    window: Duration,
    last_admitted: Option<Instant>,
}

impl WheelGate {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            last_admitted: None,
        }
    }

    pub fn admit(&mut self, now: Instant) -> bool {
        match self.last_admitted {
            Some(last) if now.saturating_duration_since(last) < self.window => false,
            _ => {
                self.last_admitted = Some(now);
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn four_columns_two_per_page() {
        let pager = Pager::new(4, 2);
        assert_eq!(pager.total_pages(), 2);
        assert_eq!(pager.page_for_column(0), 0);
        assert_eq!(pager.page_for_column(1), 0);
        assert_eq!(pager.page_for_column(2), 1);
        assert_eq!(pager.page_for_column(3), 1);
        assert_eq!(pager.visible_columns(), 0..2);
    }

    #[test]
    fn partial_last_page() {
        let mut pager = Pager::new(5, 2);
        assert_eq!(pager.total_pages(), 3);
        assert!(pager.go_to(2));
        assert_eq!(pager.visible_columns(), 4..5);
    }

    #[test]
    fn zero_columns_per_page_treated_as_one() {
        let pager = Pager::new(3, 0);
        assert_eq!(pager.columns_per_page(), 1);
        assert_eq!(pager.total_pages(), 3);
    }

    #[test]
    fn empty_catalog_has_one_empty_page() {
        let pager = Pager::new(0, 2);
        assert_eq!(pager.total_pages(), 1);
        assert!(pager.visible_columns().is_empty());
    }

    #[test]
    fn next_and_prev_stop_at_edges() {
        let mut pager = Pager::new(4, 2);
        assert!(!pager.prev());
        assert!(pager.next());
        assert_eq!(pager.current(), 1);
        assert!(!pager.next());
        assert_eq!(pager.current(), 1);
        assert!(pager.prev());
        assert_eq!(pager.current(), 0);
    }

    #[test]
    fn go_to_same_or_out_of_range_is_noop() {
        let mut pager = Pager::new(4, 2);
        assert!(!pager.go_to(0));
        assert!(!pager.go_to(7));
        assert_eq!(pager.current(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn wheel_gate_admits_one_per_window() {
        let mut gate = WheelGate::new(Duration::from_millis(800));
        let start = Instant::now();

        assert!(gate.admit(start));
        assert!(!gate.admit(start + Duration::from_millis(100)));
        assert!(!gate.admit(start + Duration::from_millis(799)));
        assert!(gate.admit(start + Duration::from_millis(800)));
    }

    #[tokio::test(start_paused = true)]
    async fn dropped_events_do_not_extend_window() {
        let mut gate = WheelGate::new(Duration::from_millis(800));
        let start = Instant::now();

        assert!(gate.admit(start));
        // A steady stream of wheel events inside the window
        for ms in (50..800).step_by(50) {
            assert!(!gate.admit(start + Duration::from_millis(ms)));
        }
        // Window measured from the admitted event, not the last dropped one
        assert!(gate.admit(start + Duration::from_millis(810)));
    }
}
