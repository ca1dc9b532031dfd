//! Per-column auto-scroll state.
//!
//! A column's rendered lines form one cycle. The viewport walks through that
//! cycle one line per animation tick and wraps, which shows the content as a
//! seamless loop (as if the list were duplicated once below itself).

use crate::catalog::ScrollDirection;
use tokio::time::Instant;

/// Scroll state for one auto-scrolling column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutoScroll {
    direction: ScrollDirection,
    /// First visible line within the cycle.
    offset: usize,
    paused: bool,
    /// `None` while paused means "until explicitly resumed".
    resume_at: Option<Instant>,
    /// Pending smooth scroll destination.
    target: Option<usize>,
}

impl AutoScroll {
    pub fn new(direction: ScrollDirection) -> Self {
        Self {
            direction,
            offset: 0,
            paused: false,
            resume_at: None,
            target: None,
        }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn direction(&self) -> ScrollDirection {
        self.direction
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn resume_at(&self) -> Option<Instant> {
        self.resume_at
    }

    /// True while a smooth scroll is still travelling.
    pub fn is_seeking(&self) -> bool {
        self.target.is_some()
    }

    /// Advance one animation tick. Returns `true` if the offset moved.
    ///
    /// A pending smooth scroll keeps travelling even while paused. Content of
    /// `cycle_len` lines that fits in `viewport` lines does not animate.
    pub fn step(&mut self, cycle_len: usize, viewport: usize) -> bool {
        if cycle_len <= viewport {
            self.target = None;
            if self.offset != 0 {
                self.offset = 0;
                return true;
            }
            return false;
        }

        if let Some(target) = self.target {
            return self.seek(target % cycle_len);
        }

        if self.paused {
            return false;
        }

        self.offset = match self.direction {
            ScrollDirection::Up => (self.offset + 1) % cycle_len,
            ScrollDirection::Down => (self.offset + cycle_len - 1) % cycle_len,
        };
        true
    }

    /// Move a quarter of the remaining distance (at least one line) toward `target`.
    fn seek(&mut self, target: usize) -> bool {
        if self.offset == target {
            self.target = None;
            return false;
        }
        let distance = self.offset.abs_diff(target);
        let stride = (distance / 4).max(1);
        if self.offset < target {
            self.offset += stride;
        } else {
            self.offset -= stride;
        }
        if self.offset == target {
            self.target = None;
        }
        true
    }

    /// Hold the column until [`resume`](Self::resume) is called.
    pub fn pause(&mut self) {
        self.paused = true;
        self.resume_at = None;
    }

    /// Hold the column until `deadline`.
    ///
    /// Does not shorten an indefinite hold; extends a timed one.
    pub fn pause_until(&mut self, deadline: Instant) {
        if self.paused && self.resume_at.is_none() {
            return;
        }
        self.paused = true;
        self.resume_at = Some(match self.resume_at {
            Some(current) => current.max(deadline),
            None => deadline,
        });
    }

    /// Flip between running and an indefinite hold.
    pub fn toggle_pause(&mut self) {
        if self.paused {
            self.resume();
        } else {
            self.pause();
        }
    }

    pub fn resume(&mut self) {
        self.paused = false;
        self.resume_at = None;
    }

    /// Resume if a timed hold has expired. Returns `true` if it resumed.
    pub fn resume_if_due(&mut self, now: Instant) -> bool {
        match self.resume_at {
            Some(deadline) if self.paused && now >= deadline => {
                self.resume();
                true
            }
            _ => false,
        }
    }

    /// Smoothly scroll so `offset` becomes the first visible line.
    pub fn scroll_to(&mut self, offset: usize) {
        self.target = Some(offset);
    }

    /// Move to `offset` immediately, cancelling any smooth scroll.
    pub fn jump_to(&mut self, offset: usize) {
        self.target = None;
        self.offset = offset;
    }

    /// Manual scroll by `delta` lines, wrapping around the cycle.
    pub fn nudge(&mut self, delta: isize, cycle_len: usize) {
        if cycle_len == 0 {
            return;
        }
        self.target = None;
        let len = cycle_len as isize;
        self.offset = (self.offset as isize + delta).rem_euclid(len) as usize;
    }

    /// Cycle indices of the lines visible in a viewport of `height` lines.
    ///
    /// Content that fits is shown once from the top; longer content wraps so
    /// the end flows into the beginning.
    pub fn window(&self, cycle_len: usize, height: usize) -> Vec<usize> {
        if cycle_len <= height {
            return (0..cycle_len).collect();
        }
        let start = self.offset % cycle_len;
        (0..height).map(|i| (start + i) % cycle_len).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn up_scroll_advances_and_wraps() {
        let mut s = AutoScroll::new(ScrollDirection::Up);
        for _ in 0..9 {
            assert!(s.step(10, 4));
        }
        assert_eq!(s.offset(), 9);
        s.step(10, 4);
        assert_eq!(s.offset(), 0);
    }

    #[test]
    fn down_scroll_walks_backwards() {
        let mut s = AutoScroll::new(ScrollDirection::Down);
        s.step(10, 4);
        assert_eq!(s.offset(), 9);
        s.step(10, 4);
        assert_eq!(s.offset(), 8);
    }

    #[test]
    fn content_that_fits_does_not_animate() {
        let mut s = AutoScroll::new(ScrollDirection::Up);
        assert!(!s.step(5, 5));
        assert!(!s.step(3, 10));
        assert_eq!(s.offset(), 0);
    }

    #[test]
    fn content_fitting_after_resize_resets_offset() {
        let mut s = AutoScroll::new(ScrollDirection::Up);
        s.jump_to(6);
        // Terminal grew so the content now fits
        assert!(s.step(10, 20));
        assert_eq!(s.offset(), 0);
    }

    #[test]
    fn paused_column_holds_still() {
        let mut s = AutoScroll::new(ScrollDirection::Up);
        s.pause();
        assert!(!s.step(10, 4));
        assert_eq!(s.offset(), 0);
    }

    #[test]
    fn smooth_scroll_travels_while_paused() {
        let mut s = AutoScroll::new(ScrollDirection::Up);
        s.pause();
        s.scroll_to(9);
        let mut ticks = 0;
        while s.is_seeking() {
            assert!(s.step(40, 10));
            ticks += 1;
            assert!(ticks < 40, "seek never converged");
        }
        assert_eq!(s.offset(), 9);
        assert!(ticks > 1, "scroll should take several ticks");
        // Still paused after arriving
        assert!(!s.step(40, 10));
    }

    #[test]
    fn smooth_scroll_backwards() {
        let mut s = AutoScroll::new(ScrollDirection::Down);
        s.jump_to(30);
        s.scroll_to(2);
        while s.is_seeking() {
            s.step(40, 10);
        }
        assert_eq!(s.offset(), 2);
    }

    #[test]
    fn window_wraps_around_cycle() {
        let mut s = AutoScroll::new(ScrollDirection::Up);
        s.jump_to(8);
        assert_eq!(s.window(10, 4), vec![8, 9, 0, 1]);
    }

    #[test]
    fn window_of_short_content_is_whole_content() {
        let s = AutoScroll::new(ScrollDirection::Up);
        assert_eq!(s.window(3, 10), vec![0, 1, 2]);
        assert!(s.window(0, 10).is_empty());
    }

    #[test]
    fn nudge_wraps_both_ways() {
        let mut s = AutoScroll::new(ScrollDirection::Up);
        s.nudge(-1, 10);
        assert_eq!(s.offset(), 9);
        s.nudge(3, 10);
        assert_eq!(s.offset(), 2);
        s.nudge(5, 0);
        assert_eq!(s.offset(), 2);
    }

    #[test]
    fn toggle_pause_round_trips() {
        let mut s = AutoScroll::new(ScrollDirection::Up);
        s.toggle_pause();
        assert!(s.is_paused());
        assert_eq!(s.resume_at(), None);
        s.toggle_pause();
        assert!(!s.is_paused());
    }

    #[tokio::test(start_paused = true)]
    async fn timed_pause_resumes_when_due() {
        let mut s = AutoScroll::new(ScrollDirection::Up);
        let now = Instant::now();
        s.pause_until(now + Duration::from_secs(3));

        assert!(!s.resume_if_due(now + Duration::from_secs(2)));
        assert!(s.is_paused());
        assert!(s.resume_if_due(now + Duration::from_secs(3)));
        assert!(!s.is_paused());
    }

    #[tokio::test(start_paused = true)]
    async fn timed_pause_extends_but_never_shortens() {
        let mut s = AutoScroll::new(ScrollDirection::Up);
        let now = Instant::now();
        s.pause_until(now + Duration::from_secs(3));
        s.pause_until(now + Duration::from_secs(1));
        assert_eq!(s.resume_at(), Some(now + Duration::from_secs(3)));
        s.pause_until(now + Duration::from_secs(5));
        assert_eq!(s.resume_at(), Some(now + Duration::from_secs(5)));
    }

    #[tokio::test(start_paused = true)]
    async fn hover_does_not_cut_an_indefinite_hold() {
        let mut s = AutoScroll::new(ScrollDirection::Up);
        let now = Instant::now();
        s.pause();
        s.pause_until(now + Duration::from_secs(1));
        assert!(!s.resume_if_due(now + Duration::from_secs(10)));
        assert!(s.is_paused());
    }
}
