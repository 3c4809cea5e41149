//! Scrollable output log.

/// Oldest lines are dropped beyond this many.
pub const MAX_LINES: usize = 10_000;

/// Append-only text log with a scroll offset measured from the bottom.
///
/// An offset of zero follows the tail, so new output stays visible until the
/// user scrolls up.
#[derive(Debug, Clone, Default)]
pub struct OutputLog {
    lines: Vec<String>,
    offset_from_bottom: usize,
}

impl OutputLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Append each line of `text`.
    pub fn append_text(&mut self, text: &str) {
        self.append_lines(text.lines().map(str::to_string));
    }

    pub fn append_lines<I>(&mut self, lines: I)
    where
        I: IntoIterator<Item = String>,
    {
        let before = self.lines.len();
        self.lines.extend(lines);
        let added = self.lines.len() - before;
        // Keep the user's view anchored when they have scrolled up.
        if self.offset_from_bottom > 0 {
            self.offset_from_bottom += added;
        }
        if self.lines.len() > MAX_LINES {
            let excess = self.lines.len() - MAX_LINES;
            self.lines.drain(..excess);
        }
        self.clamp();
    }

    pub fn clear(&mut self) {
        self.lines.clear();
        self.offset_from_bottom = 0;
    }

    pub fn scroll_up(&mut self, n: usize) {
        self.offset_from_bottom = self.offset_from_bottom.saturating_add(n);
        self.clamp();
    }

    pub fn scroll_down(&mut self, n: usize) {
        self.offset_from_bottom = self.offset_from_bottom.saturating_sub(n);
    }

    pub fn scroll_to_top(&mut self) {
        self.offset_from_bottom = self.lines.len();
        self.clamp();
    }

    pub fn scroll_to_bottom(&mut self) {
        self.offset_from_bottom = 0;
    }

    /// True when the view follows new output.
    pub fn is_following(&self) -> bool {
        self.offset_from_bottom == 0
    }

    /// The lines that fit in a viewport of `height` rows.
    pub fn visible(&self, height: usize) -> &[String] {
        let end = self.lines.len() - self.offset_from_bottom;
        let start = end.saturating_sub(height);
        &self.lines[start..end]
    }

    fn clamp(&mut self) {
        // Leave at least one line on screen.
        let max = self.lines.len().saturating_sub(1);
        self.offset_from_bottom = self.offset_from_bottom.min(max);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn log_with(n: usize) -> OutputLog {
        let mut log = OutputLog::new();
        log.append_lines((0..n).map(|i| format!("line {}", i)));
        log
    }

    #[test]
    fn append_text_splits_lines() {
        let mut log = OutputLog::new();
        log.append_text("a\nb\n\nc\n");
        assert_eq!(log.lines(), &["a", "b", "", "c"]);
    }

    #[test]
    fn visible_follows_tail() {
        let log = log_with(10);
        assert_eq!(log.visible(3), &["line 7", "line 8", "line 9"]);
        assert_eq!(log.visible(50).len(), 10);
    }

    #[test]
    fn scrolling_moves_the_window() {
        let mut log = log_with(10);
        log.scroll_up(2);
        assert_eq!(log.visible(3), &["line 5", "line 6", "line 7"]);
        assert!(!log.is_following());

        log.scroll_down(5);
        assert!(log.is_following());
        assert_eq!(log.visible(1), &["line 9"]);
    }

    #[test]
    fn scroll_is_clamped() {
        let mut log = log_with(5);
        log.scroll_up(100);
        assert_eq!(log.visible(2), &["line 0"]);
        log.scroll_to_top();
        assert_eq!(log.visible(1), &["line 0"]);
        log.scroll_to_bottom();
        assert_eq!(log.visible(1), &["line 4"]);
    }

    #[test]
    fn scrolled_view_stays_put_when_output_arrives() {
        let mut log = log_with(10);
        log.scroll_up(3);
        let before = log.visible(2).to_vec();
        log.append_text("new 1\nnew 2");
        assert_eq!(log.visible(2), before.as_slice());
    }

    #[test]
    fn oldest_lines_are_dropped_past_the_cap() {
        let mut log = log_with(MAX_LINES);
        log.append_text("overflow");
        assert_eq!(log.lines().len(), MAX_LINES);
        assert_eq!(log.lines()[0], "line 1");
        assert_eq!(log.lines().last().unwrap(), "overflow");
    }

    #[test]
    fn clear_resets_scroll() {
        let mut log = log_with(10);
        log.scroll_up(4);
        log.clear();
        assert!(log.lines().is_empty());
        assert!(log.is_following());
        assert!(log.visible(5).is_empty());
    }
}
