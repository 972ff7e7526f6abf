// Scroll state shared by the TUI panels
//
// Each panel owns its ScrollState; the App only renders and routes input.
// Log output auto-follows new entries, the tree and the detail panel scroll
// manually and keep the cursor in view.

/// Scroll position, content size and viewport size for one panel
#[derive(Debug, Clone)]
pub struct ScrollState {
    /// Index of the first visible line/item
    offset: usize,

    total: usize,

    viewport: usize,

    /// Stick to the bottom as content grows. Scrolling up disables it,
    /// reaching the bottom again re-enables it.
    pub auto_follow: bool,

    /// Whether reaching the bottom may turn auto-follow back on
    follows: bool,
}

impl ScrollState {
    /// Auto-follow enabled
    pub fn new() -> Self {
        Self {
            offset: 0,
            total: 0,
            viewport: 0,
            auto_follow: true,
            follows: true,
        }
    }

    /// Auto-follow disabled
    pub fn manual() -> Self {
        Self {
            auto_follow: false,
            follows: false,
            ..Self::new()
        }
    }

    /// Call each render frame with current sizes
    pub fn update_dimensions(&mut self, total: usize, viewport: usize) {
        self.total = total;
        self.viewport = viewport;

        if self.auto_follow {
            self.offset = self.max_offset();
        } else {
            self.offset = self.offset.min(self.max_offset());
        }
    }

    pub fn scroll_up(&mut self) {
        if self.offset > 0 {
            self.offset -= 1;
            self.auto_follow = false;
        }
    }

    pub fn scroll_down(&mut self) {
        if self.offset < self.max_offset() {
            self.offset += 1;
        }
        if self.follows && self.total > 0 && self.offset >= self.max_offset() {
            self.auto_follow = true;
        }
    }

    pub fn page_up(&mut self) {
        let page = self.viewport.max(1);
        self.offset = self.offset.saturating_sub(page);
        self.auto_follow = false;
    }

    pub fn page_down(&mut self) {
        let page = self.viewport.max(1);
        self.offset = (self.offset + page).min(self.max_offset());
        if self.follows && self.offset >= self.max_offset() {
            self.auto_follow = true;
        }
    }

    pub fn scroll_to_top(&mut self) {
        self.offset = 0;
        self.auto_follow = false;
    }

    pub fn scroll_to_bottom(&mut self) {
        self.offset = self.max_offset();
        self.auto_follow = self.follows;
    }

    /// Move the window the minimum amount needed for `index` to be visible
    pub fn ensure_visible(&mut self, index: usize) {
        if self.viewport == 0 {
            return;
        }
        if index < self.offset {
            self.offset = index;
        } else if index >= self.offset + self.viewport {
            self.offset = index + 1 - self.viewport;
        }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    /// (start_index, end_index) of the visible window
    pub fn visible_range(&self) -> (usize, usize) {
        let start = self.offset;
        let end = (self.offset + self.viewport).min(self.total);
        (start, end)
    }

    pub fn needs_scrollbar(&self) -> bool {
        self.total > self.viewport
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn viewport(&self) -> usize {
        self.viewport
    }

    fn max_offset(&self) -> usize {
        self.total.saturating_sub(self.viewport)
    }
}

impl Default for ScrollState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auto_follow_on_new_content() {
        let mut scroll = ScrollState::new();
        scroll.update_dimensions(10, 5);
        assert_eq!(scroll.offset(), 5);

        scroll.update_dimensions(15, 5);
        assert_eq!(scroll.offset(), 10);
    }

    #[test]
    fn test_scroll_up_disables_auto_follow() {
        let mut scroll = ScrollState::new();
        scroll.update_dimensions(20, 5);

        scroll.scroll_up();
        assert!(!scroll.auto_follow);
        assert_eq!(scroll.offset(), 14);
    }

    #[test]
    fn test_scroll_to_bottom_resumes_following() {
        let mut scroll = ScrollState::new();
        scroll.update_dimensions(20, 5);
        scroll.scroll_up();
        scroll.scroll_to_bottom();
        assert!(scroll.auto_follow);
        assert_eq!(scroll.offset(), 15);

        let mut manual = ScrollState::manual();
        manual.update_dimensions(20, 5);
        manual.scroll_to_bottom();
        assert!(!manual.auto_follow);
        assert_eq!(manual.offset(), 15);
    }

    #[test]
    fn test_manual_scroll_stays_put() {
        let mut scroll = ScrollState::manual();
        scroll.update_dimensions(10, 5);
        assert_eq!(scroll.offset(), 0);

        scroll.update_dimensions(15, 5);
        assert_eq!(scroll.offset(), 0);
    }

    #[test]
    fn test_ensure_visible_moves_minimally() {
        let mut scroll = ScrollState::manual();
        scroll.update_dimensions(50, 10);

        scroll.ensure_visible(4);
        assert_eq!(scroll.offset(), 0);

        scroll.ensure_visible(12);
        assert_eq!(scroll.visible_range(), (3, 13));

        scroll.ensure_visible(1);
        assert_eq!(scroll.offset(), 1);
    }

    #[test]
    fn test_shrinking_content_clamps_offset() {
        let mut scroll = ScrollState::manual();
        scroll.update_dimensions(50, 10);
        scroll.ensure_visible(49);
        assert_eq!(scroll.offset(), 40);

        scroll.update_dimensions(12, 10);
        assert_eq!(scroll.offset(), 2);
    }
}
