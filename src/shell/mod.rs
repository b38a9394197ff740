//! Shell chrome: overlay surfaces layered over the screen stack.

mod planner;

pub use planner::{plan_screens, RenderPlan, ScreenDesc};

use crate::constants::{MAX_POST_LEN, NEW_TAB_FLASH_TICKS};

/// Context shown in the composer when replying to a post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyTo {
    pub uri: String,
    pub cid: String,
    pub handle: String,
    pub display_name: Option<String>,
    pub text: String,
}

/// Transient shell-surface state: which overlays are open and what the
/// composer holds. Navigation continuity lives in [`crate::nav`], not here.
#[derive(Debug, Default)]
pub struct ShellState {
    /// Menu drawer is open. While it is, the renderer demotes the current
    /// screen to "previous" so the drawer visually takes its place.
    pub is_menu_active: bool,
    /// Tabs selector overlay is open.
    pub is_tabs_selector_active: bool,
    /// Selection cursor within the tabs selector.
    pub tabs_selector_index: usize,

    // ── Composer ─────────────────────────────────────────────
    pub is_composer_active: bool,
    pub composer_text: String,
    pub composer_cursor: usize,
    pub composer_reply_to: Option<ReplyTo>,

    /// Remaining ticks of the new-tab highlight.
    pub new_tab_flash: u64,
}

impl ShellState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle_menu(&mut self) {
        self.is_menu_active = !self.is_menu_active;
    }

    pub fn toggle_tabs_selector(&mut self) {
        self.is_tabs_selector_active = !self.is_tabs_selector_active;
        self.tabs_selector_index = 0;
    }

    /// Start the new-tab highlight; ticked down by the event loop.
    pub fn start_new_tab_flash(&mut self) {
        self.new_tab_flash = NEW_TAB_FLASH_TICKS;
    }

    pub fn tick_new_tab_flash(&mut self) -> bool {
        if self.new_tab_flash > 0 {
            self.new_tab_flash -= 1;
            self.new_tab_flash == 0
        } else {
            false
        }
    }

    // ── Composer ─────────────────────────────────────────────────

    pub fn open_composer(&mut self, reply_to: Option<ReplyTo>) {
        self.is_composer_active = true;
        self.composer_text.clear();
        self.composer_cursor = 0;
        self.composer_reply_to = reply_to;
    }

    pub fn close_composer(&mut self) {
        self.is_composer_active = false;
        self.composer_text.clear();
        self.composer_cursor = 0;
        self.composer_reply_to = None;
    }

    pub fn composer_input_char(&mut self, c: char) {
        if self.composer_text.chars().count() >= MAX_POST_LEN {
            return;
        }
        self.composer_text.insert(self.composer_cursor, c);
        self.composer_cursor += c.len_utf8();
    }

    pub fn composer_backspace(&mut self) {
        if self.composer_cursor > 0 {
            let prev = self.composer_text[..self.composer_cursor]
                .char_indices()
                .next_back()
                .map(|(i, _)| i)
                .unwrap_or(0);
            self.composer_text.remove(prev);
            self.composer_cursor = prev;
        }
    }

    pub fn composer_cursor_left(&mut self) {
        if self.composer_cursor > 0 {
            self.composer_cursor = self.composer_text[..self.composer_cursor]
                .char_indices()
                .next_back()
                .map(|(i, _)| i)
                .unwrap_or(0);
        }
    }

    pub fn composer_cursor_right(&mut self) {
        if self.composer_cursor < self.composer_text.len() {
            self.composer_cursor = self.composer_text[self.composer_cursor..]
                .char_indices()
                .nth(1)
                .map(|(i, _)| self.composer_cursor + i)
                .unwrap_or(self.composer_text.len());
        }
    }

    /// Take the composed text if it is non-empty, closing the composer.
    pub fn composer_submit(&mut self) -> Option<(String, Option<ReplyTo>)> {
        let text = self.composer_text.trim().to_string();
        if text.is_empty() {
            return None;
        }
        let reply_to = self.composer_reply_to.clone();
        self.close_composer();
        Some((text, reply_to))
    }
}
