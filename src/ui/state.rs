//! Central application state.
//!
//! Owns the navigation model, shell chrome, feed store, and theme. The
//! renderer reads this struct every frame and derives the screen stack
//! from the navigation model; nothing here is cached between frames.

use std::collections::HashMap;
use std::time::Instant;

use crate::config::Config;
use crate::constants::{PAGE_SIZE, STATUS_MESSAGE_TIMEOUT_SECS};
use crate::models::FeedItem;
use crate::nav::NavigationModel;
use crate::routes::{match_route, MatchResult};
use crate::shell::ShellState;
use crate::store::FeedStore;
use crate::ui::theme::Theme;

pub struct AppState {
    pub nav: NavigationModel,
    pub shell: ShellState,
    pub store: FeedStore,
    pub theme: Theme,

    /// Viewer handle shown in the menu drawer.
    pub me_handle: String,

    /// Per-screen list selection, keyed by the screen's mount key so every
    /// mounted screen keeps its own cursor across tab switches and back
    /// navigation.
    selection: HashMap<String, usize>,

    /// Transient status bar message with its display deadline.
    status_message: Option<(String, Instant)>,

    pub show_help: bool,
    pub should_quit: bool,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        let theme = Theme::by_name(&config.theme)
            .or_else(|| Theme::from_toml_file(&crate::constants::custom_theme_path(&config.theme)))
            .unwrap_or_default();
        Self {
            nav: NavigationModel::new(),
            shell: ShellState::new(),
            store: FeedStore::new(&config.did),
            theme,
            me_handle: config.handle.clone(),
            selection: HashMap::new(),
            status_message: None,
            show_help: false,
            should_quit: false,
        }
    }

    // ── Active screen ────────────────────────────────────────────

    /// Matched route of the active tab's current screen.
    pub fn active_route(&self) -> MatchResult {
        match_route(&self.nav.tab().current().url)
    }

    /// Mount key of the active screen, the same key the planner assigns.
    pub fn active_screen_key(&self) -> String {
        let tab = self.nav.tab();
        format!("t{}-s{}", tab.id, tab.index)
    }

    // ── List selection ───────────────────────────────────────────

    /// Selection cursor for the active screen's list, clamped to `len`.
    pub fn selected_index(&self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        self.selection
            .get(&self.active_screen_key())
            .copied()
            .unwrap_or(0)
            .min(len - 1)
    }

    pub fn select_next(&mut self, len: usize) {
        let cur = self.selected_index(len);
        if len > 0 && cur + 1 < len {
            self.selection.insert(self.active_screen_key(), cur + 1);
        }
    }

    pub fn select_prev(&mut self, len: usize) {
        let cur = self.selected_index(len);
        if cur > 0 {
            self.selection.insert(self.active_screen_key(), cur - 1);
        }
    }

    pub fn page_down(&mut self, len: usize) {
        if len > 0 {
            let cur = self.selected_index(len);
            self.selection
                .insert(self.active_screen_key(), (cur + PAGE_SIZE).min(len - 1));
        }
    }

    pub fn page_up(&mut self, len: usize) {
        let cur = self.selected_index(len);
        self.selection
            .insert(self.active_screen_key(), cur.saturating_sub(PAGE_SIZE));
    }

    pub fn select_first(&mut self) {
        self.selection.insert(self.active_screen_key(), 0);
    }

    /// The feed item under the cursor on the active screen, if the active
    /// screen shows the timeline.
    pub fn selected_feed_item(&self) -> Option<&FeedItem> {
        let timeline = self.store.timeline();
        if timeline.is_empty() {
            return None;
        }
        timeline.get(self.selected_index(timeline.len()))
    }

    // ── Status bar ───────────────────────────────────────────────

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some((message.into(), Instant::now()));
    }

    /// Current status message, expiring it after the display timeout.
    pub fn status_message(&mut self) -> Option<&str> {
        if let Some((_, at)) = &self.status_message {
            if at.elapsed().as_secs() >= STATUS_MESSAGE_TIMEOUT_SECS {
                self.status_message = None;
            }
        }
        self.status_message.as_ref().map(|(m, _)| m.as_str())
    }

    // ── Theme ────────────────────────────────────────────────────

    pub fn cycle_theme(&mut self) {
        self.theme = self.theme.next_builtin();
        let name = self.theme.name.clone();
        self.set_status(format!("Theme: {}", name));
    }
}
