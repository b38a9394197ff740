//! Multi-tab navigation model.
//!
//! Each tab is an independent history lane: an ordered back-stack of
//! screens plus a cursor at the current one. The model is plain state --
//! the render loop re-derives everything it needs from a snapshot of this
//! struct after each mutation, so there is no subscription machinery.

use crate::constants::MAX_TABS;

/// One navigable location within a tab's history.
///
/// Immutable once created; navigation supersedes screens rather than
/// mutating them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Screen {
    /// Model-wide monotonic id, never reused within a session.
    pub id: u64,
    /// Position within the owning tab's back-stack.
    pub index: usize,
    pub url: String,
}

/// Role of a pinned tab: it resets to its root rather than closing or
/// navigating away.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixedTabPurpose {
    Home,
    Notifications,
}

impl FixedTabPurpose {
    /// Root URL the tab resets to.
    pub fn root_url(&self) -> &'static str {
        match self {
            FixedTabPurpose::Home => "/",
            FixedTabPurpose::Notifications => "/notifications",
        }
    }
}

/// An independent navigation history lane.
#[derive(Debug, Clone)]
pub struct Tab {
    pub id: u64,
    history: Vec<Screen>,
    /// Cursor into `history`; the screen here is the tab's current one.
    pub index: usize,
    pub is_new_tab: bool,
    pub fixed_tab_purpose: Option<FixedTabPurpose>,
}

impl Tab {
    fn new(id: u64, screen_id: u64, url: &str, purpose: Option<FixedTabPurpose>) -> Self {
        Self {
            id,
            history: vec![Screen {
                id: screen_id,
                index: 0,
                url: url.to_string(),
            }],
            index: 0,
            is_new_tab: false,
            fixed_tab_purpose: purpose,
        }
    }

    /// The tab's current screen. The history is never empty.
    pub fn current(&self) -> &Screen {
        &self.history[self.index]
    }

    pub fn can_go_back(&self) -> bool {
        self.index > 0
    }

    pub fn can_go_forward(&self) -> bool {
        self.index + 1 < self.history.len()
    }

    /// Up to `n` screens immediately behind the current one, in stack
    /// order (oldest of the window first).
    pub fn back_list(&self, n: usize) -> &[Screen] {
        let start = self.index.saturating_sub(n);
        &self.history[start..self.index]
    }

    /// Push a new screen, discarding any forward history.
    fn navigate_to(&mut self, screen_id: u64, url: &str) {
        self.history.truncate(self.index + 1);
        self.history.push(Screen {
            id: screen_id,
            index: self.history.len(),
            url: url.to_string(),
        });
        self.index += 1;
    }

    fn go_back(&mut self) -> bool {
        if self.can_go_back() {
            self.index -= 1;
            true
        } else {
            false
        }
    }

    fn go_forward(&mut self) -> bool {
        if self.can_go_forward() {
            self.index += 1;
            true
        } else {
            false
        }
    }

    pub fn set_is_new_tab(&mut self, v: bool) {
        self.is_new_tab = v;
    }
}

/// The set of open tabs plus which one is active.
#[derive(Debug, Clone)]
pub struct NavigationModel {
    tabs: Vec<Tab>,
    /// Position of the active tab in `tabs`.
    active: usize,
    next_tab_id: u64,
    next_screen_id: u64,
}

impl NavigationModel {
    /// Two pinned lanes: Home at "/" and Notifications.
    pub fn new() -> Self {
        let mut model = Self {
            tabs: Vec::new(),
            active: 0,
            next_tab_id: 0,
            next_screen_id: 0,
        };
        model.push_fixed_tab(FixedTabPurpose::Home);
        model.push_fixed_tab(FixedTabPurpose::Notifications);
        model.active = 0;
        model
    }

    fn push_fixed_tab(&mut self, purpose: FixedTabPurpose) {
        let tab_id = self.alloc_tab_id();
        let screen_id = self.alloc_screen_id();
        self.tabs
            .push(Tab::new(tab_id, screen_id, purpose.root_url(), Some(purpose)));
    }

    fn alloc_tab_id(&mut self) -> u64 {
        let id = self.next_tab_id;
        self.next_tab_id += 1;
        id
    }

    fn alloc_screen_id(&mut self) -> u64 {
        let id = self.next_screen_id;
        self.next_screen_id += 1;
        id
    }

    // ── Accessors ─────────────────────────────────────────────────

    pub fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    pub fn tab_count(&self) -> usize {
        self.tabs.len()
    }

    /// The active tab.
    pub fn tab(&self) -> &Tab {
        &self.tabs[self.active]
    }

    pub fn tab_mut(&mut self) -> &mut Tab {
        &mut self.tabs[self.active]
    }

    /// Whether `(tab_id, index)` names the active screen of the active tab.
    ///
    /// Screens of inactive tabs are never current, whatever their index.
    pub fn is_current_screen(&self, tab_id: u64, index: usize) -> bool {
        let tab = self.tab();
        tab.id == tab_id && tab.index == index
    }

    pub fn has_new_tab(&self) -> bool {
        self.tabs.iter().any(|t| t.is_new_tab)
    }

    // ── Tab management ────────────────────────────────────────────

    /// Open a new tab at `url` and activate it. Returns false when the
    /// tab limit is reached.
    pub fn new_tab(&mut self, url: &str) -> bool {
        if self.tabs.len() >= MAX_TABS {
            return false;
        }
        let tab_id = self.alloc_tab_id();
        let screen_id = self.alloc_screen_id();
        let mut tab = Tab::new(tab_id, screen_id, url, None);
        tab.is_new_tab = true;
        self.tabs.push(tab);
        self.active = self.tabs.len() - 1;
        true
    }

    /// Activate the tab at ordinal position `ordinal` (clamped).
    pub fn switch_to(&mut self, ordinal: usize) {
        self.active = ordinal.min(self.tabs.len() - 1);
    }

    /// Activate the tab with id `tab_id`, if it exists.
    pub fn switch_to_tab(&mut self, tab_id: u64) -> bool {
        match self.tabs.iter().position(|t| t.id == tab_id) {
            Some(pos) => {
                self.active = pos;
                true
            }
            None => false,
        }
    }

    /// Close the tab with id `tab_id`.
    ///
    /// Fixed-purpose tabs reset to their root instead of closing, so the
    /// pinned lanes (and therefore at least one tab) always survive.
    pub fn close_tab(&mut self, tab_id: u64) {
        let Some(pos) = self.tabs.iter().position(|t| t.id == tab_id) else {
            return;
        };
        if self.tabs[pos].fixed_tab_purpose.is_some() {
            let screen_id = self.alloc_screen_id();
            let tab = &mut self.tabs[pos];
            let root = tab
                .fixed_tab_purpose
                .map(|p| p.root_url())
                .unwrap_or("/");
            tab.navigate_to(screen_id, root);
            return;
        }
        self.tabs.remove(pos);
        if self.active >= self.tabs.len() {
            self.active = self.tabs.len() - 1;
        } else if self.active > pos {
            self.active -= 1;
        }
    }

    // ── Navigation within the active tab ──────────────────────────

    pub fn navigate_to(&mut self, url: &str) {
        let screen_id = self.alloc_screen_id();
        self.tab_mut().navigate_to(screen_id, url);
    }

    pub fn go_back(&mut self) -> bool {
        self.tab_mut().go_back()
    }

    pub fn go_forward(&mut self) -> bool {
        self.tab_mut().go_forward()
    }

    /// Clear the fresh-tab flag everywhere once the highlight has run out.
    pub fn clear_new_tab_flags(&mut self) {
        for tab in &mut self.tabs {
            tab.is_new_tab = false;
        }
    }

    /// Reset a fixed-purpose tab back to its root URL. No-op on free tabs.
    pub fn fixed_tab_reset(&mut self) {
        if let Some(purpose) = self.tab().fixed_tab_purpose {
            let screen_id = self.alloc_screen_id();
            self.tab_mut().navigate_to(screen_id, purpose.root_url());
        }
    }
}

impl Default for NavigationModel {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
impl NavigationModel {
    /// Model whose screen indices can never equal any tab cursor, so no
    /// screen satisfies `is_current_screen`. Unreachable through normal
    /// navigation; lets tests exercise the no-current-screen branch of
    /// consumers.
    pub(crate) fn with_desynced_indices() -> Self {
        let mut model = Self::new();
        for tab in &mut model.tabs {
            for screen in &mut tab.history {
                screen.index += 1;
            }
        }
        model
    }
}
