//! Screen render planning.
//!
//! Translates a snapshot of the navigation model into the flat, ordered
//! list of screen descriptors the shell renderer needs to keep several
//! screens mounted at once (the current screen, the one behind it for
//! back-transition rendering, and a cached window of each tab's history).
//!
//! This is a pure derivation: no state survives between calls, and
//! re-planning an unchanged model yields a structurally identical plan.

use crate::constants::BACK_RENDER_WINDOW;
use crate::nav::NavigationModel;
use crate::routes::{match_route, MatchResult, ScreenIcon};

/// Per-screen render data for one pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenDesc {
    /// Matched route, icon, and title for the screen URL.
    pub matched: MatchResult,
    /// Stable mount key: `t<tabId>-s<screenIndex>`.
    pub key: String,
    /// `(tab id, screen id)` pair identifying the screen in the model.
    pub nav_idx: (u64, u64),
    /// This is the active screen of the active tab.
    pub current: bool,
    /// The screen one position ahead in this tab's stack is the active
    /// one; this screen is what a back transition would reveal.
    pub previous: bool,
    /// Propagated from the owning tab.
    pub is_new_tab: bool,
}

/// The flattened plan for one render pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderPlan {
    /// Icon of the active screen's matched route. `None` only for a
    /// degenerate model in which no screen is current.
    pub icon: Option<ScreenIcon>,
    /// True when any tab is freshly opened and still flagged.
    pub has_new_tab: bool,
    /// Descriptors concatenated tab-by-tab in tab order; within a tab,
    /// the bounded back window followed by the current screen.
    pub screens: Vec<ScreenDesc>,
}

/// Produce the render plan for the current navigation state.
pub fn plan_screens(nav: &NavigationModel) -> RenderPlan {
    let mut icon = None;
    let mut has_new_tab = false;
    let mut screens = Vec::new();

    for tab in nav.tabs() {
        has_new_tab = has_new_tab || tab.is_new_tab;

        let window = tab.back_list(BACK_RENDER_WINDOW);
        for screen in window.iter().chain(std::iter::once(tab.current())) {
            let current = nav.is_current_screen(tab.id, screen.index);
            let previous = nav.is_current_screen(tab.id, screen.index + 1);
            let matched = match_route(&screen.url);
            if current {
                icon = Some(matched.icon);
            }
            screens.push(ScreenDesc {
                matched,
                key: format!("t{}-s{}", tab.id, screen.index),
                nav_idx: (tab.id, screen.id),
                current,
                previous,
                is_new_tab: tab.is_new_tab,
            });
        }
    }

    RenderPlan {
        icon,
        has_new_tab,
        screens,
    }
}
