//! Renderer module: split into focused submodules.
//!
//! - `screens`: Per-route screen content (exhaustive over the route enum)
//! - `feed`: Timeline list rendering shared by feed-like screens
//! - `bottom_bar`: Home / search / notifications bar with badges
//! - `overlays`: Popup overlays (menu drawer, tabs selector, composer, help)
//! - `helpers`: Shared rendering utilities

mod bottom_bar;
mod feed;
pub mod helpers;
mod overlays;
mod screens;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

use crate::shell::{plan_screens, RenderPlan, ScreenDesc};

use super::state::AppState;

/// Top-level render function. Derives the screen plan from the navigation
/// model, draws the visible screen, then the bar and any open overlays.
pub fn render(frame: &mut Frame, state: &mut AppState) {
    let size = frame.area();

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(5),    // Screen content
            Constraint::Length(1), // Bottom bar
        ])
        .split(size);

    let mut plan = plan_screens(&state.nav);
    if state.shell.is_menu_active {
        demote_for_menu(&mut plan);
    }

    if let Some(desc) = visible_screen(&plan) {
        let dimmed = !desc.current;
        screens::render_screen(frame, main_chunks[0], state, desc, dimmed);
    }

    let status = state.status_message().map(String::from);
    bottom_bar::render_bottom_bar(frame, main_chunks[1], state, &plan, status.as_deref());

    if state.shell.is_menu_active {
        overlays::render_menu(frame, size, state);
    }

    if state.shell.is_tabs_selector_active {
        overlays::render_tabs_selector(frame, size, state);
    }

    if state.shell.is_composer_active {
        overlays::render_composer(frame, size, state);
    }

    if state.show_help {
        overlays::render_help_overlay(frame, size, state);
    }
}

/// While the menu drawer is open the active screen steps back a layer so
/// the drawer visually takes the "current" slot.
fn demote_for_menu(plan: &mut RenderPlan) {
    for desc in &mut plan.screens {
        if desc.current {
            desc.current = false;
            desc.previous = true;
        } else {
            desc.previous = false;
        }
    }
}

/// Which descriptor to draw: the current screen, or with the menu open,
/// the demoted one showing through behind the drawer.
fn visible_screen(plan: &RenderPlan) -> Option<&ScreenDesc> {
    plan.screens
        .iter()
        .find(|d| d.current)
        .or_else(|| plan.screens.iter().find(|d| d.previous))
}
