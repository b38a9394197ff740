//! Bottom bar: home / search / notifications buttons, tab counter, status.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::routes::ScreenIcon;
use crate::shell::RenderPlan;
use crate::ui::state::AppState;
use crate::utils::truncate_str;

pub fn render_bottom_bar(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    plan: &RenderPlan,
    status: Option<&str>,
) {
    let t = &state.theme;
    let mut spans = Vec::new();

    // The active screen's icon decides which button lights up.
    let active = plan.icon;
    spans.push(button("⌂ Home", active == Some(ScreenIcon::Home), state));
    spans.push(Span::raw(" "));
    spans.push(button(
        "⌕ Search",
        active == Some(ScreenIcon::MagnifyingGlass),
        state,
    ));
    spans.push(Span::raw(" "));
    let bell_label = if state.store.notification_count > 0 {
        format!("◎ Bell({})", state.store.notification_count)
    } else {
        "◎ Bell".to_string()
    };
    spans.push(button(&bell_label, active == Some(ScreenIcon::Bell), state));
    spans.push(Span::raw("  "));

    // Tab counter flashes while a freshly opened tab is still new.
    let flashing = plan.has_new_tab && state.shell.new_tab_flash > 0;
    let tabs_label = format!("⊞ {} tabs", state.nav.tab_count());
    let tabs_style = if flashing {
        Style::default()
            .fg(t.bg_dark)
            .bg(t.accent)
            .add_modifier(Modifier::BOLD)
    } else if plan.has_new_tab {
        Style::default().fg(t.accent)
    } else {
        Style::default().fg(t.text_dim)
    };
    spans.push(Span::styled(tabs_label, tabs_style));

    spans.push(Span::raw("  "));
    match status {
        Some(message) => spans.push(Span::styled(
            truncate_str(message, area.width.saturating_sub(50) as usize),
            Style::default().fg(t.info),
        )),
        None => spans.push(Span::styled(
            "? help  n post  m menu  q quit",
            Style::default().fg(t.text_muted),
        )),
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn button<'a>(label: &str, active: bool, state: &AppState) -> Span<'a> {
    let t = &state.theme;
    if active {
        Span::styled(format!(" {} ", label), t.button_active_style())
    } else {
        Span::styled(format!(" {} ", label), t.button_inactive_style())
    }
}
