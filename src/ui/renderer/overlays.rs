//! Popup overlays: menu drawer, tabs selector, composer, help.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use crate::constants::{
    COMPOSER_POPUP_HEIGHT, COMPOSER_POPUP_WIDTH, HELP_POPUP_HEIGHT, HELP_POPUP_WIDTH,
    MAX_POST_LEN, TABS_POPUP_WIDTH,
};
use crate::routes::match_route;
use crate::ui::state::AppState;
use crate::utils::truncate_to_width;

use super::helpers::centered_rect;

/// Left-hand menu drawer: identity plus the main destinations.
pub fn render_menu(frame: &mut Frame, area: Rect, state: &AppState) {
    let t = &state.theme;
    let width = 28.min(area.width);
    let drawer = Rect {
        x: area.x,
        y: area.y,
        width,
        height: area.height.saturating_sub(1),
    };
    frame.render_widget(Clear, drawer);

    let block = Block::default()
        .title(Span::styled(" Menu ", t.header_style()))
        .borders(Borders::ALL)
        .border_style(t.border_highlight_style());
    let inner = block.inner(drawer);
    frame.render_widget(block, drawer);

    let lines = vec![
        Line::from(Span::styled(
            format!("@{}", state.me_handle),
            Style::default()
                .fg(t.text_primary)
                .add_modifier(Modifier::BOLD),
        )),
        Line::raw(""),
        menu_entry("h", "Home", t),
        menu_entry("s", "Search", t),
        menu_entry("b", "Notifications", t),
        menu_entry("p", "My profile", t),
        menu_entry("S", "Settings", t),
        Line::raw(""),
        Line::from(Span::styled(
            "Esc closes the menu",
            Style::default().fg(t.text_muted),
        )),
    ];
    frame.render_widget(Paragraph::new(lines), inner);
}

fn menu_entry<'a>(key: &str, label: &str, t: &crate::ui::theme::Theme) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!(" {} ", key), Style::default().fg(t.accent)),
        Span::styled(label.to_string(), Style::default().fg(t.text_primary)),
    ])
}

/// Tab switcher: one row per open tab with its current screen title.
pub fn render_tabs_selector(frame: &mut Frame, area: Rect, state: &AppState) {
    let t = &state.theme;
    let tabs = state.nav.tabs();
    let height = (tabs.len() as u16 + 2).min(area.height.saturating_sub(2));
    let popup = centered_rect(TABS_POPUP_WIDTH.min(area.width), height, area);
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .title(Span::styled(" Tabs ", t.header_style()))
        .borders(Borders::ALL)
        .border_style(t.border_highlight_style());
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    let active_id = state.nav.tab().id;
    let items: Vec<ListItem> = tabs
        .iter()
        .map(|tab| {
            let matched = match_route(&tab.current().url);
            let mut spans = vec![Span::styled(
                format!("{} ", matched.icon.glyph()),
                Style::default().fg(t.accent),
            )];
            spans.push(Span::styled(
                truncate_to_width(&matched.title, inner.width.saturating_sub(12) as usize),
                Style::default().fg(t.text_primary),
            ));
            if tab.id == active_id {
                spans.push(Span::styled(" (active)", Style::default().fg(t.text_dim)));
            }
            if tab.is_new_tab {
                spans.push(Span::styled(" new", Style::default().fg(t.success)));
            }
            if tab.fixed_tab_purpose.is_some() {
                spans.push(Span::styled(" pinned", Style::default().fg(t.text_muted)));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    let mut list_state = ListState::default();
    list_state.select(Some(state.shell.tabs_selector_index.min(tabs.len().saturating_sub(1))));
    let list = List::new(items)
        .highlight_style(t.row_selected())
        .highlight_symbol("▌ ");
    frame.render_stateful_widget(list, inner, &mut list_state);
}

/// Post composer, optionally showing reply context.
pub fn render_composer(frame: &mut Frame, area: Rect, state: &AppState) {
    let t = &state.theme;
    let shell = &state.shell;
    let popup = centered_rect(
        COMPOSER_POPUP_WIDTH.min(area.width),
        COMPOSER_POPUP_HEIGHT.min(area.height),
        area,
    );
    frame.render_widget(Clear, popup);

    let title = if shell.composer_reply_to.is_some() {
        " Reply "
    } else {
        " New Post "
    };
    let block = Block::default()
        .title(Span::styled(title, t.header_style()))
        .borders(Borders::ALL)
        .border_style(t.border_highlight_style());
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    let width = inner.width.saturating_sub(2) as usize;
    let mut lines = Vec::new();

    if let Some(reply) = &shell.composer_reply_to {
        let who = reply.display_name.as_deref().unwrap_or(&reply.handle);
        lines.push(Line::from(vec![
            Span::styled("↳ replying to ", Style::default().fg(t.text_dim)),
            Span::styled(who.to_string(), Style::default().fg(t.text_primary)),
        ]));
        lines.push(Line::from(Span::styled(
            truncate_to_width(&reply.text, width),
            Style::default().fg(t.text_muted),
        )));
        lines.push(Line::raw(""));
    }

    // Draft with a block cursor at the insertion point
    let (before, after) = shell.composer_text.split_at(shell.composer_cursor);
    lines.push(Line::from(vec![
        Span::styled(before.to_string(), Style::default().fg(t.text_primary)),
        Span::styled("█", Style::default().fg(t.accent)),
        Span::styled(after.to_string(), Style::default().fg(t.text_primary)),
    ]));
    lines.push(Line::raw(""));

    let used = shell.composer_text.chars().count();
    let count_style = if used >= MAX_POST_LEN {
        Style::default().fg(t.danger)
    } else {
        Style::default().fg(t.text_dim)
    };
    lines.push(Line::from(vec![
        Span::styled(format!("{}/{}", used, MAX_POST_LEN), count_style),
        Span::styled("   Enter sends, Esc discards", Style::default().fg(t.text_muted)),
    ]));

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}

pub fn render_help_overlay(frame: &mut Frame, area: Rect, state: &AppState) {
    let t = &state.theme;
    let popup = centered_rect(
        HELP_POPUP_WIDTH.min(area.width),
        HELP_POPUP_HEIGHT.min(area.height),
        area,
    );
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .title(Span::styled(" Help ", t.header_style()))
        .borders(Borders::ALL)
        .border_style(t.border_highlight_style());
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    let binds: &[(&str, &str)] = &[
        ("j / k", "move selection"),
        ("PgDn / PgUp", "page through the feed"),
        ("g", "jump to top"),
        ("Enter", "open thread"),
        ("o", "open author profile"),
        ("l", "upvote / remove upvote"),
        ("r", "repost / remove repost"),
        ("a", "reply to selection"),
        ("n", "new post"),
        ("d", "delete own post"),
        ("h", "home (resets the home tab)"),
        ("b", "notifications"),
        ("s", "search"),
        ("Backspace", "back"),
        ("f", "forward"),
        ("t", "new tab from selection"),
        ("Tab", "tabs selector"),
        ("x", "close tab"),
        ("m", "menu drawer"),
        ("T", "cycle theme"),
        ("R", "refresh now"),
        ("?", "this help"),
        ("q", "quit"),
    ];
    let lines: Vec<Line> = binds
        .iter()
        .map(|(key, action)| {
            Line::from(vec![
                Span::styled(format!(" {:<12}", key), Style::default().fg(t.accent)),
                Span::styled((*action).to_string(), Style::default().fg(t.text_primary)),
            ])
        })
        .collect();
    frame.render_widget(Paragraph::new(lines), inner);
}
