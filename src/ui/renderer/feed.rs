//! Timeline list rendering, shared by the home feed and profile screens.

use chrono::Utc;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::models::{FeedItem, FeedReason};
use crate::ui::state::AppState;
use crate::utils::time_ago;

use super::helpers::render_scrollbar_bordered;

/// Render a list of feed items with the active screen's cursor.
pub fn render_feed_list(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    items: &[FeedItem],
    title: &str,
    dimmed: bool,
) {
    let t = &state.theme;
    let border_style = if dimmed {
        Style::default().fg(t.text_muted)
    } else {
        t.border_style()
    };
    let block = Block::default()
        .title(Span::styled(format!(" {} ", title), t.header_style()))
        .borders(Borders::ALL)
        .border_style(border_style);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if items.is_empty() {
        let message = if state.store.is_loading {
            "Loading..."
        } else {
            "Nothing here yet"
        };
        let empty = Paragraph::new(Line::from(Span::styled(
            message,
            Style::default().fg(t.text_dim),
        )));
        frame.render_widget(empty, inner);
        return;
    }

    let width = inner.width.saturating_sub(2) as usize;
    let list_items: Vec<ListItem> = items
        .iter()
        .map(|item| ListItem::new(feed_item_lines(item, state, width)))
        .collect();

    let selected = state.selected_index(items.len());
    let mut list_state = ListState::default();
    list_state.select(Some(selected));

    let list = List::new(list_items)
        .style(t.row_normal())
        .highlight_style(t.row_selected())
        .highlight_symbol("▌ ");
    frame.render_stateful_widget(list, inner, &mut list_state);
    render_scrollbar_bordered(frame, area, items.len(), selected);
}

/// The lines one feed item occupies in the list.
fn feed_item_lines<'a>(item: &'a FeedItem, state: &AppState, width: usize) -> Vec<Line<'a>> {
    let t = &state.theme;
    let mut lines = Vec::new();

    if let Some(FeedReason::Repost { by }) = &item.reason {
        lines.push(Line::from(Span::styled(
            format!("↻ Reposted by {}", by.name()),
            Style::default().fg(t.text_dim),
        )));
    }

    // Author line: name, handle, relative timestamp
    let mut header = vec![
        Span::styled(
            item.post.author.name().to_string(),
            Style::default()
                .fg(t.text_primary)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" @{}", item.post.author.handle),
            Style::default().fg(t.text_dim),
        ),
        Span::styled(
            format!(" · {}", time_ago(item.post.indexed_at, Utc::now())),
            Style::default().fg(t.text_muted),
        ),
    ];
    if item.post.author.muted {
        header.push(Span::styled(" [muted]", Style::default().fg(t.warning)));
    }
    lines.push(Line::from(header));

    if let Some(did) = item.reply_author_did() {
        lines.push(Line::from(Span::styled(
            format!("↳ replying to {}", did),
            Style::default().fg(t.text_dim),
        )));
    }

    if item.post.author.muted {
        lines.push(Line::from(Span::styled(
            "Post by a muted account",
            Style::default().fg(t.text_muted),
        )));
    } else {
        for wrapped in textwrap::wrap(&item.post.record.text, width.max(10)) {
            lines.push(Line::from(Span::styled(
                wrapped.to_string(),
                Style::default().fg(t.text_primary),
            )));
        }
    }

    lines.push(counts_line(item, state));
    lines.push(Line::raw(""));
    lines
}

/// Reply / repost / upvote counts with viewer-state highlighting.
fn counts_line<'a>(item: &FeedItem, state: &AppState) -> Line<'a> {
    let t = &state.theme;
    let repost_style = if item.is_reposted() {
        Style::default().fg(t.repost).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(t.text_dim)
    };
    let upvote_style = if item.is_upvoted() {
        Style::default().fg(t.like).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(t.text_dim)
    };
    Line::from(vec![
        Span::styled(
            format!("✎ {}", item.post.reply_count),
            Style::default().fg(t.text_dim),
        ),
        Span::raw("   "),
        Span::styled(format!("↻ {}", item.post.repost_count), repost_style),
        Span::raw("   "),
        Span::styled(format!("♥ {}", item.post.upvote_count), upvote_style),
    ])
}
