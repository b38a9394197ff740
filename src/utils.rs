//! Shared utility functions used across modules.

use chrono::{DateTime, Utc};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Truncate a string to `max_len` characters, appending "..." if truncated.
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len > 3 {
        let cut: String = s.chars().take(max_len - 3).collect();
        format!("{}...", cut)
    } else {
        s.chars().take(max_len).collect()
    }
}

/// Truncate a string to at most `max_width` terminal cells, appending
/// "..." if cut. Wide glyphs count as two cells.
pub fn truncate_to_width(s: &str, max_width: usize) -> String {
    if UnicodeWidthStr::width(s) <= max_width {
        return s.to_string();
    }
    let budget = max_width.saturating_sub(3);
    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = UnicodeWidthChar::width(c).unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(c);
    }
    out.push_str("...");
    out
}

/// Compact relative timestamp for post metadata ("now", "5m", "3h", "2d").
///
/// Falls back to "Mon DD" beyond a week, matching what a feed column
/// has room for.
pub fn time_ago(when: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let secs = (now - when).num_seconds();
    if secs < 60 {
        "now".to_string()
    } else if secs < 3600 {
        format!("{}m", secs / 60)
    } else if secs < 86_400 {
        format!("{}h", secs / 3600)
    } else if secs < 7 * 86_400 {
        format!("{}d", secs / 86_400)
    } else {
        when.format("%b %-d").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    // ── truncate_str ──────────────────────────────────────────────

    #[test]
    fn truncate_str_short_string_unchanged() {
        assert_eq!(truncate_str("hello", 10), "hello");
    }

    #[test]
    fn truncate_str_exact_length() {
        assert_eq!(truncate_str("hello", 5), "hello");
    }

    #[test]
    fn truncate_str_needs_truncation() {
        assert_eq!(truncate_str("hello world", 8), "hello...");
    }

    #[test]
    fn truncate_str_max_len_3_or_less() {
        // When max_len <= 3, no room for "...", just hard-cut
        assert_eq!(truncate_str("abcdef", 3), "abc");
        assert_eq!(truncate_str("abcdef", 1), "a");
    }

    #[test]
    fn truncate_str_multibyte_safe() {
        // Counts chars, not bytes -- must not split a codepoint
        assert_eq!(truncate_str("héllo wörld", 8), "héllo...");
    }

    // ── truncate_to_width ─────────────────────────────────────────

    #[test]
    fn truncate_to_width_fits() {
        assert_eq!(truncate_to_width("hello", 10), "hello");
    }

    #[test]
    fn truncate_to_width_cuts_by_cells() {
        assert_eq!(truncate_to_width("hello world", 8), "hello...");
    }

    #[test]
    fn truncate_to_width_counts_wide_glyphs_double() {
        // Each CJK char is two cells; budget of 7 leaves 4 cells = 2 chars
        assert_eq!(truncate_to_width("ありがとう", 7), "あり...");
    }

    // ── time_ago ──────────────────────────────────────────────────

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    #[test]
    fn time_ago_just_now() {
        assert_eq!(time_ago(at(1_000_000), at(1_000_030)), "now");
    }

    #[test]
    fn time_ago_minutes() {
        assert_eq!(time_ago(at(1_000_000), at(1_000_000 + 5 * 60)), "5m");
    }

    #[test]
    fn time_ago_hours() {
        assert_eq!(time_ago(at(1_000_000), at(1_000_000 + 3 * 3600)), "3h");
    }

    #[test]
    fn time_ago_days() {
        assert_eq!(time_ago(at(1_000_000), at(1_000_000 + 2 * 86_400)), "2d");
    }

    #[test]
    fn time_ago_beyond_a_week_shows_date() {
        let when = Utc.with_ymd_and_hms(2023, 1, 5, 12, 0, 0).unwrap();
        let now = Utc.with_ymd_and_hms(2023, 2, 1, 12, 0, 0).unwrap();
        assert_eq!(time_ago(when, now), "Jan 5");
    }
}
