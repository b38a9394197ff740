use ratatui::style::{Color, Modifier, Style};
use serde::Deserialize;

/// All available built-in theme names.
pub const BUILTIN_THEME_NAMES: &[&str] = &["default", "gruvbox", "nord", "dracula"];

/// Data-driven theme: every color in one struct.
/// Constructed from built-in presets or loaded from TOML files.
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,

    // ── Brand / Primary ──────────────────────────────────────
    pub accent: Color,
    pub bg_dark: Color,
    pub bg_panel: Color,

    // ── Text ─────────────────────────────────────────────────
    pub text_primary: Color,
    pub text_dim: Color,
    pub text_muted: Color,

    // ── Semantic ─────────────────────────────────────────────
    pub success: Color,
    pub warning: Color,
    pub danger: Color,
    pub info: Color,

    // ── Post controls ────────────────────────────────────────
    pub like: Color,
    pub repost: Color,

    // ── Chrome ───────────────────────────────────────────────
    pub border: Color,
    pub row_selected_bg: Color,
}

impl Theme {
    // ── Constructors ─────────────────────────────────────────

    /// Default dark theme.
    pub fn default_dark() -> Self {
        Self {
            name: "default".to_string(),
            accent: Color::Rgb(0, 133, 255),
            bg_dark: Color::Rgb(22, 22, 30),
            bg_panel: Color::Rgb(30, 30, 42),
            text_primary: Color::Rgb(220, 220, 235),
            text_dim: Color::Rgb(120, 120, 145),
            text_muted: Color::Rgb(80, 80, 100),
            success: Color::Rgb(72, 199, 142),
            warning: Color::Rgb(255, 193, 69),
            danger: Color::Rgb(255, 85, 85),
            info: Color::Rgb(99, 179, 237),
            like: Color::Rgb(236, 72, 153),
            repost: Color::Rgb(72, 199, 142),
            border: Color::Rgb(55, 55, 75),
            row_selected_bg: Color::Rgb(40, 40, 60),
        }
    }

    /// Gruvbox dark palette.
    pub fn gruvbox() -> Self {
        Self {
            name: "gruvbox".to_string(),
            accent: Color::Rgb(215, 153, 33),        // yellow
            bg_dark: Color::Rgb(40, 40, 40),         // bg0
            bg_panel: Color::Rgb(50, 48, 47),        // bg0_s
            text_primary: Color::Rgb(235, 219, 178), // fg
            text_dim: Color::Rgb(168, 153, 132),     // fg4
            text_muted: Color::Rgb(102, 92, 84),     // bg4
            success: Color::Rgb(142, 192, 124),      // green
            warning: Color::Rgb(250, 189, 47),       // yellow bright
            danger: Color::Rgb(251, 73, 52),         // red
            info: Color::Rgb(131, 165, 152),         // blue
            like: Color::Rgb(211, 134, 155),         // purple
            repost: Color::Rgb(142, 192, 124),
            border: Color::Rgb(80, 73, 69),
            row_selected_bg: Color::Rgb(60, 56, 54),
        }
    }

    /// Nord palette.
    pub fn nord() -> Self {
        Self {
            name: "nord".to_string(),
            accent: Color::Rgb(136, 192, 208),       // nord8 frost
            bg_dark: Color::Rgb(46, 52, 64),         // nord0
            bg_panel: Color::Rgb(59, 66, 82),        // nord1
            text_primary: Color::Rgb(229, 233, 240), // nord5
            text_dim: Color::Rgb(182, 191, 204),
            text_muted: Color::Rgb(107, 112, 127),
            success: Color::Rgb(163, 190, 140), // nord14 green
            warning: Color::Rgb(235, 203, 139), // nord13 yellow
            danger: Color::Rgb(191, 97, 106),   // nord11 red
            info: Color::Rgb(129, 161, 193),    // nord9
            like: Color::Rgb(180, 142, 173),    // nord15 purple
            repost: Color::Rgb(163, 190, 140),
            border: Color::Rgb(76, 86, 106), // nord3
            row_selected_bg: Color::Rgb(67, 76, 94),
        }
    }

    /// Dracula palette.
    pub fn dracula() -> Self {
        Self {
            name: "dracula".to_string(),
            accent: Color::Rgb(139, 233, 253),       // cyan
            bg_dark: Color::Rgb(40, 42, 54),         // background
            bg_panel: Color::Rgb(48, 51, 65),        // current line
            text_primary: Color::Rgb(248, 248, 242), // foreground
            text_dim: Color::Rgb(188, 188, 172),
            text_muted: Color::Rgb(98, 114, 164), // comment
            success: Color::Rgb(80, 250, 123),    // green
            warning: Color::Rgb(241, 250, 140),   // yellow
            danger: Color::Rgb(255, 85, 85),      // red
            info: Color::Rgb(139, 233, 253),      // cyan
            like: Color::Rgb(255, 121, 198),      // pink
            repost: Color::Rgb(80, 250, 123),
            border: Color::Rgb(98, 114, 164),
            row_selected_bg: Color::Rgb(68, 71, 90),
        }
    }

    /// Look up a built-in theme by name (case-insensitive).
    pub fn by_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "default" => Some(Self::default_dark()),
            "gruvbox" => Some(Self::gruvbox()),
            "nord" => Some(Self::nord()),
            "dracula" => Some(Self::dracula()),
            _ => None,
        }
    }

    /// Cycle to the next built-in theme.
    pub fn next_builtin(&self) -> Self {
        let idx = BUILTIN_THEME_NAMES
            .iter()
            .position(|&n| n == self.name)
            .unwrap_or(0);
        let next_idx = (idx + 1) % BUILTIN_THEME_NAMES.len();
        Self::by_name(BUILTIN_THEME_NAMES[next_idx]).unwrap()
    }

    /// Load a custom theme from a TOML file, falling back to default for
    /// missing fields.
    pub fn from_toml_file(path: &std::path::Path) -> Option<Self> {
        let content = std::fs::read_to_string(path).ok()?;
        let file: ThemeFile = toml::from_str(&content).ok()?;
        Some(
            file.into_theme(
                path.file_stem()
                    .and_then(|s| s.to_str())
                    .unwrap_or("custom"),
            ),
        )
    }

    // ── Computed Styles ──────────────────────────────────────

    pub fn header_style(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .add_modifier(Modifier::BOLD)
    }

    pub fn button_active_style(&self) -> Style {
        Style::default()
            .fg(self.bg_dark)
            .bg(self.accent)
            .add_modifier(Modifier::BOLD)
    }

    pub fn button_inactive_style(&self) -> Style {
        Style::default().fg(self.text_dim)
    }

    pub fn row_normal(&self) -> Style {
        Style::default().fg(self.text_primary)
    }

    pub fn row_selected(&self) -> Style {
        Style::default()
            .fg(self.text_primary)
            .bg(self.row_selected_bg)
            .add_modifier(Modifier::BOLD)
    }

    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border)
    }

    pub fn border_highlight_style(&self) -> Style {
        Style::default().fg(self.accent)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::default_dark()
    }
}

// ── TOML deserialization for custom themes ──────────────────

/// Intermediate struct for parsing theme TOML files.
/// All fields are optional — missing fields inherit from the default theme.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ThemeFile {
    accent: Option<String>,
    bg_dark: Option<String>,
    bg_panel: Option<String>,
    text_primary: Option<String>,
    text_dim: Option<String>,
    text_muted: Option<String>,
    success: Option<String>,
    warning: Option<String>,
    danger: Option<String>,
    info: Option<String>,
    like: Option<String>,
    repost: Option<String>,
    border: Option<String>,
    row_selected_bg: Option<String>,
}

impl ThemeFile {
    fn into_theme(self, name: &str) -> Theme {
        let base = Theme::default_dark();
        Theme {
            name: name.to_string(),
            accent: parse_color(&self.accent).unwrap_or(base.accent),
            bg_dark: parse_color(&self.bg_dark).unwrap_or(base.bg_dark),
            bg_panel: parse_color(&self.bg_panel).unwrap_or(base.bg_panel),
            text_primary: parse_color(&self.text_primary).unwrap_or(base.text_primary),
            text_dim: parse_color(&self.text_dim).unwrap_or(base.text_dim),
            text_muted: parse_color(&self.text_muted).unwrap_or(base.text_muted),
            success: parse_color(&self.success).unwrap_or(base.success),
            warning: parse_color(&self.warning).unwrap_or(base.warning),
            danger: parse_color(&self.danger).unwrap_or(base.danger),
            info: parse_color(&self.info).unwrap_or(base.info),
            like: parse_color(&self.like).unwrap_or(base.like),
            repost: parse_color(&self.repost).unwrap_or(base.repost),
            border: parse_color(&self.border).unwrap_or(base.border),
            row_selected_bg: parse_color(&self.row_selected_bg).unwrap_or(base.row_selected_bg),
        }
    }
}

/// Parse a hex color string like "#FF8800" or "FF8800" into a ratatui Color.
fn parse_color(opt: &Option<String>) -> Option<Color> {
    let s = opt.as_ref()?;
    let hex = s.trim_start_matches('#');
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    // ── parse_color ───────────────────────────────────────────────

    #[test]
    fn parse_color_with_hash() {
        let c = parse_color(&Some("#FF8800".to_string()));
        assert_eq!(c, Some(Color::Rgb(255, 136, 0)));
    }

    #[test]
    fn parse_color_without_hash() {
        let c = parse_color(&Some("ff8800".to_string()));
        assert_eq!(c, Some(Color::Rgb(255, 136, 0)));
    }

    #[test]
    fn parse_color_none() {
        assert_eq!(parse_color(&None), None);
    }

    #[test]
    fn parse_color_invalid() {
        assert_eq!(parse_color(&Some("#FFF".to_string())), None);
        assert_eq!(parse_color(&Some("#GGHHII".to_string())), None);
    }

    // ── by_name ───────────────────────────────────────────────────

    #[test]
    fn by_name_all_builtins() {
        for &name in BUILTIN_THEME_NAMES {
            let theme = Theme::by_name(name);
            assert!(theme.is_some(), "Theme '{}' should exist", name);
            assert_eq!(theme.unwrap().name, name);
        }
    }

    #[test]
    fn by_name_case_insensitive() {
        assert!(Theme::by_name("NORD").is_some());
        assert!(Theme::by_name("Dracula").is_some());
    }

    #[test]
    fn by_name_unknown() {
        assert!(Theme::by_name("nonexistent").is_none());
        assert!(Theme::by_name("").is_none());
    }

    // ── next_builtin ──────────────────────────────────────────────

    #[test]
    fn next_builtin_visits_all_and_wraps() {
        let mut theme = Theme::default_dark();
        let mut names = vec![theme.name.clone()];
        for _ in 0..BUILTIN_THEME_NAMES.len() {
            theme = theme.next_builtin();
            names.push(theme.name.clone());
        }
        for &expected in BUILTIN_THEME_NAMES {
            assert!(names.contains(&expected.to_string()));
        }
        assert_eq!(theme.name, "default");
    }

    // ── TOML themes ───────────────────────────────────────────────

    #[test]
    fn toml_theme_overrides_named_fields_only() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        writeln!(file, "accent = \"#FF0000\"\nlike = \"#00FF00\"").unwrap();
        let theme = Theme::from_toml_file(file.path()).unwrap();
        assert_eq!(theme.accent, Color::Rgb(255, 0, 0));
        assert_eq!(theme.like, Color::Rgb(0, 255, 0));
        assert_eq!(theme.border, Theme::default_dark().border);
    }

    #[test]
    fn toml_theme_missing_file_is_none() {
        assert!(Theme::from_toml_file(std::path::Path::new("/no/such/theme.toml")).is_none());
    }
}
