//! Theme system for the TUI.
//!
//! Provides semantic color roles that map to ratatui `Style` values.
//! The `ThemeVariant` enum selects between Light and Dark palettes,
//! and `StyleMap` resolves role names to concrete styles.

use ratatui::style::{Color, Modifier, Style};
use std::collections::HashMap;

use crate::chart::{BarColor, Rgba};

// ============================================================================
// Theme Variant
// ============================================================================

/// Available theme variants. Light is used until the user toggles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeVariant {
    #[default]
    Light,
    Dark,
}

impl ThemeVariant {
    /// Parse a variant name from a string (case-insensitive).
    pub fn from_str_name(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dark" => Some(Self::Dark),
            "light" => Some(Self::Light),
            _ => None,
        }
    }

    /// Value written to the preference store.
    pub fn as_pref_value(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }

    /// Build the `ColorPalette` for this variant.
    pub fn palette(self) -> ColorPalette {
        match self {
            Self::Dark => ColorPalette::dark(),
            Self::Light => ColorPalette::light(),
        }
    }

    /// Flip between the two variants.
    pub fn toggled(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    /// Human-readable name for status display.
    pub fn name(self) -> &'static str {
        match self {
            Self::Dark => "Dark",
            Self::Light => "Light",
        }
    }
}

// ============================================================================
// Color Palette: semantic roles to Style
// ============================================================================

/// A complete color palette mapping every semantic UI role to a `Style`.
#[derive(Debug, Clone)]
pub struct ColorPalette {
    // -- Article list --
    pub article_title: Style,
    pub article_selected: Style,
    pub article_link: Style,
    pub article_views: Style,
    pub trend_up: Style,
    pub trend_down: Style,
    pub trend_flat: Style,
    pub tone_action: Style,

    // -- Discussion feed --
    pub post_meta: Style,
    pub post_title: Style,
    pub post_selected: Style,
    pub post_upvotes: Style,
    pub post_body: Style,

    // -- Panel messages --
    pub message_info: Style,
    pub message_error: Style,
    pub message_loading: Style,

    // -- Tone modal --
    pub modal_body: Style,
    pub chart_axis: Style,
    pub chart_value: Style,

    // -- Chrome --
    pub status_bar: Style,
    pub panel_border: Style,
    pub panel_border_focused: Style,
}

impl ColorPalette {
    fn dark() -> Self {
        Self {
            article_title: Style::default().add_modifier(Modifier::BOLD),
            article_selected: Style::default().bg(Color::DarkGray).fg(Color::White),
            article_link: Style::default().fg(Color::Cyan),
            article_views: Style::default().fg(Color::Gray),
            trend_up: Style::default().fg(Color::Green),
            trend_down: Style::default().fg(Color::Red),
            trend_flat: Style::default().fg(Color::DarkGray),
            tone_action: Style::default().fg(Color::Yellow),

            post_meta: Style::default().fg(Color::DarkGray),
            post_title: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            post_selected: Style::default()
                .bg(Color::DarkGray)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            post_upvotes: Style::default().fg(Color::Yellow),
            post_body: Style::default(),

            message_info: Style::default().fg(Color::Gray),
            message_error: Style::default().fg(Color::Red),
            message_loading: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::ITALIC),

            modal_body: Style::default(),
            chart_axis: Style::default().fg(Color::Gray),
            chart_value: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),

            status_bar: Style::default().bg(Color::DarkGray).fg(Color::White),
            panel_border: Style::default(),
            panel_border_focused: Style::default().fg(Color::Cyan),
        }
    }

    fn light() -> Self {
        Self {
            article_title: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            article_selected: Style::default().bg(Color::Blue).fg(Color::White),
            article_link: Style::default().fg(Color::Blue),
            article_views: Style::default().fg(Color::DarkGray),
            trend_up: Style::default().fg(Color::Green),
            trend_down: Style::default().fg(Color::Red),
            trend_flat: Style::default().fg(Color::Gray),
            tone_action: Style::default().fg(Color::Magenta),

            post_meta: Style::default().fg(Color::DarkGray),
            post_title: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            post_selected: Style::default()
                .bg(Color::Blue)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            post_upvotes: Style::default().fg(Color::Magenta),
            post_body: Style::default().fg(Color::Black),

            message_info: Style::default().fg(Color::DarkGray),
            message_error: Style::default().fg(Color::Red),
            message_loading: Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::ITALIC),

            modal_body: Style::default().fg(Color::Black),
            chart_axis: Style::default().fg(Color::DarkGray),
            chart_value: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),

            status_bar: Style::default().bg(Color::White).fg(Color::Black),
            panel_border: Style::default().fg(Color::DarkGray),
            panel_border_focused: Style::default().fg(Color::Blue),
        }
    }
}

/// Terminal color for a chart bar.
///
/// Both variants draw with the chart's own categorical colors; the alpha
/// channel has no terminal equivalent and is dropped.
pub fn bar_color(color: BarColor) -> Color {
    let Rgba { r, g, b, .. } = color.outline();
    Color::Rgb(r, g, b)
}

// ============================================================================
// Style Map: string-keyed lookup
// ============================================================================

/// String-keyed style lookup, built from a `ColorPalette`.
#[derive(Debug, Clone)]
pub struct StyleMap {
    map: HashMap<&'static str, Style>,
}

/// All semantic role names, in declaration order.
const ROLE_NAMES: [&str; 22] = [
    "article_title",
    "article_selected",
    "article_link",
    "article_views",
    "trend_up",
    "trend_down",
    "trend_flat",
    "tone_action",
    "post_meta",
    "post_title",
    "post_selected",
    "post_upvotes",
    "post_body",
    "message_info",
    "message_error",
    "message_loading",
    "modal_body",
    "chart_axis",
    "chart_value",
    "status_bar",
    "panel_border",
    "panel_border_focused",
];

impl StyleMap {
    /// Build a `StyleMap` from a `ColorPalette`.
    pub fn from_palette(p: &ColorPalette) -> Self {
        let styles: [Style; 22] = [
            p.article_title,
            p.article_selected,
            p.article_link,
            p.article_views,
            p.trend_up,
            p.trend_down,
            p.trend_flat,
            p.tone_action,
            p.post_meta,
            p.post_title,
            p.post_selected,
            p.post_upvotes,
            p.post_body,
            p.message_info,
            p.message_error,
            p.message_loading,
            p.modal_body,
            p.chart_axis,
            p.chart_value,
            p.status_bar,
            p.panel_border,
            p.panel_border_focused,
        ];

        let map = ROLE_NAMES.iter().copied().zip(styles).collect();
        Self { map }
    }

    /// Resolve a role name to its `Style`. Returns `Style::default()` for unknown roles.
    pub fn resolve(&self, role: &str) -> Style {
        self.map.get(role).copied().unwrap_or_default()
    }
}
