//! Theme system for the TUI.
//!
//! Provides semantic color roles that map to ratatui `Style` values.
//! The `ThemeVariant` enum selects between Dark and Light palettes.

use crate::catalog::CategoryColor;
use ratatui::style::{Color, Modifier, Style};

// ============================================================================
// Theme Variant
// ============================================================================

/// Available theme variants.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ThemeVariant {
    #[default]
    Dark,
    Light,
}

impl ThemeVariant {
    /// Parse a variant name from a string (case-insensitive).
    pub fn from_str_name(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "dark" => Some(Self::Dark),
            "light" => Some(Self::Light),
            _ => None,
        }
    }

    /// Build the `ColorPalette` for this variant.
    pub fn palette(self) -> ColorPalette {
        match self {
            Self::Dark => ColorPalette::dark(),
            Self::Light => ColorPalette::light(),
        }
    }

    /// Cycle to the next variant: Dark → Light → Dark.
    pub fn next(self) -> Self {
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
#[derive(Debug, Clone, PartialEq)]
pub struct ColorPalette {
    // -- Header --
    pub masthead: Style,
    pub masthead_date: Style,
    pub search_input: Style,
    pub search_placeholder: Style,

    // -- Suggestion popover --
    pub suggestion_heading: Style,
    pub suggestion_title: Style,
    pub suggestion_meta: Style,
    pub suggestion_selected: Style,
    pub suggestion_empty: Style,

    // -- Dot navigation --
    pub dot_active: Style,
    pub dot_inactive: Style,
    pub page_label: Style,

    // -- Article cards --
    pub article_title: Style,
    pub article_byline: Style,
    pub article_date: Style,
    pub article_body: Style,
    pub article_emphasis: Style,
    pub article_strong: Style,
    pub article_affordance: Style,
    pub article_cursor: Style,
    pub article_highlight: Style,
    pub article_rule: Style,
    pub badge_primary: Style,
    pub badge_secondary: Style,
    pub badge_accent: Style,

    // -- Sidebar --
    pub trending_rank: Style,
    pub trending_title: Style,
    pub trending_selected: Style,
    pub media_title: Style,
    pub media_link: Style,
    pub media_placeholder: Style,

    // -- Chrome --
    pub status_bar: Style,
    pub panel_border: Style,
    pub panel_border_focused: Style,
    pub column_paused: Style,
    pub help_key: Style,
}

impl ColorPalette {
    fn dark() -> Self {
        Self {
            masthead: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            masthead_date: Style::default().fg(Color::DarkGray),
            search_input: Style::default().fg(Color::White),
            search_placeholder: Style::default().fg(Color::DarkGray),

            suggestion_heading: Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
            suggestion_title: Style::default().add_modifier(Modifier::BOLD),
            suggestion_meta: Style::default().fg(Color::Gray),
            suggestion_selected: Style::default().bg(Color::DarkGray).fg(Color::White),
            suggestion_empty: Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),

            dot_active: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
            dot_inactive: Style::default().fg(Color::DarkGray),
            page_label: Style::default().fg(Color::Gray),

            article_title: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            article_byline: Style::default()
                .fg(Color::Gray)
                .add_modifier(Modifier::ITALIC),
            article_date: Style::default().fg(Color::DarkGray),
            article_body: Style::default(),
            article_emphasis: Style::default().add_modifier(Modifier::ITALIC),
            article_strong: Style::default().add_modifier(Modifier::BOLD),
            article_affordance: Style::default().fg(Color::Cyan),
            article_cursor: Style::default().bg(Color::Rgb(40, 40, 48)),
            article_highlight: Style::default().bg(Color::Rgb(70, 60, 10)),
            article_rule: Style::default().fg(Color::DarkGray),
            badge_primary: Style::default()
                .fg(Color::Black)
                .bg(Color::Red)
                .add_modifier(Modifier::BOLD),
            badge_secondary: Style::default()
                .fg(Color::Black)
                .bg(Color::Gray)
                .add_modifier(Modifier::BOLD),
            badge_accent: Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD),

            trending_rank: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
            trending_title: Style::default(),
            trending_selected: Style::default().bg(Color::DarkGray).fg(Color::White),
            media_title: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            media_link: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::UNDERLINED),
            media_placeholder: Style::default().fg(Color::DarkGray),

            status_bar: Style::default().bg(Color::DarkGray).fg(Color::White),
            panel_border: Style::default(),
            panel_border_focused: Style::default().fg(Color::Cyan),
            column_paused: Style::default().fg(Color::Yellow),
            help_key: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        }
    }

    /// Light palette, adapted for light terminal backgrounds.
    fn light() -> Self {
        Self {
            masthead: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            masthead_date: Style::default().fg(Color::DarkGray),
            search_input: Style::default().fg(Color::Black),
            search_placeholder: Style::default().fg(Color::Gray),

            suggestion_heading: Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
            suggestion_title: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            suggestion_meta: Style::default().fg(Color::DarkGray),
            suggestion_selected: Style::default().bg(Color::Blue).fg(Color::White),
            suggestion_empty: Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),

            dot_active: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            dot_inactive: Style::default().fg(Color::Gray),
            page_label: Style::default().fg(Color::DarkGray),

            article_title: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            article_byline: Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
            article_date: Style::default().fg(Color::Gray),
            article_body: Style::default().fg(Color::Black),
            article_emphasis: Style::default().add_modifier(Modifier::ITALIC),
            article_strong: Style::default().add_modifier(Modifier::BOLD),
            article_affordance: Style::default().fg(Color::Blue),
            article_cursor: Style::default().bg(Color::Rgb(225, 230, 240)),
            article_highlight: Style::default().bg(Color::Rgb(255, 240, 170)),
            article_rule: Style::default().fg(Color::Gray),
            badge_primary: Style::default()
                .fg(Color::White)
                .bg(Color::Red)
                .add_modifier(Modifier::BOLD),
            badge_secondary: Style::default()
                .fg(Color::White)
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
            badge_accent: Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD),

            trending_rank: Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
            trending_title: Style::default().fg(Color::Black),
            trending_selected: Style::default().bg(Color::Blue).fg(Color::White),
            media_title: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            media_link: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::UNDERLINED),
            media_placeholder: Style::default().fg(Color::Gray),

            status_bar: Style::default().bg(Color::White).fg(Color::Black),
            panel_border: Style::default().fg(Color::DarkGray),
            panel_border_focused: Style::default().fg(Color::Blue),
            column_paused: Style::default().fg(Color::Magenta),
            help_key: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
        }
    }

    /// Badge style for an article's category color tag.
    pub fn badge(&self, color: CategoryColor) -> Style {
        match color {
            CategoryColor::Primary => self.badge_primary,
            CategoryColor::Secondary => self.badge_secondary,
            CategoryColor::Accent => self.badge_accent,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn badge_follows_color_tag() {
        let palette = ThemeVariant::Dark.palette();
        assert_eq!(palette.badge(CategoryColor::Primary), palette.badge_primary);
        assert_eq!(palette.badge(CategoryColor::Accent), palette.badge_accent);
        assert_eq!(
            palette.badge(CategoryColor::Secondary),
            palette.badge_secondary
        );
    }

    #[test]
    fn badges_are_distinct() {
        let palette = ThemeVariant::Dark.palette();
        assert_ne!(palette.badge_primary, palette.badge_secondary);
        assert_ne!(palette.badge_primary, palette.badge_accent);
    }

    #[test]
    fn light_palette_differs_from_dark() {
        let dark = ThemeVariant::Dark.palette();
        let light = ThemeVariant::Light.palette();
        assert_ne!(dark, light);
        assert_ne!(dark.suggestion_selected, light.suggestion_selected);
        assert_ne!(dark.article_highlight, light.article_highlight);
    }

    #[test]
    fn highlight_distinct_from_cursor() {
        for variant in [ThemeVariant::Dark, ThemeVariant::Light] {
            let p = variant.palette();
            assert_ne!(p.article_highlight, p.article_cursor);
        }
    }

    #[test]
    fn variant_from_str_name() {
        assert_eq!(
            ThemeVariant::from_str_name("dark"),
            Some(ThemeVariant::Dark)
        );
        assert_eq!(
            ThemeVariant::from_str_name("Light"),
            Some(ThemeVariant::Light)
        );
        assert_eq!(ThemeVariant::from_str_name("neon"), None);
    }

    #[test]
    fn variant_cycles() {
        assert_eq!(ThemeVariant::Dark.next(), ThemeVariant::Light);
        assert_eq!(ThemeVariant::Light.next().next(), ThemeVariant::Light);
        assert_eq!(ThemeVariant::Light.name(), "Light");
    }
}
