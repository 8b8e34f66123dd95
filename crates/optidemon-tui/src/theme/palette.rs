//! Color palettes, one per [`ThemeMode`].

use optidemon_app::config::ThemeMode;
use ratatui::style::Color;

/// Colors used by every widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    // Background layers
    pub deepest_bg: Color,
    pub card_bg: Color,

    // Borders
    pub border_dim: Color,
    pub border_active: Color,

    pub accent: Color,
    /// Foreground drawn on top of `accent`
    pub contrast_fg: Color,

    // Text
    pub text_primary: Color,
    pub text_secondary: Color,
    pub text_muted: Color,
    pub code: Color,

    // Status
    pub status_green: Color,
    pub status_red: Color,
    pub status_yellow: Color,
}

pub const DARK: Palette = Palette {
    deepest_bg: Color::Rgb(10, 12, 16),
    card_bg: Color::Rgb(18, 21, 28),
    border_dim: Color::Rgb(45, 51, 59),
    border_active: Color::Rgb(88, 166, 255),
    accent: Color::Rgb(88, 166, 255),
    contrast_fg: Color::Black,
    text_primary: Color::Rgb(201, 209, 217),
    text_secondary: Color::Rgb(125, 133, 144),
    text_muted: Color::Rgb(72, 79, 88),
    code: Color::Rgb(230, 237, 243),
    status_green: Color::Rgb(16, 185, 129),
    status_red: Color::Rgb(244, 63, 94),
    status_yellow: Color::Rgb(234, 179, 8),
};

pub const LIGHT: Palette = Palette {
    deepest_bg: Color::Rgb(246, 248, 250),
    card_bg: Color::Rgb(255, 255, 255),
    border_dim: Color::Rgb(208, 215, 222),
    border_active: Color::Rgb(9, 105, 218),
    accent: Color::Rgb(9, 105, 218),
    contrast_fg: Color::White,
    text_primary: Color::Rgb(31, 35, 40),
    text_secondary: Color::Rgb(89, 99, 110),
    text_muted: Color::Rgb(140, 149, 159),
    code: Color::Rgb(36, 41, 47),
    status_green: Color::Rgb(26, 127, 55),
    status_red: Color::Rgb(207, 34, 46),
    status_yellow: Color::Rgb(154, 103, 0),
};

impl Palette {
    pub fn for_mode(mode: ThemeMode) -> &'static Palette {
        match mode {
            ThemeMode::Dark => &DARK,
            ThemeMode::Light => &LIGHT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modes_select_distinct_palettes() {
        assert_eq!(Palette::for_mode(ThemeMode::Dark), &DARK);
        assert_eq!(Palette::for_mode(ThemeMode::Light), &LIGHT);
        assert_ne!(DARK.deepest_bg, LIGHT.deepest_bg);
    }
}
