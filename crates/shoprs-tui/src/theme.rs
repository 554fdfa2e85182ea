//! Color palettes for the light and dark themes.

use ratatui::style::Color;

/// Resolved colors for the active theme.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub background: Color,
    pub text: Color,
    pub muted: Color,
    pub accent: Color,
    pub price: Color,
    pub warning: Color,
    pub highlight_bg: Color,
    pub alert_bg: Color,
}

impl Theme {
    pub fn new(dark_mode: bool) -> Self {
        if dark_mode {
            Self {
                background: Color::Rgb(24, 24, 32),
                text: Color::White,
                muted: Color::DarkGray,
                accent: Color::Cyan,
                price: Color::Yellow,
                warning: Color::Red,
                highlight_bg: Color::Rgb(60, 60, 80),
                alert_bg: Color::Rgb(80, 60, 20),
            }
        } else {
            Self {
                background: Color::Rgb(245, 245, 245),
                text: Color::Black,
                muted: Color::Gray,
                accent: Color::Blue,
                price: Color::Rgb(0, 95, 135),
                warning: Color::Red,
                highlight_bg: Color::Rgb(200, 215, 235),
                alert_bg: Color::Rgb(255, 240, 180),
            }
        }
    }
}
