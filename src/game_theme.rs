use ratatui::style::{Color, Modifier, Style};

use crate::entities::{PowerUpKind, Side};

pub struct ThemeColors {
    pub border: Color,
    pub center_line: Color,
    pub score: Color,
    pub text: Color,
    pub accent: Color,
    pub paddle: Color,
    pub paddle_powered: Color,
    pub ball: Color,
    pub trail: Color,
    pub left_burst: Color,
    pub right_burst: Color,
    pub hit_burst: Color,
}

/// The one palette the game ships with, modelled on classic ANSI colors.
pub const CLASSIC: ThemeColors = ThemeColors {
    border: Color::Cyan,
    center_line: Color::DarkGray,
    score: Color::Yellow,
    text: Color::Cyan,
    accent: Color::LightGreen,
    paddle: Color::Green,
    paddle_powered: Color::LightMagenta,
    ball: Color::White,
    trail: Color::Gray,
    left_burst: Color::LightBlue,
    right_burst: Color::LightRed,
    hit_burst: Color::Yellow,
};

impl ThemeColors {
    pub fn side(&self, side: Side) -> Color {
        match side {
            Side::Left => self.left_burst,
            Side::Right => self.right_burst,
        }
    }

    pub fn power_up(&self, kind: PowerUpKind) -> Color {
        match kind {
            PowerUpKind::Speed => Color::LightYellow,
            PowerUpKind::Size => Color::LightGreen,
            PowerUpKind::Slow => Color::LightCyan,
            PowerUpKind::MultiBall => Color::LightMagenta,
        }
    }

    pub fn fg(color: Color) -> Style {
        Style::default().fg(color)
    }

    pub fn bold(color: Color) -> Style {
        Style::default().fg(color).add_modifier(Modifier::BOLD)
    }
}
