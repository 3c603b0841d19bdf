// src/tui/theme.rs — Color scheme and style definitions for the terminal UI.

use ratatui::style::{Color, Modifier, Style};

/// Paper-and-ink palette.
pub struct Theme;

impl Theme {
    pub const INK: Color = Color::Rgb(235, 235, 240);
    pub const TEAL: Color = Color::Rgb(60, 190, 170);
    pub const SLATE: Color = Color::Rgb(110, 115, 135);
    pub const SHADOW: Color = Color::Rgb(70, 72, 90);
    pub const GREEN: Color = Color::Rgb(90, 200, 110);
    pub const AMBER: Color = Color::Rgb(235, 185, 60);
    pub const RED: Color = Color::Rgb(225, 85, 85);
    pub const SKY: Color = Color::Rgb(90, 150, 230);

    pub fn nav_active() -> Style {
        Style::default().fg(Theme::TEAL).add_modifier(Modifier::BOLD)
    }

    pub fn nav_inactive() -> Style {
        Style::default().fg(Theme::SLATE)
    }

    pub fn header() -> Style {
        Style::default().fg(Theme::TEAL).add_modifier(Modifier::BOLD)
    }

    pub fn border() -> Style {
        Style::default().fg(Theme::SHADOW)
    }

    /// Border of the control that has keyboard focus.
    pub fn border_focus() -> Style {
        Style::default().fg(Theme::TEAL)
    }

    pub fn text() -> Style {
        Style::default().fg(Theme::INK)
    }

    pub fn text_dim() -> Style {
        Style::default().fg(Theme::SLATE)
    }

    pub fn success() -> Style {
        Style::default().fg(Theme::GREEN)
    }

    pub fn warning() -> Style {
        Style::default().fg(Theme::AMBER)
    }

    pub fn error() -> Style {
        Style::default().fg(Theme::RED)
    }

    pub fn info() -> Style {
        Style::default().fg(Theme::SKY)
    }

    pub fn button() -> Style {
        Style::default().fg(Theme::INK).bg(Theme::SHADOW)
    }

    pub fn button_focus() -> Style {
        Style::default()
            .fg(Color::Black)
            .bg(Theme::TEAL)
            .add_modifier(Modifier::BOLD)
    }

    pub fn button_disabled() -> Style {
        Style::default().fg(Theme::SLATE).add_modifier(Modifier::DIM)
    }

    pub fn list_selected() -> Style {
        Style::default().bg(Color::Rgb(35, 50, 55)).fg(Theme::INK)
    }

    pub fn key_hint() -> Style {
        Style::default().fg(Theme::TEAL)
    }

    pub fn key_desc() -> Style {
        Style::default().fg(Theme::SLATE)
    }

    /// Match score on a 0–100 scale.
    pub fn score(value: f64) -> Style {
        if value >= 75.0 {
            Style::default().fg(Theme::GREEN).add_modifier(Modifier::BOLD)
        } else if value >= 50.0 {
            Style::default().fg(Theme::AMBER).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Theme::RED).add_modifier(Modifier::BOLD)
        }
    }
}
