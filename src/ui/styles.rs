use std::borrow::Cow;

use ratatui::prelude::Stylize;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

/// Accent color used for titles, focus, and the current page.
pub const ACCENT: Color = Color::Indexed(208);
pub const POSITIVE: Color = Color::Green;
pub const NEGATIVE: Color = Color::Red;

/// Bold accent span for panel titles.
pub fn title_span<'a>(text: impl Into<Cow<'a, str>>) -> Span<'a> {
    Span::from(text.into().into_owned()).bold().fg(ACCENT)
}

/// Produce a dimmed line for secondary descriptions and hints.
pub fn secondary_line<'a>(text: impl Into<Cow<'a, str>>) -> Line<'a> {
    let owned = text.into().into_owned();
    Line::from(owned.dim())
}

pub fn secondary_span<'a>(text: impl Into<Cow<'a, str>>) -> Span<'a> {
    Span::from(text.into().into_owned()).dim()
}

pub fn selection_style() -> Style {
    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
}

pub fn header_style() -> Style {
    Style::default().fg(Color::Yellow)
}

pub fn focused_border() -> Style {
    Style::default().fg(ACCENT)
}

pub fn disabled_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

pub fn skeleton_style() -> Style {
    Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM)
}

pub fn error_style() -> Style {
    Style::default().fg(NEGATIVE).add_modifier(Modifier::BOLD)
}

pub fn amount_style(amount: f64) -> Style {
    if amount < 0.0 {
        Style::default().fg(NEGATIVE)
    } else {
        Style::default().fg(POSITIVE)
    }
}
