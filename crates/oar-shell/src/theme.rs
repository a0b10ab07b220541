//! Registry palette and semantic styles.

use ratatui::style::{Color, Modifier, Style};

// ── Palette ──────────────────────────────────────────────────────────

pub const BRAND_TEAL: Color = Color::Rgb(0, 150, 136); // #009688
pub const BRAND_NAVY: Color = Color::Rgb(13, 71, 161); // #0d47a1
pub const ACCENT_AMBER: Color = Color::Rgb(255, 193, 7); // #ffc107
pub const SUCCESS_GREEN: Color = Color::Rgb(102, 187, 106); // #66bb6a
pub const ERROR_RED: Color = Color::Rgb(239, 83, 80); // #ef5350
pub const TEXT: Color = Color::Rgb(224, 224, 224); // #e0e0e0
pub const MUTED: Color = Color::Rgb(120, 144, 156); // #78909c
pub const BG_PANEL: Color = Color::Rgb(33, 37, 43); // #21252b
pub const BG_SELECTED: Color = Color::Rgb(44, 62, 80); // #2c3e50

// ── Semantic Styles ──────────────────────────────────────────────────

pub fn title_style() -> Style {
    Style::default().fg(BRAND_TEAL).add_modifier(Modifier::BOLD)
}

pub fn border_default() -> Style {
    Style::default().fg(MUTED)
}

pub fn border_focused() -> Style {
    Style::default().fg(BRAND_TEAL)
}

pub fn border_error() -> Style {
    Style::default().fg(ERROR_RED)
}

pub fn text() -> Style {
    Style::default().fg(TEXT)
}

pub fn field_label() -> Style {
    Style::default().fg(MUTED)
}

pub fn row_selected() -> Style {
    Style::default()
        .fg(BRAND_TEAL)
        .bg(BG_SELECTED)
        .add_modifier(Modifier::BOLD)
}

pub fn tab_active() -> Style {
    Style::default()
        .fg(Color::White)
        .bg(BRAND_NAVY)
        .add_modifier(Modifier::BOLD)
}

pub fn tab_inactive() -> Style {
    Style::default().fg(TEXT)
}

pub fn error_text() -> Style {
    Style::default().fg(ERROR_RED)
}

pub fn success_text() -> Style {
    Style::default().fg(SUCCESS_GREEN)
}

pub fn pending_text() -> Style {
    Style::default().fg(ACCENT_AMBER)
}

pub fn key_hint() -> Style {
    Style::default().fg(MUTED)
}

pub fn key_hint_key() -> Style {
    Style::default().fg(BRAND_TEAL).add_modifier(Modifier::BOLD)
}
