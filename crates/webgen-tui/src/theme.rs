//! Color scheme and styling for the TUI.

use ratatui::style::{Color, Modifier, Style};

const TEXT: Color = Color::Rgb(205, 205, 210);
const TEXT_DIM: Color = Color::Rgb(100, 100, 110);
const TEXT_MUTED: Color = Color::Rgb(145, 145, 155);
const INDIGO: Color = Color::Rgb(129, 140, 248);
const INDIGO_DEEP: Color = Color::Rgb(55, 48, 163);
const GREEN: Color = Color::Rgb(80, 200, 120);
const AMBER: Color = Color::Rgb(230, 180, 80);
const RED: Color = Color::Rgb(240, 80, 80);
const FRAME: Color = Color::Rgb(60, 60, 70);

/// Styles for webgen's TUI: neutral text on the terminal background with
/// indigo accents.
pub struct Theme;

impl Theme {
    pub fn accent() -> Color {
        INDIGO
    }

    pub fn error() -> Color {
        RED
    }

    pub fn title() -> Style {
        Style::default().fg(INDIGO).add_modifier(Modifier::BOLD)
    }

    pub fn header() -> Style {
        Style::default().fg(TEXT).add_modifier(Modifier::BOLD)
    }

    pub fn selected() -> Style {
        Style::default().fg(INDIGO).add_modifier(Modifier::BOLD)
    }

    pub fn normal() -> Style {
        Style::default().fg(TEXT)
    }

    pub fn dim() -> Style {
        Style::default().fg(TEXT_DIM)
    }

    pub fn muted() -> Style {
        Style::default().fg(TEXT_MUTED)
    }

    pub fn border() -> Style {
        Style::default().fg(FRAME)
    }

    pub fn border_focused() -> Style {
        Style::default().fg(INDIGO)
    }

    pub fn key_hint() -> Style {
        Style::default().fg(INDIGO)
    }

    /// The file currently open in the viewer.
    pub fn selection() -> Style {
        Style::default()
            .fg(Color::White)
            .bg(INDIGO_DEEP)
            .add_modifier(Modifier::BOLD)
    }

    pub fn cursor() -> Style {
        Style::default().fg(Color::Reset).bg(INDIGO)
    }

    pub fn status_bar() -> Style {
        Style::default().fg(TEXT_MUTED)
    }

    pub fn tab_active() -> Style {
        Style::default()
            .fg(INDIGO)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
    }

    pub fn tab_inactive() -> Style {
        Style::default().fg(TEXT_DIM)
    }

    /// Preview tab before anything has been generated.
    pub fn tab_disabled() -> Style {
        Style::default()
            .fg(TEXT_DIM)
            .add_modifier(Modifier::DIM | Modifier::CROSSED_OUT)
    }

    pub fn line_number() -> Style {
        Style::default().fg(TEXT_DIM)
    }

    pub fn language_badge() -> Style {
        Style::default().fg(TEXT).bg(FRAME)
    }

    /// Explorer color for a file, keyed by its highlighting language.
    pub fn file_kind(language: &str) -> Style {
        let color = match language {
            "html" => Color::Rgb(228, 120, 80),
            "css" => Color::Rgb(86, 156, 214),
            "javascript" => Color::Rgb(240, 210, 90),
            "typescript" => Color::Rgb(70, 140, 220),
            "json" => AMBER,
            "markdown" => TEXT_MUTED,
            _ => TEXT,
        };
        Style::default().fg(color)
    }

    pub fn error_text() -> Style {
        Style::default().fg(RED)
    }

    pub fn warning_text() -> Style {
        Style::default().fg(AMBER)
    }

    pub fn success_text() -> Style {
        Style::default().fg(GREEN)
    }
}
