//! Help overlay — keybinding reference.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::action::Action;
use crate::components::{centered_rect, Component};
use crate::theme::Theme;

type Bindings = &'static [(&'static str, &'static str)];

const SECTIONS: &[(&str, Bindings)] = &[
    (
        "Anywhere",
        &[
            ("q / Ctrl+C", "Quit"),
            ("?", "Toggle this help"),
            ("Tab / Shift+Tab", "Next / previous region"),
            ("d or /", "Edit the description"),
            ("g", "Generate from the description"),
            ("Esc / x", "Dismiss error or dialog"),
        ],
    ),
    (
        "Files and panes",
        &[
            ("Up / Down / j / k", "Move or scroll"),
            ("PgUp / PgDn", "Scroll a page"),
            ("Enter", "Open the highlighted file"),
            ("c / p", "Show code / preview"),
            ("Left / Right", "Switch code and preview"),
            ("o", "Open the preview in a browser"),
            ("e", "Export the project as a zip"),
            ("i", "Open it in VS Code: how-to"),
        ],
    ),
    (
        "Editing the description",
        &[
            ("Ctrl+S / Ctrl+Enter", "Generate"),
            ("Enter", "New line"),
            ("Ctrl+W", "Delete word"),
            ("Ctrl+V", "Paste"),
            ("Esc", "Stop editing"),
        ],
    ),
];

pub struct HelpComponent {
    pub visible: bool,
}

impl HelpComponent {
    pub fn new() -> Self {
        Self { visible: false }
    }
}

impl Component for HelpComponent {
    fn handle_action(&mut self, action: &Action) -> Option<Action> {
        match action {
            Action::ToggleHelp => {
                self.visible = !self.visible;
                None
            }
            _ if self.visible && !action.is_background() => {
                self.visible = false;
                None
            }
            _ => None,
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        if !self.visible {
            return;
        }

        let height = SECTIONS
            .iter()
            .map(|(_, keys)| keys.len() as u16 + 2)
            .sum::<u16>()
            + 2;
        let dialog = centered_rect(area, 62, height.min(area.height));
        frame.render_widget(Clear, dialog);

        let mut lines = Vec::new();
        for (heading, keys) in SECTIONS {
            lines.push(Line::from(Span::styled(format!(" {heading}"), Theme::header())));
            lines.extend(keys.iter().map(|(key, desc)| {
                Line::from(vec![
                    Span::styled(format!("   {key:<22}"), Theme::selected()),
                    Span::styled(*desc, Theme::normal()),
                ])
            }));
            lines.push(Line::from(""));
        }

        let panel = Paragraph::new(lines).block(
            Block::default()
                .title(" Keys ")
                .title_style(Theme::title())
                .title_bottom(Line::from(Span::styled(" any key closes ", Theme::dim())))
                .borders(Borders::ALL)
                .border_style(Theme::border_focused()),
        );
        frame.render_widget(panel, dialog);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticks_do_not_close_help() {
        let mut help = HelpComponent::new();
        help.handle_action(&Action::ToggleHelp);
        help.handle_action(&Action::Tick);
        assert!(help.visible);
        help.handle_action(&Action::ScrollDown);
        assert!(!help.visible);
    }
}
