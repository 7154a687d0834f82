//! Dialog explaining how to open an exported project in VS Code.

use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use crate::action::Action;
use crate::components::{centered_rect, Component};
use crate::theme::Theme;

pub struct InstructionModalComponent {
    pub visible: bool,
    /// Where the last export went, if any.
    pub export_location: Option<String>,
}

impl InstructionModalComponent {
    pub fn new() -> Self {
        Self {
            visible: false,
            export_location: None,
        }
    }
}

impl Component for InstructionModalComponent {
    fn handle_action(&mut self, action: &Action) -> Option<Action> {
        match action {
            Action::ToggleInstructions => self.visible = !self.visible,
            Action::Dismiss | Action::Confirm if self.visible => self.visible = false,
            _ => {}
        }
        None
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        if !self.visible {
            return;
        }

        let dialog = centered_rect(area, 66, 18);
        frame.render_widget(Clear, dialog);

        let block = Block::default()
            .title(" How to open your project in VS Code ")
            .title_style(Theme::title())
            .title_bottom(Line::from(Span::styled(" esc close ", Theme::dim())))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Theme::accent()));

        let archive = self
            .export_location
            .as_deref()
            .unwrap_or("not exported yet (press e to export)");

        let lines = vec![
            Line::from(""),
            step("1.", "Export the project with e, then unzip the archive."),
            Line::from(vec![
                Span::styled("     Archive: ", Theme::muted()),
                Span::styled(archive, Theme::success_text()),
            ]),
            Line::from(""),
            step("2.", "Open Visual Studio Code."),
            Line::from(""),
            step("3.", "Choose File > Open Folder... and pick the unzipped folder,"),
            Line::from(vec![
                Span::styled("     or run ", Theme::normal()),
                Span::styled("code .", Theme::key_hint()),
                Span::styled(" from inside it.", Theme::normal()),
            ]),
            Line::from(""),
            step("4.", "Projects with a package.json need `npm install`,"),
            Line::from(Span::styled(
                "     then `npm run dev` or `npm start` to run.",
                Theme::normal(),
            )),
        ];

        let paragraph = Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(block);
        frame.render_widget(paragraph, dialog);
    }
}

fn step<'a>(number: &'a str, text: &'a str) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("  {number} "), Theme::selected()),
        Span::styled(text, Theme::normal()),
    ])
}
