//! Rendered view — the preview document for the current project.
//!
//! A terminal cannot lay out HTML, so the pane shows which document would be
//! displayed and its markup; `o` hands the same document to the browser.

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use webgen_core::PreviewDocument;

use crate::action::Action;
use crate::components::code_viewer::numbered_lines;
use crate::components::{scrolled, Component};
use crate::theme::Theme;

const PAGE: isize = 20;

pub struct PreviewPaneComponent {
    document: PreviewDocument,
    scroll: usize,
    pub focused: bool,
}

impl PreviewPaneComponent {
    pub fn new() -> Self {
        Self {
            document: PreviewDocument::Empty,
            scroll: 0,
            focused: false,
        }
    }

    pub fn set_document(&mut self, document: PreviewDocument) {
        if document != self.document {
            self.document = document;
            self.scroll = 0;
        }
    }

    pub fn document(&self) -> &PreviewDocument {
        &self.document
    }

    fn line_count(&self) -> usize {
        self.document.html().map(|h| h.lines().count()).unwrap_or(0)
    }
}

impl Component for PreviewPaneComponent {
    fn handle_action(&mut self, action: &Action) -> Option<Action> {
        let total = self.line_count();
        match action {
            Action::ScrollUp => self.scroll = scrolled(self.scroll, -1, total),
            Action::ScrollDown => self.scroll = scrolled(self.scroll, 1, total),
            Action::PageUp => self.scroll = scrolled(self.scroll, -PAGE, total),
            Action::PageDown => self.scroll = scrolled(self.scroll, PAGE, total),
            _ => {}
        }
        None
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(if self.focused {
                Theme::border_focused()
            } else {
                Theme::border()
            })
            .title_bottom(Line::from(vec![
                Span::styled(" o", Theme::key_hint()),
                Span::styled(" open in browser ", Theme::dim()),
            ]));

        let (notice, html) = match &self.document {
            PreviewDocument::Empty => {
                let placeholder = Paragraph::new(Span::styled(
                    "Generate a project to see a preview.",
                    Theme::dim(),
                ))
                .wrap(Wrap { trim: true })
                .block(block);
                frame.render_widget(placeholder, area);
                return;
            }
            PreviewDocument::Entry { path, html } => (
                Line::from(vec![
                    Span::styled(" Displaying ", Theme::muted()),
                    Span::styled(path.as_str(), Theme::success_text()),
                ]),
                html,
            ),
            PreviewDocument::Synthesized { html } => (
                Line::from(Span::styled(
                    " No index.html found; showing a page assembled from the project files",
                    Theme::warning_text(),
                )),
                html,
            ),
        };

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::vertical([Constraint::Length(1), Constraint::Min(1)]).split(inner);
        frame.render_widget(Paragraph::new(notice), chunks[0]);

        let body = numbered_lines(html, self.scroll, chunks[1].height as usize);
        frame.render_widget(Paragraph::new(body), chunks[1]);
    }
}
