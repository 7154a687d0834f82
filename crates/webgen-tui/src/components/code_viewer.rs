//! Source view — raw text of the selected file with line numbers.

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use webgen_core::GeneratedFile;

use crate::action::Action;
use crate::components::{scrolled, Component};
use crate::theme::Theme;

const PAGE: isize = 20;

pub struct CodeViewerComponent {
    path: Option<String>,
    language: &'static str,
    content: String,
    scroll: usize,
    pub focused: bool,
}

impl CodeViewerComponent {
    pub fn new() -> Self {
        Self {
            path: None,
            language: "plaintext",
            content: String::new(),
            scroll: 0,
            focused: false,
        }
    }

    /// Show `file`, or the placeholder when nothing is selected. Scroll resets
    /// only when the shown file changes.
    pub fn sync(&mut self, file: Option<&GeneratedFile>) {
        let path = file.map(|f| f.path.as_str());
        if path != self.path.as_deref() {
            self.scroll = 0;
        }
        match file {
            Some(f) => {
                self.path = Some(f.path.clone());
                self.language = f.language();
                if self.content != f.content {
                    self.content = f.content.clone();
                }
            }
            None => {
                self.path = None;
                self.language = "plaintext";
                self.content.clear();
            }
        }
    }

    fn line_count(&self) -> usize {
        self.content.lines().count()
    }
}

impl Component for CodeViewerComponent {
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
            });

        let Some(ref path) = self.path else {
            let placeholder = Paragraph::new(Span::styled(
                "// Select a file to view its content",
                Theme::dim(),
            ))
            .block(block);
            frame.render_widget(placeholder, area);
            return;
        };

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::vertical([Constraint::Length(1), Constraint::Min(1)]).split(inner);

        let header = Line::from(vec![
            Span::styled(format!(" {path} "), Theme::header()),
            Span::styled(format!(" {} ", self.language), Theme::language_badge()),
        ]);
        frame.render_widget(Paragraph::new(header), chunks[0]);

        let body = numbered_lines(&self.content, self.scroll, chunks[1].height as usize);
        frame.render_widget(Paragraph::new(body), chunks[1]);
    }
}

/// The visible window of `text` as lines prefixed with 1-based line numbers.
pub(crate) fn numbered_lines(text: &str, scroll: usize, height: usize) -> Vec<Line<'_>> {
    let total = text.lines().count().max(1);
    let gutter = total.to_string().len();
    text.lines()
        .enumerate()
        .skip(scroll)
        .take(height)
        .map(|(i, line)| {
            Line::from(vec![
                Span::styled(format!("{:>gutter$} ", i + 1), Theme::line_number()),
                Span::styled(line, Theme::normal()),
            ])
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scroll_resets_when_file_changes() {
        let a = GeneratedFile::new("a.js", "1\n2\n3\n4");
        let b = GeneratedFile::new("b.css", "body{}");
        let mut viewer = CodeViewerComponent::new();

        viewer.sync(Some(&a));
        viewer.handle_action(&Action::ScrollDown);
        viewer.handle_action(&Action::ScrollDown);
        assert_eq!(viewer.scroll, 2);

        viewer.sync(Some(&a));
        assert_eq!(viewer.scroll, 2);

        viewer.sync(Some(&b));
        assert_eq!(viewer.scroll, 0);
        assert_eq!(viewer.language, "css");
    }

    #[test]
    fn cleared_selection_shows_placeholder_state() {
        let mut viewer = CodeViewerComponent::new();
        viewer.sync(Some(&GeneratedFile::new("x.md", "# hi")));
        viewer.sync(None);
        assert!(viewer.path.is_none());
        assert!(viewer.content.is_empty());
    }

    #[test]
    fn numbered_lines_window() {
        let lines = numbered_lines("a\nb\nc\nd\ne\nf\ng\nh\ni\nj", 8, 5);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].spans[0].content, " 9 ");
        assert_eq!(lines[1].spans[1].content, "j");
    }
}
