//! File explorer — the generated project's files, sorted by path.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;

use webgen_core::project::ExplorerEntry;

use crate::action::Action;
use crate::components::{scrolled, Component};
use crate::theme::Theme;

const PAGE: isize = 10;

pub struct FileExplorerComponent {
    entries: Vec<ExplorerEntry>,
    /// Path of the file shown in the viewer.
    selected: Option<String>,
    /// Highlighted row (keyboard cursor).
    cursor: usize,
    pub focused: bool,
}

impl FileExplorerComponent {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            selected: None,
            cursor: 0,
            focused: false,
        }
    }

    /// Take the current file list and selection. The cursor jumps to the
    /// selected file whenever the list itself changes.
    pub fn sync(&mut self, entries: Vec<ExplorerEntry>, selected: Option<&str>) {
        self.selected = selected.map(str::to_string);
        if entries != self.entries {
            self.entries = entries;
            self.cursor = self
                .selected
                .as_deref()
                .and_then(|sel| self.entries.iter().position(|e| e.path == sel))
                .unwrap_or(0);
        }
    }

    fn highlighted(&self) -> Option<&ExplorerEntry> {
        self.entries.get(self.cursor)
    }

    fn move_cursor(&mut self, delta: isize) {
        self.cursor = scrolled(self.cursor, delta, self.entries.len());
    }
}

impl Component for FileExplorerComponent {
    fn handle_action(&mut self, action: &Action) -> Option<Action> {
        match action {
            Action::ScrollUp => self.move_cursor(-1),
            Action::ScrollDown => self.move_cursor(1),
            Action::PageUp => self.move_cursor(-PAGE),
            Action::PageDown => self.move_cursor(PAGE),
            Action::Confirm => {
                return self
                    .highlighted()
                    .map(|entry| Action::PickFile(entry.path.clone()));
            }
            _ => {}
        }
        None
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(format!(" Files ({}) ", self.entries.len()))
            .title_style(if self.focused {
                Theme::key_hint()
            } else {
                Theme::muted()
            })
            .borders(Borders::ALL)
            .border_style(if self.focused {
                Theme::border_focused()
            } else {
                Theme::border()
            });

        if self.entries.is_empty() {
            let empty = Paragraph::new(Span::styled(
                "Generated files will appear here.",
                Theme::dim(),
            ))
            .wrap(Wrap { trim: true })
            .block(block);
            frame.render_widget(empty, area);
            return;
        }

        let items: Vec<ListItem> = self
            .entries
            .iter()
            .map(|entry| {
                let is_selected = self.selected.as_deref() == Some(entry.path.as_str());
                let name_style = if is_selected {
                    Theme::selection()
                } else {
                    Theme::file_kind(entry.language)
                };
                ListItem::new(Line::from(vec![
                    Span::styled(entry.dir.as_str(), Theme::dim()),
                    Span::styled(entry.name.as_str(), name_style),
                ]))
            })
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_symbol(if self.focused { "> " } else { "  " })
            .highlight_style(Theme::selected());

        let mut state = ListState::default().with_selected(Some(self.cursor));
        frame.render_stateful_widget(list, area, &mut state);
    }
}
