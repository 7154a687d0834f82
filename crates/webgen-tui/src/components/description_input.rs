//! Description field — where the user describes the website to generate.
//!
//! Features:
//! - Multi-line text area with word wrap and a scroll viewport
//! - Enter inserts newlines, Ctrl+S (or Ctrl/Alt+Enter) submits
//! - Bracketed paste and Ctrl+V clipboard paste
//! - Spinner while a generation is in flight, error alert when one fails

use std::process::Command;

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use crate::action::Action;
use crate::components::Component;
use crate::theme::Theme;

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Clipboard readers tried in order for Ctrl+V.
const CLIPBOARD_READERS: &[(&str, &[&str])] = &[
    ("pbpaste", &[]),
    ("wl-paste", &["--no-newline"]),
    ("xclip", &["-selection", "clipboard", "-o"]),
];

pub struct DescriptionInputComponent {
    /// Current description (may contain newlines).
    pub text: String,
    /// Cursor position (byte offset) within `text`.
    cursor: usize,
    /// Whether the description region has focus.
    pub focused: bool,
    /// Whether a generation is in flight.
    pub generating: bool,
    /// Message of the last failed generation, until dismissed.
    pub error: Option<String>,
    /// Scroll offset (first visible line).
    scroll: usize,
    spinner_frame: usize,
}

impl DescriptionInputComponent {
    pub fn new() -> Self {
        Self {
            text: String::new(),
            cursor: 0,
            focused: true,
            generating: false,
            error: None,
            scroll: 0,
            spinner_frame: 0,
        }
    }

    /// Replace the whole description and put the cursor at the end.
    pub fn set_text(&mut self, text: String) {
        self.cursor = text.len();
        self.text = text;
        self.ensure_cursor_visible();
    }

    /// Whether this component wants to capture raw key input.
    pub fn wants_input(&self) -> bool {
        self.focused && !self.generating
    }

    fn clamp_cursor(&mut self) {
        if self.cursor > self.text.len() {
            self.cursor = self.text.len();
        }
    }

    fn insert_char(&mut self, c: char) {
        self.clamp_cursor();
        self.text.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    /// Delete the character before the cursor.
    fn delete_char(&mut self) {
        self.clamp_cursor();
        if self.cursor > 0 {
            let prev = self.text[..self.cursor]
                .char_indices()
                .next_back()
                .map(|(i, _)| i)
                .unwrap_or(0);
            self.text.remove(prev);
            self.cursor = prev;
        }
    }

    /// Delete the word before the cursor (Ctrl+W).
    fn delete_word(&mut self) {
        self.clamp_cursor();
        if self.cursor == 0 {
            return;
        }
        let bytes = self.text.as_bytes();
        let mut end = self.cursor;
        while end > 0 && bytes[end - 1].is_ascii_whitespace() {
            end -= 1;
        }
        let mut start = end;
        while start > 0 && !bytes[start - 1].is_ascii_whitespace() {
            start -= 1;
        }
        self.text.drain(start..self.cursor);
        self.cursor = start;
    }

    fn insert_str(&mut self, s: &str) {
        self.clamp_cursor();
        // Terminals deliver pasted line breaks as \r.
        let normalized = s.replace("\r\n", "\n").replace('\r', "\n");
        self.text.insert_str(self.cursor, &normalized);
        self.cursor += normalized.len();
        self.ensure_cursor_visible();
    }

    /// Line number and byte column of the cursor.
    fn cursor_line_col(&self) -> (usize, usize) {
        let before = &self.text[..self.cursor.min(self.text.len())];
        let line = before.matches('\n').count();
        let col = before
            .rfind('\n')
            .map(|p| before.len() - p - 1)
            .unwrap_or(before.len());
        (line, col)
    }

    fn move_to_line(&mut self, line: usize, col: usize) {
        let lines: Vec<&str> = self.text.split('\n').collect();
        let Some(target) = lines.get(line) else {
            return;
        };
        let start: usize = lines[..line].iter().map(|l| l.len() + 1).sum();
        self.cursor = start + floor_char_boundary(target, col);
        self.ensure_cursor_visible();
    }

    fn cursor_up(&mut self) {
        let (line, col) = self.cursor_line_col();
        if line > 0 {
            self.move_to_line(line - 1, col);
        }
    }

    fn cursor_down(&mut self) {
        let (line, col) = self.cursor_line_col();
        self.move_to_line(line + 1, col);
    }

    /// Keep the cursor's line inside a conservative viewport estimate.
    /// Render adjusts further once the real height is known.
    fn ensure_cursor_visible(&mut self) {
        let (cursor_line, _) = self.cursor_line_col();
        if cursor_line < self.scroll {
            self.scroll = cursor_line;
        }
        let estimated_viewport = 6usize;
        if cursor_line >= self.scroll + estimated_viewport {
            self.scroll = cursor_line.saturating_sub(estimated_viewport - 1);
        }
    }
}

impl Component for DescriptionInputComponent {
    fn handle_action(&mut self, action: &Action) -> Option<Action> {
        if let Action::Tick = action {
            if self.generating {
                self.spinner_frame = (self.spinner_frame + 1) % SPINNER.len();
            }
            return None;
        }
        if !self.wants_input() {
            return None;
        }

        match action {
            Action::CharInput(c) => self.insert_char(*c),
            Action::BackspaceInput => {
                self.delete_char();
                self.ensure_cursor_visible();
            }
            Action::DeleteWord => {
                self.delete_word();
                self.ensure_cursor_visible();
            }
            Action::NewlineInput => {
                self.insert_char('\n');
                self.ensure_cursor_visible();
            }
            Action::PasteInput => match read_clipboard() {
                Some(text) => self.insert_str(&text),
                None => {
                    return Some(Action::SetStatus(
                        "Clipboard is empty or unavailable".to_string(),
                    ))
                }
            },
            Action::PasteBulk(text) => {
                if !text.is_empty() {
                    self.insert_str(text);
                }
            }
            Action::ScrollUp => self.cursor_up(),
            Action::ScrollDown => self.cursor_down(),
            _ => {}
        }
        None
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let status_height = if self.generating {
            1
        } else if self.error.is_some() {
            5
        } else {
            0
        };

        let chunks = Layout::vertical([
            Constraint::Min(5),                // Description field
            Constraint::Length(1),             // Instructions
            Constraint::Length(status_height), // Spinner or error alert
        ])
        .split(area);

        self.render_field(frame, chunks[0]);

        let instructions = if self.wants_input() {
            Line::from(vec![
                Span::styled(" ctrl+s", Theme::key_hint()),
                Span::styled(" generate  ", Theme::dim()),
                Span::styled("ctrl+v", Theme::key_hint()),
                Span::styled(" paste  ", Theme::dim()),
                Span::styled("esc", Theme::key_hint()),
                Span::styled(" done", Theme::dim()),
            ])
        } else {
            Line::from(vec![
                Span::styled(" d", Theme::key_hint()),
                Span::styled(" edit  ", Theme::dim()),
                Span::styled("g", Theme::key_hint()),
                Span::styled(" generate", Theme::dim()),
            ])
        };
        frame.render_widget(Paragraph::new(instructions), chunks[1]);

        if self.generating {
            let spinner = Paragraph::new(Line::from(vec![
                Span::styled(format!(" {} ", SPINNER[self.spinner_frame]), Theme::title()),
                Span::styled("Generating project...", Theme::warning_text()),
            ]));
            frame.render_widget(spinner, chunks[2]);
        } else if let Some(ref error) = self.error {
            let alert = Paragraph::new(Span::styled(error.as_str(), Theme::error_text()))
                .wrap(Wrap { trim: true })
                .block(
                    Block::default()
                        .title(" Error ")
                        .title_style(Theme::error_text())
                        .title_bottom(Line::from(Span::styled(" esc dismiss ", Theme::dim())))
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(Theme::error())),
                );
            frame.render_widget(alert, chunks[2]);
        }
    }
}

impl DescriptionInputComponent {
    /// Render the multi-line text area with cursor, wrap and scroll.
    fn render_field(&self, frame: &mut Frame, area: Rect) {
        let is_focused = self.wants_input();
        let border_style = if self.focused {
            Theme::border_focused()
        } else {
            Theme::border()
        };

        let title = if self.text.is_empty() {
            " Describe your website ".to_string()
        } else {
            format!(" Description ({} chars) ", self.text.chars().count())
        };

        let block = Block::default()
            .title(title.clone())
            .borders(Borders::ALL)
            .border_style(border_style);

        let inner_area = block.inner(area);
        let viewport_height = inner_area.height as usize;

        if self.text.is_empty() && !is_focused {
            let placeholder = Paragraph::new(Span::styled(
                "e.g. A personal portfolio site with a hero section, a project \
                 grid and a contact form, styled with a dark theme.",
                Theme::dim(),
            ))
            .wrap(Wrap { trim: true })
            .block(block);
            frame.render_widget(placeholder, area);
            return;
        }

        if !is_focused {
            let display = Paragraph::new(self.text.as_str())
                .style(Theme::normal())
                .wrap(Wrap { trim: false })
                .scroll((self.scroll as u16, 0))
                .block(block);
            frame.render_widget(display, area);
            return;
        }

        let wrap_width = match inner_area.width as usize {
            0 => 80,
            w => w,
        };

        struct VisualLine {
            text: String,
            cursor_col: Option<usize>,
        }

        let (cursor_logical, cursor_col_in_logical) = self.cursor_line_col();
        let mut visual_lines: Vec<VisualLine> = Vec::new();
        let mut cursor_visual_line = 0usize;

        for (li, logical_text) in self.text.split('\n').enumerate() {
            let is_cursor_logical = li == cursor_logical;
            let mut col_offset = 0usize;
            for segment in wrap_line(logical_text, wrap_width) {
                let seg_len = segment.len();
                let cursor_col = if is_cursor_logical {
                    let c = cursor_col_in_logical;
                    let at_wrap_point =
                        c == col_offset + seg_len && col_offset + seg_len < logical_text.len();
                    if c >= col_offset && c <= col_offset + seg_len && !at_wrap_point {
                        cursor_visual_line = visual_lines.len();
                        Some(c - col_offset)
                    } else {
                        None
                    }
                } else {
                    None
                };
                visual_lines.push(VisualLine {
                    text: segment,
                    cursor_col,
                });
                col_offset += seg_len;
            }
        }

        let total_visual = visual_lines.len();

        let scroll = {
            let mut s = self.scroll;
            if cursor_visual_line < s {
                s = cursor_visual_line;
            }
            if viewport_height > 0 && cursor_visual_line >= s + viewport_height {
                s = cursor_visual_line + 1 - viewport_height;
            }
            s
        };

        let rendered_lines: Vec<Line> = visual_lines
            .iter()
            .skip(scroll)
            .take(viewport_height)
            .map(|vl| match vl.cursor_col {
                Some(col) => {
                    let (before, after) = vl.text.split_at(col.min(vl.text.len()));
                    let mut chars = after.chars();
                    let cursor_char = chars.next().map(String::from).unwrap_or_else(|| " ".into());
                    Line::from(vec![
                        Span::styled(before.to_string(), Theme::normal()),
                        Span::styled(cursor_char, Theme::cursor()),
                        Span::styled(chars.as_str().to_string(), Theme::normal()),
                    ])
                }
                None => Line::from(Span::styled(vl.text.clone(), Theme::normal())),
            })
            .collect();

        let has_more_below = scroll + viewport_height < total_visual;
        let scroll_hint = if scroll > 0 && has_more_below {
            format!(" [{}/{}] ", scroll + viewport_height, total_visual)
        } else if has_more_below {
            format!(" [{} more below] ", total_visual - scroll - viewport_height)
        } else if scroll > 0 {
            format!(" [{} above] ", scroll)
        } else {
            String::new()
        };

        let mut block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(border_style);
        if !scroll_hint.is_empty() {
            block = block.title_bottom(Line::from(Span::styled(scroll_hint, Theme::dim())));
        }

        frame.render_widget(Paragraph::new(rendered_lines).block(block), area);
    }
}

fn read_clipboard() -> Option<String> {
    CLIPBOARD_READERS.iter().find_map(|(cmd, args)| {
        let output = Command::new(cmd).args(*args).output().ok()?;
        if !output.status.success() {
            return None;
        }
        String::from_utf8(output.stdout).ok().filter(|t| !t.is_empty())
    })
}

/// Largest char boundary in `text` at or below `index`.
fn floor_char_boundary(text: &str, index: usize) -> usize {
    let mut i = index.min(text.len());
    while !text.is_char_boundary(i) {
        i -= 1;
    }
    i
}

/// Word-wrap one logical line to `max_width` columns. Breaks at the last
/// space when that keeps at least a third of the line, otherwise hard-breaks.
/// Always returns at least one segment; segments concatenate back to `text`.
fn wrap_line(text: &str, max_width: usize) -> Vec<String> {
    if max_width == 0 || text.chars().count() <= max_width {
        return vec![text.to_string()];
    }

    let mut lines = Vec::new();
    let mut remaining = text;

    while remaining.chars().count() > max_width {
        let limit = remaining
            .char_indices()
            .nth(max_width)
            .map(|(i, _)| i)
            .unwrap_or(remaining.len());
        let break_pos = match remaining[..limit].rfind(' ') {
            Some(pos) if pos > limit / 3 => pos + 1,
            _ => limit,
        };
        let (line, rest) = remaining.split_at(break_pos);
        lines.push(line.to_string());
        remaining = rest;
    }
    lines.push(remaining.to_string());
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(text: &str) -> DescriptionInputComponent {
        let mut input = DescriptionInputComponent::new();
        for c in text.chars() {
            input.handle_action(&Action::CharInput(c));
        }
        input
    }

    #[test]
    fn typing_and_backspace_handle_multibyte() {
        let mut input = typed("café");
        assert_eq!(input.text, "café");
        input.handle_action(&Action::BackspaceInput);
        assert_eq!(input.text, "caf");
    }

    #[test]
    fn delete_word_removes_last_word_and_trailing_space() {
        let mut input = typed("a landing page ");
        input.handle_action(&Action::DeleteWord);
        assert_eq!(input.text, "a landing ");
    }

    #[test]
    fn input_is_ignored_while_generating() {
        let mut input = typed("todo app");
        input.generating = true;
        assert!(!input.wants_input());
        input.handle_action(&Action::CharInput('!'));
        assert_eq!(input.text, "todo app");
    }

    #[test]
    fn newline_and_cursor_movement() {
        let mut input = typed("first line");
        input.handle_action(&Action::NewlineInput);
        for c in "ab".chars() {
            input.handle_action(&Action::CharInput(c));
        }
        input.handle_action(&Action::ScrollUp);
        assert_eq!(input.cursor_line_col(), (0, 2));
        input.handle_action(&Action::CharInput('X'));
        assert_eq!(input.text, "fiXrst line\nab");
        input.handle_action(&Action::ScrollDown);
        assert_eq!(input.cursor_line_col(), (1, 2));
    }

    #[test]
    fn bulk_paste_normalizes_carriage_returns() {
        let mut input = DescriptionInputComponent::new();
        input.handle_action(&Action::PasteBulk("one\r\ntwo\rthree".into()));
        assert_eq!(input.text, "one\ntwo\nthree");
    }

    #[test]
    fn wrap_line_prefers_spaces_and_keeps_text() {
        let wrapped = wrap_line("hello brave new world", 10);
        assert_eq!(wrapped, vec!["hello ", "brave new ", "world"]);
        assert_eq!(wrapped.concat(), "hello brave new world");

        let hard = wrap_line("ééééééé", 3);
        assert_eq!(hard, vec!["ééé", "ééé", "é"]);
        assert_eq!(wrap_line("", 5), vec![""]);
    }
}
