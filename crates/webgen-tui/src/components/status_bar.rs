//! Bottom line: focused region, last status message, key hints.

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::action::{Action, Focus};
use crate::components::Component;
use crate::theme::Theme;

const HINTS: &str = "?·tab·e·i·q ";

pub struct StatusBarComponent {
    pub message: String,
    pub focus: Focus,
}

impl StatusBarComponent {
    pub fn new() -> Self {
        Self {
            message: "Describe the website you want, then press Ctrl+S.".to_string(),
            focus: Focus::Description,
        }
    }
}

impl Component for StatusBarComponent {
    fn handle_action(&mut self, action: &Action) -> Option<Action> {
        match action {
            Action::SetStatus(msg) => self.message = msg.clone(),
            Action::ClearStatus => self.message.clear(),
            _ => {}
        }
        None
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let badge = format!(" {} ", self.focus.label());
        let [left, right] = Layout::horizontal([
            Constraint::Min(0),
            Constraint::Length(HINTS.chars().count() as u16),
        ])
        .areas(area);

        let budget = (left.width as usize).saturating_sub(badge.chars().count() + 2);
        let line = Line::from(vec![
            Span::styled(badge, Theme::muted()),
            Span::raw("  "),
            Span::styled(truncate(&self.message, budget), Theme::dim()),
        ]);
        frame.render_widget(Paragraph::new(line).style(Theme::status_bar()), left);
        frame.render_widget(Paragraph::new(Span::styled(HINTS, Theme::key_hint())), right);
    }
}

/// Shorten to at most `budget` characters, marking the cut with "...".
fn truncate(message: &str, budget: usize) -> String {
    if message.chars().count() <= budget {
        return message.to_string();
    }
    if budget <= 3 {
        return String::new();
    }
    let kept: String = message.chars().take(budget - 3).collect();
    format!("{kept}...")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("ééééééééé", 6), "ééé...");
        assert_eq!(truncate("anything", 2), "");
    }

    #[test]
    fn status_messages_replace_and_clear() {
        let mut bar = StatusBarComponent::new();
        bar.handle_action(&Action::SetStatus("Exported".into()));
        assert_eq!(bar.message, "Exported");
        bar.handle_action(&Action::ClearStatus);
        assert!(bar.message.is_empty());
    }
}
