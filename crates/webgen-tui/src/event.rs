//! Terminal input: crossterm events in, Actions out.
//!
//! Keys map through one of two keymaps. In Normal mode letters are shortcuts;
//! in Editing mode they are text for the description field. The App decides
//! which applies and publishes it through an [`InputModeFlag`].

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

use crate::action::{Action, InputMode};

/// How long one blocking poll waits before giving the tick a chance.
const POLL_WINDOW: Duration = Duration::from_millis(50);

/// Input mode shared between the App (writer) and the EventHandler (reader).
#[derive(Debug, Clone, Default)]
pub struct InputModeFlag(Arc<AtomicU8>);

impl InputModeFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, mode: InputMode) {
        let raw = match mode {
            InputMode::Normal => 0,
            InputMode::Editing => 1,
        };
        self.0.store(raw, Ordering::Relaxed);
    }

    pub fn get(&self) -> InputMode {
        match self.0.load(Ordering::Relaxed) {
            1 => InputMode::Editing,
            _ => InputMode::Normal,
        }
    }
}

/// Reads terminal events and forwards them as Actions, plus a periodic Tick.
pub struct EventHandler {
    tx: mpsc::UnboundedSender<Action>,
    tick_rate: Duration,
    mode: InputModeFlag,
}

impl EventHandler {
    pub fn new(tx: mpsc::UnboundedSender<Action>, tick_rate: Duration, mode: InputModeFlag) -> Self {
        Self {
            tx,
            tick_rate,
            mode,
        }
    }

    /// Loop until the receiving side of the channel is gone.
    pub async fn run(&self) {
        let mut ticker = tokio::time::interval(self.tick_rate);

        loop {
            let action = tokio::select! {
                _ = ticker.tick() => Some(Action::Tick),
                polled = tokio::task::spawn_blocking(poll_terminal) => {
                    polled.ok().flatten().and_then(|ev| self.translate(ev))
                }
            };

            let Some(action) = action else { continue };
            if self.tx.send(action).is_err() {
                break;
            }
        }
    }

    fn translate(&self, event: Event) -> Option<Action> {
        match event {
            // Windows reports releases too; only presses count.
            Event::Key(key) if key.kind != KeyEventKind::Release => map_key(key, self.mode.get()),
            Event::Paste(text) => Some(Action::PasteBulk(text)),
            // Redraw on resize.
            Event::Resize(..) => Some(Action::Tick),
            _ => None,
        }
    }
}

fn poll_terminal() -> Option<Event> {
    match event::poll(POLL_WINDOW) {
        Ok(true) => event::read().ok(),
        _ => None,
    }
}

fn map_key(key: KeyEvent, mode: InputMode) -> Option<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }

    match mode {
        InputMode::Editing => map_key_editing(key),
        InputMode::Normal => map_key_normal(key),
    }
}

/// Editing keymap: everything printable is text.
fn map_key_editing(key: KeyEvent) -> Option<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('w') => Some(Action::DeleteWord),
            KeyCode::Char('v') => Some(Action::PasteInput),
            KeyCode::Char('s') => Some(Action::Generate),
            KeyCode::Enter => Some(Action::Generate),
            _ => None,
        };
    }

    // Many terminals cannot report Ctrl+Enter; Alt+Enter is the fallback.
    if key.modifiers.contains(KeyModifiers::ALT) && key.code == KeyCode::Enter {
        return Some(Action::Generate);
    }

    match key.code {
        KeyCode::Esc => Some(Action::LeaveInput),
        KeyCode::Tab => Some(Action::FocusNext),
        KeyCode::BackTab => Some(Action::FocusPrev),
        KeyCode::Enter => Some(Action::NewlineInput),
        KeyCode::Up => Some(Action::ScrollUp),
        KeyCode::Down => Some(Action::ScrollDown),
        KeyCode::Backspace => Some(Action::BackspaceInput),
        KeyCode::Char(c) => Some(Action::CharInput(c)),
        _ => None,
    }
}

/// Normal keymap: single-key shortcuts.
fn map_key_normal(key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Char('q') => Some(Action::Quit),
        KeyCode::Char('?') => Some(Action::ToggleHelp),
        KeyCode::Char('i') => Some(Action::ToggleInstructions),
        KeyCode::Tab => Some(Action::FocusNext),
        KeyCode::BackTab => Some(Action::FocusPrev),
        KeyCode::Up | KeyCode::Char('k') => Some(Action::ScrollUp),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::ScrollDown),
        KeyCode::PageUp => Some(Action::PageUp),
        KeyCode::PageDown => Some(Action::PageDown),
        KeyCode::Left | KeyCode::Right => Some(Action::TogglePane),
        KeyCode::Enter => Some(Action::Confirm),
        KeyCode::Esc | KeyCode::Char('x') => Some(Action::Dismiss),
        KeyCode::Char('c') => Some(Action::ShowSource),
        KeyCode::Char('p') => Some(Action::ShowPreview),
        KeyCode::Char('o') => Some(Action::OpenPreview),
        KeyCode::Char('e') => Some(Action::ExportProject),
        KeyCode::Char('g') => Some(Action::Generate),
        KeyCode::Char('d') | KeyCode::Char('/') => Some(Action::EditDescription),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn letters_are_text_while_editing() {
        assert!(matches!(
            map_key(key(KeyCode::Char('q')), InputMode::Editing),
            Some(Action::CharInput('q'))
        ));
        assert!(matches!(
            map_key(key(KeyCode::Char('q')), InputMode::Normal),
            Some(Action::Quit)
        ));
    }

    #[test]
    fn ctrl_s_submits_and_ctrl_c_quits_everywhere() {
        let ctrl_s = KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL);
        assert!(matches!(
            map_key(ctrl_s, InputMode::Editing),
            Some(Action::Generate)
        ));

        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(matches!(map_key(ctrl_c, InputMode::Editing), Some(Action::Quit)));
        assert!(matches!(map_key(ctrl_c, InputMode::Normal), Some(Action::Quit)));
    }

    #[test]
    fn pane_shortcuts_in_normal_mode() {
        assert!(matches!(
            map_key(key(KeyCode::Char('p')), InputMode::Normal),
            Some(Action::ShowPreview)
        ));
        assert!(matches!(
            map_key(key(KeyCode::Char('c')), InputMode::Normal),
            Some(Action::ShowSource)
        ));
        assert!(matches!(
            map_key(key(KeyCode::Esc), InputMode::Editing),
            Some(Action::LeaveInput)
        ));
    }

    #[test]
    fn mode_flag_is_shared_between_clones() {
        let flag = InputModeFlag::new();
        let reader = flag.clone();
        assert_eq!(reader.get(), InputMode::Normal);
        flag.set(InputMode::Editing);
        assert_eq!(reader.get(), InputMode::Editing);
    }
}
