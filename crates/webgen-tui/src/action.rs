//! Action enum — the central message bus for the TUI.
//! All user interactions and async results flow through here.

use webgen_core::ProjectData;

/// Every possible action that can occur in the application.
#[derive(Debug, Clone)]
pub enum Action {
    // ── Global ──────────────────────────────────────────────
    /// Quit the application.
    Quit,
    /// Toggle help overlay.
    ToggleHelp,
    /// Toggle the "open in VS Code" instructions.
    ToggleInstructions,
    /// Display a status message in the status bar.
    SetStatus(String),
    /// Clear the status message.
    ClearStatus,
    /// A tick event for animations.
    Tick,
    /// Close whatever overlay or alert is on top (Esc in normal mode).
    Dismiss,

    // ── Focus ───────────────────────────────────────────────
    FocusNext,
    FocusPrev,
    /// Jump into the description field.
    EditDescription,
    /// Leave the description field (Esc in editing mode).
    LeaveInput,

    // ── Generation ──────────────────────────────────────────
    /// User asked to generate from the current description.
    Generate,
    /// Generation finished with a project.
    GenerationSucceeded(Box<ProjectData>),
    /// Generation failed; the message is shown to the user.
    GenerationFailed(String),

    // ── Files and panes ─────────────────────────────────────
    /// User picked a file in the explorer.
    PickFile(String),
    ShowSource,
    ShowPreview,
    TogglePane,
    /// Open the preview document in the system browser.
    OpenPreview,
    /// Write the project to disk.
    ExportProject,

    // ── Text Input ───────────────────────────────────────────
    /// A character was typed (only sent when in input mode).
    CharInput(char),
    /// Backspace pressed (only sent when in input mode).
    BackspaceInput,
    /// Delete word (Ctrl+W).
    DeleteWord,
    /// Insert a newline in the description.
    NewlineInput,
    /// Paste text from clipboard (Ctrl+V in editing mode).
    PasteInput,
    /// Bulk paste from bracketed paste mode (terminal sends entire text at once).
    PasteBulk(String),

    // ── Scrolling / Selection ───────────────────────────────
    ScrollUp,
    ScrollDown,
    PageUp,
    PageDown,
    Confirm,
}

impl Action {
    /// Actions that arrive without a keypress. Overlays ignore them instead
    /// of treating them as "any key".
    pub fn is_background(&self) -> bool {
        matches!(
            self,
            Action::Tick
                | Action::SetStatus(_)
                | Action::ClearStatus
                | Action::GenerationSucceeded(_)
                | Action::GenerationFailed(_)
        )
    }
}

/// Whether the app is in a text-input mode where raw keys should
/// be forwarded to the active component instead of interpreted as
/// global shortcuts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Normal mode — keys are global shortcuts.
    Normal,
    /// Text input mode — keys go to the description field.
    Editing,
}

/// The three focusable regions of the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Description,
    Explorer,
    Viewer,
}

impl Focus {
    pub fn next(&self) -> Focus {
        match self {
            Focus::Description => Focus::Explorer,
            Focus::Explorer => Focus::Viewer,
            Focus::Viewer => Focus::Description,
        }
    }

    pub fn prev(&self) -> Focus {
        match self {
            Focus::Description => Focus::Viewer,
            Focus::Explorer => Focus::Description,
            Focus::Viewer => Focus::Explorer,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Focus::Description => "Describe",
            Focus::Explorer => "Files",
            Focus::Viewer => "View",
        }
    }
}
