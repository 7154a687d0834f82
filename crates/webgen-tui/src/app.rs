//! Main application state and render loop.

use crossterm::{
    event::{DisableBracketedPaste, EnableBracketedPaste},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Tabs};
use ratatui::Terminal;
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{error, info, warn};

use webgen_client::GenerationClient;
use webgen_core::export;
use webgen_core::{Session, SessionEvent, ViewMode, WebgenConfig, WebgenError};

use crate::action::{Action, Focus, InputMode};
use crate::components::code_viewer::CodeViewerComponent;
use crate::components::description_input::DescriptionInputComponent;
use crate::components::file_explorer::FileExplorerComponent;
use crate::components::help::HelpComponent;
use crate::components::instruction_modal::InstructionModalComponent;
use crate::components::preview_pane::PreviewPaneComponent;
use crate::components::status_bar::StatusBarComponent;
use crate::components::Component;
use crate::event::{EventHandler, InputModeFlag};
use crate::preview_host;
use crate::theme::Theme;

/// Main application state.
pub struct App {
    config: WebgenConfig,
    /// Generation client, or why one could not be built.
    client: std::result::Result<Arc<GenerationClient>, String>,
    /// The one source of truth for files, selection and pane.
    session: Session,
    /// Set whenever `session` changes so components get re-synced.
    session_dirty: bool,
    focus: Focus,
    /// Whether the app should exit.
    should_quit: bool,
    /// Shared flag to tell the EventHandler which key-mapping to use.
    input_mode_flag: InputModeFlag,

    // Components
    description: DescriptionInputComponent,
    explorer: FileExplorerComponent,
    code_viewer: CodeViewerComponent,
    preview: PreviewPaneComponent,
    instructions: InstructionModalComponent,
    status_bar: StatusBarComponent,
    help: HelpComponent,
}

impl App {
    pub fn new(config: WebgenConfig) -> Self {
        let client = GenerationClient::from_config(&config)
            .map(Arc::new)
            .map_err(|e| {
                warn!("Generation client unavailable: {}", e);
                e.to_string()
            });

        Self {
            config,
            client,
            session: Session::new(),
            session_dirty: true,
            focus: Focus::Description,
            should_quit: false,
            input_mode_flag: InputModeFlag::new(),
            description: DescriptionInputComponent::new(),
            explorer: FileExplorerComponent::new(),
            code_viewer: CodeViewerComponent::new(),
            preview: PreviewPaneComponent::new(),
            instructions: InstructionModalComponent::new(),
            status_bar: StatusBarComponent::new(),
            help: HelpComponent::new(),
        }
    }

    /// Pre-fill the description from CLI args.
    pub fn set_initial_description(&mut self, description: String) {
        self.description.set_text(description);
    }

    /// Run the TUI application.
    pub async fn run(&mut self) -> anyhow::Result<()> {
        // Set up terminal.
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        // Create the action channel.
        let (tx, mut rx) = mpsc::unbounded_channel::<Action>();

        let event_tx = tx.clone();
        let mode_flag = self.input_mode_flag.clone();
        let event_handler = EventHandler::new(event_tx, Duration::from_millis(100), mode_flag);
        tokio::spawn(async move {
            event_handler.run().await;
        });

        if let Err(ref reason) = self.client {
            let _ = tx.send(Action::SetStatus(reason.clone()));
        }

        self.sync_components();
        self.sync_input_mode();

        // Main loop.
        loop {
            terminal.draw(|frame| {
                self.render(frame);
            })?;

            if let Some(action) = rx.recv().await {
                self.handle_action(&action, &tx);

                if self.should_quit {
                    break;
                }
            }
        }

        // Restore terminal.
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableBracketedPaste
        )?;
        terminal.show_cursor()?;

        Ok(())
    }

    /// Determine and set the correct input mode. Called after every action.
    fn sync_input_mode(&self) {
        self.input_mode_flag.set(self.current_input_mode());
    }

    fn current_input_mode(&self) -> InputMode {
        // Dialogs need Esc and other keys as shortcuts.
        if self.help.visible || self.instructions.visible {
            return InputMode::Normal;
        }
        if self.description.wants_input() {
            InputMode::Editing
        } else {
            InputMode::Normal
        }
    }

    fn apply(&mut self, event: SessionEvent) {
        self.session = std::mem::take(&mut self.session).apply(event);
        self.session_dirty = true;
    }

    /// Push session state into the components that display it.
    fn sync_components(&mut self) {
        self.description.generating = self.session.is_generating();
        self.description.error = self.session.error().map(str::to_string);

        self.description.focused = self.focus == Focus::Description;
        self.explorer.focused = self.focus == Focus::Explorer;
        self.code_viewer.focused = self.focus == Focus::Viewer;
        self.preview.focused = self.focus == Focus::Viewer;
        self.status_bar.focus = self.focus;

        if !self.session_dirty {
            return;
        }
        self.session_dirty = false;

        let store = self.session.store();
        self.explorer
            .sync(store.explorer_entries(), store.selected_path());
        self.code_viewer.sync(store.selected_file());

        // The preview document is only built while the rendered pane is showing.
        if self.session.view() == ViewMode::Rendered {
            let document = self
                .session
                .preview(&self.config.preview.css_framework_url);
            self.preview.set_document(document);
        }
    }

    fn set_focus(&mut self, focus: Focus) {
        self.focus = focus;
    }

    fn status(&mut self, message: impl Into<String>) {
        self.status_bar.message = message.into();
    }

    /// Dispatch an action to all relevant components.
    fn handle_action(&mut self, action: &Action, tx: &mpsc::UnboundedSender<Action>) {
        if let Action::Quit = action {
            self.should_quit = true;
            return;
        }

        // Overlays swallow keys while they are open.
        if self.help.visible && !action.is_background() {
            self.help.handle_action(action);
            self.sync_input_mode();
            return;
        }
        if self.instructions.visible && !action.is_background() {
            self.instructions.handle_action(action);
            self.sync_input_mode();
            return;
        }

        // Global actions first.
        let mut forward = true;
        match action {
            Action::ToggleHelp => {
                self.help.handle_action(action);
                forward = false;
            }
            Action::ToggleInstructions => {
                self.instructions.handle_action(action);
                forward = false;
            }
            Action::FocusNext => {
                self.set_focus(self.focus.next());
                forward = false;
            }
            Action::FocusPrev => {
                self.set_focus(self.focus.prev());
                forward = false;
            }
            Action::EditDescription => self.set_focus(Focus::Description),
            Action::LeaveInput => self.set_focus(Focus::Explorer),
            Action::Dismiss => {
                if self.session.error().is_some() {
                    self.apply(SessionEvent::ErrorDismissed);
                }
            }
            Action::Generate => {
                self.start_generation(tx);
                forward = false;
            }
            Action::GenerationSucceeded(project) => {
                let count = project.files.len();
                self.apply(SessionEvent::GenerationSucceeded(*project.clone()));
                self.set_focus(Focus::Explorer);
                self.status(format!(
                    "Generated {count} file{}. e export · o open preview",
                    if count == 1 { "" } else { "s" }
                ));
            }
            Action::GenerationFailed(message) => {
                self.apply(SessionEvent::GenerationFailed(message.clone()));
                self.status("Generation failed. Esc to dismiss.");
            }
            Action::PickFile(path) => {
                self.apply(SessionEvent::FilePicked(path.clone()));
                self.set_focus(Focus::Viewer);
            }
            Action::ShowSource => self.apply(SessionEvent::PaneSwitched(ViewMode::Source)),
            Action::ShowPreview => self.show_preview(),
            Action::TogglePane => match self.session.view() {
                ViewMode::Source => self.show_preview(),
                ViewMode::Rendered => self.apply(SessionEvent::PaneSwitched(ViewMode::Source)),
            },
            Action::OpenPreview => self.open_preview(),
            Action::ExportProject => self.export_project(),
            _ => {}
        }

        // Forward input and scrolling to the focused region.
        let result = if forward {
            match self.focus {
                Focus::Description => self.description.handle_action(action),
                Focus::Explorer => self.explorer.handle_action(action),
                Focus::Viewer => match self.session.view() {
                    ViewMode::Source => self.code_viewer.handle_action(action),
                    ViewMode::Rendered => self.preview.handle_action(action),
                },
            }
        } else {
            None
        };

        // The spinner ticks regardless of focus.
        if matches!(action, Action::Tick) && self.focus != Focus::Description {
            self.description.handle_action(action);
        }
        self.status_bar.handle_action(action);

        self.sync_components();
        self.sync_input_mode();

        // Handle chained actions from components.
        if let Some(chained) = result {
            self.handle_action(&chained, tx);
        }
    }

    fn show_preview(&mut self) {
        if self.session.can_render() {
            self.apply(SessionEvent::PaneSwitched(ViewMode::Rendered));
        } else {
            self.status("Nothing to preview yet. Generate a project first.");
        }
    }

    /// Validate the description and spawn the single generation task.
    fn start_generation(&mut self, tx: &mpsc::UnboundedSender<Action>) {
        let description = self.description.text.clone();

        match self.session.request_generation(&description) {
            Ok(()) => {}
            Err(WebgenError::Busy) => {
                self.status(WebgenError::Busy.to_string());
                return;
            }
            Err(other) => {
                self.apply(SessionEvent::GenerationFailed(other.to_string()));
                return;
            }
        }

        let client = match &self.client {
            Ok(client) => Arc::clone(client),
            Err(reason) => {
                let reason = reason.clone();
                self.apply(SessionEvent::GenerationFailed(reason));
                return;
            }
        };

        self.apply(SessionEvent::GenerationStarted);
        self.status(format!("Generating with {}...", client.model()));
        info!(chars = description.len(), "Generation started");

        let tx = tx.clone();
        tokio::spawn(async move {
            match client.generate(&description).await {
                Ok(project) => {
                    let _ = tx.send(Action::GenerationSucceeded(Box::new(project)));
                }
                Err(e) => {
                    error!("Generation failed: {}", e);
                    let _ = tx.send(Action::GenerationFailed(e.to_string()));
                }
            }
        });
    }

    fn open_preview(&mut self) {
        let document = self
            .session
            .preview(&self.config.preview.css_framework_url);
        let Some(html) = document.html() else {
            self.status("Nothing to preview yet. Generate a project first.");
            return;
        };
        match preview_host::publish_and_open(html) {
            Ok(path) => self.status(format!("Preview opened: {}", path.display())),
            Err(e) => {
                warn!("Could not open preview: {}", e);
                self.status(format!("Could not open preview: {e}"));
            }
        }
    }

    fn export_project(&mut self) {
        let files = self.session.store().files();
        if files.is_empty() {
            self.status("Nothing to export yet. Generate a project first.");
            return;
        }

        let outcome = self.config.export_dir().and_then(|parent| {
            export::export_project(files, &parent, &self.config.export.project_name)
        });
        match outcome {
            Ok(archive) => {
                let count = files.len();
                let location = archive.display().to_string();
                self.status(format!("Exported {count} files to {location}"));
                self.instructions.export_location = Some(location);
                self.instructions.visible = true;
            }
            Err(e) => {
                error!("Export failed: {}", e);
                self.status(e.to_string());
            }
        }
    }

    /// Render the full UI.
    fn render(&self, frame: &mut ratatui::Frame) {
        let area = frame.area();

        let chunks = Layout::vertical([
            Constraint::Length(1), // Title
            Constraint::Min(10),   // Main content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

        self.render_title(frame, chunks[0]);

        let columns = Layout::horizontal([Constraint::Percentage(35), Constraint::Percentage(65)])
            .split(chunks[1]);

        let left = Layout::vertical([Constraint::Min(10), Constraint::Percentage(45)])
            .split(columns[0]);
        self.description.render(frame, left[0]);
        self.explorer.render(frame, left[1]);

        let right = Layout::vertical([Constraint::Length(1), Constraint::Min(3)]).split(columns[1]);
        self.render_tabs(frame, right[0]);
        match self.session.view() {
            ViewMode::Source => self.code_viewer.render(frame, right[1]),
            ViewMode::Rendered => self.preview.render(frame, right[1]),
        }

        self.status_bar.render(frame, chunks[2]);

        // Overlays (rendered on top)
        self.instructions.render(frame, area);
        self.help.render(frame, area);
    }

    fn render_title(&self, frame: &mut ratatui::Frame, area: Rect) {
        let mut spans = vec![
            Span::styled(" webgen ", Theme::title()),
            Span::styled(" AI website generator", Theme::muted()),
        ];
        if let Some(at) = self.session.generated_at() {
            spans.push(Span::styled(
                format!("  · generated {}", at.format("%H:%M:%S")),
                Theme::dim(),
            ));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    /// Render the Code | Preview tab bar. Preview is struck out until there
    /// is something to render.
    fn render_tabs(&self, frame: &mut ratatui::Frame, area: Rect) {
        let current = self.session.view();
        let titles: Vec<Line> = ViewMode::all()
            .iter()
            .map(|mode| {
                let style = if *mode == current {
                    Theme::tab_active()
                } else if *mode == ViewMode::Rendered && !self.session.can_render() {
                    Theme::tab_disabled()
                } else {
                    Theme::tab_inactive()
                };
                Line::from(Span::styled(mode.label(), style))
            })
            .collect();

        let tabs = Tabs::new(titles)
            .select(current.index())
            .divider(Span::styled(" | ", Theme::dim()))
            .highlight_style(Theme::tab_active());

        frame.render_widget(tabs, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use webgen_core::{GeneratedFile, ProjectData};

    fn app() -> App {
        let mut config = WebgenConfig::default();
        config.api_keys.gemini = "test-key".to_string();
        App::new(config)
    }

    fn project(paths: &[&str]) -> Box<ProjectData> {
        Box::new(ProjectData::new(
            paths
                .iter()
                .map(|p| GeneratedFile::new(*p, format!("<!-- {p} -->")))
                .collect(),
        ))
    }

    #[test]
    fn blank_description_shows_validation_error() {
        let mut app = app();
        let (tx, _rx) = mpsc::unbounded_channel();

        app.handle_action(&Action::Generate, &tx);

        assert_eq!(
            app.description.error.as_deref(),
            Some("Please enter a project description.")
        );
        assert!(!app.session.is_generating());
    }

    #[test]
    fn blank_description_after_success_clears_project() {
        let mut app = app();
        let (tx, _rx) = mpsc::unbounded_channel();
        app.handle_action(
            &Action::GenerationSucceeded(project(&["index.html", "app.js"])),
            &tx,
        );
        assert_eq!(app.session.view(), ViewMode::Rendered);

        app.handle_action(&Action::Generate, &tx);

        assert!(app.session.store().is_empty());
        assert_eq!(app.session.store().selected_path(), None);
        assert_eq!(app.session.view(), ViewMode::Source);
        assert_eq!(
            app.description.error.as_deref(),
            Some("Please enter a project description.")
        );
    }

    #[test]
    fn export_writes_archive_and_shows_instructions() {
        let tmp = tempfile::tempdir().unwrap();
        let mut app = app();
        app.config.export.directory = tmp.path().display().to_string();
        let (tx, _rx) = mpsc::unbounded_channel();
        app.handle_action(
            &Action::GenerationSucceeded(project(&["index.html", "app.js"])),
            &tx,
        );

        app.handle_action(&Action::ExportProject, &tx);

        let archive = tmp.path().join("ai-generated-project.zip");
        assert!(archive.is_file());
        assert!(app.instructions.visible);
        assert_eq!(
            app.instructions.export_location.as_deref(),
            Some(archive.display().to_string().as_str())
        );
    }

    #[test]
    fn success_loads_files_and_renders_entry() {
        let mut app = app();
        let (tx, _rx) = mpsc::unbounded_channel();

        app.handle_action(
            &Action::GenerationSucceeded(project(&["style.css", "index.html"])),
            &tx,
        );

        assert_eq!(app.session.view(), ViewMode::Rendered);
        assert_eq!(app.focus, Focus::Explorer);
        assert_eq!(app.current_input_mode(), InputMode::Normal);
        assert!(matches!(
            app.preview.document(),
            webgen_core::PreviewDocument::Entry { .. }
        ));
    }

    #[test]
    fn picking_a_file_switches_to_source() {
        let mut app = app();
        let (tx, _rx) = mpsc::unbounded_channel();
        app.handle_action(
            &Action::GenerationSucceeded(project(&["index.html", "app.js"])),
            &tx,
        );

        app.handle_action(&Action::PickFile("app.js".into()), &tx);

        assert_eq!(app.session.view(), ViewMode::Source);
        assert_eq!(app.session.store().selected_path(), Some("app.js"));
        assert_eq!(app.focus, Focus::Viewer);
    }

    #[test]
    fn preview_is_refused_without_files() {
        let mut app = app();
        let (tx, _rx) = mpsc::unbounded_channel();

        app.handle_action(&Action::ShowPreview, &tx);

        assert_eq!(app.session.view(), ViewMode::Source);
        assert!(app.status_bar.message.contains("Nothing to preview"));
    }

    #[test]
    fn failure_clears_project_and_esc_dismisses() {
        let mut app = app();
        let (tx, _rx) = mpsc::unbounded_channel();
        app.handle_action(&Action::GenerationSucceeded(project(&["a.js"])), &tx);

        app.handle_action(&Action::GenerationFailed("quota exceeded".into()), &tx);
        assert!(app.session.store().is_empty());
        assert_eq!(app.description.error.as_deref(), Some("quota exceeded"));

        app.handle_action(&Action::Dismiss, &tx);
        assert!(app.description.error.is_none());
    }

    #[test]
    fn editing_mode_follows_description_focus() {
        let mut app = app();
        let (tx, _rx) = mpsc::unbounded_channel();
        assert_eq!(app.current_input_mode(), InputMode::Editing);

        app.handle_action(&Action::LeaveInput, &tx);
        assert_eq!(app.current_input_mode(), InputMode::Normal);

        app.handle_action(&Action::EditDescription, &tx);
        assert_eq!(app.current_input_mode(), InputMode::Editing);
    }

    #[test]
    fn missing_api_key_fails_generation_with_config_message() {
        let mut app = App::new(WebgenConfig::default());
        // A key in the environment would make the client buildable.
        if app.client.is_ok() {
            return;
        }
        let (tx, _rx) = mpsc::unbounded_channel();
        app.set_initial_description("a blog".into());

        app.handle_action(&Action::Generate, &tx);

        let error = app.description.error.clone().unwrap_or_default();
        assert!(error.contains("API key"), "{error}");
        assert!(!app.session.is_generating());
    }
}
