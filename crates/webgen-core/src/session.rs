//! Session state machine: which project is loaded, which file is selected,
//! and which pane is showing.
//!
//! The UI owns exactly one [`Session`] and changes it only by applying
//! [`SessionEvent`]s, so every transition can be exercised without a terminal.

use chrono::{DateTime, Local};
use tracing::debug;

use crate::error::{Result, WebgenError};
use crate::preview;
use crate::project::{ProjectData, ProjectStore};
use crate::rules;

/// Which representation of the project the right-hand pane shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ViewMode {
    /// Raw text of the selected file.
    #[default]
    Source,
    /// The preview document.
    Rendered,
}

impl ViewMode {
    pub fn label(&self) -> &'static str {
        match self {
            ViewMode::Source => "Code",
            ViewMode::Rendered => "Preview",
        }
    }

    pub fn all() -> &'static [ViewMode] {
        &[ViewMode::Source, ViewMode::Rendered]
    }

    pub fn index(&self) -> usize {
        match self {
            ViewMode::Source => 0,
            ViewMode::Rendered => 1,
        }
    }
}

#[derive(Debug, Clone)]
pub enum SessionEvent {
    GenerationStarted,
    GenerationSucceeded(ProjectData),
    GenerationFailed(String),
    FilePicked(String),
    PaneSwitched(ViewMode),
    ErrorDismissed,
}

/// What the rendered pane should display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewDocument {
    /// Nothing generated yet; the UI shows its own placeholder.
    Empty,
    /// The project's own entry page.
    Entry { path: String, html: String },
    /// A fallback page assembled from the project's files.
    Synthesized { html: String },
}

impl PreviewDocument {
    pub fn html(&self) -> Option<&str> {
        match self {
            PreviewDocument::Empty => None,
            PreviewDocument::Entry { html, .. } | PreviewDocument::Synthesized { html } => {
                Some(html)
            }
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Session {
    store: ProjectStore,
    view: ViewMode,
    in_flight: bool,
    error: Option<String>,
    generated_at: Option<DateTime<Local>>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn store(&self) -> &ProjectStore {
        &self.store
    }

    pub fn view(&self) -> ViewMode {
        self.view
    }

    pub fn is_generating(&self) -> bool {
        self.in_flight
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn generated_at(&self) -> Option<DateTime<Local>> {
        self.generated_at
    }

    /// Whether the rendered pane may be shown.
    pub fn can_render(&self) -> bool {
        !self.store.is_empty()
    }

    /// Gate a new generation: the description must be non-blank and nothing
    /// may already be in flight.
    pub fn request_generation(&self, description: &str) -> Result<()> {
        if self.in_flight {
            return Err(WebgenError::Busy);
        }
        if description.trim().is_empty() {
            return Err(WebgenError::Validation(
                "Please enter a project description.".to_string(),
            ));
        }
        Ok(())
    }

    /// Apply one event and return the resulting state.
    pub fn apply(mut self, event: SessionEvent) -> Self {
        match event {
            SessionEvent::GenerationStarted => {
                if self.in_flight {
                    debug!("Ignoring generation start while one is in flight");
                    return self;
                }
                self.store.clear();
                self.view = ViewMode::Source;
                self.error = None;
                self.in_flight = true;
            }
            SessionEvent::GenerationSucceeded(project) => {
                self.in_flight = false;
                self.generated_at = Some(Local::now());
                self.store.replace_all(project.files);

                let entry = rules::find_entry_file(self.store.files()).map(|f| f.path.clone());
                if let Some(path) = entry {
                    self.store.select(Some(path.as_str()));
                    self.view = ViewMode::Rendered;
                } else {
                    let default = rules::default_file(self.store.files()).map(|f| f.path.clone());
                    self.store.select(default.as_deref());
                    self.view = ViewMode::Source;
                }
                debug!(
                    files = self.store.len(),
                    selected = ?self.store.selected_path(),
                    view = ?self.view,
                    "Project loaded"
                );
            }
            SessionEvent::GenerationFailed(message) => {
                self.in_flight = false;
                self.store.clear();
                self.view = ViewMode::Source;
                self.error = Some(message);
            }
            SessionEvent::FilePicked(path) => {
                if self.store.select(Some(path.as_str())) {
                    self.view = ViewMode::Source;
                }
            }
            SessionEvent::PaneSwitched(ViewMode::Rendered) => {
                if self.can_render() {
                    self.view = ViewMode::Rendered;
                }
            }
            SessionEvent::PaneSwitched(ViewMode::Source) => {
                self.view = ViewMode::Source;
            }
            SessionEvent::ErrorDismissed => {
                self.error = None;
            }
        }
        self
    }

    /// The document for the rendered pane. An empty project short-circuits to
    /// [`PreviewDocument::Empty`] without synthesizing anything.
    pub fn preview(&self, css_framework_url: &str) -> PreviewDocument {
        let files = self.store.files();
        if files.is_empty() {
            return PreviewDocument::Empty;
        }
        match rules::find_entry_file(files) {
            Some(entry) => PreviewDocument::Entry {
                path: entry.path.clone(),
                html: entry.content.clone(),
            },
            None => PreviewDocument::Synthesized {
                html: preview::synthesize(files, css_framework_url),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::GeneratedFile;

    fn project(paths: &[&str]) -> ProjectData {
        ProjectData::new(
            paths
                .iter()
                .map(|p| GeneratedFile::new(*p, format!("// {p}")))
                .collect(),
        )
    }

    fn loaded(paths: &[&str]) -> Session {
        Session::new()
            .apply(SessionEvent::GenerationStarted)
            .apply(SessionEvent::GenerationSucceeded(project(paths)))
    }

    #[test]
    fn entry_file_selects_and_renders() {
        let session = loaded(&["style.css", "index.html", "app.js"]);
        assert_eq!(session.store().selected_path(), Some("index.html"));
        assert_eq!(session.view(), ViewMode::Rendered);
        assert!(!session.is_generating());
    }

    #[test]
    fn no_entry_file_selects_default_in_source_view() {
        let session = loaded(&["package.json", "src/main.tsx", "src/App.tsx"]);
        assert_eq!(session.store().selected_path(), Some("src/App.tsx"));
        assert_eq!(session.view(), ViewMode::Source);
    }

    #[test]
    fn no_conventional_file_selects_first() {
        let session = loaded(&["README.md", "server.py", "style.css"]);
        assert_eq!(session.store().selected_path(), Some("README.md"));
        assert_eq!(session.view(), ViewMode::Source);
    }

    #[test]
    fn empty_result_leaves_nothing_selected() {
        let session = loaded(&[]);
        assert_eq!(session.store().selected_path(), None);
        assert_eq!(session.view(), ViewMode::Source);
        assert_eq!(session.preview("css"), PreviewDocument::Empty);
    }

    #[test]
    fn picking_a_file_always_switches_to_source() {
        let session = loaded(&["index.html", "app.js"]);
        assert_eq!(session.view(), ViewMode::Rendered);

        let session = session.apply(SessionEvent::FilePicked("app.js".into()));
        assert_eq!(session.store().selected_path(), Some("app.js"));
        assert_eq!(session.view(), ViewMode::Source);
        assert_eq!(session.store().selected_content(), "// app.js");

        let session = session.apply(SessionEvent::FilePicked("index.html".into()));
        assert_eq!(session.view(), ViewMode::Source);
    }

    #[test]
    fn picking_an_unknown_file_is_ignored() {
        let session = loaded(&["index.html"]).apply(SessionEvent::FilePicked("nope.js".into()));
        assert_eq!(session.store().selected_path(), Some("index.html"));
        assert_eq!(session.view(), ViewMode::Rendered);
    }

    #[test]
    fn rendered_pane_requires_files() {
        let session = Session::new().apply(SessionEvent::PaneSwitched(ViewMode::Rendered));
        assert_eq!(session.view(), ViewMode::Source);

        let session = loaded(&["a.js"]).apply(SessionEvent::PaneSwitched(ViewMode::Rendered));
        assert_eq!(session.view(), ViewMode::Rendered);
        let session = session.apply(SessionEvent::PaneSwitched(ViewMode::Source));
        assert_eq!(session.view(), ViewMode::Source);
    }

    #[test]
    fn starting_a_generation_clears_everything() {
        let session = loaded(&["index.html"]).apply(SessionEvent::GenerationStarted);
        assert!(session.store().is_empty());
        assert_eq!(session.store().selected_path(), None);
        assert_eq!(session.view(), ViewMode::Source);
        assert!(session.is_generating());
    }

    #[test]
    fn failure_clears_project_and_records_error() {
        let session = loaded(&["index.html"])
            .apply(SessionEvent::GenerationStarted)
            .apply(SessionEvent::GenerationFailed("boom".into()));
        assert!(session.store().is_empty());
        assert_eq!(session.store().selected_path(), None);
        assert_eq!(session.view(), ViewMode::Source);
        assert_eq!(session.error(), Some("boom"));
        assert!(!session.is_generating());

        let session = session.apply(SessionEvent::ErrorDismissed);
        assert_eq!(session.error(), None);
    }

    #[test]
    fn only_one_generation_in_flight() {
        let session = Session::new().apply(SessionEvent::GenerationStarted);
        assert!(matches!(
            session.request_generation("a todo app"),
            Err(WebgenError::Busy)
        ));

        let session = session.apply(SessionEvent::GenerationSucceeded(project(&["a.js"])));
        assert!(session.request_generation("a todo app").is_ok());
    }

    #[test]
    fn blank_description_is_rejected() {
        let session = Session::new();
        assert!(matches!(
            session.request_generation("  \n\t"),
            Err(WebgenError::Validation(_))
        ));
    }

    #[test]
    fn preview_uses_entry_or_synthesizes() {
        let session = loaded(&["index.html"]);
        assert_eq!(
            session.preview("css"),
            PreviewDocument::Entry {
                path: "index.html".into(),
                html: "// index.html".into()
            }
        );

        let session = loaded(&["a.css", "b.js"]);
        match session.preview("css") {
            PreviewDocument::Synthesized { html } => {
                assert!(html.contains("<script>// b.js</script>"))
            }
            other => panic!("expected synthesized preview, got {other:?}"),
        }
    }
}
