pub mod config;
pub mod error;
pub mod export;
pub mod preview;
pub mod project;
pub mod rules;
pub mod session;

pub use config::WebgenConfig;
pub use error::{Result, WebgenError};
pub use project::{GeneratedFile, ProjectData, ProjectStore};
pub use session::{PreviewDocument, Session, SessionEvent, ViewMode};
