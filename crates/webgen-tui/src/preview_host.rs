//! Hands a preview document to the system browser.
//!
//! The document is written to its own file under the cache directory, so the
//! generated page runs in a separate browser tab and never touches the TUI.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::{debug, info};

use webgen_core::export::write_document;
use webgen_core::{Result, WebgenError};

/// `<cache_dir>/webgen/preview/index.html`.
pub fn preview_file() -> Result<PathBuf> {
    let cache = dirs::cache_dir()
        .ok_or_else(|| WebgenError::Config("Could not determine cache directory".into()))?;
    Ok(preview_file_in(&cache))
}

fn preview_file_in(cache_root: &Path) -> PathBuf {
    cache_root.join("webgen").join("preview").join("index.html")
}

/// Write `html` to `path`, replacing the previous preview.
pub fn publish_to(path: &Path, html: &str) -> Result<()> {
    write_document(path, html)?;
    debug!(path = %path.display(), bytes = html.len(), "Preview document written");
    Ok(())
}

/// Write the document to the preview file and open it. Returns the file path.
pub fn publish_and_open(html: &str) -> Result<PathBuf> {
    let path = preview_file()?;
    publish_to(&path, html)?;
    open_in_browser(&path)?;
    info!(path = %path.display(), "Preview opened in browser");
    Ok(path)
}

/// Launch the platform's default handler for `path` without waiting for it.
pub fn open_in_browser(path: &Path) -> Result<()> {
    let mut command = opener_command(path);
    command
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|e| {
            WebgenError::Io(std::io::Error::new(
                e.kind(),
                format!("could not launch a browser ({e})"),
            ))
        })?;
    Ok(())
}

#[cfg(target_os = "macos")]
fn opener_command(path: &Path) -> Command {
    let mut command = Command::new("open");
    command.arg(path);
    command
}

#[cfg(target_os = "windows")]
fn opener_command(path: &Path) -> Command {
    let mut command = Command::new("cmd");
    command.args(["/C", "start", ""]).arg(path);
    command
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn opener_command(path: &Path) -> Command {
    let mut command = Command::new("xdg-open");
    command.arg(path);
    command
}
