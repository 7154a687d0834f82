use serde::{Deserialize, Deserializer, Serialize};

/// One file of a generated project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedFile {
    /// POSIX-style path relative to the project root.
    ///
    /// Decodes to an empty string when the model omits it or sends a
    /// non-string; an empty path never matches any file rule.
    #[serde(default, deserialize_with = "lenient_string")]
    pub path: String,

    /// Raw file text.
    #[serde(default, deserialize_with = "lenient_string")]
    pub content: String,
}

impl GeneratedFile {
    pub fn new(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }

    /// Last path segment.
    pub fn name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }

    /// Extension of the last path segment, without the dot.
    pub fn extension(&self) -> Option<&str> {
        match self.name().rsplit_once('.') {
            Some((_, ext)) if !ext.is_empty() => Some(ext),
            _ => None,
        }
    }

    /// Type label used in file listings: the extension uppercased, or `FILE`.
    pub fn kind_label(&self) -> String {
        self.extension()
            .map(str::to_uppercase)
            .unwrap_or_else(|| "FILE".to_string())
    }

    /// Syntax label for the code viewer.
    pub fn language(&self) -> &'static str {
        let ext = self.extension().map(str::to_lowercase);
        match ext.as_deref() {
            Some("js") | Some("jsx") => "javascript",
            Some("ts") | Some("tsx") => "typescript",
            Some("json") => "json",
            Some("html") => "html",
            Some("css") => "css",
            Some("md") => "markdown",
            _ => "plaintext",
        }
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => s,
        _ => String::new(),
    })
}

/// The full output of one generation request, in generation order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectData {
    pub files: Vec<GeneratedFile>,
}

impl ProjectData {
    pub fn new(files: Vec<GeneratedFile>) -> Self {
        Self { files }
    }
}

/// A row in the file explorer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExplorerEntry {
    pub name: String,
    /// Directory prefix including the trailing slash, empty at the root.
    pub dir: String,
    pub path: String,
    /// Highlighting language, see [`GeneratedFile::language`].
    pub language: &'static str,
}

/// In-memory holder of the current project and the selected file.
///
/// The unit of change is the whole project: files are never edited one by one.
#[derive(Debug, Clone, Default)]
pub struct ProjectStore {
    files: Vec<GeneratedFile>,
    selected: Option<String>,
}

impl ProjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Swap in a new file list. Selection is reset; callers pick a default afterwards.
    pub fn replace_all(&mut self, files: Vec<GeneratedFile>) {
        self.files = files;
        self.selected = None;
    }

    pub fn clear(&mut self) {
        self.replace_all(Vec::new());
    }

    /// Select a file by path, or clear the selection with `None`.
    ///
    /// Returns `false` (and leaves the selection alone) if the path is not
    /// in the current file list.
    pub fn select(&mut self, path: Option<&str>) -> bool {
        match path {
            None => {
                self.selected = None;
                true
            }
            Some(p) if self.find(p).is_some() => {
                self.selected = Some(p.to_string());
                true
            }
            Some(_) => false,
        }
    }

    pub fn files(&self) -> &[GeneratedFile] {
        &self.files
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn selected_path(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// First file with the given path. Duplicate paths resolve to the first occurrence.
    pub fn find(&self, path: &str) -> Option<&GeneratedFile> {
        self.files.iter().find(|f| f.path == path)
    }

    pub fn selected_file(&self) -> Option<&GeneratedFile> {
        self.selected.as_deref().and_then(|p| self.find(p))
    }

    /// Content of the selected file, or an empty string if nothing resolves.
    pub fn selected_content(&self) -> &str {
        self.selected_file().map(|f| f.content.as_str()).unwrap_or("")
    }

    /// Files as shown in the explorer, sorted by path.
    pub fn explorer_entries(&self) -> Vec<ExplorerEntry> {
        let mut entries: Vec<ExplorerEntry> = self
            .files
            .iter()
            .map(|f| {
                let dir = match f.path.rfind('/') {
                    Some(pos) => f.path[..=pos].to_string(),
                    None => String::new(),
                };
                ExplorerEntry {
                    name: f.name().to_string(),
                    dir,
                    path: f.path.clone(),
                    language: f.language(),
                }
            })
            .collect();
        entries.sort_by(|a, b| a.path.cmp(&b.path));
        entries
    }
}
