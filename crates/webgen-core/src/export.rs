//! Writing a generated project to disk.

use std::collections::HashSet;
use std::io::Write;
use std::path::{Component, Path, PathBuf};

use tracing::{debug, info};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::{Result, WebgenError};
use crate::project::GeneratedFile;

/// Pack every file into `parent/<project_name>.zip`, one entry per file,
/// in list order, with each entry's content verbatim.
///
/// All paths are checked before the archive is created; an absolute path or
/// one that climbs out of the project aborts the export. When a path repeats,
/// the first file wins. Returns the archive path.
pub fn export_project(
    files: &[GeneratedFile],
    parent: &Path,
    project_name: &str,
) -> Result<PathBuf> {
    if files.is_empty() {
        return Err(WebgenError::Export("No files to export".to_string()));
    }
    let name = checked_relative(project_name)?;
    let archive_path = parent.join(format!("{}.zip", name.display()));

    let entries = unique_entries(files)?;

    if let Some(dir) = archive_path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    let mut zip = ZipWriter::new(std::fs::File::create(&archive_path)?);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for (entry_name, file) in &entries {
        zip.start_file(entry_name.as_str(), options)?;
        zip.write_all(file.content.as_bytes())?;
        debug!(entry = %entry_name, bytes = file.content.len(), "Archived file");
    }
    zip.finish()?;

    info!(archive = %archive_path.display(), files = entries.len(), "Project exported");
    Ok(archive_path)
}

/// Write every file under `parent/project_name/` as a plain directory tree.
/// Same path checks and duplicate handling as [`export_project`]. Returns the
/// project directory.
pub fn export_directory(
    files: &[GeneratedFile],
    parent: &Path,
    project_name: &str,
) -> Result<PathBuf> {
    if files.is_empty() {
        return Err(WebgenError::Export("No files to export".to_string()));
    }
    let project_dir = parent.join(checked_relative(project_name)?);

    for (entry_name, file) in unique_entries(files)? {
        let target = project_dir.join(&entry_name);
        if let Some(dir) = target.parent() {
            std::fs::create_dir_all(dir)?;
        }
        std::fs::write(&target, &file.content)?;
        debug!(path = %target.display(), bytes = file.content.len(), "Exported file");
    }

    info!(dir = %project_dir.display(), files = files.len(), "Project unpacked");
    Ok(project_dir)
}

/// Write an HTML document to `path`, creating parent directories.
pub fn write_document(path: &Path, html: &str) -> Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    std::fs::write(path, html)?;
    Ok(())
}

/// Validated `/`-separated entry names, first occurrence of each path only.
fn unique_entries(files: &[GeneratedFile]) -> Result<Vec<(String, &GeneratedFile)>> {
    let mut seen = HashSet::new();
    let mut entries = Vec::with_capacity(files.len());
    for file in files {
        let rel = checked_relative(&file.path)?;
        let name = rel
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        if seen.insert(name.clone()) {
            entries.push((name, file));
        }
    }
    Ok(entries)
}

fn checked_relative(path: &str) -> Result<PathBuf> {
    if path.trim().is_empty() {
        return Err(WebgenError::Export("File with an empty path".to_string()));
    }
    let candidate = Path::new(path);
    let mut clean = PathBuf::new();
    for component in candidate.components() {
        match component {
            Component::Normal(part) => clean.push(part),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                return Err(WebgenError::Export(format!(
                    "Refusing to write outside the project: {path}"
                )));
            }
        }
    }
    if clean.as_os_str().is_empty() {
        return Err(WebgenError::Export(format!("Not a file path: {path}")));
    }
    Ok(clean)
}

#[cfg(test)]
mod tests {
    use std::io::Read;

    use super::*;

    fn read_archive(path: &Path) -> Vec<(String, String)> {
        let mut archive = zip::ZipArchive::new(std::fs::File::open(path).unwrap()).unwrap();
        (0..archive.len())
            .map(|i| {
                let mut entry = archive.by_index(i).unwrap();
                let mut content = String::new();
                entry.read_to_string(&mut content).unwrap();
                (entry.name().to_string(), content)
            })
            .collect()
    }

    #[test]
    fn archive_holds_one_entry_per_file_in_order() {
        let tmp = tempfile::tempdir().unwrap();
        let files = vec![
            GeneratedFile::new("style.css", "h1 { color: red; }"),
            GeneratedFile::new("index.html", "<h1>hi</h1>\r\n"),
            GeneratedFile::new("./src/js/app.js", "run()"),
        ];

        let archive = export_project(&files, tmp.path(), "ai-generated-project").unwrap();

        assert_eq!(archive, tmp.path().join("ai-generated-project.zip"));
        assert_eq!(
            read_archive(&archive),
            vec![
                ("style.css".to_string(), "h1 { color: red; }".to_string()),
                ("index.html".to_string(), "<h1>hi</h1>\r\n".to_string()),
                ("src/js/app.js".to_string(), "run()".to_string()),
            ]
        );
    }

    #[test]
    fn repeated_path_keeps_first_file() {
        let tmp = tempfile::tempdir().unwrap();
        let files = vec![
            GeneratedFile::new("index.html", "first"),
            GeneratedFile::new("index.html", "second"),
        ];

        let archive = export_project(&files, tmp.path(), "proj").unwrap();

        assert_eq!(
            read_archive(&archive),
            vec![("index.html".to_string(), "first".to_string())]
        );
    }

    #[test]
    fn traversal_aborts_before_writing() {
        let tmp = tempfile::tempdir().unwrap();
        let files = vec![
            GeneratedFile::new("ok.txt", "fine"),
            GeneratedFile::new("../escape.txt", "bad"),
        ];

        let err = export_project(&files, tmp.path(), "proj").unwrap_err();
        assert!(matches!(err, WebgenError::Export(_)));
        assert!(!tmp.path().join("proj.zip").exists());

        let err = export_directory(&files, tmp.path(), "proj").unwrap_err();
        assert!(matches!(err, WebgenError::Export(_)));
        assert!(!tmp.path().join("proj").exists());
        assert!(!tmp.path().join("escape.txt").exists());
    }

    #[test]
    fn absolute_and_empty_paths_are_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        for bad in ["/etc/passwd", "", "."] {
            let files = vec![GeneratedFile::new(bad, "x")];
            assert!(export_project(&files, tmp.path(), "proj").is_err(), "{bad:?}");
        }
        let files = vec![GeneratedFile::new("a.txt", "x")];
        assert!(export_project(&files, tmp.path(), "../proj").is_err());
    }

    #[test]
    fn empty_project_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(export_project(&[], tmp.path(), "proj").is_err());
        assert!(export_directory(&[], tmp.path(), "proj").is_err());
    }

    #[test]
    fn directory_export_writes_nested_files() {
        let tmp = tempfile::tempdir().unwrap();
        let files = vec![
            GeneratedFile::new("index.html", "<h1>hi</h1>"),
            GeneratedFile::new("./src/js/app.js", "run()"),
        ];

        let dir = export_directory(&files, tmp.path(), "ai-generated-project").unwrap();

        assert_eq!(dir, tmp.path().join("ai-generated-project"));
        assert_eq!(
            std::fs::read_to_string(dir.join("index.html")).unwrap(),
            "<h1>hi</h1>"
        );
        assert_eq!(
            std::fs::read_to_string(dir.join("src/js/app.js")).unwrap(),
            "run()"
        );
    }

    #[test]
    fn write_document_creates_parents() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("preview").join("index.html");
        write_document(&path, "<p>x</p>").unwrap();
        assert_eq!(std::fs::read_to_string(path).unwrap(), "<p>x</p>");
    }
}
