//! Ordered file-matching rules.
//!
//! Both "which file is the entry page" and "which file to open by default"
//! are first-match-wins searches. They are kept here as plain tables so the
//! policy can be read and tested without the session around it.

use crate::project::GeneratedFile;

/// A named path predicate.
#[derive(Debug, Clone, Copy)]
pub struct FileRule {
    pub name: &'static str,
    pub matches: fn(&str) -> bool,
}

/// Standalone renderable page.
pub const ENTRY_FILE_RULES: &[FileRule] = &[FileRule {
    name: "index.html",
    matches: is_index_html,
}];

/// Files opened in the source view when a project has no entry page.
/// The first file of the project is the implicit last resort.
pub const DEFAULT_FILE_RULES: &[FileRule] = &[
    FileRule {
        name: "App component",
        matches: |p| p.ends_with("App.tsx"),
    },
    FileRule {
        name: "main entry",
        matches: |p| p.ends_with("main.tsx"),
    },
    FileRule {
        name: "src/App component",
        matches: |p| p.ends_with("src/App.tsx"),
    },
    FileRule {
        name: "src/main entry",
        matches: |p| p.ends_with("src/main.tsx"),
    },
];

fn is_index_html(path: &str) -> bool {
    let lower = path.to_lowercase();
    lower == "index.html" || lower.ends_with("/index.html")
}

/// Evaluate `rules` in priority order; within a rule, files are scanned in
/// input order. Returns the first file satisfying the highest-priority rule.
pub fn first_match<'a>(files: &'a [GeneratedFile], rules: &[FileRule]) -> Option<&'a GeneratedFile> {
    rules.iter().find_map(|rule| {
        files
            .iter()
            .find(|f| !f.path.is_empty() && (rule.matches)(&f.path))
    })
}

pub fn find_entry_file(files: &[GeneratedFile]) -> Option<&GeneratedFile> {
    first_match(files, ENTRY_FILE_RULES)
}

/// File to open when there is no entry page: a rule match, else the first file.
pub fn default_file(files: &[GeneratedFile]) -> Option<&GeneratedFile> {
    first_match(files, DEFAULT_FILE_RULES).or_else(|| files.first())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn files(paths: &[&str]) -> Vec<GeneratedFile> {
        paths.iter().map(|p| GeneratedFile::new(*p, "")).collect()
    }

    #[test]
    fn entry_detection_is_case_insensitive_and_nested() {
        assert!(find_entry_file(&files(&["INDEX.HTML"])).is_some());
        assert!(find_entry_file(&files(&["public/Index.html"])).is_some());
        assert!(find_entry_file(&files(&["myindex.html"])).is_none());
        assert!(find_entry_file(&files(&["index.htm", "index.html.bak"])).is_none());
    }

    #[test]
    fn first_entry_in_input_order_wins() {
        let fs = files(&["docs/index.html", "index.html"]);
        assert_eq!(find_entry_file(&fs).unwrap().path, "docs/index.html");
    }

    #[test]
    fn empty_path_never_matches() {
        let fs = vec![GeneratedFile::new("", "<html></html>")];
        assert!(find_entry_file(&fs).is_none());
    }

    #[test]
    fn rule_priority_beats_input_order() {
        let fs = files(&["src/main.tsx", "src/App.tsx", "README.md"]);
        assert_eq!(default_file(&fs).unwrap().path, "src/App.tsx");
    }

    #[test]
    fn main_entry_when_no_app_component() {
        let fs = files(&["package.json", "src/main.tsx"]);
        assert_eq!(default_file(&fs).unwrap().path, "src/main.tsx");
    }

    #[test]
    fn falls_back_to_first_file() {
        let fs = files(&["README.md", "style.css"]);
        assert_eq!(default_file(&fs).unwrap().path, "README.md");
        assert!(default_file(&[]).is_none());
    }
}
