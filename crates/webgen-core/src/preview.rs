//! Preview synthesis: turn a generated file list into one HTML document.
//!
//! If the project ships its own entry page it is used untouched. Otherwise a
//! fallback page is assembled from the project's stylesheets and scripts, or,
//! for component-framework sources that need a build step, a notice listing
//! the files.
//!
//! File content is inlined without escaping. It is generated code, and the
//! resulting document is always opened in its own isolated context.

use crate::project::GeneratedFile;
use crate::rules::find_entry_file;

/// Build the preview document for a non-empty file list.
///
/// `css_framework_url` is linked from the fallback page's head.
pub fn synthesize(files: &[GeneratedFile], css_framework_url: &str) -> String {
    if let Some(entry) = find_entry_file(files) {
        return entry.content.clone();
    }

    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"UTF-8\">\n");
    html.push_str(
        "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n",
    );
    html.push_str("<title>Project Preview</title>\n");
    html.push_str(&format!(
        "<link rel=\"stylesheet\" href=\"{}\">\n",
        escape_html(css_framework_url)
    ));

    for file in files.iter().filter(|f| f.path.ends_with(".css")) {
        html.push_str(&format!("<style>{}</style>\n", file.content));
    }
    html.push_str("</head>\n<body>\n");

    if files.iter().any(is_component_source) {
        push_build_notice(&mut html, files);
    } else {
        html.push_str("<div id=\"root\" class=\"container mx-auto p-4\"></div>\n");
        for file in files.iter().filter(|f| f.path.ends_with(".js")) {
            html.push_str(&format!("<script>{}</script>\n", file.content));
        }
    }

    html.push_str("</body>\n</html>\n");
    html
}

fn is_component_source(file: &GeneratedFile) -> bool {
    file.path.ends_with(".tsx") || file.path.ends_with(".jsx")
}

fn push_build_notice(html: &mut String, files: &[GeneratedFile]) {
    html.push_str("<div class=\"container mx-auto p-8\">\n");
    html.push_str(
        "<div class=\"bg-yellow-100 border-l-4 border-yellow-500 text-yellow-800 p-4 mb-6\">\n",
    );
    html.push_str("<p class=\"font-bold\">Build step required</p>\n");
    html.push_str(
        "<p>This project uses component sources (.tsx / .jsx) that must be compiled \
         before they can run. What you see here is a placeholder, not the rendered app.</p>\n",
    );
    html.push_str("</div>\n");
    html.push_str("<h2 class=\"text-xl font-semibold mb-2\">Generated files</h2>\n");
    html.push_str("<ul class=\"font-mono text-sm\">\n");
    // Paths are listed HTML-escaped, so `R&D/App.tsx` appears as `R&amp;D/App.tsx`.
    for file in files {
        html.push_str(&format!(
            "<li><span>{}</span> <span class=\"text-gray-500\">{}</span></li>\n",
            escape_html(&file.path),
            file.kind_label()
        ));
    }
    html.push_str("</ul>\n</div>\n");
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
