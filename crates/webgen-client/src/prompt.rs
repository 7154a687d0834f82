//! The instruction template wrapped around the user's description.

/// Build the prompt sent to the model for one description.
pub fn build_prompt(description: &str) -> String {
    format!(
        r#"Generate a complete web application based on this description: "{description}"

Please return a JSON object with this exact structure:
{{
  "files": [
    {{
      "path": "index.html",
      "content": "<!DOCTYPE html>..."
    }},
    {{
      "path": "style.css",
      "content": "/* CSS content */"
    }},
    {{
      "path": "script.js",
      "content": "// JavaScript content"
    }}
  ]
}}

Requirements:
- Always include an index.html file as the main entry point
- Include CSS for styling (either inline in HTML or separate file)
- Include JavaScript for interactivity if needed
- Make it a complete, functional web application
- Use modern HTML5, CSS3, and vanilla JavaScript
- Ensure the code is clean and well-structured
- Make it visually appealing with good design
- Return ONLY the JSON object, no additional text or markdown"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn description_is_embedded_and_shape_is_literal_json() {
        let prompt = build_prompt("a pomodoro timer");
        assert!(prompt.contains("\"a pomodoro timer\""));
        assert!(prompt.contains("\"files\": ["));
        assert!(prompt.contains("\"path\": \"index.html\""));
        assert!(!prompt.contains("{{"));
    }
}
