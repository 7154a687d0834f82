//! Turning raw API responses into a [`ProjectData`] or a typed error.

use std::sync::LazyLock;

use regex::Regex;
use reqwest::StatusCode;
use serde_json::Value;

use webgen_core::{ProjectData, Result, WebgenError};

use crate::protocol::{ErrorEnvelope, GenerateContentResponse};

/// Upstream message Gemini uses for a rejected key (with HTTP 400).
const INVALID_KEY_MARKER: &str = "API key not valid";

/// One fenced block spanning the whole text, with an optional language tag.
static FENCE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^```(\w*)?\s*\n?(.*?)\n?\s*```$").expect("fence pattern is valid")
});

/// Trim the text and strip one surrounding fenced code block, if present.
pub fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    match FENCE_REGEX.captures(trimmed).and_then(|c| c.get(2)) {
        Some(body) if !body.as_str().is_empty() => body.as_str().trim(),
        _ => trimmed,
    }
}

/// Decode the model's reply text into a project.
///
/// Fails with [`WebgenError::Parse`] if the text (after fence stripping) is
/// not JSON or has no `files` array. Individual entries are not validated.
pub fn parse_project(text: &str) -> Result<ProjectData> {
    let body = strip_code_fence(text);
    let value: Value = serde_json::from_str(body)
        .map_err(|e| WebgenError::Parse(format!("response is not valid JSON ({e})")))?;

    match value.get("files") {
        Some(Value::Array(_)) => {}
        Some(_) => {
            return Err(WebgenError::Parse("`files` is not an array".to_string()));
        }
        None => {
            return Err(WebgenError::Parse(
                "response has no `files` array".to_string(),
            ));
        }
    }

    serde_json::from_value(value)
        .map_err(|e| WebgenError::Parse(format!("malformed `files` entries ({e})")))
}

/// Concatenated text parts of the first candidate.
pub fn extract_text(response: GenerateContentResponse) -> Result<String> {
    let candidate = response
        .candidates
        .into_iter()
        .next()
        .ok_or_else(|| WebgenError::Parse("response contained no candidates".to_string()))?;

    let text: String = candidate
        .content
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    if text.trim().is_empty() {
        let reason = candidate.finish_reason.unwrap_or_else(|| "unknown".to_string());
        return Err(WebgenError::Parse(format!(
            "response contained no text (finish reason: {reason})"
        )));
    }
    Ok(text)
}

/// Map a non-success HTTP response to an error kind.
pub fn classify_error(status: StatusCode, body: &str) -> WebgenError {
    let envelope = serde_json::from_str::<ErrorEnvelope>(body).ok();
    let message = envelope
        .as_ref()
        .map(|e| e.error.message.clone())
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| format!("HTTP {status}: {}", body.trim()));
    let upstream_status = envelope.as_ref().and_then(|e| e.error.status.as_deref());

    let is_auth = status == StatusCode::UNAUTHORIZED
        || status == StatusCode::FORBIDDEN
        || message.contains(INVALID_KEY_MARKER)
        || matches!(upstream_status, Some("UNAUTHENTICATED") | Some("PERMISSION_DENIED"));

    if is_auth {
        WebgenError::Auth(format!(
            "{message}. Please check your {} environment variable or config file.",
            webgen_core::config::API_KEY_ENV
        ))
    } else {
        WebgenError::Generation(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unfenced_text_is_only_trimmed() {
        assert_eq!(strip_code_fence("  {\"files\":[]}\n"), "{\"files\":[]}");
    }

    #[test]
    fn fences_with_and_without_language_are_stripped() {
        assert_eq!(
            strip_code_fence("```json\n{\"files\":[]}\n```"),
            "{\"files\":[]}"
        );
        assert_eq!(strip_code_fence("```\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_code_fence("```{\"a\":1}```"), "{\"a\":1}");
    }

    #[test]
    fn fence_body_keeps_inner_backticks() {
        let raw = "```json\n{\"files\":[{\"path\":\"README.md\",\"content\":\"```sh\\nnpm i\\n```\"}]}\n```";
        let project = parse_project(raw).unwrap();
        assert_eq!(project.files[0].content, "```sh\nnpm i\n```");
    }

    #[test]
    fn parses_files_in_order() {
        let raw = r#"{"files":[{"path":"index.html","content":"<p/>"},{"path":"app.js","content":"x()"}]}"#;
        let project = parse_project(raw).unwrap();
        let paths: Vec<&str> = project.files.iter().map(|f| f.path.as_str()).collect();
        assert_eq!(paths, vec!["index.html", "app.js"]);
    }

    #[test]
    fn invalid_json_is_a_parse_error() {
        assert!(matches!(
            parse_project("Sure! Here is your app."),
            Err(WebgenError::Parse(_))
        ));
    }

    #[test]
    fn missing_or_wrong_files_field_is_a_parse_error() {
        assert!(matches!(
            parse_project(r#"{"project":[]}"#),
            Err(WebgenError::Parse(_))
        ));
        assert!(matches!(
            parse_project(r#"{"files":"index.html"}"#),
            Err(WebgenError::Parse(_))
        ));
        assert!(matches!(parse_project("[]"), Err(WebgenError::Parse(_))));
    }

    #[test]
    fn extracts_joined_text_parts() {
        let json = r#"{"candidates":[{"content":{"role":"model","parts":[{"text":"{\"files\""},{"text":":[]}"}]},"finishReason":"STOP"}]}"#;
        let response: GenerateContentResponse = serde_json::from_str(json).unwrap();
        assert_eq!(extract_text(response).unwrap(), "{\"files\":[]}");
    }

    #[test]
    fn no_candidates_is_a_parse_error() {
        let response: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert!(matches!(extract_text(response), Err(WebgenError::Parse(_))));

        let json = r#"{"candidates":[{"finishReason":"SAFETY"}]}"#;
        let response: GenerateContentResponse = serde_json::from_str(json).unwrap();
        let err = extract_text(response).unwrap_err();
        assert!(err.to_string().contains("SAFETY"));
    }

    #[test]
    fn invalid_key_is_an_auth_error() {
        let body = r#"{"error":{"code":400,"message":"API key not valid. Please pass a valid API key.","status":"INVALID_ARGUMENT"}}"#;
        assert!(matches!(
            classify_error(StatusCode::BAD_REQUEST, body),
            WebgenError::Auth(_)
        ));
        assert!(matches!(
            classify_error(StatusCode::FORBIDDEN, "denied"),
            WebgenError::Auth(_)
        ));
    }

    #[test]
    fn other_failures_wrap_the_upstream_message() {
        let body = r#"{"error":{"code":503,"message":"The model is overloaded.","status":"UNAVAILABLE"}}"#;
        match classify_error(StatusCode::SERVICE_UNAVAILABLE, body) {
            WebgenError::Generation(msg) => assert_eq!(msg, "The model is overloaded."),
            other => panic!("expected generation error, got {other:?}"),
        }

        match classify_error(StatusCode::BAD_GATEWAY, "<html>bad gateway</html>") {
            WebgenError::Generation(msg) => assert!(msg.contains("502")),
            other => panic!("expected generation error, got {other:?}"),
        }
    }
}
