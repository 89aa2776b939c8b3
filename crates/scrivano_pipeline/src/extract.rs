//! Utilities for extracting structured data from collaborator replies.
//!
//! Collaborator replies often contain JSON wrapped in markdown code blocks or
//! mixed with explanatory text. This module provides robust extraction
//! utilities that handle the common reply patterns.

use scrivano_error::JsonError;

/// Extract JSON from a reply that may contain markdown or extra text.
///
/// This function tries multiple extraction strategies:
/// 1. Markdown code blocks: ```json ... ```
/// 2. Balanced braces: { ... }
///
/// # Errors
///
/// Returns an error if no JSON object is found in the reply.
///
/// # Examples
///
/// ```
/// use scrivano_pipeline::extract_json;
///
/// let reply = "Here's the brief you requested:\n\
///     \n\
///     ```json\n\
///     {\"enhancedTitle\": \"Test\"}\n\
///     ```\n";
///
/// let json = extract_json(reply).unwrap();
/// assert!(json.contains("enhancedTitle"));
/// ```
pub fn extract_json(reply: &str) -> Result<String, JsonError> {
    if let Some(json) = extract_from_code_block(reply, "json") {
        return Ok(json);
    }

    if let Some(json) = extract_balanced(reply, '{', '}') {
        return Ok(json);
    }

    tracing::warn!(reply_length = reply.len(), "No JSON found in reply");
    Err(JsonError::new(format!(
        "no JSON object found in reply (length: {})",
        reply.len()
    )))
}

/// Parse extracted JSON into a specific type.
///
/// # Errors
///
/// Returns an error if the JSON string cannot be parsed into type `T`.
pub fn parse_json<T>(json_str: &str) -> Result<T, JsonError>
where
    T: serde::de::DeserializeOwned,
{
    serde_json::from_str(json_str).map_err(|e| {
        let preview = json_str.chars().take(100).collect::<String>();
        tracing::warn!(error = %e, json_preview = %preview, "JSON parsing failed");
        JsonError::new(format!(
            "failed to parse JSON: {} (JSON: {}...)",
            e, preview
        ))
    })
}

/// Extract content from markdown code blocks.
///
/// Looks for patterns like:
/// - ```language\n...\n```
/// - ``` ... ``` (no language specified)
fn extract_from_code_block(reply: &str, language: &str) -> Option<String> {
    let pattern = format!("```{}", language);

    if let Some(start) = reply.find(&pattern) {
        let content_start = start + pattern.len();
        if let Some(end) = reply[content_start..].find("```") {
            let content = &reply[content_start..content_start + end];
            return Some(content.trim().to_string());
        }
        // No closing fence found - likely truncated reply
        return Some(reply[content_start..].trim().to_string());
    }

    if let Some(start) = reply.find("```") {
        let content_start = start + 3;
        // Skip to next newline (in case there's a language specifier)
        let skip_to = reply[content_start..]
            .find('\n')
            .map(|n| content_start + n + 1)
            .unwrap_or(content_start);

        if let Some(end) = reply[skip_to..].find("```") {
            let content = &reply[skip_to..skip_to + end];
            return Some(content.trim().to_string());
        }
        return Some(reply[skip_to..].trim().to_string());
    }

    None
}

/// Extract content between balanced delimiters.
///
/// Finds the first occurrence of `open` and extracts content up to
/// the matching `close`, handling nesting and string literals correctly.
fn extract_balanced(reply: &str, open: char, close: char) -> Option<String> {
    let start = reply.find(open)?;
    let mut depth = 0;
    let mut in_string = false;
    let mut escape_next = false;

    for (i, ch) in reply[start..].char_indices() {
        if escape_next {
            escape_next = false;
            continue;
        }

        match ch {
            '\\' => escape_next = true,
            '"' => in_string = !in_string,
            c if c == open && !in_string => depth += 1,
            c if c == close && !in_string => {
                depth -= 1;
                if depth == 0 {
                    return Some(reply[start..start + i + 1].to_string());
                }
            }
            _ => {}
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_json_from_code_block() {
        let reply = r#"
Here's the brief:

```json
{
  "enhancedTitle": "Test",
  "enhancedKeywords": ["x"]
}
```

Hope this helps!
"#;
        let json = extract_json(reply).unwrap();
        assert!(json.contains("\"enhancedTitle\": \"Test\""));
    }

    #[test]
    fn test_extract_json_balanced_braces() {
        let reply = r#"
Sure! Here it is: {"enhancedTitle": "T", "seoInsights": {"searchTrends": "up"}}
"#;
        let json = extract_json(reply).unwrap();
        assert!(json.starts_with('{'));
        assert!(json.ends_with('}'));
        assert!(json.contains("searchTrends"));
    }

    #[test]
    fn test_extract_json_with_string_escapes() {
        let reply = r#"{"enhancedTitle": "She said \"hello\""}"#;
        let json = extract_json(reply).unwrap();
        assert!(json.contains("She said"));
    }

    #[test]
    fn test_no_json_found() {
        let reply = "This is just plain text with no JSON";
        assert!(extract_json(reply).is_err());
    }

    #[test]
    fn test_parse_json_into_struct() {
        use serde::Deserialize;

        #[derive(Deserialize, Debug)]
        struct TestData {
            id: i32,
            name: String,
        }

        let json = r#"{"id": 42, "name": "test"}"#;
        let data: TestData = parse_json(json).unwrap();
        assert_eq!(data.id, 42);
        assert_eq!(data.name, "test");
    }
}
