//! Recover a JSON document from model output.
//!
//! Models are asked for bare JSON but sometimes wrap it in prose or code
//! fences. A strict parse is tried first, then each balanced top-level
//! object or array found in the text, in order.
//!
//! Only top-level candidates are tried: a truncated reply never yields one
//! of its inner values.

use {serde_json::Value, tracing::debug};

pub fn extract_json(text: &str) -> Option<Value> {
    if let Ok(v) = serde_json::from_str::<Value>(text.trim()) {
        return Some(v);
    }

    let mut from = 0;
    while let Some(offset) = text[from..].find(['{', '[']) {
        let open = from + offset;
        // Everything after an unclosed bracket is nested inside it.
        let len = balanced_len(&text[open..])?;
        if let Ok(v) = serde_json::from_str::<Value>(&text[open..open + len]) {
            debug!(start = open, len, "recovered JSON embedded in provider content");
            return Some(v);
        }
        from = open + len;
    }
    None
}

/// Byte length of the bracketed value starting at `s[0]`, skipping brackets
/// inside string literals. `None` if it never closes.
fn balanced_len(s: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, c) in s.char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '{' | '[' => depth += 1,
            '}' | ']' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(i + 1);
                }
            },
            _ => {},
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use {super::*, serde_json::json};

    #[test]
    fn strict_json_parses() {
        assert_eq!(extract_json(r#"{"en":[]}"#), Some(json!({"en": []})));
        assert_eq!(extract_json("  [1, 2]\n"), Some(json!([1, 2])));
    }

    #[test]
    fn plain_text_is_rejected() {
        assert_eq!(extract_json("not json"), None);
        assert_eq!(extract_json(""), None);
    }

    #[test]
    fn prose_wrapped_object_is_recovered() {
        let text = r#"Sure! Here are the translations:
{"de": [{"id": "text-0", "translation": "Hallo"}]}
Let me know if you need anything else."#;
        assert_eq!(
            extract_json(text),
            Some(json!({"de": [{"id": "text-0", "translation": "Hallo"}]}))
        );
    }

    #[test]
    fn code_fenced_object_is_recovered() {
        let text = "```json\n{\"language\": \"lv\"}\n```";
        assert_eq!(extract_json(text), Some(json!({"language": "lv"})));
    }

    #[test]
    fn brackets_inside_strings_do_not_confuse_scanner() {
        let text = r#"Result: {"fr": [{"id": "a", "translation": "voir {page} \"[1]\""}]} done"#;
        let v = extract_json(text).unwrap();
        assert_eq!(v["fr"][0]["translation"], r#"voir {page} "[1]""#);
    }

    #[test]
    fn skips_unparseable_candidate_and_finds_next() {
        let text = r#"note {not json} then {"ok": true}"#;
        assert_eq!(extract_json(text), Some(json!({"ok": true})));
    }

    #[test]
    fn unterminated_object_is_rejected() {
        assert_eq!(extract_json(r#"here: {"en": ["#), None);
    }

    #[test]
    fn truncated_reply_does_not_yield_inner_value() {
        let text = r#"{"de":[{"id":"text-0","translation":"Hallo"}],"fr":[{"id":"text-0","transl"#;
        assert_eq!(extract_json(text), None);
        assert_eq!(extract_json(&format!("Here you go: {text}")), None);
    }

    #[test]
    fn nested_values_of_unparseable_candidate_are_skipped() {
        let text = r#"draft {oops [1, 2]} final {"ok": 1}"#;
        assert_eq!(extract_json(text), Some(json!({"ok": 1})));
    }

    #[test]
    fn long_run_of_open_brackets_is_rejected_quickly() {
        let text = "{".repeat(200_000);
        let started = std::time::Instant::now();
        assert_eq!(extract_json(&text), None);
        assert!(
            started.elapsed() < std::time::Duration::from_secs(2),
            "scan took {:?}",
            started.elapsed()
        );
    }
}
