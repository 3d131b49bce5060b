//! Stage 4: close whatever a truncated response left open.

use super::cleanup::remove_trailing_commas;
use super::scan::end_state;

/// Closes an unterminated string, then every unclosed object and array in
/// last-opened-first-closed order, then drops trailing commas the new
/// closers exposed. Applied once; the caller does not retry.
pub fn repair_json(json: &str) -> String {
    let mut repaired = json.to_string();

    let state = end_state(&repaired);
    if state.unescaped_quotes % 2 != 0 {
        if state.pending_escape {
            repaired.pop();
        }
        repaired.push('"');
    }

    let mut stack: Vec<char> = Vec::new();
    let mut in_string = false;
    let mut escaped = false;
    for c in repaired.chars() {
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
            '{' => stack.push('}'),
            '[' => stack.push(']'),
            '}' | ']' => {
                if stack.last() == Some(&c) {
                    stack.pop();
                }
            }
            _ => {}
        }
    }

    while let Some(closer) = stack.pop() {
        repaired.push(closer);
    }

    remove_trailing_commas(&repaired)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn repaired(input: &str) -> Value {
        let out = repair_json(input);
        serde_json::from_str(&out).unwrap_or_else(|e| panic!("{e}: {out}"))
    }

    #[test]
    fn closes_string_object_and_array() {
        let v = repaired(r#"{"title": "Repair Test", "slides": [{"type": "TITLE", "heading": "Incompl"#);
        assert_eq!(v["title"], "Repair Test");
        assert_eq!(v["slides"][0]["heading"], "Incompl");
    }

    #[test]
    fn braces_inside_strings_are_not_structural() {
        let v = repaired(r#"{"body": "use { and [ freely", "items": ["a}", "b"#);
        assert_eq!(v["body"], "use { and [ freely");
        assert_eq!(v["items"][0], "a}");
        assert_eq!(v["items"][1], "b");
    }

    #[test]
    fn escaped_quotes_do_not_count() {
        let v = repaired(r#"{"body": "she said \"hi\""#);
        assert_eq!(v["body"], "she said \"hi\"");
    }

    #[test]
    fn dangling_backslash_is_dropped_before_closing() {
        let v = repaired(r#"{"body": "ends with \"#);
        assert_eq!(v["body"], "ends with ");
    }

    #[test]
    fn trailing_comma_before_new_closers_is_removed() {
        let v = repaired(r#"{"slides": [{"heading": "A"},"#);
        assert_eq!(v["slides"].as_array().map(Vec::len), Some(1));
    }

    #[test]
    fn balanced_input_is_unchanged() {
        let input = r#"{"a": [1, {"b": 2}]}"#;
        assert_eq!(repair_json(input), input);
    }

    #[test]
    fn dangling_key_stays_unparseable() {
        let out = repair_json(r#"{"slides": [{"type": "#);
        assert!(serde_json::from_str::<Value>(&out).is_err());
    }
}
