use regex::Regex;
use serde_json::Value;

/// Compiles a pattern baked into this crate.
#[allow(clippy::expect_used)]
pub(crate) fn pattern(src: &str) -> Regex {
    Regex::new(src).expect("built-in pattern must compile")
}

/// Trims, then keeps at most `max` characters.
pub(crate) fn clip(text: &str, max: usize) -> String {
    let trimmed = text.trim();
    match trimmed.char_indices().nth(max) {
        Some((cut, _)) => trimmed[..cut].trim_end().to_string(),
        None => trimmed.to_string(),
    }
}

/// Text of a scalar JSON value; anything else reads as empty.
pub(crate) fn scalar_text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

pub(crate) fn truthy(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::String(s)) => matches!(s.trim().to_ascii_lowercase().as_str(), "true" | "yes" | "1"),
        _ => false,
    }
}

pub(crate) fn has_alphanumeric(text: &str) -> bool {
    text.chars().any(char::is_alphanumeric)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn clip_counts_chars_not_bytes() {
        assert_eq!(clip("  héllo wörld  ", 5), "héllo");
        assert_eq!(clip("abc", 10), "abc");
        assert_eq!(clip("ab cd", 3), "ab");
        assert_eq!(clip(&"A".repeat(200), 60).len(), 60);
    }

    #[test]
    fn scalars_stringify() {
        assert_eq!(scalar_text(Some(&json!(42))), "42");
        assert_eq!(scalar_text(Some(&json!(true))), "true");
        assert_eq!(scalar_text(Some(&json!({"a": 1}))), "");
        assert_eq!(scalar_text(None), "");
    }

    #[test]
    fn truthiness() {
        assert!(truthy(Some(&json!(true))));
        assert!(truthy(Some(&json!("Yes"))));
        assert!(truthy(Some(&json!(1))));
        assert!(!truthy(Some(&json!("false"))));
        assert!(!truthy(Some(&json!(null))));
        assert!(!truthy(None));
    }
}
