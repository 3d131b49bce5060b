//! Stages 1 and 2: strip wrappers around the JSON and rewrite the textual
//! mistakes models make most often.

use once_cell::sync::Lazy;
use regex::Regex;

use super::scan::{map_code, map_strings, strip_comments};
use super::text::pattern;

static FENCE_OPEN_JSON: Lazy<Regex> = Lazy::new(|| pattern(r"(?i)^```json\s*"));
static FENCE_OPEN: Lazy<Regex> = Lazy::new(|| pattern(r"^```\s*"));
static FENCE_CLOSE: Lazy<Regex> = Lazy::new(|| pattern(r"```\s*$"));

static TRAILING_COMMA: Lazy<Regex> = Lazy::new(|| pattern(r",(\s*[\]}])"));
static SINGLE_QUOTED_KEY: Lazy<Regex> = Lazy::new(|| pattern(r#"([{,]\s*)'([^'"]+)'(\s*:)"#));
static BARE_KEY: Lazy<Regex> = Lazy::new(|| pattern(r"([{,]\s*)([A-Za-z0-9_]+)(\s*:)"));
static BARE_ELLIPSIS: Lazy<Regex> = Lazy::new(|| pattern(r"\.{3,}|…"));
static SLIDE_COUNT_NOTE: Lazy<Regex> = Lazy::new(|| pattern(r"(?i)\[\s*exactly\s+\d+\s+slides?\s*\]"));
static EMPTY_IMAGE_TAG: Lazy<Regex> = Lazy::new(|| pattern(r"(?i)\[\s*image:\s*\]"));

pub fn strip_wrappers(raw: &str) -> String {
    let cleaned = raw.trim();
    let cleaned = FENCE_OPEN_JSON.replace(cleaned, "");
    let cleaned = FENCE_OPEN.replace(&cleaned, "");
    let cleaned = FENCE_CLOSE.replace(&cleaned, "");

    let span = match (cleaned.find('{'), cleaned.rfind('}')) {
        (Some(start), Some(end)) if end > start => &cleaned[start..=end],
        _ => &cleaned[..],
    };
    span.trim().to_string()
}

pub fn remove_trailing_commas(json: &str) -> String {
    map_code(json, |code| TRAILING_COMMA.replace_all(code, "$1").into_owned())
}

pub fn fix_common_errors(json: &str) -> String {
    let fixed = remove_trailing_commas(json);

    let fixed = map_code(&fixed, |code| {
        let code = SINGLE_QUOTED_KEY.replace_all(code, "$1\"$2\"$3");
        BARE_KEY.replace_all(&code, "$1\"$2\"$3").into_owned()
    });

    let fixed = map_strings(&fixed, escape_string_literal);

    let fixed = map_strings(&fixed, |s| {
        if s == "\"...\"" || s == "\"…\"" {
            "\"\"".to_string()
        } else {
            s.to_string()
        }
    });
    let fixed = map_code(&fixed, |code| BARE_ELLIPSIS.replace_all(code, "").into_owned());

    let fixed = SLIDE_COUNT_NOTE.replace_all(&fixed, "");
    let fixed = EMPTY_IMAGE_TAG.replace_all(&fixed, "");

    strip_comments(&fixed)
}

/// Collapses doubled `\\n` escapes and escapes raw control characters, which
/// strict JSON rejects inside string literals.
fn escape_string_literal(literal: &str) -> String {
    let collapsed = literal.replace("\\\\n", "\\n");
    if !collapsed.contains(['\n', '\r', '\t']) {
        return collapsed;
    }
    let mut out = String::with_capacity(collapsed.len() + 8);
    for c in collapsed.chars() {
        match c {
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn parses(json: &str) -> Value {
        serde_json::from_str(json).unwrap_or_else(|e| panic!("{e}: {json}"))
    }

    #[test]
    fn strips_json_fence() {
        let out = strip_wrappers("```json\n{\"title\":\"X\"}\n```");
        assert_eq!(out, "{\"title\":\"X\"}");
    }

    #[test]
    fn strips_untagged_fence_and_prose() {
        let out = strip_wrappers("Sure! Here it is:\n```\n{\"a\": {\"b\": 1}}\n```\nEnjoy!");
        assert_eq!(out, "{\"a\": {\"b\": 1}}");
    }

    #[test]
    fn text_without_braces_passes_through_trimmed() {
        assert_eq!(strip_wrappers("  no json here \n"), "no json here");
        assert_eq!(strip_wrappers("} backwards {"), "} backwards {");
    }

    #[test]
    fn truncated_object_keeps_everything_from_first_brace() {
        let out = strip_wrappers("Preamble {\"title\": \"T\", \"slides\": [{\"heading\": \"H\"}");
        assert_eq!(out, "{\"title\": \"T\", \"slides\": [{\"heading\": \"H\"}");
    }

    #[test]
    fn removes_trailing_commas() {
        let out = fix_common_errors(r#"{"slides": [{"heading": "Hi",},]}"#);
        assert_eq!(parses(&out)["slides"][0]["heading"], "Hi");
    }

    #[test]
    fn quotes_bare_and_single_quoted_keys() {
        let out = fix_common_errors(r#"{title: "Test", 'slides': [{type: "TITLE"}]}"#);
        let v = parses(&out);
        assert_eq!(v["title"], "Test");
        assert_eq!(v["slides"][0]["type"], "TITLE");
    }

    #[test]
    fn leaves_colons_inside_strings_alone() {
        let input = r#"{"body": "First, note: this stays"}"#;
        assert_eq!(fix_common_errors(input), input);
    }

    #[test]
    fn escapes_raw_newlines_and_collapses_double_escapes() {
        let out = fix_common_errors("{\"body\": \"Line 1\nLine 2\\\\nLine 3\"}");
        assert_eq!(parses(&out)["body"], "Line 1\nLine 2\nLine 3");
    }

    #[test]
    fn drops_ellipsis_placeholders() {
        let out = fix_common_errors(r#"{"slides": [{"heading": "Hello"}, "..."], "more": [1, 2, ...]}"#);
        assert!(!out.contains("..."));
        // dropping the bare ellipsis exposes a trailing comma; repair removes it
        let v = parses(&remove_trailing_commas(&out));
        assert_eq!(v["slides"][1], "");
        assert_eq!(v["more"].as_array().map(Vec::len), Some(2));
    }

    #[test]
    fn keeps_ellipsis_inside_prose() {
        let out = fix_common_errors(r#"{"body": "Wait... what?"}"#);
        assert_eq!(parses(&out)["body"], "Wait... what?");
    }

    #[test]
    fn strips_meta_comments_and_empty_image_tags() {
        let out = fix_common_errors(r#"{"a": "[IMAGE: ]", "b": [1, [Exactly 10 slides]]}"#);
        assert!(!out.contains("Exactly"));
        assert!(out.contains(r#""a": """#));
    }

    #[test]
    fn strips_comments() {
        let out = fix_common_errors("{\"a\": 1, // count\n /* meta */ \"b\": \"http://x\"}");
        let v = parses(&out);
        assert_eq!(v["b"], "http://x");
    }
}
