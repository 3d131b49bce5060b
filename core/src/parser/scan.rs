//! String-literal-aware scanning over JSON-like text.
//!
//! The scanner is a two-state machine (in string / outside string) that also
//! tracks a pending backslash escape while inside a string. Everything that
//! must not touch string contents (structural repair, comment stripping, key
//! quoting) goes through it.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Segment<'a> {
    /// Text outside any string literal.
    Code(&'a str),
    /// A string literal including its quotes. The closing quote is missing
    /// when the input ends inside the literal.
    Str(&'a str),
}

pub(crate) fn segments(input: &str) -> Vec<Segment<'_>> {
    let mut out = Vec::new();
    let mut start = 0;
    let mut in_string = false;
    let mut escaped = false;

    for (i, c) in input.char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                out.push(Segment::Str(&input[start..i + 1]));
                start = i + 1;
                in_string = false;
            }
        } else if c == '"' {
            if start < i {
                out.push(Segment::Code(&input[start..i]));
            }
            start = i;
            in_string = true;
        }
    }

    if start < input.len() {
        let rest = &input[start..];
        out.push(if in_string { Segment::Str(rest) } else { Segment::Code(rest) });
    }
    out
}

/// Rewrites only the text outside string literals.
pub(crate) fn map_code<F>(input: &str, mut f: F) -> String
where
    F: FnMut(&str) -> String,
{
    let mut out = String::with_capacity(input.len());
    for seg in segments(input) {
        match seg {
            Segment::Code(code) => out.push_str(&f(code)),
            Segment::Str(s) => out.push_str(s),
        }
    }
    out
}

/// Rewrites only string literals (quotes included in what `f` sees).
pub(crate) fn map_strings<F>(input: &str, mut f: F) -> String
where
    F: FnMut(&str) -> String,
{
    let mut out = String::with_capacity(input.len());
    for seg in segments(input) {
        match seg {
            Segment::Code(code) => out.push_str(code),
            Segment::Str(s) => out.push_str(&f(s)),
        }
    }
    out
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct EndState {
    pub in_string: bool,
    pub pending_escape: bool,
    /// Double quotes that open or close a string literal.
    pub unescaped_quotes: usize,
}

pub(crate) fn end_state(input: &str) -> EndState {
    let mut state = EndState::default();
    for c in input.chars() {
        if state.in_string {
            if state.pending_escape {
                state.pending_escape = false;
            } else if c == '\\' {
                state.pending_escape = true;
            } else if c == '"' {
                state.in_string = false;
                state.unescaped_quotes += 1;
            }
        } else if c == '"' {
            state.in_string = true;
            state.unescaped_quotes += 1;
        }
    }
    state
}

/// Removes `//` line comments and `/* */` block comments that sit outside
/// string literals. Line comments keep their terminating newline.
pub(crate) fn strip_comments(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    let mut in_string = false;
    let mut escaped = false;

    while let Some(c) = chars.next() {
        if in_string {
            out.push(c);
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }

        match (c, chars.peek()) {
            ('"', _) => {
                in_string = true;
                out.push(c);
            }
            ('/', Some('/')) => {
                for next in chars.by_ref() {
                    if next == '\n' {
                        out.push('\n');
                        break;
                    }
                }
            }
            ('/', Some('*')) => {
                chars.next();
                let mut prev = '\0';
                for next in chars.by_ref() {
                    if prev == '*' && next == '/' {
                        break;
                    }
                    prev = next;
                }
            }
            _ => out.push(c),
        }
    }
    out
}
