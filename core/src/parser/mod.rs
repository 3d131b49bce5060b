//! Tolerant parsing of model output into a rule-compliant [`Payload`].
//!
//! The pipeline degrades through tiers instead of failing:
//!
//! 1. strip wrappers (code fences, surrounding prose)
//! 2. fix common textual mistakes (trailing commas, unquoted keys, comments, ...)
//! 3. strict JSON parse
//! 4. on syntax failure, one structural repair pass and a second strict parse
//! 5. validate and sanitize the parsed value
//! 6. enforce slide ordering rules
//! 7. if 3-5 produced nothing usable, heuristic line-based extraction
//!
//! Each stage returns a `Result<_, ParseError>` and [`ResponseParser::parse`]
//! routes on it; there is no error path out of `parse`.

mod cleanup;
mod fallback;
mod repair;
mod rules;
mod scan;
mod text;
mod validate;

use carousel_common::Payload;
use serde::Serialize;
use serde_json::Value;

use crate::error::ParseError;

pub use cleanup::{fix_common_errors, strip_wrappers};
pub use fallback::{fallback_parse, FAILED_HEADING, REGENERATE_BUTTON};
pub use repair::repair_json;
pub use rules::{enforce_slide_rules, ENFORCED_CTA_BUTTON, ENFORCED_CTA_SUBTEXT};
pub use validate::{validate_and_sanitize, DEFAULT_CTA_BUTTON, MISSING_BODY, UNTITLED};

/// Which tier of the pipeline produced the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    /// The cleaned text parsed as JSON on the first attempt.
    Strict,
    /// Parsed after closing unterminated strings and structures.
    Repaired,
    /// No usable JSON; recovered heuristically from the raw text.
    Fallback,
}

impl Tier {
    pub fn as_str(self) -> &'static str {
        match self {
            Tier::Strict => "strict",
            Tier::Repaired => "repaired",
            Tier::Fallback => "fallback",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParseReport {
    pub payload: Payload,
    pub tier: Tier,
}

pub struct ResponseParser;

impl ResponseParser {
    pub fn parse(raw: &str) -> Payload {
        Self::parse_with_report(raw).payload
    }

    pub fn parse_with_report(raw: &str) -> ParseReport {
        let cleaned = fix_common_errors(&strip_wrappers(raw));

        let (mut payload, tier) = match parse_structured(&cleaned) {
            Ok(parsed) => parsed,
            Err(err) => {
                tracing::warn!("structured parse failed, using heuristic fallback: {err}");
                tracing::debug!(raw = %raw, "raw model output");
                (fallback_parse(raw), Tier::Fallback)
            }
        };

        enforce_slide_rules(&mut payload);
        tracing::debug!(?tier, slides = payload.slides.len(), "parsed model response");
        ParseReport { payload, tier }
    }
}

fn parse_strict(json: &str) -> Result<Value, ParseError> {
    serde_json::from_str(json).map_err(ParseError::Syntax)
}

fn parse_repaired(json: &str) -> Result<Value, ParseError> {
    serde_json::from_str(&repair_json(json)).map_err(ParseError::Repair)
}

fn parse_structured(cleaned: &str) -> Result<(Payload, Tier), ParseError> {
    let (value, tier) = match parse_strict(cleaned) {
        Ok(value) => (value, Tier::Strict),
        Err(err) => {
            tracing::warn!("initial JSON parse failed, attempting repair: {err}");
            (parse_repaired(cleaned)?, Tier::Repaired)
        }
    };
    let payload = validate_and_sanitize(value)?;
    Ok((payload, tier))
}
