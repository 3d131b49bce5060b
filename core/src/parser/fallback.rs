//! Stage 7: last-resort extraction from text that never became usable JSON.

use carousel_common::{limits, Payload, SlideContent, SlideType};
use once_cell::sync::Lazy;
use regex::Regex;

use super::text::{clip, has_alphanumeric, pattern};
use super::validate::{DEFAULT_CTA_BUTTON, UNTITLED};

pub const FAILED_HEADING: &str = "Generation Failed";
pub const FAILED_SUBHEADING: &str = "The AI returned an invalid format. Please try again.";
pub const REGENERATE_BUTTON: &str = "Regenerate";

static SECTION_MARKER: Lazy<Regex> =
    Lazy::new(|| pattern(r"(?i)\b(?:slide|chapter|section)\s*#?\s*\d+"));

const EMPHASIS: &[char] = &['*', '_', '#', '`', '~'];
const MARKER_LEFTOVERS: &[char] = &[':', '-', '.', ')', '–', '—'];

pub fn fallback_parse(raw: &str) -> Payload {
    let mut slides: Vec<SlideContent> = SECTION_MARKER
        .split(raw)
        .filter_map(candidate)
        .collect();
    tracing::debug!(candidates = slides.len(), "heuristic fallback");

    if slides.is_empty() {
        let mut failed = SlideContent::new(SlideType::Title, FAILED_HEADING);
        failed.subheading = FAILED_SUBHEADING.to_string();
        slides.push(failed);
    }

    let n = slides.len();
    for (idx, slide) in slides.iter_mut().enumerate() {
        slide.slide_type = if idx == 0 {
            SlideType::Title
        } else if idx == n - 1 {
            SlideType::Cta
        } else {
            SlideType::Content
        };
        match slide.slide_type {
            SlideType::Title if slide.subheading.is_empty() => {
                slide.subheading = clip(&slide.body, limits::SUBHEADING);
            }
            SlideType::Cta => slide.button_text = DEFAULT_CTA_BUTTON.to_string(),
            _ => {}
        }
    }

    if n == 1 {
        let mut retry = SlideContent::new(SlideType::Cta, "Want a different take?");
        retry.subtext = "Run the generation again for a fresh carousel.".to_string();
        retry.button_text = REGENERATE_BUTTON.to_string();
        slides.push(retry);
    }

    let title = slides
        .first()
        .map(|s| clip(&s.heading, limits::TITLE))
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| UNTITLED.to_string());
    Payload { title, slides }
}

/// First usable line becomes the heading, the rest the body.
fn candidate(section: &str) -> Option<SlideContent> {
    let mut lines = section
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with("```"));

    let heading = lines.by_ref().map(clean_heading).find(|h| has_alphanumeric(h))?;
    let body: Vec<&str> = lines.collect();

    let mut slide = SlideContent::new(SlideType::Content, clip(&heading, limits::HEADING));
    slide.body = clip(&body.join("\n"), limits::BODY);
    Some(slide)
}

fn clean_heading(line: &str) -> String {
    let line = line.trim_start_matches(|c: char| MARKER_LEFTOVERS.contains(&c) || c.is_whitespace());
    line.chars()
        .filter(|c| !EMPHASIS.contains(c))
        .collect::<String>()
        .trim()
        .to_string()
}
