//! Stage 5: turn an arbitrary parsed JSON value into a sanitized payload.

use carousel_common::{limits, Payload, SlideContent, SlideType};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};

use super::text::{clip, pattern, scalar_text, truthy};
use crate::error::ParseError;

pub const UNTITLED: &str = "Untitled Project";
pub const DEFAULT_CTA_BUTTON: &str = "Learn More";
/// Body of a CONTENT slide that arrived with neither body nor subheading.
pub const MISSING_BODY: &str = "[AI failed to generate content]";

const COMPARISON_SEPARATORS: [&str; 6] = [" vs ", " vs. ", " versus ", "|", " - ", ": "];
const MAX_DERIVED_ITEMS: usize = 5;

static SEPARATOR_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    COMPARISON_SEPARATORS
        .iter()
        .map(|sep| pattern(&format!("(?i){}", regex::escape(sep))))
        .collect()
});

static SENTENCE_END: Lazy<Regex> = Lazy::new(|| pattern(r"[.!?]+(?:\s+|$)"));

pub fn validate_and_sanitize(data: Value) -> Result<Payload, ParseError> {
    let Value::Object(data) = data else {
        return Err(ParseError::NotAnObject);
    };

    let title = clip(&scalar_text(data.get("title")), limits::TITLE);
    let title = if title.is_empty() { UNTITLED.to_string() } else { title };

    let raw_slides: &[Value] = match data.get("slides") {
        Some(Value::Array(items)) => items.as_slice(),
        _ => &[],
    };

    let mut slides: Vec<SlideContent> = Vec::with_capacity(raw_slides.len());
    for (idx, entry) in raw_slides.iter().enumerate() {
        let Value::Object(raw) = entry else {
            tracing::debug!(idx, "skipping non-object slide entry");
            continue;
        };
        let position = slides.len() + 1;
        slides.push(sanitize_slide(raw, position));
    }

    if let Some(cta) = legacy_cta(&data) {
        if slides.last().is_some_and(|s| s.slide_type != SlideType::Cta) {
            slides.push(cta);
        }
    }

    if slides.is_empty() {
        return Err(ParseError::EmptySlides);
    }
    Ok(Payload { title, slides })
}

fn text_field(raw: &Map<String, Value>, key: &str, max: usize) -> String {
    clip(&scalar_text(raw.get(key)), max)
}

fn sanitize_slide(raw: &Map<String, Value>, position: usize) -> SlideContent {
    let type_tag = scalar_text(raw.get("type"));
    let slide_type = SlideType::from_tag(&type_tag).unwrap_or_else(|| {
        if !type_tag.trim().is_empty() {
            tracing::debug!(tag = %type_tag, "unknown slide type, using CONTENT");
        }
        SlideType::Content
    });

    let mut heading = text_field(raw, "heading", limits::HEADING);
    if heading.is_empty() {
        heading = text_field(raw, "headline", limits::HEADING);
    }
    if heading.is_empty() {
        heading = format!("Slide {position}");
    }

    let mut slide = SlideContent {
        slide_type,
        heading,
        subheading: text_field(raw, "subheading", limits::SUBHEADING),
        body: text_field(raw, "body", limits::BODY),
        left_content: text_field(raw, "leftContent", limits::SIDE_CONTENT),
        right_content: text_field(raw, "rightContent", limits::SIDE_CONTENT),
        image_placeholder: text_field(raw, "imagePlaceholder", limits::IMAGE_PLACEHOLDER),
        button_text: text_field(raw, "buttonText", limits::BUTTON_TEXT),
        subtext: text_field(raw, "subtext", limits::SUBTEXT),
        has_glass_overlay: truthy(raw.get("hasGlassOverlay")),
        items: provided_items(raw.get("items")),
    };

    match slide.slide_type {
        SlideType::Content if slide.body.is_empty() => {
            if slide.subheading.is_empty() {
                slide.body = MISSING_BODY.to_string();
            } else {
                slide.body = clip(&slide.subheading, limits::BODY);
                slide.subheading.clear();
            }
        }
        SlideType::Comparison => fill_comparison(&mut slide),
        SlideType::Numbered if slide.items.is_empty() => {
            slide.items = derive_items(&slide.body, &slide.heading);
        }
        SlideType::Cta if slide.button_text.is_empty() => {
            slide.button_text = DEFAULT_CTA_BUTTON.to_string();
        }
        _ => {}
    }

    if slide.slide_type.has_image_backdrop() {
        slide.has_glass_overlay = true;
    }
    slide
}

fn provided_items(value: Option<&Value>) -> Vec<String> {
    let Some(Value::Array(items)) = value else {
        return Vec::new();
    };
    items
        .iter()
        .map(|item| clip(&scalar_text(Some(item)), limits::ITEM))
        .filter(|item| !item.is_empty())
        .collect()
}

/// Splits `body` at the first separator that leaves text on both sides.
pub(crate) fn split_comparison(body: &str) -> Option<(String, String)> {
    SEPARATOR_PATTERNS.iter().find_map(|sep| {
        let found = sep.find(body)?;
        let left = clip(&body[..found.start()], limits::SIDE_CONTENT);
        let right = clip(&body[found.end()..], limits::SIDE_CONTENT);
        (!left.is_empty() && !right.is_empty()).then_some((left, right))
    })
}

fn fill_comparison(slide: &mut SlideContent) {
    if !slide.left_content.is_empty() && !slide.right_content.is_empty() {
        return;
    }

    let (left, right) = if slide.body.is_empty() {
        (
            format!("{} - Option A", slide.heading),
            format!("{} - Option B", slide.heading),
        )
    } else if let Some(sides) = split_comparison(&slide.body) {
        sides
    } else {
        (slide.body.clone(), format!("{} (comparison needed)", slide.body))
    };

    if slide.left_content.is_empty() {
        slide.left_content = clip(&left, limits::SIDE_CONTENT);
    }
    if slide.right_content.is_empty() {
        slide.right_content = clip(&right, limits::SIDE_CONTENT);
    }
}

fn derive_items(body: &str, heading: &str) -> Vec<String> {
    let from_body: Vec<String> = SENTENCE_END
        .split(body)
        .map(|sentence| clip(sentence, limits::ITEM))
        .filter(|sentence| !sentence.is_empty())
        .take(MAX_DERIVED_ITEMS)
        .collect();
    if !from_body.is_empty() {
        return from_body;
    }
    vec![
        clip(&format!("Key point about {heading}"), limits::ITEM),
        clip(&format!("Why {heading} matters"), limits::ITEM),
    ]
}

/// Earlier response schemas carried the closing call to action as a
/// top-level `cta` string instead of a final slide.
fn legacy_cta(data: &Map<String, Value>) -> Option<SlideContent> {
    let cta = text_field(data, "cta", limits::SUBTEXT);
    if cta.is_empty() {
        return None;
    }
    let mut slide = SlideContent::new(SlideType::Cta, "Thanks for reading!");
    slide.subtext = cta;
    slide.button_text = DEFAULT_CTA_BUTTON.to_string();
    Some(slide)
}
