//! Prompt text sent to the generation backend.

use carousel_common::{limits, GenerationRequest, SlideType};

const SYSTEM_PREAMBLE: &str = "You are a carousel writer. You turn a topic into a short deck of social media slides.
Respond with a single JSON object and nothing else: no introduction, no markdown code fences, no comments.";

const SCHEMA: &str = r#"{
  "title": "Deck title",
  "slides": [
    { "type": "TITLE", "heading": "Hook", "subheading": "One-line promise" },
    { "type": "CONTENT", "heading": "Point", "body": "Short explanation" },
    { "type": "NUMBERED", "heading": "Steps", "items": ["First", "Second", "Third"] },
    { "type": "COMPARISON", "heading": "A vs B", "leftContent": "About A", "rightContent": "About B" },
    { "type": "IMAGE_TEXT", "heading": "Picture this", "body": "Caption", "imagePlaceholder": "What the image shows" },
    { "type": "CTA", "heading": "Closing line", "subtext": "Why act now", "buttonText": "Follow" }
  ]
}"#;

fn slide_type_list() -> String {
    SlideType::ALL
        .iter()
        .map(|t| t.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn system_prompt() -> String {
    format!(
        "{SYSTEM_PREAMBLE}

Use exactly this structure:
{SCHEMA}

Slide types: {types}.

Length limits (characters): title {title}, heading {heading}, subheading {subheading}, body {body}, \
leftContent/rightContent {side}, imagePlaceholder {image}, buttonText {button}, subtext {subtext}, each item {item}.

Rules:
1. The \"slides\" array length MUST match the requested count exactly.
2. The first slide is TITLE and the last slide is CTA. Do not use TITLE or CTA anywhere else.
3. Never use the same type more than three times in a row.
4. Keep text concise and punchy. Use double quotes for every key and string.",
        types = slide_type_list(),
        title = limits::TITLE,
        heading = limits::HEADING,
        subheading = limits::SUBHEADING,
        body = limits::BODY,
        side = limits::SIDE_CONTENT,
        image = limits::IMAGE_PLACEHOLDER,
        button = limits::BUTTON_TEXT,
        subtext = limits::SUBTEXT,
        item = limits::ITEM,
    )
}

pub fn build_user_prompt(request: &GenerationRequest) -> String {
    let mut prompt = format!(
        "Topic: {}\nCount: {} slides\nTone: {}\n",
        request.topic.trim(),
        request.count,
        request.tone.trim()
    );
    if let Some(style) = request.style.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        prompt.push_str(&format!("Style: {style}\n"));
    }
    prompt.push_str("Generate JSON now.");
    prompt
}
