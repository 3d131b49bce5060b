use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum character counts for every text field of a validated payload.
pub mod limits {
    pub const TITLE: usize = 80;
    pub const HEADING: usize = 60;
    pub const SUBHEADING: usize = 80;
    pub const BODY: usize = 200;
    pub const SIDE_CONTENT: usize = 200;
    pub const IMAGE_PLACEHOLDER: usize = 100;
    pub const BUTTON_TEXT: usize = 30;
    pub const SUBTEXT: usize = 100;
    pub const ITEM: usize = 150;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SlideType {
    Title,
    #[default]
    Content,
    Numbered,
    Comparison,
    ComparisonImage,
    ImageOnly,
    ImageText,
    Heading,
    Cta,
}

impl SlideType {
    pub const ALL: [SlideType; 9] = [
        SlideType::Title,
        SlideType::Content,
        SlideType::Numbered,
        SlideType::Comparison,
        SlideType::ComparisonImage,
        SlideType::ImageOnly,
        SlideType::ImageText,
        SlideType::Heading,
        SlideType::Cta,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SlideType::Title => "TITLE",
            SlideType::Content => "CONTENT",
            SlideType::Numbered => "NUMBERED",
            SlideType::Comparison => "COMPARISON",
            SlideType::ComparisonImage => "COMPARISON_IMAGE",
            SlideType::ImageOnly => "IMAGE_ONLY",
            SlideType::ImageText => "IMAGE_TEXT",
            SlideType::Heading => "HEADING",
            SlideType::Cta => "CTA",
        }
    }

    /// Recognizes a model-supplied type tag. Case and surrounding whitespace
    /// are ignored, and `-` or spaces stand in for `_`.
    pub fn from_tag(tag: &str) -> Option<SlideType> {
        let normalized: String = tag
            .trim()
            .chars()
            .map(|c| match c {
                '-' | ' ' => '_',
                other => other.to_ascii_uppercase(),
            })
            .collect();
        SlideType::ALL
            .into_iter()
            .find(|t| t.as_str() == normalized)
    }

    /// Layouts that center their text (hero, section divider, closing slide).
    pub fn is_centered(self) -> bool {
        matches!(self, SlideType::Title | SlideType::Cta | SlideType::Heading)
    }

    pub fn has_image_backdrop(self) -> bool {
        matches!(self, SlideType::ImageText | SlideType::ImageOnly)
    }
}

impl fmt::Display for SlideType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One validated slide of generated content.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SlideContent {
    #[serde(rename = "type")]
    pub slide_type: SlideType,
    pub heading: String,
    pub subheading: String,
    pub body: String,
    pub left_content: String,
    pub right_content: String,
    pub image_placeholder: String,
    pub button_text: String,
    pub subtext: String,
    pub has_glass_overlay: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<String>,
}

impl SlideContent {
    pub fn new(slide_type: SlideType, heading: impl Into<String>) -> Self {
        Self {
            slide_type,
            heading: heading.into(),
            ..Self::default()
        }
    }
}

/// The parser's output: a title plus a non-empty, rule-compliant slide list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Payload {
    pub title: String,
    pub slides: Vec<SlideContent>,
}

/// What the user asked for when requesting a generated carousel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub topic: String,
    pub count: usize,
    pub tone: String,
    pub style: Option<String>,
}

/// A fully assembled prompt handed to a text generation backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptRequest {
    pub system_prompt: String,
    pub user_prompt: String,
    pub temperature: f32,
}
