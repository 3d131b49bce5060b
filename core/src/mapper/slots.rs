//! Slot id -> payload field and default text style.

use carousel_common::SlideContent;
use carousel_protocol::{TextAlign, VerticalAlign};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Heading,
    Subheading,
    Body,
    LeftContent,
    RightContent,
    ImagePlaceholder,
    ButtonText,
    Subtext,
    /// `items` rendered as a numbered list, one entry per line.
    NumberedItems,
}

impl Source {
    pub fn read(self, slide: &SlideContent) -> String {
        match self {
            Source::Heading => slide.heading.clone(),
            Source::Subheading => slide.subheading.clone(),
            Source::Body => slide.body.clone(),
            Source::LeftContent => slide.left_content.clone(),
            Source::RightContent => slide.right_content.clone(),
            Source::ImagePlaceholder => slide.image_placeholder.clone(),
            Source::ButtonText => slide.button_text.clone(),
            Source::Subtext => slide.subtext.clone(),
            Source::NumberedItems => slide
                .items
                .iter()
                .enumerate()
                .map(|(i, item)| format!("{}. {item}", i + 1))
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub font_size: f64,
    pub font_weight: u16,
    pub fill: &'static str,
    pub align: TextAlign,
    pub vertical_align: VerticalAlign,
    pub line_height: f64,
}

const fn style(
    font_size: f64,
    font_weight: u16,
    fill: &'static str,
    align: TextAlign,
    vertical_align: VerticalAlign,
    line_height: f64,
) -> TextStyle {
    TextStyle { font_size, font_weight, fill, align, vertical_align, line_height }
}

#[derive(Debug, Clone, Copy)]
pub struct SlotBinding {
    pub slot_id: &'static str,
    pub source: Source,
    pub style: TextStyle,
    /// Used by centered layouts (TITLE, CTA, HEADING).
    pub centered: TextStyle,
}

impl SlotBinding {
    pub fn style_for(&self, centered: bool) -> TextStyle {
        if centered {
            self.centered
        } else {
            self.style
        }
    }
}

use TextAlign::{Center, Left};
use VerticalAlign::{Bottom, Middle, Top};

const WHITE: &str = "#ffffff";
const MUTED: &str = "#cccccc";
const SOFT: &str = "#d4d4d4";

pub static SLOT_TABLE: [SlotBinding; 12] = [
    SlotBinding {
        slot_id: "heading",
        source: Source::Heading,
        style: style(56.0, 800, WHITE, Left, Top, 1.1),
        centered: style(80.0, 800, WHITE, Center, Middle, 1.1),
    },
    SlotBinding {
        slot_id: "subheading",
        source: Source::Subheading,
        style: style(32.0, 500, SOFT, Left, Top, 1.3),
        centered: style(36.0, 500, SOFT, Center, Top, 1.3),
    },
    SlotBinding {
        slot_id: "body",
        source: Source::Body,
        style: style(32.0, 400, MUTED, Left, Top, 1.5),
        centered: style(36.0, 400, MUTED, Center, Top, 1.5),
    },
    SlotBinding {
        slot_id: "left_body",
        source: Source::LeftContent,
        style: style(28.0, 400, MUTED, Left, Top, 1.5),
        centered: style(28.0, 400, MUTED, Center, Top, 1.5),
    },
    SlotBinding {
        slot_id: "right_body",
        source: Source::RightContent,
        style: style(28.0, 400, MUTED, Left, Top, 1.5),
        centered: style(28.0, 400, MUTED, Center, Top, 1.5),
    },
    SlotBinding {
        slot_id: "items",
        source: Source::NumberedItems,
        style: style(30.0, 500, WHITE, Left, Top, 1.6),
        centered: style(30.0, 500, WHITE, Center, Top, 1.6),
    },
    SlotBinding {
        slot_id: "caption",
        source: Source::Heading,
        style: style(36.0, 700, WHITE, Center, Bottom, 1.2),
        centered: style(36.0, 700, WHITE, Center, Bottom, 1.2),
    },
    SlotBinding {
        slot_id: "subtext",
        source: Source::Subtext,
        style: style(28.0, 400, MUTED, Left, Top, 1.4),
        centered: style(28.0, 400, MUTED, Center, Top, 1.4),
    },
    SlotBinding {
        slot_id: "buttonText",
        source: Source::ButtonText,
        style: style(40.0, 700, WHITE, Center, Middle, 1.2),
        centered: style(40.0, 700, WHITE, Center, Middle, 1.2),
    },
    SlotBinding {
        slot_id: "main_image",
        source: Source::ImagePlaceholder,
        style: style(24.0, 400, MUTED, Center, Middle, 1.2),
        centered: style(24.0, 400, MUTED, Center, Middle, 1.2),
    },
    SlotBinding {
        slot_id: "left_image",
        source: Source::LeftContent,
        style: style(24.0, 400, MUTED, Center, Middle, 1.2),
        centered: style(24.0, 400, MUTED, Center, Middle, 1.2),
    },
    SlotBinding {
        slot_id: "right_image",
        source: Source::RightContent,
        style: style(24.0, 400, MUTED, Center, Middle, 1.2),
        centered: style(24.0, 400, MUTED, Center, Middle, 1.2),
    },
];

pub fn binding(slot_id: &str) -> Option<&'static SlotBinding> {
    SLOT_TABLE.iter().find(|b| b.slot_id == slot_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapper::templates::base_templates;
    use carousel_common::SlideType;

    #[test]
    fn every_template_slot_is_bound() {
        for t in base_templates() {
            for slot in &t.slots {
                assert!(binding(&slot.id).is_some(), "unbound slot {} in {}", slot.id, t.id);
            }
        }
    }

    #[test]
    fn numbered_items_are_numbered() {
        let mut slide = SlideContent::new(SlideType::Numbered, "Steps");
        slide.items = vec!["Plan".into(), "Build".into()];
        assert_eq!(Source::NumberedItems.read(&slide), "1. Plan\n2. Build");
    }

    #[test]
    fn centered_layouts_center_headings() {
        let heading = binding("heading").unwrap();
        assert_eq!(heading.style_for(true).align, TextAlign::Center);
        assert_eq!(heading.style_for(false).align, TextAlign::Left);
    }
}
