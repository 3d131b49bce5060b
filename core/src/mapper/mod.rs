//! Turns a validated [`Payload`] into an editor-ready [`Project`].
//!
//! The mapper does no recovery of its own; it expects the invariants the
//! parser guarantees.

pub mod slots;
pub mod templates;

use carousel_common::{Payload, SlideContent, SlideType};
use carousel_protocol::{
    new_id, AspectRatio, BaseElement, CanvasElement, ElementKind, FilterConfig, GlassOverlay,
    ImageElement, Project, Slide, SlideLayoutType, Slot, TextElement,
};

pub use templates::{base_templates, find_template};

pub const PROJECT_VERSION: u32 = 2;
pub const FONT_FAMILY: &str = "Inter";
const BACKGROUND_COLOR: &str = "#000000";
const IMAGE_Z: i32 = 5;
const TEXT_Z: i32 = 10;

pub struct ContentMapper;

impl ContentMapper {
    pub fn create_project_from_ai(payload: &Payload) -> Project {
        let slides: Vec<Slide> = payload
            .slides
            .iter()
            .enumerate()
            .map(|(order, content)| Self::map_slide(order, content))
            .collect();

        let now = chrono::Utc::now().timestamp_millis();
        tracing::debug!(slides = slides.len(), "mapped payload to project");
        Project {
            id: new_id(),
            version: PROJECT_VERSION,
            title: payload.title.clone(),
            slides,
            created_at: now,
            updated_at: now,
            aspect_ratio: AspectRatio::Square,
            theme: "default".to_string(),
        }
    }

    fn map_slide(order: usize, content: &SlideContent) -> Slide {
        let template = find_template(content.slide_type.as_str());
        let centered = content.slide_type.is_centered();

        let mut elements: Vec<CanvasElement> = template
            .background_elements
            .iter()
            .map(CanvasElement::instantiate)
            .collect();

        for slot in &template.slots {
            let Some(binding) = slots::binding(&slot.id) else {
                tracing::warn!(slot = %slot.id, template = %template.id, "slot has no field binding");
                continue;
            };
            let value = binding.source.read(content);
            if value.trim().is_empty() {
                continue;
            }
            match slot.kind {
                ElementKind::Text => {
                    elements.push(text_element(slot, value, binding.style_for(centered)));
                }
                ElementKind::Image => elements.push(image_placeholder(slot, value)),
                ElementKind::Shape => {}
            }
        }

        Slide {
            id: new_id(),
            elements,
            order,
            background_color: BACKGROUND_COLOR.to_string(),
            background_filters: FilterConfig::default(),
            layout_type: Some(layout_type(content.slide_type)),
            glass_overlay: content.has_glass_overlay.then(GlassOverlay::default),
        }
    }
}

fn text_element(slot: &Slot, content: String, style: slots::TextStyle) -> CanvasElement {
    let mut base = BaseElement::at(slot.rect, TEXT_Z);
    base.name = Some(slot.id.clone());
    CanvasElement::Text(TextElement {
        base,
        content,
        font_size: style.font_size,
        font_family: FONT_FAMILY.to_string(),
        font_weight: style.font_weight,
        fill: style.fill.to_string(),
        align: style.align,
        vertical_align: style.vertical_align,
        line_height: style.line_height,
        auto_width: false,
        auto_height: true,
    })
}

/// Image slots have no picture yet; the element carries the requested
/// image description as its alt text.
fn image_placeholder(slot: &Slot, description: String) -> CanvasElement {
    let mut base = BaseElement::at(slot.rect, IMAGE_Z);
    base.name = Some(slot.id.clone());
    CanvasElement::Image(ImageElement {
        base,
        src: String::new(),
        alt: Some(description),
        maintain_aspect_ratio: true,
    })
}

pub fn layout_type(slide_type: SlideType) -> SlideLayoutType {
    match slide_type {
        SlideType::Title => SlideLayoutType::Title,
        SlideType::Content => SlideLayoutType::Content,
        SlideType::Numbered => SlideLayoutType::Numbered,
        SlideType::Comparison => SlideLayoutType::Comparison,
        SlideType::ComparisonImage => SlideLayoutType::ComparisonImage,
        SlideType::ImageOnly => SlideLayoutType::ImageOnly,
        SlideType::ImageText => SlideLayoutType::ImageText,
        SlideType::Heading => SlideLayoutType::Heading,
        SlideType::Cta => SlideLayoutType::Cta,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use carousel_protocol::{ShapeElement, TextAlign};

    fn slide(slide_type: SlideType, heading: &str) -> SlideContent {
        SlideContent::new(slide_type, heading)
    }

    fn texts(slide: &Slide) -> Vec<(&str, &str)> {
        slide
            .elements
            .iter()
            .filter_map(CanvasElement::as_text)
            .map(|t| (t.base.name.as_deref().unwrap_or(""), t.content.as_str()))
            .collect()
    }

    fn sample() -> Payload {
        let mut title = slide(SlideType::Title, "Welcome");
        title.subheading = "Intro".into();
        let mut content = slide(SlideType::Content, "Info");
        content.body = "Details here".into();
        let mut cta = slide(SlideType::Cta, "Act Now");
        cta.button_text = "Click".into();
        cta.subtext = "Free trial".into();
        Payload { title: "Test Project".into(), slides: vec![title, content, cta] }
    }

    #[test]
    fn maps_every_slide_in_order() {
        let project = ContentMapper::create_project_from_ai(&sample());
        assert_eq!(project.title, "Test Project");
        assert_eq!(project.version, PROJECT_VERSION);
        assert_eq!(project.slides.len(), 3);
        for (i, s) in project.slides.iter().enumerate() {
            assert_eq!(s.order, i);
            assert!(!s.elements.is_empty());
        }
        assert_eq!(texts(&project.slides[0]), vec![("heading", "Welcome"), ("subheading", "Intro")]);
        assert_eq!(texts(&project.slides[1]), vec![("heading", "Info"), ("body", "Details here")]);
    }

    #[test]
    fn empty_fields_emit_no_element() {
        let payload = Payload { title: "T".into(), slides: vec![slide(SlideType::Content, "Only heading")] };
        let project = ContentMapper::create_project_from_ai(&payload);
        assert_eq!(texts(&project.slides[0]), vec![("heading", "Only heading")]);
    }

    #[test]
    fn centered_layouts_use_centered_styles() {
        let project = ContentMapper::create_project_from_ai(&sample());
        let hero = project.slides[0].elements[0].as_text().unwrap();
        assert_eq!(hero.align, TextAlign::Center);
        assert_eq!(hero.font_size, 80.0);
        let content = project.slides[1].elements[0].as_text().unwrap();
        assert_eq!(content.align, TextAlign::Left);
        assert_eq!(content.font_size, 56.0);
    }

    #[test]
    fn cta_gets_button_shape_and_text() {
        let project = ContentMapper::create_project_from_ai(&sample());
        let cta = &project.slides[2];
        let button = cta.elements.iter().find_map(|e| match e {
            CanvasElement::Shape(ShapeElement { fill, .. }) => Some(fill.as_str()),
            _ => None,
        });
        assert_eq!(button, Some(templates::ACCENT));
        assert!(texts(cta).contains(&("buttonText", "Click")));
        assert!(texts(cta).contains(&("subtext", "Free trial")));
        let template_button = find_template("CTA").background_elements[0].base().id.clone();
        assert!(cta.elements.iter().all(|e| e.base().id != template_button));
    }

    #[test]
    fn numbered_slides_render_item_list() {
        let mut numbered = slide(SlideType::Numbered, "Steps");
        numbered.items = vec!["Plan".into(), "Ship".into()];
        let payload = Payload { title: "T".into(), slides: vec![numbered] };
        let project = ContentMapper::create_project_from_ai(&payload);
        assert!(texts(&project.slides[0]).contains(&("items", "1. Plan\n2. Ship")));
    }

    #[test]
    fn comparison_fills_both_columns() {
        let mut cmp = slide(SlideType::Comparison, "A vs B");
        cmp.left_content = "Option A".into();
        cmp.right_content = "Option B".into();
        let payload = Payload { title: "T".into(), slides: vec![cmp] };
        let project = ContentMapper::create_project_from_ai(&payload);
        let t = texts(&project.slides[0]);
        assert!(t.contains(&("left_body", "Option A")));
        assert!(t.contains(&("right_body", "Option B")));
        assert_eq!(project.slides[0].layout_type, Some(SlideLayoutType::Comparison));
    }

    #[test]
    fn image_slides_get_placeholder_and_glass() {
        let mut img = slide(SlideType::ImageText, "Look");
        img.image_placeholder = "A sunrise over mountains".into();
        img.has_glass_overlay = true;
        let payload = Payload { title: "T".into(), slides: vec![img] };
        let project = ContentMapper::create_project_from_ai(&payload);
        let s = &project.slides[0];
        assert!(s.glass_overlay.is_some());
        let alt = s.elements.iter().find_map(|e| match e {
            CanvasElement::Image(i) => i.alt.as_deref(),
            _ => None,
        });
        assert_eq!(alt, Some("A sunrise over mountains"));
    }
}
