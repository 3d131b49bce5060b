//! Built-in slide templates on a 1080x1080 canvas, one per slide type.

use carousel_common::SlideType;
use carousel_protocol::{
    AspectRatio, BaseElement, CanvasElement, ElementKind, Rect, ShapeElement, ShapeKind, Slot,
    Template,
};
use once_cell::sync::Lazy;

pub const CANVAS_SIZE: f64 = 1080.0;
pub const ACCENT: &str = "#3B82F6";

static BASE_TEMPLATES: Lazy<Vec<Template>> = Lazy::new(|| {
    vec![
        template(
            SlideType::Title,
            "Hero / Title",
            vec![
                text_slot("heading", Rect::new(100.0, 300.0, 880.0, 300.0), 60),
                text_slot("subheading", Rect::new(100.0, 650.0, 880.0, 150.0), 80),
            ],
            vec![],
        ),
        template(
            SlideType::Content,
            "Standard Content",
            vec![
                text_slot("heading", Rect::new(80.0, 100.0, 920.0, 150.0), 60),
                text_slot("body", Rect::new(80.0, 300.0, 920.0, 600.0), 200),
            ],
            vec![],
        ),
        template(
            SlideType::Numbered,
            "Numbered List",
            vec![
                text_slot("heading", Rect::new(80.0, 100.0, 920.0, 150.0), 60),
                text_slot("body", Rect::new(80.0, 260.0, 920.0, 120.0), 200),
                text_slot("items", Rect::new(120.0, 400.0, 880.0, 580.0), 800),
            ],
            vec![],
        ),
        template(
            SlideType::Comparison,
            "Text Comparison",
            vec![
                text_slot("heading", Rect::new(80.0, 100.0, 920.0, 120.0), 60),
                text_slot("left_body", Rect::new(80.0, 250.0, 440.0, 650.0), 200),
                text_slot("right_body", Rect::new(560.0, 250.0, 440.0, 650.0), 200),
            ],
            vec![shape(
                ShapeKind::Line,
                Rect::new(539.0, 250.0, 2.0, 650.0),
                "rgba(255, 255, 255, 0.3)",
                None,
            )],
        ),
        template(
            SlideType::ComparisonImage,
            "Side-by-side Images",
            vec![
                text_slot("heading", Rect::new(80.0, 80.0, 920.0, 100.0), 60),
                image_slot("left_image", Rect::new(80.0, 200.0, 440.0, 600.0)),
                image_slot("right_image", Rect::new(560.0, 200.0, 440.0, 600.0)),
            ],
            vec![],
        ),
        template(
            SlideType::ImageOnly,
            "Full Bleed Image",
            vec![
                image_slot("main_image", Rect::new(0.0, 0.0, CANVAS_SIZE, CANVAS_SIZE)),
                text_slot("caption", Rect::new(100.0, 850.0, 880.0, 150.0), 100),
            ],
            vec![],
        ),
        template(
            SlideType::ImageText,
            "Image + Text",
            vec![
                image_slot("main_image", Rect::new(80.0, 150.0, 440.0, 780.0)),
                text_slot("heading", Rect::new(560.0, 150.0, 440.0, 200.0), 60),
                text_slot("body", Rect::new(560.0, 380.0, 440.0, 550.0), 200),
            ],
            vec![],
        ),
        template(
            SlideType::Heading,
            "Section Divider",
            vec![text_slot("heading", Rect::new(140.0, 240.0, 800.0, 600.0), 60)],
            vec![shape(ShapeKind::Rect, Rect::new(490.0, 200.0, 100.0, 8.0), ACCENT, Some(4.0))],
        ),
        template(
            SlideType::Cta,
            "Call to Action",
            vec![
                text_slot("heading", Rect::new(100.0, 400.0, 880.0, 200.0), 60),
                text_slot("subtext", Rect::new(100.0, 650.0, 880.0, 100.0), 100),
                text_slot("buttonText", Rect::new(290.0, 800.0, 500.0, 120.0), 30),
            ],
            vec![shape(ShapeKind::Rect, Rect::new(290.0, 800.0, 500.0, 120.0), ACCENT, Some(60.0))],
        ),
    ]
});

fn template(
    slide_type: SlideType,
    name: &str,
    slots: Vec<Slot>,
    background_elements: Vec<CanvasElement>,
) -> Template {
    Template {
        id: slide_type.as_str().to_string(),
        name: name.to_string(),
        version: 1,
        aspect_ratio: AspectRatio::Square,
        slots,
        background_elements,
    }
}

fn text_slot(id: &str, rect: Rect, char_limit: usize) -> Slot {
    Slot {
        id: id.to_string(),
        kind: ElementKind::Text,
        rect,
        char_limit: Some(char_limit),
    }
}

fn image_slot(id: &str, rect: Rect) -> Slot {
    Slot {
        id: id.to_string(),
        kind: ElementKind::Image,
        rect,
        char_limit: None,
    }
}

fn shape(kind: ShapeKind, rect: Rect, fill: &str, corner_radius: Option<f64>) -> CanvasElement {
    let mut base = BaseElement::at(rect, 1);
    base.locked = true;
    CanvasElement::Shape(ShapeElement {
        base,
        shape_type: kind,
        fill: fill.to_string(),
        stroke: "transparent".to_string(),
        stroke_width: 0.0,
        corner_radius,
    })
}

pub fn base_templates() -> &'static [Template] {
    &BASE_TEMPLATES
}

/// Template registered under `key` (case-insensitive), else the CONTENT template.
pub fn find_template(key: &str) -> &'static Template {
    let key = key.trim().to_ascii_uppercase();
    let templates = base_templates();
    templates
        .iter()
        .find(|t| t.id == key)
        .or_else(|| templates.iter().find(|t| t.id == SlideType::Content.as_str()))
        .unwrap_or(&templates[0])
}
