//! Editor document model: the shape the canvas editor loads and saves.

use serde::{Deserialize, Serialize};

pub type Identifier = String;

pub fn new_id() -> Identifier {
    uuid::Uuid::new_v4().to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AspectRatio {
    #[serde(rename = "1:1")]
    Square,
    #[serde(rename = "16:9")]
    Wide,
    #[serde(rename = "4:5")]
    Portrait,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterConfig {
    pub blur: f64,
    pub brightness: f64,
    pub contrast: f64,
    pub saturation: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlassOverlay {
    pub enabled: bool,
    pub background_color: String,
    pub backdrop_filter: String,
    pub border_radius: f64,
    pub border: String,
    pub padding: f64,
    pub opacity: f64,
}

impl Default for GlassOverlay {
    fn default() -> Self {
        Self {
            enabled: true,
            background_color: "rgba(255, 255, 255, 0.1)".to_string(),
            backdrop_filter: "blur(12px)".to_string(),
            border_radius: 24.0,
            border: "1px solid rgba(255, 255, 255, 0.2)".to_string(),
            padding: 40.0,
            opacity: 1.0,
        }
    }
}

/// Fields every canvas element carries regardless of kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseElement {
    pub id: Identifier,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub rotation: f64,
    pub opacity: f64,
    pub z_index: i32,
    pub locked: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl BaseElement {
    pub fn at(rect: Rect, z_index: i32) -> Self {
        Self {
            id: new_id(),
            x: rect.x,
            y: rect.y,
            width: rect.width,
            height: rect.height,
            rotation: 0.0,
            opacity: 1.0,
            z_index,
            locked: false,
            name: None,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    Left,
    Center,
    Right,
    Justify,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerticalAlign {
    Top,
    Middle,
    Bottom,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextElement {
    #[serde(flatten)]
    pub base: BaseElement,
    pub content: String,
    pub font_size: f64,
    pub font_family: String,
    pub font_weight: u16,
    pub fill: String,
    pub align: TextAlign,
    pub vertical_align: VerticalAlign,
    pub line_height: f64,
    pub auto_width: bool,
    pub auto_height: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageElement {
    #[serde(flatten)]
    pub base: BaseElement,
    pub src: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
    pub maintain_aspect_ratio: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Rect,
    Circle,
    Line,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeElement {
    #[serde(flatten)]
    pub base: BaseElement,
    pub shape_type: ShapeKind,
    pub fill: String,
    pub stroke: String,
    pub stroke_width: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub corner_radius: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum CanvasElement {
    Text(TextElement),
    Image(ImageElement),
    Shape(ShapeElement),
}

impl CanvasElement {
    pub fn base(&self) -> &BaseElement {
        match self {
            CanvasElement::Text(e) => &e.base,
            CanvasElement::Image(e) => &e.base,
            CanvasElement::Shape(e) => &e.base,
        }
    }

    pub fn base_mut(&mut self) -> &mut BaseElement {
        match self {
            CanvasElement::Text(e) => &mut e.base,
            CanvasElement::Image(e) => &mut e.base,
            CanvasElement::Shape(e) => &mut e.base,
        }
    }

    pub fn as_text(&self) -> Option<&TextElement> {
        match self {
            CanvasElement::Text(e) => Some(e),
            _ => None,
        }
    }

    /// Copy of this element carrying a fresh identifier.
    pub fn instantiate(&self) -> Self {
        let mut copy = self.clone();
        copy.base_mut().id = new_id();
        copy
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlideLayoutType {
    Title,
    Content,
    Numbered,
    Comparison,
    ComparisonImage,
    ImageOnly,
    ImageText,
    Heading,
    Cta,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slide {
    pub id: Identifier,
    pub elements: Vec<CanvasElement>,
    pub order: usize,
    pub background_color: String,
    pub background_filters: FilterConfig,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout_type: Option<SlideLayoutType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub glass_overlay: Option<GlassOverlay>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: Identifier,
    pub version: u32,
    pub title: String,
    pub slides: Vec<Slide>,
    pub created_at: i64,
    pub updated_at: i64,
    pub aspect_ratio: AspectRatio,
    pub theme: Identifier,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Text,
    Image,
    Shape,
}

/// A named region of a template that generated content is poured into.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slot {
    pub id: Identifier,
    pub kind: ElementKind,
    pub rect: Rect,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub char_limit: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub id: Identifier,
    pub name: String,
    pub version: u32,
    pub aspect_ratio: AspectRatio,
    pub slots: Vec<Slot>,
    pub background_elements: Vec<CanvasElement>,
}

impl Template {
    pub fn slot(&self, id: &str) -> Option<&Slot> {
        self.slots.iter().find(|s| s.id == id)
    }
}
