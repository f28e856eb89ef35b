//! Document model: layout elements, their attributes, and canvas settings.
//!
//! This module defines the core data types that describe what is on the
//! design canvas (`Element`, `ElementKind`), a sparse-update type for
//! incremental geometry edits (`ElementPatch`), the per-document singletons
//! (`Background`, `CanvasConfig`), and the typed style vocabulary
//! (`FontStyle`, `TextAlign`, `TextDecoration`, `ShapeType`).
//!
//! Wire field names are camelCase because the persisted layout document is
//! an external contract with the certificate-rendering backend; the
//! in-memory representation stays fully typed, with one closed sum type per
//! open-ended string the wire carries.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::consts::{
    A4_LANDSCAPE, A4_PORTRAIT, DEFAULT_ELEMENT_X, DEFAULT_ELEMENT_Y, US_LETTER_LANDSCAPE,
    US_LETTER_PORTRAIT,
};

/// Unique identifier for a layout element.
pub type ElementId = Uuid;

/// Bold/italic style flags.
///
/// On the wire this is the renderer's normalized space-joined token string
/// (`"bold"`, `"italic"`, `"bold italic"`, or `"normal"` when neither flag
/// is set). In memory it is a plain pair of booleans so toggling is
/// idempotent by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FontStyle {
    /// Bold flag.
    pub bold: bool,
    /// Italic flag.
    pub italic: bool,
}

impl FontStyle {
    /// Parse a space-joined token string. Unknown tokens are ignored.
    #[must_use]
    pub fn from_tokens(tokens: &str) -> Self {
        let mut style = Self::default();
        for token in tokens.split_whitespace() {
            match token {
                "bold" => style.bold = true,
                "italic" => style.italic = true,
                _ => {}
            }
        }
        style
    }

    /// Render the normalized token string used on the wire.
    #[must_use]
    pub fn to_tokens(self) -> String {
        match (self.bold, self.italic) {
            (true, true) => "bold italic".to_owned(),
            (true, false) => "bold".to_owned(),
            (false, true) => "italic".to_owned(),
            (false, false) => "normal".to_owned(),
        }
    }
}

impl Serialize for FontStyle {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_tokens())
    }
}

impl<'de> Deserialize<'de> for FontStyle {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tokens = String::deserialize(deserializer)?;
        Ok(Self::from_tokens(&tokens))
    }
}

/// Horizontal text alignment within the element box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    /// Left-aligned (default).
    #[default]
    Left,
    /// Centered.
    Center,
    /// Right-aligned.
    Right,
}

/// Text decoration applied to the whole element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextDecoration {
    /// No decoration (default).
    #[default]
    None,
    /// Underlined.
    Underline,
}

/// Geometric primitive drawn by a shape element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeType {
    /// Axis-aligned rectangle, optionally with rounded corners.
    #[default]
    Rect,
    /// Ellipse inscribed within the bounding box.
    Circle,
    /// Straight line across the bounding box.
    Line,
}

/// Attributes shared by `text` and `placeholder` elements.
///
/// A placeholder's `text` is a `{{token}}` binding resolved by the renderer
/// at issue time; the editor treats it as opaque content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextAttrs {
    /// Displayed content, or a `{{token}}` binding for placeholders.
    pub text: String,
    /// Font size in canvas units.
    pub font_size: f64,
    /// Font family name.
    pub font_family: String,
    /// Fill color as a CSS color string.
    pub fill: String,
    /// Width of the text box in canvas units.
    pub width: f64,
    /// Height of the text box in canvas units.
    pub height: f64,
    /// Bold/italic flags.
    pub font_style: FontStyle,
    /// Horizontal alignment within the box.
    pub align: TextAlign,
    /// Underline toggle.
    pub text_decoration: TextDecoration,
}

impl Default for TextAttrs {
    fn default() -> Self {
        Self {
            text: "New Text".to_owned(),
            font_size: 24.0,
            font_family: "Arial".to_owned(),
            fill: "#000000".to_owned(),
            width: 200.0,
            height: 30.0,
            font_style: FontStyle::default(),
            align: TextAlign::Left,
            text_decoration: TextDecoration::None,
        }
    }
}

impl TextAttrs {
    /// Default attributes for a new placeholder element.
    #[must_use]
    pub fn placeholder() -> Self {
        Self {
            text: "{{recipient_name}}".to_owned(),
            font_size: 20.0,
            width: 250.0,
            height: 25.0,
            ..Self::default()
        }
    }
}

/// Attributes of an `image` element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageAttrs {
    /// Source URL of the uploaded image.
    pub src: String,
    /// Width in canvas units.
    pub width: f64,
    /// Height in canvas units.
    pub height: f64,
    /// Whether interactive resizes should preserve the aspect ratio.
    pub keep_aspect_ratio: bool,
}

impl Default for ImageAttrs {
    fn default() -> Self {
        Self {
            src: String::new(),
            width: 200.0,
            height: 200.0,
            keep_aspect_ratio: true,
        }
    }
}

/// Attributes of a `shape` element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeAttrs {
    /// Which primitive to draw.
    pub shape_type: ShapeType,
    /// Width in canvas units.
    pub width: f64,
    /// Height in canvas units.
    pub height: f64,
    /// Fill color as a CSS color string.
    pub fill: String,
    /// Stroke color as a CSS color string.
    pub stroke: String,
    /// Stroke width in canvas units.
    pub stroke_width: f64,
    /// Corner radius in canvas units (rect only).
    pub corner_radius: f64,
}

impl Default for ShapeAttrs {
    fn default() -> Self {
        Self {
            shape_type: ShapeType::Rect,
            width: 100.0,
            height: 100.0,
            fill: "#cccccc".to_owned(),
            stroke: "#000000".to_owned(),
            stroke_width: 1.0,
            corner_radius: 0.0,
        }
    }
}

/// Attributes of a `group` element.
///
/// A group has no visual content; its position, rotation, and scale define a
/// local coordinate frame for the children it owns. Scale exists only on
/// groups — leaf elements are sized directly in width/height.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupAttrs {
    /// Horizontal scale applied to children.
    pub scale_x: f64,
    /// Vertical scale applied to children.
    pub scale_y: f64,
    /// Ids of owned children, in draw order.
    pub children_ids: Vec<ElementId>,
}

impl Default for GroupAttrs {
    fn default() -> Self {
        Self { scale_x: 1.0, scale_y: 1.0, children_ids: Vec::new() }
    }
}

/// The kind of a layout element, with its variant-specific attributes.
///
/// Serialized with a lowercase `"type"` discriminator alongside the
/// attribute fields, matching the persisted layout document format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ElementKind {
    /// Static text.
    Text(TextAttrs),
    /// Recipient-data binding rendered as text at issue time.
    Placeholder(TextAttrs),
    /// Uploaded image.
    Image(ImageAttrs),
    /// Geometric primitive.
    Shape(ShapeAttrs),
    /// Local coordinate frame owning child elements. Never persisted.
    Group(GroupAttrs),
}

/// A layout element as stored in the document and on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    /// Unique identifier for this element.
    pub id: ElementId,
    /// X position in canvas units. Relative to the owning group while
    /// grouped, absolute otherwise.
    pub x: f64,
    /// Y position in canvas units. Relative to the owning group while
    /// grouped, absolute otherwise.
    pub y: f64,
    /// Clockwise rotation in degrees.
    pub rotation: f64,
    /// Owning group, if any. A back-reference only: the group's
    /// `children_ids` is the owning side of the relation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<ElementId>,
    /// Variant-specific attributes and the wire `"type"` discriminator.
    #[serde(flatten)]
    pub kind: ElementKind,
}

impl Element {
    /// Create a new root element of the given kind at the default spawn
    /// position, with a fresh id.
    #[must_use]
    pub fn new(kind: ElementKind) -> Self {
        Self::new_at(kind, DEFAULT_ELEMENT_X, DEFAULT_ELEMENT_Y)
    }

    /// Create a new root element of the given kind at an explicit position.
    #[must_use]
    pub fn new_at(kind: ElementKind, x: f64, y: f64) -> Self {
        Self { id: Uuid::new_v4(), x, y, rotation: 0.0, parent_id: None, kind }
    }

    /// Bounding-box size. Groups have no intrinsic size and report zero.
    #[must_use]
    pub fn size(&self) -> (f64, f64) {
        match &self.kind {
            ElementKind::Text(attrs) | ElementKind::Placeholder(attrs) => {
                (attrs.width, attrs.height)
            }
            ElementKind::Image(attrs) => (attrs.width, attrs.height),
            ElementKind::Shape(attrs) => (attrs.width, attrs.height),
            ElementKind::Group(_) => (0.0, 0.0),
        }
    }

    /// Set the bounding-box size. No-op for groups.
    pub fn set_size(&mut self, width: f64, height: f64) {
        match &mut self.kind {
            ElementKind::Text(attrs) | ElementKind::Placeholder(attrs) => {
                attrs.width = width;
                attrs.height = height;
            }
            ElementKind::Image(attrs) => {
                attrs.width = width;
                attrs.height = height;
            }
            ElementKind::Shape(attrs) => {
                attrs.width = width;
                attrs.height = height;
            }
            ElementKind::Group(_) => {}
        }
    }

    /// Scale size-like content attributes by a uniform factor: font size
    /// for text-like elements, stroke width for shapes. Used when a group
    /// transform is baked into its children.
    pub fn scale_content(&mut self, factor: f64) {
        match &mut self.kind {
            ElementKind::Text(attrs) | ElementKind::Placeholder(attrs) => {
                attrs.font_size *= factor;
            }
            ElementKind::Shape(attrs) => {
                attrs.stroke_width *= factor;
            }
            ElementKind::Image(_) | ElementKind::Group(_) => {}
        }
    }

    /// Whether this element carries text attributes (text or placeholder).
    #[must_use]
    pub fn is_text_like(&self) -> bool {
        matches!(self.kind, ElementKind::Text(_) | ElementKind::Placeholder(_))
    }

    /// Text attributes, if this is a text-like element.
    #[must_use]
    pub fn text_attrs_mut(&mut self) -> Option<&mut TextAttrs> {
        match &mut self.kind {
            ElementKind::Text(attrs) | ElementKind::Placeholder(attrs) => Some(attrs),
            _ => None,
        }
    }

    /// Group attributes, if this element is a group.
    #[must_use]
    pub fn as_group(&self) -> Option<&GroupAttrs> {
        match &self.kind {
            ElementKind::Group(attrs) => Some(attrs),
            _ => None,
        }
    }

    /// Mutable group attributes, if this element is a group.
    #[must_use]
    pub fn as_group_mut(&mut self) -> Option<&mut GroupAttrs> {
        match &mut self.kind {
            ElementKind::Group(attrs) => Some(attrs),
            _ => None,
        }
    }
}

/// Sparse geometry update for an element. Only present fields are applied.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ElementPatch {
    /// New x position, if being updated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    /// New y position, if being updated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    /// New width, if being updated. Ignored for groups.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    /// New height, if being updated. Ignored for groups.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    /// New rotation in degrees, if being updated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
}

impl ElementPatch {
    /// Apply the present fields to an element in place.
    pub fn apply(&self, element: &mut Element) {
        if let Some(x) = self.x {
            element.x = x;
        }
        if let Some(y) = self.y {
            element.y = y;
        }
        if let Some(rotation) = self.rotation {
            element.rotation = rotation;
        }
        if self.width.is_some() || self.height.is_some() {
            let (w, h) = element.size();
            element.set_size(self.width.unwrap_or(w), self.height.unwrap_or(h));
        }
    }
}

/// Document background: a fill color and an optional image on top of it.
/// Not an element; one per document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Background {
    /// Fill color as a CSS color string.
    pub fill: String,
    /// Optional background image URL, stretched to cover the canvas.
    pub image: Option<String>,
}

impl Default for Background {
    fn default() -> Self {
        Self { fill: "#FFFFFF".to_owned(), image: None }
    }
}

/// Named paper size for the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PageSize {
    /// ISO A4.
    #[default]
    A4,
    /// US Letter.
    UsLetter,
}

/// Canvas orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Wider than tall (default for certificates).
    #[default]
    Landscape,
    /// Taller than wide.
    Portrait,
}

impl PageSize {
    /// Canvas dimensions for this paper size in the given orientation.
    #[must_use]
    pub fn dimensions(self, orientation: Orientation) -> (f64, f64) {
        match (self, orientation) {
            (Self::A4, Orientation::Landscape) => A4_LANDSCAPE,
            (Self::A4, Orientation::Portrait) => A4_PORTRAIT,
            (Self::UsLetter, Orientation::Landscape) => US_LETTER_LANDSCAPE,
            (Self::UsLetter, Orientation::Portrait) => US_LETTER_PORTRAIT,
        }
    }
}

/// Canvas configuration. Width and height are derived from the
/// (size, orientation) pair but persisted explicitly for the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanvasConfig {
    /// Canvas width in canvas units.
    pub width: f64,
    /// Canvas height in canvas units.
    pub height: f64,
    /// Named paper size.
    pub size: PageSize,
    /// Orientation of the paper.
    pub orientation: Orientation,
}

impl CanvasConfig {
    /// Build a config with width/height derived from the lookup table.
    #[must_use]
    pub fn derive(size: PageSize, orientation: Orientation) -> Self {
        let (width, height) = size.dimensions(orientation);
        Self { width, height, size, orientation }
    }
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self::derive(PageSize::A4, Orientation::Landscape)
    }
}
