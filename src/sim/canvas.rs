//! Retained-mode 2D canvas
//!
//! The simulation never draws directly. It creates shapes on a [`Canvas`],
//! moves them by deltas and asks the canvas which shapes overlap a box.
//! [`Scene`] is the in-memory implementation; the renderer walks its shapes
//! every frame.

use std::collections::BTreeMap;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Stable handle to a shape on a canvas
///
/// Handles are allocated in increasing order and never reused, so ordering by
/// handle is creation (stacking) order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ShapeId(u32);

/// Axis-aligned bounding box in canvas coordinates (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Bounds {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Bounds {
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Box of the given size centered on `center`
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        let half = size * 0.5;
        Self::new(
            center.x - half.x,
            center.y - half.y,
            center.x + half.x,
            center.y + half.y,
        )
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(
            (self.left + self.right) * 0.5,
            (self.top + self.bottom) * 0.5,
        )
    }

    pub fn translated(&self, delta: Vec2) -> Self {
        Self::new(
            self.left + delta.x,
            self.top + delta.y,
            self.right + delta.x,
            self.bottom + delta.y,
        )
    }

    /// Overlap test with inclusive edges: boxes that only touch still overlap
    pub fn overlaps(&self, other: &Bounds) -> bool {
        self.left <= other.right
            && other.left <= self.right
            && self.top <= other.bottom
            && other.top <= self.bottom
    }
}

/// Geometric shape kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShapeKind {
    Oval,
    Rectangle,
}

/// Fill and outline for a shape (colors are CSS color strings)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Style {
    pub fill: String,
    pub outline: Option<String>,
    pub outline_width: f32,
}

impl Style {
    pub fn filled(fill: impl Into<String>) -> Self {
        Self {
            fill: fill.into(),
            outline: None,
            outline_width: 0.0,
        }
    }

    pub fn with_outline(mut self, color: impl Into<String>, width: f32) -> Self {
        self.outline = Some(color.into());
        self.outline_width = width;
        self
    }
}

/// Text font
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Font {
    pub family: String,
    /// Size in pixels
    pub size: f32,
    pub bold: bool,
}

impl Font {
    pub fn new(family: impl Into<String>, size: f32) -> Self {
        Self {
            family: family.into(),
            size,
            bold: false,
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// CSS font shorthand, e.g. `bold 24px Helvetica`
    pub fn css(&self) -> String {
        if self.bold {
            format!("bold {}px {}", self.size, self.family)
        } else {
            format!("{}px {}", self.size, self.family)
        }
    }
}

/// What a shape draws as
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Item {
    Oval,
    Rectangle,
    /// Text centered on the shape's bounds
    Text { content: String, font: Font },
}

/// A live shape
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shape {
    pub id: ShapeId,
    pub bounds: Bounds,
    pub style: Style,
    pub item: Item,
}

/// The drawing surface the game is played on
pub trait Canvas {
    fn width(&self) -> f32;
    fn height(&self) -> f32;

    fn create_shape(&mut self, kind: ShapeKind, bounds: Bounds, style: Style) -> ShapeId;

    /// Text anchored at its center
    fn create_text(&mut self, position: Vec2, content: &str, font: Font, color: &str) -> ShapeId;

    fn update_text(&mut self, id: ShapeId, content: &str);

    /// Current bounds, `None` once the shape is deleted
    fn bounds(&self, id: ShapeId) -> Option<Bounds>;

    fn move_by(&mut self, id: ShapeId, delta: Vec2);

    fn delete(&mut self, id: ShapeId);

    /// Every shape whose bounds overlap `area`, in stacking order
    fn find_overlapping(&self, area: Bounds) -> Vec<ShapeId>;
}

/// In-memory retained scene
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scene {
    width: f32,
    height: f32,
    background: String,
    shapes: BTreeMap<ShapeId, Shape>,
    next_id: u32,
}

impl Scene {
    pub fn new(width: f32, height: f32, background: impl Into<String>) -> Self {
        Self {
            width,
            height,
            background: background.into(),
            shapes: BTreeMap::new(),
            next_id: 1,
        }
    }

    pub fn background(&self) -> &str {
        &self.background
    }

    /// Live shapes in stacking order (bottom first)
    pub fn shapes(&self) -> impl Iterator<Item = &Shape> {
        self.shapes.values()
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Text content of a text shape
    pub fn text(&self, id: ShapeId) -> Option<&str> {
        match &self.shapes.get(&id)?.item {
            Item::Text { content, .. } => Some(content),
            _ => None,
        }
    }

    fn insert(&mut self, bounds: Bounds, style: Style, item: Item) -> ShapeId {
        let id = ShapeId(self.next_id);
        self.next_id += 1;
        self.shapes.insert(
            id,
            Shape {
                id,
                bounds,
                style,
                item,
            },
        );
        id
    }
}

/// Rough text extent, used only so text shapes have a box
fn text_bounds(position: Vec2, content: &str, font: &Font) -> Bounds {
    let chars = content.chars().count() as f32;
    Bounds::from_center(position, Vec2::new(chars * font.size * 0.6, font.size))
}

impl Canvas for Scene {
    fn width(&self) -> f32 {
        self.width
    }

    fn height(&self) -> f32 {
        self.height
    }

    fn create_shape(&mut self, kind: ShapeKind, bounds: Bounds, style: Style) -> ShapeId {
        let item = match kind {
            ShapeKind::Oval => Item::Oval,
            ShapeKind::Rectangle => Item::Rectangle,
        };
        self.insert(bounds, style, item)
    }

    fn create_text(&mut self, position: Vec2, content: &str, font: Font, color: &str) -> ShapeId {
        let bounds = text_bounds(position, content, &font);
        self.insert(
            bounds,
            Style::filled(color),
            Item::Text {
                content: content.to_string(),
                font,
            },
        )
    }

    fn update_text(&mut self, id: ShapeId, content: &str) {
        let Some(shape) = self.shapes.get_mut(&id) else {
            log::debug!("update_text on missing shape {:?}", id);
            return;
        };
        if let Item::Text {
            content: current,
            font,
        } = &mut shape.item
        {
            shape.bounds = text_bounds(shape.bounds.center(), content, font);
            *current = content.to_string();
        }
    }

    fn bounds(&self, id: ShapeId) -> Option<Bounds> {
        self.shapes.get(&id).map(|s| s.bounds)
    }

    fn move_by(&mut self, id: ShapeId, delta: Vec2) {
        match self.shapes.get_mut(&id) {
            Some(shape) => shape.bounds = shape.bounds.translated(delta),
            None => log::debug!("move on missing shape {:?}", id),
        }
    }

    fn delete(&mut self, id: ShapeId) {
        if self.shapes.remove(&id).is_none() {
            log::debug!("delete on missing shape {:?}", id);
        }
    }

    fn find_overlapping(&self, area: Bounds) -> Vec<ShapeId> {
        self.shapes
            .values()
            .filter(|s| s.bounds.overlaps(&area))
            .map(|s| s.id)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scene() -> Scene {
        Scene::new(610.0, 400.0, "#1C1C1C")
    }

    #[test]
    fn test_overlap_is_inclusive() {
        let a = Bounds::new(0.0, 0.0, 10.0, 10.0);
        let touching = Bounds::new(10.0, 0.0, 20.0, 10.0);
        let apart = Bounds::new(10.5, 0.0, 20.0, 10.0);
        assert!(a.overlaps(&touching));
        assert!(touching.overlaps(&a));
        assert!(!a.overlaps(&apart));
    }

    #[test]
    fn test_find_overlapping_in_stacking_order() {
        let mut scene = scene();
        let low = scene.create_shape(
            ShapeKind::Rectangle,
            Bounds::new(0.0, 0.0, 50.0, 50.0),
            Style::filled("red"),
        );
        let high = scene.create_shape(
            ShapeKind::Oval,
            Bounds::new(40.0, 40.0, 60.0, 60.0),
            Style::filled("black"),
        );
        scene.create_shape(
            ShapeKind::Rectangle,
            Bounds::new(200.0, 200.0, 220.0, 220.0),
            Style::filled("blue"),
        );

        let hits = scene.find_overlapping(Bounds::new(45.0, 45.0, 55.0, 55.0));
        assert_eq!(hits, vec![low, high]);
    }

    #[test]
    fn test_move_and_delete() {
        let mut scene = scene();
        let id = scene.create_shape(
            ShapeKind::Oval,
            Bounds::from_center(Vec2::new(100.0, 100.0), Vec2::splat(20.0)),
            Style::filled("black").with_outline("red", 2.0),
        );
        scene.move_by(id, Vec2::new(6.0, -6.0));
        assert_eq!(scene.bounds(id), Some(Bounds::new(96.0, 84.0, 116.0, 104.0)));

        scene.delete(id);
        assert_eq!(scene.bounds(id), None);
        assert!(scene.is_empty());

        // Stale handles are ignored
        scene.move_by(id, Vec2::ONE);
        scene.delete(id);
        assert!(scene.find_overlapping(Bounds::new(0.0, 0.0, 610.0, 400.0)).is_empty());
    }

    #[test]
    fn test_text_update() {
        let mut scene = scene();
        let font = Font::new("Helvetica", 15.0).bold();
        let id = scene.create_text(Vec2::new(300.0, 20.0), "Score: 0", font, "white");
        assert_eq!(scene.text(id), Some("Score: 0"));

        scene.update_text(id, "Score: 10 | High Score: 10");
        assert_eq!(scene.text(id), Some("Score: 10 | High Score: 10"));
        let center = scene.bounds(id).map(|b| b.center()).unwrap_or_default();
        assert!((center - Vec2::new(300.0, 20.0)).length() < 0.001);
    }

    #[test]
    fn test_font_css() {
        assert_eq!(Font::new("Helvetica", 24.0).bold().css(), "bold 24px Helvetica");
        assert_eq!(Font::new("Helvetica", 20.0).css(), "20px Helvetica");
    }
}
