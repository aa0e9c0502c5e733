//! Destructible bricks

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::canvas::{Bounds, Canvas, ShapeId, ShapeKind, Style};
use super::object::GameObject;

/// A static brick with a hit counter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Brick {
    shape: ShapeId,
    hits: u32,
    pub color: String,
}

impl GameObject for Brick {
    fn shape(&self) -> ShapeId {
        self.shape
    }
}

impl Brick {
    pub fn spawn(
        canvas: &mut impl Canvas,
        center: Vec2,
        size: Vec2,
        hits: u32,
        color: &str,
    ) -> Self {
        let shape = canvas.create_shape(
            ShapeKind::Rectangle,
            Bounds::from_center(center, size),
            Style::filled(color).with_outline("white", 1.0),
        );
        Self {
            shape,
            hits,
            color: color.to_string(),
        }
    }

    /// Hits left before the brick breaks
    pub fn hits(&self) -> u32 {
        self.hits
    }

    pub fn is_destroyed(&self) -> bool {
        self.hits == 0
    }

    /// Take one hit. The shape is removed from the canvas when the counter
    /// reaches zero; returns true in that case.
    pub fn hit(&mut self, canvas: &mut impl Canvas) -> bool {
        if self.hits == 0 {
            return false;
        }
        self.hits -= 1;
        if self.hits == 0 {
            canvas.delete(self.shape);
            return true;
        }
        false
    }
}
