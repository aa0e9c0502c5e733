//! The ball

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::canvas::{Bounds, Canvas, ShapeId, ShapeKind, Style};
use super::object::GameObject;

/// A ball moving diagonally at a constant speed
///
/// `direction` components are always exactly +1 or -1; bounces only flip or
/// force their signs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    shape: ShapeId,
    pub radius: f32,
    pub direction: Vec2,
    pub speed: f32,
}

impl GameObject for Ball {
    fn shape(&self) -> ShapeId {
        self.shape
    }
}

impl Ball {
    /// Create the ball's shape centered on `center`, heading up and to the right
    pub fn spawn(canvas: &mut impl Canvas, center: Vec2, radius: f32, speed: f32) -> Self {
        let shape = canvas.create_shape(
            ShapeKind::Oval,
            Bounds::from_center(center, Vec2::splat(radius * 2.0)),
            Style::filled("black").with_outline("red", 2.0),
        );
        Self {
            shape,
            radius,
            direction: Vec2::new(1.0, -1.0),
            speed,
        }
    }

    /// Displacement applied by one update
    #[inline]
    pub fn velocity(&self) -> Vec2 {
        self.direction * self.speed
    }

    /// Bounce off the side and top walls, then advance one step
    ///
    /// The bottom edge is open: falling out is handled by the game.
    pub fn update(&mut self, canvas: &mut impl Canvas) {
        let bounds = self.position(canvas);
        let width = canvas.width();
        if bounds.left <= 0.0 || bounds.right >= width {
            self.direction.x = -self.direction.x;
        }
        if bounds.top <= 0.0 {
            self.direction.y = -self.direction.y;
        }
        self.move_by(canvas, self.velocity());
    }
}
