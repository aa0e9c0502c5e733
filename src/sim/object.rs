//! Canvas-backed game objects

use glam::Vec2;

use super::canvas::{Bounds, Canvas, ShapeId};

/// A game object is a handle to one shape on the canvas
///
/// Deletion consumes the object, so a deleted object can't be moved or
/// queried again.
pub trait GameObject {
    fn shape(&self) -> ShapeId;

    /// Current bounding box
    fn position(&self, canvas: &impl Canvas) -> Bounds {
        canvas.bounds(self.shape()).unwrap_or_else(|| {
            log::debug!("position of deleted shape {:?}", self.shape());
            Bounds::default()
        })
    }

    /// Translate by `delta`, no bounds checking
    fn move_by(&self, canvas: &mut impl Canvas, delta: Vec2) {
        canvas.move_by(self.shape(), delta);
    }

    fn delete(self, canvas: &mut impl Canvas)
    where
        Self: Sized,
    {
        canvas.delete(self.shape());
    }
}
