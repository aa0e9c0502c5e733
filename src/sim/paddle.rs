//! The player's paddle

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::canvas::{Bounds, Canvas, ShapeId, ShapeKind, Style};
use super::object::GameObject;

/// A horizontally moving paddle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    shape: ShapeId,
    pub width: f32,
    pub height: f32,
    /// Signed horizontal step per update (0 when idle)
    move_speed: f32,
    /// Ball carried before launch. Not owned: the game deletes balls.
    ball: Option<ShapeId>,
}

impl GameObject for Paddle {
    fn shape(&self) -> ShapeId {
        self.shape
    }
}

impl Paddle {
    pub fn spawn(canvas: &mut impl Canvas, center: Vec2, width: f32, height: f32) -> Self {
        let shape = canvas.create_shape(
            ShapeKind::Rectangle,
            Bounds::from_center(center, Vec2::new(width, height)),
            Style::filled("#FF5733").with_outline("#C70039", 2.0),
        );
        Self {
            shape,
            width,
            height,
            move_speed: 0.0,
            ball: None,
        }
    }

    pub fn move_speed(&self) -> f32 {
        self.move_speed
    }

    pub fn ball(&self) -> Option<ShapeId> {
        self.ball
    }

    /// Attach (or detach with `None`) the ball that rides on the paddle
    pub fn set_ball(&mut self, ball: Option<ShapeId>) {
        self.ball = ball;
    }

    /// Start moving by `direction` pixels per update (negative is left)
    pub fn start_move(&mut self, direction: f32) {
        self.move_speed = direction;
    }

    pub fn stop_move(&mut self) {
        self.move_speed = 0.0;
    }

    /// Advance one step if the whole paddle stays on the canvas
    ///
    /// A step that would cross an edge is skipped entirely rather than
    /// clamped.
    pub fn update(&mut self, canvas: &mut impl Canvas) {
        if self.move_speed == 0.0 {
            return;
        }
        let bounds = self.position(canvas);
        let width = canvas.width();
        if bounds.left + self.move_speed >= 0.0 && bounds.right + self.move_speed <= width {
            let delta = Vec2::new(self.move_speed, 0.0);
            self.move_by(canvas, delta);
            if let Some(ball) = self.ball {
                canvas.move_by(ball, delta);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::canvas::Scene;

    fn setup() -> (Scene, Paddle) {
        let mut scene = Scene::new(610.0, 400.0, "#1C1C1C");
        let paddle = Paddle::spawn(&mut scene, Vec2::new(305.0, 350.0), 120.0, 10.0);
        (scene, paddle)
    }

    #[test]
    fn test_spawn_geometry() {
        let (scene, paddle) = setup();
        assert_eq!(paddle.position(&scene), Bounds::new(245.0, 345.0, 365.0, 355.0));
        assert_eq!(paddle.move_speed(), 0.0);
        assert_eq!(paddle.ball(), None);
    }

    #[test]
    fn test_idle_paddle_does_not_move() {
        let (mut scene, mut paddle) = setup();
        paddle.update(&mut scene);
        assert_eq!(paddle.position(&scene).left, 245.0);
    }

    #[test]
    fn test_move_and_stop() {
        let (mut scene, mut paddle) = setup();
        paddle.start_move(10.0);
        paddle.update(&mut scene);
        paddle.update(&mut scene);
        assert_eq!(paddle.position(&scene).left, 265.0);

        paddle.stop_move();
        paddle.update(&mut scene);
        assert_eq!(paddle.position(&scene).left, 265.0);

        paddle.start_move(-10.0);
        paddle.update(&mut scene);
        assert_eq!(paddle.position(&scene).left, 255.0);
    }

    #[test]
    fn test_hard_stop_at_edge() {
        let (mut scene, mut paddle) = setup();
        // 5px from the right edge: a 10px step would overshoot
        scene.move_by(paddle.shape(), Vec2::new(240.0, 0.0));
        assert_eq!(paddle.position(&scene).right, 605.0);

        paddle.start_move(10.0);
        paddle.update(&mut scene);
        assert_eq!(paddle.position(&scene).right, 605.0);

        // Landing exactly on the edge is allowed
        scene.move_by(paddle.shape(), Vec2::new(-5.0, 0.0));
        paddle.update(&mut scene);
        assert_eq!(paddle.position(&scene).right, 610.0);
    }

    #[test]
    fn test_carries_ball() {
        let (mut scene, mut paddle) = setup();
        let ball = scene.create_shape(
            ShapeKind::Oval,
            Bounds::new(295.0, 300.0, 315.0, 320.0),
            Style::filled("black"),
        );
        paddle.set_ball(Some(ball));
        paddle.start_move(-10.0);
        paddle.update(&mut scene);
        assert_eq!(scene.bounds(ball), Some(Bounds::new(285.0, 300.0, 305.0, 320.0)));

        paddle.set_ball(None);
        paddle.update(&mut scene);
        assert_eq!(scene.bounds(ball), Some(Bounds::new(285.0, 300.0, 305.0, 320.0)));
        assert_eq!(paddle.position(&scene).left, 225.0);
    }
}
