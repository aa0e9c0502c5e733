//! Ball collision response
//!
//! Overlap detection is done by the canvas (bounding boxes only); this module
//! decides how the ball's direction changes and which bricks take a hit.

use super::ball::Ball;
use super::brick::Brick;
use super::canvas::{Canvas, ShapeId};
use super::object::GameObject;
use super::paddle::Paddle;

/// An object the ball can overlap
#[derive(Debug)]
pub enum Collider<'a> {
    Paddle(&'a Paddle),
    Brick(&'a mut Brick),
}

/// What a collision did to the bricks involved
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollisionOutcome {
    /// Every brick that took a hit
    pub hit: Vec<ShapeId>,
    /// Bricks whose counter reached zero (already removed from the canvas)
    pub destroyed: Vec<ShapeId>,
}

impl CollisionOutcome {
    pub fn is_empty(&self) -> bool {
        self.hit.is_empty()
    }
}

impl Ball {
    /// Resolve a collision with everything currently overlapping the ball
    ///
    /// - several objects: bounce vertically
    /// - the paddle alone: a ball centered past either paddle end is sent
    ///   toward that side, otherwise it bounces vertically
    /// - a single brick: bounce vertically
    ///
    /// Every overlapping brick is hit regardless of how many objects there are.
    pub fn collide(
        &mut self,
        colliders: &mut [Collider<'_>],
        canvas: &mut impl Canvas,
    ) -> CollisionOutcome {
        let center_x = self.position(canvas).center().x;

        match &*colliders {
            [] => {}
            [Collider::Paddle(paddle)] => {
                let paddle_bounds = paddle.position(canvas);
                if center_x > paddle_bounds.right {
                    self.direction.x = 1.0;
                } else if center_x < paddle_bounds.left {
                    self.direction.x = -1.0;
                } else {
                    self.direction.y = -self.direction.y;
                }
            }
            _ => self.direction.y = -self.direction.y,
        }

        let mut outcome = CollisionOutcome::default();
        for collider in colliders.iter_mut() {
            if let Collider::Brick(brick) = collider {
                outcome.hit.push(brick.shape());
                if brick.hit(canvas) {
                    outcome.destroyed.push(brick.shape());
                }
            }
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::canvas::Scene;
    use glam::Vec2;

    fn scene() -> Scene {
        Scene::new(610.0, 400.0, "#1C1C1C")
    }

    fn paddle(scene: &mut Scene) -> Paddle {
        // Spans x 245..365, y 345..355
        Paddle::spawn(scene, Vec2::new(305.0, 350.0), 120.0, 10.0)
    }

    fn brick(scene: &mut Scene, center: Vec2, hits: u32) -> Brick {
        Brick::spawn(scene, center, Vec2::new(75.0, 20.0), hits, "#FFC300")
    }

    #[test]
    fn test_paddle_top_bounce() {
        let mut scene = scene();
        let paddle = paddle(&mut scene);
        let mut ball = Ball::spawn(&mut scene, Vec2::new(300.0, 336.0), 10.0, 6.0);
        ball.direction = Vec2::new(-1.0, 1.0);

        let outcome = ball.collide(&mut [Collider::Paddle(&paddle)], &mut scene);
        assert_eq!(ball.direction, Vec2::new(-1.0, -1.0));
        assert!(outcome.is_empty());
    }

    #[test]
    fn test_paddle_right_of_right_edge_forces_right() {
        let mut scene = scene();
        let paddle = paddle(&mut scene);
        // Center x 370 is past the paddle's right edge at 365
        let mut ball = Ball::spawn(&mut scene, Vec2::new(370.0, 345.0), 10.0, 6.0);
        for dx in [-1.0, 1.0] {
            ball.direction = Vec2::new(dx, 1.0);
            ball.collide(&mut [Collider::Paddle(&paddle)], &mut scene);
            assert_eq!(ball.direction, Vec2::new(1.0, 1.0));
        }
    }

    #[test]
    fn test_paddle_left_of_left_edge_forces_left() {
        let mut scene = scene();
        let paddle = paddle(&mut scene);
        let mut ball = Ball::spawn(&mut scene, Vec2::new(238.0, 345.0), 10.0, 6.0);
        ball.direction = Vec2::new(1.0, 1.0);
        ball.collide(&mut [Collider::Paddle(&paddle)], &mut scene);
        assert_eq!(ball.direction, Vec2::new(-1.0, 1.0));
    }

    #[test]
    fn test_single_brick_bounces_vertically() {
        let mut scene = scene();
        let mut brick = brick(&mut scene, Vec2::new(42.5, 50.0), 1);
        let shape = brick.shape();
        // Ball center is right of the brick: a brick still only flips vertically
        let mut ball = Ball::spawn(&mut scene, Vec2::new(88.0, 62.0), 10.0, 6.0);

        let outcome = ball.collide(&mut [Collider::Brick(&mut brick)], &mut scene);
        assert_eq!(ball.direction, Vec2::new(1.0, 1.0));
        assert_eq!(outcome.hit, vec![shape]);
        assert_eq!(outcome.destroyed, vec![shape]);
        assert_eq!(scene.bounds(shape), None);
    }

    #[test]
    fn test_multiple_objects_bounce_and_hit_all_bricks() {
        let mut scene = scene();
        let mut left = brick(&mut scene, Vec2::new(42.5, 50.0), 1);
        let mut right = brick(&mut scene, Vec2::new(117.5, 50.0), 2);
        let (left_id, right_id) = (left.shape(), right.shape());
        let mut ball = Ball::spawn(&mut scene, Vec2::new(80.0, 66.0), 10.0, 6.0);

        let outcome = ball.collide(
            &mut [Collider::Brick(&mut left), Collider::Brick(&mut right)],
            &mut scene,
        );
        assert_eq!(ball.direction, Vec2::new(1.0, 1.0));
        assert_eq!(outcome.hit, vec![left_id, right_id]);
        assert_eq!(outcome.destroyed, vec![left_id]);
        assert_eq!(right.hits(), 1);
    }

    #[test]
    fn test_no_objects_no_change() {
        let mut scene = scene();
        let mut ball = Ball::spawn(&mut scene, Vec2::new(300.0, 200.0), 10.0, 6.0);
        let outcome = ball.collide(&mut [], &mut scene);
        assert_eq!(ball.direction, Vec2::new(1.0, -1.0));
        assert!(outcome.is_empty());
    }
}
