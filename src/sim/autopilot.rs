//! Demo player
//!
//! Produces the key events a player would: launch when the ball is served,
//! then keep the paddle under the ball.

use super::canvas::Canvas;
use super::game::{Game, GamePhase};
use super::input::{Key, KeyEvent};
use super::object::GameObject;

/// Paddle/ball misalignment tolerated before steering
const DEAD_ZONE: f32 = 8.0;

/// Key event to send this frame, if any
pub fn autopilot_input<C: Canvas>(game: &Game<C>) -> Option<KeyEvent> {
    match game.phase() {
        GamePhase::Idle => Some(KeyEvent::Press(Key::Space)),
        GamePhase::Running => {
            let ball = game.ball()?;
            let ball_x = ball.position(game.canvas()).center().x;
            let paddle_x = game.paddle().position(game.canvas()).center().x;
            let offset = ball_x - paddle_x;
            if offset < -DEAD_ZONE {
                Some(KeyEvent::Press(Key::Left))
            } else if offset > DEAD_ZONE {
                Some(KeyEvent::Press(Key::Right))
            } else {
                Some(KeyEvent::Release(Key::Other))
            }
        }
        GamePhase::LifeLost | GamePhase::Won | GamePhase::Lost => None,
    }
}
