//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time only advances through the scheduler
//! - Stable iteration order (by shape ID)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod ball;
pub mod brick;
pub mod canvas;
pub mod collision;
pub mod game;
pub mod hud;
pub mod input;
pub mod object;
pub mod paddle;
pub mod schedule;

pub use autopilot::autopilot_input;
pub use ball::Ball;
pub use brick::Brick;
pub use canvas::{Bounds, Canvas, Font, Item, Scene, Shape, ShapeId, ShapeKind, Style};
pub use collision::{Collider, CollisionOutcome};
pub use game::{Game, GameEvent, GamePhase, GameSnapshot};
pub use hud::Hud;
pub use input::{Action, Binding, InputBindings, Key, KeyEvent};
pub use object::GameObject;
pub use paddle::Paddle;
pub use schedule::{Callback, FrameClock, Scheduler};
