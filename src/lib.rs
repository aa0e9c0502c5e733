//! Brick Breaker - a single-screen arcade brick breaker
//!
//! Core modules:
//! - `sim`: Deterministic simulation (canvas scene, objects, collisions, game loop)
//! - `renderer`: Draws the scene with the browser's 2D canvas context
//! - `settings`: Data-driven layout, timing and rules

#[cfg(target_arch = "wasm32")]
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::{HudLayout, Settings};
pub use sim::{Game, GameEvent, GamePhase};

/// Process-level constants
pub mod consts {
    /// Window/page title
    pub const WINDOW_TITLE: &str = "Brick Breaker";
    /// Longest frame fed to the simulation, so a stalled tab doesn't fast-forward
    pub const MAX_FRAME_MS: u64 = 250;
    /// Simulated length of the native autoplay demo
    pub const DEMO_DURATION_MS: u64 = 120_000;
    /// Frame length used by the native autoplay demo (~60 Hz)
    pub const DEMO_FRAME_MS: u64 = 16;
}
