//! Game settings
//!
//! Layout, timing, rules, HUD placement and text live here. Defaults
//! reproduce the classic layout: a 610x400 field, three rows of eight bricks
//! and three lives. Overrides come from JSON and any key left out keeps its
//! default.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Where the heads-up display draws its text, all positions are text centers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HudLayout {
    /// First heart; the rest follow to the right
    pub heart_origin: Vec2,
    pub heart_spacing: f32,
    pub heart_size: f32,
    pub score_position: Vec2,
    pub score_size: f32,
    /// Launch prompt and victory/defeat text
    pub message_position: Vec2,
    pub message_size: f32,
}

impl Default for HudLayout {
    fn default() -> Self {
        Self {
            heart_origin: Vec2::new(10.0, 10.0),
            heart_spacing: 30.0,
            heart_size: 20.0,
            score_position: Vec2::new(300.0, 20.0),
            score_size: 15.0,
            message_position: Vec2::new(300.0, 200.0),
            message_size: 24.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Field ===
    pub width: f32,
    pub height: f32,
    pub background: String,

    // === Timing (ms) ===
    /// Interval between game loop steps
    pub tick_ms: u64,
    /// Pause before a fresh ball is served after losing a life
    pub life_lost_delay_ms: u64,
    /// Pause on the victory/defeat text before the next round
    pub round_end_delay_ms: u64,

    // === Rules ===
    pub starting_lives: u32,
    pub points_per_brick: u32,

    // === Paddle ===
    /// Vertical center of the paddle
    pub paddle_y: f32,
    pub paddle_width: f32,
    pub paddle_height: f32,
    /// Pixels moved per step while an arrow key is held
    pub paddle_speed: f32,

    // === Ball ===
    pub ball_radius: f32,
    /// Pixels moved along each axis per step
    pub ball_speed: f32,
    /// Vertical center of a freshly served ball
    pub ball_spawn_y: f32,

    // === Bricks ===
    pub brick_width: f32,
    pub brick_height: f32,
    /// Vertical centers of the brick rows, top to bottom
    pub brick_rows: Vec<f32>,
    /// Gap kept free at the left and right edges of the field
    pub brick_margin: f32,
    pub brick_hits: u32,
    /// Row colors, cycled when there are more rows than colors
    pub row_colors: Vec<String>,

    // === Text ===
    pub font_family: String,
    pub hud: HudLayout,
    pub prompt_text: String,
    pub victory_text: String,
    pub defeat_text: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            width: 610.0,
            height: 400.0,
            background: "#1C1C1C".to_string(),

            tick_ms: 12,
            life_lost_delay_ms: 1000,
            round_end_delay_ms: 2000,

            starting_lives: 3,
            points_per_brick: 10,

            paddle_y: 350.0,
            paddle_width: 120.0,
            paddle_height: 10.0,
            paddle_speed: 10.0,

            ball_radius: 10.0,
            ball_speed: 6.0,
            ball_spawn_y: 310.0,

            brick_width: 75.0,
            brick_height: 20.0,
            brick_rows: vec![50.0, 70.0, 90.0],
            brick_margin: 5.0,
            brick_hits: 1,
            row_colors: ["#FF5733", "#FFC300", "#DAF7A6", "#33FFBD", "#3380FF"]
                .iter()
                .map(|c| c.to_string())
                .collect(),

            font_family: "Helvetica".to_string(),
            hud: HudLayout::default(),
            prompt_text: "Press Space to Launch".to_string(),
            victory_text: "You Win!".to_string(),
            defeat_text: "Game Over".to_string(),
        }
    }
}

impl Settings {
    /// Parse settings from JSON, filling unspecified fields with defaults
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let settings: Self = serde_json::from_str(json)?;
        log::info!(
            "Loaded settings ({}x{}, {} brick rows)",
            settings.width,
            settings.height,
            settings.brick_rows.len()
        );
        Ok(settings)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Left edges of the brick columns
    pub fn brick_columns(&self) -> Vec<f32> {
        let mut columns = Vec::new();
        if self.brick_width <= 0.0 {
            return columns;
        }
        let mut x = self.brick_margin;
        while x < self.width - self.brick_margin {
            columns.push(x);
            x += self.brick_width;
        }
        columns
    }

    /// Color of the row at `index`
    pub fn row_color(&self, index: usize) -> &str {
        if self.row_colors.is_empty() {
            return "white";
        }
        &self.row_colors[index % self.row_colors.len()]
    }

    /// Loop interval, never zero
    pub fn effective_tick_ms(&self) -> u64 {
        self.tick_ms.max(1)
    }
}
