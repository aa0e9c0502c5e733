//! Heads-up display: life hearts, score line and centered messages

use glam::Vec2;

use super::canvas::{Canvas, Font, ShapeId};
use crate::settings::HudLayout;

pub const HEART_GLYPH: &str = "♥";

/// Score line text
pub fn score_line(score: u32, high_score: u32) -> String {
    format!("Score: {} | High Score: {}", score, high_score)
}

/// Canvas handles for everything the HUD draws
#[derive(Debug, Clone)]
pub struct Hud {
    font_family: String,
    layout: HudLayout,
    hearts: Vec<ShapeId>,
    score_text: Option<ShapeId>,
    prompt: Option<ShapeId>,
    end_text: Option<ShapeId>,
}

impl Hud {
    pub fn new(font_family: impl Into<String>, layout: HudLayout) -> Self {
        Self {
            font_family: font_family.into(),
            layout,
            hearts: Vec::new(),
            score_text: None,
            prompt: None,
            end_text: None,
        }
    }

    pub fn hearts(&self) -> &[ShapeId] {
        &self.hearts
    }

    pub fn score_text(&self) -> Option<ShapeId> {
        self.score_text
    }

    pub fn prompt(&self) -> Option<ShapeId> {
        self.prompt
    }

    pub fn end_text(&self) -> Option<ShapeId> {
        self.end_text
    }

    /// Redraw one heart per life and refresh the score line
    pub fn update(&mut self, canvas: &mut impl Canvas, lives: u32, score: u32, high_score: u32) {
        for heart in self.hearts.drain(..) {
            canvas.delete(heart);
        }
        for i in 0..lives {
            let position =
                self.layout.heart_origin + Vec2::new(i as f32 * self.layout.heart_spacing, 0.0);
            let font = Font::new(self.font_family.as_str(), self.layout.heart_size);
            self.hearts
                .push(canvas.create_text(position, HEART_GLYPH, font, "red"));
        }

        let line = score_line(score, high_score);
        match self.score_text {
            Some(id) => canvas.update_text(id, &line),
            None => {
                let font = Font::new(self.font_family.as_str(), self.layout.score_size).bold();
                self.score_text = Some(canvas.create_text(
                    self.layout.score_position,
                    &line,
                    font,
                    "white",
                ));
            }
        }
    }

    /// Show the launch prompt unless it is already up
    pub fn show_prompt(&mut self, canvas: &mut impl Canvas, text: &str) {
        if self.prompt.is_none() {
            self.prompt = Some(self.message(canvas, text));
        }
    }

    pub fn clear_prompt(&mut self, canvas: &mut impl Canvas) {
        if let Some(id) = self.prompt.take() {
            canvas.delete(id);
        }
    }

    /// Show a victory/defeat message, replacing any previous one
    pub fn show_end(&mut self, canvas: &mut impl Canvas, text: &str) {
        self.clear_end(canvas);
        self.end_text = Some(self.message(canvas, text));
    }

    pub fn clear_end(&mut self, canvas: &mut impl Canvas) {
        if let Some(id) = self.end_text.take() {
            canvas.delete(id);
        }
    }

    fn message(&self, canvas: &mut impl Canvas, text: &str) -> ShapeId {
        let font = Font::new(self.font_family.as_str(), self.layout.message_size).bold();
        canvas.create_text(self.layout.message_position, text, font, "white")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::canvas::Scene;

    #[test]
    fn test_hearts_follow_lives() {
        let mut scene = Scene::new(610.0, 400.0, "#1C1C1C");
        let mut hud = Hud::new("Helvetica", HudLayout::default());

        hud.update(&mut scene, 3, 0, 0);
        assert_eq!(hud.hearts().len(), 3);
        let third = scene.bounds(hud.hearts()[2]).map(|b| b.center());
        assert_eq!(third, Some(Vec2::new(70.0, 10.0)));

        hud.update(&mut scene, 1, 0, 0);
        assert_eq!(hud.hearts().len(), 1);
        // 1 heart + score line
        assert_eq!(scene.len(), 2);
    }

    #[test]
    fn test_score_line_is_reused() {
        let mut scene = Scene::new(610.0, 400.0, "#1C1C1C");
        let mut hud = Hud::new("Helvetica", HudLayout::default());
        hud.update(&mut scene, 3, 0, 0);
        let id = hud.score_text();
        hud.update(&mut scene, 3, 20, 40);
        assert_eq!(hud.score_text(), id);
        assert_eq!(
            id.and_then(|id| scene.text(id)),
            Some("Score: 20 | High Score: 40")
        );
    }

    #[test]
    fn test_text_positions() {
        let mut scene = Scene::new(610.0, 400.0, "#1C1C1C");
        let mut hud = Hud::new("Helvetica", HudLayout::default());
        hud.update(&mut scene, 3, 0, 0);
        hud.show_prompt(&mut scene, "Press Space to Launch");

        let center = |id: Option<ShapeId>| id.and_then(|id| scene.bounds(id)).map(|b| b.center());
        let score = center(hud.score_text()).expect("score line");
        let prompt = center(hud.prompt()).expect("prompt");
        assert!((score - Vec2::new(300.0, 20.0)).length() < 1e-3);
        assert!((prompt - Vec2::new(300.0, 200.0)).length() < 1e-3);
    }

    #[test]
    fn test_messages() {
        let mut scene = Scene::new(610.0, 400.0, "#1C1C1C");
        let mut hud = Hud::new("Helvetica", HudLayout::default());

        hud.show_prompt(&mut scene, "Press Space to Launch");
        let prompt = hud.prompt();
        hud.show_prompt(&mut scene, "Press Space to Launch");
        assert_eq!(hud.prompt(), prompt);
        assert_eq!(scene.len(), 1);

        hud.show_end(&mut scene, "You Win!");
        hud.show_end(&mut scene, "Game Over");
        assert_eq!(scene.len(), 2);
        assert_eq!(hud.end_text().and_then(|id| scene.text(id)), Some("Game Over"));

        hud.clear_prompt(&mut scene);
        hud.clear_end(&mut scene);
        assert!(scene.is_empty());
        assert_eq!(hud.prompt(), None);
        assert_eq!(hud.end_text(), None);
    }
}
