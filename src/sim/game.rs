//! Game state machine
//!
//! Owns the canvas and every object on it. Time only moves through
//! [`Game::advance`], which fires the scheduled callbacks that drive the loop:
//!
//! ```text
//! Idle --space--> Running --last brick--> Won  --delay--> reset -> Idle
//!                    |    --ball lost--> LifeLost --delay--> Idle
//!                    |    --last life--> Lost --delay--> reset -> Idle
//! ```

use std::collections::BTreeMap;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::ball::Ball;
use super::brick::Brick;
use super::canvas::{Canvas, Scene, ShapeId};
use super::collision::Collider;
use super::hud::Hud;
use super::input::{Action, Binding, InputBindings, Key, KeyEvent};
use super::object::GameObject;
use super::paddle::Paddle;
use super::schedule::{Callback, Scheduler};
use crate::settings::Settings;

/// Current phase of play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Ball resting on the paddle, waiting for launch
    Idle,
    /// Ball in play
    Running,
    /// Ball fell out with lives to spare, a fresh ball is coming
    LifeLost,
    /// Every brick destroyed
    Won,
    /// Last life lost
    Lost,
}

/// Something that happened while handling input or advancing time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Launched,
    /// A brick took a hit and scored
    BrickHit { points: u32 },
    BrickDestroyed,
    LifeLost { lives: u32 },
    Won,
    Lost,
    /// Fresh ball served after a lost life
    ReturnedToIdle,
    /// New round after a win or a loss
    Reset,
}

/// Observable game state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub phase: GamePhase,
    pub lives: u32,
    pub score: u32,
    pub high_score: u32,
    pub bricks_remaining: usize,
    pub time_ms: u64,
}

pub struct Game<C: Canvas = Scene> {
    settings: Settings,
    canvas: C,
    scheduler: Scheduler,
    bindings: InputBindings,
    phase: GamePhase,
    lives: u32,
    score: u32,
    /// Best score this session, survives resets
    high_score: u32,
    paddle: Paddle,
    ball: Option<Ball>,
    /// Live bricks by shape; destroyed bricks are removed immediately
    bricks: BTreeMap<ShapeId, Brick>,
    hud: Hud,
    /// Cleared whenever the loop stops, checked before a tick runs
    loop_active: bool,
}

impl Game<Scene> {
    /// New game on an in-memory scene sized from `settings`
    pub fn with_settings(settings: Settings) -> Self {
        let scene = Scene::new(settings.width, settings.height, settings.background.clone());
        Self::new(scene, settings)
    }
}

impl<C: Canvas> Game<C> {
    /// Lay out paddle, bricks, ball and HUD, then wait for launch
    pub fn new(mut canvas: C, settings: Settings) -> Self {
        let paddle_center = Vec2::new(canvas.width() * 0.5, settings.paddle_y);
        let paddle = Paddle::spawn(
            &mut canvas,
            paddle_center,
            settings.paddle_width,
            settings.paddle_height,
        );
        let mut game = Self {
            scheduler: Scheduler::new(),
            bindings: InputBindings::paddle_controls(),
            phase: GamePhase::Idle,
            lives: settings.starting_lives,
            score: 0,
            high_score: 0,
            paddle,
            ball: None,
            bricks: BTreeMap::new(),
            hud: Hud::new(settings.font_family.as_str(), settings.hud.clone()),
            loop_active: false,
            canvas,
            settings,
        };
        game.create_bricks();
        game.setup_idle();
        log::info!(
            "Game ready: {} bricks, {} lives",
            game.bricks.len(),
            game.lives
        );
        game
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn bricks_remaining(&self) -> usize {
        self.bricks.len()
    }

    pub fn bricks(&self) -> impl Iterator<Item = &Brick> {
        self.bricks.values()
    }

    pub fn canvas(&self) -> &C {
        &self.canvas
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn paddle(&self) -> &Paddle {
        &self.paddle
    }

    pub fn ball(&self) -> Option<&Ball> {
        self.ball.as_ref()
    }

    pub fn hud(&self) -> &Hud {
        &self.hud
    }

    pub fn now_ms(&self) -> u64 {
        self.scheduler.now_ms()
    }

    pub fn is_scheduled(&self, callback: Callback) -> bool {
        self.scheduler.is_pending(callback)
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            phase: self.phase,
            lives: self.lives,
            score: self.score,
            high_score: self.high_score,
            bricks_remaining: self.bricks.len(),
            time_ms: self.scheduler.now_ms(),
        }
    }

    /// Apply a keyboard event through the current bindings
    pub fn handle_key(&mut self, event: KeyEvent) -> Vec<GameEvent> {
        let Some(action) = self.bindings.action_for(event) else {
            return Vec::new();
        };
        log::trace!("{:?} -> {:?}", event, action);
        match action {
            Action::MoveLeft => self.paddle.start_move(-self.settings.paddle_speed),
            Action::MoveRight => self.paddle.start_move(self.settings.paddle_speed),
            Action::StopMove => self.paddle.stop_move(),
            Action::Launch => return self.start_game(),
        }
        Vec::new()
    }

    /// Move the clock forward, firing every callback that comes due
    pub fn advance(&mut self, elapsed_ms: u64) -> Vec<GameEvent> {
        let until_ms = self.scheduler.now_ms().saturating_add(elapsed_ms);
        let mut events = Vec::new();
        while let Some(callback) = self.scheduler.pop_due(until_ms) {
            self.fire(callback, &mut events);
        }
        self.scheduler.advance_to(until_ms);
        events
    }

    fn fire(&mut self, callback: Callback, events: &mut Vec<GameEvent>) {
        match (callback, self.phase) {
            (Callback::Tick, _) if !self.loop_active => {
                log::warn!("Dropping tick: loop is not active");
            }
            (Callback::Tick, GamePhase::Idle) => {
                self.paddle.update(&mut self.canvas);
                self.schedule_tick();
            }
            (Callback::Tick, GamePhase::Running) => self.game_loop(events),
            (Callback::ReturnToIdle, GamePhase::LifeLost) => {
                self.setup_idle();
                events.push(GameEvent::ReturnedToIdle);
                log::info!("Serving a new ball ({} lives left)", self.lives);
            }
            (Callback::Reset, GamePhase::Won | GamePhase::Lost) => {
                self.reset_game();
                events.push(GameEvent::Reset);
            }
            (callback, phase) => {
                log::warn!("Dropping stale {:?} callback in {:?}", callback, phase);
            }
        }
    }

    fn schedule_tick(&mut self) {
        self.scheduler
            .after(self.settings.effective_tick_ms(), Callback::Tick);
    }

    /// (Re)start the loop with exactly one pending tick
    fn start_loop(&mut self) {
        self.scheduler.cancel(Callback::Tick);
        self.loop_active = true;
        self.schedule_tick();
    }

    /// Stop the loop and drop anything still pending
    fn stop_loop(&mut self) {
        self.loop_active = false;
        self.scheduler.cancel_all();
    }

    fn setup_idle(&mut self) {
        self.add_ball();
        self.update_hud();
        self.hud
            .show_prompt(&mut self.canvas, &self.settings.prompt_text);
        self.bindings
            .bind(Binding::Press(Key::Space), Action::Launch);
        self.phase = GamePhase::Idle;
        self.start_loop();
    }

    fn start_game(&mut self) -> Vec<GameEvent> {
        if self.phase != GamePhase::Idle {
            return Vec::new();
        }
        self.bindings.unbind(Binding::Press(Key::Space));
        self.hud.clear_prompt(&mut self.canvas);
        self.hud.clear_end(&mut self.canvas);
        self.paddle.set_ball(None);
        self.phase = GamePhase::Running;
        log::info!("Ball launched");

        let mut events = vec![GameEvent::Launched];
        // The first step runs right away
        self.scheduler.cancel(Callback::Tick);
        self.loop_active = true;
        self.game_loop(&mut events);
        events
    }

    /// One step of play: collide, check for the end of the round, then move
    fn game_loop(&mut self, events: &mut Vec<GameEvent>) {
        self.check_collisions(events);

        let ball_bottom = self
            .ball
            .as_ref()
            .map(|ball| ball.position(&self.canvas).bottom);

        if self.bricks.is_empty() {
            self.stop_loop();
            self.phase = GamePhase::Won;
            self.hud
                .show_end(&mut self.canvas, &self.settings.victory_text);
            self.scheduler
                .after(self.settings.round_end_delay_ms, Callback::Reset);
            events.push(GameEvent::Won);
            log::info!("Round won with {} points", self.score);
        } else if ball_bottom.is_some_and(|bottom| bottom >= self.canvas.height()) {
            self.stop_loop();
            self.lives = self.lives.saturating_sub(1);
            self.update_hud();
            events.push(GameEvent::LifeLost { lives: self.lives });
            if self.lives == 0 {
                self.phase = GamePhase::Lost;
                self.hud
                    .show_end(&mut self.canvas, &self.settings.defeat_text);
                self.scheduler
                    .after(self.settings.round_end_delay_ms, Callback::Reset);
                events.push(GameEvent::Lost);
                log::info!("Round lost with {} points", self.score);
            } else {
                self.phase = GamePhase::LifeLost;
                self.scheduler
                    .after(self.settings.life_lost_delay_ms, Callback::ReturnToIdle);
                log::info!("Ball lost, {} lives left", self.lives);
            }
        } else {
            if let Some(ball) = self.ball.as_mut() {
                ball.update(&mut self.canvas);
            }
            self.paddle.update(&mut self.canvas);
            self.schedule_tick();
        }
    }

    /// Resolve whatever overlaps the ball and score the bricks it hit
    fn check_collisions(&mut self, events: &mut Vec<GameEvent>) {
        let Some(ball) = self.ball.as_mut() else {
            return;
        };
        let area = ball.position(&self.canvas);
        let overlapping = self.canvas.find_overlapping(area);

        // Stacking order: the paddle is always created before any brick
        let mut colliders = Vec::new();
        if overlapping.contains(&self.paddle.shape()) {
            colliders.push(Collider::Paddle(&self.paddle));
        }
        colliders.extend(
            self.bricks
                .iter_mut()
                .filter(|(id, _)| overlapping.contains(*id))
                .map(|(_, brick)| Collider::Brick(brick)),
        );
        if colliders.is_empty() {
            return;
        }

        let outcome = ball.collide(&mut colliders, &mut self.canvas);
        drop(colliders);

        for _ in &outcome.hit {
            self.score += self.settings.points_per_brick;
            self.high_score = self.high_score.max(self.score);
            events.push(GameEvent::BrickHit {
                points: self.settings.points_per_brick,
            });
        }
        for id in &outcome.destroyed {
            self.bricks.remove(id);
            events.push(GameEvent::BrickDestroyed);
        }
        if !outcome.is_empty() {
            log::debug!(
                "Hit {} brick(s), score {}, {} left",
                outcome.hit.len(),
                self.score,
                self.bricks.len()
            );
            self.update_hud();
        }
    }

    fn update_hud(&mut self) {
        self.hud
            .update(&mut self.canvas, self.lives, self.score, self.high_score);
    }

    /// Replace the ball with a fresh one resting above the paddle
    fn add_ball(&mut self) {
        if let Some(ball) = self.ball.take() {
            ball.delete(&mut self.canvas);
        }
        let paddle_x = self.paddle.position(&self.canvas).center().x;
        let ball = Ball::spawn(
            &mut self.canvas,
            Vec2::new(paddle_x, self.settings.ball_spawn_y),
            self.settings.ball_radius,
            self.settings.ball_speed,
        );
        self.paddle.set_ball(Some(ball.shape()));
        self.ball = Some(ball);
    }

    fn create_bricks(&mut self) {
        let size = Vec2::new(self.settings.brick_width, self.settings.brick_height);
        let columns = self.settings.brick_columns();
        for (row, &y) in self.settings.brick_rows.iter().enumerate() {
            let color = self.settings.row_color(row);
            for &x in &columns {
                let center = Vec2::new(x + size.x * 0.5, y);
                let brick = Brick::spawn(
                    &mut self.canvas,
                    center,
                    size,
                    self.settings.brick_hits,
                    color,
                );
                self.bricks.insert(brick.shape(), brick);
            }
        }
    }

    fn clear_bricks(&mut self) {
        for brick in std::mem::take(&mut self.bricks).into_values() {
            brick.delete(&mut self.canvas);
        }
    }

    /// Fresh round: full lives, zero score, full grid. High score is kept.
    fn reset_game(&mut self) {
        self.lives = self.settings.starting_lives;
        self.score = 0;
        self.update_hud();
        self.clear_bricks();
        self.create_bricks();
        self.hud.clear_end(&mut self.canvas);
        self.setup_idle();
        log::info!("New round (high score {})", self.high_score);
    }
}
