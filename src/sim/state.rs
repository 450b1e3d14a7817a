//! Session state: world boundary, paddle, ball and brick set
//!
//! Every entity is a plain value type owning its geometry; collision response
//! lives on the collider the ball runs into. `GameSession` owns all of it and
//! is fully serializable.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{hits_horizontal_side, hits_vertical_side};
use crate::config::{GameConfig, LevelDef, Rgb};

/// How a finished session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Win,
    Loss,
}

/// Session lifecycle. `Ended` is terminal until an external reset builds a
/// fresh session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    AwaitingStart,
    Running,
    Ended(Outcome),
}

/// What a tick reports back to the embedding application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    BrickDestroyed { score: u32 },
    LevelAdvanced { level: u32 },
    Ended(Outcome),
}

/// The ball. `dir` components are independent sign flags, each -1.0 or +1.0;
/// motion is axis-aligned diagonal stepping at `speed` px per tick, never a
/// normalized heading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub dir: Vec2,
    pub speed: f32,
    pub radius: f32,
}

impl Ball {
    /// Advance one tick. Unconditional; reflection is the callers' business.
    pub fn advance(&mut self) {
        self.pos += self.dir * self.speed;
    }

    pub fn flip_x(&mut self) {
        self.dir.x = -self.dir.x;
    }

    pub fn flip_y(&mut self) {
        self.dir.y = -self.dir.y;
    }
}

/// Which world edge the ball ran into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorldHit {
    Wall,
    Ceiling,
    Floor,
}

/// Immutable play-field boundary, excluding the HUD strip. Corners are fixed
/// for the lifetime of a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct World {
    pub top_left: Vec2,
    pub top_right: Vec2,
    pub bot_left: Vec2,
    pub bot_right: Vec2,
}

impl World {
    pub fn new(config: &GameConfig) -> Self {
        let top = config.field_top();
        let right = config.window.width;
        Self {
            top_left: Vec2::new(0.0, top),
            top_right: Vec2::new(right, top),
            bot_left: Vec2::ZERO,
            bot_right: Vec2::new(right, 0.0),
        }
    }

    pub fn left(&self) -> f32 {
        self.bot_left.x
    }

    pub fn right(&self) -> f32 {
        self.bot_right.x
    }

    /// Edge checks in fixed priority order: left, right, ceiling, floor.
    /// Only the first matching edge reacts. Side walls reflect on x, the
    /// ceiling on y. A floor match leaves the ball untouched - it is the
    /// session's loss condition, not a bounce.
    pub fn resolve(&self, ball: &mut Ball) -> Option<WorldHit> {
        if hits_vertical_side(ball.pos, ball.radius, self.bot_left, self.top_left)
            || hits_vertical_side(ball.pos, ball.radius, self.bot_right, self.top_right)
        {
            ball.flip_x();
            return Some(WorldHit::Wall);
        }
        if hits_horizontal_side(ball.pos, ball.radius, self.top_left, self.top_right) {
            ball.flip_y();
            return Some(WorldHit::Ceiling);
        }
        if hits_horizontal_side(ball.pos, ball.radius, self.bot_left, self.bot_right) {
            return Some(WorldHit::Floor);
        }
        None
    }
}

/// Which paddle face the ball hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaddleHit {
    Top,
    Side,
}

/// The player's paddle. `pos` is the bottom-left corner; `immune_until` is a
/// tick deadline armed by every hit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    pub speed: f32,
    pub immune_until: u64,
    pub immunity_ticks: u64,
}

impl Paddle {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            pos: config.paddle_start(),
            width: config.paddle.width,
            height: config.paddle.height,
            speed: config.paddle.speed,
            immune_until: 0,
            immunity_ticks: config.paddle.immunity_ticks,
        }
    }

    fn top_left(&self) -> Vec2 {
        self.pos + Vec2::new(0.0, self.height)
    }

    fn top_right(&self) -> Vec2 {
        self.pos + Vec2::new(self.width, self.height)
    }

    fn bot_right(&self) -> Vec2 {
        self.pos + Vec2::new(self.width, 0.0)
    }

    /// Apply one tick of lateral input. The move lands only if the whole
    /// paddle stays inside the world; an overflowing move is dropped whole,
    /// never clamped to the boundary.
    pub fn shift(&mut self, lateral: f32, world: &World) {
        let new_x = self.pos.x + lateral * self.speed;
        if new_x >= world.left() && new_x <= world.right() - self.width {
            self.pos.x = new_x;
        }
    }

    pub fn immune(&self, now: u64) -> bool {
        now < self.immune_until
    }

    /// Collision response for one tick. A no-op while the cooldown from a
    /// previous hit is still running. A top-face hit reflects vertically; a
    /// clip on the left or right face reflects on both axes. Every hit
    /// re-arms the cooldown.
    pub fn resolve(&mut self, ball: &mut Ball, now: u64) -> Option<PaddleHit> {
        if self.immune(now) {
            return None;
        }
        if hits_horizontal_side(ball.pos, ball.radius, self.top_left(), self.top_right()) {
            ball.flip_y();
            self.immune_until = now + self.immunity_ticks;
            return Some(PaddleHit::Top);
        }
        if hits_vertical_side(ball.pos, ball.radius, self.pos, self.top_left())
            || hits_vertical_side(ball.pos, ball.radius, self.bot_right(), self.top_right())
        {
            ball.flip_x();
            ball.flip_y();
            self.immune_until = now + self.immunity_ticks;
            return Some(PaddleHit::Side);
        }
        None
    }
}

/// One brick. Geometry is immutable; destruction means removal from the
/// session's live set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Brick {
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    pub colour: Rgb,
}

impl Brick {
    fn top_left(&self) -> Vec2 {
        self.pos + Vec2::new(0.0, self.height)
    }

    fn top_right(&self) -> Vec2 {
        self.pos + Vec2::new(self.width, self.height)
    }

    fn bot_right(&self) -> Vec2 {
        self.pos + Vec2::new(self.width, 0.0)
    }

    /// Side checks in fixed order: bottom, top, left, right; the ball
    /// reflects off the first match. Returns true on any hit - every contact
    /// destroys the brick.
    pub fn resolve(&self, ball: &mut Ball) -> bool {
        if hits_horizontal_side(ball.pos, ball.radius, self.pos, self.bot_right())
            || hits_horizontal_side(ball.pos, ball.radius, self.top_left(), self.top_right())
        {
            ball.flip_y();
            return true;
        }
        if hits_vertical_side(ball.pos, ball.radius, self.pos, self.top_left())
            || hits_vertical_side(ball.pos, ball.radius, self.bot_right(), self.top_right())
        {
            ball.flip_x();
            return true;
        }
        false
    }
}

/// Everything one game session owns. Score is monotonically non-decreasing;
/// `level_index` strictly increases until the level list runs out.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSession {
    pub world: World,
    pub paddle: Paddle,
    pub ball: Ball,
    pub bricks: Vec<Brick>,
    pub level_index: usize,
    pub score: u32,
    pub phase: Phase,
    pub time_ticks: u64,
}

impl GameSession {
    pub fn new(config: &GameConfig) -> Self {
        let mut session = Self {
            world: World::new(config),
            paddle: Paddle::new(config),
            ball: Ball {
                pos: config.ball_start(),
                dir: config.ball.start_dir,
                speed: 0.0,
                radius: config.ball.radius,
            },
            bricks: Vec::new(),
            level_index: 0,
            score: 0,
            phase: Phase::AwaitingStart,
            time_ticks: 0,
        };
        session.load_level(config, 0);
        session
    }

    pub fn start(&mut self) {
        if self.phase == Phase::AwaitingStart {
            self.phase = Phase::Running;
        }
    }

    /// 1-based level number for display.
    pub fn level_number(&self) -> u32 {
        self.level_index as u32 + 1
    }

    /// Rebuild the brick set and ball pose for the given level. Score and
    /// paddle position are untouched.
    pub(crate) fn load_level(&mut self, config: &GameConfig, index: usize) {
        let level = &config.levels[index];
        self.level_index = index;
        self.bricks = build_bricks(config, level);
        self.ball.pos = config.ball_start();
        self.ball.dir = config.ball.start_dir;
        self.ball.speed = level.ball_speed;
    }
}

/// Materialize a level grid into bricks, row-major with empty cells skipped.
/// Rows are spaced top-down from the field ceiling; the horizontal gap
/// spreads each row across the full field width.
fn build_bricks(config: &GameConfig, level: &LevelDef) -> Vec<Brick> {
    let width = config.brick.width;
    let height = config.brick.height;
    let first_row_y = config.field_top() - config.brick.top_margin;

    let mut bricks = Vec::new();
    for (row, cells) in level.grid.iter().enumerate() {
        let cols = cells.len();
        let gap = if cols > 1 {
            (config.window.width - cols as f32 * width) / (cols as f32 - 1.0)
        } else {
            0.0
        };
        let y = first_row_y - row as f32 * (height + gap);
        for (col, cell) in cells.iter().enumerate() {
            if let Some(colour) = *cell {
                bricks.push(Brick {
                    pos: Vec2::new(col as f32 * (width + gap), y),
                    width,
                    height,
                    colour,
                });
            }
        }
    }
    bricks
}
