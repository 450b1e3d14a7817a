//! Static game configuration
//!
//! Geometry, colours and the level list are built once at startup and passed
//! by reference into the simulation. Nothing in here is mutated after load.

use std::fs;
use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// 8-bit RGB triple, as consumed by the rendering collaborator.
pub type Rgb = [u8; 3];

pub const BRICK_RED: Rgb = [163, 30, 10];
pub const BRICK_ORANGE: Rgb = [194, 133, 10];
pub const BRICK_GREEN: Rgb = [10, 133, 51];
pub const BRICK_YELLOW: Rgb = [194, 194, 42];

const BANDS: [Rgb; 4] = [BRICK_RED, BRICK_ORANGE, BRICK_GREEN, BRICK_YELLOW];

/// Window geometry. The HUD strip at the top is outside the play field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowConfig {
    pub width: f32,
    pub height: f32,
    pub hud_height: f32,
    pub background: Rgb,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaddleConfig {
    pub width: f32,
    pub height: f32,
    /// Distance of the paddle's bottom edge from the floor.
    pub start_y: f32,
    /// Horizontal px per tick per unit of lateral acceleration.
    pub speed: f32,
    /// Collision cooldown after a paddle hit, in ticks.
    pub immunity_ticks: u64,
    pub colour: Rgb,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BallConfig {
    pub radius: f32,
    /// Initial diagonal heading, each component -1.0 or +1.0.
    pub start_dir: Vec2,
    pub colour: Rgb,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrickConfig {
    pub width: f32,
    pub height: f32,
    /// Gap between the play-field ceiling and the first brick row.
    pub top_margin: f32,
}

/// One level: ball speed plus the brick template. Rows run top to bottom;
/// `None` cells stay empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelDef {
    pub ball_speed: f32,
    pub grid: Vec<Vec<Option<Rgb>>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    pub window: WindowConfig,
    pub paddle: PaddleConfig,
    pub ball: BallConfig,
    pub brick: BrickConfig,
    /// Ordered level list, consumed front to back.
    pub levels: Vec<LevelDef>,
    /// UDP port the sensor device sends to.
    pub input_port: u16,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig {
                width: 600.0,
                height: 800.0,
                hud_height: 40.0,
                background: [11, 11, 11],
            },
            paddle: PaddleConfig {
                width: 100.0,
                height: 15.0,
                start_y: 10.0,
                speed: 15.0,
                immunity_ticks: 30,
                colour: [10, 133, 194],
            },
            ball: BallConfig {
                radius: 7.0,
                start_dir: Vec2::new(1.0, 1.0),
                colour: [255, 255, 255],
            },
            brick: BrickConfig {
                width: 40.0,
                height: 10.0,
                top_margin: 40.0,
            },
            levels: vec![
                LevelDef {
                    ball_speed: 5.0,
                    grid: banded_grid(8, 14),
                },
                LevelDef {
                    ball_speed: 6.0,
                    grid: checker_grid(8, 14),
                },
                LevelDef {
                    ball_speed: 7.0,
                    grid: striped_grid(8, 14),
                },
            ],
            input_port: 5700,
        }
    }
}

impl GameConfig {
    /// Read a configuration override from a JSON file. Any read or parse
    /// problem logs a warning and falls back to the built-in defaults.
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(text) => match serde_json::from_str(&text) {
                Ok(config) => {
                    log::info!("loaded configuration from {}", path.display());
                    config
                }
                Err(err) => {
                    log::warn!(
                        "ignoring malformed configuration {}: {err}",
                        path.display()
                    );
                    Self::default()
                }
            },
            Err(err) => {
                log::warn!("could not read configuration {}: {err}", path.display());
                Self::default()
            }
        }
    }

    /// Y coordinate of the play-field ceiling (window top minus the HUD).
    pub fn field_top(&self) -> f32 {
        self.window.height - self.window.hud_height
    }

    /// Paddle bottom-left corner at session start: horizontally centered.
    pub fn paddle_start(&self) -> Vec2 {
        Vec2::new(
            (self.window.width - self.paddle.width) / 2.0,
            self.paddle.start_y,
        )
    }

    /// Ball center at session start and after each level reload: slightly
    /// right of center, resting just above the paddle.
    pub fn ball_start(&self) -> Vec2 {
        Vec2::new(
            self.window.width / 2.0 + self.ball.radius / 2.0,
            self.paddle.start_y + self.paddle.height + self.ball.radius,
        )
    }
}

/// Full grid in four horizontal colour bands, classic breakout style.
fn banded_grid(rows: usize, cols: usize) -> Vec<Vec<Option<Rgb>>> {
    (0..rows)
        .map(|row| vec![Some(BANDS[row * BANDS.len() / rows]); cols])
        .collect()
}

/// Every other cell filled, banded by row.
fn checker_grid(rows: usize, cols: usize) -> Vec<Vec<Option<Rgb>>> {
    (0..rows)
        .map(|row| {
            (0..cols)
                .map(|col| ((row + col) % 2 == 0).then_some(BANDS[row * BANDS.len() / rows]))
                .collect()
        })
        .collect()
}

/// Full grid in vertical colour stripes.
fn striped_grid(rows: usize, cols: usize) -> Vec<Vec<Option<Rgb>>> {
    (0..rows)
        .map(|_| (0..cols).map(|col| Some(BANDS[col % BANDS.len()])).collect())
        .collect()
}
