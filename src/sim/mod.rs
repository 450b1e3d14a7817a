//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure and
//! deterministic:
//! - Tick-based stepping only; speeds are px per tick
//! - Stable iteration order (bricks in row-major insertion order)
//! - No socket, clock or rendering dependencies

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{hits_horizontal_side, hits_vertical_side, line_distance};
pub use state::{
    Ball, Brick, GameEvent, GameSession, Outcome, Paddle, PaddleHit, Phase, World, WorldHit,
};
pub use tick::{TickInput, tick};
