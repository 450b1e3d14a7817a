//! Tilt Breakout - a motion-controlled brick breaker
//!
//! The paddle is steered by tilting a handheld sensor that streams
//! accelerometer and button telemetry over UDP. Core modules:
//! - `sim`: deterministic simulation (collision, session state, tick)
//! - `input`: sensor transport and per-tick input normalization
//! - `app`: screen state machine gluing input to the simulation
//! - `config`: immutable geometry and level tables
//!
//! Rendering is deliberately absent. `App::frame` returns a plain data
//! snapshot of everything a front end needs to draw; the crate never touches
//! a drawing library.

pub mod app;
pub mod config;
pub mod input;
pub mod sim;

pub use app::{App, FrameSnapshot, Screen};
pub use config::{GameConfig, LevelDef, Rgb};
pub use input::{InputState, Normalizer, SampleSource, SensorFrame, UdpSource};
pub use sim::{GameEvent, GameSession, Outcome, Phase, TickInput, tick};
