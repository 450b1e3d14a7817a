//! Application screens
//!
//! Maps normalized input and session events onto the start/game/end/exit
//! screens, and publishes a plain data snapshot per frame for whatever front
//! end is drawing. Button 1 always quits; button 2 starts a fresh session
//! from any screen, including mid-game.

use glam::Vec2;
use serde::Serialize;

use crate::config::{GameConfig, Rgb};
use crate::input::InputState;
use crate::sim::{GameEvent, GameSession, TickInput, tick};

/// Which screen the application is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Screen {
    Start,
    Game,
    End,
    Exit,
}

/// An axis-aligned rectangle plus colour, ready to draw.
#[derive(Debug, Clone, Serialize)]
pub struct RectView {
    pub pos: Vec2,
    pub size: Vec2,
    pub colour: Rgb,
}

/// A circle plus colour, ready to draw.
#[derive(Debug, Clone, Serialize)]
pub struct CircleView {
    pub center: Vec2,
    pub radius: f32,
    pub colour: Rgb,
}

/// Everything the rendering collaborator needs for one frame. Pure data; the
/// application keeps no drawing state.
#[derive(Debug, Clone, Serialize)]
pub struct FrameSnapshot {
    pub screen: Screen,
    pub score: u32,
    pub level: u32,
    pub world: RectView,
    pub paddle: RectView,
    pub ball: CircleView,
    pub bricks: Vec<RectView>,
}

/// The application: one session at a time, plus the screen it is shown on.
pub struct App {
    config: GameConfig,
    session: GameSession,
    screen: Screen,
}

impl App {
    pub fn new(config: GameConfig) -> Self {
        let session = GameSession::new(&config);
        Self {
            config,
            session,
            screen: Screen::Start,
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    /// Run one frame: apply button edges to the screen state machine,
    /// advance the session while on the game screen, and report the frame
    /// snapshot. Quit wins over start when both arrive at once.
    pub fn frame(&mut self, input: &InputState) -> FrameSnapshot {
        if input.button_1 {
            log::info!("quit requested");
            self.screen = Screen::Exit;
        } else if input.button_2 {
            self.session = GameSession::new(&self.config);
            self.session.start();
            self.screen = Screen::Game;
            log::info!("new game started");
        }

        if self.screen == Screen::Game {
            let events = tick(
                &mut self.session,
                &self.config,
                &TickInput {
                    lateral: input.lateral,
                },
            );
            for event in events {
                if let GameEvent::Ended(outcome) = event {
                    log::info!(
                        "session over ({outcome:?}): score {}, level {}",
                        self.session.score,
                        self.session.level_number()
                    );
                    self.screen = Screen::End;
                }
            }
        }

        self.snapshot()
    }

    /// Current-frame view of the whole scene.
    pub fn snapshot(&self) -> FrameSnapshot {
        let session = &self.session;
        let world = &session.world;
        FrameSnapshot {
            screen: self.screen,
            score: session.score,
            level: session.level_number(),
            world: RectView {
                pos: world.bot_left,
                size: world.top_right - world.bot_left,
                colour: self.config.window.background,
            },
            paddle: RectView {
                pos: session.paddle.pos,
                size: Vec2::new(session.paddle.width, session.paddle.height),
                colour: self.config.paddle.colour,
            },
            ball: CircleView {
                center: session.ball.pos,
                radius: session.ball.radius,
                colour: self.config.ball.colour,
            },
            bricks: session
                .bricks
                .iter()
                .map(|brick| RectView {
                    pos: brick.pos,
                    size: Vec2::new(brick.width, brick.height),
                    colour: brick.colour,
                })
                .collect(),
        }
    }
}
