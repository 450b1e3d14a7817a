//! Per-tick session update
//!
//! One entry point advances the session: move the paddle and ball, resolve
//! collisions in fixed order (world, paddle, bricks), then handle level
//! progression. Everything observable about a tick comes back as events.

use super::state::{GameEvent, GameSession, Outcome, Phase, WorldHit};
use crate::config::GameConfig;

/// Normalized input for a single tick.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Lateral acceleration from the sensor; sign is screen direction.
    pub lateral: f32,
}

/// Advance the session by one tick. A no-op unless the session is running.
///
/// Resolution order per tick: paddle move, ball move, world boundary (a
/// floor hit ends the session before any other collider runs), paddle, then
/// the live brick set with first-match-wins - at most one brick is destroyed
/// per tick, the rest keep their chance on later ticks.
pub fn tick(session: &mut GameSession, config: &GameConfig, input: &TickInput) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if session.phase != Phase::Running {
        return events;
    }

    session.time_ticks += 1;
    let now = session.time_ticks;

    session.paddle.shift(input.lateral, &session.world);
    session.ball.advance();

    if session.world.resolve(&mut session.ball) == Some(WorldHit::Floor) {
        session.phase = Phase::Ended(Outcome::Loss);
        log::info!(
            "ball left the field: score {}, level {}",
            session.score,
            session.level_number()
        );
        events.push(GameEvent::Ended(Outcome::Loss));
        return events;
    }

    session.paddle.resolve(&mut session.ball, now);

    let mut destroyed = None;
    for (index, brick) in session.bricks.iter().enumerate() {
        if brick.resolve(&mut session.ball) {
            destroyed = Some(index);
            break;
        }
    }
    if let Some(index) = destroyed {
        let brick = session.bricks.remove(index);
        session.score += 1;
        log::debug!("brick destroyed at {:?}, score {}", brick.pos, session.score);
        events.push(GameEvent::BrickDestroyed {
            score: session.score,
        });
    }

    if session.bricks.is_empty() {
        let next = session.level_index + 1;
        if next < config.levels.len() {
            session.load_level(config, next);
            log::info!(
                "level {} loaded, score {}",
                session.level_number(),
                session.score
            );
            events.push(GameEvent::LevelAdvanced {
                level: session.level_number(),
            });
        } else {
            session.phase = Phase::Ended(Outcome::Win);
            log::info!("all levels cleared, final score {}", session.score);
            events.push(GameEvent::Ended(Outcome::Win));
        }
    }

    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BRICK_GREEN, BRICK_RED, GameConfig, LevelDef};
    use crate::sim::state::Phase;
    use glam::Vec2;

    /// A small field with hand-placed levels so collisions are easy to set up.
    fn test_config(levels: Vec<LevelDef>) -> GameConfig {
        let mut config = GameConfig::default();
        config.levels = levels;
        config
    }

    fn one_brick_level(speed: f32) -> LevelDef {
        LevelDef {
            ball_speed: speed,
            grid: vec![vec![Some(BRICK_RED)]],
        }
    }

    fn running_session(config: &GameConfig) -> crate::sim::GameSession {
        let mut session = crate::sim::GameSession::new(config);
        session.start();
        session
    }

    #[test]
    fn tick_is_a_noop_before_start() {
        let config = GameConfig::default();
        let mut session = crate::sim::GameSession::new(&config);
        let before = session.ball.pos;

        let events = tick(&mut session, &config, &TickInput { lateral: 1.0 });

        assert!(events.is_empty());
        assert_eq!(session.ball.pos, before);
        assert_eq!(session.time_ticks, 0);
    }

    #[test]
    fn one_tick_moves_ball_and_paddle() {
        let config = GameConfig::default();
        let mut session = running_session(&config);
        session.ball.pos = Vec2::new(300.0, 50.0);
        session.ball.dir = Vec2::new(1.0, 1.0);
        session.ball.speed = 5.0;
        let paddle_x = session.paddle.pos.x;

        let events = tick(&mut session, &config, &TickInput { lateral: 1.0 });

        assert!(events.is_empty());
        assert_eq!(session.ball.pos, Vec2::new(305.0, 55.0));
        assert_eq!(session.paddle.pos.x, paddle_x + session.paddle.speed);
    }

    #[test]
    fn paddle_catch_flips_y_and_arms_immunity() {
        let config = GameConfig::default();
        let mut session = running_session(&config);
        // paddle top edge is at y = 25; drop the ball onto it
        session.paddle.pos.x = 250.0;
        session.ball.pos = Vec2::new(300.0, 30.0);
        session.ball.dir = Vec2::new(1.0, -1.0);
        session.ball.speed = 5.0;

        tick(&mut session, &config, &TickInput::default());

        assert_eq!(session.ball.pos, Vec2::new(305.0, 25.0));
        assert_eq!(session.ball.dir, Vec2::new(1.0, 1.0));
        assert!(session.paddle.immune(session.time_ticks + 1));
    }

    #[test]
    fn one_brick_per_tick_first_match_wins() {
        // two adjacent bricks share x = 40; the ball lands exactly there
        let level = LevelDef {
            ball_speed: 5.0,
            grid: vec![vec![Some(BRICK_RED), Some(BRICK_GREEN)]],
        };
        let mut config = test_config(vec![level]);
        config.window.width = 80.0; // two 40px cells, no gap
        let mut session = running_session(&config);

        let first_row_y = session.bricks[0].pos.y;
        session.ball.pos = Vec2::new(35.0, first_row_y - 9.0);
        session.ball.dir = Vec2::new(1.0, 1.0);
        session.ball.speed = 5.0;

        let events = tick(&mut session, &config, &TickInput::default());

        assert_eq!(session.score, 1);
        assert_eq!(session.bricks.len(), 1);
        // insertion order wins: the red brick at x = 0 went first
        assert_eq!(session.bricks[0].colour, BRICK_GREEN);
        assert!(events.contains(&GameEvent::BrickDestroyed { score: 1 }));
        assert_eq!(session.ball.dir, Vec2::new(1.0, -1.0));
    }

    #[test]
    fn clearing_a_level_advances_and_preserves_score_and_paddle() {
        let config = test_config(vec![one_brick_level(5.0), one_brick_level(6.0)]);
        let mut session = running_session(&config);
        session.paddle.pos.x = 123.0;

        let brick_y = session.bricks[0].pos.y;
        session.ball.pos = Vec2::new(10.0, brick_y - 9.0);
        session.ball.dir = Vec2::new(1.0, 1.0);
        session.ball.speed = 5.0;

        let events = tick(&mut session, &config, &TickInput::default());

        assert_eq!(events.len(), 2);
        assert!(events.contains(&GameEvent::BrickDestroyed { score: 1 }));
        assert!(events.contains(&GameEvent::LevelAdvanced { level: 2 }));

        assert_eq!(session.phase, Phase::Running);
        assert_eq!(session.level_number(), 2);
        assert_eq!(session.score, 1);
        assert_eq!(session.paddle.pos.x, 123.0);
        // ball back at the start pose with the new level's speed
        assert_eq!(session.ball.pos, config.ball_start());
        assert_eq!(session.ball.dir, config.ball.start_dir);
        assert_eq!(session.ball.speed, 6.0);
        assert_eq!(session.bricks.len(), 1);
    }

    #[test]
    fn clearing_the_last_level_wins() {
        let config = test_config(vec![one_brick_level(5.0)]);
        let mut session = running_session(&config);

        let brick_y = session.bricks[0].pos.y;
        session.ball.pos = Vec2::new(10.0, brick_y - 9.0);
        session.ball.dir = Vec2::new(1.0, 1.0);
        session.ball.speed = 5.0;

        let events = tick(&mut session, &config, &TickInput::default());

        assert!(events.contains(&GameEvent::Ended(Outcome::Win)));
        assert_eq!(session.phase, Phase::Ended(Outcome::Win));
        assert_eq!(session.score, 1);
    }

    #[test]
    fn floor_exit_ends_the_session_with_a_loss() {
        let config = GameConfig::default();
        let mut session = running_session(&config);
        // clear of the paddle, heading down past the floor
        session.ball.pos = Vec2::new(50.0, 10.0);
        session.ball.dir = Vec2::new(1.0, -1.0);
        session.ball.speed = 5.0;

        let events = tick(&mut session, &config, &TickInput::default());

        assert_eq!(events, vec![GameEvent::Ended(Outcome::Loss)]);
        assert_eq!(session.phase, Phase::Ended(Outcome::Loss));
    }

    #[test]
    fn ended_session_is_frozen() {
        let config = GameConfig::default();
        let mut session = running_session(&config);
        session.ball.pos = Vec2::new(50.0, 10.0);
        session.ball.dir = Vec2::new(1.0, -1.0);
        session.ball.speed = 5.0;
        tick(&mut session, &config, &TickInput::default());
        assert_eq!(session.phase, Phase::Ended(Outcome::Loss));

        let frozen = session.clone();
        let events = tick(&mut session, &config, &TickInput { lateral: 1.0 });

        assert!(events.is_empty());
        assert_eq!(session.ball.pos, frozen.ball.pos);
        assert_eq!(session.paddle.pos, frozen.paddle.pos);
        assert_eq!(session.bricks.len(), frozen.bricks.len());
        assert_eq!(session.score, frozen.score);
        assert_eq!(session.time_ticks, frozen.time_ticks);
    }

    #[test]
    fn score_counts_every_brick_exactly_once() {
        // one row of three bricks cleared by bouncing underneath
        let level = LevelDef {
            ball_speed: 5.0,
            grid: vec![vec![Some(BRICK_RED); 3]],
        };
        let mut config = test_config(vec![level]);
        config.window.width = 120.0;
        let mut session = running_session(&config);

        let mut last_score = 0;
        for _ in 0..2000 {
            let events = tick(&mut session, &config, &TickInput::default());
            for event in &events {
                if let GameEvent::BrickDestroyed { score } = event {
                    assert_eq!(*score, last_score + 1);
                    last_score = *score;
                }
            }
            if session.phase != Phase::Running {
                break;
            }
        }
        // monotonic, one point per brick, never past the brick count
        assert!(last_score <= 3);
    }
}
