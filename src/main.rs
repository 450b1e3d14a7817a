//! Tilt Breakout entry point
//!
//! Headless runner: binds the sensor socket, then drives the application
//! state machine at a fixed frame rate until the quit button arrives.
//! Rendering is left to an embedding front end; this binary reports session
//! milestones through the log instead.

use std::io;
use std::path::Path;
use std::thread;
use std::time::Duration;

use tilt_breakout::app::{App, Screen};
use tilt_breakout::config::GameConfig;
use tilt_breakout::input::{Normalizer, UdpSource};

const FRAME_RATE: f32 = 60.0;

fn main() -> io::Result<()> {
    env_logger::init();

    let config = match std::env::args().nth(1) {
        Some(path) => GameConfig::load(Path::new(&path)),
        None => GameConfig::default(),
    };

    let source = UdpSource::bind(config.input_port)?;
    let mut input = Normalizer::new(source);
    let mut app = App::new(config);

    log::info!("running at {FRAME_RATE} fps; button 2 starts, button 1 quits");
    let frame = Duration::from_secs_f32(1.0 / FRAME_RATE);
    loop {
        let state = input.update();
        let snapshot = app.frame(&state);
        if snapshot.screen == Screen::Exit {
            break;
        }
        thread::sleep(frame);
    }

    log::info!("bye");
    Ok(())
}
