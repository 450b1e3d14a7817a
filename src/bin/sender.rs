//! Sensor simulator
//!
//! Stands in for the handheld device: emits telemetry datagrams in the same
//! wire shape at a fixed tick rate. Each accelerometer axis follows its own
//! sine wave with a randomly chosen frequency plus a little uniform noise,
//! formatted to two decimals as strings the way the firmware does. Button 1
//! flips state at random, at most once per second boundary, so presses land
//! at uneven wall-clock intervals.
//!
//! Usage: sender [--port N] [--rate N] [--seed N]

use std::f64::consts::TAU;
use std::net::UdpSocket;
use std::thread;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde_json::json;

const DEFAULT_PORT: u16 = 5700;
const DEFAULT_TICKS_PER_SEC: u32 = 10;
const NOISE_VARIATION: f64 = 0.03;
const FLIP_THRESHOLD: f64 = 0.8;

/// A simulated momentary button: 0 released, 1 held.
struct Button {
    status: u8,
}

impl Button {
    fn rand_switch(&mut self, one_sec_mark: bool, rng: &mut Pcg32) {
        if one_sec_mark && rng.random::<f64>() > FLIP_THRESHOLD {
            self.status = 1 - self.status;
        }
    }
}

/// Three sine-wave axes. Frequencies start at 1/randint(1..=100) so no axis
/// is ever flat.
struct Accelerometer {
    freq: [f64; 3],
    value: [f64; 3],
}

impl Accelerometer {
    fn new(rng: &mut Pcg32) -> Self {
        let mut freq = [0.0; 3];
        for f in &mut freq {
            *f = 1.0 / rng.random_range(1..=100) as f64;
        }
        Self {
            freq,
            value: [0.0; 3],
        }
    }

    fn update(&mut self, counter: u64, rng: &mut Pcg32) {
        for (value, freq) in self.value.iter_mut().zip(self.freq) {
            let noise = rng.random_range(-1.0..1.0) * NOISE_VARIATION;
            *value = (counter as f64 * TAU * freq).sin() + noise;
        }
    }

    /// Axis values as the firmware sends them: two-decimal strings.
    fn as_json(&self) -> serde_json::Value {
        json!({
            "x": format!("{:.2}", self.value[0]),
            "y": format!("{:.2}", self.value[1]),
            "z": format!("{:.2}", self.value[2]),
        })
    }
}

struct Args {
    port: u16,
    ticks_per_sec: u32,
    seed: u64,
}

fn parse_args() -> Args {
    let mut args = Args {
        port: DEFAULT_PORT,
        ticks_per_sec: DEFAULT_TICKS_PER_SEC,
        seed: SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0),
    };

    let mut argv = std::env::args().skip(1);
    while let Some(flag) = argv.next() {
        let value = argv.next();
        let parsed = value.as_deref().and_then(|v| v.parse::<u64>().ok());
        match (flag.as_str(), parsed) {
            ("--port", Some(v)) => args.port = v as u16,
            ("--rate", Some(v)) if v > 0 => args.ticks_per_sec = v as u32,
            ("--seed", Some(v)) => args.seed = v,
            _ => {
                eprintln!("usage: sender [--port N] [--rate N] [--seed N]");
                std::process::exit(2);
            }
        }
    }
    args
}

fn main() -> std::io::Result<()> {
    env_logger::init();
    let args = parse_args();

    let socket = UdpSocket::bind(("127.0.0.1", 0))?;
    let target = ("127.0.0.1", args.port);
    log::info!(
        "sending telemetry to 127.0.0.1:{} at {}/s (seed {})",
        args.port,
        args.ticks_per_sec,
        args.seed
    );

    let mut rng = Pcg32::seed_from_u64(args.seed);
    let mut button_1 = Button { status: 0 };
    let mut accelerometer = Accelerometer::new(&mut rng);
    let interval = Duration::from_secs_f64(1.0 / f64::from(args.ticks_per_sec));

    let mut counter: u64 = 0;
    loop {
        let one_sec_mark = counter % u64::from(args.ticks_per_sec) == 0;

        accelerometer.update(counter, &mut rng);
        button_1.rand_switch(one_sec_mark, &mut rng);

        let message = json!({
            "accelerometer": accelerometer.as_json(),
            "button_1": button_1.status,
        });
        socket.send_to(message.to_string().as_bytes(), target)?;

        counter += 1;
        thread::sleep(interval);
    }
}
