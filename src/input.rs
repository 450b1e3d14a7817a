//! Sensor input: UDP transport, lenient decoding, per-tick normalization
//!
//! The device streams JSON datagrams with string-encoded accelerometer axes
//! and 0/1 button levels, at a slower rate than the game ticks. Decoding is
//! lenient at every field: anything missing or malformed reads as "no
//! signal" and nothing past the parse boundary can fail.

use std::collections::HashMap;
use std::io;
use std::net::UdpSocket;

use serde_json::Value;

/// One decoded telemetry datagram.
#[derive(Debug, Clone)]
pub struct SensorFrame {
    raw: Value,
}

impl SensorFrame {
    /// Decode a datagram payload. Only JSON objects qualify; anything else
    /// yields no frame.
    pub fn parse(buf: &[u8]) -> Option<Self> {
        match serde_json::from_slice::<Value>(buf) {
            Ok(raw @ Value::Object(_)) => Some(Self { raw }),
            Ok(_) => None,
            Err(err) => {
                log::debug!("discarding undecodable datagram: {err}");
                None
            }
        }
    }

    /// Lateral acceleration. The device firmware sends decimal strings, but
    /// plain numbers are accepted too.
    pub fn accel_x(&self) -> Option<f32> {
        number_like(self.raw.get("accelerometer")?.get("x")?)
    }

    /// Raw level of a named button. Unknown names and malformed values read
    /// as released.
    pub fn button_level(&self, name: &str) -> bool {
        self.raw.get(name).is_some_and(truthy)
    }
}

fn number_like(value: &Value) -> Option<f32> {
    match value {
        Value::Number(n) => n.as_f64().map(|f| f as f32),
        Value::String(s) => s.trim().parse::<f32>().ok(),
        _ => None,
    }
}

/// JSON truthiness: `true`, non-zero numbers and non-empty strings press a
/// button; everything else reads as released.
fn truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        _ => false,
    }
}

/// Anything that can be polled for the freshest telemetry frame. The game
/// pulls; nothing is pushed at it.
pub trait SampleSource {
    fn poll(&mut self) -> Option<SensorFrame>;
}

/// Non-blocking UDP receiver for device datagrams.
pub struct UdpSource {
    socket: UdpSocket,
    buf: [u8; 2048],
}

impl UdpSource {
    pub fn bind(port: u16) -> io::Result<Self> {
        let socket = UdpSocket::bind(("0.0.0.0", port))?;
        socket.set_nonblocking(true)?;
        log::info!("listening for sensor datagrams on udp/{port}");
        Ok(Self {
            socket,
            buf: [0; 2048],
        })
    }
}

impl SampleSource for UdpSource {
    /// Drain everything queued since the last call and keep the newest
    /// decodable frame. The device sends slower than the game ticks, so most
    /// calls find nothing new.
    fn poll(&mut self) -> Option<SensorFrame> {
        let mut latest = None;
        loop {
            match self.socket.recv(&mut self.buf) {
                Ok(len) => {
                    if let Some(frame) = SensorFrame::parse(&self.buf[..len]) {
                        latest = Some(frame);
                    }
                }
                Err(err) if err.kind() == io::ErrorKind::WouldBlock => break,
                Err(err) => {
                    log::warn!("sensor socket read failed: {err}");
                    break;
                }
            }
        }
        latest
    }
}

/// Clean per-tick command derived from the raw sensor stream.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputState {
    /// Lateral acceleration; 0.0 whenever the signal is absent or malformed.
    pub lateral: f32,
    /// Edge-triggered: true exactly once per press.
    pub button_1: bool,
    pub button_2: bool,
}

/// Turns raw frames into per-tick commands. Holds the freshest frame across
/// calls (the device updates slower than the game) plus the latched
/// per-button state that edge-triggering needs.
pub struct Normalizer<S> {
    source: S,
    latest: Option<SensorFrame>,
    latched: HashMap<String, bool>,
}

impl<S: SampleSource> Normalizer<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            latest: None,
            latched: HashMap::new(),
        }
    }

    /// One fresh read attempt plus normalization. Never fails: decode
    /// problems collapse to zero acceleration and released buttons.
    pub fn update(&mut self) -> InputState {
        if let Some(frame) = self.source.poll() {
            self.latest = Some(frame);
        }
        InputState {
            lateral: self
                .latest
                .as_ref()
                .and_then(SensorFrame::accel_x)
                .unwrap_or(0.0),
            button_1: self.button_edge("button_1"),
            button_2: self.button_edge("button_2"),
        }
    }

    /// True exactly once per press, on the released-to-held transition; false
    /// while held, after release, and on any malformed level.
    fn button_edge(&mut self, name: &str) -> bool {
        let level = self
            .latest
            .as_ref()
            .is_some_and(|frame| frame.button_level(name));
        let latched = self.latched.entry(name.to_string()).or_insert(false);
        let edge = level && !*latched;
        *latched = level;
        edge
    }
}
