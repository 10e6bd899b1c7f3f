//! Browser bridge for Quest Pong
//!
//! The page owns the canvas, the audio and the animation loop. Each
//! `requestAnimationFrame` callback calls [`PongArena::frame`] (or
//! [`PongArena::tick`]) and then reads the view and events as JSON for drawing
//! and sound. All game rules live in `game_core`.

mod input;
mod state;

use game_core::{Arena, Config, Direction, GameMode, MatchSetup, Side};
use input::HeldKeys;
use state::FrameView;
use wasm_bindgen::prelude::*;

fn init_logging() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
}

fn parse_setup(setup_json: &str) -> MatchSetup {
    if setup_json.trim().is_empty() {
        return MatchSetup::default();
    }
    match serde_json::from_str(setup_json) {
        Ok(setup) => setup,
        Err(e) => {
            log::warn!("Bad match setup ({}), using defaults", e);
            MatchSetup::default()
        }
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value)
        .map_err(|e| JsValue::from_str(&format!("Failed to serialize: {:?}", e)))
}

/// Current page time in milliseconds, if the Performance API is available
fn performance_now() -> Option<f64> {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
}

/// One match, owned by the page
#[wasm_bindgen]
pub struct PongArena {
    arena: Arena,
    keys: HeldKeys,
}

#[wasm_bindgen]
impl PongArena {
    /// Start a match. `setup_json` is a camelCase `MatchSetup`; empty or
    /// invalid input falls back to a default match against the easy AI.
    #[wasm_bindgen(constructor)]
    pub fn new(seed: u64, setup_json: &str) -> PongArena {
        init_logging();
        let setup = parse_setup(setup_json);
        log::info!("Quest Pong: initialized ({:?})", setup.mode);
        Self {
            arena: Arena::new(Config::new(), setup, seed),
            keys: HeldKeys::new(),
        }
    }

    /// Seed from the page clock, for callers that don't care about replays
    pub fn unseeded(setup_json: &str) -> PongArena {
        Self::new(js_sys::Date::now().to_bits(), setup_json)
    }

    /// Advance one frame with explicit directions (-1 up, 1 down, else none).
    /// Returns whether the simulation moved.
    pub fn frame(&mut self, now_ms: f64, left_dir: i8, right_dir: i8) -> bool {
        self.arena
            .frame(now_ms, Direction::from(left_dir), Direction::from(right_dir))
            .advanced
    }

    /// Advance using `performance.now()` and the held keyboard keys
    pub fn tick(&mut self) -> Result<bool, JsValue> {
        let now = performance_now().ok_or_else(|| JsValue::from_str("Performance API unavailable"))?;
        Ok(self.frame_with_keys(now))
    }

    pub fn key_down(&mut self, key: &str) -> bool {
        self.keys.set(key, true)
    }

    pub fn key_up(&mut self, key: &str) -> bool {
        self.keys.set(key, false)
    }

    pub fn handle_key_event(&mut self, event: &web_sys::KeyboardEvent, pressed: bool) -> bool {
        let key = input::get_key_from_event(event);
        self.keys.set(&key, pressed)
    }

    pub fn pause(&mut self) {
        self.keys.clear();
        self.arena.pause();
    }

    pub fn resume(&mut self) {
        self.arena.resume();
    }

    pub fn restart(&mut self) {
        self.keys.clear();
        self.arena.restart();
    }

    /// False once someone has won; the page should stop its loop
    pub fn is_running(&self) -> bool {
        self.arena.is_running()
    }

    pub fn phase(&self) -> String {
        self.arena.phase.name().to_string()
    }

    pub fn ball_x(&self) -> f32 {
        self.arena.ball().map_or(0.0, |b| b.pos.x)
    }

    pub fn ball_y(&self) -> f32 {
        self.arena.ball().map_or(0.0, |b| b.pos.y)
    }

    pub fn left_paddle_y(&self) -> f32 {
        self.arena.paddle(Side::Left).map_or(0.0, |p| p.y)
    }

    pub fn right_paddle_y(&self) -> f32 {
        self.arena.paddle(Side::Right).map_or(0.0, |p| p.y)
    }

    pub fn score_left(&self) -> u8 {
        self.arena.score.left
    }

    pub fn score_right(&self) -> u8 {
        self.arena.score.right
    }

    /// JSON snapshot of everything the renderer draws
    pub fn view(&self) -> Result<String, JsValue> {
        to_json(&FrameView::capture(&self.arena))
    }

    /// JSON array of events since the last call (hits, points, pitches, match end)
    pub fn drain_events(&mut self) -> Result<String, JsValue> {
        to_json(&self.arena.drain_events())
    }
}

impl PongArena {
    fn frame_with_keys(&mut self, now_ms: f64) -> bool {
        let (left, right) = match self.arena.setup.mode {
            GameMode::Local => (
                self.keys.direction(Side::Left),
                self.keys.direction(Side::Right),
            ),
            // Single human: either key set steers the left paddle
            GameMode::Ai | GameMode::Quest => (self.keys.merged(), Direction::None),
        };
        self.arena.frame(now_ms, left, right).advanced
    }
}
