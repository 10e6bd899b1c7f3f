//! Trick serves ("pitches") thrown by the AI.
//!
//! A pitch bends the ball's vertical velocity while it travels toward the
//! receiver. Wobbling pitches oscillate for the whole flight; breaking pitches
//! fly straight and kick late, once the ball has covered
//! `LATE_CURVE_THRESHOLD` of the distance. Horizontal velocity is never
//! touched.

use std::f32::consts::TAU;

use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{Ball, Difficulty, GameRng, Params};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PitchType {
    Curveball,
    Slider,
    Knuckleball,
    Serpent,
    Splitter,
}

impl PitchType {
    pub const ALL: [PitchType; 5] = [
        PitchType::Curveball,
        PitchType::Slider,
        PitchType::Knuckleball,
        PitchType::Serpent,
        PitchType::Splitter,
    ];

    pub fn config(self) -> PitchConfig {
        match self {
            PitchType::Curveball => PitchConfig {
                wobble: None,
                late_curve: Some(LateCurve {
                    accel: Params::LATE_CURVE_ACCEL,
                    direction: BreakDirection::Down,
                }),
                weight: 4,
                min_difficulty: Difficulty::Easy,
            },
            PitchType::Slider => PitchConfig {
                wobble: None,
                late_curve: Some(LateCurve {
                    accel: Params::LATE_CURVE_ACCEL * 0.8,
                    direction: BreakDirection::Up,
                }),
                weight: 3,
                min_difficulty: Difficulty::Medium,
            },
            PitchType::Knuckleball => PitchConfig {
                wobble: Some(Wobble {
                    period: Params::WOBBLE_PERIOD * 0.5,
                    amplitude: Params::WOBBLE_AMPLITUDE * 0.6,
                    jitter: Params::WOBBLE_RANDOM_JITTER * 3.0,
                }),
                late_curve: None,
                weight: 2,
                min_difficulty: Difficulty::Medium,
            },
            PitchType::Serpent => PitchConfig {
                wobble: Some(Wobble {
                    period: Params::WOBBLE_PERIOD,
                    amplitude: Params::WOBBLE_AMPLITUDE,
                    jitter: Params::WOBBLE_RANDOM_JITTER,
                }),
                late_curve: None,
                weight: 2,
                min_difficulty: Difficulty::Hard,
            },
            PitchType::Splitter => PitchConfig {
                wobble: Some(Wobble {
                    period: Params::WOBBLE_PERIOD * 1.5,
                    amplitude: Params::WOBBLE_AMPLITUDE * 0.3,
                    jitter: Params::WOBBLE_RANDOM_JITTER,
                }),
                late_curve: Some(LateCurve {
                    accel: Params::LATE_CURVE_ACCEL * 1.4,
                    direction: BreakDirection::Against,
                }),
                weight: 1,
                min_difficulty: Difficulty::Impossible,
            },
        }
    }
}

/// Which way a late break pushes the ball
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakDirection {
    Down,
    Up,
    /// Opposite to the vertical travel at the moment the break starts
    Against,
}

impl BreakDirection {
    fn sign(self, vy: f32) -> f32 {
        match self {
            BreakDirection::Down => 1.0,
            BreakDirection::Up => -1.0,
            BreakDirection::Against => {
                if vy > 0.0 {
                    -1.0
                } else {
                    1.0
                }
            }
        }
    }
}

/// Periodic lateral wobble
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wobble {
    pub period: f32,
    pub amplitude: f32,
    pub jitter: f32,
}

/// Late directional kick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LateCurve {
    pub accel: f32,
    pub direction: BreakDirection,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PitchConfig {
    pub wobble: Option<Wobble>,
    pub late_curve: Option<LateCurve>,
    pub weight: u32,
    pub min_difficulty: Difficulty,
}

/// Flight bookkeeping for an active pitch
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveState {
    pub start_x: f32,
    pub target_x: f32,
    /// Fraction of the start..target distance covered, 0..=1
    pub progress: f32,
    /// Latched once the late break opens
    pub break_sign: Option<f32>,
}

impl CurveState {
    fn progress_at(&self, x: f32) -> f32 {
        let span = self.target_x - self.start_x;
        if span.abs() <= f32::EPSILON {
            return 1.0;
        }
        ((x - self.start_x) / span).max(0.0)
    }
}

/// Pitch attached to a freshly served ball
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActivePitch {
    pub pitch_type: PitchType,
    pub elapsed: f32,
    pub curve: CurveState,
}

impl ActivePitch {
    pub fn new(pitch_type: PitchType, start_x: f32, target_x: f32) -> Self {
        Self {
            pitch_type,
            elapsed: 0.0,
            curve: CurveState {
                start_x,
                target_x,
                progress: 0.0,
                break_sign: None,
            },
        }
    }
}

/// Display data for the HUD
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PitchInfo {
    pub name: &'static str,
    pub emoji: &'static str,
    pub description: &'static str,
}

pub fn get_pitch_info(pitch_type: PitchType) -> PitchInfo {
    match pitch_type {
        PitchType::Curveball => PitchInfo {
            name: "Curveball",
            emoji: "🌀",
            description: "Flies true, then drops hard near the end",
        },
        PitchType::Slider => PitchInfo {
            name: "Slider",
            emoji: "↗️",
            description: "Late break that rises toward the top wall",
        },
        PitchType::Knuckleball => PitchInfo {
            name: "Knuckleball",
            emoji: "🦋",
            description: "Flutters unpredictably all the way in",
        },
        PitchType::Serpent => PitchInfo {
            name: "Serpent",
            emoji: "🐍",
            description: "Weaves up and down in a steady wave",
        },
        PitchType::Splitter => PitchInfo {
            name: "Splitter",
            emoji: "⚡",
            description: "Slight wobble, then snaps against its path",
        },
    }
}

/// Chance that an AI serve curves at all
fn curve_probability(difficulty: Difficulty) -> f64 {
    let scale = match difficulty {
        Difficulty::Easy => 0.5,
        Difficulty::Medium => 1.0,
        Difficulty::Hard => 1.4,
        Difficulty::Impossible => 1.8,
    };
    (Params::RANDOM_CURVE_PROBABILITY * scale).min(1.0)
}

/// Pick a pitch for an AI serve, or `None` for a plain serve.
///
/// Harder difficulties curve more often and unlock more of the catalog.
pub fn get_random_pitch(difficulty: Difficulty, rng: &mut GameRng) -> Option<PitchType> {
    if !rng.0.gen_bool(curve_probability(difficulty)) {
        return None;
    }

    let pool: Vec<PitchType> = PitchType::ALL
        .into_iter()
        .filter(|p| p.config().min_difficulty.rank() <= difficulty.rank())
        .collect();
    let weights = WeightedIndex::new(pool.iter().map(|p| p.config().weight)).ok()?;
    Some(pool[weights.sample(&mut rng.0)])
}

/// Bend `ball.vel.y` for one step of an active pitch.
///
/// `max_speed` bounds the resulting speed by limiting the vertical
/// component only. Clears the pitch once the ball reaches the target plane.
pub fn apply_curve(ball: &mut Ball, dt: f32, max_speed: f32, rng: &mut GameRng) {
    let Some(mut active) = ball.pitch else {
        return;
    };

    active.elapsed += dt;
    let config = active.pitch_type.config();
    let progress = active.curve.progress_at(ball.pos.x);
    let mut dvy = 0.0;

    if let Some(wobble) = config.wobble {
        let omega = TAU / wobble.period;
        dvy += wobble.amplitude * (omega * active.elapsed).cos() * dt;
        if wobble.jitter > 0.0 {
            dvy += rng.0.gen_range(-wobble.jitter..=wobble.jitter) * dt;
        }
    }

    if let Some(late) = config.late_curve {
        let start = Params::LATE_CURVE_THRESHOLD;
        if progress >= start && progress < start + Params::LATE_CURVE_WINDOW {
            let vy = ball.vel.y;
            let sign = *active
                .curve
                .break_sign
                .get_or_insert_with(|| late.direction.sign(vy));
            dvy += sign * late.accel * dt;
        }
    }

    ball.vel.y = limit_vertical(ball.vel.x, ball.vel.y + dvy, max_speed);
    active.curve.progress = progress;
    ball.pitch = if progress >= 1.0 { None } else { Some(active) };
}

/// Largest |vy| that keeps `|(vx, vy)| <= max_speed`
fn limit_vertical(vx: f32, vy: f32, max_speed: f32) -> f32 {
    let room = max_speed * max_speed - vx * vx;
    if room <= 0.0 {
        return 0.0;
    }
    let cap = room.sqrt();
    vy.clamp(-cap, cap)
}
