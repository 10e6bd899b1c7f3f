use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::pitch::ActivePitch;

/// Which end of the arena a paddle defends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    /// Sign of horizontal velocity that carries the ball toward this side
    pub fn toward(self) -> f32 {
        match self {
            Side::Left => -1.0,
            Side::Right => 1.0,
        }
    }

    /// Wire id used by input handling: 0 = left, 1 = right
    pub fn id(self) -> u8 {
        match self {
            Side::Left => 0,
            Side::Right => 1,
        }
    }
}

/// Discrete per-frame paddle input
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    #[default]
    None,
}

impl Direction {
    /// -1 moves up (toward y = 0), 1 moves down, 0 holds
    pub fn sign(self) -> f32 {
        match self {
            Direction::Up => -1.0,
            Direction::Down => 1.0,
            Direction::None => 0.0,
        }
    }
}

impl From<i8> for Direction {
    fn from(dir: i8) -> Self {
        match dir {
            -1 => Direction::Up,
            1 => Direction::Down,
            _ => Direction::None,
        }
    }
}

/// Cosmetic paddle skin, stored and forwarded to the renderer only
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaddleSkin {
    #[default]
    Classic,
    Neon,
    Flame,
    Ice,
    Gold,
    Rainbow,
}

/// Cosmetic ball trail
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrailType {
    #[default]
    None,
    Classic,
    Fire,
    Sparkle,
    Rainbow,
    Comet,
}

/// Cosmetic arena backdrop
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArenaTheme {
    #[default]
    Classic,
    Neon,
    Retro,
    Space,
}

/// Paddle component. `y` is the paddle center; x follows from `side`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Paddle {
    pub side: Side,
    pub y: f32,
    pub height: f32,
    pub speed: f32,
    pub skin: PaddleSkin,
}

impl Paddle {
    pub fn new(side: Side, y: f32, height: f32, speed: f32, skin: PaddleSkin) -> Self {
        Self {
            side,
            y,
            height,
            speed,
            skin,
        }
    }

    pub fn top(&self) -> f32 {
        self.y - self.height / 2.0
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height / 2.0
    }
}

/// Ball component. A serve from an AI paddle may carry an active pitch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ball {
    pub pos: Vec2,
    /// Center before the last step; paddle contact is swept from here
    pub prev_pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub trail: TrailType,
    pub pitch: Option<ActivePitch>,
}

impl Ball {
    pub fn new(pos: Vec2, vel: Vec2, radius: f32) -> Self {
        Self {
            pos,
            prev_pos: pos,
            vel,
            radius,
            trail: TrailType::None,
            pitch: None,
        }
    }

    pub fn speed(&self) -> f32 {
        self.vel.length()
    }

    /// True when the ball travels toward `side`'s goal line
    pub fn moving_toward(&self, side: Side) -> bool {
        self.vel.x * side.toward() > 0.0
    }
}

/// Movement intent for a human-controlled paddle
#[derive(Debug, Clone, Copy, Default)]
pub struct PaddleIntent {
    pub dir: Direction,
}

impl PaddleIntent {
    pub fn new() -> Self {
        Self::default()
    }
}
