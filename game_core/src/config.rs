use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::{Params, Side};

/// Game configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub arena_width: f32,
    pub arena_height: f32,
    pub paddle_width: f32,
    pub paddle_height: f32,
    pub paddle_margin: f32,
    pub paddle_speed: f32,
    pub ball_radius: f32,
    pub ball_initial_speed: f32,
    pub ball_max_speed: f32,
    pub ball_speed_increment: f32,
    pub max_bounce_angle: f32,
    pub serve_angle_spread: f32,
    pub win_score: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            arena_width: Params::ARENA_WIDTH,
            arena_height: Params::ARENA_HEIGHT,
            paddle_width: Params::PADDLE_WIDTH,
            paddle_height: Params::PADDLE_HEIGHT,
            paddle_margin: Params::PADDLE_MARGIN,
            paddle_speed: Params::PADDLE_SPEED,
            ball_radius: Params::BALL_RADIUS,
            ball_initial_speed: Params::BALL_INITIAL_SPEED,
            ball_max_speed: Params::BALL_MAX_SPEED,
            ball_speed_increment: Params::BALL_SPEED_INCREMENT,
            max_bounce_angle: Params::MAX_BOUNCE_ANGLE,
            serve_angle_spread: Params::SERVE_ANGLE_SPREAD,
            win_score: Params::WIN_SCORE,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get X position of the paddle center for a side
    pub fn paddle_x(&self, side: Side) -> f32 {
        let inset = self.paddle_margin + self.paddle_width / 2.0;
        match side {
            Side::Left => inset,
            Side::Right => self.arena_width - inset,
        }
    }

    /// X of the ball center at the moment it touches a paddle's inner face
    pub fn contact_x(&self, side: Side, radius: f32) -> f32 {
        let reach = self.paddle_width / 2.0 + radius;
        match side {
            Side::Left => self.paddle_x(side) + reach,
            Side::Right => self.paddle_x(side) - reach,
        }
    }

    /// Clamp a paddle center so the whole paddle stays inside the arena
    pub fn clamp_paddle_y(&self, y: f32, height: f32) -> f32 {
        let half_height = (height / 2.0).min(self.arena_height / 2.0);
        y.clamp(half_height, self.arena_height - half_height)
    }

    /// Range the ball center may occupy vertically
    pub fn ball_y_bounds(&self, radius: f32) -> (f32, f32) {
        (radius, self.arena_height - radius)
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.arena_width / 2.0, self.arena_height / 2.0)
    }

    /// Points needed to take the match, honouring a quest override
    pub fn win_score(&self, modifiers: &QuestModifiers) -> u8 {
        modifiers.win_score.unwrap_or(self.win_score)
    }
}

/// Quest-mode gameplay overrides. Multipliers default to identity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct QuestModifiers {
    pub ball_speed: f32,
    pub paddle_size: f32,
    pub paddle_speed: f32,
    pub win_score: Option<u8>,
}

impl Default for QuestModifiers {
    fn default() -> Self {
        Self {
            ball_speed: 1.0,
            paddle_size: 1.0,
            paddle_speed: 1.0,
            win_score: None,
        }
    }
}

impl QuestModifiers {
    /// Normalize modifiers coming from the quest catalog.
    ///
    /// Non-finite or non-positive multipliers reset to 1.0, the rest are
    /// clamped into `[MODIFIER_MIN, MODIFIER_MAX]`. A zero win score is
    /// dropped. Everything downstream assumes sanitized modifiers.
    pub fn sanitized(self) -> Self {
        let fix = |name: &str, value: f32| -> f32 {
            if !value.is_finite() || value <= 0.0 {
                log::warn!("Ignoring invalid {name} modifier {value}");
                1.0
            } else {
                value.clamp(Params::MODIFIER_MIN, Params::MODIFIER_MAX)
            }
        };

        let win_score = match self.win_score {
            Some(0) => {
                log::warn!("Ignoring zero win score override");
                None
            }
            other => other,
        };

        Self {
            ball_speed: fix("ballSpeed", self.ball_speed),
            paddle_size: fix("paddleSize", self.paddle_size),
            paddle_speed: fix("paddleSpeed", self.paddle_speed),
            win_score,
        }
    }
}

/// AI difficulty. Unknown names fall back to `Easy`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
    Impossible,
}

impl Difficulty {
    pub fn parse(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "medium" => Difficulty::Medium,
            "hard" => Difficulty::Hard,
            "impossible" => Difficulty::Impossible,
            _ => Difficulty::Easy,
        }
    }

    /// Position on the easy..impossible ladder
    pub fn rank(self) -> u8 {
        match self {
            Difficulty::Easy => 0,
            Difficulty::Medium => 1,
            Difficulty::Hard => 2,
            Difficulty::Impossible => 3,
        }
    }
}

impl From<String> for Difficulty {
    fn from(name: String) -> Self {
        Difficulty::parse(&name)
    }
}

/// Who controls the two paddles. Unknown names fall back to `Ai`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum GameMode {
    /// Human on the left, AI on the right
    #[default]
    Ai,
    /// Two humans sharing a keyboard
    Local,
    /// Quest challenge against the AI, with modifiers
    Quest,
}

impl GameMode {
    pub fn parse(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "local" | "pvp" => GameMode::Local,
            "quest" => GameMode::Quest,
            _ => GameMode::Ai,
        }
    }

    /// Whether the paddle on `side` is driven by the AI controller
    pub fn is_ai(self, side: Side) -> bool {
        match self {
            GameMode::Local => false,
            GameMode::Ai | GameMode::Quest => side == Side::Right,
        }
    }
}

impl From<String> for GameMode {
    fn from(name: String) -> Self {
        GameMode::parse(&name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_paddle_x() {
        let config = Config::new();
        assert_eq!(config.paddle_x(Side::Left), 36.0, "Left paddle X position");
        assert_eq!(config.paddle_x(Side::Right), 764.0, "Right paddle X position");
    }

    #[test]
    fn test_config_contact_x() {
        let config = Config::new();
        assert_eq!(config.contact_x(Side::Left, 8.0), 50.0);
        assert_eq!(config.contact_x(Side::Right, 8.0), 750.0);
    }

    #[test]
    fn test_config_clamp_paddle_y() {
        let config = Config::new();
        let half_height = config.paddle_height / 2.0;
        assert_eq!(config.clamp_paddle_y(0.0, config.paddle_height), half_height);
        assert_eq!(
            config.clamp_paddle_y(1000.0, config.paddle_height),
            config.arena_height - half_height
        );
        assert_eq!(config.clamp_paddle_y(250.0, config.paddle_height), 250.0);
    }

    #[test]
    fn test_clamp_paddle_taller_than_arena() {
        let config = Config::new();
        let y = config.clamp_paddle_y(10.0, config.arena_height * 2.0);
        assert_eq!(y, config.arena_height / 2.0);
    }

    #[test]
    fn test_win_score_override() {
        let config = Config::new();
        assert_eq!(config.win_score(&QuestModifiers::default()), Params::WIN_SCORE);
        let quest = QuestModifiers {
            win_score: Some(3),
            ..QuestModifiers::default()
        };
        assert_eq!(config.win_score(&quest), 3);
    }

    #[test]
    fn test_modifiers_sanitized() {
        let raw = QuestModifiers {
            ball_speed: f32::NAN,
            paddle_size: -2.0,
            paddle_speed: 100.0,
            win_score: Some(0),
        };
        let clean = raw.sanitized();
        assert_eq!(clean.ball_speed, 1.0);
        assert_eq!(clean.paddle_size, 1.0);
        assert_eq!(clean.paddle_speed, Params::MODIFIER_MAX);
        assert_eq!(clean.win_score, None);
    }

    #[test]
    fn test_modifiers_from_quest_json() {
        let mods: QuestModifiers =
            serde_json::from_str(r#"{"ballSpeed": 1.5, "winScore": 3}"#).unwrap();
        assert_eq!(mods.ball_speed, 1.5);
        assert_eq!(mods.paddle_size, 1.0, "Missing fields keep identity");
        assert_eq!(mods.win_score, Some(3));
    }

    #[test]
    fn test_difficulty_falls_back_to_easy() {
        assert_eq!(Difficulty::parse("Hard"), Difficulty::Hard);
        assert_eq!(Difficulty::parse("impossible"), Difficulty::Impossible);
        assert_eq!(Difficulty::parse("nightmare"), Difficulty::Easy);
        let parsed: Difficulty = serde_json::from_str("\"legendary\"").unwrap();
        assert_eq!(parsed, Difficulty::Easy);
    }

    #[test]
    fn test_game_mode_ai_sides() {
        assert!(GameMode::Ai.is_ai(Side::Right));
        assert!(!GameMode::Ai.is_ai(Side::Left));
        assert!(!GameMode::Local.is_ai(Side::Right));
        assert!(GameMode::Quest.is_ai(Side::Right));
    }

    #[test]
    fn test_game_mode_parse() {
        assert_eq!(GameMode::parse("PvP"), GameMode::Local);
        let parsed: GameMode = serde_json::from_str("\"tournament\"").unwrap();
        assert_eq!(parsed, GameMode::Ai);
        let quest: GameMode = serde_json::from_str("\"quest\"").unwrap();
        assert_eq!(quest, GameMode::Quest);
    }
}
