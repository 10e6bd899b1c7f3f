//! AI opponent.
//!
//! Each AI paddle carries an [`AiController`]. Every frame it predicts where
//! the ball will cross its paddle line, adds a deliberately stale aiming
//! error, and steers toward that target. The error only refreshes every few
//! hundred milliseconds of simulated time, which reads as reaction delay.

use rand::Rng;

use crate::physics::{predict_ball_y, slide_paddle};
use crate::{Ball, Config, Difficulty, Direction, GameRng, Paddle, Params, QuestModifiers};

/// Imperfection knobs for one difficulty
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AiConfig {
    /// Largest aiming error, in arena units
    pub error_margin: f32,
    /// Floor on tracking speed as a fraction of paddle speed
    pub min_speed_multiplier: f32,
    pub error_update_base_ms: f32,
    pub error_update_variance_ms: f32,
    pub dead_zone: f32,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self::for_difficulty(Difficulty::Easy)
    }
}

impl AiConfig {
    pub fn for_difficulty(difficulty: Difficulty) -> Self {
        match difficulty {
            Difficulty::Easy => Self {
                error_margin: Params::AI_ERROR_MARGIN * 2.0,
                min_speed_multiplier: Params::AI_MIN_SPEED_MULTIPLIER * 0.7,
                error_update_base_ms: Params::AI_ERROR_UPDATE_BASE_MS * 1.8,
                error_update_variance_ms: Params::AI_ERROR_UPDATE_VARIANCE_MS * 1.5,
                dead_zone: Params::AI_DEAD_ZONE * 1.5,
            },
            Difficulty::Medium => Self {
                error_margin: Params::AI_ERROR_MARGIN,
                min_speed_multiplier: Params::AI_MIN_SPEED_MULTIPLIER,
                error_update_base_ms: Params::AI_ERROR_UPDATE_BASE_MS,
                error_update_variance_ms: Params::AI_ERROR_UPDATE_VARIANCE_MS,
                dead_zone: Params::AI_DEAD_ZONE,
            },
            Difficulty::Hard => Self {
                error_margin: Params::AI_ERROR_MARGIN * 0.5,
                min_speed_multiplier: Params::AI_MIN_SPEED_MULTIPLIER * 1.3,
                error_update_base_ms: Params::AI_ERROR_UPDATE_BASE_MS * 0.7,
                error_update_variance_ms: Params::AI_ERROR_UPDATE_VARIANCE_MS * 0.6,
                dead_zone: Params::AI_DEAD_ZONE * 0.6,
            },
            Difficulty::Impossible => Self {
                error_margin: 2.0,
                min_speed_multiplier: Params::AI_MIN_SPEED_MULTIPLIER * 1.7,
                error_update_base_ms: Params::AI_ERROR_UPDATE_BASE_MS * 0.3,
                error_update_variance_ms: Params::AI_ERROR_UPDATE_VARIANCE_MS * 0.25,
                dead_zone: Params::AI_DEAD_ZONE * 0.4,
            },
        }
    }
}

/// Per-paddle AI state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AiController {
    pub difficulty: Difficulty,
    pub config: AiConfig,
    pub error_offset: f32,
    /// Simulated milliseconds until the error is redrawn; <= 0 means now
    pub error_timer_ms: f32,
}

impl AiController {
    pub fn new(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            config: AiConfig::for_difficulty(difficulty),
            error_offset: 0.0,
            error_timer_ms: 0.0,
        }
    }
}

/// Outcome of one AI frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AiStep {
    pub paddle: Paddle,
    pub direction: Direction,
}

/// Forget the aiming error and refresh it on the next frame
pub fn reset_ai_state(controller: &mut AiController) {
    controller.error_offset = 0.0;
    controller.error_timer_ms = 0.0;
}

fn refresh_error(controller: &mut AiController, dt: f32, rng: &mut GameRng) {
    controller.error_timer_ms -= dt * 1000.0;
    if controller.error_timer_ms > 0.0 {
        return;
    }

    let cfg = controller.config;
    controller.error_offset = if cfg.error_margin > 0.0 {
        rng.0.gen_range(-cfg.error_margin..=cfg.error_margin)
    } else {
        0.0
    };
    let jitter = if cfg.error_update_variance_ms > 0.0 {
        rng.0.gen_range(0.0..=cfg.error_update_variance_ms)
    } else {
        0.0
    };
    controller.error_timer_ms = cfg.error_update_base_ms + jitter;
}

/// Drive an AI paddle for one frame.
///
/// While the ball approaches (or hangs still), the paddle chases the predicted
/// crossing point plus the current aiming error. A ball moving away sends it
/// drifting back toward the arena midline at reduced urgency. Inside the dead zone it holds still.
pub fn update_ai(
    controller: &mut AiController,
    paddle: &Paddle,
    ball: &Ball,
    config: &Config,
    modifiers: &QuestModifiers,
    dt: f32,
    rng: &mut GameRng,
) -> AiStep {
    refresh_error(controller, dt, rng);
    let cfg = controller.config;

    // A ball with no horizontal motion is tracked where it sits
    let moving_away = ball.vel.x * paddle.side.toward() < 0.0;
    let (target, urgency_scale) = if moving_away {
        (config.arena_height / 2.0, Params::AI_RECENTER_URGENCY)
    } else {
        let target_x = config.contact_x(paddle.side, ball.radius);
        (
            predict_ball_y(ball, target_x, config, controller.error_offset),
            1.0,
        )
    };

    let diff = target - paddle.y;
    if diff.abs() <= cfg.dead_zone {
        return AiStep {
            paddle: *paddle,
            direction: Direction::None,
        };
    }

    let half_height = (paddle.height / 2.0).max(f32::EPSILON);
    let urgency = (diff.abs() / half_height).clamp(cfg.min_speed_multiplier.min(1.0), 1.0);
    let speed = paddle.speed * modifiers.paddle_speed * urgency * urgency_scale;
    let step = (speed * dt).min(diff.abs());

    let direction = if diff > 0.0 {
        Direction::Down
    } else {
        Direction::Up
    };

    AiStep {
        paddle: slide_paddle(paddle, direction.sign() * step, config),
        direction,
    }
}
