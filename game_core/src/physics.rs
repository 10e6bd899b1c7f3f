//! Ball and paddle physics.
//!
//! Every function here is a pure transformation of values: the caller owns the
//! state, passes in the frame delta and the random source, and gets the next
//! state back. Nothing reads a clock.

use glam::Vec2;
use rand::Rng;

use crate::pitch::{self, ActivePitch};
use crate::{Ball, Config, Direction, GameRng, Paddle, PaddleSkin, QuestModifiers, Side, TrailType};

/// Result of advancing the ball one step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BallUpdate {
    pub ball: Ball,
    pub hit_wall: bool,
}

/// Result of a paddle collision test
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PaddleHit {
    pub hit: bool,
    pub ball: Option<Ball>,
    pub side: Option<Side>,
    /// Point of contact on the paddle face, for particles
    pub impact: Option<Vec2>,
}

/// Allowed ball speed range under the given modifiers
pub fn ball_speed_bounds(config: &Config, modifiers: &QuestModifiers) -> (f32, f32) {
    (
        config.ball_initial_speed * modifiers.ball_speed,
        config.ball_max_speed * modifiers.ball_speed,
    )
}

/// Ball at the arena center moving right at the initial speed.
/// The serve direction is chosen later by `reset_ball`.
pub fn create_ball(config: &Config, trail: TrailType) -> Ball {
    let mut ball = Ball::new(
        config.center(),
        Vec2::new(config.ball_initial_speed, 0.0),
        config.ball_radius,
    );
    ball.trail = trail;
    ball
}

/// Paddle centered vertically on its side
pub fn create_paddle(config: &Config, side: Side, skin: PaddleSkin) -> Paddle {
    Paddle::new(
        side,
        config.arena_height / 2.0,
        config.paddle_height,
        config.paddle_speed,
        skin,
    )
}

/// Apply quest paddle-size scaling to a freshly created paddle
pub fn apply_paddle_modifiers(mut paddle: Paddle, config: &Config, modifiers: &QuestModifiers) -> Paddle {
    paddle.height = (config.paddle_height * modifiers.paddle_size).min(config.arena_height);
    paddle.y = config.clamp_paddle_y(paddle.y, paddle.height);
    paddle
}

/// Advance the ball by `dt` seconds.
///
/// An active pitch bends the vertical velocity before integration. Top and
/// bottom walls reflect `vel.y` and clamp the ball back inside; `hit_wall`
/// reports whether that happened.
pub fn update_ball(
    ball: &Ball,
    config: &Config,
    modifiers: &QuestModifiers,
    dt: f32,
    rng: &mut GameRng,
) -> BallUpdate {
    let mut ball = *ball;

    if ball.pitch.is_some() {
        let (_, max_speed) = ball_speed_bounds(config, modifiers);
        pitch::apply_curve(&mut ball, dt, max_speed, rng);
    }

    ball.prev_pos = ball.pos;
    ball.pos += ball.vel * dt;

    let (min_y, max_y) = config.ball_y_bounds(ball.radius);
    let mut hit_wall = false;
    if ball.pos.y < min_y {
        ball.pos.y = min_y;
        ball.vel.y = ball.vel.y.abs();
        hit_wall = true;
    } else if ball.pos.y > max_y {
        ball.pos.y = max_y;
        ball.vel.y = -ball.vel.y.abs();
        hit_wall = true;
    }

    BallUpdate { ball, hit_wall }
}

/// Move a paddle one step in `direction`, staying fully inside the arena
pub fn move_paddle(
    paddle: &Paddle,
    direction: Direction,
    config: &Config,
    modifiers: &QuestModifiers,
    dt: f32,
) -> Paddle {
    let speed = paddle.speed * modifiers.paddle_speed;
    slide_paddle(paddle, direction.sign() * speed * dt, config)
}

/// Shift a paddle by `delta`, clamped to the arena
pub fn slide_paddle(paddle: &Paddle, delta: f32, config: &Config) -> Paddle {
    let mut paddle = *paddle;
    paddle.y = config.clamp_paddle_y(paddle.y + delta, paddle.height);
    paddle
}

/// Test the ball against the paddle it is travelling toward.
///
/// On contact the ball leaves at an angle proportional to where it struck
/// (center = straight, edges = `max_bounce_angle`), computed at the incoming
/// speed; the speed then grows by `ball_speed_increment` within the allowed
/// range. The ball is nudged clear of the paddle face and any pitch is spent.
pub fn check_paddle_collision(
    ball: &Ball,
    left: &Paddle,
    right: &Paddle,
    config: &Config,
    modifiers: &QuestModifiers,
) -> PaddleHit {
    let paddle = if ball.moving_toward(Side::Left) {
        left
    } else if ball.moving_toward(Side::Right) {
        right
    } else {
        return PaddleHit::default();
    };

    let paddle_x = config.paddle_x(paddle.side);
    let half_width = config.paddle_width / 2.0;
    let half_height = paddle.height / 2.0;

    // Circle vs AABB, at the face crossing first and then the current center
    let touching = |center: Vec2| {
        let closest = Vec2::new(
            center.x.clamp(paddle_x - half_width, paddle_x + half_width),
            center.y.clamp(paddle.top(), paddle.bottom()),
        );
        ((center - closest).length_squared() <= ball.radius * ball.radius)
            .then_some((center, closest))
    };
    let Some((contact, closest)) = face_crossing(ball, paddle.side, config)
        .and_then(touching)
        .or_else(|| touching(ball.pos))
    else {
        return PaddleHit::default();
    };

    let offset = ((contact.y - paddle.y) / half_height).clamp(-1.0, 1.0);
    let angle = offset * config.max_bounce_angle;
    let outward = paddle.side.opposite().toward();

    let incoming_speed = ball.speed();
    let (min_speed, max_speed) = ball_speed_bounds(config, modifiers);
    let new_speed = (incoming_speed + config.ball_speed_increment).clamp(min_speed, max_speed);

    let direction = Vec2::new(outward * angle.cos(), angle.sin());
    let mut new_ball = *ball;
    new_ball.vel = direction * new_speed;
    new_ball.pos = Vec2::new(config.contact_x(paddle.side, ball.radius), contact.y);
    new_ball.prev_pos = new_ball.pos;
    new_ball.pitch = None;

    let impact = Vec2::new(paddle_x + outward * half_width, closest.y);

    PaddleHit {
        hit: true,
        ball: Some(new_ball),
        side: Some(paddle.side),
        impact: Some(impact),
    }
}

/// Where the ball center crossed `side`'s contact plane during the last step.
///
/// A fast ball can move further than the paddle is thick in one frame, so the
/// overlap test alone would let it tunnel through. `None` when the step did not
/// cross the plane.
fn face_crossing(ball: &Ball, side: Side, config: &Config) -> Option<Vec2> {
    let face = config.contact_x(side, ball.radius);
    let toward = side.toward();
    let before = (face - ball.prev_pos.x) * toward;
    let after = (ball.pos.x - face) * toward;
    if before < 0.0 || after <= 0.0 {
        return None;
    }
    let t = before / (before + after);
    Some(ball.prev_pos.lerp(ball.pos, t))
}

/// Side awarded the point once the ball leaves the arena, if any
pub fn check_score(ball: &Ball, config: &Config) -> Option<Side> {
    if ball.pos.x < 0.0 {
        Some(Side::Right)
    } else if ball.pos.x > config.arena_width {
        Some(Side::Left)
    } else {
        None
    }
}

/// Re-center the ball and serve it toward `serve_toward`.
///
/// Speed is the initial speed scaled by the quest ball-speed modifier. The
/// serve angle is drawn within `serve_angle_spread`. The given pitch is
/// attached, or any previous pitch cleared when `None`.
pub fn reset_ball(
    ball: &Ball,
    config: &Config,
    serve_toward: Side,
    modifiers: &QuestModifiers,
    pitch: Option<crate::PitchType>,
    rng: &mut GameRng,
) -> Ball {
    let mut ball = *ball;
    ball.pos = config.center();
    ball.prev_pos = ball.pos;

    let spread = config.serve_angle_spread;
    let angle: f32 = if spread > 0.0 {
        rng.0.gen_range(-spread..=spread)
    } else {
        0.0
    };
    let (speed, _) = ball_speed_bounds(config, modifiers);
    ball.vel = Vec2::new(serve_toward.toward() * angle.cos(), angle.sin()) * speed;

    ball.pitch = pitch.map(|p| {
        ActivePitch::new(p, ball.pos.x, config.contact_x(serve_toward, ball.radius))
    });
    ball
}

/// Predict where the ball center will be when it reaches `target_x`.
///
/// The straight-line path is folded against the top and bottom bounds with a
/// triangle wave, so any number of wall bounces is accounted for. `error` is
/// added to the folded result. A ball not heading toward `target_x` predicts
/// its current height.
pub fn predict_ball_y(ball: &Ball, target_x: f32, config: &Config, error: f32) -> f32 {
    let dx = target_x - ball.pos.x;
    if ball.vel.x == 0.0 || dx * ball.vel.x < 0.0 {
        return ball.pos.y + error;
    }

    let t = dx / ball.vel.x;
    let raw_y = ball.pos.y + ball.vel.y * t;

    let (min_y, max_y) = config.ball_y_bounds(ball.radius);
    let span = max_y - min_y;
    if span <= 0.0 {
        return min_y + error;
    }

    let period = 2.0 * span;
    let m = (raw_y - min_y).rem_euclid(period);
    let folded = if m > span { period - m } else { m };
    min_y + folded + error
}
