use hecs::World;

use super::current_ball;
use crate::physics::check_paddle_collision;
use crate::{Ball, Config, Events, GameEvent, Paddle, QuestModifiers, RallyStats, Side};

/// Check the ball against the paddle it is heading for
pub fn check_collisions(
    world: &mut World,
    config: &Config,
    modifiers: &QuestModifiers,
    rally: &mut RallyStats,
    events: &mut Events,
) {
    let Some(ball) = current_ball(world) else {
        return;
    };

    let mut left = None;
    let mut right = None;
    for (_entity, paddle) in world.query::<&Paddle>().iter() {
        match paddle.side {
            Side::Left => left = Some(*paddle),
            Side::Right => right = Some(*paddle),
        }
    }
    let (Some(left), Some(right)) = (left, right) else {
        return;
    };

    let result = check_paddle_collision(&ball, &left, &right, config, modifiers);
    let (Some(new_ball), Some(side)) = (result.ball, result.side) else {
        return;
    };

    for (_entity, ball) in world.query_mut::<&mut Ball>() {
        *ball = new_ball;
    }

    let rally_len = rally.hit();
    events.push(GameEvent::PaddleHit {
        side,
        impact: result.impact.unwrap_or(new_ball.pos),
        speed: new_ball.speed(),
        rally: rally_len,
    });
}
