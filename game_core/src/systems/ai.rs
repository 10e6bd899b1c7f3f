use hecs::World;

use super::current_ball;
use crate::ai::{update_ai, AiController};
use crate::{Config, GameRng, Paddle, PaddleIntent, QuestModifiers, Time};

/// Let every AI-controlled paddle pick and apply its move for this frame
pub fn drive_ai_paddles(
    world: &mut World,
    time: &Time,
    config: &Config,
    modifiers: &QuestModifiers,
    rng: &mut GameRng,
) {
    let Some(ball) = current_ball(world) else {
        return;
    };

    // Deterministic order: left before right
    let mut ai_paddles: Vec<_> = world
        .query::<(&Paddle, &AiController)>()
        .iter()
        .map(|(e, (p, _))| (e, p.side.id()))
        .collect();
    ai_paddles.sort_by_key(|(_, id)| *id);

    for (entity, _) in ai_paddles {
        let Ok((paddle, controller, intent)) =
            world.query_one_mut::<(&mut Paddle, &mut AiController, &mut PaddleIntent)>(entity)
        else {
            continue;
        };
        let step = update_ai(controller, paddle, &ball, config, modifiers, time.dt, rng);
        *paddle = step.paddle;
        intent.dir = step.direction;
    }
}
