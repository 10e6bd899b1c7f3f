use hecs::World;

use crate::ai::{reset_ai_state, AiController};
use crate::physics::{check_score, reset_ball};
use crate::pitch::get_random_pitch;
use crate::{
    Ball, Config, Events, GameEvent, GameRng, Paddle, QuestModifiers, RallyStats, Score, Side,
};

/// Check if the ball left the arena, award the point and serve again.
///
/// The side that conceded receives the next serve. When the server is an AI
/// paddle the serve may carry a pitch; human serves are always straight.
#[allow(clippy::too_many_arguments)]
pub fn check_scoring(
    world: &mut World,
    config: &Config,
    modifiers: &QuestModifiers,
    score: &mut Score,
    rally: &mut RallyStats,
    events: &mut Events,
    rng: &mut GameRng,
) {
    let Some(scorer) = world
        .query::<&Ball>()
        .iter()
        .find_map(|(_e, ball)| check_score(ball, config))
    else {
        return;
    };

    score.increment(scorer);
    rally.end_point();
    log::info!("{:?} scores ({} - {})", scorer, score.left, score.right);
    events.push(GameEvent::Score {
        scorer,
        left: score.left,
        right: score.right,
    });

    serve(world, config, modifiers, scorer, events, rng);

    for (_entity, controller) in world.query_mut::<&mut AiController>() {
        reset_ai_state(controller);
    }
}

/// Re-center the ball and send it from `server` toward the other side
pub fn serve(
    world: &mut World,
    config: &Config,
    modifiers: &QuestModifiers,
    server: Side,
    events: &mut Events,
    rng: &mut GameRng,
) {
    let server_difficulty = world
        .query::<(&Paddle, &AiController)>()
        .iter()
        .find(|(_e, (paddle, _))| paddle.side == server)
        .map(|(_e, (_, controller))| controller.difficulty);

    let pitch = server_difficulty.and_then(|difficulty| get_random_pitch(difficulty, rng));
    if let Some(pitch) = pitch {
        log::debug!("{:?} serves a {:?}", server, pitch);
        events.push(GameEvent::PitchThrown { pitch, server });
    }

    let receiver = server.opposite();
    for (_entity, ball) in world.query_mut::<&mut Ball>() {
        *ball = reset_ball(ball, config, receiver, modifiers, pitch, rng);
    }
}
