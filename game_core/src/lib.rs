pub mod ai;
pub mod arena;
pub mod components;
pub mod config;
pub mod params;
pub mod physics;
pub mod pitch;
pub mod resources;
pub mod systems;

pub use ai::{AiConfig, AiController};
pub use arena::*;
pub use components::*;
pub use config::*;
pub use params::*;
pub use pitch::{get_pitch_info, get_random_pitch, PitchInfo, PitchType};
pub use resources::*;

use hecs::World;
use systems::*;

/// Run one frame of the deterministic simulation.
///
/// The frame advances by `time.dt` (capped at `MAX_DT`) in a single pass; there
/// is no sub-stepping. Order matters: walls reflect inside `move_ball` before
/// paddles are tested, and scoring runs last.
#[allow(clippy::too_many_arguments)]
pub fn step(
    world: &mut World,
    time: &mut Time,
    config: &Config,
    modifiers: &QuestModifiers,
    score: &mut Score,
    rally: &mut RallyStats,
    events: &mut Events,
    input_queue: &mut InputQueue,
    rng: &mut GameRng,
) {
    let frame = Time {
        dt: time.dt.clamp(0.0, Params::MAX_DT),
        now: time.now,
    };

    // Clear events at start of frame
    events.clear();

    // 1. Ingest inputs (apply to paddle intents)
    ingest_inputs(world, input_queue);

    // 2. AI paddles decide and move
    drive_ai_paddles(world, &frame, config, modifiers, rng);

    // 3. Human paddles follow their intents
    move_paddles(world, &frame, config, modifiers);

    // 4. Move ball (pitch curve, walls)
    move_ball(world, &frame, config, modifiers, events, rng);

    // 5. Ball vs paddles
    check_collisions(world, config, modifiers, rally, events);

    // 6. Ball left the arena
    check_scoring(world, config, modifiers, score, rally, events, rng);

    time.now += frame.dt;
}

/// Helper to spawn a paddle entity, AI-driven when a controller is given
pub fn spawn_paddle(world: &mut World, paddle: Paddle, ai: Option<AiController>) -> hecs::Entity {
    match ai {
        Some(controller) => world.spawn((paddle, PaddleIntent::new(), controller)),
        None => world.spawn((paddle, PaddleIntent::new())),
    }
}

/// Helper to spawn the ball entity
pub fn spawn_ball(world: &mut World, ball: Ball) -> hecs::Entity {
    world.spawn((ball,))
}
