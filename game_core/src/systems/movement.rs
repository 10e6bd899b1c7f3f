use hecs::{With, Without, World};

use crate::ai::AiController;
use crate::physics::{move_paddle, update_ball};
use crate::{Ball, Config, Events, GameEvent, GameRng, Paddle, PaddleIntent, QuestModifiers, Time};

/// Apply human paddle movement based on intents
pub fn move_paddles(world: &mut World, time: &Time, config: &Config, modifiers: &QuestModifiers) {
    for (_entity, (paddle, intent)) in
        world.query_mut::<Without<(&mut Paddle, &PaddleIntent), &AiController>>()
    {
        *paddle = move_paddle(paddle, intent.dir, config, modifiers, time.dt);
    }
}

/// Advance the ball, bending pitches and bouncing off the top/bottom walls
pub fn move_ball(
    world: &mut World,
    time: &Time,
    config: &Config,
    modifiers: &QuestModifiers,
    events: &mut Events,
    rng: &mut GameRng,
) {
    for (_entity, ball) in world.query_mut::<&mut Ball>() {
        let update = update_ball(ball, config, modifiers, time.dt, rng);
        *ball = update.ball;
        if update.hit_wall {
            events.push(GameEvent::WallHit { pos: ball.pos });
        }
    }
}

/// Number of paddles steered by the AI controller
pub fn ai_paddle_count(world: &World) -> usize {
    world.query::<With<&Paddle, &AiController>>().iter().count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::create_paddle;
    use crate::{spawn_ball, spawn_paddle, Difficulty, Direction, PaddleSkin, Side};
    use glam::Vec2;

    #[test]
    fn test_move_paddles_follows_intent() {
        let mut world = World::new();
        let config = Config::new();
        let paddle = spawn_paddle(
            &mut world,
            create_paddle(&config, Side::Left, PaddleSkin::Classic),
            None,
        );
        world.get::<&mut PaddleIntent>(paddle).unwrap().dir = Direction::Up;

        move_paddles(&mut world, &Time::new(0.1, 0.0), &config, &QuestModifiers::default());

        let y = world.get::<&Paddle>(paddle).unwrap().y;
        assert!((y - (config.arena_height / 2.0 - 42.0)).abs() < 1e-3);
    }

    #[test]
    fn test_move_paddles_skips_ai() {
        let mut world = World::new();
        let config = Config::new();
        let paddle = spawn_paddle(
            &mut world,
            create_paddle(&config, Side::Right, PaddleSkin::Classic),
            Some(AiController::new(Difficulty::Easy)),
        );
        world.get::<&mut PaddleIntent>(paddle).unwrap().dir = Direction::Down;

        move_paddles(&mut world, &Time::new(0.1, 0.0), &config, &QuestModifiers::default());

        assert_eq!(world.get::<&Paddle>(paddle).unwrap().y, config.arena_height / 2.0);
        assert_eq!(ai_paddle_count(&world), 1);
    }

    #[test]
    fn test_move_ball_reports_wall_hit() {
        let mut world = World::new();
        let config = Config::new();
        let mut events = Events::new();
        let mut rng = GameRng::new(1);
        spawn_ball(
            &mut world,
            Ball::new(Vec2::new(400.0, 9.0), Vec2::new(300.0, -300.0), 8.0),
        );

        move_ball(
            &mut world,
            &Time::default(),
            &config,
            &QuestModifiers::default(),
            &mut events,
            &mut rng,
        );

        assert!(events.ball_hit_wall());
    }
}
