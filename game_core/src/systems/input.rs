use hecs::World;

use crate::{InputQueue, Paddle, PaddleIntent};

/// Apply queued human inputs to the matching paddle intents
pub fn ingest_inputs(world: &mut World, input_queue: &mut InputQueue) {
    for (side, dir) in input_queue.inputs.drain(..) {
        for (_entity, (paddle, intent)) in world.query_mut::<(&Paddle, &mut PaddleIntent)>() {
            if paddle.side == side {
                intent.dir = dir;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::create_paddle;
    use crate::{spawn_paddle, Config, Direction, PaddleSkin, Side};

    #[test]
    fn test_inputs_reach_matching_paddle() {
        let mut world = World::new();
        let config = Config::new();
        let left = spawn_paddle(
            &mut world,
            create_paddle(&config, Side::Left, PaddleSkin::Classic),
            None,
        );
        let right = spawn_paddle(
            &mut world,
            create_paddle(&config, Side::Right, PaddleSkin::Classic),
            None,
        );

        let mut queue = InputQueue::new();
        queue.push_input(Side::Left, Direction::Up);
        ingest_inputs(&mut world, &mut queue);

        assert_eq!(world.get::<&PaddleIntent>(left).unwrap().dir, Direction::Up);
        assert_eq!(world.get::<&PaddleIntent>(right).unwrap().dir, Direction::None);
        assert!(queue.inputs.is_empty(), "Inputs are consumed");
    }

    #[test]
    fn test_intent_persists_until_changed() {
        let mut world = World::new();
        let config = Config::new();
        let left = spawn_paddle(
            &mut world,
            create_paddle(&config, Side::Left, PaddleSkin::Classic),
            None,
        );

        let mut queue = InputQueue::new();
        queue.push_input(Side::Left, Direction::Down);
        ingest_inputs(&mut world, &mut queue);
        ingest_inputs(&mut world, &mut queue);
        assert_eq!(world.get::<&PaddleIntent>(left).unwrap().dir, Direction::Down);

        queue.push_input(Side::Left, Direction::None);
        ingest_inputs(&mut world, &mut queue);
        assert_eq!(world.get::<&PaddleIntent>(left).unwrap().dir, Direction::None);
    }
}
