pub mod ai;
pub mod collision;
pub mod input;
pub mod movement;
pub mod scoring;

pub use ai::*;
pub use collision::*;
pub use input::*;
pub use movement::*;
pub use scoring::*;

use crate::Ball;
use hecs::World;

/// Copy of the (single) ball, if one is spawned
pub(crate) fn current_ball(world: &World) -> Option<Ball> {
    world
        .query::<&Ball>()
        .iter()
        .next()
        .map(|(_e, ball)| *ball)
}
