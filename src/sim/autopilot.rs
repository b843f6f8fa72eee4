//! Demo mode: computer-generated input
//!
//! Reads the world and proposes the input a competent player would give.
//! Paddle games track the first ball; the scroller keeps the bird near the
//! middle of the next gap, above the ground.

use super::entity::{Body, Entity, EntityKind};
use super::tick::TickInput;
use super::world::{Outcome, World};

/// Horizontal slack before the paddle bothers to move
const PADDLE_DEADZONE: f32 = 6.0;
/// Keep the bird this far above the ground
const GROUND_MARGIN: f32 = 16.0;

/// Suggested input for the next tick
pub fn suggest(world: &World) -> TickInput {
    if world.outcome == Outcome::Lost {
        return TickInput {
            restart: world.config.replay_on_loss,
            ..Default::default()
        };
    }

    let mut input = TickInput::default();
    let Some(ball) = world.balls().next() else {
        return input;
    };

    match ball.body {
        Body::Ball { gravity: Some(_) } => input.jump = should_jump(world, ball),
        _ => {
            if let Some(paddle) = world.entities.iter().find(|e| e.kind() == EntityKind::Paddle) {
                let dx = ball.rect.center().x - paddle.rect.center().x;
                input.move_left = dx < -PADDLE_DEADZONE;
                input.move_right = dx > PADDLE_DEADZONE;
            }
        }
    }
    input
}

fn should_jump(world: &World, bird: &Entity) -> bool {
    // Nearest gap not yet passed
    let gap = world
        .score_gates
        .iter()
        .filter(|g| g.rect.right() >= bird.rect.left)
        .min_by(|a, b| a.rect.left.total_cmp(&b.rect.left));

    let ground = world
        .entities
        .iter()
        .filter(|e| e.kind() == EntityKind::Floor)
        .map(|e| e.rect.top)
        .fold(world.bounds.bottom(), f32::min);

    let mut target = gap.map_or(world.bounds.center().y, |g| g.rect.center().y);
    target = target.min(ground - GROUND_MARGIN - bird.rect.height / 2.0);

    bird.vel.y >= 0.0 && bird.rect.center().y > target
}
