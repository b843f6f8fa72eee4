//! Collision detection and response between rectangles
//!
//! Two phases per tick:
//! 1. [`detect`] scans the roster read-only and lists every [`Contact`]:
//!    each ball, in roster order, against every other live entity in roster
//!    order, then against every score gate.
//! 2. [`resolve`] applies the contacts in that order and records events.
//!
//! Removal never happens mid-scan, so a ball touching several bricks in one
//! tick breaks all of them and flips its vertical velocity once per brick.

use super::entity::{Body, Direction, EntityKind};
use super::world::{DestroyCause, Destroyed, World, WorldEvents};
use super::{Entity, ScoreGate};
use crate::consts::BALL_ENGLISH_SPEED;

/// One overlap found during detection. Indices point into `World::entities`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    /// Ball touched a paddle that was last pushed in `english`
    Paddle { ball: usize, english: Direction },
    Brick { ball: usize, brick: usize },
    /// Ball touched a pipe or floor segment
    Hazard { ball: usize, hazard: usize },
    Gate { ball: usize, gate: u32 },
}

/// Collect every contact of this tick without mutating anything
pub fn detect(entities: &[Entity], gates: &[ScoreGate]) -> Vec<Contact> {
    let mut contacts = Vec::new();

    for (ball_idx, ball) in entities.iter().enumerate() {
        if !ball.alive || !ball.is_ball() {
            continue;
        }

        for (idx, other) in entities.iter().enumerate() {
            if idx == ball_idx || !other.alive || !ball.rect.intersects(&other.rect) {
                continue;
            }
            let contact = match other.body {
                Body::Paddle { last_direction, .. } => Contact::Paddle {
                    ball: ball_idx,
                    english: last_direction,
                },
                Body::Brick => Contact::Brick {
                    ball: ball_idx,
                    brick: idx,
                },
                Body::Pipe { .. } | Body::Floor { .. } => Contact::Hazard {
                    ball: ball_idx,
                    hazard: idx,
                },
                Body::Ball { .. } | Body::Background => continue,
            };
            contacts.push(contact);
        }

        for gate in gates {
            if ball.rect.intersects(&gate.rect) {
                contacts.push(Contact::Gate {
                    ball: ball_idx,
                    gate: gate.id,
                });
            }
        }
    }

    contacts
}

/// Apply contacts in detection order
pub fn resolve(world: &mut World, contacts: &[Contact], events: &mut WorldEvents) {
    for contact in contacts {
        match *contact {
            Contact::Paddle { ball, english } => {
                let vel = &mut world.entities[ball].vel;
                vel.y = -vel.y;
                match english {
                    Direction::Left => vel.x = -BALL_ENGLISH_SPEED,
                    Direction::Right => vel.x = BALL_ENGLISH_SPEED,
                    Direction::None => {}
                }
                events.paddle_hits += 1;
            }

            Contact::Brick { ball, brick } => {
                let target = &mut world.entities[brick];
                if target.alive {
                    target.alive = false;
                    events.destroyed.push(Destroyed {
                        id: target.id,
                        kind: EntityKind::Brick,
                        cause: DestroyCause::Hit,
                    });
                    log::debug!("Brick {} broken", target.id);
                }
                let vel = &mut world.entities[ball].vel;
                vel.y = -vel.y;
            }

            Contact::Hazard { ball, hazard } => {
                if world.lose() {
                    events.died = true;
                    log::debug!(
                        "Ball {} hit {:?} {}",
                        world.entities[ball].id,
                        world.entities[hazard].kind(),
                        world.entities[hazard].id
                    );
                }
            }

            Contact::Gate { gate, .. } => {
                if !world.is_running() || world.last_gate == Some(gate) {
                    continue;
                }
                let wrapped = world.bump_score();
                world.last_gate = Some(gate);
                events.score_delta += 1;
                events.score_wrapped |= wrapped;
                log::debug!("Gate {} passed, score {}", gate, world.score);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::EdgePolicy;
    use crate::sim::rect::Rect;
    use crate::sim::roster::VariantConfig;
    use glam::Vec2;

    fn world_with(roster: Vec<Entity>, gates: Vec<Rect>) -> World {
        let config = VariantConfig {
            roster,
            gates,
            ..VariantConfig::empty("collision-test", 800.0, 640.0)
        };
        World::new(config, 0).unwrap()
    }

    fn run(world: &mut World) -> WorldEvents {
        let mut events = WorldEvents::default();
        let contacts = detect(&world.entities, &world.score_gates);
        resolve(world, &contacts, &mut events);
        events
    }

    #[test]
    fn test_paddle_contact_inverts_and_adds_english() {
        let mut paddle = Entity::paddle(Rect::new(360.0, 620.0, 80.0, 20.0), 10.0);
        if let Body::Paddle { last_direction, .. } = &mut paddle.body {
            *last_direction = Direction::Left;
        }
        let ball = Entity::ball(Rect::new(380.0, 601.0, 20.0, 20.0), Vec2::new(5.0, 5.0));
        let mut world = world_with(vec![paddle, ball], vec![]);

        let events = run(&mut world);
        assert_eq!(events.paddle_hits, 1);
        assert_eq!(world.entities[1].vel, Vec2::new(-2.0, -5.0));
    }

    #[test]
    fn test_paddle_moving_right_sends_ball_right() {
        let mut paddle = Entity::paddle(Rect::new(360.0, 620.0, 80.0, 20.0), 10.0);
        if let Body::Paddle { last_direction, .. } = &mut paddle.body {
            *last_direction = Direction::Right;
        }
        let ball = Entity::ball(Rect::new(380.0, 601.0, 20.0, 20.0), Vec2::new(-5.0, 5.0));
        let mut world = world_with(vec![paddle, ball], vec![]);

        run(&mut world);
        assert_eq!(world.entities[1].vel, Vec2::new(2.0, -5.0));
    }

    #[test]
    fn test_still_paddle_keeps_horizontal_speed() {
        let paddle = Entity::paddle(Rect::new(360.0, 620.0, 80.0, 20.0), 10.0);
        let ball = Entity::ball(Rect::new(380.0, 601.0, 20.0, 20.0), Vec2::new(5.0, 5.0));
        let mut world = world_with(vec![paddle, ball], vec![]);

        run(&mut world);
        assert_eq!(world.entities[1].vel, Vec2::new(5.0, -5.0));
    }

    #[test]
    fn test_two_bricks_in_one_tick_cancel_the_flip() {
        let ball = Entity::ball(Rect::new(70.0, 15.0, 20.0, 20.0), Vec2::new(5.0, -5.0));
        let a = Entity::brick(Rect::new(0.0, 0.0, 80.0, 20.0));
        let b = Entity::brick(Rect::new(82.0, 0.0, 80.0, 20.0));
        let mut world = world_with(vec![ball, a, b], vec![]);

        let events = run(&mut world);
        assert_eq!(events.bricks_broken(), 2);
        assert_eq!(world.entities[0].vel.y, -5.0);
    }

    #[test]
    fn test_three_bricks_in_one_tick_flip() {
        let ball = Entity::ball(Rect::new(75.0, 15.0, 20.0, 30.0), Vec2::new(0.0, -5.0));
        let a = Entity::brick(Rect::new(0.0, 0.0, 80.0, 20.0));
        let b = Entity::brick(Rect::new(82.0, 0.0, 80.0, 20.0));
        let c = Entity::brick(Rect::new(60.0, 40.0, 80.0, 20.0));
        let mut world = world_with(vec![ball, a, b, c], vec![]);

        let events = run(&mut world);
        assert_eq!(events.bricks_broken(), 3);
        assert_eq!(world.entities[0].vel.y, 5.0);
    }

    #[test]
    fn test_two_balls_one_brick_removed_once() {
        let a = Entity::ball(Rect::new(10.0, 15.0, 20.0, 20.0), Vec2::new(3.0, -5.0));
        let b = Entity::ball(Rect::new(50.0, 15.0, 20.0, 20.0), Vec2::new(-3.0, -5.0));
        let brick = Entity::brick(Rect::new(0.0, 0.0, 80.0, 20.0));
        let mut world = world_with(vec![a, b, brick], vec![]);

        let events = run(&mut world);
        assert_eq!(events.bricks_broken(), 1);
        assert_eq!(events.destroyed.len(), 1);
        assert_eq!(world.entities[0].vel.y, 5.0);
        assert_eq!(world.entities[1].vel.y, 5.0);
        assert!(!world.entities[2].alive);
    }

    #[test]
    fn test_hazard_contact_loses_once() {
        let bird = Entity::ball(Rect::new(100.0, 100.0, 54.0, 44.0), Vec2::ZERO);
        let pipe = Entity::pipe(Rect::new(120.0, 0.0, 52.0, 120.0), 2.0, EdgePolicy::Destroy);
        let floor = Entity::floor(Rect::new(0.0, 130.0, 336.0, 112.0), 2.0, EdgePolicy::Destroy);
        let mut world = world_with(vec![bird, pipe, floor], vec![]);

        let events = run(&mut world);
        assert!(events.died);
        assert!(!world.is_running());
    }

    #[test]
    fn test_gate_scores_once_while_inside() {
        let bird = Entity::ball(Rect::new(100.0, 100.0, 54.0, 44.0), Vec2::ZERO);
        let mut world = world_with(vec![bird], vec![Rect::new(120.0, 0.0, 52.0, 400.0)]);

        assert_eq!(run(&mut world).score_delta, 1);
        assert_eq!(run(&mut world).score_delta, 0);
        assert_eq!(world.score, 1);
    }

    #[test]
    fn test_background_never_collides() {
        let bg = Entity::background(Rect::new(0.0, 0.0, 800.0, 640.0));
        let ball = Entity::ball(Rect::new(100.0, 100.0, 20.0, 20.0), Vec2::new(5.0, 5.0));
        let world = world_with(vec![bg, ball], vec![]);
        assert!(detect(&world.entities, &world.score_gates).is_empty());
    }
}
