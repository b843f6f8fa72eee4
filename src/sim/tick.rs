//! Fixed timestep simulation tick
//!
//! Advance every entity, collide, cull, then top the roster back up.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::{detect, resolve};
use super::entity::{Advance, Entity, EntityKind};
use super::roster::{FloorRule, PipePairRule, SpawnRule};
use super::world::{DestroyCause, Destroyed, Outcome, World, WorldEvents};
use crate::consts::SIM_DT;

/// Largest dt multiple a single tick will simulate
const MAX_TICK_SCALE: f32 = 4.0;

/// Input signals for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    /// Paddle left (held)
    pub move_left: bool,
    /// Paddle right (held)
    pub move_right: bool,
    /// Gravity ball jump (pressed this frame)
    pub jump: bool,
    /// Start over after a loss (pressed this frame)
    pub restart: bool,
}

/// Ratio of `dt` to the fixed step, clamped to a sane range
fn tick_scale(dt: f32) -> f32 {
    let scale = dt / SIM_DT;
    if scale.is_finite() {
        scale.clamp(0.0, MAX_TICK_SCALE)
    } else {
        1.0
    }
}

/// Advance the world by one fixed timestep
pub fn tick(world: &mut World, input: &TickInput, dt: f32) -> WorldEvents {
    let mut events = WorldEvents::default();

    if world.outcome != Outcome::Running {
        if input.restart && world.config.replay_on_loss {
            world.reset();
            events.restarted = true;
        }
        return events;
    }

    world.time_ticks += 1;
    let scale = tick_scale(dt);
    let bounds = world.bounds;

    let mut fell_out = false;
    for entity in &mut world.entities {
        match entity.advance(scale, input, &bounds) {
            Advance::FellOut => fell_out = true,
            Advance::LeftField => events.destroyed.push(Destroyed {
                id: entity.id,
                kind: entity.kind(),
                cause: DestroyCause::LeftField,
            }),
            Advance::Wrapped => log::trace!("{:?} {} wrapped", entity.kind(), entity.id),
            Advance::Steady => {}
        }
    }

    let gate_dx = world.config.gate_speed * scale;
    for gate in &mut world.score_gates {
        gate.rect.left -= gate_dx;
    }
    world.score_gates.retain(|g| g.rect.right() >= bounds.left);

    if fell_out && world.lose() {
        events.died = true;
    }

    if world.is_running() {
        let contacts = detect(&world.entities, &world.score_gates);
        resolve(world, &contacts, &mut events);
    }

    world.entities.retain(|e| e.alive);

    if world.is_running() {
        for i in 0..world.config.spawns.len() {
            let rule = world.config.spawns[i];
            match rule {
                SpawnRule::PipePairs(rule) => spawn_pipe_pair(world, &rule, &mut events),
                SpawnRule::FloorSegments(rule) => spawn_floor(world, &rule, &mut events),
            }
        }
    }

    log::trace!(
        "tick {}: {} entities, score {}",
        world.time_ticks,
        world.entities.len(),
        world.score
    );
    events
}

/// Append one pipe pair (and its gate) while pipes are below the low-water mark
fn spawn_pipe_pair(world: &mut World, rule: &PipePairRule, events: &mut WorldEvents) {
    let pipes = world.count(EntityKind::Pipe);
    if pipes >= rule.low_water {
        return;
    }

    let left = if pipes < rule.sparse_below {
        rule.sparse_x
    } else {
        rule.dense_x
    };
    let offset = world
        .rng_mut()
        .random_range(rule.gap_offset_min..=rule.gap_offset_max) as f32;
    let (top, bottom, gate) = rule.pair_at(left, offset, world.bounds.bottom());

    events.spawned.push(world.spawn(top));
    events.spawned.push(world.spawn(bottom));
    world.add_gate(gate);
    log::debug!("Spawned pipe pair at x={} (offset {})", left, offset);
}

/// Append one floor segment while segments are below the low-water mark
fn spawn_floor(world: &mut World, rule: &FloorRule, events: &mut WorldEvents) {
    if world.count(EntityKind::Floor) >= rule.low_water {
        return;
    }
    let segment: Entity = rule.segment_at(rule.spawn_x, world.bounds.bottom());
    events.spawned.push(world.spawn(segment));
    log::debug!("Spawned floor segment at x={}", rule.spawn_x);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::EdgePolicy;
    use crate::sim::rect::Rect;
    use crate::sim::roster::{GameVariant, VariantConfig};
    use glam::Vec2;

    fn world_with(roster: Vec<Entity>, gates: Vec<Rect>, gate_speed: f32) -> World {
        let config = VariantConfig {
            roster,
            gates,
            gate_speed,
            ..VariantConfig::empty("tick-test", 800.0, 640.0)
        };
        World::new(config, 0).unwrap()
    }

    #[test]
    fn test_ball_breaks_brick_below() {
        // Ball resting 1px above the brick, falling at 5 per tick
        let ball = Entity::ball(Rect::new(400.0, 279.0, 20.0, 20.0), Vec2::new(0.0, 5.0));
        let brick = Entity::brick(Rect::new(380.0, 300.0, 80.0, 20.0));
        let mut world = world_with(vec![ball, brick], vec![], 0.0);
        let before = world.bricks_remaining();

        let events = world.tick(&TickInput::default(), SIM_DT);
        assert_eq!(world.bricks_remaining(), before - 1);
        assert_eq!(events.bricks_broken(), 1);
        assert!(world.balls().all(|b| b.vel.y == -5.0));
    }

    #[test]
    fn test_fall_out_is_lost_until_reset() {
        let ball = Entity::ball(Rect::new(400.0, 617.0, 20.0, 20.0), Vec2::new(5.0, 5.0));
        let mut world = world_with(vec![ball], vec![], 0.0);
        world.config.replay_on_loss = true;

        let events = world.tick(&TickInput::default(), SIM_DT);
        assert!(events.died);
        assert_eq!(world.outcome, Outcome::Lost);

        let frozen = world.entities.clone();
        for _ in 0..10 {
            let events = world.tick(&TickInput::default(), SIM_DT);
            assert!(events.is_empty());
            assert_eq!(world.outcome, Outcome::Lost);
        }
        assert_eq!(world.entities, frozen);

        let restart = TickInput {
            restart: true,
            ..Default::default()
        };
        let events = world.tick(&restart, SIM_DT);
        assert!(events.restarted);
        assert_eq!(world.outcome, Outcome::Running);
    }

    #[test]
    fn test_restart_ignored_without_replay() {
        let ball = Entity::ball(Rect::new(400.0, 617.0, 20.0, 20.0), Vec2::new(5.0, 5.0));
        let mut world = world_with(vec![ball], vec![], 0.0);
        world.tick(&TickInput::default(), SIM_DT);

        let restart = TickInput {
            restart: true,
            ..Default::default()
        };
        let events = world.tick(&restart, SIM_DT);
        assert!(!events.restarted);
        assert_eq!(world.outcome, Outcome::Lost);
    }

    #[test]
    fn test_gate_scoring_across_gates() {
        // A motionless ball stands in for the bird
        let bird = Entity::ball(Rect::new(100.0, 200.0, 54.0, 44.0), Vec2::ZERO);
        let g1 = Rect::new(150.0, 0.0, 52.0, 600.0);
        let g2 = Rect::new(250.0, 0.0, 52.0, 600.0);
        let mut world = world_with(vec![bird], vec![g1, g2], 10.0);

        // Gates scroll left by 10 per tick; g1 reaches the bird first
        let mut scores = Vec::new();
        for _ in 0..30 {
            world.tick(&TickInput::default(), SIM_DT);
            scores.push(world.score);
        }
        // g1 overlaps on ticks 1-10, g2 from tick 10 onward
        assert_eq!(scores[0], 1);
        assert_eq!(scores[5], 1);
        assert_eq!(*scores.last().unwrap(), 2);
        assert_eq!(world.score, 2);
    }

    #[test]
    fn test_pipes_and_gates_leave_the_field() {
        let bird = Entity::ball(Rect::new(400.0, 0.0, 20.0, 20.0), Vec2::ZERO);
        let pipe = Entity::pipe(Rect::new(-45.0, 500.0, 52.0, 100.0), 2.0, EdgePolicy::Destroy);
        let mut world = world_with(vec![bird, pipe], vec![Rect::new(-45.0, 0.0, 52.0, 400.0)], 2.0);

        let mut gone = Vec::new();
        for _ in 0..4 {
            gone.extend(world.tick(&TickInput::default(), SIM_DT).destroyed);
        }
        assert_eq!(gone.len(), 1);
        assert_eq!(gone[0].kind, EntityKind::Pipe);
        assert_eq!(gone[0].cause, DestroyCause::LeftField);
        assert!(world.score_gates.is_empty());
        assert_eq!(world.count(EntityKind::Pipe), 0);
    }

    #[test]
    fn test_scroller_tops_up_pipes_and_floor() {
        let mut world = World::new(GameVariant::Flappy.config(), 42).unwrap();
        assert_eq!(world.count(EntityKind::Pipe), 2);
        assert_eq!(world.count(EntityKind::Floor), 2);

        let events = world.tick(&TickInput::default(), SIM_DT);
        assert_eq!(events.spawned.len(), 3);
        assert_eq!(world.count(EntityKind::Pipe), 4);
        assert_eq!(world.count(EntityKind::Floor), 3);

        world.tick(&TickInput::default(), SIM_DT);
        world.tick(&TickInput::default(), SIM_DT);
        assert_eq!(world.count(EntityKind::Pipe), 6);
        assert_eq!(world.score_gates.len(), 3);
    }

    #[test]
    fn test_same_seed_same_course() {
        let mut a = World::new(GameVariant::Flappy.config(), 99).unwrap();
        let mut b = World::new(GameVariant::Flappy.config(), 99).unwrap();
        let inputs = [
            TickInput::default(),
            TickInput {
                jump: true,
                ..Default::default()
            },
            TickInput::default(),
        ];
        for input in inputs.iter().cycle().take(60) {
            a.tick(input, SIM_DT);
            b.tick(input, SIM_DT);
        }
        assert_eq!(a.entities, b.entities);
        assert_eq!(a.score_gates, b.score_gates);
    }

    #[test]
    fn test_nonfinite_dt_uses_fixed_step() {
        assert_eq!(tick_scale(f32::NAN), 1.0);
        assert_eq!(tick_scale(SIM_DT), 1.0);
        assert_eq!(tick_scale(-1.0), 0.0);
        assert_eq!(tick_scale(10.0), MAX_TICK_SCALE);
    }
}
