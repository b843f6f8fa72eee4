//! World state: the live roster, score gates and session outcome
//!
//! The world exclusively owns its entities. Everything that mutates them goes
//! through [`World::tick`] (advance, collide, cull, spawn) or [`World::reset`].

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::draw::DrawCommand;
use super::entity::{Entity, EntityKind};
use super::rect::Rect;
use super::roster::VariantConfig;
use super::tick::{TickInput, tick};
use crate::consts::SCORE_WRAP;
use crate::error::ConfigError;

/// Terminal classification of a play session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Running,
    Lost,
    /// Reserved; no variant currently declares a win
    Won,
}

/// Invisible scoring zone between a pipe pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreGate {
    pub id: u32,
    pub rect: Rect,
}

/// Why an entity left the world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DestroyCause {
    /// Broken by a ball
    Hit,
    /// Scrolled off the left edge
    LeftField,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Destroyed {
    pub id: u32,
    pub kind: EntityKind,
    pub cause: DestroyCause,
}

/// Side effects of one tick, for audio and front ends to react to
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorldEvents {
    /// Number of scoring events this tick
    pub score_delta: u32,
    /// A scoring event rolled the counter over
    pub score_wrapped: bool,
    /// The session was lost this tick
    pub died: bool,
    /// The world was reset by a restart input
    pub restarted: bool,
    pub paddle_hits: u32,
    pub destroyed: Vec<Destroyed>,
    /// Ids of entities appended by spawn rules
    pub spawned: Vec<u32>,
}

impl WorldEvents {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Bricks removed by ball contact this tick
    pub fn bricks_broken(&self) -> usize {
        self.destroyed
            .iter()
            .filter(|d| d.kind == EntityKind::Brick && d.cause == DestroyCause::Hit)
            .count()
    }
}

/// Complete simulation state for one game variant
#[derive(Debug, Clone)]
pub struct World {
    pub config: VariantConfig,
    /// Play field in world units
    pub bounds: Rect,
    /// Live entities in insertion order
    pub entities: Vec<Entity>,
    pub outcome: Outcome,
    pub score: u32,
    pub score_gates: Vec<ScoreGate>,
    /// Gate that scored most recently
    pub last_gate: Option<u32>,
    /// Seed for spawn randomness, reused on reset
    pub seed: u64,
    /// Simulation tick counter since the last reset
    pub time_ticks: u64,
    rng: Pcg32,
    next_id: u32,
}

impl World {
    /// Build a world from a validated variant configuration
    pub fn new(config: VariantConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut world = Self {
            bounds: config.bounds(),
            config,
            entities: Vec::new(),
            outcome: Outcome::Running,
            score: 0,
            score_gates: Vec::new(),
            last_gate: None,
            seed,
            time_ticks: 0,
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        };
        world.populate();
        log::info!(
            "World '{}' ready: {} entities, {} gates",
            world.config.name,
            world.entities.len(),
            world.score_gates.len()
        );
        Ok(world)
    }

    fn populate(&mut self) {
        let roster = self.config.roster.clone();
        for entity in roster {
            self.spawn(entity);
        }
        let gates = self.config.gates.clone();
        for rect in gates {
            self.add_gate(rect);
        }
    }

    /// Restore the initial roster and clear score and outcome
    pub fn reset(&mut self) {
        self.entities.clear();
        self.score_gates.clear();
        self.outcome = Outcome::Running;
        self.score = 0;
        self.last_gate = None;
        self.time_ticks = 0;
        self.rng = Pcg32::seed_from_u64(self.seed);
        self.next_id = 1;
        self.populate();
        log::info!("World '{}' reset", self.config.name);
    }

    /// Advance the world by one tick
    pub fn tick(&mut self, input: &TickInput, dt: f32) -> WorldEvents {
        tick(self, input, dt)
    }

    /// Allocate a new entity or gate ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Append an entity, assigning it a fresh id
    pub fn spawn(&mut self, mut entity: Entity) -> u32 {
        entity.id = self.next_entity_id();
        entity.alive = true;
        let id = entity.id;
        self.entities.push(entity);
        id
    }

    pub fn add_gate(&mut self, rect: Rect) -> u32 {
        let id = self.next_entity_id();
        self.score_gates.push(ScoreGate { id, rect });
        id
    }

    pub fn rng_mut(&mut self) -> &mut Pcg32 {
        &mut self.rng
    }

    /// Live entities of one kind
    pub fn count(&self, kind: EntityKind) -> usize {
        self.entities
            .iter()
            .filter(|e| e.alive && e.kind() == kind)
            .count()
    }

    pub fn bricks_remaining(&self) -> usize {
        self.count(EntityKind::Brick)
    }

    pub fn entity(&self, id: u32) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    pub fn balls(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter().filter(|e| e.is_ball())
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.outcome == Outcome::Running
    }

    /// Running -> Lost. Returns false if the session had already ended.
    pub fn lose(&mut self) -> bool {
        if self.outcome != Outcome::Running {
            return false;
        }
        self.outcome = Outcome::Lost;
        log::info!(
            "World '{}' lost after {} ticks, score {}",
            self.config.name,
            self.time_ticks,
            self.score
        );
        true
    }

    /// Count one scoring event. The single-digit counter resets to 0 when it
    /// is already at the wrap value, then increments. Returns true on wrap.
    pub fn bump_score(&mut self) -> bool {
        let wrapped = self.score >= SCORE_WRAP;
        if wrapped {
            self.score = 0;
        }
        self.score += 1;
        wrapped
    }

    /// Draw commands for every live entity, lowest layer first
    pub fn render_intents(&self) -> Vec<DrawCommand> {
        let mut commands: Vec<DrawCommand> = self
            .entities
            .iter()
            .filter(|e| e.alive)
            .map(Entity::render_intent)
            .collect();
        commands.sort_by_key(|c| c.layer);
        commands
    }
}
