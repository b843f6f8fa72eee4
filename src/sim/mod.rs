//! Fixed-step simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (roster insertion order)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod draw;
pub mod entity;
pub mod rect;
pub mod roster;
pub mod tick;
pub mod world;

pub use collision::{Contact, detect, resolve};
pub use draw::{DrawCommand, Rgba, Shape};
pub use entity::{Advance, Body, Direction, EdgePolicy, Entity, EntityKind, Gravity};
pub use rect::Rect;
pub use roster::{FloorRule, GameVariant, PipePairRule, SpawnRule, VariantConfig};
pub use tick::{TickInput, tick};
pub use world::{DestroyCause, Destroyed, Outcome, ScoreGate, World, WorldEvents};
