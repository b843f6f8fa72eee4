//! Render intents produced by the simulation
//!
//! Plain data handed to the renderer; nothing here touches a surface.

use serde::{Deserialize, Serialize};

use super::rect::Rect;

/// RGBA color, components in 0..=1
pub type Rgba = [f32; 4];

/// Primitive the Display should draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Shape {
    Rect,
    Ellipse,
}

/// One draw request for one entity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DrawCommand {
    pub shape: Shape,
    pub rect: Rect,
    pub color: Rgba,
    /// Painter's order, lower layers first
    pub layer: u8,
}

/// Colors for game elements
pub mod colors {
    use super::Rgba;

    pub const BACKGROUND: Rgba = [0.0, 0.0, 0.0, 1.0];
    pub const SKY: Rgba = [0.31, 0.75, 0.79, 1.0];
    pub const PADDLE: Rgba = [0.0, 0.0, 1.0, 1.0];
    pub const BALL: Rgba = [1.0, 1.0, 1.0, 1.0];
    pub const BIRD: Rgba = [1.0, 0.85, 0.2, 1.0];
    pub const BRICK: Rgba = [1.0, 0.0, 0.0, 1.0];
    pub const PIPE: Rgba = [0.0, 1.0, 0.0, 1.0];
    pub const FLOOR: Rgba = [0.87, 0.85, 0.58, 1.0];
}
